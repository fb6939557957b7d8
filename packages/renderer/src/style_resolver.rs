//! # Style Resolver
//!
//! Expands a partial [`StyleSystem`] into a [`ResolvedStyle`] with no optional
//! fields.
//!
//! ## Precedence
//!
//! Lowest to highest:
//!
//! 1. Built-in defaults
//! 2. Theme preset tokens (`preset`)
//! 3. Typography preset fonts (`typography.preset`, else the theme's recommendation)
//! 4. Palette colors (`theme.colors`), mapped onto semantic tokens
//! 5. Explicit fonts (`theme.fonts`)
//! 6. Advanced token overrides (`tokens`)
//!
//! ## Determinism Contract
//!
//! Resolution is a pure function of its input. Unknown presets and invalid
//! colors are skipped with a warning; they never fail the resolution.
//! Resolving the explicit form of a resolved style (`StyleSystem::from(&resolved)`)
//! returns the same resolved style.

use crate::color::{adjust_color, is_light_color, is_valid_color};
use crate::presets::{self, font_stack, ScaleSteps, DEFAULT_SCALE};
use letter_schema::{
    AnimationMood, Block, Compose, EffectsSpec, FontChoice, FontsSpec, GlobalAnimation,
    PaletteSpec, RadiusSpec, ShadowSpec, SpacingSpec, StyleSystem, ThemeSpec, TokenOverrides,
    TypographySpec,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// A fully resolved style. Every field is concrete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub palette: Palette,
    pub tokens: SemanticTokens,
    pub typography: ResolvedTypography,
    pub effects: ResolvedEffects,
    pub spacing: ResolvedSpacing,
    pub animation: ResolvedAnimation,
    /// Per-block token overrides, applied by [`ResolvedStyle::for_block`]
    pub block_overrides: BTreeMap<String, TokenOverrides>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

impl Palette {
    fn from_tokens(tokens: &SemanticTokens) -> Self {
        Self {
            primary: tokens.accent_default.clone(),
            secondary: tokens.accent_secondary.clone(),
            background: tokens.bg_page.clone(),
            text: tokens.fg_default.clone(),
            accent: tokens.accent_default.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokens {
    pub bg_page: String,
    pub bg_section: String,
    pub bg_section_alt: String,
    pub bg_card: String,
    pub bg_overlay: String,
    pub fg_default: String,
    pub fg_muted: String,
    pub fg_emphasis: String,
    pub fg_inverse: String,
    pub fg_on_accent: String,
    pub accent_default: String,
    pub accent_hover: String,
    pub accent_active: String,
    pub accent_secondary: String,
    pub border_default: String,
    pub border_emphasis: String,
    pub border_muted: String,
}

impl Default for SemanticTokens {
    fn default() -> Self {
        Self {
            bg_page: "#ffffff".into(),
            bg_section: "#ffffff".into(),
            bg_section_alt: "#f8f8f8".into(),
            bg_card: "#ffffff".into(),
            bg_overlay: "rgba(0, 0, 0, 0.5)".into(),
            fg_default: "#1a1a1a".into(),
            fg_muted: "#6b6b6b".into(),
            fg_emphasis: "#000000".into(),
            fg_inverse: "#ffffff".into(),
            fg_on_accent: "#ffffff".into(),
            accent_default: "#c9a86c".into(),
            accent_hover: "#b8975b".into(),
            accent_active: "#a7864a".into(),
            accent_secondary: "#e8d4b8".into(),
            border_default: "#e5e5e5".into(),
            border_emphasis: "#1a1a1a".into(),
            border_muted: "#f0f0f0".into(),
        }
    }
}

impl From<&presets::PresetTokens> for SemanticTokens {
    fn from(t: &presets::PresetTokens) -> Self {
        Self {
            bg_page: t.bg_page.into(),
            bg_section: t.bg_section.into(),
            bg_section_alt: t.bg_section_alt.into(),
            bg_card: t.bg_card.into(),
            bg_overlay: t.bg_overlay.into(),
            fg_default: t.fg_default.into(),
            fg_muted: t.fg_muted.into(),
            fg_emphasis: t.fg_emphasis.into(),
            fg_inverse: t.fg_inverse.into(),
            fg_on_accent: t.fg_on_accent.into(),
            accent_default: t.accent_default.into(),
            accent_hover: t.accent_hover.into(),
            accent_active: t.accent_active.into(),
            accent_secondary: t.accent_secondary.into(),
            border_default: t.border_default.into(),
            border_emphasis: t.border_emphasis.into(),
            border_muted: t.border_muted.into(),
        }
    }
}

impl SemanticTokens {
    /// Name/slot pairs in CSS variable order
    fn slots_mut(&mut self) -> [(&'static str, &mut String); 17] {
        [
            ("bg-page", &mut self.bg_page),
            ("bg-section", &mut self.bg_section),
            ("bg-section-alt", &mut self.bg_section_alt),
            ("bg-card", &mut self.bg_card),
            ("bg-overlay", &mut self.bg_overlay),
            ("fg-default", &mut self.fg_default),
            ("fg-muted", &mut self.fg_muted),
            ("fg-emphasis", &mut self.fg_emphasis),
            ("fg-inverse", &mut self.fg_inverse),
            ("fg-on-accent", &mut self.fg_on_accent),
            ("accent-default", &mut self.accent_default),
            ("accent-hover", &mut self.accent_hover),
            ("accent-active", &mut self.accent_active),
            ("accent-secondary", &mut self.accent_secondary),
            ("border-default", &mut self.border_default),
            ("border-emphasis", &mut self.border_emphasis),
            ("border-muted", &mut self.border_muted),
        ]
    }

    pub fn entries(&self) -> [(&'static str, &str); 17] {
        [
            ("bg-page", &self.bg_page),
            ("bg-section", &self.bg_section),
            ("bg-section-alt", &self.bg_section_alt),
            ("bg-card", &self.bg_card),
            ("bg-overlay", &self.bg_overlay),
            ("fg-default", &self.fg_default),
            ("fg-muted", &self.fg_muted),
            ("fg-emphasis", &self.fg_emphasis),
            ("fg-inverse", &self.fg_inverse),
            ("fg-on-accent", &self.fg_on_accent),
            ("accent-default", &self.accent_default),
            ("accent-hover", &self.accent_hover),
            ("accent-active", &self.accent_active),
            ("accent-secondary", &self.accent_secondary),
            ("border-default", &self.border_default),
            ("border-emphasis", &self.border_emphasis),
            ("border-muted", &self.border_muted),
        ]
    }

    /// Apply every valid override; invalid colors are skipped
    pub fn apply(&mut self, overrides: &TokenOverrides) {
        let values = override_values(overrides);
        for ((name, slot), value) in self.slots_mut().into_iter().zip(values) {
            if let Some(value) = value {
                if is_valid_color(value) {
                    *slot = value.clone();
                } else {
                    warn!(token = name, value = %value, "Invalid token color, ignoring");
                }
            }
        }
    }
}

fn override_values(t: &TokenOverrides) -> [&Option<String>; 17] {
    [
        &t.bg_page,
        &t.bg_section,
        &t.bg_section_alt,
        &t.bg_card,
        &t.bg_overlay,
        &t.fg_default,
        &t.fg_muted,
        &t.fg_emphasis,
        &t.fg_inverse,
        &t.fg_on_accent,
        &t.accent_default,
        &t.accent_hover,
        &t.accent_active,
        &t.accent_secondary,
        &t.border_default,
        &t.border_emphasis,
        &t.border_muted,
    ]
}

impl From<&SemanticTokens> for TokenOverrides {
    fn from(t: &SemanticTokens) -> Self {
        Self {
            bg_page: Some(t.bg_page.clone()),
            bg_section: Some(t.bg_section.clone()),
            bg_section_alt: Some(t.bg_section_alt.clone()),
            bg_card: Some(t.bg_card.clone()),
            bg_overlay: Some(t.bg_overlay.clone()),
            fg_default: Some(t.fg_default.clone()),
            fg_muted: Some(t.fg_muted.clone()),
            fg_emphasis: Some(t.fg_emphasis.clone()),
            fg_inverse: Some(t.fg_inverse.clone()),
            fg_on_accent: Some(t.fg_on_accent.clone()),
            accent_default: Some(t.accent_default.clone()),
            accent_hover: Some(t.accent_hover.clone()),
            accent_active: Some(t.accent_active.clone()),
            accent_secondary: Some(t.accent_secondary.clone()),
            border_default: Some(t.border_default.clone()),
            border_emphasis: Some(t.border_emphasis.clone()),
            border_muted: Some(t.border_muted.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFont {
    /// Primary family name
    pub family: String,
    /// CSS `font-family` value with fallbacks
    pub stack: String,
    pub weight: u16,
}

impl ResolvedFont {
    pub fn new(family: &str, weight: u16) -> Self {
        Self {
            family: family.to_string(),
            stack: font_stack(family),
            weight,
        }
    }

    fn choose(&self, choice: &FontChoice) -> Self {
        if choice.family.trim().is_empty() {
            warn!("Empty font family, keeping {}", self.family);
            return self.clone();
        }
        ResolvedFont::new(&choice.family, choice.weight.unwrap_or(self.weight))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeScale {
    pub xs: String,
    pub sm: String,
    pub base: String,
    pub lg: String,
    pub xl: String,
    pub xl2: String,
    pub xl3: String,
    pub xl4: String,
}

impl From<&ScaleSteps> for TypeScale {
    fn from(s: &ScaleSteps) -> Self {
        Self {
            xs: s[0].into(),
            sm: s[1].into(),
            base: s[2].into(),
            lg: s[3].into(),
            xl: s[4].into(),
            xl2: s[5].into(),
            xl3: s[6].into(),
            xl4: s[7].into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTypography {
    /// Typography preset that supplied the scale, if any
    pub preset: Option<String>,
    pub display: ResolvedFont,
    pub heading: ResolvedFont,
    pub body: ResolvedFont,
    pub scale: TypeScale,
}

impl Default for ResolvedTypography {
    fn default() -> Self {
        Self {
            preset: None,
            display: ResolvedFont::new("Great Vibes", 400),
            heading: ResolvedFont::new("Playfair Display", 600),
            body: ResolvedFont::new("Noto Serif KR", 400),
            scale: TypeScale::from(&DEFAULT_SCALE),
        }
    }
}

impl ResolvedTypography {
    fn from_preset(preset: &presets::TypographyPreset) -> Self {
        let defaults = Self::default();
        Self {
            preset: Some(preset.id.to_string()),
            display: preset
                .display
                .map(|(family, weight)| ResolvedFont::new(family, weight))
                .unwrap_or(defaults.display),
            heading: ResolvedFont::new(preset.heading.0, preset.heading.1),
            body: ResolvedFont::new(preset.body.0, preset.body.1),
            scale: TypeScale::from(&preset.scale),
        }
    }

    fn apply(&mut self, fonts: &FontsSpec) {
        if let Some(choice) = &fonts.display {
            self.display = self.display.choose(choice);
        }
        if let Some(choice) = &fonts.heading {
            self.heading = self.heading.choose(choice);
        }
        if let Some(choice) = &fonts.body {
            self.body = self.body.choose(choice);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEffects {
    pub radius_sm: u32,
    pub radius_md: u32,
    pub radius_lg: u32,
    pub radius_full: u32,
    pub shadow_sm: String,
    pub shadow_md: String,
    pub shadow_lg: String,
}

impl Default for ResolvedEffects {
    fn default() -> Self {
        Self {
            radius_sm: 4,
            radius_md: 8,
            radius_lg: 16,
            radius_full: 9999,
            shadow_sm: "0 1px 2px rgba(0, 0, 0, 0.05)".into(),
            shadow_md: "0 4px 6px rgba(0, 0, 0, 0.07)".into(),
            shadow_lg: "0 10px 15px rgba(0, 0, 0, 0.1)".into(),
        }
    }
}

impl ResolvedEffects {
    fn apply(&mut self, effects: &EffectsSpec) {
        if let Some(radius) = &effects.radius {
            self.radius_sm = radius.sm.unwrap_or(self.radius_sm);
            self.radius_md = radius.md.unwrap_or(self.radius_md);
            self.radius_lg = radius.lg.unwrap_or(self.radius_lg);
            self.radius_full = radius.full.unwrap_or(self.radius_full);
        }
        if let Some(shadows) = &effects.shadows {
            if let Some(sm) = &shadows.sm {
                self.shadow_sm = sm.clone();
            }
            if let Some(md) = &shadows.md {
                self.shadow_md = md.clone();
            }
            if let Some(lg) = &shadows.lg {
                self.shadow_lg = lg.clone();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSpacing {
    pub block_padding_y: u32,
    pub block_padding_x: u32,
    pub element_gap: u32,
}

impl Default for ResolvedSpacing {
    fn default() -> Self {
        Self {
            block_padding_y: 64,
            block_padding_x: 24,
            element_gap: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAnimation {
    pub mood: AnimationMood,
    pub speed: f64,
}

impl Default for ResolvedAnimation {
    fn default() -> Self {
        Self {
            mood: AnimationMood::default(),
            speed: 1.0,
        }
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        let tokens = SemanticTokens::default();
        Self {
            palette: Palette::from_tokens(&tokens),
            tokens,
            typography: ResolvedTypography::default(),
            effects: ResolvedEffects::default(),
            spacing: ResolvedSpacing::default(),
            animation: ResolvedAnimation::default(),
            block_overrides: BTreeMap::new(),
        }
    }
}

/// Resolve a partial style into concrete values
#[instrument(skip(style), fields(preset = style.preset.as_deref().unwrap_or("-")))]
pub fn resolve_style(style: &StyleSystem) -> ResolvedStyle {
    let mut resolved = ResolvedStyle::default();

    let theme_preset = match style.preset.as_deref() {
        Some(id) => {
            let preset = presets::theme_preset(id);
            if preset.is_none() {
                warn!(preset = id, "Unknown theme preset, using defaults");
            }
            preset
        }
        None => None,
    };

    if let Some(preset) = theme_preset {
        resolved.tokens = SemanticTokens::from(&preset.tokens);
        resolved.palette = Palette::from_tokens(&resolved.tokens);
    }

    let typography_id = style
        .typography
        .as_ref()
        .and_then(|t| t.preset.as_deref())
        .or(theme_preset.map(|p| p.recommended_typography));

    if let Some(id) = typography_id {
        match presets::typography_preset(id) {
            Some(preset) => resolved.typography = ResolvedTypography::from_preset(preset),
            None => warn!(typography = id, "Unknown typography preset, using defaults"),
        }
    }

    if let Some(theme) = &style.theme {
        if let Some(colors) = &theme.colors {
            apply_palette(&mut resolved.palette, &mut resolved.tokens, colors);
        }
        if let Some(fonts) = &theme.fonts {
            resolved.typography.apply(fonts);
        }
    }

    if let Some(tokens) = &style.tokens {
        resolved.tokens.apply(tokens);
    }

    if let Some(effects) = &style.effects {
        resolved.effects.apply(effects);
    }

    if let Some(spacing) = &style.spacing {
        resolved.spacing.block_padding_y =
            spacing.block_padding_y.unwrap_or(resolved.spacing.block_padding_y);
        resolved.spacing.block_padding_x =
            spacing.block_padding_x.unwrap_or(resolved.spacing.block_padding_x);
        resolved.spacing.element_gap = spacing.element_gap.unwrap_or(resolved.spacing.element_gap);
    }

    if let Some(animation) = &style.animation {
        resolved.animation.mood = animation.mood.unwrap_or(resolved.animation.mood);
        match animation.speed {
            Some(speed) if speed.is_finite() && speed > 0.0 => resolved.animation.speed = speed,
            Some(speed) => warn!(speed, "Invalid animation speed, using 1.0"),
            None => {}
        }
    }

    resolved.block_overrides = style.block_overrides.clone();

    debug!(
        accent = %resolved.tokens.accent_default,
        heading = %resolved.typography.heading.family,
        "Style resolved"
    );

    resolved
}

fn valid(name: &str, value: &Option<String>) -> Option<String> {
    match value {
        Some(color) if is_valid_color(color) => Some(color.clone()),
        Some(color) => {
            warn!(field = name, value = %color, "Invalid palette color, ignoring");
            None
        }
        None => None,
    }
}

/// Map palette colors onto the semantic tokens they drive
fn apply_palette(palette: &mut Palette, tokens: &mut SemanticTokens, colors: &PaletteSpec) {
    if let Some(primary) = valid("primary", &colors.primary) {
        tokens.accent_default = primary.clone();
        tokens.fg_emphasis = primary.clone();
        tokens.border_emphasis = primary.clone();
        tokens.accent_hover = adjust_color(&primary, -17);
        tokens.accent_active = adjust_color(&primary, -34);
        tokens.fg_on_accent = if is_light_color(&primary) {
            "#1a1a1a".into()
        } else {
            "#ffffff".into()
        };
        palette.primary = primary;
    }

    if let Some(secondary) = valid("secondary", &colors.secondary) {
        tokens.accent_secondary = secondary.clone();
        palette.secondary = secondary;
    }

    if let Some(background) = valid("background", &colors.background) {
        tokens.bg_page = background.clone();
        tokens.bg_section = background.clone();
        tokens.bg_section_alt = adjust_color(&background, -7);
        palette.background = background;
    }

    if let Some(text) = valid("text", &colors.text) {
        tokens.fg_default = text.clone();
        palette.text = text;
    }

    if let Some(accent) = valid("accent", &colors.accent) {
        tokens.accent_default = accent.clone();
        palette.accent = accent;
    }
}

impl ResolvedStyle {
    /// This style with a block's overrides applied
    ///
    /// `blockOverrides[block.id]` applies first, then the block's inline
    /// `style.tokens`.
    pub fn for_block(&self, block: &Block) -> Cow<'_, ResolvedStyle> {
        let from_map = self.block_overrides.get(&block.id);
        let inline = block.style.as_ref().and_then(|s| s.tokens.as_ref());

        let overrides = match (from_map, inline) {
            (None, None) => return Cow::Borrowed(self),
            (Some(map), None) => map.clone(),
            (None, Some(inline)) => inline.clone(),
            (Some(map), Some(inline)) => map.compose(inline),
        };

        let mut style = self.clone();
        style.tokens.apply(&overrides);
        Cow::Owned(style)
    }
}

impl From<&ResolvedStyle> for StyleSystem {
    fn from(r: &ResolvedStyle) -> Self {
        let font = |f: &ResolvedFont| Some(FontChoice::new(f.family.clone()).with_weight(f.weight));

        StyleSystem {
            preset: None,
            theme: Some(ThemeSpec {
                colors: Some(PaletteSpec {
                    primary: Some(r.palette.primary.clone()),
                    secondary: Some(r.palette.secondary.clone()),
                    background: Some(r.palette.background.clone()),
                    text: Some(r.palette.text.clone()),
                    accent: Some(r.palette.accent.clone()),
                }),
                fonts: Some(FontsSpec {
                    display: font(&r.typography.display),
                    heading: font(&r.typography.heading),
                    body: font(&r.typography.body),
                }),
            }),
            typography: r.typography.preset.clone().map(|preset| TypographySpec {
                preset: Some(preset),
            }),
            tokens: Some(TokenOverrides::from(&r.tokens)),
            effects: Some(EffectsSpec {
                radius: Some(RadiusSpec {
                    sm: Some(r.effects.radius_sm),
                    md: Some(r.effects.radius_md),
                    lg: Some(r.effects.radius_lg),
                    full: Some(r.effects.radius_full),
                }),
                shadows: Some(ShadowSpec {
                    sm: Some(r.effects.shadow_sm.clone()),
                    md: Some(r.effects.shadow_md.clone()),
                    lg: Some(r.effects.shadow_lg.clone()),
                }),
            }),
            spacing: Some(SpacingSpec {
                block_padding_y: Some(r.spacing.block_padding_y),
                block_padding_x: Some(r.spacing.block_padding_x),
                element_gap: Some(r.spacing.element_gap),
            }),
            animation: Some(GlobalAnimation {
                mood: Some(r.animation.mood),
                speed: Some(r.animation.speed),
            }),
            block_overrides: r.block_overrides.clone(),
        }
    }
}

/// CSS custom properties for a resolved style
pub fn css_variables(style: &ResolvedStyle) -> BTreeMap<String, String> {
    let mut vars = BTreeMap::new();

    for (name, value) in style.tokens.entries() {
        vars.insert(format!("--{}", name), value.to_string());
    }

    let t = &style.typography;
    for (name, font) in [("display", &t.display), ("heading", &t.heading), ("body", &t.body)] {
        vars.insert(format!("--font-{}", name), font.stack.clone());
        vars.insert(format!("--font-weight-{}", name), font.weight.to_string());
    }

    for (name, size) in [
        ("xs", &t.scale.xs),
        ("sm", &t.scale.sm),
        ("base", &t.scale.base),
        ("lg", &t.scale.lg),
        ("xl", &t.scale.xl),
        ("2xl", &t.scale.xl2),
        ("3xl", &t.scale.xl3),
        ("4xl", &t.scale.xl4),
    ] {
        vars.insert(format!("--text-{}", name), size.clone());
    }

    let e = &style.effects;
    vars.insert("--radius-sm".into(), format!("{}px", e.radius_sm));
    vars.insert("--radius-md".into(), format!("{}px", e.radius_md));
    vars.insert("--radius-lg".into(), format!("{}px", e.radius_lg));
    vars.insert("--radius-full".into(), format!("{}px", e.radius_full));
    vars.insert("--shadow-sm".into(), e.shadow_sm.clone());
    vars.insert("--shadow-md".into(), e.shadow_md.clone());
    vars.insert("--shadow-lg".into(), e.shadow_lg.clone());

    let s = &style.spacing;
    vars.insert("--block-padding-y".into(), format!("{}px", s.block_padding_y));
    vars.insert("--block-padding-x".into(), format!("{}px", s.block_padding_x));
    vars.insert("--element-gap".into(), format!("{}px", s.element_gap));

    vars.insert("--animation-speed".into(), style.animation.speed.to_string());
    vars.insert("--animation-mood".into(), style.animation.mood.as_str().to_string());

    vars
}

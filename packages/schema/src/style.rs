//! # Style System
//!
//! The persisted, partial description of how an invitation looks. Every field
//! is optional; the renderer's style resolver fills the gaps with defaults.
//!
//! Two stored shapes exist:
//!
//! - **Structured**: `{ preset, theme: { colors, fonts }, typography, tokens, ... }`
//! - **Legacy**: `{ themeName, colors: { primary, ... }, fonts: { title, body } }`
//!
//! [`is_legacy_style`] tells them apart and [`normalize_style`] converts either
//! into [`StyleSystem`]. Normalization never fails: a malformed field falls back
//! to its default and the rest of the style is kept.

use crate::compose::Compose;
use crate::lenient::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSystem {
    /// Theme preset id (e.g. `classic-gold`)
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeSpec>,

    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographySpec>,

    /// Advanced semantic token overrides
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenOverrides>,

    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectsSpec>,

    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingSpec>,

    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub animation: Option<GlobalAnimation>,

    /// Token overrides keyed by block id
    #[serde(deserialize_with = "lenient", skip_serializing_if = "BTreeMap::is_empty")]
    pub block_overrides: BTreeMap<String, TokenOverrides>,
}

crate::impl_compose_fields!(StyleSystem {
    preset,
    theme,
    typography,
    tokens,
    effects,
    spacing,
    animation,
    block_overrides,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub colors: Option<PaletteSpec>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontsSpec>,
}

crate::impl_compose_fields!(ThemeSpec { colors, fonts });

/// The five user-facing palette colors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

crate::impl_compose_fields!(PaletteSpec {
    primary,
    secondary,
    background,
    text,
    accent,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontsSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub display: Option<FontChoice>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub heading: Option<FontChoice>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub body: Option<FontChoice>,
}

crate::impl_compose_fields!(FontsSpec {
    display,
    heading,
    body,
});

/// A font family name plus an optional weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontChoice {
    pub family: String,
    #[serde(deserialize_with = "lenient", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

impl FontChoice {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }
}

impl Compose for FontChoice {
    fn compose(&self, over: &Self) -> Self {
        Self {
            family: over.family.clone(),
            weight: over.weight.or(self.weight),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographySpec {
    /// Typography preset id (e.g. `romantic-script`)
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

crate::impl_compose_fields!(TypographySpec { preset });

/// Semantic color tokens, every one optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenOverrides {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg_page: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg_section: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg_section_alt: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg_card: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bg_overlay: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fg_default: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fg_muted: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fg_emphasis: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fg_inverse: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fg_on_accent: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accent_default: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accent_hover: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accent_active: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub accent_secondary: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub border_default: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub border_emphasis: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub border_muted: Option<String>,
}

crate::impl_compose_fields!(TokenOverrides {
    bg_page,
    bg_section,
    bg_section_alt,
    bg_card,
    bg_overlay,
    fg_default,
    fg_muted,
    fg_emphasis,
    fg_inverse,
    fg_on_accent,
    accent_default,
    accent_hover,
    accent_active,
    accent_secondary,
    border_default,
    border_emphasis,
    border_muted,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectsSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub radius: Option<RadiusSpec>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub shadows: Option<ShadowSpec>,
}

crate::impl_compose_fields!(EffectsSpec { radius, shadows });

/// Corner radii in px
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadiusSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sm: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub md: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lg: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub full: Option<u32>,
}

crate::impl_compose_fields!(RadiusSpec { sm, md, lg, full });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sm: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub md: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lg: Option<String>,
}

crate::impl_compose_fields!(ShadowSpec { sm, md, lg });

/// Block spacing in px
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingSpec {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub block_padding_y: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub block_padding_x: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub element_gap: Option<u32>,
}

crate::impl_compose_fields!(SpacingSpec {
    block_padding_y,
    block_padding_x,
    element_gap,
});

/// Document-wide animation mood
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationMood {
    Minimal,
    #[default]
    Subtle,
    Elegant,
    Playful,
    Dramatic,
    Cinematic,
}

impl AnimationMood {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationMood::Minimal => "minimal",
            AnimationMood::Subtle => "subtle",
            AnimationMood::Elegant => "elegant",
            AnimationMood::Playful => "playful",
            AnimationMood::Dramatic => "dramatic",
            AnimationMood::Cinematic => "cinematic",
        }
    }
}

impl Compose for AnimationMood {
    fn compose(&self, over: &Self) -> Self {
        *over
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalAnimation {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mood: Option<AnimationMood>,
    /// Speed multiplier, 1.0 is normal
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

crate::impl_compose_fields!(GlobalAnimation { mood, speed });

/// The older flat style shape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LegacyStyle {
    #[serde(deserialize_with = "lenient")]
    theme_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    colors: Option<PaletteSpec>,
    #[serde(deserialize_with = "lenient")]
    fonts: Option<LegacyFonts>,
    #[serde(deserialize_with = "lenient")]
    mood: Option<AnimationMood>,
    #[serde(deserialize_with = "lenient")]
    animation_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LegacyFonts {
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    body: Option<String>,
}

impl From<LegacyStyle> for StyleSystem {
    fn from(legacy: LegacyStyle) -> Self {
        let fonts = legacy.fonts.map(|fonts| FontsSpec {
            display: None,
            heading: fonts.title.map(FontChoice::new),
            body: fonts.body.map(FontChoice::new),
        });

        let theme = if legacy.colors.is_some() || fonts.is_some() {
            Some(ThemeSpec {
                colors: legacy.colors,
                fonts,
            })
        } else {
            None
        };

        let animation = if legacy.mood.is_some() || legacy.animation_speed.is_some() {
            Some(GlobalAnimation {
                mood: legacy.mood,
                speed: legacy.animation_speed,
            })
        } else {
            None
        };

        StyleSystem {
            preset: legacy.theme_name,
            theme,
            animation,
            ..Default::default()
        }
    }
}

/// Shape predicate for the legacy `themeName + colors` style format
pub fn is_legacy_style(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    if obj.contains_key("theme") || obj.contains_key("preset") {
        return false;
    }

    obj.contains_key("themeName") || obj.contains_key("colors") || obj.contains_key("fonts")
}

/// Normalize a stored style value of either shape into a [`StyleSystem`]
pub fn normalize_style(value: Value) -> StyleSystem {
    if value.is_null() {
        return StyleSystem::default();
    }

    if is_legacy_style(&value) {
        return match serde_json::from_value::<LegacyStyle>(value) {
            Ok(legacy) => legacy.into(),
            Err(err) => {
                warn!(error = %err, "Malformed legacy style, using defaults");
                StyleSystem::default()
            }
        };
    }

    match serde_json::from_value::<StyleSystem>(value) {
        Ok(style) => style,
        Err(err) => {
            warn!(error = %err, "Malformed style, using defaults");
            StyleSystem::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_predicate() {
        assert!(is_legacy_style(&json!({ "themeName": "classic-gold" })));
        assert!(is_legacy_style(&json!({ "colors": { "primary": "#fff" } })));
        assert!(!is_legacy_style(&json!({ "preset": "classic-gold" })));
        assert!(!is_legacy_style(
            &json!({ "theme": { "colors": {} }, "colors": {} })
        ));
        assert!(!is_legacy_style(&json!("classic-gold")));
    }

    #[test]
    fn test_legacy_and_structured_normalize_identically() {
        let legacy = normalize_style(json!({
            "themeName": "classic-gold",
            "colors": { "primary": "#C9A962", "text": "#2D2319" },
            "fonts": { "title": "Playfair Display", "body": "Pretendard" },
            "mood": "elegant"
        }));

        let structured = normalize_style(json!({
            "preset": "classic-gold",
            "theme": {
                "colors": { "primary": "#C9A962", "text": "#2D2319" },
                "fonts": {
                    "heading": { "family": "Playfair Display" },
                    "body": { "family": "Pretendard" }
                }
            },
            "animation": { "mood": "elegant" }
        }));

        assert_eq!(legacy, structured);
    }

    #[test]
    fn test_malformed_style_falls_back_to_default() {
        let style = normalize_style(json!({ "preset": 42 }));
        assert_eq!(style, StyleSystem::default());

        let style = normalize_style(json!({ "themeName": ["not", "a", "string"] }));
        assert_eq!(style, StyleSystem::default());
    }

    #[test]
    fn test_mistyped_field_keeps_the_preset() {
        let style = normalize_style(json!({
            "preset": "classic-gold",
            "spacing": { "blockPaddingY": 64.5, "elementGap": 16 },
            "theme": { "colors": { "primary": "#C9A962", "text": 3 } },
            "animation": { "mood": "sparkly", "speed": 1.5 }
        }));

        assert_eq!(style.preset.as_deref(), Some("classic-gold"));

        let spacing = style.spacing.unwrap_or_default();
        assert_eq!(spacing.block_padding_y, None);
        assert_eq!(spacing.element_gap, Some(16));

        let colors = style.theme.and_then(|t| t.colors).unwrap_or_default();
        assert_eq!(colors.primary.as_deref(), Some("#C9A962"));
        assert_eq!(colors.text, None);

        let animation = style.animation.unwrap_or_default();
        assert_eq!(animation.mood, None);
        assert_eq!(animation.speed, Some(1.5));
    }

    #[test]
    fn test_mistyped_legacy_field_keeps_the_theme_name() {
        let style = normalize_style(json!({
            "themeName": "classic-gold",
            "colors": { "primary": "#C9A962" },
            "fonts": { "title": 12, "body": "Pretendard" }
        }));

        assert_eq!(style.preset.as_deref(), Some("classic-gold"));
        let fonts = style.theme.and_then(|t| t.fonts).unwrap_or_default();
        assert_eq!(fonts.heading, None);
        assert_eq!(fonts.body, Some(FontChoice::new("Pretendard")));
    }

    #[test]
    fn test_compose_style_patch() {
        let base = normalize_style(json!({
            "preset": "classic-gold",
            "theme": { "colors": { "primary": "#C9A962", "background": "#FFFDF8" } }
        }));
        let patch = normalize_style(json!({
            "theme": { "colors": { "primary": "#E8A0A0" } }
        }));

        let merged = base.compose(&patch);
        let colors = merged.theme.and_then(|t| t.colors).unwrap_or_default();
        assert_eq!(merged.preset.as_deref(), Some("classic-gold"));
        assert_eq!(colors.primary.as_deref(), Some("#E8A0A0"));
        assert_eq!(colors.background.as_deref(), Some("#FFFDF8"));
    }
}

//! # Style Presets
//!
//! Built-in theme presets (semantic color tokens), typography presets (font
//! pairings) and the font table used to build CSS font stacks and font
//! resource URLs.

/// A font the editor knows how to stack and load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFace {
    pub name: &'static str,
    /// Fallback families after `name`, generic family last
    pub fallbacks: &'static [&'static str],
    /// Google Fonts spec, e.g. `Playfair Display:400,500,600,700`
    pub google: Option<&'static str>,
    /// Stylesheet URL for fonts served outside Google Fonts
    pub stylesheet: Option<&'static str>,
}

const PRETENDARD_CSS: &str =
    "https://cdn.jsdelivr.net/gh/orioncactus/pretendard@v1.3.9/dist/web/static/pretendard.min.css";

pub const FONT_FACES: &[FontFace] = &[
    // Latin serif
    FontFace { name: "Playfair Display", fallbacks: &["Georgia", "serif"], google: Some("Playfair Display:400,500,600,700"), stylesheet: None },
    FontFace { name: "Cormorant Garamond", fallbacks: &["Garamond", "serif"], google: Some("Cormorant Garamond:400,500,600,700"), stylesheet: None },
    FontFace { name: "Cinzel", fallbacks: &["Times New Roman", "serif"], google: Some("Cinzel:400,500,600,700"), stylesheet: None },
    // Latin sans
    FontFace { name: "Montserrat", fallbacks: &["Helvetica Neue", "sans-serif"], google: Some("Montserrat:400,500,600,700"), stylesheet: None },
    FontFace { name: "Inter", fallbacks: &["system-ui", "sans-serif"], google: Some("Inter:400,500,600,700"), stylesheet: None },
    FontFace { name: "Poppins", fallbacks: &["Helvetica Neue", "sans-serif"], google: Some("Poppins:400,500,600,700"), stylesheet: None },
    // Latin script
    FontFace { name: "Great Vibes", fallbacks: &["cursive"], google: Some("Great Vibes:400"), stylesheet: None },
    FontFace { name: "Italianno", fallbacks: &["cursive"], google: Some("Italianno:400"), stylesheet: None },
    FontFace { name: "Dancing Script", fallbacks: &["cursive"], google: Some("Dancing Script:400,500,600,700"), stylesheet: None },
    // Korean serif
    FontFace { name: "Noto Serif KR", fallbacks: &["Batang", "serif"], google: Some("Noto Serif KR:400,500,600,700"), stylesheet: None },
    FontFace { name: "Nanum Myeongjo", fallbacks: &["Batang", "serif"], google: Some("Nanum Myeongjo:400,700"), stylesheet: None },
    FontFace { name: "Gowun Batang", fallbacks: &["Batang", "serif"], google: Some("Gowun Batang:400,700"), stylesheet: None },
    // Korean sans
    FontFace { name: "Pretendard", fallbacks: &["Apple SD Gothic Neo", "sans-serif"], google: None, stylesheet: Some(PRETENDARD_CSS) },
    FontFace { name: "Noto Sans KR", fallbacks: &["Apple SD Gothic Neo", "sans-serif"], google: Some("Noto Sans KR:400,500,600,700"), stylesheet: None },
    FontFace { name: "Gowun Dodum", fallbacks: &["Apple SD Gothic Neo", "sans-serif"], google: Some("Gowun Dodum:400"), stylesheet: None },
    // Korean handwriting
    FontFace { name: "Nanum Pen Script", fallbacks: &["cursive"], google: Some("Nanum Pen Script:400"), stylesheet: None },
    FontFace { name: "MapoGoldenPier", fallbacks: &["cursive"], google: None, stylesheet: None },
];

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "cursive",
    "monospace",
    "fantasy",
    "system-ui",
];

pub fn font_face(name: &str) -> Option<&'static FontFace> {
    FONT_FACES.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

fn quote_family(family: &str) -> String {
    if GENERIC_FAMILIES.contains(&family) {
        family.to_string()
    } else {
        format!("\"{}\"", family)
    }
}

/// CSS `font-family` value for a family name
///
/// Known fonts get their fallbacks; unknown fonts fall back to `serif`.
pub fn font_stack(name: &str) -> String {
    let mut families = vec![quote_family(name)];
    match font_face(name) {
        Some(face) => families.extend(face.fallbacks.iter().map(|f| quote_family(f))),
        None => families.push("serif".to_string()),
    }
    families.join(", ")
}

/// The 17 semantic color tokens of a theme preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetTokens {
    pub bg_page: &'static str,
    pub bg_section: &'static str,
    pub bg_section_alt: &'static str,
    pub bg_card: &'static str,
    pub bg_overlay: &'static str,
    pub fg_default: &'static str,
    pub fg_muted: &'static str,
    pub fg_emphasis: &'static str,
    pub fg_inverse: &'static str,
    pub fg_on_accent: &'static str,
    pub accent_default: &'static str,
    pub accent_hover: &'static str,
    pub accent_active: &'static str,
    pub accent_secondary: &'static str,
    pub border_default: &'static str,
    pub border_emphasis: &'static str,
    pub border_muted: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreset {
    pub id: &'static str,
    pub name_ko: &'static str,
    pub tokens: PresetTokens,
    pub recommended_typography: &'static str,
}

pub const THEME_PRESETS: &[ThemePreset] = &[
    ThemePreset {
        id: "hero-classic-elegant",
        name_ko: "클래식 엘레강스",
        tokens: PresetTokens {
            bg_page: "#FFFFFF",
            bg_section: "#FFFFFF",
            bg_section_alt: "#FFFFFF",
            bg_card: "#FAF7F0",
            bg_overlay: "rgba(0, 0, 0, 0.4)",
            fg_default: "#1A1A1A",
            fg_muted: "#6B7280",
            fg_emphasis: "#C9A962",
            fg_inverse: "#FFFFFF",
            fg_on_accent: "#FFFFFF",
            accent_default: "#C9A962",
            accent_hover: "#E8DFC8",
            accent_active: "#C9A962",
            accent_secondary: "#E8DFC8",
            border_default: "#E5E7EB",
            border_emphasis: "#C9A962",
            border_muted: "#F3F4F6",
        },
        recommended_typography: "classic-elegant",
    },
    ThemePreset {
        id: "classic-gold",
        name_ko: "클래식 골드",
        tokens: PresetTokens {
            bg_page: "#FFFDF8",
            bg_section: "#FAF7F0",
            bg_section_alt: "#F5F0E5",
            bg_card: "#FFFFFF",
            bg_overlay: "rgba(45, 35, 25, 0.5)",
            fg_default: "#2D2319",
            fg_muted: "#6B5D4D",
            fg_emphasis: "#1A1408",
            fg_inverse: "#FFFDF8",
            fg_on_accent: "#1A1408",
            accent_default: "#C9A962",
            accent_hover: "#B8983F",
            accent_active: "#A68A2D",
            accent_secondary: "#D4BE7A",
            border_default: "#E8DFC8",
            border_emphasis: "#D4C5A5",
            border_muted: "#F2EDE0",
        },
        recommended_typography: "classic-elegant",
    },
    ThemePreset {
        id: "modern-mono",
        name_ko: "모던 모노크롬",
        tokens: PresetTokens {
            bg_page: "#FFFFFF",
            bg_section: "#F8F8F8",
            bg_section_alt: "#F0F0F0",
            bg_card: "#FFFFFF",
            bg_overlay: "rgba(0, 0, 0, 0.5)",
            fg_default: "#1A1A1A",
            fg_muted: "#737373",
            fg_emphasis: "#000000",
            fg_inverse: "#FFFFFF",
            fg_on_accent: "#FFFFFF",
            accent_default: "#000000",
            accent_hover: "#262626",
            accent_active: "#404040",
            accent_secondary: "#525252",
            border_default: "#E5E5E5",
            border_emphasis: "#D4D4D4",
            border_muted: "#F5F5F5",
        },
        recommended_typography: "modern-minimal",
    },
    ThemePreset {
        id: "romantic-blush",
        name_ko: "로맨틱 블러쉬",
        tokens: PresetTokens {
            bg_page: "#FFF9F9",
            bg_section: "#FFF5F5",
            bg_section_alt: "#FFEFEF",
            bg_card: "#FFFFFF",
            bg_overlay: "rgba(80, 40, 50, 0.4)",
            fg_default: "#4A3535",
            fg_muted: "#8C7070",
            fg_emphasis: "#3A2525",
            fg_inverse: "#FFF9F9",
            fg_on_accent: "#FFFFFF",
            accent_default: "#E8A0A0",
            accent_hover: "#E08888",
            accent_active: "#D87070",
            accent_secondary: "#F0B8B8",
            border_default: "#F5E0E0",
            border_emphasis: "#EBD0D0",
            border_muted: "#FAF0F0",
        },
        recommended_typography: "romantic-script",
    },
    ThemePreset {
        id: "romantic-garden",
        name_ko: "로맨틱 가든",
        tokens: PresetTokens {
            bg_page: "#F8FAF8",
            bg_section: "#F2F7F2",
            bg_section_alt: "#EBF2EB",
            bg_card: "#FFFFFF",
            bg_overlay: "rgba(35, 55, 40, 0.4)",
            fg_default: "#2D3D32",
            fg_muted: "#5A7560",
            fg_emphasis: "#1D2D22",
            fg_inverse: "#F8FAF8",
            fg_on_accent: "#FFFFFF",
            accent_default: "#6B8E6B",
            accent_hover: "#5A7D5A",
            accent_active: "#4A6C4A",
            accent_secondary: "#8BA88B",
            border_default: "#D8E5D8",
            border_emphasis: "#C5D8C5",
            border_muted: "#E8F0E8",
        },
        recommended_typography: "classic-romantic",
    },
];

pub fn theme_preset(id: &str) -> Option<&'static ThemePreset> {
    THEME_PRESETS.iter().find(|p| p.id == id)
}

/// Type scale steps, `xs` through `4xl`
pub type ScaleSteps = [&'static str; 8];

pub const DEFAULT_SCALE: ScaleSteps = [
    "0.75rem", "0.875rem", "1rem", "1.125rem", "1.25rem", "1.5rem", "1.875rem", "2.25rem",
];

pub const ELEGANT_SCALE: ScaleSteps = [
    "0.75rem", "0.875rem", "1rem", "1.125rem", "1.375rem", "1.75rem", "2.25rem", "3rem",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypographyPreset {
    pub id: &'static str,
    pub name_ko: &'static str,
    /// `(family, weight)`; `None` keeps the default display font
    pub display: Option<(&'static str, u16)>,
    pub heading: (&'static str, u16),
    pub body: (&'static str, u16),
    pub scale: ScaleSteps,
}

pub const TYPOGRAPHY_PRESETS: &[TypographyPreset] = &[
    TypographyPreset {
        id: "classic-elegant",
        name_ko: "클래식 엘레강스",
        display: None,
        heading: ("Playfair Display", 600),
        body: ("Noto Serif KR", 400),
        scale: ELEGANT_SCALE,
    },
    TypographyPreset {
        id: "classic-traditional",
        name_ko: "클래식 전통",
        display: None,
        heading: ("Cinzel", 500),
        body: ("Nanum Myeongjo", 400),
        scale: ELEGANT_SCALE,
    },
    TypographyPreset {
        id: "classic-romantic",
        name_ko: "클래식 로맨틱",
        display: None,
        heading: ("Cormorant Garamond", 500),
        body: ("Gowun Batang", 400),
        scale: ELEGANT_SCALE,
    },
    TypographyPreset {
        id: "modern-minimal",
        name_ko: "모던 미니멀",
        display: Some(("Montserrat", 600)),
        heading: ("Montserrat", 600),
        body: ("Pretendard", 400),
        scale: DEFAULT_SCALE,
    },
    TypographyPreset {
        id: "modern-clean",
        name_ko: "모던 클린",
        display: Some(("Inter", 600)),
        heading: ("Inter", 600),
        body: ("Noto Sans KR", 400),
        scale: DEFAULT_SCALE,
    },
    TypographyPreset {
        id: "modern-geometric",
        name_ko: "모던 지오메트릭",
        display: Some(("Poppins", 600)),
        heading: ("Poppins", 600),
        body: ("Pretendard", 400),
        scale: DEFAULT_SCALE,
    },
    TypographyPreset {
        id: "romantic-script",
        name_ko: "로맨틱 스크립트",
        display: Some(("Great Vibes", 400)),
        heading: ("Great Vibes", 400),
        body: ("Gowun Batang", 400),
        scale: ELEGANT_SCALE,
    },
    TypographyPreset {
        id: "natural-handwritten",
        name_ko: "내추럴 손글씨",
        display: Some(("Nanum Pen Script", 400)),
        heading: ("Nanum Pen Script", 400),
        body: ("Gowun Dodum", 400),
        scale: DEFAULT_SCALE,
    },
];

pub fn typography_preset(id: &str) -> Option<&'static TypographyPreset> {
    TYPOGRAPHY_PRESETS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_stack_known_and_unknown() {
        assert_eq!(
            font_stack("Playfair Display"),
            "\"Playfair Display\", \"Georgia\", serif"
        );
        assert_eq!(font_stack("Great Vibes"), "\"Great Vibes\", cursive");
        assert_eq!(font_stack("My Custom Font"), "\"My Custom Font\", serif");
    }

    #[test]
    fn test_every_preset_font_is_in_the_table() {
        for preset in TYPOGRAPHY_PRESETS {
            assert!(font_face(preset.heading.0).is_some(), "{}", preset.id);
            assert!(font_face(preset.body.0).is_some(), "{}", preset.id);
            if let Some((display, _)) = preset.display {
                assert!(font_face(display).is_some(), "{}", preset.id);
            }
        }
    }

    #[test]
    fn test_every_theme_recommends_a_known_typography() {
        for preset in THEME_PRESETS {
            assert!(
                typography_preset(preset.recommended_typography).is_some(),
                "{} recommends {}",
                preset.id,
                preset.recommended_typography
            );
        }
    }
}

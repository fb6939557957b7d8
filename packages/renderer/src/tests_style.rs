/// Style resolution tests
/// Precedence, idempotence, legacy/structured equivalence and fallbacks
use crate::*;

#[cfg(test)]
mod style_tests {
    use super::*;
    use letter_schema::{
        normalize_style, Block, BlockStyleOverride, BlockType, FontChoice, FontsSpec,
        PaletteSpec, StyleSystem, ThemeSpec, TokenOverrides, TypographySpec,
    };
    use serde_json::json;

    fn palette(primary: &str) -> StyleSystem {
        StyleSystem {
            theme: Some(ThemeSpec {
                colors: Some(PaletteSpec {
                    primary: Some(primary.to_string()),
                    ..Default::default()
                }),
                fonts: None,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_style_resolves_to_defaults() {
        let resolved = resolve_style(&StyleSystem::default());
        assert_eq!(resolved, ResolvedStyle::default());
        assert_eq!(resolved.tokens.accent_default, "#c9a86c");
        assert_eq!(resolved.typography.heading.family, "Playfair Display");
        assert_eq!(resolved.spacing.block_padding_y, 64);
    }

    #[test]
    fn test_preset_supplies_tokens_and_recommended_typography() {
        let resolved = resolve_style(&StyleSystem {
            preset: Some("modern-mono".into()),
            ..Default::default()
        });

        assert_eq!(resolved.typography.preset.as_deref(), Some("modern-minimal"));
        assert_eq!(resolved.typography.heading.family, "Montserrat");
        assert_eq!(resolved.typography.body.family, "Pretendard");
    }

    #[test]
    fn test_explicit_typography_preset_beats_recommendation() {
        let resolved = resolve_style(&StyleSystem {
            preset: Some("classic-gold".into()),
            typography: Some(TypographySpec {
                preset: Some("natural-handwritten".into()),
            }),
            ..Default::default()
        });

        assert_eq!(resolved.typography.heading.family, "Nanum Pen Script");
        assert_eq!(resolved.tokens.bg_page, "#FFFDF8");
    }

    #[test]
    fn test_primary_color_drives_accent_tokens() {
        let resolved = resolve_style(&palette("#8b5cf6"));

        assert_eq!(resolved.palette.primary, "#8b5cf6");
        assert_eq!(resolved.tokens.accent_default, "#8b5cf6");
        assert_eq!(resolved.tokens.fg_emphasis, "#8b5cf6");
        assert_eq!(resolved.tokens.border_emphasis, "#8b5cf6");
        assert_eq!(resolved.tokens.accent_hover, "#7a4be5");
        assert_eq!(resolved.tokens.fg_on_accent, "#ffffff");
    }

    #[test]
    fn test_light_primary_gets_dark_text() {
        let resolved = resolve_style(&palette("#f5e6c8"));
        assert_eq!(resolved.tokens.fg_on_accent, "#1a1a1a");
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let resolved = resolve_style(&palette("not-a-color"));
        assert_eq!(resolved.tokens, ResolvedStyle::default().tokens);
    }

    #[test]
    fn test_unknown_preset_falls_back() {
        let resolved = resolve_style(&StyleSystem {
            preset: Some("does-not-exist".into()),
            ..Default::default()
        });
        assert_eq!(resolved, ResolvedStyle::default());
    }

    #[test]
    fn test_tokens_override_palette() {
        let mut style = palette("#8b5cf6");
        style.tokens = Some(TokenOverrides {
            accent_default: Some("#ff0000".into()),
            ..Default::default()
        });

        let resolved = resolve_style(&style);
        assert_eq!(resolved.tokens.accent_default, "#ff0000");
        assert_eq!(resolved.tokens.fg_emphasis, "#8b5cf6");
    }

    #[test]
    fn test_explicit_fonts_override_preset() {
        let style = StyleSystem {
            preset: Some("classic-gold".into()),
            theme: Some(ThemeSpec {
                colors: None,
                fonts: Some(FontsSpec {
                    heading: Some(FontChoice::new("Cinzel").with_weight(700)),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        };

        let resolved = resolve_style(&style);
        assert_eq!(resolved.typography.heading.family, "Cinzel");
        assert_eq!(resolved.typography.heading.weight, 700);
        assert_eq!(
            resolved.typography.heading.stack,
            "\"Cinzel\", \"Times New Roman\", serif"
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let inputs = vec![
            StyleSystem::default(),
            palette("#8b5cf6"),
            StyleSystem {
                preset: Some("romantic-blush".into()),
                ..Default::default()
            },
            normalize_style(json!({
                "preset": "classic-gold",
                "typography": { "preset": "modern-clean" },
                "theme": { "colors": { "background": "#fdfaf5", "text": "#333333" } },
                "effects": { "radius": { "md": 12 } },
                "spacing": { "blockPaddingY": 80 },
                "animation": { "mood": "dramatic", "speed": 1.5 }
            })),
        ];

        for input in inputs {
            let once = resolve_style(&input);
            let twice = resolve_style(&StyleSystem::from(&once));
            assert_eq!(once, twice, "Re-resolving {:?} changed the result", input.preset);
        }
    }

    #[test]
    fn test_legacy_and_structured_resolve_identically() {
        let legacy = resolve_style(&normalize_style(json!({
            "themeName": "romantic-garden",
            "colors": { "primary": "#7a9a6a", "background": "#fbfdf8" },
            "fonts": { "title": "Cormorant Garamond", "body": "Gowun Batang" },
            "mood": "playful",
            "animationSpeed": 0.8
        })));

        let structured = resolve_style(&normalize_style(json!({
            "preset": "romantic-garden",
            "theme": {
                "colors": { "primary": "#7a9a6a", "background": "#fbfdf8" },
                "fonts": {
                    "heading": { "family": "Cormorant Garamond" },
                    "body": { "family": "Gowun Batang" }
                }
            },
            "animation": { "mood": "playful", "speed": 0.8 }
        })));

        assert_eq!(legacy, structured);
        assert_eq!(legacy.tokens.bg_page, "#fbfdf8");
    }

    #[test]
    fn test_block_overrides_layer_map_then_inline() {
        let mut style = StyleSystem::default();
        style.block_overrides.insert(
            "hero-1".into(),
            TokenOverrides {
                bg_section: Some("#000000".into()),
                fg_default: Some("#ffffff".into()),
                ..Default::default()
            },
        );
        let resolved = resolve_style(&style);

        let mut block = Block::new("hero-1", BlockType::Hero);
        block.style = Some(BlockStyleOverride {
            tokens: Some(TokenOverrides {
                fg_default: Some("#eeeeee".into()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let scoped = resolved.for_block(&block);
        assert_eq!(scoped.tokens.bg_section, "#000000");
        assert_eq!(scoped.tokens.fg_default, "#eeeeee");

        let other = Block::new("gallery-1", BlockType::Gallery);
        assert_eq!(resolved.for_block(&other).tokens, resolved.tokens);
    }

    #[test]
    fn test_css_variables() {
        let vars = css_variables(&resolve_style(&palette("#8b5cf6")));

        assert_eq!(vars.get("--accent-default").map(String::as_str), Some("#8b5cf6"));
        assert_eq!(vars.get("--radius-md").map(String::as_str), Some("8px"));
        assert_eq!(vars.get("--block-padding-y").map(String::as_str), Some("64px"));
        assert_eq!(vars.get("--animation-mood").map(String::as_str), Some("subtle"));
        assert!(vars.contains_key("--font-heading"));
        assert!(vars.contains_key("--text-2xl"));
        assert!(vars.keys().all(|k| k.starts_with("--")));
    }
}

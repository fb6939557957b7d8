//! # Font Resources
//!
//! Tells the host which font files to preload for a resolved style. The
//! pipeline never fetches fonts itself.

use crate::document::RenderMode;
use crate::presets::{font_face, FontFace, TYPOGRAPHY_PRESETS};
use crate::style_resolver::ResolvedStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

const GOOGLE_FONTS_BASE: &str = "https://fonts.googleapis.com/css2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontKind {
    GoogleFonts,
    Stylesheet,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontResource {
    pub family: String,
    pub url: String,
    pub kind: FontKind,
}

/// `Playfair Display:400,500` -> `...css2?family=Playfair+Display:wght@400;500&display=swap`
fn google_url(spec: &str) -> String {
    let (family, weights) = spec.split_once(':').unwrap_or((spec, "400"));
    format!(
        "{}?family={}:wght@{}&display=swap",
        GOOGLE_FONTS_BASE,
        family.replace(' ', "+"),
        weights.replace(',', ";")
    )
}

fn resource_for(face: &FontFace) -> Option<FontResource> {
    if let Some(spec) = face.google {
        return Some(FontResource {
            family: face.name.to_string(),
            url: google_url(spec),
            kind: FontKind::GoogleFonts,
        });
    }
    face.stylesheet.map(|url| FontResource {
        family: face.name.to_string(),
        url: url.to_string(),
        kind: FontKind::Stylesheet,
    })
}

/// Font files to preload, deduplicated and sorted by family
///
/// Edit mode also returns every typography preset's fonts so the preset
/// picker can preview them. Fonts with no known source are skipped.
pub fn font_resources(style: &ResolvedStyle, mode: RenderMode) -> Vec<FontResource> {
    let mut families: BTreeSet<&str> = BTreeSet::new();
    let t = &style.typography;
    families.insert(&t.display.family);
    families.insert(&t.heading.family);
    families.insert(&t.body.family);

    if mode == RenderMode::Edit {
        for preset in TYPOGRAPHY_PRESETS {
            if let Some((family, _)) = preset.display {
                families.insert(family);
            }
            families.insert(preset.heading.0);
            families.insert(preset.body.0);
        }
    }

    let resources: BTreeSet<FontResource> = families
        .into_iter()
        .filter_map(|family| match font_face(family) {
            Some(face) => resource_for(face),
            None => {
                debug!(family, "No font source known, skipping preload");
                None
            }
        })
        .collect();

    resources.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_url_format() {
        assert_eq!(
            google_url("Playfair Display:400,500,600,700"),
            "https://fonts.googleapis.com/css2?family=Playfair+Display:wght@400;500;600;700&display=swap"
        );
    }

    #[test]
    fn test_default_style_resources() {
        let resources = font_resources(&ResolvedStyle::default(), RenderMode::View);
        let families: Vec<&str> = resources.iter().map(|r| r.family.as_str()).collect();
        assert_eq!(families, vec!["Great Vibes", "Noto Serif KR", "Playfair Display"]);
        assert!(resources.iter().all(|r| r.kind == FontKind::GoogleFonts));
    }

    #[test]
    fn test_edit_mode_includes_preset_fonts() {
        let view = font_resources(&ResolvedStyle::default(), RenderMode::View);
        let edit = font_resources(&ResolvedStyle::default(), RenderMode::Edit);
        assert!(edit.len() > view.len());

        let pretendard = edit.iter().find(|r| r.family == "Pretendard").unwrap();
        assert_eq!(pretendard.kind, FontKind::Stylesheet);
    }
}

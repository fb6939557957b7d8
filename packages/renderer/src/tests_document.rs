/// Document renderer tests
/// Ordering, disabled blocks, empty state, viewport and warnings
use crate::*;

#[cfg(test)]
mod document_tests {
    use super::*;
    use chrono::DateTime;
    use letter_schema::{
        AnimationMood, Block, BlockType, EditorDocument, GlobalAnimation, PersonInfo, StyleSystem,
        WeddingData,
    };

    fn options(mode: RenderMode) -> RenderOptions {
        RenderOptions::new(
            mode,
            DateTime::parse_from_rfc3339("2025-05-21T14:00:00+09:00").expect("Failed to parse now"),
        )
    }

    fn data() -> WeddingData {
        let mut data = WeddingData::default();
        data.couple.groom = PersonInfo::named("민수");
        data.couple.bride = PersonInfo::named("수진");
        data.wedding.date = Some("2025-05-24".into());
        data
    }

    fn sections(doc: &RenderedDocument) -> Vec<&VNode> {
        doc.root.find_all(&|n| n.has_class("se2-block"))
    }

    #[test]
    fn test_block_order_matches_array_order() {
        let document = EditorDocument::new("doc-1")
            .with_data(data())
            .with_block(Block::new("a", BlockType::Hero))
            .with_block(Block::new("b", BlockType::GreetingParents))
            .with_block(Block::new("c", BlockType::Divider).with_enabled(false))
            .with_block(Block::new("d", BlockType::Calendar))
            .with_block(Block::new("e", BlockType::Ending));

        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");
        let ids: Vec<&str> = sections(&rendered)
            .into_iter()
            .filter_map(|n| n.attr("data-block-id"))
            .collect();

        assert_eq!(ids, vec!["a", "b", "d", "e"]);
        assert_eq!(rendered.block_count, 4);

        let indexes: Vec<&str> = sections(&rendered)
            .into_iter()
            .filter_map(|n| n.attr("data-block-index"))
            .collect();
        assert_eq!(indexes, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_disabled_blocks_never_render() {
        for block_type in BlockType::ALL {
            let document = EditorDocument::new("doc-1")
                .with_data(data())
                .with_block(Block::new("kept", BlockType::Divider))
                .with_block(Block::new("hidden", block_type).with_enabled(false));

            for mode in [RenderMode::Edit, RenderMode::Preview, RenderMode::View] {
                let rendered = render_document(&document, &options(mode)).expect("Failed to render");
                let hidden = rendered
                    .root
                    .find_all(&|n| n.attr("data-block-id") == Some("hidden"));
                assert!(hidden.is_empty(), "disabled {} rendered in {}", block_type, mode);
                assert_eq!(rendered.block_count, 1);
            }
        }
    }

    #[test]
    fn test_empty_document_renders_placeholder() {
        let document = EditorDocument::new("doc-1")
            .with_block(Block::new("hero", BlockType::Hero).with_enabled(false));

        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");

        assert_eq!(rendered.block_count, 0);
        let empty = rendered.root.find_all(&|n| n.has_class("se2-empty"));
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].text_content(), EMPTY_STATE_MESSAGE);
    }

    #[test]
    fn test_credit_footer_outside_edit_mode() {
        let document = EditorDocument::new("doc-1").with_block(Block::new("d", BlockType::Divider));

        for (mode, expected) in [
            (RenderMode::View, 1),
            (RenderMode::Preview, 1),
            (RenderMode::Edit, 0),
        ] {
            let rendered = render_document(&document, &options(mode)).expect("Failed to render");
            let credit = rendered.root.find_all(&|n| n.has_class("se2-credit"));
            assert_eq!(credit.len(), expected, "mode {}", mode);
        }
    }

    #[test]
    fn test_unknown_block_type_is_surfaced() {
        let mut broken = Block::new("x", BlockType::Hero);
        broken.block_type = "slideshow".into();
        let document = EditorDocument::new("doc-1")
            .with_data(data())
            .with_block(broken)
            .with_block(Block::new("hero", BlockType::Hero));

        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");

        assert!(rendered.has_errors());
        assert_eq!(rendered.block_count, 2);
        assert_eq!(rendered.warnings, vec!["x: Unsupported block type: slideshow"]);
        assert!(rendered.root.text_content().contains("민수"));
    }

    #[test]
    fn test_error_inside_a_block_is_reported() {
        let mut data = data();
        data.video.url = Some("https://example.com/not-a-player".into());
        let document = EditorDocument::new("doc-1")
            .with_data(data)
            .with_block(Block::new("video", BlockType::Video));

        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");

        assert!(rendered.has_errors());
        assert_eq!(
            rendered.warnings,
            vec!["video: Unrecognized video URL: https://example.com/not-a-player"]
        );
    }

    #[test]
    fn test_viewport_override() {
        let document = EditorDocument::new("doc-1").with_block(Block::new("d", BlockType::Divider));
        let opts = options(RenderMode::Preview).with_viewport(Viewport::new(Some(375), Some(812)));

        let rendered = render_document(&document, &opts).expect("Failed to render");
        assert_eq!(rendered.root.style("width"), Some("375px"));
        assert_eq!(rendered.root.style("min-height"), Some("812px"));

        let bad = options(RenderMode::Preview).with_viewport(Viewport::new(Some(0), None));
        assert_eq!(
            render_document(&document, &bad),
            Err(RenderError::InvalidViewport { width: 0, height: 0 })
        );
    }

    #[test]
    fn test_root_carries_css_variables_and_fonts() {
        let document = EditorDocument::new("doc-1")
            .with_style(StyleSystem {
                preset: Some("modern-mono".into()),
                ..Default::default()
            })
            .with_block(Block::new("d", BlockType::Divider));

        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");

        assert!(rendered.css_variables.contains_key("--accent-default"));
        assert_eq!(
            rendered.root.style("--font-heading"),
            rendered.css_variables.get("--font-heading").map(String::as_str)
        );
        let families: Vec<&str> = rendered.font_resources.iter().map(|f| f.family.as_str()).collect();
        assert!(families.contains(&"Montserrat"));
        assert!(families.contains(&"Pretendard"));
    }

    #[test]
    fn test_document_animation_overrides_style_animation() {
        let mut document = EditorDocument::new("doc-1").with_block(Block::new("d", BlockType::Divider));
        document.animation = GlobalAnimation {
            mood: Some(AnimationMood::Cinematic),
            speed: None,
        };

        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");
        assert_eq!(
            rendered.css_variables.get("--animation-mood").map(String::as_str),
            Some("cinematic")
        );
    }

    #[test]
    fn test_rendered_document_serializes() {
        let document = EditorDocument::new("doc-1")
            .with_data(data())
            .with_block(Block::new("hero", BlockType::Hero));
        let rendered =
            render_document(&document, &options(RenderMode::View)).expect("Failed to render");

        let json = serde_json::to_value(&rendered).expect("Failed to serialize");
        assert_eq!(json["root"]["type"], "Element");
        assert_eq!(json["blockCount"], 1);
        assert!(json["fontResources"].is_array());
    }
}

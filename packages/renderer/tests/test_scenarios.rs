/// End-to-end rendering scenarios
///
/// Each test drives the public API the way a page handler would: build an
/// EditorDocument, render it, inspect the tree.
use chrono::{DateTime, FixedOffset};
use letter_renderer::{
    render_document, resolve_style, RenderMode, RenderOptions, RenderedDocument, VNode,
};
use letter_schema::{normalize_data, normalize_style, Block, BlockType, EditorDocument, StyleSystem};
use serde_json::json;

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("Failed to parse timestamp")
}

fn render(doc: &EditorDocument, now: &str) -> RenderedDocument {
    render_document(doc, &RenderOptions::new(RenderMode::View, at(now))).expect("Render failed")
}

fn blocks_of(rendered: &RenderedDocument) -> Vec<&VNode> {
    rendered.root.find_all(&|n| n.has_class("se2-block"))
}

#[test]
fn test_hero_with_disabled_gallery() {
    let doc = EditorDocument::new("scenario-hero")
        .with_data(normalize_data(json!({
            "couple": {
                "groom": { "name": "민수" },
                "bride": { "name": "수진" }
            },
            "wedding": { "date": "2025-05-24" },
            "photos": { "gallery": ["https://cdn.example.com/1.jpg"] }
        })))
        .with_block(Block::new("hero", BlockType::Hero))
        .with_block(Block::new("gallery", BlockType::Gallery).with_enabled(false));

    let rendered = render(&doc, "2025-05-01T12:00:00+09:00");
    let sections = blocks_of(&rendered);

    assert_eq!(sections.len(), 1);
    let hero = sections[0];
    assert_eq!(hero.attr("data-block-type"), Some("hero"));

    let text = hero.text_content();
    assert!(text.contains("민수"));
    assert!(text.contains("수진"));
    assert!(text.contains("5월 24일 토요일"));

    assert!(rendered.root.find_all(&|n| n.has_class("se2-gallery")).is_empty());
    assert!(rendered
        .root
        .find_all(&|n| n.attr("src") == Some("https://cdn.example.com/1.jpg"))
        .is_empty());
}

#[test]
fn test_legacy_couple_fields_render_like_canonical() {
    let legacy = EditorDocument::new("legacy")
        .with_data(normalize_data(json!({
            "groom": { "name": "민수" },
            "bride": { "name": "수진" },
            "wedding": { "date": "2025-05-24" }
        })))
        .with_block(Block::new("hero", BlockType::Hero));

    let canonical = EditorDocument::new("legacy")
        .with_data(normalize_data(json!({
            "couple": { "groom": { "name": "민수" }, "bride": { "name": "수진" } },
            "wedding": { "date": "2025-05-24" }
        })))
        .with_block(Block::new("hero", BlockType::Hero));

    let now = "2025-05-01T12:00:00+09:00";
    assert_eq!(render(&legacy, now), render(&canonical, now));
}

#[test]
fn test_couple_shape_wins_over_legacy_fields() {
    let doc = EditorDocument::new("both")
        .with_data(normalize_data(json!({
            "groom": { "name": "옛이름", "phone": "010-0000-0000" },
            "couple": { "groom": { "name": "민수" } }
        })))
        .with_block(Block::new("contact", BlockType::Contact));

    let text = render(&doc, "2025-05-01T12:00:00+09:00").root.text_content();
    assert!(text.contains("민수"));
    assert!(!text.contains("옛이름"));
    // fields only the legacy shape carries still fill in
    assert!(rendered_has_tel(&doc, "tel:01000000000"));
}

fn rendered_has_tel(doc: &EditorDocument, href: &str) -> bool {
    !render(doc, "2025-05-01T12:00:00+09:00")
        .root
        .find_all(&|n| n.attr("href") == Some(href))
        .is_empty()
}

#[test]
fn test_digital_countdown_three_days_before() {
    let doc = EditorDocument::new("countdown")
        .with_data(normalize_data(json!({
            "wedding": { "date": "2025-05-24", "time": "12:00" }
        })))
        .with_block(
            Block::new("countdown", BlockType::Calendar)
                .with_setting("displayMode", "countdown")
                .with_setting("style", "digital"),
        );

    let before = render(&doc, "2025-05-21T12:00:00+09:00");
    let days = before.root.find_all(&|n| n.attr("data-unit") == Some("days"));
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].text_content(), "3");

    let exactly = render(&doc, "2025-05-24T12:00:00+09:00");
    assert!(exactly
        .root
        .find_all(&|n| n.attr("data-unit").is_some())
        .is_empty());
    let end = exactly.root.find_all(&|n| n.has_class("se2-countdown__end"));
    assert_eq!(end.len(), 1);
    assert!(!end[0].text_content().contains('-'));
}

#[test]
fn test_order_preserved_for_enabled_subset() {
    let types = [
        BlockType::Video,
        BlockType::Hero,
        BlockType::Notice,
        BlockType::Music,
        BlockType::Profile,
        BlockType::Rsvp,
    ];
    let mut doc = EditorDocument::new("order");
    for (i, t) in types.iter().enumerate() {
        doc = doc.with_block(Block::new(format!("b{}", i), *t).with_enabled(i % 2 == 0));
    }

    let rendered = render(&doc, "2025-05-01T12:00:00+09:00");
    let ids: Vec<&str> = blocks_of(&rendered)
        .into_iter()
        .filter_map(|n| n.attr("data-block-id"))
        .collect();
    assert_eq!(ids, vec!["b0", "b2", "b4"]);
}

#[test]
fn test_unknown_type_is_visible_not_dropped() {
    let doc: EditorDocument = serde_json::from_value(json!({
        "id": "unknown",
        "version": 2,
        "blocks": [
            { "id": "p", "type": "polaroid-wall" },
            { "id": "d", "type": "divider" }
        ]
    }))
    .expect("Failed to deserialize document");

    let rendered = render(&doc, "2025-05-01T12:00:00+09:00");
    let errors = rendered.root.find_all(&|n| n.is_error());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].text_content().contains("polaroid-wall"));
    assert_eq!(blocks_of(&rendered).len(), 1);
    assert_eq!(rendered.warnings.len(), 1);
}

#[test]
fn test_legacy_style_document_matches_structured() {
    let legacy = EditorDocument::new("style").with_style(normalize_style(json!({
        "themeName": "classic-gold",
        "colors": { "primary": "#b08d57" },
        "fonts": { "title": "Cinzel" }
    })));
    let structured = EditorDocument::new("style").with_style(normalize_style(json!({
        "preset": "classic-gold",
        "theme": {
            "colors": { "primary": "#b08d57" },
            "fonts": { "heading": { "family": "Cinzel" } }
        }
    })));

    let now = "2025-05-01T12:00:00+09:00";
    assert_eq!(render(&legacy, now), render(&structured, now));
}

#[test]
fn test_resolved_style_round_trips_through_documents() {
    let style = normalize_style(json!({ "preset": "modern-mono" }));
    let resolved = resolve_style(&style);

    let original = EditorDocument::new("rt")
        .with_style(style)
        .with_block(Block::new("hero", BlockType::Hero));
    let explicit = EditorDocument::new("rt")
        .with_style(StyleSystem::from(&resolved))
        .with_block(Block::new("hero", BlockType::Hero));

    let now = "2025-05-01T12:00:00+09:00";
    assert_eq!(render(&original, now), render(&explicit, now));
}

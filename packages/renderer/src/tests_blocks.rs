/// Block renderer tests
/// Dispatch coverage, display-mode strategies and edit affordances
use crate::*;

#[cfg(test)]
mod block_tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use letter_schema::{
        Account, Block, BlockElement, BlockType, ElementKind, Geometry, InterviewItem, PersonInfo,
        WeddingData,
    };
    use serde_json::json;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-05-21T14:00:00+09:00").expect("Failed to parse now")
    }

    fn wedding_data() -> WeddingData {
        let mut data = WeddingData::default();
        data.couple.groom = PersonInfo {
            phone: Some("010-1234-5678".into()),
            father: Some("김철수".into()),
            mother: Some("이영희".into()),
            ..PersonInfo::named("민수")
        };
        data.couple.bride = PersonInfo::named("수진");
        data.wedding.date = Some("2025-05-24".into());
        data.wedding.time = Some("14:00".into());
        data.venue.name = Some("더채플앳청담".into());
        data.venue.hall = Some("3층 그랜드홀".into());
        data.venue.lat = Some(37.52);
        data.venue.lng = Some(127.04);
        data.photos.main = Some("https://cdn.example.com/main.jpg".into());
        data.photos.gallery = (1..=6)
            .map(|i| format!("https://cdn.example.com/{}.jpg", i))
            .collect();
        data.accounts.groom.push(Account {
            bank: "국민은행".into(),
            number: "123-45-6789".into(),
            holder: "김민수".into(),
            relation: None,
        });
        data.video.url = Some("https://youtu.be/abc123".into());
        data.bgm.url = Some("https://cdn.example.com/song.mp3".into());
        data
    }

    fn render(block: &Block, data: &WeddingData, mode: RenderMode) -> VNode {
        render_at(block, data, mode, now())
    }

    fn render_at(
        block: &Block,
        data: &WeddingData,
        mode: RenderMode,
        at: DateTime<FixedOffset>,
    ) -> VNode {
        let style = ResolvedStyle::default();
        let binding = BindingContext::new(data, at);
        let ctx = BlockContext {
            block,
            style: &style,
            binding: &binding,
            mode,
            index: 0,
        };
        render_block(&ctx)
    }

    fn find_by_class<'a>(node: &'a VNode, class: &str) -> Vec<&'a VNode> {
        node.find_all(&|n| n.has_class(class))
    }

    fn countdown_block(style: &str) -> Block {
        Block::new("countdown-1", BlockType::Calendar)
            .with_setting("displayMode", "countdown")
            .with_setting("style", style)
    }

    #[test]
    fn test_every_block_type_renders_a_section() {
        let data = wedding_data();
        for mode in [RenderMode::Edit, RenderMode::Preview, RenderMode::View] {
            for block_type in BlockType::ALL {
                let block = Block::new(format!("{}-1", block_type), block_type);
                let node = render(&block, &data, mode);

                assert!(!node.is_error(), "{} rendered an error in {}", block_type, mode);
                assert!(node.has_class(&format!("se2-block--{}", block_type)));
                assert_eq!(node.attr("data-block-type"), Some(block_type.as_str()));
                assert!(
                    node.find_all(&|n| n.is_error()).is_empty(),
                    "{} contains an error marker",
                    block_type
                );
            }
        }
    }

    #[test]
    fn test_unknown_type_renders_visible_error() {
        let mut block = Block::new("mystery-1", BlockType::Hero);
        block.block_type = "mystery".into();

        let node = render(&block, &wedding_data(), RenderMode::View);
        match node {
            VNode::Error { message, block_id } => {
                assert_eq!(message, "Unsupported block type: mystery");
                assert_eq!(block_id.as_deref(), Some("mystery-1"));
            }
            other => panic!("Expected error node, got {:?}", other),
        }
    }

    #[test]
    fn test_hero_shows_names_date_and_venue() {
        let node = render(&Block::new("hero-1", BlockType::Hero), &wedding_data(), RenderMode::View);
        let text = node.text_content();

        assert!(text.contains("민수"));
        assert!(text.contains("수진"));
        assert!(text.contains("5월 24일 토요일 오후 2시"));
        assert!(text.contains("더채플앳청담 3층 그랜드홀"));
    }

    #[test]
    fn test_hero_settings_hide_date() {
        let block = Block::new("hero-1", BlockType::Hero)
            .with_setting("showDate", false)
            .with_setting("displayMode", "overlay");
        let node = render(&block, &wedding_data(), RenderMode::View);

        assert!(find_by_class(&node, "se2-hero__date").is_empty());
        assert_eq!(find_by_class(&node, "se2-hero__overlay").len(), 1);
        assert_eq!(find_by_class(&node, "se2-hero--overlay").len(), 1);
    }

    #[test]
    fn test_edit_mode_adds_affordances() {
        let block = Block::new("hero-1", BlockType::Hero).with_element(
            BlockElement::new("title", ElementKind::Text, Geometry::new(10.0, 20.0, 50.0, 10.0))
                .with_value("{couple.groom.name}"),
        );

        let edit = render(&block, &wedding_data(), RenderMode::Edit);
        assert_eq!(edit.attr("data-selectable"), Some("true"));
        assert!(edit.style("outline").is_some());
        assert_eq!(
            find_by_class(&edit, "se2-block__label")[0].text_content(),
            "메인 커버"
        );

        let element = find_by_class(&edit, "se2-element")[0];
        assert_eq!(element.attr("data-draggable"), Some("true"));
        assert_eq!(element.style("left"), Some("10%"));
        assert_eq!(find_by_class(element, "se2-handle").len(), 9);
        assert!(element.text_content().contains("민수"));
    }

    #[test]
    fn test_view_mode_has_no_interaction_attributes() {
        let block = Block::new("hero-1", BlockType::Hero).with_element(
            BlockElement::new("title", ElementKind::Text, Geometry::new(10.0, 20.0, 50.0, 10.0))
                .with_binding("couple.bride.name"),
        );
        let view = render(&block, &wedding_data(), RenderMode::View);

        let interactive = view.find_all(&|n| {
            n.attr("data-selectable").is_some()
                || n.attr("data-draggable").is_some()
                || n.attr("data-handle").is_some()
        });
        assert!(interactive.is_empty());
        assert!(find_by_class(&view, "se2-block__label").is_empty());
        assert!(find_by_class(&view, "se2-element")[0].text_content().contains("수진"));
    }

    #[test]
    fn test_digital_countdown_three_days_out() {
        let node = render(&countdown_block("digital"), &wedding_data(), RenderMode::View);

        let days = node.find_all(&|n| n.attr("data-unit") == Some("days"));
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].text_content(), "3");

        let hours = node.find_all(&|n| n.attr("data-unit") == Some("hours"));
        assert_eq!(hours[0].text_content(), "00");
        assert!(find_by_class(&node, "se2-countdown__end").is_empty());
    }

    #[test]
    fn test_countdown_at_wedding_moment_uses_past_branch() {
        let at = DateTime::parse_from_rfc3339("2025-05-24T14:00:00+09:00").expect("Failed to parse");
        let node = render_at(&countdown_block("digital"), &wedding_data(), RenderMode::View, at);

        let end = find_by_class(&node, "se2-countdown__end");
        assert_eq!(end.len(), 1);
        assert_eq!(end[0].text_content(), "결혼한 지 0일 됐어요");
        assert!(node.find_all(&|n| n.attr("data-unit").is_some()).is_empty());
        assert!(node.text_content().contains("함께한 시간"));
        assert!(!node.text_content().contains('-'));
    }

    #[test]
    fn test_countdown_custom_end_message() {
        let block = countdown_block("flip")
            .with_setting("endMessage", "{couple.names} 결혼 {n}일째");
        let at = DateTime::parse_from_rfc3339("2025-06-03T15:00:00+09:00").expect("Failed to parse");
        let node = render_at(&block, &wedding_data(), RenderMode::View, at);

        assert_eq!(
            find_by_class(&node, "se2-countdown__end")[0].text_content(),
            "민수 ♥ 수진 결혼 10일째"
        );
    }

    #[test]
    fn test_countdown_styles() {
        let data = wedding_data();

        let flip = render(&countdown_block("flip"), &data, RenderMode::View);
        let labels: Vec<String> = find_by_class(&flip, "se2-countdown__label")
            .iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(labels, vec!["DAYS", "HOURS", "MINS", "SECS"]);
        assert_eq!(find_by_class(&flip, "se2-countdown__value")[0].text_content(), "03");

        let analog = render(&countdown_block("analog"), &data, RenderMode::View);
        let ring = find_by_class(&analog, "se2-countdown__progress")[0];
        let dash = ring.attr("stroke-dasharray").expect("Missing dasharray");
        assert!(dash.ends_with(" 283"));
        assert!(dash.starts_with("274.5"));

        let text = render(&countdown_block("text"), &data, RenderMode::View);
        assert_eq!(
            find_by_class(&text, "se2-countdown__text")[0].text_content(),
            "결혼까지 3일 0시간 남았어요"
        );
    }

    #[test]
    fn test_countdown_respects_unit_toggles() {
        let block = countdown_block("digital")
            .with_setting("showSeconds", false)
            .with_setting("showMinutes", false);
        let node = render(&block, &wedding_data(), RenderMode::View);

        let units: Vec<&str> = node
            .find_all(&|n| n.attr("data-unit").is_some())
            .into_iter()
            .filter_map(|n| n.attr("data-unit"))
            .collect();
        assert_eq!(units, vec!["days", "hours"]);
    }

    #[test]
    fn test_calendar_without_date_asks_for_one() {
        let mut data = wedding_data();
        data.wedding.date = None;

        for mode in ["full", "mini", "countdown"] {
            let block = Block::new("calendar-1", BlockType::Calendar).with_setting("displayMode", mode);
            let node = render(&block, &data, RenderMode::View);
            assert_eq!(find_by_class(&node, "se2-calendar__empty").len(), 1, "mode {}", mode);
        }
    }

    #[test]
    fn test_full_calendar_marks_wedding_day() {
        let node = render(&Block::new("calendar-1", BlockType::Calendar), &wedding_data(), RenderMode::View);

        let marked = find_by_class(&node, "se2-calendar__day--wedding");
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].text_content(), "24");
        // May 2025 starts on a Thursday
        assert_eq!(find_by_class(&node, "se2-calendar__day--blank").len(), 4);
    }

    #[test]
    fn test_timeline_layout() {
        let mut data = wedding_data();
        data.timeline.items = vec![
            letter_schema::data::TimelineItem {
                date: "2019.03".into(),
                title: "첫 만남".into(),
                ..Default::default()
            },
            letter_schema::data::TimelineItem {
                date: "2024.12".into(),
                title: "프로포즈".into(),
                ..Default::default()
            },
        ];
        let block = Block::new("timeline-1", BlockType::Calendar)
            .with_setting("displayMode", "timeline")
            .with_setting("layout", "alternate");
        let node = render(&block, &data, RenderMode::View);

        assert_eq!(find_by_class(&node, "se2-timeline__item").len(), 2);
        assert_eq!(find_by_class(&node, "se2-timeline__item--right").len(), 1);
        assert_eq!(find_by_class(&node, "se2-timeline--alternate").len(), 1);
    }

    #[test]
    fn test_gallery_modes_and_limit() {
        let data = wedding_data();
        let block = Block::new("gallery-1", BlockType::Gallery)
            .with_setting("columns", 2)
            .with_setting("maxItems", 4);
        let node = render(&block, &data, RenderMode::View);

        assert_eq!(find_by_class(&node, "se2-gallery__item").len(), 4);
        let track = find_by_class(&node, "se2-gallery__track")[0];
        assert_eq!(track.style("grid-template-columns"), Some("repeat(2, 1fr)"));

        let polaroid = Block::new("gallery-2", BlockType::Gallery).with_setting("displayMode", "polaroid");
        let node = render(&polaroid, &data, RenderMode::View);
        assert_eq!(find_by_class(&node, "se2-gallery__item").len(), 6);
        assert!(find_by_class(&node, "se2-gallery__item")[0].style("transform").is_some());
    }

    #[test]
    fn test_empty_gallery_placeholder_only_in_edit() {
        let mut data = wedding_data();
        data.photos.gallery.clear();
        let block = Block::new("gallery-1", BlockType::Gallery);

        let edit = render(&block, &data, RenderMode::Edit);
        assert_eq!(find_by_class(&edit, "se2-block__placeholder").len(), 1);

        let view = render(&block, &data, RenderMode::View);
        assert!(find_by_class(&view, "se2-block__placeholder").is_empty());
    }

    #[test]
    fn test_account_rows_and_copy_button() {
        let node = render(&Block::new("account-1", BlockType::Account), &wedding_data(), RenderMode::View);

        let numbers = find_by_class(&node, "se2-account__number");
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].text_content(), "국민은행 123-45-6789 (김민수)");
        assert_eq!(
            find_by_class(&node, "se2-account__copy")[0].attr("data-copy"),
            Some("123-45-6789")
        );
        // accordion is the default
        assert_eq!(node.find_all(&|n| matches!(n, VNode::Element { tag, .. } if tag == "details")).len(), 2);
    }

    #[test]
    fn test_contact_links_skip_missing_phones() {
        let node = render(&Block::new("contact-1", BlockType::Contact), &wedding_data(), RenderMode::View);

        let calls = find_by_class(&node, "se2-contact__call");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].attr("href"), Some("tel:01012345678"));
    }

    #[test]
    fn test_links_with_unsafe_schemes_are_dropped() {
        let mut data = wedding_data();
        data.venue.naver_map_url = Some("javascript:alert(1)".into());
        data.venue.kakao_map_url = Some("https://map.kakao.com/link/to/venue".into());
        data.wreath.enabled = true;
        data.wreath.order_url = Some("data:text/html,<script>x</script>".into());

        let node = render(&Block::new("location-1", BlockType::Location), &data, RenderMode::View);
        assert!(find_by_class(&node, "se2-location__link--naver").is_empty());
        let kakao = find_by_class(&node, "se2-location__link--kakao");
        assert_eq!(kakao[0].attr("href"), Some("https://map.kakao.com/link/to/venue"));

        let node = render(&Block::new("wreath-1", BlockType::Wreath), &data, RenderMode::View);
        assert!(find_by_class(&node, "se2-wreath__order").is_empty());

        let hrefs: Vec<&str> = node
            .find_all(&|n| n.attr("href").is_some())
            .into_iter()
            .filter_map(|n| n.attr("href"))
            .collect();
        assert!(hrefs.iter().all(|h| !h.starts_with("data:")));
    }

    #[test]
    fn test_embed_video_requires_http() {
        let mut data = wedding_data();
        data.video.url = Some("javascript:alert(1)".into());
        let block = Block::new("video-1", BlockType::Video).with_setting("source", "embed");

        let node = render(&block, &data, RenderMode::View);
        assert!(node.find_all(&|n| n.attr("src") == Some("javascript:alert(1)")).is_empty());
        assert_eq!(node.find_all(&|n| n.is_error()).len(), 1);
    }

    #[test]
    fn test_interview_chat_sides_and_blank_questions() {
        let mut data = wedding_data();
        data.interview.items = vec![
            InterviewItem {
                question: "첫인상은?".into(),
                groom_answer: Some("밝았어요".into()),
                bride_answer: Some("듬직했어요".into()),
            },
            InterviewItem {
                question: "  ".into(),
                groom_answer: Some("skipped".into()),
                bride_answer: None,
            },
        ];
        let block = Block::new("interview-1", BlockType::Interview).with_setting("displayMode", "chat");

        let node = render(&block, &data, RenderMode::View);
        assert_eq!(find_by_class(&node, "se2-interview__thread").len(), 1);
        assert_eq!(find_by_class(&node, "se2-interview__bubble--left")[0].text_content(), "밝았어요");
        assert_eq!(find_by_class(&node, "se2-interview__bubble--right")[0].text_content(), "듬직했어요");
        assert!(!node.text_content().contains("skipped"));
    }

    #[test]
    fn test_greeting_parents_line() {
        let node = render(
            &Block::new("greeting-1", BlockType::GreetingParents),
            &wedding_data(),
            RenderMode::View,
        );
        let lines = find_by_class(&node, "se2-greeting__parents-line");
        assert_eq!(lines[0].text_content(), "김철수 · 이영희의 아들 민수");
        assert_eq!(lines[1].text_content(), "딸 수진");
    }

    #[test]
    fn test_malformed_settings_render_with_defaults() {
        let block = Block::new("gallery-1", BlockType::Gallery).with_setting("columns", json!("many"));
        let node = render(&block, &wedding_data(), RenderMode::View);

        assert!(!node.is_error());
        assert_eq!(find_by_class(&node, "se2-gallery--grid").len(), 1);
    }

    #[test]
    fn test_missing_data_never_leaks_placeholders() {
        let data = WeddingData::default();
        for block_type in BlockType::ALL {
            let block = Block::new("b", block_type).with_content("title", "{venue.name} 안내");
            let node = render(&block, &data, RenderMode::View);
            assert!(
                !node.text_content().contains('{'),
                "{} leaked a placeholder",
                block_type
            );
        }
    }
}

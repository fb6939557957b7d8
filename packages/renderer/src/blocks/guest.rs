//! Blocks guests act on: directions, guestbook, RSVP, notices, wreaths.

use super::{link, modifier_class, paragraphs, BlockContext};
use crate::vdom::VNode;
use letter_schema::{
    LocationMode, LocationSettings, MessageSettings, NoticeMode, NoticeSettings, RsvpSettings,
    WreathSettings,
};

pub(super) fn location(ctx: &BlockContext, s: &LocationSettings) -> VNode {
    let venue = &ctx.binding.data().venue;
    let mut body = VNode::with_tag_class("div", modifier_class("se2-location", &s.display_mode))
        .with_optional_child(ctx.heading("오시는 길"));

    let name = ctx.binding.interpolate("{venue.name} {venue.hall}");
    if !name.is_empty() {
        body = body.with_child(VNode::text_element("h3", "se2-location__venue", name));
    }
    if let Some(address) = ctx.binding.resolve("venue.address") {
        body = body.with_child(VNode::text_element("p", "se2-location__address", address));
    }
    if let Some(tel) = ctx.binding.resolve("venue.tel") {
        body = body.with_optional_child(link("se2-location__tel", &format!("tel:{}", tel), &tel));
    }

    if s.display_mode == LocationMode::Map {
        if let (Some(lat), Some(lng)) = (venue.lat, venue.lng) {
            body = body.with_child(
                VNode::with_tag_class("div", "se2-location__map")
                    .with_attr("data-lat", lat.to_string())
                    .with_attr("data-lng", lng.to_string())
                    .with_attr("role", "img")
                    .with_attr("aria-label", "지도")
                    .with_style("aspect-ratio", "4 / 3")
                    .with_style("border-radius", "var(--radius-md)"),
            );
        }
    }

    if s.show_map_links {
        let links: Vec<VNode> = [
            ("naver", "네이버 지도", &venue.naver_map_url),
            ("kakao", "카카오맵", &venue.kakao_map_url),
        ]
        .into_iter()
        .filter_map(|(key, label, url)| {
            let url = url.as_deref().filter(|u| !u.trim().is_empty())?;
            link(&format!("se2-location__link se2-location__link--{}", key), url, label)
        })
        .collect();
        if !links.is_empty() {
            body = body.with_child(VNode::with_tag_class("div", "se2-location__links").with_children(links));
        }
    }

    if s.show_transport && !venue.transport.is_empty() {
        body = body.with_child(
            VNode::with_tag_class("ul", "se2-location__transport").with_children(
                venue
                    .transport
                    .iter()
                    .enumerate()
                    .map(|(i, t)| {
                        VNode::with_tag_class("li", "se2-location__transport-item")
                            .with_key(i.to_string())
                            .with_child(VNode::text_element("strong", "se2-location__transport-kind", t.kind.as_str()))
                            .with_child(paragraphs("se2-location__transport-description", &t.description))
                    })
                    .collect(),
            ),
        );
    }

    body
}

pub(super) fn message(ctx: &BlockContext, s: &MessageSettings) -> VNode {
    VNode::with_tag_class("div", modifier_class("se2-message", &s.display_mode))
        .with_optional_child(ctx.heading("방명록"))
        .with_optional_child(
            ctx.optional_text("message")
                .map(|m| paragraphs("se2-message__intro", &m)),
        )
        .with_child(
            VNode::with_tag_class("div", "se2-message__compose")
                .with_child(VNode::text_element("p", "se2-message__placeholder", s.placeholder.as_str()))
                .with_child(
                    VNode::text_element("button", "se2-message__button", s.button_label.as_str())
                        .with_attr("type", "button"),
                ),
        )
        .with_child(VNode::with_tag_class("div", "se2-message__entries"))
}

pub(super) fn rsvp(ctx: &BlockContext, s: &RsvpSettings) -> VNode {
    let mut body = VNode::with_tag_class("div", "se2-rsvp")
        .with_optional_child(ctx.heading("참석 의사 전달"));

    let message = ctx
        .optional_text("message")
        .or_else(|| ctx.binding.resolve("rsvp.message"))
        .unwrap_or_else(|| "축하의 마음으로 참석해 주시는 분들을 위해 미리 알려주세요".to_string());
    body = body.with_child(paragraphs("se2-rsvp__message", &message));

    if s.show_deadline {
        if let Some(deadline) = ctx.binding.resolve("rsvp.deadline") {
            body = body.with_child(VNode::text_element(
                "p",
                "se2-rsvp__deadline",
                format!("회신 기한: {}", deadline),
            ));
        }
    }

    let mut button = VNode::text_element("button", "se2-rsvp__button", s.button_label.as_str())
        .with_attr("type", "button");
    if !ctx.binding.data().rsvp.enabled {
        button = button.with_attr("disabled", "disabled");
    }
    body.with_child(button)
}

pub(super) fn notice(ctx: &BlockContext, s: &NoticeSettings) -> VNode {
    let items = &ctx.binding.data().notice.items;

    VNode::with_tag_class("div", modifier_class("se2-notice", &s.display_mode))
        .with_optional_child(ctx.heading("안내사항"))
        .with_child(
            VNode::with_tag_class("ul", "se2-notice__items").with_children(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let mut entry = VNode::with_tag_class("li", "se2-notice__item").with_key(i.to_string());
                        if s.display_mode == NoticeMode::Icons {
                            entry = entry.with_child(VNode::text_element(
                                "span",
                                "se2-notice__icon",
                                item.icon.as_deref().unwrap_or("•"),
                            ));
                        }
                        entry
                            .with_child(VNode::text_element("strong", "se2-notice__title", item.title.as_str()))
                            .with_child(paragraphs("se2-notice__content", &item.content))
                    })
                    .collect(),
            ),
        )
}

pub(super) fn wreath(ctx: &BlockContext, s: &WreathSettings) -> VNode {
    let wreath = &ctx.binding.data().wreath;
    let mut body = VNode::with_tag_class("div", "se2-wreath")
        .with_optional_child(ctx.heading("축하 화환"))
        .with_optional_child(
            ctx.optional_text("message")
                .map(|m| paragraphs("se2-wreath__message", &m)),
        );

    if s.show_senders && !wreath.senders.is_empty() {
        body = body.with_child(
            VNode::with_tag_class("ul", "se2-wreath__senders").with_children(
                wreath
                    .senders
                    .iter()
                    .map(|sender| VNode::text_element("li", "se2-wreath__sender", sender.as_str()))
                    .collect(),
            ),
        );
    }

    let order = wreath
        .order_url
        .as_deref()
        .filter(|u| wreath.enabled && !u.trim().is_empty())
        .and_then(|url| link("se2-wreath__order", url, &s.button_label));

    match order {
        Some(order) => body.with_child(order.with_attr("target", "_blank")),
        None if ctx.is_edit() => body.with_child(VNode::text_element(
            "p",
            "se2-block__placeholder",
            "화환 주문 링크를 입력해 주세요",
        )),
        None => body,
    }
}

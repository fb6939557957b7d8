//! Cover-style blocks: hero, greeting, ending, divider.

use super::{image, modifier_class, paragraphs, BlockContext};
use crate::vdom::VNode;
use letter_schema::{
    DividerSettings, DividerStyle, EndingSettings, GreetingParentsSettings, HeroMode,
    HeroSettings, PersonInfo,
};

pub(super) fn hero(ctx: &BlockContext, s: &HeroSettings) -> VNode {
    let data = ctx.binding.data();
    let mut body = VNode::with_tag_class("div", modifier_class("se2-hero", &s.display_mode));

    if let Some(photo) = data.photos.main.as_deref().filter(|p| !p.is_empty()) {
        let mut media = VNode::with_tag_class("div", "se2-hero__media")
            .with_child(image("se2-hero__photo", photo, &ctx.binding.get("couple.names")));
        if s.display_mode == HeroMode::Overlay {
            let opacity = s.overlay_opacity.clamp(0.0, 1.0);
            media = media.with_child(
                VNode::with_tag_class("div", "se2-hero__overlay")
                    .with_style("background", format!("rgba(0, 0, 0, {})", opacity)),
            );
        }
        body = body.with_child(media);
    }

    let mut text = VNode::with_tag_class("div", "se2-hero__text")
        .with_optional_child(
            ctx.optional_text("subtitle")
                .map(|t| VNode::text_element("p", "se2-hero__subtitle", t)),
        );

    text = match ctx.optional_text("title") {
        Some(title) => text.with_child(
            VNode::text_element("h1", "se2-hero__names", title)
                .with_style("font-family", "var(--font-display)"),
        ),
        None => text.with_child(
            VNode::with_tag_class("h1", "se2-hero__names")
                .with_style("font-family", "var(--font-display)")
                .with_child(VNode::text_element(
                    "span",
                    "se2-hero__name se2-hero__name--groom",
                    ctx.binding.get("couple.groom.name"),
                ))
                .with_child(VNode::text_element("span", "se2-hero__amp", "&"))
                .with_child(VNode::text_element(
                    "span",
                    "se2-hero__name se2-hero__name--bride",
                    ctx.binding.get("couple.bride.name"),
                )),
        ),
    };

    if s.show_date {
        let date = ctx.binding.get("wedding.dateDisplay");
        if !date.is_empty() {
            text = text.with_child(VNode::text_element("p", "se2-hero__date", date));
        }
    }

    if s.show_venue {
        let venue = ctx.binding.interpolate("{venue.name} {venue.hall}");
        if !venue.is_empty() {
            text = text.with_child(VNode::text_element("p", "se2-hero__venue", venue));
        }
    }

    body.with_child(text)
}

fn parent_line(person: &PersonInfo, relation: &str) -> Option<VNode> {
    let name = person.name.as_deref().filter(|n| !n.is_empty())?;
    let line = match person.parents_line() {
        Some(parents) => format!("{}의 {} {}", parents, relation, name),
        None => format!("{} {}", relation, name),
    };
    Some(VNode::text_element("p", "se2-greeting__parents-line", line))
}

pub(super) fn greeting_parents(ctx: &BlockContext, s: &GreetingParentsSettings) -> VNode {
    let data = ctx.binding.data();
    let mut body = VNode::with_tag_class("div", "se2-greeting")
        .with_optional_child(ctx.heading("모시는 글"));

    if let Some(title) = data.greeting.title.as_deref().filter(|t| !t.is_empty()) {
        body = body.with_child(VNode::text_element("h3", "se2-greeting__title", title));
    }

    let message = ctx
        .optional_text("message")
        .or_else(|| ctx.binding.resolve("greeting.content"));
    if let Some(message) = message {
        body = body.with_child(paragraphs("se2-greeting__message", &message));
    }

    if s.show_parents {
        let parents = VNode::with_tag_class("div", "se2-greeting__parents")
            .with_optional_child(parent_line(&data.couple.groom, "아들"))
            .with_optional_child(parent_line(&data.couple.bride, "딸"));
        if !parents.children().is_empty() {
            body = body.with_child(parents);
        }
    }

    body
}

pub(super) fn ending(ctx: &BlockContext, s: &EndingSettings) -> VNode {
    let data = ctx.binding.data();
    let mut body = VNode::with_tag_class("div", "se2-ending");

    if s.show_photo {
        if let Some(photo) = data.ending.photo.as_deref().filter(|p| !p.is_empty()) {
            body = body.with_child(image("se2-ending__photo", photo, ""));
        }
    }

    let message = ctx
        .optional_text("message")
        .or_else(|| ctx.binding.resolve("ending.message"))
        .unwrap_or_else(|| "저희의 새로운 시작을 함께해 주셔서 감사합니다".to_string());

    body.with_child(paragraphs("se2-ending__message", &message))
        .with_optional_child(
            ctx.binding
                .resolve("couple.names")
                .map(|names| VNode::text_element("p", "se2-ending__signature", names)),
        )
}

pub(super) fn divider(_ctx: &BlockContext, s: &DividerSettings) -> VNode {
    let body = VNode::with_tag_class("div", modifier_class("se2-divider", &s.style))
        .with_attr("role", "separator");

    match s.style {
        DividerStyle::Line => body.with_child(
            VNode::with_tag_class("hr", "se2-divider__line")
                .with_style("border-color", "var(--border-muted)"),
        ),
        DividerStyle::Ornament => {
            body.with_child(VNode::text_element("span", "se2-divider__ornament", "❦"))
        }
        DividerStyle::Space => body.with_style("height", "var(--element-gap)"),
    }
}

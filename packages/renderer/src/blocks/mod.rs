//! # Block Renderer
//!
//! Maps one block to a [`VNode`] section. Dispatch is an exhaustive match over
//! [`BlockSpec`], so every block type has exactly one strategy and adding a
//! type is a compile error until it is rendered here.
//!
//! ```text
//! <section class="se2-block se2-block--{type}" data-block-id data-block-type data-block-index>
//!   <span class="se2-block__label">   (edit only)
//!   <div class="se2-block__body">     type-specific content
//!   <div class="se2-block__elements"> positioned elements, if any
//! </section>
//! ```
//!
//! ## Determinism Contract
//!
//! Rendering reads only the block, the resolved style, the binding context and
//! the mode. View and preview output carry no interaction attributes.

mod calendar;
mod cover;
mod guest;
mod media;
mod people;

use crate::binding::BindingContext;
use crate::document::RenderMode;
use crate::style_resolver::ResolvedStyle;
use crate::vdom::VNode;
use letter_schema::{Block, BlockElement, BlockSpec, BlockType, ElementKind};
use serde::Serialize;
use tracing::{debug, warn};

/// Edge and corner handles of a selected element
pub const RESIZE_HANDLES: [&str; 8] = ["n", "s", "e", "w", "ne", "nw", "se", "sw"];

/// Everything a block strategy may read
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    pub block: &'a Block,
    pub style: &'a ResolvedStyle,
    pub binding: &'a BindingContext<'a>,
    pub mode: RenderMode,
    pub index: usize,
}

impl<'a> BlockContext<'a> {
    /// Interpolated `content[key]`, or `default` interpolated when unset
    pub fn text(&self, key: &str, default: &str) -> String {
        let template = self.block.content_str(key).unwrap_or(default);
        self.binding.interpolate(template)
    }

    /// Interpolated `content[key]`, `None` when unset or empty
    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.block
            .content_str(key)
            .map(|t| self.binding.interpolate(t))
            .filter(|s| !s.is_empty())
    }

    /// Section heading from `content.title`, falling back to `default`
    pub fn heading(&self, default: &str) -> Option<VNode> {
        let title = self.text("title", default);
        if title.is_empty() {
            return None;
        }
        Some(VNode::text_element("h2", "se2-block__title", title))
    }

    pub fn is_edit(&self) -> bool {
        self.mode == RenderMode::Edit
    }
}

/// Kebab-case name of a settings enum, for class modifiers
pub(crate) fn variant_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::from("default"),
    }
}

/// `{base} {base}--{variant}`
pub(crate) fn modifier_class<T: Serialize>(base: &str, variant: &T) -> String {
    format!("{} {}--{}", base, base, variant_name(variant))
}

/// Paragraph per line of text
pub(crate) fn paragraphs(class: &str, text: &str) -> VNode {
    VNode::with_tag_class("div", class).with_children(
        text.lines()
            .map(|line| VNode::text_element("p", "se2-text__line", line.trim()))
            .collect(),
    )
}

pub(crate) fn image(class: &str, src: &str, alt: &str) -> VNode {
    VNode::with_tag_class("img", class)
        .with_attr("src", src)
        .with_attr("alt", alt)
        .with_attr("loading", "lazy")
}

/// Schemes a guest page may link to
const LINK_SCHEMES: [&str; 4] = ["http", "https", "tel", "sms"];
/// Schemes an embedded player may load
pub(crate) const EMBED_SCHEMES: [&str; 2] = ["http", "https"];

/// `url` when it is absolute with one of `schemes`, otherwise `None`
pub(crate) fn allowed_url<'a>(url: &'a str, schemes: &[&str]) -> Option<&'a str> {
    let url = url.trim();
    let allowed = url
        .split_once(':')
        .map(|(scheme, _)| schemes.iter().any(|s| scheme.eq_ignore_ascii_case(s)))
        .unwrap_or(false);

    if allowed {
        Some(url)
    } else {
        warn!(url = %url, "Dropping URL with a disallowed scheme");
        None
    }
}

/// `<a href>`; `None` when the href is not safe to follow
pub(crate) fn link(class: &str, href: &str, label: &str) -> Option<VNode> {
    let href = allowed_url(href, &LINK_SCHEMES)?;
    Some(
        VNode::with_tag_class("a", class)
            .with_attr("href", href)
            .with_child(VNode::text(label)),
    )
}

/// Render one block; disabled blocks are the caller's concern
///
/// An unknown block type yields a visible [`VNode::Error`].
pub fn render_block(ctx: &BlockContext) -> VNode {
    let spec = match BlockSpec::from_block(ctx.block) {
        Ok(spec) => spec,
        Err(err) => {
            warn!(
                block_id = %ctx.block.id,
                block_type = %ctx.block.block_type,
                error = %err,
                "Cannot render block"
            );
            return VNode::error(
                format!("Unsupported block type: {}", ctx.block.block_type),
                Some(ctx.block.id.clone()),
            );
        }
    };

    debug!(block_id = %ctx.block.id, block_type = %ctx.block.block_type, "Rendering block");

    let body = match &spec {
        BlockSpec::Hero(s) => cover::hero(ctx, s),
        BlockSpec::GreetingParents(s) => cover::greeting_parents(ctx, s),
        BlockSpec::Ending(s) => cover::ending(ctx, s),
        BlockSpec::Divider(s) => cover::divider(ctx, s),
        BlockSpec::Profile(s) => people::profile(ctx, s),
        BlockSpec::Contact(s) => people::contact(ctx, s),
        BlockSpec::Account(s) => people::account(ctx, s),
        BlockSpec::Interview(s) => people::interview(ctx, s),
        BlockSpec::Calendar(s) => calendar::calendar(ctx, s),
        BlockSpec::Gallery(s) => media::gallery(ctx, s),
        BlockSpec::Music(s) => media::music(ctx, s),
        BlockSpec::Video(s) => media::video(ctx, s),
        BlockSpec::Location(s) => guest::location(ctx, s),
        BlockSpec::Message(s) => guest::message(ctx, s),
        BlockSpec::Rsvp(s) => guest::rsvp(ctx, s),
        BlockSpec::Notice(s) => guest::notice(ctx, s),
        BlockSpec::Wreath(s) => guest::wreath(ctx, s),
    };

    section(ctx, spec.block_type(), body)
}

fn section(ctx: &BlockContext, block_type: BlockType, body: VNode) -> VNode {
    let block = ctx.block;
    let tokens = &ctx.style.tokens;
    let spacing = &ctx.style.spacing;
    let override_style = block.style.as_ref();

    let background = override_style
        .and_then(|s| s.background.clone())
        .unwrap_or_else(|| tokens.bg_section.clone());
    let padding = override_style
        .and_then(|s| s.padding.clone())
        .unwrap_or_else(|| format!("{}px {}px", spacing.block_padding_y, spacing.block_padding_x));

    let mut node = VNode::with_tag_class(
        "section",
        format!("se2-block se2-block--{}", block_type.as_str()),
    )
    .with_key(block.id.clone())
    .with_attr("data-block-id", block.id.clone())
    .with_attr("data-block-type", block_type.as_str())
    .with_attr("data-block-index", ctx.index.to_string())
    .with_style("position", "relative")
    .with_style("background", background)
    .with_style("color", tokens.fg_default.clone())
    .with_style("padding", padding);

    if let Some(height) = block.height {
        node = node.with_style("min-height", format!("{}vh", height));
    }

    if ctx.is_edit() {
        node = node
            .with_attr("data-selectable", "true")
            .with_style("outline", format!("1px dashed {}", tokens.border_default))
            .with_child(VNode::text_element(
                "span",
                "se2-block__label",
                block_type.label_ko(),
            ));
    }

    node = node.with_child(body.with_class("se2-block__body"));

    if !block.elements.is_empty() {
        let mut elements: Vec<&BlockElement> = block.elements.iter().collect();
        elements.sort_by_key(|e| e.z_index);
        node = node.with_child(
            VNode::with_tag_class("div", "se2-block__elements").with_children(
                elements.into_iter().map(|e| element(ctx, e)).collect(),
            ),
        );
    }

    node
}

fn element(ctx: &BlockContext, element: &BlockElement) -> VNode {
    let g = &element.geometry;
    let kind = variant_name(&element.kind);

    let mut node = VNode::with_tag_class("div", format!("se2-element se2-element--{}", kind))
        .with_key(element.id.clone())
        .with_attr("data-element-id", element.id.clone())
        .with_style("position", "absolute")
        .with_style("left", format!("{}%", g.x))
        .with_style("top", format!("{}%", g.y))
        .with_style("width", format!("{}%", g.width))
        .with_style("height", format!("{}%", g.height))
        .with_style("z-index", element.z_index.to_string())
        .with_styles(element.style.clone());

    if g.rotation != 0.0 {
        node = node.with_style("transform", format!("rotate({}deg)", g.rotation));
    }

    let value = match &element.binding {
        Some(path) => ctx.binding.get(path),
        None => element
            .value
            .as_deref()
            .map(|v| ctx.binding.interpolate(v))
            .unwrap_or_default(),
    };

    node = match element.kind {
        ElementKind::Text => node.with_child(VNode::text(value)),
        ElementKind::Image if !value.is_empty() => node.with_child(image("se2-element__image", &value, "")),
        ElementKind::Image | ElementKind::Shape => node,
        ElementKind::Button => node.with_child(VNode::text_element("button", "se2-element__button", value)),
    };

    if ctx.is_edit() {
        node = node.with_attr("data-draggable", "true");
        for handle in RESIZE_HANDLES {
            node = node.with_child(
                VNode::with_tag_class("div", format!("se2-handle se2-handle--{}", handle))
                    .with_attr("data-handle", handle),
            );
        }
        node = node.with_child(
            VNode::with_tag_class("div", "se2-handle se2-handle--rotate")
                .with_attr("data-handle", "rotate"),
        );
    }

    node
}

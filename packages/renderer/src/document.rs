//! # Document Renderer
//!
//! Composes the enabled blocks of an [`EditorDocument`] into one tree.
//!
//! ## Determinism Contract
//!
//! The output depends only on the document and [`RenderOptions`]; the current
//! time comes from `RenderOptions::now`. Style is resolved once and the binding
//! context is built once per call. Blocks render in array order and disabled
//! blocks are skipped entirely.

use crate::binding::BindingContext;
use crate::blocks::{render_block, BlockContext};
use crate::errors::{RenderError, RenderResult};
use crate::fonts::{font_resources, FontResource};
use crate::style_resolver::{css_variables, resolve_style};
use crate::vdom::VNode;
use chrono::{DateTime, FixedOffset};
use letter_schema::EditorDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument, warn};

pub const EMPTY_STATE_MESSAGE: &str = "아직 추가된 블록이 없습니다";
pub const CREDIT_TEXT: &str = "maison de letter";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Authoring surface: selection and drag affordances
    Edit,
    /// Author's preview of the guest page
    Preview,
    /// Public guest page, fully static
    #[default]
    View,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Edit => "edit",
            RenderMode::Preview => "preview",
            RenderMode::View => "view",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edit" => Ok(RenderMode::Edit),
            "preview" => Ok(RenderMode::Preview),
            "view" => Ok(RenderMode::View),
            other => Err(RenderError::Generic(format!("Unknown render mode: {}", other))),
        }
    }
}

/// Optional root size override in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Viewport {
    pub fn new(width: Option<u32>, height: Option<u32>) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> RenderResult<()> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err(RenderError::InvalidViewport {
                width: self.width.unwrap_or_default(),
                height: self.height.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub viewport: Viewport,
    /// The instant countdowns and D-day labels are computed against
    pub now: DateTime<FixedOffset>,
}

impl RenderOptions {
    pub fn new(mode: RenderMode, now: DateTime<FixedOffset>) -> Self {
        Self {
            mode,
            viewport: Viewport::default(),
            now,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    pub root: VNode,
    /// Custom properties for the document root, without the `:root` wrapper
    pub css_variables: BTreeMap<String, String>,
    pub font_resources: Vec<FontResource>,
    /// Enabled blocks rendered, including error markers
    pub block_count: usize,
    /// Problems that were rendered inline
    pub warnings: Vec<String>,
}

impl RenderedDocument {
    pub fn has_errors(&self) -> bool {
        !self.root.find_all(&|n| n.is_error()).is_empty()
    }
}

#[instrument(skip(document, options), fields(document_id = %document.id, mode = %options.mode))]
pub fn render_document(
    document: &EditorDocument,
    options: &RenderOptions,
) -> RenderResult<RenderedDocument> {
    options.viewport.validate()?;

    let style = resolve_style(&document.effective_style());
    let binding = BindingContext::new(&document.data, options.now);
    let css_variables = css_variables(&style);

    let mut warnings = Vec::new();
    let mut sections = Vec::new();

    for (index, block) in document.enabled_blocks().enumerate() {
        let block_style = style.for_block(block);
        let ctx = BlockContext {
            block,
            style: &block_style,
            binding: &binding,
            mode: options.mode,
            index,
        };

        let node = render_block(&ctx);
        for error in node.find_all(&|n| n.is_error()) {
            if let VNode::Error { message, .. } = error {
                warnings.push(format!("{}: {}", block.id, message));
            }
        }
        sections.push(node);
    }

    let block_count = sections.len();
    if sections.is_empty() {
        warn!("Document has no enabled blocks");
        sections.push(VNode::text_element(
            "div",
            "se2-empty",
            EMPTY_STATE_MESSAGE,
        ));
    }

    let mut root = VNode::with_tag_class("div", format!("se2-document se2-document--{}", options.mode))
        .with_attr("data-document-id", document.id.clone())
        .with_attr("data-mode", options.mode.as_str())
        .with_styles(css_variables.clone())
        .with_style("background", style.tokens.bg_page.clone())
        .with_style("color", style.tokens.fg_default.clone())
        .with_style("font-family", style.typography.body.stack.clone())
        .with_children(sections);

    if let Some(width) = options.viewport.width {
        root = root
            .with_style("width", format!("{}px", width))
            .with_style("max-width", format!("{}px", width));
    }
    if let Some(height) = options.viewport.height {
        root = root.with_style("min-height", format!("{}px", height));
    }

    if options.mode != RenderMode::Edit {
        root = root.with_child(
            VNode::with_tag_class("footer", "se2-credit")
                .with_child(VNode::text_element("span", "se2-credit__text", CREDIT_TEXT)),
        );
    }

    info!(block_count, warnings = warnings.len(), "Rendered document");

    Ok(RenderedDocument {
        root,
        css_variables,
        font_resources: font_resources(&style, options.mode),
        block_count,
        warnings,
    })
}

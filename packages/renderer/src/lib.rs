//! # Letter Renderer
//!
//! Turns an [`EditorDocument`](letter_schema::EditorDocument) into a virtual
//! DOM tree.
//!
//! ```text
//! EditorDocument
//!   ├── style ──> style_resolver ──> ResolvedStyle ──┐
//!   ├── data  ──> binding        ──> BindingContext ─┼──> blocks (per block) ──> document
//!   └── blocks ──────────────────────────────────────┘
//! ```
//!
//! Rendering is synchronous and pure: the current time is an input
//! ([`RenderOptions::now`]), and identical inputs produce identical trees.

pub mod binding;
pub mod blocks;
pub mod color;
pub mod countdown;
pub mod document;
pub mod errors;
pub mod fonts;
pub mod interaction;
pub mod presets;
pub mod style_resolver;
pub mod vdom;

#[cfg(test)]
mod tests_blocks;
#[cfg(test)]
mod tests_document;
#[cfg(test)]
mod tests_style;

pub use binding::BindingContext;
pub use blocks::{render_block, BlockContext};
pub use countdown::Countdown;
pub use document::{
    render_document, RenderMode, RenderOptions, RenderedDocument, Viewport, CREDIT_TEXT,
    EMPTY_STATE_MESSAGE,
};
pub use errors::{RenderError, RenderResult};
pub use fonts::{font_resources, FontKind, FontResource};
pub use interaction::{
    ChangePhase, DragConfig, DragSession, DragTarget, GeometryChange, GeometryObserver,
    Modifiers, Operation, Point, ResizeHandle,
};
pub use style_resolver::{css_variables, resolve_style, ResolvedStyle};
pub use vdom::VNode;

//! # Letter Editor
//!
//! Editing engine for invitation documents.
//!
//! ```text
//! store: DocumentAdapter::load ──> EditorDocument
//!                                      │
//!                                      v
//! editor: EditSession ── Mutation ──> validated apply + undo history
//!                                      │
//!                                      v
//! renderer: render_document ──> RenderedDocument
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use letter_editor::{EditSession, EditTarget, Mutation};
//!
//! let mut session = EditSession::new("client-1", EditTarget::Document(doc));
//! session.apply(Mutation::SetBlockEnabled {
//!     block_id: "gallery-1".to_string(),
//!     enabled: false,
//! })?;
//! session.undo()?;
//! let rendered = session.render(&RenderOptions::new(RenderMode::Edit, now))?;
//! ```

mod errors;
mod mutations;
mod session;
mod target;
mod undo_stack;

pub use errors::{EditorError, EditorResult};
pub use mutations::Mutation;
pub use session::EditSession;
pub use target::EditTarget;
pub use undo_stack::{MutationBatch, UndoStack};

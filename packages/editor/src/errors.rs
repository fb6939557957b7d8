//! Error types for the editor

use letter_renderer::RenderError;
use letter_schema::DocumentStatus;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),

    #[error("Index {index} out of bounds for {len} blocks")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Element '{element_id}' not found in block '{block_id}'")]
    ElementNotFound { block_id: String, element_id: String },

    #[error("Invalid data path: {0}")]
    InvalidPath(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("Branch data is read-only; edit the parent document")]
    ReadOnly,

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

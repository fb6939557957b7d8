use crate::document::DocumentStatus;
use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: DocumentStatus,
        to: DocumentStatus,
    },

    #[error("Schema error: {0}")]
    Generic(String),
}

impl From<String> for SchemaError {
    fn from(s: String) -> Self {
        SchemaError::Generic(s)
    }
}

impl From<&str> for SchemaError {
    fn from(s: &str) -> Self {
        SchemaError::Generic(s.to_string())
    }
}

use letter_common::CommonError;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported document version {version} for '{id}'")]
    UnsupportedVersion { id: String, version: u32 },

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Generic(String),
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError::Generic(s)
    }
}

impl From<&str> for StoreError {
    fn from(s: &str) -> Self {
        StoreError::Generic(s.to_string())
    }
}

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that abort a render pass
///
/// Content problems (unknown block types, malformed settings, missing data)
/// never surface here; they render as placeholders or fall back to defaults.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid drag config: {0}")]
    InvalidDragConfig(String),

    #[error("No drag session in progress")]
    NoActiveSession,

    #[error("Render error: {0}")]
    Generic(String),
}

impl From<String> for RenderError {
    fn from(s: String) -> Self {
        RenderError::Generic(s)
    }
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Generic(s.to_string())
    }
}

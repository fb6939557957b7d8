pub mod error;
pub mod filesystem;
pub mod json;
pub mod result;

pub use error::*;
pub use filesystem::*;
pub use json::*;
pub use result::*;

//! Persistence for invitation documents
//!
//! Stored records keep whatever shape the editor wrote at the time, so
//! everything coming out of a [`DocumentSource`] goes through the
//! [`DocumentAdapter`] before it reaches the renderer. That is the only
//! place legacy style and data shapes are normalized.

pub mod adapter;
pub mod errors;
pub mod fs_store;
pub mod records;
pub mod source;

pub use adapter::DocumentAdapter;
pub use errors::{StoreError, StoreResult};
pub use fs_store::JsonDirStore;
pub use records::{BranchRecord, DocumentRecord};
pub use source::{DocumentSource, MemoryStore, ShareTarget};

//! Turns stored records into [`EditorDocument`]s
//!
//! Branches borrow their wedding data from the parent document on every
//! load. Nothing is snapshotted, so an edit to the parent's data shows up
//! in every branch the next time it is loaded.

use crate::errors::{StoreError, StoreResult};
use crate::records::{BranchRecord, DocumentRecord};
use crate::source::{DocumentSource, ShareTarget};
use letter_schema::{normalize_data, normalize_style, DocumentMeta, EditorDocument};
use tracing::{debug, instrument, warn};

/// Stored schema versions this adapter understands
pub const SUPPORTED_VERSIONS: [u32; 2] = [1, 2];

pub struct DocumentAdapter<S: DocumentSource> {
    source: S,
}

impl<S: DocumentSource> DocumentAdapter<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Load a document or branch by id
    ///
    /// Documents are looked up first. A branch whose parent no longer
    /// exists loads as `None`.
    #[instrument(skip(self))]
    pub fn load(&self, id: &str) -> StoreResult<Option<EditorDocument>> {
        if let Some(record) = self.source.get_document(id)? {
            return document_from_record(record).map(Some);
        }

        let Some(branch) = self.source.get_branch(id)? else {
            debug!("No document or branch");
            return Ok(None);
        };

        let Some(parent) = self.source.get_document(&branch.parent_document_id)? else {
            warn!(parent = %branch.parent_document_id, "Branch parent is missing");
            return Ok(None);
        };

        branch_from_records(branch, parent).map(Some)
    }

    /// Load whatever a share id points at, only if it is published
    #[instrument(skip(self))]
    pub fn load_published(&self, share_id: &str) -> StoreResult<Option<EditorDocument>> {
        let id = match self.source.find_by_share_id(share_id)? {
            Some(ShareTarget::Document(id)) | Some(ShareTarget::Branch(id)) => id,
            None => return Ok(None),
        };

        let document = self.load(&id)?;
        Ok(document.filter(|doc| doc.status.is_public()))
    }
}

fn check_version(id: &str, version: u32) -> StoreResult<()> {
    if SUPPORTED_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(StoreError::UnsupportedVersion {
            id: id.to_string(),
            version,
        })
    }
}

/// Normalize a stored document into the in-memory shape
pub fn document_from_record(record: DocumentRecord) -> StoreResult<EditorDocument> {
    check_version(&record.id, record.version)?;

    Ok(EditorDocument {
        id: record.id,
        version: letter_schema::CURRENT_VERSION,
        meta: DocumentMeta {
            title: record.title,
            slug: record.slug,
            created_at: record.created_at,
            updated_at: record.updated_at,
        },
        blocks: record.blocks,
        style: normalize_style(record.style),
        data: normalize_data(record.data),
        animation: record.animation,
        status: record.status,
    })
}

/// Overlay a branch onto its parent; `data` always comes from the parent
pub fn branch_from_records(
    branch: BranchRecord,
    parent: DocumentRecord,
) -> StoreResult<EditorDocument> {
    check_version(&parent.id, parent.version)?;

    let title = if branch.title.is_empty() {
        parent.title
    } else {
        branch.title
    };

    Ok(EditorDocument {
        id: branch.id,
        version: letter_schema::CURRENT_VERSION,
        meta: DocumentMeta {
            title,
            slug: parent.slug,
            created_at: parent.created_at,
            updated_at: parent.updated_at,
        },
        blocks: branch.blocks.unwrap_or(parent.blocks),
        style: normalize_style(branch.style.unwrap_or(parent.style)),
        data: normalize_data(parent.data),
        animation: branch.animation.unwrap_or(parent.animation),
        status: branch.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_unsupported_version_is_error() {
        let mut record = DocumentRecord::new("doc-1");
        record.version = 7;
        let result = document_from_record(record);
        assert!(matches!(
            result,
            Err(StoreError::UnsupportedVersion { version: 7, .. })
        ));
    }

    #[test]
    fn test_branch_title_falls_back_to_parent() {
        let mut parent = DocumentRecord::new("doc-1");
        parent.title = "Parent".to_string();
        let branch = BranchRecord::new("br-1", "doc-1");

        let doc = branch_from_records(branch, parent).expect("Failed to merge branch");
        assert_eq!(doc.meta.title, "Parent");
        assert_eq!(doc.id, "br-1");
    }

    #[test]
    fn test_legacy_style_is_normalized_on_load() {
        let mut store = MemoryStore::new();
        let mut record = DocumentRecord::new("doc-1");
        record.version = 1;
        record.style = json!({ "themeName": "classic", "colors": { "primary": "#8b5cf6" } });
        store.insert_document(record);

        let adapter = DocumentAdapter::new(store);
        let doc = adapter
            .load("doc-1")
            .expect("Failed to load")
            .expect("Document should exist");
        assert_eq!(doc.version, letter_schema::CURRENT_VERSION);
        assert_eq!(doc.style.preset.as_deref(), Some("classic"));
        let primary = doc
            .style
            .theme
            .as_ref()
            .and_then(|theme| theme.colors.as_ref())
            .and_then(|colors| colors.primary.as_deref());
        assert_eq!(primary, Some("#8b5cf6"));
    }
}

//! JSON-file document store
//!
//! Layout under the root directory:
//!
//! ```text
//! documents/{id}.json
//! branches/{id}.json
//! shares.json          share id -> ShareTarget
//! ```

use crate::errors::{StoreError, StoreResult};
use crate::records::{BranchRecord, DocumentRecord};
use crate::source::{DocumentSource, ShareTarget};
use letter_common::{read_json, write_json, FileSystem};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const SHARES_FILE: &str = "shares.json";

pub struct JsonDirStore<F: FileSystem> {
    fs: F,
    root: PathBuf,
}

impl<F: FileSystem> JsonDirStore<F> {
    pub fn new(fs: F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, id: &str) -> StoreResult<PathBuf> {
        Ok(self.root.join("documents").join(record_file(id)?))
    }

    pub fn branch_path(&self, id: &str) -> StoreResult<PathBuf> {
        Ok(self.root.join("branches").join(record_file(id)?))
    }

    pub fn put_document(&self, record: &DocumentRecord) -> StoreResult<()> {
        let path = self.document_path(&record.id)?;
        write_json(&self.fs, &path, record)?;
        if let Some(share_id) = &record.share_id {
            self.register_share(share_id, ShareTarget::Document(record.id.clone()))?;
        }
        debug!(id = %record.id, path = %path.display(), "Wrote document");
        Ok(())
    }

    pub fn put_branch(&self, record: &BranchRecord) -> StoreResult<()> {
        let path = self.branch_path(&record.id)?;
        write_json(&self.fs, &path, record)?;
        if let Some(share_id) = &record.share_id {
            self.register_share(share_id, ShareTarget::Branch(record.id.clone()))?;
        }
        debug!(id = %record.id, path = %path.display(), "Wrote branch");
        Ok(())
    }

    fn shares(&self) -> StoreResult<BTreeMap<String, ShareTarget>> {
        let path = self.root.join(SHARES_FILE);
        if !self.fs.exists(&path) {
            return Ok(BTreeMap::new());
        }
        Ok(read_json(&self.fs, &path)?)
    }

    fn register_share(&self, share_id: &str, target: ShareTarget) -> StoreResult<()> {
        let mut shares = self.shares()?;
        shares.insert(share_id.to_string(), target);
        write_json(&self.fs, &self.root.join(SHARES_FILE), &shares)?;
        Ok(())
    }

    fn read_optional<T: serde::de::DeserializeOwned>(&self, path: &Path) -> StoreResult<Option<T>> {
        if !self.fs.exists(path) {
            return Ok(None);
        }
        Ok(Some(read_json(&self.fs, path)?))
    }

    /// A record under `dir`; ids that could never have been stored read as absent
    fn read_record<T: serde::de::DeserializeOwned>(
        &self,
        dir: &str,
        id: &str,
    ) -> StoreResult<Option<T>> {
        let Ok(file) = record_file(id) else {
            debug!(id = %id, "Unstorable record id, treating as not found");
            return Ok(None);
        };
        self.read_optional(&self.root.join(dir).join(file))
    }
}

/// Ids become file names, so anything that could escape the directory is rejected
fn record_file(id: &str) -> StoreResult<String> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(StoreError::Generic(format!("Invalid record id: '{}'", id)));
    }
    Ok(format!("{}.json", id))
}

impl<F: FileSystem> DocumentSource for JsonDirStore<F> {
    fn get_document(&self, id: &str) -> StoreResult<Option<DocumentRecord>> {
        self.read_record("documents", id)
    }

    fn get_branch(&self, id: &str) -> StoreResult<Option<BranchRecord>> {
        self.read_record("branches", id)
    }

    fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<ShareTarget>> {
        Ok(self.shares()?.remove(share_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_common::MockFileSystem;

    #[test]
    fn test_put_then_get_document() {
        let store = JsonDirStore::new(MockFileSystem::new(), "/data");
        let mut record = DocumentRecord::new("doc-1");
        record.title = "Our Wedding".to_string();
        record.share_id = Some("share-1".to_string());

        store.put_document(&record).expect("Failed to write document");

        let back = store
            .get_document("doc-1")
            .expect("Failed to read document")
            .expect("Document should exist");
        assert_eq!(back, record);
        assert_eq!(
            store.find_by_share_id("share-1").expect("Failed to read shares"),
            Some(ShareTarget::Document("doc-1".to_string()))
        );
    }

    #[test]
    fn test_missing_records_are_none() {
        let store = JsonDirStore::new(MockFileSystem::new(), "/data");
        assert!(store.get_document("doc-1").expect("Failed to read").is_none());
        assert!(store.get_branch("br-1").expect("Failed to read").is_none());
        assert!(store.find_by_share_id("x").expect("Failed to read").is_none());
    }

    #[test]
    fn test_path_escaping_ids_are_rejected_on_write() {
        let store = JsonDirStore::new(MockFileSystem::new(), "/data");
        assert!(store.put_document(&DocumentRecord::new("../secrets")).is_err());
        assert!(store.document_path("invite.v2").is_err());
        assert!(store.branch_path("").is_err());
    }

    #[test]
    fn test_unstorable_ids_read_as_not_found() {
        let store = JsonDirStore::new(MockFileSystem::new(), "/data");
        for id in ["../secrets", "", "invite.v2", "우리결혼해요"] {
            assert!(store.get_document(id).expect("Failed to read").is_none());
            assert!(store.get_branch(id).expect("Failed to read").is_none());
        }
    }
}

use crate::errors::StoreResult;
use crate::records::{BranchRecord, DocumentRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a public share id points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ShareTarget {
    Document(String),
    Branch(String),
}

/// Read access to stored documents and branches
///
/// Missing records are `Ok(None)`; errors are reserved for storage that
/// exists but cannot be read.
pub trait DocumentSource {
    fn get_document(&self, id: &str) -> StoreResult<Option<DocumentRecord>>;

    fn get_branch(&self, id: &str) -> StoreResult<Option<BranchRecord>>;

    fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<ShareTarget>>;
}

/// In-memory source, used by tests and the wasm bridge
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, DocumentRecord>,
    branches: HashMap<String, BranchRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_document(&mut self, record: DocumentRecord) {
        self.documents.insert(record.id.clone(), record);
    }

    pub fn insert_branch(&mut self, record: BranchRecord) {
        self.branches.insert(record.id.clone(), record);
    }

    pub fn remove_document(&mut self, id: &str) -> Option<DocumentRecord> {
        self.documents.remove(id)
    }

    /// Mutable access for simulating edits made elsewhere
    pub fn document_mut(&mut self, id: &str) -> Option<&mut DocumentRecord> {
        self.documents.get_mut(id)
    }
}

impl DocumentSource for MemoryStore {
    fn get_document(&self, id: &str) -> StoreResult<Option<DocumentRecord>> {
        Ok(self.documents.get(id).cloned())
    }

    fn get_branch(&self, id: &str) -> StoreResult<Option<BranchRecord>> {
        Ok(self.branches.get(id).cloned())
    }

    fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<ShareTarget>> {
        let document = self
            .documents
            .values()
            .find(|doc| doc.share_id.as_deref() == Some(share_id))
            .map(|doc| ShareTarget::Document(doc.id.clone()));
        if document.is_some() {
            return Ok(document);
        }

        Ok(self
            .branches
            .values()
            .find(|branch| branch.share_id.as_deref() == Some(share_id))
            .map(|branch| ShareTarget::Branch(branch.id.clone())))
    }
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn get_document(&self, id: &str) -> StoreResult<Option<DocumentRecord>> {
        (**self).get_document(id)
    }

    fn get_branch(&self, id: &str) -> StoreResult<Option<BranchRecord>> {
        (**self).get_branch(id)
    }

    fn find_by_share_id(&self, share_id: &str) -> StoreResult<Option<ShareTarget>> {
        (**self).find_by_share_id(share_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_lookup_prefers_documents() {
        let mut store = MemoryStore::new();
        let mut doc = DocumentRecord::new("doc-1");
        doc.share_id = Some("abc".to_string());
        store.insert_document(doc);

        let mut branch = BranchRecord::new("br-1", "doc-1");
        branch.share_id = Some("xyz".to_string());
        store.insert_branch(branch);

        assert_eq!(
            store.find_by_share_id("abc").expect("Failed to look up share"),
            Some(ShareTarget::Document("doc-1".to_string()))
        );
        assert_eq!(
            store.find_by_share_id("xyz").expect("Failed to look up share"),
            Some(ShareTarget::Branch("br-1".to_string()))
        );
        assert_eq!(store.find_by_share_id("nope").expect("Failed to look up share"), None);
    }

    #[test]
    fn test_share_target_serializes_tagged() {
        let json = serde_json::to_value(ShareTarget::Branch("br-1".to_string()))
            .expect("Failed to serialize target");
        assert_eq!(json, serde_json::json!({ "kind": "branch", "id": "br-1" }));
    }
}

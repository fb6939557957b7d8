use chrono::{DateTime, Utc};
use letter_schema::{Block, DocumentStatus, GlobalAnimation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document as it sits in storage
///
/// `style` and `data` stay raw until the adapter normalizes them; a record
/// written by an old editor may carry either shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub style: Value,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub animation: GlobalAnimation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_version() -> u32 {
    1
}

impl DocumentRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: letter_schema::CURRENT_VERSION,
            slug: None,
            share_id: None,
            status: DocumentStatus::Draft,
            title: String::new(),
            blocks: Vec::new(),
            style: Value::Null,
            data: Value::Null,
            animation: GlobalAnimation::default(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// A design variant of a parent document
///
/// There is deliberately no `data` field: wedding facts always come from
/// the parent. A stray `data` key in stored JSON is ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRecord {
    pub id: String,
    pub parent_document_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<GlobalAnimation>,
}

impl BranchRecord {
    pub fn new(id: impl Into<String>, parent_document_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_document_id: parent_document_id.into(),
            title: String::new(),
            share_id: None,
            status: DocumentStatus::Draft,
            blocks: None,
            style: None,
            animation: None,
        }
    }
}

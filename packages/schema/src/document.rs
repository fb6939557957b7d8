use crate::block::Block;
use crate::compose::Compose;
use crate::data::WeddingData;
use crate::errors::{SchemaError, SchemaResult};
use crate::style::{GlobalAnimation, StyleSystem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema revision written by the current editor
pub const CURRENT_VERSION: u32 = 2;

/// The in-memory document consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorDocument {
    pub id: String,
    pub version: u32,
    #[serde(default)]
    pub meta: DocumentMeta,
    /// Order is presentation order
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub style: StyleSystem,
    #[serde(default)]
    pub data: WeddingData,
    #[serde(default)]
    pub animation: GlobalAnimation,
    #[serde(default)]
    pub status: DocumentStatus,
}

impl EditorDocument {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: CURRENT_VERSION,
            meta: DocumentMeta::default(),
            blocks: Vec::new(),
            style: StyleSystem::default(),
            data: WeddingData::default(),
            animation: GlobalAnimation::default(),
            status: DocumentStatus::default(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_style(mut self, style: StyleSystem) -> Self {
        self.style = style;
        self
    }

    pub fn with_data(mut self, data: WeddingData) -> Self {
        self.data = data;
        self
    }

    /// Enabled blocks in presentation order
    pub fn enabled_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.enabled)
    }

    pub fn find_block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn find_block_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == block_id)
    }

    pub fn block_index(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// The style with the document-level animation layered on top
    pub fn effective_style(&self) -> StyleSystem {
        let over = StyleSystem {
            animation: Some(self.animation.clone()),
            ..Default::default()
        };
        self.style.compose(&over)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMeta {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Publication lifecycle
///
/// ```text
/// draft ──> building ──> published
///   ^          │   ^          │
///   │          v   │          │
///   └─────── error ┘          │
///   └─────────────────────────┘ (unpublish)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Draft,
    Building,
    Published,
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::Building => "building",
            DocumentStatus::Published => "published",
            DocumentStatus::Error => "error",
        }
    }

    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        use DocumentStatus::*;
        matches!(
            (self, next),
            (Draft, Building)
                | (Building, Published)
                | (Building, Error)
                | (Error, Draft)
                | (Error, Building)
                | (Published, Draft)
        )
    }

    pub fn transition(self, next: DocumentStatus) -> SchemaResult<DocumentStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(SchemaError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, DocumentStatus::Published)
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod fonts;
pub mod init;
pub mod inspect;
pub mod list;
pub mod render;

pub use fonts::{fonts, FontsArgs};
pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use list::{list, ListArgs};
pub use render::{render, RenderArgs};

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use letter_schema::EditorDocument;
use std::path::Path;

/// Load a document or branch by id, or a published page by share id
pub(crate) fn load_document(
    config: &Config,
    cwd: &Path,
    id: &str,
    by_share: bool,
) -> Result<EditorDocument> {
    let adapter = config.adapter(cwd);
    let document = if by_share {
        adapter.load_published(id)?
    } else {
        adapter.load(id)?
    };

    document.ok_or_else(|| {
        if by_share {
            anyhow!("No published invitation for share id '{}'", id)
        } else {
            anyhow!("Document not found: {}", id)
        }
    })
}

/// `--now` wins; otherwise the current instant in the configured offset
pub(crate) fn resolve_now(config: &Config, now: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now value '{}', expected RFC 3339", raw)),
        None => Ok(Utc::now().with_timezone(&config.utc_offset()?)),
    }
}

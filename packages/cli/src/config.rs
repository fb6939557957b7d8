use anyhow::{anyhow, Result};
use chrono::FixedOffset;
use letter_common::RealFileSystem;
use letter_renderer::{RenderMode, Viewport};
use letter_store::{DocumentAdapter, JsonDirStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "letter.config.json";

/// Korea Standard Time
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// Letter configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root of the JSON store, holding `documents/` and `branches/`
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Where rendered pages are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Offset used for "now" when `--now` is not given
    #[serde(default = "default_utc_offset")]
    pub utc_offset_minutes: i32,

    #[serde(default)]
    pub default_mode: RenderMode,

    #[serde(default)]
    pub viewport: Viewport,

    #[serde(default = "default_include_fonts")]
    pub include_fonts: bool,

    /// Informational only
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_store_dir() -> String {
    "documents".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_utc_offset() -> i32 {
    DEFAULT_UTC_OFFSET_MINUTES
}

fn default_include_fonts() -> bool {
    true
}

fn default_locale() -> String {
    "ko-KR".to_string()
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &Path) -> Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn store_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }

    pub fn out_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid utcOffsetMinutes: {}", self.utc_offset_minutes))
    }

    pub fn store(&self, cwd: &Path) -> JsonDirStore<RealFileSystem> {
        JsonDirStore::new(RealFileSystem, self.store_dir(cwd))
    }

    pub fn adapter(&self, cwd: &Path) -> DocumentAdapter<JsonDirStore<RealFileSystem>> {
        DocumentAdapter::new(self.store(cwd))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            out_dir: default_out_dir(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            default_mode: RenderMode::View,
            viewport: Viewport::default(),
            include_fonts: true,
            locale: default_locale(),
        }
    }
}

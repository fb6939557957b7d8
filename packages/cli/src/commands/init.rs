use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use letter_schema::{Block, BlockType};
use letter_store::DocumentRecord;
use serde_json::json;
use std::fs;
use std::path::Path;

pub const EXAMPLE_ID: &str = "example";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store directory for documents and branches
    #[arg(short, long, default_value = "documents")]
    pub store_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing invitation workspace...".bright_blue().bold());

    let config = Config {
        store_dir: args.store_dir.clone(),
        ..Default::default()
    };

    let store = config.store(cwd);
    if store.document_path(EXAMPLE_ID).map(|p| !p.exists()).unwrap_or(false) {
        store.put_document(&example_document())?;
        println!(
            "  {} Created {}/documents/{}.json",
            "✓".green(),
            args.store_dir,
            EXAMPLE_ID
        );
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/documents/{}.json", args.store_dir, EXAMPLE_ID);
    println!("  2. Run: letter render {}", EXAMPLE_ID);
    println!("  3. Open dist/{}.html", EXAMPLE_ID);

    Ok(())
}

fn example_document() -> DocumentRecord {
    let mut record = DocumentRecord::new(EXAMPLE_ID);
    record.title = "민준 ♥ 서연".to_string();
    record.blocks = vec![
        Block::new("hero", BlockType::Hero),
        Block::new("greeting", BlockType::GreetingParents),
        Block::new("calendar", BlockType::Calendar),
        Block::new("location", BlockType::Location),
        Block::new("account", BlockType::Account),
        Block::new("ending", BlockType::Ending),
    ];
    record.style = json!({ "preset": "classic-gold" });
    record.data = json!({
        "couple": {
            "groom": { "name": "김민준", "father": "김철수", "mother": "이영희" },
            "bride": { "name": "박서연", "father": "박정호", "mother": "최미경" }
        },
        "wedding": { "date": "2025-10-18", "time": "13:00" },
        "venue": { "name": "메종 웨딩홀", "hall": "3층 그랜드홀", "address": "서울특별시 강남구 테헤란로 123" }
    });
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_store::{DocumentAdapter, JsonDirStore};
    use letter_common::RealFileSystem;

    #[test]
    fn test_init_writes_config_and_example() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        init(
            InitArgs {
                store_dir: "documents".to_string(),
                force: false,
            },
            dir.path(),
        )
        .expect("Failed to init");

        assert!(dir.path().join(DEFAULT_CONFIG_NAME).exists());

        let adapter = DocumentAdapter::new(JsonDirStore::new(RealFileSystem, dir.path().join("documents")));
        let doc = adapter
            .load(EXAMPLE_ID)
            .expect("Failed to load example")
            .expect("Example should exist");
        assert_eq!(doc.blocks.len(), 6);
        assert_eq!(doc.data.couple.groom.name.as_deref(), Some("김민준"));
    }
}

use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use letter_store::DocumentSource;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show published documents and branches
    #[arg(long)]
    pub published: bool,
}

pub fn list(args: ListArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.store(cwd);
    let store_dir = config.store_dir(cwd);

    let mut shown = 0;

    for id in record_ids(&store_dir.join("documents")) {
        let Some(record) = store.get_document(&id)? else {
            continue;
        };
        if args.published && !record.status.is_public() {
            continue;
        }
        shown += 1;
        println!(
            "  {} {:<24} {:<10} {}",
            "doc".bright_blue(),
            record.id,
            record.status.as_str(),
            record.title
        );
    }

    for id in record_ids(&store_dir.join("branches")) {
        let Some(record) = store.get_branch(&id)? else {
            continue;
        };
        if args.published && !record.status.is_public() {
            continue;
        }
        shown += 1;
        println!(
            "  {} {:<24} {:<10} {} {}",
            "branch".magenta(),
            record.id,
            record.status.as_str(),
            record.title,
            format!("(of {})", record.parent_document_id).dimmed()
        );
    }

    if shown == 0 {
        println!("{}", "⚠️  No documents found".yellow());
    }

    Ok(())
}

/// File stems of `*.json` records in a directory, sorted
fn record_ids(dir: &Path) -> Vec<String> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    paths.sort();

    paths
        .iter()
        .filter_map(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().to_string())
        .collect()
}

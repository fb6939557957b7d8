use crate::commands::{load_document, resolve_now};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use letter_renderer::{render_document, RenderMode, RenderOptions};
use std::path::Path;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Document or branch id
    pub id: String,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&config, cwd, &args.id, false)?;

    let title = if document.meta.title.is_empty() {
        "(untitled)"
    } else {
        document.meta.title.as_str()
    };
    println!("{} {}", document.id.bright_white().bold(), title);
    println!("  status:  {}", document.status);
    println!("  preset:  {}", document.style.preset.as_deref().unwrap_or("-"));
    println!("  blocks:  {}", document.blocks.len());

    for (index, block) in document.blocks.iter().enumerate() {
        let marker = if block.enabled {
            "●".green()
        } else {
            "○".dimmed()
        };
        let known = if block.kind().is_ok() {
            block.block_type.normal()
        } else {
            block.block_type.red()
        };
        println!("   {:>2}. {} {:<12} {}", index + 1, marker, known, block.id.dimmed());
    }

    let options = RenderOptions::new(RenderMode::View, resolve_now(&config, None)?);
    let rendered = render_document(&document, &options)?;
    if rendered.warnings.is_empty() {
        println!("  {} No warnings", "✓".green());
    } else {
        println!("  warnings:");
        for warning in &rendered.warnings {
            println!("   {} {}", "⚠️".yellow(), warning.yellow());
        }
    }

    Ok(())
}

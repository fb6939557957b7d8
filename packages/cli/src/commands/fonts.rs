use crate::commands::load_document;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use letter_renderer::{font_resources, resolve_style, RenderMode};
use std::path::Path;

#[derive(Debug, Args)]
pub struct FontsArgs {
    /// Document or branch id
    pub id: String,

    /// Edit mode also lists every selectable typography preset
    #[arg(short, long)]
    pub mode: Option<RenderMode>,
}

pub fn fonts(args: FontsArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&config, cwd, &args.id, false)?;
    let mode = args.mode.unwrap_or(config.default_mode);

    let style = resolve_style(&document.effective_style());
    let resources = font_resources(&style, mode);

    if resources.is_empty() {
        println!("{}", "No web fonts required".dimmed());
        return Ok(());
    }

    for font in resources {
        println!("{} {}", font.family.bright_white(), font.url.dimmed());
    }

    Ok(())
}

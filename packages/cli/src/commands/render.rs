use crate::commands::{load_document, resolve_now};
use crate::config::Config;
use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use letter_compiler_html::{compile_to_html, CompileOptions};
use letter_renderer::{render_document, RenderMode, RenderOptions, Viewport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone HTML page
    Html,
    /// Rendered document tree as JSON
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document or branch id (or share id with --share)
    pub id: String,

    /// Render mode: view, preview or edit (defaults to config)
    #[arg(short, long)]
    pub mode: Option<RenderMode>,

    /// Output file (defaults to <outDir>/<id>.<format>)
    #[arg(short, long, conflicts_with = "stdout")]
    pub out: Option<PathBuf>,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Clock for countdowns, RFC 3339
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Treat the id as a share id and require a published target
    #[arg(long)]
    pub share: bool,

    #[arg(short, long, value_enum, default_value = "html")]
    pub format: OutputFormat,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let document = load_document(&config, cwd, &args.id, args.share)?;

    let mode = args.mode.unwrap_or(config.default_mode);
    let viewport = Viewport::new(
        args.width.or(config.viewport.width),
        args.height.or(config.viewport.height),
    );
    let options =
        RenderOptions::new(mode, resolve_now(&config, args.now.as_deref())?).with_viewport(viewport);

    let rendered = render_document(&document, &options)?;
    info!(id = %document.id, mode = %mode, blocks = rendered.block_count, "Rendered");

    let output = match args.format {
        OutputFormat::Html => {
            let title = (!document.meta.title.is_empty()).then(|| document.meta.title.clone());
            compile_to_html(
                &rendered,
                CompileOptions {
                    title,
                    include_fonts: config.include_fonts,
                    ..Default::default()
                },
            )?
        }
        OutputFormat::Json => serde_json::to_string_pretty(&rendered)?,
    };

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let out_path = args.out.unwrap_or_else(|| {
        config
            .out_dir(cwd)
            .join(format!("{}.{}", args.id, args.format.extension()))
    });
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, output)?;

    println!(
        "  {} {} ({}) → {}",
        "✓".green(),
        document.id,
        mode,
        out_path.display()
    );
    for warning in &rendered.warnings {
        println!("  {} {}", "⚠️".yellow(), warning.yellow());
    }

    Ok(())
}

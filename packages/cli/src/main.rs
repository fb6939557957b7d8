mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    fonts, init, inspect, list, render, FontsArgs, InitArgs, InspectArgs, ListArgs, RenderArgs,
};
use tracing_subscriber::EnvFilter;

/// Letter CLI - render wedding invitations from stored documents
#[derive(Parser, Debug)]
#[command(name = "letter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create letter.config.json and an example invitation
    Init(InitArgs),

    /// Render a document or branch to HTML
    Render(RenderArgs),

    /// Show a document's blocks and render warnings
    Inspect(InspectArgs),

    /// List the web fonts a document needs
    Fonts(FontsArgs),

    /// List stored documents and branches
    List(ListArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Render(args) => render(args, &cwd),
            Command::Inspect(args) => inspect(args, &cwd),
            Command::Fonts(args) => fonts(args, &cwd),
            Command::List(args) => list(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err.to_string().red());
        eprintln!();
        std::process::exit(1);
    }
}

//! TrustLens CLI - Inspect verification results against the text they cover.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use trustlens_cli::commands;
use trustlens_cli::{Cli, Command, Config, Formatter};

fn main() {
    // Initialize tracing (log to stderr, RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> trustlens_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, falling back to defaults when there is no file
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let output = match cli.command {
        Command::Render(args) => commands::execute_render(args, &config, &formatter)?,
        Command::Segments(args) => commands::execute_segments(args, &formatter)?,
        Command::Claims(args) => commands::execute_claims(args, &formatter)?,
        Command::Highlight(args) => commands::execute_highlight(args, &config, &formatter)?,
        Command::Config(args) => {
            commands::execute_config(args, &config_path, &config, &formatter)?
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

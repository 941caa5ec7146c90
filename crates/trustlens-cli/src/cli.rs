//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TrustLens CLI - Inspect verification results against the text they cover.
#[derive(Debug, Parser)]
#[command(name = "trustlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TRUSTLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the analyzed text with claims colored by verdict
    Render(RenderArgs),

    /// List the segments the analyzed text splits into
    Segments(InputArgs),

    /// List the claims of a result with the verdict summary
    Claims(ResultArgs),

    /// Highlight one claim inside a page tree and print the page markup
    Highlight(HighlightArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Verification result input.
#[derive(Debug, Parser)]
pub struct ResultArgs {
    /// Provider result JSON file (`-` for stdin)
    #[arg(short, long)]
    pub result: PathBuf,
}

/// Verification result plus the analyzed text its spans index into.
#[derive(Debug, Parser)]
pub struct InputArgs {
    /// Provider result JSON file (`-` for stdin)
    #[arg(short, long)]
    pub result: PathBuf,

    /// Analyzed text file
    #[arg(short, long)]
    pub text: PathBuf,
}

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Claim to select; repeat to replay a sequence of clicks
    #[arg(short, long = "select")]
    pub select: Vec<String>,

    /// Emit HTML markup instead of terminal output
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the highlight command.
#[derive(Debug, Parser)]
pub struct HighlightArgs {
    /// Provider result JSON file (`-` for stdin)
    #[arg(short, long)]
    pub result: PathBuf,

    /// Page tree JSON file
    #[arg(short, long)]
    pub page: PathBuf,

    /// Claim to highlight
    #[arg(long)]
    pub claim: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

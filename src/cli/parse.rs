//! CLI parse: clap types for Wingman. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wingman CLI - screenshot and audio assistant backed by a multimodal model
#[derive(Parser)]
#[command(name = "wingman")]
#[command(about = "Capture screenshots and audio, and ask a multimodal model about them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/ lookup)
    #[arg(long, default_value = ".", global = true)]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive session: capture, extract, solve, debug, follow up
    Session,
    /// Describe an image file
    DescribeImage {
        path: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Describe an audio file
    DescribeAudio {
        path: PathBuf,
        /// MIME type; inferred from the extension when omitted
        #[arg(long)]
        mime_type: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Extract a problem from images, then solve it
    Solve {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Ask a one-off follow-up question
    Ask {
        question: String,
        /// Original problem statement
        #[arg(long)]
        problem: Option<String>,
        /// Previous answer being followed up on
        #[arg(long)]
        previous: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the effective configuration
    Validate,
}

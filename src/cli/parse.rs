//! CLI parse: clap types for wordcast. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wordcast - scheduled vocabulary drops to a chat webhook
#[derive(Parser, Debug)]
#[command(name = "wordcast")]
#[command(about = "Generate a short vocabulary list, skip words already sent, and post it to a webhook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging, mirrored to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The subcommand to execute; a bare invocation is a normal run.
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Run { dry_run: false })
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate vocabulary, post it to the webhook, and record it in history
    Run {
        /// Generate and print, but do not deliver or update history
        #[arg(long)]
        dry_run: bool,
    },
    /// List generation-capable models and show which one would be used
    Models {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show words recorded in history (newest last)
    History {
        /// Show only the most recent N words
        #[arg(long)]
        limit: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

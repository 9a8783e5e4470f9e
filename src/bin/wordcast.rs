//! wordcast CLI Binary
//!
//! Command-line entry point for scheduled vocabulary drops.

use clap::Parser;
use std::path::Path;
use std::process;
use tracing::{error, info};
use wordcast::cli::{Cli, RunContext};
use wordcast::config::{ConfigLoader, WordcastConfig};
use wordcast::error::ApiError;
use wordcast::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();

    // Secrets may live in a .env file in the working directory; existing
    // environment variables win.
    if let Some(warning) = load_dotenv(Path::new(".env")) {
        eprintln!("{}", warning);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", wordcast::cli::map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("wordcast starting");

    let command = cli.command_or_default();
    let context = RunContext::new(config);
    match context.execute(&command) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", wordcast::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Load `path` into the environment. A missing file is not an error; any
/// other failure comes back as a message for stderr.
fn load_dotenv(path: &Path) -> Option<String> {
    match dotenvy::from_path(path) {
        Ok(()) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("Failed to load {}: {}", path.display(), e)),
    }
}

fn load_config(cli: &Cli) -> Result<WordcastConfig, ApiError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(Path::new(".")),
    }
}

/// Build logging configuration from CLI args and the config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        // Keep file logs but make verbose mode visible in the terminal.
        // An explicit --log-output value still takes precedence below.
        if config.output == "file" {
            config.output = "both".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    let output_uses_file = config.output == "file" || config.output == "both";
    if config.enabled && output_uses_file {
        if let Ok(path) =
            wordcast::logging::resolve_log_file_path(cli.log_file.clone(), config.file.clone())
        {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}

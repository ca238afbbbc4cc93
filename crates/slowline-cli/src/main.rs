use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use slowline_cli::config::Config;
use slowline_cli::run;

#[derive(Parser)]
#[command(name = "slowline")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Build a slowest-endpoints report from the newest nginx access log",
    long_about = "Slowline scans a directory for the most recent nginx access log, \
                  aggregates per-endpoint request times, and renders the endpoints \
                  with the greatest total time into an HTML report."
)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, value_name = "FILE", default_value = "./config.json")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)?;

    init_logging(cli.verbose, config.log_file.as_deref())?;

    if !cli.config.is_file() {
        tracing::warn!(
            "Config file {} not found, using defaults",
            cli.config.display()
        );
    }

    if let Err(err) = run::execute(&config) {
        tracing::error!("Run failed: {err:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("slowline=debug,slowline_core=debug,slowline_cli=debug")
    } else {
        EnvFilter::new("slowline=info,slowline_core=info,slowline_cli=info")
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Arc::new(file)).init();
        }
        None => builder.init(),
    }

    Ok(())
}

//! comment-search - search comments from the terminal
//!
//! Command-line usage:
//!   comment-search                 - Start with the unfiltered comment list
//!   comment-search [query]         - Start with `query` already searched
//!   comment-search --url URL       - Search a different endpoint
//!
//! Logs go to `--log-file` when given; otherwise only warnings are written
//! to stderr so they do not garble the terminal UI. `RUST_LOG` overrides
//! the level in both cases.

use anyhow::{Context, Result};
use clap::Parser;
use comment_search::{run_tui, Cli, SearchConfig};
use std::fs::File;
use std::path::Path;

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }

    builder.parse_default_env().init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = SearchConfig::load(&cli).context("Failed to load configuration")?;
    log::info!(
        "Starting comment search (debounce {}ms)",
        config.debounce.as_millis()
    );

    run_tui(config, cli.query.clone()).await
}

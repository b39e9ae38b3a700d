//! Runtime configuration
//!
//! Settings are layered: built-in defaults, then an optional JSON config
//! file, then environment variables, then command-line flags.

use crate::types::DEFAULT_DEBOUNCE_MS;
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/comments";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const ENV_BASE_URL: &str = "COMMENT_SEARCH_URL";
pub const ENV_DEBOUNCE_MS: &str = "COMMENT_SEARCH_DEBOUNCE_MS";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid value for {name}: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// comment-search - search comments from the terminal
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Initial query, submitted as soon as the widget starts
    pub query: Option<String>,

    /// Base URL of the comment search endpoint
    #[arg(long)]
    pub url: Option<String>,

    /// Quiet period in milliseconds before a typed query is searched
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// JSON config file with `base_url`, `debounce_ms` and `timeout_ms`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Optional overrides read from the JSON config file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    debounce_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

/// Resolved search configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub base_url: Url,
    pub debounce: Duration,
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl SearchConfig {
    /// Resolve the configuration for `cli`, reading the config file and the
    /// process environment.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = &cli.config {
            config.apply_file(path)?;
        }
        config.apply_env(|name| std::env::var(name).ok())?;
        config.apply_cli(cli)?;

        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(url) = file.base_url {
            self.base_url = parse_url(&url)?;
        }
        if let Some(ms) = file.debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = file.timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = var(ENV_BASE_URL) {
            self.base_url = parse_url(&url)?;
        }
        if let Some(value) = var(ENV_DEBOUNCE_MS) {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: ENV_DEBOUNCE_MS,
                    value,
                })?;
            self.debounce = Duration::from_millis(ms);
        }
        Ok(())
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(url) = &cli.url {
            self.base_url = parse_url(url)?;
        }
        if let Some(ms) = cli.debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = cli.timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        Ok(())
    }
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.debounce, Duration::from_millis(1000));
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://127.0.0.1:9000/comments"),
            (ENV_DEBOUNCE_MS, " 250 "),
        ]
        .into_iter()
        .collect();

        let mut config = SearchConfig::default();
        config
            .apply_env(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/comments");
        assert_eq!(config.debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_env_rejects_bad_debounce() {
        let mut config = SearchConfig::default();
        let err = config
            .apply_env(|name| (name == ENV_DEBOUNCE_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn test_cli_overrides_win() {
        let cli = Cli {
            url: Some("http://localhost/c".to_string()),
            debounce_ms: Some(0),
            timeout_ms: Some(500),
            ..Cli::default()
        };
        let mut config = SearchConfig::default();
        config.apply_cli(&cli).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost/c");
        assert_eq!(config.debounce, Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_cli_url() {
        let cli = Cli {
            url: Some("not a url".to_string()),
            ..Cli::default()
        };
        let err = SearchConfig::default().apply_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "comment-search",
            "--url",
            "http://localhost/c",
            "--debounce-ms",
            "300",
            "laudantium",
        ]);
        assert_eq!(cli.query.as_deref(), Some("laudantium"));
        assert_eq!(cli.url.as_deref(), Some("http://localhost/c"));
        assert_eq!(cli.debounce_ms, Some(300));
    }
}

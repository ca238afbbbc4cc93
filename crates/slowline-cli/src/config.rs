use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration, merged from built-in defaults and an optional
/// JSON file.
///
/// The file uses the upper-case key names; keys left out keep their
/// defaults, and an explicit `"ERRORS_LIMIT": null` disables the
/// parse-failure gate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of endpoints kept in the report table.
    #[serde(rename = "REPORT_SIZE")]
    pub report_size: usize,

    /// Directory holding the HTML template and the written reports.
    #[serde(rename = "REPORT_DIR")]
    pub report_dir: PathBuf,

    /// Directory scanned for access logs.
    #[serde(rename = "LOG_DIR")]
    pub log_dir: PathBuf,

    /// Optional file the tool's own log output is appended to.
    #[serde(rename = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Parse-failure gate passed through to the aggregator.
    #[serde(rename = "ERRORS_LIMIT")]
    pub errors_limit: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: 10,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./logs"),
            log_file: None,
            errors_limit: Some(0.64),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to the defaults
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        Ok(config)
    }
}

// File: src/config.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Run configuration: compiled-in defaults, optionally overridden
/// field-by-field from a JSON file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Top-N cutoff for the report. `0` disables truncation.
    pub report_size: usize,
    pub report_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Allowed share of unparseable lines, 0..1. `None` means no gate.
    pub error_limit: Option<f64>,
    /// Diagnostic log destination. `None` logs to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            report_size: 10,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            error_limit: None,
            log_file: None,
        }
    }
}

/// The override file's shape: every key optional, uppercase names on disk.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    #[serde(rename = "REPORT_SIZE")]
    report_size: Option<usize>,
    #[serde(rename = "REPORT_DIR")]
    report_dir: Option<PathBuf>,
    #[serde(rename = "LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[serde(rename = "ERROR_LIMIT")]
    error_limit: Option<f64>,
    #[serde(rename = "LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Config {
    /// Loads the defaults, then applies an optional JSON override file.
    ///
    /// A missing or malformed override file is a startup error, not
    /// something to silently fall back from.
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
        let mut config = Config::default();
        if let Some(path) = override_path {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let overrides: ConfigOverride = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            config.apply(overrides);
        }
        Ok(config)
    }

    fn apply(&mut self, overrides: ConfigOverride) {
        if let Some(report_size) = overrides.report_size {
            self.report_size = report_size;
        }
        if let Some(report_dir) = overrides.report_dir {
            self.report_dir = report_dir;
        }
        if let Some(log_dir) = overrides.log_dir {
            self.log_dir = log_dir;
        }
        if let Some(error_limit) = overrides.error_limit {
            self.error_limit = Some(error_limit);
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = Some(log_file);
        }
    }
}

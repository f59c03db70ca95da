//! Application configuration.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use mm_engine::EngineConfig;
use mm_quote::QuoterConfig;

use crate::error::{AppError, AppResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Instrument symbol (used for run-directory naming and logs).
    #[serde(default = "default_instrument")]
    pub instrument: String,

    /// Directory holding the recorded `orderbook.csv` / `market.csv` to
    /// replay.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Output directory for this run's logs. When unset, a timestamped
    /// directory named after the instrument is created.
    #[serde(default)]
    pub out_dir: Option<String>,

    /// Quoting model parameters.
    #[serde(default)]
    pub quoter: QuoterConfig,

    /// Engine parameters.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instrument: default_instrument(),
            data_dir: default_data_dir(),
            out_dir: None,
            quoter: QuoterConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Output directory for this run, timestamped when not configured.
    pub fn resolve_out_dir(&self) -> PathBuf {
        match &self.out_dir {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(format!(
                "{}-{}",
                self.instrument,
                Utc::now().format("%m%d%Y%H%M%S")
            )),
        }
    }
}

fn default_instrument() -> String {
    "SOLUSDT".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

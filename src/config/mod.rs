//! Configuration for the dataset splitter and its collaborators.
//!
//! The splitter takes an explicit [`SplitConfig`] value. The MongoDB
//! descriptor consumed by the surrounding feature-extraction pipeline is
//! kept as the separate [`DbConfig`] so storage settings can be injected
//! independently of the split behaviour.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Postfix replacing `.csv` for the visible (train/validation) portion
pub const VISIBLE_POSTFIX: &str = "_visible.csv";

/// Postfix replacing `.csv` for the hold-out (test) portion
pub const HIDDEN_POSTFIX: &str = "_hold_out.csv";

/// Options for the one-time stratified split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Directory containing the source table
    pub data_path: PathBuf,
    /// Source filename inside `data_path`
    pub source_file: String,
    /// Fraction of rows routed to the hold-out portion
    pub test_size: f64,
    /// Randomize row assignment before partitioning
    pub shuffle: bool,
    /// Report per-class row counts when splitting and loading
    pub verbose: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data"),
            source_file: "dataset.csv".to_string(),
            test_size: 0.2,
            shuffle: true,
            verbose: false,
        }
    }
}

impl SplitConfig {
    /// Create a configuration for a data directory with default options
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Path to the source table
    pub fn source_path(&self) -> PathBuf {
        self.data_path.join(&self.source_file)
    }

    /// Path to the visible (train/validation) portion
    pub fn visible_path(&self) -> PathBuf {
        self.derived_path(VISIBLE_POSTFIX)
    }

    /// Path to the hold-out (test) portion
    pub fn hidden_path(&self) -> PathBuf {
        self.derived_path(HIDDEN_POSTFIX)
    }

    fn derived_path(&self, postfix: &str) -> PathBuf {
        let name = match self.source_file.strip_suffix(".csv") {
            Some(stem) => format!("{}{}", stem, postfix),
            None => format!("{}{}", self.source_file, postfix),
        };
        self.data_path.join(name)
    }

    /// Load configuration from a TOML file
    pub fn from_toml(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SplitConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_toml(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// MongoDB connection descriptor for the feature-extraction pipeline
///
/// Not read by the splitter itself; carried here so deployments configure
/// storage and split behaviour from one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    /// Database server address
    pub ip: String,
    /// Database server port
    pub port: u16,
    /// Database name
    pub db: String,
    /// Collection holding the extracted user records
    pub collection: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 27017,
            db: "features".to_string(),
            collection: "users".to_string(),
        }
    }
}

//! Viewer configuration, read from a JSON file.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::LoadOptions;

/// File name looked up in the working directory at start-up.
pub const CONFIG_FILE_NAME: &str = "rusty-norm.json";

/// Top-level configuration. Every section and field has a default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How input files are read.
    pub loader: LoaderConfig,
    /// Columns selected when the viewer starts.
    pub columns: ColumnConfig,
    /// Axis labels, also used as export column names.
    pub labels: LabelConfig,
}

/// Delimited-text reading configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Single-byte field delimiter.
    pub delimiter: char,
    /// Leading rows scanned for the start of numeric data.
    pub max_scan_rows: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            max_scan_rows: 100,
        }
    }
}

/// Default column selection, 1-based as shown in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub x: usize,
    pub y: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self { x: 1, y: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub x: String,
    pub y: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            x: "Wavenumber".to_string(),
            y: "Intensity".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text).context("parsing configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` if it exists, otherwise use defaults. A broken file is
    /// logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.loader.delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", self.loader.delimiter);
        }
        if self.loader.max_scan_rows == 0 {
            bail!("max_scan_rows must be at least 1");
        }
        if self.columns.x == 0 || self.columns.y == 0 {
            bail!("column numbers are 1-based");
        }
        Ok(())
    }

    /// Loader options derived from the `loader` section.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: u8::try_from(self.loader.delimiter).unwrap_or(b','),
            max_scan_rows: self.loader.max_scan_rows,
        }
    }
}

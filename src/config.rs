//! Configuration for calibration map reporting
//!
//! Runtime configuration loaded from JSON, so the summary layout can be
//! adjusted without recompilation. Only presentation is configurable;
//! calibration data itself is never read from or written to these files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Config file read by [`AppConfig::load`]
pub const DEFAULT_CONFIG_PATH: &str = "assets/calibration_config.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Summary table layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Significant digits per value (general notation)
    pub precision: usize,
    /// Column separator
    pub separator: String,
    /// Emit the `Nominal / Calibrated / Error / Corrected` header line
    pub include_header: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            // Matches default iostream float output
            precision: 6,
            separator: "\t".to_string(),
            include_header: true,
        }
    }
}

impl AppConfig {
    /// Read and parse a JSON config file
    ///
    /// # Errors
    /// Fails if the file cannot be read or is not a valid configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        log::info!("[Config] Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load a JSON config file, falling back to defaults
    ///
    /// Read and parse failures are logged as warnings.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_else(|err| {
            log::warn!("[Config] {:#}. Using defaults.", err);
            Self::default()
        })
    }

    /// Load the bundled config relative to the working directory
    ///
    /// A missing file is the normal case outside the source tree and falls
    /// back to defaults quietly; a present but broken file still warns.
    pub fn load() -> Self {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if !path.is_file() {
            log::debug!(
                "[Config] No config at {}, using defaults",
                path.display()
            );
            return Self::default();
        }
        Self::load_from_file(path)
    }
}

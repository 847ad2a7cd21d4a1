//! # Settings
//!
//! User defaults stored as pretty JSON. Settings only fill in values the
//! user left out; they never change formulas, tables or constants.
//!
//! ## Location
//!
//! The first of:
//!
//! 1. an explicit path (the CLI's `--config`)
//! 2. the `METPREP_CONFIG` environment variable
//! 3. `metprep.json` in the working directory
//!
//! A missing file means defaults.
//!
//! ```json
//! {
//!   "default_magnification": 100.0,
//!   "output": "text",
//!   "log_filter": "warn"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::grain_size::DEFAULT_MAGNIFICATION;
use crate::errors::{CalcError, CalcResult};
use crate::file_io::{load_json, save_json};

pub const DEFAULT_SETTINGS_FILE: &str = "metprep.json";

pub const CONFIG_ENV_VAR: &str = "METPREP_CONFIG";

/// Output format for front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Magnification used when a grain size input omits one
    pub default_magnification: f64,

    pub output: OutputFormat,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_magnification: DEFAULT_MAGNIFICATION,
            output: OutputFormat::Text,
            log_filter: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.default_magnification.is_finite() && self.default_magnification > 0.0) {
            return Err(CalcError::invalid_input(
                "default_magnification",
                self.default_magnification.to_string(),
                "Magnification must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Resolve the settings path from an explicit path, then the
    /// environment, then the default file name
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> CalcResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let settings: Settings = load_json(path)?;
        settings.validate()?;
        debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    /// Atomic save
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        self.validate()?;
        save_json(self, path)
    }
}

//! Run configuration
//!
//! Values are resolved in order, later wins:
//!
//! 1. Compiled defaults (`fingerprint_data.bin`, `WbioSrvc`)
//! 2. An optional YAML file passed with `--config`
//! 3. Environment variables and command-line flags, applied by the binary
//!    through [`CaptureConfig::with_overrides`]
//!
//! # Example Config
//!
//! ```yaml
//! output_path: C:\captures\fingerprint_data.bin
//! service_name: WbioSrvc
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::capture::DEFAULT_OUTPUT_FILE;
use crate::error::{CaptureError, Result};
use crate::service::BIOMETRIC_SERVICE_NAME;

/// Settings for one capture run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Where the raw sample is written; relative paths resolve against the
    /// working directory
    pub output_path: PathBuf,

    /// Service that must be running before capture
    pub service_name: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            service_name: BIOMETRIC_SERVICE_NAME.to_string(),
        }
    }
}

impl CaptureConfig {
    /// Load defaults, then the YAML file at `path` if one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a YAML configuration file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CaptureError::config(path, format!("failed to read file: {e}")))?;
        let config =
            Self::from_yaml(&content).map_err(|message| CaptureError::config(path, message))?;

        debug!(path = %path.display(), ?config, "Loaded configuration file");
        Ok(config)
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply overrides from the environment or command line.
    pub fn with_overrides(
        mut self,
        output_path: Option<PathBuf>,
        service_name: Option<String>,
    ) -> Self {
        if let Some(output_path) = output_path {
            self.output_path = output_path;
        }
        if let Some(service_name) = service_name {
            self.service_name = service_name;
        }
        self
    }
}

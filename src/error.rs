//! Error types for the capture pipeline.
//!
//! Every failure the tool can hit maps onto one [`CaptureError`] variant. Errors
//! are logged where they are detected and then returned upward as a request to
//! abort the rest of the pipeline; nothing is retried.
//!
//! ## Error Categories
//!
//! - **Elevation**: the process is not a member of the administrators group
//! - **Service**: the biometric service cannot be reached or is not running
//! - **Session**: a biometric session could not be opened
//! - **Capture**: the sample request failed (access-denied is singled out)
//! - **Persistence**: the sample could not be written to disk
//!
//! ## Operator Output
//!
//! [`CaptureError::diagnostics`] renders the lines the binary prints on
//! standard error: the failure itself, followed by a targeted remediation line
//! where one exists.
//!
//! ```rust
//! use winbio_capture::{CaptureError, PlatformStatus};
//!
//! let error = CaptureError::Capture { status: PlatformStatus::ACCESS_DENIED };
//! let lines = error.diagnostics();
//! assert_eq!(lines.len(), 2);
//! assert!(lines[1].contains("administrative privileges"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{PlatformStatus, ServiceState};

/// Result type alias for capture operations.
pub type Result<T, E = CaptureError> = std::result::Result<T, E>;

/// Why the biometric service precondition failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFailure {
    #[error("OpenSCManager failed. Error: {status}")]
    ManagerConnect { status: PlatformStatus },

    #[error("OpenService failed. Error: {status}")]
    ServiceOpen { status: PlatformStatus },

    #[error("QueryServiceStatusEx failed. Error: {status}")]
    StatusQuery { status: PlatformStatus },

    #[error("service is {state}, not running")]
    NotRunning { state: ServiceState },
}

/// Main error type for the capture tool.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CaptureError {
    #[error(
        "This application requires administrative privileges. Please run as administrator."
    )]
    Elevation,

    #[error("Biometric service '{service}' is unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: ServiceFailure },

    #[error("Failed to open biometric session. Error: {status}")]
    Session { status: PlatformStatus },

    #[error("WinBioCaptureSample failed. Error: {status}")]
    Capture { status: PlatformStatus },

    #[error("Failed to save fingerprint data to '{}'", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("{feature} is only available on {required_platform}")]
    UnsupportedPlatform { feature: String, required_platform: String },
}

/// Exit status for every failed run, including command-line errors.
pub const FAILURE_EXIT_STATUS: u8 = 1;

impl CaptureError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_STATUS
    }

    /// Targeted operator instruction for failures that have one.
    pub fn remediation(&self) -> Option<String> {
        match self {
            CaptureError::Capture { status } if status.is_access_denied() => Some(
                "Access denied. Please run the application with administrative privileges."
                    .to_string(),
            ),
            CaptureError::ServiceUnavailable {
                service,
                reason: ServiceFailure::NotRunning { .. },
            } => Some(format!(
                "Service '{service}' is not running. Please start the service and try again."
            )),
            _ => None,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let suggestions: &[&str] = match self {
            CaptureError::Elevation => &[
                "Right-click the executable and choose 'Run as administrator'",
                "Launch from an elevated command prompt",
            ],
            CaptureError::ServiceUnavailable { service, reason } => {
                return match reason {
                    ServiceFailure::ManagerConnect { .. } => {
                        vec!["Check that the service control manager is reachable".to_string()]
                    }
                    ServiceFailure::ServiceOpen { .. } => vec![
                        format!("Verify that a service named '{service}' is installed"),
                        "Check that the Windows Biometric Framework is installed".to_string(),
                    ],
                    ServiceFailure::StatusQuery { .. } => {
                        vec!["Check permissions for querying service status".to_string()]
                    }
                    ServiceFailure::NotRunning { .. } => vec![
                        format!("Start the service with 'sc start {service}'"),
                        "Set the service to start automatically".to_string(),
                    ],
                };
            }
            CaptureError::Session { .. } => &[
                "Check that a fingerprint reader is connected",
                "Verify the reader driver is installed",
            ],
            CaptureError::Capture { status } if status.is_access_denied() => {
                &["Run the application with administrative privileges"]
            }
            CaptureError::Capture { .. } => &[
                "Place the finger flat on the sensor and run again",
                "Clean the sensor surface",
            ],
            CaptureError::Persistence { .. } => &[
                "Check write permissions on the output directory",
                "Ensure sufficient disk space",
            ],
            CaptureError::Config { .. } => &[
                "Check the configuration file is valid YAML",
                "Remove unknown keys from the configuration file",
            ],
            CaptureError::UnsupportedPlatform { .. } => {
                &["Run on Windows with the Windows Biometric Framework available"]
            }
        };
        suggestions.iter().map(|s| s.to_string()).collect()
    }

    /// Lines printed on standard error when this error aborts a run.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = vec![self.to_string()];
        if let Some(source) = std::error::Error::source(self) {
            lines[0] = format!("{}: {}", lines[0], source);
        }
        if let Some(hint) = self.remediation() {
            lines.push(hint);
        }
        lines
    }

    /// Helper constructor for service failures.
    pub fn service_unavailable(service: impl Into<String>, reason: ServiceFailure) -> Self {
        CaptureError::ServiceUnavailable { service: service.into(), reason }
    }

    /// Helper constructor for file write failures with path context.
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaptureError::Persistence { path: path.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        CaptureError::Config { path: path.into(), message: message.into() }
    }

    /// Helper constructor for unsupported platform errors.
    pub fn unsupported_platform(
        feature: impl Into<String>,
        required_platform: impl Into<String>,
    ) -> Self {
        CaptureError::UnsupportedPlatform {
            feature: feature.into(),
            required_platform: required_platform.into(),
        }
    }
}

//! Capture a raw fingerprint sample through the Windows Biometric Framework.
//!
//! The tool runs a single linear pipeline and stops at the first failure:
//!
//! 1. **Privilege check**: the process must belong to the administrators group
//! 2. **Service check**: the Windows Biometric Service (`WbioSrvc`) must be running
//! 3. **Capture and persist**: one raw sample is captured and written verbatim
//!    to `fingerprint_data.bin`
//!
//! # Platform Seams
//!
//! The pipeline is generic over the capability traits in [`provider`], so it
//! runs against the native Windows host in production and against fakes in
//! tests on any platform.
//!
//! ```rust,no_run
//! # #[cfg(windows)]
//! # fn main() -> winbio_capture::Result<()> {
//! use winbio_capture::{CaptureConfig, pipeline};
//! use winbio_capture::windows::NativeHost;
//!
//! let report = pipeline::run(&NativeHost, &CaptureConfig::default())?;
//! println!("Saved {} bytes to {}", report.bytes_written, report.output_path.display());
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

pub mod capture;
pub mod config;
mod error;
pub mod pipeline;
pub mod provider;
pub mod service;
pub mod types;

// Platform-specific modules
#[cfg(windows)]
pub mod windows;

pub use capture::{
    DEFAULT_OUTPUT_FILE, capture_fingerprint, capture_fingerprint_reporting, save_sample,
};
pub use config::CaptureConfig;
pub use error::*;
pub use provider::{BiometricUnit, CaptureFailure, CapturedSample, Elevation, ServiceControl};
pub use service::{BIOMETRIC_SERVICE_NAME, check_service_running};
pub use types::*;

#[cfg(windows)]
pub use crate::windows::NativeHost;

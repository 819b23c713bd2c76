//! Privilege check, service check, then capture

use tracing::{error, info};

use crate::capture::capture_fingerprint_reporting;
use crate::config::CaptureConfig;
use crate::error::{CaptureError, Result};
use crate::provider::{BiometricUnit, Elevation, ServiceControl};
use crate::service::check_service_running;
use crate::types::{CaptureReport, Milestone};

/// Run the full capture pipeline against `host`.
///
/// Stages run strictly in order and the first failure aborts the rest:
///
/// 1. [`Elevation::is_elevated`] must return `true`
/// 2. `config.service_name` must be running
/// 3. One sample is captured and written to `config.output_path`
pub fn run<H>(host: &H, config: &CaptureConfig) -> Result<CaptureReport>
where
    H: Elevation + ServiceControl + BiometricUnit + ?Sized,
{
    run_reporting(host, config, |_| {})
}

/// Same as [`run`], passing each capture [`Milestone`] to `progress`.
pub fn run_reporting<H, F>(host: &H, config: &CaptureConfig, progress: F) -> Result<CaptureReport>
where
    H: Elevation + ServiceControl + BiometricUnit + ?Sized,
    F: FnMut(Milestone),
{
    if !host.is_elevated() {
        error!("Process is not running with administrative privileges");
        return Err(CaptureError::Elevation);
    }
    info!("Running with administrative privileges");

    check_service_running(host, &config.service_name)?;
    info!(service = %config.service_name, "Biometric service is running");

    capture_fingerprint_reporting(host, &config.output_path, progress)
}

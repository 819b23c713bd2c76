//! Native Windows host
//!
//! Implements the capability traits on top of the platform APIs the original
//! C SDK samples use directly:
//!
//! - **Security**: `AllocateAndInitializeSid` / `CheckTokenMembership` for the
//!   builtin administrators group
//! - **Services**: `OpenSCManagerW` / `OpenServiceW` / `QueryServiceStatusEx`
//! - **WinBio**: `WinBioOpenSession` / `WinBioCaptureSample` / `WinBioFree` /
//!   `WinBioCloseSession`
//!
//! Every handle acquired here is owned by a small guard whose `Drop` releases
//! it, so early returns cannot leak.
//!
//! # Usage
//!
//! ```rust,ignore
//! use winbio_capture::{CaptureConfig, pipeline};
//! use winbio_capture::windows::NativeHost;
//!
//! let report = pipeline::run(&NativeHost, &CaptureConfig::default())?;
//! println!("{} bytes written", report.bytes_written);
//! ```

mod biometric;
mod elevation;
mod services;

pub use biometric::{WinBioSample, WinBioSession};

use crate::error::ServiceFailure;
use crate::provider::{BiometricUnit, CaptureFailure, CapturedSample, Elevation, ServiceControl};
use crate::types::{PlatformStatus, ServiceState};

/// Host backed by the real Windows security, service and biometric APIs
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl Elevation for NativeHost {
    fn is_elevated(&self) -> bool {
        elevation::is_admin()
    }
}

impl ServiceControl for NativeHost {
    fn query_service_state(&self, service_name: &str) -> Result<ServiceState, ServiceFailure> {
        services::query_state(service_name)
    }
}

impl BiometricUnit for NativeHost {
    type Session = WinBioSession;
    type Sample = WinBioSample;

    fn open_session(&self) -> Result<WinBioSession, PlatformStatus> {
        WinBioSession::open()
    }

    fn capture_sample(
        &self,
        session: &WinBioSession,
    ) -> Result<CapturedSample<WinBioSample>, CaptureFailure> {
        session.capture_raw()
    }

    fn release_sample(&self, sample: &mut WinBioSample) {
        sample.free();
    }

    fn close_session(&self, session: &mut WinBioSession) {
        session.close();
    }
}

/// Convert string to null-terminated wide string for Windows APIs
fn wide_string(s: &str) -> Vec<u16> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    OsStr::new(s).encode_wide().chain(std::iter::once(0)).collect()
}

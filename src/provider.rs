//! Capability traits for the platform services the pipeline consumes
//!
//! The pipeline never talks to the operating system directly. It is generic
//! over three small traits, one per external collaborator:
//!
//! - [`Elevation`]: token membership in the administrators group
//! - [`ServiceControl`]: service control manager status queries
//! - [`BiometricUnit`]: biometric session lifecycle and sample capture
//!
//! The native Windows host implements all three; tests substitute fakes.

use crate::error::ServiceFailure;
use crate::types::{PlatformStatus, ServiceState};

/// Privilege check against the local administrators group
pub trait Elevation {
    /// Returns `true` when the calling process is a member of the
    /// administrators group.
    ///
    /// Implementations return `false` when membership cannot be determined.
    fn is_elevated(&self) -> bool;
}

/// Read-only access to the service control manager
pub trait ServiceControl {
    /// Resolve `service_name` and report its current state.
    ///
    /// Returns:
    /// - `Ok(state)` - Service resolved and queried, in any state
    /// - `Err(ServiceFailure::ManagerConnect)` - Control manager unreachable
    /// - `Err(ServiceFailure::ServiceOpen)` - Service missing or not openable
    /// - `Err(ServiceFailure::StatusQuery)` - Status query refused
    ///
    /// Implementations must release every handle they open before returning.
    fn query_service_state(&self, service_name: &str) -> Result<ServiceState, ServiceFailure>;
}

/// A sample returned by [`BiometricUnit::capture_sample`]
#[derive(Debug)]
pub struct CapturedSample<S> {
    /// Platform-owned sample buffer, released through
    /// [`BiometricUnit::release_sample`]
    pub data: S,
    pub unit_id: u32,
    pub reject_detail: u32,
}

/// A refused capture request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFailure {
    pub status: PlatformStatus,
    pub reject_detail: u32,
}

/// Biometric session lifecycle for the fingerprint modality
///
/// Every opened session must be passed to
/// [`close_session`](Self::close_session) exactly once, and every captured
/// sample to [`release_sample`](Self::release_sample) exactly once, before the
/// value is dropped. Callers normally do not invoke those directly; the
/// capture stage holds both in guards that do it on drop.
pub trait BiometricUnit {
    /// Open session handle
    type Session;

    /// Raw sample buffer owned by the platform until released
    type Sample: AsRef<[u8]>;

    /// Open a session on the system pool with raw data access.
    fn open_session(&self) -> Result<Self::Session, PlatformStatus>;

    /// Capture one raw sample for enrollment.
    fn capture_sample(
        &self,
        session: &Self::Session,
    ) -> Result<CapturedSample<Self::Sample>, CaptureFailure>;

    /// Free a sample buffer. The sample is not read afterwards.
    fn release_sample(&self, sample: &mut Self::Sample);

    /// Close a session. The session is not used afterwards.
    fn close_session(&self, session: &mut Self::Session);
}

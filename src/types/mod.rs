//! Core value types shared by the pipeline, its guards and the platform host.
//!
//! - [`PlatformStatus`] wraps the raw status code a platform call returned
//! - [`ServiceState`] mirrors the service control manager's current-state values
//! - [`CaptureReport`] describes the sample that was written
//! - [`Milestone`] marks each success step as it is reached

mod milestone;
mod report;
mod service_state;
mod status;

pub use milestone::Milestone;
pub use report::CaptureReport;
pub use service_state::ServiceState;
pub use status::PlatformStatus;

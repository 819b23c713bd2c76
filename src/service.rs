//! Biometric service precondition
//!
//! Capture only proceeds when the biometric service is installed, reachable
//! and running. The check is read-only: the service is never started or
//! stopped from here.

use tracing::{debug, error};

use crate::error::{CaptureError, Result, ServiceFailure};
use crate::provider::ServiceControl;

/// Windows Biometric Service short name
pub const BIOMETRIC_SERVICE_NAME: &str = "WbioSrvc";

/// Confirm `service_name` is in the running state.
pub fn check_service_running<S>(control: &S, service_name: &str) -> Result<()>
where
    S: ServiceControl + ?Sized,
{
    debug!(service = service_name, "Querying service status");

    let state = control.query_service_state(service_name).map_err(|reason| {
        error!(service = service_name, %reason, "Service status check failed");
        CaptureError::service_unavailable(service_name, reason)
    })?;

    if !state.is_running() {
        error!(service = service_name, %state, "Service is not running");
        return Err(CaptureError::service_unavailable(
            service_name,
            ServiceFailure::NotRunning { state },
        ));
    }

    debug!(service = service_name, "Service is running");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlatformStatus, ServiceState};
    use std::cell::RefCell;

    struct FixedService {
        outcome: std::result::Result<ServiceState, ServiceFailure>,
        queried: RefCell<Vec<String>>,
    }

    impl FixedService {
        fn new(outcome: std::result::Result<ServiceState, ServiceFailure>) -> Self {
            Self { outcome, queried: RefCell::new(Vec::new()) }
        }
    }

    impl ServiceControl for FixedService {
        fn query_service_state(
            &self,
            service_name: &str,
        ) -> std::result::Result<ServiceState, ServiceFailure> {
            self.queried.borrow_mut().push(service_name.to_string());
            self.outcome
        }
    }

    #[test]
    fn running_service_passes() {
        let control = FixedService::new(Ok(ServiceState::Running));
        check_service_running(&control, BIOMETRIC_SERVICE_NAME).expect("service should pass");
        assert_eq!(*control.queried.borrow(), vec![BIOMETRIC_SERVICE_NAME.to_string()]);
    }

    #[test]
    fn non_running_states_fail_with_observed_state() {
        for state in [ServiceState::Stopped, ServiceState::StartPending, ServiceState::Paused] {
            let control = FixedService::new(Ok(state));
            let err = check_service_running(&control, BIOMETRIC_SERVICE_NAME).unwrap_err();
            match err {
                CaptureError::ServiceUnavailable {
                    reason: ServiceFailure::NotRunning { state: observed },
                    ..
                } => assert_eq!(observed, state),
                other => panic!("Expected NotRunning, got {other:?}"),
            }
        }
    }

    #[test]
    fn query_failures_are_passed_through() {
        let status = PlatformStatus(0x8007_0424_u32 as i32);
        let control = FixedService::new(Err(ServiceFailure::ServiceOpen { status }));

        let err = check_service_running(&control, "NoSuchService").unwrap_err();
        match err {
            CaptureError::ServiceUnavailable { service, reason } => {
                assert_eq!(service, "NoSuchService");
                assert_eq!(reason, ServiceFailure::ServiceOpen { status });
            }
            other => panic!("Expected ServiceUnavailable, got {other:?}"),
        }
    }
}

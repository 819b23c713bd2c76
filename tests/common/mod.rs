//! Fake host shared by the integration tests
//!
//! Records every call made through the capability traits so tests can assert
//! which stages ran and how often each resource was released.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use winbio_capture::{
    BiometricUnit, CaptureFailure, CapturedSample, Elevation, PlatformStatus, ServiceControl,
    ServiceFailure, ServiceState,
};

/// Scripted behaviour for one run
#[derive(Debug, Clone)]
pub struct Script {
    pub elevated: bool,
    pub service: Result<ServiceState, ServiceFailure>,
    pub open: Result<(), PlatformStatus>,
    pub capture: Result<Vec<u8>, CaptureFailure>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            elevated: true,
            service: Ok(ServiceState::Running),
            open: Ok(()),
            capture: Ok(vec![0xDE, 0xAD, 0xBE, 0xEF]),
        }
    }
}

/// Call counters for every capability
#[derive(Debug, Default)]
pub struct Calls {
    pub elevation_checks: Cell<u32>,
    pub service_queries: RefCell<Vec<String>>,
    pub sessions_opened: Cell<u32>,
    pub captures: Cell<u32>,
    pub samples_released: Cell<u32>,
    pub sessions_closed: Cell<u32>,
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub script: Script,
    pub calls: Calls,
}

/// Session token; the id lets tests spot mismatched handles
#[derive(Debug)]
pub struct FakeSession(u32);

impl FakeHost {
    pub fn new(script: Script) -> Self {
        Self { script, calls: Calls::default() }
    }

    pub fn service_queried(&self) -> bool {
        !self.calls.service_queries.borrow().is_empty()
    }
}

impl Elevation for FakeHost {
    fn is_elevated(&self) -> bool {
        self.calls.elevation_checks.set(self.calls.elevation_checks.get() + 1);
        self.script.elevated
    }
}

impl ServiceControl for FakeHost {
    fn query_service_state(&self, service_name: &str) -> Result<ServiceState, ServiceFailure> {
        self.calls.service_queries.borrow_mut().push(service_name.to_string());
        self.script.service
    }
}

impl BiometricUnit for FakeHost {
    type Session = FakeSession;
    type Sample = Vec<u8>;

    fn open_session(&self) -> Result<FakeSession, PlatformStatus> {
        self.script.open?;
        self.calls.sessions_opened.set(self.calls.sessions_opened.get() + 1);
        Ok(FakeSession(42))
    }

    fn capture_sample(
        &self,
        session: &FakeSession,
    ) -> Result<CapturedSample<Vec<u8>>, CaptureFailure> {
        assert_eq!(session.0, 42, "capture on unknown session");
        self.calls.captures.set(self.calls.captures.get() + 1);
        let data = self.script.capture.clone()?;
        Ok(CapturedSample { data, unit_id: 3, reject_detail: 0 })
    }

    fn release_sample(&self, _sample: &mut Vec<u8>) {
        self.calls.samples_released.set(self.calls.samples_released.get() + 1);
    }

    fn close_session(&self, session: &mut FakeSession) {
        assert_eq!(session.0, 42, "close on unknown session");
        self.calls.sessions_closed.set(self.calls.sessions_closed.get() + 1);
    }
}

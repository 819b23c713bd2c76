//! Service control manager queries

use tracing::{debug, trace};
use windows::Win32::System::Services::{
    CloseServiceHandle, OpenSCManagerW, OpenServiceW, QueryServiceStatusEx, SC_HANDLE,
    SC_MANAGER_CONNECT, SC_STATUS_PROCESS_INFO, SERVICE_QUERY_STATUS, SERVICE_STATUS_PROCESS,
};
use windows::core::PCWSTR;

use super::wide_string;
use crate::error::ServiceFailure;
use crate::types::ServiceState;

/// Service control manager or service handle, closed on drop
struct ScHandle(SC_HANDLE);

impl Drop for ScHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseServiceHandle(self.0);
        }
    }
}

/// Open `service_name` read-only and report its current state.
pub(super) fn query_state(service_name: &str) -> Result<ServiceState, ServiceFailure> {
    trace!(service = service_name, "Connecting to service control manager");

    let manager = unsafe { OpenSCManagerW(PCWSTR::null(), PCWSTR::null(), SC_MANAGER_CONNECT) }
        .map(ScHandle)
        .map_err(|e| ServiceFailure::ManagerConnect { status: e.into() })?;

    let wide_name = wide_string(service_name);
    let service = unsafe {
        OpenServiceW(manager.0, PCWSTR::from_raw(wide_name.as_ptr()), SERVICE_QUERY_STATUS)
    }
    .map(ScHandle)
    .map_err(|e| ServiceFailure::ServiceOpen { status: e.into() })?;

    let mut status = SERVICE_STATUS_PROCESS::default();
    let mut bytes_needed = 0u32;
    // SAFETY: the slice covers exactly `status`, which outlives the call
    let buffer = unsafe {
        std::slice::from_raw_parts_mut(
            (&mut status as *mut SERVICE_STATUS_PROCESS).cast::<u8>(),
            std::mem::size_of::<SERVICE_STATUS_PROCESS>(),
        )
    };
    unsafe {
        QueryServiceStatusEx(service.0, SC_STATUS_PROCESS_INFO, Some(buffer), &mut bytes_needed)
    }
    .map_err(|e| ServiceFailure::StatusQuery { status: e.into() })?;

    let state = ServiceState::from_raw(status.dwCurrentState.0);
    debug!(service = service_name, %state, pid = status.dwProcessId, "Queried service status");
    Ok(state)
}

//! Service control manager states

use std::fmt;

/// Current state of a Windows service, as reported in `dwCurrentState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    StartPending,
    StopPending,
    Running,
    ContinuePending,
    PausePending,
    Paused,
    /// A value outside the documented range
    Unknown(u32),
}

impl ServiceState {
    /// Convert the raw `SERVICE_STATUS_CURRENT_STATE` value.
    pub fn from_raw(value: u32) -> Self {
        match value {
            1 => ServiceState::Stopped,
            2 => ServiceState::StartPending,
            3 => ServiceState::StopPending,
            4 => ServiceState::Running,
            5 => ServiceState::ContinuePending,
            6 => ServiceState::PausePending,
            7 => ServiceState::Paused,
            other => ServiceState::Unknown(other),
        }
    }

    pub fn is_running(self) -> bool {
        self == ServiceState::Running
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Stopped => f.write_str("stopped"),
            ServiceState::StartPending => f.write_str("start pending"),
            ServiceState::StopPending => f.write_str("stop pending"),
            ServiceState::Running => f.write_str("running"),
            ServiceState::ContinuePending => f.write_str("continue pending"),
            ServiceState::PausePending => f.write_str("pause pending"),
            ServiceState::Paused => f.write_str("paused"),
            ServiceState::Unknown(value) => write!(f, "unknown state {value}"),
        }
    }
}

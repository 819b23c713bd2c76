//! Platform status codes

use std::fmt;

/// Raw status code returned by a platform call.
///
/// For WinBio and COM-style calls this is an `HRESULT`; Win32 errors from
/// the service control manager arrive already wrapped as `0x8007xxxx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformStatus(pub i32);

impl PlatformStatus {
    /// `E_ACCESSDENIED`
    pub const ACCESS_DENIED: Self = Self(0x8007_0005_u32 as i32);

    /// Status code as the unsigned value the platform documents.
    pub fn code(self) -> u32 {
        self.0 as u32
    }

    /// Whether the call was refused for lack of privilege
    pub fn is_access_denied(self) -> bool {
        self == Self::ACCESS_DENIED
    }
}

impl fmt::Display for PlatformStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.code())
    }
}

#[cfg(windows)]
impl From<windows_core::Error> for PlatformStatus {
    fn from(err: windows_core::Error) -> Self {
        Self(err.code().0)
    }
}

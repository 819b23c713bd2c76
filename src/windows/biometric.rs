//! WinBio session and sample handling

use std::ffi::c_void;
use tracing::{trace, warn};
use windows::Win32::Devices::BiometricFramework::{
    WINBIO_BIR, WINBIO_POOL_SYSTEM, WinBioCaptureSample, WinBioCloseSession, WinBioFree,
    WinBioOpenSession,
};

use crate::provider::{CaptureFailure, CapturedSample};
use crate::types::PlatformStatus;

/// `WINBIO_TYPE_FINGERPRINT`
const WINBIO_TYPE_FINGERPRINT: u32 = 0x0000_0008;
/// `WINBIO_FLAG_RAW`: session may request unprocessed samples
const WINBIO_FLAG_RAW: u32 = 0x0000_0001;
/// `WINBIO_PURPOSE_ENROLL`
const WINBIO_PURPOSE_ENROLL: u8 = 0x03;
/// `WINBIO_DATA_FLAG_RAW`
const WINBIO_DATA_FLAG_RAW: u8 = 0x20;

/// Open WinBio session handle
#[derive(Debug)]
pub struct WinBioSession {
    handle: u32,
    open: bool,
}

impl WinBioSession {
    /// Open a fingerprint session on the system pool with raw access.
    pub(super) fn open() -> Result<Self, PlatformStatus> {
        let mut handle = 0u32;
        unsafe {
            WinBioOpenSession(
                WINBIO_TYPE_FINGERPRINT,
                WINBIO_POOL_SYSTEM,
                WINBIO_FLAG_RAW,
                None,
                None,
                &mut handle,
            )
        }
        .map_err(PlatformStatus::from)?;

        trace!(handle, "WinBioOpenSession succeeded");
        Ok(Self { handle, open: true })
    }

    /// Capture one raw enrollment sample.
    pub(super) fn capture_raw(&self) -> Result<CapturedSample<WinBioSample>, CaptureFailure> {
        let mut unit_id = 0u32;
        let mut sample: *mut WINBIO_BIR = std::ptr::null_mut();
        let mut sample_size = 0usize;
        let mut reject_detail = 0u32;

        let result = unsafe {
            WinBioCaptureSample(
                self.handle,
                WINBIO_PURPOSE_ENROLL,
                WINBIO_DATA_FLAG_RAW,
                Some(&mut unit_id as *mut u32),
                &mut sample,
                Some(&mut sample_size as *mut usize),
                Some(&mut reject_detail as *mut u32),
            )
        };

        // Take ownership first so a buffer handed back alongside an error is still freed
        let data = WinBioSample { bir: sample, len: sample_size };
        match result {
            Ok(()) => Ok(CapturedSample { data, unit_id, reject_detail }),
            Err(e) => {
                let mut data = data;
                data.free();
                Err(CaptureFailure { status: e.into(), reject_detail })
            }
        }
    }

    pub(super) fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = unsafe { WinBioCloseSession(self.handle) } {
            warn!(handle = self.handle, error = %e, "WinBioCloseSession failed");
        }
    }
}

/// Raw sample buffer allocated by WinBio
#[derive(Debug)]
pub struct WinBioSample {
    bir: *mut WINBIO_BIR,
    len: usize,
}

impl WinBioSample {
    /// Return the buffer to WinBio. Null buffers are skipped.
    pub(super) fn free(&mut self) {
        if self.bir.is_null() {
            return;
        }
        if let Err(e) = unsafe { WinBioFree(self.bir as *const c_void) } {
            warn!(error = %e, "WinBioFree failed");
        }
        self.bir = std::ptr::null_mut();
        self.len = 0;
    }
}

impl AsRef<[u8]> for WinBioSample {
    fn as_ref(&self) -> &[u8] {
        if self.bir.is_null() || self.len == 0 {
            return &[];
        }
        // SAFETY: WinBio reported `len` bytes at `bir`, valid until WinBioFree
        unsafe { std::slice::from_raw_parts(self.bir.cast::<u8>(), self.len) }
    }
}

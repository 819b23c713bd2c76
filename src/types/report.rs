//! Outcome of a successful capture

use std::path::PathBuf;

/// What a successful capture-and-persist run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    /// Biometric unit that supplied the sample
    pub unit_id: u32,
    /// WinBio reject detail accompanying the sample, normally zero
    pub reject_detail: u32,
    pub bytes_written: usize,
    pub output_path: PathBuf,
}

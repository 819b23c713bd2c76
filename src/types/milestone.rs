//! Success milestones reported while the pipeline runs

use std::fmt;
use std::path::PathBuf;

/// Progress point reached during a capture run.
///
/// The binary prints each one on standard output as it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Milestone {
    SessionOpened,
    SampleCaptured { bytes: usize },
    SampleSaved { path: PathBuf, bytes: usize },
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Milestone::SessionOpened => f.write_str("Biometric session opened successfully."),
            Milestone::SampleCaptured { .. } => f.write_str("Fingerprint captured successfully!"),
            Milestone::SampleSaved { path, bytes } => {
                write!(f, "Fingerprint data saved to '{}' ({bytes} bytes).", path.display())
            }
        }
    }
}

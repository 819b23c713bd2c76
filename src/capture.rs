//! Capture-and-persist stage
//!
//! Opens a biometric session, captures one raw sample and writes its bytes
//! verbatim to the output file. The session and the sample buffer are each
//! held in a guard that returns them to the [`BiometricUnit`] on drop, so
//! every exit path (success, capture failure, write failure) releases the
//! sample first and then closes the session, each exactly once.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::error::{CaptureError, Result};
use crate::provider::BiometricUnit;
use crate::types::{CaptureReport, Milestone};

/// Output file written in the working directory when none is configured
pub const DEFAULT_OUTPUT_FILE: &str = "fingerprint_data.bin";

/// Open session, closed on drop
struct OpenSession<'u, U: BiometricUnit + ?Sized> {
    unit: &'u U,
    session: U::Session,
}

impl<'u, U: BiometricUnit + ?Sized> OpenSession<'u, U> {
    fn open(unit: &'u U) -> Result<Self> {
        let session = unit.open_session().map_err(|status| {
            error!(%status, "Failed to open biometric session");
            CaptureError::Session { status }
        })?;

        info!("Biometric session opened successfully");
        Ok(Self { unit, session })
    }

    fn capture(&self) -> Result<HeldSample<'u, U>> {
        debug!(purpose = "enroll", flags = "raw", "Requesting one fingerprint sample");

        let captured = self.unit.capture_sample(&self.session).map_err(|failure| {
            error!(status = %failure.status, "WinBioCaptureSample failed");
            if failure.reject_detail != 0 {
                warn!(reject_detail = failure.reject_detail, "Sample was rejected by the sensor");
            }
            if failure.status.is_access_denied() {
                warn!("Access denied while capturing; the process needs administrative privileges");
            }
            CaptureError::Capture { status: failure.status }
        })?;

        Ok(HeldSample {
            unit: self.unit,
            sample: captured.data,
            unit_id: captured.unit_id,
            reject_detail: captured.reject_detail,
        })
    }
}

impl<U: BiometricUnit + ?Sized> Drop for OpenSession<'_, U> {
    fn drop(&mut self) {
        self.unit.close_session(&mut self.session);
        debug!("Biometric session closed");
    }
}

/// Captured sample, released on drop
struct HeldSample<'u, U: BiometricUnit + ?Sized> {
    unit: &'u U,
    sample: U::Sample,
    unit_id: u32,
    reject_detail: u32,
}

impl<U: BiometricUnit + ?Sized> HeldSample<'_, U> {
    fn bytes(&self) -> &[u8] {
        self.sample.as_ref()
    }
}

impl<U: BiometricUnit + ?Sized> Drop for HeldSample<'_, U> {
    fn drop(&mut self) {
        self.unit.release_sample(&mut self.sample);
        debug!("Sample buffer released");
    }
}

/// Capture one raw fingerprint sample and write it to `output_path`.
///
/// The file is created or truncated and receives the sample bytes exactly as
/// the platform returned them, with no header or trailer.
///
/// # Errors
///
/// - [`CaptureError::Session`] if no session could be opened
/// - [`CaptureError::Capture`] if the sample request failed
/// - [`CaptureError::Persistence`] if the file could not be written
pub fn capture_fingerprint<U>(unit: &U, output_path: &Path) -> Result<CaptureReport>
where
    U: BiometricUnit + ?Sized,
{
    capture_fingerprint_reporting(unit, output_path, |_| {})
}

/// Same as [`capture_fingerprint`], passing each [`Milestone`] to `progress`
/// as soon as it is reached.
pub fn capture_fingerprint_reporting<U, F>(
    unit: &U,
    output_path: &Path,
    mut progress: F,
) -> Result<CaptureReport>
where
    U: BiometricUnit + ?Sized,
    F: FnMut(Milestone),
{
    let session = OpenSession::open(unit)?;
    progress(Milestone::SessionOpened);

    let sample = session.capture()?;
    info!(
        unit_id = sample.unit_id,
        bytes = sample.bytes().len(),
        "Fingerprint captured successfully"
    );
    if sample.reject_detail != 0 {
        debug!(reject_detail = sample.reject_detail, "Capture reported a reject detail");
    }
    progress(Milestone::SampleCaptured { bytes: sample.bytes().len() });

    let bytes_written = save_sample(output_path, sample.bytes())?;
    progress(Milestone::SampleSaved { path: output_path.to_path_buf(), bytes: bytes_written });

    Ok(CaptureReport {
        unit_id: sample.unit_id,
        reject_detail: sample.reject_detail,
        bytes_written,
        output_path: output_path.to_path_buf(),
    })
}

/// Write `bytes` to `path`, replacing any previous contents.
pub fn save_sample(path: &Path, bytes: &[u8]) -> Result<usize> {
    let mut file = File::create(path).map_err(|source| {
        error!(
            path = %path.display(),
            %source,
            "Failed to open file for saving fingerprint data"
        );
        CaptureError::persistence(path, source)
    })?;

    file.write_all(bytes).and_then(|()| file.flush()).map_err(|source| {
        error!(path = %path.display(), %source, "Failed to write fingerprint data");
        CaptureError::persistence(path, source)
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "Fingerprint data saved");
    Ok(bytes.len())
}

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use winbio_capture::{CaptureConfig, CaptureError, CaptureReport, FAILURE_EXIT_STATUS, Milestone};

/// Capture one raw fingerprint sample and save it to disk
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file for the raw sample [default: fingerprint_data.bin]
    #[arg(short, long, env = "WINBIO_CAPTURE_OUTPUT")]
    output: Option<PathBuf>,

    /// Biometric service that must be running [default: WbioSrvc]
    #[arg(
        short,
        long,
        env = "WINBIO_CAPTURE_SERVICE",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    service: Option<String>,

    /// Enable logging on standard error (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Defaults, then the config file, then env and flags as merged by clap.
    fn resolve_config(&self) -> Result<CaptureConfig, CaptureError> {
        Ok(CaptureConfig::load(self.config.as_deref())?
            .with_overrides(self.output.clone(), self.service.clone()))
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return ExitCode::from(usage_failure(&e)),
    };
    init_logging(cli.verbose);

    let status = execute(&cli, capture, &mut std::io::stdout(), &mut std::io::stderr());
    ExitCode::from(status)
}

/// Resolve configuration, run `capture_with` and route its output.
///
/// Milestones go to `out` as they happen; failures go to `err`. Returns the
/// process exit status.
fn execute<C, O, E>(cli: &Cli, capture_with: C, out: &mut O, err: &mut E) -> u8
where
    C: FnOnce(&CaptureConfig, &mut dyn FnMut(Milestone)) -> Result<CaptureReport, CaptureError>,
    O: Write,
    E: Write,
{
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => return fail(&e, cli.verbose, err),
    };

    let mut print_milestone = |milestone: Milestone| {
        let _ = writeln!(out, "{milestone}");
    };
    match capture_with(&config, &mut print_milestone) {
        Ok(_) => 0,
        Err(e) => fail(&e, cli.verbose, err),
    }
}

#[cfg(windows)]
fn capture(
    config: &CaptureConfig,
    progress: &mut dyn FnMut(Milestone),
) -> Result<CaptureReport, CaptureError> {
    winbio_capture::pipeline::run_reporting(&winbio_capture::NativeHost, config, progress)
}

#[cfg(not(windows))]
fn capture(
    _config: &CaptureConfig,
    _progress: &mut dyn FnMut(Milestone),
) -> Result<CaptureReport, CaptureError> {
    Err(CaptureError::unsupported_platform("Fingerprint capture", "Windows"))
}

/// Print diagnostics, plus recovery suggestions when verbose.
fn fail<E: Write>(error: &CaptureError, verbose: u8, err: &mut E) -> u8 {
    for line in error.diagnostics() {
        let _ = writeln!(err, "{line}");
    }
    if verbose > 0 {
        for suggestion in error.recovery_suggestions() {
            let _ = writeln!(err, "  - {suggestion}");
        }
    }
    error.exit_code()
}

fn usage_failure(error: &clap::Error) -> u8 {
    let _ = error.print();
    FAILURE_EXIT_STATUS
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "off",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::sync::Mutex;
    use winbio_capture::PlatformStatus;

    const OUTPUT_ENV: &str = "WINBIO_CAPTURE_OUTPUT";
    const SERVICE_ENV: &str = "WINBIO_CAPTURE_SERVICE";

    /// Serializes every test that reads or writes the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn parse_with_env(args: &[&str], env: &[(&str, &str)]) -> Result<Cli, clap::Error> {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        // SAFETY: all environment access in this test binary holds ENV_LOCK
        unsafe {
            std::env::remove_var(OUTPUT_ENV);
            std::env::remove_var(SERVICE_ENV);
            for (key, value) in env {
                std::env::set_var(key, value);
            }
        }

        let argv = std::iter::once("winbio-capture").chain(args.iter().copied());
        let parsed = Cli::try_parse_from(argv);

        unsafe {
            std::env::remove_var(OUTPUT_ENV);
            std::env::remove_var(SERVICE_ENV);
        }
        parsed
    }

    fn run(
        cli: &Cli,
        capture_with: impl FnOnce(
            &CaptureConfig,
            &mut dyn FnMut(Milestone),
        ) -> Result<CaptureReport, CaptureError>,
    ) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(cli, capture_with, &mut out, &mut err);
        (status, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    fn write_config(dir: &std::path::Path) -> String {
        let path = dir.join("capture.yaml");
        std::fs::write(&path, "output_path: file.bin\nservice_name: FileSvc\n").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn no_sources_resolve_to_defaults() {
        let cli = parse_with_env(&[], &[]).unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config, CaptureConfig::default());
    }

    #[test]
    fn file_beats_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());

        let cli = parse_with_env(&["-c", &config_path], &[]).unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.output_path, PathBuf::from("file.bin"));
        assert_eq!(config.service_name, "FileSvc");
    }

    #[test]
    fn env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());

        let cli = parse_with_env(
            &["-c", &config_path],
            &[(OUTPUT_ENV, "env.bin"), (SERVICE_ENV, "EnvSvc")],
        )
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.output_path, PathBuf::from("env.bin"));
        assert_eq!(config.service_name, "EnvSvc");
    }

    #[test]
    fn flags_beat_env_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_config(dir.path());

        let cli = parse_with_env(
            &["-c", &config_path, "-o", "flag.bin", "--service", "FlagSvc"],
            &[(OUTPUT_ENV, "env.bin"), (SERVICE_ENV, "EnvSvc")],
        )
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.output_path, PathBuf::from("flag.bin"));
        assert_eq!(config.service_name, "FlagSvc");
    }

    #[test]
    fn empty_env_value_is_a_usage_failure_with_status_one() {
        for var in [OUTPUT_ENV, SERVICE_ENV] {
            let err = parse_with_env(&[], &[(var, "")]).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::InvalidValue, "{var}");
            assert!(err.use_stderr());
            assert_eq!(usage_failure(&err), 1);
        }
    }

    #[test]
    fn unknown_flag_is_a_usage_failure_with_status_one() {
        let err = parse_with_env(&["--retries", "3"], &[]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert!(err.use_stderr());
        assert_eq!(usage_failure(&err), 1);
    }

    #[test]
    fn help_and_version_are_not_failures() {
        for flag in ["--help", "--version"] {
            let err = parse_with_env(&[flag], &[]).unwrap_err();
            assert!(!err.use_stderr(), "{flag}");
        }
    }

    #[test]
    fn unreadable_config_file_fails_with_status_one() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        let cli = parse_with_env(&["-c", &missing.to_string_lossy()], &[]).unwrap();

        let (status, out, err) = run(&cli, |_, _| panic!("capture must not run"));

        assert_eq!(status, 1);
        assert!(out.is_empty());
        assert!(err.contains("missing.yaml"));
    }

    #[test]
    fn milestones_go_to_stdout_only() {
        let cli = parse_with_env(&["-o", "sample.bin"], &[]).unwrap();

        let (status, out, err) = run(&cli, |config, progress| {
            progress(Milestone::SessionOpened);
            progress(Milestone::SampleCaptured { bytes: 4 });
            progress(Milestone::SampleSaved { path: config.output_path.clone(), bytes: 4 });
            Ok(CaptureReport {
                unit_id: 1,
                reject_detail: 0,
                bytes_written: 4,
                output_path: config.output_path.clone(),
            })
        });

        assert_eq!(status, 0);
        assert!(err.is_empty());
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "Biometric session opened successfully.",
                "Fingerprint captured successfully!",
                "Fingerprint data saved to 'sample.bin' (4 bytes).",
            ]
        );
    }

    #[test]
    fn failures_go_to_stderr_after_earlier_milestones() {
        let cli = parse_with_env(&[], &[]).unwrap();

        let (status, out, err) = run(&cli, |_, progress| {
            progress(Milestone::SessionOpened);
            Err(CaptureError::Capture { status: PlatformStatus::ACCESS_DENIED })
        });

        assert_eq!(status, 1);
        assert_eq!(out, "Biometric session opened successfully.\n");
        let lines: Vec<_> = err.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("0x80070005"));
        assert!(lines[1].starts_with("Access denied."));
    }

    #[test]
    fn verbose_failures_list_recovery_suggestions() {
        let cli = parse_with_env(&["-v"], &[]).unwrap();

        let (status, _, err) = run(&cli, |_, _| Err(CaptureError::Elevation));

        assert_eq!(status, 1);
        assert!(err.contains("  - Launch from an elevated command prompt"));
    }

    #[cfg(not(windows))]
    #[test]
    fn capture_is_unsupported_off_windows() {
        let cli = parse_with_env(&[], &[]).unwrap();

        let result = capture(&CaptureConfig::default(), &mut |_| {});
        assert!(matches!(result, Err(CaptureError::UnsupportedPlatform { .. })));

        let (status, out, err) = run(&cli, capture);
        assert_eq!(status, 1);
        assert!(out.is_empty());
        assert!(err.contains("only available on Windows"));
    }
}

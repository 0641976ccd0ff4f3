mod config;
mod error;
mod logging;
mod runner;
mod shutdown;
mod watch;

use config::{Config, ShellCommand};
use error::{WfError, WfResult};
use log::{Level, Log};
use logging::{emit, emit_critical, stderr_logger, Verbosity};
use runner::ProcessRunner;
use shutdown::Shutdown;
use std::process::ExitCode;
use watch::{WatchLoop, WatchSet};

fn main() -> ExitCode {
    let config = match Config::new() {
        Ok(config) => config,
        Err(err) => {
            report(stderr_logger(Verbosity::default()).as_ref(), &err);
            return ExitCode::FAILURE;
        }
    };

    let logger = stderr_logger(config.verbosity());
    ExitCode::from(run(&config, logger))
}

/// 0 after an interrupt, 1 when the watch loop could not be started.
fn run(config: &Config, logger: Box<dyn Log>) -> u8 {
    let (command, files, shutdown) = match prepare(config) {
        Ok(prepared) => prepared,
        Err(err) => {
            report(logger.as_ref(), &err);
            return 1;
        }
    };

    emit(
        logger.as_ref(),
        Level::Debug,
        format_args!(
            "Watching {} file(s) every {} seconds",
            files.len(),
            config.interval().as_secs()
        ),
    );

    WatchLoop::new(files, config.interval(), command, ProcessRunner, logger).run(&shutdown);
    0
}

fn prepare(config: &Config) -> WfResult<(ShellCommand, WatchSet, Shutdown)> {
    let command = config.validate()?;
    let files = WatchSet::new(config.files())?;
    let shutdown = Shutdown::on_interrupt()?;

    Ok((command, files, shutdown))
}

fn report(logger: &dyn Log, err: &WfError) {
    emit_critical(logger, format_args!("{err}"));
    logger.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::testing::CaptureLog;
    use tempfile::tempdir;

    fn run_with(argv: &[&str]) -> (u8, CaptureLog) {
        let config = Config::parse_from(argv).unwrap();
        let log = CaptureLog::default();
        let status = run(&config, Box::new(log.clone()));

        (status, log)
    }

    #[test]
    fn test_no_files_exits_with_failure() {
        let (status, log) = run_with(&["wf", "-s", "echo hi"]);
        assert_eq!(status, 1);
        assert!(log.contains_critical("No file specified"));
    }

    #[test]
    fn test_no_command_exits_with_failure() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.txt");
        std::fs::write(&a, "").unwrap();

        let (status, log) = run_with(&["wf", a.to_str().unwrap()]);
        assert_eq!(status, 1);
        assert!(log.contains_critical("No program specified"));
    }

    #[test]
    fn test_missing_file_at_startup_exits_with_failure() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let (status, log) = run_with(&["wf", missing.to_str().unwrap(), "-s", "echo hi"]);
        assert_eq!(status, 1);
        assert!(log.contains_critical("Could not read modification time"));
    }
}

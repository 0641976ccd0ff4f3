use crate::{
    config::ShellCommand,
    error::{WfError, WfResult},
    logging::{emit, emit_critical},
    runner::{CommandRunner, RunOutcome},
    shutdown::Shutdown,
};
use log::{Level, Log};
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

pub fn modified_time(path: &Path) -> WfResult<SystemTime> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|source| WfError::PathAccess {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Debug)]
struct WatchedFile {
    path: PathBuf,
    modified: SystemTime,
}

/// Last recorded modification time of every watched path, kept in the order
/// the paths were configured. Entries are fixed once built.
#[derive(Debug)]
pub struct WatchSet {
    files: Vec<WatchedFile>,
}

impl WatchSet {
    /// Fails on the first path whose modification time cannot be read.
    /// A path given twice is watched once.
    pub fn new(paths: &[PathBuf]) -> WfResult<Self> {
        let mut files: Vec<WatchedFile> = Vec::with_capacity(paths.len());
        for path in paths {
            if files.iter().any(|file| &file.path == path) {
                continue;
            }

            files.push(WatchedFile {
                path: path.clone(),
                modified: modified_time(path)?,
            });
        }

        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[cfg(test)]
    pub fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| file.modified)
    }
}

/// What a single pass over the watch set did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cycle {
    pub changed: usize,
    pub interrupted: bool,
}

pub struct WatchLoop<R> {
    files: WatchSet,
    interval: Duration,
    command: ShellCommand,
    runner: R,
    logger: Box<dyn Log>,
}

impl<R: CommandRunner> WatchLoop<R> {
    pub fn new(
        files: WatchSet,
        interval: Duration,
        command: ShellCommand,
        runner: R,
        logger: Box<dyn Log>,
    ) -> Self {
        Self {
            files,
            interval,
            command,
            runner,
            logger,
        }
    }

    /// Sleeps and polls until `shutdown` is requested. Returns only then.
    pub fn run(&mut self, shutdown: &Shutdown) {
        loop {
            emit(
                self.logger.as_ref(),
                Level::Debug,
                format_args!("Sleeping for {} seconds", self.interval.as_secs()),
            );
            if shutdown.wait(self.interval) {
                break;
            }

            if self.poll(shutdown).interrupted {
                break;
            }
        }

        emit_critical(
            self.logger.as_ref(),
            format_args!("Program successfully exited through interrupt"),
        );
        self.logger.flush();
    }

    /// Checks every path once, in order, running the command for each one whose
    /// modification time differs from the recorded one. A shutdown arriving
    /// while a command runs ends the wait on it and the pass with it.
    pub fn poll(&mut self, shutdown: &Shutdown) -> Cycle {
        let Self {
            files,
            command,
            runner,
            logger,
            ..
        } = self;
        let logger: &dyn Log = &**logger;
        let mut cycle = Cycle::default();

        for file in files.files.iter_mut() {
            let current = match modified_time(&file.path) {
                Ok(current) => current,
                Err(err) => {
                    // keep the old timestamp, the next successful read compares against it
                    emit(logger, Level::Error, format_args!("{err}"));
                    continue;
                }
            };

            if current == file.modified {
                emit(
                    logger,
                    Level::Debug,
                    format_args!("[{}] No file changes since last check", file.path.display()),
                );
                continue;
            }

            emit(
                logger,
                Level::Info,
                format_args!(
                    "[{}] File change detected. Running `{command}`",
                    file.path.display()
                ),
            );
            match runner.run(command, shutdown) {
                Ok(RunOutcome::Exited(Some(0))) => emit(
                    logger,
                    Level::Debug,
                    format_args!("`{command}` exited successfully"),
                ),
                Ok(RunOutcome::Exited(Some(code))) => emit(
                    logger,
                    Level::Warn,
                    format_args!("`{command}` exited with status {code}"),
                ),
                Ok(RunOutcome::Exited(None)) => emit(
                    logger,
                    Level::Warn,
                    format_args!("`{command}` was terminated by a signal"),
                ),
                Ok(RunOutcome::Interrupted) => emit(
                    logger,
                    Level::Warn,
                    format_args!("Stopped waiting for `{command}`, it keeps running"),
                ),
                Err(err) => emit(logger, Level::Error, format_args!("{err}")),
            };

            file.modified = current;
            cycle.changed += 1;

            if shutdown.is_requested() {
                cycle.interrupted = true;
                break;
            }
        }

        cycle
    }

    #[cfg(test)]
    pub fn files(&self) -> &WatchSet {
        &self.files
    }
}

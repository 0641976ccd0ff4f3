use crate::{
    config::ShellCommand,
    error::{WfError, WfResult},
    shutdown::Shutdown,
};
use std::{process::Command, time::Duration};

/// How often a running child is checked for exit while waiting on it.
const WAIT_TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// `None` means the command ended without an exit code, e.g. killed by a signal.
    Exited(Option<i32>),
    /// A shutdown arrived while the command was still running. The child is left alone.
    Interrupted,
}

/// Runs the configured command for a change event. The watch loop blocks on
/// `run` until the command has finished or a shutdown is requested.
pub trait CommandRunner {
    fn run(&mut self, command: &ShellCommand, shutdown: &Shutdown) -> WfResult<RunOutcome>;
}

/// Spawns the command as a child process sharing our stdin, stdout and stderr.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, command: &ShellCommand, shutdown: &Shutdown) -> WfResult<RunOutcome> {
        let program = command.command();
        let mut child = Command::new(program)
            .args(command.args())
            .spawn()
            .map_err(|source| WfError::Spawn {
                program: program.to_owned(),
                source,
            })?;

        loop {
            let status = child.try_wait().map_err(|source| WfError::Wait {
                program: program.to_owned(),
                source,
            })?;
            if let Some(status) = status {
                return Ok(RunOutcome::Exited(status.code()));
            }

            if shutdown.wait(WAIT_TICK) {
                return Ok(RunOutcome::Interrupted);
            }
        }
    }
}

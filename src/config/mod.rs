mod args_opt;
mod file_opt;

use args_opt::ArgsOpt;
use file_opt::FileOpt;

use crate::{
    error::{WfError, WfResult},
    logging::Verbosity,
};
use clap::Parser;
use std::{ffi::OsString, fmt, path::PathBuf, time::Duration};

pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Command line merged over the config file. Command line values win.
#[derive(Debug)]
pub struct Config {
    files: Vec<PathBuf>,
    interval: u64,
    shell: Option<String>,
    verbosity: Verbosity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            interval: DEFAULT_INTERVAL_SECS,
            shell: None,
            verbosity: Verbosity::default(),
        }
    }
}

impl Config {
    pub fn new() -> WfResult<Self> {
        Self::parse_from(std::env::args_os())
    }

    /// Like [`Config::new`] with an explicit argv. Usage errors exit through clap.
    pub fn parse_from<I, T>(argv: I) -> WfResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args_opt = ArgsOpt::parse_from(argv);
        let file_opt = FileOpt::load(args_opt.config())?;

        Self::default().merge(file_opt, args_opt)
    }

    fn merge(mut self, mut file_opt: FileOpt, mut args_opt: ArgsOpt) -> WfResult<Self> {
        self.merge_files(file_opt.take_files(), args_opt.take_files());
        self.merge_interval(file_opt.take_time(), args_opt.take_time())?;

        self.shell = args_opt.take_shell().or(file_opt.take_shell());

        if let Some(verbosity) = args_opt.take_verbosity().or(file_opt.take_verbosity()) {
            self.verbosity = Verbosity::from_name(&verbosity);
        }

        Ok(self)
    }

    fn merge_files(&mut self, file_files: Option<Vec<PathBuf>>, args_files: Vec<PathBuf>) {
        match (file_files, args_files.is_empty()) {
            (_, false) => self.files = args_files,
            (Some(file_files), true) => self.files = file_files,
            (None, true) => self.files = Vec::new(),
        }
    }

    fn merge_interval(&mut self, file_time: Option<u64>, args_time: Option<u64>) -> WfResult<()> {
        match args_time.or(file_time) {
            Some(0) => return Err(WfError::InvalidInterval(0)),
            Some(time) => self.interval = time,
            None => self.interval = DEFAULT_INTERVAL_SECS,
        }

        Ok(())
    }

    /// Checks the preconditions of the watch loop: at least one file and a
    /// non-empty command.
    pub fn validate(&self) -> WfResult<ShellCommand> {
        if self.files.is_empty() {
            return Err(WfError::NoFiles);
        }

        self.shell
            .as_deref()
            .and_then(ShellCommand::parse)
            .ok_or(WfError::NoCommand)
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

/// Program and arguments, split once from the `--shell` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    command: String,
    args: Vec<String>,
}

impl ShellCommand {
    /// `None` for a blank string.
    // FIXME: quoting is not understood, `--shell "cmd 'two words'"` yields three arguments
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next()?.to_owned();
        let args = tokens.map(String::from).collect();

        Some(Self { command, args })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}

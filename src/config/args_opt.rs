use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name("wf"),
    version,
    about("Watches files for changes and runs a command whenever one of them is modified")
)]
pub struct ArgsOpt {
    #[arg(value_name("FILE"), help("files to watch e.g wf src/main.rs Cargo.toml -s \"cargo build\""))]
    files: Vec<PathBuf>,

    #[arg(
        short,
        long,
        value_name("SECONDS"),
        value_parser = clap::value_parser!(u64).range(1..),
        help("wait time between checks [default: 10]")
    )]
    time: Option<u64>,

    #[arg(
        short,
        long,
        value_name("COMMAND"),
        help("program run when a file changes, given as a single string e.g wf a.txt --shell \"make test\"")
    )]
    shell: Option<String>,

    #[arg(
        short,
        long,
        value_name("LEVEL"),
        help("NOTSET, DEBUG, INFO, WARNING, ERROR or CRITICAL; unknown levels mean CRITICAL [default: INFO]")
    )]
    verbosity: Option<String>,

    #[arg(
        short,
        long,
        value_name("PATH"),
        help("TOML config file, defaults to ./wf.toml when it exists")
    )]
    config: Option<PathBuf>,
}

impl ArgsOpt {
    pub fn take_files(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.files)
    }

    pub fn take_time(&mut self) -> Option<u64> {
        self.time.take()
    }

    pub fn take_shell(&mut self) -> Option<String> {
        self.shell.take()
    }

    pub fn take_verbosity(&mut self) -> Option<String> {
        self.verbosity.take()
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

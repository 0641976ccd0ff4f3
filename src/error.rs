use std::{io, path::PathBuf};
use thiserror::Error;

pub type WfResult<T> = Result<T, WfError>;

#[derive(Error, Debug)]
pub enum WfError {
    #[error("No file specified for the program.")]
    NoFiles,

    #[error("No program specified through --shell argument.")]
    NoCommand,

    /// Only reachable through the config file, clap rejects `--time 0` itself.
    #[error("Invalid wait time '{0}': it must be at least one second.")]
    InvalidInterval(u64),

    #[error("An error occurred while reading config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("An error occurred while deserialising config file {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Could not read modification time of {path:?}: {source}")]
    PathAccess { path: PathBuf, source: io::Error },

    #[error("Could not execute {program:?}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("Could not wait for {program:?}: {source}")]
    Wait { program: String, source: io::Error },

    #[error("Could not register the interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_access_names_the_path() {
        let err = WfError::PathAccess {
            path: PathBuf::from("a.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            err.to_string(),
            "Could not read modification time of \"a.txt\": gone"
        );
    }

    #[test]
    fn test_configuration_messages() {
        assert_eq!(
            WfError::NoFiles.to_string(),
            "No file specified for the program."
        );
        assert_eq!(
            WfError::NoCommand.to_string(),
            "No program specified through --shell argument."
        );
    }
}

use crate::error::{WfError, WfResult};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_FILE: &str = "wf.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileOpt {
    #[serde(default)]
    files: Option<Vec<PathBuf>>,
    #[serde(default)]
    time: Option<u64>,
    #[serde(default)]
    shell: Option<String>,
    #[serde(default)]
    verbosity: Option<String>,
}

impl FileOpt {
    /// An explicitly named file must exist; the default `wf.toml` is only read when present.
    pub fn load(explicit: Option<&Path>) -> WfResult<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::read(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> WfResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| WfError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&contents, path)
    }

    pub fn from_toml(contents: &str, path: &Path) -> WfResult<Self> {
        toml::from_str(contents).map_err(|err| WfError::ConfigParse {
            path: path.to_path_buf(),
            message: err.message().to_owned(),
        })
    }

    pub fn take_files(&mut self) -> Option<Vec<PathBuf>> {
        self.files.take()
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
}

// src/config.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use crate::store::StoreError;

/// Name of the store file inside the data directory.
pub const STORE_FILE_NAME: &str = "stopwatch.json";

const APP_DIR: &str = "stopwatch";

/// Where the stopwatch store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Resolves the data directory from the process environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// `XDG_DATA_HOME` first, then `HOME/.local/share`, then the platform's
    /// local data directory. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty()).map(PathBuf::from);

        let base = if let Some(xdg) = var("XDG_DATA_HOME") {
            xdg
        } else if let Some(home) = var("HOME") {
            home.join(".local").join("share")
        } else {
            dirs::data_local_dir().ok_or(StoreError::NoDataDir)?
        };

        Ok(Self::with_data_dir(base.join(APP_DIR)))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }
}

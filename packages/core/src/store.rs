// src/store.rs
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use fs2::FileExt;
use log::debug;
use thiserror::Error;
use crate::config::StoreConfig;
use crate::models::Entries;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not determine a data directory")]
    NoDataDir,
    #[error("error creating directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("error opening file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("error locking file {path}: {source}")]
    Lock { path: PathBuf, source: io::Error },
    #[error("error reading file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("error decoding entries in {path}: {source}")]
    Decode { path: PathBuf, source: serde_json::Error },
    #[error("error writing file {path}: {op}: {source}")]
    Write { path: PathBuf, op: &'static str, source: io::Error },
    #[error("error encoding entries for {path}: {source}")]
    Encode { path: PathBuf, source: serde_json::Error },
    #[error("error unlocking file {path}: {source}")]
    Unlock { path: PathBuf, source: io::Error },
    #[error("error removing file {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// The store file, opened and held under an exclusive lock.
///
/// The lock is released by [`StoreFile::close`], or on drop if a command
/// bails out early.
#[derive(Debug)]
pub struct StoreFile {
    file: Option<File>,
    path: PathBuf,
}

impl StoreFile {
    /// Creates the data directory if needed, opens (or creates) the store
    /// file and blocks until the exclusive lock is acquired.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let dir = config.data_dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = config.file_path();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StoreError::Open { path: path.clone(), source })?;

        debug!("Waiting for lock on {}", path.display());
        FileExt::lock_exclusive(&file)
            .map_err(|source| StoreError::Lock { path: path.clone(), source })?;
        debug!("Locked {}", path.display());

        Ok(Self { file: Some(file), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry. An empty file is an empty store.
    pub fn read(&mut self) -> Result<Entries, StoreError> {
        let path = self.path.clone();
        let file = self.handle()?;

        let len = file
            .metadata()
            .map_err(|source| StoreError::Read { path: path.clone(), source })?
            .len();
        if len == 0 {
            debug!("{} is empty", path.display());
            return Ok(Entries::new());
        }

        file.seek(SeekFrom::Start(0))
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        let entries: Entries = serde_json::from_reader(BufReader::new(&*file))
            .map_err(|source| StoreError::Decode { path: path.clone(), source })?;
        debug!("Read {} entries from {}", entries.len(), path.display());
        Ok(entries)
    }

    /// Replaces the file contents with `entries`. Not atomic: a crash between
    /// truncate and write leaves the file truncated or partial.
    pub fn write(&mut self, entries: &Entries) -> Result<(), StoreError> {
        let path = self.path.clone();
        let file = self.handle()?;
        let write_err = |op: &'static str| {
            let path = path.clone();
            move |source: io::Error| StoreError::Write { path, op, source }
        };

        file.set_len(0).map_err(write_err("truncate"))?;
        file.seek(SeekFrom::Start(0)).map_err(write_err("seek"))?;

        let mut json = serde_json::to_vec(entries)
            .map_err(|source| StoreError::Encode { path: path.clone(), source })?;
        json.push(b'\n');
        file.write_all(&json).map_err(write_err("write"))?;
        file.flush().map_err(write_err("flush"))?;

        debug!("Wrote {} entries to {}", entries.len(), path.display());
        Ok(())
    }

    /// Releases the lock and closes the file.
    pub fn close(mut self) -> Result<(), StoreError> {
        match self.file.take() {
            Some(file) => Self::unlock(&file, &self.path),
            None => Ok(()),
        }
    }

    fn handle(&mut self) -> Result<&mut File, StoreError> {
        let path = &self.path;
        self.file.as_mut().ok_or_else(|| StoreError::Read {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::Other, "store file already closed"),
        })
    }

    fn unlock(file: &File, path: &Path) -> Result<(), StoreError> {
        FileExt::unlock(file).map_err(|source| StoreError::Unlock {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Unlocked {}", path.display());
        Ok(())
    }
}

impl Drop for StoreFile {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            if let Err(e) = Self::unlock(&file, &self.path) {
                log::warn!("{}", e);
            }
        }
    }
}

/// Deletes the store file. A missing file is not an error.
pub fn remove_store(config: &StoreConfig) -> Result<bool, StoreError> {
    let path = config.file_path();
    match fs::remove_file(&path) {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist", path.display());
            Ok(false)
        }
        Err(source) => Err(StoreError::Remove { path, source }),
    }
}

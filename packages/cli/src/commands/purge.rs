// cli/src/commands/purge.rs
use std::io::{BufRead, Write};
use anyhow::{Context, Result};
use log::info;
use stopwatch_core::{remove_store, StoreConfig};

/// Deletes the store file after asking on `prompt`, unless
/// `skip_confirmation` is set. Returns whether the file was removed.
pub fn purge<R: BufRead, W: Write>(
    config: &StoreConfig,
    skip_confirmation: bool,
    mut input: R,
    mut prompt: W,
) -> Result<bool> {
    if !skip_confirmation {
        write!(prompt, "Are you sure you want to remove the stopwatch file? [y/N] ")?;
        prompt.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer).context("error reading input")?;
        if !matches!(answer.trim(), "y" | "Y") {
            info!("Purge cancelled");
            return Ok(false);
        }
    }

    Ok(remove_store(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use stopwatch_core::Epoch;
    use tempfile::tempdir;
    use crate::commands::start;

    #[test]
    fn test_declined_purge_keeps_file() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        start(&config, &Epoch::now(), Some("keep".into())).unwrap();

        for answer in ["n\n", "\n", "", "yes\n"] {
            let mut prompt: Vec<u8> = Vec::new();
            assert!(!purge(&config, false, Cursor::new(answer), &mut prompt).unwrap());
            assert!(String::from_utf8(prompt).unwrap().ends_with("[y/N] "));
            assert!(config.file_path().exists());
        }
    }

    #[test]
    fn test_confirmed_purge_removes_file() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        start(&config, &Epoch::now(), None).unwrap();

        assert!(purge(&config, false, Cursor::new("Y\n"), Vec::<u8>::new()).unwrap());
        assert!(!config.file_path().exists());
    }

    #[test]
    fn test_skip_confirmation_does_not_prompt() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        start(&config, &Epoch::now(), None).unwrap();

        let mut prompt: Vec<u8> = Vec::new();
        assert!(purge(&config, true, Cursor::new(""), &mut prompt).unwrap());
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_purge_missing_file_succeeds() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path().join("never-created"));

        assert!(!purge(&config, true, Cursor::new(""), Vec::<u8>::new()).unwrap());
    }
}

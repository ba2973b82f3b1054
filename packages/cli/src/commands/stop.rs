// cli/src/commands/stop.rs
use anyhow::{anyhow, Result};
use chrono::TimeDelta;
use stopwatch_core::{Epoch, StoreConfig};

use super::with_store;

/// Stops `id` and returns how long it ran. An unknown id is an error and the
/// store is left untouched.
pub fn stop(config: &StoreConfig, epoch: &Epoch, id: &str) -> Result<TimeDelta> {
    with_store(config, |store| {
        let mut entries = store.read()?;
        let elapsed = entries
            .clear(id, epoch)
            .ok_or_else(|| anyhow!("no stopwatch with id {} found", id))?;
        store.write(&entries)?;
        Ok(elapsed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;
    use crate::commands::start;

    #[test]
    fn test_stop_returns_elapsed() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        let started = Epoch::at(Utc.timestamp_opt(1_000, 0).unwrap());
        let stopped = Epoch::at(Utc.timestamp_opt(1_090, 500_000_000).unwrap());

        let id = start(&config, &started, None).unwrap();
        assert_eq!(stop(&config, &stopped, &id).unwrap(), TimeDelta::milliseconds(90_500));
    }

    #[test]
    fn test_stop_twice_fails() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        let epoch = Epoch::now();

        start(&config, &epoch, Some("once".into())).unwrap();
        stop(&config, &epoch, "once").unwrap();

        let err = stop(&config, &epoch, "once").unwrap_err();
        assert_eq!(err.to_string(), "no stopwatch with id once found");
    }

    #[test]
    fn test_stop_unknown_leaves_file_unchanged() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        start(&config, &Epoch::now(), Some("keep".into())).unwrap();
        let before = fs::read_to_string(config.file_path()).unwrap();

        assert!(stop(&config, &Epoch::now(), "missing").is_err());
        assert_eq!(fs::read_to_string(config.file_path()).unwrap(), before);
    }

    #[test]
    fn test_stop_at_start_instant_is_found() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        let epoch = Epoch::at(Utc.timestamp_opt(42, 0).unwrap());

        start(&config, &epoch, Some("instant".into())).unwrap();
        assert_eq!(stop(&config, &epoch, "instant").unwrap(), TimeDelta::zero());
    }
}

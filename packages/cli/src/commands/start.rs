// cli/src/commands/start.rs
use anyhow::Result;
use log::{debug, warn};
use rand::RngCore;
use stopwatch_core::{Epoch, StoreConfig};

use super::with_store;

/// Starts a stopwatch and returns its id.
///
/// Without a name, an id is generated that no running stopwatch uses. A name
/// that is already running restarts that stopwatch.
pub fn start(config: &StoreConfig, epoch: &Epoch, name: Option<String>) -> Result<String> {
    let name = name.filter(|n| !n.is_empty());

    with_store(config, |store| {
        let mut entries = store.read()?;

        let id = match name {
            Some(name) => name,
            None => loop {
                let id = generate_id(epoch);
                if !entries.contains(&id) {
                    break id;
                }
                debug!("Generated id {} is taken, retrying", id);
            },
        };

        if let Some(previous) = entries.add(id.clone(), epoch.wall) {
            warn!("Restarting stopwatch {} (running since {})", id, previous.to_rfc3339());
        }
        store.write(&entries)?;
        Ok(id)
    })
}

/// Four big-endian bytes of the Unix time in seconds followed by four random
/// bytes, hex encoded.
pub fn generate_id(epoch: &Epoch) -> String {
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&(epoch.wall.timestamp() as u32).to_be_bytes());
    rand::rng().fill_bytes(&mut bytes[4..]);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use stopwatch_core::StoreFile;
    use tempfile::tempdir;

    #[test]
    fn test_generate_id_layout() {
        let epoch = Epoch::at(Utc.timestamp_opt(0x6553_f100, 0).unwrap());
        let id = generate_id(&epoch);

        assert_eq!(id.len(), 16);
        assert!(id.starts_with("6553f100"));
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_start_records_epoch() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        let epoch = Epoch::at(Utc.timestamp_opt(1_700_000_000, 250_000_000).unwrap());

        let id = start(&config, &epoch, None).unwrap();

        let mut store = StoreFile::open(&config).unwrap();
        let entries = store.read().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get(&id), Some(epoch.wall));
    }

    #[test]
    fn test_start_with_name_overwrites() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        let first = Epoch::at(Utc.timestamp_opt(100, 0).unwrap());
        let second = Epoch::at(Utc.timestamp_opt(200, 0).unwrap());

        assert_eq!(start(&config, &first, Some("build".into())).unwrap(), "build");
        assert_eq!(start(&config, &second, Some("build".into())).unwrap(), "build");

        let mut store = StoreFile::open(&config).unwrap();
        let entries = store.read().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("build"), Some(second.wall));
    }

    #[test]
    fn test_empty_name_generates_id() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());

        let id = start(&config, &Epoch::now(), Some(String::new())).unwrap();
        assert_eq!(id.len(), 16);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::with_data_dir(dir.path());
        let epoch = Epoch::now();

        let mut ids: Vec<String> = (0..50).map(|_| start(&config, &epoch, None).unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }
}

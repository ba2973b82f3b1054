// cli/src/commands/list.rs
use std::io::Write;
use anyhow::Result;
use chrono::SecondsFormat;
use tabwriter::TabWriter;
use stopwatch_core::{format_duration, DurationFormat, Epoch, StoreConfig};

use super::with_store;

/// Writes one row per running stopwatch: id, elapsed time, start time.
pub fn list<W: Write>(
    config: &StoreConfig,
    epoch: &Epoch,
    format: DurationFormat,
    out: W,
) -> Result<()> {
    let entries = with_store(config, |store| Ok(store.read()?))?;
    if entries.is_empty() {
        return Ok(());
    }

    let mut tw = TabWriter::new(out);
    for (id, started) in entries.sorted() {
        writeln!(
            &mut tw,
            "{}\t{}\t{}",
            id,
            format_duration(epoch.since(started), format),
            started.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }
    tw.flush()?;
    Ok(())
}

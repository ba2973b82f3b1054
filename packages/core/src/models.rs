use std::collections::HashMap;
use std::time::Instant;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, TimeDelta, Utc};

/// The single reference "now" of one invocation.
///
/// Captured once at process start and handed to every command, so recorded
/// start times and computed durations agree within a run.
#[derive(Debug, Clone, Copy)]
pub struct Epoch {
    /// Wall-clock time, stored as start time and used for elapsed durations.
    pub wall: DateTime<Utc>,
    /// Monotonic reading for in-process timers.
    pub mono: Instant,
}

impl Epoch {
    pub fn now() -> Self {
        Self {
            wall: Utc::now(),
            mono: Instant::now(),
        }
    }

    pub fn at(wall: DateTime<Utc>) -> Self {
        Self {
            wall,
            mono: Instant::now(),
        }
    }

    /// Elapsed time since `start`, negative if `start` lies after the epoch.
    pub fn since(&self, start: DateTime<Utc>) -> TimeDelta {
        self.wall.signed_duration_since(start)
    }

    /// Monotonic time passed since the epoch was captured.
    pub fn elapsed(&self) -> TimeDelta {
        TimeDelta::from_std(self.mono.elapsed()).unwrap_or_else(|_| TimeDelta::max_value())
    }
}

/// Running stopwatches keyed by id.
///
/// Serialises as a JSON object of `id -> RFC 3339 start time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries {
    entries: HashMap<String, DateTime<Utc>>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id`, replacing the start time of a stopwatch already running
    /// under that id. Returns the replaced start time.
    pub fn add(&mut self, id: impl Into<String>, start_time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.entries.insert(id.into(), start_time)
    }

    /// Removes `id` and returns how long it ran as of `epoch`.
    /// `None` means no stopwatch with that id exists.
    pub fn clear(&mut self, id: &str, epoch: &Epoch) -> Option<TimeDelta> {
        self.entries.remove(id).map(|start| epoch.since(start))
    }

    pub fn get(&self, id: &str) -> Option<DateTime<Utc>> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, DateTime<Utc>)> {
        self.entries.iter().map(|(id, start)| (id.as_str(), *start))
    }

    /// Entries ordered by start time, ties broken by id.
    pub fn sorted(&self) -> Vec<(&str, DateTime<Utc>)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

// src/format.rs
use std::fmt::Write;
use chrono::TimeDelta;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// How durations are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationFormat {
    /// Compact breakdown such as `1h2m3.5s` or `250ms`.
    #[default]
    Human,
    /// Fractional seconds, six decimals.
    Seconds,
    /// Whole milliseconds, truncated toward zero.
    Milliseconds,
}

pub fn format_duration(duration: TimeDelta, format: DurationFormat) -> String {
    let nanos = total_nanos(duration);
    match format {
        DurationFormat::Seconds => format!("{:.6}", nanos as f64 / NANOS_PER_SEC as f64),
        DurationFormat::Milliseconds => (nanos / NANOS_PER_MILLI as i128).to_string(),
        DurationFormat::Human => human(nanos),
    }
}

/// Rounds to the nearest multiple of `step`, halves away from zero.
pub fn round_duration(duration: TimeDelta, step: TimeDelta) -> TimeDelta {
    let step = total_nanos(step).abs();
    if step == 0 {
        return duration;
    }
    let nanos = total_nanos(duration);
    let rem = nanos % step;
    let rounded = if rem.abs() * 2 >= step {
        nanos - rem + step * nanos.signum()
    } else {
        nanos - rem
    };
    from_nanos(rounded).unwrap_or(duration)
}

fn total_nanos(duration: TimeDelta) -> i128 {
    duration.num_seconds() as i128 * NANOS_PER_SEC as i128 + duration.subsec_nanos() as i128
}

fn from_nanos(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos / NANOS_PER_SEC as i128).ok()?;
    let subsec = (nanos % NANOS_PER_SEC as i128) as i64;
    TimeDelta::try_seconds(secs)?.checked_add(&TimeDelta::nanoseconds(subsec))
}

fn human(nanos: i128) -> String {
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let n = nanos.unsigned_abs();

    if n == 0 {
        return "0s".to_string();
    }

    if n < NANOS_PER_SEC {
        let (unit, suffix) = if n < NANOS_PER_MICRO {
            (1, "ns")
        } else if n < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "µs")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        push_decimal(&mut out, n, unit);
        out.push_str(suffix);
        return out;
    }

    let secs = n / NANOS_PER_SEC;
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    push_decimal(&mut out, n % (60 * NANOS_PER_SEC), NANOS_PER_SEC);
    out.push('s');
    out
}

// `value / unit` with the remainder as trimmed decimal digits.
fn push_decimal(out: &mut String, value: u128, unit: u128) {
    let _ = write!(out, "{}", value / unit);
    let rem = value % unit;
    if rem == 0 {
        return;
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{:0width$}", rem, width = width);
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

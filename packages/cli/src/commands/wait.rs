// cli/src/commands/wait.rs
use std::future::Future;
use std::io::{self, Write};
use anyhow::Result;
use chrono::TimeDelta;
use tokio::time::{interval, Duration, MissedTickBehavior};
use stopwatch_core::{format_duration, round_duration, DurationFormat, Epoch};

const TICK: Duration = Duration::from_millis(100);
const CLEAR_LINE: &str = "\x1b[2K\r";

/// Times an in-process stopwatch until `shutdown` resolves, then prints the
/// final duration. Nothing is written to the store.
///
/// With `live`, the running time is redrawn in place every tick.
pub async fn wait<W, F>(
    epoch: &Epoch,
    live: bool,
    format: DurationFormat,
    shutdown: F,
    mut out: W,
) -> Result<TimeDelta>
where
    W: Write,
    F: Future<Output = io::Result<()>>,
{
    tokio::pin!(shutdown);

    if live {
        let step = TimeDelta::from_std(TICK)?;
        let mut ticker = interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                res = &mut shutdown => {
                    res?;
                    break;
                }
                _ = ticker.tick() => {
                    let shown = round_duration(epoch.elapsed(), step);
                    write!(out, "{}{}", CLEAR_LINE, format_duration(shown, format))?;
                    out.flush()?;
                }
            }
        }
    } else {
        shutdown.await?;
    }

    let elapsed = epoch.elapsed();
    writeln!(out, "{}{}", CLEAR_LINE, format_duration(elapsed, format))?;
    out.flush()?;
    Ok(elapsed)
}

/// Resolves on Ctrl-C or SIGTERM.
#[cfg(unix)]
pub async fn shutdown_signal() -> io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
pub async fn shutdown_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

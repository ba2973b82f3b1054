// cli/src/commands.rs
use anyhow::Result;
use log::warn;
use stopwatch_core::{StoreConfig, StoreFile};

pub mod start;
pub mod stop;
pub mod list;
pub mod wait;
pub mod purge;

pub use start::start;
pub use stop::stop;
pub use list::list;
pub use wait::{shutdown_signal, wait};
pub use purge::purge;

/// Runs `f` with the store open and locked. The lock is released whether
/// `f` succeeds or not; a failure from `f` takes precedence over one from
/// unlocking.
pub(crate) fn with_store<T, F>(config: &StoreConfig, f: F) -> Result<T>
where
    F: FnOnce(&mut StoreFile) -> Result<T>,
{
    let mut store = StoreFile::open(config)?;
    let result = f(&mut store);
    match (result, store.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(e), close) => {
            if let Err(close_err) = close {
                warn!("{}", close_err);
            }
            Err(e)
        }
    }
}

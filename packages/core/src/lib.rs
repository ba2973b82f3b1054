pub mod models;
pub mod format;
pub mod config;
pub mod store;

// Re-export commonly used types
pub use models::{Entries, Epoch};
pub use format::{format_duration, round_duration, DurationFormat};
pub use config::{StoreConfig, STORE_FILE_NAME};
pub use store::{remove_store, StoreError, StoreFile};

//! Log-backed key store.
//!
//! [`LogStore`] keeps the whole key -> URL mapping in memory and persists
//! every accepted insertion to an append-only log through a bounded queue
//! drained by a single background writer. On startup the log is replayed
//! to rebuild the mapping.

pub mod error;
pub mod log;
pub mod settings;
pub mod store;
mod writer;

pub use error::{Result, StorageError};
pub use log::{discard_tail, rejected_path, replay, LogWriter, ReplaySummary};
pub use settings::StoreSettings;
pub use store::LogStore;

pub use burrow_core::KeyStore;

//! Public SDK surface for Casefile.
//!
//! This crate re-exports the record store building blocks and provides a
//! small initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use casefile_config as config;
/// Re-export for convenience.
pub use casefile_core as core;

pub use casefile_config::{CasefileConfig, ConfigError};
pub use casefile_core::{CaseRecord, RecordId, RecordStore, StoreError, WriteTicket};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Consumers are still
/// expected to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

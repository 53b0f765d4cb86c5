//! Configuration models and loading for Casefile.
//!
//! This crate owns the config schema, its validation, and the JSON5 file
//! loader used to construct the record store explicitly at process start.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// File loading and validation entry points.
pub use loader::{load_default, load_file, validate};
/// Configuration schema models.
pub use model::*;

//! Core record-store primitives for Casefile.
//!
//! This crate owns the case record entity, its SQLite persistence, the live
//! query change feed, and the photo-path association used by capture and
//! display collaborators.

pub mod convert;
mod db;
pub mod error;
mod live;
pub mod photos;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use photos::PhotoLocator;
pub use record::{CaseRecord, RecordId};
pub use store::{RecordStore, WriteTicket};

//! Deterministic record-id to photo-path association.
//!
//! The store never touches photo files itself; capture and display
//! collaborators do the actual I/O at the derived path.

use crate::record::RecordId;
use std::path::{Path, PathBuf};

/// File name of the photo belonging to a record id.
pub fn photo_file_name(id: RecordId) -> String {
    format!("IMG_{id}.jpg")
}

/// Derives photo paths under a fixed base directory.
#[derive(Debug, Clone)]
pub struct PhotoLocator {
    /// Directory that photo files live under.
    base: PathBuf,
}

impl PhotoLocator {
    /// Create a locator rooted at the given directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The configured base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path of the photo for the given record id.
    ///
    /// Pure: no I/O, no failure. The file may or may not exist.
    pub fn path_for(&self, id: RecordId) -> PathBuf {
        self.base.join(photo_file_name(id))
    }
}

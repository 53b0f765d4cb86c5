//! The case record entity.

use crate::convert;
use crate::photos;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a case record.
pub type RecordId = Uuid;

/// A single tracked case entry.
///
/// A record is created detached with [`CaseRecord::new`] and becomes durable
/// only through an explicit store insert. Mutation is whole-record
/// replacement via update; there is no partial-field write path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    /// Identifier, assigned once at creation and never reassigned.
    pub id: RecordId,
    /// Short description of the case.
    pub title: String,
    /// When the incident occurred. Millisecond precision, so the stored form
    /// round-trips exactly.
    pub occurred_at: DateTime<Utc>,
    /// Whether the police should be called for this case.
    pub flagged: bool,
    /// Whether the case has been solved.
    pub resolved: bool,
    /// Name of the suspect, if one was picked.
    pub suspect_name: String,
    /// Phone number of the suspect.
    pub suspect_phone: String,
}

impl CaseRecord {
    /// Create a detached record with a fresh random id and default fields.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            occurred_at: convert::at_millis_precision(Utc::now()),
            flagged: false,
            resolved: false,
            suspect_name: String::new(),
            suspect_phone: String::new(),
        }
    }

    /// File name of the photo associated with this record.
    ///
    /// Derived from the id alone; no stored field can drift out of sync with
    /// it. The referenced file may or may not exist.
    pub fn photo_file_name(&self) -> String {
        photos::photo_file_name(self.id)
    }
}

impl Default for CaseRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_records_get_distinct_ids_and_defaults() {
        let a = CaseRecord::new();
        let b = CaseRecord::new();
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "");
        assert!(!a.flagged);
        assert!(!a.resolved);
        assert_eq!(a.suspect_name, "");
        assert_eq!(a.suspect_phone, "");
    }

    #[test]
    fn photo_file_name_depends_only_on_id() {
        let mut record = CaseRecord::new();
        let before = record.photo_file_name();
        record.title = "Stolen stapler".to_string();
        record.resolved = true;
        assert_eq!(record.photo_file_name(), before);
        assert_eq!(before, format!("IMG_{}.jpg", record.id));
    }
}

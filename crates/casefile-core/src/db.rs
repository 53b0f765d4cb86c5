//! SQLite backing table for case records.
//!
//! One table keyed by id; the owning store serializes all access through its
//! writer thread, so the connection here is used from a single thread only.

use crate::convert;
use crate::error::StoreError;
use crate::record::CaseRecord;
use log::info;
use rusqlite::{Connection, ErrorCode, params};
use std::path::Path;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS case_record (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    occurred_at INTEGER NOT NULL,
    flagged INTEGER NOT NULL,
    resolved INTEGER NOT NULL,
    suspect_name TEXT NOT NULL,
    suspect_phone TEXT NOT NULL
)";

/// Connection wrapper owning the record table.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists.
    ///
    /// Any failure here means the store cannot serve at all, so everything is
    /// mapped to [`StoreError::StorageUnavailable`].
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|err| unavailable(path, err))?;
        conn.execute(SCHEMA, [])
            .map_err(|err| unavailable(path, err))?;
        info!("opened record database (path={})", path.display());
        Ok(Self { conn })
    }

    /// Insert a new record. Duplicate ids violate the primary key and are
    /// reported as [`StoreError::Conflict`].
    pub(crate) fn insert(&self, record: &CaseRecord) -> Result<(), StoreError> {
        let result = self.conn.execute(
            "INSERT INTO case_record \
             (id, title, occurred_at, flagged, resolved, suspect_name, suspect_phone) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                convert::encode_id(record.id),
                record.title,
                convert::encode_timestamp(record.occurred_at),
                record.flagged,
                record.resolved,
                record.suspect_name,
                record.suspect_phone,
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Conflict(record.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the stored record with the same id wholesale.
    pub(crate) fn update(&self, record: &CaseRecord) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE case_record SET \
             title = ?2, occurred_at = ?3, flagged = ?4, resolved = ?5, \
             suspect_name = ?6, suspect_phone = ?7 \
             WHERE id = ?1",
            params![
                convert::encode_id(record.id),
                record.title,
                convert::encode_timestamp(record.occurred_at),
                record.flagged,
                record.resolved,
                record.suspect_name,
                record.suspect_phone,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    /// Read the full table, in rowid order.
    pub(crate) fn list_all(&self) -> Result<Vec<CaseRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, occurred_at, flagged, resolved, suspect_name, suspect_phone \
             FROM case_record",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, bool>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, title, occurred_at, flagged, resolved, suspect_name, suspect_phone) = row?;
            records.push(CaseRecord {
                id: convert::decode_id(&id)?,
                title,
                occurred_at: convert::decode_timestamp(occurred_at)?,
                flagged,
                resolved,
                suspect_name,
                suspect_phone,
            });
        }
        Ok(records)
    }
}

fn unavailable(path: &Path, err: rusqlite::Error) -> StoreError {
    StoreError::StorageUnavailable(format!("{}: {err}", path.display()))
}

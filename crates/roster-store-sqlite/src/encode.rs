//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; UUIDs as hyphenated lowercase
//! strings.

use chrono::{DateTime, Utc};
use roster_core::student::StudentRecord;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` that builds a [`RawStudent`].
pub const STUDENT_COLUMNS: &str =
  "record_id, name, student_id, qr_code, registered_at";

/// Raw strings read directly from a `students` row.
pub struct RawStudent {
  pub record_id:     String,
  pub name:          String,
  pub student_id:    String,
  pub qr_code:       String,
  pub registered_at: String,
}

impl RawStudent {
  /// Map a row selected with [`STUDENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:     row.get(0)?,
      name:          row.get(1)?,
      student_id:    row.get(2)?,
      qr_code:       row.get(3)?,
      registered_at: row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<StudentRecord> {
    Ok(StudentRecord {
      record_id:     decode_uuid(&self.record_id)?,
      name:          self.name,
      student_id:    self.student_id,
      qr_code:       self.qr_code,
      registered_at: decode_dt(&self.registered_at)?,
    })
  }
}

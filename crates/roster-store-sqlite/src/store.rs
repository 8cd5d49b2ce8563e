//! [`SqliteStore`] — the SQLite implementation of [`StudentRegistry`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  store::StudentRegistry,
  student::{DuplicatePolicy, NewStudent, StudentRecord},
};

use crate::{
  encode::{encode_dt, encode_uuid, RawStudent, STUDENT_COLUMNS},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A student registry backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// connection closes when the last clone is dropped.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  policy: DuplicatePolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, policy: DuplicatePolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open a store that must already exist at `path`; a missing file is an
  /// error rather than a fresh, empty registry.
  pub async fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
    let flags = rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
      | rusqlite::OpenFlags::SQLITE_OPEN_URI
      | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = tokio_rusqlite::Connection::open_with_flags(path, flags).await?;
    let store = Self { conn, policy: DuplicatePolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, policy: DuplicatePolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Set how [`StudentRegistry::register`] treats an identifier that is
  /// already present.
  pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn duplicate_policy(&self) -> DuplicatePolicy { self.policy }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StudentRegistry impl ────────────────────────────────────────────────────

impl StudentRegistry for SqliteStore {
  type Error = crate::Error;

  async fn register(&self, student: NewStudent, qr_code: String) -> Result<StudentRecord> {
    student.validate()?;

    let record = StudentRecord {
      record_id:     Uuid::new_v4(),
      name:          student.name,
      student_id:    student.student_id,
      qr_code,
      registered_at: Utc::now(),
    };

    let id_str     = encode_uuid(record.record_id);
    let at_str     = encode_dt(record.registered_at);
    let name       = record.name.clone();
    let student_id = record.student_id.clone();
    let qr_code    = record.qr_code.clone();
    let reject     = self.policy == DuplicatePolicy::Reject;

    // The existence check and the insert share one closure so they run
    // back-to-back on the connection thread.
    let inserted: bool = self
      .conn
      .call(move |conn| {
        if reject {
          let exists = conn
            .query_row(
              "SELECT 1 FROM students WHERE student_id = ?1 LIMIT 1",
              rusqlite::params![student_id],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if exists {
            return Ok(false);
          }
        }

        conn.execute(
          "INSERT INTO students (record_id, name, student_id, qr_code, registered_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, student_id, qr_code, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(roster_core::Error::DuplicateStudent(record.student_id).into());
    }

    tracing::debug!(
      student_id = %record.student_id,
      record_id = %record.record_id,
      "inserted student record"
    );
    Ok(record)
  }

  async fn find_student(&self, student_id: &str) -> Result<Option<StudentRecord>> {
    let student_id = student_id.to_owned();

    let raw: Option<RawStudent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {STUDENT_COLUMNS} FROM students
               WHERE student_id = ?1
               ORDER BY rowid
               LIMIT 1"
            ),
            rusqlite::params![student_id],
            RawStudent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawStudent::into_record).transpose()
  }

  async fn list_students(&self) -> Result<Vec<StudentRecord>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_record).collect()
  }

  async fn count_by_student_id(&self, student_id: &str) -> Result<usize> {
    let student_id = student_id.to_owned();

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM students WHERE student_id = ?1",
          rusqlite::params![student_id],
          |r| r.get(0),
        )?)
      })
      .await?;

    Ok(count as usize)
  }
}

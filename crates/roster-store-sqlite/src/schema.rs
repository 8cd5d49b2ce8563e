//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are append-only. No UPDATE or DELETE is ever issued against this
-- table, and student_id is deliberately not UNIQUE: duplicate registrations
-- are governed by the store's duplicate policy, not by the schema.
CREATE TABLE IF NOT EXISTS students (
    record_id     TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    student_id    TEXT NOT NULL,
    qr_code       TEXT NOT NULL,   -- verification URL encoded in the artifact
    registered_at TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS students_student_id_idx ON students(student_id);

PRAGMA user_version = 1;
";

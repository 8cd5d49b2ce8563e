//! The `StudentRegistry` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The batch driver and the verify operation depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::student::{NewStudent, StudentRecord};

/// Abstraction over the persistent collection of student records.
///
/// Records are append-only: nothing here updates or deletes a row. The
/// backend owns its connection for its whole lifetime; callers never open a
/// connection per operation.
pub trait StudentRegistry: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a record for `student` whose artifact encodes `qr_code`.
  ///
  /// `record_id` and `registered_at` are assigned by the store. Whether an
  /// already-registered identifier is accepted depends on the backend's
  /// [`DuplicatePolicy`](crate::student::DuplicatePolicy).
  fn register(
    &self,
    student: NewStudent,
    qr_code: String,
  ) -> impl Future<Output = Result<StudentRecord, Self::Error>> + Send + '_;

  /// Point lookup by identifier. When several records share the identifier
  /// the earliest registration wins. Returns `None` if not found.
  fn find_student<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Option<StudentRecord>, Self::Error>> + Send + 'a;

  /// All records in registration order.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<StudentRecord>, Self::Error>> + Send + '_;

  /// Number of records stored under `student_id`.
  fn count_by_student_id<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}

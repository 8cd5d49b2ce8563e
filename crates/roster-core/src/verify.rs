//! The verify lookup and its structured outcome.
//!
//! Lookup failures never escape as `Err`: they become
//! [`VerifyOutcome::Error`] so a caller can render the result directly.

use serde::{Deserialize, Serialize};

use crate::store::StudentRegistry;

/// Result of looking a student up by identifier.
///
/// Serialises to the JSON shapes consumers already rely on:
///
/// ```json
/// {"message": "Student found", "name": "Ann Mary Binoy"}
/// {"message": "Student not found."}
/// {"message": "Error querying data", "error": "..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message")]
pub enum VerifyOutcome {
  #[serde(rename = "Student found")]
  Found { name: String },
  #[serde(rename = "Student not found.")]
  NotFound,
  #[serde(rename = "Error querying data")]
  Error { error: String },
}

impl VerifyOutcome {
  pub fn is_found(&self) -> bool { matches!(self, Self::Found { .. }) }
}

/// Look up `student_id` once, with no retry.
pub async fn verify<S: StudentRegistry>(store: &S, student_id: &str) -> VerifyOutcome {
  match store.find_student(student_id).await {
    Ok(Some(record)) => VerifyOutcome::Found { name: record.name },
    Ok(None) => VerifyOutcome::NotFound,
    Err(e) => {
      tracing::warn!(student_id, error = %e, "verify lookup failed");
      let mut error = e.to_string();
      if error.is_empty() {
        error = "unknown store error".to_owned();
      }
      VerifyOutcome::Error { error }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::student::{NewStudent, StudentRecord};

  #[derive(Debug, thiserror::Error)]
  #[error("{0}")]
  struct FakeError(String);

  /// Vec-backed registry; `fail_with` makes every call fail.
  #[derive(Default)]
  struct FakeRegistry {
    rows:      Mutex<Vec<StudentRecord>>,
    fail_with: Option<String>,
  }

  impl FakeRegistry {
    fn check(&self) -> Result<(), FakeError> {
      match &self.fail_with {
        Some(msg) => Err(FakeError(msg.clone())),
        None => Ok(()),
      }
    }
  }

  impl StudentRegistry for FakeRegistry {
    type Error = FakeError;

    async fn register(
      &self,
      student: NewStudent,
      qr_code: String,
    ) -> Result<StudentRecord, FakeError> {
      self.check()?;
      let record = StudentRecord {
        record_id: Uuid::new_v4(),
        name: student.name,
        student_id: student.student_id,
        qr_code,
        registered_at: Utc::now(),
      };
      self.rows.lock().unwrap().push(record.clone());
      Ok(record)
    }

    async fn find_student(&self, student_id: &str) -> Result<Option<StudentRecord>, FakeError> {
      self.check()?;
      let rows = self.rows.lock().unwrap();
      Ok(rows.iter().find(|r| r.student_id == student_id).cloned())
    }

    async fn list_students(&self) -> Result<Vec<StudentRecord>, FakeError> {
      self.check()?;
      Ok(self.rows.lock().unwrap().clone())
    }

    async fn count_by_student_id(&self, student_id: &str) -> Result<usize, FakeError> {
      self.check()?;
      let rows = self.rows.lock().unwrap();
      Ok(rows.iter().filter(|r| r.student_id == student_id).count())
    }
  }

  #[tokio::test]
  async fn found_returns_name() {
    let store = FakeRegistry::default();
    store
      .register(
        NewStudent::new("Ann Mary Binoy", "HKC22CS006"),
        "https://verify.example/HKC22CS006".into(),
      )
      .await
      .unwrap();

    let outcome = verify(&store, "HKC22CS006").await;
    assert_eq!(outcome, VerifyOutcome::Found { name: "Ann Mary Binoy".into() });
    assert!(outcome.is_found());
  }

  #[tokio::test]
  async fn missing_returns_not_found() {
    let store = FakeRegistry::default();
    assert_eq!(verify(&store, "HKC22CS999").await, VerifyOutcome::NotFound);
  }

  #[tokio::test]
  async fn store_failure_is_contained() {
    let store = FakeRegistry {
      fail_with: Some("connection refused".into()),
      ..Default::default()
    };
    assert_eq!(
      verify(&store, "HKC22CS006").await,
      VerifyOutcome::Error { error: "connection refused".into() }
    );
  }

  #[tokio::test]
  async fn empty_store_error_still_has_message() {
    let store = FakeRegistry { fail_with: Some(String::new()), ..Default::default() };
    match verify(&store, "HKC22CS006").await {
      VerifyOutcome::Error { error } => assert!(!error.is_empty()),
      other => panic!("expected error outcome, got {other:?}"),
    }
  }

  #[test]
  fn outcome_json_shapes() {
    let found = VerifyOutcome::Found { name: "Ann Mary Binoy".into() };
    assert_eq!(
      serde_json::to_value(&found).unwrap(),
      serde_json::json!({ "message": "Student found", "name": "Ann Mary Binoy" })
    );
    assert_eq!(
      serde_json::to_value(VerifyOutcome::NotFound).unwrap(),
      serde_json::json!({ "message": "Student not found." })
    );
    assert_eq!(
      serde_json::to_value(VerifyOutcome::Error { error: "boom".into() }).unwrap(),
      serde_json::json!({ "message": "Error querying data", "error": "boom" })
    );
  }
}

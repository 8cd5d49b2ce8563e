//! Cross-check registry records against their artifacts on disk.
//!
//! Every record should have an artifact that decodes to its `qr_code`. The
//! batch driver does not guarantee this, so the audit reports the records
//! for which it does not hold.

use roster_core::store::StudentRegistry;
use roster_qr::ArtifactGenerator;
use serde::Serialize;
use uuid::Uuid;

/// What is wrong with a record's artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
  /// No file at the expected path.
  Missing,
  /// The file decodes, but to a different URL.
  Mismatch { found: String },
  /// The file exists but could not be decoded.
  Unreadable { error: String },
}

/// A record whose artifact failed the check.
#[derive(Debug, Clone, Serialize)]
pub struct AuditIssue {
  pub record_id:  Uuid,
  pub student_id: String,
  pub expected:   String,
  pub finding:    Finding,
}

/// Check every record in `registry` against the artifacts of `generator`.
pub async fn audit<S: StudentRegistry>(
  registry: &S,
  generator: &ArtifactGenerator,
) -> Result<Vec<AuditIssue>, S::Error> {
  let records = registry.list_students().await?;
  let mut issues = Vec::new();

  for record in records {
    let path = generator.path_for(&record.student_id);

    let finding = if !path.is_file() {
      Some(Finding::Missing)
    } else {
      match roster_qr::decode(&path) {
        Ok(found) if found == record.qr_code => None,
        Ok(found) => Some(Finding::Mismatch { found }),
        Err(e) => Some(Finding::Unreadable { error: e.to_string() }),
      }
    };

    if let Some(finding) = finding {
      tracing::debug!(student_id = %record.student_id, ?finding, "artifact check failed");
      issues.push(AuditIssue {
        record_id: record.record_id,
        student_id: record.student_id,
        expected: record.qr_code,
        finding,
      });
    }
  }

  Ok(issues)
}

//! The batch driver: one artifact and one registry record per roster entry.
//!
//! Entries are processed strictly in order, one at a time. The artifact write
//! and the registry insert are not linked: a registry failure after a
//! successful artifact write leaves the artifact in place.

use roster_core::{
  store::StudentRegistry,
  student::{NewStudent, StudentRecord},
};
use roster_qr::ArtifactGenerator;
use serde::Serialize;
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Why a single roster entry could not be enrolled.
#[derive(Debug, Error)]
pub enum EnrollError {
  #[error("artifact error: {0}")]
  Artifact(#[from] roster_qr::Error),

  #[error("registry error: {0}")]
  Registry(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EnrollError {
  pub fn stage(&self) -> Stage {
    match self {
      Self::Artifact(_) => Stage::Artifact,
      Self::Registry(_) => Stage::Registry,
    }
  }
}

/// The pipeline step a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
  Artifact,
  Registry,
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// One failed roster entry.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
  pub name:       String,
  pub student_id: String,
  pub stage:      Stage,
  pub error:      String,
}

/// Aggregated end-of-batch outcome.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
  pub registered: Vec<StudentRecord>,
  pub failures:   Vec<BatchFailure>,
  /// `true` if an artifact failure stopped the batch early.
  pub aborted:    bool,
  /// Entries never attempted because the batch aborted.
  pub skipped:    usize,
}

impl BatchReport {
  /// Every entry was attempted and none failed.
  pub fn is_clean(&self) -> bool { self.failures.is_empty() && !self.aborted }
}

// ─── Enroller ────────────────────────────────────────────────────────────────

/// Runs the artifact generator then the registry writer for each entry.
pub struct Enroller<S> {
  generator:              ArtifactGenerator,
  registry:               S,
  base_url:               String,
  stop_on_artifact_error: bool,
}

impl<S> Enroller<S>
where
  S: StudentRegistry,
{
  pub fn new(generator: ArtifactGenerator, registry: S, base_url: impl Into<String>) -> Self {
    Self {
      generator,
      registry,
      base_url: base_url.into(),
      stop_on_artifact_error: true,
    }
  }

  /// Whether an artifact failure ends the batch (default) or is recorded
  /// like a registry failure.
  pub fn stop_on_artifact_error(mut self, stop: bool) -> Self {
    self.stop_on_artifact_error = stop;
    self
  }

  pub fn registry(&self) -> &S { &self.registry }

  pub fn generator(&self) -> &ArtifactGenerator { &self.generator }

  /// Write the artifact for `student`, then register it.
  ///
  /// No registry write is attempted if the artifact write fails.
  pub async fn enroll(&self, student: &NewStudent) -> Result<StudentRecord, EnrollError> {
    let url = student.verification_url(&self.base_url);

    self
      .generator
      .generate(&student.name, &student.student_id, &url)?;

    self
      .registry
      .register(student.clone(), url)
      .await
      .map_err(|e| EnrollError::Registry(Box::new(e)))
  }

  /// Enroll every entry of `roster` in order and report the outcome.
  pub async fn run(&self, roster: &[NewStudent]) -> BatchReport {
    let mut report = BatchReport::default();

    for (i, student) in roster.iter().enumerate() {
      match self.enroll(student).await {
        Ok(record) => {
          tracing::info!(
            name = %record.name,
            student_id = %record.student_id,
            qr_code = %record.qr_code,
            "registered student"
          );
          report.registered.push(record);
        }
        Err(e) => {
          let stage = e.stage();
          tracing::warn!(
            name = %student.name,
            student_id = %student.student_id,
            ?stage,
            error = %e,
            "enrollment failed"
          );
          report.failures.push(BatchFailure {
            name: student.name.clone(),
            student_id: student.student_id.clone(),
            stage,
            error: e.to_string(),
          });

          if stage == Stage::Artifact && self.stop_on_artifact_error {
            report.aborted = true;
            report.skipped = roster.len() - i - 1;
            tracing::error!(skipped = report.skipped, "aborting batch after artifact failure");
            break;
          }
        }
      }
    }

    report
  }
}

//! Student records — the rows held by the registry.
//!
//! A record is written once when a student's verification code is generated
//! and is never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Roster input ────────────────────────────────────────────────────────────

/// One roster entry: the display name and the student identifier it belongs
/// to. Input to the artifact generator and the registry writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
  pub name:       String,
  /// Free-text code such as `HKC22CS006` (institution + cohort + sequence).
  pub student_id: String,
}

impl NewStudent {
  pub fn new(name: impl Into<String>, student_id: impl Into<String>) -> Self {
    Self { name: name.into(), student_id: student_id.into() }
  }

  /// Reject an empty identifier; nothing else about the identifier is checked.
  pub fn validate(&self) -> Result<()> {
    if self.student_id.is_empty() {
      return Err(Error::EmptyIdentifier);
    }
    Ok(())
  }

  /// The verification URL for this student under `base_url`.
  pub fn verification_url(&self, base_url: &str) -> String {
    verification_url(base_url, &self.student_id)
  }
}

/// Plain concatenation of `base_url` and `student_id`. Neither side is
/// escaped or validated, so a missing trailing slash yields a URL such as
/// `https://hostHKC22CS006`.
pub fn verification_url(base_url: &str, student_id: &str) -> String {
  format!("{base_url}{student_id}")
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A registered student. Uniqueness of `student_id` is not implied: the
/// registry may hold several records for the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
  /// Store-assigned row key; distinguishes duplicate registrations.
  pub record_id:     Uuid,
  pub name:          String,
  pub student_id:    String,
  /// The verification URL encoded into the student's artifact.
  pub qr_code:       String,
  pub registered_at: DateTime<Utc>,
}

// ─── Duplicate policy ────────────────────────────────────────────────────────

/// What the registry does when asked to register an identifier it already
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
  /// Insert anyway; re-running a batch accumulates duplicate rows.
  #[default]
  Allow,
  /// Refuse with [`Error::DuplicateStudent`].
  Reject,
}

impl std::str::FromStr for DuplicatePolicy {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "allow" => Ok(Self::Allow),
      "reject" => Ok(Self::Reject),
      other => Err(Error::UnknownDuplicatePolicy(other.to_owned())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_is_plain_concatenation() {
    let s = NewStudent::new("Ann Mary Binoy", "HKC22CS006");
    assert_eq!(
      s.verification_url("https://verify.example/"),
      "https://verify.example/HKC22CS006"
    );
    assert_eq!(s.verification_url(""), "HKC22CS006");
    assert_eq!(verification_url("x/", "a b?c"), "x/a b?c");
  }

  #[test]
  fn empty_identifier_is_rejected() {
    assert!(matches!(
      NewStudent::new("Nobody", "").validate(),
      Err(Error::EmptyIdentifier)
    ));
    assert!(NewStudent::new("", "HKC22CS001").validate().is_ok());
  }

  #[test]
  fn duplicate_policy_parses() {
    assert_eq!("allow".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Allow);
    assert_eq!("reject".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Reject);
    assert!("skip".parse::<DuplicatePolicy>().is_err());
    assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Allow);
  }
}

//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("student identifier must not be empty")]
  EmptyIdentifier,

  #[error("student {0:?} is already registered")]
  DuplicateStudent(String),

  #[error("unknown duplicate policy: {0:?}")]
  UnknownDuplicatePolicy(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

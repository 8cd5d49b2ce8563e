//! Error types for the roster-qr artifact codec.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("QR encode error: {0}")]
  Encode(#[from] qrcode::types::QrError),

  #[error("image error at {path}: {source}")]
  Image {
    path:   PathBuf,
    #[source]
    source: image::ImageError,
  },

  #[error("I/O error at {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("no QR code found in {0}")]
  NoCode(PathBuf),

  #[error("QR decode error in {path}: {source}")]
  Decode {
    path:   PathBuf,
    #[source]
    source: rqrr::DeQRError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

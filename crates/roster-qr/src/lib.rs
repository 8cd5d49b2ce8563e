//! QR artifact codec for the student roster.
//!
//! Encodes a verification URL into a PNG QR code on disk and decodes it back.
//! Pure synchronous; no database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use roster_qr::{ArtifactConfig, ArtifactGenerator};
//!
//! let generator = ArtifactGenerator::new(ArtifactConfig::new("artifacts"));
//! let path = generator
//!   .generate("Ann Mary Binoy", "HKC22CS006", "https://verify.example/HKC22CS006")
//!   .unwrap();
//! assert_eq!(roster_qr::decode(&path).unwrap(), "https://verify.example/HKC22CS006");
//! ```

pub mod error;

use std::path::{Path, PathBuf};

use image::{ImageFormat, Luma};
use qrcode::QrCode;

pub use error::{Error, Result};

/// File extension of every artifact.
pub const ARTIFACT_EXTENSION: &str = "png";

// ─── Configuration ───────────────────────────────────────────────────────────

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
  /// Directory holding `{student_id}.png`; created on first write.
  pub dir: PathBuf,
}

impl ArtifactConfig {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }
}

// ─── Generator ───────────────────────────────────────────────────────────────

/// Writes one QR image per student identifier.
///
/// Files are named by identifier alone, so regenerating an identifier
/// overwrites its previous artifact.
#[derive(Debug, Clone)]
pub struct ArtifactGenerator {
  config: ArtifactConfig,
}

impl ArtifactGenerator {
  pub fn new(config: ArtifactConfig) -> Self { Self { config } }

  pub fn config(&self) -> &ArtifactConfig { &self.config }

  /// The path an artifact for `student_id` is (or would be) written to.
  /// The identifier is used verbatim as the file stem.
  pub fn path_for(&self, student_id: &str) -> PathBuf {
    self
      .config
      .dir
      .join(format!("{student_id}.{ARTIFACT_EXTENSION}"))
  }

  /// Encode `url` as a QR code and write it to [`Self::path_for`]
  /// `(student_id)`, replacing any existing file.
  ///
  /// `name` only appears in the log line.
  pub fn generate(&self, name: &str, student_id: &str, url: &str) -> Result<PathBuf> {
    if student_id.is_empty() {
      return Err(roster_core::Error::EmptyIdentifier.into());
    }

    let dir = &self.config.dir;
    std::fs::create_dir_all(dir).map_err(|source| Error::Io {
      path: dir.clone(),
      source,
    })?;

    let image = QrCode::new(url.as_bytes())?
      .render::<Luma<u8>>()
      .build();

    let path = self.path_for(student_id);
    image
      .save_with_format(&path, ImageFormat::Png)
      .map_err(|source| Error::Image {
        path: path.clone(),
        source,
      })?;

    tracing::debug!(name, student_id, path = %path.display(), "wrote QR artifact");
    Ok(path)
  }
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Read the artifact at `path` and return the payload of the first QR code
/// found in it.
pub fn decode(path: &Path) -> Result<String> {
  let image = image::open(path)
    .map_err(|source| Error::Image {
      path: path.to_path_buf(),
      source,
    })?
    .into_luma8();

  let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
    image.width() as usize,
    image.height() as usize,
    |x, y| image.get_pixel(x as u32, y as u32).0[0],
  );

  let grids = prepared.detect_grids();
  let grid = grids
    .first()
    .ok_or_else(|| Error::NoCode(path.to_path_buf()))?;

  let (_meta, content) = grid.decode().map_err(|source| Error::Decode {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(content)
}

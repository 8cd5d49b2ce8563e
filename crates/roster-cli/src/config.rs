//! Runtime configuration, loaded once at startup and handed to each component.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use roster_core::student::DuplicatePolicy;
use serde::Deserialize;

/// Unprefixed variable that overrides `base_url`.
pub const BASE_URL_VAR: &str = "BASE_URL";
/// Unprefixed variable that overrides `store_path`.
pub const STORE_URI_VAR: &str = "STORE_URI";

/// Runtime configuration, deserialised from `roster.toml` and the environment.
#[derive(Debug, Deserialize, Clone)]
pub struct RosterConfig {
  /// Prefix of every verification URL. Not validated.
  pub base_url:               String,
  /// SQLite file holding the registry.
  pub store_path:             PathBuf,
  #[serde(default = "default_artifact_dir")]
  pub artifact_dir:           PathBuf,
  #[serde(default)]
  pub duplicate_policy:       DuplicatePolicy,
  /// Abort the batch on the first artifact failure.
  #[serde(default = "default_true")]
  pub stop_on_artifact_error: bool,
}

fn default_artifact_dir() -> PathBuf { PathBuf::from("artifacts") }

fn default_true() -> bool { true }

impl RosterConfig {
  /// Load from `path` (optional) and the process environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_env(path, std::env::vars().collect())
  }

  /// Load from `path` (optional) and an explicit environment map.
  ///
  /// Precedence, lowest first: the TOML file, `ROSTER_*` variables, then
  /// [`BASE_URL_VAR`] and [`STORE_URI_VAR`].
  pub fn load_with_env(
    path: &Path,
    env: HashMap<String, String>,
  ) -> Result<Self, config::ConfigError> {
    let base_url = env.get(BASE_URL_VAR).cloned();
    let store_uri = env.get(STORE_URI_VAR).cloned();

    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER").source(Some(env)))
      .set_override_option("base_url", base_url)?
      .set_override_option("store_path", store_uri)?
      .build()?;

    let mut cfg: RosterConfig = settings.try_deserialize()?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.artifact_dir = expand_tilde(&cfg.artifact_dir);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
      .iter()
      .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
      .collect()
  }

  fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("roster.toml");
    std::fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn file_values_and_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_config(
      tmp.path(),
      "base_url = \"https://verify.example/\"\nstore_path = \"roster.db\"\n",
    );

    let cfg = RosterConfig::load_with_env(&path, HashMap::new()).unwrap();
    assert_eq!(cfg.base_url, "https://verify.example/");
    assert_eq!(cfg.store_path, PathBuf::from("roster.db"));
    assert_eq!(cfg.artifact_dir, PathBuf::from("artifacts"));
    assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Allow);
    assert!(cfg.stop_on_artifact_error);
  }

  #[test]
  fn environment_overrides_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_config(
      tmp.path(),
      "base_url = \"https://file.example/\"\nstore_path = \"file.db\"\n",
    );

    let cfg = RosterConfig::load_with_env(
      &path,
      env(&[
        ("ROSTER_BASE_URL", "https://prefixed.example/"),
        ("ROSTER_DUPLICATE_POLICY", "reject"),
        ("ROSTER_STOP_ON_ARTIFACT_ERROR", "false"),
        ("STORE_URI", "env.db"),
      ]),
    )
    .unwrap();
    assert_eq!(cfg.base_url, "https://prefixed.example/");
    assert_eq!(cfg.store_path, PathBuf::from("env.db"));
    assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Reject);
    assert!(!cfg.stop_on_artifact_error);

    let cfg = RosterConfig::load_with_env(
      &path,
      env(&[
        ("ROSTER_BASE_URL", "https://prefixed.example/"),
        ("BASE_URL", "https://plain.example/"),
      ]),
    )
    .unwrap();
    assert_eq!(cfg.base_url, "https://plain.example/");
  }

  #[test]
  fn missing_file_uses_environment_only() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = RosterConfig::load_with_env(
      &tmp.path().join("absent.toml"),
      env(&[("BASE_URL", "https://verify.example/"), ("STORE_URI", "r.db")]),
    )
    .unwrap();
    assert_eq!(cfg.base_url, "https://verify.example/");
  }

  #[test]
  fn base_url_has_no_default() {
    let tmp = tempfile::tempdir().unwrap();
    let result = RosterConfig::load_with_env(
      &tmp.path().join("absent.toml"),
      env(&[("STORE_URI", "r.db")]),
    );
    assert!(result.is_err());
  }
}

//! End-to-end tests for the `roster` binary.

use std::{
  path::Path,
  process::{Command, Output},
};

const BASE_URL: &str = "https://verify.example/";

/// Run `roster` in `dir` with the given store path and arguments.
fn roster(dir: &Path, store: &Path, args: &[&str]) -> Output {
  Command::new(env!("CARGO_BIN_EXE_roster"))
    .current_dir(dir)
    .env("BASE_URL", BASE_URL)
    .env("STORE_URI", store)
    .env("RUST_LOG", "debug")
    .args(args)
    .output()
    .expect("run roster binary")
}

fn stdout_json(output: &Output) -> Vec<serde_json::Value> {
  String::from_utf8(output.stdout.clone())
    .unwrap()
    .lines()
    .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("{line:?}: {e}")))
    .collect()
}

fn write_roster(dir: &Path) -> std::path::PathBuf {
  let path = dir.join("class.csv");
  std::fs::write(
    &path,
    "name,student_id\nAnn Mary Binoy,HKC22CS006\nSanika C S,HKC22CE013\n",
  )
  .unwrap();
  path
}

#[test]
fn verify_with_unopenable_store_prints_error_outcome() {
  let tmp = tempfile::tempdir().unwrap();
  let store = tmp.path().join("no-such-dir").join("roster.db");

  let out = roster(tmp.path(), &store, &["verify", "HKC22CS006"]);
  assert!(!out.status.success());

  let lines = stdout_json(&out);
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0]["message"], "Error querying data");
  assert!(!lines[0]["error"].as_str().unwrap().is_empty());
}

#[test]
fn verify_does_not_create_a_missing_store() {
  let tmp = tempfile::tempdir().unwrap();
  let store = tmp.path().join("roster.db");

  let out = roster(tmp.path(), &store, &["verify", "HKC22CS006"]);
  assert!(!out.status.success());
  assert_eq!(stdout_json(&out)[0]["message"], "Error querying data");
  assert!(!store.exists());
}

#[test]
fn generate_then_lookups_print_only_json_on_stdout() {
  let tmp = tempfile::tempdir().unwrap();
  let store = tmp.path().join("roster.db");
  let class = write_roster(tmp.path());

  let out = roster(
    tmp.path(),
    &store,
    &["generate", "--roster", class.to_str().unwrap()],
  );
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
  assert_eq!(
    roster_qr::decode(&tmp.path().join("artifacts").join("HKC22CS006.png")).unwrap(),
    "https://verify.example/HKC22CS006"
  );

  let out = roster(tmp.path(), &store, &["verify", "HKC22CS006"]);
  assert!(out.status.success());
  assert_eq!(
    stdout_json(&out),
    [serde_json::json!({ "message": "Student found", "name": "Ann Mary Binoy" })]
  );

  let out = roster(tmp.path(), &store, &["verify", "HKC22CS999"]);
  assert!(out.status.success());
  assert_eq!(
    stdout_json(&out),
    [serde_json::json!({ "message": "Student not found." })]
  );

  let out = roster(tmp.path(), &store, &["list"]);
  assert!(out.status.success());
  let records = stdout_json(&out);
  assert_eq!(records.len(), 2);
  assert_eq!(records[1]["student_id"], "HKC22CE013");

  // Log lines go to stderr; a clean audit prints nothing on stdout.
  let out = roster(tmp.path(), &store, &["audit"]);
  assert!(out.status.success());
  assert!(stdout_json(&out).is_empty());
  assert!(!out.stderr.is_empty());
}

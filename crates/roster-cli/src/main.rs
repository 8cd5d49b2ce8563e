//! `roster` — generate, register, and verify student QR codes.
//!
//! Reads `roster.toml` (or the path given with `--config`) plus the
//! environment, opens the SQLite registry, and runs one subcommand.
//!
//! ```
//! BASE_URL=https://verify.example/ STORE_URI=roster.db roster generate
//! roster verify HKC22CS006
//! ```

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use roster_cli::{Enroller, RosterConfig, audit, roster};
use roster_core::{
  store::StudentRegistry,
  student::DuplicatePolicy,
  verify::{VerifyOutcome, verify},
};
use roster_qr::{ArtifactConfig, ArtifactGenerator};
use roster_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Student verification QR roster")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Generate an artifact and register a record for every roster entry.
  Generate {
    /// CSV roster with `name,student_id` columns; defaults to the built-in list.
    #[arg(long, value_name = "FILE")]
    roster: Option<PathBuf>,

    /// Override the configured duplicate policy (`allow` or `reject`).
    #[arg(long)]
    duplicate_policy: Option<DuplicatePolicy>,
  },
  /// Look a student up by identifier and print the result as JSON.
  Verify { student_id: String },
  /// Print every registered record as one JSON object per line.
  List,
  /// Check that every record's artifact exists and decodes to its URL.
  Audit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let cfg = RosterConfig::load(&cli.config).context("failed to load configuration")?;

  let generator = ArtifactGenerator::new(ArtifactConfig::new(cfg.artifact_dir.clone()));

  match cli.command {
    Command::Generate { roster: roster_path, duplicate_policy } => {
      let store = SqliteStore::open(&cfg.store_path)
        .await
        .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?
        .with_duplicate_policy(duplicate_policy.unwrap_or(cfg.duplicate_policy));

      let entries = match &roster_path {
        Some(path) => roster::load_csv(path)
          .with_context(|| format!("failed to read roster {}", path.display()))?,
        None => roster::default_roster(),
      };

      let enroller = Enroller::new(generator, store, cfg.base_url.clone())
        .stop_on_artifact_error(cfg.stop_on_artifact_error);
      let report = enroller.run(&entries).await;

      for failure in &report.failures {
        eprintln!(
          "{} ({}): {:?} failed: {}",
          failure.student_id, failure.name, failure.stage, failure.error
        );
      }
      println!(
        "registered {} of {} students, {} failed, {} skipped",
        report.registered.len(),
        entries.len(),
        report.failures.len(),
        report.skipped
      );

      Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }

    Command::Verify { student_id } => {
      // Opening the registry is part of the lookup: a failure is reported as
      // an outcome, and a missing file is never created.
      let outcome = match SqliteStore::open_existing(&cfg.store_path).await {
        Ok(store) => verify(&store, &student_id).await,
        Err(e) => {
          tracing::warn!(store_path = ?cfg.store_path, error = %e, "failed to open store");
          VerifyOutcome::Error { error: e.to_string() }
        }
      };
      println!("{}", serde_json::to_string(&outcome)?);
      Ok(match outcome {
        VerifyOutcome::Error { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
      })
    }

    Command::List => {
      let store = open_existing(&cfg).await?;
      let records = store.list_students().await.context("failed to list students")?;
      for record in &records {
        println!("{}", serde_json::to_string(record)?);
      }
      Ok(ExitCode::SUCCESS)
    }

    Command::Audit => {
      let store = open_existing(&cfg).await?;
      let issues = audit::audit(&store, &generator)
        .await
        .context("failed to read registry")?;
      for issue in &issues {
        println!("{}", serde_json::to_string(issue)?);
      }
      tracing::info!(issues = issues.len(), "audit complete");
      Ok(if issues.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
  }
}

/// Open the configured registry for reading without creating it.
async fn open_existing(cfg: &RosterConfig) -> anyhow::Result<SqliteStore> {
  SqliteStore::open_existing(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))
}

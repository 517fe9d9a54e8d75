//! Vulnfix driver.
//!
//! Walks a source tree, runs the [`Engine`](vulnfix_rules::Engine) over
//! every `.java` file in parallel, and writes the results to the same
//! relative paths under a target root. Per-file problems are collected in
//! the [`RemediationSummary`]; only an unusable source root ends the run.

mod config;
mod error;
mod summary;
mod walk;

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use vulnfix_rules::{Engine, RuleReport};

pub use config::{Config, UnparsablePolicy};
pub use error::{DriverError, FileError};
pub use summary::{FileFailure, RemediationSummary};

use summary::Outcome;
use walk::{SourceFile, SourceKind};

/// Remediate `source` into `target` with the default configuration.
pub fn remediate(source: &Path, target: &Path) -> Result<RemediationSummary, DriverError> {
    remediate_with(source, target, &Config::default())
}

/// Remediate every file under `source` into `target`.
#[tracing::instrument(skip_all, fields(source = %source.display(), target = %target.display()))]
pub fn remediate_with(
    source: &Path,
    target: &Path,
    config: &Config,
) -> Result<RemediationSummary, DriverError> {
    let files = walk::collect(source)?;
    let engine = Engine::new(config.rules.clone());
    let run = || {
        files
            .par_iter()
            .map(|file| process(&engine, source, target, file, config))
            .collect::<Vec<_>>()
    };
    let outcomes = match config.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(run),
        None => run(),
    };

    let mut summary = RemediationSummary::default();
    for (file, outcome) in files.iter().zip(outcomes) {
        summary.record(&file.relative, outcome);
    }
    tracing::info!(
        processed = summary.files_processed,
        failed = summary.files_failed,
        copied = summary.files_copied,
        "remediation finished"
    );
    Ok(summary)
}

fn process(
    engine: &Engine,
    source: &Path,
    target: &Path,
    file: &SourceFile,
    config: &Config,
) -> Outcome {
    let from = source.join(&file.relative);
    let to = target.join(&file.relative);
    match file.kind {
        SourceKind::Other if !config.copy_other => Outcome::Ignored,
        SourceKind::Other => match copy(&from, &to) {
            Ok(()) => Outcome::Copied,
            Err(error) => Outcome::Failed {
                error,
                copied: false,
            },
        },
        SourceKind::Java => match remediate_file(engine, &from, &to) {
            Ok(report) => Outcome::Remediated(report),
            Err(error) => {
                tracing::warn!(error = %error, "file not remediated");
                let copied = matches!(error, FileError::Parse { .. })
                    && config.unparsable == UnparsablePolicy::Copy
                    && copy(&from, &to)
                        .inspect_err(|err| tracing::warn!(error = %err, "copy failed"))
                        .is_ok();
                Outcome::Failed { error, copied }
            }
        },
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(from = %from.display()))]
fn remediate_file(engine: &Engine, from: &Path, to: &Path) -> Result<RuleReport, FileError> {
    let text = fs::read_to_string(from).map_err(|source| FileError::Read {
        path: from.to_path_buf(),
        source,
    })?;
    let remediated = engine
        .remediate_source(&text)
        .map_err(|source| FileError::Parse {
            path: from.to_path_buf(),
            source,
        })?;
    write_creating_parents(to, |to| fs::write(to, &remediated.text))?;
    tracing::info!(
        path = %from.display(),
        rewrites = remediated.report.total_rewrites(),
        "remediated"
    );
    Ok(remediated.report)
}

fn copy(from: &Path, to: &Path) -> Result<(), FileError> {
    write_creating_parents(to, |to| fs::copy(from, to).map(drop))
}

/// Run `write` on `to` after creating its parent directories. Creation is
/// idempotent, so concurrent workers may race on a shared parent.
fn write_creating_parents(
    to: &Path,
    write: impl FnOnce(&Path) -> std::io::Result<()>,
) -> Result<(), FileError> {
    let wrap = |source| FileError::Write {
        path: to.to_path_buf(),
        source,
    };
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    write(to).map_err(wrap)
}

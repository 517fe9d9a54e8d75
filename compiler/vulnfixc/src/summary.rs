//! Batch results.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use vulnfix_rules::RuleReport;

use crate::error::{DriverError, FileError};

/// One thing that went wrong with one file.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FileFailure {
    /// Relative to the source root.
    pub path: PathBuf,
    /// `read`, `parse`, `write`, or the id of a rule that failed.
    pub stage: String,
    pub message: String,
}

/// What happened to one file.
#[derive(Debug)]
pub(crate) enum Outcome {
    Remediated(RuleReport),
    Copied,
    Ignored,
    Failed { error: FileError, copied: bool },
}

/// Totals for a whole run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RemediationSummary {
    /// Java files rewritten into the target tree.
    pub files_processed: usize,
    /// Files that could not be read, parsed, or written.
    pub files_failed: usize,
    /// Files copied through unchanged, including unparsable ones when
    /// the policy asks for it.
    pub files_copied: usize,
    /// File and rule failures, in path order.
    pub failures: Vec<FileFailure>,
    /// Rewrite counts summed over every processed file.
    pub rules: RuleReport,
}

impl RemediationSummary {
    pub(crate) fn record(&mut self, path: &Path, outcome: Outcome) {
        match outcome {
            Outcome::Remediated(report) => {
                self.files_processed += 1;
                self.rules.merge_counts(&report);
                self.failures
                    .extend(report.failures.into_iter().map(|failure| FileFailure {
                        path: path.to_path_buf(),
                        stage: failure.stage,
                        message: failure.message,
                    }));
            }
            Outcome::Copied => self.files_copied += 1,
            Outcome::Ignored => {}
            Outcome::Failed { error, copied } => {
                self.files_failed += 1;
                if copied {
                    self.files_copied += 1;
                }
                self.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    stage: error.stage().to_string(),
                    message: error.to_string(),
                });
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.files_failed == 0
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_report(&self, path: &Path) -> Result<(), DriverError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| DriverError::Report {
            path: path.to_path_buf(),
            source,
        })
    }
}

//! Listing the files under a source root.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::DriverError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SourceKind {
    Java,
    Other,
}

/// A regular file, relative to the source root.
#[derive(Clone, Debug)]
pub(crate) struct SourceFile {
    pub relative: PathBuf,
    pub kind: SourceKind,
}

/// Every regular file under `root`, in file-name order. Entries that
/// cannot be read are logged and left out.
pub(crate) fn collect(root: &Path) -> Result<Vec<SourceFile>, DriverError> {
    let meta = fs::metadata(root).map_err(|source| DriverError::SourceRoot {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(DriverError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let kind = if relative.extension().is_some_and(|ext| ext == "java") {
            SourceKind::Java
        } else {
            SourceKind::Other
        };
        files.push(SourceFile {
            relative: relative.to_path_buf(),
            kind,
        });
    }
    Ok(files)
}

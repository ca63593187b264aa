//! Recursive discovery of TICK alert definition files.
//!
//! Walks a root directory; any plain file whose name contains the `.tick`
//! marker is an alert candidate, and its identifier is the file name with
//! every occurrence of the marker removed. Identifiers key the remote task
//! registry, so empty and duplicate identifiers are rejected up front.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File-name marker identifying an alert definition file. The marker may
/// appear anywhere in the name, not just as a trailing extension.
pub const TICK_MARKER: &str = ".tick";

/// One discovered alert file: the remote task identifier and the local path
/// its body is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertFile {
    pub id: String,
    pub path: PathBuf,
}

/// Errors that can occur during alert file discovery.
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("failed to walk alert directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("file name of {path:?} normalizes to an empty identifier")]
    EmptyIdentifier { path: PathBuf },

    #[error("files {first:?} and {second:?} both normalize to identifier {id:?}")]
    DuplicateIdentifier {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Walk `root` and return every alert file, in sorted path order.
///
/// The ordering carries no reconciliation semantics; it only makes reports
/// and tests deterministic.
pub fn discover_alerts(root: &Path) -> Result<Vec<AlertFile>, DiscoverError> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut alerts = Vec::new();

    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if !name.contains(TICK_MARKER) {
            continue;
        }

        let id = name.replace(TICK_MARKER, "");
        if id.is_empty() {
            return Err(DiscoverError::EmptyIdentifier {
                path: entry.path().to_path_buf(),
            });
        }
        if let Some(first) = seen.insert(id.clone(), entry.path().to_path_buf()) {
            return Err(DiscoverError::DuplicateIdentifier {
                id,
                first,
                second: entry.path().to_path_buf(),
            });
        }

        tracing::debug!(id = %id, path = %entry.path().display(), "found alert file");
        alerts.push(AlertFile {
            id,
            path: entry.path().to_path_buf(),
        });
    }

    Ok(alerts)
}

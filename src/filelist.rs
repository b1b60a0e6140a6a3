//! Header file-list reader
//!
//! File lists are JSON documents produced by build systems:
//!
//! ```json
//! {
//!   "version": "3",
//!   "headers": [
//!     { "type": "public", "path": "/S/Foo.framework/Headers/Foo.h" },
//!     { "type": "project", "path": "/S/src/impl.h", "language": "c" }
//!   ]
//! }
//! ```
//!
//! Versions "1" through "3" share the same header shape; extra keys such
//! as `language` are accepted and ignored.

use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::header::{HeaderRecord, VisibilityClass};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const SUPPORTED_VERSIONS: [&str; 3] = ["1", "2", "3"];

#[derive(Debug, Deserialize)]
struct FileList {
    version: String,
    headers: Vec<FileListEntry>,
}

#[derive(Debug, Deserialize)]
struct FileListEntry {
    #[serde(rename = "type")]
    kind: EntryKind,
    path: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Public,
    Private,
    Project,
}

impl From<EntryKind> for VisibilityClass {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Public => VisibilityClass::Public,
            EntryKind::Private => VisibilityClass::Private,
            EntryKind::Project => VisibilityClass::Project,
        }
    }
}

/// Parse one file list document, appending its headers to `headers`
pub fn parse_headers(
    contents: &str,
    origin: &Path,
    headers: &mut Vec<HeaderRecord>,
) -> Result<(), ResolveError> {
    let invalid = |reason: String| ResolveError::InvalidFileList {
        path: origin.display().to_string(),
        reason,
    };

    let list: FileList = serde_json::from_str(contents).map_err(|e| invalid(e.to_string()))?;

    if !SUPPORTED_VERSIONS.contains(&list.version.as_str()) {
        return Err(invalid(format!(
            "unsupported version '{}' (expected one of {})",
            list.version,
            SUPPORTED_VERSIONS.join(", ")
        )));
    }

    for entry in list.headers {
        if entry.path.as_os_str().is_empty() {
            return Err(invalid("header entry with empty path".to_string()));
        }
        headers.push(HeaderRecord::new(entry.path, entry.kind.into()));
    }
    Ok(())
}

/// Load every file list in order into one base header sequence
pub fn load_headers<F: FileSystem + ?Sized>(
    fs: &F,
    lists: &[PathBuf],
) -> Result<Vec<HeaderRecord>, ResolveError> {
    let mut headers = Vec::new();

    for list in lists {
        let contents = fs
            .read_to_string(list)
            .map_err(|e| ResolveError::CannotOpenFile {
                path: list.display().to_string(),
                reason: e.to_string(),
            })?;

        let before = headers.len();
        parse_headers(&contents, list, &mut headers)?;
        debug!(
            file_list = %list.display(),
            count = headers.len() - before,
            "loaded header file list"
        );
    }

    Ok(headers)
}

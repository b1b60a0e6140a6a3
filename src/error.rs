//! Fatal errors and advisory warnings raised during header resolution

use crate::header::VisibilityClass;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Fatal resolution errors; the first one aborts the pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no such {class} header file: '{path}'")]
    MissingFile { path: String, class: VisibilityClass },

    #[error("no such {class} header file to exclude: '{path}'")]
    NoSuchHeaderFile { path: String, class: VisibilityClass },

    #[error("no such {class} umbrella header file: '{path}'")]
    NoSuchUmbrellaHeader { path: String, class: VisibilityClass },

    #[error("cannot open file '{path}': {reason}")]
    CannotOpenFile { path: String, reason: String },

    #[error("invalid header file list '{path}': {reason}")]
    InvalidFileList { path: String, reason: String },
}

/// Advisory diagnostics; reported but never abort resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    GlobDidNotMatch {
        pattern: String,
        class: VisibilityClass,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::GlobDidNotMatch { pattern, class } => {
                write!(f, "{} glob '{}' did not match any header file", class, pattern)
            }
        }
    }
}

//! Base header sequence assembly
//!
//! Appends additive ("extra") headers to the file-list headers. Extra
//! headers are processed Public, Private, then Project. No deduplication
//! happens here: the same file may appear more than once, even under
//! different classes.

use crate::directives::ClassedPaths;
use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::header::{HeaderRecord, VisibilityClass};
use crate::include_name::IncludeNamer;
use std::path::Path;
use tracing::{debug, warn};

/// Accumulates header records from a base list and additive directives
pub struct HeaderSetBuilder<'a, F: FileSystem + ?Sized, N: IncludeNamer + ?Sized> {
    fs: &'a F,
    namer: &'a N,
}

impl<'a, F: FileSystem + ?Sized, N: IncludeNamer + ?Sized> HeaderSetBuilder<'a, F, N> {
    pub fn new(fs: &'a F, namer: &'a N) -> Self {
        Self { fs, namer }
    }

    /// Build the working sequence from `base` plus every effective extra header
    pub fn build(
        &self,
        base: Vec<HeaderRecord>,
        additive: &ClassedPaths,
    ) -> Result<Vec<HeaderRecord>, ResolveError> {
        let mut headers = base;
        self.append_extras(&mut headers, additive)?;
        Ok(headers)
    }

    /// Append extras to `headers` in place, leaving already-added records on failure
    pub fn append_extras(
        &self,
        headers: &mut Vec<HeaderRecord>,
        additive: &ClassedPaths,
    ) -> Result<(), ResolveError> {
        if !additive.effective(VisibilityClass::Unspecified).is_empty() {
            warn!("ignoring extra headers without a visibility class");
        }

        for class in VisibilityClass::CONCRETE {
            for entry in additive.effective(class) {
                let path = Path::new(entry);
                if !self.fs.is_file(path) {
                    return Err(ResolveError::MissingFile {
                        path: entry.clone(),
                        class,
                    });
                }

                let full_path = self.fs.make_absolute(path);
                let include_name = self.namer.include_name(&full_path);
                debug!(
                    path = %full_path.display(),
                    %class,
                    include_name = include_name.as_deref().unwrap_or(""),
                    "adding extra header"
                );
                headers.push(HeaderRecord::extra(full_path, class, include_name));
            }
        }

        Ok(())
    }
}

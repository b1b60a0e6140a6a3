//! Exclusion of headers by glob or literal path
//!
//! Excluded headers stay in the sequence with their `is_excluded` flag set;
//! the sequence length never changes. Globs match against the header path
//! string, literal paths match by file identity so that a symlink and its
//! target are treated as the same header.

use crate::directives::Directive;
use crate::error::{ResolveError, Warning};
use crate::fs::{FileId, FileSystem};
use crate::glob::{GlobError, PathGlob};
use crate::header::HeaderRecord;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Applies exclusion directives to a header sequence
pub struct ExclusionResolver<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
}

/// Exclusion directives compiled into their two matching mechanisms
#[derive(Debug, Default)]
struct CompiledExclusions {
    globs: Vec<PathGlob>,
    files: HashSet<FileId>,
}

impl<'a, F: FileSystem + ?Sized> ExclusionResolver<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Flag every header matched by `directives`
    ///
    /// Returns one [`Warning::GlobDidNotMatch`] per glob that matched nothing.
    /// Fails with [`ResolveError::NoSuchHeaderFile`] when a literal directive
    /// names no existing file; in that case no header is flagged.
    pub fn resolve(
        &self,
        headers: &mut [HeaderRecord],
        directives: &[Directive],
    ) -> Result<Vec<Warning>, ResolveError> {
        let mut compiled = self.compile(directives)?;

        for header in headers.iter_mut() {
            // Every glob sees every header so each one records its own hit
            let mut hit = false;
            for glob in compiled.globs.iter_mut() {
                hit |= glob.matches(header);
            }
            if hit {
                debug!(path = %header.path().display(), "excluded by glob");
                header.set_excluded();
            }
        }

        if !compiled.files.is_empty() {
            for header in headers.iter_mut() {
                let Some(id) = self.fs.file_id(header.path()) else {
                    continue;
                };
                if compiled.files.contains(&id) {
                    debug!(path = %header.path().display(), "excluded by path");
                    header.set_excluded();
                }
            }
        }

        let warnings: Vec<Warning> = compiled
            .globs
            .iter()
            .filter(|g| !g.did_match())
            .map(|g| Warning::GlobDidNotMatch {
                pattern: g.pattern().to_string(),
                class: g.visibility(),
            })
            .collect();
        for glob in compiled.globs.iter().filter(|g| !g.did_match()) {
            debug!(pattern = glob.pattern(), class = %glob.visibility(), "glob matched no header");
        }

        Ok(warnings)
    }

    fn compile(&self, directives: &[Directive]) -> Result<CompiledExclusions, ResolveError> {
        let mut compiled = CompiledExclusions::default();

        for directive in directives {
            match PathGlob::create(&directive.pattern, directive.class) {
                Ok(glob) => compiled.globs.push(glob),
                Err(err) => {
                    if let GlobError::InvalidPattern { .. } = err {
                        debug!(pattern = %directive.pattern, error = %err, "falling back to literal path");
                    }
                    let id = self
                        .literal_file_id(&directive.pattern)
                        .ok_or_else(|| ResolveError::NoSuchHeaderFile {
                            path: directive.pattern.clone(),
                            class: directive.class,
                        })?;
                    compiled.files.insert(id);
                }
            }
        }

        Ok(compiled)
    }

    fn literal_file_id(&self, pattern: &str) -> Option<FileId> {
        let path = Path::new(pattern);
        if !self.fs.is_file(path) {
            return None;
        }
        self.fs.file_id(path)
    }
}

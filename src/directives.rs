//! Per-class header directives
//!
//! A directive list exists per visibility class and comes from one of two
//! places: defaults seeded by configuration, or an explicit list supplied on
//! the command line. Presence of an explicit list (even an empty one)
//! replaces the defaults for that class.

use crate::error::ResolveError;
use crate::fs::FileSystem;
use crate::header::VisibilityClass;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// One path-or-glob directive with the class it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub pattern: String,
    pub class: VisibilityClass,
}

impl Directive {
    pub fn new(pattern: impl Into<String>, class: VisibilityClass) -> Self {
        Self {
            pattern: pattern.into(),
            class,
        }
    }
}

/// Path-or-glob lists keyed by visibility class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassedPaths {
    defaults: BTreeMap<VisibilityClass, Vec<String>>,
    explicit: BTreeMap<VisibilityClass, Vec<String>>,
}

impl ClassedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the default list for `class`, used unless an explicit list is set
    pub fn seed_defaults<I, S>(&mut self, class: VisibilityClass, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults
            .insert(class, paths.into_iter().map(Into::into).collect());
        self
    }

    /// Set the explicit list for `class`, replacing any defaults
    pub fn set<I, S>(&mut self, class: VisibilityClass, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.explicit
            .insert(class, paths.into_iter().map(Into::into).collect());
        self
    }

    /// Whether an explicit list was supplied for `class`
    pub fn is_explicit(&self, class: VisibilityClass) -> bool {
        self.explicit.contains_key(&class)
    }

    /// The list in effect for `class`
    pub fn effective(&self, class: VisibilityClass) -> &[String] {
        self.explicit
            .get(&class)
            .or_else(|| self.defaults.get(&class))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Classes that have any list at all, in processing order
    pub fn classes(&self) -> Vec<VisibilityClass> {
        let mut classes: Vec<_> = self
            .defaults
            .keys()
            .chain(self.explicit.keys())
            .copied()
            .collect();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Every effective directive, classes in processing order
    pub fn directives(&self) -> Vec<Directive> {
        self.classes()
            .into_iter()
            .flat_map(|class| {
                self.effective(class)
                    .iter()
                    .map(move |p| Directive::new(p.clone(), class))
            })
            .collect()
    }

    /// Replace every directory entry with the sorted header files beneath it
    ///
    /// The result carries only explicit lists, one per class seen here.
    pub fn expand_directories<F: FileSystem + ?Sized>(
        &self,
        fs: &F,
    ) -> Result<ClassedPaths, ResolveError> {
        let mut expanded = ClassedPaths::new();

        for class in self.classes() {
            let mut paths = Vec::new();
            for entry in self.effective(class) {
                let path = Path::new(entry);
                if !fs.is_dir(path) {
                    paths.push(entry.clone());
                    continue;
                }

                let headers =
                    fs.enumerate_headers(path)
                        .map_err(|e| ResolveError::CannotOpenFile {
                            path: entry.clone(),
                            reason: e.to_string(),
                        })?;
                debug!(directory = %entry, %class, count = headers.len(), "expanded header directory");
                paths.extend(headers.into_iter().map(|h| h.to_string_lossy().into_owned()));
            }
            expanded.set(class, paths);
        }

        Ok(expanded)
    }
}

//! Path globs for header directives
//!
//! Supports:
//! - `?` matches exactly one character
//! - `*` matches any run of characters within one path component
//! - `**` as a whole component matches zero or more complete components
//!
//! Every other character matches itself. Patterns are anchored at both ends,
//! so they are written against absolute header paths
//! (e.g. `**/PrivateHeaders/*_Internal.h`).

use crate::header::{HeaderRecord, VisibilityClass};
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlobError {
    /// The directive has no `*` wildcard and denotes a literal path
    #[error("not a glob: '{0}'")]
    NotAGlob(String),

    #[error("invalid glob '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled glob directive restricted to one visibility class
#[derive(Debug, Clone)]
pub struct PathGlob {
    pattern: String,
    visibility: VisibilityClass,
    rule: Regex,
    matched: bool,
}

impl PathGlob {
    /// Compile `pattern` for headers of class `visibility`
    ///
    /// Fails with [`GlobError::NotAGlob`] when the pattern contains no `*`,
    /// in which case callers treat it as a literal file path.
    pub fn create(pattern: &str, visibility: VisibilityClass) -> Result<Self, GlobError> {
        let source = glob_to_regex(pattern)?;
        let rule = Regex::new(&source).map_err(|source| GlobError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            visibility,
            rule,
            matched: false,
        })
    }

    /// Whether `pattern` would compile as a glob rather than a literal path
    pub fn is_glob(pattern: &str) -> bool {
        pattern.contains('*')
    }

    /// Test a header against this glob, remembering a successful match
    pub fn matches(&mut self, header: &HeaderRecord) -> bool {
        if !self.visibility.admits(header.visibility()) {
            return false;
        }

        let hit = self.rule.is_match(&header.path_str());
        if hit {
            self.matched = true;
        }
        hit
    }

    /// Test a raw path, ignoring class and without touching `did_match`
    pub fn matches_path(&self, path: &str) -> bool {
        self.rule.is_match(path)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn visibility(&self) -> VisibilityClass {
        self.visibility
    }

    pub fn did_match(&self) -> bool {
        self.matched
    }
}

/// Translate a glob into an anchored regular expression
fn glob_to_regex(glob: &str) -> Result<String, GlobError> {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 2);
    let mut wildcards = 0usize;
    let mut i = 0;

    out.push('^');
    while i < chars.len() {
        match chars[i] {
            '?' => {
                out.push('.');
                i += 1;
            }
            '*' => {
                let prev = i.checked_sub(1).map(|p| chars[p]);
                let start = i;
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                wildcards += i - start;
                let next = chars.get(i).copied();

                let whole_component =
                    i - start > 1 && prev.map_or(true, |c| c == '/') && next.map_or(true, |c| c == '/');
                if whole_component {
                    if next.is_some() {
                        // `**/` also owns its trailing separator
                        out.push_str("(?:[^/]*/)*");
                        i += 1;
                    } else {
                        out.push_str(".*");
                    }
                } else {
                    out.push_str("[^/]*");
                }
            }
            c => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
                i += 1;
            }
        }
    }
    out.push('$');

    if wildcards == 0 {
        return Err(GlobError::NotAGlob(glob.to_string()));
    }
    Ok(out)
}

//! Classified header records
//!
//! A `HeaderRecord` is one entry of the ordered header sequence that flows
//! through the resolution pipeline. Records are never removed once created:
//! exclusion and umbrella designation only flip flags, and umbrella
//! promotion only swaps positions.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Visibility class of a header
///
/// Ordering follows processing order: `Public < Private < Project`.
/// `Unspecified` only appears on directives, where it matches any class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum VisibilityClass {
    Public,
    Private,
    Project,
    Unspecified,
}

impl VisibilityClass {
    /// Classes a real header can carry, in processing order
    pub const CONCRETE: [VisibilityClass; 3] = [
        VisibilityClass::Public,
        VisibilityClass::Private,
        VisibilityClass::Project,
    ];

    /// Whether a directive tagged with `self` applies to a header of class `other`
    pub fn admits(self, other: VisibilityClass) -> bool {
        self == VisibilityClass::Unspecified || self == other
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisibilityClass::Public => "public",
            VisibilityClass::Private => "private",
            VisibilityClass::Project => "project",
            VisibilityClass::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for VisibilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths that are not valid UTF-8 are written with replacement characters
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// A classified header in the resolution sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderRecord {
    /// Absolute file path
    #[serde(serialize_with = "serialize_path_lossy")]
    path: PathBuf,

    /// Visibility class, fixed at creation
    visibility: VisibilityClass,

    /// Spelling a consumer would use to include this header
    #[serde(skip_serializing_if = "Option::is_none")]
    include_name: Option<String>,

    /// Injected through an additive directive rather than a file list
    is_extra: bool,

    /// Flagged by an exclusion directive; consumers must skip it
    is_excluded: bool,

    /// Designated umbrella header for its class
    is_umbrella: bool,
}

impl HeaderRecord {
    /// Create a record for a header coming from a file list
    pub fn new(path: impl Into<PathBuf>, visibility: VisibilityClass) -> Self {
        debug_assert!(
            visibility != VisibilityClass::Unspecified,
            "headers must carry a concrete visibility class"
        );
        Self {
            path: path.into(),
            visibility,
            include_name: None,
            is_extra: false,
            is_excluded: false,
            is_umbrella: false,
        }
    }

    /// Create a record injected through an additive directive
    pub fn extra(
        path: impl Into<PathBuf>,
        visibility: VisibilityClass,
        include_name: Option<String>,
    ) -> Self {
        Self {
            include_name,
            is_extra: true,
            ..Self::new(path, visibility)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn visibility(&self) -> VisibilityClass {
        self.visibility
    }

    pub fn include_name(&self) -> Option<&str> {
        self.include_name.as_deref()
    }

    pub fn is_extra(&self) -> bool {
        self.is_extra
    }

    pub fn is_excluded(&self) -> bool {
        self.is_excluded
    }

    pub fn is_umbrella(&self) -> bool {
        self.is_umbrella
    }

    pub(crate) fn set_excluded(&mut self) {
        self.is_excluded = true;
    }

    pub(crate) fn set_umbrella(&mut self) {
        self.is_umbrella = true;
    }

    /// Path as a string for pattern matching (lossy on non-UTF-8 paths)
    pub(crate) fn path_str(&self) -> std::borrow::Cow<'_, str> {
        self.path.to_string_lossy()
    }
}

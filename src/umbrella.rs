//! Umbrella header designation
//!
//! Each visibility class may have one umbrella header: either named
//! explicitly, or inferred from the framework name
//! (`/<Name>.h` for public, `/<Name>Private.h` or `/<Name>_Private.h` for
//! private). The umbrella header is moved to the front of the sequence,
//! behind any umbrella headers already promoted, so that after resolving
//! Public, Private, then Project the front cluster follows class order.
//!
//! When several headers of a class match, only the first is designated.
//! Later matches are left alone without a diagnostic.

use crate::error::ResolveError;
use crate::header::{HeaderRecord, VisibilityClass};
use regex::Regex;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Finds and promotes umbrella headers
#[derive(Debug, Clone, Default)]
pub struct UmbrellaResolver {
    framework_name: Option<String>,
}

impl UmbrellaResolver {
    /// `framework_name` enables convention-based inference; empty means unknown
    pub fn new(framework_name: Option<&str>) -> Self {
        Self {
            framework_name: framework_name
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        }
    }

    /// Resolve every concrete class in order Public, Private, Project
    ///
    /// Returns the final index of each designated umbrella header.
    pub fn resolve(
        &self,
        headers: &mut [HeaderRecord],
        explicit: &BTreeMap<VisibilityClass, String>,
    ) -> Result<Vec<(VisibilityClass, usize)>, ResolveError> {
        let mut designated = Vec::new();

        for class in VisibilityClass::CONCRETE {
            let path = explicit.get(&class).map(String::as_str);
            if let Some(index) = self.resolve_class(headers, class, path)? {
                designated.push((class, index));
            }
        }

        Ok(designated)
    }

    /// Designate the umbrella header for one class
    ///
    /// An explicit path that matches nothing is an error; failing to infer
    /// an umbrella from the framework name is not.
    pub fn resolve_class(
        &self,
        headers: &mut [HeaderRecord],
        class: VisibilityClass,
        explicit: Option<&str>,
    ) -> Result<Option<usize>, ResolveError> {
        if let Some(path) = explicit.filter(|p| !p.is_empty()) {
            return literal_rule(path)
                .and_then(|rule| mark_and_promote(headers, &rule, class))
                .map(Some)
                .ok_or_else(|| ResolveError::NoSuchUmbrellaHeader {
                    path: path.to_string(),
                    class,
                });
        }

        let Some(name) = self.framework_name.as_deref() else {
            return Ok(None);
        };
        let Some(rule) = convention_rule(name, class) else {
            return Ok(None);
        };

        let found = mark_and_promote(headers, &rule, class);
        if found.is_none() {
            debug!(framework = name, %class, "no umbrella header found by convention");
        }
        Ok(found)
    }
}

/// Exact-text rule for an explicitly named umbrella header
fn literal_rule(path: &str) -> Option<Regex> {
    Regex::new(&regex::escape(path)).ok()
}

/// Naming convention rule for `class`; project headers have none
fn convention_rule(framework_name: &str, class: VisibilityClass) -> Option<Regex> {
    let name = regex::escape(framework_name);
    let source = match class {
        VisibilityClass::Public => format!(r"/{}\.h$", name),
        VisibilityClass::Private => format!(r"/{}_?Private\.h$", name),
        VisibilityClass::Project | VisibilityClass::Unspecified => return None,
    };
    Regex::new(&source).ok()
}

/// Mark the first header of `class` matching `rule` and move it forward
///
/// The header swaps places with the first header that is not already an
/// umbrella, if that one sits earlier in the sequence.
fn mark_and_promote(
    headers: &mut [HeaderRecord],
    rule: &Regex,
    class: VisibilityClass,
) -> Option<usize> {
    let found = headers
        .iter()
        .position(|h| h.visibility() == class && rule.is_match(&h.path_str()))?;
    headers[found].set_umbrella();

    let front = headers.iter().position(|h| !h.is_umbrella());
    let index = match front {
        Some(front) if front < found => {
            headers.swap(front, found);
            front
        }
        _ => found,
    };

    info!(
        path = %headers[index].path().display(),
        %class,
        from = found,
        to = index,
        "designated umbrella header"
    );
    Some(index)
}

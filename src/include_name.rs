//! Include-name derivation for injected headers
//!
//! Maps an absolute header path to the spelling a client would write in an
//! `#include` directive:
//! - `/usr/local/include/foo/bar.h` -> `foo/bar.h`
//! - `/S/Foo.framework/Headers/Bar.h` -> `Foo/Bar.h`
//! - `/S/Foo.framework/PrivateHeaders/Bar_Private.h` -> `Foo/Bar_Private.h`

use regex::Regex;
use std::path::Path;

const INCLUDE_DIR: &str = "/include/";

/// Service mapping a header path to its public include spelling
pub trait IncludeNamer {
    fn include_name(&self, path: &Path) -> Option<String>;
}

/// Derives include names from `include/` and framework directory layouts
#[derive(Debug, Clone)]
pub struct ConventionalIncludeNamer {
    framework_rule: Regex,
}

impl ConventionalIncludeNamer {
    pub fn new() -> Self {
        Self {
            framework_rule: Regex::new(r"/([^/]+)\.framework/(?:Private)?Headers/(.+)$")
                .expect("framework include rule is a valid regex"),
        }
    }
}

impl Default for ConventionalIncludeNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl IncludeNamer for ConventionalIncludeNamer {
    fn include_name(&self, path: &Path) -> Option<String> {
        let path = path.to_string_lossy();

        if let Some(pos) = path.find(INCLUDE_DIR) {
            return Some(path[pos + INCLUDE_DIR.len()..].to_string());
        }

        let caps = self.framework_rule.captures(&path)?;
        Some(format!("{}/{}", &caps[1], &caps[2]))
    }
}

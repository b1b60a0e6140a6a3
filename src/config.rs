//! Resolver defaults loaded from TOML
//!
//! Lets a project keep its framework identity and standing header
//! directives in a file instead of repeating them on every invocation.
//!
//! # Example TOML
//! ```toml
//! install_name = "/System/Library/Frameworks/Foo.framework/Versions/A/Foo"
//! dynamic_library = false
//!
//! [extra]
//! public = ["include/FooCompat.h"]
//!
//! [exclude]
//! project = ["**/internal/*.h"]
//!
//! [umbrella]
//! public = "Foo.h"
//! ```
//!
//! Extra and exclude lists are defaults: a command-line directive for the
//! same class replaces them.

use crate::header::VisibilityClass;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-class directive lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassLists {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Vec<String>>,
}

impl ClassLists {
    /// Lists that are present, in class order
    pub fn iter(&self) -> impl Iterator<Item = (VisibilityClass, &Vec<String>)> {
        [
            (VisibilityClass::Public, self.public.as_ref()),
            (VisibilityClass::Private, self.private.as_ref()),
            (VisibilityClass::Project, self.project.as_ref()),
        ]
        .into_iter()
        .filter_map(|(class, list)| list.map(|l| (class, l)))
    }
}

/// Explicit umbrella header per class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UmbrellaPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl UmbrellaPaths {
    pub fn iter(&self) -> impl Iterator<Item = (VisibilityClass, &String)> {
        [
            (VisibilityClass::Public, self.public.as_ref()),
            (VisibilityClass::Private, self.private.as_ref()),
            (VisibilityClass::Project, self.project.as_ref()),
        ]
        .into_iter()
        .filter_map(|(class, path)| path.map(|p| (class, p)))
    }
}

/// Resolver configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Install name of the library; a `.framework` path enables umbrella inference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_name: Option<String>,

    /// The library is a plain dylib, never a framework
    #[serde(default)]
    pub dynamic_library: bool,

    /// Default extra headers
    #[serde(default)]
    pub extra: ClassLists,

    /// Default exclusion paths and globs
    #[serde(default)]
    pub exclude: ClassLists,

    /// Default umbrella headers
    #[serde(default)]
    pub umbrella: UmbrellaPaths,
}

impl ResolverConfig {
    /// Load and validate a configuration file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ResolverConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.install_name {
            if name.trim().is_empty() {
                return Err("install_name must not be empty".to_string());
            }
        }

        for (class, path) in self.umbrella.iter() {
            if path.trim().is_empty() {
                return Err(format!("{} umbrella header must not be empty", class));
            }
        }

        for (section, lists) in [("extra", &self.extra), ("exclude", &self.exclude)] {
            for (class, entries) in lists.iter() {
                if entries.iter().any(|e| e.trim().is_empty()) {
                    return Err(format!("{}.{} contains an empty path", section, class));
                }
            }
        }

        Ok(())
    }
}

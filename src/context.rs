//! Resolution pipeline orchestration
//!
//! Runs directory expansion, extra-header injection, exclusion, and umbrella
//! designation in that order. The first fatal error stops the pipeline; the
//! caller receives a [`ResolutionFailure`] that still carries the partially
//! built sequence, so a partial result can never be mistaken for success.

use crate::builder::HeaderSetBuilder;
use crate::config::ResolverConfig;
use crate::directives::{ClassedPaths, Directive};
use crate::error::{ResolveError, Warning};
use crate::exclusion::ExclusionResolver;
use crate::fs::FileSystem;
use crate::header::{HeaderRecord, VisibilityClass};
use crate::include_name::{ConventionalIncludeNamer, IncludeNamer};
use crate::install_name;
use crate::umbrella::UmbrellaResolver;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{info, info_span};

/// Pipeline stage that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Directives,
    Build,
    Exclude,
    Umbrella,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Directives => "directives",
            Stage::Build => "build",
            Stage::Exclude => "exclude",
            Stage::Umbrella => "umbrella",
        };
        f.write_str(name)
    }
}

/// Successfully resolved header set
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Ordered headers; excluded ones are kept and flagged
    pub headers: Vec<HeaderRecord>,

    /// Advisory diagnostics
    pub warnings: Vec<Warning>,
}

impl Resolution {
    /// Headers a downstream consumer should process, in order
    pub fn included(&self) -> impl Iterator<Item = &HeaderRecord> {
        self.headers.iter().filter(|h| !h.is_excluded())
    }

    /// The umbrella header designated for `class`, if any
    pub fn umbrella(&self, class: VisibilityClass) -> Option<&HeaderRecord> {
        self.headers
            .iter()
            .find(|h| h.is_umbrella() && h.visibility() == class)
    }
}

/// A resolution that stopped at its first fatal error
#[derive(Debug, Clone)]
pub struct ResolutionFailure {
    pub error: ResolveError,
    pub stage: Stage,

    /// Sequence as it stood when the error occurred
    pub partial: Vec<HeaderRecord>,

    /// Warnings raised before the error
    pub warnings: Vec<Warning>,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage failed: {}", self.stage, self.error)
    }
}

impl std::error::Error for ResolutionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Header set resolution for one tool invocation
pub struct ResolutionContext<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    namer: Box<dyn IncludeNamer + 'a>,
    framework_name: Option<String>,
    extra: ClassedPaths,
    exclude: ClassedPaths,
    umbrella: BTreeMap<VisibilityClass, String>,
}

impl<'a, F: FileSystem + ?Sized> ResolutionContext<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            namer: Box::new(ConventionalIncludeNamer::new()),
            framework_name: None,
            extra: ClassedPaths::new(),
            exclude: ClassedPaths::new(),
            umbrella: BTreeMap::new(),
        }
    }

    /// Seed a context from configuration file defaults
    pub fn from_config(config: &ResolverConfig, fs: &'a F) -> Self {
        let mut ctx = Self::new(fs);
        if let Some(install_name) = &config.install_name {
            ctx.framework_name =
                install_name::framework_name(install_name, config.dynamic_library);
        }
        for (class, paths) in config.extra.iter() {
            ctx.extra.seed_defaults(class, paths.iter().cloned());
        }
        for (class, paths) in config.exclude.iter() {
            ctx.exclude.seed_defaults(class, paths.iter().cloned());
        }
        for (class, path) in config.umbrella.iter() {
            ctx.umbrella.insert(class, path.clone());
        }
        ctx
    }

    pub fn with_include_namer(mut self, namer: impl IncludeNamer + 'a) -> Self {
        self.namer = Box::new(namer);
        self
    }

    /// Use `name` for umbrella inference; `None` or empty disables it
    pub fn with_framework_name(mut self, name: Option<&str>) -> Self {
        self.framework_name = name.filter(|n| !n.is_empty()).map(str::to_string);
        self
    }

    /// Derive the framework name from an install name
    pub fn with_install_name(mut self, install_name: &str, is_dylib: bool) -> Self {
        self.framework_name = install_name::framework_name(install_name, is_dylib);
        self
    }

    /// Explicit extra headers for `class`, replacing configured defaults
    pub fn with_extra_headers<I, S>(mut self, class: VisibilityClass, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.set(class, paths);
        self
    }

    /// Explicit exclusions for `class`, replacing configured defaults
    pub fn with_exclusions<I, S>(mut self, class: VisibilityClass, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.set(class, patterns);
        self
    }

    pub fn with_umbrella(mut self, class: VisibilityClass, path: impl Into<String>) -> Self {
        self.umbrella.insert(class, path.into());
        self
    }

    pub fn framework_name(&self) -> Option<&str> {
        self.framework_name.as_deref()
    }

    /// Run the full pipeline over `base`
    pub fn resolve(&self, base: Vec<HeaderRecord>) -> Result<Resolution, ResolutionFailure> {
        let _span = info_span!("resolve_headers", base = base.len()).entered();
        let mut headers = base;
        let mut warnings = Vec::new();

        macro_rules! bail_at {
            ($stage:expr, $result:expr) => {
                match $result {
                    Ok(value) => value,
                    Err(error) => {
                        return Err(ResolutionFailure {
                            error,
                            stage: $stage,
                            partial: headers,
                            warnings,
                        })
                    }
                }
            };
        }

        let extra = bail_at!(Stage::Directives, self.extra.expand_directories(self.fs));
        let exclude = bail_at!(Stage::Directives, self.exclude.expand_directories(self.fs));

        let builder = HeaderSetBuilder::new(self.fs, self.namer.as_ref());
        bail_at!(Stage::Build, builder.append_extras(&mut headers, &extra));

        let directives: Vec<Directive> = exclude.directives();
        let exclusion = ExclusionResolver::new(self.fs);
        let unmatched = bail_at!(Stage::Exclude, exclusion.resolve(&mut headers, &directives));
        warnings.extend(unmatched);

        let umbrella = UmbrellaResolver::new(self.framework_name.as_deref());
        let designated = bail_at!(Stage::Umbrella, umbrella.resolve(&mut headers, &self.umbrella));

        info!(
            headers = headers.len(),
            excluded = headers.iter().filter(|h| h.is_excluded()).count(),
            umbrellas = designated.len(),
            warnings = warnings.len(),
            "header set resolved"
        );
        Ok(Resolution { headers, warnings })
    }
}

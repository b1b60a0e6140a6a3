//! CLI argument parsing for headerset

use crate::header::VisibilityClass;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the resolved header set
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One header per line (default)
    Text,
    /// JSON document with headers and warnings
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "headerset")]
#[command(version)]
#[command(about = "Resolve the header set and umbrella headers of a library", long_about = None)]
pub struct Cli {
    /// JSON header file lists, processed in order
    #[arg(value_name = "FILELIST")]
    pub file_lists: Vec<PathBuf>,

    /// Add a public header (file or directory)
    #[arg(long = "extra-public-header", value_name = "PATH")]
    pub extra_public: Option<Vec<String>>,

    /// Add a private header (file or directory)
    #[arg(long = "extra-private-header", value_name = "PATH")]
    pub extra_private: Option<Vec<String>>,

    /// Add a project header (file or directory)
    #[arg(long = "extra-project-header", value_name = "PATH")]
    pub extra_project: Option<Vec<String>>,

    /// Exclude public headers by path, directory, or glob
    #[arg(long = "exclude-public-header", value_name = "PATH|GLOB")]
    pub exclude_public: Option<Vec<String>>,

    /// Exclude private headers by path, directory, or glob
    #[arg(long = "exclude-private-header", value_name = "PATH|GLOB")]
    pub exclude_private: Option<Vec<String>>,

    /// Exclude project headers by path, directory, or glob
    #[arg(long = "exclude-project-header", value_name = "PATH|GLOB")]
    pub exclude_project: Option<Vec<String>>,

    /// Public umbrella header
    #[arg(long = "public-umbrella-header", value_name = "PATH")]
    pub public_umbrella: Option<String>,

    /// Private umbrella header
    #[arg(long = "private-umbrella-header", value_name = "PATH")]
    pub private_umbrella: Option<String>,

    /// Project umbrella header
    #[arg(long = "project-umbrella-header", value_name = "PATH")]
    pub project_umbrella: Option<String>,

    /// Library install name, used to infer umbrella headers
    #[arg(long = "install-name", value_name = "NAME")]
    pub install_name: Option<String>,

    /// The library is a plain dynamic library, not a framework
    #[arg(long = "dynamiclib")]
    pub dynamiclib: bool,

    /// TOML file with default directives
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// List excluded headers in text output
    #[arg(long = "include-excluded")]
    pub include_excluded: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Extra-header lists given on the command line, per class
    pub fn extra_headers(&self) -> Vec<(VisibilityClass, &Vec<String>)> {
        per_class(&self.extra_public, &self.extra_private, &self.extra_project)
    }

    /// Exclusion lists given on the command line, per class
    pub fn exclusions(&self) -> Vec<(VisibilityClass, &Vec<String>)> {
        per_class(
            &self.exclude_public,
            &self.exclude_private,
            &self.exclude_project,
        )
    }

    /// Umbrella paths given on the command line, per class
    pub fn umbrellas(&self) -> Vec<(VisibilityClass, &String)> {
        [
            (VisibilityClass::Public, self.public_umbrella.as_ref()),
            (VisibilityClass::Private, self.private_umbrella.as_ref()),
            (VisibilityClass::Project, self.project_umbrella.as_ref()),
        ]
        .into_iter()
        .filter_map(|(class, path)| path.map(|p| (class, p)))
        .collect()
    }
}

fn per_class<'a>(
    public: &'a Option<Vec<String>>,
    private: &'a Option<Vec<String>>,
    project: &'a Option<Vec<String>>,
) -> Vec<(VisibilityClass, &'a Vec<String>)> {
    [
        (VisibilityClass::Public, public.as_ref()),
        (VisibilityClass::Private, private.as_ref()),
        (VisibilityClass::Project, project.as_ref()),
    ]
    .into_iter()
    .filter_map(|(class, list)| list.map(|l| (class, l)))
    .collect()
}

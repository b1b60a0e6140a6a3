//! headerset - header set resolution for text-based API surface generation
//!
//! This library turns file lists plus extra, exclude, and umbrella header
//! directives into one ordered, classified header sequence ready for a
//! compiler front end. Excluded headers stay in the sequence with a flag set,
//! and umbrella headers are moved to the front in Public, Private, Project
//! order.

pub mod builder;
pub mod cli;
pub mod config;
pub mod context;
pub mod directives;
pub mod error;
pub mod exclusion;
pub mod filelist;
pub mod fs;
pub mod glob;
pub mod header;
pub mod include_name;
pub mod install_name;
pub mod output;
pub mod umbrella;

pub use context::{Resolution, ResolutionContext, ResolutionFailure, Stage};
pub use error::{ResolveError, Warning};
pub use header::{HeaderRecord, VisibilityClass};

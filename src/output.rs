//! Rendering of a resolved header set
//!
//! Text output lists one header per line:
//!
//! ```text
//! public	/S/Foo.framework/Headers/Foo.h [umbrella]
//! project	/S/src/extra.h [extra]
//! ```
//!
//! JSON output serializes the whole [`Resolution`], excluded headers included.

use crate::context::Resolution;
use serde::Serialize;
use std::fmt::Write as _;

/// Render as tab-separated text; excluded headers only when `include_excluded`
pub fn render_text(resolution: &Resolution, include_excluded: bool) -> String {
    let mut out = String::new();

    for header in &resolution.headers {
        if header.is_excluded() && !include_excluded {
            continue;
        }

        let _ = write!(out, "{}\t{}", header.visibility(), header.path().display());
        if header.is_umbrella() {
            out.push_str(" [umbrella]");
        }
        if header.is_extra() {
            out.push_str(" [extra]");
        }
        if header.is_excluded() {
            out.push_str(" [excluded]");
        }
        out.push('\n');
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    framework: Option<&'a str>,
    #[serde(flatten)]
    resolution: &'a Resolution,
}

/// Render as pretty-printed JSON
pub fn render_json(resolution: &Resolution, framework: Option<&str>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        framework,
        resolution,
    })
}

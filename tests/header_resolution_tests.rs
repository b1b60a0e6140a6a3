//! End-to-end header resolution over real file trees
//!
//! Covers the ordering, exclusion, and umbrella guarantees the downstream
//! compile stage relies on.

use headerset::fs::HostFileSystem;
use headerset::umbrella::UmbrellaResolver;
use headerset::{
    filelist, HeaderRecord, ResolutionContext, ResolveError, Stage, VisibilityClass, Warning,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A framework bundle on disk with a file list describing it
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(files: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "#pragma once\n").unwrap();
        }
        Self { dir }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    fn arg(&self, rel: &str) -> String {
        self.path(rel).to_string_lossy().into_owned()
    }

    fn file_list(&self, entries: &[(&str, &str)]) -> PathBuf {
        let headers: Vec<_> = entries
            .iter()
            .map(|(kind, rel)| serde_json::json!({ "type": kind, "path": self.path(rel) }))
            .collect();
        let list = serde_json::json!({ "version": "3", "headers": headers });
        let path = self.dir.path().join("headers.json");
        fs::write(&path, serde_json::to_string_pretty(&list).unwrap()).unwrap();
        path
    }
}

fn rel_paths(fx: &Fixture, headers: &[HeaderRecord]) -> Vec<String> {
    headers
        .iter()
        .map(|h| {
            h.path()
                .strip_prefix(fx.dir.path())
                .unwrap_or(h.path())
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn test_public_umbrella_scenario_order() {
    let fx = Fixture::new(&["a.h", "b.h", "c.h"]);
    let base = vec![
        HeaderRecord::new(fx.path("a.h"), VisibilityClass::Public),
        HeaderRecord::new(fx.path("b.h"), VisibilityClass::Private),
        HeaderRecord::new(fx.path("c.h"), VisibilityClass::Public),
    ];

    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_umbrella(VisibilityClass::Public, fx.arg("c.h"))
        .resolve(base)
        .unwrap();

    assert_eq!(rel_paths(&fx, &resolution.headers), vec!["c.h", "b.h", "a.h"]);
    assert!(resolution.headers[0].is_umbrella());
}

#[test]
fn test_file_list_to_resolution() {
    let fx = Fixture::new(&[
        "Foo.framework/Headers/Foo.h",
        "Foo.framework/Headers/Bar.h",
        "Foo.framework/Headers/Internal/Detail.h",
        "Foo.framework/PrivateHeaders/Foo_Private.h",
        "src/impl.h",
    ]);
    let list = fx.file_list(&[
        ("public", "Foo.framework/Headers/Bar.h"),
        ("public", "Foo.framework/Headers/Internal/Detail.h"),
        ("project", "src/impl.h"),
        ("private", "Foo.framework/PrivateHeaders/Foo_Private.h"),
        ("public", "Foo.framework/Headers/Foo.h"),
    ]);

    let host = HostFileSystem::new();
    let base = filelist::load_headers(&host, &[list]).unwrap();
    let resolution = ResolutionContext::new(&host)
        .with_install_name(
            &fx.arg("Frameworks/Foo.framework/Versions/A/Foo"),
            false,
        )
        .with_exclusions(VisibilityClass::Public, ["**/Internal/*.h"])
        .resolve(base)
        .unwrap();

    assert_eq!(
        rel_paths(&fx, &resolution.headers),
        vec![
            "Foo.framework/Headers/Foo.h",
            "Foo.framework/PrivateHeaders/Foo_Private.h",
            "src/impl.h",
            "Foo.framework/Headers/Internal/Detail.h",
            "Foo.framework/Headers/Bar.h",
        ]
    );
    assert!(resolution.headers[3].is_excluded());
    assert_eq!(resolution.included().count(), 4);
    assert!(resolution.warnings.is_empty());
}

#[cfg(unix)]
#[test]
fn test_literal_exclusion_through_symlink() {
    let fx = Fixture::new(&["Headers/Real.h", "Headers/Other.h"]);
    std::os::unix::fs::symlink(fx.path("Headers"), fx.path("Alias")).unwrap();

    let base = vec![
        HeaderRecord::new(fx.path("Headers/Real.h"), VisibilityClass::Public),
        HeaderRecord::new(fx.path("Headers/Other.h"), VisibilityClass::Public),
    ];
    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_exclusions(VisibilityClass::Public, [fx.arg("Alias/Real.h")])
        .resolve(base)
        .unwrap();

    assert!(resolution.headers[0].is_excluded());
    assert!(!resolution.headers[1].is_excluded());
    assert_eq!(resolution.headers.len(), 2);
}

#[test]
fn test_empty_explicit_private_extras_replace_default() {
    let fx = Fixture::new(&["PrivateHeaders/Default_Private.h", "Headers/Pub.h"]);
    let config: headerset::config::ResolverConfig = toml::from_str(&format!(
        "[extra]\nprivate = ['{}']\npublic = ['{}']\n",
        fx.arg("PrivateHeaders/Default_Private.h"),
        fx.arg("Headers/Pub.h"),
    ))
    .unwrap();

    let host = HostFileSystem::new();
    let defaults_only = ResolutionContext::from_config(&config, &host)
        .resolve(Vec::new())
        .unwrap();
    assert_eq!(
        defaults_only
            .headers
            .iter()
            .filter(|h| h.visibility() == VisibilityClass::Private)
            .count(),
        1
    );

    let replaced = ResolutionContext::from_config(&config, &host)
        .with_extra_headers(VisibilityClass::Private, Vec::<String>::new())
        .resolve(Vec::new())
        .unwrap();
    assert_eq!(
        replaced
            .headers
            .iter()
            .filter(|h| h.visibility() == VisibilityClass::Private)
            .count(),
        0
    );
    assert_eq!(replaced.headers.len(), 1);
}

#[test]
fn test_missing_extra_header_reports_path_and_class() {
    let fx = Fixture::new(&["a.h"]);
    let host = HostFileSystem::new();
    let failure = ResolutionContext::new(&host)
        .with_extra_headers(VisibilityClass::Private, [fx.arg("missing.h")])
        .resolve(vec![HeaderRecord::new(fx.path("a.h"), VisibilityClass::Public)])
        .unwrap_err();

    assert_eq!(failure.stage, Stage::Build);
    assert_eq!(
        failure.error,
        ResolveError::MissingFile {
            path: fx.arg("missing.h"),
            class: VisibilityClass::Private,
        }
    );
    assert_eq!(failure.partial.len(), 1);
}

#[test]
fn test_missing_exclusion_literal_fails() {
    let fx = Fixture::new(&["a.h"]);
    let host = HostFileSystem::new();
    let failure = ResolutionContext::new(&host)
        .with_exclusions(VisibilityClass::Project, [fx.arg("gone.h")])
        .resolve(vec![HeaderRecord::new(fx.path("a.h"), VisibilityClass::Project)])
        .unwrap_err();

    assert_eq!(failure.stage, Stage::Exclude);
    assert!(matches!(
        failure.error,
        ResolveError::NoSuchHeaderFile {
            class: VisibilityClass::Project,
            ..
        }
    ));
}

#[test]
fn test_exclusion_directory_expands_to_literals() {
    let fx = Fixture::new(&["inc/a.h", "inc/sub/b.h", "other/c.h"]);
    let base = vec![
        HeaderRecord::new(fx.path("inc/a.h"), VisibilityClass::Project),
        HeaderRecord::new(fx.path("other/c.h"), VisibilityClass::Project),
        HeaderRecord::new(fx.path("inc/sub/b.h"), VisibilityClass::Project),
    ];

    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_exclusions(VisibilityClass::Project, [fx.arg("inc")])
        .resolve(base)
        .unwrap();

    let excluded: Vec<_> = resolution.headers.iter().map(|h| h.is_excluded()).collect();
    assert_eq!(excluded, vec![true, false, true]);
}

#[cfg(unix)]
#[test]
fn test_extra_directory_with_dangling_symlink() {
    let fx = Fixture::new(&["inc/a.h"]);
    std::os::unix::fs::symlink(fx.path("inc/gone.h"), fx.path("inc/stale.h")).unwrap();

    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_extra_headers(VisibilityClass::Public, [fx.arg("inc")])
        .resolve(Vec::new())
        .unwrap();

    assert_eq!(rel_paths(&fx, &resolution.headers), vec!["inc/a.h"]);
}

#[test]
fn test_unmatched_glob_warning_only_for_idle_globs() {
    let fx = Fixture::new(&["Headers/A.h"]);
    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_exclusions(VisibilityClass::Public, ["**/A.h", "**/Nope*.h"])
        .with_exclusions(VisibilityClass::Private, ["**/A.h"])
        .resolve(vec![HeaderRecord::new(fx.path("Headers/A.h"), VisibilityClass::Public)])
        .unwrap();

    assert_eq!(
        resolution.warnings,
        vec![
            Warning::GlobDidNotMatch {
                pattern: "**/Nope*.h".to_string(),
                class: VisibilityClass::Public,
            },
            Warning::GlobDidNotMatch {
                pattern: "**/A.h".to_string(),
                class: VisibilityClass::Private,
            },
        ]
    );
}

#[test]
fn test_umbrella_rerun_keeps_order() {
    let mut headers = vec![
        HeaderRecord::new("/S/x.h", VisibilityClass::Project),
        HeaderRecord::new("/S/Foo.framework/PrivateHeaders/FooPrivate.h", VisibilityClass::Private),
        HeaderRecord::new("/S/Foo.framework/Headers/Foo.h", VisibilityClass::Public),
        HeaderRecord::new("/S/proj.h", VisibilityClass::Project),
    ];
    let mut explicit = BTreeMap::new();
    explicit.insert(VisibilityClass::Project, "/S/proj.h".to_string());

    let resolver = UmbrellaResolver::new(Some("Foo"));
    resolver.resolve(&mut headers, &explicit).unwrap();
    let once = headers.clone();
    resolver.resolve(&mut headers, &explicit).unwrap();

    assert_eq!(headers, once);
    let front: Vec<_> = headers[..3].iter().map(|h| h.visibility()).collect();
    assert_eq!(
        front,
        vec![
            VisibilityClass::Public,
            VisibilityClass::Private,
            VisibilityClass::Project
        ]
    );
}

/// Known limitation: a second header matching the umbrella convention is
/// left as an ordinary header without any diagnostic.
#[test]
fn test_duplicate_umbrella_candidates_first_wins() {
    let fx = Fixture::new(&["A/Foo.h", "B/Foo.h", "c.h"]);
    let base = vec![
        HeaderRecord::new(fx.path("c.h"), VisibilityClass::Public),
        HeaderRecord::new(fx.path("A/Foo.h"), VisibilityClass::Public),
        HeaderRecord::new(fx.path("B/Foo.h"), VisibilityClass::Public),
    ];

    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_framework_name(Some("Foo"))
        .resolve(base)
        .unwrap();

    assert_eq!(rel_paths(&fx, &resolution.headers), vec!["A/Foo.h", "c.h", "B/Foo.h"]);
    assert_eq!(
        resolution.headers.iter().filter(|h| h.is_umbrella()).count(),
        1
    );
    assert!(resolution.warnings.is_empty());
}

#[test]
fn test_extra_headers_get_include_names() {
    let fx = Fixture::new(&["Foo.framework/Headers/Extra.h", "usr/include/foo/bar.h"]);
    let host = HostFileSystem::new();
    let resolution = ResolutionContext::new(&host)
        .with_extra_headers(
            VisibilityClass::Public,
            [
                fx.arg("Foo.framework/Headers/Extra.h"),
                fx.arg("usr/include/foo/bar.h"),
            ],
        )
        .resolve(Vec::new())
        .unwrap();

    let names: Vec<_> = resolution
        .headers
        .iter()
        .map(|h| h.include_name().map(str::to_string))
        .collect();
    assert_eq!(
        names,
        vec![Some("Foo/Extra.h".to_string()), Some("foo/bar.h".to_string())]
    );
    assert!(resolution.headers.iter().all(HeaderRecord::is_extra));
}

#[test]
fn test_partial_state_is_not_success() {
    let fx = Fixture::new(&["a.h"]);
    let host = HostFileSystem::new();
    let result = ResolutionContext::new(&host)
        .with_umbrella(VisibilityClass::Private, "a.h")
        .resolve(vec![HeaderRecord::new(fx.path("a.h"), VisibilityClass::Public)]);

    let failure = result.unwrap_err();
    assert_eq!(failure.stage, Stage::Umbrella);
    assert_eq!(failure.partial.len(), 1);
    assert!(!failure.partial[0].is_umbrella());
}

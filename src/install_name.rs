//! Framework name inference from a library install name

use regex::Regex;

/// Extract the framework name from an install name
///
/// `/System/Library/Frameworks/Foo.framework/Versions/A/Foo` yields `Foo`.
/// Returns `None` for plain dylibs and for install names outside a
/// `.framework` bundle.
pub fn framework_name(install_name: &str, is_dylib: bool) -> Option<String> {
    if is_dylib {
        return None;
    }

    let rule = Regex::new(r"(.+)/(.+)\.framework/").ok()?;
    let caps = rule.captures(install_name)?;
    let name = caps.get(2)?.as_str();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

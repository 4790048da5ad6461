//! Anchoring relative search paths at the build directory.
//!
//! Compiler invocations are recorded and replayed from other working
//! directories, so `-I` and `-L` tokens are rewritten before they leave the
//! backend. Paths are normalised lexically; the filesystem is never consulted.

use super::flags::{INCLUDE_PREFIX, LIBRARY_PREFIX};

/// Rewrite every `-I<path>` / `-L<path>` token to `<marker><build_dir>/<path>`
/// in normalised form. Other tokens pass through untouched.
pub fn compute_parameters_with_absolute_paths(args: &[String], build_dir: &str) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let marker = [INCLUDE_PREFIX, LIBRARY_PREFIX]
                .into_iter()
                .find(|m| arg.starts_with(*m));
            match marker {
                Some(marker) => {
                    let path = &arg[marker.len()..];
                    format!("{marker}{}", normpath(&join(build_dir, path)))
                }
                None => arg.clone(),
            }
        })
        .collect()
}

/// POSIX path join: an absolute `path` replaces `base`.
fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') || base.is_empty() {
        path.to_string()
    } else if base.ends_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Lexically normalise a POSIX path: drop `.` and empty components, resolve
/// `..` against preceding components, keep leading `..` of relative paths.
///
/// Exactly two leading slashes are kept as they are; POSIX leaves their
/// meaning to the implementation. Three or more collapse to one.
pub fn normpath(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let absolute = path.starts_with('/');
    let root = if path.starts_with("//") && !path.starts_with("///") {
        "//"
    } else {
        "/"
    };
    let mut parts: Vec<&str> = Vec::new();
    for comp in path.split('/') {
        match comp {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            _ => parts.push(comp),
        }
    }
    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("{root}{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

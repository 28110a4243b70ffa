//! Path arithmetic over `/`-separated repository paths.
//!
//! Repository paths never carry a leading or trailing slash; the empty
//! string denotes the explorer root.

/// The parent of `path`: everything before the final `/`, or the empty
/// string for root-level paths.
pub fn parent_of(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    }
}

/// The leaf name of `path`: everything after the final `/`.
pub fn leaf_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, name)) => name,
        None => path,
    }
}

/// Join `parent` and `name`. An empty parent yields `name` unchanged.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Strip the `<root>/` prefix from `path`, if present.
///
/// An empty root, or a path outside the root, is returned unchanged.
pub fn strip_root<'a>(path: &'a str, root: &str) -> &'a str {
    if root.is_empty() {
        return path;
    }
    match path.strip_prefix(root) {
        Some(rest) => rest.strip_prefix('/').unwrap_or(path),
        None => path,
    }
}

/// Re-attach the `<root>/` prefix to a root-relative `path`.
pub fn with_root(path: &str, root: &str) -> String {
    join(root, path)
}

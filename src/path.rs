//! Canonical path model for the virtual filesystem.
//!
//! Every VFS path is absolute, `/`-separated, free of `.` and `..` segments and
//! never ends with a separator, except for the root `/` itself. The functions in
//! this module are pure string manipulation and never consult the VFS.

/// The root directory of every VFS.
pub const ROOT: &str = "/";

/// Resolve `raw` against the working directory `cwd` into a canonical absolute path.
///
/// Absolute inputs ignore `cwd`. Relative inputs are joined onto it first.
/// `..` above the root stays at the root, and an empty `raw` resolves to `cwd`.
///
/// # Examples
/// ```
/// use vfs_shell::path::resolve;
/// assert_eq!(resolve("../b//c/.", "/a"), "/b/c");
/// assert_eq!(resolve("..", "/"), "/");
/// ```
pub fn resolve(raw: &str, cwd: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !raw.starts_with('/') {
        push_segments(&mut parts, cwd);
    }
    push_segments(&mut parts, raw);

    format!("/{}", parts.join("/"))
}

fn push_segments<'a>(parts: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name),
        }
    }
}

/// Parent of a canonical path, or `None` for the root.
pub fn parent(path: &str) -> Option<&str> {
    if path == ROOT {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

/// If `candidate` is a direct child of `parent`, return the child's name.
pub fn child_name<'a>(parent: &str, candidate: &'a str) -> Option<&'a str> {
    let rest = if parent == ROOT {
        candidate.strip_prefix('/')?
    } else {
        candidate.strip_prefix(parent)?.strip_prefix('/')?
    };
    if rest.is_empty() || rest.contains('/') {
        None
    } else {
        Some(rest)
    }
}

// src/watch/path_utils.rs

//! Path helpers for matching change events against the watch root.

use std::path::Path;

/// `path` relative to `root`, with forward slashes.
///
/// Tries a lexical `strip_prefix` first and falls back to canonicalizing both
/// sides, since backends (notably FSEvents on macOS) may report
/// `/private/var/...` for a root given as `/var/...`. The fallback only works
/// while `path` still exists, so a deleted file must match lexically.
pub fn relative_to(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_forward_slashes(rel));
    }

    let root_canon = root.canonicalize().ok()?;
    let path_canon = path.canonicalize().ok()?;
    path_canon
        .strip_prefix(&root_canon)
        .ok()
        .map(to_forward_slashes)
}

fn to_forward_slashes(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

/// True for a trailing `/` or `\`, whatever the host separator is.
pub fn has_trailing_separator(raw: &str) -> bool {
    raw.ends_with('/') || raw.ends_with('\\')
}

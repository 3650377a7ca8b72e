// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
///
/// Returns `None` if the path cannot be related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(slash_str(rel));
    }

    // macOS reports /private/var/... for a root given as /var/...
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(slash_str(rel));
        }
    }

    None
}

/// Pattern text for a path relative to the source.
///
/// Paths compare byte for byte. Event paths reach the ignore set through
/// `relative_str`, which converts them lossily to UTF-8, so the excluded
/// path is encoded the same way. The path on disk is left untouched.
pub fn normalize_encoding(rel: &Path) -> String {
    slash_str(rel)
}

/// Path shown to the user for a changed file.
///
/// Strips the exact `"{source}/"` prefix by length. A path that does not
/// start with it (e.g. from an extra watch dir outside the source) is shown
/// in full.
pub fn display_path(source: &Path, path: &Path) -> String {
    let source = source.to_string_lossy();
    let prefix = format!("{}/", source.trim_end_matches('/'));
    let path = path.to_string_lossy();

    if path.starts_with(&prefix) {
        path[prefix.len()..].to_string()
    } else {
        path.into_owned()
    }
}

fn slash_str(rel: &Path) -> String {
    rel.to_string_lossy().replace('\\', "/")
}

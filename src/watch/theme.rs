// src/watch/theme.rs

//! Decide whether a site's theme directory should be watched.

use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::site::{Site, Theme};

/// Path components marking a theme installed as a vendored dependency.
pub const VENDOR_MARKERS: [&str; 2] = [".bundle", "vendor"];

const THEME_TARGET: &str = "sitewatch::theme";

/// Theme root to watch for `site`, if it has a local one.
pub fn locate(site: &dyn Site) -> Option<PathBuf> {
    locate_theme(site.theme())
}

/// Returns the theme root when it lives in the project tree.
///
/// Vendored themes are read-only dependency trees and are left unwatched.
pub fn locate_theme(theme: Option<&Theme>) -> Option<PathBuf> {
    let Some((theme, root)) = theme.and_then(|t| t.root.as_ref().map(|root| (t, root))) else {
        info!(target: THEME_TARGET, "no theme found");
        return None;
    };

    if is_vendored(root) {
        info!(
            target: THEME_TARGET,
            "theme '{}' at {} is not local; copy it into your project and point theme.root at it to watch it while developing",
            theme.name,
            root.display()
        );
        return None;
    }

    info!(target: THEME_TARGET, "local theme '{}' found at {}", theme.name, root.display());
    Some(root.clone())
}

/// True if any component of `root` is a vendored-dependency marker.
pub fn is_vendored(root: &Path) -> bool {
    root.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| VENDOR_MARKERS.contains(&name)),
        _ => false,
    })
}

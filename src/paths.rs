//! Manifest location discovery.
//!
//! The store itself takes an absolute path and discovers nothing; the CLI
//! resolves that path here. Precedence: explicit `--manifest` flag, then
//! the `CM_MANIFEST` env var, then walking up from the current directory
//! looking for `.coordmap/manifest.json`.

use std::path::{Path, PathBuf};

pub const COORD_DIR: &str = ".coordmap";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const CONFIG_FILE: &str = "config.toml";

pub fn manifest_path_in(root: &Path) -> PathBuf {
    root.join(COORD_DIR).join(MANIFEST_FILE)
}

pub fn config_path_for(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(dir) => dir.join(CONFIG_FILE),
        None => PathBuf::from(CONFIG_FILE),
    }
}

/// Walk up from `start` to the first directory containing
/// `.coordmap/manifest.json`.
pub fn discover_root(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        if manifest_path_in(d).is_file() {
            return Some(d.to_path_buf());
        }
        dir = d.parent();
    }
    None
}

/// Resolve the manifest path for this invocation.
pub fn resolve_manifest(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(env) = std::env::var("CM_MANIFEST")
        && !env.trim().is_empty()
    {
        return Some(PathBuf::from(env));
    }
    let cwd = std::env::current_dir().ok()?;
    discover_root(&cwd).map(|root| manifest_path_in(&root))
}

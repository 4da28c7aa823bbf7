use std::path::PathBuf;

use super::super::print_json;
use crate::store::{ManifestStore, StoreError};
use crate::{Result, paths};

pub(crate) fn handle(manifest: Option<PathBuf>, json: bool) -> Result<()> {
    let path = match manifest {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().map_err(|source| StoreError::Io {
                path: PathBuf::from("."),
                source,
            })?;
            paths::manifest_path_in(&cwd)
        }
    };
    let store = ManifestStore::init(&path)?;
    if json {
        return print_json(&serde_json::json!({ "manifest": store.path() }));
    }
    println!("✓ Initialized manifest at {}", store.path().display());
    Ok(())
}

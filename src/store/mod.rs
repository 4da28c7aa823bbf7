//! Manifest store: the single authoritative in-memory representation of the
//! coordination manifest, with disk persistence.
//!
//! The store is an owned handle, not ambient global state: callers receive
//! it at startup and all access goes through it. One writer mutex
//! serializes `mutate`; readers clone `Arc` snapshots and observe either the
//! pre- or post-mutation state, never a partial one. A mutation is applied
//! to a cloned manifest, indices are rebuilt, the validator runs, and only
//! then is the result committed: atomically to disk, then to the cache.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::SystemTime;

use thiserror::Error;

use crate::core::Manifest;
use crate::validate::validate;
use crate::{Error, Result};

mod mutation;

pub use mutation::{Mutation, Relation};

/// Store-level failures: disk I/O and document parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

#[derive(Debug)]
struct Cache {
    snapshot: Arc<Manifest>,
    modified: Option<SystemTime>,
}

/// Handle to one manifest file.
#[derive(Debug)]
pub struct ManifestStore {
    path: PathBuf,
    validate_on_mutate: bool,
    cache: RwLock<Cache>,
    writer: Mutex<()>,
}

impl ManifestStore {
    /// Open an existing manifest. The initial load parses and validates the
    /// document; the snapshot is cached with the file's mtime.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let (manifest, modified) = load_document(&path)?;
        Ok(Self {
            path,
            validate_on_mutate: true,
            cache: RwLock::new(Cache {
                snapshot: Arc::new(manifest),
                modified,
            }),
            writer: Mutex::new(()),
        })
    }

    /// Open a manifest, creating an empty one on disk first if the file does
    /// not exist yet.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(dir) = path.parent()
                && !dir.as_os_str().is_empty()
            {
                fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
            }
            write_manifest(&path, &Manifest::new())?;
            tracing::info!(path = %path.display(), "created empty manifest");
        }
        Self::open(path)
    }

    /// Disable or re-enable validation inside `mutate` (bulk imports).
    pub fn with_validate_on_mutate(mut self, on: bool) -> Self {
        self.validate_on_mutate = on;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The last committed snapshot. Never touches the disk.
    pub fn get(&self) -> Arc<Manifest> {
        self.cache
            .read()
            .expect("manifest cache lock poisoned")
            .snapshot
            .clone()
    }

    /// Reload from disk if the file changed since the cached snapshot.
    ///
    /// Repeated calls are O(1) while the mtime is unchanged. A failed reload
    /// (missing file, bad JSON, invalid content) leaves the previous
    /// snapshot cached and usable.
    pub fn load(&self) -> Result<Arc<Manifest>> {
        let _writer = self.writer.lock().expect("manifest writer lock poisoned");
        let modified = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok();
        {
            let cache = self.cache.read().expect("manifest cache lock poisoned");
            if modified.is_some() && cache.modified == modified {
                return Ok(cache.snapshot.clone());
            }
        }
        let (manifest, modified) = load_document(&self.path)?;
        let snapshot = Arc::new(manifest);
        let mut cache = self.cache.write().expect("manifest cache lock poisoned");
        cache.snapshot = snapshot.clone();
        cache.modified = modified;
        Ok(snapshot)
    }

    /// Apply one atomic change: clone, apply, rebuild indices, validate,
    /// persist, then swap the cached snapshot. On any failure the committed
    /// state (in memory and on disk) is untouched.
    pub fn mutate(&self, mutation: Mutation) -> Result<Arc<Manifest>> {
        let _writer = self.writer.lock().expect("manifest writer lock poisoned");
        let current = self.get();
        let mut next = (*current).clone();
        mutation.apply(&mut next)?;
        next.rebuild_indexes();
        if self.validate_on_mutate {
            validate(&next)?;
        }
        write_manifest(&self.path, &next)?;
        let modified = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok();
        let snapshot = Arc::new(next);
        let mut cache = self.cache.write().expect("manifest cache lock poisoned");
        cache.snapshot = snapshot.clone();
        cache.modified = modified;
        tracing::debug!(op = ?mutation, "mutation committed");
        Ok(snapshot)
    }
}

fn load_document(path: &Path) -> Result<(Manifest, Option<SystemTime>)> {
    let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok();
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let manifest: Manifest = serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    manifest.check_version().map_err(Error::Core)?;
    validate(&manifest)?;
    Ok((manifest, modified))
}

fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(manifest).map_err(|e| StoreError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    json.push(b'\n');
    atomic_write(path, &json)
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let write_error = |reason: String| StoreError::Write {
        path: path.to_path_buf(),
        reason,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| write_error("manifest path missing parent directory".to_string()))?;
    let temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| write_error(format!("failed to create temp file in {}: {e}", dir.display())))?;
    fs::write(temp.path(), data)
        .map_err(|e| write_error(format!("failed to write manifest temp file: {e}")))?;
    temp.persist(path)
        .map_err(|e| write_error(format!("failed to persist manifest: {e}")))?;
    Ok(())
}

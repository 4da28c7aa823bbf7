//! Sync adapter: the seam between external authoring tools and the store.
//!
//! OpenSpec, Beads, and rule authors own entity creation; their events land
//! here and each one becomes exactly one `ManifestStore::mutate` call. The
//! adapter adds no semantics of its own; the store's invariants are the
//! whole contract. How events are raised (polling, git hook, CLI command)
//! is the caller's business.

use std::sync::Arc;

use crate::Result;
use crate::core::{Manifest, Rule, RuleId, Spec, SpecId, SpecStatus, Task, TaskId, TaskStatus};
use crate::store::{ManifestStore, Mutation};

pub struct SyncAdapter<'s> {
    store: &'s ManifestStore,
}

impl<'s> SyncAdapter<'s> {
    pub fn new(store: &'s ManifestStore) -> Self {
        Self { store }
    }

    pub fn on_spec_registered(&self, id: SpecId, spec: Spec) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::UpsertSpec { id, spec })
    }

    pub fn on_task_registered(&self, id: TaskId, task: Task) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::UpsertTask { id, task })
    }

    pub fn on_rule_registered(&self, id: RuleId, rule: Rule) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::UpsertRule { id, rule })
    }

    pub fn on_task_status_changed(&self, id: TaskId, status: TaskStatus) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::SetTaskStatus { id, status })
    }

    pub fn on_spec_activated(&self, id: SpecId) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::SetSpecStatus {
            id,
            status: SpecStatus::Active,
        })
    }

    pub fn on_file_written(&self, path: impl Into<String>, by: TaskId) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::RecordFileWrite {
            path: path.into(),
            by,
        })
    }

    /// Acknowledge that a file no longer exists on disk. Entries are never
    /// dropped automatically.
    pub fn on_file_removed(&self, path: impl Into<String>) -> Result<Arc<Manifest>> {
        self.store.mutate(Mutation::RemoveFile { path: path.into() })
    }
}

//! The manifest document: versioned entity maps plus derived-index rebuild.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::error::{CoreError, UnsupportedVersion};
use super::file::FileEntry;
use super::identity::{RuleId, SpecId, TaskId};
use super::rule::Rule;
use super::spec::Spec;
use super::task::Task;

/// Version written into newly created manifests.
pub const MANIFEST_VERSION: &str = "1.0.0";

/// Major version this build can read.
const SUPPORTED_MAJOR: u64 = 1;

/// The persisted coordination manifest.
///
/// `BTreeMap` keys give deterministic serialization, so the on-disk JSON is
/// stable under load/save round-trips and diffs cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub version: String,
    #[serde(default)]
    pub specs: BTreeMap<SpecId, Spec>,
    #[serde(default)]
    pub tasks: BTreeMap<TaskId, Task>,
    #[serde(default)]
    pub rules: BTreeMap<RuleId, Rule>,
    #[serde(default)]
    pub files: BTreeMap<String, FileEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            specs: BTreeMap::new(),
            tasks: BTreeMap::new(),
            rules: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }

    /// Reject manifests written by an incompatible major version.
    pub fn check_version(&self) -> Result<(), CoreError> {
        let major = self
            .version
            .split('.')
            .next()
            .and_then(|s| s.parse::<u64>().ok());
        match major {
            Some(m) if m == SUPPORTED_MAJOR => Ok(()),
            _ => Err(UnsupportedVersion {
                found: self.version.clone(),
                expected_major: SUPPORTED_MAJOR,
            }
            .into()),
        }
    }

    pub fn spec(&self, id: &SpecId) -> Option<&Spec> {
        self.specs.get(id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn file(&self, path: &str) -> Option<&FileEntry> {
        self.files.get(path)
    }

    /// Recompute every derived view from the primary relations.
    ///
    /// Derived views: each spec's `related_tasks` (from the tasks'
    /// `related_specs`) and each file's `governed_by` / `rules_applied`.
    /// Runs after every mutation, so the bidirectional and file-index
    /// invariants hold by construction for anything this process commits.
    pub fn rebuild_indexes(&mut self) {
        // Spec side of Task↔Spec. BTreeMap iteration keeps the lists sorted.
        let mut spec_tasks: BTreeMap<SpecId, Vec<TaskId>> = BTreeMap::new();
        for (task_id, task) in &self.tasks {
            for spec_id in &task.related_specs {
                spec_tasks
                    .entry(spec_id.clone())
                    .or_default()
                    .push(task_id.clone());
            }
        }
        for (spec_id, spec) in &mut self.specs {
            spec.related_tasks = spec_tasks.remove(spec_id).unwrap_or_default();
        }

        // A task output path implies a file entry exists.
        let output_paths: Vec<String> = self
            .tasks
            .values()
            .flat_map(|t| t.output_files.iter().cloned())
            .collect();
        for path in output_paths {
            self.files.entry(path).or_default();
        }

        // Pattern matching over the full file set.
        let mut computed: BTreeMap<&str, (BTreeSet<SpecId>, BTreeSet<RuleId>)> = BTreeMap::new();
        for path in self.files.keys() {
            let mut governed = BTreeSet::new();
            let mut applied = BTreeSet::new();
            for (spec_id, spec) in &self.specs {
                if spec.is_active() && spec.affects_file(path) {
                    governed.insert(spec_id.clone());
                }
            }
            for (rule_id, rule) in &self.rules {
                if rule.applies_to_file(path) {
                    applied.insert(rule_id.clone());
                }
            }
            computed.insert(path, (governed, applied));
        }

        // Direct task-output linkage.
        for task in self.tasks.values() {
            for path in &task.output_files {
                if let Some((governed, applied)) = computed.get_mut(path.as_str()) {
                    governed.extend(task.related_specs.iter().cloned());
                    applied.extend(task.related_rules.iter().cloned());
                }
            }
        }

        let computed: Vec<(String, Vec<SpecId>, Vec<RuleId>)> = computed
            .into_iter()
            .map(|(path, (governed, applied))| {
                (
                    path.to_string(),
                    governed.into_iter().collect(),
                    applied.into_iter().collect(),
                )
            })
            .collect();
        for (path, governed, applied) in computed {
            if let Some(entry) = self.files.get_mut(&path) {
                entry.governed_by = governed;
                entry.rules_applied = applied;
            }
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

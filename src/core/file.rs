//! File entry: the materialized reverse index.
//!
//! Entries are never authored. Creation/modification provenance comes from
//! `RecordFileWrite` mutations; `governed_by` / `rules_applied` are
//! recomputed from the primary relations after every mutation and must stay
//! exactly recomputable (they carry no information of their own).

use serde::{Deserialize, Serialize};

use super::identity::{RuleId, SpecId, TaskId};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FileEntry {
    /// The task whose write first produced this file.
    #[serde(default)]
    pub created_by: Option<TaskId>,
    /// Tasks that later touched the file. The creator is not repeated here.
    #[serde(default)]
    pub modified_by: Vec<TaskId>,
    /// Computed: active specs whose patterns match, plus task-output linkage.
    #[serde(default)]
    pub governed_by: Vec<SpecId>,
    /// Computed: rules whose patterns match, plus task-output linkage.
    #[serde(default)]
    pub rules_applied: Vec<RuleId>,
}

impl FileEntry {
    /// Record a write by `task`. The first recorded write sets the creator;
    /// later writes by other tasks accumulate in `modified_by` once each.
    pub fn record_write(&mut self, task: TaskId) {
        match &self.created_by {
            None if self.modified_by.is_empty() => self.created_by = Some(task),
            Some(creator) if *creator == task => {}
            _ => {
                if !self.modified_by.contains(&task) {
                    self.modified_by.push(task);
                }
            }
        }
    }
}

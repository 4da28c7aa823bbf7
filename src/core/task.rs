//! Task entity.

use serde::{Deserialize, Serialize};

use super::domain::TaskStatus;
use super::identity::{RuleId, SpecId, TaskId};

/// A registered task (authored in Beads, mirrored here).
///
/// `related_specs` and `related_rules` are the primary side of their
/// relations; the spec side is rebuilt from them, the rule side is kept in
/// lockstep by the link mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub related_specs: Vec<SpecId>,
    #[serde(default)]
    pub related_rules: Vec<RuleId>,
    /// Project-relative paths this task produced or will produce.
    #[serde(default)]
    pub output_files: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            title: title.into(),
            status,
            related_specs: Vec::new(),
            related_rules: Vec::new(),
            output_files: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn outputs_file(&self, path: &str) -> bool {
        self.output_files.iter().any(|p| p == path)
    }
}

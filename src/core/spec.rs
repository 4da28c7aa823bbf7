//! Specification entity.

use serde::{Deserialize, Serialize};

use super::domain::SpecStatus;
use super::identity::{RuleId, SpecId, TaskId};
use super::pattern::GlobPattern;

/// A registered specification (authored in OpenSpec, mirrored here).
///
/// `related_tasks` is the derived side of the Task↔Spec relation: it is
/// rebuilt from the tasks' `related_specs` lists on every mutation and
/// only exists in the document so consumers can read the manifest without
/// joining it themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Spec {
    /// Location of the spec document, project-relative.
    pub path: String,
    pub status: SpecStatus,
    #[serde(default)]
    pub related_tasks: Vec<TaskId>,
    #[serde(default)]
    pub related_rules: Vec<RuleId>,
    #[serde(default)]
    pub affected_files: Vec<GlobPattern>,
    #[serde(default)]
    pub dependencies: Vec<SpecId>,
}

impl Spec {
    pub fn new(path: impl Into<String>, status: SpecStatus) -> Self {
        Self {
            path: path.into(),
            status,
            related_tasks: Vec::new(),
            related_rules: Vec::new(),
            affected_files: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Does any `affectedFiles` pattern match this path?
    pub fn affects_file(&self, path: &str) -> bool {
        self.affected_files.iter().any(|p| p.matches(path))
    }
}

//! Rule entity.

use serde::{Deserialize, Serialize};

use super::domain::RulePriority;
use super::identity::{RuleId, SpecId, TaskId};
use super::pattern::GlobPattern;

/// Predicate deciding where a rule applies.
///
/// A rule reaches a task either through the task's own `related_rules`
/// listing or through this predicate's `tasks` list; the two are merged at
/// query time. Same for specs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AppliesTo {
    #[serde(default)]
    pub file_patterns: Vec<GlobPattern>,
    #[serde(default)]
    pub specs: Vec<SpecId>,
    #[serde(default)]
    pub tasks: Vec<TaskId>,
}

/// A rule document (coding standard, domain rule, workflow guide).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Rule {
    /// Location of the rule document, project-relative.
    pub path: String,
    #[serde(default)]
    pub applies_to: AppliesTo,
    #[serde(default)]
    pub priority: RulePriority,
}

impl Rule {
    pub fn new(path: impl Into<String>, priority: RulePriority) -> Self {
        Self {
            path: path.into(),
            applies_to: AppliesTo::default(),
            priority,
        }
    }

    pub fn applies_to_task(&self, id: &TaskId) -> bool {
        self.applies_to.tasks.contains(id)
    }

    pub fn applies_to_spec(&self, id: &SpecId) -> bool {
        self.applies_to.specs.contains(id)
    }

    /// Does any `filePatterns` pattern match this path?
    pub fn applies_to_file(&self, path: &str) -> bool {
        self.applies_to.file_patterns.iter().any(|p| p.matches(path))
    }
}

//! Atomic manifest changes.
//!
//! A `Mutation` is one change applied to a cloned manifest; the store
//! rebuilds derived indices and validates before anything is committed.
//! Symmetric relation edits go through `Link`/`Unlink` so both sides are
//! written in the same atomic step, and entity removal prunes every edge
//! that pointed at the removed entity.

use serde::{Deserialize, Serialize};

use crate::core::{
    Manifest, Rule, RuleId, Spec, SpecId, SpecStatus, Task, TaskId, TaskStatus, check_file_path,
};
use crate::validate::{EntityRef, ValidationError};

/// A symmetric relation edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relation {
    TaskSpec { task: TaskId, spec: SpecId },
    TaskRule { task: TaskId, rule: RuleId },
    SpecRule { spec: SpecId, rule: RuleId },
}

/// One atomic change to the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    UpsertSpec { id: SpecId, spec: Spec },
    UpsertTask { id: TaskId, task: Task },
    UpsertRule { id: RuleId, rule: Rule },
    RemoveSpec { id: SpecId },
    RemoveTask { id: TaskId },
    RemoveRule { id: RuleId },
    SetSpecStatus { id: SpecId, status: SpecStatus },
    SetTaskStatus { id: TaskId, status: TaskStatus },
    Link { relation: Relation },
    Unlink { relation: Relation },
    AddTaskDependency { task: TaskId, on: TaskId },
    RemoveTaskDependency { task: TaskId, on: TaskId },
    AddSpecDependency { spec: SpecId, on: SpecId },
    RemoveSpecDependency { spec: SpecId, on: SpecId },
    RecordFileWrite { path: String, by: TaskId },
    RemoveFile { path: String },
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}

fn remove_item<T: PartialEq>(list: &mut Vec<T>, item: &T) {
    list.retain(|x| x != item);
}

impl Mutation {
    /// Apply this change to a candidate manifest. Targets that do not exist
    /// are reported as dangling references; invariants the change may break
    /// are the validator's job, after the derived indices are rebuilt.
    pub(crate) fn apply(&self, m: &mut Manifest) -> Result<(), ValidationError> {
        match self {
            Mutation::UpsertSpec { id, spec } => {
                m.specs.insert(id.clone(), spec.clone());
            }
            Mutation::UpsertTask { id, task } => {
                m.tasks.insert(id.clone(), task.clone());
            }
            Mutation::UpsertRule { id, rule } => {
                m.rules.insert(id.clone(), rule.clone());
            }

            Mutation::RemoveSpec { id } => {
                if m.specs.remove(id).is_none() {
                    return Err(missing_spec("remove", id));
                }
                for task in m.tasks.values_mut() {
                    remove_item(&mut task.related_specs, id);
                }
                for rule in m.rules.values_mut() {
                    remove_item(&mut rule.applies_to.specs, id);
                }
                for spec in m.specs.values_mut() {
                    remove_item(&mut spec.dependencies, id);
                }
            }
            Mutation::RemoveTask { id } => {
                if m.tasks.remove(id).is_none() {
                    return Err(missing_task("remove", id));
                }
                for task in m.tasks.values_mut() {
                    remove_item(&mut task.dependencies, id);
                }
                for rule in m.rules.values_mut() {
                    remove_item(&mut rule.applies_to.tasks, id);
                }
                for entry in m.files.values_mut() {
                    if entry.created_by.as_ref() == Some(id) {
                        entry.created_by = None;
                    }
                    remove_item(&mut entry.modified_by, id);
                }
            }
            Mutation::RemoveRule { id } => {
                if m.rules.remove(id).is_none() {
                    return Err(missing_rule("remove", id));
                }
                for task in m.tasks.values_mut() {
                    remove_item(&mut task.related_rules, id);
                }
                for spec in m.specs.values_mut() {
                    remove_item(&mut spec.related_rules, id);
                }
            }

            Mutation::SetSpecStatus { id, status } => match m.specs.get_mut(id) {
                Some(spec) => spec.status = *status,
                None => return Err(missing_spec("setStatus", id)),
            },
            Mutation::SetTaskStatus { id, status } => match m.tasks.get_mut(id) {
                Some(task) => task.status = *status,
                None => return Err(missing_task("setStatus", id)),
            },

            Mutation::Link { relation } => apply_link(m, relation, true)?,
            Mutation::Unlink { relation } => apply_link(m, relation, false)?,

            Mutation::AddTaskDependency { task, on } => {
                if !m.tasks.contains_key(on) {
                    return Err(missing_task("dependencies", on));
                }
                match m.tasks.get_mut(task) {
                    Some(t) => push_unique(&mut t.dependencies, on.clone()),
                    None => return Err(missing_task("dependencies", task)),
                }
            }
            Mutation::RemoveTaskDependency { task, on } => match m.tasks.get_mut(task) {
                Some(t) => remove_item(&mut t.dependencies, on),
                None => return Err(missing_task("dependencies", task)),
            },
            Mutation::AddSpecDependency { spec, on } => {
                if !m.specs.contains_key(on) {
                    return Err(missing_spec("dependencies", on));
                }
                match m.specs.get_mut(spec) {
                    Some(s) => push_unique(&mut s.dependencies, on.clone()),
                    None => return Err(missing_spec("dependencies", spec)),
                }
            }
            Mutation::RemoveSpecDependency { spec, on } => match m.specs.get_mut(spec) {
                Some(s) => remove_item(&mut s.dependencies, on),
                None => return Err(missing_spec("dependencies", spec)),
            },

            Mutation::RecordFileWrite { path, by } => {
                check_file_path(path).map_err(|e| ValidationError::MissingField {
                    problems: vec![e.to_string()],
                })?;
                if !m.tasks.contains_key(by) {
                    return Err(missing_task("fileWrite", by));
                }
                m.files.entry(path.clone()).or_default().record_write(by.clone());
            }
            Mutation::RemoveFile { path } => {
                if m.files.remove(path).is_none() {
                    return Err(ValidationError::missing_ref(
                        EntityRef::File(path.clone()),
                        "remove",
                        EntityRef::File(path.clone()),
                    ));
                }
                for task in m.tasks.values_mut() {
                    task.output_files.retain(|p| p != path);
                }
            }
        }
        Ok(())
    }
}

fn apply_link(m: &mut Manifest, relation: &Relation, link: bool) -> Result<(), ValidationError> {
    match relation {
        Relation::TaskSpec { task, spec } => {
            if !m.specs.contains_key(spec) {
                return Err(missing_spec("relatedSpecs", spec));
            }
            let Some(t) = m.tasks.get_mut(task) else {
                return Err(missing_task("relatedSpecs", task));
            };
            // Spec side is derived; the rebuild mirrors this edit.
            if link {
                push_unique(&mut t.related_specs, spec.clone());
            } else {
                remove_item(&mut t.related_specs, spec);
            }
        }
        Relation::TaskRule { task, rule } => {
            let Some(r) = m.rules.get_mut(rule) else {
                return Err(missing_rule("relatedRules", rule));
            };
            let Some(t) = m.tasks.get_mut(task) else {
                return Err(missing_task("relatedRules", task));
            };
            if link {
                push_unique(&mut t.related_rules, rule.clone());
                push_unique(&mut r.applies_to.tasks, task.clone());
            } else {
                remove_item(&mut t.related_rules, rule);
                remove_item(&mut r.applies_to.tasks, task);
            }
        }
        Relation::SpecRule { spec, rule } => {
            let Some(r) = m.rules.get_mut(rule) else {
                return Err(missing_rule("relatedRules", rule));
            };
            let Some(s) = m.specs.get_mut(spec) else {
                return Err(missing_spec("relatedRules", spec));
            };
            if link {
                push_unique(&mut s.related_rules, rule.clone());
                push_unique(&mut r.applies_to.specs, spec.clone());
            } else {
                remove_item(&mut s.related_rules, rule);
                remove_item(&mut r.applies_to.specs, spec);
            }
        }
    }
    Ok(())
}

fn missing_spec(field: &'static str, id: &SpecId) -> ValidationError {
    ValidationError::missing_ref(EntityRef::Spec(id.clone()), field, EntityRef::Spec(id.clone()))
}

fn missing_task(field: &'static str, id: &TaskId) -> ValidationError {
    ValidationError::missing_ref(EntityRef::Task(id.clone()), field, EntityRef::Task(id.clone()))
}

fn missing_rule(field: &'static str, id: &RuleId) -> ValidationError {
    ValidationError::missing_ref(EntityRef::Rule(id.clone()), field, EntityRef::Rule(id.clone()))
}

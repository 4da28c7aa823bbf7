//! Read-only queries over a manifest snapshot.
//!
//! Every function here is a pure function of the `&Manifest` it is given:
//! no I/O, no mutation, no hidden state. That is what keeps the documented
//! performance bound (under 100 ms at ~100 specs / ~500 tasks / ~1000
//! files) trivially true: everything is in-memory map and set work.
//!
//! Absence is a normal outcome, not a fault: querying an unknown id or
//! path returns an empty result.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::{Manifest, Rule, RuleId, Spec, SpecId, Task, TaskId};

/// Specs with `status == active`.
pub fn active_specs(manifest: &Manifest) -> Vec<(&SpecId, &Spec)> {
    manifest
        .specs
        .iter()
        .filter(|(_, spec)| spec.is_active())
        .collect()
}

/// Tasks a spec lists in `relatedTasks`, resolved through the task map.
pub fn tasks_for_spec<'m>(manifest: &'m Manifest, id: &SpecId) -> Vec<(&'m TaskId, &'m Task)> {
    let Some(spec) = manifest.spec(id) else {
        return Vec::new();
    };
    spec.related_tasks
        .iter()
        .filter_map(|tid| manifest.tasks.get_key_value(tid))
        .collect()
}

/// Rules reaching a task: its own `relatedRules` listing merged with rules
/// whose `appliesTo.tasks` predicate names it. Sorted by descending
/// priority, then id, so high-priority rules surface first.
pub fn rules_for_task<'m>(manifest: &'m Manifest, id: &TaskId) -> Vec<(&'m RuleId, &'m Rule)> {
    let mut ids: BTreeSet<&RuleId> = BTreeSet::new();
    if let Some(task) = manifest.task(id) {
        ids.extend(task.related_rules.iter());
    }
    for (rule_id, rule) in &manifest.rules {
        if rule.applies_to_task(id) {
            ids.insert(rule_id);
        }
    }
    let mut out: Vec<(&RuleId, &Rule)> = ids
        .into_iter()
        .filter_map(|rid| manifest.rules.get_key_value(rid))
        .collect();
    out.sort_by(|(aid, a), (bid, b)| b.priority.cmp(&a.priority).then_with(|| aid.cmp(bid)));
    out
}

/// Specs governing a file, from the precomputed reverse index when present,
/// otherwise by glob-matching against every active spec's `affectedFiles`.
pub fn specs_for_file<'m>(manifest: &'m Manifest, path: &str) -> Vec<&'m SpecId> {
    if let Some(entry) = manifest.file(path) {
        return entry.governed_by.iter().collect();
    }
    manifest
        .specs
        .iter()
        .filter(|(_, spec)| spec.is_active() && spec.affects_file(path))
        .map(|(id, _)| id)
        .collect()
}

/// Tasks that touched a file: provenance from the reverse index plus any
/// task listing the path in `outputFiles`. Falls back to the output listing
/// alone when no index entry exists.
pub fn tasks_for_file<'m>(manifest: &'m Manifest, path: &str) -> Vec<&'m TaskId> {
    let mut ids: BTreeSet<&TaskId> = BTreeSet::new();
    if let Some(entry) = manifest.file(path) {
        ids.extend(entry.created_by.iter());
        ids.extend(entry.modified_by.iter());
    }
    for (task_id, task) in &manifest.tasks {
        if task.outputs_file(path) {
            ids.insert(task_id);
        }
    }
    ids.into_iter().collect()
}

/// Rules applying to a file, index-first with a pattern fallback.
pub fn rules_for_file<'m>(manifest: &'m Manifest, path: &str) -> Vec<&'m RuleId> {
    if let Some(entry) = manifest.file(path) {
        return entry.rules_applied.iter().collect();
    }
    manifest
        .rules
        .iter()
        .filter(|(_, rule)| rule.applies_to_file(path))
        .map(|(id, _)| id)
        .collect()
}

/// Open tasks whose dependencies are all closed.
pub fn ready_tasks(manifest: &Manifest) -> Vec<(&TaskId, &Task)> {
    let closed: BTreeSet<&TaskId> = manifest
        .tasks
        .iter()
        .filter(|(_, task)| task.is_closed())
        .map(|(id, _)| id)
        .collect();
    manifest
        .tasks
        .iter()
        .filter(|(_, task)| {
            task.status.is_open() && task.dependencies.iter().all(|dep| closed.contains(dep))
        })
        .collect()
}

/// An open task together with the dependencies still blocking it.
#[derive(Debug, Clone)]
pub struct BlockedTask<'m> {
    pub id: &'m TaskId,
    pub task: &'m Task,
    pub blocked_on: Vec<&'m TaskId>,
}

/// Open tasks with at least one unclosed dependency.
pub fn blocked_tasks(manifest: &Manifest) -> Vec<BlockedTask<'_>> {
    manifest
        .tasks
        .iter()
        .filter(|(_, task)| task.status.is_open())
        .filter_map(|(id, task)| {
            let blocked_on: Vec<&TaskId> = task
                .dependencies
                .iter()
                .filter(|dep| !manifest.task(dep).is_some_and(Task::is_closed))
                .collect();
            (!blocked_on.is_empty()).then_some(BlockedTask {
                id,
                task,
                blocked_on,
            })
        })
        .collect()
}

/// Who first produced a file versus who later touched it.
#[derive(Debug, Clone)]
pub struct FileProvenance<'m> {
    pub creator: Option<&'m TaskId>,
    pub modifiers: Vec<&'m TaskId>,
}

/// Creator/modifier split for a file; `None` when the path is unknown.
pub fn file_provenance<'m>(manifest: &'m Manifest, path: &str) -> Option<FileProvenance<'m>> {
    manifest.file(path).map(|entry| FileProvenance {
        creator: entry.created_by.as_ref(),
        modifiers: entry.modified_by.iter().collect(),
    })
}

/// Entity counts for the CLI overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub specs: usize,
    pub active_specs: usize,
    pub tasks: usize,
    pub open_tasks: usize,
    pub in_progress_tasks: usize,
    pub closed_tasks: usize,
    pub ready_tasks: usize,
    pub blocked_tasks: usize,
    pub rules: usize,
    pub files: usize,
}

pub fn status_summary(manifest: &Manifest) -> StatusSummary {
    use crate::core::TaskStatus;
    let count_status = |status: TaskStatus| {
        manifest
            .tasks
            .values()
            .filter(|t| t.status == status)
            .count()
    };
    StatusSummary {
        specs: manifest.specs.len(),
        active_specs: active_specs(manifest).len(),
        tasks: manifest.tasks.len(),
        open_tasks: count_status(TaskStatus::Open),
        in_progress_tasks: count_status(TaskStatus::InProgress),
        closed_tasks: count_status(TaskStatus::Closed),
        ready_tasks: ready_tasks(manifest).len(),
        blocked_tasks: blocked_tasks(manifest).len(),
        rules: manifest.rules.len(),
        files: manifest.files.len(),
    }
}

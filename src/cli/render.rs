//! Human renderer for CLI outputs.
//!
//! This module is pure formatting; handlers gather any extra data needed.

use crate::core::{Rule, RuleId, Spec, SpecId, Task, TaskId};
use crate::query::{BlockedTask, FileProvenance, StatusSummary};

pub fn render_active(specs: &[(&SpecId, &Spec)]) -> String {
    if specs.is_empty() {
        return "No active specs".to_string();
    }
    let mut out = format!("Active specs ({}):\n", specs.len());
    for (id, spec) in specs {
        out.push_str(&format!("  {} ({})", id, spec.path));
        if !spec.related_tasks.is_empty() {
            out.push_str(&format!("  [{} tasks]", spec.related_tasks.len()));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

pub fn render_tasks(spec: &SpecId, tasks: &[(&TaskId, &Task)]) -> String {
    if tasks.is_empty() {
        return format!("No tasks for spec {spec}");
    }
    let mut out = format!("Tasks for {spec}:\n");
    for (id, task) in tasks {
        out.push_str(&format!("  {} [{}] {}\n", id, task.status.as_str(), task.title));
    }
    out.trim_end().to_string()
}

pub fn render_rules(task: &TaskId, rules: &[(&RuleId, &Rule)]) -> String {
    if rules.is_empty() {
        return format!("No rules for task {task}");
    }
    let mut out = format!("Rules for {task}:\n");
    for (id, rule) in rules {
        out.push_str(&format!(
            "  {} [{}] {}\n",
            id,
            rule.priority.as_str(),
            rule.path
        ));
    }
    out.trim_end().to_string()
}

pub fn render_file(
    path: &str,
    specs: &[&SpecId],
    tasks: &[&TaskId],
    rules: &[&RuleId],
    provenance: Option<&FileProvenance<'_>>,
) -> String {
    let mut out = format!("{path}\n");
    match provenance.and_then(|p| p.creator) {
        Some(creator) => out.push_str(&format!("  created by: {creator}\n")),
        None => out.push_str("  created by: (unknown)\n"),
    }
    if let Some(p) = provenance
        && !p.modifiers.is_empty()
    {
        out.push_str(&format!("  modified by: {}\n", join_ids(&p.modifiers)));
    }
    out.push_str(&format!(
        "  specs: {}\n",
        if specs.is_empty() { "(none)".to_string() } else { join_ids(specs) }
    ));
    out.push_str(&format!(
        "  tasks: {}\n",
        if tasks.is_empty() { "(none)".to_string() } else { join_ids(tasks) }
    ));
    out.push_str(&format!(
        "  rules: {}",
        if rules.is_empty() { "(none)".to_string() } else { join_ids(rules) }
    ));
    out
}

pub fn render_ready(tasks: &[(&TaskId, &Task)]) -> String {
    if tasks.is_empty() {
        return "No ready work found".to_string();
    }
    let mut out = format!("Ready work ({} tasks with no open blockers):\n", tasks.len());
    for (i, (id, task)) in tasks.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}\n", i + 1, id, task.title));
    }
    out.trim_end().to_string()
}

pub fn render_blocked(blocked: &[BlockedTask<'_>]) -> String {
    if blocked.is_empty() {
        return "No blocked tasks".to_string();
    }
    let mut out = format!("Blocked tasks ({}):\n", blocked.len());
    for b in blocked {
        out.push_str(&format!(
            "  {}: {} (blocked on {})\n",
            b.id,
            b.task.title,
            join_ids(&b.blocked_on)
        ));
    }
    out.trim_end().to_string()
}

pub fn render_status(summary: &StatusSummary) -> String {
    format!(
        "Specs: {} ({} active)\n\
         Tasks: {} ({} open, {} in progress, {} closed)\n\
         Ready: {}  Blocked: {}\n\
         Rules: {}\n\
         Files: {}",
        summary.specs,
        summary.active_specs,
        summary.tasks,
        summary.open_tasks,
        summary.in_progress_tasks,
        summary.closed_tasks,
        summary.ready_tasks,
        summary.blocked_tasks,
        summary.rules,
        summary.files
    )
}

fn join_ids<T: std::fmt::Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

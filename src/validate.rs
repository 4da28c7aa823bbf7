//! Manifest validation.
//!
//! Passes run in a fixed order and fail fast per class: structural shape,
//! referential integrity, dependency cycles, bidirectional consistency.
//! Within the failing class every violation is collected, so one error
//! names everything that has to change.
//!
//! Validation never corrupts anything: it only decides whether a candidate
//! manifest state is legal.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::core::{Manifest, RuleId, SpecId, TaskId, check_file_path};

/// A reference endpoint, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    Spec(SpecId),
    Task(TaskId),
    Rule(RuleId),
    File(String),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spec(id) => write!(f, "spec `{id}`"),
            Self::Task(id) => write!(f, "task `{id}`"),
            Self::Rule(id) => write!(f, "rule `{id}`"),
            Self::File(path) => write!(f, "file `{path}`"),
        }
    }
}

/// A forward reference whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    pub from: EntityRef,
    pub field: &'static str,
    pub to: EntityRef,
}

impl fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> missing {}", self.from, self.field, self.to)
    }
}

/// A dependency cycle, reported as the id path that closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub entity: &'static str,
    pub path: Vec<String>,
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycle: {}", self.entity, self.path.join(" -> "))
    }
}

/// A forward edge of a symmetric relation whose mirror is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsymmetricEdge {
    pub from: EntityRef,
    pub to: EntityRef,
    pub relation: &'static str,
}

impl fmt::Display for AsymmetricEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lists {} under {} but the mirror entry is missing",
            self.from, self.to, self.relation
        )
    }
}

fn join_all<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why a candidate manifest state was rejected. Always recoverable: the
/// proposed change is discarded and the committed state is untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("structural problems: {}", join_all(.problems))]
    MissingField { problems: Vec<String> },

    #[error("dangling references: {}", join_all(.missing))]
    MissingReference { missing: Vec<DanglingRef> },

    #[error("dependency cycles: {}", join_all(.cycles))]
    CycleDetected { cycles: Vec<Cycle> },

    #[error("asymmetric relations: {}", join_all(.edges))]
    AsymmetricRelation { edges: Vec<AsymmetricEdge> },
}

impl ValidationError {
    /// Single dangling reference, for mutations that target a missing entity.
    pub(crate) fn missing_ref(from: EntityRef, field: &'static str, to: EntityRef) -> Self {
        Self::MissingReference {
            missing: vec![DanglingRef { from, field, to }],
        }
    }
}

/// Check a candidate manifest against every invariant.
pub fn validate(manifest: &Manifest) -> Result<(), ValidationError> {
    structural(manifest)?;
    referential(manifest)?;
    cycles(manifest)?;
    symmetry(manifest)?;
    Ok(())
}

fn structural(manifest: &Manifest) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    if let Err(e) = manifest.check_version() {
        problems.push(e.to_string());
    }
    for (id, spec) in &manifest.specs {
        if spec.path.trim().is_empty() {
            problems.push(format!("spec `{id}` has an empty path"));
        }
    }
    for (id, task) in &manifest.tasks {
        if task.title.trim().is_empty() {
            problems.push(format!("task `{id}` has an empty title"));
        }
        for path in &task.output_files {
            if let Err(e) = check_file_path(path) {
                problems.push(format!("task `{id}` output file: {e}"));
            }
        }
    }
    for (id, rule) in &manifest.rules {
        if rule.path.trim().is_empty() {
            problems.push(format!("rule `{id}` has an empty path"));
        }
    }
    for path in manifest.files.keys() {
        if let Err(e) = check_file_path(path) {
            problems.push(e.to_string());
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingField { problems })
    }
}

fn referential(manifest: &Manifest) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    let mut check = |from: EntityRef, field: &'static str, to: EntityRef, exists: bool| {
        if !exists {
            missing.push(DanglingRef { from, field, to });
        }
    };

    for (id, spec) in &manifest.specs {
        let from = || EntityRef::Spec(id.clone());
        for t in &spec.related_tasks {
            check(
                from(),
                "relatedTasks",
                EntityRef::Task(t.clone()),
                manifest.tasks.contains_key(t),
            );
        }
        for r in &spec.related_rules {
            check(
                from(),
                "relatedRules",
                EntityRef::Rule(r.clone()),
                manifest.rules.contains_key(r),
            );
        }
        for s in &spec.dependencies {
            check(
                from(),
                "dependencies",
                EntityRef::Spec(s.clone()),
                manifest.specs.contains_key(s),
            );
        }
    }
    for (id, task) in &manifest.tasks {
        let from = || EntityRef::Task(id.clone());
        for s in &task.related_specs {
            check(
                from(),
                "relatedSpecs",
                EntityRef::Spec(s.clone()),
                manifest.specs.contains_key(s),
            );
        }
        for r in &task.related_rules {
            check(
                from(),
                "relatedRules",
                EntityRef::Rule(r.clone()),
                manifest.rules.contains_key(r),
            );
        }
        for t in &task.dependencies {
            check(
                from(),
                "dependencies",
                EntityRef::Task(t.clone()),
                manifest.tasks.contains_key(t),
            );
        }
        for path in &task.output_files {
            check(
                from(),
                "outputFiles",
                EntityRef::File(path.clone()),
                manifest.files.contains_key(path),
            );
        }
    }
    for (id, rule) in &manifest.rules {
        let from = || EntityRef::Rule(id.clone());
        for s in &rule.applies_to.specs {
            check(
                from(),
                "appliesTo.specs",
                EntityRef::Spec(s.clone()),
                manifest.specs.contains_key(s),
            );
        }
        for t in &rule.applies_to.tasks {
            check(
                from(),
                "appliesTo.tasks",
                EntityRef::Task(t.clone()),
                manifest.tasks.contains_key(t),
            );
        }
    }
    for (path, entry) in &manifest.files {
        let from = || EntityRef::File(path.clone());
        if let Some(t) = &entry.created_by {
            check(
                from(),
                "createdBy",
                EntityRef::Task(t.clone()),
                manifest.tasks.contains_key(t),
            );
        }
        for t in &entry.modified_by {
            check(
                from(),
                "modifiedBy",
                EntityRef::Task(t.clone()),
                manifest.tasks.contains_key(t),
            );
        }
        for s in &entry.governed_by {
            check(
                from(),
                "governedBy",
                EntityRef::Spec(s.clone()),
                manifest.specs.contains_key(s),
            );
        }
        for r in &entry.rules_applied {
            check(
                from(),
                "rulesApplied",
                EntityRef::Rule(r.clone()),
                manifest.rules.contains_key(r),
            );
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingReference { missing })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

/// Three-color DFS over an adjacency map. Unvisited nodes are implicitly
/// white; a back-edge to a gray node closes a cycle, reported as the path
/// from that node back to itself.
fn find_cycles<Id: Ord + Clone>(graph: &BTreeMap<Id, Vec<Id>>) -> Vec<Vec<Id>> {
    fn dfs<Id: Ord + Clone>(
        node: &Id,
        graph: &BTreeMap<Id, Vec<Id>>,
        colors: &mut BTreeMap<Id, Color>,
        stack: &mut Vec<Id>,
        cycles: &mut Vec<Vec<Id>>,
    ) {
        colors.insert(node.clone(), Color::Gray);
        stack.push(node.clone());
        if let Some(edges) = graph.get(node) {
            for next in edges {
                match colors.get(next) {
                    Some(Color::Gray) => {
                        let start = stack.iter().position(|n| n == next).unwrap_or(0);
                        let mut path: Vec<Id> = stack[start..].to_vec();
                        path.push(next.clone());
                        cycles.push(path);
                    }
                    Some(Color::Black) => {}
                    None => dfs(next, graph, colors, stack, cycles),
                }
            }
        }
        stack.pop();
        colors.insert(node.clone(), Color::Black);
    }

    let mut colors = BTreeMap::new();
    let mut stack = Vec::new();
    let mut cycles = Vec::new();
    for node in graph.keys() {
        if !colors.contains_key(node) {
            dfs(node, graph, &mut colors, &mut stack, &mut cycles);
        }
    }
    cycles
}

fn cycles(manifest: &Manifest) -> Result<(), ValidationError> {
    let task_graph: BTreeMap<TaskId, Vec<TaskId>> = manifest
        .tasks
        .iter()
        .map(|(id, t)| (id.clone(), t.dependencies.clone()))
        .collect();
    let spec_graph: BTreeMap<SpecId, Vec<SpecId>> = manifest
        .specs
        .iter()
        .map(|(id, s)| (id.clone(), s.dependencies.clone()))
        .collect();

    let mut found: Vec<Cycle> = find_cycles(&task_graph)
        .into_iter()
        .map(|path| Cycle {
            entity: "task",
            path: path.iter().map(ToString::to_string).collect(),
        })
        .collect();
    found.extend(find_cycles(&spec_graph).into_iter().map(|path| Cycle {
        entity: "spec",
        path: path.iter().map(ToString::to_string).collect(),
    }));

    if found.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::CycleDetected { cycles: found })
    }
}

/// Bidirectional consistency.
///
/// Task↔Spec is symmetric in both directions. Task→Rule and Spec→Rule are
/// directional: a `relatedRules` listing must be mirrored in the rule's
/// `appliesTo`, but a rule may name extra specs/tasks purely through its
/// predicate (those are merged in at query time, not mirrored back).
fn symmetry(manifest: &Manifest) -> Result<(), ValidationError> {
    let mut edges = Vec::new();

    for (id, task) in &manifest.tasks {
        for s in &task.related_specs {
            if let Some(spec) = manifest.spec(s)
                && !spec.related_tasks.contains(id)
            {
                edges.push(AsymmetricEdge {
                    from: EntityRef::Task(id.clone()),
                    to: EntityRef::Spec(s.clone()),
                    relation: "relatedSpecs",
                });
            }
        }
        for r in &task.related_rules {
            if let Some(rule) = manifest.rule(r)
                && !rule.applies_to_task(id)
            {
                edges.push(AsymmetricEdge {
                    from: EntityRef::Task(id.clone()),
                    to: EntityRef::Rule(r.clone()),
                    relation: "relatedRules",
                });
            }
        }
    }
    for (id, spec) in &manifest.specs {
        for t in &spec.related_tasks {
            if let Some(task) = manifest.task(t)
                && !task.related_specs.contains(id)
            {
                edges.push(AsymmetricEdge {
                    from: EntityRef::Spec(id.clone()),
                    to: EntityRef::Task(t.clone()),
                    relation: "relatedTasks",
                });
            }
        }
        for r in &spec.related_rules {
            if let Some(rule) = manifest.rule(r)
                && !rule.applies_to_spec(id)
            {
                edges.push(AsymmetricEdge {
                    from: EntityRef::Spec(id.clone()),
                    to: EntityRef::Rule(r.clone()),
                    relation: "relatedRules",
                });
            }
        }
    }

    if edges.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::AsymmetricRelation { edges })
    }
}

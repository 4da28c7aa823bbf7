//! The full workflow driven through the public API: register entities via
//! the sync adapter, then answer the coordination questions.

use coordmap::core::GlobPattern;
use coordmap::{
    ManifestStore, Rule, RulePriority, Spec, SpecStatus, SyncAdapter, Task, TaskStatus, query,
};

use crate::fixtures::{rid, sid, tid};

fn seeded_store(dir: &tempfile::TempDir) -> ManifestStore {
    let store = ManifestStore::init(dir.path().join("manifest.json")).unwrap();
    let adapter = SyncAdapter::new(&store);

    let mut spec = Spec::new("openspec/changes/test-feature.md", SpecStatus::Draft);
    spec.affected_files = vec![GlobPattern::parse("src/**/*.ts").unwrap()];
    adapter.on_spec_registered(sid("test-feature"), spec).unwrap();

    let mut task = Task::new("implement core module", TaskStatus::Open);
    task.related_specs = vec![sid("test-feature")];
    adapter.on_task_registered(tid("bd-test1"), task).unwrap();

    // The rule's predicate names the task, so it registers after it.
    let mut rule = Rule::new("rules/test-rule.md", RulePriority::High);
    rule.applies_to.tasks = vec![tid("bd-test1")];
    adapter.on_rule_registered(rid("test-rule.md"), rule).unwrap();

    adapter.on_spec_activated(sid("test-feature")).unwrap();
    adapter.on_file_written("src/core.ts", tid("bd-test1")).unwrap();
    store
}

#[test]
fn workflow_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let m = store.get();

    let tasks: Vec<String> = query::tasks_for_spec(&m, &sid("test-feature"))
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(tasks, vec!["bd-test1"]);

    let rules: Vec<String> = query::rules_for_task(&m, &tid("bd-test1"))
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(rules, vec!["test-rule.md"]);

    let provenance = query::file_provenance(&m, "src/core.ts").unwrap();
    assert_eq!(provenance.creator, Some(&tid("bd-test1")));

    let specs = query::specs_for_file(&m, "src/core.ts");
    assert!(specs.contains(&&sid("test-feature")));
}

#[test]
fn modifier_tracked_separately_from_creator() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let adapter = SyncAdapter::new(&store);
    adapter
        .on_task_registered(tid("bd-test2"), Task::new("follow-up", TaskStatus::Open))
        .unwrap();
    adapter.on_file_written("src/core.ts", tid("bd-test2")).unwrap();

    let m = store.get();
    let provenance = query::file_provenance(&m, "src/core.ts").unwrap();
    assert_eq!(provenance.creator, Some(&tid("bd-test1")));
    assert_eq!(provenance.modifiers, vec![&tid("bd-test2")]);
}

#[test]
fn readiness_tracks_status_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let adapter = SyncAdapter::new(&store);
    adapter
        .on_task_registered(tid("bd-test2"), Task::new("follow-up", TaskStatus::Open))
        .unwrap();
    store
        .mutate(coordmap::Mutation::AddTaskDependency {
            task: tid("bd-test2"),
            on: tid("bd-test1"),
        })
        .unwrap();

    let ready: Vec<String> = query::ready_tasks(&store.get())
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(ready, vec!["bd-test1"]);

    adapter
        .on_task_status_changed(tid("bd-test1"), TaskStatus::Closed)
        .unwrap();
    let ready: Vec<String> = query::ready_tasks(&store.get())
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    assert_eq!(ready, vec!["bd-test2"]);
}

#[test]
fn spec_activation_extends_file_governance() {
    let dir = tempfile::tempdir().unwrap();
    let store = ManifestStore::init(dir.path().join("manifest.json")).unwrap();
    let adapter = SyncAdapter::new(&store);

    let mut spec = Spec::new("openspec/changes/docs.md", SpecStatus::Draft);
    spec.affected_files = vec![GlobPattern::parse("docs/**/*.md").unwrap()];
    adapter.on_spec_registered(sid("docs-pass"), spec).unwrap();
    adapter
        .on_task_registered(tid("bd-doc"), Task::new("write docs", TaskStatus::Open))
        .unwrap();
    adapter.on_file_written("docs/adr/0001.md", tid("bd-doc")).unwrap();

    // Draft spec governs nothing.
    assert!(query::specs_for_file(&store.get(), "docs/adr/0001.md").is_empty());

    // Activation re-derives the file index.
    adapter.on_spec_activated(sid("docs-pass")).unwrap();
    assert_eq!(
        query::specs_for_file(&store.get(), "docs/adr/0001.md"),
        vec![&sid("docs-pass")]
    );
}

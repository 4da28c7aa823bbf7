//! Shared fixtures: manifest builders and a `cm` command helper.

use std::fs;
use std::path::{Path, PathBuf};

use coordmap::core::GlobPattern;
use coordmap::{
    Manifest, Rule, RuleId, RulePriority, Spec, SpecId, SpecStatus, Task, TaskId, TaskStatus,
};

pub fn sid(s: &str) -> SpecId {
    SpecId::parse(s).expect("valid spec id")
}

pub fn tid(s: &str) -> TaskId {
    TaskId::parse(s).expect("valid task id")
}

pub fn rid(s: &str) -> RuleId {
    RuleId::parse(s).expect("valid rule id")
}

pub fn glob(s: &str) -> GlobPattern {
    GlobPattern::parse(s).expect("valid glob")
}

/// The documented workflow scenario: active spec `test-feature` lists task
/// `bd-test1`; the task lists rule `test-rule.md` and outputs `src/core.ts`.
pub fn scenario_manifest() -> Manifest {
    let mut m = Manifest::new();

    let mut spec = Spec::new("openspec/changes/test-feature.md", SpecStatus::Active);
    spec.affected_files = vec![glob("src/**/*.ts")];
    m.specs.insert(sid("test-feature"), spec);

    let mut rule = Rule::new("rules/test-rule.md", RulePriority::Medium);
    rule.applies_to.tasks = vec![tid("bd-test1")];
    m.rules.insert(rid("test-rule.md"), rule);

    let mut task = Task::new("implement core module", TaskStatus::Open);
    task.related_specs = vec![sid("test-feature")];
    task.related_rules = vec![rid("test-rule.md")];
    task.output_files = vec!["src/core.ts".into()];
    m.tasks.insert(tid("bd-test1"), task);

    let mut entry = coordmap::FileEntry::default();
    entry.record_write(tid("bd-test1"));
    m.files.insert("src/core.ts".into(), entry);

    m.rebuild_indexes();
    coordmap::validate::validate(&m).expect("scenario fixture is valid");
    m
}

/// A manifest at the documented performance scale: 100 specs, 500 tasks,
/// 1000 files, plus a handful of rules.
pub fn large_manifest() -> Manifest {
    let mut m = Manifest::new();

    for i in 0..100 {
        let mut spec = Spec::new(
            format!("openspec/changes/spec-{i:03}.md"),
            if i % 4 == 0 {
                SpecStatus::Draft
            } else {
                SpecStatus::Active
            },
        );
        spec.affected_files = vec![glob(&format!("mod{i:03}/**/*.rs"))];
        m.specs.insert(sid(&format!("spec-{i:03}")), spec);
    }

    for i in 0..20 {
        let mut rule = Rule::new(format!("rules/rule-{i:02}.md"), RulePriority::Medium);
        rule.applies_to.file_patterns = vec![glob(&format!("mod{:03}/**/*.rs", i * 5))];
        m.rules.insert(rid(&format!("rule-{i:02}.md")), rule);
    }

    for i in 0..500usize {
        let status = match i % 3 {
            0 => TaskStatus::Closed,
            1 => TaskStatus::Open,
            _ => TaskStatus::InProgress,
        };
        let mut task = Task::new(format!("task {i}"), status);
        task.related_specs = vec![sid(&format!("spec-{:03}", i % 100))];
        if i % 5 != 0 {
            // Edges always point to a lower index, so the graph stays a DAG.
            task.dependencies = vec![tid(&format!("bd-t{:03}", i - 1))];
        }
        m.tasks.insert(tid(&format!("bd-t{i:03}")), task);
    }

    for i in 0..1000usize {
        let path = format!("mod{:03}/src/file{i}.rs", i % 100);
        let mut entry = coordmap::FileEntry::default();
        entry.record_write(tid(&format!("bd-t{:03}", i % 500)));
        m.files.insert(path, entry);
    }

    m.rebuild_indexes();
    coordmap::validate::validate(&m).expect("large fixture is valid");
    m
}

/// Write `manifest` to `<root>/.coordmap/manifest.json` and return the path.
pub fn write_manifest(root: &Path, manifest: &Manifest) -> PathBuf {
    let dir = root.join(".coordmap");
    fs::create_dir_all(&dir).expect("create .coordmap");
    let path = dir.join("manifest.json");
    let mut json = serde_json::to_vec_pretty(manifest).expect("serialize manifest");
    json.push(b'\n');
    fs::write(&path, json).expect("write manifest");
    path
}

/// `cm` invocation pinned to a manifest path, isolated from the caller's
/// environment.
pub fn cm(manifest: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cm");
    cmd.env_remove("CM_MANIFEST");
    cmd.env_remove("CM_LOG");
    cmd.arg("--manifest").arg(manifest);
    cmd
}

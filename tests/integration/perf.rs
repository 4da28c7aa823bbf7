//! The documented performance contract: against ~100 specs / ~500 tasks /
//! ~1000 files, every query completes in under 100 ms. Queries are pure
//! in-memory map/set work, so the bound holds with a wide margin; the
//! assertions here catch accidental I/O or quadratic blowups.

use std::time::{Duration, Instant};

use coordmap::{ManifestStore, query};

use crate::fixtures;

const BUDGET: Duration = Duration::from_millis(100);

fn assert_within_budget<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    assert!(
        elapsed < BUDGET,
        "{label} took {elapsed:?}, budget is {BUDGET:?}"
    );
    out
}

#[test]
fn queries_meet_the_documented_budget() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::large_manifest());
    let store = ManifestStore::open(&path).unwrap();
    let m = store.get();

    let active = assert_within_budget("active_specs", || query::active_specs(&m));
    assert_eq!(active.len(), 75);

    let tasks = assert_within_budget("tasks_for_spec", || {
        query::tasks_for_spec(&m, &fixtures::sid("spec-042"))
    });
    assert!(!tasks.is_empty());

    assert_within_budget("rules_for_task", || {
        query::rules_for_task(&m, &fixtures::tid("bd-t250"))
    });

    let specs = assert_within_budget("specs_for_file", || {
        query::specs_for_file(&m, "mod042/src/file42.rs")
    });
    assert_eq!(specs, vec![&fixtures::sid("spec-042")]);

    // Unindexed path: the glob fallback scans every spec.
    assert_within_budget("specs_for_file fallback", || {
        query::specs_for_file(&m, "mod042/src/brand_new.rs")
    });

    let file_tasks = assert_within_budget("tasks_for_file", || {
        query::tasks_for_file(&m, "mod042/src/file42.rs")
    });
    assert!(!file_tasks.is_empty());

    let ready = assert_within_budget("ready_tasks", || query::ready_tasks(&m));
    assert!(!ready.is_empty());

    assert_within_budget("blocked_tasks", || query::blocked_tasks(&m));
    assert_within_budget("file_provenance", || {
        query::file_provenance(&m, "mod042/src/file42.rs")
    });
    assert_within_budget("status_summary", || query::status_summary(&m));
}

#[test]
fn repeated_loads_hit_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::large_manifest());
    let store = ManifestStore::open(&path).unwrap();

    // Warm load already happened in open(); cached loads are O(1).
    assert_within_budget("cached loads", || {
        for _ in 0..100 {
            store.load().unwrap();
        }
    });
}

//! Store behavior: load caching, parse failures, atomic commits.

use std::fs;
use std::sync::Arc;

use coordmap::{Error, ManifestStore, Mutation, StoreError, TaskStatus, ValidationError};

use crate::fixtures;

#[test]
fn open_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ManifestStore::open(dir.path().join("manifest.json")).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Io { .. })));
}

#[test]
fn trailing_comma_is_parse_error_and_snapshot_survives() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::scenario_manifest());
    let store = ManifestStore::open(&path).unwrap();
    assert_eq!(store.get().specs.len(), 1);

    fs::write(&path, "{\"version\": \"1.0.0\", \"specs\": {},}\n").unwrap();
    let err = store.load().unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Parse { .. })));

    // Previously loaded snapshot remains queryable.
    assert_eq!(store.get().specs.len(), 1);
    assert!(store.get().spec(&fixtures::sid("test-feature")).is_some());
}

#[test]
fn missing_version_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, "{\"specs\": {}, \"tasks\": {}}\n").unwrap();
    let err = ManifestStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Parse { .. })));
}

#[test]
fn unsupported_version_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, "{\"version\": \"2.0.0\"}\n").unwrap();
    let err = ManifestStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Core(_)));
}

#[test]
fn unknown_top_level_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, "{\"version\": \"1.0.0\", \"notes\": {}}\n").unwrap();
    let err = ManifestStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::Parse { .. })));
}

#[test]
fn load_is_cached_until_the_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::scenario_manifest());
    let store = ManifestStore::open(&path).unwrap();

    let first = store.load().unwrap();
    let second = store.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // An external edit invalidates the cache on the next load.
    let mut edited = fixtures::scenario_manifest();
    edited
        .tasks
        .get_mut(&fixtures::tid("bd-test1"))
        .unwrap()
        .status = TaskStatus::Closed;
    edited.rebuild_indexes();
    fixtures::write_manifest(dir.path(), &edited);

    let third = store.load().unwrap();
    assert!(third.task(&fixtures::tid("bd-test1")).unwrap().is_closed());
}

#[test]
fn two_task_cycle_mutation_is_rejected_and_disk_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = fixtures::scenario_manifest();
    manifest.tasks.insert(
        fixtures::tid("bd-test2"),
        coordmap::Task::new("second", TaskStatus::Open),
    );
    manifest.rebuild_indexes();
    let path = fixtures::write_manifest(dir.path(), &manifest);
    let store = ManifestStore::open(&path).unwrap();

    store
        .mutate(Mutation::AddTaskDependency {
            task: fixtures::tid("bd-test1"),
            on: fixtures::tid("bd-test2"),
        })
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = store
        .mutate(Mutation::AddTaskDependency {
            task: fixtures::tid("bd-test2"),
            on: fixtures::tid("bd-test1"),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::CycleDetected { .. })
    ));
    assert_eq!(before, fs::read_to_string(&path).unwrap());
    assert!(
        store.get().tasks[&fixtures::tid("bd-test2")]
            .dependencies
            .is_empty()
    );
}

#[test]
fn mutations_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::scenario_manifest());
    {
        let store = ManifestStore::open(&path).unwrap();
        store
            .mutate(Mutation::SetTaskStatus {
                id: fixtures::tid("bd-test1"),
                status: TaskStatus::Closed,
            })
            .unwrap();
    }
    let reopened = ManifestStore::open(&path).unwrap();
    assert!(
        reopened
            .get()
            .task(&fixtures::tid("bd-test1"))
            .unwrap()
            .is_closed()
    );
}

#[test]
fn snapshots_are_immutable_across_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::scenario_manifest());
    let store = ManifestStore::open(&path).unwrap();

    let before = store.get();
    store
        .mutate(Mutation::SetTaskStatus {
            id: fixtures::tid("bd-test1"),
            status: TaskStatus::Closed,
        })
        .unwrap();

    // The old snapshot still shows the pre-mutation state.
    assert!(!before.task(&fixtures::tid("bd-test1")).unwrap().is_closed());
    assert!(store.get().task(&fixtures::tid("bd-test1")).unwrap().is_closed());
}

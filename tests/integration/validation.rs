//! Referential integrity and consistency checks against hand-edited
//! documents. The validator is the only defense once a human or another
//! tool has touched the JSON directly.

use std::fs;

use coordmap::{Error, ManifestStore, ValidationError};

use crate::fixtures;

fn write_raw(dir: &tempfile::TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("manifest.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn dangling_task_reference_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_raw(
        &dir,
        r#"{
  "version": "1.0.0",
  "specs": {
    "add-auth": {
      "path": "openspec/add-auth.md",
      "status": "active",
      "relatedTasks": ["bd-ghost"]
    }
  }
}"#,
    );
    let err = ManifestStore::open(&path).unwrap_err();
    match err {
        Error::Validation(ValidationError::MissingReference { missing }) => {
            assert_eq!(missing.len(), 1);
            assert!(missing[0].to_string().contains("bd-ghost"));
        }
        other => panic!("expected MissingReference, got {other:?}"),
    }
}

#[test]
fn all_dangling_references_reported_in_one_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_raw(
        &dir,
        r#"{
  "version": "1.0.0",
  "tasks": {
    "bd-1": {
      "title": "t",
      "status": "open",
      "relatedSpecs": ["ghost-spec"],
      "relatedRules": ["ghost-rule.md"],
      "dependencies": ["bd-ghost"]
    }
  }
}"#,
    );
    match ManifestStore::open(&path).unwrap_err() {
        Error::Validation(ValidationError::MissingReference { missing }) => {
            assert_eq!(missing.len(), 3);
        }
        other => panic!("expected MissingReference, got {other:?}"),
    }
}

#[test]
fn asymmetric_relation_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    // Task lists the spec; the spec does not list the task back.
    let path = write_raw(
        &dir,
        r#"{
  "version": "1.0.0",
  "specs": {
    "add-auth": { "path": "openspec/add-auth.md", "status": "active" }
  },
  "tasks": {
    "bd-1": { "title": "t", "status": "open", "relatedSpecs": ["add-auth"] }
  }
}"#,
    );
    match ManifestStore::open(&path).unwrap_err() {
        Error::Validation(ValidationError::AsymmetricRelation { edges }) => {
            assert_eq!(edges.len(), 1);
            let text = edges[0].to_string();
            assert!(text.contains("bd-1"), "both ids in the report: {text}");
            assert!(text.contains("add-auth"), "both ids in the report: {text}");
        }
        other => panic!("expected AsymmetricRelation, got {other:?}"),
    }
}

#[test]
fn dependency_cycle_rejected_at_load_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_raw(
        &dir,
        r#"{
  "version": "1.0.0",
  "tasks": {
    "bd-a": { "title": "a", "status": "open", "dependencies": ["bd-b"] },
    "bd-b": { "title": "b", "status": "open", "dependencies": ["bd-c"] },
    "bd-c": { "title": "c", "status": "open", "dependencies": ["bd-a"] }
  }
}"#,
    );
    match ManifestStore::open(&path).unwrap_err() {
        Error::Validation(ValidationError::CycleDetected { cycles }) => {
            assert_eq!(cycles.len(), 1);
            assert_eq!(cycles[0].path.len(), 4);
            assert_eq!(cycles[0].path.first(), cycles[0].path.last());
        }
        other => panic!("expected CycleDetected, got {other:?}"),
    }
}

#[test]
fn malformed_entity_field_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_raw(
        &dir,
        r#"{
  "version": "1.0.0",
  "tasks": {
    "bd-1": { "title": "t", "status": "done" }
  }
}"#,
    );
    assert!(matches!(
        ManifestStore::open(&path).unwrap_err(),
        Error::Store(coordmap::StoreError::Parse { .. })
    ));
}

#[test]
fn committed_manifests_always_validate() {
    // Round-trip: everything the store commits must re-validate on load.
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_manifest(dir.path(), &fixtures::large_manifest());
    let store = ManifestStore::open(&path).unwrap();
    coordmap::validate::validate(&store.get()).unwrap();
}

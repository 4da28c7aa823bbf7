#![forbid(unsafe_code)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod paths;
pub mod query;
pub mod store;
pub mod sync;
pub mod telemetry;
pub mod validate;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    AppliesTo, CoreError, FileEntry, GlobPattern, MANIFEST_VERSION, Manifest, Rule, RuleId,
    RulePriority, Spec, SpecId, SpecStatus, Task, TaskId, TaskStatus,
};
pub use crate::store::{ManifestStore, Mutation, Relation, StoreError};
pub use crate::sync::SyncAdapter;
pub use crate::validate::ValidationError;

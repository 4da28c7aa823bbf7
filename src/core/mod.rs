//! Core data model: identifiers, domain enums, entities, and the manifest
//! document itself.

mod domain;
mod error;
mod file;
mod identity;
mod manifest;
mod pattern;
mod rule;
mod spec;
mod task;

pub use domain::{RulePriority, SpecStatus, TaskStatus};
pub use error::{CoreError, InvalidEnum, InvalidId, InvalidPattern, UnsupportedVersion};
pub use file::FileEntry;
pub use identity::{RuleId, SpecId, TaskId, check_file_path};
pub use manifest::{MANIFEST_VERSION, Manifest};
pub use pattern::GlobPattern;
pub use rule::{AppliesTo, Rule};
pub use spec::Spec;
pub use task::Task;

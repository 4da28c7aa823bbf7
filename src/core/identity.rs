//! Identity atoms.
//!
//! SpecId: specification identifier (OpenSpec change id)
//! TaskId: task identifier (Beads issue id)
//! RuleId: rule document identifier (path-like, e.g. `testing-standards.md`)
//!
//! Ids are opaque strings minted by the authoring tools; we validate shape
//! only (non-empty, no whitespace or control characters) so any id that
//! appears in a manifest can round-trip through JSON keys unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::error::{CoreError, InvalidId};

fn id_shape_error(raw: &str) -> Option<&'static str> {
    if raw.is_empty() {
        return Some("empty");
    }
    if raw.chars().any(|c| c.is_whitespace()) {
        return Some("contains whitespace");
    }
    if raw.chars().any(char::is_control) {
        return Some("contains control characters");
    }
    None
}

/// Specification identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecId(String);

impl SpecId {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match id_shape_error(s) {
            Some(reason) => Err(InvalidId::Spec {
                raw: s.to_string(),
                reason: reason.into(),
            }
            .into()),
            None => Ok(Self(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpecId({:?})", self.0)
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SpecId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SpecId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SpecId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Task identifier (e.g. `bd-a1b2`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match id_shape_error(s) {
            Some(reason) => Err(InvalidId::Task {
                raw: s.to_string(),
                reason: reason.into(),
            }
            .into()),
            None => Ok(Self(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({:?})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Rule document identifier.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(String);

impl RuleId {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match id_shape_error(s) {
            Some(reason) => Err(InvalidId::Rule {
                raw: s.to_string(),
                reason: reason.into(),
            }
            .into()),
            None => Ok(Self(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleId({:?})", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RuleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RuleId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Validate a manifest file path key.
///
/// Paths are project-relative with forward slashes; rejecting absolute and
/// `.`/`..` segments keeps glob matching and map keys unambiguous.
pub fn check_file_path(raw: &str) -> Result<(), CoreError> {
    let reason = if raw.is_empty() {
        Some("empty")
    } else if raw.contains('\\') {
        Some("must use forward slashes")
    } else if raw.starts_with('/') {
        Some("must be project-relative")
    } else if raw.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        Some("contains empty or dot segments")
    } else if raw.chars().any(char::is_control) {
        Some("contains control characters")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(InvalidId::Path {
            raw: raw.to_string(),
            reason: reason.into(),
        }
        .into()),
        None => Ok(()),
    }
}

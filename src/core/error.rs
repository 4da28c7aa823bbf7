//! Core capability errors (identifiers, patterns, document shape).
//!
//! These are bounded and stable: core errors represent domain/refusal states,
//! not library implementation details.

use thiserror::Error;

/// Invalid identifier or file path.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("spec id `{raw}` is invalid: {reason}")]
    Spec { raw: String, reason: String },
    #[error("task id `{raw}` is invalid: {reason}")]
    Task { raw: String, reason: String },
    #[error("rule id `{raw}` is invalid: {reason}")]
    Rule { raw: String, reason: String },
    #[error("file path `{raw}` is invalid: {reason}")]
    Path { raw: String, reason: String },
}

/// Invalid glob pattern.
#[derive(Debug, Error, Clone)]
#[error("glob pattern `{raw}` is invalid: {reason}")]
pub struct InvalidPattern {
    pub raw: String,
    pub reason: String,
}

/// Unknown value for a closed-set field (status, priority).
#[derive(Debug, Error, Clone)]
#[error("unknown {field} `{raw}`")]
pub struct InvalidEnum {
    pub field: &'static str,
    pub raw: String,
}

/// Manifest version missing or outside the supported range.
#[derive(Debug, Error, Clone)]
#[error("manifest version `{found}` is not supported (expected major version {expected_major})")]
pub struct UnsupportedVersion {
    pub found: String,
    pub expected_major: u64,
}

/// Canonical error enum for the core model.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    InvalidPattern(#[from] InvalidPattern),
    #[error(transparent)]
    InvalidEnum(#[from] InvalidEnum),
    #[error(transparent)]
    UnsupportedVersion(#[from] UnsupportedVersion),
}

//! Error types for race management and classification.
//!
//! All fallible operations in this crate return [`CyclingError`] through the
//! crate-wide [`Result`] alias. Errors are raised synchronously and never retried
//! internally; a failed operation leaves the affected entities unchanged.
//!
//! ## Error Categories
//!
//! - **Lookup Errors**: unknown IDs or names
//! - **Result Errors**: duplicate results, wrong checkpoint counts
//! - **Layout Errors**: segment locations outside the stage, segments on time trials
//! - **State Errors**: operations attempted in the wrong stage lifecycle state
//! - **Naming Errors**: malformed or already-used names, invalid rider details
//! - **Allocation Errors**: an ID counter has run out
//! - **Persistence Errors**: snapshot file access and decoding failures
//!
//! ## Recovery Guidance
//!
//! ```rust
//! use peloton::{CyclingError, EntityKind};
//!
//! let error = CyclingError::unknown_id(EntityKind::Stage, 42u32);
//! assert!(error.is_not_found());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{EntityKind, RiderId, StageId, StageState, StageType};

/// Result type alias for cycling operations.
pub type Result<T, E = CyclingError> = std::result::Result<T, E>;

/// Main error type for cycling operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CyclingError {
    #[error("Unknown {kind} ID {id}")]
    UnknownId { kind: EntityKind, id: u32 },

    #[error("No race named '{name}'")]
    UnknownName { name: String },

    #[error("Rider {rider} already has a result registered")]
    DuplicateResult { rider: RiderId },

    #[error("Expected {expected} checkpoints (segments + 2), found {found}")]
    InvalidCheckpointCount { expected: usize, found: usize },

    #[error("Invalid segment location {location}: {reason}")]
    InvalidLocation { location: f64, reason: String },

    #[error("Stage {stage} is {state}, cannot {operation}")]
    InvalidStageState { stage: StageId, state: StageState, operation: &'static str },

    #[error("Stage {stage} is a {stage_type} stage and cannot contain segments")]
    InvalidStageType { stage: StageId, stage_type: StageType },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Name '{name}' is already in use")]
    IllegalName { name: String },

    #[error("Stage length {length} is shorter than the minimum of {minimum}")]
    InvalidLength { length: f64, minimum: f64 },

    #[error("Invalid rider: {reason}")]
    InvalidRider { reason: String },

    #[error("No {kind} IDs left to allocate")]
    IdsExhausted { kind: EntityKind },

    #[error("Snapshot file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },
}

impl CyclingError {
    /// Returns whether the error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CyclingError::UnknownId { .. } | CyclingError::UnknownName { .. })
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            CyclingError::UnknownId { .. } => vec![
                "Check the ID was returned by this portal",
                "Verify the entity has not been removed",
                "IDs restart from 1 after the portal is erased",
            ],
            CyclingError::UnknownName { .. } => {
                vec!["Check the race name spelling", "List race IDs to find existing races"]
            }
            CyclingError::DuplicateResult { .. } => vec![
                "Delete the rider's existing result before registering a new one",
                "Check the rider ID is correct",
            ],
            CyclingError::InvalidCheckpointCount { .. } => vec![
                "Provide the start time, one time per segment, and the finish time",
                "List the stage segments to count them",
            ],
            CyclingError::InvalidLocation { .. } => vec![
                "Place the segment within the stage length",
                "Ensure a climb does not start before the stage start",
            ],
            CyclingError::InvalidStageState { .. } => vec![
                "Add or remove segments before concluding stage preparation",
                "Conclude stage preparation before registering results",
            ],
            CyclingError::InvalidStageType { .. } => {
                vec!["Time trial stages cannot contain climbs or sprints"]
            }
            CyclingError::InvalidName { .. } => vec![
                "Use a non-empty name of at most 30 characters",
                "Remove whitespace, quotes and backslashes from the name",
            ],
            CyclingError::IllegalName { .. } => vec!["Choose a name that is not already in use"],
            CyclingError::InvalidLength { .. } => vec!["Stages must be at least 5 km long"],
            CyclingError::InvalidRider { .. } => vec![
                "Provide a non-empty rider name",
                "Year of birth must be 1900 or later",
            ],
            CyclingError::IdsExhausted { .. } => vec![
                "Erase the portal to restart ID allocation",
                "Check the snapshot counters were not edited by hand",
            ],
            CyclingError::File { .. } => vec![
                "Check the file exists and is readable",
                "Check the directory is writable when saving",
            ],
            CyclingError::Parse { .. } => vec![
                "Check the snapshot was produced by a compatible version",
                "Verify the snapshot file is not truncated",
            ],
        }
    }

    /// Helper constructor for unknown entity IDs.
    pub fn unknown_id(kind: EntityKind, id: impl Into<u32>) -> Self {
        CyclingError::UnknownId { kind, id: id.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        CyclingError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        CyclingError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for segment location errors.
    pub fn invalid_location(location: f64, reason: impl Into<String>) -> Self {
        CyclingError::InvalidLocation { location, reason: reason.into() }
    }

    /// Helper constructor for invalid rider details.
    pub fn invalid_rider(reason: impl Into<String>) -> Self {
        CyclingError::InvalidRider { reason: reason.into() }
    }
}

impl From<std::io::Error> for CyclingError {
    fn from(err: std::io::Error) -> Self {
        CyclingError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

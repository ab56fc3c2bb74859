//! Error types for the terminology store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::effective_time::InvalidEffectiveTime;
use crate::types::{BranchPath, BranchPathError, ComponentIdError, RecordId};
use thiserror::Error;

/// Result type alias for terminology-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the terminology store
#[derive(Debug, Error)]
pub enum Error {
    /// No ancestor branch holds a released snapshot of the record
    ///
    /// Effective-time restoration is only valid for records with a release
    /// history; reaching this means the repository contradicts the record's
    /// released flag.
    #[error("no released version of {id} found on '{branch}' or any of its ancestors")]
    NoReleasedVersion {
        /// The record whose release history is missing
        id: RecordId,
        /// The branch the search started from
        branch: BranchPath,
    },

    /// A branch path failed validation
    #[error("invalid branch path: {0}")]
    InvalidBranchPath(#[from] BranchPathError),

    /// A component identifier failed validation
    #[error("invalid component id: {0}")]
    InvalidComponentId(#[from] ComponentIdError),

    /// An effective time string failed to parse
    #[error("invalid effective time: {0}")]
    InvalidEffectiveTime(#[from] InvalidEffectiveTime),

    /// A repository collaborator failed
    #[error("repository error: {0}")]
    Repository(String),
}

impl Error {
    /// Create a repository error from any message
    pub fn repository(message: impl Into<String>) -> Self {
        Error::Repository(message.into())
    }

    /// Check if this is the missing-release-history error
    pub fn is_no_released_version(&self) -> bool {
        matches!(self, Error::NoReleasedVersion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentId;

    #[test]
    fn test_no_released_version_display() {
        let err = Error::NoReleasedVersion {
            id: ComponentId::new_unchecked("138875005").into(),
            branch: BranchPath::new_unchecked("MAIN/project-a"),
        };
        let msg = err.to_string();
        assert!(msg.contains("138875005"));
        assert!(msg.contains("MAIN/project-a"));
        assert!(err.is_no_released_version());
    }

    #[test]
    fn test_validation_errors_convert() {
        let err: Error = BranchPath::new("").unwrap_err().into();
        assert!(err.to_string().contains("invalid branch path"));

        let err: Error = ComponentId::new("abc").unwrap_err().into();
        assert!(err.to_string().contains("invalid component id"));

        let err: Error = crate::EffectiveTime::parse("nope").unwrap_err().into();
        assert!(err.to_string().contains("invalid effective time"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = Error::repository("index shard offline");
        assert!(err.to_string().contains("repository error"));
        assert!(err.to_string().contains("index shard offline"));
        assert!(!err.is_no_released_version());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}

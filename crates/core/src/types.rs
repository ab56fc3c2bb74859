//! Identifier types for the terminology store
//!
//! This module defines the foundational identifier types:
//! - ComponentId: SCTID-style identifier for concepts, descriptions, relationships
//! - MemberId: UUID identifier for reference-set members
//! - RecordId: Either id space, used for branch-scoped lookups
//! - BranchPath: Slash-separated authoring branch path

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Minimum length of a component identifier
pub const MIN_COMPONENT_ID_LENGTH: usize = 6;

/// Maximum length of a component identifier
pub const MAX_COMPONENT_ID_LENGTH: usize = 18;

/// Maximum length of a branch path
pub const MAX_BRANCH_PATH_LENGTH: usize = 512;

/// SCTID-style identifier for concepts, descriptions and relationships
///
/// Component identifiers are numeric strings. They are also used for every
/// concept-valued attribute (module, definition status, characteristic type,
/// correlation, and so on), since those attributes point at concepts.
///
/// ## Validation Rules
///
/// - Length: 6-18 characters
/// - Characters: ASCII digits only
/// - No leading zero
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(String);

/// Error when validating a component identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentIdError {
    /// Identifier is empty
    Empty,
    /// Identifier length is outside the allowed range
    WrongLength {
        /// Actual length of the identifier
        length: usize,
    },
    /// Identifier contains a non-digit character
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
    /// Identifier starts with a zero
    LeadingZero,
}

impl fmt::Display for ComponentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentIdError::Empty => write!(f, "component id cannot be empty"),
            ComponentIdError::WrongLength { length } => {
                write!(
                    f,
                    "component id must be {}-{} digits, got {}",
                    MIN_COMPONENT_ID_LENGTH, MAX_COMPONENT_ID_LENGTH, length
                )
            }
            ComponentIdError::InvalidChar { char, position } => {
                write!(f, "invalid character '{}' at position {} (digits only)", char, position)
            }
            ComponentIdError::LeadingZero => write!(f, "component id cannot start with zero"),
        }
    }
}

impl std::error::Error for ComponentIdError {}

impl ComponentId {
    /// Create a new ComponentId, validating the input
    ///
    /// # Errors
    ///
    /// Returns `ComponentIdError` if the identifier is invalid.
    pub fn new(id: impl Into<String>) -> Result<Self, ComponentIdError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(ComponentId(id))
    }

    /// Create a ComponentId without validation
    ///
    /// The caller must ensure the identifier is valid. Use `new()` for
    /// untrusted input.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        ComponentId(id.into())
    }

    /// Validate a component identifier
    pub fn validate(id: &str) -> Result<(), ComponentIdError> {
        if id.is_empty() {
            return Err(ComponentIdError::Empty);
        }
        if id.len() < MIN_COMPONENT_ID_LENGTH || id.len() > MAX_COMPONENT_ID_LENGTH {
            return Err(ComponentIdError::WrongLength { length: id.len() });
        }
        for (position, char) in id.chars().enumerate() {
            if !char.is_ascii_digit() {
                return Err(ComponentIdError::InvalidChar { char, position });
            }
        }
        if id.starts_with('0') {
            return Err(ComponentIdError::LeadingZero);
        }
        Ok(())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a reference-set member
///
/// A MemberId is a wrapper around a UUID v4. Unlike core components, members
/// are identified by UUIDs assigned at authoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    /// Create a new random MemberId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a MemberId from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a MemberId from a string representation
    ///
    /// Accepts standard UUID format (with or without hyphens).
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for any record subject to restoration
///
/// Core components and reference-set members live in different id spaces;
/// this sum covers both so lookups and error reporting can stay uniform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordId {
    /// A concept, description or relationship identifier
    Component(ComponentId),
    /// A reference-set member identifier
    Member(MemberId),
}

impl RecordId {
    /// Check if this identifies a reference-set member
    pub fn is_member(&self) -> bool {
        matches!(self, RecordId::Member(_))
    }
}

impl From<ComponentId> for RecordId {
    fn from(id: ComponentId) -> Self {
        RecordId::Component(id)
    }
}

impl From<MemberId> for RecordId {
    fn from(id: MemberId) -> Self {
        RecordId::Member(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Component(id) => write!(f, "{}", id),
            RecordId::Member(id) => write!(f, "{}", id),
        }
    }
}

/// Slash-separated path of an authoring branch
///
/// Branches form a tree rooted at the main branch; a path names one branch by
/// listing every segment from the root, e.g. `MAIN/project-a/task-12`.
///
/// ## Validation Rules
///
/// - Length: 1-512 characters
/// - Segments separated by `/`, each segment non-empty
/// - Segment characters: `[a-zA-Z0-9_.-]`
/// - No leading or trailing `/`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchPath(String);

/// Error when validating a branch path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchPathError {
    /// Path is empty
    Empty,
    /// Path exceeds maximum length
    TooLong {
        /// Actual length of the path
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Path has an empty segment (leading, trailing, or doubled `/`)
    EmptySegment,
    /// Path contains an invalid character
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
}

impl fmt::Display for BranchPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchPathError::Empty => write!(f, "branch path cannot be empty"),
            BranchPathError::TooLong { length, max } => {
                write!(f, "branch path too long: {} chars (max {})", length, max)
            }
            BranchPathError::EmptySegment => {
                write!(f, "branch path segments cannot be empty")
            }
            BranchPathError::InvalidChar { char, position } => {
                write!(
                    f,
                    "invalid character '{}' at position {} (only alphanumeric, dash, underscore, dot allowed)",
                    char, position
                )
            }
        }
    }
}

impl std::error::Error for BranchPathError {}

impl BranchPath {
    /// Create a new BranchPath, validating the input
    ///
    /// # Errors
    ///
    /// Returns `BranchPathError` if the path is invalid.
    pub fn new(path: impl Into<String>) -> Result<Self, BranchPathError> {
        let path = path.into();
        Self::validate(&path)?;
        Ok(BranchPath(path))
    }

    /// Create a BranchPath without validation
    ///
    /// The caller must ensure the path is valid. Use `new()` for untrusted
    /// input.
    pub fn new_unchecked(path: impl Into<String>) -> Self {
        BranchPath(path.into())
    }

    /// Validate a branch path
    pub fn validate(path: &str) -> Result<(), BranchPathError> {
        if path.is_empty() {
            return Err(BranchPathError::Empty);
        }
        if path.len() > MAX_BRANCH_PATH_LENGTH {
            return Err(BranchPathError::TooLong {
                length: path.len(),
                max: MAX_BRANCH_PATH_LENGTH,
            });
        }
        for (position, char) in path.chars().enumerate() {
            if char != '/' && !char.is_ascii_alphanumeric() && !matches!(char, '_' | '.' | '-') {
                return Err(BranchPathError::InvalidChar { char, position });
            }
        }
        if path.split('/').any(str::is_empty) {
            return Err(BranchPathError::EmptySegment);
        }
        Ok(())
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over the path's segments, root first
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// The parent branch, or None for a root branch
    pub fn parent(&self) -> Option<BranchPath> {
        self.0
            .rfind('/')
            .map(|split| BranchPath(self.0[..split].to_string()))
    }

    /// Walk from this branch up to the root, nearest first
    ///
    /// Yields this branch itself, then its parent, and so on. This is a pure
    /// path computation; whether each candidate actually exists is up to the
    /// repository consulted with it.
    pub fn self_and_ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }
}

impl fmt::Display for BranchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iterator over a branch path and its ancestors, nearest first
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<BranchPath>,
}

impl Iterator for Ancestors {
    type Item = BranchPath;

    fn next(&mut self) -> Option<BranchPath> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_component_id_valid() {
        assert!(ComponentId::new("900000000000207008").is_ok());
        assert!(ComponentId::new("138875005").is_ok());
        assert!(ComponentId::new("123456").is_ok());
    }

    #[test]
    fn test_component_id_empty() {
        assert_eq!(ComponentId::new(""), Err(ComponentIdError::Empty));
    }

    #[test]
    fn test_component_id_wrong_length() {
        assert_eq!(
            ComponentId::new("12345"),
            Err(ComponentIdError::WrongLength { length: 5 })
        );
        assert_eq!(
            ComponentId::new("1234567890123456789"),
            Err(ComponentIdError::WrongLength { length: 19 })
        );
    }

    #[test]
    fn test_component_id_invalid_char() {
        assert_eq!(
            ComponentId::new("12345a"),
            Err(ComponentIdError::InvalidChar {
                char: 'a',
                position: 5
            })
        );
    }

    #[test]
    fn test_component_id_leading_zero() {
        assert_eq!(ComponentId::new("012345"), Err(ComponentIdError::LeadingZero));
    }

    #[test]
    fn test_component_id_display() {
        let id = ComponentId::new("138875005").unwrap();
        assert_eq!(format!("{}", id), "138875005");
        assert_eq!(id.as_str(), "138875005");
    }

    #[test]
    fn test_member_id_roundtrip() {
        let id = MemberId::new();
        let parsed = MemberId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_member_id_from_invalid_string() {
        assert!(MemberId::from_string("not-a-uuid").is_none());
    }

    #[test]
    fn test_member_ids_are_unique() {
        assert_ne!(MemberId::new(), MemberId::new());
    }

    #[test]
    fn test_record_id_from_either_space() {
        let component: RecordId = ComponentId::new("138875005").unwrap().into();
        let member: RecordId = MemberId::new().into();
        assert!(!component.is_member());
        assert!(member.is_member());
        assert_ne!(component, member);
    }

    #[test]
    fn test_record_id_display_matches_inner() {
        let inner = ComponentId::new("138875005").unwrap();
        let id: RecordId = inner.clone().into();
        assert_eq!(id.to_string(), inner.to_string());
    }

    #[test]
    fn test_branch_path_valid() {
        assert!(BranchPath::new("MAIN").is_ok());
        assert!(BranchPath::new("MAIN/project-a/task-12").is_ok());
        assert!(BranchPath::new("MAIN/extension.dk/2024").is_ok());
    }

    #[test]
    fn test_branch_path_empty() {
        assert_eq!(BranchPath::new(""), Err(BranchPathError::Empty));
    }

    #[test]
    fn test_branch_path_empty_segment() {
        assert_eq!(BranchPath::new("MAIN//task"), Err(BranchPathError::EmptySegment));
        assert_eq!(BranchPath::new("/MAIN"), Err(BranchPathError::EmptySegment));
        assert_eq!(BranchPath::new("MAIN/"), Err(BranchPathError::EmptySegment));
    }

    #[test]
    fn test_branch_path_invalid_char() {
        assert_eq!(
            BranchPath::new("MAIN/has space"),
            Err(BranchPathError::InvalidChar {
                char: ' ',
                position: 8
            })
        );
    }

    #[test]
    fn test_branch_path_too_long() {
        let long = "a".repeat(MAX_BRANCH_PATH_LENGTH + 1);
        assert!(matches!(
            BranchPath::new(long),
            Err(BranchPathError::TooLong { .. })
        ));
    }

    #[test]
    fn test_branch_path_parent() {
        let path = BranchPath::new("MAIN/project-a/task-12").unwrap();
        assert_eq!(path.parent(), Some(BranchPath::new("MAIN/project-a").unwrap()));
        assert_eq!(BranchPath::new("MAIN").unwrap().parent(), None);
    }

    #[test]
    fn test_branch_path_segments() {
        let path = BranchPath::new("MAIN/project-a/task-12").unwrap();
        let segments: Vec<&str> = path.segments().collect();
        assert_eq!(segments, vec!["MAIN", "project-a", "task-12"]);
    }

    #[test]
    fn test_self_and_ancestors_nearest_first() {
        let path = BranchPath::new("MAIN/project-a/task-12").unwrap();
        let walk: Vec<String> = path.self_and_ancestors().map(|b| b.to_string()).collect();
        assert_eq!(walk, vec!["MAIN/project-a/task-12", "MAIN/project-a", "MAIN"]);
    }

    #[test]
    fn test_self_and_ancestors_root_only() {
        let path = BranchPath::new("MAIN").unwrap();
        let walk: Vec<BranchPath> = path.self_and_ancestors().collect();
        assert_eq!(walk, vec![path]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = ComponentId::new("138875005").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let restored: ComponentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);

        let path = BranchPath::new("MAIN/project-a").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let restored: BranchPath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, restored);
    }

    proptest! {
        #[test]
        fn prop_valid_component_ids_accepted(id in "[1-9][0-9]{5,17}") {
            prop_assert!(ComponentId::new(id).is_ok());
        }

        #[test]
        fn prop_ancestor_walk_is_finite_and_shrinking(
            segments in prop::collection::vec("[a-zA-Z0-9_-]{1,8}", 1..6)
        ) {
            let path = BranchPath::new(segments.join("/")).unwrap();
            let walk: Vec<BranchPath> = path.self_and_ancestors().collect();
            prop_assert_eq!(walk.len(), segments.len());
            for pair in walk.windows(2) {
                prop_assert!(pair[0].as_str().len() > pair[1].as_str().len());
            }
        }
    }
}

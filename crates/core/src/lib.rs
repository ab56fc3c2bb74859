//! Core types and traits for Termbase
//!
//! This crate defines the foundational types used throughout the system:
//! - ComponentId / MemberId / RecordId: identifier spaces for terminology records
//! - BranchPath: slash-separated authoring branch path with ancestry walking
//! - EffectiveTime: release-date type with compact YYYYMMDD parsing
//! - Record / RecordData: the caller-owned, editable record model
//! - RecordSnapshot / Recorded: immutable released views with sparse fields
//! - Error: error type hierarchy
//! - Traits: collaborator definitions (BranchAncestry, SnapshotSource)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod effective_time;
pub mod error;
pub mod record;
pub mod snapshot;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use effective_time::{EffectiveTime, InvalidEffectiveTime};
pub use error::{Error, Result};
pub use record::{
    ComplexMapMember, ConceptFields, DescriptionFields, DescriptionTypeMember, ExtendedMapMember,
    MemberDetail, MemberFields, MemberKind, ModuleDependencyMember, MrcmAttributeDomainMember,
    MrcmAttributeRangeMember, MrcmDomainMember, Record, RecordCategory, RecordData, RecordKind,
    RelationshipFields, SimpleMapMember,
};
pub use snapshot::{
    ComplexMapSnapshot, ConceptSnapshot, DescriptionSnapshot, DescriptionTypeSnapshot,
    ExtendedMapSnapshot, MemberSnapshot, ModuleDependencySnapshot, MrcmAttributeDomainSnapshot,
    MrcmAttributeRangeSnapshot, MrcmDomainSnapshot, RecordSnapshot, Recorded, RelationshipSnapshot,
    SimpleMapSnapshot, SnapshotData,
};
pub use traits::{BranchAncestry, SnapshotSource};
pub use types::{
    BranchPath, BranchPathError, ComponentId, ComponentIdError, MemberId, RecordId,
    MAX_BRANCH_PATH_LENGTH, MAX_COMPONENT_ID_LENGTH, MIN_COMPONENT_ID_LENGTH,
};

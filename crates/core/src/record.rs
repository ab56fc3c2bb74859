//! Editable record model
//!
//! A [`Record`] is the caller-owned, in-progress state of one terminology
//! record on a branch. Records come in a closed set of kinds:
//!
//! - Core components: concepts, descriptions, relationships
//! - Reference-set members: one variant per supported reference-set type
//!
//! The kind-specific payload lives in [`RecordData`]; members carry their
//! reference-set metadata plus a [`MemberDetail`] payload. The two top-level
//! categories matter because the restoration eligibility rules differ
//! between core components and members.

use crate::effective_time::EffectiveTime;
use crate::types::{ComponentId, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate category of a record kind
///
/// Core components and reference-set members are screened by different
/// eligibility rules before a restoration comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordCategory {
    /// Concepts, descriptions and relationships
    CoreComponent,
    /// Reference-set members of any kind
    RefsetMember,
}

impl RecordCategory {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordCategory::CoreComponent => "core-component",
            RecordCategory::RefsetMember => "refset-member",
        }
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference-set member kinds subject to restoration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// Plain membership with no extra attributes
    Simple,
    /// Association between two components
    Association,
    /// Attribute-value annotation
    AttributeValue,
    /// Language acceptability
    Language,
    /// Simple map to an external code system
    SimpleMap,
    /// Complex map with grouping, priority and rules
    ComplexMap,
    /// Extended map (complex map plus a map category)
    ExtendedMap,
    /// Description format metadata
    DescriptionType,
    /// Module dependency versioning
    ModuleDependency,
    /// MRCM domain definition
    MrcmDomain,
    /// MRCM attribute-domain constraint
    MrcmAttributeDomain,
    /// MRCM attribute-range constraint
    MrcmAttributeRange,
    /// MRCM module scope
    MrcmModuleScope,
    /// OWL axiom or ontology expression
    OwlExpression,
    /// Stored query definition
    Query,
}

impl MemberKind {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Simple => "simple",
            MemberKind::Association => "association",
            MemberKind::AttributeValue => "attribute-value",
            MemberKind::Language => "language",
            MemberKind::SimpleMap => "simple-map",
            MemberKind::ComplexMap => "complex-map",
            MemberKind::ExtendedMap => "extended-map",
            MemberKind::DescriptionType => "description-type",
            MemberKind::ModuleDependency => "module-dependency",
            MemberKind::MrcmDomain => "mrcm-domain",
            MemberKind::MrcmAttributeDomain => "mrcm-attribute-domain",
            MemberKind::MrcmAttributeRange => "mrcm-attribute-range",
            MemberKind::MrcmModuleScope => "mrcm-module-scope",
            MemberKind::OwlExpression => "owl-expression",
            MemberKind::Query => "query",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A concept
    Concept,
    /// A description of a concept
    Description,
    /// A relationship between two concepts
    Relationship,
    /// A reference-set member
    Member(MemberKind),
}

impl RecordKind {
    /// The gate category this kind falls into
    pub fn category(&self) -> RecordCategory {
        match self {
            RecordKind::Concept | RecordKind::Description | RecordKind::Relationship => {
                RecordCategory::CoreComponent
            }
            RecordKind::Member(_) => RecordCategory::RefsetMember,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Concept => write!(f, "concept"),
            RecordKind::Description => write!(f, "description"),
            RecordKind::Relationship => write!(f, "relationship"),
            RecordKind::Member(kind) => write!(f, "member/{}", kind),
        }
    }
}

// =============================================================================
// Core component payloads
// =============================================================================

/// Concept-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptFields {
    /// Whether the concept is primitive or fully defined
    pub definition_status_id: ComponentId,
}

/// Description-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionFields {
    /// The concept this description names
    pub concept_id: ComponentId,
    /// ISO 639-1 language code, e.g. "en"
    pub language_code: String,
    /// Description type (FSN, synonym, definition)
    pub type_id: ComponentId,
    /// The term text itself
    pub term: String,
    /// Case significance of the term
    pub case_significance_id: ComponentId,
}

/// Relationship-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipFields {
    /// Source concept
    pub source_id: ComponentId,
    /// Relationship type concept
    pub type_id: ComponentId,
    /// Destination concept
    pub destination_id: ComponentId,
    /// Role group number (0 = ungrouped)
    pub relationship_group: u32,
    /// Union group number (0 = ungrouped)
    pub union_group: u32,
    /// Stated/inferred/additional characteristic
    pub characteristic_type_id: ComponentId,
    /// Modifier (existential/universal)
    pub modifier_id: ComponentId,
}

// =============================================================================
// Reference-set member payloads
// =============================================================================

/// Common reference-set member fields plus the kind-specific detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFields {
    /// The reference set this member belongs to
    pub refset_id: ComponentId,
    /// The component this membership is about
    pub referenced_component_id: RecordId,
    /// Kind-specific attributes
    pub detail: MemberDetail,
}

/// Simple-map member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleMapMember {
    /// Code in the target scheme
    pub map_target: String,
    /// Optional human-readable rendering of the target
    pub map_target_description: Option<String>,
}

/// Complex-map member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexMapMember {
    /// Code in the target scheme
    pub map_target: String,
    /// Group of parallel map rules this row belongs to
    pub map_group: u32,
    /// Priority of this row within its group
    pub map_priority: u32,
    /// Machine-readable rule guarding this row
    pub map_rule: Option<String>,
    /// Human advice accompanying this row
    pub map_advice: Option<String>,
    /// Correlation between source and target
    pub correlation_id: ComponentId,
}

/// Extended-map member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMapMember {
    /// Code in the target scheme
    pub map_target: String,
    /// Group of parallel map rules this row belongs to
    pub map_group: u32,
    /// Priority of this row within its group
    pub map_priority: u32,
    /// Machine-readable rule guarding this row
    pub map_rule: Option<String>,
    /// Human advice accompanying this row
    pub map_advice: Option<String>,
    /// Correlation between source and target
    pub correlation_id: ComponentId,
    /// Category qualifying the map, e.g. "properly classified"
    pub map_category_id: ComponentId,
}

/// Description-type member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTypeMember {
    /// Format of descriptions of this type
    pub description_format_id: ComponentId,
    /// Maximum description length in characters
    pub description_length: u32,
}

/// Module-dependency member attributes
///
/// Either side may be unset while a dependency is being authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDependencyMember {
    /// Release of the depending module
    pub source_effective_time: Option<EffectiveTime>,
    /// Release of the depended-on module
    pub target_effective_time: Option<EffectiveTime>,
}

/// MRCM domain member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrcmDomainMember {
    /// Constraint defining the domain
    pub domain_constraint: String,
    /// Parent domain, if any
    pub parent_domain: Option<String>,
    /// Proximal primitive constraint
    pub proximal_primitive_constraint: String,
    /// Proximal primitive refinement, if any
    pub proximal_primitive_refinement: Option<String>,
    /// Expression template for pre-coordination
    pub domain_template_for_precoordination: String,
    /// Expression template for post-coordination
    pub domain_template_for_postcoordination: String,
    /// Editorial guide reference, if any
    pub editorial_guide_reference: Option<String>,
}

/// MRCM attribute-domain member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrcmAttributeDomainMember {
    /// Domain the attribute applies to
    pub domain_id: ComponentId,
    /// Whether the attribute may appear in role groups
    pub grouped: bool,
    /// Cardinality of the attribute, e.g. "0..*"
    pub attribute_cardinality: String,
    /// Cardinality within a single group
    pub attribute_in_group_cardinality: String,
    /// Mandatory or optional rule strength
    pub rule_strength_id: ComponentId,
    /// Content type the rule applies to
    pub content_type_id: ComponentId,
}

/// MRCM attribute-range member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrcmAttributeRangeMember {
    /// Constraint on permitted attribute values
    pub range_constraint: String,
    /// Rule combining the attribute with its range
    pub attribute_rule: String,
    /// Mandatory or optional rule strength
    pub rule_strength_id: ComponentId,
    /// Content type the rule applies to
    pub content_type_id: ComponentId,
}

/// Kind-specific member attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberDetail {
    /// Plain membership with no extra attributes
    Simple,
    /// Association between two components
    Association {
        /// Target of the association
        target_component_id: ComponentId,
    },
    /// Attribute-value annotation
    AttributeValue {
        /// The attributed value concept
        value_id: ComponentId,
    },
    /// Language acceptability
    Language {
        /// Acceptable or preferred
        acceptability_id: ComponentId,
    },
    /// Simple map to an external code system
    SimpleMap(SimpleMapMember),
    /// Complex map with grouping, priority and rules
    ComplexMap(ComplexMapMember),
    /// Extended map (complex map plus a map category)
    ExtendedMap(ExtendedMapMember),
    /// Description format metadata
    DescriptionType(DescriptionTypeMember),
    /// Module dependency versioning
    ModuleDependency(ModuleDependencyMember),
    /// MRCM domain definition
    MrcmDomain(MrcmDomainMember),
    /// MRCM attribute-domain constraint
    MrcmAttributeDomain(MrcmAttributeDomainMember),
    /// MRCM attribute-range constraint
    MrcmAttributeRange(MrcmAttributeRangeMember),
    /// MRCM module scope
    MrcmModuleScope {
        /// The MRCM rule reference set in scope
        rule_refset_id: ComponentId,
    },
    /// OWL axiom or ontology expression
    OwlExpression {
        /// The OWL expression text
        expression: String,
    },
    /// Stored query definition
    Query {
        /// The query text
        query: String,
    },
}

impl MemberDetail {
    /// The member kind of this payload
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberDetail::Simple => MemberKind::Simple,
            MemberDetail::Association { .. } => MemberKind::Association,
            MemberDetail::AttributeValue { .. } => MemberKind::AttributeValue,
            MemberDetail::Language { .. } => MemberKind::Language,
            MemberDetail::SimpleMap(_) => MemberKind::SimpleMap,
            MemberDetail::ComplexMap(_) => MemberKind::ComplexMap,
            MemberDetail::ExtendedMap(_) => MemberKind::ExtendedMap,
            MemberDetail::DescriptionType(_) => MemberKind::DescriptionType,
            MemberDetail::ModuleDependency(_) => MemberKind::ModuleDependency,
            MemberDetail::MrcmDomain(_) => MemberKind::MrcmDomain,
            MemberDetail::MrcmAttributeDomain(_) => MemberKind::MrcmAttributeDomain,
            MemberDetail::MrcmAttributeRange(_) => MemberKind::MrcmAttributeRange,
            MemberDetail::MrcmModuleScope { .. } => MemberKind::MrcmModuleScope,
            MemberDetail::OwlExpression { .. } => MemberKind::OwlExpression,
            MemberDetail::Query { .. } => MemberKind::Query,
        }
    }
}

/// Kind-specific record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordData {
    /// A concept
    Concept(ConceptFields),
    /// A description
    Description(DescriptionFields),
    /// A relationship
    Relationship(RelationshipFields),
    /// A reference-set member
    Member(MemberFields),
}

impl RecordData {
    /// The kind of this payload
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordData::Concept(_) => RecordKind::Concept,
            RecordData::Description(_) => RecordKind::Description,
            RecordData::Relationship(_) => RecordKind::Relationship,
            RecordData::Member(member) => RecordKind::Member(member.detail.kind()),
        }
    }

    /// The gate category of this payload
    pub fn category(&self) -> RecordCategory {
        self.kind().category()
    }
}

// =============================================================================
// Record
// =============================================================================

/// One editable terminology record on a branch
///
/// Owned by the caller throughout; the restoration engine touches nothing
/// but `effective_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier
    pub id: RecordId,
    /// Whether the record is active
    pub active: bool,
    /// Module the record belongs to
    pub module_id: ComponentId,
    /// Date of the release this state matches; None while pending
    pub effective_time: Option<EffectiveTime>,
    /// Whether any release of this record exists in the branch ancestry
    pub released: bool,
    /// Kind-specific fields
    pub data: RecordData,
}

impl Record {
    /// Create an active, unreleased record with a pending effective time
    pub fn new(id: impl Into<RecordId>, module_id: ComponentId, data: RecordData) -> Self {
        Record {
            id: id.into(),
            active: true,
            module_id,
            effective_time: None,
            released: false,
            data,
        }
    }

    /// The kind of this record
    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    /// The gate category of this record
    pub fn category(&self) -> RecordCategory {
        self.data.category()
    }

    /// Whether this record's state matches a release
    pub fn is_published(&self) -> bool {
        self.effective_time.is_some()
    }

    /// Whether this record is a candidate for effective-time restoration
    ///
    /// True for released records whose effective time was cleared by an edit.
    pub fn needs_restoration(&self) -> bool {
        self.released && self.effective_time.is_none()
    }
}

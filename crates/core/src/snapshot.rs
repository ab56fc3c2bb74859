//! Released snapshot model
//!
//! A [`RecordSnapshot`] is the immutable state of one record as some release
//! froze it. Snapshots are produced by the repository a branch lookup runs
//! against; this crate never creates or mutates them during restoration.
//!
//! Kind-specific snapshot attributes are wrapped in [`Recorded`]: a release
//! may have recorded a field or not, and an unrecorded field must never be
//! mistaken for a recorded empty value. Nullable attributes are stored as
//! `Recorded<Option<T>>`, so "not recorded" and "recorded as null" stay
//! distinct.

use crate::effective_time::EffectiveTime;
use crate::record::{MemberDetail, MemberKind, Record, RecordData, RecordKind};
use crate::types::{ComponentId, RecordId};
use serde::{Deserialize, Serialize};

/// A field value as a release recorded it
///
/// `Absent` means the release did not record the field at all. During
/// restoration comparisons an absent field agrees with any current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recorded<T> {
    /// The field was not recorded at release time
    #[default]
    Absent,
    /// The field was recorded with this value
    Present(T),
}

impl<T> Recorded<T> {
    /// Whether the field was not recorded
    pub fn is_absent(&self) -> bool {
        matches!(self, Recorded::Absent)
    }

    /// Whether the field was recorded
    pub fn is_present(&self) -> bool {
        matches!(self, Recorded::Present(_))
    }

    /// The recorded value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Recorded::Absent => None,
            Recorded::Present(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Recorded<T> {
    /// Compare against the current value of the field
    ///
    /// An absent field agrees with anything; a recorded field agrees only
    /// with an equal current value.
    pub fn agrees_with(&self, current: &T) -> bool {
        match self {
            Recorded::Absent => true,
            Recorded::Present(previous) => previous == current,
        }
    }
}

impl<T> From<T> for Recorded<T> {
    fn from(value: T) -> Self {
        Recorded::Present(value)
    }
}

// =============================================================================
// Core component snapshots
// =============================================================================

/// Concept fields as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSnapshot {
    /// Definition status at release
    pub definition_status_id: Recorded<ComponentId>,
}

/// Description fields as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionSnapshot {
    /// Named concept at release
    pub concept_id: Recorded<ComponentId>,
    /// Language code at release
    pub language_code: Recorded<String>,
    /// Description type at release
    pub type_id: Recorded<ComponentId>,
    /// Term text at release
    pub term: Recorded<String>,
    /// Case significance at release
    pub case_significance_id: Recorded<ComponentId>,
}

/// Relationship fields as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipSnapshot {
    /// Source concept at release
    pub source_id: Recorded<ComponentId>,
    /// Relationship type at release
    pub type_id: Recorded<ComponentId>,
    /// Destination concept at release
    pub destination_id: Recorded<ComponentId>,
    /// Role group at release
    pub relationship_group: Recorded<u32>,
    /// Union group at release
    pub union_group: Recorded<u32>,
    /// Characteristic type at release
    pub characteristic_type_id: Recorded<ComponentId>,
    /// Modifier at release
    pub modifier_id: Recorded<ComponentId>,
}

// =============================================================================
// Reference-set member snapshots
// =============================================================================

/// Simple-map attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleMapSnapshot {
    /// Map target at release
    pub map_target: Recorded<String>,
    /// Map target description at release
    pub map_target_description: Recorded<Option<String>>,
}

/// Complex-map attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexMapSnapshot {
    /// Map target at release
    pub map_target: Recorded<String>,
    /// Map group at release
    pub map_group: Recorded<u32>,
    /// Map priority at release
    pub map_priority: Recorded<u32>,
    /// Map rule at release
    pub map_rule: Recorded<Option<String>>,
    /// Map advice at release
    pub map_advice: Recorded<Option<String>>,
    /// Correlation at release
    pub correlation_id: Recorded<ComponentId>,
}

/// Extended-map attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedMapSnapshot {
    /// Map target at release
    pub map_target: Recorded<String>,
    /// Map group at release
    pub map_group: Recorded<u32>,
    /// Map priority at release
    pub map_priority: Recorded<u32>,
    /// Map rule at release
    pub map_rule: Recorded<Option<String>>,
    /// Map advice at release
    pub map_advice: Recorded<Option<String>>,
    /// Correlation at release
    pub correlation_id: Recorded<ComponentId>,
    /// Map category at release
    pub map_category_id: Recorded<ComponentId>,
}

/// Description-type attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTypeSnapshot {
    /// Description format at release
    pub description_format_id: Recorded<ComponentId>,
    /// Description length at release
    pub description_length: Recorded<u32>,
}

/// Module-dependency attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDependencySnapshot {
    /// Source module release date, when recorded
    pub source_effective_time: Recorded<Option<EffectiveTime>>,
    /// Target module release date, when recorded
    pub target_effective_time: Recorded<Option<EffectiveTime>>,
}

/// MRCM domain attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrcmDomainSnapshot {
    /// Domain constraint at release
    pub domain_constraint: Recorded<String>,
    /// Parent domain at release
    pub parent_domain: Recorded<Option<String>>,
    /// Proximal primitive constraint at release
    pub proximal_primitive_constraint: Recorded<String>,
    /// Proximal primitive refinement at release
    pub proximal_primitive_refinement: Recorded<Option<String>>,
    /// Pre-coordination template at release
    pub domain_template_for_precoordination: Recorded<String>,
    /// Post-coordination template at release
    pub domain_template_for_postcoordination: Recorded<String>,
    /// Editorial guide reference at release
    pub editorial_guide_reference: Recorded<Option<String>>,
}

/// MRCM attribute-domain attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrcmAttributeDomainSnapshot {
    /// Domain at release
    pub domain_id: Recorded<ComponentId>,
    /// Grouped flag at release
    pub grouped: Recorded<bool>,
    /// Attribute cardinality at release
    pub attribute_cardinality: Recorded<String>,
    /// In-group cardinality at release
    pub attribute_in_group_cardinality: Recorded<String>,
    /// Rule strength at release
    pub rule_strength_id: Recorded<ComponentId>,
    /// Content type at release
    pub content_type_id: Recorded<ComponentId>,
}

/// MRCM attribute-range attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrcmAttributeRangeSnapshot {
    /// Range constraint at release
    pub range_constraint: Recorded<String>,
    /// Attribute rule at release
    pub attribute_rule: Recorded<String>,
    /// Rule strength at release
    pub rule_strength_id: Recorded<ComponentId>,
    /// Content type at release
    pub content_type_id: Recorded<ComponentId>,
}

/// Kind-specific member attributes as recorded at release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberSnapshot {
    /// Plain membership
    Simple,
    /// Association
    Association {
        /// Association target at release
        target_component_id: Recorded<ComponentId>,
    },
    /// Attribute-value annotation
    AttributeValue {
        /// Value at release
        value_id: Recorded<ComponentId>,
    },
    /// Language acceptability
    Language {
        /// Acceptability at release
        acceptability_id: Recorded<ComponentId>,
    },
    /// Simple map
    SimpleMap(SimpleMapSnapshot),
    /// Complex map
    ComplexMap(ComplexMapSnapshot),
    /// Extended map
    ExtendedMap(ExtendedMapSnapshot),
    /// Description format metadata
    DescriptionType(DescriptionTypeSnapshot),
    /// Module dependency
    ModuleDependency(ModuleDependencySnapshot),
    /// MRCM domain definition
    MrcmDomain(MrcmDomainSnapshot),
    /// MRCM attribute-domain constraint
    MrcmAttributeDomain(MrcmAttributeDomainSnapshot),
    /// MRCM attribute-range constraint
    MrcmAttributeRange(MrcmAttributeRangeSnapshot),
    /// MRCM module scope
    MrcmModuleScope {
        /// Rule reference set at release
        rule_refset_id: Recorded<ComponentId>,
    },
    /// OWL expression
    OwlExpression {
        /// Expression text at release
        expression: Recorded<String>,
    },
    /// Stored query
    Query {
        /// Query text at release
        query: Recorded<String>,
    },
}

/// Kind-specific snapshot payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotData {
    /// A concept
    Concept(ConceptSnapshot),
    /// A description
    Description(DescriptionSnapshot),
    /// A relationship
    Relationship(RelationshipSnapshot),
    /// A reference-set member
    Member(MemberSnapshot),
}

impl MemberSnapshot {
    /// The member kind of this payload
    pub fn kind(&self) -> MemberKind {
        match self {
            MemberSnapshot::Simple => MemberKind::Simple,
            MemberSnapshot::Association { .. } => MemberKind::Association,
            MemberSnapshot::AttributeValue { .. } => MemberKind::AttributeValue,
            MemberSnapshot::Language { .. } => MemberKind::Language,
            MemberSnapshot::SimpleMap(_) => MemberKind::SimpleMap,
            MemberSnapshot::ComplexMap(_) => MemberKind::ComplexMap,
            MemberSnapshot::ExtendedMap(_) => MemberKind::ExtendedMap,
            MemberSnapshot::DescriptionType(_) => MemberKind::DescriptionType,
            MemberSnapshot::ModuleDependency(_) => MemberKind::ModuleDependency,
            MemberSnapshot::MrcmDomain(_) => MemberKind::MrcmDomain,
            MemberSnapshot::MrcmAttributeDomain(_) => MemberKind::MrcmAttributeDomain,
            MemberSnapshot::MrcmAttributeRange(_) => MemberKind::MrcmAttributeRange,
            MemberSnapshot::MrcmModuleScope { .. } => MemberKind::MrcmModuleScope,
            MemberSnapshot::OwlExpression { .. } => MemberKind::OwlExpression,
            MemberSnapshot::Query { .. } => MemberKind::Query,
        }
    }
}

impl SnapshotData {
    /// The kind of this payload
    pub fn kind(&self) -> RecordKind {
        match self {
            SnapshotData::Concept(_) => RecordKind::Concept,
            SnapshotData::Description(_) => RecordKind::Description,
            SnapshotData::Relationship(_) => RecordKind::Relationship,
            SnapshotData::Member(member) => RecordKind::Member(member.kind()),
        }
    }
}

/// Immutable view of one record as a release froze it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Record identifier
    pub id: RecordId,
    /// Whether the record was active at release
    pub active: bool,
    /// Module the record belonged to at release
    pub module_id: ComponentId,
    /// Date of the release this snapshot belongs to
    pub effective_time: Option<EffectiveTime>,
    /// Kind-specific fields as recorded
    pub data: SnapshotData,
}

impl RecordSnapshot {
    /// The kind of this snapshot
    pub fn kind(&self) -> RecordKind {
        self.data.kind()
    }

    /// Freeze a record's current state as a release snapshot
    ///
    /// Every kind-specific field comes out `Recorded::Present`. Release
    /// tooling uses this when stamping a batch; tests use it to seed
    /// repositories with known previous versions.
    pub fn release_of(record: &Record, effective_time: EffectiveTime) -> Self {
        RecordSnapshot {
            id: record.id.clone(),
            active: record.active,
            module_id: record.module_id.clone(),
            effective_time: Some(effective_time),
            data: SnapshotData::fully_recorded(&record.data),
        }
    }
}

impl SnapshotData {
    /// Convert an editable payload into a snapshot with every field recorded
    pub fn fully_recorded(data: &RecordData) -> Self {
        match data {
            RecordData::Concept(c) => SnapshotData::Concept(ConceptSnapshot {
                definition_status_id: c.definition_status_id.clone().into(),
            }),
            RecordData::Description(d) => SnapshotData::Description(DescriptionSnapshot {
                concept_id: d.concept_id.clone().into(),
                language_code: d.language_code.clone().into(),
                type_id: d.type_id.clone().into(),
                term: d.term.clone().into(),
                case_significance_id: d.case_significance_id.clone().into(),
            }),
            RecordData::Relationship(r) => SnapshotData::Relationship(RelationshipSnapshot {
                source_id: r.source_id.clone().into(),
                type_id: r.type_id.clone().into(),
                destination_id: r.destination_id.clone().into(),
                relationship_group: r.relationship_group.into(),
                union_group: r.union_group.into(),
                characteristic_type_id: r.characteristic_type_id.clone().into(),
                modifier_id: r.modifier_id.clone().into(),
            }),
            RecordData::Member(m) => SnapshotData::Member(match &m.detail {
                MemberDetail::Simple => MemberSnapshot::Simple,
                MemberDetail::Association {
                    target_component_id,
                } => MemberSnapshot::Association {
                    target_component_id: target_component_id.clone().into(),
                },
                MemberDetail::AttributeValue { value_id } => MemberSnapshot::AttributeValue {
                    value_id: value_id.clone().into(),
                },
                MemberDetail::Language { acceptability_id } => MemberSnapshot::Language {
                    acceptability_id: acceptability_id.clone().into(),
                },
                MemberDetail::SimpleMap(map) => MemberSnapshot::SimpleMap(SimpleMapSnapshot {
                    map_target: map.map_target.clone().into(),
                    map_target_description: map.map_target_description.clone().into(),
                }),
                MemberDetail::ComplexMap(map) => MemberSnapshot::ComplexMap(ComplexMapSnapshot {
                    map_target: map.map_target.clone().into(),
                    map_group: map.map_group.into(),
                    map_priority: map.map_priority.into(),
                    map_rule: map.map_rule.clone().into(),
                    map_advice: map.map_advice.clone().into(),
                    correlation_id: map.correlation_id.clone().into(),
                }),
                MemberDetail::ExtendedMap(map) => MemberSnapshot::ExtendedMap(ExtendedMapSnapshot {
                    map_target: map.map_target.clone().into(),
                    map_group: map.map_group.into(),
                    map_priority: map.map_priority.into(),
                    map_rule: map.map_rule.clone().into(),
                    map_advice: map.map_advice.clone().into(),
                    correlation_id: map.correlation_id.clone().into(),
                    map_category_id: map.map_category_id.clone().into(),
                }),
                MemberDetail::DescriptionType(dt) => {
                    MemberSnapshot::DescriptionType(DescriptionTypeSnapshot {
                        description_format_id: dt.description_format_id.clone().into(),
                        description_length: dt.description_length.into(),
                    })
                }
                MemberDetail::ModuleDependency(md) => {
                    MemberSnapshot::ModuleDependency(ModuleDependencySnapshot {
                        source_effective_time: md.source_effective_time.into(),
                        target_effective_time: md.target_effective_time.into(),
                    })
                }
                MemberDetail::MrcmDomain(d) => MemberSnapshot::MrcmDomain(MrcmDomainSnapshot {
                    domain_constraint: d.domain_constraint.clone().into(),
                    parent_domain: d.parent_domain.clone().into(),
                    proximal_primitive_constraint: d.proximal_primitive_constraint.clone().into(),
                    proximal_primitive_refinement: d.proximal_primitive_refinement.clone().into(),
                    domain_template_for_precoordination: d
                        .domain_template_for_precoordination
                        .clone()
                        .into(),
                    domain_template_for_postcoordination: d
                        .domain_template_for_postcoordination
                        .clone()
                        .into(),
                    editorial_guide_reference: d.editorial_guide_reference.clone().into(),
                }),
                MemberDetail::MrcmAttributeDomain(d) => {
                    MemberSnapshot::MrcmAttributeDomain(MrcmAttributeDomainSnapshot {
                        domain_id: d.domain_id.clone().into(),
                        grouped: d.grouped.into(),
                        attribute_cardinality: d.attribute_cardinality.clone().into(),
                        attribute_in_group_cardinality: d
                            .attribute_in_group_cardinality
                            .clone()
                            .into(),
                        rule_strength_id: d.rule_strength_id.clone().into(),
                        content_type_id: d.content_type_id.clone().into(),
                    })
                }
                MemberDetail::MrcmAttributeRange(d) => {
                    MemberSnapshot::MrcmAttributeRange(MrcmAttributeRangeSnapshot {
                        range_constraint: d.range_constraint.clone().into(),
                        attribute_rule: d.attribute_rule.clone().into(),
                        rule_strength_id: d.rule_strength_id.clone().into(),
                        content_type_id: d.content_type_id.clone().into(),
                    })
                }
                MemberDetail::MrcmModuleScope { rule_refset_id } => {
                    MemberSnapshot::MrcmModuleScope {
                        rule_refset_id: rule_refset_id.clone().into(),
                    }
                }
                MemberDetail::OwlExpression { expression } => MemberSnapshot::OwlExpression {
                    expression: expression.clone().into(),
                },
                MemberDetail::Query { query } => MemberSnapshot::Query {
                    query: query.clone().into(),
                },
            }),
        }
    }
}

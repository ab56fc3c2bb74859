//! Structural equality rules, one per record kind
//!
//! Each rule compares the kind-specific fields of an edited record against
//! the nearest released snapshot of the same record. Every rule is a pure
//! conjunction: any recorded, differing field fails it. A field the release
//! never recorded (`Recorded::Absent`) agrees with any current value and
//! never blocks a match.
//!
//! Dispatch is a closed match over the kind pair. Adding a record kind means
//! adding one arm here; the gate and the coordinator are unaffected.

use termbase_core::{
    ComplexMapMember, ComplexMapSnapshot, ConceptFields, ConceptSnapshot, DescriptionFields,
    DescriptionSnapshot, DescriptionTypeMember, DescriptionTypeSnapshot, ExtendedMapMember,
    ExtendedMapSnapshot, MemberDetail, MemberSnapshot, ModuleDependencyMember,
    ModuleDependencySnapshot, MrcmAttributeDomainMember, MrcmAttributeDomainSnapshot,
    MrcmAttributeRangeMember, MrcmAttributeRangeSnapshot, MrcmDomainMember, MrcmDomainSnapshot,
    RecordData, RelationshipFields, RelationshipSnapshot, SimpleMapMember, SimpleMapSnapshot,
    SnapshotData,
};

/// Whether the edited payload is structurally identical to the released one.
pub(crate) fn content_matches(current: &RecordData, previous: &SnapshotData) -> bool {
    match (current, previous) {
        (RecordData::Concept(c), SnapshotData::Concept(p)) => concept(c, p),
        (RecordData::Description(d), SnapshotData::Description(p)) => description(d, p),
        (RecordData::Relationship(r), SnapshotData::Relationship(p)) => relationship(r, p),
        (RecordData::Member(m), SnapshotData::Member(p)) => member(&m.detail, p),
        // A snapshot of a different kind cannot confirm a no-op edit.
        _ => false,
    }
}

fn concept(current: &ConceptFields, previous: &ConceptSnapshot) -> bool {
    previous
        .definition_status_id
        .agrees_with(&current.definition_status_id)
}

fn description(current: &DescriptionFields, previous: &DescriptionSnapshot) -> bool {
    previous.concept_id.agrees_with(&current.concept_id)
        && previous.language_code.agrees_with(&current.language_code)
        && previous.type_id.agrees_with(&current.type_id)
        && previous.term.agrees_with(&current.term)
        && previous
            .case_significance_id
            .agrees_with(&current.case_significance_id)
}

fn relationship(current: &RelationshipFields, previous: &RelationshipSnapshot) -> bool {
    previous.source_id.agrees_with(&current.source_id)
        && previous.type_id.agrees_with(&current.type_id)
        && previous.destination_id.agrees_with(&current.destination_id)
        && previous
            .relationship_group
            .agrees_with(&current.relationship_group)
        && previous.union_group.agrees_with(&current.union_group)
        && previous
            .characteristic_type_id
            .agrees_with(&current.characteristic_type_id)
        && previous.modifier_id.agrees_with(&current.modifier_id)
}

fn member(current: &MemberDetail, previous: &MemberSnapshot) -> bool {
    match (current, previous) {
        // Simple members carry nothing beyond what the gate already vetted.
        (MemberDetail::Simple, MemberSnapshot::Simple) => true,
        (
            MemberDetail::Association {
                target_component_id,
            },
            MemberSnapshot::Association {
                target_component_id: previous_target,
            },
        ) => previous_target.agrees_with(target_component_id),
        (
            MemberDetail::AttributeValue { value_id },
            MemberSnapshot::AttributeValue {
                value_id: previous_value,
            },
        ) => previous_value.agrees_with(value_id),
        (
            MemberDetail::Language { acceptability_id },
            MemberSnapshot::Language {
                acceptability_id: previous_acceptability,
            },
        ) => previous_acceptability.agrees_with(acceptability_id),
        (MemberDetail::SimpleMap(m), MemberSnapshot::SimpleMap(p)) => simple_map(m, p),
        (MemberDetail::ComplexMap(m), MemberSnapshot::ComplexMap(p)) => complex_map(m, p),
        (MemberDetail::ExtendedMap(m), MemberSnapshot::ExtendedMap(p)) => extended_map(m, p),
        (MemberDetail::DescriptionType(m), MemberSnapshot::DescriptionType(p)) => {
            description_type(m, p)
        }
        (MemberDetail::ModuleDependency(m), MemberSnapshot::ModuleDependency(p)) => {
            module_dependency(m, p)
        }
        (MemberDetail::MrcmDomain(m), MemberSnapshot::MrcmDomain(p)) => mrcm_domain(m, p),
        (MemberDetail::MrcmAttributeDomain(m), MemberSnapshot::MrcmAttributeDomain(p)) => {
            mrcm_attribute_domain(m, p)
        }
        (MemberDetail::MrcmAttributeRange(m), MemberSnapshot::MrcmAttributeRange(p)) => {
            mrcm_attribute_range(m, p)
        }
        (
            MemberDetail::MrcmModuleScope { rule_refset_id },
            MemberSnapshot::MrcmModuleScope {
                rule_refset_id: previous_refset,
            },
        ) => previous_refset.agrees_with(rule_refset_id),
        (
            MemberDetail::OwlExpression { expression },
            MemberSnapshot::OwlExpression {
                expression: previous_expression,
            },
        ) => previous_expression.agrees_with(expression),
        (
            MemberDetail::Query { query },
            MemberSnapshot::Query {
                query: previous_query,
            },
        ) => previous_query.agrees_with(query),
        _ => false,
    }
}

fn simple_map(current: &SimpleMapMember, previous: &SimpleMapSnapshot) -> bool {
    previous.map_target.agrees_with(&current.map_target)
        && previous
            .map_target_description
            .agrees_with(&current.map_target_description)
}

fn complex_map(current: &ComplexMapMember, previous: &ComplexMapSnapshot) -> bool {
    previous.map_target.agrees_with(&current.map_target)
        && previous.map_group.agrees_with(&current.map_group)
        && previous.map_priority.agrees_with(&current.map_priority)
        && previous.map_rule.agrees_with(&current.map_rule)
        && previous.map_advice.agrees_with(&current.map_advice)
        && previous.correlation_id.agrees_with(&current.correlation_id)
}

fn extended_map(current: &ExtendedMapMember, previous: &ExtendedMapSnapshot) -> bool {
    let fields_agree = previous.map_target.agrees_with(&current.map_target)
        && previous.map_group.agrees_with(&current.map_group)
        && previous.map_priority.agrees_with(&current.map_priority)
        && previous.map_rule.agrees_with(&current.map_rule)
        && previous.map_advice.agrees_with(&current.map_advice)
        && previous.correlation_id.agrees_with(&current.correlation_id)
        && previous.map_category_id.agrees_with(&current.map_category_id);
    // Extended map members always take a fresh effective time, even when
    // every recorded field agrees.
    // TODO: decide with the mapping team whether an unchanged extended map
    // row may reuse its previous release date; until then the comparison
    // result is deliberately discarded.
    let _ = fields_agree;
    false
}

fn description_type(current: &DescriptionTypeMember, previous: &DescriptionTypeSnapshot) -> bool {
    previous
        .description_format_id
        .agrees_with(&current.description_format_id)
        && previous
            .description_length
            .agrees_with(&current.description_length)
}

fn module_dependency(
    current: &ModuleDependencyMember,
    previous: &ModuleDependencySnapshot,
) -> bool {
    previous
        .source_effective_time
        .agrees_with(&current.source_effective_time)
        && previous
            .target_effective_time
            .agrees_with(&current.target_effective_time)
}

fn mrcm_domain(current: &MrcmDomainMember, previous: &MrcmDomainSnapshot) -> bool {
    previous
        .domain_constraint
        .agrees_with(&current.domain_constraint)
        && previous.parent_domain.agrees_with(&current.parent_domain)
        && previous
            .proximal_primitive_constraint
            .agrees_with(&current.proximal_primitive_constraint)
        && previous
            .proximal_primitive_refinement
            .agrees_with(&current.proximal_primitive_refinement)
        && previous
            .domain_template_for_precoordination
            .agrees_with(&current.domain_template_for_precoordination)
        && previous
            .domain_template_for_postcoordination
            .agrees_with(&current.domain_template_for_postcoordination)
        && previous
            .editorial_guide_reference
            .agrees_with(&current.editorial_guide_reference)
}

fn mrcm_attribute_domain(
    current: &MrcmAttributeDomainMember,
    previous: &MrcmAttributeDomainSnapshot,
) -> bool {
    previous.domain_id.agrees_with(&current.domain_id)
        && previous.grouped.agrees_with(&current.grouped)
        && previous
            .attribute_cardinality
            .agrees_with(&current.attribute_cardinality)
        && previous
            .attribute_in_group_cardinality
            .agrees_with(&current.attribute_in_group_cardinality)
        && previous
            .rule_strength_id
            .agrees_with(&current.rule_strength_id)
        && previous.content_type_id.agrees_with(&current.content_type_id)
}

fn mrcm_attribute_range(
    current: &MrcmAttributeRangeMember,
    previous: &MrcmAttributeRangeSnapshot,
) -> bool {
    previous
        .range_constraint
        .agrees_with(&current.range_constraint)
        && previous.attribute_rule.agrees_with(&current.attribute_rule)
        && previous
            .rule_strength_id
            .agrees_with(&current.rule_strength_id)
        && previous.content_type_id.agrees_with(&current.content_type_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termbase_core::{ComponentId, EffectiveTime, Recorded};

    fn cid(id: &str) -> ComponentId {
        ComponentId::new_unchecked(id)
    }

    fn relationship_fields() -> RelationshipFields {
        RelationshipFields {
            source_id: cid("100005"),
            type_id: cid("116680003"),
            destination_id: cid("138875005"),
            relationship_group: 0,
            union_group: 0,
            characteristic_type_id: cid("900000000000011006"),
            modifier_id: cid("900000000000451002"),
        }
    }

    fn fully_recorded(data: &RecordData) -> SnapshotData {
        SnapshotData::fully_recorded(data)
    }

    #[test]
    fn test_concept_definition_status_decides() {
        let current = ConceptFields {
            definition_status_id: cid("900000000000074008"),
        };
        let same = ConceptSnapshot {
            definition_status_id: Recorded::Present(cid("900000000000074008")),
        };
        let different = ConceptSnapshot {
            definition_status_id: Recorded::Present(cid("900000000000073002")),
        };
        let unrecorded = ConceptSnapshot {
            definition_status_id: Recorded::Absent,
        };
        assert!(concept(&current, &same));
        assert!(!concept(&current, &different));
        assert!(concept(&current, &unrecorded));
    }

    #[test]
    fn test_description_any_field_change_fails() {
        let current = DescriptionFields {
            concept_id: cid("138875005"),
            language_code: "en".to_string(),
            type_id: cid("900000000000003001"),
            term: "Clinical finding".to_string(),
            case_significance_id: cid("900000000000448009"),
        };
        let identical = fully_recorded(&RecordData::Description(current.clone()));
        let SnapshotData::Description(identical) = identical else {
            unreachable!()
        };
        assert!(description(&current, &identical));

        let mut retermed = identical.clone();
        retermed.term = Recorded::Present("Clinical observation".to_string());
        assert!(!description(&current, &retermed));

        let mut relanguaged = identical.clone();
        relanguaged.language_code = Recorded::Present("da".to_string());
        assert!(!description(&current, &relanguaged));
    }

    #[test]
    fn test_relationship_all_seven_fields_compared() {
        let current = relationship_fields();
        let identical = fully_recorded(&RecordData::Relationship(current.clone()));
        let SnapshotData::Relationship(identical) = identical else {
            unreachable!()
        };
        assert!(relationship(&current, &identical));

        let mut regrouped = identical.clone();
        regrouped.relationship_group = Recorded::Present(2);
        assert!(!relationship(&current, &regrouped));

        let mut redirected = identical.clone();
        redirected.destination_id = Recorded::Present(cid("73211009"));
        assert!(!relationship(&current, &redirected));
    }

    #[test]
    fn test_relationship_unrecorded_fields_never_block() {
        let current = relationship_fields();
        let sparse = RelationshipSnapshot {
            source_id: Recorded::Present(cid("100005")),
            type_id: Recorded::Absent,
            destination_id: Recorded::Absent,
            relationship_group: Recorded::Absent,
            union_group: Recorded::Absent,
            characteristic_type_id: Recorded::Absent,
            modifier_id: Recorded::Absent,
        };
        assert!(relationship(&current, &sparse));
    }

    #[test]
    fn test_complex_map_unrecorded_rule_never_blocks() {
        let current = ComplexMapMember {
            map_target: "A01.0".to_string(),
            map_group: 1,
            map_priority: 1,
            map_rule: Some("TRUE".to_string()),
            map_advice: None,
            correlation_id: cid("447561005"),
        };
        let mut previous = ComplexMapSnapshot {
            map_target: Recorded::Present("A01.0".to_string()),
            map_group: Recorded::Present(1),
            map_priority: Recorded::Present(1),
            map_rule: Recorded::Absent,
            map_advice: Recorded::Present(None),
            correlation_id: Recorded::Present(cid("447561005")),
        };
        assert!(complex_map(&current, &previous));

        // A recorded null rule is a real disagreement with a current rule.
        previous.map_rule = Recorded::Present(None);
        assert!(!complex_map(&current, &previous));
    }

    #[test]
    fn test_extended_map_never_matches() {
        let current = ExtendedMapMember {
            map_target: "A01.0".to_string(),
            map_group: 1,
            map_priority: 1,
            map_rule: None,
            map_advice: None,
            correlation_id: cid("447561005"),
            map_category_id: cid("447639009"),
        };
        let identical = ExtendedMapSnapshot {
            map_target: Recorded::Present("A01.0".to_string()),
            map_group: Recorded::Present(1),
            map_priority: Recorded::Present(1),
            map_rule: Recorded::Present(None),
            map_advice: Recorded::Present(None),
            correlation_id: Recorded::Present(cid("447561005")),
            map_category_id: Recorded::Present(cid("447639009")),
        };
        assert!(!extended_map(&current, &identical));

        let unrecorded = ExtendedMapSnapshot {
            map_target: Recorded::Absent,
            map_group: Recorded::Absent,
            map_priority: Recorded::Absent,
            map_rule: Recorded::Absent,
            map_advice: Recorded::Absent,
            correlation_id: Recorded::Absent,
            map_category_id: Recorded::Absent,
        };
        assert!(!extended_map(&current, &unrecorded));
    }

    #[test]
    fn test_module_dependency_compares_only_recorded_sides() {
        let current = ModuleDependencyMember {
            source_effective_time: EffectiveTime::from_ymd(2019, 1, 31),
            target_effective_time: EffectiveTime::from_ymd(2019, 7, 31),
        };
        let source_only = ModuleDependencySnapshot {
            source_effective_time: Recorded::Present(EffectiveTime::from_ymd(2019, 1, 31)),
            target_effective_time: Recorded::Absent,
        };
        assert!(module_dependency(&current, &source_only));

        let disagreeing_source = ModuleDependencySnapshot {
            source_effective_time: Recorded::Present(EffectiveTime::from_ymd(2018, 1, 31)),
            target_effective_time: Recorded::Absent,
        };
        assert!(!module_dependency(&current, &disagreeing_source));
    }

    #[test]
    fn test_mrcm_attribute_domain_grouped_flag_compared_by_value() {
        let current = MrcmAttributeDomainMember {
            domain_id: cid("404684003"),
            grouped: true,
            attribute_cardinality: "0..*".to_string(),
            attribute_in_group_cardinality: "0..1".to_string(),
            rule_strength_id: cid("723597001"),
            content_type_id: cid("723596005"),
        };
        let identical = fully_recorded(&RecordData::Member(termbase_core::MemberFields {
            refset_id: cid("723561005"),
            referenced_component_id: cid("363698007").into(),
            detail: MemberDetail::MrcmAttributeDomain(current.clone()),
        }));
        let SnapshotData::Member(MemberSnapshot::MrcmAttributeDomain(identical)) = identical else {
            unreachable!()
        };
        assert!(mrcm_attribute_domain(&current, &identical));

        let mut ungrouped = identical.clone();
        ungrouped.grouped = Recorded::Present(false);
        assert!(!mrcm_attribute_domain(&current, &ungrouped));

        let mut unrecorded_grouped = identical;
        unrecorded_grouped.grouped = Recorded::Absent;
        assert!(mrcm_attribute_domain(&current, &unrecorded_grouped));
    }

    #[test]
    fn test_mrcm_attribute_range_rule_change_fails() {
        let current = MrcmAttributeRangeMember {
            range_constraint: "dec(>#0..)".to_string(),
            attribute_rule: "<< 404684003".to_string(),
            rule_strength_id: cid("723597001"),
            content_type_id: cid("723596005"),
        };
        let mut previous = MrcmAttributeRangeSnapshot {
            range_constraint: Recorded::Present("dec(>#0..)".to_string()),
            attribute_rule: Recorded::Present("<< 404684003".to_string()),
            rule_strength_id: Recorded::Present(cid("723597001")),
            content_type_id: Recorded::Present(cid("723596005")),
        };
        assert!(mrcm_attribute_range(&current, &previous));

        previous.attribute_rule = Recorded::Present("<< 71388002".to_string());
        assert!(!mrcm_attribute_range(&current, &previous));
    }

    #[test]
    fn test_simple_member_always_matches() {
        assert!(member(&MemberDetail::Simple, &MemberSnapshot::Simple));
    }

    #[test]
    fn test_single_field_members_compare_their_field() {
        let current = MemberDetail::Language {
            acceptability_id: cid("900000000000548007"),
        };
        let same = MemberSnapshot::Language {
            acceptability_id: Recorded::Present(cid("900000000000548007")),
        };
        let different = MemberSnapshot::Language {
            acceptability_id: Recorded::Present(cid("900000000000549004")),
        };
        assert!(member(&current, &same));
        assert!(!member(&current, &different));
    }

    #[test]
    fn test_owl_expression_text_decides() {
        let current = MemberDetail::OwlExpression {
            expression: "SubClassOf(:73211009 :362969004)".to_string(),
        };
        let same = MemberSnapshot::OwlExpression {
            expression: Recorded::Present("SubClassOf(:73211009 :362969004)".to_string()),
        };
        let rewritten = MemberSnapshot::OwlExpression {
            expression: Recorded::Present("SubClassOf(:73211009 :404684003)".to_string()),
        };
        assert!(member(&current, &same));
        assert!(!member(&current, &rewritten));
    }

    #[test]
    fn test_kind_mismatch_is_a_content_change() {
        let concept_data = RecordData::Concept(ConceptFields {
            definition_status_id: cid("900000000000074008"),
        });
        let relationship_snapshot =
            fully_recorded(&RecordData::Relationship(relationship_fields()));
        assert!(!content_matches(&concept_data, &relationship_snapshot));
    }

    #[test]
    fn test_member_kind_mismatch_is_a_content_change() {
        let current = MemberDetail::Simple;
        let previous = MemberSnapshot::Query {
            query: Recorded::Present("<<138875005".to_string()),
        };
        assert!(!member(&current, &previous));
    }
}

//! Eligibility gate for effective-time restoration
//!
//! A cheap precondition checked before the field-level equality rules run.
//! Two variants exist and their activity arms differ on purpose:
//!
//! - core components pass the activity arm only when both versions are active
//! - reference-set members pass whenever the activity flags agree, including
//!   the both-inactive case
//!
//! Module agreement passes either variant. The variants are not
//! interchangeable; downstream behavior depends on the difference.

use termbase_core::{Record, RecordCategory, RecordSnapshot};

/// Whether `record` may be compared field-by-field against `previous`.
pub(crate) fn passes(record: &Record, previous: &RecordSnapshot) -> bool {
    match record.category() {
        RecordCategory::CoreComponent => core_component(record, previous),
        RecordCategory::RefsetMember => refset_member(record, previous),
    }
}

/// Core components: both versions active, or an unchanged module.
///
/// A component inactive in both versions does not pass the activity arm;
/// it can only qualify through its module.
fn core_component(record: &Record, previous: &RecordSnapshot) -> bool {
    (record.active && previous.active) || record.module_id == previous.module_id
}

/// Reference-set members: an unchanged activity flag, or an unchanged module.
fn refset_member(record: &Record, previous: &RecordSnapshot) -> bool {
    record.active == previous.active || record.module_id == previous.module_id
}

//! Restoration coordinator
//!
//! Walks the branch ancestry for the nearest released snapshot of a record,
//! screens the pair through the eligibility gate, runs the record kind's
//! equality rule, and on a full match rewinds the record's effective time to
//! the snapshot's. The only mutation on any path is that single
//! effective-time write.

use crate::{gate, rules};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use termbase_core::{
    BranchAncestry, BranchPath, EffectiveTime, Error, Record, RecordId, RecordSnapshot, Result,
    SnapshotSource,
};

/// One restoration attempt: the branch being edited and the record to check
///
/// The record stays owned by the caller; the engine borrows it for the
/// duration of the call and touches nothing but its effective time.
#[derive(Debug)]
pub struct RestorationRequest<'a> {
    /// Branch the edit is being made on
    pub branch: &'a BranchPath,
    /// The edited, in-progress record
    pub record: &'a mut Record,
}

impl<'a> RestorationRequest<'a> {
    /// Pair a branch with the record to check
    pub fn new(branch: &'a BranchPath, record: &'a mut Record) -> Self {
        RestorationRequest { branch, record }
    }
}

/// Why a record kept its pending effective time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IneligibilityReason {
    /// The eligibility gate rejected the pair
    Gate,
    /// A kind-specific field disagrees with the released snapshot
    ContentChanged,
}

impl IneligibilityReason {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            IneligibilityReason::Gate => "gate",
            IneligibilityReason::ContentChanged => "content-changed",
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a restoration attempt
///
/// Ineligibility is a normal outcome, not an error: it means the edit is a
/// real content change and the record legitimately needs a new release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Restoration {
    /// The edit was a no-op; the previous release date was reinstated
    Restored {
        /// The reinstated date, copied verbatim from the found snapshot
        effective_time: Option<EffectiveTime>,
    },
    /// The record is a genuine new version; nothing was changed
    NotEligible {
        /// Which stage rejected the pair
        reason: IneligibilityReason,
    },
}

impl Restoration {
    /// Whether the effective time was reinstated
    pub fn is_restored(&self) -> bool {
        matches!(self, Restoration::Restored { .. })
    }
}

/// Per-batch restoration summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestorationReport {
    /// Outcome for every record that was attempted
    pub outcomes: Vec<(RecordId, Restoration)>,
    /// Records left untouched because they were not candidates
    pub skipped: usize,
}

impl RestorationReport {
    /// Number of records attempted
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of records whose effective time was reinstated
    pub fn restored(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_restored()).count()
    }

    /// Number of records found to be genuine new versions
    pub fn not_eligible(&self) -> usize {
        self.attempted() - self.restored()
    }
}

/// The effective-time restoration engine
///
/// Stateless across calls; a single instance may serve concurrent callers
/// restoring different records.
pub struct Restorer {
    ancestry: Arc<dyn BranchAncestry>,
    snapshots: Arc<dyn SnapshotSource>,
}

impl Restorer {
    /// Create a restorer over the given collaborators
    pub fn new(ancestry: Arc<dyn BranchAncestry>, snapshots: Arc<dyn SnapshotSource>) -> Self {
        Restorer {
            ancestry,
            snapshots,
        }
    }

    /// Decide whether the edited record is a no-op against its nearest
    /// released snapshot, and if so reinstate that snapshot's effective time
    ///
    /// Callers must only invoke this for records known to have been released
    /// somewhere in the ancestry of `request.branch`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoReleasedVersion`] when no candidate branch yields a
    /// snapshot of the record. That contradicts the caller's precondition and
    /// must be treated as an internal inconsistency, not as a normal
    /// "nothing to restore" outcome.
    pub fn restore(&self, request: RestorationRequest<'_>) -> Result<Restoration> {
        let RestorationRequest { branch, record } = request;

        let previous = self
            .find_previous_version(branch, &record.id)
            .ok_or_else(|| Error::NoReleasedVersion {
                id: record.id.clone(),
                branch: branch.clone(),
            })?;

        if !gate::passes(record, &previous) {
            return Ok(Restoration::NotEligible {
                reason: IneligibilityReason::Gate,
            });
        }
        if !rules::content_matches(&record.data, &previous.data) {
            return Ok(Restoration::NotEligible {
                reason: IneligibilityReason::ContentChanged,
            });
        }

        record.effective_time = previous.effective_time;
        tracing::debug!(
            target: "termbase::restore",
            record = %record.id,
            branch = %branch,
            effective_time = ?previous.effective_time,
            "effective time restored"
        );
        Ok(Restoration::Restored {
            effective_time: previous.effective_time,
        })
    }

    /// Restore every candidate in a batch of edited records
    ///
    /// A candidate is a record that is released but carries no effective
    /// time; everything else is counted as skipped and left untouched.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Error::NoReleasedVersion`] encountered.
    pub fn restore_pending(
        &self,
        branch: &BranchPath,
        records: &mut [Record],
    ) -> Result<RestorationReport> {
        let mut report = RestorationReport::default();
        for record in records.iter_mut() {
            if !record.needs_restoration() {
                report.skipped += 1;
                continue;
            }
            let id = record.id.clone();
            let outcome = self.restore(RestorationRequest::new(branch, record))?;
            report.outcomes.push((id, outcome));
        }
        Ok(report)
    }

    /// Scan the ancestry, nearest first, for the record's previous snapshot
    ///
    /// The scan stops at the first branch that yields one. A branch without
    /// the record, and a branch whose lookup fails, are both skipped; a
    /// release further up must still be reachable when an intermediate
    /// branch cannot answer.
    fn find_previous_version(&self, branch: &BranchPath, id: &RecordId) -> Option<RecordSnapshot> {
        for candidate in self.ancestry.ancestry_of(branch) {
            match self.snapshots.lookup(&candidate, id) {
                Ok(Some(snapshot)) => return Some(snapshot),
                Ok(None) => {}
                Err(error) => {
                    tracing::warn!(
                        target: "termbase::restore",
                        branch = %candidate,
                        record = %id,
                        error = %error,
                        "snapshot lookup failed, continuing ancestry scan"
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ineligibility_reason_strings() {
        assert_eq!(IneligibilityReason::Gate.as_str(), "gate");
        assert_eq!(IneligibilityReason::ContentChanged.as_str(), "content-changed");
        assert_eq!(format!("{}", IneligibilityReason::Gate), "gate");
    }

    #[test]
    fn test_restoration_predicates() {
        let restored = Restoration::Restored {
            effective_time: None,
        };
        let rejected = Restoration::NotEligible {
            reason: IneligibilityReason::Gate,
        };
        assert!(restored.is_restored());
        assert!(!rejected.is_restored());
    }

    #[test]
    fn test_report_counters() {
        let report = RestorationReport {
            outcomes: vec![
                (
                    termbase_core::ComponentId::new_unchecked("138875005").into(),
                    Restoration::Restored {
                        effective_time: None,
                    },
                ),
                (
                    termbase_core::ComponentId::new_unchecked("100005").into(),
                    Restoration::NotEligible {
                        reason: IneligibilityReason::ContentChanged,
                    },
                ),
            ],
            skipped: 3,
        };
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.restored(), 1);
        assert_eq!(report.not_eligible(), 1);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_restoration_serde_roundtrip() {
        let outcome = Restoration::Restored {
            effective_time: termbase_core::EffectiveTime::from_ymd(2019, 7, 31),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let restored: Restoration = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, restored);
    }
}

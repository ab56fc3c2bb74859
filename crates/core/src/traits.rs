//! Collaborator traits for branch ancestry and snapshot lookup
//!
//! The restoration engine does not own branch topology or record storage.
//! It consumes these two capabilities, which the surrounding system (or the
//! in-memory reference repository) implements.

use crate::error::Result;
use crate::snapshot::RecordSnapshot;
use crate::types::{BranchPath, RecordId};

/// Supplier of the candidate-branch search order
///
/// Thread safety: implementations must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait BranchAncestry: Send + Sync {
    /// Ordered candidate branches for a previous-version search
    ///
    /// Nearest first, starting with `branch` itself. The sequence is
    /// consumed lazily: a search that finds its snapshot early never pulls
    /// the remaining candidates. The sequence must be finite; no cycle
    /// detection happens downstream.
    fn ancestry_of<'a>(
        &'a self,
        branch: &BranchPath,
    ) -> Box<dyn Iterator<Item = BranchPath> + Send + 'a>;
}

/// Point lookup of a record's released state at a branch
///
/// Thread safety: implementations must be safe to call concurrently from
/// multiple threads (requires Send + Sync).
pub trait SnapshotSource: Send + Sync {
    /// Fetch the record's snapshot at a specific branch
    ///
    /// Returns `Ok(None)` when the branch has no state for the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails. During an ancestry search the
    /// caller treats a failing branch like a branch without the record and
    /// moves on.
    fn lookup(&self, branch: &BranchPath, id: &RecordId) -> Result<Option<RecordSnapshot>>;
}

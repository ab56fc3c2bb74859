//! In-memory reference repository
//!
//! Implements both collaborator traits over a lock-guarded map:
//!
//! - ancestry is derived from the branch path itself (a path names every
//!   ancestor), nearest first
//! - released snapshots are seeded with [`InMemoryRepository::publish`]
//!
//! Embedding callers without a real branch store can use this directly; the
//! integration tests use it as their fixture.

use parking_lot::RwLock;
use std::collections::HashMap;
use termbase_core::{
    BranchAncestry, BranchPath, RecordId, RecordSnapshot, Result, SnapshotSource,
};

/// Branch-keyed store of released record snapshots
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    released: RwLock<HashMap<BranchPath, HashMap<RecordId, RecordSnapshot>>>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        InMemoryRepository {
            released: RwLock::new(HashMap::new()),
        }
    }

    /// Record a released snapshot on a branch
    ///
    /// Replaces any snapshot of the same record previously published on the
    /// same branch.
    pub fn publish(&self, branch: &BranchPath, snapshot: RecordSnapshot) {
        self.released
            .write()
            .entry(branch.clone())
            .or_default()
            .insert(snapshot.id.clone(), snapshot);
    }

    /// Remove a published snapshot, returning it if it existed
    pub fn withdraw(&self, branch: &BranchPath, id: &RecordId) -> Option<RecordSnapshot> {
        self.released.write().get_mut(branch)?.remove(id)
    }

    /// Number of published snapshots across all branches
    pub fn len(&self) -> usize {
        self.released.read().values().map(HashMap::len).sum()
    }

    /// Whether no snapshot has been published
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BranchAncestry for InMemoryRepository {
    fn ancestry_of<'a>(
        &'a self,
        branch: &BranchPath,
    ) -> Box<dyn Iterator<Item = BranchPath> + Send + 'a> {
        Box::new(branch.self_and_ancestors())
    }
}

impl SnapshotSource for InMemoryRepository {
    fn lookup(&self, branch: &BranchPath, id: &RecordId) -> Result<Option<RecordSnapshot>> {
        Ok(self
            .released
            .read()
            .get(branch)
            .and_then(|snapshots| snapshots.get(id))
            .cloned())
    }
}

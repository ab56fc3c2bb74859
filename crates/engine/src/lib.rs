//! Effective-time restoration engine
//!
//! When a released record is edited on a branch, its effective time is
//! cleared and it becomes a pending change. Often the edit turns out to be a
//! no-op against the nearest release found in the branch ancestry; stamping
//! it as a new version would churn the next release for nothing. This engine
//! makes that call:
//!
//! 1. walk the candidate branches supplied by the ancestry collaborator and
//!    stop at the first one holding a snapshot of the record
//! 2. screen the pair through a category-specific eligibility gate
//! 3. run the record kind's structural equality rule
//! 4. on a full match, reinstate the snapshot's effective time
//!
//! The sole entry points are [`Restorer::restore`] and
//! [`Restorer::restore_pending`]; the gate and the rule registry are
//! implementation detail.

mod gate;
mod rules;

pub mod memory;
pub mod restorer;

pub use memory::InMemoryRepository;
pub use restorer::{
    IneligibilityReason, Restoration, RestorationReport, RestorationRequest, Restorer,
};

//! Termbase - branched, versioned store for authoring clinical terminology
//!
//! Terminology records (concepts, descriptions, relationships, reference-set
//! members) are edited on branches and periodically frozen into releases,
//! each record stamped with the release date as its effective time. Editing
//! a released record clears that stamp.
//!
//! The crate's centerpiece is the effective-time restoration engine: when an
//! edit turns out to be semantically identical to the nearest release found
//! in the branch ancestry, the engine reinstates the original release date
//! instead of letting the record count as a new version.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use termbase::{
//!     BranchPath, ComponentId, ConceptFields, EffectiveTime, InMemoryRepository, Record,
//!     RecordData, RecordSnapshot, RestorationRequest, Restorer,
//! };
//!
//! # fn main() -> termbase::Result<()> {
//! let repository = Arc::new(InMemoryRepository::new());
//! let main = BranchPath::new("MAIN")?;
//! let task = BranchPath::new("MAIN/task-12")?;
//!
//! // A released concept, as the 2019-07-31 release froze it.
//! let mut concept = Record::new(
//!     ComponentId::new("138875005")?,
//!     ComponentId::new("900000000000207008")?,
//!     RecordData::Concept(ConceptFields {
//!         definition_status_id: ComponentId::new("900000000000074008")?,
//!     }),
//! );
//! concept.released = true;
//! let release_date = EffectiveTime::parse("20190731")?;
//! repository.publish(&main, RecordSnapshot::release_of(&concept, release_date));
//!
//! // An edit on the task branch that changed nothing gets its stamp back.
//! let restorer = Restorer::new(repository.clone(), repository);
//! let outcome = restorer.restore(RestorationRequest::new(&task, &mut concept))?;
//! assert!(outcome.is_restored());
//! assert_eq!(concept.effective_time, Some(release_date));
//! # Ok(())
//! # }
//! ```

pub use termbase_core::*;
pub use termbase_engine::*;

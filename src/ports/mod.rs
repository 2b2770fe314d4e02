//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CycleRepository` - Cycle persistence and listings
//! - `SkillCatalog` - Skill definitions owned by the catalog
//! - `SubjectProfile` - The subject's durable skill record
//! - `ParticipantDirectory` - Participant display details
//! - `SessionValidator` - Bearer token validation

mod cycle_repository;
mod participant_directory;
mod session_validator;
mod skill_catalog;
mod subject_profile;

pub use cycle_repository::{CycleRepository, Page, PAGE_SIZE};
pub use participant_directory::ParticipantDirectory;
pub use session_validator::SessionValidator;
pub use skill_catalog::SkillCatalog;
pub use subject_profile::{ProfileSkill, SubjectProfile};

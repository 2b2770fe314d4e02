//! In-memory adapters for every store port.
//!
//! Useful for testing and local development without Postgres.

mod cycle_repository;
mod participant_directory;
mod skill_catalog;
mod subject_profile;

pub use cycle_repository::InMemoryCycleRepository;
pub use participant_directory::InMemoryParticipantDirectory;
pub use skill_catalog::InMemorySkillCatalog;
pub use subject_profile::InMemorySubjectProfile;

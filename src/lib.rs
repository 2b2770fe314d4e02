//! Skill Cycles - skill-assessment cycles and score reconciliation.
//!
//! A subject opens a cycle naming a reviewer and self-assesses a set of
//! skills. The reviewer moves it through `Pending -> Approved -> In Progress
//! -> Done`, and finalizing writes the agreed scores back into the subject's
//! profile.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

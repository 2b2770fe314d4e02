//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, emails, statuses, errors, auth)
//! - `cycle` - The assessment cycle aggregate, scores and display projection

pub mod cycle;
pub mod foundation;

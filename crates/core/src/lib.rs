//! Domain types for the grievance portal.
//!
//! Everything with an invariant worth testing lives here: role ordering,
//! the complaint category/status/priority enums, the status transition
//! table, and tracking-identifier generation.

pub mod complaint;
pub mod error;
pub mod roles;
pub mod tracking;
pub mod types;

//! Map domain model.
//!
//! # Responsibility
//! - Define the spot records supplied by the data-fetch collaborator.
//! - Define the closed mood enumeration used for cluster breakdowns.
//!
//! # Invariants
//! - Every spot is identified by a stable `SpotId`.
//! - Records are read-only inputs; clustering borrows them.

pub mod spot;

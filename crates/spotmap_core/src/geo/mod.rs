//! Geographic primitives.
//!
//! # Responsibility
//! - Provide pure distance math for clustering.
//! - Provide viewport bounds used to filter what the layer draws.

pub mod bounds;
pub mod distance;

//! Flutter bridge for the SpotMap core.

pub mod api;

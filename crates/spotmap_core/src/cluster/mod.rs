//! Spot clustering and cluster glyph policy.
//!
//! # Responsibility
//! - Group nearby spots at low zoom levels.
//! - Describe each group as a renderer-agnostic glyph.
//!
//! # Invariants
//! - Everything in this module is pure and synchronous; safe to call from a
//!   zoom/pan event handler.

pub mod distribution;
pub mod engine;
pub mod policy;
pub mod visual;

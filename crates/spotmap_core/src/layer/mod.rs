//! Marker layer over an imperative drawing surface.
//!
//! # Responsibility
//! - Reconcile the reactive spot list onto a mutable map surface.
//! - Manage popup mount points without racing the host render cycle.
//!
//! # Invariants
//! - Single-threaded: all calls come from the host UI thread.
//! - Only popup mount disposal is deferred (to the next animation frame).

pub mod manager;
pub mod popup;
pub mod surface;

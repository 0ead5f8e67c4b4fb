//! Drawing surface contract and glyph descriptors.
//!
//! # Responsibility
//! - Define what the marker layer asks an imperative map surface to draw.
//! - Provide an in-memory surface for headless hosts and tests.
//!
//! # Invariants
//! - A `SurfaceHandle` is issued once and never reused by the same surface.
//! - Only the marker layer places or removes glyphs.

use crate::cluster::visual::ClusterVisual;
use crate::model::spot::{Mood, Spot, SpotId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Opaque handle of one drawn primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Marker for a single spot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotMarker {
    pub id: SpotId,
    pub lat: f64,
    pub lng: f64,
    pub mood: Mood,
    pub emoji: &'static str,
    pub is_private: bool,
    pub is_owner: bool,
}

impl From<&Spot> for SpotMarker {
    fn from(spot: &Spot) -> Self {
        Self {
            id: spot.id.clone(),
            lat: spot.lat,
            lng: spot.lng,
            mood: spot.mood,
            emoji: spot.mood.emoji(),
            is_private: spot.is_private,
            is_owner: spot.is_owner,
        }
    }
}

/// Glyph for a group of spots, placed at the cluster centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterGlyph {
    pub lat: f64,
    pub lng: f64,
    pub count: usize,
    pub member_ids: Vec<SpotId>,
    pub visual: ClusterVisual,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Glyph {
    Spot(SpotMarker),
    Cluster(ClusterGlyph),
}

impl Glyph {
    /// Anchor position as `(lat, lng)`.
    pub fn position(&self) -> (f64, f64) {
        match self {
            Self::Spot(marker) => (marker.lat, marker.lng),
            Self::Cluster(glyph) => (glyph.lat, glyph.lng),
        }
    }

    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }
}

/// Pointer and popup events reported by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Click(SurfaceHandle),
    PopupOpen(SurfaceHandle),
    PopupClose(SurfaceHandle),
}

/// Imperative, mutable map surface.
pub trait DrawingSurface {
    /// Draws `glyph` and returns its handle.
    fn place(&mut self, glyph: Glyph) -> SurfaceHandle;

    /// Removes a drawn glyph. Returns `false` when the handle is unknown.
    fn remove(&mut self, handle: SurfaceHandle) -> bool;
}

/// In-memory handle arena implementing `DrawingSurface`.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_handle: u64,
    glyphs: BTreeMap<SurfaceHandle, Glyph>,
    removed_total: u64,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of glyphs currently drawn.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, handle: SurfaceHandle) -> Option<&Glyph> {
        self.glyphs.get(&handle)
    }

    pub fn handles(&self) -> Vec<SurfaceHandle> {
        self.glyphs.keys().copied().collect()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = (SurfaceHandle, &Glyph)> {
        self.glyphs.iter().map(|(handle, glyph)| (*handle, glyph))
    }

    /// Total handles ever issued.
    pub fn placed_total(&self) -> u64 {
        self.next_handle
    }

    pub fn removed_total(&self) -> u64 {
        self.removed_total
    }
}

impl DrawingSurface for MemorySurface {
    fn place(&mut self, glyph: Glyph) -> SurfaceHandle {
        self.next_handle += 1;
        let handle = SurfaceHandle(self.next_handle);
        self.glyphs.insert(handle, glyph);
        handle
    }

    fn remove(&mut self, handle: SurfaceHandle) -> bool {
        let removed = self.glyphs.remove(&handle).is_some();
        if removed {
            self.removed_total += 1;
        }
        removed
    }
}

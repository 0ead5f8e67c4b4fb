//! Core map logic for SpotMap.
//! Clustering, glyph policy and marker-layer reconciliation live here; hosts
//! only supply spots, a viewport and a drawing surface.

pub mod cluster;
pub mod config;
pub mod geo;
pub mod layer;
pub mod logging;
pub mod model;

pub use cluster::distribution::MoodDistribution;
pub use cluster::engine::{cluster, cluster_with_policy, plan_items, ClusterData, PassItem};
pub use cluster::policy::{
    radius_for_zoom, RadiusBand, RadiusPolicy, RadiusPolicyError, DEFAULT_RADIUS_BANDS,
};
pub use cluster::visual::{
    describe, BlendArc, BorderStyle, ClusterVisual, GlyphBody, SizeClass, MIN_OPACITY,
};
pub use config::{ConfigError, LayerConfig, TOUCH_SURFACE_ENV};
pub use geo::bounds::GeoBounds;
pub use geo::distance::{distance_km, is_valid_coordinate, EARTH_RADIUS_KM};
pub use layer::manager::{
    default_popup_content, EventOutcome, LayerState, MarkerLayerManager, ReconcileSummary,
    Selection, Viewport,
};
pub use layer::popup::{MountId, MountPoint, PopupBinder, PopupHandle, ViewNode};
pub use layer::surface::{
    ClusterGlyph, DrawingSurface, Glyph, MemorySurface, SpotMarker, SurfaceEvent, SurfaceHandle,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::spot::{Mood, Spot, SpotId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

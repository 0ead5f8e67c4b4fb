//! FFI use-case API for Flutter-facing map calls.
//!
//! # Responsibility
//! - Expose the pure clustering and glyph policy to Dart via FRB.
//! - Flatten core glyph types into plain records the bridge can carry.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Spots with invalid coordinates are dropped and counted, never fatal.

use spotmap_core::{
    core_version as core_version_inner, describe, init_logging as init_logging_inner,
    ping as ping_inner, plan_items, GlyphBody, Mood, PassItem, RadiusPolicy, Spot,
};

/// Spot record as sent by the Dart side.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSpot {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    /// Mood name; unknown values are treated as `none`.
    pub mood: Option<String>,
    pub is_private: bool,
    pub is_owner: bool,
}

/// One drawable item of a clustering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGlyph {
    pub lat: f64,
    pub lng: f64,
    pub count: u32,
    pub member_ids: Vec<String>,
    /// `small|medium|large`; empty for single-spot markers.
    pub size_class: String,
    /// Emoji for single-mood glyphs, `None` for blended ones.
    pub emblem: Option<String>,
    /// CSS conic gradient for blended glyphs.
    pub gradient: Option<String>,
    pub opacity: f64,
    /// `solid|dashed|dotted`.
    pub border: String,
    pub tooltip: String,
}

/// Response envelope of one clustering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPassResponse {
    /// `false` when zoom is above the clustering bands.
    pub clustered: bool,
    pub radius_km: f64,
    pub glyphs: Vec<MapGlyph>,
    /// Spots dropped for invalid coordinates.
    pub skipped: u32,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Runs one clustering pass for the Dart map layer.
///
/// # FFI contract
/// - Sync call, pure computation; safe on the UI isolate.
/// - Above the clustering bands returns `clustered = false` and one glyph per
///   valid spot.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn cluster_spots(spots: Vec<MapSpot>, zoom: f64) -> ClusterPassResponse {
    let total = spots.len();
    let spots = spots
        .into_iter()
        .map(to_core_spot)
        .filter(Spot::has_valid_coordinates)
        .collect::<Vec<_>>();
    let skipped = (total - spots.len()) as u32;
    if skipped > 0 {
        log::warn!(
            "event=spot_skipped module=ffi status=warn reason=invalid_coordinate count={}",
            skipped
        );
    }

    let policy = RadiusPolicy::shared_default();
    let radius_km = policy.radius_for_zoom(zoom);
    let glyphs = plan_items(&spots, zoom, policy)
        .iter()
        .map(|item| match item {
            PassItem::Spot(spot) => spot_glyph(spot),
            PassItem::Cluster(cluster) => {
                let visual = describe(cluster);
                let emblem = match &visual.body {
                    GlyphBody::Emblem { emoji, .. } => Some((*emoji).to_string()),
                    GlyphBody::Blend { .. } => None,
                };
                MapGlyph {
                    lat: cluster.lat,
                    lng: cluster.lng,
                    count: cluster.count as u32,
                    member_ids: cluster.member_ids(),
                    size_class: visual.size_class.as_str().to_string(),
                    emblem,
                    gradient: visual.conic_gradient(),
                    opacity: visual.opacity,
                    border: visual.border.as_str().to_string(),
                    tooltip: visual.tooltip,
                }
            }
        })
        .collect();

    ClusterPassResponse {
        clustered: radius_km > 0.0,
        radius_km,
        glyphs,
        skipped,
    }
}

fn to_core_spot(spot: MapSpot) -> Spot {
    let mood = spot
        .mood
        .as_deref()
        .map(Mood::parse_lenient)
        .unwrap_or_default();
    let mut core = Spot::new(spot.id, spot.lat, spot.lng, mood);
    core.is_private = spot.is_private;
    core.is_owner = spot.is_owner;
    core
}

fn spot_glyph(spot: &Spot) -> MapGlyph {
    MapGlyph {
        lat: spot.lat,
        lng: spot.lng,
        count: 1,
        member_ids: vec![spot.id.clone()],
        size_class: String::new(),
        emblem: Some(spot.mood.emoji().to_string()),
        gradient: None,
        opacity: 1.0,
        border: "solid".to_string(),
        tooltip: spot.mood.as_str().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{cluster_spots, core_version, init_logging, ping, MapSpot};

    fn map_spot(id: &str, lat: f64, lng: f64, mood: &str) -> MapSpot {
        MapSpot {
            id: id.to_string(),
            lat,
            lng,
            mood: Some(mood.to_string()),
            is_private: false,
            is_owner: false,
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn cluster_spots_groups_nearby_spots_at_low_zoom() {
        let response = cluster_spots(
            vec![
                map_spot("a", 0.0, 0.0, "energetic"),
                map_spot("b", 0.0, 0.001, "energetic"),
                map_spot("c", 10.0, 10.0, "chill"),
            ],
            3.0,
        );

        assert!(response.clustered);
        assert_eq!(response.radius_km, 1000.0);
        assert_eq!(response.glyphs.len(), 2);
        let group = &response.glyphs[0];
        assert_eq!(group.count, 2);
        assert_eq!(group.size_class, "small");
        assert_eq!(group.emblem.as_deref(), Some("⚡"));
        assert_eq!(group.tooltip, "2 energetic vibes");
        assert_eq!(response.glyphs[1].member_ids, vec!["c".to_string()]);
        assert_eq!(response.glyphs[1].size_class, "");
        assert_eq!(response.glyphs[1].emblem.as_deref(), Some("😌"));
    }

    #[test]
    fn cluster_spots_returns_individual_glyphs_at_high_zoom_and_counts_skips() {
        let response = cluster_spots(
            vec![
                map_spot("a", 0.0, 0.0, "chill"),
                map_spot("bad", f64::NAN, 0.0, "chill"),
                map_spot("c", 1.0, 1.0, "unknown"),
            ],
            15.0,
        );

        assert!(!response.clustered);
        assert_eq!(response.skipped, 1);
        assert_eq!(response.glyphs.len(), 2);
        assert!(response.glyphs.iter().all(|glyph| glyph.count == 1));
        assert_eq!(response.glyphs[1].tooltip, "none");
    }
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `spotmap_core` linkage without a Flutter/FFI host.
//! - Run one reconciliation of a fixed spot set and print what was drawn.
//!
//! Usage: `spotmap_cli [zoom]` (default zoom 4).

use spotmap_core::{
    Glyph, LayerConfig, MarkerLayerManager, MemorySurface, Mood, Spot, SurfaceEvent, Viewport,
};

const DEFAULT_ZOOM: f64 = 4.0;

fn main() {
    println!("spotmap_core ping={}", spotmap_core::ping());
    println!("spotmap_core version={}", spotmap_core::core_version());

    let zoom = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<f64>() {
            Ok(value) => value,
            Err(err) => {
                eprintln!("invalid zoom `{raw}`: {err}");
                std::process::exit(2);
            }
        },
        None => DEFAULT_ZOOM,
    };
    let config = match LayerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut layer = MarkerLayerManager::new(MemorySurface::new(), config);
    layer.on_select(|selection| {
        println!("selected id={}", selection.primary_spot().id);
    });
    let summary = layer.reconcile(&sample_spots(), &Viewport::at_zoom(zoom));
    println!(
        "zoom={} drawn_spots={} drawn_clusters={} skipped={}",
        zoom, summary.drawn_spots, summary.drawn_clusters, summary.skipped_invalid
    );

    for (handle, glyph) in layer.surface().glyphs() {
        match glyph {
            Glyph::Spot(marker) => println!(
                "  #{} spot {} {} ({:.4}, {:.4})",
                handle.raw(),
                marker.id,
                marker.emoji,
                marker.lat,
                marker.lng
            ),
            Glyph::Cluster(cluster) => println!(
                "  #{} cluster x{} {} border={} opacity={:.2} tooltip={:?}",
                handle.raw(),
                cluster.count,
                cluster.visual.size_class.as_str(),
                cluster.visual.border.as_str(),
                cluster.visual.opacity,
                cluster.visual.tooltip
            ),
        }
    }

    if let Some(first) = layer.handles().first().copied() {
        layer.handle_event(SurfaceEvent::Click(first));
    }
}

fn sample_spots() -> Vec<Spot> {
    vec![
        Spot::new("1", 45.8150, 15.9819, Mood::Chill).with_name("Upper Town"),
        Spot::new("2", 45.8131, 15.9775, Mood::Social),
        Spot::new("3", 45.8100, 15.9700, Mood::Chill),
        Spot::new("4", 48.2082, 16.3738, Mood::Creative),
        Spot::new("5", 48.2100, 16.3600, Mood::Creative),
        Spot::new("6", 41.9028, 12.4964, Mood::Romantic),
        Spot::new("7", 52.5200, 13.4050, Mood::Energetic),
        Spot::new("8", 52.5100, 13.3900, Mood::None),
        Spot::new("9", f64::NAN, 13.0, Mood::Adventurous),
    ]
}

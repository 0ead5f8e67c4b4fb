use spotmap_core::{
    EventOutcome, GeoBounds, Glyph, LayerConfig, LayerState, MarkerLayerManager, MemorySurface,
    Mood, Selection, Spot, SurfaceEvent, SurfaceHandle, ViewNode, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;

fn sample_spots() -> Vec<Spot> {
    vec![
        Spot::new("a", 0.0, 0.0, Mood::Chill).with_name("Harbor"),
        Spot::new("b", 0.0, 0.001, Mood::Energetic),
        Spot::new("c", 10.0, 10.0, Mood::Social),
    ]
}

fn manager() -> MarkerLayerManager<MemorySurface> {
    MarkerLayerManager::new(MemorySurface::new(), LayerConfig::default())
}

fn handle_where(
    layer: &MarkerLayerManager<MemorySurface>,
    predicate: impl Fn(&Glyph) -> bool,
) -> SurfaceHandle {
    layer
        .surface()
        .glyphs()
        .find(|entry| predicate(entry.1))
        .map(|(handle, _)| handle)
        .expect("matching glyph should be drawn")
}

#[test]
fn high_zoom_draws_one_marker_per_spot() {
    let mut layer = manager();

    let summary = layer.reconcile(&sample_spots(), &Viewport::at_zoom(12));

    assert_eq!(summary.drawn_spots, 3);
    assert_eq!(summary.drawn_clusters, 0);
    assert_eq!(layer.surface().len(), 3);
    assert_eq!(layer.state(), LayerState::Populated);
    assert!(layer.surface().glyphs().all(|(_, glyph)| !glyph.is_cluster()));
}

#[test]
fn low_zoom_draws_clusters_and_singletons_as_markers() {
    let mut layer = manager();

    let summary = layer.reconcile(&sample_spots(), &Viewport::at_zoom(3));

    assert_eq!(summary.drawn_clusters, 1);
    assert_eq!(summary.drawn_spots, 1);
    let cluster_handle = handle_where(&layer, Glyph::is_cluster);
    let Some(Glyph::Cluster(glyph)) = layer.surface().get(cluster_handle) else {
        panic!("expected a cluster glyph");
    };
    assert_eq!(glyph.count, 2);
    assert_eq!(glyph.member_ids, vec!["a", "b"]);
}

#[test]
fn repeated_passes_never_leak_handles() {
    let mut layer = manager();
    let base = sample_spots();

    for pass in 0..12usize {
        let mut spots = base.clone();
        for extra in 0..pass {
            spots.push(Spot::new(
                format!("x{pass}-{extra}"),
                extra as f64 * 3.0,
                -(pass as f64),
                Mood::Creative,
            ));
        }
        let zoom = (pass % 13) as f64;
        let summary = layer.reconcile(&spots, &Viewport::at_zoom(zoom));

        assert_eq!(layer.surface().len(), summary.drawn());
        assert_eq!(layer.live_handles(), summary.drawn());
        assert_eq!(
            layer.surface().placed_total() - layer.surface().removed_total(),
            summary.drawn() as u64
        );
    }
}

#[test]
fn malformed_coordinates_are_skipped_without_aborting() {
    let payload = serde_json::json!([
        { "id": 1, "lat": "52.52", "lng": 13.405, "mood": "chill" },
        { "id": "bad", "lat": "north", "lng": 13.0 },
        { "id": 3, "lat": null, "lng": 2.0, "mood": "social" },
        { "id": 4, "lat": 48.85, "lng": 2.35, "mood": "romantic" }
    ]);
    let spots: Vec<Spot> = serde_json::from_value(payload).expect("payload should decode");
    let mut layer = manager();

    let summary = layer.reconcile(&spots, &Viewport::at_zoom(14));

    assert_eq!(summary.skipped_invalid, 2);
    assert_eq!(summary.drawn_spots, 2);
    assert_eq!(layer.surface().len(), 2);
}

#[test]
fn viewport_bounds_limit_drawn_spots() {
    let mut layer = manager();
    let viewport = Viewport::at_zoom(12).with_bounds(GeoBounds::new(-1.0, -1.0, 1.0, 1.0));

    let summary = layer.reconcile(&sample_spots(), &viewport);

    assert_eq!(summary.drawn_spots, 2);
    assert_eq!(summary.outside_viewport, 1);
}

#[test]
fn clicks_report_selection_and_stale_handles_are_ignored() {
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);
    let mut layer = manager();
    layer.on_select(move |selection| sink.borrow_mut().push(selection.clone()));

    layer.reconcile(&sample_spots(), &Viewport::at_zoom(3));
    let cluster_handle = handle_where(&layer, Glyph::is_cluster);

    let outcome = layer.handle_event(SurfaceEvent::Click(cluster_handle));
    let EventOutcome::Selected(Selection::Cluster {
        representative,
        members,
    }) = outcome
    else {
        panic!("cluster click should select the cluster");
    };
    assert_eq!(representative.id, "a");
    assert_eq!(members, vec!["a", "b"]);
    assert_eq!(selected.borrow().len(), 1);
    assert_eq!(selected.borrow()[0].primary_spot().id, "a");

    layer.reconcile(&sample_spots(), &Viewport::at_zoom(3));
    assert_eq!(
        layer.handle_event(SurfaceEvent::Click(cluster_handle)),
        EventOutcome::Ignored
    );
    assert_eq!(selected.borrow().len(), 1);
}

#[test]
fn popup_reuses_mount_and_defers_teardown_to_animation_frame() {
    let mut layer = manager();
    layer.reconcile(&sample_spots(), &Viewport::at_zoom(12));
    let handle = handle_where(&layer, |glyph| {
        matches!(glyph, Glyph::Spot(marker) if marker.id == "a")
    });

    let EventOutcome::PopupRendered(content) = layer.handle_event(SurfaceEvent::PopupOpen(handle))
    else {
        panic!("popup should render");
    };
    assert_eq!(content.title, "Harbor");
    assert_eq!(
        layer.handle_event(SurfaceEvent::PopupClose(handle)),
        EventOutcome::PopupClosed
    );
    layer.handle_event(SurfaceEvent::PopupOpen(handle));
    let mount = layer.popups().mount_for(handle).expect("mount exists");
    assert_eq!(mount.render_count, 2);
    assert_eq!(layer.popups().live_mounts(), 1);

    layer.reconcile(&sample_spots(), &Viewport::at_zoom(12));
    assert!(layer.popups().mount_for(handle).is_none());
    assert_eq!(layer.popups().live_mounts(), 1);
    assert_eq!(layer.popups().pending_disposals(), 1);

    assert_eq!(layer.on_animation_frame(), 1);
    assert_eq!(layer.popups().live_mounts(), 0);
}

#[test]
fn popup_content_is_built_fresh_on_each_open() {
    let mut layer = manager();
    layer.reconcile(&sample_spots(), &Viewport::at_zoom(12));
    let handle = layer.handles()[0];

    layer.handle_event(SurfaceEvent::PopupOpen(handle));
    layer.set_popup_content(|selection| {
        ViewNode::new(format!("detail {}", selection.primary_spot().id))
    });

    let outcome = layer.handle_event(SurfaceEvent::PopupOpen(handle));
    let EventOutcome::PopupRendered(content) = outcome else {
        panic!("popup should render");
    };
    assert!(content.title.starts_with("detail "));
}

#[test]
fn touch_surfaces_get_clicks_but_no_popups() {
    let config = LayerConfig::default().with_touch_surface(true);
    let mut layer = MarkerLayerManager::new(MemorySurface::new(), config);
    layer.reconcile(&sample_spots(), &Viewport::at_zoom(12));
    let handle = layer.handles()[0];

    assert_eq!(layer.popups().bound_count(), 0);
    assert_eq!(
        layer.handle_event(SurfaceEvent::PopupOpen(handle)),
        EventOutcome::Ignored
    );
    assert!(matches!(
        layer.handle_event(SurfaceEvent::Click(handle)),
        EventOutcome::Selected(Selection::Spot(_))
    ));
}

#[test]
fn empty_input_and_clear_leave_layer_empty() {
    let mut layer = manager();

    let summary = layer.reconcile(&[], &Viewport::at_zoom(5));
    assert_eq!(summary.drawn(), 0);
    assert_eq!(layer.state(), LayerState::Empty);

    layer.reconcile(&sample_spots(), &Viewport::at_zoom(5));
    assert_eq!(layer.state(), LayerState::Populated);
    assert_eq!(layer.clear(), 2);
    assert_eq!(layer.state(), LayerState::Empty);
    assert!(layer.surface().is_empty());
}

//! Marker layer reconciler.
//!
//! # Responsibility
//! - Keep one drawing surface in sync with the current spot list and viewport.
//! - Route surface clicks and popup events to selection and popup handling.
//!
//! # Invariants
//! - Every pass tears down all handles of the previous pass before drawing,
//!   inside the same call. No handle of an older pass survives.
//! - Spots with non-finite coordinates are skipped and logged; they never
//!   abort the pass.
//! - Popups are bound only on non-touch surfaces.

use crate::cluster::engine::{plan_items, ClusterData, PassItem};
use crate::cluster::visual::describe;
use crate::config::LayerConfig;
use crate::geo::bounds::GeoBounds;
use crate::layer::popup::{PopupBinder, ViewNode};
use crate::layer::surface::{
    ClusterGlyph, DrawingSurface, Glyph, SpotMarker, SurfaceEvent, SurfaceHandle,
};
use crate::model::spot::{Spot, SpotId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

type ContentFn = Box<dyn Fn(&Selection) -> ViewNode>;
type SelectFn = Box<dyn FnMut(&Selection)>;

/// Camera input of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    /// Visible area; `None` draws every spot.
    #[serde(default)]
    pub bounds: Option<GeoBounds>,
}

impl Viewport {
    pub fn at_zoom(zoom: impl Into<f64>) -> Self {
        Self {
            zoom: zoom.into(),
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    fn shows(&self, spot: &Spot) -> bool {
        self.bounds
            .map(|bounds| bounds.contains(spot.lat, spot.lng))
            .unwrap_or(true)
    }
}

/// What a click on a drawn item reports to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Spot(Spot),
    /// Host decides whether to zoom in, list members or open the representative.
    Cluster {
        representative: Spot,
        members: Vec<SpotId>,
    },
}

impl Selection {
    /// The spot a detail view should start from.
    pub fn primary_spot(&self) -> &Spot {
        match self {
            Self::Spot(spot) => spot,
            Self::Cluster { representative, .. } => representative,
        }
    }
}

/// Lifecycle state of the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    Empty,
    Populated,
}

/// Counters for one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReconcileSummary {
    pub removed: usize,
    pub drawn_spots: usize,
    pub drawn_clusters: usize,
    pub skipped_invalid: usize,
    pub outside_viewport: usize,
}

impl ReconcileSummary {
    pub fn drawn(&self) -> usize {
        self.drawn_spots + self.drawn_clusters
    }
}

/// Result of routing one surface event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Selected(Selection),
    PopupRendered(ViewNode),
    PopupClosed,
    /// Stale handle, or popup event on a touch surface.
    Ignored,
}

/// Default popup content: spot name and mood, or a cluster summary.
pub fn default_popup_content(selection: &Selection) -> ViewNode {
    match selection {
        Selection::Spot(spot) => {
            let title = spot.name.clone().unwrap_or_else(|| "Spot".to_string());
            let mut node = ViewNode::new(title).line(format!("{} {}", spot.mood.emoji(), spot.mood));
            if spot.is_private {
                node = node.line("private");
            }
            if spot.is_owner {
                node = node.line("yours");
            }
            node
        }
        Selection::Cluster { members, .. } => {
            ViewNode::new(format!("{} spots", members.len())).line("zoom in to see each spot")
        }
    }
}

/// Reconciles spot data onto a `DrawingSurface`.
pub struct MarkerLayerManager<S: DrawingSurface> {
    surface: S,
    config: LayerConfig,
    state: LayerState,
    bindings: BTreeMap<SurfaceHandle, Selection>,
    popups: PopupBinder,
    popup_content: Rc<RefCell<ContentFn>>,
    on_select: Option<SelectFn>,
}

impl<S: DrawingSurface> MarkerLayerManager<S> {
    pub fn new(surface: S, config: LayerConfig) -> Self {
        let content: ContentFn = Box::new(default_popup_content);
        Self {
            surface,
            config,
            state: LayerState::Empty,
            bindings: BTreeMap::new(),
            popups: PopupBinder::new(),
            popup_content: Rc::new(RefCell::new(content)),
            on_select: None,
        }
    }

    /// Registers the selection callback used for clicks.
    pub fn on_select(&mut self, callback: impl FnMut(&Selection) + 'static) {
        self.on_select = Some(Box::new(callback));
    }

    /// Replaces the popup content builder.
    ///
    /// Already bound popups use the new builder on their next open.
    pub fn set_popup_content(&mut self, content: impl Fn(&Selection) -> ViewNode + 'static) {
        *self.popup_content.borrow_mut() = Box::new(content);
    }

    /// Runs one teardown-then-redraw pass for `spots` at `viewport`.
    pub fn reconcile(&mut self, spots: &[Spot], viewport: &Viewport) -> ReconcileSummary {
        let mut summary = ReconcileSummary {
            removed: self.teardown(),
            ..ReconcileSummary::default()
        };

        let mut visible = Vec::with_capacity(spots.len());
        for (index, spot) in spots.iter().enumerate() {
            if !spot.has_valid_coordinates() {
                warn!(
                    "event=spot_skipped module=layer status=warn reason=invalid_coordinate index={}",
                    index
                );
                summary.skipped_invalid += 1;
                continue;
            }
            if !viewport.shows(spot) {
                summary.outside_viewport += 1;
                continue;
            }
            visible.push(spot.clone());
        }

        let radius_km = self.config.radius_policy.radius_for_zoom(viewport.zoom);
        let items = plan_items(&visible, viewport.zoom, &self.config.radius_policy);
        for item in items {
            match item {
                PassItem::Spot(spot) => {
                    self.place_spot(spot);
                    summary.drawn_spots += 1;
                }
                PassItem::Cluster(cluster) => {
                    self.place_cluster(&cluster);
                    summary.drawn_clusters += 1;
                }
            }
        }

        if summary.drawn() > 0 {
            self.state = LayerState::Populated;
        }
        debug!(
            "event=layer_reconcile module=layer status=ok zoom={} radius_km={} removed={} spots={} clusters={} skipped={} outside={}",
            viewport.zoom,
            radius_km,
            summary.removed,
            summary.drawn_spots,
            summary.drawn_clusters,
            summary.skipped_invalid,
            summary.outside_viewport
        );
        summary
    }

    /// Removes every drawn item. Returns the number of handles removed.
    pub fn clear(&mut self) -> usize {
        self.teardown()
    }

    /// Routes one surface event.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> EventOutcome {
        match event {
            SurfaceEvent::Click(handle) => {
                let Some(selection) = self.bindings.get(&handle) else {
                    debug!("event=surface_click module=layer status=ignored reason=stale_handle");
                    return EventOutcome::Ignored;
                };
                if let Some(callback) = self.on_select.as_mut() {
                    callback(selection);
                }
                EventOutcome::Selected(selection.clone())
            }
            SurfaceEvent::PopupOpen(handle) => match self.popups.open(handle) {
                Some(content) => EventOutcome::PopupRendered(content.clone()),
                None => EventOutcome::Ignored,
            },
            SurfaceEvent::PopupClose(handle) => {
                if self.popups.close(handle) {
                    EventOutcome::PopupClosed
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    /// Host animation frame tick; drains deferred popup teardown.
    pub fn on_animation_frame(&mut self) -> usize {
        self.popups.on_animation_frame()
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    /// Handles drawn by the latest pass.
    pub fn live_handles(&self) -> usize {
        self.bindings.len()
    }

    pub fn handles(&self) -> Vec<SurfaceHandle> {
        self.bindings.keys().copied().collect()
    }

    pub fn selection_for(&self, handle: SurfaceHandle) -> Option<&Selection> {
        self.bindings.get(&handle)
    }

    pub fn popups(&self) -> &PopupBinder {
        &self.popups
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn teardown(&mut self) -> usize {
        let bindings = std::mem::take(&mut self.bindings);
        let removed = bindings.len();
        for handle in bindings.into_keys() {
            if !self.surface.remove(handle) {
                debug!(
                    "event=surface_remove module=layer status=ignored handle={}",
                    handle.raw()
                );
            }
            self.popups.on_marker_removed(handle);
        }
        self.state = LayerState::Empty;
        removed
    }

    fn place_spot(&mut self, spot: &Spot) {
        let handle = self.surface.place(Glyph::Spot(SpotMarker::from(spot)));
        self.bind(handle, Selection::Spot(spot.clone()));
    }

    fn place_cluster(&mut self, cluster: &ClusterData<'_>) {
        let glyph = ClusterGlyph {
            lat: cluster.lat,
            lng: cluster.lng,
            count: cluster.count,
            member_ids: cluster.member_ids(),
            visual: describe(cluster),
        };
        let handle = self.surface.place(Glyph::Cluster(glyph));
        self.bind(
            handle,
            Selection::Cluster {
                representative: cluster.representative().clone(),
                members: cluster.member_ids(),
            },
        );
    }

    fn bind(&mut self, handle: SurfaceHandle, selection: Selection) {
        if !self.config.touch_surface {
            let content = Rc::clone(&self.popup_content);
            let subject = selection.clone();
            self.popups
                .bind_popup(handle, move || (content.borrow())(&subject));
        }
        self.bindings.insert(handle, selection);
    }
}

impl<S: DrawingSurface> Drop for MarkerLayerManager<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

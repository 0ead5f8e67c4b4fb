//! Popup lifecycle binding.
//!
//! # Responsibility
//! - Bind detail content to a marker's popup through a reusable mount point.
//! - Defer mount teardown until the host's next animation frame.
//!
//! # Invariants
//! - At most one mount point exists per marker handle; it is created on the
//!   first open and reused by every later open.
//! - Content is produced by calling the factory on every open, never cached
//!   across opens.
//! - Mount points of removed markers stay alive until
//!   `on_animation_frame` drains the pending disposal queue. This is the only
//!   deferred operation of the layer.

use crate::layer::surface::SurfaceHandle;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

/// Popup content tree handed to the host renderer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewNode {
    pub title: String,
    pub lines: Vec<String>,
}

impl ViewNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Identifier of one mount point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MountId(u64);

/// Host-side container the popup content renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub id: MountId,
    pub marker: SurfaceHandle,
    /// Last rendered content.
    pub rendered: Option<ViewNode>,
    pub render_count: usize,
}

/// Caller-side handle of a bound popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupHandle {
    marker: SurfaceHandle,
}

impl PopupHandle {
    pub fn marker(&self) -> SurfaceHandle {
        self.marker
    }
}

struct PopupBinding {
    factory: Box<dyn Fn() -> ViewNode>,
    mount: Option<MountId>,
    open: bool,
}

/// Owns popup bindings, their mount points and the pending disposal queue.
#[derive(Default)]
pub struct PopupBinder {
    bindings: BTreeMap<SurfaceHandle, PopupBinding>,
    mounts: BTreeMap<MountId, MountPoint>,
    pending_disposal: VecDeque<MountId>,
    next_mount: u64,
}

impl PopupBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `factory` to the popup of `marker`.
    ///
    /// Rebinding a marker replaces its factory but keeps its mount point.
    pub fn bind_popup(
        &mut self,
        marker: SurfaceHandle,
        factory: impl Fn() -> ViewNode + 'static,
    ) -> PopupHandle {
        let factory: Box<dyn Fn() -> ViewNode> = Box::new(factory);
        match self.bindings.get_mut(&marker) {
            Some(binding) => binding.factory = factory,
            None => {
                self.bindings.insert(
                    marker,
                    PopupBinding {
                        factory,
                        mount: None,
                        open: false,
                    },
                );
            }
        }
        PopupHandle { marker }
    }

    /// Handles a popup "open" event: renders fresh content into the mount.
    ///
    /// Returns `None` when `marker` has no bound popup.
    pub fn open(&mut self, marker: SurfaceHandle) -> Option<&ViewNode> {
        let binding = self.bindings.get_mut(&marker)?;
        let mount_id = match binding.mount {
            Some(id) => id,
            None => {
                self.next_mount += 1;
                let id = MountId(self.next_mount);
                self.mounts.insert(
                    id,
                    MountPoint {
                        id,
                        marker,
                        rendered: None,
                        render_count: 0,
                    },
                );
                binding.mount = Some(id);
                id
            }
        };
        binding.open = true;
        let content = (binding.factory)();

        let mount = self.mounts.get_mut(&mount_id)?;
        mount.rendered = Some(content);
        mount.render_count += 1;
        mount.rendered.as_ref()
    }

    /// Handles a popup "close" event. The mount point is kept for reuse.
    pub fn close(&mut self, marker: SurfaceHandle) -> bool {
        match self.bindings.get_mut(&marker) {
            Some(binding) if binding.open => {
                binding.open = false;
                true
            }
            _ => false,
        }
    }

    /// Handles marker removal: drops the binding and queues its mount point
    /// for disposal on the next animation frame.
    pub fn on_marker_removed(&mut self, marker: SurfaceHandle) -> bool {
        let Some(binding) = self.bindings.remove(&marker) else {
            return false;
        };
        if let Some(mount_id) = binding.mount {
            self.pending_disposal.push_back(mount_id);
        }
        true
    }

    /// Animation frame tick: unmounts everything queued before this call.
    ///
    /// Returns the number of mount points disposed.
    pub fn on_animation_frame(&mut self) -> usize {
        let mut disposed = 0;
        while let Some(mount_id) = self.pending_disposal.pop_front() {
            if self.mounts.remove(&mount_id).is_some() {
                disposed += 1;
            }
        }
        if disposed > 0 {
            debug!(
                "event=popup_mount_disposed module=popup status=ok count={}",
                disposed
            );
        }
        disposed
    }

    pub fn is_bound(&self, marker: SurfaceHandle) -> bool {
        self.bindings.contains_key(&marker)
    }

    pub fn is_open(&self, marker: SurfaceHandle) -> bool {
        self.bindings
            .get(&marker)
            .map(|binding| binding.open)
            .unwrap_or(false)
    }

    /// Mount point of a still-bound marker.
    pub fn mount_for(&self, marker: SurfaceHandle) -> Option<&MountPoint> {
        let mount_id = self.bindings.get(&marker)?.mount?;
        self.mounts.get(&mount_id)
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    /// Mount points alive, including those waiting for disposal.
    pub fn live_mounts(&self) -> usize {
        self.mounts.len()
    }

    pub fn pending_disposals(&self) -> usize {
        self.pending_disposal.len()
    }
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-root zoom sequencing.

use kurbo::Rect;

use canopy_pack::{Diagram, NodeId};

use crate::blend::{blend, Viewport};

/// Seconds per hop in a multi-root flight.
const STEP_DURATION: f64 = 0.5;

/// Half-extent of the destination box around a target node, in the target's
/// own frame: the final viewport is 2.5x the target's radius.
const TARGET_HALF_EXTENT: f64 = 1.25;

/// Animates a viewport to a target node across a locally packed diagram.
///
/// A single [`blend`] cannot cross an arbitrary zoom range: once
/// `log(w0 / w1)` gets large enough the interpolation collapses into
/// double-precision noise. The rig instead flies a *root sequence* of
/// ancestor frames from the current root up to the lowest common ancestor
/// and back down to the target's root, one blend per hop. Every hop is
/// expressed in that hop's root frame, and between hops the viewport is
/// mathematically unchanged but numerically re-homed to the next frame, so
/// precision never degrades no matter how far the flight goes.
///
/// The rig owns nothing but its own state; the diagram is passed into each
/// call. Starting a [`zoom`](CameraRig::zoom) while one is active is
/// ignored.
///
/// ```rust
/// use canopy_camera::{CameraRig, Viewport};
/// use canopy_pack::{pack_hierarchical, PackOptions};
///
/// let diagram = pack_hierarchical(&[0, 0, 0, 1, 1], &PackOptions::local()).unwrap();
/// let mut rig = CameraRig::new();
/// rig.set_viewport(Viewport::new(0.0, 0.0, 2.0));
/// rig.zoom(&diagram, 0.0, 0, 3, true);
/// assert!(rig.is_active());
/// let vp = rig.tick(&diagram, 0.25, 0);
/// assert!(vp.is_some());
/// ```
#[derive(Debug)]
pub struct CameraRig {
    active: bool,
    start_time: f64,
    viewport: Viewport,
    initial: Viewport,
    final_viewport: Viewport,
    sequence: Vec<NodeId>,
    step: usize,
    target: NodeId,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    /// A rig at rest, looking at the unit frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: false,
            start_time: 0.0,
            viewport: Viewport::new(0.0, 0.0, 2.0),
            initial: Viewport::new(0.0, 0.0, 2.0),
            final_viewport: Viewport::new(0.0, 0.0, 2.0),
            sequence: Vec::new(),
            step: 0,
            target: 0,
        }
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The viewport the rig last produced (or was given).
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Overwrite the current viewport, e.g. after the host pans or zooms
    /// manually. Ignored mid-flight.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !self.active {
            self.viewport = viewport;
        }
    }

    /// Begin a flight from the current viewport (in `root`'s frame) to a
    /// 2.5x-radius view of `target`.
    ///
    /// `distant` selects the multi-root sequence; without it the flight is
    /// a single blend in `root`'s frame, which is fine when the target is
    /// within a few orders of magnitude. Ignored while a flight is active.
    pub fn zoom(&mut self, diagram: &Diagram, now: f64, root: NodeId, target: NodeId, distant: bool) {
        if self.active {
            return;
        }
        let Some(graph) = diagram.graph() else {
            return;
        };
        if root >= diagram.len() || target >= diagram.len() {
            return;
        }

        // The flight lands on a viewport 2.5x the target's radius. The
        // frame that viewport lives in (the "target root") is the deepest
        // ancestor of the target whose disk holds the whole destination
        // box.
        let dst_box = Rect::new(
            -TARGET_HALF_EXTENT,
            -TARGET_HALF_EXTENT,
            TARGET_HALF_EXTENT,
            TARGET_HALF_EXTENT,
        );
        let target_root = diagram.find_enclosing(dst_box, target).unwrap_or(0);

        self.sequence.clear();
        if !distant {
            let Some(xf) = diagram.transform_local(target, root) else {
                return;
            };
            self.activate(now, target);
            self.sequence.push(root);
            self.final_viewport =
                Viewport::new(xf.tx, xf.ty, 2.0 * TARGET_HALF_EXTENT * xf.s);
            return;
        }

        let Some(xf) = diagram.transform_local(target, target_root) else {
            return;
        };
        self.activate(now, target);
        self.final_viewport = Viewport::new(xf.tx, xf.ty, 2.0 * TARGET_HALF_EXTENT * xf.s);

        // Ascend from the current root to the LCA, then descend to the
        // target root. The descent is collected bottom-up and reversed in
        // place.
        let lca = graph.lca(root, target_root);
        let mut node = root;
        loop {
            self.sequence.push(node);
            if node == lca {
                break;
            }
            node = graph.parent(node);
        }
        let descent_from = self.sequence.len();
        node = target_root;
        while node != lca {
            self.sequence.push(node);
            node = graph.parent(node);
        }
        self.sequence[descent_from..].reverse();
        // The last frame hosts two hops: the approach and the final
        // settle onto the destination viewport.
        if let Some(&last) = self.sequence.last() {
            self.sequence.push(last);
        }
    }

    fn activate(&mut self, now: f64, target: NodeId) {
        self.active = true;
        self.start_time = now;
        self.step = 0;
        self.target = target;
        self.initial = self.viewport;
    }

    /// Advance the flight and return the viewport for this frame, in
    /// `root`'s coordinates, or `None` when idle.
    ///
    /// When the last hop's time elapses the viewport snaps to the exact
    /// destination and the rig goes idle.
    pub fn tick(&mut self, diagram: &Diagram, now: f64, root: NodeId) -> Option<Viewport> {
        if !self.active {
            return None;
        }
        let mut elapsed = now - self.start_time;
        let nseq = self.sequence.len();

        // Hop boundary: move to the next sequence frame, or finish.
        if elapsed >= STEP_DURATION {
            self.step += 1;
            if self.step >= nseq {
                let last = *self.sequence.last()?;
                let xf = diagram.transform_local(last, root)?;
                let vp = Viewport::new(
                    self.final_viewport.x * xf.s + xf.tx,
                    self.final_viewport.y * xf.s + xf.ty,
                    self.final_viewport.w * xf.s,
                );
                self.viewport = vp;
                self.active = false;
                return Some(vp);
            }
            self.start_time = now;
            elapsed = 0.0;
        }

        // Crosshairs: where the target sits in this hop's frame.
        let hop_root = self.sequence[self.step];
        let mut crosshairs = diagram.transform_local(self.target, hop_root)?;

        // Source viewport for this hop. The first hop starts from the real
        // viewport; later hops re-home the previous frame's unit disk,
        // which is exactly where the previous hop ended.
        let src = if self.step == 0 {
            self.initial
        } else {
            let prev = diagram.transform_local(self.sequence[self.step - 1], hop_root)?;
            if self.target == 0 {
                crosshairs.tx = prev.tx;
                crosshairs.ty = prev.ty;
            }
            Viewport::new(crosshairs.tx, crosshairs.ty, 2.0 * prev.s)
        };

        // Destination: centered on the crosshairs at unit-frame width,
        // except that zooming out to the tree root centers on the origin
        // and the last hop lands on the final viewport.
        let mut dst = Viewport::new(crosshairs.tx, crosshairs.ty, 2.0);
        if self.target == 0 {
            dst.x = 0.0;
            dst.y = 0.0;
        }
        if self.step == nseq - 1 {
            dst = self.final_viewport;
        }

        let desired = blend(&src, &dst, elapsed / STEP_DURATION);

        // Express the result in the caller's root frame.
        let xf = diagram.transform_local(hop_root, root)?;
        let vp = Viewport::new(
            desired.x * xf.s + xf.tx,
            desired.y * xf.s + xf.ty,
            desired.w * xf.s,
        );
        self.viewport = vp;
        Some(vp)
    }
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative transforms between node frames.
//!
//! A packed node's frame maps the node's own disk to the unit disk at the
//! origin. Transforms between frames are uniform scale plus translation,
//! composed lazily along tree paths so that precision is only ever spent on
//! the path actually traversed.

use kurbo::{Circle, Point, Rect};

use canopy_tree::NodeId;

use crate::diagram::Diagram;
use crate::options::Coords;

/// Uniform-scale-then-translate transform between two coordinate frames.
///
/// Applying `(tx, ty, s)` to a point first scales by `s`, then translates
/// by `(tx, ty)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    /// Translation x.
    pub tx: f64,
    /// Translation y.
    pub ty: f64,
    /// Uniform scale.
    pub s: f64,
}

impl LocalTransform {
    /// The do-nothing transform.
    pub const IDENTITY: Self = Self {
        tx: 0.0,
        ty: 0.0,
        s: 1.0,
    };

    /// Transform a point.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.s * p.x + self.tx, self.s * p.y + self.ty)
    }

    /// Transform a disk.
    #[inline]
    #[must_use]
    pub fn apply_circle(&self, c: &Circle) -> Circle {
        Circle::new(self.apply(c.center), self.s * c.radius)
    }

    /// Transform an axis-aligned box. The scale is positive in practice, so
    /// corners map to corners.
    #[inline]
    #[must_use]
    pub fn apply_rect(&self, r: Rect) -> Rect {
        Rect::new(
            self.s * r.x0 + self.tx,
            self.s * r.y0 + self.ty,
            self.s * r.x1 + self.tx,
            self.s * r.y1 + self.ty,
        )
    }

    /// The inverse transform. The scale must be nonzero, which packed
    /// diagrams guarantee.
    #[inline]
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            tx: -self.tx / self.s,
            ty: -self.ty / self.s,
            s: 1.0 / self.s,
        }
    }

    /// `outer` after `self`: the transform applying `self` first.
    #[inline]
    #[must_use]
    pub fn then(&self, outer: &Self) -> Self {
        Self {
            tx: outer.s * self.tx + outer.tx,
            ty: outer.s * self.ty + outer.ty,
            s: outer.s * self.s,
        }
    }
}

impl Diagram {
    /// Transform mapping points in `a`'s frame to `b`'s frame.
    ///
    /// For local packings the transform is composed along the tree path
    /// through the lowest common ancestor, which is what keeps deep zooms
    /// numerically honest. For global packings it falls out of the two
    /// world disks directly. `None` on flat diagrams or out-of-range nodes.
    #[must_use]
    pub fn transform_local(&self, a: NodeId, b: NodeId) -> Option<LocalTransform> {
        let graph = self.graph.as_ref()?;
        if a >= self.disks.len() || b >= self.disks.len() {
            return None;
        }
        if a == b {
            return Some(LocalTransform::IDENTITY);
        }
        match self.coords {
            Coords::Local => {
                let lca = graph.lca(a, b);
                let up_a = self.compose_to_ancestor(graph, a, lca);
                let up_b = self.compose_to_ancestor(graph, b, lca);
                Some(up_a.then(&up_b.inverse()))
            }
            Coords::Global { .. } => {
                // World frames: a point p in a's frame sits at
                // a.center + a.radius * p in the world.
                let (da, db) = (self.disks[a], self.disks[b]);
                Some(LocalTransform {
                    tx: (da.center.x - db.center.x) / db.radius,
                    ty: (da.center.y - db.center.y) / db.radius,
                    s: da.radius / db.radius,
                })
            }
        }
    }

    /// Compose local disks upward from `node` into `ancestor`'s frame.
    fn compose_to_ancestor(
        &self,
        graph: &canopy_tree::TreeGraph,
        mut node: NodeId,
        ancestor: NodeId,
    ) -> LocalTransform {
        let mut xf = LocalTransform::IDENTITY;
        while node != ancestor {
            let d = self.disks[node];
            xf = LocalTransform {
                tx: d.radius * xf.tx + d.center.x,
                ty: d.radius * xf.ty + d.center.y,
                s: d.radius * xf.s,
            };
            node = graph.parent(node);
        }
        xf
    }
}

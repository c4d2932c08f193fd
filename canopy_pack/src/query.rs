// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial queries over packed diagrams: picking, enclosure search, and
//! viewport culling.
//!
//! Every traversal here uses an explicit stack or a descend loop; nothing
//! recurses, so pathological trees cannot overflow the call stack.

use kurbo::{Circle, Point, Rect};

use canopy_geom::{disk_contains_point, disk_encloses_rect, disk_intersects_rect};
use canopy_tree::NodeId;

use crate::diagram::{CulledDiagram, Diagram};
use crate::options::{Coords, CullFilter};
use crate::xform::LocalTransform;

impl Diagram {
    /// Deepest node covering the point, children winning over parents.
    ///
    /// The point is in world coordinates for global packings and in the
    /// root's frame for local ones. On a flat diagram later disks are
    /// treated as drawn on top. `None` when nothing covers the point.
    #[must_use]
    pub fn pick(&self, x: f64, y: f64) -> Option<NodeId> {
        let pt = Point::new(x, y);
        let Some(graph) = &self.graph else {
            return self
                .disks
                .iter()
                .rposition(|d| disk_contains_point(d, pt));
        };
        if self.disks.is_empty() {
            return None;
        }
        match self.coords {
            Coords::Global { .. } => {
                if !disk_contains_point(&self.disks[0], pt) {
                    return None;
                }
                let mut node = 0;
                'descend: loop {
                    for &child in graph.children(node) {
                        if disk_contains_point(&self.disks[child], pt) {
                            node = child;
                            continue 'descend;
                        }
                    }
                    return Some(node);
                }
            }
            Coords::Local => {
                // Same walk, but each child's disk is composed into the
                // root frame on the way down.
                if !disk_contains_point(&Circle::new((0.0, 0.0), 1.0), pt) {
                    return None;
                }
                let mut node = 0;
                let mut xf = LocalTransform::IDENTITY;
                'descend: loop {
                    for &child in graph.children(node) {
                        let disk = xf.apply_circle(&self.disks[child]);
                        if disk_contains_point(&disk, pt) {
                            node = child;
                            xf = local_into(&self.disks[child]).then(&xf);
                            continue 'descend;
                        }
                    }
                    return Some(node);
                }
            }
        }
    }

    /// Deepest node whose disk, expressed in `root`'s frame, fully encloses
    /// the box.
    ///
    /// Descends while a child still encloses the box. If `root`'s own disk
    /// does not enclose it, the box is re-expressed in the parent's frame
    /// and the search ascends; `None` once the search would climb past the
    /// tree root. Local packings only.
    #[must_use]
    pub fn find_enclosing(&self, aabb: Rect, root: NodeId) -> Option<NodeId> {
        let graph = self.graph.as_ref()?;
        if root >= self.disks.len() || self.coords != Coords::Local {
            return None;
        }
        let unit = Circle::new((0.0, 0.0), 1.0);

        // Ascend until the current root's unit disk encloses the box.
        let mut node = root;
        let mut aabb = aabb;
        while !disk_encloses_rect(&unit, aabb) {
            if node == 0 {
                return None;
            }
            aabb = local_into(&self.disks[node]).apply_rect(aabb);
            node = graph.parent(node);
        }

        // Descend into the unique enclosing child, if any.
        'descend: loop {
            for &child in graph.children(node) {
                let disk = self.disks[child];
                if disk_encloses_rect(&disk, aabb) {
                    aabb = local_into(&disk).inverse().apply_rect(aabb);
                    node = child;
                    continue 'descend;
                }
            }
            return Some(node);
        }
    }

    /// Deepest node under `root` covering the point whose apparent radius
    /// in `root`'s frame is at least `minradius`.
    ///
    /// The point is in `root`'s frame. Implemented as an enclosure search
    /// on a degenerate box followed by a walk back up that stops at the
    /// first big-enough ancestor, never above `root`. `None` when the point
    /// falls outside `root`'s subtree. Local packings only.
    #[must_use]
    pub fn pick_local(&self, x: f64, y: f64, root: NodeId, minradius: f64) -> Option<NodeId> {
        let graph = self.graph.as_ref()?;
        let found = self.find_enclosing(Rect::new(x, y, x, y), root)?;
        if !graph.is_ancestor(root, found) {
            return None;
        }
        let mut node = found;
        while node != root {
            let xf = self.transform_local(node, root)?;
            if xf.s >= minradius {
                break;
            }
            node = graph.parent(node);
        }
        Some(node)
    }

    /// Copy into `dst` every node whose disk overlaps the box and is at
    /// least `minradius` big, without descending past a pruned node.
    ///
    /// The box and radius are in world coordinates for global packings and
    /// in the root's frame for local ones (where this is the same as
    /// [`cull_local`](Diagram::cull_local) from node `0`). Ancestors come
    /// before descendants in the output. `dst` is cleared first; its
    /// buffers are reused.
    pub fn cull(&self, aabb: Rect, minradius: f64, dst: &mut CulledDiagram) {
        if let Coords::Local = self.coords {
            self.cull_local(aabb, minradius, 0, dst);
            return;
        }
        dst.clear();
        let Some(graph) = &self.graph else {
            for (i, disk) in self.disks.iter().enumerate() {
                if disk.radius >= minradius && disk_intersects_rect(disk, aabb) {
                    dst.push(*disk, i);
                }
            }
            return;
        };
        if self.disks.is_empty() {
            return;
        }
        let mut stack = vec![0_usize];
        while let Some(node) = stack.pop() {
            let disk = self.disks[node];
            if disk.radius < minradius || !disk_intersects_rect(&disk, aabb) {
                continue;
            }
            dst.push(disk, node);
            for &child in self.filtered_children(graph, node).iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Like [`cull`](Diagram::cull), but over a local packing from an
    /// arbitrary root, with all output disks re-homed to `root`'s frame.
    ///
    /// `root` itself comes out as the unit disk at the origin. Transforms
    /// are composed on the fly during the descent, so the cost is
    /// proportional to the surviving subtree.
    pub fn cull_local(&self, aabb: Rect, minradius: f64, root: NodeId, dst: &mut CulledDiagram) {
        dst.clear();
        let Some(graph) = &self.graph else {
            return;
        };
        if root >= self.disks.len() || self.coords != Coords::Local {
            return;
        }
        let mut stack: Vec<(NodeId, LocalTransform)> = vec![(root, LocalTransform::IDENTITY)];
        while let Some((node, xf)) = stack.pop() {
            // The node is the unit disk in its own frame, so in the root
            // frame it is just the transform itself.
            let disk = Circle::new(Point::new(xf.tx, xf.ty), xf.s);
            if disk.radius < minradius || !disk_intersects_rect(&disk, aabb) {
                continue;
            }
            dst.push(disk, node);
            for &child in self.filtered_children(graph, node).iter().rev() {
                let child_xf = local_into(&self.disks[child]).then(&xf);
                stack.push((child, child_xf));
            }
        }
    }

    /// Children of `node` with the diagram's cull filter applied.
    fn filtered_children<'g>(
        &self,
        graph: &'g canopy_tree::TreeGraph,
        node: NodeId,
    ) -> &'g [NodeId] {
        let children = graph.children(node);
        if self.filter.contains(CullFilter::DISCARD_LAST_CHILD) && !children.is_empty() {
            &children[..children.len() - 1]
        } else {
            children
        }
    }
}

/// Transform from a node's own frame into its parent's, read off the node's
/// local disk.
#[inline]
fn local_into(disk: &Circle) -> LocalTransform {
    LocalTransform {
        tx: disk.center.x,
        ty: disk.center.y,
        s: disk.radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hpack::pack_hierarchical;
    use crate::options::PackOptions;
    use crate::pack_flat;

    fn sample_local() -> Diagram {
        pack_hierarchical(&[0, 0, 0, 1, 1, 2, 2, 2], &PackOptions::local()).unwrap()
    }

    fn sample_global() -> Diagram {
        pack_hierarchical(&[0, 0, 0, 1, 1, 2, 2, 2], &PackOptions::default()).unwrap()
    }

    #[test]
    fn pick_returns_deepest_cover() {
        let d = sample_global();
        // The center of a leaf picks that leaf.
        for leaf in [3_usize, 4, 5, 6, 7] {
            let c = d.disk(leaf);
            assert_eq!(d.pick(c.center.x, c.center.y), Some(leaf));
        }
        // Far outside the root picks nothing.
        assert_eq!(d.pick(100.0, 100.0), None);
    }

    #[test]
    fn pick_center_is_self_or_descendant() {
        let d = sample_global();
        let graph = d.graph().unwrap();
        for i in 0..d.len() {
            let c = d.disk(i);
            let hit = d.pick(c.center.x, c.center.y).unwrap();
            assert!(graph.is_ancestor(i, hit), "node {i} picked {hit}");
        }
    }

    #[test]
    fn pick_agrees_between_global_and_local() {
        let g = sample_global();
        let l = sample_local();
        // Both packings share the unit root frame, so picks line up.
        for &(x, y) in &[(0.0, 0.0), (0.3, 0.2), (-0.4, 0.1), (0.9, 0.9), (2.0, 0.0)] {
            assert_eq!(g.pick(x, y), l.pick(x, y), "at ({x}, {y})");
        }
    }

    #[test]
    fn pick_on_flat_prefers_later_disks() {
        let d = Diagram::flat(vec![
            Circle::new((0.0, 0.0), 1.0),
            Circle::new((0.5, 0.0), 1.0),
        ]);
        assert_eq!(d.pick(0.4, 0.0), Some(1));
        assert_eq!(d.pick(-0.8, 0.0), Some(0));
        assert_eq!(d.pick(5.0, 0.0), None);
    }

    #[test]
    fn find_enclosing_descends_and_ascends() {
        let d = sample_local();
        // A tiny box at a leaf's center, expressed in the leaf's own frame,
        // is enclosed by the leaf itself.
        let tiny = Rect::new(-0.01, -0.01, 0.01, 0.01);
        assert_eq!(d.find_enclosing(tiny, 3), Some(3));
        // A box wider than the leaf's unit frame pushes the search upward.
        let wide = Rect::new(-1.25, -1.25, 1.25, 1.25);
        let up = d.find_enclosing(wide, 3).unwrap();
        assert_ne!(up, 3);
        assert!(d.graph().unwrap().is_ancestor(up, 3));
        // A box the whole tree cannot hold is out of reach.
        let huge = Rect::new(-99.0, -99.0, 99.0, 99.0);
        assert_eq!(d.find_enclosing(huge, 3), None);
    }

    #[test]
    fn find_enclosing_from_root_finds_deep_nodes() {
        let d = sample_local();
        // Box around node 3's center in root coordinates: compose 3 -> 0.
        let xf = d.transform_local(3, 0).unwrap();
        let eps = xf.s * 0.01;
        let aabb = Rect::new(xf.tx - eps, xf.ty - eps, xf.tx + eps, xf.ty + eps);
        let found = d.find_enclosing(aabb, 0).unwrap();
        assert_eq!(found, 3);
    }

    #[test]
    fn pick_local_respects_minradius() {
        let d = sample_local();
        let xf = d.transform_local(3, 0).unwrap();
        // With no radius floor the leaf itself wins.
        let hit = d.pick_local(xf.tx, xf.ty, 0, 0.0).unwrap();
        assert_eq!(hit, 3);
        // Demanding more apparent size than the leaf has walks up to an
        // ancestor; demanding more than anything has stops at the root.
        let hit = d.pick_local(xf.tx, xf.ty, 0, xf.s * 1.5).unwrap();
        assert!(d.graph().unwrap().is_ancestor(hit, 3));
        assert_ne!(hit, 3);
        let hit = d.pick_local(xf.tx, xf.ty, 0, 2.0).unwrap();
        assert_eq!(hit, 0);
        // A point outside the subtree of the query root is a miss.
        assert!(d.pick_local(50.0, 50.0, 0, 0.0).is_none());
    }

    #[test]
    fn cull_keeps_big_visible_nodes() {
        let d = sample_global();
        let mut culled = CulledDiagram::new();
        d.cull(Rect::new(-2.0, -2.0, 2.0, 2.0), 0.0, &mut culled);
        assert_eq!(culled.len(), d.len(), "everything visible survives");
        // Ancestors precede descendants.
        let pos = |id: NodeId| culled.ids().iter().position(|&x| x == id).unwrap();
        let graph = d.graph().unwrap();
        for i in 1..d.len() {
            assert!(pos(graph.parent(i)) < pos(i));
        }

        // A radius floor drops the leaves but keeps the root.
        d.cull(Rect::new(-2.0, -2.0, 2.0, 2.0), d.disk(0).radius, &mut culled);
        assert_eq!(culled.ids(), &[0]);
    }

    #[test]
    fn cull_monotonicity() {
        let d = sample_global();
        let mut base = CulledDiagram::new();
        let mut tighter = CulledDiagram::new();
        let aabb = Rect::new(-0.5, -0.5, 1.0, 0.75);
        d.cull(aabb, 0.0, &mut base);

        // Raising minradius never adds nodes.
        d.cull(aabb, 0.05, &mut tighter);
        for id in tighter.ids() {
            assert!(base.ids().contains(id));
        }
        // Shrinking the box never adds nodes.
        d.cull(Rect::new(-0.25, -0.25, 0.5, 0.5), 0.0, &mut tighter);
        for id in tighter.ids() {
            assert!(base.ids().contains(id));
        }
        // Widening the box never removes nodes already present.
        d.cull(Rect::new(-1.5, -1.5, 1.5, 1.5), 0.0, &mut tighter);
        for id in base.ids() {
            assert!(tighter.ids().contains(id));
        }
    }

    #[test]
    fn cull_buffers_are_reused() {
        let d = sample_global();
        let mut culled = CulledDiagram::new();
        d.cull(Rect::new(-2.0, -2.0, 2.0, 2.0), 0.0, &mut culled);
        let cap = culled.disks.capacity();
        d.cull(Rect::new(-0.1, -0.1, 0.1, 0.1), 0.0, &mut culled);
        assert!(culled.len() < d.len());
        assert_eq!(culled.disks.capacity(), cap, "buffers never shrink");
    }

    #[test]
    fn cull_local_rehomes_the_root() {
        let d = sample_local();
        let mut culled = CulledDiagram::new();
        d.cull_local(Rect::new(-1.0, -1.0, 1.0, 1.0), 0.0, 2, &mut culled);
        assert_eq!(culled.ids()[0], 2);
        let home = culled.disks()[0];
        assert_eq!((home.center.x, home.center.y, home.radius), (0.0, 0.0, 1.0));
        // Node 2's children are present in 2's frame; the other branch is
        // not reachable.
        assert!(culled.ids().contains(&5));
        assert!(!culled.ids().contains(&3));
    }

    #[test]
    fn cull_local_matches_composed_world_disks() {
        let d = sample_local();
        let mut culled = CulledDiagram::new();
        d.cull_local(Rect::new(-1.0, -1.0, 1.0, 1.0), 0.0, 0, &mut culled);
        for (disk, &id) in culled.disks().iter().zip(culled.ids()) {
            let xf = d.transform_local(id, 0).unwrap();
            assert!((disk.center.x - xf.tx).abs() < 1e-12);
            assert!((disk.center.y - xf.ty).abs() < 1e-12);
            assert!((disk.radius - xf.s).abs() < 1e-12);
        }
    }

    #[test]
    fn discard_last_child_filter() {
        let mut d = sample_global();
        let mut culled = CulledDiagram::new();
        let everything = Rect::new(-2.0, -2.0, 2.0, 2.0);
        d.cull(everything, 0.0, &mut culled);
        assert!(culled.ids().contains(&2));
        assert!(culled.ids().contains(&7));

        d.set_filter(CullFilter::DISCARD_LAST_CHILD);
        d.cull(everything, 0.0, &mut culled);
        // Root's last child (2) disappears with its whole subtree, as does
        // every other parent's last child.
        assert!(!culled.ids().contains(&2));
        assert!(!culled.ids().contains(&7));
        assert!(!culled.ids().contains(&4));
        assert!(culled.ids().contains(&1));
        assert!(culled.ids().contains(&3));
    }

    #[test]
    fn cull_on_flat_diagram_filters_linearly() {
        let d = pack_flat(&[1.0, 1.0, 1.0, 1.0]);
        let mut culled = CulledDiagram::new();
        d.cull(Rect::new(-10.0, -10.0, 10.0, 10.0), 0.0, &mut culled);
        assert_eq!(culled.len(), 4);
        d.cull(Rect::new(-10.0, -10.0, 10.0, 10.0), 2.0, &mut culled);
        assert!(culled.is_empty());
    }

    #[test]
    fn cull_idempotence_through_refilter() {
        let d = sample_global();
        let aabb = Rect::new(-0.75, -0.75, 0.75, 0.75);
        let mut once = CulledDiagram::new();
        d.cull(aabb, 0.01, &mut once);
        let mut twice = CulledDiagram::new();
        once.cull(aabb, 0.01, &mut twice);
        assert_eq!(once.ids(), twice.ids());
        assert_eq!(once.disks(), twice.disks());
    }
}

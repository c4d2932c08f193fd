// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed diagrams and culled subsets.

use kurbo::{Circle, Rect};

use canopy_tree::{NodeId, TreeGraph};

use crate::options::{Coords, CullFilter};

/// A packing result: one disk per node, plus the tree that produced it.
///
/// Flat packings have no tree; hierarchy-dependent queries on them return
/// `None` or nothing. A diagram is immutable after packing apart from its
/// [cull filter](Diagram::set_filter), so it is safe to share across threads
/// for read-only queries.
pub struct Diagram {
    pub(crate) graph: Option<TreeGraph>,
    pub(crate) disks: Vec<Circle>,
    pub(crate) coords: Coords,
    pub(crate) filter: CullFilter,
}

impl core::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Diagram")
            .field("len", &self.disks.len())
            .field("hierarchical", &self.graph.is_some())
            .field("coords", &self.coords)
            .field("filter", &self.filter)
            .finish()
    }
}

impl Diagram {
    pub(crate) fn flat(disks: Vec<Circle>) -> Self {
        Self {
            graph: None,
            disks,
            coords: Coords::Global { radius: 1.0 },
            filter: CullFilter::empty(),
        }
    }

    pub(crate) fn hierarchical(graph: TreeGraph, disks: Vec<Circle>, coords: Coords) -> Self {
        Self {
            graph: Some(graph),
            disks,
            coords,
            filter: CullFilter::empty(),
        }
    }

    pub(crate) fn empty(coords: Coords) -> Self {
        Self {
            graph: None,
            disks: Vec::new(),
            coords,
            filter: CullFilter::empty(),
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether the diagram has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// All disks, indexed by node. For local packings each disk is in its
    /// parent's unit frame; for global packings everything is in world
    /// coordinates.
    #[must_use]
    pub fn disks(&self) -> &[Circle] {
        &self.disks
    }

    /// Disk of one node.
    #[must_use]
    pub fn disk(&self, i: NodeId) -> Circle {
        self.disks[i]
    }

    /// The coordinate system the disks were emitted in.
    #[must_use]
    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// The tree behind the packing, if any.
    #[must_use]
    pub fn graph(&self) -> Option<&TreeGraph> {
        self.graph.as_ref()
    }

    /// Filter applied by [culling](Diagram::cull).
    #[must_use]
    pub fn filter(&self) -> CullFilter {
        self.filter
    }

    /// Set the filter applied by [culling](Diagram::cull).
    pub fn set_filter(&mut self, filter: CullFilter) {
        self.filter = filter;
    }

    /// Parent of a node; the root is its own parent. `None` on flat
    /// diagrams.
    #[must_use]
    pub fn parent(&self, i: NodeId) -> Option<NodeId> {
        self.graph.as_ref().map(|g| g.parent(i))
    }

    /// Children of a node; empty on flat diagrams.
    #[must_use]
    pub fn children(&self, i: NodeId) -> &[NodeId] {
        self.graph.as_ref().map_or(&[], |g| g.children(i))
    }

    /// Depth of a node below the root. `None` on flat diagrams.
    #[must_use]
    pub fn depth(&self, i: NodeId) -> Option<usize> {
        self.graph.as_ref().map(|g| g.depth(i))
    }

    /// Lowest common ancestor. `None` on flat diagrams.
    #[must_use]
    pub fn lca(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        self.graph.as_ref().map(|g| g.lca(a, b))
    }

    /// Tree height and one deepest leaf. `None` on flat diagrams.
    #[must_use]
    pub fn max_depth_leaf(&self) -> Option<(usize, NodeId)> {
        self.graph.as_ref().map(TreeGraph::max_depth_leaf)
    }

    /// Bounding box of every disk, or `None` when empty.
    #[must_use]
    pub fn aabb(&self) -> Option<Rect> {
        bbox_of(&self.disks)
    }

    /// Bounding box of a node's subtree.
    ///
    /// For global packings this is the recursive union of the subtree's
    /// disk boxes in world coordinates. For local packings every descendant
    /// lies inside the node's disk, so the node's own box (in its parent's
    /// frame) is the exact conservative answer and no traversal is needed.
    /// On a flat diagram this is the box of the single disk.
    #[must_use]
    pub fn subtree_aabb(&self, i: NodeId) -> Option<Rect> {
        if i >= self.disks.len() {
            return None;
        }
        let graph = match (&self.graph, self.coords) {
            (Some(graph), Coords::Global { .. }) => graph,
            _ => return Some(disk_bbox(&self.disks[i])),
        };
        let mut bbox = disk_bbox(&self.disks[i]);
        let mut stack: Vec<NodeId> = graph.children(i).to_vec();
        while let Some(node) = stack.pop() {
            bbox = bbox.union(disk_bbox(&self.disks[node]));
            stack.extend_from_slice(graph.children(node));
        }
        Some(bbox)
    }
}

#[inline]
fn disk_bbox(c: &Circle) -> Rect {
    Rect::new(
        c.center.x - c.radius,
        c.center.y - c.radius,
        c.center.x + c.radius,
        c.center.y + c.radius,
    )
}

fn bbox_of(disks: &[Circle]) -> Option<Rect> {
    let (first, rest) = disks.split_first()?;
    let mut bbox = disk_bbox(first);
    for c in rest {
        bbox = bbox.union(disk_bbox(c));
    }
    Some(bbox)
}

/// Culled subset of a diagram.
///
/// Built by [`Diagram::cull`] and friends; `ids` maps each output disk back
/// to its node in the source diagram. The buffers grow as needed and never
/// shrink, so one instance can be reused across frames without
/// reallocating.
#[derive(Debug, Default)]
pub struct CulledDiagram {
    pub(crate) disks: Vec<Circle>,
    pub(crate) ids: Vec<NodeId>,
}

impl CulledDiagram {
    /// A new, empty culled set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of surviving disks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether nothing survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Surviving disks, ancestors before descendants.
    #[must_use]
    pub fn disks(&self) -> &[Circle] {
        &self.disks
    }

    /// Source node of each surviving disk.
    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub(crate) fn clear(&mut self) {
        self.disks.clear();
        self.ids.clear();
    }

    pub(crate) fn push(&mut self, disk: Circle, id: NodeId) {
        self.disks.push(disk);
        self.ids.push(id);
    }

    /// Re-cull an already culled set into `dst`.
    ///
    /// A culled set has no hierarchy left, so this is a linear refilter:
    /// keep disks at least `minradius` big that overlap `aabb`. Culling
    /// with the same box and radius twice yields the same set, and
    /// tightening either argument only ever removes disks.
    pub fn cull(&self, aabb: Rect, minradius: f64, dst: &mut Self) {
        dst.clear();
        for (disk, &id) in self.disks.iter().zip(&self.ids) {
            if disk.radius >= minradius && canopy_geom::disk_intersects_rect(disk, aabb) {
                dst.push(*disk, id);
            }
        }
    }
}

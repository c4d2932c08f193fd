// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical packing: recursive application of the flat packer with
//! rescaling to fit each parent.

use kurbo::{Circle, Point};

use canopy_geom::enclose_disks;
use canopy_tree::{NodeId, TreeGraph};

use crate::diagram::Diagram;
use crate::flat::FlatPacker;
use crate::options::{Coords, Enclosure, PackOptions};
use crate::TreeError;

/// Pack a tree, given as an ordered parents array, into nested disks.
///
/// Node `0` must be the root and its own parent. Every node receives a
/// nominal radius from its descendant count (leaves count 1, parents take
/// the square root of one plus their children's sum, which spreads leaf
/// sizes evenly across randomly shaped trees), then each sibling group is
/// flat-packed, enclosed, and rescaled into its parent.
///
/// With [`Coords::Global`] the emitted disks share one world coordinate
/// system; with [`Coords::Local`] each disk is expressed in its parent's
/// unit frame and the root is `(0, 0, 1)`, which keeps precision across any
/// zoom depth.
///
/// An empty parents array yields an empty diagram. Malformed trees fail
/// with [`TreeError`].
///
/// ```rust
/// use canopy_pack::{pack_hierarchical, PackOptions};
///
/// let diagram = pack_hierarchical(&[0, 0, 0, 1, 1], &PackOptions::local()).unwrap();
/// let root = diagram.disk(0);
/// assert_eq!((root.center.x, root.center.y, root.radius), (0.0, 0.0, 1.0));
/// ```
pub fn pack_hierarchical(parents: &[NodeId], opts: &PackOptions) -> Result<Diagram, TreeError> {
    if parents.is_empty() {
        return Ok(Diagram::empty(opts.coords));
    }
    let graph = TreeGraph::from_parents(parents)?;

    let mut nominal = vec![0.0_f64; parents.len()];
    compute_nominal_radii(&graph, &mut nominal);

    let mut disks = vec![Circle::new((0.0, 0.0), 0.0); parents.len()];
    disks[0] = match opts.coords {
        Coords::Global { radius } => Circle::new((0.0, 0.0), radius),
        Coords::Local => Circle::new((0.0, 0.0), 1.0),
    };

    let mut worker = Worker::new(graph.max_width());
    let mut stack = vec![0_usize];
    while let Some(parent) = stack.pop() {
        layout_children(&graph, &nominal, &mut disks, &mut worker, parent, opts);
        stack.extend_from_slice(graph.children(parent));
    }

    Ok(Diagram::hierarchical(graph, disks, opts.coords))
}

/// Bottom-up nominal radius pass, with an explicit stack so pathological
/// depths cannot overflow the call stack.
fn compute_nominal_radii(graph: &TreeGraph, nominal: &mut [f64]) {
    let mut stack = vec![(0_usize, false)];
    while let Some((node, visited)) = stack.pop() {
        let children = graph.children(node);
        if children.is_empty() {
            nominal[node] = 1.0;
            continue;
        }
        if !visited {
            stack.push((node, true));
            for &child in children {
                stack.push((child, false));
            }
            continue;
        }
        let sum: f64 = children.iter().map(|&c| nominal[c]).sum();
        nominal[node] = (1.0 + sum).sqrt();
    }
}

/// Scratch buffers shared by every sibling group, sized once to the widest
/// group.
#[derive(Debug)]
struct Worker {
    radii: Vec<f64>,
    packer: FlatPacker,
}

impl Worker {
    fn new(max_width: usize) -> Self {
        Self {
            radii: Vec::with_capacity(max_width),
            packer: FlatPacker::with_capacity(max_width),
        }
    }
}

/// Flat-pack `parent`'s children and rescale them into the parent's disk.
fn layout_children(
    graph: &TreeGraph,
    nominal: &[f64],
    disks: &mut [Circle],
    worker: &mut Worker,
    parent: NodeId,
    opts: &PackOptions,
) {
    let children = graph.children(parent);
    if children.is_empty() {
        return;
    }

    // Two layout passes: the first (unpadded) determines the cluster scale,
    // the second re-packs with every radius inflated by a scale-invariant
    // constant so sibling gutters stay visually proportional at any depth.
    let mut scaled_padding = 0.0;
    let enclosure = loop {
        worker.radii.clear();
        worker
            .radii
            .extend(children.iter().map(|&c| nominal[c] + scaled_padding));
        worker.packer.pack(&worker.radii, opts.orientation);
        let enclosure = match opts.enclosure {
            Enclosure::AabbMidpoint => midpoint_enclosure(&worker.packer.disks),
            Enclosure::Welzl => enclose_disks(&worker.packer.disks),
        };
        if scaled_padding != 0.0 || opts.padding.inner == 0.0 {
            break enclosure;
        }
        scaled_padding = opts.padding.inner / enclosure.radius;
    };

    let (cx, cy) = (enclosure.center.x, enclosure.center.y);
    let mut cr = enclosure.radius;
    let radius_trim = scaled_padding * cr;
    cr += opts.padding.outer * cr;
    if children.len() == 1 {
        // A lone child would otherwise be congruent with its parent.
        cr *= 2.0;
    }

    let (tx, ty, scale) = match opts.coords {
        Coords::Global { .. } => {
            let p = disks[parent];
            (p.center.x, p.center.y, p.radius / cr)
        }
        Coords::Local => (0.0, 0.0, 1.0 / cr),
    };
    for (&child, packed) in children.iter().zip(&worker.packer.disks) {
        disks[child] = Circle::new(
            Point::new(
                tx + scale * (packed.center.x - cx),
                ty + scale * (packed.center.y - cy),
            ),
            scale * (nominal[child] - radius_trim),
        );
    }
}

/// Enclosing-disk heuristic: midpoint of the packed bounding box, radius
/// from the farthest child reach.
fn midpoint_enclosure(disks: &[Circle]) -> Circle {
    let Some((first, rest)) = disks.split_first() else {
        return Circle::new((0.0, 0.0), 0.0);
    };
    let mut min_x = first.center.x - first.radius;
    let mut min_y = first.center.y - first.radius;
    let mut max_x = first.center.x + first.radius;
    let mut max_y = first.center.y + first.radius;
    for c in rest {
        min_x = min_x.min(c.center.x - c.radius);
        min_y = min_y.min(c.center.y - c.radius);
        max_x = max_x.max(c.center.x + c.radius);
        max_y = max_y.max(c.center.y + c.radius);
    }
    let center = Point::new(0.5 * (min_x + max_x), 0.5 * (min_y + max_y));
    let mut radius = 0.0_f64;
    for c in disks {
        radius = radius.max(c.center.distance(center) + c.radius);
    }
    Circle::new(center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Orientation;

    fn assert_inside(child: &Circle, parent: &Circle, tolerance: f64) {
        let d = child.center.distance(parent.center);
        assert!(
            d + child.radius <= parent.radius + tolerance,
            "child disk sticks out by {}",
            d + child.radius - parent.radius
        );
    }

    #[test]
    fn small_tree_local_invariants() {
        // Root with two children; the first child has two grandchildren.
        let d = pack_hierarchical(&[0, 0, 0, 1, 1], &PackOptions::local()).unwrap();
        let root = d.disk(0);
        assert_eq!((root.center.x, root.center.y, root.radius), (0.0, 0.0, 1.0));
        for i in 1..d.len() {
            let c = d.disk(i);
            assert!(c.radius < 1.0);
            let reach = c.center.x * c.center.x + c.center.y * c.center.y + c.radius;
            assert!(reach <= 1.0, "node {i} violates the local encoding: {reach}");
        }
    }

    #[test]
    fn global_pack_nests_and_separates() {
        let parents = [0, 0, 0, 0, 1, 1, 1, 2, 2, 7, 7, 7, 7];
        let opts = PackOptions::default();
        let d = pack_hierarchical(&parents, &opts).unwrap();
        let graph = d.graph().unwrap();

        // Containment: every non-root disk inside its parent's.
        for i in 1..d.len() {
            assert_inside(&d.disk(i), &d.disk(graph.parent(i)), 1e-9);
        }

        // Non-overlap between any two nodes neither of which contains the
        // other, within the packer's documented slack.
        for a in 0..d.len() {
            for b in a + 1..d.len() {
                if graph.is_ancestor(a, b) || graph.is_ancestor(b, a) {
                    continue;
                }
                let (da, db) = (d.disk(a), d.disk(b));
                let gap = da.center.distance(db.center) - (da.radius + db.radius);
                let slack = 0.001 * (da.radius + db.radius);
                assert!(gap >= -slack, "nodes {a} and {b} overlap by {}", -gap);
            }
        }
    }

    #[test]
    fn root_radius_option_scales_everything() {
        let parents = [0, 0, 0, 1];
        let unit = pack_hierarchical(&parents, &PackOptions::default()).unwrap();
        let opts = PackOptions {
            coords: Coords::Global { radius: 10.0 },
            ..PackOptions::default()
        };
        let scaled = pack_hierarchical(&parents, &opts).unwrap();
        for i in 0..parents.len() {
            let (a, b) = (unit.disk(i), scaled.disk(i));
            assert!((b.radius - 10.0 * a.radius).abs() < 1e-9);
            assert!((b.center.x - 10.0 * a.center.x).abs() < 1e-9);
            assert!((b.center.y - 10.0 * a.center.y).abs() < 1e-9);
        }
    }

    #[test]
    fn single_child_is_half_scale() {
        let d = pack_hierarchical(&[0, 0], &PackOptions::local()).unwrap();
        let child = d.disk(1);
        // The lone child's enclosure is doubled, leaving it well inside.
        assert!(child.radius < 0.55);
        assert!(child.radius > 0.3);
        assert_inside(&child, &d.disk(0), 1e-12);
    }

    #[test]
    fn empty_parents_is_an_empty_diagram() {
        let d = pack_hierarchical(&[], &PackOptions::default()).unwrap();
        assert!(d.is_empty());
        assert!(d.graph().is_none());
    }

    #[test]
    fn invalid_trees_are_rejected() {
        assert!(pack_hierarchical(&[1, 0], &PackOptions::default()).is_err());
        assert!(pack_hierarchical(&[0, 2, 1], &PackOptions::default()).is_err());
    }

    #[test]
    fn welzl_enclosure_also_nests() {
        let parents = [0, 0, 0, 0, 1, 1, 1, 1, 1];
        let opts = PackOptions {
            enclosure: Enclosure::Welzl,
            ..PackOptions::default()
        };
        let d = pack_hierarchical(&parents, &opts).unwrap();
        let graph = d.graph().unwrap();
        for i in 1..d.len() {
            assert_inside(&d.disk(i), &d.disk(graph.parent(i)), 1e-9);
        }
    }

    #[test]
    fn vertical_orientation_stacks_two_children() {
        let opts = PackOptions {
            coords: Coords::Local,
            orientation: Orientation::Vertical,
            ..PackOptions::default()
        };
        let d = pack_hierarchical(&[0, 0, 0], &opts).unwrap();
        let (a, b) = (d.disk(1), d.disk(2));
        assert!(a.center.x.abs() < 1e-9);
        assert!(b.center.x.abs() < 1e-9);
        assert!(a.center.y < 0.0 && b.center.y > 0.0);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        // A ten-thousand deep chain exercises the explicit stacks.
        let mut parents = vec![0_usize];
        for i in 1..10_000 {
            parents.push(i - 1);
        }
        let d = pack_hierarchical(&parents, &PackOptions::local()).unwrap();
        assert_eq!(d.len(), 10_000);
        let c = d.disk(9_999);
        assert!(c.radius > 0.0 && c.radius < 1.0);
    }
}

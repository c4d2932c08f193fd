// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat packing of a radius sequence into a tight cluster.
//!
//! This is the front-chain algorithm from Wang et al. (2006): keep the outer
//! envelope of already placed disks as a ring, place each new disk tangent
//! to a pair of adjacent envelope members, and splice the ring when the
//! tentative position collides with another member.

use kurbo::{Circle, Point};

use canopy_geom::place_tangent;

use crate::chain::{Direction, FrontChain};
use crate::diagram::Diagram;
use crate::options::Orientation;

/// Reusable state for flat packing.
///
/// The hierarchical packer keeps one of these sized to the widest sibling
/// group and reuses it for every parent, so packing allocates nothing per
/// node.
#[derive(Debug, Default)]
pub(crate) struct FlatPacker {
    chain: FrontChain,
    pub(crate) disks: Vec<Circle>,
}

impl FlatPacker {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            chain: FrontChain::default(),
            disks: Vec::with_capacity(n),
        }
    }

    /// Pack `radii` into `self.disks`. All radii must be positive.
    pub(crate) fn pack(&mut self, radii: &[f64], orientation: Orientation) {
        self.disks.clear();
        let n = radii.len();
        if n == 0 {
            return;
        }

        // Seed the first two disks back to back on the chosen axis, and the
        // third tangent to both on the counterclockwise side.
        let (p0, p1) = match orientation {
            Orientation::Horizontal => (Point::new(-radii[0], 0.0), Point::new(radii[1 % n], 0.0)),
            Orientation::Vertical => (Point::new(0.0, -radii[0]), Point::new(0.0, radii[1 % n])),
        };
        self.disks.push(Circle::new(p0, radii[0]));
        if n == 1 {
            return;
        }
        self.disks.push(Circle::new(p1, radii[1]));
        if n == 2 {
            return;
        }
        let p2 = place_tangent(radii[2], &self.disks[0], &self.disks[1]);
        self.disks.push(Circle::new(p2, radii[2]));
        if n == 3 {
            return;
        }

        self.chain.reset(n);

        // Seed selection for "Cm". The baseline distance is disk 0's and
        // is never updated, so of the three seeds the last one farther
        // from the origin than disk 0 wins. Tests pin this exact behavior;
        // any seed on the envelope works.
        let mut cm = 0;
        let d0 = len2(self.disks[0].center);
        if len2(self.disks[1].center) > d0 {
            cm = 1;
        }
        if len2(self.disks[2].center) > d0 {
            cm = 2;
        }
        let mut cn = self.chain.next(cm);

        let mut ci = 3;
        while ci < n {
            let candidate = Circle::new(
                place_tangent(radii[ci], &self.disks[cn], &self.disks[cm]),
                radii[ci],
            );

            // Search the envelope for a collision, marching forward from Cn
            // and backward from Cm.
            let forward =
                self.chain
                    .first_collision(&self.disks, &candidate, cn, Direction::Forward);
            let Some((jf, nf)) = forward else {
                // No conflict: the candidate joins the envelope between Cm
                // and Cn and becomes the new Cm.
                self.disks.push(candidate);
                self.chain.insert_between(cm, ci, cn);
                cm = ci;
                ci += 1;
                continue;
            };
            let backward =
                self.chain
                    .first_collision(&self.disks, &candidate, cm, Direction::Backward);
            match backward {
                // The backward conflict is strictly closer: drop the
                // segment before Cm and retry the same disk. Ties go to the
                // forward side to keep the march counterclockwise.
                Some((jb, nb)) if nb < nf => {
                    cm = jb;
                    self.chain.bridge(cm, cn);
                }
                // Conflict after Cn: advance Cn to the collider, dropping
                // the segment in between, and retry.
                _ => {
                    cn = jf;
                    self.chain.bridge(cm, cn);
                }
            }
        }
    }
}

#[inline]
fn len2(p: Point) -> f64 {
    p.x * p.x + p.y * p.y
}

/// Pack a sequence of radii into a tight non-overlapping cluster.
///
/// The result is a [`Diagram`] without a hierarchy: disks only, in the same
/// order as the input radii. An empty input yields an empty diagram.
///
/// ```rust
/// let d = canopy_pack::pack_flat(&[1.0, 1.0, 1.0]);
/// assert_eq!(d.len(), 3);
/// ```
#[must_use]
pub fn pack_flat(radii: &[f64]) -> Diagram {
    let mut packer = FlatPacker::with_capacity(radii.len());
    packer.pack(radii, Orientation::Horizontal);
    Diagram::flat(packer.disks)
}

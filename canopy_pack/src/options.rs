// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packer configuration and cull filtering.

/// Coordinate system of the emitted disks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coords {
    /// All disks in one world coordinate system, with the root disk at the
    /// origin with the given radius. Fine for shallow trees; double
    /// precision runs out around fifteen orders of magnitude of zoom.
    Global {
        /// Radius of the root disk.
        radius: f64,
    },
    /// Each disk in the local frame of its parent, the parent mapping to
    /// the unit disk. The root is `(0, 0, 1)`. This is the encoding that
    /// survives arbitrarily deep zooms.
    Local,
}

/// Axis along which the first two disks of each sibling group are seeded.
///
/// Vertical seeding makes two-child families stack top-to-bottom, which
/// keeps their labels from colliding in typical viewers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Seed along the x axis.
    #[default]
    Horizontal,
    /// Seed along the y axis.
    Vertical,
}

/// Sibling-gap padding constants.
///
/// `inner` is divided by the first-pass enclosure radius to get a
/// scale-invariant per-disk inflation; `outer` grows the final enclosure as
/// a cosmetic gap between a child cluster and its parent's rim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    /// Scale-invariant gutter between siblings.
    pub inner: f64,
    /// Fractional growth of the enclosing disk.
    pub outer: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            inner: 0.15,
            outer: 0.025,
        }
    }
}

/// How a sibling group's enclosing disk is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Enclosure {
    /// Center of the packed AABB, radius from the farthest child reach.
    /// Cheap and nearly as tight as the exact answer in practice.
    #[default]
    AabbMidpoint,
    /// Smallest enclosing disk via octagon-sampled Welzl.
    Welzl,
}

bitflags::bitflags! {
    /// Filters applied while culling a diagram.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CullFilter: u8 {
        /// Skip every parent's final child. Pairs with trees whose non-leaf
        /// nodes carry a trailing spacer child reserved for labels.
        const DISCARD_LAST_CHILD = 0b0000_0001;
    }
}

/// Configuration for hierarchical packing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackOptions {
    /// Output coordinate system.
    pub coords: Coords,
    /// Seed axis for each sibling group.
    pub orientation: Orientation,
    /// Gap constants.
    pub padding: Padding,
    /// Enclosing-disk strategy.
    pub enclosure: Enclosure,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            coords: Coords::Global { radius: 1.0 },
            orientation: Orientation::default(),
            padding: Padding::default(),
            enclosure: Enclosure::default(),
        }
    }
}

impl PackOptions {
    /// Options for a local-coordinates packing.
    #[must_use]
    pub fn local() -> Self {
        Self {
            coords: Coords::Local,
            ..Self::default()
        }
    }
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Pack: hierarchical circle packing for very large trees.
//!
//! Canopy Pack lays out a rooted tree as nested disks and answers the
//! spatial questions an interactive viewer asks about the result.
//!
//! - Flat packing of a radius sequence with the front-chain algorithm of
//!   Wang et al. (2006).
//! - Hierarchical packing from a parents array, in either one world
//!   coordinate system or parent-relative frames that survive zooms far
//!   past double-precision range.
//! - Picking, enclosure search, and viewport culling with reusable output
//!   buffers, all iterative and allocation-light.
//! - Relative transforms between any two node frames, composed along tree
//!   paths through the lowest common ancestor.
//!
//! A packed [`Diagram`] is immutable, so a host is free to read it from
//! many threads while one thread drives a camera.
//!
//! # Example
//!
//! ```rust
//! use canopy_pack::{pack_hierarchical, CulledDiagram, PackOptions};
//! use kurbo::Rect;
//!
//! // A root with three children, one of which has two children of its own.
//! let diagram = pack_hierarchical(&[0, 0, 0, 0, 1, 1], &PackOptions::default()).unwrap();
//!
//! // The deepest node under the cursor.
//! let root = diagram.disk(0);
//! let hit = diagram.pick(root.center.x, root.center.y);
//! assert!(hit.is_some());
//!
//! // Everything visible in a viewport, biggest-first by hierarchy.
//! let mut visible = CulledDiagram::new();
//! diagram.cull(Rect::new(-1.0, -1.0, 1.0, 1.0), 0.0, &mut visible);
//! assert!(!visible.is_empty());
//! ```

mod chain;
mod diagram;
mod flat;
mod hpack;
mod options;
mod query;
mod xform;

pub use canopy_geom::{enclose_disks, enclose_points};
pub use canopy_tree::{NodeId, TreeError, TreeGraph};
pub use diagram::{CulledDiagram, Diagram};
pub use flat::pack_flat;
pub use hpack::pack_hierarchical;
pub use options::{Coords, CullFilter, Enclosure, Orientation, PackOptions, Padding};
pub use xform::LocalTransform;

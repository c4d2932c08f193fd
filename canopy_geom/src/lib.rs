// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Geom: a Kurbo-native disk geometry kernel.
//!
//! Canopy Geom is the numeric substrate for circle-packing layouts and
//! spatial queries over packed diagrams.
//!
//! - Tangent placement of a disk against two fixed disks.
//! - Circumscribed circle of three points.
//! - Disk/AABB overlap and disk-encloses-AABB predicates.
//! - Smallest enclosing disk of points (Welzl) and of disks (octagon
//!   circumscription).
//!
//! All operations are total: degenerate inputs fall through to defined
//! behavior rather than panicking. Coordinates are `f64` throughout and
//! inputs are assumed finite (no NaNs).
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use canopy_geom::enclose_points;
//!
//! let pts = [
//!     Point::new(-1.0, -1.0),
//!     Point::new(1.0, -1.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(-1.0, 1.0),
//! ];
//! let disk = enclose_points(&pts);
//! assert!((disk.radius - 2.0_f64.sqrt()).abs() < 1e-12);
//! assert!(disk.center.distance(Point::new(0.0, 0.0)) < 1e-12);
//! ```

mod disk;
mod enclose;
mod tangent;

pub use disk::{disk_contains_point, disk_encloses_rect, disk_intersects_rect};
pub use enclose::{enclose_disks, enclose_points};
pub use tangent::{circle_through, place_tangent};

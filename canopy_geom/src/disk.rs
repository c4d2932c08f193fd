// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disk/point and disk/AABB predicates.

use kurbo::{Circle, Point, Rect};

/// Whether the disk contains the point (boundary inclusive).
#[inline]
pub fn disk_contains_point(disk: &Circle, pt: Point) -> bool {
    let dx = disk.center.x - pt.x;
    let dy = disk.center.y - pt.y;
    dx * dx + dy * dy <= disk.radius * disk.radius
}

/// Whether the disk and the axis-aligned box overlap with positive area.
///
/// This is the standard clamp test: the squared distance from the disk
/// center to its clamp into the box must be strictly less than `r²`, so a
/// disk merely touching an edge does not count as intersecting.
#[inline]
pub fn disk_intersects_rect(disk: &Circle, rect: Rect) -> bool {
    let cx = disk.center.x.max(rect.x0).min(rect.x1);
    let cy = disk.center.y.max(rect.y0).min(rect.y1);
    let dx = disk.center.x - cx;
    let dy = disk.center.y - cy;
    dx * dx + dy * dy < disk.radius * disk.radius
}

/// Whether the disk fully encloses the axis-aligned box.
///
/// True iff all four corners lie within the disk (boundary inclusive).
#[inline]
pub fn disk_encloses_rect(disk: &Circle, rect: Rect) -> bool {
    disk_contains_point(disk, Point::new(rect.x0, rect.y0))
        && disk_contains_point(disk, Point::new(rect.x1, rect.y0))
        && disk_contains_point(disk, Point::new(rect.x1, rect.y1))
        && disk_contains_point(disk, Point::new(rect.x0, rect.y1))
}

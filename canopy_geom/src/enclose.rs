// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Smallest enclosing disks of points and disks.

use kurbo::{Circle, Point};

use crate::circle_through;

#[inline]
fn contains(disk: &Circle, pt: Point) -> bool {
    let dx = disk.center.x - pt.x;
    let dy = disk.center.y - pt.y;
    dx * dx + dy * dy <= disk.radius * disk.radius
}

#[inline]
fn diametral(p1: Point, p2: Point) -> Circle {
    let center = p1.midpoint(p2);
    Circle::new(center, p1.distance(p2) * 0.5)
}

/// Minimal disk through up to three boundary points.
///
/// Tries the three diametral disks before falling back to the circumscribed
/// circle, which also keeps collinear triples finite.
fn disk_of_three(p1: Point, p2: Point, p3: Point) -> Circle {
    let d = diametral(p1, p2);
    if contains(&d, p3) {
        return d;
    }
    let d = diametral(p1, p3);
    if contains(&d, p2) {
        return d;
    }
    let d = diametral(p2, p3);
    if contains(&d, p1) {
        return d;
    }
    circle_through(p1, p2, p3)
}

/// Smallest disk containing all of `pts`.
///
/// Welzl's move-to-front recursion, unrolled into the standard three nested
/// loops so the depth does not scale with the input. Randomized input order
/// is not required here: callers feed geometrically stable sequences (packed
/// child positions), and the worst case is still quadratic-ish only on
/// adversarial orderings.
///
/// Returns the zero disk for empty input.
pub fn enclose_points(pts: &[Point]) -> Circle {
    let Some((&first, rest)) = pts.split_first() else {
        return Circle::new((0.0, 0.0), 0.0);
    };
    let mut disk = Circle::new(first, 0.0);
    for (i, &p) in rest.iter().enumerate() {
        if contains(&disk, p) {
            continue;
        }
        // p lies on the boundary of the minimal disk of pts[..=i+1].
        disk = Circle::new(p, 0.0);
        for (j, &q) in pts[..=i].iter().enumerate() {
            if contains(&disk, q) {
                continue;
            }
            // p and q are both on the boundary.
            disk = diametral(p, q);
            for &s in &pts[..j] {
                if !contains(&disk, s) {
                    disk = disk_of_three(p, q, s);
                }
            }
        }
    }
    disk
}

/// Smallest disk approximately containing all of `disks`.
///
/// Each disk is replaced by the eight corners of a regular octagon that
/// circumscribes it (circumradius `r / cos(pi/8)`), so the result is a
/// strict upper bound on the true enclosure. Returns the zero disk for empty
/// input.
pub fn enclose_disks(disks: &[Circle]) -> Circle {
    const NGON: usize = 8;
    let mut pts = Vec::with_capacity(disks.len() * NGON);
    let step = core::f64::consts::PI * 2.0 / NGON as f64;
    let circumscribe = 1.0 / (core::f64::consts::PI / NGON as f64).cos();
    for d in disks {
        let r = d.radius * circumscribe;
        for j in 0..NGON {
            let theta = step * j as f64;
            pts.push(Point::new(
                d.center.x + r * theta.cos(),
                d.center.y + r * theta.sin(),
            ));
        }
    }
    enclose_points(&pts)
}

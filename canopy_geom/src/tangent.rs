// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tangent placement and three-point circumscription.

use kurbo::{Circle, Point};

/// Position for a disk of radius `radius` tangent to both `a` and `b`.
///
/// The result lands on the counterclockwise side of the oriented line from
/// `a`'s center to `b`'s center, which is what keeps a front chain winding
/// consistently during packing. The closed form comes from the isoceles
/// triangle on the distances `a.radius + radius`, `b.radius + radius`, and
/// `|a - b|`.
///
/// Degenerate cases: if the centers coincide, or `a.radius + radius` is
/// zero, the result is placed on `a`'s +x axis at distance
/// `a.radius + radius`.
pub fn place_tangent(radius: f64, a: &Circle, b: &Circle) -> Point {
    let reach_a = a.radius + radius;
    let dx = a.center.x - b.center.x;
    let dy = a.center.y - b.center.y;
    if reach_a == 0.0 || (dx == 0.0 && dy == 0.0) {
        return Point::new(a.center.x + reach_a, a.center.y);
    }
    let reach_b = b.radius + radius;
    let d2 = dx * dx + dy * dy;
    let ra2 = reach_a * reach_a;
    let rb2 = reach_b * reach_b;
    // Fraction along b -> a of the foot of the perpendicular from the result.
    let x = 0.5 + (rb2 - ra2) / (2.0 * d2);
    let rb1 = rb2 - d2;
    let y2 = (2.0 * ra2 * (rb2 + d2) - rb1 * rb1 - ra2 * ra2).max(0.0);
    let y = y2.sqrt() / (2.0 * d2);
    Point::new(
        b.center.x + x * dx + y * dy,
        b.center.y + x * dy - y * dx,
    )
}

/// Circle through three points.
///
/// The center is the intersection of two perpendicular bisectors, computed
/// by the determinant form. Collinear points make the determinant vanish and
/// the result non-finite; callers are expected to avoid that input.
pub fn circle_through(p1: Point, p2: Point, p3: Point) -> Circle {
    let a = p2.x - p1.x;
    let b = p2.y - p1.y;
    let c = p3.x - p1.x;
    let d = p3.y - p1.y;
    let e = a * (p2.x + p1.x) * 0.5 + b * (p2.y + p1.y) * 0.5;
    let f = c * (p3.x + p1.x) * 0.5 + d * (p3.y + p1.y) * 0.5;
    let det = a * d - b * c;
    let cx = (d * e - b * f) / det;
    let cy = (-c * e + a * f) / det;
    let center = Point::new(cx, cy);
    Circle::new(center, center.distance(p1))
}

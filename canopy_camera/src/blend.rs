// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Van Wijk & Nuij viewport interpolation.

use kurbo::Rect;

/// A camera viewport: world-space center and width.
///
/// Height is the host's business (aspect ratio lives with the window); the
/// interpolation only needs the width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Width.
    pub w: f64,
}

impl Viewport {
    /// A viewport from center and width.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    /// The square region this viewport spans.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        let half = self.w * 0.5;
        Rect::new(self.x - half, self.y - half, self.x + half, self.y + half)
    }

    /// Viewport centered on a rectangle, spanning its width.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: 0.5 * (rect.x0 + rect.x1),
            y: 0.5 * (rect.y0 + rect.y1),
            w: rect.width(),
        }
    }
}

/// Growth rate of the zoom-out bulge. `sqrt(2)` is Van Wijk's recommended
/// compromise between speed and perceived smoothness.
const RHO: f64 = core::f64::consts::SQRT_2;

/// Interpolated viewport along the minimum-perceived-motion path from `u0`
/// to `u1`, at normalized time `t` in `[0, 1]`.
///
/// The path zooms out just far enough that the pan reads as motion rather
/// than a teleport, per Van Wijk & Nuij (2003). With no lateral distance
/// the closed form degenerates and the blend falls back to a pure
/// exponential zoom `w0 * (w1 / w0)^t`.
///
/// The blend is symmetric: `blend(u0, u1, t)` equals `blend(u1, u0, 1 - t)`.
#[must_use]
pub fn blend(u0: &Viewport, u1: &Viewport, t: f64) -> Viewport {
    let (path, valid) = ZoomPath::solve(u0, u1);
    let s = t * path.scale;
    if valid {
        let cosh_r0 = path.r0.cosh();
        let u = u0.w / (RHO * RHO * path.d1) * (cosh_r0 * (RHO * s + path.r0).tanh() - path.r0.sinh());
        Viewport {
            x: u0.x + u * path.dx,
            y: u0.y + u * path.dy,
            w: u0.w * cosh_r0 / (RHO * s + path.r0).cosh(),
        }
    } else {
        Viewport {
            x: u0.x + t * path.dx,
            y: u0.y + t * path.dy,
            w: u0.w * (RHO * s).exp(),
        }
    }
}

/// Recommended flight time between two viewports, in milliseconds,
/// proportional to the optimal path length.
#[must_use]
pub fn recommended_duration(u0: &Viewport, u1: &Viewport) -> f64 {
    let (path, _) = ZoomPath::solve(u0, u1);
    (path.scale * 1000.0).abs()
}

/// Shared pieces of the closed-form solution.
struct ZoomPath {
    dx: f64,
    dy: f64,
    d1: f64,
    r0: f64,
    scale: f64,
}

impl ZoomPath {
    fn solve(u0: &Viewport, u1: &Viewport) -> (Self, bool) {
        let dx = u1.x - u0.x;
        let dy = u1.y - u0.y;
        let d2 = dx * dx + dy * dy;
        let d1 = d2.sqrt();
        let rho2 = RHO * RHO;
        let rho4 = rho2 * rho2;
        let b0 = (u1.w * u1.w - u0.w * u0.w + rho4 * d2) / (2.0 * u0.w * rho2 * d1);
        let b1 = (u1.w * u1.w - u0.w * u0.w - rho4 * d2) / (2.0 * u1.w * rho2 * d1);
        let r0 = ((b0 * b0 + 1.0).sqrt() - b0).ln();
        let r1 = ((b1 * b1 + 1.0).sqrt() - b1).ln();
        let dr = r1 - r0;
        // Zero lateral distance turns the hyperbolic form into NaN; zero dr
        // would make the path degenerate. Both take the exponential route.
        let valid = !dr.is_nan() && dr != 0.0;
        let scale = if valid { dr } else { (u1.w / u0.w).ln() } / RHO;
        (
            Self {
                dx,
                dy,
                d1,
                r0,
                scale,
            },
            valid,
        )
    }
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Camera: smooth zooming over packed diagrams.
//!
//! Canopy Camera animates a viewport across a locally packed diagram.
//!
//! - [`blend`]: the Van Wijk & Nuij (2003) optimal zoom-and-pan
//!   interpolation between two viewports.
//! - [`CameraRig`]: a multi-root zoom sequence that re-homes the world
//!   origin at ancestor frames, so a flight can cross more zoom range than
//!   double precision could express in any single frame.
//!
//! The rig is a plain owned value; the host calls
//! [`zoom`](CameraRig::zoom) to start a flight and
//! [`tick`](CameraRig::tick) once per frame, applying whatever viewport
//! comes back.

mod blend;
mod rig;

pub use blend::{blend, recommended_duration, Viewport};
pub use rig::CameraRig;

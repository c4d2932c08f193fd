// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fly the camera rig from the root to the deepest leaf of a random tree.
//!
//! Run:
//! - `cargo run -p canopy_demos --example zoom_rig`

use canopy_camera::{CameraRig, Viewport};
use canopy_pack::{pack_hierarchical, PackOptions};

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn main() {
    // Squared random parents bias the tree toward interesting deep runs.
    let n = 20_000;
    let mut rng = Rng(0x5EED_CAFE_0000_0001);
    let mut parents = vec![0_usize];
    for i in 1..n {
        let a = rng.next_f64();
        let b = rng.next_f64();
        parents.push((i as f64 * a * b) as usize);
    }

    let diagram = pack_hierarchical(&parents, &PackOptions::local()).expect("valid tree");
    let (depth, leaf) = diagram.max_depth_leaf().expect("hierarchical diagram");
    println!("packed {n} nodes; deepest leaf {leaf} at depth {depth}");

    let mut rig = CameraRig::new();
    rig.set_viewport(Viewport::new(0.0, 0.0, 2.5));
    rig.zoom(&diagram, 0.0, 0, leaf, true);

    // Drive the rig at 60 fps and log once per simulated second. The host
    // keeps the root fixed here; a real viewer re-homes the root as the
    // viewport shrinks.
    let mut now = 0.0;
    let mut frame = 0_u64;
    while rig.is_active() {
        now += 1.0 / 60.0;
        frame += 1;
        let Some(vp) = rig.tick(&diagram, now, 0) else {
            break;
        };
        if frame % 60 == 0 {
            println!(
                "t = {now:5.1}s  center ({:+.3e}, {:+.3e})  width {:.3e}",
                vp.x, vp.y, vp.w
            );
        }
    }
    let final_vp = rig.viewport();
    println!(
        "arrived after {frame} frames: center ({:+.3e}, {:+.3e}) width {:.3e}",
        final_vp.x, final_vp.y, final_vp.w
    );
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pack a few hundred disks and dump the result as an SVG for eyeballing.
//!
//! Run:
//! - `cargo run -p canopy_demos --example flat_pack_svg`

use std::fmt::Write as _;
use std::fs;

use canopy_pack::{pack_flat, pack_hierarchical, Diagram, PackOptions};

fn write_svg(diagram: &Diagram, path: &str) {
    let Some(bbox) = diagram.aabb() else {
        return;
    };
    let pad = 0.05 * bbox.width().max(bbox.height());
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg viewBox='{} {} {} {}' width='700px' height='700px' \
         version='1.1' xmlns='http://www.w3.org/2000/svg'>",
        bbox.x0 - pad,
        bbox.y0 - pad,
        bbox.width() + 2.0 * pad,
        bbox.height() + 2.0 * pad,
    );
    let _ = writeln!(
        svg,
        "<g stroke='black' stroke-opacity='0.5' fill='#2A8BB6' fill-opacity='0.2'>"
    );
    for disk in diagram.disks() {
        let _ = writeln!(
            svg,
            "<circle stroke-width='{}' cx='{}' cy='{}' r='{}'/>",
            disk.radius * 0.01,
            disk.center.x,
            disk.center.y,
            disk.radius
        );
    }
    svg.push_str("</g>\n</svg>\n");
    fs::write(path, svg).expect("writable output path");
    println!("wrote {path}");
}

fn main() {
    // A flat packing of mixed radii.
    let radii: Vec<f64> = (0..300)
        .map(|i| 1.0 + 2.0 * ((i * 37 % 100) as f64 / 100.0))
        .collect();
    let flat = pack_flat(&radii);
    println!("flat: {} disks, bbox {:?}", flat.len(), flat.aabb());
    write_svg(&flat, "flat_pack.svg");

    // A small hierarchy in world coordinates.
    let mut parents = vec![0_usize];
    for i in 1..400 {
        parents.push(i / 3);
    }
    let tree = pack_hierarchical(&parents, &PackOptions::default()).expect("valid tree");
    println!("tree: {} disks, bbox {:?}", tree.len(), tree.aabb());
    write_svg(&tree, "tree_pack.svg");
}

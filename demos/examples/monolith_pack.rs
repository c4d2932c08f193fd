// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parse a "monolith" tree file, densify its ids, and pack it locally.
//!
//! Each monolith line is one clade: six hex digits of node id, a space, six
//! hex digits of parent id, a space, and a free-form label. The root names
//! itself as its parent. This demo synthesizes a small monolith, remaps its
//! sparse ids to dense indices, appends the spacer child every non-leaf
//! carries for its label, and packs the result in local coordinates the way
//! the interactive viewer would.
//!
//! Run:
//! - `cargo run -p canopy_demos --example monolith_pack`

use kurbo::Rect;

use canopy_pack::{pack_hierarchical, CullFilter, CulledDiagram, PackOptions};

/// One parsed monolith: dense parent indices plus labels, input order
/// preserved.
struct Monolith {
    parents: Vec<usize>,
    labels: Vec<String>,
}

fn parse_monolith(text: &str) -> Monolith {
    let mut ids = Vec::new();
    let mut raw_parents = Vec::new();
    let mut labels = Vec::new();
    for line in text.lines() {
        let id = u32::from_str_radix(&line[0..6], 16).expect("hex id");
        let parent = u32::from_str_radix(&line[7..13], 16).expect("hex parent");
        ids.push(id);
        raw_parents.push(parent);
        labels.push(line[14..].to_owned());
    }

    // Remap sparse ids to dense [0, n) indices, preserving relationships.
    let max_id = ids
        .iter()
        .chain(raw_parents.iter())
        .copied()
        .max()
        .unwrap_or(0);
    let mut mapping = vec![0_usize; max_id as usize + 1];
    for (dense, &id) in ids.iter().enumerate() {
        mapping[id as usize] = dense;
    }
    let parents = raw_parents
        .iter()
        .map(|&p| mapping[p as usize])
        .collect();
    Monolith { parents, labels }
}

/// Append one spacer child to every non-leaf node. The spacer reserves room
/// for a secondary label and guarantees no node ever has exactly one child.
fn append_spacers(parents: &mut Vec<usize>) {
    let n = parents.len();
    let mut has_children = vec![false; n];
    for (i, &p) in parents.iter().enumerate() {
        if i != 0 {
            has_children[p] = true;
        }
    }
    for i in 0..n {
        if has_children[i] {
            parents.push(i);
        }
    }
}

fn main() {
    // A tiny synthetic tree of life: ids deliberately sparse and unordered
    // below the root.
    let text = "\
000001 000001 Life
00000a 000001 Bacteria
0000ff 000001 Eukaryota
000b10 0000ff Animalia
000b11 0000ff Fungi
000b12 000b10 Chordata
00ffff 000b10 Arthropoda
";
    let monolith = parse_monolith(text);
    println!(
        "loaded {} clades, root is {:?}",
        monolith.labels.len(),
        monolith.labels.first()
    );

    let mut parents = monolith.parents.clone();
    append_spacers(&mut parents);
    println!(
        "{} nodes after adding label spacers",
        parents.len()
    );

    // Vertical orientation keeps two-child families stacked, which is what
    // the labelled viewer wants.
    let opts = PackOptions {
        orientation: canopy_pack::Orientation::Vertical,
        ..PackOptions::local()
    };
    let mut diagram = pack_hierarchical(&parents, &opts).expect("valid monolith tree");
    diagram.set_filter(CullFilter::DISCARD_LAST_CHILD);

    // Cull the root frame the way a renderer would each frame: the spacer
    // children vanish, everything else arrives in root coordinates.
    let mut visible = CulledDiagram::new();
    diagram.cull_local(Rect::new(-1.0, -1.0, 1.0, 1.0), 0.001, 0, &mut visible);
    println!("{} of {} disks visible in the root frame", visible.len(), diagram.len());
    for (disk, &id) in visible.disks().iter().zip(visible.ids()) {
        let label = monolith
            .labels
            .get(id)
            .map_or("(spacer)", String::as_str);
        println!(
            "  {:<12} center ({:+.4}, {:+.4}) radius {:.4}",
            label, disk.center.x, disk.center.y, disk.radius
        );
    }
}

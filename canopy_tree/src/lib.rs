// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Tree: a flat, index-based tree graph.
//!
//! Canopy Tree turns an ordered parents array into a compact CSR-style
//! children index suitable for trees with millions of nodes.
//!
//! - Children of any node as a contiguous slice, in input order.
//! - Precomputed depths, lowest common ancestor, deepest-leaf search.
//! - Construction validates the input: the root must be node `0` and its own
//!   parent, parent indices must be in range, and cycles are rejected.
//!
//! Node identity is a plain [`NodeId`] index into the original input; there
//! is no interior mutability and a built graph never changes.
//!
//! # Example
//!
//! ```rust
//! use canopy_tree::TreeGraph;
//!
//! // Root 0 with children 1 and 2; node 1 has children 3 and 4.
//! let graph = TreeGraph::from_parents(&[0, 0, 0, 1, 1]).unwrap();
//! assert_eq!(graph.children(0), &[1, 2]);
//! assert_eq!(graph.depth(4), 2);
//! assert_eq!(graph.lca(3, 2), 0);
//! assert_eq!(graph.lca(3, 4), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod graph;

pub use error::TreeError;
pub use graph::{NodeId, TreeGraph};

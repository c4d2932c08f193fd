// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use crate::NodeId;

/// Why a parents array cannot describe a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// The parents array is empty.
    Empty,
    /// Node `0` is not its own parent.
    RootNotFirst,
    /// A node names a parent outside the array.
    ParentOutOfRange {
        /// The offending node.
        node: NodeId,
        /// The out-of-range parent index it named.
        parent: NodeId,
    },
    /// Walking to the root from `node` exceeded the node count, so the
    /// parent chain loops.
    Cycle {
        /// A node on (or leading into) the cycle.
        node: NodeId,
    },
}

impl core::fmt::Display for TreeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "parents array is empty"),
            Self::RootNotFirst => write!(f, "node 0 must be the root (its own parent)"),
            Self::ParentOutOfRange { node, parent } => {
                write!(f, "node {node} names out-of-range parent {parent}")
            }
            Self::Cycle { node } => write!(f, "parent chain from node {node} never reaches the root"),
        }
    }
}

impl core::error::Error for TreeError {}

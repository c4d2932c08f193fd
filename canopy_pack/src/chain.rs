// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The front chain: a doubly linked ring over the disks currently forming
//! the outer envelope of a flat packing.

use kurbo::Circle;

#[derive(Clone, Copy, Debug, Default)]
struct Link {
    prev: usize,
    next: usize,
}

/// Ring of prev/next pairs indexed by disk position in the packing buffer.
///
/// Only the links of disks currently on the envelope are meaningful; spliced
/// out segments are simply never visited again.
#[derive(Debug, Default)]
pub(crate) struct FrontChain {
    links: Vec<Link>,
}

impl FrontChain {
    /// Reset to the initial three-disk ring `0 -> 1 -> 2 -> 0`, with room
    /// for `n` disks.
    pub(crate) fn reset(&mut self, n: usize) {
        self.links.clear();
        self.links.resize(n, Link::default());
        self.links[0] = Link { prev: 2, next: 1 };
        self.links[1] = Link { prev: 0, next: 2 };
        self.links[2] = Link { prev: 1, next: 0 };
    }

    pub(crate) fn next(&self, i: usize) -> usize {
        self.links[i].next
    }

    pub(crate) fn prev(&self, i: usize) -> usize {
        self.links[i].prev
    }

    /// Splice `i` into the ring between `m` and `n` (which must be
    /// adjacent, `m -> n`).
    pub(crate) fn insert_between(&mut self, m: usize, i: usize, n: usize) {
        self.links[m].next = i;
        self.links[i].prev = m;
        self.links[i].next = n;
        self.links[n].prev = i;
    }

    /// Link `m -> n` directly, dropping whatever ring segment lay between.
    pub(crate) fn bridge(&mut self, m: usize, n: usize) {
        self.links[m].next = n;
        self.links[n].prev = m;
    }

    /// Walk the ring from the neighbor of `start` in `dir` until wrapping
    /// back to `start`, returning the first member overlapping `disk` along
    /// with the number of steps taken (first neighbor = 1 step).
    ///
    /// The overlap test carries a 0.999 slack factor on the squared radius
    /// sum so that exact tangencies produced by the placement formula do not
    /// register as collisions.
    pub(crate) fn first_collision(
        &self,
        disks: &[Circle],
        disk: &Circle,
        start: usize,
        dir: Direction,
    ) -> Option<(usize, usize)> {
        let mut steps = 1;
        let mut i = self.step(start, dir);
        while i != start {
            let other = &disks[i];
            let dx = other.center.x - disk.center.x;
            let dy = other.center.y - disk.center.y;
            let dr = other.radius + disk.radius;
            if 0.999 * dr * dr > dx * dx + dy * dy {
                return Some((i, steps));
            }
            i = self.step(i, dir);
            steps += 1;
        }
        None
    }

    fn step(&self, i: usize, dir: Direction) -> usize {
        match dir {
            Direction::Forward => self.links[i].next,
            Direction::Backward => self.links[i].prev,
        }
    }
}

/// Walk direction along the ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Lawson flipping.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::{
    error::Result,
    impl_topology,
    kernel::on_opposite_sides,
    mesh::half_edge::{next, prev},
};

impl_topology! {
    /// Drains `queue`, flipping every unconstrained interior edge that fails
    /// the in-circle test. Returns the number of flips performed.
    pub(crate) fn restore_delaunay<I>(&mut self, queue: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        let mut queue: VecDeque<usize> = queue.into_iter().collect();
        let budget = self.config.flip_budget_factor.saturating_mul(self.half_edges.len().max(3));
        let mut flips = 0;

        while let Some(e) = queue.pop_front() {
            if !self.is_live(e) || !self.violates_delaunay(e) || !self.is_flippable(e) {
                continue;
            }
            if flips >= budget {
                warn!(budget, "flip budget exhausted, mesh may not be fully Delaunay");
                break;
            }
            queue.extend(self.flip(e));
            flips += 1;
        }
        flips
    }

    /// The two triangles around `e` form a strictly convex quad.
    pub(crate) fn is_flippable(&self, e: usize) -> bool {
        let Some(t) = self.twin(e) else { return false };
        if self.half_edges[e].constrained {
            return false;
        }
        let a = self.position(self.origin(e));
        let b = self.position(self.dest(e));
        let c = self.position(self.apex(e));
        let d = self.position(self.apex(t));
        on_opposite_sides(&c, &d, &a, &b)
    }

    /// Replaces the diagonal `e` of its quad with the other diagonal, reusing
    /// the same six slots. Returns the four outer half-edges of the quad.
    pub(crate) fn flip(&mut self, e: usize) -> [usize; 4] {
        // e = a->b, n1 = b->c, p1 = c->a ; t = b->a, n2 = a->d, p2 = d->b
        let Some(t) = self.twin(e) else {
            return [e; 4];
        };
        let (n1, p1, n2, p2) = (next(e), prev(e), next(t), prev(t));
        let c = self.apex(e);
        let d = self.apex(t);
        trace!(
            a = self.origin(e),
            b = self.dest(e),
            c,
            d,
            "flip"
        );

        let old_n1 = self.half_edges[n1];
        let old_p1 = self.half_edges[p1];
        let old_n2 = self.half_edges[n2];
        let old_p2 = self.half_edges[p2];

        // triangle (d, c, a) in e's triple, (c, d, b) in t's triple
        self.half_edges[e].origin = d;
        self.half_edges[n1] = old_p1;
        self.half_edges[p1] = old_n2;
        self.half_edges[t].origin = c;
        self.half_edges[n2] = old_p2;
        self.half_edges[p2] = old_n1;

        for slot in [n1, p1, n2, p2] {
            if let Some(o) = self.half_edges[slot].twin {
                self.half_edges[o].twin = Some(slot);
            }
        }

        [n1, p1, n2, p2]
    }

    /// Flips the interior, unconstrained edge `e` if its quad is strictly
    /// convex. Returns whether a flip happened. No Delaunay restoration follows.
    pub fn flip_edge(&mut self, e: usize) -> Result<bool> {
        self.check_half_edge(e)?;
        if !self.is_flippable(e) {
            return Ok(false);
        }
        self.flip(e);
        Ok(true)
    }
}

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

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::debug;

use crate::{
    error::Result,
    geometry::Point2,
    impl_topology,
    mesh::{
        basic_types::Location,
        half_edge::triangle_start,
    },
};

impl_topology! {
    /// Removes the region of triangles reachable from the one containing
    /// `position` without crossing a constrained edge, leaving a hole or a
    /// notch. Vertices left without triangles are dropped; surviving vertices
    /// keep their relative order.
    ///
    /// Returns `false`, changing nothing, when `position` is outside the mesh
    /// or the region is the whole mesh.
    pub fn carve_region(&mut self, position: Point2) -> Result<bool> {
        let start = match self.locate(&position)? {
            Location::Outside(_) => return Ok(false),
            found => triangle_start(found.half_edge()),
        };

        let mut seen = AHashSet::new();
        seen.insert(start);
        let mut region = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(t) = queue.pop_front() {
            for e in t..t + 3 {
                let he = self.half_edges[e];
                if he.constrained {
                    continue;
                }
                let Some(o) = he.twin else { continue };
                let ot = triangle_start(o);
                if seen.insert(ot) {
                    region.push(ot);
                    queue.push_back(ot);
                }
            }
        }

        if region.len() == self.triangle_count() {
            debug!(triangles = region.len(), "refusing to carve the whole mesh");
            return Ok(false);
        }

        let rim = self.region_rim(&region);
        for &t in &region {
            self.remove_triangle(t);
        }
        for r in &rim {
            if let Some(outer) = r.outer {
                self.untwin(outer);
            }
        }
        self.invalidate();
        let dropped = self.remove_unused_vertices();
        self.restore_kept_constraints();

        debug!(triangles = region.len(), dropped, "carved region");
        self.debug_check();
        Ok(true)
    }
}

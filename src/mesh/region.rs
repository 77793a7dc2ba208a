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

//! Retriangulation of a region: the caller plans new triangles against the
//! rim of the region, then `replace_region` swaps them in and wires twins.

use ahash::{AHashMap, AHashSet};

use crate::{
    impl_topology,
    mesh::{
        basic_types::RimEdge,
        half_edge::triangle_start,
    },
};

impl_topology! {
    /// Boundary half-edges of the triangles starting at `region`, in region order.
    pub(crate) fn region_rim(&self, region: &[usize]) -> Vec<RimEdge> {
        let inside: AHashSet<usize> = region.iter().map(|&t| triangle_start(t)).collect();
        let mut rim = Vec::with_capacity(region.len() + 2);
        for &t in region {
            let t = triangle_start(t);
            for e in t..t + 3 {
                let he = self.half_edges[e];
                match he.twin {
                    Some(o) if inside.contains(&triangle_start(o)) => continue,
                    outer => rim.push(RimEdge {
                        origin: he.origin,
                        dest: self.dest(e),
                        outer,
                        constrained: he.constrained,
                    }),
                }
            }
        }
        rim
    }

    /// Removes `region`, appends `triangles` and stitches them.
    ///
    /// A new half-edge matching a rim edge is twinned with the rim's outer
    /// half-edge, and the two constraint flags are OR-ed. Otherwise it is
    /// twinned with the reverse new half-edge, or left on the boundary. Rim
    /// edges nothing matched become boundary. Returns the new half-edges.
    pub(crate) fn replace_region(
        &mut self,
        region: &[usize],
        rim: &[RimEdge],
        triangles: &[[usize; 3]],
    ) -> Vec<usize> {
        for &t in region {
            self.remove_triangle(t);
        }

        let mut pending: AHashMap<(usize, usize), usize> =
            rim.iter().enumerate().map(|(i, r)| ((r.origin, r.dest), i)).collect();
        let mut fresh: AHashMap<(usize, usize), usize> = AHashMap::new();
        let mut created = Vec::with_capacity(triangles.len() * 3);

        for &[a, b, c] in triangles {
            let base = self.connect(a, b, c);
            for e in base..base + 3 {
                created.push(e);
                let (o, d) = (self.origin(e), self.dest(e));

                if let Some(i) = pending.remove(&(o, d)) {
                    let r = rim[i];
                    match r.outer {
                        Some(outer) => {
                            let constrained = r.constrained || self.half_edges[outer].constrained;
                            self.make_twins(e, outer);
                            self.set_edge_constraint(e, constrained);
                        }
                        None => self.half_edges[e].constrained = r.constrained,
                    }
                } else if let Some(t) = fresh.remove(&(d, o)) {
                    self.make_twins(e, t);
                } else {
                    fresh.insert((o, d), e);
                }
            }
        }

        for r in rim {
            if !pending.contains_key(&(r.origin, r.dest)) {
                continue;
            }
            if let Some(outer) = r.outer {
                self.untwin(outer);
            }
        }

        created
    }
}

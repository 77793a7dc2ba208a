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

use ahash::AHashSet;
use smallvec::SmallVec;

use crate::{
    error::{Result, TopologyError},
    geometry::Point2,
    impl_topology,
    mesh::{
        basic_types::Star,
        half_edge::{next, prev, triangle_start},
    },
};

impl_topology! {
    #[inline]
    pub fn is_live(&self, e: usize) -> bool {
        e < self.half_edges.len() && !self.half_edges[e].removed
    }

    /// First half-edge of every live triangle.
    pub fn live_triangles(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.half_edges.len())
            .step_by(3)
            .filter(move |&t| self.half_edges[t..t + 3].iter().all(|he| !he.removed))
    }

    pub fn triangle_count(&self) -> usize {
        self.live_triangles().count()
    }

    pub fn triangle_vertices(&self, e: usize) -> [usize; 3] {
        let t = triangle_start(e);
        [self.origin(t), self.origin(t + 1), self.origin(t + 2)]
    }

    pub fn triangle_points(&self, e: usize) -> [Point2; 3] {
        self.triangle_vertices(e).map(|v| self.position(v))
    }

    /// Vertex triples of the live triangles, counter-clockwise.
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.live_triangles().map(|t| self.triangle_vertices(t)).collect()
    }

    /// Constrained edges as vertex pairs, each undirected edge once.
    pub fn constrained_edges(&self) -> Vec<[usize; 2]> {
        let mut out = Vec::new();
        for t in self.live_triangles() {
            for e in t..t + 3 {
                let he = &self.half_edges[e];
                if he.constrained && he.twin.is_none_or(|tw| e < tw) {
                    out.push([he.origin, self.dest(e)]);
                }
            }
        }
        out
    }

    /// Half-edge from `a` to `b`, if the mesh has one.
    pub fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.live_triangles()
            .flat_map(|t| t..t + 3)
            .find(|&e| self.origin(e) == a && self.dest(e) == b)
    }

    /// `true` if some live triangle uses `v`.
    pub fn is_referenced(&self, v: usize) -> bool {
        self.half_edges.iter().any(|he| !he.removed && he.origin == v)
    }

    /// Walks the triangles around the origin of `e`, returning the outgoing
    /// half-edges in counter-clockwise order.
    pub fn star(&self, e: usize) -> Result<Star> {
        let center = self.origin(e);
        let limit = self.half_edges.len();

        // rotate clockwise until the boundary, or back to `e`
        let mut first = e;
        let mut closed = false;
        let mut steps = 0;
        while let Some(t) = self.twin(first) {
            first = next(t);
            if first == e {
                closed = true;
                break;
            }
            steps += 1;
            if steps > limit {
                return Err(TopologyError::Corrupt("star walk does not terminate"));
            }
        }

        let mut spokes: SmallVec<[usize; 8]> = SmallVec::new();
        let mut cur = first;
        loop {
            debug_assert_eq!(self.origin(cur), center);
            spokes.push(cur);
            match self.twin(prev(cur)) {
                Some(o) if o == first => break,
                Some(o) => cur = o,
                None => break,
            }
            if spokes.len() > limit {
                return Err(TopologyError::Corrupt("star walk does not terminate"));
            }
        }

        Ok(Star {
            center,
            spokes,
            closed,
        })
    }

    /// Neighbours of the star center in counter-clockwise order. An open
    /// star yields one more neighbour than it has spokes.
    pub fn star_link(&self, star: &Star) -> SmallVec<[usize; 8]> {
        let mut link: SmallVec<[usize; 8]> = star.spokes.iter().map(|&s| self.dest(s)).collect();
        if !star.closed {
            if let Some(&last) = star.spokes.last() {
                link.push(self.apex(last));
            }
        }
        link
    }

    /// Boundary half-edge leaving the destination of boundary edge `e`.
    pub fn next_boundary_edge(&self, e: usize) -> Result<usize> {
        let mut x = next(e);
        let mut steps = 0;
        while let Some(t) = self.twin(x) {
            x = next(t);
            steps += 1;
            if steps > self.half_edges.len() {
                return Err(TopologyError::Corrupt("boundary rotation does not terminate"));
            }
        }
        Ok(x)
    }

    /// Closed loops of boundary half-edges. The outer boundary runs
    /// counter-clockwise and holes clockwise.
    pub fn boundary_loops(&self) -> Result<Vec<Vec<usize>>> {
        let mut seen = AHashSet::new();
        let mut loops = Vec::new();

        for t in self.live_triangles() {
            for e in t..t + 3 {
                if self.twin(e).is_some() || seen.contains(&e) {
                    continue;
                }
                let mut lp = Vec::new();
                let mut cur = e;
                loop {
                    if !seen.insert(cur) {
                        return Err(TopologyError::Corrupt("boundary loops overlap"));
                    }
                    lp.push(cur);
                    cur = self.next_boundary_edge(cur)?;
                    if cur == e {
                        break;
                    }
                }
                loops.push(lp);
            }
        }
        Ok(loops)
    }

    /// Vertices of the outer boundary loop, counter-clockwise.
    pub fn boundary_vertices(&self) -> Result<Vec<usize>> {
        let loops = self.boundary_loops()?;
        let outer = loops
            .iter()
            .map(|lp| (self.loop_area(lp), lp))
            .max_by(|a, b| a.0.total_cmp(&b.0));
        Ok(outer
            .map(|(_, lp)| lp.iter().map(|&e| self.origin(e)).collect())
            .unwrap_or_default())
    }

    fn loop_area(&self, lp: &[usize]) -> f64 {
        lp.iter()
            .map(|&e| self.position(self.origin(e)).cross(&self.position(self.dest(e))))
            .sum::<f64>()
            * 0.5
    }
}

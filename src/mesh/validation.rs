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

use ahash::AHashMap;

use crate::{
    error::{Result, TopologyError},
    geometry::Point2,
    impl_topology,
    kernel::{in_circumcircle, orient2d, segments_intersect},
    mesh::half_edge::triangle_start,
};

impl_topology! {
    /// Checks the structural invariants: whole triples, in-range origins,
    /// counter-clockwise triangles, unique directed edges, symmetric twins
    /// with opposite endpoints and matching constraint flags.
    pub fn validate(&self) -> Result<()> {
        if self.half_edges.len() % 3 != 0 {
            return Err(TopologyError::Corrupt("half-edge count is not a multiple of three"));
        }

        let mut directed: AHashMap<(usize, usize), usize> = AHashMap::new();
        let mut live = 0;

        for t in (0..self.half_edges.len()).step_by(3) {
            let removed = self.half_edges[t..t + 3].iter().filter(|he| he.removed).count();
            if removed == 3 {
                continue;
            }
            if removed != 0 {
                return Err(TopologyError::Corrupt("triangle is partially removed"));
            }
            live += 1;

            for e in t..t + 3 {
                self.check_vertex(self.origin(e))?;
            }
            let [a, b, c] = self.triangle_vertices(t);
            let [pa, pb, pc] = self.triangle_points(t);
            if !orient2d(&pa, &pb, &pc).is_ccw() {
                return Err(TopologyError::DegenerateTriangle(a, b, c));
            }

            for e in t..t + 3 {
                let key = (self.origin(e), self.dest(e));
                if directed.insert(key, e).is_some() {
                    return Err(TopologyError::NonManifoldEdge(key.0, key.1));
                }

                let he = &self.half_edges[e];
                let Some(tw) = he.twin else { continue };
                if !self.is_live(tw) {
                    return Err(TopologyError::InvalidHalfEdge { index: tw });
                }
                if self.half_edges[tw].twin != Some(e) {
                    return Err(TopologyError::Corrupt("twin links are not symmetric"));
                }
                if self.origin(tw) != self.dest(e) || self.dest(tw) != he.origin {
                    return Err(TopologyError::Corrupt("twins do not share endpoints"));
                }
                if self.half_edges[tw].constrained != he.constrained {
                    return Err(TopologyError::Corrupt("twins disagree on the constraint flag"));
                }
            }
        }

        if live == 0 {
            return Err(TopologyError::EmptyMesh);
        }
        Ok(())
    }

    /// `true` if the apex across `e` lies strictly inside the circumcircle
    /// of `e`'s triangle. Boundary and constrained edges never violate.
    pub fn violates_delaunay(&self, e: usize) -> bool {
        let he = &self.half_edges[e];
        if he.constrained {
            return false;
        }
        let Some(t) = he.twin else { return false };
        let [pa, pb, pc] = self.triangle_points(e);
        in_circumcircle(&pa, &pb, &pc, &self.position(self.apex(t)))
    }

    /// Every unconstrained interior edge passes the in-circle test.
    pub fn is_locally_delaunay(&self) -> bool {
        self.live_triangles()
            .flat_map(|t| t..t + 3)
            .all(|e| !self.violates_delaunay(e))
    }

    /// Global constrained-Delaunay check: `(triangle, vertex)` pairs where the
    /// vertex lies strictly inside the triangle's circumcircle and the segment
    /// from the triangle's centroid to it crosses no constrained or boundary edge.
    pub fn delaunay_violations(&self) -> Vec<(usize, usize)> {
        let barriers: Vec<(usize, usize)> = self
            .live_triangles()
            .flat_map(|t| t..t + 3)
            .filter(|&e| {
                let he = &self.half_edges[e];
                he.twin.is_none() || (he.constrained && he.twin.is_some_and(|tw| e < tw))
            })
            .map(|e| (self.origin(e), self.dest(e)))
            .collect();

        let mut used = vec![false; self.vertices.len()];
        for t in self.live_triangles() {
            for v in self.triangle_vertices(t) {
                used[v] = true;
            }
        }

        let mut violations = Vec::new();
        for t in self.live_triangles() {
            let tri = self.triangle_vertices(t);
            let [pa, pb, pc] = self.triangle_points(t);
            let centroid = Point2::centroid(&pa, &pb, &pc);

            for (v, _) in used.iter().enumerate().filter(|(_, u)| **u) {
                if tri.contains(&v) {
                    continue;
                }
                let p = self.position(v);
                if !in_circumcircle(&pa, &pb, &pc, &p) {
                    continue;
                }
                let blocked = barriers.iter().any(|&(u, w)| {
                    u != v && w != v && segments_intersect(&centroid, &p, &self.position(u), &self.position(w))
                });
                if !blocked {
                    violations.push((triangle_start(t), v));
                }
            }
        }
        violations
    }

    /// `true` when no vertex visible from inside a triangle lies strictly
    /// inside that triangle's circumcircle.
    pub fn full_check(&self) -> bool {
        self.delaunay_violations().is_empty()
    }

    /// Number of live half-edges whose origin is `v`.
    pub(crate) fn spoke_count(&self, v: usize) -> usize {
        self.live_triangles()
            .flat_map(|t| t..t + 3)
            .filter(|&e| self.origin(e) == v)
            .count()
    }

    pub(crate) fn debug_check(&self) {
        debug_assert!(
            self.validate().is_ok(),
            "invalid topology: {:?}",
            self.validate()
        );
        debug_assert!(
            self.is_locally_delaunay(),
            "edge {:?} is not locally Delaunay",
            self.live_triangles()
                .flat_map(|t| t..t + 3)
                .find(|&e| self.violates_delaunay(e))
                .map(|e| (self.origin(e), self.dest(e)))
        );
    }
}

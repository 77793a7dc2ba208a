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

//! Vertex insertion: edge split, constrained cavity fan, or hull extension.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use tracing::{debug, warn};

use crate::{
    error::{Result, TopologyError},
    geometry::{Point2, Segment2},
    impl_topology,
    kernel::{in_circumcircle, orient2d, point_in_triangle, segments_intersect},
    mesh::{
        basic_types::{Location, RimEdge, edge_key},
        half_edge::{next, prev, triangle_start},
    },
};

impl_topology! {
    /// Appends a vertex and triangulates it. On error the vertex is removed
    /// again and the mesh is unchanged.
    pub fn add_point(&mut self, position: Point2, data: V) -> Result<usize> {
        let vi = self.push_vertex(position, data);
        match self.add_vertex(vi) {
            Ok(()) => Ok(vi),
            Err(err) => {
                self.vertices.pop();
                Err(err)
            }
        }
    }

    /// Triangulates the already-appended, unreferenced vertex `vi`.
    pub fn add_vertex(&mut self, vi: usize) -> Result<()> {
        self.check_vertex(vi)?;
        let p = self.position(vi);
        if !p.is_finite() {
            return Err(TopologyError::NonFinitePosition(vi));
        }
        if self.is_referenced(vi) {
            return Err(TopologyError::VertexInUse(vi));
        }

        let location = self.locate(&p)?;
        let created = match location {
            Location::OnVertex(e) => {
                return Err(TopologyError::DuplicateVertex {
                    vertex: vi,
                    existing: self.origin(e),
                });
            }
            Location::OnEdge(e) => match self.split_edge(e, vi) {
                Some(created) => created,
                None => {
                    warn!(vertex = vi, "edge split would fold, inserting into the cavity");
                    self.insert_in_cavity(triangle_start(e), vi)
                }
            },
            Location::Inside(t) => self.insert_in_cavity(t, vi),
            Location::Outside(_) => self.extend_hull(vi)?,
        };

        let flips = self.restore_delaunay(created.iter().copied());
        self.invalidate();
        self.restore_kept_constraints();
        debug!(vertex = vi, ?location, flips, "added vertex");
        self.debug_check();
        Ok(())
    }

    /// Splits the edge `e` at `vi`, replacing the one or two triangles around
    /// it with two each. Returns `None` without touching the mesh if a new
    /// triangle would not be strictly counter-clockwise.
    fn split_edge(&mut self, e: usize, vi: usize) -> Option<Vec<usize>> {
        let (a, b, c) = (self.origin(e), self.dest(e), self.apex(e));
        let twin = self.twin(e);
        let constrained = self.half_edges[e].constrained;

        let mut triangles = vec![[a, vi, c], [vi, b, c]];
        let mut region = vec![triangle_start(e)];
        if let Some(t) = twin {
            let d = self.apex(t);
            triangles.push([b, vi, d]);
            triangles.push([vi, a, d]);
            region.push(triangle_start(t));
        }

        let all_ccw = triangles.iter().all(|&[x, y, z]| {
            orient2d(&self.position(x), &self.position(y), &self.position(z)).is_ccw()
        });
        if !all_ccw {
            return None;
        }

        let rim = self.region_rim(&region);
        let created = self.replace_region(&region, &rim, &triangles);

        if constrained {
            for &h in &created {
                let (o, d) = (self.origin(h), self.dest(h));
                if (o == vi && (d == a || d == b)) || (d == vi && (o == a || o == b)) {
                    self.half_edges[h].constrained = true;
                }
            }
            if self.kept_constraints.remove(&edge_key(a, b)) {
                self.kept_constraints.insert(edge_key(a, vi));
                self.kept_constraints.insert(edge_key(vi, b));
            }
        }
        Some(created)
    }

    /// Removes the triangles whose circumcircle holds `vi`, reachable from
    /// `t` without crossing constrained edges, and fans the hole around `vi`.
    fn insert_in_cavity(&mut self, t: usize, vi: usize) -> Vec<usize> {
        let p = self.position(vi);
        let t = triangle_start(t);

        let mut inside = AHashSet::new();
        inside.insert(t);
        let mut cavity = vec![t];
        let mut queue: VecDeque<usize> = (t..t + 3).collect();

        while let Some(e) = queue.pop_front() {
            let he = self.half_edges[e];
            if he.constrained {
                continue;
            }
            let Some(o) = he.twin else { continue };
            let ot = triangle_start(o);
            if inside.contains(&ot) {
                continue;
            }
            let [a, b, c] = self.triangle_points(ot);
            if in_circumcircle(&a, &b, &c, &p) {
                inside.insert(ot);
                cavity.push(ot);
                queue.push_back(next(o));
                queue.push_back(prev(o));
            }
        }

        let mut rim = self.region_rim(&cavity);
        if !self.is_star_shaped(&rim, &p) {
            warn!(vertex = vi, cavity = cavity.len(), "cavity is not star-shaped, falling back to one triangle");
            cavity = vec![t];
            rim = self.region_rim(&cavity);
        }

        let fan: Vec<[usize; 3]> = rim.iter().map(|r| [r.origin, r.dest, vi]).collect();
        self.replace_region(&cavity, &rim, &fan)
    }

    /// Every rim edge sees `p` on its left and the rim is a single cycle.
    fn is_star_shaped(&self, rim: &[RimEdge], p: &Point2) -> bool {
        let all_ccw = rim.iter().all(|r| {
            orient2d(&self.position(r.origin), &self.position(r.dest), p).is_ccw()
        });
        if !all_ccw || rim.is_empty() {
            return false;
        }

        let succ: AHashMap<usize, usize> = rim.iter().map(|r| (r.origin, r.dest)).collect();
        if succ.len() != rim.len() {
            return false;
        }
        let start = rim[0].origin;
        let mut v = start;
        for step in 1..=rim.len() {
            let Some(&w) = succ.get(&v) else { return false };
            v = w;
            if v == start {
                return step == rim.len();
            }
        }
        false
    }

    /// Boundary edge `c -> d` is visible from `p` when `p` is strictly on its
    /// outer side and no other boundary edge or vertex gets in the way.
    fn is_visible(&self, e: usize, p: &Point2, boundary: &[(usize, usize)]) -> bool {
        let (c, d) = (self.origin(e), self.dest(e));
        let (pc, pd) = (self.position(c), self.position(d));
        if !orient2d(&pc, &pd, p).is_cw() {
            return false;
        }

        for &(u, w) in boundary {
            if (u, w) == (c, d) {
                continue;
            }
            let (pu, pw) = (self.position(u), self.position(w));
            if u != c && w != c && segments_intersect(p, &pc, &pu, &pw) {
                return false;
            }
            if u != d && w != d && segments_intersect(p, &pd, &pu, &pw) {
                return false;
            }
            if u != c && u != d && point_in_triangle(&pd, &pc, p, &pu) {
                return false;
            }
        }
        true
    }

    /// Fans `vi` against the run of boundary edges visible from it.
    fn extend_hull(&mut self, vi: usize) -> Result<Vec<usize>> {
        let p = self.position(vi);
        let loops = self.boundary_loops()?;
        let boundary: Vec<(usize, usize)> = loops
            .iter()
            .flatten()
            .map(|&e| (self.origin(e), self.dest(e)))
            .collect();

        // nearest visible edge, as (distance, loop, position in loop)
        let mut best: Option<(f64, usize, usize)> = None;
        let mut visible: Vec<Vec<bool>> = Vec::with_capacity(loops.len());
        for (li, lp) in loops.iter().enumerate() {
            let flags: Vec<bool> = lp.iter().map(|&e| self.is_visible(e, &p, &boundary)).collect();
            for (k, _) in flags.iter().enumerate().filter(|(_, v)| **v) {
                let e = lp[k];
                let d = Segment2::new(&self.position(self.origin(e)), &self.position(self.dest(e)))
                    .distance_squared_to(&p);
                if best.is_none_or(|(bd, _, _)| d < bd) {
                    best = Some((d, li, k));
                }
            }
            visible.push(flags);
        }

        let Some((_, li, k)) = best else {
            return Err(TopologyError::NotVisible(vi));
        };
        let (lp, flags) = (&loops[li], &visible[li]);
        let n = lp.len();

        let run: Vec<usize> = if flags.iter().all(|&f| f) {
            (0..n).map(|i| lp[(k + i) % n]).collect()
        } else {
            let mut first = k;
            while flags[(first + n - 1) % n] {
                first = (first + n - 1) % n;
            }
            let mut run = Vec::new();
            let mut i = first;
            while flags[i] {
                run.push(lp[i]);
                i = (i + 1) % n;
            }
            run
        };

        let rim: Vec<RimEdge> = run
            .iter()
            .map(|&e| RimEdge {
                origin: self.dest(e),
                dest: self.origin(e),
                outer: Some(e),
                constrained: self.half_edges[e].constrained,
            })
            .collect();
        let fan: Vec<[usize; 3]> = rim.iter().map(|r| [r.origin, r.dest, vi]).collect();
        debug!(vertex = vi, edges = run.len(), "extending hull");
        Ok(self.replace_region(&[], &rim, &fan))
    }
}

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

//! Constrained edge insertion by channel retriangulation.

use std::collections::VecDeque;

use ahash::AHashSet;
use tracing::{debug, warn};

use crate::{
    error::{Result, TopologyError},
    geometry::Point2,
    impl_topology,
    kernel::{Orientation, orient2d, segments_cross_properly},
    mesh::{
        basic_types::edge_key,
        half_edge::{next, prev, triangle_start},
    },
    operations::triangulation::ear_clipping::ear_clip,
};

/// One step of a constraint from its current vertex toward its target.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentStep {
    /// The edge to the target exists.
    Existing(usize),
    /// A neighbour lies on the segment; `edge` leads to it.
    Through { edge: usize, vertex: usize },
    /// Triangles crossed up to the first vertex `end` on the segment, with the
    /// vertices left and right of the segment in walking order.
    Channel {
        region: Vec<usize>,
        left: Vec<usize>,
        right: Vec<usize>,
        end: usize,
    },
}

impl SegmentStep {
    fn reached(&self, target: usize) -> usize {
        match self {
            SegmentStep::Existing(_) => target,
            SegmentStep::Through { vertex, .. } => *vertex,
            SegmentStep::Channel { end, .. } => *end,
        }
    }
}

impl_topology! {
    /// Forces the edge `a - b` into the mesh and marks it constrained.
    ///
    /// An existing edge is only flagged. A segment running through other
    /// vertices is split at them. A segment crossing another constrained edge
    /// or leaving the triangulated region is rejected and the mesh is left
    /// unchanged. The constraint is kept: it is re-established after later
    /// insertions and removals until [`Self::forget_kept_constraints`].
    pub fn insert_constrained_edge(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b || self.position(a) == self.position(b) {
            return Err(TopologyError::DegenerateConstraint(a));
        }

        let pieces = self.force_constraint(a, b)?;
        self.kept_constraints.insert(edge_key(a, b));
        self.invalidate();
        debug!(a, b, pieces, "inserted constrained edge");
        self.debug_check();
        Ok(())
    }

    pub fn insert_constrained_edges(&mut self, edges: &[[usize; 2]]) -> Result<()> {
        for &[a, b] in edges {
            self.insert_constrained_edge(a, b)?;
        }
        Ok(())
    }

    /// Constraints re-established after every retriangulation, as sorted pairs.
    pub fn kept_constraints(&self) -> Vec<[usize; 2]> {
        let mut out: Vec<[usize; 2]> = self.kept_constraints.iter().map(|&(a, b)| [a, b]).collect();
        out.sort_unstable();
        out
    }

    /// Stops re-establishing constraints. Flags already in the mesh stay.
    pub fn forget_kept_constraints(&mut self) {
        self.kept_constraints.clear();
    }

    /// Re-inserts every kept constraint; one that can no longer be inserted is
    /// dropped from the kept set.
    pub(crate) fn restore_kept_constraints(&mut self) {
        let mut pending: Vec<(usize, usize)> = self.kept_constraints.iter().copied().collect();
        pending.sort_unstable();

        for (a, b) in pending {
            if let Err(err) = self.force_constraint(a, b) {
                warn!(a, b, %err, "dropping kept constraint");
                self.kept_constraints.remove(&(a, b));
            }
        }
        self.invalidate();
    }

    /// Checks the whole path read-only, then applies it piece by piece.
    /// Returns the number of pieces.
    fn force_constraint(&mut self, a: usize, b: usize) -> Result<usize> {
        let limit = self.vertices.len();

        let mut from = a;
        let mut steps = 0;
        while from != b {
            from = self.trace_segment(from, a, b)?.reached(b);
            steps += 1;
            if steps > limit {
                return Err(TopologyError::Corrupt("constraint walk does not advance"));
            }
        }

        let mut from = a;
        let mut pieces = 0;
        while from != b && pieces <= limit {
            from = self.force_segment(from, a, b)?;
            pieces += 1;
        }
        Ok(pieces)
    }

    fn force_segment(&mut self, from: usize, a: usize, b: usize) -> Result<usize> {
        match self.trace_segment(from, a, b)? {
            SegmentStep::Existing(e) => {
                self.set_edge_constraint(e, true);
                Ok(b)
            }
            SegmentStep::Through { edge, vertex } => {
                self.set_edge_constraint(edge, true);
                Ok(vertex)
            }
            SegmentStep::Channel {
                region,
                left,
                right,
                end,
            } => {
                let upper: Vec<usize> = [from, end].into_iter().chain(left.iter().rev().copied()).collect();
                let lower: Vec<usize> = [end, from].into_iter().chain(right.iter().copied()).collect();

                let mut seen = AHashSet::with_capacity(left.len() + right.len());
                let simple = left.iter().chain(&right).all(|&v| seen.insert(v));
                let clipped = if simple {
                    self.clip_polygon(&upper)
                        .and_then(|mut triangles| {
                            triangles.extend(self.clip_polygon(&lower)?);
                            Ok(triangles)
                        })
                        .ok()
                } else {
                    None
                };

                let Some(triangles) = clipped else {
                    let flips = self.flip_channel(from, end, &region)?;
                    debug!(from, end, crossed = region.len(), flips, "flipped constraint channel");
                    return Ok(end);
                };

                let rim = self.region_rim(&region);
                let created = self.replace_region(&region, &rim, &triangles);
                for &h in &created {
                    if self.origin(h) == from && self.dest(h) == end {
                        self.set_edge_constraint(h, true);
                    }
                }
                let flips = self.restore_delaunay(created.iter().copied());
                debug!(from, end, crossed = region.len(), flips, "retriangulated constraint channel");
                Ok(end)
            }
        }
    }

    /// Recovers `from - end` by flipping the edges crossing it until none is
    /// left, for channels whose sides are not simple polygons. Every crossed
    /// edge is unconstrained, so a convex quad always exists among them.
    /// Flips shuffle half-edges between the slots of `region`, so edges are
    /// tracked by their endpoints.
    fn flip_channel(&mut self, from: usize, end: usize, region: &[usize]) -> Result<usize> {
        let (pf, pe) = (self.position(from), self.position(end));
        let slots: Vec<usize> = region.iter().flat_map(|&t| t..t + 3).collect();
        let find = |topo: &Self, key: (usize, usize)| {
            slots
                .iter()
                .copied()
                .find(|&e| edge_key(topo.origin(e), topo.dest(e)) == key)
        };

        let mut queue: VecDeque<(usize, usize)> = slots
            .iter()
            .copied()
            .filter(|&e| self.twin(e).is_some_and(|o| e < o) && self.crosses(e, &pf, &pe))
            .map(|e| edge_key(self.origin(e), self.dest(e)))
            .collect();

        let mut flips = 0;
        let mut idle = 0;
        while let Some(key) = queue.pop_front() {
            let e = find(self, key).ok_or(TopologyError::Corrupt("crossed edge lost while flipping"))?;
            if !self.is_flippable(e) {
                queue.push_back(key);
                idle += 1;
                if idle >= queue.len() {
                    return Err(TopologyError::Corrupt("no convex quad left in constraint channel"));
                }
                continue;
            }
            idle = 0;
            // `e` now holds the other diagonal
            self.flip(e);
            flips += 1;
            if self.crosses(e, &pf, &pe) {
                queue.push_back(edge_key(self.origin(e), self.dest(e)));
            }
        }

        let edge = find(self, edge_key(from, end))
            .ok_or(TopologyError::Corrupt("constraint edge missing after flipping"))?;
        self.set_edge_constraint(edge, true);

        Ok(flips + self.restore_delaunay(slots.iter().copied()))
    }

    fn crosses(&self, e: usize, p: &Point2, q: &Point2) -> bool {
        let (u, w) = (self.position(self.origin(e)), self.position(self.dest(e)));
        segments_cross_properly(p, q, &u, &w)
    }

    fn clip_polygon(&self, ids: &[usize]) -> Result<Vec<[usize; 3]>> {
        let polygon: Vec<Point2> = ids.iter().map(|&v| self.position(v)).collect();
        Ok(ear_clip(&polygon)?
            .into_iter()
            .map(|tri| tri.map(|i| ids[i]))
            .collect())
    }

    /// Read-only walk of the segment `from -> b` (part of the constraint
    /// `a - b`) up to the first vertex it reaches.
    fn trace_segment(&mut self, from: usize, a: usize, b: usize) -> Result<SegmentStep> {
        let e0 = self.find_incident_edge(from)?;
        let star = self.star(e0)?;
        let (pf, pb) = (self.position(from), self.position(b));

        // (edge from `from`, neighbour) pairs around the star
        let mut neighbours: Vec<(usize, usize)> =
            star.spokes.iter().map(|&s| (s, self.dest(s))).collect();
        if !star.closed {
            if let Some(&last) = star.spokes.last() {
                neighbours.push((prev(last), self.apex(last)));
            }
        }

        // --- 1) the edge already exists ---
        if let Some(&(e, _)) = neighbours.iter().find(|&&(_, w)| w == b) {
            return Ok(SegmentStep::Existing(e));
        }

        // --- 2) a neighbour sits on the segment ---
        let dir = pb - pf;
        let span = pf.distance_squared(&pb);
        for &(e, w) in &neighbours {
            let pw = self.position(w);
            if orient2d(&pf, &pb, &pw).is_collinear()
                && (pw - pf).dot(&dir) > 0.0
                && pf.distance_squared(&pw) < span
            {
                return Ok(SegmentStep::Through { edge: e, vertex: w });
            }
        }

        // --- 3) the triangle the segment leaves `from` through ---
        let exit = star.spokes.iter().copied().find(|&s| {
            let p_right = self.position(self.dest(s));
            let p_left = self.position(self.apex(s));
            orient2d(&pf, &pb, &p_right).is_cw() && orient2d(&pf, &pb, &p_left).is_ccw()
        });
        let Some(s) = exit else {
            return Err(TopologyError::ConstraintOutsideDomain { a, b });
        };

        // --- 4) walk the channel ---
        let mut region = vec![triangle_start(s)];
        let mut right = vec![self.dest(s)];
        let mut left = vec![self.apex(s)];
        let mut g = next(s); // crossed edge, right -> left

        for _ in 0..self.half_edges.len() / 3 {
            let he = self.half_edges[g];
            if he.constrained {
                return Err(TopologyError::ConstraintsIntersect {
                    a,
                    b,
                    c: he.origin,
                    d: self.dest(g),
                });
            }
            let Some(o) = he.twin else {
                return Err(TopologyError::ConstraintOutsideDomain { a, b });
            };
            region.push(triangle_start(o));

            let w = self.apex(o);
            match orient2d(&pf, &pb, &self.position(w)) {
                Orientation::Collinear => {
                    return Ok(SegmentStep::Channel {
                        region,
                        left,
                        right,
                        end: w,
                    });
                }
                Orientation::CounterClockwise => {
                    left.push(w);
                    g = next(o);
                }
                Orientation::Clockwise => {
                    right.push(w);
                    g = prev(o);
                }
            }
        }

        Err(TopologyError::Corrupt("constraint channel does not terminate"))
    }
}

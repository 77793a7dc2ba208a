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

//! Point location: a stochastic visibility walk with a linear-scan fallback.

use rand::Rng;
use tracing::{trace, warn};

use crate::{
    error::{Result, TopologyError},
    geometry::{Point2, Segment2},
    impl_topology,
    kernel::{Orientation, orient2d, point_in_triangle},
    mesh::{
        basic_types::Location,
        half_edge::{next, prev, triangle_start},
    },
};

impl_topology! {
    /// Locates `p`, confirming "outside" answers of the walk with a scan so
    /// that concave boundaries and holes are handled.
    pub fn locate(&mut self, p: &Point2) -> Result<Location> {
        match self.locate_triangle(p)? {
            Location::Outside(_) => {
                let (e, inside) = self.locate_closest_triangle(p)?;
                Ok(if inside { self.classify(e, p) } else { Location::Outside(e) })
            }
            found => Ok(found),
        }
    }

    /// Walks from a random live triangle toward `p`, crossing any edge that
    /// has `p` strictly on its right. Crossing a boundary edge reports
    /// `Outside` with that edge; it does not prove `p` is outside the mesh.
    pub fn locate_triangle(&mut self, p: &Point2) -> Result<Location> {
        let mut t = self.random_live_triangle()?;
        let max_steps = self.half_edges.len() / 3 + 1;

        for _ in 0..max_steps {
            let offset = self.rng.random_range(0..3);
            let mut crossed = None;
            for k in 0..3 {
                let e = t + (k + offset) % 3;
                let a = self.position(self.origin(e));
                let b = self.position(self.dest(e));
                if orient2d(&a, &b, p).is_cw() {
                    crossed = Some(e);
                    break;
                }
            }

            let Some(e) = crossed else {
                return Ok(self.classify(t, p));
            };
            match self.twin(e) {
                Some(o) => t = triangle_start(o),
                None => return Ok(Location::Outside(e)),
            }
        }

        warn!(x = p.x, y = p.y, "walk did not terminate, scanning triangles");
        let (e, inside) = self.locate_closest_triangle(p)?;
        Ok(if inside { self.classify(e, p) } else { Location::Outside(e) })
    }

    /// Scans every live triangle. Returns a half-edge of the triangle
    /// containing `p` and `true`, or the boundary half-edge nearest to `p`
    /// and `false`.
    pub fn locate_closest_triangle(&self, p: &Point2) -> Result<(usize, bool)> {
        let mut nearest: Option<(f64, usize)> = None;
        let mut any_edge: Option<(f64, usize)> = None;

        for t in self.live_triangles() {
            let [a, b, c] = self.triangle_points(t);
            if point_in_triangle(&a, &b, &c, p) {
                return Ok((t, true));
            }
            for e in t..t + 3 {
                let seg = Segment2::new(
                    &self.position(self.origin(e)),
                    &self.position(self.dest(e)),
                );
                let d = seg.distance_squared_to(p);
                let slot = if self.twin(e).is_none() { &mut nearest } else { &mut any_edge };
                if slot.is_none_or(|(best, _)| d < best) {
                    *slot = Some((d, e));
                }
            }
        }

        nearest
            .or(any_edge)
            .map(|(_, e)| (e, false))
            .ok_or(TopologyError::EmptyMesh)
    }

    /// Classifies `p`, known to lie in the closed triangle of `e`. Edges are
    /// examined in the order `t, next(t), prev(t)` from the triangle's first
    /// half-edge; the first match wins.
    pub(crate) fn classify(&self, e: usize, p: &Point2) -> Location {
        let t = triangle_start(e);
        let edges = [t, next(t), prev(t)];
        let orients: [Orientation; 3] = edges.map(|e| {
            orient2d(&self.position(self.origin(e)), &self.position(self.dest(e)), p)
        });

        let on: Vec<usize> = (0..3).filter(|&k| orients[k].is_collinear()).collect();
        match on.as_slice() {
            [k] => return Location::OnEdge(edges[*k]),
            [i, j] => {
                // p sits on the vertex shared by the two edges
                let (ei, ej) = (edges[*i], edges[*j]);
                let v = if self.dest(ei) == self.origin(ej) { ej } else { ei };
                return Location::OnVertex(v);
            }
            _ => {}
        }

        let tol = self.config.on_edge_tolerance;
        if tol > 0.0 {
            let tol2 = tol * tol;
            for &e in &edges {
                if self.position(self.origin(e)).distance_squared(p) <= tol2 {
                    trace!(vertex = self.origin(e), "snapped onto vertex");
                    return Location::OnVertex(e);
                }
            }
            for &e in &edges {
                let seg = Segment2::new(
                    &self.position(self.origin(e)),
                    &self.position(self.dest(e)),
                );
                if seg.distance_squared_to(p) <= tol2 {
                    trace!(edge = e, "snapped onto edge");
                    return Location::OnEdge(e);
                }
            }
        }

        Location::Inside(t)
    }

    fn random_live_triangle(&mut self) -> Result<usize> {
        let count = self.half_edges.len() / 3;
        if count == 0 {
            return Err(TopologyError::EmptyMesh);
        }
        let start = self.rng.random_range(0..count);
        (0..count)
            .map(|i| (start + i) % count * 3)
            .find(|&t| self.half_edges[t..t + 3].iter().all(|he| !he.removed))
            .ok_or(TopologyError::EmptyMesh)
    }
}

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

use ahash::{AHashMap, AHashSet};
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    error::{Result, TopologyError},
    geometry::Point2,
    impl_topology,
    kernel::{Orientation, orient2d},
    mesh::{
        basic_types::{TopologyConfig, edge_key},
        half_edge::{HalfEdge, next, prev, triangle_start},
        vertex::Vertex,
    },
};

impl_topology! {
    /// Builds a topology with the default configuration and no constraints.
    pub fn from_triangles(vertices: Vec<Vertex<V>>, triangles: &[[usize; 3]]) -> Result<Self> {
        Self::with_config(vertices, triangles, &[], TopologyConfig::default())
    }

    /// Builds a topology from an initial triangulated region.
    ///
    /// Clockwise triangles are re-oriented. Zero-area triangles, directed
    /// edges shared by two triangles and vertices no triangle references are
    /// rejected. The result is made Delaunay by flipping, then the constrained
    /// edges are forced in.
    pub fn with_config(
        vertices: Vec<Vertex<V>>,
        triangles: &[[usize; 3]],
        constrained_edges: &[[usize; 2]],
        config: TopologyConfig,
    ) -> Result<Self> {
        if triangles.is_empty() {
            return Err(TopologyError::EmptyMesh);
        }

        let n = vertices.len();
        if let Some(i) = vertices.iter().position(|v| !v.position.is_finite()) {
            return Err(TopologyError::NonFinitePosition(i));
        }

        let mut topo = Self {
            vertices,
            half_edges: Vec::with_capacity(triangles.len() * 3),
            config,
            rng: StdRng::seed_from_u64(config.seed),
            kept_constraints: AHashSet::new(),
        };

        let mut directed: AHashMap<(usize, usize), usize> = AHashMap::with_capacity(triangles.len() * 3);
        let mut referenced = vec![false; n];

        for &[a, b, c] in triangles {
            for v in [a, b, c] {
                if v >= n {
                    return Err(TopologyError::VertexOutOfRange { index: v, len: n });
                }
                referenced[v] = true;
            }

            let (pa, pb, pc) = (topo.position(a), topo.position(b), topo.position(c));
            let [a, b, c] = match orient2d(&pa, &pb, &pc) {
                Orientation::CounterClockwise => [a, b, c],
                Orientation::Clockwise => [a, c, b],
                Orientation::Collinear => return Err(TopologyError::DegenerateTriangle(a, b, c)),
            };

            let base = topo.connect(a, b, c);
            for e in base..base + 3 {
                let key = (topo.origin(e), topo.dest(e));
                if directed.insert(key, e).is_some() {
                    return Err(TopologyError::NonManifoldEdge(key.0, key.1));
                }
            }
        }

        if let Some(v) = referenced.iter().position(|r| !r) {
            return Err(TopologyError::IsolatedVertex(v));
        }

        for (&(a, b), &e) in &directed {
            if let Some(&t) = directed.get(&(b, a)) {
                topo.half_edges[e].twin = Some(t);
            }
        }

        let all: Vec<usize> = (0..topo.half_edges.len()).collect();
        let flips = topo.restore_delaunay(all);
        debug!(
            vertices = n,
            triangles = triangles.len(),
            flips,
            "built topology"
        );

        topo.insert_constrained_edges(constrained_edges)?;
        Ok(topo)
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn vertices(&self) -> &[Vertex<V>] {
        &self.vertices
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn vertex(&self, v: usize) -> Option<&Vertex<V>> {
        self.vertices.get(v)
    }

    #[inline]
    pub fn position(&self, v: usize) -> Point2 {
        self.vertices[v].position
    }

    /// Appends a vertex without triangulating it.
    pub fn push_vertex(&mut self, position: Point2, data: V) -> usize {
        self.vertices.push(Vertex::new(position, data));
        self.vertices.len() - 1
    }

    // ---------------------------------------------------------------------
    // half-edge primitives
    // ---------------------------------------------------------------------

    #[inline]
    pub fn next(&self, e: usize) -> usize {
        next(e)
    }

    #[inline]
    pub fn prev(&self, e: usize) -> usize {
        prev(e)
    }

    #[inline]
    pub fn twin(&self, e: usize) -> Option<usize> {
        self.half_edges[e].twin
    }

    #[inline]
    pub fn origin(&self, e: usize) -> usize {
        self.half_edges[e].origin
    }

    #[inline]
    pub fn dest(&self, e: usize) -> usize {
        self.half_edges[next(e)].origin
    }

    /// Vertex opposite to `e` in its triangle.
    #[inline]
    pub fn apex(&self, e: usize) -> usize {
        self.half_edges[prev(e)].origin
    }

    /// Appends the triangle `v1, v2, v3` (counter-clockwise) and returns the
    /// index of its first half-edge. Twins are left unset.
    pub fn connect(&mut self, v1: usize, v2: usize, v3: usize) -> usize {
        let base = self.half_edges.len();
        self.half_edges.push(HalfEdge::new(v1));
        self.half_edges.push(HalfEdge::new(v2));
        self.half_edges.push(HalfEdge::new(v3));
        base
    }

    pub fn make_twins(&mut self, i: usize, j: usize) {
        debug_assert!(
            self.origin(i) == self.dest(j) && self.dest(i) == self.origin(j),
            "half-edges {i} and {j} do not run in opposite directions"
        );
        debug_assert!(
            self.half_edges[i]
                .twin
                .is_none_or(|t| t == j || self.half_edges[t].removed),
            "half-edge {i} already has a live twin"
        );
        self.half_edges[i].twin = Some(j);
        self.half_edges[j].twin = Some(i);
    }

    /// Clears the twin link on both sides without removing either edge.
    pub fn untwin(&mut self, i: usize) {
        if let Some(t) = self.half_edges[i].twin.take() {
            if self.half_edges[t].twin == Some(i) {
                self.half_edges[t].twin = None;
            }
        }
    }

    pub fn remove_half_edge(&mut self, i: usize) {
        self.half_edges[i].removed = true;
    }

    pub fn remove_triangle(&mut self, i: usize) {
        let start = triangle_start(i);
        for e in start..start + 3 {
            self.half_edges[e].removed = true;
        }
    }

    /// Sets the constraint flag on `i` and on its twin.
    pub fn set_edge_constraint(&mut self, i: usize, value: bool) {
        self.half_edges[i].constrained = value;
        if let Some(t) = self.half_edges[i].twin {
            self.half_edges[t].constrained = value;
        }
    }

    /// Compacts away every triple holding a tombstone and renumbers twins.
    pub fn invalidate(&mut self) {
        let mut mapping = vec![None; self.half_edges.len()];
        let mut kept = Vec::with_capacity(self.half_edges.len());

        for start in (0..self.half_edges.len()).step_by(3) {
            if self.half_edges[start..start + 3].iter().any(|he| he.removed) {
                continue;
            }
            for e in start..start + 3 {
                mapping[e] = Some(kept.len());
                kept.push(self.half_edges[e]);
            }
        }

        if kept.len() == self.half_edges.len() {
            return;
        }

        for he in &mut kept {
            he.twin = he.twin.and_then(|t| mapping[t]);
        }
        self.half_edges = kept;
    }

    // ---------------------------------------------------------------------
    // vertex bookkeeping
    // ---------------------------------------------------------------------

    pub(crate) fn check_vertex(&self, v: usize) -> Result<()> {
        if v >= self.vertices.len() {
            return Err(TopologyError::VertexOutOfRange {
                index: v,
                len: self.vertices.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_half_edge(&self, e: usize) -> Result<()> {
        if e >= self.half_edges.len() || self.half_edges[e].removed {
            return Err(TopologyError::InvalidHalfEdge { index: e });
        }
        Ok(())
    }

    /// Swap-removes `v`; the old last vertex takes its index.
    pub(crate) fn swap_remove_vertex(&mut self, v: usize) -> Vertex<V> {
        let last = self.vertices.len() - 1;
        let removed = self.vertices.swap_remove(v);

        if v != last {
            for he in &mut self.half_edges {
                if he.origin == last {
                    he.origin = v;
                }
            }
        }

        let remapped: AHashSet<(usize, usize)> = self
            .kept_constraints
            .iter()
            .filter(|&&(a, b)| a != v && b != v)
            .map(|&(a, b)| {
                let a = if a == last { v } else { a };
                let b = if b == last { v } else { b };
                edge_key(a, b)
            })
            .collect();
        self.kept_constraints = remapped;

        removed
    }

    /// Drops every vertex no live triangle references, keeping the order of
    /// the rest. Returns how many were dropped.
    pub(crate) fn remove_unused_vertices(&mut self) -> usize {
        let mut used = vec![false; self.vertices.len()];
        for he in self.half_edges.iter().filter(|he| !he.removed) {
            used[he.origin] = true;
        }

        let mut old_to_new = vec![None; self.vertices.len()];
        let mut count = 0;
        for (old, &u) in used.iter().enumerate() {
            if u {
                old_to_new[old] = Some(count);
                count += 1;
            }
        }

        let dropped = self.vertices.len() - count;
        if dropped == 0 {
            return 0;
        }

        let mut old = 0;
        self.vertices.retain(|_| {
            let keep = used[old];
            old += 1;
            keep
        });

        for he in self.half_edges.iter_mut().filter(|he| !he.removed) {
            if let Some(n) = old_to_new[he.origin] {
                he.origin = n;
            }
        }

        self.kept_constraints = self
            .kept_constraints
            .iter()
            .filter_map(|&(a, b)| Some(edge_key(old_to_new[a]?, old_to_new[b]?)))
            .collect();

        dropped
    }
}

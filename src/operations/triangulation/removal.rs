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

//! Vertex removal: the star of the vertex is removed and the hole refilled.

use std::iter::once;

use ahash::AHashSet;
use tracing::debug;

use crate::{
    error::{Result, TopologyError},
    geometry::Point2,
    impl_topology,
    mesh::{
        basic_types::{Location, Star, edge_key},
        half_edge::{next, prev, triangle_start},
        vertex::Vertex,
    },
    operations::triangulation::ear_clipping::{clip_open_chain, ear_clip},
};

impl_topology! {
    /// Removes `vi` and retriangulates its hole. The old last vertex takes
    /// index `vi`. Returns the removed vertex with its payload.
    ///
    /// A vertex on the outer boundary leaves a notch: only ears that do not
    /// touch it are filled, so link vertices may end up without triangles.
    /// Such a vertex, like one pushed but never triangulated, is removed
    /// without touching the mesh. Removing the last triangle is refused, as
    /// is a removal that would leave a link vertex joining two separate fans.
    pub fn remove_vertex(&mut self, vi: usize) -> Result<Vertex<V>> {
        self.check_vertex(vi)?;
        if !self.is_referenced(vi) {
            let vertex = self.swap_remove_vertex(vi);
            debug!(vertex = vi, "removed unreferenced vertex");
            return Ok(vertex);
        }
        let e0 = self.find_incident_edge(vi)?;
        let star = self.star(e0)?;
        if self.spoke_count(vi) != star.spokes.len() {
            return Err(TopologyError::Corrupt("vertex star is not a single fan"));
        }

        let link = self.star_link(&star);
        let region: Vec<usize> = star.spokes.iter().map(|&s| triangle_start(s)).collect();

        let triangles: Vec<[usize; 3]> = if star.closed {
            if link.len() == 3 {
                vec![[link[0], link[1], link[2]]]
            } else {
                let polygon: Vec<Point2> = link.iter().map(|&v| self.position(v)).collect();
                ear_clip(&polygon)?
                    .into_iter()
                    .map(|tri| tri.map(|i| link[i]))
                    .collect()
            }
        } else {
            let ids: Vec<usize> = once(vi).chain(link.iter().copied()).collect();
            let polygon: Vec<Point2> = ids.iter().map(|&v| self.position(v)).collect();
            clip_open_chain(&polygon)
                .into_iter()
                .map(|tri| tri.map(|i| ids[i]))
                .collect()
        };

        if self.triangle_count() - region.len() + triangles.len() == 0 {
            return Err(TopologyError::WouldEmptyMesh(vi));
        }
        if !star.closed {
            if let Some(pinch) = self.pinched_link_vertex(&star, &link, &region, &triangles)? {
                return Err(TopologyError::WouldPinchBoundary { vertex: vi, pinch });
            }
        }

        self.rejoin_kept_constraints(vi);

        let rim = self.region_rim(&region);
        let created = self.replace_region(&region, &rim, &triangles);
        let flips = self.restore_delaunay(created.iter().copied());
        self.invalidate();

        let vertex = self.swap_remove_vertex(vi);
        self.restore_kept_constraints();
        debug!(
            vertex = vi,
            degree = star.spokes.len(),
            boundary = !star.closed,
            filled = triangles.len(),
            flips,
            "removed vertex"
        );
        self.debug_check();
        Ok(vertex)
    }

    /// A live half-edge leaving `v`. The vertex position is located first;
    /// a scan over all half-edges backs it up.
    pub fn find_incident_edge(&mut self, v: usize) -> Result<usize> {
        self.check_vertex(v)?;
        let p = self.position(v);
        if let Ok(Location::OnVertex(e)) = self.locate_triangle(&p) {
            if self.origin(e) == v {
                return Ok(e);
            }
        }
        self.live_triangles()
            .flat_map(|t| t..t + 3)
            .find(|&e| self.origin(e) == v)
            .ok_or(TopologyError::IsolatedVertex(v))
    }

    /// A link vertex that would be left with two separate fans once the
    /// triangles of `region` are replaced by `fill`. A single fan of `k`
    /// triangles has at most `k + 1` neighbours.
    fn pinched_link_vertex(
        &self,
        star: &Star,
        link: &[usize],
        region: &[usize],
        fill: &[[usize; 3]],
    ) -> Result<Option<usize>> {
        let Some(&tail) = star.spokes.last() else {
            return Ok(None);
        };
        for (j, &l) in link.iter().enumerate() {
            let leaving = star.spokes.get(j).map_or(prev(tail), |&s| next(s));
            let mut neighbours = AHashSet::new();
            let mut count = 0;
            for s in self.star(leaving)?.spokes {
                if region.contains(&triangle_start(s)) {
                    continue;
                }
                count += 1;
                neighbours.insert(self.dest(s));
                neighbours.insert(self.apex(s));
            }
            for t in fill.iter().filter(|t| t.contains(&l)) {
                count += 1;
                neighbours.extend(t.iter().copied().filter(|&v| v != l));
            }
            if neighbours.len() > count + 1 {
                return Ok(Some(l));
            }
        }
        Ok(None)
    }

    /// Drops the kept constraints ending at `v`. When exactly two meet there
    /// they are merged into one running past `v`.
    fn rejoin_kept_constraints(&mut self, v: usize) {
        let mut incident: Vec<(usize, usize)> = self
            .kept_constraints
            .iter()
            .filter(|&&(a, b)| a == v || b == v)
            .copied()
            .collect();
        incident.sort_unstable();

        for k in &incident {
            self.kept_constraints.remove(k);
        }

        if let [(a0, b0), (a1, b1)] = incident.as_slice() {
            let x = if *a0 == v { *b0 } else { *a0 };
            let y = if *a1 == v { *b1 } else { *a1 };
            if x != y {
                self.kept_constraints.insert(edge_key(x, y));
            }
        }
    }
}

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
use rand::rngs::StdRng;
use smallvec::SmallVec;

use crate::mesh::{half_edge::HalfEdge, vertex::Vertex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyConfig {
    /// Seeds the random start of the walking point locator.
    pub seed: u64,
    /// Distance under which a query point snaps onto an edge or a vertex.
    pub on_edge_tolerance: f64,
    /// Lawson flipping stops after `flip_budget_factor * half_edge_count` flips.
    pub flip_budget_factor: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_cafe,
            on_edge_tolerance: 1e-12,
            flip_budget_factor: 64,
        }
    }
}

/// Result of point location. Every variant carries a half-edge index:
/// - Inside:   any half-edge of the containing triangle
/// - OnEdge:   the half-edge the point lies on
/// - OnVertex: a half-edge whose origin is the coincident vertex
/// - Outside:  a boundary half-edge facing the point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside(usize),
    OnEdge(usize),
    OnVertex(usize),
    Outside(usize),
}

impl Location {
    pub fn half_edge(self) -> usize {
        match self {
            Location::Inside(e)
            | Location::OnEdge(e)
            | Location::OnVertex(e)
            | Location::Outside(e) => e,
        }
    }

    pub fn is_outside(self) -> bool {
        matches!(self, Location::Outside(_))
    }
}

/// Boundary edge of a region about to be retriangulated, with the half-edge
/// on the far side that new triangles must be stitched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RimEdge {
    pub origin: usize,
    pub dest: usize,
    pub outer: Option<usize>,
    pub constrained: bool,
}

/// Outgoing half-edges around a vertex in counter-clockwise order.
///
/// An open star touches the outer boundary: its first spoke has no twin and
/// the half-edge entering the center in the last triangle has none either.
#[derive(Debug, Clone)]
pub struct Star {
    pub center: usize,
    pub spokes: SmallVec<[usize; 8]>,
    pub closed: bool,
}

#[derive(Debug, Clone)]
pub struct Topology<V = ()> {
    pub(crate) vertices: Vec<Vertex<V>>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) config: TopologyConfig,
    pub(crate) rng: StdRng,
    /// Constraints to re-establish after every retriangulation, keyed (min, max).
    pub(crate) kept_constraints: AHashSet<(usize, usize)>,
}

#[inline]
pub(crate) fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

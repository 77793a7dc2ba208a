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

//! Ear clipping over polygons given as point lists. Triangles come back as
//! indices into the input slice, counter-clockwise.

use crate::{
    error::{Result, TopologyError},
    geometry::Point2,
    kernel::{orient2d, point_in_triangle},
};

/// `true` if `(ring[i-1], ring[i], ring[i+1])` is a strictly convex corner
/// whose closed triangle holds no other vertex of `ring` or of `extra`.
fn is_ear(points: &[Point2], ring: &[usize], i: usize, extra: &[usize]) -> bool {
    let n = ring.len();
    let (a, b, c) = (ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]);
    let (pa, pb, pc) = (&points[a], &points[b], &points[c]);
    if !orient2d(pa, pb, pc).is_ccw() {
        return false;
    }
    ring.iter()
        .chain(extra)
        .filter(|&&v| v != a && v != b && v != c)
        .all(|&v| !point_in_triangle(pa, pb, pc, &points[v]))
}

/// Triangulates the simple counter-clockwise polygon `polygon`.
pub fn ear_clip(polygon: &[Point2]) -> Result<Vec<[usize; 3]>> {
    let n = polygon.len();
    if n < 3 {
        return Ok(Vec::new());
    }

    let mut ring: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while ring.len() > 3 {
        let m = ring.len();
        let Some(i) = (0..m).find(|&i| is_ear(polygon, &ring, i, &[])) else {
            return Err(TopologyError::EarClippingStalled { remaining: m });
        };
        triangles.push([ring[(i + m - 1) % m], ring[i], ring[(i + 1) % m]]);
        ring.remove(i);
    }

    if !orient2d(&polygon[ring[0]], &polygon[ring[1]], &polygon[ring[2]]).is_ccw() {
        return Err(TopologyError::EarClippingStalled { remaining: 3 });
    }
    triangles.push([ring[0], ring[1], ring[2]]);
    Ok(triangles)
}

/// Clips ears from the counter-clockwise polygon `polygon` whose first vertex
/// is pinned: no ear may use it, and clipping stops once no other ear is left.
/// The uncovered part of the polygon is returned untouched.
pub fn clip_open_chain(polygon: &[Point2]) -> Vec<[usize; 3]> {
    if polygon.len() < 4 {
        return Vec::new();
    }

    let pinned = [0usize];
    let mut chain: Vec<usize> = (1..polygon.len()).collect();
    let mut triangles = Vec::new();

    // Corners are tested on the chain alone; the pinned vertex only blocks.
    while chain.len() >= 3 {
        let ear = (1..chain.len() - 1).find(|&i| {
            let (a, b, c) = (chain[i - 1], chain[i], chain[i + 1]);
            let (pa, pb, pc) = (&polygon[a], &polygon[b], &polygon[c]);
            orient2d(pa, pb, pc).is_ccw()
                && chain
                    .iter()
                    .chain(&pinned)
                    .filter(|&&v| v != a && v != b && v != c)
                    .all(|&v| !point_in_triangle(pa, pb, pc, &polygon[v]))
        });
        let Some(i) = ear else { break };
        triangles.push([chain[i - 1], chain[i], chain[i + 1]]);
        chain.remove(i);
    }
    triangles
}

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

use std::cmp::Ordering;

use crate::geometry::Point2;
use crate::kernel::orientation::{Orientation, incircle, orient2d};

/// `true` iff `p` lies strictly inside the circumcircle of `a, b, c`,
/// whichever way the triangle is wound. Degenerate triangles have no
/// circumcircle and report `false`.
pub fn in_circumcircle(a: &Point2, b: &Point2, c: &Point2, p: &Point2) -> bool {
    match orient2d(a, b, c) {
        Orientation::CounterClockwise => incircle(a, b, c, p) == Ordering::Greater,
        Orientation::Clockwise => incircle(a, c, b, p) == Ordering::Greater,
        Orientation::Collinear => false,
    }
}

/// Closed containment test: points on the boundary count as inside.
pub fn point_in_triangle(a: &Point2, b: &Point2, c: &Point2, p: &Point2) -> bool {
    let (b, c) = match orient2d(a, b, c) {
        Orientation::CounterClockwise => (b, c),
        Orientation::Clockwise => (c, b),
        Orientation::Collinear => return false,
    };
    !orient2d(a, b, p).is_cw() && !orient2d(b, c, p).is_cw() && !orient2d(c, a, p).is_cw()
}

/// `p` and `q` lie strictly on different sides of the line through `a, b`.
pub fn on_opposite_sides(a: &Point2, b: &Point2, p: &Point2, q: &Point2) -> bool {
    let op = orient2d(a, b, p);
    let oq = orient2d(a, b, q);
    !op.is_collinear() && op == oq.reversed()
}

#[inline]
fn within_box(a: &Point2, b: &Point2, p: &Point2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Closed segment intersection. Shared endpoints and touching count;
/// zero-length segments never intersect anything.
pub fn segments_intersect(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    if p1 == p2 || q1 == q2 {
        return false;
    }

    let o1 = orient2d(p1, p2, q1);
    let o2 = orient2d(p1, p2, q2);
    let o3 = orient2d(q1, q2, p1);
    let o4 = orient2d(q1, q2, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1.is_collinear() && within_box(p1, p2, q1))
        || (o2.is_collinear() && within_box(p1, p2, q2))
        || (o3.is_collinear() && within_box(q1, q2, p1))
        || (o4.is_collinear() && within_box(q1, q2, p2))
}

/// Segments cross at a single point interior to both.
pub fn segments_cross_properly(p1: &Point2, p2: &Point2, q1: &Point2, q2: &Point2) -> bool {
    on_opposite_sides(p1, p2, q1, q2) && on_opposite_sides(q1, q2, p1, p2)
}

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

use polymesh_cdt::Point2;
use polymesh_cdt::kernel::{
    Orientation, in_circumcircle, orient2d, point_in_triangle, segments_cross_properly,
    segments_intersect,
};

fn ulp_down(x: f64) -> f64 {
    f64::from_bits(x.to_bits() - 1)
}

#[test]
fn test_orient2d_large_offsets() {
    // exactly collinear points far from the origin
    let base = 1.0e15;
    let a = Point2::new(base, base);
    let b = Point2::new(base + 2.0, base + 2.0);
    let c = Point2::new(base + 8.0, base + 8.0);
    assert_eq!(orient2d(&a, &b, &c), Orientation::Collinear);

    let d = Point2::new(base + 8.0, base + 10.0);
    assert_eq!(orient2d(&a, &b, &d), Orientation::CounterClockwise);
    assert_eq!(orient2d(&b, &a, &d), Orientation::Clockwise);
}

#[test]
fn test_orient2d_permutations_agree() {
    let pts = [
        Point2::new(0.1, 0.1),
        Point2::new(0.3, 0.3000000000000001),
        Point2::new(0.7, 0.7),
    ];
    let o = orient2d(&pts[0], &pts[1], &pts[2]);
    assert_eq!(orient2d(&pts[1], &pts[2], &pts[0]), o);
    assert_eq!(orient2d(&pts[2], &pts[0], &pts[1]), o);
    assert_eq!(orient2d(&pts[0], &pts[2], &pts[1]), o.reversed());
}

#[test]
fn test_in_circumcircle_cocircular_is_outside() {
    let a = Point2::new(5.0, 0.0);
    let b = Point2::new(3.0, 4.0);
    let c = Point2::new(-5.0, 0.0);
    assert!(!in_circumcircle(&a, &b, &c, &Point2::new(4.0, 3.0)));
    assert!(!in_circumcircle(&a, &b, &c, &Point2::new(0.0, -5.0)));
}

#[test]
fn test_in_circumcircle_one_ulp_inside() {
    let a = Point2::new(5.0, 0.0);
    let b = Point2::new(3.0, 4.0);
    let c = Point2::new(-5.0, 0.0);
    let p = Point2::new(4.0, ulp_down(3.0));
    assert!(in_circumcircle(&a, &b, &c, &p));
    assert!(in_circumcircle(&c, &b, &a, &p));
}

#[test]
fn test_in_circumcircle_degenerate_triangle() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 1.0);
    let c = Point2::new(2.0, 2.0);
    assert!(!in_circumcircle(&a, &b, &c, &Point2::new(1.0, 0.0)));
}

#[test]
fn test_point_in_triangle_closed() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);
    assert!(point_in_triangle(&a, &b, &c, &Point2::new(0.5, 0.5)));
    assert!(point_in_triangle(&a, &b, &c, &a));
    assert!(!point_in_triangle(&a, &b, &c, &Point2::new(0.6, 0.6)));
}

#[test]
fn test_segments() {
    let p = |x: f64, y: f64| Point2::new(x, y);
    assert!(segments_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
    assert!(!segments_cross_properly(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
    assert!(segments_cross_properly(&p(0.0, 0.0), &p(1.0, 1.0), &p(1.0, 0.0), &p(0.0, 1.0)));
    assert!(!segments_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0)));
}

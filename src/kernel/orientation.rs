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

//! Adaptive orientation and in-circle determinants.
//!
//! Every determinant is evaluated in three stages: a plain `f64` evaluation
//! accepted when it clears a static error bound, a [`Ball`] enclosure, and
//! finally exact rational arithmetic through `rug`.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Sub};

use crate::geometry::Point2;
use crate::numeric::{Ball, ExactRational};

const EPSILON: f64 = f64::EPSILON * 0.5;
const CCW_ERRBOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const ICC_ERRBOUND_A: f64 = (10.0 + 96.0 * EPSILON) * EPSILON;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    #[inline]
    fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Orientation::Clockwise,
            Ordering::Equal => Orientation::Collinear,
            Ordering::Greater => Orientation::CounterClockwise,
        }
    }

    #[inline]
    fn from_f64(det: f64) -> Self {
        if det > 0.0 {
            Orientation::CounterClockwise
        } else if det < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }

    #[inline]
    pub fn is_ccw(self) -> bool {
        self == Orientation::CounterClockwise
    }

    #[inline]
    pub fn is_cw(self) -> bool {
        self == Orientation::Clockwise
    }

    #[inline]
    pub fn is_collinear(self) -> bool {
        self == Orientation::Collinear
    }

    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

fn orient_det<S>(a: &[S; 2], b: &[S; 2], c: &[S; 2]) -> S
where
    for<'a> &'a S: Sub<&'a S, Output = S> + Mul<&'a S, Output = S>,
{
    &(&(&b[0] - &a[0]) * &(&c[1] - &a[1])) - &(&(&b[1] - &a[1]) * &(&c[0] - &a[0]))
}

fn incircle_det<S>(a: &[S; 2], b: &[S; 2], c: &[S; 2], d: &[S; 2]) -> S
where
    for<'a> &'a S: Add<&'a S, Output = S> + Sub<&'a S, Output = S> + Mul<&'a S, Output = S>,
{
    let adx = &a[0] - &d[0];
    let ady = &a[1] - &d[1];
    let bdx = &b[0] - &d[0];
    let bdy = &b[1] - &d[1];
    let cdx = &c[0] - &d[0];
    let cdy = &c[1] - &d[1];

    let alift = &(&adx * &adx) + &(&ady * &ady);
    let blift = &(&bdx * &bdx) + &(&bdy * &bdy);
    let clift = &(&cdx * &cdx) + &(&cdy * &cdy);

    let bc = &(&bdx * &cdy) - &(&cdx * &bdy);
    let ca = &(&cdx * &ady) - &(&adx * &cdy);
    let ab = &(&adx * &bdy) - &(&bdx * &ady);

    &(&(&alift * &bc) + &(&blift * &ca)) + &(&clift * &ab)
}

#[inline]
fn ball_point(p: &Point2) -> [Ball; 2] {
    [Ball::from_f64(p.x), Ball::from_f64(p.y)]
}

#[inline]
fn exact_point(p: &Point2) -> Option<[ExactRational; 2]> {
    Some([ExactRational::from_f64(p.x)?, ExactRational::from_f64(p.y)?])
}

/// Orientation of the triangle `a, b, c`.
pub fn orient2d(a: &Point2, b: &Point2, c: &Point2) -> Orientation {
    let detleft = (a.x - c.x) * (b.y - c.y);
    let detright = (a.y - c.y) * (b.x - c.x);
    let det = detleft - detright;

    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Orientation::from_f64(det);
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Orientation::from_f64(det);
        }
        -detleft - detright
    } else {
        return Orientation::from_f64(det);
    };

    let errbound = CCW_ERRBOUND_A * detsum;
    if det >= errbound || -det >= errbound {
        return Orientation::from_f64(det);
    }

    let ball = orient_det(&ball_point(a), &ball_point(b), &ball_point(c));
    if let Some(s) = ball.sign_if_certain() {
        return Orientation::from_ordering(s.cmp(&0));
    }

    orient2d_exact(a, b, c)
}

fn orient2d_exact(a: &Point2, b: &Point2, c: &Point2) -> Orientation {
    match (exact_point(a), exact_point(b), exact_point(c)) {
        (Some(a), Some(b), Some(c)) => Orientation::from_ordering(orient_det(&a, &b, &c).cmp_zero()),
        _ => Orientation::Collinear,
    }
}

/// Sign of the lifted in-circle determinant.
///
/// For a counter-clockwise triangle `a, b, c` the result is `Greater` when
/// `d` lies strictly inside its circumcircle, `Equal` when the four points are
/// cocircular, and `Less` outside. The sign flips for a clockwise triangle.
pub fn incircle(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> Ordering {
    let adx = a.x - d.x;
    let bdx = b.x - d.x;
    let cdx = c.x - d.x;
    let ady = a.y - d.y;
    let bdy = b.y - d.y;
    let cdy = c.y - d.y;

    let bdxcdy = bdx * cdy;
    let cdxbdy = cdx * bdy;
    let alift = adx * adx + ady * ady;

    let cdxady = cdx * ady;
    let adxcdy = adx * cdy;
    let blift = bdx * bdx + bdy * bdy;

    let adxbdy = adx * bdy;
    let bdxady = bdx * ady;
    let clift = cdx * cdx + cdy * cdy;

    let det = alift * (bdxcdy - cdxbdy) + blift * (cdxady - adxcdy) + clift * (adxbdy - bdxady);

    let permanent = (bdxcdy.abs() + cdxbdy.abs()) * alift
        + (cdxady.abs() + adxcdy.abs()) * blift
        + (adxbdy.abs() + bdxady.abs()) * clift;
    let errbound = ICC_ERRBOUND_A * permanent;
    if det > errbound || -det > errbound {
        return det.partial_cmp(&0.0).unwrap_or(Ordering::Equal);
    }

    let ball = incircle_det(&ball_point(a), &ball_point(b), &ball_point(c), &ball_point(d));
    if let Some(s) = ball.sign_if_certain() {
        return s.cmp(&0);
    }

    match (exact_point(a), exact_point(b), exact_point(c), exact_point(d)) {
        (Some(a), Some(b), Some(c), Some(d)) => incircle_det(&a, &b, &c, &d).cmp_zero(),
        _ => Ordering::Equal,
    }
}

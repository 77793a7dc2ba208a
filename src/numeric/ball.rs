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

use std::ops::{Add, Mul, Sub};

/// Slack applied to every radius so that rounding of the radius itself
/// never under-estimates the enclosure.
const ROUND_UP: f64 = 1.0 + 4.0 * f64::EPSILON;

/// Midpoint-radius enclosure of a real value.
#[derive(Copy, Clone, Debug)]
pub struct Ball {
    pub m: f64,
    pub r: f64,
} // value ∈ [m - r, m + r]

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

impl Ball {
    #[inline]
    pub fn from_f64(x: f64) -> Self {
        Ball { m: x, r: 0.0 }
    }

    #[inline]
    pub fn add(self, o: Self) -> Self {
        let (s, e) = two_sum(self.m, o.m);
        Ball {
            m: s,
            r: (self.r + o.r + e.abs()) * ROUND_UP,
        }
    }

    #[inline]
    pub fn sub(self, o: Self) -> Self {
        self.add(o.neg())
    }

    #[inline]
    pub fn neg(self) -> Self {
        Ball {
            m: -self.m,
            r: self.r,
        }
    }

    #[inline]
    pub fn mul(self, o: Self) -> Self {
        let (p, e) = two_prod(self.m, o.m);
        Ball {
            m: p,
            r: (self.m.abs() * o.r + o.m.abs() * self.r + self.r * o.r + e.abs()) * ROUND_UP,
        }
    }

    /// Sign of the enclosed value when the enclosure excludes zero.
    #[inline]
    pub fn sign_if_certain(self) -> Option<i8> {
        if !self.r.is_finite() || !self.m.is_finite() {
            return None;
        }
        if self.m > self.r {
            Some(1)
        } else if self.m < -self.r {
            Some(-1)
        } else {
            None
        }
    }
}

impl<'a, 'b> Add<&'b Ball> for &'a Ball {
    type Output = Ball;
    fn add(self, rhs: &'b Ball) -> Ball {
        Ball::add(*self, *rhs)
    }
}

impl<'a, 'b> Sub<&'b Ball> for &'a Ball {
    type Output = Ball;
    fn sub(self, rhs: &'b Ball) -> Ball {
        Ball::sub(*self, *rhs)
    }
}

impl<'a, 'b> Mul<&'b Ball> for &'a Ball {
    type Output = Ball;
    fn mul(self, rhs: &'b Ball) -> Ball {
        Ball::mul(*self, *rhs)
    }
}

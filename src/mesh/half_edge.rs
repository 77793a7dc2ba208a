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

/// Directed edge of a triangle. Half-edges live in consecutive triples; the
/// triple is the triangle, listed counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: usize,       // vertex this half-edge starts at
    pub twin: Option<usize>, // None on the outer boundary
    pub constrained: bool,
    pub removed: bool, // tombstone, dropped by `invalidate`
}

impl HalfEdge {
    pub fn new(origin: usize) -> Self {
        Self {
            origin,
            twin: None,
            constrained: false,
            removed: false,
        }
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.twin.is_none()
    }
}

#[inline]
pub fn next(i: usize) -> usize {
    if i % 3 == 2 { i - 2 } else { i + 1 }
}

#[inline]
pub fn prev(i: usize) -> usize {
    if i % 3 == 0 { i + 2 } else { i - 1 }
}

/// First half-edge of the triple holding `i`.
#[inline]
pub fn triangle_start(i: usize) -> usize {
    i - i % 3
}

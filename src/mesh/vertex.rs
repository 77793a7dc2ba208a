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

use crate::geometry::Point2;

/// Position plus caller-owned payload; the payload is carried, never read.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<V = ()> {
    pub position: Point2,
    pub data: V,
}

impl<V> Vertex<V> {
    pub fn new(position: Point2, data: V) -> Self {
        Self { position, data }
    }
}

impl From<Point2> for Vertex<()> {
    fn from(position: Point2) -> Self {
        Self { position, data: () }
    }
}

impl From<[f64; 2]> for Vertex<()> {
    fn from(p: [f64; 2]) -> Self {
        Self {
            position: Point2::from(p),
            data: (),
        }
    }
}

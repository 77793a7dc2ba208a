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

use thiserror::Error;

/// Failures reported by the triangulation entry points.
///
/// Index and "must find" failures signal misuse or a corrupted topology; they
/// are surfaced rather than recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("vertex index {index} out of range (vertex count {len})")]
    VertexOutOfRange { index: usize, len: usize },

    #[error("half-edge {index} is out of range or removed")]
    InvalidHalfEdge { index: usize },

    #[error("mesh must contain at least one triangle")]
    EmptyMesh,

    #[error("triangle ({0}, {1}, {2}) has zero area")]
    DegenerateTriangle(usize, usize, usize),

    #[error("directed edge {0} -> {1} belongs to more than one triangle")]
    NonManifoldEdge(usize, usize),

    #[error("vertex {0} is not referenced by any triangle")]
    IsolatedVertex(usize),

    #[error("vertex {0} is already part of the triangulation")]
    VertexInUse(usize),

    #[error("vertex {0} has a non-finite position")]
    NonFinitePosition(usize),

    #[error("vertex {vertex} coincides with existing vertex {existing}")]
    DuplicateVertex { vertex: usize, existing: usize },

    #[error("no boundary edge is visible from vertex {0}")]
    NotVisible(usize),

    #[error("removing vertex {0} would leave the mesh without triangles")]
    WouldEmptyMesh(usize),

    #[error("removing vertex {vertex} would pinch the boundary at vertex {pinch}")]
    WouldPinchBoundary { vertex: usize, pinch: usize },

    #[error("constrained edge cannot start and end at vertex {0}")]
    DegenerateConstraint(usize),

    #[error("constrained edge {a} -> {b} crosses constrained edge {c} -> {d}")]
    ConstraintsIntersect {
        a: usize,
        b: usize,
        c: usize,
        d: usize,
    },

    #[error("constrained edge {a} -> {b} leaves the triangulated region")]
    ConstraintOutsideDomain { a: usize, b: usize },

    #[error("ear clipping stalled with {remaining} polygon vertices left")]
    EarClippingStalled { remaining: usize },

    #[error("corrupt topology: {0}")]
    Corrupt(&'static str),
}

pub type Result<T> = std::result::Result<T, TopologyError>;

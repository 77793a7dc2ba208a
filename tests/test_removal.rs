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

use polymesh_cdt::{Point2, Topology, TopologyError, Vertex};

fn make_mesh(points: &[[f64; 2]], triangles: &[[usize; 3]]) -> Topology {
    let vertices = points.iter().map(|&p| Vertex::from(p)).collect();
    Topology::from_triangles(vertices, triangles).unwrap()
}

fn make_square() -> Topology {
    make_mesh(
        &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        &[[0, 1, 2], [0, 2, 3]],
    )
}

fn make_fan() -> Topology {
    make_mesh(
        &[[0.0, 0.0], [4.0, 0.0], [2.0, 3.0], [2.0, 1.0], [6.0, 3.0]],
        &[[0, 1, 3], [1, 2, 3], [2, 0, 3], [1, 4, 2]],
    )
}

/// Triangles rotated to start at their smallest index, then sorted.
fn normalized(topo: &Topology) -> Vec<[usize; 3]> {
    let mut out: Vec<[usize; 3]> = topo
        .triangles()
        .into_iter()
        .map(|t| {
            let k = (0..3).min_by_key(|&i| t[i]).unwrap_or(0);
            [t[k], t[(k + 1) % 3], t[(k + 2) % 3]]
        })
        .collect();
    out.sort_unstable();
    out
}

#[test]
fn test_remove_degree_three_vertex() {
    let mut topo = make_fan();
    let removed = topo.remove_vertex(3).unwrap();

    assert_eq!(removed.position, Point2::new(2.0, 1.0));
    assert_eq!(topo.vertices().len(), 4);
    // the old vertex 4 now lives at index 3
    assert_eq!(topo.position(3), Point2::new(6.0, 3.0));
    assert_eq!(normalized(&topo), vec![[0, 1, 2], [1, 3, 2]]);
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_insert_then_remove_restores_triangulation() {
    let mut topo = make_fan();
    let before = normalized(&topo);

    let v = topo.add_point(Point2::new(3.0, 1.2), ()).unwrap();
    assert_ne!(normalized(&topo), before);
    topo.remove_vertex(v).unwrap();

    assert_eq!(normalized(&topo), before);
    assert!(topo.full_check());
}

#[test]
fn test_remove_interior_vertex_of_larger_star() {
    let mut topo = make_square();
    for &(x, y) in &[(0.5, 0.5), (0.2, 0.3), (0.8, 0.35), (0.55, 0.85)] {
        topo.add_point(Point2::new(x, y), ()).unwrap();
    }
    let count = topo.triangle_count();
    topo.remove_vertex(4).unwrap();

    assert_eq!(topo.vertices().len(), 7);
    assert_eq!(topo.triangle_count(), count - 2);
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_remove_boundary_corner() {
    let mut topo = make_square();
    topo.remove_vertex(0).unwrap();

    assert_eq!(topo.triangle_count(), 1);
    assert_eq!(topo.vertices().len(), 3);
    // the old vertex 3 took index 0
    assert_eq!(normalized(&topo), vec![[0, 1, 2]]);
    assert!(topo.validate().is_ok());

    assert_eq!(topo.remove_vertex(1).unwrap_err(), TopologyError::WouldEmptyMesh(1));
    assert_eq!(topo.triangle_count(), 1);
}

#[test]
fn test_swap_remove_moves_payload() {
    let vertices = vec![
        Vertex::new(Point2::new(0.0, 0.0), 10),
        Vertex::new(Point2::new(2.0, 0.0), 11),
        Vertex::new(Point2::new(2.0, 2.0), 12),
        Vertex::new(Point2::new(0.0, 2.0), 13),
        Vertex::new(Point2::new(1.0, 0.9), 14),
    ];
    let mut topo = Topology::from_triangles(
        vertices,
        &[[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
    )
    .unwrap();

    let removed = topo.remove_vertex(1).unwrap();
    assert_eq!(removed.data, 11);
    assert_eq!(topo.vertex(1).map(|v| v.data), Some(14));
    assert_eq!(topo.position(1), Point2::new(1.0, 0.9));
    assert!(topo.is_referenced(1));
    assert!(topo.validate().is_ok());
}

#[test]
fn test_remove_unreferenced_vertex() {
    let mut topo = make_square();
    let before = topo.half_edges().to_vec();
    let v = topo.push_vertex(Point2::new(5.0, 5.0), ());
    let removed = topo.remove_vertex(v).unwrap();
    assert_eq!(removed.position, Point2::new(5.0, 5.0));
    assert_eq!(topo.vertices().len(), 4);
    assert_eq!(topo.half_edges(), before.as_slice());
    assert!(matches!(
        topo.remove_vertex(99),
        Err(TopologyError::VertexOutOfRange { index: 99, .. })
    ));
}

#[test]
fn test_constraint_survives_removal_of_split_point() {
    let mut topo = make_square();
    let c = topo.add_point(Point2::new(0.5, 0.5), ()).unwrap();
    topo.insert_constrained_edge(0, 2).unwrap();
    assert_eq!(topo.constrained_edges().len(), 2);

    topo.remove_vertex(c).unwrap();

    let edges: Vec<[usize; 2]> = topo
        .constrained_edges()
        .into_iter()
        .map(|[a, b]| [a.min(b), a.max(b)])
        .collect();
    assert_eq!(edges, vec![[0, 2]]);
    assert!(topo.validate().is_ok());
}

#[test]
fn test_split_constraint_rejoins_on_removal() {
    let mut topo = make_square();
    topo.insert_constrained_edge(1, 3).unwrap();
    let c = topo.add_point(Point2::new(0.5, 0.5), ()).unwrap();
    assert_eq!(topo.kept_constraints(), vec![[1, c], [3, c]]);

    topo.remove_vertex(c).unwrap();

    assert_eq!(topo.kept_constraints(), vec![[1, 3]]);
    assert!(topo.find_edge(1, 3).is_some() || topo.find_edge(3, 1).is_some());
    assert_eq!(topo.constrained_edges().len(), 1);
    assert!(topo.full_check());
}

#[test]
fn test_vertex_orphaned_by_boundary_removal_can_be_removed() {
    let mut topo = make_mesh(
        &[[1.5, 0.0], [2.0, 0.0], [1.0, 1.0], [1.0, -1.0], [0.0, 0.0]],
        &[[0, 1, 2], [0, 3, 1], [0, 2, 4]],
    );

    // the chain 3 -> 0 -> 2 is reflex, so nothing refills the notch
    topo.remove_vertex(1).unwrap();
    assert_eq!(topo.triangle_count(), 1);
    assert!(!topo.is_referenced(3));

    let orphan = topo.remove_vertex(3).unwrap();
    assert_eq!(orphan.position, Point2::new(1.0, -1.0));
    assert_eq!(topo.vertices().len(), 3);
    assert!((0..3).all(|v| topo.is_referenced(v)));
    assert!(topo.validate().is_ok());
}

#[test]
fn test_boundary_removal_that_would_pinch_is_refused() {
    // vertex 2 already touches the notch below it
    let mut topo = make_mesh(
        &[[0.0, 2.0], [-2.0, 0.0], [0.0, 1.0], [2.0, 0.0], [-1.0, -1.0], [1.0, -1.0]],
        &[[0, 1, 2], [0, 2, 3], [1, 4, 2], [2, 5, 3]],
    );
    let before = topo.half_edges().to_vec();

    assert_eq!(
        topo.remove_vertex(0),
        Err(TopologyError::WouldPinchBoundary { vertex: 0, pinch: 2 })
    );
    assert_eq!(topo.half_edges(), before.as_slice());
    assert_eq!(topo.vertices().len(), 6);

    // the refill on either side of vertex 0 would only meet there
    assert_eq!(
        topo.remove_vertex(2),
        Err(TopologyError::WouldPinchBoundary { vertex: 2, pinch: 0 })
    );
    assert_eq!(topo.half_edges(), before.as_slice());

    let removed = topo.remove_vertex(4).unwrap();
    assert_eq!(removed.position, Point2::new(-1.0, -1.0));
    assert_eq!(topo.triangle_count(), 3);
    assert!(topo.validate().is_ok());
}

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

fn make_square() -> Topology {
    let vertices = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        .iter()
        .map(|&p| Vertex::from(p))
        .collect();
    Topology::from_triangles(vertices, &[[0, 1, 2], [0, 2, 3]]).unwrap()
}

fn has_edge(topo: &Topology, a: usize, b: usize) -> bool {
    topo.find_edge(a, b).is_some() || topo.find_edge(b, a).is_some()
}

fn is_constrained(topo: &Topology, a: usize, b: usize) -> bool {
    topo.constrained_edges()
        .iter()
        .any(|&[u, w]| (u, w) == (a, b) || (u, w) == (b, a))
}

#[test]
fn test_quad_center_replaces_diagonal() {
    let mut topo = make_square();
    let c = topo.add_point(Point2::new(0.5, 0.5), ()).unwrap();

    assert_eq!(c, 4);
    assert_eq!(topo.triangle_count(), 4);
    assert!(topo.triangles().iter().all(|t| t.contains(&c)));
    assert!(!has_edge(&topo, 0, 2));
    for corner in 0..4 {
        assert!(has_edge(&topo, corner, c));
    }
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_quad_center_keeps_constrained_anti_diagonal() {
    let mut topo = make_square();
    topo.insert_constrained_edge(1, 3).unwrap();
    let c = topo.add_point(Point2::new(0.5, 0.5), ()).unwrap();

    assert_eq!(topo.triangle_count(), 4);
    assert!(topo.triangles().iter().all(|t| t.contains(&c)));
    assert!(is_constrained(&topo, 1, c));
    assert!(is_constrained(&topo, c, 3));
    assert!(!is_constrained(&topo, 0, c));
    assert!(topo.is_locally_delaunay());
    assert!(topo.full_check());
}

#[test]
fn test_interior_insertions_stay_delaunay() {
    let mut topo = make_square();
    let points = [
        (0.3, 0.2),
        (0.7, 0.25),
        (0.45, 0.8),
        (0.12, 0.55),
        (0.81, 0.66),
        (0.5, 0.47),
    ];
    for &(x, y) in &points {
        topo.add_point(Point2::new(x, y), ()).unwrap();
        assert!(topo.validate().is_ok());
        assert!(topo.full_check());
    }
    assert_eq!(topo.vertices().len(), 10);
    // Euler: a triangulated disc with n vertices and h hull vertices has 2n - h - 2 triangles
    assert_eq!(topo.triangle_count(), 2 * 10 - 4 - 2);
}

#[test]
fn test_outside_point_adds_one_hull_vertex() {
    let mut topo = make_square();
    topo.insert_constrained_edge(0, 2).unwrap();
    let before = topo.boundary_vertices().unwrap().len();

    let v = topo.add_point(Point2::new(0.5, -1.0), ()).unwrap();

    let hull = topo.boundary_vertices().unwrap();
    assert_eq!(hull.len(), before + 1);
    assert!(hull.contains(&v));
    assert!(is_constrained(&topo, 0, 2));
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_outside_point_sees_two_edges() {
    let mut topo = make_square();
    let v = topo.add_point(Point2::new(2.0, -1.0), ()).unwrap();
    assert_eq!(topo.triangle_count(), 4);
    let mut hull = topo.boundary_vertices().unwrap();
    hull.sort_unstable();
    assert_eq!(hull, vec![0, 2, 3, v]);
    assert!(topo.full_check());
}

#[test]
fn test_duplicate_point_is_rejected() {
    let mut topo = make_square();
    let before = topo.half_edges().to_vec();
    let err = topo.add_point(Point2::new(1.0, 1.0), ()).unwrap_err();
    assert_eq!(
        err,
        TopologyError::DuplicateVertex {
            vertex: 4,
            existing: 2
        }
    );
    assert_eq!(topo.vertices().len(), 4);
    assert_eq!(topo.half_edges(), before.as_slice());
}

#[test]
fn test_add_vertex_by_index() {
    let mut topo = make_square();
    let v = topo.push_vertex(Point2::new(0.25, 0.6), ());
    assert!(!topo.is_referenced(v));
    topo.add_vertex(v).unwrap();
    assert!(topo.is_referenced(v));
    assert_eq!(topo.add_vertex(v), Err(TopologyError::VertexInUse(v)));
    assert!(matches!(
        topo.add_vertex(42),
        Err(TopologyError::VertexOutOfRange { index: 42, .. })
    ));
}

#[test]
fn test_non_finite_point_is_rejected() {
    let mut topo = make_square();
    assert_eq!(
        topo.add_point(Point2::new(f64::NAN, 0.5), ()),
        Err(TopologyError::NonFinitePosition(4))
    );
    assert_eq!(topo.vertices().len(), 4);
}

#[test]
fn test_payload_is_carried() {
    let vertices = vec![
        Vertex::new(Point2::new(0.0, 0.0), "a"),
        Vertex::new(Point2::new(2.0, 0.0), "b"),
        Vertex::new(Point2::new(1.0, 2.0), "c"),
    ];
    let mut topo = Topology::from_triangles(vertices, &[[0, 1, 2]]).unwrap();
    let d = topo.add_point(Point2::new(1.0, 0.5), "d").unwrap();
    assert_eq!(topo.vertex(d).map(|v| v.data), Some("d"));
    assert_eq!(topo.triangle_count(), 3);
}

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

use polymesh_cdt::{Point2, Topology, TopologyConfig, TopologyError, Vertex};

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

/// `cols x rows` cells of unit squares, each split along its rising diagonal.
fn make_grid(cols: usize, rows: usize) -> Topology {
    let w = cols + 1;
    let mut points = Vec::new();
    for j in 0..=rows {
        for i in 0..=cols {
            points.push([i as f64, j as f64]);
        }
    }
    let mut triangles = Vec::new();
    for j in 0..rows {
        for i in 0..cols {
            let v = j * w + i;
            triangles.push([v, v + 1, v + w + 1]);
            triangles.push([v, v + w + 1, v + w]);
        }
    }
    make_mesh(&points, &triangles)
}

fn has_edge(topo: &Topology, a: usize, b: usize) -> bool {
    topo.find_edge(a, b).is_some() || topo.find_edge(b, a).is_some()
}

fn sorted_constrained(topo: &Topology) -> Vec<[usize; 2]> {
    let mut edges: Vec<[usize; 2]> = topo
        .constrained_edges()
        .into_iter()
        .map(|[a, b]| [a.min(b), a.max(b)])
        .collect();
    edges.sort_unstable();
    edges
}

#[test]
fn test_anti_diagonal_flips_in() {
    let mut topo = make_square();
    assert!(has_edge(&topo, 0, 2));

    topo.insert_constrained_edge(1, 3).unwrap();

    assert!(has_edge(&topo, 1, 3));
    assert!(!has_edge(&topo, 0, 2));
    assert_eq!(sorted_constrained(&topo), vec![[1, 3]]);
    assert_eq!(topo.triangle_count(), 2);
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_reinserting_is_a_no_op() {
    let mut topo = make_square();
    topo.insert_constrained_edge(1, 3).unwrap();
    let once = topo.half_edges().to_vec();

    topo.insert_constrained_edge(3, 1).unwrap();

    assert_eq!(topo.half_edges(), once.as_slice());
    assert_eq!(topo.kept_constraints(), vec![[1, 3]]);
}

#[test]
fn test_existing_edge_is_only_flagged() {
    let mut topo = make_square();
    let before = topo.triangles();

    topo.insert_constrained_edge(0, 2).unwrap();

    assert_eq!(topo.triangles(), before);
    let e = topo.find_edge(0, 2).or_else(|| topo.find_edge(2, 0)).unwrap();
    assert!(topo.half_edges()[e].constrained);
    let t = topo.twin(e).unwrap();
    assert!(topo.half_edges()[t].constrained);
}

#[test]
fn test_channel_across_several_triangles() {
    let mut topo = make_grid(3, 1);
    let count = topo.triangle_count();
    topo.insert_constrained_edge(0, 7).unwrap();

    assert!(has_edge(&topo, 0, 7));
    assert_eq!(sorted_constrained(&topo), vec![[0, 7]]);
    assert_eq!(topo.triangle_count(), count);
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_channel_on_taller_grid() {
    let mut topo = make_grid(4, 3);
    // (0, 3) -> (4, 0), index 15 -> 4
    topo.insert_constrained_edge(15, 4).unwrap();

    assert!(has_edge(&topo, 15, 4));
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());
}

#[test]
fn test_segment_through_vertex_is_split() {
    let mut topo = make_square();
    let c = topo.add_point(Point2::new(0.5, 0.5), ()).unwrap();

    topo.insert_constrained_edge(1, 3).unwrap();

    assert_eq!(sorted_constrained(&topo), vec![[1, c], [3, c]]);
    assert_eq!(topo.kept_constraints(), vec![[1, 3]]);
    assert!(topo.full_check());
}

#[test]
fn test_crossing_constraints_are_rejected() {
    let mut topo = make_square();
    topo.insert_constrained_edge(0, 2).unwrap();
    let before = topo.half_edges().to_vec();

    let err = topo.insert_constrained_edge(1, 3).unwrap_err();

    assert!(matches!(err, TopologyError::ConstraintsIntersect { .. }));
    assert_eq!(topo.half_edges(), before.as_slice());
    assert_eq!(topo.kept_constraints(), vec![[0, 2]]);
}

#[test]
fn test_segment_leaving_the_domain_is_rejected() {
    // L-shaped region with the notch at the top right
    let mut topo = make_mesh(
        &[
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ],
        &[[0, 1, 2], [0, 2, 3], [0, 3, 5], [3, 4, 5]],
    );
    let before = topo.half_edges().to_vec();

    let err = topo.insert_constrained_edge(2, 4).unwrap_err();

    assert!(matches!(err, TopologyError::ConstraintOutsideDomain { .. }));
    assert_eq!(topo.half_edges(), before.as_slice());
    assert!(topo.kept_constraints().is_empty());
}

#[test]
fn test_degenerate_constraints() {
    let mut topo = make_square();
    assert_eq!(
        topo.insert_constrained_edge(2, 2),
        Err(TopologyError::DegenerateConstraint(2))
    );
    assert!(matches!(
        topo.insert_constrained_edge(0, 8),
        Err(TopologyError::VertexOutOfRange { index: 8, .. })
    ));
}

#[test]
fn test_batch_insert_and_forget() {
    let mut topo = make_grid(2, 2);
    let err = topo.insert_constrained_edges(&[[0, 8], [1, 3]]).unwrap_err();
    assert!(matches!(err, TopologyError::ConstraintsIntersect { .. }));

    let mut topo = make_grid(2, 2);
    topo.insert_constrained_edges(&[[0, 2], [0, 8]]).unwrap();
    assert_eq!(topo.kept_constraints(), vec![[0, 2], [0, 8]]);
    assert_eq!(sorted_constrained(&topo), vec![[0, 1], [0, 4], [1, 2], [4, 8]]);

    topo.forget_kept_constraints();
    assert!(topo.kept_constraints().is_empty());
    assert_eq!(topo.constrained_edges().len(), 4);
}

#[test]
fn test_constraints_given_at_construction() {
    let vertices = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        .iter()
        .map(|&p| Vertex::from(p))
        .collect();
    let topo = Topology::with_config(
        vertices,
        &[[0, 1, 2], [0, 2, 3]],
        &[[1, 3]],
        TopologyConfig::default(),
    )
    .unwrap();

    assert!(has_edge(&topo, 1, 3));
    assert_eq!(topo.kept_constraints(), vec![[1, 3]]);
}

#[test]
fn test_kept_constraint_survives_insertions() {
    let mut topo = make_square();
    topo.insert_constrained_edge(1, 3).unwrap();
    for &(x, y) in &[(0.3, 0.35), (0.7, 0.6), (0.2, 0.85), (0.85, 0.1)] {
        topo.add_point(Point2::new(x, y), ()).unwrap();
        assert!(has_edge(&topo, 1, 3));
    }
    assert!(topo.full_check());
}

#[test]
fn test_channel_wrapping_around_a_vertex() {
    // vertex 6 sits just above y = 5 and every triangle around it reaches
    // below, so the upper side of the channel runs 7 -> 6 -> 7
    let mut topo = make_mesh(
        &[
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 10.0],
            [0.0, 10.0],
            [0.0, 5.0],
            [10.0, 5.0],
            [5.0, 5.1],
            [5.0, 8.0],
            [3.0, 4.5],
            [4.0, 3.0],
            [6.2, 2.9],
            [7.1, 4.4],
        ],
        &[
            [0, 1, 10],
            [0, 8, 4],
            [0, 9, 8],
            [0, 10, 9],
            [1, 5, 11],
            [1, 11, 10],
            [2, 3, 7],
            [2, 7, 5],
            [3, 4, 7],
            [4, 8, 7],
            [5, 7, 11],
            [6, 7, 8],
            [6, 11, 7],
            [6, 8, 9],
            [6, 9, 10],
            [6, 10, 11],
        ],
    );
    assert!(topo.full_check());

    topo.insert_constrained_edge(4, 5).unwrap();

    assert!(has_edge(&topo, 4, 5));
    assert_eq!(sorted_constrained(&topo), vec![[4, 5]]);
    assert_eq!(topo.triangle_count(), 16);
    assert!(topo.is_referenced(6));
    assert!(topo.validate().is_ok());
    assert!(topo.full_check());

    // the kept constraint is re-forced around new vertices too
    topo.add_point(Point2::new(5.0, 4.9), ()).unwrap();
    assert!(has_edge(&topo, 4, 5));
    assert!(topo.full_check());
}

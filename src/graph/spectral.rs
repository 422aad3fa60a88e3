//! Spectral and iterative centrality measures

use crate::error::MeasureError;
use crate::graph::components::is_connected;
use crate::graph::Graph;
use nalgebra::{DMatrix, SymmetricEigen};

/// Sum of absolute component-wise differences
fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Scale a vector to unit L2 norm, leaving a zero vector untouched
fn normalise_l2(values: &mut [f64]) {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in values.iter_mut() {
            *value /= norm;
        }
    }
}

/// Eigenvector centrality by power iteration.
///
/// Iterates on `A + I` rather than `A` so bipartite graphs don't oscillate; the dominant
/// eigenvector is the same. Converged once the L1 change drops below `n * tolerance`.
pub fn eigenvector_centrality(
    graph: &Graph,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>, MeasureError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(MeasureError::EmptyGraph);
    }

    let adjacency = graph.adjacency_lists();
    let mut x = vec![1.0 / n as f64; n];

    for _ in 0..max_iterations {
        let last = x.clone();

        for (v, neighbours) in adjacency.iter().enumerate() {
            for &w in neighbours {
                x[w] += last[v];
            }
        }
        normalise_l2(&mut x);

        if l1_distance(&x, &last) < n as f64 * tolerance {
            return Ok(x);
        }
    }

    Err(MeasureError::NotConverged {
        iterations: max_iterations,
    })
}

/// Katz centrality: `x = alpha * A x + beta`, iterated from zero and L2-normalised on
/// convergence. Diverges when `alpha` exceeds the reciprocal of the largest eigenvalue.
pub fn katz_centrality(
    graph: &Graph,
    alpha: f64,
    beta: f64,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>, MeasureError> {
    let n = graph.node_count();
    if n == 0 {
        return Err(MeasureError::EmptyGraph);
    }

    let adjacency = graph.adjacency_lists();
    let mut x = vec![0.0; n];

    for _ in 0..max_iterations {
        let last = std::mem::replace(&mut x, vec![0.0; n]);

        for (v, neighbours) in adjacency.iter().enumerate() {
            for &w in neighbours {
                x[w] += last[v];
            }
        }
        for value in x.iter_mut() {
            *value = alpha * *value + beta;
        }

        if !x.iter().all(|v| v.is_finite()) {
            break;
        }

        if l1_distance(&x, &last) < n as f64 * tolerance {
            normalise_l2(&mut x);
            return Ok(x);
        }
    }

    Err(MeasureError::NotConverged {
        iterations: max_iterations,
    })
}

/// PageRank with each undirected edge followed both ways.
///
/// Rank held by isolated (dangling) nodes is spread evenly over the whole graph each round.
pub fn pagerank(
    graph: &Graph,
    damping: f64,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Vec<f64>, MeasureError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(vec![]);
    }

    let adjacency = graph.adjacency_lists();
    let uniform = 1.0 / n as f64;
    let mut scores = vec![uniform; n];

    for _ in 0..max_iterations {
        let dangling: f64 = adjacency
            .iter()
            .zip(&scores)
            .filter(|(neighbours, _)| neighbours.is_empty())
            .map(|(_, score)| score)
            .sum();

        let base = (damping * dangling + (1.0 - damping)) * uniform;
        let mut next = vec![base; n];

        for (v, neighbours) in adjacency.iter().enumerate() {
            if neighbours.is_empty() {
                continue;
            }
            let share = damping * scores[v] / neighbours.len() as f64;
            for &w in neighbours {
                next[w] += share;
            }
        }

        let change = l1_distance(&next, &scores);
        scores = next;

        if change < n as f64 * tolerance {
            return Ok(scores);
        }
    }

    Err(MeasureError::NotConverged {
        iterations: max_iterations,
    })
}

/// Eigenvalues of a symmetric matrix in ascending order
/// Largest node count decomposed as a dense matrix; memory is quadratic and time cubic in it
pub const DENSE_LIMIT: usize = 2000;

fn sorted_eigenvalues(matrix: DMatrix<f64>) -> Result<Vec<f64>, MeasureError> {
    let eigen = SymmetricEigen::new(matrix);
    let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();

    if values.iter().any(|v| !v.is_finite()) {
        return Err(MeasureError::Numerical(
            "non-finite eigenvalue in laplacian spectrum".to_string(),
        ));
    }

    values.sort_unstable_by(f64::total_cmp);
    Ok(values)
}

/// Algebraic connectivity: the second-smallest eigenvalue of the Laplacian (Fiedler value).
///
/// Zero for disconnected graphs. Values whose magnitude is under `tolerance` are reported as 0.
pub fn algebraic_connectivity(graph: &Graph, tolerance: f64) -> Result<f64, MeasureError> {
    let n = graph.node_count();
    if n < 2 {
        return Err(MeasureError::TooFewNodes {
            required: 2,
            found: n,
        });
    }

    if !is_connected(graph) {
        return Ok(0.0);
    }

    if n > DENSE_LIMIT {
        return Err(MeasureError::TooLarge {
            limit: DENSE_LIMIT,
            found: n,
        });
    }

    let values = sorted_eigenvalues(graph.laplacian_matrix())?;
    let fiedler = values[1];

    Ok(if fiedler.abs() < tolerance { 0.0 } else { fiedler })
}

#[cfg(test)]
mod tests {
    use crate::graph::builder::{from_edges, GraphBuilder};

    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], eps: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < eps, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn eigenvector_single_edge() {
        let graph = from_edges(&[(0, 1)]);
        let centrality = eigenvector_centrality(&graph, 100, 1e-6).unwrap();

        assert_close(&centrality, &[0.5f64.sqrt(), 0.5f64.sqrt()], 1e-9);
    }

    #[test]
    fn eigenvector_star() {
        let star = from_edges(&[(0, 1), (0, 2), (0, 3)]);
        let centrality = eigenvector_centrality(&star, 100, 1e-6).unwrap();

        let leaf = 1.0 / 6.0f64.sqrt();
        assert_close(&centrality, &[0.5f64.sqrt(), leaf, leaf, leaf], 1e-4);
    }

    #[test]
    fn eigenvector_iteration_cap() {
        let path = from_edges(&[(0, 1), (1, 2)]);

        assert_eq!(
            eigenvector_centrality(&path, 1, 1e-6),
            Err(MeasureError::NotConverged { iterations: 1 })
        );
    }

    #[test]
    fn eigenvector_empty() {
        let graph = GraphBuilder::with_nodes(0).build();
        assert_eq!(
            eigenvector_centrality(&graph, 100, 1e-6),
            Err(MeasureError::EmptyGraph)
        );
    }

    #[test]
    fn katz_triangle() {
        let triangle = from_edges(&[(0, 1), (1, 2), (2, 0)]);
        let centrality = katz_centrality(&triangle, 0.005, 1.0, 5000, 1e-6).unwrap();

        let even = 1.0 / 3.0f64.sqrt();
        assert_close(&centrality, &[even, even, even], 1e-9);
    }

    #[test]
    fn katz_hub_ranks_highest() {
        let star = from_edges(&[(0, 1), (0, 2), (0, 3)]);
        let centrality = katz_centrality(&star, 0.005, 1.0, 5000, 1e-6).unwrap();

        assert!(centrality[0] > centrality[1]);
        assert_close(&centrality[1..], &[centrality[1]; 3], 1e-12);
    }

    #[test]
    fn katz_diverges_with_large_attenuation() {
        let triangle = from_edges(&[(0, 1), (1, 2), (2, 0)]);

        assert_eq!(
            katz_centrality(&triangle, 1.0, 1.0, 50, 1e-6),
            Err(MeasureError::NotConverged { iterations: 50 })
        );
    }

    #[test]
    fn pagerank_is_a_distribution() {
        let mut builder = GraphBuilder::with_nodes(4);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        let graph = builder.build();

        let ranks = pagerank(&graph, 0.85, 100, 1e-6).unwrap();

        assert!((ranks.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        assert!(ranks[1] > ranks[0]);
        assert!((ranks[0] - ranks[2]).abs() < 1e-9);
    }

    #[test]
    fn pagerank_regular_graph_is_uniform() {
        let triangle = from_edges(&[(0, 1), (1, 2), (2, 0)]);
        let ranks = pagerank(&triangle, 0.85, 100, 1e-6).unwrap();

        assert_close(&ranks, &[1.0 / 3.0; 3], 1e-9);
    }

    #[test]
    fn algebraic_connectivity_path() {
        let path = from_edges(&[(0, 1), (1, 2), (2, 3)]);
        let value = algebraic_connectivity(&path, 1e-8).unwrap();

        assert!((value - (2.0 - 2.0f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn algebraic_connectivity_edge_cases() {
        assert_eq!(
            algebraic_connectivity(&GraphBuilder::with_nodes(1).build(), 1e-8),
            Err(MeasureError::TooFewNodes {
                required: 2,
                found: 1
            })
        );

        let split = from_edges(&[(0, 1), (2, 3)]);
        assert_eq!(algebraic_connectivity(&split, 1e-8), Ok(0.0));

        let edge = from_edges(&[(0, 1)]);
        assert!((algebraic_connectivity(&edge, 1e-8).unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn algebraic_connectivity_refuses_large_graphs() {
        let n = DENSE_LIMIT as u32 + 1;
        let edges: Vec<(u32, u32)> = (1..n).map(|i| (i - 1, i)).collect();
        let path = from_edges(&edges);

        assert_eq!(
            algebraic_connectivity(&path, 1e-8),
            Err(MeasureError::TooLarge {
                limit: DENSE_LIMIT,
                found: DENSE_LIMIT + 1
            })
        );

        // Disconnected graphs are answered without a decomposition.
        let split = GraphBuilder::with_nodes(DENSE_LIMIT + 1).build();
        assert_eq!(algebraic_connectivity(&split, 1e-8), Ok(0.0));
    }
}

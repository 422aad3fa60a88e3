//! Measure catalogs: the fixed set of centrality and connectivity measures

use crate::error::MeasureError;
use crate::graph::{algorithms, flow, spectral, Graph};
use crate::metrics::{MeasureClass, MeasureKind, RawMeasure};
use std::collections::BTreeSet;
use std::fmt;

/// Signature of a measure operation
pub type Operation = fn(&Graph, &Parameters) -> Result<RawMeasure, MeasureError>;

/// Numeric parameters passed to every operation; each measure reads the ones it needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// PageRank damping factor
    pub damping: f64,

    /// Katz attenuation factor
    pub alpha: f64,

    /// Katz baseline weight
    pub beta: f64,

    /// Convergence tolerance for iterative methods, zero threshold for eigenvalues
    pub tolerance: f64,

    /// Iteration cap for iterative methods
    pub max_iterations: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            damping: 0.85,
            alpha: 0.1,
            beta: 1.0,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// A named measure with its declared kind and parameters
#[derive(Clone)]
pub struct Measure {
    pub label: &'static str,
    pub kind: MeasureKind,
    pub parameters: Parameters,
    pub operation: Operation,
}

impl Measure {
    pub fn new(label: &'static str, kind: MeasureKind, operation: Operation) -> Self {
        Self {
            label,
            kind,
            parameters: Parameters::default(),
            operation,
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Measure")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Ordered list of measures sharing a class
#[derive(Debug, Clone)]
pub struct Catalog {
    pub class: MeasureClass,
    measures: Vec<Measure>,
}

impl Catalog {
    pub fn new(class: MeasureClass, measures: Vec<Measure>) -> Self {
        Self { class, measures }
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.measures.iter().map(|m| m.label).collect()
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}

fn per_node(graph: &Graph, values: Vec<f64>) -> RawMeasure {
    RawMeasure::PerNode(graph.labels().into_iter().zip(values).collect())
}

fn node_set(graph: &Graph, nodes: BTreeSet<usize>) -> RawMeasure {
    RawMeasure::Nodes(nodes.into_iter().map(|node| graph.label(node)).collect())
}

fn edge_set(graph: &Graph, edges: BTreeSet<(usize, usize)>) -> RawMeasure {
    RawMeasure::Edges(
        edges
            .into_iter()
            .map(|(a, b)| {
                let (a, b) = (graph.label(a), graph.label(b));
                (a.min(b), a.max(b))
            })
            .collect(),
    )
}

fn degree(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(per_node(graph, algorithms::degree_centrality(graph)))
}

fn closeness(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(per_node(graph, algorithms::closeness_centrality(graph)))
}

fn betweenness(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(per_node(graph, algorithms::betweenness_centrality(graph)))
}

fn eigenvector(graph: &Graph, p: &Parameters) -> Result<RawMeasure, MeasureError> {
    let values = spectral::eigenvector_centrality(graph, p.max_iterations, p.tolerance)?;
    Ok(per_node(graph, values))
}

fn katz(graph: &Graph, p: &Parameters) -> Result<RawMeasure, MeasureError> {
    let values =
        spectral::katz_centrality(graph, p.alpha, p.beta, p.max_iterations, p.tolerance)?;
    Ok(per_node(graph, values))
}

fn pagerank(graph: &Graph, p: &Parameters) -> Result<RawMeasure, MeasureError> {
    let values = spectral::pagerank(graph, p.damping, p.max_iterations, p.tolerance)?;
    Ok(per_node(graph, values))
}

fn node_connectivity(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(RawMeasure::Value(flow::node_connectivity(graph)? as f64))
}

fn edge_connectivity(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(RawMeasure::Value(flow::edge_connectivity(graph)? as f64))
}

fn algebraic_connectivity(graph: &Graph, p: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(RawMeasure::Value(spectral::algebraic_connectivity(
        graph,
        p.tolerance,
    )?))
}

fn density(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(RawMeasure::Value(algorithms::density(graph)))
}

fn average_clustering(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(RawMeasure::Value(algorithms::average_clustering(graph)?))
}

fn clustering(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(per_node(graph, algorithms::clustering(graph)))
}

fn minimum_node_cut(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(node_set(graph, flow::minimum_node_cut(graph)?))
}

fn minimum_edge_cut(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(edge_set(graph, flow::minimum_edge_cut(graph)?))
}

fn articulation_points(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    Ok(node_set(graph, algorithms::articulation_points(graph)))
}

fn biconnected_components(graph: &Graph, _: &Parameters) -> Result<RawMeasure, MeasureError> {
    let mut blocks: Vec<BTreeSet<u32>> = algorithms::biconnected_components(graph)
        .into_iter()
        .map(|block| block.into_iter().map(|node| graph.label(node)).collect())
        .collect();
    blocks.sort();

    Ok(RawMeasure::Blocks(blocks))
}

/// Node importance measures, all per-node
pub fn centrality_catalog() -> Catalog {
    use MeasureKind::PerNode;

    let defaults = Parameters::default();

    Catalog::new(
        MeasureClass::Centrality,
        vec![
            Measure::new("Degree", PerNode, degree),
            Measure::new("Closeness", PerNode, closeness),
            Measure::new("Betweenness", PerNode, betweenness),
            Measure::new("Eigenvector", PerNode, eigenvector),
            Measure::new("Katz", PerNode, katz).with_parameters(Parameters {
                alpha: 0.005,
                beta: 1.0,
                max_iterations: 5000,
                ..defaults
            }),
            Measure::new("PageRank", PerNode, pagerank),
        ],
    )
}

/// Robustness and cohesion measures
pub fn connectivity_catalog() -> Catalog {
    use MeasureKind::{PerNode, Scalar};

    Catalog::new(
        MeasureClass::Connectivity,
        vec![
            Measure::new("NodeConnectivity", Scalar, node_connectivity),
            Measure::new("EdgeConnectivity", Scalar, edge_connectivity),
            Measure::new("AlgebraicConnectivity", Scalar, algebraic_connectivity)
                .with_parameters(Parameters {
                    tolerance: 1e-8,
                    ..Parameters::default()
                }),
            Measure::new("Density", Scalar, density),
            Measure::new("AverageClustering", Scalar, average_clustering),
            Measure::new("Clustering", PerNode, clustering),
            Measure::new("MinimumNodeCut", Scalar, minimum_node_cut),
            Measure::new("MinimumEdgeCut", Scalar, minimum_edge_cut),
            Measure::new("ArticulationPoints", Scalar, articulation_points),
            Measure::new("BiconnectedComponents", Scalar, biconnected_components),
        ],
    )
}

#[cfg(test)]
mod tests {
    use crate::graph::builder::from_edges;

    use super::*;

    #[test]
    fn centrality_labels() {
        let catalog = centrality_catalog();

        assert_eq!(catalog.class, MeasureClass::Centrality);
        assert_eq!(
            catalog.labels(),
            vec!["Degree", "Closeness", "Betweenness", "Eigenvector", "Katz", "PageRank"]
        );
        assert!(catalog
            .measures()
            .iter()
            .all(|m| m.kind == MeasureKind::PerNode));
    }

    #[test]
    fn connectivity_labels() {
        let catalog = connectivity_catalog();

        assert_eq!(catalog.class, MeasureClass::Connectivity);
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.measures()[5].label, "Clustering");
        assert_eq!(catalog.measures()[5].kind, MeasureKind::PerNode);
    }

    #[test]
    fn katz_parameters() {
        let catalog = centrality_catalog();
        let katz = &catalog.measures()[4];

        assert_eq!(katz.label, "Katz");
        assert_eq!(katz.parameters.alpha, 0.005);
        assert_eq!(katz.parameters.max_iterations, 5000);
        assert_eq!(catalog.measures()[5].parameters.damping, 0.85);
    }

    #[test]
    fn per_node_results_keyed_by_label() {
        let graph = from_edges(&[(10, 20), (20, 30)]);
        let raw = degree(&graph, &Parameters::default()).unwrap();

        match raw {
            RawMeasure::PerNode(values) => {
                assert_eq!(values.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
                assert_eq!(values[&20], 1.0);
                assert_eq!(values[&10], 0.5);
            }
            other => panic!("expected per-node values, got {other:?}"),
        }
    }

    #[test]
    fn cut_sets_use_labels() {
        let graph = from_edges(&[(7, 8), (8, 9)]);
        let parameters = Parameters::default();

        assert_eq!(
            articulation_points(&graph, &parameters).unwrap(),
            RawMeasure::Nodes(BTreeSet::from([8]))
        );
        match minimum_edge_cut(&graph, &parameters).unwrap() {
            RawMeasure::Edges(edges) => {
                assert_eq!(edges.len(), 1);
                assert!(edges.iter().all(|&(a, b)| a < b && (7..=9).contains(&a)));
            }
            other => panic!("expected an edge set, got {other:?}"),
        }
    }

    #[test]
    fn blocks_use_labels() {
        // Triangle 1-2-3, bridge 3-4, triangle 4-5-6.
        let graph = from_edges(&[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 6), (6, 4)]);
        let parameters = Parameters::default();

        assert_eq!(
            biconnected_components(&graph, &parameters).unwrap(),
            RawMeasure::Blocks(vec![
                BTreeSet::from([1, 2, 3]),
                BTreeSet::from([3, 4]),
                BTreeSet::from([4, 5, 6]),
            ])
        );
        assert_eq!(
            articulation_points(&graph, &parameters).unwrap(),
            RawMeasure::Nodes(BTreeSet::from([3, 4]))
        );
    }

    #[test]
    fn blocks_sorted_by_label() {
        // Labels run against index order: node 9 is index 0.
        let graph = from_edges(&[(9, 8), (8, 1), (1, 2), (2, 8)]);

        assert_eq!(
            biconnected_components(&graph, &Parameters::default()).unwrap(),
            RawMeasure::Blocks(vec![BTreeSet::from([1, 2, 8]), BTreeSet::from([8, 9])])
        );
    }
}

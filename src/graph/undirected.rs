//! Undirected simple graph representation

use nalgebra::DMatrix;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// An undirected simple graph.
///
/// Nodes are addressed by a dense index `0..node_count()`, which is also the row/column order
/// of every matrix built from the graph. Each node carries a `u32` label; decoded graphs are
/// labelled `0..n` and labels survive subgraph induction, so measures report results by label.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: UnGraph<u32, ()>,
}

impl Graph {
    /// Wrap a petgraph graph. Callers guarantee there are no loops or parallel edges.
    pub(crate) fn from_inner(inner: UnGraph<u32, ()>) -> Self {
        Self { inner }
    }

    /// Underlying petgraph graph
    pub fn as_petgraph(&self) -> &UnGraph<u32, ()> {
        &self.inner
    }

    /// Structural equality, ignoring labels and node order
    pub fn is_isomorphic_to(&self, other: &Graph) -> bool {
        petgraph::algo::is_isomorphic(&self.inner, &other.inner)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Label of the node at `node`
    pub fn label(&self, node: usize) -> u32 {
        self.inner[NodeIndex::new(node)]
    }

    /// Node labels in index order
    pub fn labels(&self) -> Vec<u32> {
        self.inner.node_indices().map(|idx| self.inner[idx]).collect()
    }

    /// Neighbours of a node, by index
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.inner.neighbors(NodeIndex::new(node)).map(|idx| idx.index())
    }

    /// Degree of a node
    pub fn degree(&self, node: usize) -> usize {
        self.inner.neighbors(NodeIndex::new(node)).count()
    }

    /// Check if there's an edge between two nodes
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.inner
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .is_some()
    }

    /// Edges as `(low, high)` index pairs, sorted
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = self
            .inner
            .edge_references()
            .map(|edge| {
                let (a, b) = (edge.source().index(), edge.target().index());
                (a.min(b), a.max(b))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Sorted adjacency lists, one per node index.
    ///
    /// The iterative algorithms walk these instead of the petgraph structure so the visiting
    /// order is fixed by node index.
    pub fn adjacency_lists(&self) -> Vec<Vec<usize>> {
        let mut lists = vec![Vec::new(); self.node_count()];
        for (a, b) in self.edges() {
            lists[a].push(b);
            lists[b].push(a);
        }
        for list in &mut lists {
            list.sort_unstable();
        }
        lists
    }

    /// Subgraph induced by `nodes` (indices). Relative node order and labels are preserved.
    pub fn induced_subgraph(&self, nodes: &[usize]) -> Graph {
        let mut keep = vec![false; self.node_count()];
        for &node in nodes {
            keep[node] = true;
        }

        // Edges with a removed endpoint are dropped by `filter_map` itself.
        let inner = self.inner.filter_map(
            |idx, label| keep[idx.index()].then_some(*label),
            |_, weight| Some(*weight),
        );

        Graph { inner }
    }

    /// Adjacency matrix in node index order
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        // Symmetric: both triangles are written for each edge.
        for (i, j) in self.edges() {
            matrix[(i, j)] = 1.0;
            matrix[(j, i)] = 1.0;
        }

        matrix
    }

    /// Diagonal degree matrix
    pub fn degree_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            matrix[(i, i)] = self.degree(i) as f64;
        }
        matrix
    }

    /// Laplacian matrix `D - A`
    pub fn laplacian_matrix(&self) -> DMatrix<f64> {
        self.degree_matrix() - self.adjacency_matrix()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use crate::graph::GraphBuilder;

    use super::*;

    fn path(labels: &[u32]) -> Graph {
        let mut builder = GraphBuilder::with_capacity(labels.len());
        for pair in labels.windows(2) {
            builder.add_edge(pair[0], pair[1]);
        }
        builder.build()
    }

    #[test]
    fn counts() {
        let graph = path(&[0, 1, 2]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.is_empty());
        assert!(Graph::default().is_empty());
    }

    #[test]
    fn has_edge_is_symmetric() {
        let graph = path(&[0, 1, 2]);

        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn adjacency_lists() {
        let graph = path(&[0, 1, 2]);

        assert_eq!(graph.adjacency_lists(), vec![vec![1], vec![0, 2], vec![1]]);
    }

    #[test]
    fn induced_subgraph_keeps_labels() {
        let graph = path(&[10, 20, 30, 40]);
        let sub = graph.induced_subgraph(&[1, 2, 3]);

        assert_eq!(sub.labels(), vec![20, 30, 40]);
        assert_eq!(sub.edge_count(), 2);
        assert_eq!(sub.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn adjacency_matrix() {
        assert_eq!(Graph::default().adjacency_matrix(), DMatrix::<f64>::zeros(0, 0));

        let graph = path(&[0, 1, 2]);
        assert_eq!(
            graph.adjacency_matrix(),
            dmatrix![0.0, 1.0, 0.0;
                     1.0, 0.0, 1.0;
                     0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn laplacian_matrix() {
        let graph = path(&[0, 1, 2]);
        assert_eq!(
            graph.laplacian_matrix(),
            dmatrix![1.0, -1.0, 0.0;
                     -1.0, 2.0, -1.0;
                     0.0, -1.0, 1.0]
        );
    }
}

//! Graph construction module

use crate::graph::Graph;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeSet, HashMap};

/// Builder for incrementally constructing a simple undirected [`Graph`]
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from node labels to node indices
    label_to_index: HashMap<u32, usize>,

    /// Node labels in insertion order
    labels: Vec<u32>,

    /// Neighbour sets for each node; a set collapses repeated edges
    adjacency: Vec<BTreeSet<usize>>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            label_to_index: HashMap::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
        }
    }

    /// Create a builder holding `n` isolated nodes labelled `0..n`
    pub fn with_nodes(n: usize) -> Self {
        let mut builder = Self::with_capacity(n);
        for label in 0..n as u32 {
            builder.get_or_create_node(label);
        }
        builder
    }

    /// Get or create the node index for the given label
    pub fn get_or_create_node(&mut self, label: u32) -> usize {
        if let Some(&idx) = self.label_to_index.get(&label) {
            return idx;
        }

        let idx = self.node_count;
        self.label_to_index.insert(label, idx);
        self.labels.push(label);
        self.adjacency.push(BTreeSet::new());
        self.node_count += 1;

        idx
    }

    /// Add an undirected edge between two labels, creating the nodes as needed.
    ///
    /// Returns `false` for self-loops and for edges already present; neither changes the graph.
    pub fn add_edge(&mut self, a: u32, b: u32) -> bool {
        let a_idx = self.get_or_create_node(a);
        let b_idx = self.get_or_create_node(b);

        if a_idx == b_idx {
            return false;
        }

        let inserted = self.adjacency[a_idx].insert(b_idx);
        self.adjacency[b_idx].insert(a_idx);
        inserted
    }

    /// Number of nodes added so far
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Build the graph
    pub fn build(self) -> Graph {
        let edge_count: usize = self.adjacency.iter().map(|set| set.len()).sum::<usize>() / 2;
        let mut inner = UnGraph::<u32, ()>::with_capacity(self.node_count, edge_count);

        for label in &self.labels {
            inner.add_node(*label);
        }

        // Each edge is stored from its lower endpoint so it's added exactly once, in a fixed order.
        for (src, neighbours) in self.adjacency.iter().enumerate() {
            for &dst in neighbours.range(src + 1..) {
                inner.add_edge(NodeIndex::new(src), NodeIndex::new(dst), ());
            }
        }

        Graph::from_inner(inner)
    }
}

/// Build a graph from a list of labelled edges
pub fn from_edges(edges: &[(u32, u32)]) -> Graph {
    let mut builder = GraphBuilder::with_capacity(edges.len());
    for &(a, b) in edges {
        builder.add_edge(a, b);
    }
    builder.build()
}

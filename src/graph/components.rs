//! Connected component enumeration

use crate::graph::Graph;
use std::collections::BTreeMap;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<usize>,

    /// Size of each set (for union by size)
    rank: Vec<usize>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression: point everything on the walk at the root
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach the smaller tree under the root of the larger one
        if self.rank[root_x] > self.rank[root_y] {
            self.parent[root_y] = root_x;
            self.rank[root_x] += self.rank[root_y];
        } else {
            self.parent[root_x] = root_y;
            self.rank[root_y] += self.rank[root_x];
        }
    }
}

/// Maximal connected node sets, as sorted index lists.
///
/// Components are ordered by their smallest node index.
pub fn connected_components(graph: &Graph) -> Vec<Vec<usize>> {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for (a, b) in graph.edges() {
        sets.union(a, b);
    }

    // Keyed by the first member seen, which is the smallest index since nodes are visited in order
    let mut first_member: BTreeMap<usize, usize> = BTreeMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();

    for node in 0..node_count {
        let root = sets.find(node);
        let slot = *first_member.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(node);
    }

    components
}

/// Check if every node is reachable from every other one. Empty graphs aren't connected.
pub fn is_connected(graph: &Graph) -> bool {
    graph.node_count() > 0 && connected_components(graph).len() == 1
}

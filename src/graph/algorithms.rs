//! Shortest-path and structural graph algorithms
//!
//! Per-node results are returned as vectors indexed by node index.

use crate::error::MeasureError;
use crate::graph::Graph;
use std::collections::{BTreeSet, VecDeque};

/// Hop distances from `source`; `None` marks unreachable nodes
pub fn bfs_distances(adjacency: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();

    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let next = distances[current].map(|d| d + 1);
        for &neighbour in &adjacency[current] {
            if distances[neighbour].is_none() {
                distances[neighbour] = next;
                queue.push_back(neighbour);
            }
        }
    }

    distances
}

/// Longest shortest path in a connected graph
pub fn diameter(graph: &Graph) -> Result<usize, MeasureError> {
    if graph.is_empty() {
        return Err(MeasureError::EmptyGraph);
    }

    let adjacency = graph.adjacency_lists();
    let mut diameter = 0;

    for source in 0..adjacency.len() {
        for distance in bfs_distances(&adjacency, source) {
            match distance {
                Some(d) => diameter = diameter.max(d),
                None => return Err(MeasureError::Disconnected),
            }
        }
    }

    Ok(diameter)
}

/// Degree divided by `n - 1`. A single node gets 1.
pub fn degree_centrality(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![1.0; n];
    }

    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|node| graph.degree(node) as f64 * scale).collect()
}

/// Closeness centrality with the Wasserman-Faust correction, so nodes in small components
/// aren't rated above nodes in large ones.
pub fn closeness_centrality(graph: &Graph) -> Vec<f64> {
    let adjacency = graph.adjacency_lists();
    let n = adjacency.len();

    (0..n)
        .map(|node| {
            let distances = bfs_distances(&adjacency, node);
            let reached: Vec<usize> = distances.into_iter().flatten().collect();
            let total: usize = reached.iter().sum();

            if total == 0 || n <= 1 {
                return 0.0;
            }

            let reachable = (reached.len() - 1) as f64;
            (reachable / total as f64) * (reachable / (n - 1) as f64)
        })
        .collect()
}

/// Brandes' single-source accumulation step, "Algorithm 1: Betweenness centrality in
/// unweighted graphs" from "A Faster Algorithm for Betweenness Centrality".
fn betweenness_for_node(index: usize, adjacency: &[Vec<usize>], betweenness: &mut [f64]) {
    let num_nodes = adjacency.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<Option<usize>> = vec![None; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = Some(0);
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let next = distance[v].map(|d| d + 1);

        for &w in &adjacency[v] {
            if distance[w].is_none() {
                distance[w] = next;
                queue.push_back(w);
            }
            if distance[w] == next {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness[w] += delta[w];
        }
    }
}

/// Betweenness centrality normalised by `(n - 1)(n - 2)`.
///
/// Every unordered pair is visited from both ends, which the normalisation accounts for. Graphs
/// with two nodes or fewer are left unscaled (all zeros).
pub fn betweenness_centrality(graph: &Graph) -> Vec<f64> {
    let adjacency = graph.adjacency_lists();
    let n = adjacency.len();
    let mut betweenness = vec![0.0; n];

    for source in 0..n {
        betweenness_for_node(source, &adjacency, &mut betweenness);
    }

    if n > 2 {
        let divisor = ((n - 1) * (n - 2)) as f64;
        for value in &mut betweenness {
            *value /= divisor;
        }
    }

    betweenness
}

/// Local clustering coefficient: closed triangles over possible triangles at each node
pub fn clustering(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();

    (0..n)
        .map(|node| {
            let neighbours: Vec<usize> = graph.neighbors(node).collect();
            let degree = neighbours.len();
            if degree < 2 {
                return 0.0;
            }

            let mut links = 0;
            for (i, &a) in neighbours.iter().enumerate() {
                for &b in &neighbours[i + 1..] {
                    if graph.has_edge(a, b) {
                        links += 1;
                    }
                }
            }

            2.0 * links as f64 / (degree * (degree - 1)) as f64
        })
        .collect()
}

/// Mean local clustering coefficient, zeros included
pub fn average_clustering(graph: &Graph) -> Result<f64, MeasureError> {
    if graph.is_empty() {
        return Err(MeasureError::EmptyGraph);
    }

    let coefficients = clustering(graph);
    Ok(coefficients.iter().sum::<f64>() / coefficients.len() as f64)
}

/// Edges present over edges possible. 0 for fewer than two nodes.
pub fn density(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n <= 1 {
        return 0.0;
    }

    let possible = (n * (n - 1)) as f64 / 2.0;
    graph.edge_count() as f64 / possible
}

/// Cut vertices and biconnected components found in one depth-first pass
struct BlockDecomposition {
    cut_vertices: BTreeSet<usize>,
    blocks: Vec<BTreeSet<usize>>,
}

/// Iterative Tarjan. Edges are stacked as they are explored; when a child's low point
/// doesn't reach above its parent, the edges down to the tree edge form one block.
fn decompose(graph: &Graph) -> BlockDecomposition {
    let adjacency = graph.adjacency_lists();
    let n = adjacency.len();

    let mut discovery: Vec<Option<usize>> = vec![None; n];
    let mut low: Vec<usize> = vec![0; n];
    let mut cut_vertices = BTreeSet::new();
    let mut blocks = Vec::new();
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut time = 0;

    for root in 0..n {
        if discovery[root].is_some() {
            continue;
        }

        discovery[root] = Some(time);
        low[root] = time;
        time += 1;
        let mut root_children = 0;

        // (node, parent, position in the node's adjacency list)
        let mut stack: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];

        while let Some(top) = stack.last_mut() {
            let (v, parent) = (top.0, top.1);

            if let Some(&w) = adjacency[v].get(top.2) {
                top.2 += 1;

                match discovery[w] {
                    None => {
                        discovery[w] = Some(time);
                        low[w] = time;
                        time += 1;
                        if v == root {
                            root_children += 1;
                        }
                        edges.push((v, w));
                        stack.push((w, Some(v), 0));
                    }
                    Some(disc) if Some(w) != parent => {
                        // Back edges are stacked once, from the deeper end.
                        if discovery[v].is_some_and(|own| disc < own) {
                            edges.push((v, w));
                        }
                        low[v] = low[v].min(disc);
                    }
                    Some(_) => {}
                }
            } else {
                stack.pop();
                if let Some(&(p, _, _)) = stack.last() {
                    low[p] = low[p].min(low[v]);
                    if discovery[p].is_some_and(|disc| low[v] >= disc) {
                        if p != root {
                            cut_vertices.insert(p);
                        }

                        let mut block = BTreeSet::new();
                        while let Some((a, b)) = edges.pop() {
                            block.insert(a);
                            block.insert(b);
                            if (a, b) == (p, v) {
                                break;
                            }
                        }
                        blocks.push(block);
                    }
                }
            }
        }

        if root_children > 1 {
            cut_vertices.insert(root);
        }
    }

    blocks.sort();

    BlockDecomposition {
        cut_vertices,
        blocks,
    }
}

/// Nodes whose removal increases the number of connected components
pub fn articulation_points(graph: &Graph) -> BTreeSet<usize> {
    decompose(graph).cut_vertices
}

/// Node sets of the maximal biconnected subgraphs, sorted.
///
/// Every edge lies in exactly one block and blocks overlap only at articulation points.
/// Isolated nodes belong to no block.
pub fn biconnected_components(graph: &Graph) -> Vec<BTreeSet<usize>> {
    decompose(graph).blocks
}

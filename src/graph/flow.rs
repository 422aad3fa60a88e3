//! Max-flow based connectivity: node/edge connectivity and minimum cuts

use crate::error::MeasureError;
use crate::graph::components::is_connected;
use crate::graph::Graph;
use itertools::Itertools;
use std::collections::{BTreeSet, VecDeque};

/// Residual network with paired arcs: arc `i ^ 1` is the reverse of arc `i`
struct FlowNetwork {
    /// Outgoing arc ids per node
    heads: Vec<Vec<usize>>,
    /// Arc heads
    to: Vec<usize>,
    /// Remaining capacity per arc
    capacity: Vec<usize>,
}

impl FlowNetwork {
    fn new(node_count: usize) -> Self {
        Self {
            heads: vec![Vec::new(); node_count],
            to: Vec::new(),
            capacity: Vec::new(),
        }
    }

    fn add_arc(&mut self, from: usize, to: usize, capacity: usize) {
        self.heads[from].push(self.to.len());
        self.to.push(to);
        self.capacity.push(capacity);

        self.heads[to].push(self.to.len());
        self.to.push(from);
        self.capacity.push(0);
    }

    /// Edmonds-Karp: augment along shortest residual paths until none is left
    fn max_flow(&mut self, source: usize, sink: usize) -> usize {
        let mut total = 0;

        loop {
            let via = self.residual_search(source);
            if !via.reached[sink] {
                return total;
            }

            let mut bottleneck = usize::MAX;
            let mut node = sink;
            while let Some(arc) = via.arc[node] {
                bottleneck = bottleneck.min(self.capacity[arc]);
                node = self.to[arc ^ 1];
            }

            let mut node = sink;
            while let Some(arc) = via.arc[node] {
                self.capacity[arc] -= bottleneck;
                self.capacity[arc ^ 1] += bottleneck;
                node = self.to[arc ^ 1];
            }

            total += bottleneck;
        }
    }

    /// BFS over arcs with spare capacity
    fn residual_search(&self, source: usize) -> Search {
        let n = self.heads.len();
        let mut search = Search {
            reached: vec![false; n],
            arc: vec![None; n],
        };
        let mut queue = VecDeque::new();

        search.reached[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &arc in &self.heads[u] {
                let v = self.to[arc];
                if !search.reached[v] && self.capacity[arc] > 0 {
                    search.reached[v] = true;
                    search.arc[v] = Some(arc);
                    queue.push_back(v);
                }
            }
        }

        search
    }
}

struct Search {
    reached: Vec<bool>,
    /// Arc used to first reach each node
    arc: Vec<Option<usize>>,
}

/// Node-split network: node `v` becomes `2v` (in) -> `2v + 1` (out) with capacity 1
fn split_network(graph: &Graph) -> FlowNetwork {
    let n = graph.node_count();
    let mut network = FlowNetwork::new(2 * n);

    for v in 0..n {
        network.add_arc(2 * v, 2 * v + 1, 1);
    }
    // Edge arcs can't be cut, any capacity above n works
    for (a, b) in graph.edges() {
        network.add_arc(2 * a + 1, 2 * b, n + 1);
        network.add_arc(2 * b + 1, 2 * a, n + 1);
    }

    network
}

/// Both directions of every edge with capacity 1
fn edge_network(graph: &Graph) -> FlowNetwork {
    let mut network = FlowNetwork::new(graph.node_count());
    for (a, b) in graph.edges() {
        network.add_arc(a, b, 1);
        network.add_arc(b, a, 1);
    }
    network
}

/// Smallest node set separating two non-adjacent nodes
fn minimum_st_node_cut(graph: &Graph, s: usize, t: usize) -> BTreeSet<usize> {
    let mut network = split_network(graph);
    network.max_flow(2 * s + 1, 2 * t);

    let reached = network.residual_search(2 * s + 1).reached;
    (0..graph.node_count())
        .filter(|&v| reached[2 * v] && !reached[2 * v + 1])
        .collect()
}

fn local_node_connectivity(graph: &Graph, s: usize, t: usize) -> usize {
    split_network(graph).max_flow(2 * s + 1, 2 * t)
}

/// Smallest edge set separating two nodes, as `(low, high)` index pairs
fn minimum_st_edge_cut(graph: &Graph, s: usize, t: usize) -> BTreeSet<(usize, usize)> {
    let mut network = edge_network(graph);
    network.max_flow(s, t);

    let reached = network.residual_search(s).reached;
    graph
        .edges()
        .into_iter()
        .filter(|&(a, b)| reached[a] != reached[b])
        .collect()
}

fn local_edge_connectivity(graph: &Graph, s: usize, t: usize) -> usize {
    edge_network(graph).max_flow(s, t)
}

/// First node of minimum degree
fn min_degree_node(graph: &Graph) -> usize {
    (0..graph.node_count())
        .min_by_key(|&v| graph.degree(v))
        .unwrap_or_default()
}

/// Pairs that any minimum node cut must separate at least one of (Even's argument): the
/// minimum-degree node `v` against each of its non-neighbours, and non-adjacent neighbour
/// pairs of `v`.
fn separation_candidates(graph: &Graph, v: usize) -> Vec<(usize, usize)> {
    let neighbours: BTreeSet<usize> = graph.neighbors(v).collect();

    let mut pairs: Vec<(usize, usize)> = (0..graph.node_count())
        .filter(|&w| w != v && !neighbours.contains(&w))
        .map(|w| (v, w))
        .collect();

    pairs.extend(
        neighbours
            .iter()
            .copied()
            .tuple_combinations()
            .filter(|&(x, y)| !graph.has_edge(x, y)),
    );

    pairs
}

/// Minimum number of nodes whose removal disconnects the graph.
///
/// 0 for disconnected graphs; `n - 1` for complete graphs.
pub fn node_connectivity(graph: &Graph) -> Result<usize, MeasureError> {
    if graph.is_empty() {
        return Err(MeasureError::EmptyGraph);
    }
    if !is_connected(graph) {
        return Ok(0);
    }

    let v = min_degree_node(graph);
    let connectivity = separation_candidates(graph, v)
        .into_iter()
        .map(|(s, t)| local_node_connectivity(graph, s, t))
        .fold(graph.degree(v), usize::min);

    Ok(connectivity)
}

/// Minimum number of edges whose removal disconnects the graph. 0 for disconnected graphs.
pub fn edge_connectivity(graph: &Graph) -> Result<usize, MeasureError> {
    if graph.is_empty() {
        return Err(MeasureError::EmptyGraph);
    }
    if !is_connected(graph) {
        return Ok(0);
    }

    // Any global minimum cut separates node 0 from some other node.
    let v = min_degree_node(graph);
    let connectivity = (1..graph.node_count())
        .map(|t| local_edge_connectivity(graph, 0, t))
        .fold(graph.degree(v), usize::min);

    Ok(connectivity)
}

/// A minimum set of nodes whose removal disconnects the graph.
///
/// Starts from the neighbourhood of a minimum-degree node, so a complete graph reports that
/// neighbourhood even though removing it leaves a single node rather than two parts.
pub fn minimum_node_cut(graph: &Graph) -> Result<BTreeSet<usize>, MeasureError> {
    if graph.is_empty() {
        return Err(MeasureError::EmptyGraph);
    }
    if !is_connected(graph) {
        return Err(MeasureError::Disconnected);
    }

    let v = min_degree_node(graph);
    let mut best: BTreeSet<usize> = graph.neighbors(v).collect();

    for (s, t) in separation_candidates(graph, v) {
        let cut = minimum_st_node_cut(graph, s, t);
        if cut.len() <= best.len() {
            best = cut;
        }
    }

    Ok(best)
}

/// A minimum set of edges whose removal disconnects the graph, as `(low, high)` index pairs
pub fn minimum_edge_cut(graph: &Graph) -> Result<BTreeSet<(usize, usize)>, MeasureError> {
    if graph.is_empty() {
        return Err(MeasureError::EmptyGraph);
    }
    if !is_connected(graph) {
        return Err(MeasureError::Disconnected);
    }

    let v = min_degree_node(graph);
    let mut best: BTreeSet<(usize, usize)> =
        graph.neighbors(v).map(|w| (v.min(w), v.max(w))).collect();

    for t in 1..graph.node_count() {
        let cut = minimum_st_edge_cut(graph, 0, t);
        if cut.len() < best.len() {
            best = cut;
        }
    }

    Ok(best)
}

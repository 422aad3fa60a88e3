//! Flattens per-graph measure reports into tabular records

use crate::graph::Graph;
use crate::metrics::{ConnectivityFacts, MeasureReport, MeasureResult};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Value of one record field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Count(usize),
    Real(f64),
    Nodes(Vec<u32>),
    Edges(Vec<(u32, u32)>),
    Blocks(Vec<Vec<u32>>),
}

impl FieldValue {
    pub fn as_real(&self) -> Option<f64> {
        match self {
            FieldValue::Real(value) => Some(*value),
            FieldValue::Count(value) => Some(*value as f64),
            _ => None,
        }
    }
}

/// Flat record for one graph. Fields keep the order they were added in, and a measure that
/// failed simply has no fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphRecord {
    pub file: String,
    pub graph_index: usize,
    pub node_count: usize,
    pub edge_count: usize,
    fields: Vec<(String, FieldValue)>,
}

impl GraphRecord {
    pub fn new(file: &str, graph_index: usize, graph: &Graph) -> Self {
        Self {
            file: file.to_string(),
            graph_index,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            fields: Vec::new(),
        }
    }

    fn insert(&mut self, key: String, value: FieldValue) {
        self.fields.push((key, value));
    }

    /// Add every successful result of a report under its class prefix
    pub fn add_report(&mut self, report: &MeasureReport) {
        let prefix = report.class.prefix();

        for (label, result) in &report.results {
            match result {
                MeasureResult::Distribution(summary) => {
                    for (statistic, value) in summary.fields() {
                        self.insert(
                            format!("{prefix}_{label}_{statistic}"),
                            FieldValue::Real(value),
                        );
                    }
                }
                MeasureResult::Scalar(value) => {
                    self.insert(format!("{prefix}_{label}"), FieldValue::Real(*value))
                }
                MeasureResult::Nodes(nodes) => self.insert(
                    format!("{prefix}_{label}"),
                    FieldValue::Nodes(nodes.iter().copied().collect()),
                ),
                MeasureResult::Edges(edges) => self.insert(
                    format!("{prefix}_{label}"),
                    FieldValue::Edges(edges.iter().copied().collect()),
                ),
                MeasureResult::Blocks(blocks) => self.insert(
                    format!("{prefix}_{label}"),
                    FieldValue::Blocks(
                        blocks
                            .iter()
                            .map(|block| block.iter().copied().collect())
                            .collect(),
                    ),
                ),
            }
        }
    }

    pub fn add_facts(&mut self, facts: &ConnectivityFacts) {
        for (name, value) in facts.fields() {
            self.insert(name.to_string(), FieldValue::Count(value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Measure and fact fields, excluding the identifying columns
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for GraphRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 4))?;
        map.serialize_entry("file", &self.file)?;
        map.serialize_entry("graph_index", &self.graph_index)?;
        map.serialize_entry("node_count", &self.node_count)?;
        map.serialize_entry("edge_count", &self.edge_count)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered collection of graph records; serializes as a JSON array
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<GraphRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GraphRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraphRecord> {
        self.records.iter()
    }

    /// Records that came from one shard, in graph order
    pub fn for_file<'a>(&'a self, file: &'a str) -> impl Iterator<Item = &'a GraphRecord> {
        self.records.iter().filter(move |record| record.file == file)
    }
}

/// Append the record for one graph and hand the dataset back.
///
/// Missing facts (an empty graph) leave the fact columns out.
pub fn append(
    mut dataset: Dataset,
    file: &str,
    graph_index: usize,
    graph: &Graph,
    centrality: &MeasureReport,
    connectivity: &MeasureReport,
    facts: Option<&ConnectivityFacts>,
) -> Dataset {
    let mut record = GraphRecord::new(file, graph_index, graph);
    record.add_report(centrality);
    record.add_report(connectivity);
    if let Some(facts) = facts {
        record.add_facts(facts);
    }

    dataset.records.push(record);
    dataset
}

//! Structural metrics: measure catalogs, the runner and per-graph aggregation

pub mod aggregate;
pub mod catalog;
pub mod connectivity;
pub mod runner;
pub mod summary;

use crate::error::MeasureError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub use aggregate::{append, Dataset, FieldValue, GraphRecord};
pub use catalog::{centrality_catalog, connectivity_catalog, Catalog, Measure, Parameters};
pub use connectivity::{summarize, ConnectivityFacts};
pub use runner::run;
pub use summary::DistributionSummary;

/// Return shape a measure is declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeasureKind {
    /// One value per node, reduced to a distribution summary
    PerNode,
    /// A single number or a set of nodes/edges, kept as-is
    Scalar,
}

impl MeasureKind {
    pub fn name(&self) -> &'static str {
        match self {
            MeasureKind::PerNode => "per-node",
            MeasureKind::Scalar => "scalar",
        }
    }
}

/// Family of measures a catalog belongs to; used as the record key prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MeasureClass {
    Centrality,
    Connectivity,
}

impl MeasureClass {
    pub fn prefix(&self) -> &'static str {
        match self {
            MeasureClass::Centrality => "Centrality",
            MeasureClass::Connectivity => "Connectivity",
        }
    }
}

/// Output of a measure operation before reduction. Nodes are identified by label.
#[derive(Debug, Clone, PartialEq)]
pub enum RawMeasure {
    PerNode(BTreeMap<u32, f64>),
    Value(f64),
    Nodes(BTreeSet<u32>),
    Edges(BTreeSet<(u32, u32)>),
    /// A partition-like family of node sets, e.g. biconnected components
    Blocks(Vec<BTreeSet<u32>>),
}

impl RawMeasure {
    /// Kind implied by the shape of the value
    pub fn kind(&self) -> MeasureKind {
        match self {
            RawMeasure::PerNode(_) => MeasureKind::PerNode,
            _ => MeasureKind::Scalar,
        }
    }
}

/// A successfully computed measure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MeasureResult {
    Distribution(DistributionSummary),
    Scalar(f64),
    Nodes(BTreeSet<u32>),
    Edges(BTreeSet<(u32, u32)>),
    Blocks(Vec<BTreeSet<u32>>),
}

/// A measure that failed for a graph
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub label: String,
    pub error: MeasureError,
}

/// Results of running one catalog over one graph
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureReport {
    /// Class of the catalog that produced the report
    pub class: MeasureClass,

    /// Successful measures in catalog order
    pub results: Vec<(String, MeasureResult)>,

    /// Failed measures in catalog order
    pub diagnostics: Vec<Diagnostic>,
}

impl MeasureReport {
    pub fn new(class: MeasureClass) -> Self {
        Self {
            class,
            results: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Look up a result by label
    pub fn get(&self, label: &str) -> Option<&MeasureResult> {
        self.results
            .iter()
            .find(|(name, _)| name == label)
            .map(|(_, result)| result)
    }

    /// Look up the diagnostic for a failed measure
    pub fn diagnostic(&self, label: &str) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.label == label)
    }
}

//! Runs a catalog over a graph, isolating failures per measure

use crate::error::MeasureError;
use crate::graph::Graph;
use crate::metrics::{
    Catalog, Diagnostic, DistributionSummary, Measure, MeasureReport, MeasureResult, RawMeasure,
};

/// Reduce a raw measure to its reported form. Per-node values become a distribution summary.
pub fn reduce(raw: RawMeasure) -> Result<MeasureResult, MeasureError> {
    match raw {
        RawMeasure::PerNode(values) => {
            let values: Vec<f64> = values.into_values().collect();
            DistributionSummary::from_values(&values).map(MeasureResult::Distribution)
        }
        RawMeasure::Value(value) if !value.is_finite() => Err(MeasureError::Numerical(format!(
            "non-finite value {value}"
        ))),
        RawMeasure::Value(value) => Ok(MeasureResult::Scalar(value)),
        RawMeasure::Nodes(nodes) => Ok(MeasureResult::Nodes(nodes)),
        RawMeasure::Edges(edges) => Ok(MeasureResult::Edges(edges)),
        RawMeasure::Blocks(blocks) => Ok(MeasureResult::Blocks(blocks)),
    }
}

fn evaluate(graph: &Graph, measure: &Measure) -> Result<MeasureResult, MeasureError> {
    let raw = (measure.operation)(graph, &measure.parameters)?;

    let returned = raw.kind();
    if returned != measure.kind {
        return Err(MeasureError::ShapeMismatch {
            declared: measure.kind.name(),
            returned: returned.name(),
        });
    }

    reduce(raw)
}

/// Compute every measure in the catalog. A failing measure is logged and recorded as a
/// diagnostic; the remaining measures still run.
pub fn run(graph: &Graph, catalog: &Catalog) -> MeasureReport {
    let mut report = MeasureReport::new(catalog.class);

    for measure in catalog.measures() {
        log::debug!("Computing {} {}", catalog.class.prefix(), measure.label);

        match evaluate(graph, measure) {
            Ok(result) => report.results.push((measure.label.to_string(), result)),
            Err(error) => {
                log::warn!(
                    "{} {} failed on a graph with {} nodes: {}",
                    catalog.class.prefix(),
                    measure.label,
                    graph.node_count(),
                    error
                );
                report.diagnostics.push(Diagnostic {
                    label: measure.label.to_string(),
                    error,
                });
            }
        }
    }

    report
}

//! Component structure and diameter of a graph

use crate::error::MeasureError;
use crate::graph::{algorithms, components, Graph};
use serde::Serialize;

/// Connectivity facts recorded for every graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectivityFacts {
    pub component_count: usize,
    pub largest_component_size: usize,

    /// Diameter of the largest connected component
    pub diameter: usize,
}

impl ConnectivityFacts {
    /// Fact names paired with their values, in record order
    pub fn fields(&self) -> [(&'static str, usize); 3] {
        [
            ("component_count", self.component_count),
            ("largest_component_size", self.largest_component_size),
            ("diameter", self.diameter),
        ]
    }
}

/// Count components and measure the diameter of the largest one.
///
/// Ties between equally large components go to the one holding the lowest node index.
pub fn summarize(graph: &Graph) -> Result<ConnectivityFacts, MeasureError> {
    let components = components::connected_components(graph);

    let mut largest: Option<&Vec<usize>> = None;
    for component in &components {
        if largest.map_or(true, |best| component.len() > best.len()) {
            largest = Some(component);
        }
    }
    let largest = largest.ok_or(MeasureError::EmptyGraph)?;

    let diameter = if components.len() == 1 {
        algorithms::diameter(graph)?
    } else {
        algorithms::diameter(&graph.induced_subgraph(largest))?
    };

    Ok(ConnectivityFacts {
        component_count: components.len(),
        largest_component_size: largest.len(),
        diameter,
    })
}

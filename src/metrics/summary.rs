//! Distribution summary of per-node values

use crate::error::MeasureError;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Four-number summary of a per-node measure.
///
/// The node set is the whole population, so the standard deviation divides by `N`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub standard_deviation: f64,
}

impl DistributionSummary {
    /// Summarise a non-empty set of finite values
    pub fn from_values(values: &[f64]) -> Result<Self, MeasureError> {
        if values.is_empty() {
            return Err(MeasureError::EmptyGraph);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MeasureError::Numerical(
                "non-finite per-node value".to_string(),
            ));
        }

        let standard_deviation = if values.len() == 1 {
            0.0
        } else {
            Statistics::population_std_dev(values)
        };

        Ok(Self {
            average: Statistics::mean(values),
            minimum: Statistics::min(values),
            maximum: Statistics::max(values),
            standard_deviation,
        })
    }

    /// Statistic names paired with their values, in record order
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("average", self.average),
            ("minimum", self.minimum),
            ("maximum", self.maximum),
            ("standard_deviation", self.standard_deviation),
        ]
    }
}

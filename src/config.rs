//! Configuration management for the graph metrics analyzer

use crate::viz::FigureLimits;
use std::path::PathBuf;

/// Run configuration for the graph metrics analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the graph shards
    pub input_dir: PathBuf,

    /// Directory receiving the dataset, summary and figures
    pub output_dir: PathBuf,

    /// File extension identifying shards, without the dot
    pub extension: String,

    /// Process shards in name order instead of directory-listing order
    pub sort_shards: bool,

    /// Render a drawing and an adjacency heatmap per graph
    pub render: bool,

    /// Largest node count for which figures carry node labels
    pub label_threshold: usize,

    /// Largest node count for which an adjacency heatmap is rendered
    pub heatmap_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("final_work/data_base"),
            output_dir: PathBuf::from("analysis_results"),
            extension: "g6".to_string(),
            sort_shards: false,
            render: true,
            label_threshold: 20,
            heatmap_limit: 500,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
        sort_shards: bool,
        render: bool,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            extension: extension.into(),
            sort_shards,
            render,
            ..Self::default()
        }
    }

    /// Directory receiving rendered figures
    pub fn figures_dir(&self) -> PathBuf {
        self.output_dir.join("figures")
    }

    /// Rendering limits derived from this configuration
    pub fn figure_limits(&self) -> FigureLimits {
        FigureLimits {
            label_threshold: self.label_threshold,
            heatmap_limit: self.heatmap_limit,
        }
    }
}

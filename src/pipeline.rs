//! Shard discovery and the per-graph analysis loop

use crate::config::Config;
use crate::data::source;
use crate::graph::Graph;
use crate::metrics::{
    self, centrality_catalog, connectivity_catalog, Catalog, Dataset, MeasureReport,
};
use crate::viz;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Totals for a shard that decoded successfully
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardSummary {
    pub file: String,
    pub graph_count: usize,
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// A shard abandoned because it couldn't be read or decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardFailure {
    pub file: String,
    pub reason: String,
}

/// A measure that failed on one graph; the graph's record omits its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasureFailure {
    pub file: String,
    pub graph_index: usize,

    /// Record key prefix of the measure, e.g. `Connectivity_MinimumNodeCut`
    pub measure: String,
    pub reason: String,
}

/// Outcome of a full run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub dataset: Dataset,
    pub shards: Vec<ShardSummary>,
    pub failures: Vec<ShardFailure>,
    pub diagnostics: Vec<MeasureFailure>,
}

/// List the regular files in `dir` named `*.{extension}`.
///
/// Directory-listing order is kept unless `sort` is set.
pub fn discover_shards(dir: &Path, extension: &str, sort: bool) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{extension}");
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read input directory {}", dir.display()))?;

    let mut shards = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        let matches = path
            .file_name()
            .map_or(false, |name| name.to_string_lossy().ends_with(&suffix));
        if matches && path.is_file() {
            shards.push(path);
        }
    }

    if sort {
        shards.sort();
    }

    Ok(shards)
}

fn measure_failures(
    file: &str,
    graph_index: usize,
    report: &MeasureReport,
) -> Vec<MeasureFailure> {
    report
        .diagnostics
        .iter()
        .map(|diagnostic| MeasureFailure {
            file: file.to_string(),
            graph_index,
            measure: format!("{}_{}", report.class.prefix(), diagnostic.label),
            reason: diagnostic.error.to_string(),
        })
        .collect()
}

/// Run both catalogs over one graph and append its record.
///
/// Returns the dataset together with the measures that failed on this graph.
pub fn analyze_graph(
    dataset: Dataset,
    file: &str,
    graph_index: usize,
    graph: &Graph,
    centrality: &Catalog,
    connectivity: &Catalog,
) -> (Dataset, Vec<MeasureFailure>) {
    log::debug!(
        "{} graph {}: {} nodes, {} edges",
        file,
        graph_index,
        graph.node_count(),
        graph.edge_count()
    );

    let centrality_report = metrics::run(graph, centrality);
    let connectivity_report = metrics::run(graph, connectivity);

    let mut failures = measure_failures(file, graph_index, &centrality_report);
    failures.extend(measure_failures(file, graph_index, &connectivity_report));

    let facts = match metrics::summarize(graph) {
        Ok(facts) => Some(facts),
        Err(e) => {
            log::warn!("{} graph {}: connectivity summary failed: {}", file, graph_index, e);
            failures.push(MeasureFailure {
                file: file.to_string(),
                graph_index,
                measure: "summary".to_string(),
                reason: e.to_string(),
            });
            None
        }
    };

    let dataset = metrics::append(
        dataset,
        file,
        graph_index,
        graph,
        &centrality_report,
        &connectivity_report,
        facts.as_ref(),
    );

    (dataset, failures)
}

fn file_id(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Analyze every shard in the configured input directory.
///
/// Fails only when the directory can't be read or holds no shards. A shard that can't be
/// read or decoded is abandoned whole and recorded as a failure.
pub fn analyze_shards(config: &Config) -> Result<RunReport> {
    let paths = discover_shards(&config.input_dir, &config.extension, config.sort_shards)?;
    if paths.is_empty() {
        bail!(
            "no .{} shards found in {}",
            config.extension,
            config.input_dir.display()
        );
    }

    log::info!(
        "Found {} shards in {}",
        paths.len(),
        config.input_dir.display()
    );

    let centrality = centrality_catalog();
    let connectivity = connectivity_catalog();
    let figures_dir = config.figures_dir();
    let limits = config.figure_limits();

    let mut report = RunReport::default();

    for path in &paths {
        let file = file_id(path);

        let graphs = match source::load(path) {
            Ok(graphs) => graphs,
            Err(e) => {
                log::warn!("Skipping shard {}: {}", file, e);
                report.failures.push(ShardFailure {
                    file,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        log::info!("Analyzing {} graphs from {}", graphs.len(), file);

        let mut summary = ShardSummary {
            file: file.clone(),
            graph_count: graphs.len(),
            total_nodes: 0,
            total_edges: 0,
        };

        for (index, graph) in graphs.iter().enumerate() {
            summary.total_nodes += graph.node_count();
            summary.total_edges += graph.edge_count();

            let (dataset, failures) = analyze_graph(
                report.dataset,
                &file,
                index,
                graph,
                &centrality,
                &connectivity,
            );
            report.dataset = dataset;
            report.diagnostics.extend(failures);

            if config.render {
                if let Err(e) = viz::render_figures(graph, &file, index, &figures_dir, limits) {
                    log::warn!("Failed to render {} graph {}: {}", file, index, e);
                }
            }
        }

        report.shards.push(summary);
    }

    for shard in &report.shards {
        log::info!(
            "{}: {} graphs, {} nodes, {} edges",
            shard.file,
            shard.graph_count,
            shard.total_nodes,
            shard.total_edges
        );
    }
    if !report.failures.is_empty() {
        log::warn!("{} shards failed to load", report.failures.len());
    }
    if !report.diagnostics.is_empty() {
        log::info!(
            "{} measures failed across {} graphs",
            report.diagnostics.len(),
            report.dataset.len()
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.g6"), "Bw\n").unwrap();
        fs::write(dir.path().join("a.g6"), "Bg\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.g6")).unwrap();

        let shards = discover_shards(dir.path(), "g6", true).unwrap();

        assert_eq!(
            shards,
            vec![dir.path().join("a.g6"), dir.path().join("b.g6")]
        );
    }

    #[test]
    fn discover_missing_directory() {
        assert!(discover_shards(Path::new("does/not/exist"), "g6", false).is_err());
    }

    #[test]
    fn analyze_graph_threads_dataset() {
        let graph = crate::graph::builder::from_edges(&[(0, 1), (1, 2), (2, 0)]);
        let centrality = centrality_catalog();
        let connectivity = connectivity_catalog();

        let (dataset, failures) =
            analyze_graph(Dataset::new(), "a.g6", 0, &graph, &centrality, &connectivity);
        assert!(failures.is_empty(), "{failures:?}");
        let (dataset, _) = analyze_graph(dataset, "a.g6", 1, &graph, &centrality, &connectivity);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].graph_index, 1);
    }

    #[test]
    fn analyze_graph_reports_failed_measures() {
        let graph = crate::graph::builder::from_edges(&[(0, 1), (2, 3)]);

        let (dataset, failures) = analyze_graph(
            Dataset::new(),
            "b.g6",
            7,
            &graph,
            &centrality_catalog(),
            &connectivity_catalog(),
        );

        let failure = failures
            .iter()
            .find(|f| f.measure == "Connectivity_MinimumNodeCut")
            .unwrap();
        assert_eq!(failure.file, "b.g6");
        assert_eq!(failure.graph_index, 7);
        assert_eq!(failure.reason, "graph is not connected");
        assert!(dataset.records()[0]
            .get("Connectivity_MinimumNodeCut")
            .is_none());
    }

    #[test]
    fn empty_graph_reports_summary_failure() {
        let graph = crate::graph::GraphBuilder::with_nodes(0).build();

        let (_, failures) = analyze_graph(
            Dataset::new(),
            "c.g6",
            0,
            &graph,
            &centrality_catalog(),
            &connectivity_catalog(),
        );

        assert!(failures
            .iter()
            .any(|f| f.measure == "summary" && f.reason == "graph has no nodes"));
    }
}

//! Results persistence module

use crate::pipeline::RunReport;
use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save the dataset and the run summary to the specified directory
pub fn save_results(report: &RunReport, output_dir: &Path) -> Result<()> {
    log::info!(
        "Saving {} graph records to {}",
        report.dataset.len(),
        output_dir.display()
    );

    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "output directory {} is not writable",
            output_dir.display()
        )
    })?;

    save_dataset(report, output_dir)?;
    save_summary(report, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save one record per graph
fn save_dataset(report: &RunReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("dataset.json");
    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;

    file.write_all(to_string_pretty(&report.dataset)?.as_bytes())?;

    Ok(())
}

/// Save per-shard totals, shard failures and failed measures
fn save_summary(report: &RunReport, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("summary.json");
    let mut file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;

    let summary = json!({
        "totals": {
            "shard_count": report.shards.len() + report.failures.len(),
            "failed_shard_count": report.failures.len(),
            "graph_count": report.shards.iter().map(|s| s.graph_count).sum::<usize>(),
            "node_count": report.shards.iter().map(|s| s.total_nodes).sum::<usize>(),
            "edge_count": report.shards.iter().map(|s| s.total_edges).sum::<usize>(),
            "record_count": report.dataset.len(),
            "failed_measure_count": report.diagnostics.len(),
        },
        "shards": report.shards,
        "failures": report.failures,
        "diagnostics": report.diagnostics,
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

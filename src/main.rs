use anyhow::{Context, Result};
use clap::Parser;
use graph_metrics_analyzer::config::Config;
use graph_metrics_analyzer::{pipeline, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "graph-metrics-analyzer",
    about = "Structural metrics for collections of graph6/sparse6 graphs"
)]
struct Cli {
    /// Directory holding the graph shards
    #[clap(long, default_value = "final_work/data_base")]
    input_dir: PathBuf,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: PathBuf,

    /// Shard file extension
    #[clap(long, default_value = "g6")]
    extension: String,

    /// Process shards in file name order
    #[clap(long)]
    sorted: bool,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Largest node count for which figures carry node labels
    #[clap(long, default_value = "20")]
    label_threshold: usize,

    /// Largest node count for which an adjacency heatmap is rendered
    #[clap(long, default_value = "500")]
    heatmap_limit: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config {
        label_threshold: args.label_threshold,
        heatmap_limit: args.heatmap_limit,
        ..Config::new(
            args.input_dir,
            args.output_dir,
            args.extension,
            args.sorted,
            !args.skip_viz,
        )
    };

    log::info!("Starting graph metrics analysis");
    log::info!("Input: {}", config.input_dir.display());
    log::info!("Output: {}", config.output_dir.display());

    // Create output directory
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "output directory {} is not writable",
            config.output_dir.display()
        )
    })?;

    // 1. Analyze every shard
    let report = pipeline::analyze_shards(&config)?;

    log::info!(
        "Analyzed {} graphs from {} shards ({} failed, {} measure failures)",
        report.dataset.len(),
        report.shards.len(),
        report.failures.len(),
        report.diagnostics.len()
    );

    // 2. Save results
    storage::save_results(&report, &config.output_dir)?;

    log::info!(
        "Analysis complete. Results saved to {}",
        config.output_dir.display()
    );

    Ok(())
}

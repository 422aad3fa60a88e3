use std::fs;
use std::path::Path;

use graph_metrics_analyzer::config::Config;
use graph_metrics_analyzer::data::{graph6, sparse6};
use graph_metrics_analyzer::graph::builder::from_edges;
use graph_metrics_analyzer::graph::{Graph, GraphBuilder};
use graph_metrics_analyzer::metrics::FieldValue;
use graph_metrics_analyzer::{pipeline, storage};

/// Nodes 1..=6 with node 6 isolated
fn scenario_graph() -> Graph {
    let mut builder = GraphBuilder::with_nodes(6);
    for (a, b) in [
        (1, 3),
        (1, 4),
        (1, 5),
        (2, 3),
        (2, 4),
        (2, 5),
        (3, 5),
        (4, 5),
    ] {
        builder.add_edge(a - 1, b - 1);
    }
    builder.build()
}

fn write_shard(dir: &Path, name: &str, lines: &[String]) {
    fs::write(dir.join(name), lines.join("\n") + "\n").unwrap();
}

fn config(input: &Path, output: &Path, render: bool) -> Config {
    Config::new(input, output, "g6", true, render)
}

fn real(value: Option<&FieldValue>) -> f64 {
    value.and_then(FieldValue::as_real).unwrap()
}

#[test]
fn scenario_graph_record() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_shard(input.path(), "scenario.g6", &[graph6::encode(&scenario_graph())]);

    let report = pipeline::analyze_shards(&config(input.path(), output.path(), false)).unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(report.dataset.len(), 1);

    let record = &report.dataset.records()[0];
    assert_eq!(record.file, "scenario.g6");
    assert_eq!(record.graph_index, 0);
    assert_eq!(record.node_count, 6);
    assert_eq!(record.edge_count, 8);
    assert_eq!(record.get("diameter"), Some(&FieldValue::Count(2)));
    assert_eq!(record.get("component_count"), Some(&FieldValue::Count(2)));
    assert_eq!(record.get("largest_component_size"), Some(&FieldValue::Count(5)));

    let average_degree = real(record.get("Centrality_Degree_average"));
    assert!((average_degree - 16.0 / 30.0).abs() < 1e-12);
    assert_eq!(real(record.get("Centrality_Degree_minimum")), 0.0);
    assert_eq!(real(record.get("Centrality_Degree_maximum")), 0.8);

    // The isolated node disconnects the graph.
    assert_eq!(real(record.get("Connectivity_NodeConnectivity")), 0.0);
    assert_eq!(real(record.get("Connectivity_AlgebraicConnectivity")), 0.0);
    assert!(record.get("Connectivity_MinimumNodeCut").is_none());
    assert!((real(record.get("Connectivity_Density")) - 8.0 / 15.0).abs() < 1e-12);

    // The omitted measure is reported rather than dropped silently.
    let failure = report
        .diagnostics
        .iter()
        .find(|f| f.measure == "Connectivity_MinimumNodeCut")
        .unwrap();
    assert_eq!(failure.file, "scenario.g6");
    assert_eq!(failure.graph_index, 0);
    assert_eq!(failure.reason, "graph is not connected");
}

#[test]
fn broken_shard_is_abandoned() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let triangle = from_edges(&[(0, 1), (1, 2), (2, 0)]);
    write_shard(
        input.path(),
        "good.g6",
        &[graph6::encode(&triangle), sparse6::encode(&scenario_graph())],
    );
    write_shard(
        input.path(),
        "broken.g6",
        &["Bw".to_string(), "Bgg".to_string()],
    );

    let report = pipeline::analyze_shards(&config(input.path(), output.path(), false)).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file, "broken.g6");
    assert!(report.failures[0].reason.starts_with("line 2"));

    assert_eq!(report.shards.len(), 1);
    assert_eq!(report.shards[0].file, "good.g6");
    assert_eq!(report.shards[0].graph_count, 2);
    assert_eq!(report.shards[0].total_nodes, 9);
    assert_eq!(report.shards[0].total_edges, 11);

    assert_eq!(report.dataset.len(), 2);
    assert!(report.dataset.iter().all(|r| r.file == "good.g6"));
    assert_eq!(report.dataset.records()[1].node_count, 6);
}

#[test]
fn empty_directory_is_fatal() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("readme.txt"), "not a shard").unwrap();

    assert!(pipeline::analyze_shards(&config(input.path(), output.path(), false)).is_err());
}

#[test]
fn missing_directory_is_fatal() {
    let output = tempfile::tempdir().unwrap();
    let input = output.path().join("missing");

    assert!(pipeline::analyze_shards(&config(&input, output.path(), false)).is_err());
}

#[test]
fn full_run_writes_results_and_figures() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_shard(
        input.path(),
        "shard.g6",
        &[
            graph6::encode(&scenario_graph()),
            graph6::encode(&GraphBuilder::with_nodes(1).build()),
        ],
    );

    let config = config(input.path(), output.path(), true);
    let report = pipeline::analyze_shards(&config).unwrap();
    storage::save_results(&report, &config.output_dir).unwrap();

    assert!(output.path().join("dataset.json").is_file());
    assert!(output.path().join("summary.json").is_file());
    for index in 0..2 {
        assert!(config
            .figures_dir()
            .join(format!("shard_graph_{index}.svg"))
            .is_file());
        assert!(config
            .figures_dir()
            .join(format!("shard_adjacency_{index}.svg"))
            .is_file());
    }

    // A single node still gets a record, with the undefined measures left out.
    let single = &report.dataset.records()[1];
    assert_eq!(single.node_count, 1);
    assert_eq!(single.get("diameter"), Some(&FieldValue::Count(0)));
    assert!(single.get("Connectivity_AlgebraicConnectivity").is_none());

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path().join("summary.json")).unwrap())
            .unwrap();
    let diagnostics = summary["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), report.diagnostics.len());
    assert!(diagnostics.iter().any(|d| d["graph_index"] == 1
        && d["measure"] == "Connectivity_AlgebraicConnectivity"
        && d["reason"] == "requires at least 2 nodes, graph has 1"));
}

#[test]
fn large_graph_gets_drawing_only() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let path: Vec<(u32, u32)> = (1..12).map(|i| (i - 1, i)).collect();
    write_shard(input.path(), "long.g6", &[graph6::encode(&from_edges(&path))]);

    let config = Config {
        heatmap_limit: 10,
        ..config(input.path(), output.path(), true)
    };
    pipeline::analyze_shards(&config).unwrap();

    assert!(config.figures_dir().join("long_graph_0.svg").is_file());
    assert!(!config.figures_dir().join("long_adjacency_0.svg").exists());
}

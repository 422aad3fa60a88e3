//! Visualization generation module: SVG drawings and adjacency heatmaps per graph

use crate::graph::Graph;
use anyhow::Result;
use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const CANVAS: f64 = 600.0;
const MARGIN: f64 = 40.0;

/// Positions on a circle around the canvas centre, node 0 at the top, clockwise
pub fn circular_layout(n: usize) -> Vec<(f64, f64)> {
    let centre = CANVAS / 2.0;
    let radius = centre - MARGIN;

    if n == 1 {
        return vec![(centre, centre)];
    }

    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64 - PI / 2.0;
            (centre + radius * angle.cos(), centre + radius * angle.sin())
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_header<W: Write>(out: &mut W, title: &str) -> Result<()> {
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS}\" height=\"{CANVAS}\" viewBox=\"0 0 {CANVAS} {CANVAS}\">"
    )?;
    writeln!(out, "  <title>{}</title>", escape(title))?;
    writeln!(out, "  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;
    writeln!(
        out,
        "  <text x=\"{}\" y=\"20\" text-anchor=\"middle\" font-family=\"Arial, sans-serif\" font-size=\"14\">{}</text>",
        CANVAS / 2.0,
        escape(title)
    )?;
    Ok(())
}

/// Draw a node-link diagram on a circular layout
pub fn write_graph_svg<W: Write>(
    out: &mut W,
    graph: &Graph,
    title: &str,
    show_labels: bool,
) -> Result<()> {
    let positions = circular_layout(graph.node_count());

    write_header(out, title)?;

    writeln!(out, "  <g stroke=\"#999\" stroke-width=\"1\">")?;
    for (a, b) in graph.edges() {
        let (x1, y1) = positions[a];
        let (x2, y2) = positions[b];
        writeln!(
            out,
            "    <line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\"/>"
        )?;
    }
    writeln!(out, "  </g>")?;

    writeln!(out, "  <g fill=\"#1f77b4\">")?;
    for (node, (x, y)) in positions.iter().enumerate() {
        writeln!(out, "    <circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"8\"/>")?;
        if show_labels {
            writeln!(
                out,
                "    <text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"Arial, sans-serif\" font-size=\"10\" fill=\"white\">{}</text>",
                y + 3.5,
                graph.label(node)
            )?;
        }
    }
    writeln!(out, "  </g>")?;

    writeln!(out, "</svg>")?;
    Ok(())
}

/// Draw the adjacency matrix as a heatmap in node-index order
pub fn write_adjacency_svg<W: Write>(
    out: &mut W,
    graph: &Graph,
    title: &str,
    show_ticks: bool,
) -> Result<()> {
    let n = graph.node_count();
    let cell = (CANVAS - 2.0 * MARGIN) / n.max(1) as f64;
    let adjacency = graph.adjacency_lists();

    write_header(out, title)?;

    writeln!(out, "  <g stroke=\"none\">")?;
    for row in 0..n {
        for col in 0..n {
            let fill = if adjacency[row].binary_search(&col).is_ok() {
                "#08306b"
            } else {
                "#f7fbff"
            };
            writeln!(
                out,
                "    <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{cell:.2}\" height=\"{cell:.2}\" fill=\"{fill}\"/>",
                MARGIN + col as f64 * cell,
                MARGIN + row as f64 * cell
            )?;
        }
    }
    writeln!(out, "  </g>")?;

    if show_ticks {
        writeln!(
            out,
            "  <g font-family=\"Arial, sans-serif\" font-size=\"10\" text-anchor=\"middle\">"
        )?;
        for node in 0..n {
            let centre = MARGIN + (node as f64 + 0.5) * cell;
            let label = graph.label(node);
            writeln!(
                out,
                "    <text x=\"{centre:.2}\" y=\"{:.2}\">{label}</text>",
                MARGIN - 6.0
            )?;
            writeln!(
                out,
                "    <text x=\"{:.2}\" y=\"{:.2}\">{label}</text>",
                MARGIN / 2.0,
                centre + 3.5
            )?;
        }
        writeln!(out, "  </g>")?;
    }

    writeln!(out, "</svg>")?;
    Ok(())
}

/// Size limits applied when rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureLimits {
    /// Largest node count drawn with node labels and axis ticks
    pub label_threshold: usize,

    /// Largest node count that gets an adjacency heatmap; the heatmap has `n * n` cells
    pub heatmap_limit: usize,
}

/// Write the figures for one graph into `figures_dir` and return their paths.
///
/// Graphs above the heatmap limit only get the node-link drawing.
pub fn render_figures(
    graph: &Graph,
    file: &str,
    graph_index: usize,
    figures_dir: &Path,
    limits: FigureLimits,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(figures_dir)?;

    let stem = Path::new(file)
        .file_stem()
        .map_or_else(|| file.to_string(), |s| s.to_string_lossy().into_owned());
    let show_labels = graph.node_count() <= limits.label_threshold;

    let drawing_path = figures_dir.join(format!("{stem}_graph_{graph_index}.svg"));
    let mut drawing = BufWriter::new(File::create(&drawing_path)?);
    write_graph_svg(
        &mut drawing,
        graph,
        &format!("{file} graph {graph_index}"),
        show_labels,
    )?;
    drawing.flush()?;
    log::debug!("Rendered {}", drawing_path.display());

    if graph.node_count() > limits.heatmap_limit {
        log::debug!(
            "Skipping adjacency heatmap for {} graph {}: {} nodes exceeds {}",
            file,
            graph_index,
            graph.node_count(),
            limits.heatmap_limit
        );
        return Ok(vec![drawing_path]);
    }

    let heatmap_path = figures_dir.join(format!("{stem}_adjacency_{graph_index}.svg"));
    let mut heatmap = BufWriter::new(File::create(&heatmap_path)?);
    write_adjacency_svg(
        &mut heatmap,
        graph,
        &format!("{file} graph {graph_index} adjacency"),
        show_labels,
    )?;
    heatmap.flush()?;
    log::debug!("Rendered {}", heatmap_path.display());

    Ok(vec![drawing_path, heatmap_path])
}

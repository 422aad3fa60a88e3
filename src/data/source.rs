//! Shard loading: one graph per non-blank line

use crate::data::{graph6, sparse6};
use crate::error::{DecodeError, SourceError};
use crate::graph::Graph;
use std::fs;
use std::path::Path;

/// Check if a line is a decorative `>>tag<<` header
pub fn is_header(line: &[u8]) -> bool {
    line.len() > 4 && line.starts_with(b">>") && line.ends_with(b"<<")
}

/// Decode a single line, dispatching on the sparse6 marker
pub fn decode_line(line: &[u8]) -> Result<Graph, DecodeError> {
    let body = line
        .strip_prefix(graph6::HEADER)
        .or_else(|| line.strip_prefix(sparse6::HEADER))
        .unwrap_or(line);

    if body.first() == Some(&sparse6::MARKER) {
        sparse6::decode(body)
    } else {
        graph6::decode(body)
    }
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    &line[start..end]
}

/// Decode every graph in a shard's contents, in line order.
///
/// The first undecodable line fails the whole shard; graphs decoded before it are discarded.
pub fn parse_shard(contents: &[u8]) -> Result<Vec<Graph>, SourceError> {
    let mut graphs = Vec::new();

    for (index, raw) in contents.split(|&b| b == b'\n').enumerate() {
        let line = trim(raw);
        if line.is_empty() || is_header(line) {
            continue;
        }

        let graph = decode_line(line).map_err(|source| SourceError::Decode {
            line: index + 1,
            source,
        })?;
        graphs.push(graph);
    }

    Ok(graphs)
}

/// Read and decode a shard file
pub fn load(path: &Path) -> Result<Vec<Graph>, SourceError> {
    log::debug!("Reading shard: {}", path.display());

    let contents = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let graphs = parse_shard(&contents)?;
    log::debug!("Decoded {} graphs from {}", graphs.len(), path.display());

    Ok(graphs)
}

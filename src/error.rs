//! Error types shared by the decoders and the measure catalog

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A line that can't be decoded as graph6 or sparse6
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Every encoded byte must lie in 63..=126
    #[error("byte {byte:#04x} at offset {offset} is outside the printable range 63..=126")]
    InvalidByte { byte: u8, offset: usize },

    /// The vertex count header ended early
    #[error("vertex count header is truncated")]
    TruncatedHeader,

    /// The adjacency data doesn't have the length implied by the vertex count
    #[error("expected {expected} data bytes for {nodes} nodes, found {found}")]
    LengthMismatch {
        nodes: usize,
        expected: usize,
        found: usize,
    },

    /// Node labels are `u32`
    #[error("vertex count {nodes} exceeds the supported maximum")]
    TooManyNodes { nodes: usize },

    /// sparse6 data must start with ':'
    #[error("sparse6 data must start with ':'")]
    MissingSparseMarker,

    /// The line is empty once headers are stripped
    #[error("no graph data")]
    Empty,
}

/// Failure to turn a shard file into graphs
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },
}

/// A single measure that could not be computed for a graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    /// An iterative method hit its iteration cap
    #[error("failed to converge within {iterations} iterations")]
    NotConverged { iterations: usize },

    /// The measure is undefined on disconnected graphs
    #[error("graph is not connected")]
    Disconnected,

    /// The measure needs more nodes than the graph has
    #[error("requires at least {required} nodes, graph has {found}")]
    TooFewNodes { required: usize, found: usize },

    /// The graph has no nodes
    #[error("graph has no nodes")]
    EmptyGraph,

    /// The graph is too large for a dense method
    #[error("graph has {found} nodes, dense method is limited to {limit}")]
    TooLarge { limit: usize, found: usize },

    /// The operation returned a shape that doesn't match its declared kind
    #[error("declared {declared} measure returned {returned}")]
    ShapeMismatch {
        declared: &'static str,
        returned: &'static str,
    },

    /// Numerical failure, e.g. a NaN in an eigen-decomposition
    #[error("numerical error: {0}")]
    Numerical(String),
}

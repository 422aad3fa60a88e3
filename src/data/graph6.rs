//! graph6: dense encoding of the upper adjacency triangle

use crate::data::{bits, decode_size, encode_size, pack_bits, to_printable, to_six_bit};
use crate::error::DecodeError;
use crate::graph::{Graph, GraphBuilder};

/// Optional header that may precede graph6 data
pub const HEADER: &[u8] = b">>graph6<<";

/// Decode one graph6 line. Nodes are labelled `0..n`.
pub fn decode(line: &[u8]) -> Result<Graph, DecodeError> {
    let line = line.strip_prefix(HEADER).unwrap_or(line);
    if line.is_empty() {
        return Err(DecodeError::Empty);
    }

    let data = to_six_bit(line)?;
    let (n, body) = decode_size(&data)?;

    let pairs = n * n.saturating_sub(1) / 2;
    let expected = (pairs + 5) / 6;
    if body.len() != expected {
        return Err(DecodeError::LengthMismatch {
            nodes: n,
            expected,
            found: body.len(),
        });
    }

    let mut builder = GraphBuilder::with_nodes(n);
    let mut stream = bits(body);

    // Column order: x(0,1), x(0,2), x(1,2), x(0,3), ...
    for j in 1..n {
        for i in 0..j {
            if stream.next() == Some(true) {
                builder.add_edge(i as u32, j as u32);
            }
        }
    }

    Ok(builder.build())
}

/// Encode a graph as graph6, numbering nodes by index (labels are not kept)
pub fn encode(graph: &Graph) -> String {
    let n = graph.node_count();

    let mut adjacency = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for j in 1..n {
        for i in 0..j {
            adjacency.push(graph.has_edge(i, j));
        }
    }

    let mut values = encode_size(n);
    values.extend(pack_bits(&adjacency));
    to_printable(&values)
}

#[cfg(test)]
mod tests {
    use crate::graph::builder::from_edges;

    use super::*;

    #[test]
    fn decode_single_edge() {
        let graph = decode(b"A_").unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edges(), vec![(0, 1)]);
    }

    #[test]
    fn decode_strips_header() {
        let graph = decode(b">>graph6<<Bw").unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn decode_path() {
        let graph = decode(b"Bg").unwrap();

        assert_eq!(graph.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn decode_keeps_isolated_nodes() {
        let graph = decode(b"C?").unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            decode(b"Bgg").err(),
            Some(DecodeError::LengthMismatch {
                nodes: 3,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn decode_rejects_invalid_bytes() {
        assert!(matches!(
            decode(b"B g"),
            Err(DecodeError::InvalidByte { offset: 1, .. })
        ));
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode(b"").err(), Some(DecodeError::Empty));
        assert_eq!(decode(HEADER).err(), Some(DecodeError::Empty));
    }

    #[test]
    fn decode_rejects_oversized_header() {
        assert_eq!(
            decode(b"~~B~~~~~").err(),
            Some(DecodeError::TooManyNodes {
                nodes: u32::MAX as usize
            })
        );
    }

    #[test]
    fn encode_known_graphs() {
        assert_eq!(encode(&from_edges(&[(0, 1)])), "A_");
        assert_eq!(encode(&from_edges(&[(0, 1), (1, 2)])), "Bg");
        assert_eq!(encode(&from_edges(&[(0, 1), (1, 2), (2, 0)])), "Bw");
    }

    #[test]
    fn encode_empty_graph() {
        assert_eq!(encode(&GraphBuilder::with_nodes(0).build()), "?");
        assert_eq!(decode(b"?").unwrap().node_count(), 0);
    }
}

//! sparse6: compact edge-list encoding for low-density graphs

use crate::data::{bits, decode_size, encode_size, pack_bits, to_printable, to_six_bit};
use crate::error::DecodeError;
use crate::graph::{Graph, GraphBuilder};

/// Optional header that may precede sparse6 data
pub const HEADER: &[u8] = b">>sparse6<<";

/// Leading byte of every sparse6 line
pub const MARKER: u8 = b':';

/// Bits needed per vertex number: smallest `k >= 1` with `2^k >= n`
fn width(n: usize) -> usize {
    let mut k = 1;
    while (1usize << k) < n {
        k += 1;
    }
    k
}

/// Decode one sparse6 line. Nodes are labelled `0..n`.
///
/// Repeated edges collapse into one and self-loops are dropped.
pub fn decode(line: &[u8]) -> Result<Graph, DecodeError> {
    let line = line.strip_prefix(HEADER).unwrap_or(line);
    let body = line
        .strip_prefix(&[MARKER])
        .ok_or(DecodeError::MissingSparseMarker)?;

    let data = to_six_bit(body)?;
    let (n, rest) = decode_size(&data)?;
    let k = width(n);

    let mut builder = GraphBuilder::with_nodes(n);
    let mut stream = bits(rest);
    let mut v = 0usize;

    // Each record is one flag bit followed by a k-bit vertex number. A record cut short by
    // the end of the data is padding.
    'records: while let Some(advance) = stream.next() {
        let mut x = 0usize;
        for _ in 0..k {
            match stream.next() {
                Some(bit) => x = (x << 1) | bit as usize,
                None => break 'records,
            }
        }

        if advance {
            v += 1;
        }

        // Padding with ones can produce an out-of-range vertex
        if x >= n || v >= n {
            break;
        } else if x > v {
            v = x;
        } else {
            builder.add_edge(x as u32, v as u32);
        }
    }

    Ok(builder.build())
}

/// Encode a graph as sparse6, numbering nodes by index (labels are not kept)
pub fn encode(graph: &Graph) -> String {
    let n = graph.node_count();
    let k = width(n);

    let push_vertex = |stream: &mut Vec<bool>, x: usize| {
        stream.extend((0..k).rev().map(|i| (x >> i) & 1 == 1));
    };

    // Edges ordered by their larger endpoint, then the smaller one.
    let mut edges: Vec<(usize, usize)> =
        graph.edges().into_iter().map(|(a, b)| (b, a)).collect();
    edges.sort_unstable();

    let mut stream = Vec::new();
    let mut current = 0;

    for (v, u) in edges {
        if v == current {
            stream.push(false);
            push_vertex(&mut stream, u);
        } else if v == current + 1 {
            current += 1;
            stream.push(true);
            push_vertex(&mut stream, u);
        } else {
            current = v;
            stream.push(true);
            push_vertex(&mut stream, v);
            stream.push(false);
            push_vertex(&mut stream, u);
        }
    }

    // Padding with ones would decode as an edge to n - 1 when n == 2^k and enough padding
    // bits are needed for a full record; a zero flag first keeps it out of range.
    let padding = (6 - stream.len() % 6) % 6;
    if k < 6 && n == (1 << k) && padding >= k && current < n - 1 {
        stream.push(false);
    }
    let padding = (6 - stream.len() % 6) % 6;
    stream.extend(std::iter::repeat(true).take(padding));

    let mut values = encode_size(n);
    values.extend(pack_bits(&stream));
    format!("{}{}", MARKER as char, to_printable(&values))
}

//! Graph input: graph6/sparse6 codecs and shard loading

pub mod graph6;
pub mod source;
pub mod sparse6;

use crate::error::DecodeError;

/// Offset added to every 6-bit value to make it printable
const OFFSET: u8 = 63;

/// Largest vertex count a graph may declare. Checked before any node is allocated, since a
/// few header bytes can claim billions of nodes.
pub const MAX_NODES: usize = 1 << 20;

/// Convert printable bytes to 6-bit values
pub(crate) fn to_six_bit(bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
    bytes
        .iter()
        .enumerate()
        .map(|(offset, &byte)| match byte {
            63..=126 => Ok(byte - OFFSET),
            _ => Err(DecodeError::InvalidByte { byte, offset }),
        })
        .collect()
}

/// Convert 6-bit values back to printable text
pub(crate) fn to_printable(values: &[u8]) -> String {
    values.iter().map(|&v| (v + OFFSET) as char).collect()
}

/// Read the `N(n)` vertex count header, returning the count and the remaining data
pub(crate) fn decode_size(data: &[u8]) -> Result<(usize, &[u8]), DecodeError> {
    let (n, rest) = match data {
        [] => return Err(DecodeError::TruncatedHeader),
        [first, rest @ ..] if *first < 63 => (*first as usize, rest),
        [63, second, ..] if *second < 63 => {
            if data.len() < 4 {
                return Err(DecodeError::TruncatedHeader);
            }
            (fold_six_bit(&data[1..4]), &data[4..])
        }
        _ => {
            if data.len() < 8 {
                return Err(DecodeError::TruncatedHeader);
            }
            (fold_six_bit(&data[2..8]), &data[8..])
        }
    };

    if n > MAX_NODES {
        return Err(DecodeError::TooManyNodes { nodes: n });
    }

    Ok((n, rest))
}

/// Write the `N(n)` vertex count header as 6-bit values
pub(crate) fn encode_size(n: usize) -> Vec<u8> {
    let groups = match n {
        0..=62 => return vec![n as u8],
        63..=258_047 => 3,
        _ => 6,
    };

    let mut values = vec![63; if groups == 3 { 1 } else { 2 }];
    values.extend((0..groups).rev().map(|i| ((n >> (6 * i)) & 0x3f) as u8));
    values
}

fn fold_six_bit(values: &[u8]) -> usize {
    values.iter().fold(0, |acc, &v| (acc << 6) | v as usize)
}

/// Expand 6-bit values into bits, most significant first
pub(crate) fn bits(values: &[u8]) -> impl Iterator<Item = bool> + '_ {
    values
        .iter()
        .flat_map(|&v| (0..6).rev().map(move |i| (v >> i) & 1 == 1))
}

/// Pack bits into 6-bit values, zero-padding the last one
pub(crate) fn pack_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks(6)
        .map(|chunk| {
            chunk
                .iter()
                .chain(std::iter::repeat(&false))
                .take(6)
                .fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
        })
        .collect()
}

//! Ordered reassembly of decoded segments into a byte stream.
//!
//! Segments concatenate in `(block_index, address)` order, which is the
//! canonical order because addresses were assigned monotonically within
//! each block at encode time. Zero padding introduced on final segments
//! is removed by trimming against declared byte counts: per block when
//! the actual block sizes are known, and globally against the declared
//! total file size.

use std::collections::BTreeMap;

use crate::bits::bits_to_bytes;
use crate::decode::DecodeReport;

/// A reassembled byte stream plus its boundary accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    pub bytes: Vec<u8>,
    /// Trailing bits that did not fill a whole byte and were dropped.
    /// Nonzero only when no total size was declared; callers should
    /// surface it as a boundary warning.
    pub dropped_bits: usize,
}

/// Concatenate segments in key order and trim to the declared total.
///
/// With a positive `declared_total_bytes` the result is exactly that many
/// bytes (padding and junk beyond it are cut); otherwise the bit stream
/// is floored to whole bytes and the dangling remainder reported.
pub fn concat_segments(
    segments: &BTreeMap<(usize, u32), Vec<bool>>,
    declared_total_bytes: Option<usize>,
) -> Reassembled {
    let mut bits = Vec::new();
    for payload in segments.values() {
        bits.extend_from_slice(payload);
    }
    trim_to_bytes(bits, declared_total_bytes)
}

/// Reassemble a decode report, honoring per-block actual sizes.
///
/// Each block's bits are trimmed to its declared actual byte count before
/// concatenation, so padding on interior blocks (block size not a
/// multiple of the 12-byte payload) cannot shift later blocks. The final
/// stream is then trimmed to the declared total file size.
pub fn reassemble(report: &DecodeReport) -> Reassembled {
    let mut bits = Vec::new();
    let mut current_block: Option<usize> = None;
    let mut block_bits = Vec::new();

    let flush = |block: Option<usize>, block_bits: &mut Vec<bool>, bits: &mut Vec<bool>| {
        if let Some(index) = block {
            if let Some(&actual) = report.actual_block_sizes.get(&index) {
                block_bits.truncate(actual * 8);
            }
            bits.append(block_bits);
        }
        block_bits.clear();
    };

    for (&(block, _address), payload) in &report.segments {
        if current_block != Some(block) {
            flush(current_block, &mut block_bits, &mut bits);
            current_block = Some(block);
        }
        block_bits.extend_from_slice(payload);
    }
    flush(current_block, &mut block_bits, &mut bits);

    let declared = (report.total_file_size > 0).then_some(report.total_file_size);
    trim_to_bytes(bits, declared)
}

fn trim_to_bytes(mut bits: Vec<bool>, declared_total_bytes: Option<usize>) -> Reassembled {
    if let Some(total) = declared_total_bytes.filter(|&t| t > 0) {
        bits.truncate(total * 8);
    }
    let (bytes, dropped_bits) = bits_to_bytes(&bits);
    Reassembled { bytes, dropped_bits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bytes_to_bits;
    use crate::PAYLOAD_BITS;

    fn padded_segment(data: &[u8]) -> Vec<bool> {
        let mut bits = bytes_to_bits(data);
        bits.resize(PAYLOAD_BITS, false);
        bits
    }

    #[test]
    fn segments_concatenate_in_key_order() {
        let mut segments = BTreeMap::new();
        segments.insert((1, 1), bytes_to_bits(&[3]));
        segments.insert((0, 2), bytes_to_bits(&[2]));
        segments.insert((0, 1), bytes_to_bits(&[1]));
        let out = concat_segments(&segments, None);
        assert_eq!(out.bytes, vec![1, 2, 3]);
        assert_eq!(out.dropped_bits, 0);
    }

    #[test]
    fn declared_total_trims_padding() {
        let mut segments = BTreeMap::new();
        segments.insert((0, 1), padded_segment(&[9, 8, 7]));
        let out = concat_segments(&segments, Some(3));
        assert_eq!(out.bytes, vec![9, 8, 7]);
    }

    #[test]
    fn unknown_total_floors_to_whole_bytes() {
        let mut segments = BTreeMap::new();
        let mut bits = bytes_to_bits(&[0xAA]);
        bits.extend([true, true, false]);
        segments.insert((0, 1), bits);
        let out = concat_segments(&segments, None);
        assert_eq!(out.bytes, vec![0xAA]);
        assert_eq!(out.dropped_bits, 3);
    }

    #[test]
    fn interior_block_padding_cannot_shift_later_blocks() {
        // Block 0 holds 13 bytes (second segment mostly padding), block 1
        // holds 2 bytes. Without per-block trimming the padding of block 0
        // would displace block 1's bytes.
        let mut report = DecodeReport::default();
        report
            .segments
            .insert((0, 1), padded_segment(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]));
        report.segments.insert((0, 2), padded_segment(&[13]));
        report.segments.insert((1, 1), padded_segment(&[14, 15]));
        report.actual_block_sizes.insert(0, 13);
        report.actual_block_sizes.insert(1, 2);
        report.total_file_size = 15;

        let out = reassemble(&report);
        assert_eq!(out.bytes, (1..=15).collect::<Vec<u8>>());
    }
}

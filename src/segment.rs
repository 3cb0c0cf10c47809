//! Block segmentation arithmetic.
//!
//! A byte stream splits into fixed-size blocks (the final block may be a
//! shorter remainder). Each block decomposes into 96-bit addressed
//! segments; addresses start at 1 and increase monotonically within the
//! block, so a block needs `ceil(actual_bytes / 12)` addresses. The final
//! segment is right-padded with zero bits; padding is discarded at
//! reassembly via the declared byte counts, never via an in-band marker.

use crate::bits::bytes_to_bits;
use crate::{PAYLOAD_BITS, PAYLOAD_BYTES};

/// One block of the source stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSlice {
    /// Position in the stream, from 0.
    pub index: usize,
    /// Raw bytes of this block.
    pub data: Vec<u8>,
}

impl BlockSlice {
    pub fn actual_bytes(&self) -> usize {
        self.data.len()
    }
}

/// A 96-bit payload chunk with its in-block address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedPayload {
    /// 1-based address within the block.
    pub address: u32,
    /// Exactly [`PAYLOAD_BITS`] bits; the final chunk is zero-padded.
    pub bits: Vec<bool>,
}

/// Result of segmenting one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSegments {
    pub segments: Vec<AddressedPayload>,
    /// Set when the address ceiling cut segmentation short. Callers must
    /// surface this as `AddressSpaceExhausted`; the partial output is
    /// still returned so nothing truncates silently.
    pub truncated: bool,
}

/// Split raw input into fixed-size blocks. Empty input yields no blocks.
pub fn split_into_blocks(input: &[u8], block_size: usize) -> Vec<BlockSlice> {
    assert!(block_size > 0, "block size must be non-zero");
    input
        .chunks(block_size)
        .enumerate()
        .map(|(index, chunk)| BlockSlice {
            index,
            data: chunk.to_vec(),
        })
        .collect()
}

/// Number of segments a block of `actual_bytes` requires.
pub fn segments_needed(actual_bytes: usize) -> usize {
    (actual_bytes + PAYLOAD_BYTES - 1) / PAYLOAD_BYTES
}

/// Cut a block's bits into addressed 96-bit payloads.
///
/// Stops early once the next address would exceed `max_address`.
pub fn segment_block(block_bits: &[bool], max_address: u32) -> BlockSegments {
    let mut segments = Vec::with_capacity((block_bits.len() + PAYLOAD_BITS - 1) / PAYLOAD_BITS);
    let mut address: u32 = 1;
    let mut truncated = false;

    for chunk in block_bits.chunks(PAYLOAD_BITS) {
        if address > max_address {
            truncated = true;
            break;
        }
        let mut bits = chunk.to_vec();
        bits.resize(PAYLOAD_BITS, false);
        segments.push(AddressedPayload { address, bits });
        address += 1;
    }

    BlockSegments {
        segments,
        truncated,
    }
}

/// Convenience: segment a block given as bytes.
pub fn segment_block_bytes(block: &[u8], max_address: u32) -> BlockSegments {
    segment_block(&bytes_to_bits(block), max_address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_basic() {
        let input: Vec<u8> = (0..25).collect();
        let blocks = split_into_blocks(&input, 10);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].index, 0);
        assert_eq!(blocks[0].actual_bytes(), 10);
        assert_eq!(blocks[2].index, 2);
        assert_eq!(blocks[2].actual_bytes(), 5);
    }

    #[test]
    fn split_exact() {
        let input = vec![0u8; 20];
        let blocks = split_into_blocks(&input, 10);
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.actual_bytes() == 10));
    }

    #[test]
    fn split_empty() {
        assert!(split_into_blocks(&[], 10).is_empty());
    }

    #[test]
    fn addresses_are_contiguous_from_one() {
        let block = vec![0xABu8; 30]; // 3 segments: 12 + 12 + 6 bytes
        let segs = segment_block_bytes(&block, 524_287);
        assert!(!segs.truncated);
        assert_eq!(segs.segments.len(), segments_needed(30));
        let addresses: Vec<u32> = segs.segments.iter().map(|s| s.address).collect();
        assert_eq!(addresses, vec![1, 2, 3]);
    }

    #[test]
    fn final_segment_is_zero_padded() {
        let block = vec![0xFFu8; 13]; // second segment holds 1 real byte
        let segs = segment_block_bytes(&block, 524_287);
        let last = &segs.segments[1];
        assert_eq!(last.bits.len(), PAYLOAD_BITS);
        assert!(last.bits[..8].iter().all(|&b| b));
        assert!(last.bits[8..].iter().all(|&b| !b));
    }

    #[test]
    fn address_ceiling_truncates_with_signal() {
        let block = vec![0u8; 12 * 5];
        let segs = segment_block_bytes(&block, 3);
        assert!(segs.truncated);
        assert_eq!(segs.segments.len(), 3);
        assert_eq!(segs.segments.last().unwrap().address, 3);
    }
}

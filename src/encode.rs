//! Segment-to-oligo encode pipeline.
//!
//! For each addressed payload: serialize the 19-bit address, checksum the
//! payload, encode each field to bases from its own rolling homopolymer
//! window, then frame with the flank pair. Fields never share a window,
//! so no field's constraint depends on another field's trailing bases.

use crate::bits::{bits_to_bitstring, bytes_to_bits, value_to_bits};
use crate::checksum;
use crate::config::CodecConfig;
use crate::framing::{frame, FlankPair};
use crate::record::OligoRecord;
use crate::segment::{segment_block, segments_needed, split_into_blocks, BlockSlice};
use crate::symbols::{encode_bits, BaseWindow, SynonymPolicy};
use crate::{OligoError, ADDRESS_BITS};

/// Details of an address-ceiling truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressTruncation {
    /// Segments the block actually needed.
    pub needed: usize,
    /// Ceiling that cut it short.
    pub ceiling: u32,
}

/// Encode output for one block: records plus the truncation signal.
///
/// Truncation is never silent; callers that cannot use partial output
/// should go through [`EncodedBlock::into_result`].
#[derive(Debug, Clone)]
pub struct EncodedBlock {
    pub records: Vec<OligoRecord>,
    pub truncated: Option<AddressTruncation>,
}

impl EncodedBlock {
    /// Treat truncation as fatal, discarding the partial output.
    pub fn into_result(self) -> Result<Vec<OligoRecord>, OligoError> {
        match self.truncated {
            Some(t) => Err(OligoError::AddressSpaceExhausted {
                needed: t.needed,
                ceiling: t.ceiling,
            }),
            None => Ok(self.records),
        }
    }
}

/// Encode one block slice into oligo records.
///
/// `total_file_size` is the declared size recorded alongside every
/// segment; for a standalone per-pool block file it equals the block's own
/// byte count, for a whole-stream table it is the file size.
pub fn encode_block(
    block: &BlockSlice,
    cfg: &CodecConfig,
    flanks: Option<&FlankPair>,
    total_file_size: usize,
    policy: &mut dyn SynonymPolicy,
) -> EncodedBlock {
    let actual_bytes = block.actual_bytes();
    let ceiling = cfg.effective_max_address();
    let segments = segment_block(&bytes_to_bits(&block.data), ceiling);

    let mut records = Vec::with_capacity(segments.segments.len());

    for seg in &segments.segments {
        let address_bits = value_to_bits(seg.address, ADDRESS_BITS);
        let crc_bits = checksum::checksum_bits(&seg.bits);

        let address_dna = encode_bits(&address_bits, &mut BaseWindow::new(), policy);
        let payload_dna = encode_bits(&seg.bits, &mut BaseWindow::new(), policy);
        let crc_dna = encode_bits(&crc_bits, &mut BaseWindow::new(), policy);

        records.push(OligoRecord {
            block_index: block.index,
            address: bits_to_bitstring(&address_bits),
            payload: bits_to_bitstring(&seg.bits),
            checksum: bits_to_bitstring(&crc_bits),
            oligo: frame(&address_dna, &payload_dna, &crc_dna, flanks),
            block_size_bytes: cfg.block_size,
            actual_block_size_bytes: actual_bytes,
            total_file_size_bytes: total_file_size,
        });
    }

    let truncated = segments.truncated.then(|| AddressTruncation {
        needed: segments_needed(actual_bytes),
        ceiling,
    });

    EncodedBlock { records, truncated }
}

/// Encode a whole byte stream into one record table.
///
/// Strict about the address ceiling: any truncated block aborts with
/// `AddressSpaceExhausted`.
pub fn encode_bytes(
    data: &[u8],
    cfg: &CodecConfig,
    flanks: Option<&FlankPair>,
    policy: &mut dyn SynonymPolicy,
) -> Result<Vec<OligoRecord>, OligoError> {
    cfg.validate()?;
    let mut records = Vec::new();
    for block in split_into_blocks(data, cfg.block_size) {
        let encoded = encode_block(&block, cfg, flanks, data.len(), policy);
        records.extend(encoded.into_result()?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::unframe;
    use crate::symbols::{LeadSynonym, RandomSynonyms};
    use crate::{CHECKSUM_BITS, FLANK_LEN, PAYLOAD_BITS};

    fn cfg() -> CodecConfig {
        CodecConfig::default()
    }

    #[test]
    fn record_shape_is_invariant() {
        let block = BlockSlice {
            index: 0,
            data: vec![0x5A; 30],
        };
        let pair = FlankPair::universal();
        let out = encode_block(&block, &cfg(), Some(&pair), 30, &mut RandomSynonyms::from_seed(1));
        assert!(out.truncated.is_none());
        assert_eq!(out.records.len(), 3);
        for rec in &out.records {
            assert_eq!(
                rec.oligo.len(),
                2 * FLANK_LEN + ADDRESS_BITS + PAYLOAD_BITS + CHECKSUM_BITS
            );
            assert_eq!(rec.address.len(), ADDRESS_BITS);
            assert_eq!(rec.payload.len(), PAYLOAD_BITS);
            assert_eq!(rec.checksum.len(), CHECKSUM_BITS);
        }
    }

    #[test]
    fn pre_split_columns_agree_with_oligo() {
        let block = BlockSlice {
            index: 2,
            data: vec![0xC3; 12],
        };
        let pair = FlankPair::universal();
        let out = encode_block(&block, &cfg(), Some(&pair), 12, &mut LeadSynonym);
        let rec = &out.records[0];
        let fields = unframe(&rec.oligo, Some(&pair)).unwrap();
        let address = crate::symbols::decode_sequence(fields.address).unwrap();
        let payload = crate::symbols::decode_sequence(fields.payload).unwrap();
        assert_eq!(bits_to_bitstring(&address), rec.address);
        assert_eq!(bits_to_bitstring(&payload), rec.payload);
    }

    #[test]
    fn ceiling_surfaces_as_exhaustion() {
        let block = BlockSlice {
            index: 0,
            data: vec![0; 12 * 4],
        };
        let tight = CodecConfig {
            max_address: 2,
            ..CodecConfig::default()
        };
        let out = encode_block(&block, &tight, None, 48, &mut LeadSynonym);
        let trunc = out.truncated.expect("must signal truncation");
        assert_eq!(trunc.needed, 4);
        assert_eq!(trunc.ceiling, 2);
        assert_eq!(out.records.len(), 2);
        assert!(matches!(
            EncodedBlock {
                records: out.records,
                truncated: Some(trunc)
            }
            .into_result(),
            Err(OligoError::AddressSpaceExhausted { needed: 4, ceiling: 2 })
        ));
    }

    #[test]
    fn empty_input_encodes_to_nothing() {
        let records = encode_bytes(&[], &cfg(), None, &mut LeadSynonym).unwrap();
        assert!(records.is_empty());
    }
}

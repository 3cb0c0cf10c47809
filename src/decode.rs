//! Checksum-gated batch decode of oligo records.
//!
//! Every record resolves to a per-record result; malformed records are
//! counted and skipped so a handful of bad rows cannot abort a
//! multi-thousand-record decode. Only the oligo sequence, block index and
//! declared sizes of each record are trusted; address, payload and
//! checksum come from unframing the sequence itself.

use std::collections::BTreeMap;

use crate::bits::bits_to_value;
use crate::checksum;
use crate::framing::{unframe, FlankPair};
use crate::record::OligoRecord;
use crate::symbols::decode_sequence;
use crate::{OligoError, CHECKSUM_BITS};

/// Checksum classification counts for a decode pass. Every record lands
/// in exactly one bucket (or in [`DecodeErrors`] before checksumming).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrcStats {
    pub valid: usize,
    pub invalid: usize,
    pub missing: usize,
}

/// Per-kind counts of records dropped before checksum classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeErrors {
    /// Core shorter than address + payload after flank stripping, or
    /// not plain single-byte symbols.
    pub record_too_short: usize,
    /// A symbol outside the A/C/G/T alphabet.
    pub invalid_symbol: usize,
}

impl DecodeErrors {
    pub fn total(&self) -> usize {
        self.record_too_short + self.invalid_symbol
    }
}

/// Checksum outcome for one decoded segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcOutcome {
    Valid,
    /// Recomputed CRC disagreed; the segment must not be used.
    Invalid,
    /// Checksum region absent or shorter than 32 symbols.
    Missing,
}

/// One successfully unframed segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSegment {
    pub block_index: usize,
    pub address: u32,
    pub payload_bits: Vec<bool>,
    pub crc: CrcOutcome,
}

/// Aggregate result of a batch decode.
#[derive(Debug, Clone, Default)]
pub struct DecodeReport {
    /// Usable payloads keyed by (block index, address); the map order is
    /// the canonical reassembly order.
    pub segments: BTreeMap<(usize, u32), Vec<bool>>,
    pub crc: CrcStats,
    pub errors: DecodeErrors,
    /// Declared maximum block size, from the records.
    pub block_size_bytes: usize,
    /// Declared actual byte count per block index.
    pub actual_block_sizes: BTreeMap<usize, usize>,
    /// Declared total original file size, 0 when unknown.
    pub total_file_size: usize,
}

impl DecodedSegment {
    /// Reject a checksum-invalid segment, for callers treating a single
    /// record as their whole input.
    pub fn checked(self) -> Result<Self, OligoError> {
        match self.crc {
            CrcOutcome::Invalid => Err(OligoError::ChecksumMismatch {
                block: self.block_index,
                address: self.address,
            }),
            _ => Ok(self),
        }
    }
}

/// Decode a single record.
///
/// `Err` carries only the recoverable per-record kinds (`RecordTooShort`,
/// `InvalidSymbol`); a failing checksum comes back as `Ok` with
/// [`CrcOutcome::Invalid`] so the batch can count it before discarding.
pub fn decode_record(
    record: &OligoRecord,
    flanks: Option<&FlankPair>,
) -> Result<DecodedSegment, OligoError> {
    let fields = unframe(&record.oligo, flanks).ok_or(OligoError::RecordTooShort)?;

    let address_bits = decode_sequence(fields.address)?;
    let payload_bits = decode_sequence(fields.payload)?;
    let address = bits_to_value(&address_bits);

    let crc = if fields.checksum.len() >= CHECKSUM_BITS {
        let crc_bits = decode_sequence(&fields.checksum[..CHECKSUM_BITS])?;
        if checksum::verify(&payload_bits, &crc_bits) {
            CrcOutcome::Valid
        } else {
            CrcOutcome::Invalid
        }
    } else {
        CrcOutcome::Missing
    };

    Ok(DecodedSegment {
        block_index: record.block_index,
        address,
        payload_bits,
        crc,
    })
}

/// Decode a batch of records into a [`DecodeReport`].
///
/// Segments with a failing checksum are discarded entirely (counted as
/// invalid, never partially used). Segments with no checksum are kept but
/// counted as missing, matching the reference pipeline.
pub fn decode_records(records: &[OligoRecord], flanks: Option<&FlankPair>) -> DecodeReport {
    let mut report = DecodeReport::default();

    for record in records {
        if record.block_size_bytes > 0 {
            report.block_size_bytes = record.block_size_bytes;
        }
        if record.actual_block_size_bytes > 0 {
            report
                .actual_block_sizes
                .insert(record.block_index, record.actual_block_size_bytes);
        }
        if record.total_file_size_bytes > 0 {
            report.total_file_size = record.total_file_size_bytes;
        }

        match decode_record(record, flanks) {
            Ok(seg) if seg.crc == CrcOutcome::Invalid => report.crc.invalid += 1,
            Ok(seg) => {
                match seg.crc {
                    CrcOutcome::Valid => report.crc.valid += 1,
                    _ => report.crc.missing += 1,
                }
                report
                    .segments
                    .insert((seg.block_index, seg.address), seg.payload_bits);
            }
            Err(OligoError::RecordTooShort) => report.errors.record_too_short += 1,
            // decode_record emits nothing else, so anything left is a
            // symbol failure.
            Err(_) => report.errors.invalid_symbol += 1,
        }
    }

    report
}

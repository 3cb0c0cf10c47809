//! Core logic for the oligostore molecular storage codec.
//!
//! A binary payload is split into blocks, each block into addressed
//! 96-bit segments, and each segment is encoded as a fixed-structure
//! quaternary (DNA) sequence: `flank ++ address(19) ++ payload(96) ++
//! crc32(32) ++ flank`. Decoding reverses the transform with
//! checksum-gated integrity classification, and the pool layer manages
//! redundant placement of blocks across storage partitions plus
//! reconstruction from a possibly-incomplete set of partition outputs.

pub mod bits;
pub mod checksum;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod framing;
pub mod io_utils;
pub mod pool;
pub mod reassemble;
pub mod record;
pub mod segment;
pub mod symbols;

/// Width of the address field in bits (and symbols).
pub const ADDRESS_BITS: usize = 19;
/// Width of the payload field in bits (and symbols).
pub const PAYLOAD_BITS: usize = 96;
/// Payload capacity per segment in bytes.
pub const PAYLOAD_BYTES: usize = PAYLOAD_BITS / 8;
/// Width of the checksum field in bits (and symbols).
pub const CHECKSUM_BITS: usize = 32;
/// Length of a flank (primer) sequence in symbols.
pub const FLANK_LEN: usize = 22;

pub use config::CodecConfig;
pub use decode::{
    decode_record, decode_records, CrcOutcome, CrcStats, DecodeErrors, DecodeReport, DecodedSegment,
};
pub use encode::{encode_block, encode_bytes, AddressTruncation, EncodedBlock};
pub use error::OligoError;
pub use framing::{frame, unframe, Flank, FlankPair};
pub use pool::{
    round_robin_pools, Classification, PartitionResult, PoolBlockEncoding, PoolId, PoolManager,
    PrimerRegistry, Reconstructor, RegistryWarning,
};
pub use reassemble::{concat_segments, reassemble, Reassembled};
pub use record::OligoRecord;
pub use segment::{segment_block, segments_needed, split_into_blocks, BlockSlice};
pub use symbols::{
    decode_sequence, encode_bits, BaseWindow, LeadSynonym, RandomSynonyms, SynonymPolicy,
    HOMOPOLYMER_LIMIT,
};

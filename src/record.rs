//! The tabular oligo record exchanged with storage.
//!
//! Column names match the CSV layout emitted by the synthesis pipeline.
//! The decode path trusts only the oligo sequence, the block index and the
//! three declared size columns; address, payload and checksum are
//! re-derived by unframing, which keeps the core robust against foreign
//! or partially filled tables.

use serde::{Deserialize, Serialize};

/// One encoded segment as stored in the delimited record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OligoRecord {
    #[serde(rename = "Block Index")]
    pub block_index: usize,
    /// 19-char bit string (informational; re-derived on decode).
    #[serde(rename = "Address")]
    pub address: String,
    /// 96-char bit string (informational; re-derived on decode).
    #[serde(rename = "Data Bits")]
    pub payload: String,
    /// 32-char bit string (informational; re-derived on decode).
    #[serde(rename = "CRC32 Checksum")]
    pub checksum: String,
    /// The full symbol sequence including flanks.
    #[serde(rename = "DNA Oligo")]
    pub oligo: String,
    #[serde(rename = "Block Size (Bytes)")]
    pub block_size_bytes: usize,
    #[serde(rename = "Actual Block Size (Bytes)")]
    pub actual_block_size_bytes: usize,
    #[serde(rename = "Total File Size (Bytes)")]
    pub total_file_size_bytes: usize,
}

use thiserror::Error;

/// Crate level error type.
///
/// Batch decode paths do not return `RecordTooShort`, `InvalidSymbol` or
/// `ChecksumMismatch` directly; those are counted per record in a
/// [`crate::decode::DecodeReport`] so one malformed record cannot abort a
/// multi-thousand-record decode. The variants exist for the per-record
/// result type and for callers that decode single sequences.
#[derive(Error, Debug)]
pub enum OligoError {
    /// Bit stream input contained something other than '0' or '1'.
    #[error("invalid input character '{0}': bit streams may only contain '0' and '1'")]
    InvalidInputCharacter(char),

    /// A sequence contained a symbol outside the A/C/G/T alphabet.
    #[error("invalid symbol '{0}' in sequence")]
    InvalidSymbol(char),

    /// After flank stripping the core was shorter than address + payload.
    #[error("record too short: core sequence does not hold a full address and payload")]
    RecordTooShort,

    /// Recomputed CRC-32 did not match the checksum field.
    #[error("checksum mismatch for block {block} address {address}")]
    ChecksumMismatch { block: usize, address: u32 },

    /// A block needed more segments than the address ceiling allows.
    #[error("address space exhausted: block needs {needed} segments, ceiling is {ceiling}")]
    AddressSpaceExhausted { needed: usize, ceiling: u32 },

    /// Flanks must be exactly [`crate::FLANK_LEN`] symbols.
    #[error("flank must be exactly {expected} symbols, got {got}")]
    InvalidFlankLength { expected: usize, got: usize },

    /// Reconstruction saw a gap in the block index range.
    #[error("incomplete reconstruction: missing block indices {0:?}")]
    IncompleteBlocks(Vec<usize>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Propagated CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

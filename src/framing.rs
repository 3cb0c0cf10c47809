//! Fixed-field oligo framing.
//!
//! A full oligo is `forward ++ address(19) ++ payload(96) ++ checksum(32)
//! ++ reverse`. Flanks are 22-symbol primer sequences outside the
//! addressable fields; they are stripped before any decoding. Unframing a
//! sequence too short to hold address + payload yields `None`, a
//! skip-and-continue signal rather than an error.

use crate::{OligoError, ADDRESS_BITS, FLANK_LEN, PAYLOAD_BITS};

/// Default forward primer from the universal Illumina adapter set.
pub const DEFAULT_FORWARD_FLANK: &str = "CTACACGACGCTCTTCCGATCT";
/// Default reverse primer.
pub const DEFAULT_REVERSE_FLANK: &str = "AGATCGGAAGAGCGGTTCAGCA";

/// A validated 22-symbol flank (primer) sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flank(String);

impl Flank {
    pub fn new(seq: impl Into<String>) -> Result<Self, OligoError> {
        let seq = seq.into();
        if seq.len() != FLANK_LEN {
            return Err(OligoError::InvalidFlankLength {
                expected: FLANK_LEN,
                got: seq.len(),
            });
        }
        Ok(Self(seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Forward/reverse primer pair tagging one (pool, block) encode pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlankPair {
    pub forward: Flank,
    pub reverse: Flank,
}

impl FlankPair {
    pub fn new(forward: Flank, reverse: Flank) -> Self {
        Self { forward, reverse }
    }

    /// The universal default pair used when no registration exists.
    pub fn universal() -> Self {
        Self {
            forward: Flank(DEFAULT_FORWARD_FLANK.to_string()),
            reverse: Flank(DEFAULT_REVERSE_FLANK.to_string()),
        }
    }
}

impl Default for FlankPair {
    fn default() -> Self {
        Self::universal()
    }
}

/// The three core regions of an unframed oligo, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreFields<'a> {
    pub address: &'a str,
    pub payload: &'a str,
    /// Whatever remains past the payload; may be short or empty, which
    /// downstream classifies as a missing checksum.
    pub checksum: &'a str,
}

/// Assemble a full oligo from already-encoded field sequences.
pub fn frame(address: &str, payload: &str, checksum: &str, flanks: Option<&FlankPair>) -> String {
    let flank_len = flanks.map_or(0, |_| 2 * FLANK_LEN);
    let mut oligo =
        String::with_capacity(flank_len + address.len() + payload.len() + checksum.len());
    if let Some(pair) = flanks {
        oligo.push_str(pair.forward.as_str());
    }
    oligo.push_str(address);
    oligo.push_str(payload);
    oligo.push_str(checksum);
    if let Some(pair) = flanks {
        oligo.push_str(pair.reverse.as_str());
    }
    oligo
}

/// Strip flanks and slice the fixed-width core fields.
///
/// Flanks are removed only when present and matching, so sequences from
/// foreign sources still unframe as long as the core is long enough.
/// A core with multi-byte characters cannot hold valid symbols and is
/// treated the same as a short one.
pub fn unframe<'a>(sequence: &'a str, flanks: Option<&FlankPair>) -> Option<CoreFields<'a>> {
    let mut core = sequence;
    if let Some(pair) = flanks {
        if let Some(rest) = core.strip_prefix(pair.forward.as_str()) {
            core = rest;
        }
        if let Some(rest) = core.strip_suffix(pair.reverse.as_str()) {
            core = rest;
        }
    }
    if core.len() < ADDRESS_BITS + PAYLOAD_BITS || !core.is_ascii() {
        return None;
    }
    Some(CoreFields {
        address: &core[..ADDRESS_BITS],
        payload: &core[ADDRESS_BITS..ADDRESS_BITS + PAYLOAD_BITS],
        checksum: &core[ADDRESS_BITS + PAYLOAD_BITS..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flank_length_is_enforced() {
        assert!(Flank::new("ACGT").is_err());
        assert!(Flank::new("A".repeat(23)).is_err());
        assert!(Flank::new(DEFAULT_FORWARD_FLANK).is_ok());
    }

    #[test]
    fn frame_unframe_roundtrip() {
        let address = "A".repeat(19);
        let payload = "CG".repeat(48);
        let checksum = "T".repeat(32);
        let pair = FlankPair::universal();
        let oligo = frame(&address, &payload, &checksum, Some(&pair));
        assert_eq!(oligo.len(), 2 * FLANK_LEN + 19 + 96 + 32);
        let fields = unframe(&oligo, Some(&pair)).unwrap();
        assert_eq!(fields.address, address);
        assert_eq!(fields.payload, payload);
        assert_eq!(fields.checksum, checksum);
    }

    #[test]
    fn unframe_without_flanks() {
        let oligo = frame("A".repeat(19).as_str(), "G".repeat(96).as_str(), "", None);
        let fields = unframe(&oligo, None).unwrap();
        assert_eq!(fields.checksum, "");
    }

    #[test]
    fn short_core_is_none_not_error() {
        let pair = FlankPair::universal();
        let oligo = frame("A".repeat(19).as_str(), "G".repeat(50).as_str(), "", Some(&pair));
        assert!(unframe(&oligo, Some(&pair)).is_none());
        assert!(unframe("", Some(&pair)).is_none());
    }

    #[test]
    fn foreign_flanks_are_left_in_place() {
        // Without a matching prefix the core is sliced from position 0.
        let oligo = format!("{}{}{}", "A".repeat(19), "C".repeat(96), "G".repeat(32));
        let pair = FlankPair::universal();
        let fields = unframe(&oligo, Some(&pair)).unwrap();
        assert_eq!(fields.address, "A".repeat(19));
        assert_eq!(fields.checksum, "G".repeat(32));
    }
}

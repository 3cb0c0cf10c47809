//! CRC-32 integrity guard for segment payloads.
//!
//! The checksum is computed over the payload bits packed MSB-first into
//! big-endian bytes, with the final partial byte zero-padded on the right.
//! Encode and decode share this convention through
//! [`crate::bits::bits_to_padded_bytes`]; diverging paddings would make
//! every verification fail.

use crate::bits::{bits_to_padded_bytes, value_to_bits};
use crate::CHECKSUM_BITS;

/// Compute the CRC-32 of a payload bit sequence.
pub fn compute(payload_bits: &[bool]) -> u32 {
    let mut crc = crc32fast::Hasher::new();
    crc.update(&bits_to_padded_bytes(payload_bits));
    crc.finalize()
}

/// Compute the checksum as a 32-bit MSB-first field ready for framing.
pub fn checksum_bits(payload_bits: &[bool]) -> Vec<bool> {
    value_to_bits(compute(payload_bits), CHECKSUM_BITS)
}

/// Recompute and compare. A short or empty checksum field never verifies.
pub fn verify(payload_bits: &[bool], checksum: &[bool]) -> bool {
    checksum.len() == CHECKSUM_BITS && checksum_bits(payload_bits) == checksum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::bytes_to_bits;

    #[test]
    fn matches_known_crc32() {
        // IEEE CRC-32 of "123456789" is 0xCBF43926.
        let bits = bytes_to_bits(b"123456789");
        assert_eq!(compute(&bits), 0xCBF4_3926);
    }

    #[test]
    fn unmodified_pair_verifies() {
        let payload = bytes_to_bits(&[0xDE, 0xAD, 0xBE, 0xEF]);
        let crc = checksum_bits(&payload);
        assert!(verify(&payload, &crc));
    }

    #[test]
    fn any_single_bit_flip_is_rejected() {
        let payload = bytes_to_bits(&[0x42; 12]);
        let crc = checksum_bits(&payload);
        for i in 0..payload.len() {
            let mut flipped = payload.clone();
            flipped[i] = !flipped[i];
            assert!(!verify(&flipped, &crc), "flip at bit {i} went undetected");
        }
    }

    #[test]
    fn short_checksum_never_verifies() {
        let payload = bytes_to_bits(&[1, 2, 3]);
        let crc = checksum_bits(&payload);
        assert!(!verify(&payload, &crc[..16]));
        assert!(!verify(&payload, &[]));
    }

    #[test]
    fn padding_is_right_aligned() {
        // 4 bits 0b1010 pad to the byte 0xA0, not 0x0A.
        let bits = vec![true, false, true, false];
        let mut crc = crc32fast::Hasher::new();
        crc.update(&[0xA0]);
        assert_eq!(compute(&bits), crc.finalize());
    }
}

//! Bit vector helpers.
//!
//! All conversions are MSB-first big-endian: byte `0b1010_0000` becomes
//! `[true, false, true, false, false, false, false, false]`. The tabular
//! record format carries bit fields as '0'/'1' strings, so string
//! conversions live here as well.

use crate::OligoError;

/// Expand bytes into an MSB-first bit vector.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 != 0);
        }
    }
    bits
}

/// Pack bits into bytes, dropping any trailing partial byte.
///
/// Returns the packed bytes and the number of dangling bits that were
/// dropped. Callers that know the true byte length should trim the bit
/// vector first; a nonzero drop count is a boundary warning, never a
/// silent zero-extension.
pub fn bits_to_bytes(bits: &[bool]) -> (Vec<u8>, usize) {
    let whole = bits.len() / 8;
    let mut out = Vec::with_capacity(whole);
    for chunk in bits[..whole * 8].chunks(8) {
        let mut byte = 0u8;
        for &bit in chunk {
            byte = (byte << 1) | bit as u8;
        }
        out.push(byte);
    }
    (out, bits.len() - whole * 8)
}

/// Pack bits into bytes, zero-padding the final partial byte on the right.
///
/// This is the checksum input convention: both encode and decode must pad
/// the same way or verification fails spuriously.
pub fn bits_to_padded_bytes(bits: &[bool]) -> Vec<u8> {
    let mut out = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for &bit in chunk {
            byte = (byte << 1) | bit as u8;
        }
        byte <<= 8 - chunk.len();
        out.push(byte);
    }
    out
}

/// Serialize `value` as a fixed-width MSB-first bit field.
pub fn value_to_bits(value: u32, width: usize) -> Vec<bool> {
    (0..width).rev().map(|i| (value >> i) & 1 != 0).collect()
}

/// Read a bit field back into an integer.
pub fn bits_to_value(bits: &[bool]) -> u32 {
    bits.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32)
}

/// Parse a '0'/'1' string into bits.
pub fn bitstring_to_bits(s: &str) -> Result<Vec<bool>, OligoError> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(OligoError::InvalidInputCharacter(other)),
        })
        .collect()
}

/// Render bits as a '0'/'1' string for the tabular record format.
pub fn bits_to_bitstring(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_roundtrip() {
        let data = vec![0x00, 0xFF, 0xA5, 0x3C];
        let bits = bytes_to_bits(&data);
        assert_eq!(bits.len(), 32);
        let (back, dropped) = bits_to_bytes(&bits);
        assert_eq!(back, data);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn dangling_bits_are_dropped_and_counted() {
        let mut bits = bytes_to_bits(&[0xAB]);
        bits.extend([true, false, true]);
        let (bytes, dropped) = bits_to_bytes(&bits);
        assert_eq!(bytes, vec![0xAB]);
        assert_eq!(dropped, 3);
    }

    #[test]
    fn padded_bytes_pad_on_the_right() {
        // 1010 1 -> 1010_1000
        let bits = vec![true, false, true, false, true];
        assert_eq!(bits_to_padded_bytes(&bits), vec![0b1010_1000]);
    }

    #[test]
    fn fixed_width_field_roundtrip() {
        let bits = value_to_bits(1, 19);
        assert_eq!(bits.len(), 19);
        assert_eq!(bits_to_bitstring(&bits), "0000000000000000001");
        assert_eq!(bits_to_value(&bits), 1);
        assert_eq!(bits_to_value(&value_to_bits(524287, 19)), 524287);
    }

    #[test]
    fn bitstring_rejects_foreign_characters() {
        assert!(matches!(
            bitstring_to_bits("0102"),
            Err(OligoError::InvalidInputCharacter('2'))
        ));
        assert_eq!(bitstring_to_bits("0110").unwrap().len(), 4);
    }
}

//! Bit to nucleotide mapping with the homopolymer constraint.
//!
//! Each bit value owns a two-base synonym set: 0 -> {A, C}, 1 -> {G, T}.
//! Which synonym gets emitted is up to a pluggable [`SynonymPolicy`]; the
//! classes partition the alphabet, so decoding is a plain lookup no matter
//! which synonym the encoder picked. The only encode-time constraint is
//! that no run of four identical bases may appear: a [`BaseWindow`] tracks
//! the last three emitted bases and forces the in-class alternate when a
//! fourth repeat would form.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::OligoError;

/// Maximum permitted homopolymer run length.
pub const HOMOPOLYMER_LIMIT: usize = 3;

/// Synonym bases for bit 0.
pub const ZERO_BASES: [u8; 2] = [b'A', b'C'];
/// Synonym bases for bit 1.
pub const ONE_BASES: [u8; 2] = [b'G', b'T'];

/// The in-class alternate for a base (A<->C, G<->T).
pub fn synonym_of(base: u8) -> u8 {
    match base {
        b'A' => b'C',
        b'C' => b'A',
        b'G' => b'T',
        b'T' => b'G',
        other => other,
    }
}

/// Decode one base to its bit value.
pub fn bit_of_base(base: u8) -> Result<bool, OligoError> {
    match base {
        b'A' | b'C' => Ok(false),
        b'G' | b'T' => Ok(true),
        other => Err(OligoError::InvalidSymbol(other as char)),
    }
}

/// Strategy for picking a synonym base for a bit.
///
/// Any implementation is valid as long as the returned base belongs to the
/// bit's synonym class; the homopolymer substitution is applied afterwards
/// by the encoder, so policies do not need to inspect `recent` (it is
/// provided for strategies that want to, e.g. GC balancing).
pub trait SynonymPolicy {
    fn choose(&mut self, bit: bool, recent: &[u8]) -> u8;
}

/// Default policy: uniform random synonym choice.
///
/// Each encode pass should own its own instance so concurrent passes draw
/// from independent streams.
#[derive(Debug, Clone)]
pub struct RandomSynonyms {
    rng: SmallRng,
}

impl RandomSynonyms {
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible output in tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSynonyms {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl SynonymPolicy for RandomSynonyms {
    fn choose(&mut self, bit: bool, _recent: &[u8]) -> u8 {
        let pair = if bit { ONE_BASES } else { ZERO_BASES };
        pair[self.rng.gen_range(0..2)]
    }
}

/// Deterministic policy: always the first synonym (A for 0, G for 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadSynonym;

impl SynonymPolicy for LeadSynonym {
    fn choose(&mut self, bit: bool, _recent: &[u8]) -> u8 {
        if bit {
            ONE_BASES[0]
        } else {
            ZERO_BASES[0]
        }
    }
}

/// Sliding window over the last [`HOMOPOLYMER_LIMIT`] emitted bases.
#[derive(Debug, Clone, Default)]
pub struct BaseWindow {
    recent: Vec<u8>,
}

impl BaseWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if emitting `base` next would create a run of four.
    pub fn would_extend_run(&self, base: u8) -> bool {
        self.recent.len() >= HOMOPOLYMER_LIMIT && self.recent.iter().all(|&b| b == base)
    }

    pub fn push(&mut self, base: u8) {
        self.recent.push(base);
        if self.recent.len() > HOMOPOLYMER_LIMIT {
            self.recent.remove(0);
        }
    }

    pub fn recent(&self) -> &[u8] {
        &self.recent
    }
}

/// Encode a bit sequence into bases, honoring the homopolymer constraint.
///
/// The window is both read and advanced; framed fields that must not
/// constrain each other should each encode from their own clone of the
/// window.
pub fn encode_bits(
    bits: &[bool],
    window: &mut BaseWindow,
    policy: &mut dyn SynonymPolicy,
) -> String {
    let mut seq = String::with_capacity(bits.len());
    for &bit in bits {
        let mut base = policy.choose(bit, window.recent());
        if window.would_extend_run(base) {
            base = synonym_of(base);
        }
        window.push(base);
        seq.push(base as char);
    }
    seq
}

/// Decode a base sequence back to bits. Pure lookup per symbol.
pub fn decode_sequence(seq: &str) -> Result<Vec<bool>, OligoError> {
    seq.bytes().map(bit_of_base).collect()
}

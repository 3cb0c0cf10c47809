//! Pool (partition) management: primer registry, redundant distribution,
//! read classification and block-ordered reconstruction.
//!
//! A pool is an independent storage partition. Each (pool, block) pair
//! carries its own primer pair so reads can be demultiplexed by exact
//! forward-flank prefix match. The registry is plain caller-owned state;
//! nothing here is global.

use std::collections::{BTreeMap, HashMap};

use crate::bits::bits_to_value;
use crate::config::CodecConfig;
use crate::decode::{decode_records, CrcStats, DecodeReport};
use crate::encode::{encode_block, EncodedBlock};
use crate::framing::FlankPair;
use crate::reassemble::{reassemble, Reassembled};
use crate::record::OligoRecord;
use crate::segment::{split_into_blocks, BlockSlice};
use crate::symbols::{decode_sequence, SynonymPolicy};
use crate::{OligoError, ADDRESS_BITS};

pub type PoolId = u32;

/// Registration-time warning: two forward flanks are prefix-related, so
/// classification between them is implementation-defined. Surfaced here
/// instead of being silently resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryWarning {
    pub new_entry: (PoolId, usize),
    pub existing_entry: (PoolId, usize),
}

/// Caller-owned mapping of (pool, block) to primer pair, with a default
/// pair for unregistered combinations.
#[derive(Debug, Clone)]
pub struct PrimerRegistry {
    entries: HashMap<(PoolId, usize), FlankPair>,
    default: FlankPair,
}

impl Default for PrimerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimerRegistry {
    pub fn new() -> Self {
        Self::with_default(FlankPair::universal())
    }

    pub fn with_default(default: FlankPair) -> Self {
        Self {
            entries: HashMap::new(),
            default,
        }
    }

    /// Register a primer pair for a (pool, block) combination.
    ///
    /// Returns a warning per already-registered forward flank that is a
    /// prefix of the new one (or vice versa); such pairs make prefix
    /// classification ambiguous.
    pub fn register(
        &mut self,
        pool: PoolId,
        block: usize,
        pair: FlankPair,
    ) -> Vec<RegistryWarning> {
        let warnings = self
            .entries
            .iter()
            .filter(|(&key, existing)| {
                key != (pool, block) && {
                    let a = existing.forward.as_str();
                    let b = pair.forward.as_str();
                    a.starts_with(b) || b.starts_with(a)
                }
            })
            .map(|(&key, _)| RegistryWarning {
                new_entry: (pool, block),
                existing_entry: key,
            })
            .collect();
        self.entries.insert((pool, block), pair);
        warnings
    }

    /// The flank pair for a combination, falling back to the default.
    pub fn flanks_for(&self, pool: PoolId, block: usize) -> &FlankPair {
        self.entries.get(&(pool, block)).unwrap_or(&self.default)
    }

    pub fn default_flanks(&self) -> &FlankPair {
        &self.default
    }

    /// All registered (pool, block) combinations.
    pub fn registered(&self) -> impl Iterator<Item = (PoolId, usize)> + '_ {
        self.entries.keys().copied()
    }
}

/// Result of demultiplexing a raw sequence against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Matched a registered forward flank by exact prefix.
    Known {
        pool: PoolId,
        block: usize,
        core: String,
    },
    /// No registered flank matched; default flanks were stripped if
    /// present but the pool/block stay unresolved.
    Unknown { core: String },
}

/// Output of one (pool, block) encode pass.
#[derive(Debug, Clone)]
pub struct PoolBlockEncoding {
    pub pool: PoolId,
    pub block_index: usize,
    pub encoded: EncodedBlock,
}

/// A per-partition decode result offered to the [`Reconstructor`].
#[derive(Debug, Clone)]
pub struct PartitionResult {
    pub pool: PoolId,
    pub block_index: usize,
    pub bytes: Vec<u8>,
    pub crc: CrcStats,
}

/// Drives encode, classification and decode against a primer registry.
#[derive(Debug, Clone)]
pub struct PoolManager {
    pub registry: PrimerRegistry,
    pub config: CodecConfig,
}

impl PoolManager {
    pub fn new(registry: PrimerRegistry, config: CodecConfig) -> Result<Self, OligoError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Encode one block's bytes for one pool using its registered flanks.
    pub fn encode_block(
        &self,
        data: &[u8],
        block_index: usize,
        pool: PoolId,
        policy: &mut dyn SynonymPolicy,
    ) -> EncodedBlock {
        let flanks = self.registry.flanks_for(pool, block_index).clone();
        let block = BlockSlice {
            index: block_index,
            data: data.to_vec(),
        };
        // Standalone block table: the declared total is the block itself.
        encode_block(&block, &self.config, Some(&flanks), data.len(), policy)
    }

    /// Split a file across pools under a caller-supplied policy.
    ///
    /// The policy maps `(block_index, total_blocks)` to the pools that
    /// should hold the block; a block in several pools is re-encoded per
    /// pool, so redundant copies differ in synonym choice by design.
    pub fn distribute<F>(
        &self,
        data: &[u8],
        mut policy: F,
        synonyms: &mut dyn SynonymPolicy,
    ) -> Vec<PoolBlockEncoding>
    where
        F: FnMut(usize, usize) -> Vec<PoolId>,
    {
        let blocks = split_into_blocks(data, self.config.block_size);
        let total = blocks.len();
        let mut out = Vec::new();
        for block in &blocks {
            for pool in policy(block.index, total) {
                out.push(PoolBlockEncoding {
                    pool,
                    block_index: block.index,
                    encoded: self.encode_block(&block.data, block.index, pool, synonyms),
                });
            }
        }
        out
    }

    /// Demultiplex a raw sequence by exact forward-flank prefix match.
    ///
    /// The registry is unordered; when two registered forward flanks are
    /// prefix-related the winner is implementation-defined (see
    /// [`PrimerRegistry::register`] warnings).
    pub fn classify(&self, sequence: &str) -> Classification {
        for ((pool, block), pair) in &self.registry.entries {
            if let Some(rest) = sequence.strip_prefix(pair.forward.as_str()) {
                let core = rest
                    .strip_suffix(pair.reverse.as_str())
                    .unwrap_or(rest)
                    .to_string();
                return Classification::Known {
                    pool: *pool,
                    block: *block,
                    core,
                };
            }
        }
        let mut core = sequence;
        let default = &self.registry.default;
        if let Some(rest) = core.strip_prefix(default.forward.as_str()) {
            core = rest;
        }
        if let Some(rest) = core.strip_suffix(default.reverse.as_str()) {
            core = rest;
        }
        Classification::Unknown {
            core: core.to_string(),
        }
    }

    /// Extract the 19-bit address from a sequence for data placement,
    /// independent of pool/block assignment.
    pub fn classify_by_address(
        &self,
        sequence: &str,
        pool: PoolId,
        block: usize,
    ) -> Option<(u32, String)> {
        let pair = self.registry.flanks_for(pool, block);
        let mut core = sequence;
        if let Some(rest) = core.strip_prefix(pair.forward.as_str()) {
            core = rest;
        }
        if let Some(rest) = core.strip_suffix(pair.reverse.as_str()) {
            core = rest;
        }
        if core.len() < ADDRESS_BITS {
            return None;
        }
        let bits = decode_sequence(&core[..ADDRESS_BITS]).ok()?;
        Some((bits_to_value(&bits), core.to_string()))
    }

    /// Decode one (pool, block) record set with its registered flanks.
    pub fn decode_block_records(
        &self,
        pool: PoolId,
        block: usize,
        records: &[OligoRecord],
    ) -> DecodeReport {
        decode_records(records, Some(self.registry.flanks_for(pool, block)))
    }

    /// Decode and reassemble one (pool, block) record set into a
    /// [`PartitionResult`] ready for reconstruction.
    pub fn decode_partition(
        &self,
        pool: PoolId,
        block: usize,
        records: &[OligoRecord],
    ) -> (PartitionResult, DecodeReport) {
        let report = self.decode_block_records(pool, block, records);
        let Reassembled { bytes, .. } = reassemble(&report);
        (
            PartitionResult {
                pool,
                block_index: block,
                bytes,
                crc: report.crc,
            },
            report,
        )
    }
}

/// Distribution policy: block `i` goes to pool `i % pools + 1`.
pub fn round_robin_pools(pools: PoolId) -> impl FnMut(usize, usize) -> Vec<PoolId> {
    move |block_index, _total| vec![(block_index as PoolId % pools) + 1]
}

/// The copy of a block kept during reconstruction.
#[derive(Debug, Clone)]
struct BlockCopy {
    pool: PoolId,
    bytes: Vec<u8>,
    crc: CrcStats,
}

/// Reconstructs a file from per-partition decode results.
///
/// Collecting: [`Reconstructor::add`] keeps at most one copy per block
/// index, preferring the copy with more CRC-valid segments (first seen
/// wins ties, and only the valid count is compared). Verifying:
/// [`Reconstructor::finish`] demands the kept indices cover `[0, max]`
/// with no gaps; on a gap nothing is emitted.
#[derive(Debug, Default)]
pub struct Reconstructor {
    copies: BTreeMap<usize, BlockCopy>,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one partition's decode of a block.
    pub fn add(&mut self, result: PartitionResult) {
        match self.copies.get(&result.block_index) {
            Some(existing) if result.crc.valid <= existing.crc.valid => {}
            _ => {
                self.copies.insert(
                    result.block_index,
                    BlockCopy {
                        pool: result.pool,
                        bytes: result.bytes,
                        crc: result.crc,
                    },
                );
            }
        }
    }

    /// Block indices currently held.
    pub fn blocks(&self) -> impl Iterator<Item = usize> + '_ {
        self.copies.keys().copied()
    }

    /// Pools that contributed the kept copies.
    pub fn pools_used(&self) -> Vec<PoolId> {
        let mut pools: Vec<PoolId> = self.copies.values().map(|c| c.pool).collect();
        pools.sort_unstable();
        pools.dedup();
        pools
    }

    /// Verify completeness and concatenate in block order.
    ///
    /// No results at all reconstructs the empty stream (an empty file
    /// encodes to zero blocks).
    pub fn finish(self) -> Result<Vec<u8>, OligoError> {
        let Some(&max_index) = self.copies.keys().next_back() else {
            return Ok(Vec::new());
        };
        let missing: Vec<usize> = (0..=max_index)
            .filter(|i| !self.copies.contains_key(i))
            .collect();
        if !missing.is_empty() {
            return Err(OligoError::IncompleteBlocks(missing));
        }
        let mut out = Vec::new();
        for copy in self.copies.into_values() {
            out.extend_from_slice(&copy.bytes);
        }
        Ok(out)
    }
}

use oligostore::{
    decode_records, encode_bytes, segments_needed, CodecConfig, FlankPair, RandomSynonyms,
};
use std::collections::BTreeMap;

/// Within every block, decoded addresses must be exactly 1..=ceil(actual/12).
#[test]
fn decoded_addresses_are_contiguous_per_block() {
    let data: Vec<u8> = (0..777u32).map(|i| (i ^ 0x5A) as u8).collect();
    let cfg = CodecConfig {
        block_size: 100,
        ..CodecConfig::default()
    };
    let pair = FlankPair::universal();
    let records = encode_bytes(&data, &cfg, Some(&pair), &mut RandomSynonyms::from_seed(9)).unwrap();
    let report = decode_records(&records, Some(&pair));

    let mut by_block: BTreeMap<usize, Vec<u32>> = BTreeMap::new();
    for &(block, address) in report.segments.keys() {
        by_block.entry(block).or_default().push(address);
    }

    assert_eq!(by_block.len(), 8); // 7 full 100-byte blocks + 77-byte tail
    for (block, addresses) in by_block {
        let actual = report.actual_block_sizes[&block];
        let expected: Vec<u32> = (1..=segments_needed(actual) as u32).collect();
        assert_eq!(addresses, expected, "block {block}");
    }
}

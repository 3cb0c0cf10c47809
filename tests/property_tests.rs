use oligostore::{decode_records, encode_bytes, reassemble, CodecConfig, FlankPair, RandomSynonyms};
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrip_random(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        block_size in 1usize..600,
        seed in any::<u64>(),
    ) {
        let cfg = CodecConfig { block_size, ..CodecConfig::default() };
        let pair = FlankPair::universal();
        let records = encode_bytes(&data, &cfg, Some(&pair), &mut RandomSynonyms::from_seed(seed)).unwrap();
        let report = decode_records(&records, Some(&pair));
        prop_assert_eq!(report.crc.invalid, 0);
        prop_assert_eq!(reassemble(&report).bytes, data);
    }
}

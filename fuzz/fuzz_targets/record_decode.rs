use honggfuzz::fuzz;
use oligostore::{decode_records, reassemble, FlankPair, OligoRecord};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let Ok(seq) = std::str::from_utf8(data) else {
                return;
            };
            let record = OligoRecord {
                block_index: seq.len() % 7,
                address: String::new(),
                payload: String::new(),
                checksum: String::new(),
                oligo: seq.to_string(),
                block_size_bytes: 5120,
                actual_block_size_bytes: seq.len(),
                total_file_size_bytes: seq.len(),
            };
            let report = decode_records(&[record], Some(&FlankPair::universal()));
            let _ = reassemble(&report);
        });
    }
}

use honggfuzz::fuzz;
use oligostore::{decode_sequence, unframe, FlankPair};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(seq) = std::str::from_utf8(data) {
                let pair = FlankPair::universal();
                if let Some(fields) = unframe(seq, Some(&pair)) {
                    let _ = decode_sequence(fields.address);
                    let _ = decode_sequence(fields.payload);
                    let _ = decode_sequence(fields.checksum);
                }
                let _ = unframe(seq, None);
            }
        });
    }
}

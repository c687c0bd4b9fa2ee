#![no_main]

use libfuzzer_sys::fuzz_target;
use lz77pack::{compress_with, decompress_with_report, CompressConfig, MatchStrategy};

fuzz_target!(|input: &[u8]| {
    // First two bytes pick the configuration, the rest is the payload
    if input.len() < 2 {
        return;
    }
    let window = 1 + (u16::from_le_bytes([input[0], input[1] & 0x0F]) as usize % 4095);
    let lookahead = 2 + (input[1] >> 4) as usize * 2;
    let strategy =
        if input[1] & 0x80 == 0 { MatchStrategy::Indexed } else { MatchStrategy::BruteForce };

    // Limit data size to avoid slowdowns
    let data = &input[2..];
    let data = if data.len() > 16 * 1024 { &data[..16 * 1024] } else { data };

    let config = CompressConfig::new(window, lookahead).with_strategy(strategy);
    let compressed = compress_with(data, &config).expect("valid config must compress");

    let report = decompress_with_report(&compressed);
    assert!(report.is_clean(), "warnings on own output: {:?}", report.warnings);
    assert_eq!(report.data, data, "Round-trip mismatch");
});

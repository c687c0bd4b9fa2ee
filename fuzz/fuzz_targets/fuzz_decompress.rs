#![no_main]

use libfuzzer_sys::fuzz_target;
use lz77pack::decompress_with_report;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input may be rejected or truncated - that's OK
    // We're looking for panics/crashes, not errors
    let report = decompress_with_report(data);
    assert_eq!(report.stats.output_bytes as usize, report.data.len());
});

#![no_main]

use carscan::domain::services::CatalogAnalyzer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let summary = CatalogAnalyzer::default().analyze(data);
    assert!(!summary.compression.is_empty());
    let _ = summary.to_string();
});

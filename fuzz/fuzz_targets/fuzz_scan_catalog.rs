#![no_main]

use carscan::domain::services::StructuralParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let parsed = StructuralParser::default().parse(data);
    for record in &parsed.assets {
        let offset = record.source_offset().unwrap_or(0) as usize;
        let size = record.byte_size().unwrap_or(0) as usize;
        assert!(size > 0);
        assert!(offset + size <= data.len());
    }
});

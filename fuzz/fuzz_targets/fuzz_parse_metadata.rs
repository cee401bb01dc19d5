#![no_main]

use carscan::infrastructure::metadata::parse_assetutil_output;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(records) = parse_assetutil_output(text) {
            for record in &records {
                assert!(record.scale_factor >= 1);
                let _ = record.display_name();
            }
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use squatcount::config::TrackerConfig;

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON must either fail to parse or yield a config whose
    // validation returns without panicking
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = serde_json::from_str::<TrackerConfig>(s) {
            let _ = config.validate();
        }
    }
});

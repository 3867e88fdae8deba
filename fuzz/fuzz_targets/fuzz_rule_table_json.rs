#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs. A table that loads must survive a round trip.
        if let Ok(table) = eurovat::core::RuleTable::from_json(s) {
            let json = table.to_json().expect("serialize loaded table");
            let again = eurovat::core::RuleTable::from_json(&json).expect("reload serialized table");
            assert_eq!(table, again);
        }
    }
});

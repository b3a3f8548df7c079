#![no_main]
use holdem_equity::holdem::RangeParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(range) = RangeParser::parse(data) {
        for combo in &range {
            assert_ne!(combo.cards.high(), combo.cards.low());
            assert!(combo.weight >= 0.0);
        }
    }
});

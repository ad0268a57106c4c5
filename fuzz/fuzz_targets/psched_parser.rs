#![no_main]

use libfuzzer_sys::fuzz_target;
use psched_tick::psched::PschedParams;
use psched_tick::report::TickReport;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes must never panic
    if let Ok(params) = PschedParams::parse(data) {
        if params.us2t != 0 {
            let _ = TickReport::from_params(params).to_string();
        }
    }
});

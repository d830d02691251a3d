#![no_main]

use libfuzzer_sys::fuzz_target;
use squatcount::config::TrackerConfig;
use squatcount::recording::parse_recording;
use squatcount::session::SessionController;
use squatcount::tracker::ScriptedTracker;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(events) = parse_recording(text) else {
        return;
    };

    // Any parsed recording must replay without panicking
    let Ok(mut session) = SessionController::new(TrackerConfig::default()) else {
        return;
    };
    let mut tracker = ScriptedTracker::new();
    if session.attach(&mut tracker).is_ok() {
        tracker.emit_all(&events);
        let _ = session.status();
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use pmbus_rs::snapshot::assemble;
use pmbus_rs::source::{parse_capture, parse_capture_line, write_capture};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Any text parses; malformed lines are skipped
    let image = parse_capture(text);
    for line in text.lines() {
        let _ = parse_capture_line(line.trim());
    }

    // A parsed image always assembles and survives a write/parse cycle
    assert!(assemble(&image).is_ok());
    assert_eq!(parse_capture(&write_capture(&image)), image);
});

//! # Register Logging Utilities
//!
//! Debug helpers for dumping register contents while an image is being
//! populated or decoded. All output goes through the `log` facade at debug
//! level, so nothing is formatted unless diagnostics are enabled.

use log::{debug, log_enabled, Level};

/// Log a run of register bytes in hex format
///
/// Output is capped so a full 256-byte image does not flood the log.
pub fn log_register_hex(prefix: &str, start: usize, data: &[u8]) {
    const MAX_LOG_BYTES: usize = 32;

    if !log_enabled!(Level::Debug) {
        return;
    }

    let shown = &data[..data.len().min(MAX_LOG_BYTES)];
    let hex_str = crate::util::hex::format_hex_compact(shown);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    debug!(target: "pmbus::registers", "{prefix} @0x{start:02X}: {hex_str}{suffix}");
}

/// Log the first few populated addresses of an image
pub fn log_image_head(image: &crate::image::RegisterImage, count: usize) {
    if !log_enabled!(Level::Debug) {
        return;
    }

    debug!(target: "pmbus::registers", "First few bytes:");
    for (addr, value) in image.iter().take(count) {
        debug!(target: "pmbus::registers", "  0x{addr:02X}: 0x{value:02X}");
    }
}

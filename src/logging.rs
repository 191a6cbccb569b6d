use log::{error, info, log_enabled, Level, LevelFilter};

/// Initializes the logger with the `env_logger` crate and a default level.
///
/// `RUST_LOG` still takes precedence when set, so `--debug` can be narrowed
/// to single modules from the environment. Repeated calls are ignored.
pub fn init_logger_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Engine - process-wide logging hub
///
/// Device contexts are never stored here: every resource operation receives
/// its `GraphicsDevice` explicitly. The only global state is the logger that
/// forms the crate's error-reporting channel.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

fn install(logger_impl: Box<dyn Logger>) {
    // A poisoned lock still holds a usable logger slot
    let mut slot = match logger().write() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = logger_impl;
}

fn dispatch(entry: LogEntry) {
    let slot = match logger().read() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    slot.log(&entry);
}

/// Logging hub behind the `engine_*!` macros
pub struct Engine;

impl Engine {
    /// Route every subsequent entry to `logger_impl`
    ///
    /// ```no_run
    /// use shader_program::Engine;
    /// use shader_program::log::{Logger, LogEntry};
    ///
    /// struct Silent;
    /// impl Logger for Silent {
    ///     fn log(&self, _entry: &LogEntry) {}
    /// }
    ///
    /// Engine::set_logger(Silent);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        install(Box::new(logger_impl));
    }

    /// Go back to a default [`DefaultLogger`]
    pub fn reset_logger() {
        install(Box::new(DefaultLogger::default()));
    }

    /// Emit an entry without location (`engine_trace!` to `engine_warn!`)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Emit an entry carrying the caller's `file:line` (`engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }
}

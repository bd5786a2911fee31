//! Error-reporting channel
//!
//! Compiler and linker diagnostics are written here in addition to being
//! carried by the returned [`Error`](crate::Error). Entries flow from the
//! `engine_*!` macros through [`Engine`](crate::Engine) to the installed
//! [`Logger`], a colored [`DefaultLogger`] unless replaced.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Receiver of every log entry emitted through [`Engine`](crate::Engine)
///
/// Install one with `Engine::set_logger` to route diagnostics into a test
/// capture, an editor console or a file.
///
/// ```no_run
/// use shader_program::log::{Logger, LogEntry, LogSeverity};
///
/// struct ErrorsOnly;
///
/// impl Logger for ErrorsOnly {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             eprintln!("{}: {}", entry.source, entry.message);
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

/// One log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, e.g. `shader_program::ProgramUnit`
    pub source: String,
    pub message: String,
    /// Emitting file, set for ERROR entries only
    pub file: Option<&'static str>,
    /// Emitting line, set for ERROR entries only
    pub line: Option<u32>,
}

/// Severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    /// Every device object created or released
    Trace,
    Debug,
    Info,
    /// Leaked handles, calls on null handles
    Warn,
    /// Unreadable sources, refused allocations, compile and link failures
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by [`DefaultLogger`]
    pub fn label(self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }

    fn colored_label(self) -> ColoredString {
        let label = self.label();
        match self {
            LogSeverity::Trace => label.bright_black(),
            LogSeverity::Debug => label.cyan(),
            LogSeverity::Info => label.green(),
            LogSeverity::Warn => label.yellow(),
            LogSeverity::Error => label.red().bold(),
        }
    }
}

/// Console logger with colored severities
///
/// Lines look like `[2024-05-01 12:00:00.000] [ERROR] [source] message (file:line)`.
/// ERROR goes to stderr, the rest to stdout. Entries below `min_severity`
/// are dropped.
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    pub min_severity: LogSeverity,
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self {
            min_severity: LogSeverity::Debug,
        }
    }
}

impl DefaultLogger {
    pub fn with_min_severity(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    /// Render `entry` without colors, in the console layout
    pub fn format(entry: &LogEntry) -> String {
        Self::render(entry, false)
    }

    fn render(entry: &LogEntry, with_colors: bool) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let (severity, source) = if with_colors {
            (
                entry.severity.colored_label().to_string(),
                entry.source.bright_blue().to_string(),
            )
        } else {
            (entry.severity.label().to_string(), entry.source.clone())
        };

        let mut line = format!(
            "[{}] [{}] [{}] {}",
            datetime.format("%Y-%m-%d %H:%M:%S%.3f"),
            severity,
            source,
            entry.message
        );
        if let (Some(file), Some(number)) = (entry.file, entry.line) {
            line.push_str(&format!(" ({}:{})", file, number));
        }
        line
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.severity < self.min_severity {
            return;
        }
        let line = Self::render(entry, true);
        match entry.severity {
            LogSeverity::Error => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

// ===== LOGGING MACROS =====

#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($severity:ident, $source:expr, $($arg:tt)*) => {
        $crate::Engine::log($crate::log::LogSeverity::$severity, $source, format!($($arg)*))
    };
}

/// Log at TRACE
///
/// ```no_run
/// shader_program::engine_trace!("shader_program::ShaderUnit", "released shader#{}", 3);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Trace, $source, $($arg)*) };
}

/// Log at DEBUG
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Debug, $source, $($arg)*) };
}

/// Log at INFO
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Info, $source, $($arg)*) };
}

/// Log at WARN
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => { $crate::__engine_log!(Warn, $source, $($arg)*) };
}

/// Log at ERROR, recording the calling file and line
///
/// ```no_run
/// shader_program::engine_error!("shader_program::ProgramUnit", "program#{} link error", 1);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::Engine::log_detailed(
            $crate::log::LogSeverity::Error, $source, format!($($arg)*), file!(), line!())
    };
}

/// Log an [`Error`](crate::Error) at ERROR severity and evaluate to it
///
/// ```no_run
/// use shader_program::{engine_err, Error};
///
/// let result: Result<(), Error> = Err(engine_err!(
///     "shader_program::ProgramUnit",
///     Error::InvalidResource("program has been released".to_string())
/// ));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $error:expr) => {{
        let error: $crate::Error = $error;
        $crate::engine_error!($source, "{}", error);
        error
    }};
}

/// Log an [`Error`](crate::Error) and return it from the enclosing function
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $error:expr) => {
        return Err($crate::engine_err!($source, $error))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;

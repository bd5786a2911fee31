/// Compiler/linker diagnostic retrieval
///
/// Both the compile log of a shader and the link log of a program are read
/// the same way: query the byte length, reserve `length + 1` bytes without
/// aborting on failure, copy the log in and NUL-terminate it.

use std::fmt;

use crate::graphics_device::{GraphicsDevice, ShaderId, ProgramId};

/// Diagnostic text produced by the device compiler or linker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Log text as reported by the device (may be empty)
    Log(String),

    /// The log buffer could not be obtained; only the fallback text exists
    ReportingFailed {
        /// Bytes that were requested for the log buffer
        requested: usize,
    },
}

impl Diagnostic {
    /// Log text, if the device log could be retrieved
    pub fn text(&self) -> Option<&str> {
        match self {
            Diagnostic::Log(text) => Some(text),
            Diagnostic::ReportingFailed { .. } => None,
        }
    }

    /// True when the log buffer could not be obtained
    pub fn is_reporting_failure(&self) -> bool {
        matches!(self, Diagnostic::ReportingFailed { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Log(text) if text.is_empty() => f.write_str("(empty log)"),
            Diagnostic::Log(text) => f.write_str(text),
            Diagnostic::ReportingFailed { requested } => {
                write!(f, "out of memory while reporting diagnostic ({} bytes requested)", requested)
            }
        }
    }
}

/// Read a compile log from a shader object
pub(crate) fn shader_diagnostic(device: &mut dyn GraphicsDevice, shader: ShaderId) -> Diagnostic {
    let length = device.shader_info_log_length(shader);
    read_log(length, |buffer| device.shader_info_log(shader, buffer))
}

/// Read a link log from a program object (program-level accessor)
pub(crate) fn program_diagnostic(device: &mut dyn GraphicsDevice, program: ProgramId) -> Diagnostic {
    let length = device.program_info_log_length(program);
    read_log(length, |buffer| device.program_info_log(program, buffer))
}

/// Reserve `length + 1` bytes, let `copy` fill the first `length`, terminate
fn read_log(length: usize, copy: impl FnOnce(&mut [u8]) -> usize) -> Diagnostic {
    let Some(capacity) = length.checked_add(1) else {
        return Diagnostic::ReportingFailed { requested: length };
    };

    let mut buffer: Vec<u8> = Vec::new();
    if buffer.try_reserve_exact(capacity).is_err() {
        return Diagnostic::ReportingFailed { requested: capacity };
    }
    buffer.resize(capacity, 0);

    let written = copy(&mut buffer[..length]).min(length);
    buffer[written] = 0;

    // Drivers may include the terminator in the copied bytes
    let end = buffer.iter().position(|&byte| byte == 0).unwrap_or(written);
    let text = String::from_utf8_lossy(&buffer[..end]);
    Diagnostic::Log(text.trim_end().to_string())
}

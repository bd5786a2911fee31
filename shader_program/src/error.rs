//! Error types for the shader program layer
//!
//! Every failing construction rolls its device objects back before one of
//! these errors reaches the caller.

use std::fmt;
use std::path::PathBuf;

use crate::graphics_device::{DeviceObject, ShaderStage};
use crate::resource::Diagnostic;

/// Result type for shader program operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shader program errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Shader source file missing or unreadable; no device state was touched
    SourceUnavailable {
        path: PathBuf,
        reason: String,
    },

    /// The driver refused to create a shader or program object
    DeviceAllocationFailed(DeviceObject),

    /// The device compiler rejected the source
    CompileFailed {
        stage: ShaderStage,
        label: String,
        diagnostic: Diagnostic,
    },

    /// One of the two shaders of a program could not be built
    ShaderBuildFailed {
        stage: ShaderStage,
        source: Box<Error>,
    },

    /// The device linker rejected the attached shaders
    LinkFailed {
        diagnostic: Diagnostic,
    },

    /// Operation on a resource that cannot accept it (e.g. a released program)
    InvalidResource(String),
}

/// Error kinds, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    DeviceAllocationFailed,
    CompileFailed,
    ShaderBuildFailed,
    LinkFailed,
    InvalidResource,
}

impl Error {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Error::DeviceAllocationFailed(_) => ErrorKind::DeviceAllocationFailed,
            Error::CompileFailed { .. } => ErrorKind::CompileFailed,
            Error::ShaderBuildFailed { .. } => ErrorKind::ShaderBuildFailed,
            Error::LinkFailed { .. } => ErrorKind::LinkFailed,
            Error::InvalidResource(_) => ErrorKind::InvalidResource,
        }
    }

    /// Innermost cause (follows `ShaderBuildFailed` wrappers)
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::ShaderBuildFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Compiler or linker diagnostic carried by this error or its cause
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self.root_cause() {
            Error::CompileFailed { diagnostic, .. } | Error::LinkFailed { diagnostic } => Some(diagnostic),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SourceUnavailable { path, reason } => {
                write!(f, "Unable to read file '{}': {}", path.display(), reason)
            }
            Error::DeviceAllocationFailed(object) => {
                write!(f, "Device refused to allocate a {}", object)
            }
            Error::CompileFailed { stage, label, diagnostic } => {
                write!(f, "Compilation of {} shader '{}' failed: {}", stage, label, diagnostic)
            }
            Error::ShaderBuildFailed { stage, source } => {
                write!(f, "Unable to build {} shader: {}", stage, source)
            }
            Error::LinkFailed { diagnostic } => write!(f, "Program link failed: {}", diagnostic),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ShaderBuildFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

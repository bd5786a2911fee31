//! Resource module
//!
//! Device-backed resources with explicit lifetimes: compiled shaders and the
//! programs that own them.

mod diagnostic;
pub mod shader;
pub mod program;

pub use diagnostic::Diagnostic;
pub use shader::ShaderUnit;
pub use program::ProgramUnit;

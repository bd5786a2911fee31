/// GraphicsDevice trait - the driver operations consumed by the resource layer

use std::fmt;

use crate::graphics_device::{ShaderStage, ShaderId, ProgramId};

/// Kind of device object an allocation was requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceObject {
    /// A shader object of the given stage
    Shader(ShaderStage),
    /// A program object
    Program,
}

impl fmt::Display for DeviceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceObject::Shader(stage) => write!(f, "{} shader object", stage),
            DeviceObject::Program => write!(f, "program object"),
        }
    }
}

/// Graphics device trait
///
/// Thin, handle-based view of a shader-compiling driver (OpenGL-style).
/// Implementations never roll anything back on their own: `ShaderUnit` and
/// `ProgramUnit` sequence these calls and own the cleanup protocol.
///
/// The device context is thread-affine, so the trait carries no `Send`/`Sync`
/// bound and every call receives `&mut self` from the single owner thread.
///
/// Allocation calls signal refusal by returning the `NULL` handle.
pub trait GraphicsDevice {
    // ===== SHADER OBJECTS =====

    /// Allocate a shader object for `stage` (NULL on refusal)
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId;

    /// Replace the source text of a shader object
    fn shader_source(&mut self, shader: ShaderId, source: &str);

    /// Compile the current source of a shader object
    fn compile_shader(&mut self, shader: ShaderId);

    /// Whether the last compilation succeeded
    fn shader_compile_status(&mut self, shader: ShaderId) -> bool;

    /// Byte length of the shader info log (without terminator)
    fn shader_info_log_length(&mut self, shader: ShaderId) -> usize;

    /// Copy the shader info log into `buffer`, returning the bytes written
    fn shader_info_log(&mut self, shader: ShaderId, buffer: &mut [u8]) -> usize;

    /// Destroy a shader object
    fn delete_shader(&mut self, shader: ShaderId);

    // ===== PROGRAM OBJECTS =====

    /// Allocate a program object (NULL on refusal)
    fn create_program(&mut self) -> ProgramId;

    /// Attach a compiled shader to a program
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);

    /// Detach a shader from a program
    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId);

    /// Link the attached shaders
    fn link_program(&mut self, program: ProgramId);

    /// Whether the last link succeeded
    fn program_link_status(&mut self, program: ProgramId) -> bool;

    /// Byte length of the program info log (without terminator)
    fn program_info_log_length(&mut self, program: ProgramId) -> usize;

    /// Copy the program info log into `buffer`, returning the bytes written
    fn program_info_log(&mut self, program: ProgramId, buffer: &mut [u8]) -> usize;

    /// Bind a program for subsequent draws, or no program with `None`
    fn use_program(&mut self, program: Option<ProgramId>);

    /// Destroy a program object
    fn delete_program(&mut self, program: ProgramId);
}

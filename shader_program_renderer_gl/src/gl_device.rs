/// GlGraphicsDevice - OpenGL implementation of the GraphicsDevice trait
///
/// Wraps a `glow::Context` whose GL context is current on the calling thread.
/// Handles map one to one onto GL object names: `ShaderId(n)` is the shader
/// name `n`, and `0` is the GL null name.

use std::num::NonZeroU32;

use glow::{HasContext, NativeProgram, NativeShader};
use shader_program::{GraphicsDevice, ProgramId, ShaderId, ShaderStage};

const SOURCE: &str = "shader_program::gl";

/// OpenGL device configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlDeviceConfig {
    /// Name used to tell several devices apart in log messages
    pub label: String,
}

impl Default for GlDeviceConfig {
    fn default() -> Self {
        Self {
            label: "gl".to_string(),
        }
    }
}

/// OpenGL graphics device
pub struct GlGraphicsDevice {
    gl: glow::Context,
    config: GlDeviceConfig,
}

impl GlGraphicsDevice {
    /// Wrap a loaded context
    ///
    /// The context must stay current on this thread for every later call.
    pub fn new(gl: glow::Context, config: GlDeviceConfig) -> Self {
        shader_program::engine_info!(SOURCE, "[{}] OpenGL shader device ready", config.label);
        Self { gl, config }
    }

    /// Underlying glow context
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn config(&self) -> &GlDeviceConfig {
        &self.config
    }

    /// Give the context back
    pub fn into_inner(self) -> glow::Context {
        self.gl
    }

    fn shader(&self, shader: ShaderId, call: &str) -> Option<NativeShader> {
        let native = native_shader(shader);
        if native.is_none() {
            shader_program::engine_warn!(SOURCE, "[{}] {} on the null shader ignored",
                self.config.label, call);
        }
        native
    }

    fn program(&self, program: ProgramId, call: &str) -> Option<NativeProgram> {
        let native = native_program(program);
        if native.is_none() {
            shader_program::engine_warn!(SOURCE, "[{}] {} on the null program ignored",
                self.config.label, call);
        }
        native
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// GL shader type enum for a stage
pub(crate) fn gl_shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Compute => glow::COMPUTE_SHADER,
    }
}

pub(crate) fn native_shader(shader: ShaderId) -> Option<NativeShader> {
    NonZeroU32::new(shader.0).map(NativeShader)
}

pub(crate) fn native_program(program: ProgramId) -> Option<NativeProgram> {
    NonZeroU32::new(program.0).map(NativeProgram)
}

pub(crate) fn shader_id(shader: NativeShader) -> ShaderId {
    ShaderId(shader.0.get())
}

pub(crate) fn program_id(program: NativeProgram) -> ProgramId {
    ProgramId(program.0.get())
}

/// Copy as much of `log` as fits into `buffer`
pub(crate) fn copy_log(log: &str, buffer: &mut [u8]) -> usize {
    let count = log.len().min(buffer.len());
    buffer[..count].copy_from_slice(&log.as_bytes()[..count]);
    count
}

// ============================================================================
// GraphicsDevice implementation
// ============================================================================

impl GraphicsDevice for GlGraphicsDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId {
        match unsafe { self.gl.create_shader(gl_shader_type(stage)) } {
            Ok(shader) => shader_id(shader),
            Err(e) => {
                shader_program::engine_error!(SOURCE, "[{}] glCreateShader({}) failed: {}",
                    self.config.label, stage, e);
                ShaderId::NULL
            }
        }
    }

    fn shader_source(&mut self, shader: ShaderId, source: &str) {
        if let Some(native) = self.shader(shader, "glShaderSource") {
            unsafe { self.gl.shader_source(native, source) }
        }
    }

    fn compile_shader(&mut self, shader: ShaderId) {
        if let Some(native) = self.shader(shader, "glCompileShader") {
            unsafe { self.gl.compile_shader(native) }
        }
    }

    fn shader_compile_status(&mut self, shader: ShaderId) -> bool {
        match self.shader(shader, "glGetShaderiv") {
            Some(native) => unsafe { self.gl.get_shader_compile_status(native) },
            None => false,
        }
    }

    fn shader_info_log_length(&mut self, shader: ShaderId) -> usize {
        match self.shader(shader, "glGetShaderiv") {
            Some(native) => unsafe { self.gl.get_shader_info_log(native) }.len(),
            None => 0,
        }
    }

    fn shader_info_log(&mut self, shader: ShaderId, buffer: &mut [u8]) -> usize {
        match self.shader(shader, "glGetShaderInfoLog") {
            Some(native) => copy_log(&unsafe { self.gl.get_shader_info_log(native) }, buffer),
            None => 0,
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        if let Some(native) = self.shader(shader, "glDeleteShader") {
            unsafe { self.gl.delete_shader(native) }
        }
    }

    fn create_program(&mut self) -> ProgramId {
        match unsafe { self.gl.create_program() } {
            Ok(program) => program_id(program),
            Err(e) => {
                shader_program::engine_error!(SOURCE, "[{}] glCreateProgram failed: {}",
                    self.config.label, e);
                ProgramId::NULL
            }
        }
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        let native = (self.program(program, "glAttachShader"), self.shader(shader, "glAttachShader"));
        if let (Some(program), Some(shader)) = native {
            unsafe { self.gl.attach_shader(program, shader) }
        }
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        let native = (self.program(program, "glDetachShader"), self.shader(shader, "glDetachShader"));
        if let (Some(program), Some(shader)) = native {
            unsafe { self.gl.detach_shader(program, shader) }
        }
    }

    fn link_program(&mut self, program: ProgramId) {
        if let Some(native) = self.program(program, "glLinkProgram") {
            unsafe { self.gl.link_program(native) }
        }
    }

    fn program_link_status(&mut self, program: ProgramId) -> bool {
        match self.program(program, "glGetProgramiv") {
            Some(native) => unsafe { self.gl.get_program_link_status(native) },
            None => false,
        }
    }

    fn program_info_log_length(&mut self, program: ProgramId) -> usize {
        match self.program(program, "glGetProgramiv") {
            Some(native) => unsafe { self.gl.get_program_info_log(native) }.len(),
            None => 0,
        }
    }

    fn program_info_log(&mut self, program: ProgramId, buffer: &mut [u8]) -> usize {
        match self.program(program, "glGetProgramInfoLog") {
            Some(native) => copy_log(&unsafe { self.gl.get_program_info_log(native) }, buffer),
            None => 0,
        }
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        // NULL and None both unbind
        let native = program.and_then(native_program);
        unsafe { self.gl.use_program(native) }
    }

    fn delete_program(&mut self, program: ProgramId) {
        if let Some(native) = self.program(program, "glDeleteProgram") {
            unsafe { self.gl.delete_program(native) }
        }
    }
}

#[cfg(test)]
#[path = "gl_device_tests.rs"]
mod tests;

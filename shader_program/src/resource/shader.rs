/// ShaderUnit - one compiled device shader object
///
/// A ShaderUnit is either Ready (non-null handle, compilation succeeded) or
/// released (null handle). Construction never hands out a unit whose
/// compilation failed: the device object is deleted before the error returns.

use std::path::Path;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, DeviceObject, ShaderStage, ShaderId};
use crate::resource::diagnostic::shader_diagnostic;
use crate::source_loader::SourceLoader;

const SOURCE: &str = "shader_program::ShaderUnit";

/// Owner of one compiled shader object
#[derive(Debug)]
#[must_use = "a ShaderUnit owns a device object and must be released"]
pub struct ShaderUnit {
    id: ShaderId,
    stage: ShaderStage,
    label: String,
}

impl ShaderUnit {
    /// Load `path` through `loader` and compile it as a `stage` shader
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` if the loader fails (no device call is made)
    /// - `DeviceAllocationFailed` if the device refuses the shader object
    /// - `CompileFailed` if compilation fails (the object is already deleted)
    pub fn create(
        device: &mut dyn GraphicsDevice,
        loader: &dyn SourceLoader,
        path: &Path,
        stage: ShaderStage,
    ) -> Result<Self> {
        let source = match loader.read_whole_file(path) {
            Ok(source) => source,
            Err(e) => {
                crate::engine_bail!(SOURCE, Error::SourceUnavailable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        Self::from_source(device, &source, stage, &path.display().to_string())
    }

    /// Compile in-memory `source` as a `stage` shader
    ///
    /// `label` names the shader in diagnostics (usually its path).
    pub fn from_source(
        device: &mut dyn GraphicsDevice,
        source: &str,
        stage: ShaderStage,
        label: &str,
    ) -> Result<Self> {
        let id = device.create_shader(stage);
        if id.is_null() {
            crate::engine_bail!(SOURCE, Error::DeviceAllocationFailed(DeviceObject::Shader(stage)));
        }

        let mut unit = Self {
            id,
            stage,
            label: label.to_string(),
        };

        device.shader_source(id, source);
        device.compile_shader(id);
        crate::engine_trace!(SOURCE, "Compiled {} shader '{}' as {}", stage, label, id);

        if !device.shader_compile_status(id) {
            let diagnostic = shader_diagnostic(device, id);
            if diagnostic.is_reporting_failure() {
                crate::engine_error!(SOURCE,
                    "Unable to allocate enough memory to store the compilation error message of '{}'",
                    label);
            } else {
                crate::engine_error!(SOURCE, "{} shader '{}': {}", stage, label, diagnostic);
            }

            unit.release(device);
            return Err(Error::CompileFailed {
                stage,
                label: label.to_string(),
                diagnostic,
            });
        }

        crate::engine_debug!(SOURCE, "{} shader '{}' ready ({})", stage, label, id);
        Ok(unit)
    }

    /// Delete the device shader object
    ///
    /// No-op when already released.
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        if self.id.is_null() {
            return;
        }
        device.delete_shader(self.id);
        crate::engine_trace!(SOURCE, "Released {} shader '{}' ({})", self.stage, self.label, self.id);
        self.id = ShaderId::NULL;
    }

    /// Device handle (`ShaderId::NULL` once released)
    pub fn id(&self) -> ShaderId {
        self.id
    }

    /// Pipeline stage
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Path or caller-provided label of the source
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True while the unit owns a compiled device object
    pub fn is_ready(&self) -> bool {
        !self.id.is_null()
    }
}

impl Drop for ShaderUnit {
    fn drop(&mut self) {
        if !self.id.is_null() {
            crate::engine_warn!(SOURCE,
                "{} shader '{}' dropped without release, {} leaked on the device",
                self.stage, self.label, self.id);
        }
    }
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;

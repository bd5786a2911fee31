/// ProgramUnit - a vertex + fragment ShaderUnit pair attached to one device
/// program object.
///
/// Construction is all-or-nothing: either both shaders compiled and were
/// attached to a live program object, or every object allocated during the
/// attempt has been released before the error is returned. `release` is the
/// single teardown path, used by callers and by the construction rollbacks.

use std::path::Path;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, DeviceObject, ShaderStage, ProgramId};
use crate::resource::diagnostic::program_diagnostic;
use crate::resource::ShaderUnit;
use crate::source_loader::SourceLoader;

const SOURCE: &str = "shader_program::ProgramUnit";

/// Owner of a device program object and its two shaders
#[derive(Debug)]
#[must_use = "a ProgramUnit owns device objects and must be released"]
pub struct ProgramUnit {
    id: ProgramId,
    vertex: Option<ShaderUnit>,
    fragment: Option<ShaderUnit>,
    attached: bool,
    linked: bool,
}

impl ProgramUnit {
    /// Build a program from a vertex and a fragment source file
    ///
    /// The program is attached but not linked; call [`link`](Self::link).
    ///
    /// # Errors
    ///
    /// - `DeviceAllocationFailed` if the program object is refused
    /// - `ShaderBuildFailed { stage }` wrapping the ShaderUnit error of the
    ///   stage that failed; the program object and any shader already built
    ///   have been released
    pub fn create(
        device: &mut dyn GraphicsDevice,
        loader: &dyn SourceLoader,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self> {
        Self::build(device, |device, stage| {
            let path = match stage {
                ShaderStage::Fragment => fragment_path,
                _ => vertex_path,
            };
            ShaderUnit::create(device, loader, path, stage)
        })
    }

    /// Build a program from in-memory vertex and fragment sources
    pub fn from_sources(
        device: &mut dyn GraphicsDevice,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        Self::build(device, |device, stage| {
            let source = match stage {
                ShaderStage::Fragment => fragment_source,
                _ => vertex_source,
            };
            ShaderUnit::from_source(device, source, stage, &format!("<inline {}>", stage))
        })
    }

    /// Allocation, per-stage construction and rollback shared by the constructors
    fn build<F>(device: &mut dyn GraphicsDevice, mut build_shader: F) -> Result<Self>
    where
        F: FnMut(&mut dyn GraphicsDevice, ShaderStage) -> Result<ShaderUnit>,
    {
        let id = device.create_program();
        if id.is_null() {
            crate::engine_bail!(SOURCE, Error::DeviceAllocationFailed(DeviceObject::Program));
        }

        let mut program = Self {
            id,
            vertex: None,
            fragment: None,
            attached: false,
            linked: false,
        };

        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            match build_shader(&mut *device, stage) {
                Ok(unit) => *program.slot_mut(stage) = Some(unit),
                Err(source) => {
                    crate::engine_error!(SOURCE,
                        "Unable to build {} shader, releasing {}", stage, id);
                    program.release(device);
                    return Err(Error::ShaderBuildFailed {
                        stage,
                        source: Box::new(source),
                    });
                }
            }
        }

        for unit in [&program.vertex, &program.fragment].into_iter().flatten() {
            device.attach_shader(id, unit.id());
        }
        program.attached = true;

        crate::engine_debug!(SOURCE, "{} created", id);
        Ok(program)
    }

    fn slot_mut(&mut self, stage: ShaderStage) -> &mut Option<ShaderUnit> {
        match stage {
            ShaderStage::Fragment => &mut self.fragment,
            _ => &mut self.vertex,
        }
    }

    /// Link the attached shaders
    ///
    /// A failed link leaves the program alive: it can be inspected, linked
    /// again or released.
    ///
    /// # Errors
    ///
    /// - `LinkFailed` carrying the program info log
    /// - `InvalidResource` if the program has been released
    pub fn link(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if self.id.is_null() {
            crate::engine_bail!(SOURCE,
                Error::InvalidResource("cannot link a released program".to_string()));
        }

        device.link_program(self.id);
        self.linked = device.program_link_status(self.id);
        if self.linked {
            crate::engine_debug!(SOURCE, "{} linked", self.id);
            return Ok(());
        }

        let diagnostic = program_diagnostic(device, self.id);
        if diagnostic.is_reporting_failure() {
            crate::engine_error!(SOURCE, "{}: out of memory while reporting link error", self.id);
        } else {
            crate::engine_error!(SOURCE, "{} link error: {}", self.id, diagnostic);
        }
        Err(Error::LinkFailed { diagnostic })
    }

    /// Bind this program for subsequent draws
    ///
    /// Binding an unlinked program is a caller contract violation that this
    /// layer does not detect.
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        Self::use_program(device, Some(self));
    }

    /// Bind `program`, or no program at all with `None`
    pub fn use_program(device: &mut dyn GraphicsDevice, program: Option<&ProgramUnit>) {
        device.use_program(program.map(|program| program.id));
    }

    /// Unbind any program
    pub fn use_none(device: &mut dyn GraphicsDevice) {
        Self::use_program(device, None);
    }

    /// Release both shaders, then the program object
    ///
    /// Shaders are detached and deleted before the program is deleted.
    /// Calling this again is a no-op.
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        let id = self.id;
        for slot in [&mut self.vertex, &mut self.fragment] {
            if let Some(mut unit) = slot.take() {
                if self.attached && !id.is_null() && unit.is_ready() {
                    device.detach_shader(id, unit.id());
                }
                unit.release(device);
            }
        }
        self.attached = false;

        if !id.is_null() {
            device.delete_program(id);
            crate::engine_trace!(SOURCE, "Released {}", id);
            self.id = ProgramId::NULL;
            self.linked = false;
        }
    }

    /// Device handle (`ProgramId::NULL` once released)
    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Vertex shader, absent once released
    pub fn vertex(&self) -> Option<&ShaderUnit> {
        self.vertex.as_ref()
    }

    /// Fragment shader, absent once released
    pub fn fragment(&self) -> Option<&ShaderUnit> {
        self.fragment.as_ref()
    }

    /// Outcome of the last link
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// True once [`release`](Self::release) has run
    pub fn is_released(&self) -> bool {
        self.id.is_null()
    }
}

impl Drop for ProgramUnit {
    fn drop(&mut self) {
        if !self.id.is_null() {
            crate::engine_warn!(SOURCE,
                "Program dropped without release, {} leaked on the device", self.id);
        }
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;

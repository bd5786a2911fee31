/*!
# Shader Program

Resource-management layer for GPU shader programs: load shader source text,
compile it on a graphics device, link compiled units into a program and
release every device object deterministically.

## Architecture

- **GraphicsDevice**: handle-based driver trait, passed explicitly to every
  operation (no global device context)
- **ShaderUnit**: owns one compiled shader object
- **ProgramUnit**: owns a program object plus its vertex and fragment
  ShaderUnits, with all-or-nothing construction
- **SourceLoader**: whole-file source reading collaborator
- **Engine**: logging hub; compiler/linker diagnostics are written there and
  also returned inside [`Error`]

Backends (OpenGL via `shader_program_renderer_gl`, or the in-crate
[`MockGraphicsDevice`](graphics_device::mock_graphics_device::MockGraphicsDevice))
implement [`GraphicsDevice`](graphics_device::GraphicsDevice).

```no_run
use std::path::Path;
use shader_program::{ProgramUnit, FileSourceLoader};
use shader_program::graphics_device::mock_graphics_device::MockGraphicsDevice;

let mut device = MockGraphicsDevice::new();
let loader = FileSourceLoader::default();

let mut program = ProgramUnit::create(
    &mut device,
    &loader,
    Path::new("shaders/basic.vert"),
    Path::new("shaders/basic.frag"),
)?;
program.link(&mut device)?;
program.bind(&mut device);
// draw...
ProgramUnit::use_none(&mut device);
program.release(&mut device);
# Ok::<(), shader_program::Error>(())
```
*/

mod error;
mod engine;
pub mod config;
pub mod log;
pub mod graphics_device;
pub mod resource;
pub mod source_loader;

// Error types
pub use error::{Error, ErrorKind, Result};

// Logging hub
pub use engine::Engine;

// Resources
pub use resource::{Diagnostic, ProgramUnit, ShaderUnit};

// Device types used at every call site
pub use graphics_device::{GraphicsDevice, ShaderStage, ShaderId, ProgramId, DeviceObject};

// Source loading
pub use config::LoaderConfig;
pub use source_loader::{SourceLoader, FileSourceLoader, MemorySourceLoader};

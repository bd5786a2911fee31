/*!
# Shader Program - OpenGL Backend

OpenGL implementation of the `shader_program` [`GraphicsDevice`] trait,
using the glow library for GL bindings.

The caller owns context creation and keeps the context current on the thread
that drives the device.

```no_run
use shader_program::{FileSourceLoader, ProgramUnit};
use shader_program_renderer_gl::{GlDeviceConfig, GlGraphicsDevice};
use std::path::Path;

# fn run(gl: glow::Context) -> shader_program::Result<()> {
let mut device = GlGraphicsDevice::new(gl, GlDeviceConfig::default());
let loader = FileSourceLoader::default();

let mut program = ProgramUnit::create(
    &mut device,
    &loader,
    Path::new("shaders/basic.vert"),
    Path::new("shaders/basic.frag"),
)?;
program.link(&mut device)?;
program.release(&mut device);
# Ok(())
# }
```

[`GraphicsDevice`]: shader_program::GraphicsDevice
*/

mod gl_device;

pub use gl_device::{GlDeviceConfig, GlGraphicsDevice};

/// Graphics device module - the driver operations the resource layer sequences

// Module declarations
pub mod graphics_device;
pub mod shader;
pub mod program;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use shader::*;
pub use program::*;

// Mock graphics device (no GPU required), public so integration tests and
// headless tools can drive the resource layer
pub mod mock_graphics_device;

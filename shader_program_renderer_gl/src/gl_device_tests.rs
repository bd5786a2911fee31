//! Unit tests for gl_device.rs
//!
//! Only the handle and enum conversions; nothing here needs a GL context.

use super::*;

#[test]
fn test_gl_shader_type_per_stage() {
    assert_eq!(gl_shader_type(ShaderStage::Vertex), glow::VERTEX_SHADER);
    assert_eq!(gl_shader_type(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    assert_eq!(gl_shader_type(ShaderStage::Compute), glow::COMPUTE_SHADER);
}

#[test]
fn test_null_handles_have_no_gl_name() {
    assert!(native_shader(ShaderId::NULL).is_none());
    assert!(native_program(ProgramId::NULL).is_none());
}

#[test]
fn test_handles_keep_gl_name() {
    let shader = native_shader(ShaderId(7)).unwrap();
    assert_eq!(shader.0.get(), 7);
    assert_eq!(shader_id(shader), ShaderId(7));

    let program = native_program(ProgramId(3)).unwrap();
    assert_eq!(program.0.get(), 3);
    assert_eq!(program_id(program), ProgramId(3));
}

#[test]
fn test_copy_log_fits_buffer() {
    let mut buffer = [0u8; 16];
    let written = copy_log("0:1: error", &mut buffer);
    assert_eq!(written, 10);
    assert_eq!(&buffer[..written], b"0:1: error");
}

#[test]
fn test_copy_log_truncates_to_buffer() {
    let mut buffer = [0u8; 4];
    let written = copy_log("0:1: error", &mut buffer);
    assert_eq!(written, 4);
    assert_eq!(&buffer, b"0:1:");
}

#[test]
fn test_default_config_label() {
    assert_eq!(GlDeviceConfig::default().label, "gl");
}

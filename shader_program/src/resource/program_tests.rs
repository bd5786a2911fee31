//! Unit tests for ProgramUnit
//!
//! Construction atomicity, rollback ordering, link failure handling and
//! release idempotence, checked with MockGraphicsDevice call counts.

use std::path::Path;

use crate::error::ErrorKind;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{DeviceObject, ShaderStage};
use crate::resource::{Diagnostic, ProgramUnit};
use crate::source_loader::MemorySourceLoader;
use crate::Error;

const VERTEX_SRC: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }\n";
const FRAGMENT_SRC: &str = "#version 330 core\nout vec4 color;\nvoid main() { color = vec4(1.0); }\n";

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn loader() -> MemorySourceLoader {
    MemorySourceLoader::new()
        .with_source("basic.vert", VERTEX_SRC)
        .with_source("basic.frag", FRAGMENT_SRC)
}

fn create(device: &mut MockGraphicsDevice, vertex: &str, fragment: &str) -> crate::Result<ProgramUnit> {
    ProgramUnit::create(device, &loader(), Path::new(vertex), Path::new(fragment))
}

fn assert_nothing_alive(device: &MockGraphicsDevice) {
    assert_eq!(device.live_shader_count(), 0, "shader objects leaked");
    assert_eq!(device.live_program_count(), 0, "program objects leaked");
    assert_eq!(device.invalid_calls(), 0, "device received calls on dead handles");
}

// ============================================================================
// SUCCESSFUL CONSTRUCTION
// ============================================================================

#[test]
fn test_create_returns_fully_constructed_program() {
    let mut device = MockGraphicsDevice::new();

    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();

    assert!(!program.id().is_null());
    let vertex = program.vertex().unwrap();
    let fragment = program.fragment().unwrap();
    assert!(vertex.is_ready());
    assert!(fragment.is_ready());
    assert_eq!(vertex.stage(), ShaderStage::Vertex);
    assert_eq!(fragment.stage(), ShaderStage::Fragment);
    assert_eq!(
        device.program(program.id()).unwrap().attached,
        vec![vertex.id(), fragment.id()]
    );
    assert!(!program.is_linked());

    program.release(&mut device);
    assert_nothing_alive(&device);
}

#[test]
fn test_create_link_bind_release_scenario() {
    let mut device = MockGraphicsDevice::new();

    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();
    program.link(&mut device).unwrap();
    assert!(program.is_linked());

    program.bind(&mut device);
    assert_eq!(device.bound_program(), Some(program.id()));
    ProgramUnit::use_none(&mut device);
    assert_eq!(device.bound_program(), None);

    program.release(&mut device);
    assert_eq!(device.count("delete_shader"), 2);
    assert_eq!(device.count("delete_program"), 1);
    assert_nothing_alive(&device);
}

#[test]
fn test_from_sources_builds_program() {
    let mut device = MockGraphicsDevice::new();

    let mut program = ProgramUnit::from_sources(&mut device, VERTEX_SRC, FRAGMENT_SRC).unwrap();
    program.link(&mut device).unwrap();

    assert_eq!(program.vertex().unwrap().label(), "<inline vertex>");
    assert_eq!(program.fragment().unwrap().label(), "<inline fragment>");

    program.release(&mut device);
    assert_nothing_alive(&device);
}

// ============================================================================
// CONSTRUCTION FAILURES
// ============================================================================

#[test]
fn test_refused_program_allocation_has_nothing_to_roll_back() {
    let mut device = MockGraphicsDevice::new().with_refused_program_allocation();

    let err = create(&mut device, "basic.vert", "basic.frag").unwrap_err();

    assert!(matches!(err, Error::DeviceAllocationFailed(DeviceObject::Program)));
    assert_eq!(device.count("create_shader"), 0);
    assert_eq!(device.count("delete_program"), 0);
    assert_nothing_alive(&device);
}

#[test]
fn test_missing_vertex_source_rolls_back_program() {
    let mut device = MockGraphicsDevice::new();

    let err = create(&mut device, "missing.vert", "basic.frag").unwrap_err();

    assert!(matches!(err, Error::ShaderBuildFailed { stage: ShaderStage::Vertex, .. }));
    assert_eq!(err.root_cause().kind(), ErrorKind::SourceUnavailable);
    assert_eq!(device.count("create_program"), 1);
    assert_eq!(device.count("create_shader"), 0);
    assert_eq!(device.count("delete_program"), 1);
    assert_nothing_alive(&device);
}

#[test]
fn test_vertex_compile_failure_skips_fragment() {
    let mut device = MockGraphicsDevice::new()
        .with_compile_failure(ShaderStage::Vertex, "vertex: syntax error");

    let err = create(&mut device, "basic.vert", "basic.frag").unwrap_err();

    assert!(matches!(err, Error::ShaderBuildFailed { stage: ShaderStage::Vertex, .. }));
    assert_eq!(err.root_cause().kind(), ErrorKind::CompileFailed);
    assert_eq!(device.commands.iter().filter(|c| *c == "create_shader(fragment)").count(), 0);
    assert_eq!(device.count("delete_shader"), 1);
    assert_eq!(device.count("delete_program"), 1);
    assert_nothing_alive(&device);
}

#[test]
fn test_fragment_compile_failure_releases_vertex_and_program() {
    let mut device = MockGraphicsDevice::new()
        .with_compile_failure(ShaderStage::Fragment, "fragment: undefined variable");

    let err = create(&mut device, "basic.vert", "basic.frag").unwrap_err();

    assert!(matches!(err, Error::ShaderBuildFailed { stage: ShaderStage::Fragment, .. }));
    assert_eq!(
        err.diagnostic(),
        Some(&Diagnostic::Log("fragment: undefined variable".to_string()))
    );
    // One log fetch for the fragment shader, one delete per shader, one program delete
    assert_eq!(device.count("shader_info_log"), 1);
    assert_eq!(device.count("delete_shader"), 2);
    assert_eq!(device.count("delete_program"), 1);
    assert_eq!(device.count("attach_shader"), 0);
    assert_eq!(device.count("detach_shader"), 0);
    assert_nothing_alive(&device);
}

#[test]
fn test_missing_fragment_source_releases_vertex() {
    let mut device = MockGraphicsDevice::new();

    let err = create(&mut device, "basic.vert", "missing.frag").unwrap_err();

    assert!(matches!(err, Error::ShaderBuildFailed { stage: ShaderStage::Fragment, .. }));
    assert_eq!(err.root_cause().kind(), ErrorKind::SourceUnavailable);
    assert_eq!(device.count("create_shader"), 1);
    assert_eq!(device.count("delete_shader"), 1);
    assert_eq!(device.count("delete_program"), 1);
    assert_nothing_alive(&device);
}

#[test]
fn test_refused_fragment_allocation_releases_vertex() {
    let mut device = MockGraphicsDevice::new().with_refused_shader_stage(ShaderStage::Fragment);

    let err = create(&mut device, "basic.vert", "basic.frag").unwrap_err();

    assert!(matches!(
        err.root_cause(),
        Error::DeviceAllocationFailed(DeviceObject::Shader(ShaderStage::Fragment))
    ));
    assert_nothing_alive(&device);
}

#[test]
fn test_rollback_deletes_shaders_before_program() {
    let mut device = MockGraphicsDevice::new()
        .with_compile_failure(ShaderStage::Fragment, "boom");

    let _ = create(&mut device, "basic.vert", "basic.frag").unwrap_err();

    let last_shader_delete = device.commands.iter().rposition(|c| c.starts_with("delete_shader")).unwrap();
    let program_delete = device.commands.iter().position(|c| c.starts_with("delete_program")).unwrap();
    assert!(last_shader_delete < program_delete);
}

#[test]
fn test_retry_after_failure_builds_fresh_program() {
    let mut device = MockGraphicsDevice::new();
    let mut sources = loader();
    sources.insert("late.frag", FRAGMENT_SRC);

    assert!(create(&mut device, "basic.vert", "nope.frag").is_err());
    let mut program = ProgramUnit::create(&mut device, &sources, Path::new("basic.vert"), Path::new("late.frag"))
        .unwrap();

    assert_eq!(device.live_program_count(), 1);
    assert_eq!(device.live_shader_count(), 2);

    program.release(&mut device);
    assert_nothing_alive(&device);
}

// ============================================================================
// LINK
// ============================================================================

#[test]
fn test_link_failure_keeps_program_alive() {
    let mut device = MockGraphicsDevice::new().with_link_failure("error: varying 'uv' not written");
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();
    let vertex_id = program.vertex().unwrap().id();
    let fragment_id = program.fragment().unwrap().id();

    let err = program.link(&mut device).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LinkFailed);
    assert_eq!(err.diagnostic().and_then(Diagnostic::text), Some("error: varying 'uv' not written"));
    assert!(!program.is_linked());
    assert!(!program.is_released());
    assert_eq!(program.vertex().unwrap().id(), vertex_id);
    assert_eq!(program.fragment().unwrap().id(), fragment_id);
    assert_eq!(device.count("delete_program"), 0);
    assert_eq!(device.count("delete_shader"), 0);

    program.release(&mut device);
    assert_eq!(device.count("delete_shader"), 2);
    assert_eq!(device.count("delete_program"), 1);
    assert_nothing_alive(&device);
}

#[test]
fn test_link_failure_reads_program_log_not_shader_log() {
    let mut device = MockGraphicsDevice::new().with_link_failure("link failed");
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();

    let _ = program.link(&mut device);

    assert_eq!(device.count("program_info_log_length"), 1);
    assert_eq!(device.count("program_info_log"), 1);
    assert_eq!(device.count("shader_info_log"), 0);

    program.release(&mut device);
}

#[test]
fn test_link_failure_with_unreportable_log() {
    let mut device = MockGraphicsDevice::new()
        .with_link_failure("never read")
        .with_reported_log_length(usize::MAX);
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();

    let err = program.link(&mut device).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::LinkFailed);
    assert!(err.diagnostic().unwrap().is_reporting_failure());
    assert_eq!(device.count("program_info_log"), 0);
    assert!(!program.is_released());

    program.release(&mut device);
    assert_nothing_alive(&device);
}

#[test]
fn test_relink_after_failure() {
    let mut device = MockGraphicsDevice::new().with_link_failure("first attempt");
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();

    assert!(program.link(&mut device).is_err());
    device.set_link_failure(None);
    assert!(program.link(&mut device).is_ok());
    assert!(program.is_linked());

    program.release(&mut device);
}

#[test]
fn test_link_released_program_is_invalid() {
    let mut device = MockGraphicsDevice::new();
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();
    program.release(&mut device);

    let err = program.link(&mut device).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidResource);
    assert_eq!(device.count("link_program"), 0);
}

// ============================================================================
// BIND
// ============================================================================

#[test]
fn test_use_program_with_none_unbinds() {
    let mut device = MockGraphicsDevice::new();
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();

    ProgramUnit::use_program(&mut device, Some(&program));
    assert_eq!(device.bound_program(), Some(program.id()));
    ProgramUnit::use_program(&mut device, None);
    assert_eq!(device.bound_program(), None);
    assert_eq!(device.commands.last().map(String::as_str), Some("use_program(0)"));

    program.release(&mut device);
}

#[test]
fn test_bind_released_program_binds_nothing() {
    let mut device = MockGraphicsDevice::new();
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();
    program.release(&mut device);

    program.bind(&mut device);

    assert_eq!(device.bound_program(), None);
    assert_eq!(device.invalid_calls(), 0);
}

// ============================================================================
// RELEASE
// ============================================================================

#[test]
fn test_release_is_idempotent() {
    let mut device = MockGraphicsDevice::new();
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();

    program.release(&mut device);
    let commands_after_first = device.commands.len();
    program.release(&mut device);

    assert_eq!(device.commands.len(), commands_after_first);
    assert!(program.is_released());
    assert!(program.vertex().is_none());
    assert!(program.fragment().is_none());
    assert_nothing_alive(&device);
}

#[test]
fn test_release_detaches_then_deletes_shaders_then_program() {
    let mut device = MockGraphicsDevice::new();
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();
    let vs = program.vertex().unwrap().id().0;
    let fs = program.fragment().unwrap().id().0;
    let pid = program.id().0;
    let start = device.commands.len();

    program.release(&mut device);

    assert_eq!(
        device.commands[start..].to_vec(),
        vec![
            format!("detach_shader({}, {})", pid, vs),
            format!("delete_shader({})", vs),
            format!("detach_shader({}, {})", pid, fs),
            format!("delete_shader({})", fs),
            format!("delete_program({})", pid),
        ]
    );
}

#[test]
fn test_release_clears_link_state() {
    let mut device = MockGraphicsDevice::new();
    let mut program = create(&mut device, "basic.vert", "basic.frag").unwrap();
    program.link(&mut device).unwrap();

    program.release(&mut device);

    assert!(!program.is_linked());
}

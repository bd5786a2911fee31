/// Mock GraphicsDevice for tests (no GPU required)
///
/// Records every driver call, tracks live shader/program objects and lets
/// tests inject failures (refused allocations, compile errors per stage, link
/// errors, oversized info logs). Leak checks are plain object counts:
/// after a failed construction `live_shader_count()` and
/// `live_program_count()` must be back to where they started.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graphics_device::{GraphicsDevice, ShaderStage, ShaderId, ProgramId};

// ============================================================================
// Mock objects
// ============================================================================

/// Shader object as seen by the mock driver
#[derive(Debug, Clone)]
pub struct MockShaderObject {
    pub stage: ShaderStage,
    pub source: Option<String>,
    pub compiled: bool,
    pub info_log: String,
}

/// Program object as seen by the mock driver
#[derive(Debug, Clone, Default)]
pub struct MockProgramObject {
    pub attached: Vec<ShaderId>,
    pub linked: bool,
    pub info_log: String,
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug)]
pub struct MockGraphicsDevice {
    /// Every driver call, in order, e.g. `create_shader(vertex)` or `delete_program(1)`
    pub commands: Vec<String>,
    shaders: FxHashMap<u32, MockShaderObject>,
    programs: FxHashMap<u32, MockProgramObject>,
    next_id: u32,
    bound_program: Option<ProgramId>,
    invalid_calls: usize,

    // Failure injection
    refused_shader_stages: FxHashSet<ShaderStage>,
    refuse_programs: bool,
    compile_failures: FxHashMap<ShaderStage, String>,
    link_failure: Option<String>,
    reported_log_length: Option<usize>,
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGraphicsDevice {
    /// Create a device that accepts every allocation, compilation and link
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            shaders: FxHashMap::default(),
            programs: FxHashMap::default(),
            next_id: 1,
            bound_program: None,
            invalid_calls: 0,
            refused_shader_stages: FxHashSet::default(),
            refuse_programs: false,
            compile_failures: FxHashMap::default(),
            link_failure: None,
            reported_log_length: None,
        }
    }

    // ===== FAILURE INJECTION =====

    /// Return NULL from `create_shader` for this stage
    pub fn with_refused_shader_stage(mut self, stage: ShaderStage) -> Self {
        self.refused_shader_stages.insert(stage);
        self
    }

    /// Return NULL from `create_program`
    pub fn with_refused_program_allocation(mut self) -> Self {
        self.refuse_programs = true;
        self
    }

    /// Fail every compilation of `stage` with the given info log
    pub fn with_compile_failure(mut self, stage: ShaderStage, info_log: &str) -> Self {
        self.compile_failures.insert(stage, info_log.to_string());
        self
    }

    /// Fail every link with the given info log
    pub fn with_link_failure(mut self, info_log: &str) -> Self {
        self.link_failure = Some(info_log.to_string());
        self
    }

    /// Override the length reported by the info-log length queries
    ///
    /// A length near `usize::MAX` makes the log buffer impossible to reserve.
    pub fn with_reported_log_length(mut self, length: usize) -> Self {
        self.reported_log_length = Some(length);
        self
    }

    /// Change the link outcome of subsequent links (`None` = succeed)
    pub fn set_link_failure(&mut self, info_log: Option<&str>) {
        self.link_failure = info_log.map(str::to_string);
    }

    // ===== INSPECTION =====

    /// Number of recorded calls to the named driver operation
    pub fn count(&self, operation: &str) -> usize {
        self.commands
            .iter()
            .filter(|command| command.split('(').next() == Some(operation))
            .count()
    }

    /// Number of shader objects currently alive on the device
    pub fn live_shader_count(&self) -> usize {
        self.shaders.len()
    }

    /// Number of program objects currently alive on the device
    pub fn live_program_count(&self) -> usize {
        self.programs.len()
    }

    /// Shader object behind a handle, if alive
    pub fn shader(&self, shader: ShaderId) -> Option<&MockShaderObject> {
        self.shaders.get(&shader.0)
    }

    /// Program object behind a handle, if alive
    pub fn program(&self, program: ProgramId) -> Option<&MockProgramObject> {
        self.programs.get(&program.0)
    }

    /// Currently bound program
    pub fn bound_program(&self) -> Option<ProgramId> {
        self.bound_program
    }

    /// Calls made with a handle the device does not know (double delete,
    /// attach of a dead shader...)
    pub fn invalid_calls(&self) -> usize {
        self.invalid_calls
    }

    fn record(&mut self, command: String) {
        self.commands.push(command);
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn copy_log(log: &str, buffer: &mut [u8]) -> usize {
        let count = log.len().min(buffer.len());
        buffer[..count].copy_from_slice(&log.as_bytes()[..count]);
        count
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId {
        self.record(format!("create_shader({})", stage));
        if self.refused_shader_stages.contains(&stage) {
            return ShaderId::NULL;
        }

        let id = self.allocate_id();
        self.shaders.insert(id, MockShaderObject {
            stage,
            source: None,
            compiled: false,
            info_log: String::new(),
        });
        ShaderId(id)
    }

    fn shader_source(&mut self, shader: ShaderId, source: &str) {
        self.record(format!("shader_source({})", shader.0));
        match self.shaders.get_mut(&shader.0) {
            Some(object) => object.source = Some(source.to_string()),
            None => self.invalid_calls += 1,
        }
    }

    fn compile_shader(&mut self, shader: ShaderId) {
        self.record(format!("compile_shader({})", shader.0));
        let Some(object) = self.shaders.get_mut(&shader.0) else {
            self.invalid_calls += 1;
            return;
        };

        if let Some(log) = self.compile_failures.get(&object.stage) {
            object.compiled = false;
            object.info_log = log.clone();
        } else if object.source.is_none() {
            object.compiled = false;
            object.info_log = "error: shader has no source attached".to_string();
        } else {
            object.compiled = true;
            object.info_log.clear();
        }
    }

    fn shader_compile_status(&mut self, shader: ShaderId) -> bool {
        self.record(format!("shader_compile_status({})", shader.0));
        self.shaders.get(&shader.0).map_or(false, |object| object.compiled)
    }

    fn shader_info_log_length(&mut self, shader: ShaderId) -> usize {
        self.record(format!("shader_info_log_length({})", shader.0));
        if let Some(length) = self.reported_log_length {
            return length;
        }
        self.shaders.get(&shader.0).map_or(0, |object| object.info_log.len())
    }

    fn shader_info_log(&mut self, shader: ShaderId, buffer: &mut [u8]) -> usize {
        self.record(format!("shader_info_log({})", shader.0));
        match self.shaders.get(&shader.0) {
            Some(object) => Self::copy_log(&object.info_log, buffer),
            None => {
                self.invalid_calls += 1;
                0
            }
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.record(format!("delete_shader({})", shader.0));
        if self.shaders.remove(&shader.0).is_none() {
            self.invalid_calls += 1;
        }
    }

    fn create_program(&mut self) -> ProgramId {
        self.record("create_program()".to_string());
        if self.refuse_programs {
            return ProgramId::NULL;
        }

        let id = self.allocate_id();
        self.programs.insert(id, MockProgramObject::default());
        ProgramId(id)
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.record(format!("attach_shader({}, {})", program.0, shader.0));
        let shader_alive = self.shaders.contains_key(&shader.0);
        match self.programs.get_mut(&program.0) {
            Some(object) if shader_alive && !object.attached.contains(&shader) => {
                object.attached.push(shader);
            }
            _ => self.invalid_calls += 1,
        }
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.record(format!("detach_shader({}, {})", program.0, shader.0));
        match self.programs.get_mut(&program.0) {
            Some(object) if object.attached.contains(&shader) => {
                object.attached.retain(|attached| *attached != shader);
            }
            _ => self.invalid_calls += 1,
        }
    }

    fn link_program(&mut self, program: ProgramId) {
        self.record(format!("link_program({})", program.0));
        let Some(object) = self.programs.get(&program.0) else {
            self.invalid_calls += 1;
            return;
        };

        let has_stage = |stage: ShaderStage| {
            object.attached.iter().any(|id| {
                self.shaders
                    .get(&id.0)
                    .map_or(false, |shader| shader.stage == stage && shader.compiled)
            })
        };
        let complete = has_stage(ShaderStage::Vertex) && has_stage(ShaderStage::Fragment);

        let (linked, info_log) = match (&self.link_failure, complete) {
            (Some(log), _) => (false, log.clone()),
            (None, false) => (false, "error: missing compiled vertex or fragment stage".to_string()),
            (None, true) => (true, String::new()),
        };

        if let Some(object) = self.programs.get_mut(&program.0) {
            object.linked = linked;
            object.info_log = info_log;
        }
    }

    fn program_link_status(&mut self, program: ProgramId) -> bool {
        self.record(format!("program_link_status({})", program.0));
        self.programs.get(&program.0).map_or(false, |object| object.linked)
    }

    fn program_info_log_length(&mut self, program: ProgramId) -> usize {
        self.record(format!("program_info_log_length({})", program.0));
        if let Some(length) = self.reported_log_length {
            return length;
        }
        self.programs.get(&program.0).map_or(0, |object| object.info_log.len())
    }

    fn program_info_log(&mut self, program: ProgramId, buffer: &mut [u8]) -> usize {
        self.record(format!("program_info_log({})", program.0));
        match self.programs.get(&program.0) {
            Some(object) => Self::copy_log(&object.info_log, buffer),
            None => {
                self.invalid_calls += 1;
                0
            }
        }
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.record(format!("use_program({})", program.map_or(0, |id| id.0)));
        // Binding the null program unbinds, as in GL
        let program = program.filter(|id| !id.is_null());
        if let Some(id) = program {
            if !self.programs.contains_key(&id.0) {
                self.invalid_calls += 1;
            }
        }
        self.bound_program = program;
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.record(format!("delete_program({})", program.0));
        if self.programs.remove(&program.0).is_none() {
            self.invalid_calls += 1;
        }
        if self.bound_program == Some(program) {
            self.bound_program = None;
        }
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;

//! Test doubles shared by the unit tests.

use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use crate::backend::{AttribType, BufferTarget, GraphicsBackend};
use crate::shader::{ShaderStage, SourceLoader, UniformValue};

#[derive(Debug, Default)]
pub(crate) struct ShaderRecord {
    pub source: String,
    pub compiled: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ProgramRecord {
    pub attached: Vec<u32>,
    pub linked: bool,
    pub info_log: String,
    /// Uniform names declared by the stages at link time, in declaration order.
    pub uniforms: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct AttribPointer {
    pub index: u32,
    pub count: i32,
    pub kind: AttribType,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}

/// Everything the recording backend has seen. Live objects are kept in the
/// maps/sets; deleting removes them, so a leak shows up as a leftover entry.
#[derive(Debug, Default)]
pub(crate) struct BackendState {
    next_id: u32,
    pending_link_failure: Option<String>,
    pending_errors: VecDeque<u32>,

    pub shaders: HashMap<u32, ShaderRecord>,
    pub programs: HashMap<u32, ProgramRecord>,
    pub buffers: HashMap<u32, Vec<u8>>,
    pub vertex_arrays: HashSet<u32>,

    pub shaders_created: usize,
    pub programs_created: usize,
    pub programs_deleted: usize,
    pub compile_calls: usize,

    pub active_program: Option<u32>,
    pub bound_array_buffer: Option<u32>,
    pub bound_element_buffer: Option<u32>,
    pub bound_vertex_array: Option<u32>,

    pub uniform_queries: Vec<String>,
    pub uniform_writes: Vec<(Option<u32>, UniformValue)>,

    pub enabled_attribs: Vec<u32>,
    pub attrib_pointers: Vec<AttribPointer>,

    pub clear_color: Option<[f32; 4]>,
    pub clears: usize,
    pub viewport: Option<(i32, i32, i32, i32)>,
    /// `(vertex array, element buffer, program, index count)` per draw call.
    pub draws: Vec<(Option<u32>, Option<u32>, Option<u32>, i32)>,
}

impl BackendState {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory [`GraphicsBackend`] with resource accounting.
///
/// Compilation fails for sources without `void main` or with unbalanced
/// parentheses/braces. Uniforms are whatever `uniform <type> <name>;`
/// declarations the attached stages contain.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    state: RefCell<BackendState>,
}

impl RecordingBackend {
    pub fn state(&self) -> Ref<'_, BackendState> {
        self.state.borrow()
    }

    /// Makes the next `link_program` fail with `log`.
    pub fn fail_next_link(&self, log: &str) {
        self.state.borrow_mut().pending_link_failure = Some(log.to_owned());
    }

    /// Queues an error flag for `take_error` to report.
    pub fn raise_error(&self, code: u32) {
        self.state.borrow_mut().pending_errors.push_back(code);
    }
}

fn balanced(source: &str) -> bool {
    let mut stack = Vec::new();
    for c in source.chars() {
        match c {
            '(' | '{' => stack.push(c),
            ')' if stack.pop() != Some('(') => return false,
            '}' if stack.pop() != Some('{') => return false,
            _ => {}
        }
    }
    stack.is_empty()
}

fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source
        .split(';')
        .map(str::trim)
        .filter(|stmt| stmt.starts_with("uniform "))
        .filter_map(|stmt| stmt.split_whitespace().last())
        .map(str::to_owned)
}

impl GraphicsBackend for RecordingBackend {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, _stage: ShaderStage) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.shaders_created += 1;
        s.shaders.insert(id, ShaderRecord::default());
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut s = self.state.borrow_mut();
        let record = s.shaders.get_mut(&shader).expect("source on deleted shader");
        record.source = source.to_owned();
    }

    fn compile_shader(&self, shader: u32) {
        let mut s = self.state.borrow_mut();
        s.compile_calls += 1;
        let record = s.shaders.get_mut(&shader).expect("compile on deleted shader");
        record.compiled = record.source.contains("void main") && balanced(&record.source);
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state.borrow().shaders[&shader].compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        if self.shader_compile_status(shader) {
            String::new()
        } else {
            "0:1(1): error: syntax error, unexpected end of file\n".to_owned()
        }
    }

    fn delete_shader(&self, shader: u32) {
        let removed = self.state.borrow_mut().shaders.remove(&shader);
        assert!(removed.is_some(), "shader {shader} deleted twice");
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.programs_created += 1;
        s.programs.insert(id, ProgramRecord::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut s = self.state.borrow_mut();
        assert!(s.shaders.contains_key(&shader), "attach of deleted shader");
        s.programs.get_mut(&program).expect("attach to deleted program").attached.push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        let mut s = self.state.borrow_mut();
        let record = s.programs.get_mut(&program).expect("detach from deleted program");
        record.attached.retain(|&id| id != shader);
    }

    fn link_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        let failure = s.pending_link_failure.take();

        let uniforms: Vec<String> = s.programs[&program]
            .attached
            .iter()
            .flat_map(|id| declared_uniforms(&s.shaders[id].source).collect::<Vec<_>>())
            .collect();

        let record = s.programs.get_mut(&program).expect("link of deleted program");
        record.linked = failure.is_none();
        record.info_log = failure.unwrap_or_default();
        record.uniforms = uniforms;
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().programs[&program].linked
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state.borrow().programs[&program].info_log.clone()
    }

    fn delete_program(&self, program: u32) {
        let mut s = self.state.borrow_mut();
        assert!(s.programs.remove(&program).is_some(), "program {program} deleted twice");
        s.programs_deleted += 1;
        if s.active_program == Some(program) {
            s.active_program = None;
        }
    }

    fn use_program(&self, program: Option<u32>) {
        let mut s = self.state.borrow_mut();
        if let Some(id) = program {
            assert!(s.programs[&id].linked, "use of unlinked program");
        }
        s.active_program = program;
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut s = self.state.borrow_mut();
        s.uniform_queries.push(name.to_owned());
        s.programs[&program]
            .uniforms
            .iter()
            .position(|u| u == name)
            .map(|i| i as u32)
    }

    fn set_uniform(&self, location: Option<&u32>, value: UniformValue) {
        self.state
            .borrow_mut()
            .uniform_writes
            .push((location.copied(), value));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.buffers.insert(id, Vec::new());
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<u32>) {
        let mut s = self.state.borrow_mut();
        match target {
            BufferTarget::Array => s.bound_array_buffer = buffer,
            BufferTarget::ElementArray => s.bound_element_buffer = buffer,
        }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        let bound = match target {
            BufferTarget::Array => s.bound_array_buffer,
            BufferTarget::ElementArray => s.bound_element_buffer,
        };
        let id = bound.expect("buffer_data with nothing bound");
        s.buffers.insert(id, data.to_vec());
    }

    fn delete_buffer(&self, buffer: u32) {
        let removed = self.state.borrow_mut().buffers.remove(&buffer);
        assert!(removed.is_some(), "buffer {buffer} deleted twice");
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let id = s.alloc();
        s.vertex_arrays.insert(id);
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.state.borrow_mut().bound_vertex_array = vertex_array;
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        let removed = self.state.borrow_mut().vertex_arrays.remove(&vertex_array);
        assert!(removed, "vertex array {vertex_array} deleted twice");
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.state.borrow_mut().enabled_attribs.push(index);
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        kind: AttribType,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.state.borrow_mut().attrib_pointers.push(AttribPointer {
            index,
            count,
            kind,
            normalized,
            stride,
            offset,
        });
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.state.borrow_mut().clear_color = Some([r, g, b, a]);
    }

    fn clear_color_buffer(&self) {
        self.state.borrow_mut().clears += 1;
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.state.borrow_mut().viewport = Some((x, y, width, height));
    }

    fn draw_indexed_triangles(&self, count: i32) {
        let mut s = self.state.borrow_mut();
        let draw = (
            s.bound_vertex_array,
            s.bound_element_buffer,
            s.active_program,
            count,
        );
        s.draws.push(draw);
    }

    fn version(&self) -> String {
        "3.3.0 recording".to_owned()
    }

    fn take_error(&self) -> Option<u32> {
        self.state.borrow_mut().pending_errors.pop_front()
    }
}

/// [`SourceLoader`] over an in-memory path → text map.
#[derive(Debug, Default)]
pub(crate) struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn with(mut self, path: &str, text: &str) -> Self {
        self.files.insert(PathBuf::from(path), text.to_owned());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

/// Process-wide logger that keeps every record for inspection.
///
/// Tests run in parallel against the one global logger, so lookups filter by a
/// needle unique to the calling test.
struct CaptureLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static LOGGER_INIT: Once = Once::new();

/// Installs the capturing logger. Safe to call from every test.
pub(crate) fn capture_logs() {
    LOGGER_INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("another logger is already installed");
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Messages logged at exactly `level` that mention `needle`.
pub(crate) fn captured_logs(level: log::Level, needle: &str) -> Vec<String> {
    capture_logs();
    LOGGER
        .records
        .lock()
        .expect("capture logger poisoned")
        .iter()
        .filter(|(l, msg)| *l == level && msg.contains(needle))
        .map(|(_, msg)| msg.clone())
        .collect()
}

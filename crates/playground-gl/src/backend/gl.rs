use glow::HasContext;

use super::{AttribType, BufferTarget, GraphicsBackend, drain_errors};
use crate::shader::{ShaderStage, UniformValue};

/// [`GraphicsBackend`] over a loaded `glow` context.
///
/// The context is only valid on the thread that made it current; `glow::Context`
/// is neither `Send` nor `Sync`-shared by this crate, and the runtime keeps the
/// backend behind an `Rc`.
pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    /// Wraps an already-loaded context.
    ///
    /// # Safety
    ///
    /// `gl` must have been loaded for a context that stays current on this
    /// thread for as long as the backend (and anything holding it) is alive.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Runs one GL call; debug builds then drain and log the error state.
    #[inline]
    fn checked<R>(&self, call: &str, f: impl FnOnce(&glow::Context) -> R) -> R {
        let out = f(&self.gl);
        if cfg!(debug_assertions) {
            drain_errors(self, call);
        }
        out
    }
}

fn stage_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn attrib_type(kind: AttribType) -> u32 {
    match kind {
        AttribType::F32 => glow::FLOAT,
        AttribType::U32 => glow::UNSIGNED_INT,
        AttribType::U8 => glow::UNSIGNED_BYTE,
    }
}

// Safety for every block below: `GlowBackend::new` requires the context to be
// current on this thread for the backend's lifetime.
impl GraphicsBackend for GlowBackend {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        self.checked("glCreateShader", |gl| unsafe { gl.create_shader(stage_kind(stage)) })
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        self.checked("glShaderSource", |gl| unsafe { gl.shader_source(shader, source) })
    }

    fn compile_shader(&self, shader: Self::Shader) {
        self.checked("glCompileShader", |gl| unsafe { gl.compile_shader(shader) })
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        self.checked("glGetShaderiv(COMPILE_STATUS)", |gl| unsafe {
            gl.get_shader_compile_status(shader)
        })
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        self.checked("glGetShaderInfoLog", |gl| unsafe { gl.get_shader_info_log(shader) })
    }

    fn delete_shader(&self, shader: Self::Shader) {
        self.checked("glDeleteShader", |gl| unsafe { gl.delete_shader(shader) })
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        self.checked("glCreateProgram", |gl| unsafe { gl.create_program() })
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        self.checked("glAttachShader", |gl| unsafe { gl.attach_shader(program, shader) })
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        self.checked("glDetachShader", |gl| unsafe { gl.detach_shader(program, shader) })
    }

    fn link_program(&self, program: Self::Program) {
        self.checked("glLinkProgram", |gl| unsafe { gl.link_program(program) })
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        self.checked("glGetProgramiv(LINK_STATUS)", |gl| unsafe {
            gl.get_program_link_status(program)
        })
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        self.checked("glGetProgramInfoLog", |gl| unsafe { gl.get_program_info_log(program) })
    }

    fn delete_program(&self, program: Self::Program) {
        self.checked("glDeleteProgram", |gl| unsafe { gl.delete_program(program) })
    }

    fn use_program(&self, program: Option<Self::Program>) {
        self.checked("glUseProgram", |gl| unsafe { gl.use_program(program) })
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        self.checked("glGetUniformLocation", |gl| unsafe {
            gl.get_uniform_location(program, name)
        })
    }

    fn set_uniform(&self, location: Option<&Self::UniformLocation>, value: UniformValue) {
        self.checked("glUniform", |gl| unsafe {
            match value {
                UniformValue::Float(x) => gl.uniform_1_f32(location, x),
                UniformValue::Vec2([x, y]) => gl.uniform_2_f32(location, x, y),
                UniformValue::Vec3([x, y, z]) => gl.uniform_3_f32(location, x, y, z),
                UniformValue::Vec4([x, y, z, w]) => gl.uniform_4_f32(location, x, y, z, w),
                UniformValue::Int(v) => gl.uniform_1_i32(location, v),
            }
        })
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        self.checked("glGenBuffers", |gl| unsafe { gl.create_buffer() })
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        self.checked("glBindBuffer", |gl| unsafe {
            gl.bind_buffer(buffer_target(target), buffer)
        })
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.checked("glBufferData", |gl| unsafe {
            gl.buffer_data_u8_slice(buffer_target(target), data, glow::STATIC_DRAW)
        })
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        self.checked("glDeleteBuffers", |gl| unsafe { gl.delete_buffer(buffer) })
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        self.checked("glGenVertexArrays", |gl| unsafe { gl.create_vertex_array() })
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        self.checked("glBindVertexArray", |gl| unsafe {
            gl.bind_vertex_array(vertex_array)
        })
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        self.checked("glDeleteVertexArrays", |gl| unsafe {
            gl.delete_vertex_array(vertex_array)
        })
    }

    fn enable_vertex_attrib(&self, index: u32) {
        self.checked("glEnableVertexAttribArray", |gl| unsafe {
            gl.enable_vertex_attrib_array(index)
        })
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
        self.checked("glVertexAttribPointer", |gl| unsafe {
            gl.vertex_attrib_pointer_f32(index, count, attrib_type(kind), normalized, stride, offset)
        })
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.checked("glClearColor", |gl| unsafe { gl.clear_color(r, g, b, a) })
    }

    fn clear_color_buffer(&self) {
        self.checked("glClear", |gl| unsafe { gl.clear(glow::COLOR_BUFFER_BIT) })
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.checked("glViewport", |gl| unsafe { gl.viewport(x, y, width, height) })
    }

    fn draw_indexed_triangles(&self, count: i32) {
        self.checked("glDrawElements", |gl| unsafe {
            gl.draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0)
        })
    }

    fn version(&self) -> String {
        self.checked("glGetString(VERSION)", |gl| unsafe {
            gl.get_parameter_string(glow::VERSION)
        })
    }

    fn take_error(&self) -> Option<u32> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(code),
        }
    }
}

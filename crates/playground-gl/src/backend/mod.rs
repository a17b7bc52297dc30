//! Graphics backend seam.
//!
//! Every GL call made by the wrappers in this crate goes through
//! [`GraphicsBackend`]. The production implementation is [`GlowBackend`]; the
//! unit tests substitute a recording double so resource accounting can be
//! checked without a driver.
//!
//! All methods assume the backend's GL context is current on the calling thread.
//!
//! Debug builds of [`GlowBackend`] drain the GL error state after every call and
//! log what they find, see [`drain_errors`].

mod errors;
mod gl;

pub use errors::{drain_errors, error_name};
pub use gl::GlowBackend;

use std::fmt::Debug;

use crate::shader::{ShaderStage, UniformValue};

/// Buffer binding targets used by the wrappers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Element indices.
    ElementArray,
}

/// Scalar types a vertex attribute can be made of.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttribType {
    F32,
    U32,
    U8,
}

impl AttribType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            AttribType::F32 | AttribType::U32 => 4,
            AttribType::U8 => 1,
        }
    }
}

/// Synchronous graphics API surface consumed by the crate.
///
/// Handle types are plain values; ownership is enforced by the wrappers that
/// store them, not by the backend.
pub trait GraphicsBackend {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type UniformLocation: Clone + Debug;
    type Buffer: Copy + Debug;
    type VertexArray: Copy + Debug;

    // ── shader stages ─────────────────────────────────────────────────────

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // ── programs ──────────────────────────────────────────────────────────

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    /// Makes `program` the active program; `None` unbinds.
    fn use_program(&self, program: Option<Self::Program>);

    /// Returns `None` when `name` is not an active uniform of `program`.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;

    /// Sets a uniform on the active program. `None` is accepted and ignored by GL.
    fn set_uniform(&self, location: Option<&Self::UniformLocation>, value: UniformValue);

    // ── buffers / vertex arrays ───────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Uploads `data` to the buffer bound at `target` (static draw usage).
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: Self::Buffer);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);

    fn enable_vertex_attrib(&self, index: u32);

    /// Describes attribute `index` of the bound array buffer. `stride` and
    /// `offset` are in bytes.
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        count: i32,
        kind: AttribType,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // ── frame ─────────────────────────────────────────────────────────────

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);

    /// Draws `count` `u32` indices from the bound element buffer as triangles.
    fn draw_indexed_triangles(&self, count: i32);

    /// Driver version string, for diagnostics only.
    fn version(&self) -> String;

    /// Pops the oldest pending error flag. `None` once the error state is clear.
    fn take_error(&self) -> Option<u32>;
}

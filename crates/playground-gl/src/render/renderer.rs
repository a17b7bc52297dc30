use std::rc::Rc;

use crate::backend::GraphicsBackend;
use crate::buffer::{IndexBuffer, VertexArray};
use crate::paint::Color;
use crate::shader::ShaderProgram;

/// Issues clear and indexed draw calls.
pub struct Renderer<B: GraphicsBackend> {
    gl: Rc<B>,
}

impl<B: GraphicsBackend> Renderer<B> {
    #[inline]
    pub fn new(gl: Rc<B>) -> Self {
        Self { gl }
    }

    /// Sets the color used by [`clear`](Self::clear).
    pub fn set_clear_color(&self, color: Color) {
        self.gl.clear_color(color.r, color.g, color.b, color.a);
    }

    /// Clears the color buffer.
    pub fn clear(&self) {
        self.gl.clear_color_buffer();
    }

    /// Binds the three objects and draws `index_buffer.count()` indices as
    /// triangles.
    pub fn draw(
        &self,
        vertex_array: &VertexArray<B>,
        index_buffer: &IndexBuffer<B>,
        program: &ShaderProgram<B>,
    ) {
        program.bind();
        vertex_array.bind();
        index_buffer.bind();

        self.gl.draw_indexed_triangles(index_buffer.count() as i32);
    }

    /// Resizes the GL viewport to a `width` x `height` drawable.
    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }
}

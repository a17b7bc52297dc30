use std::rc::Rc;

use crate::backend::GraphicsBackend;

use super::{VertexBuffer, VertexBufferLayout};

/// Vertex array object: binds vertex buffers to attribute layouts.
pub struct VertexArray<B: GraphicsBackend> {
    gl: Rc<B>,
    vertex_array: B::VertexArray,
}

impl<B: GraphicsBackend> VertexArray<B> {
    pub fn new(gl: Rc<B>) -> anyhow::Result<Self> {
        let vertex_array = gl
            .create_vertex_array()
            .map_err(|e| anyhow::anyhow!("failed to create vertex array: {e}"))?;

        Ok(Self { gl, vertex_array })
    }

    /// Records `buffer` as the source of attributes `0..layout.elements().len()`.
    ///
    /// Leaves this vertex array and `buffer` bound.
    pub fn add_buffer(&self, buffer: &VertexBuffer<B>, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let stride = layout.stride() as i32;
        let mut offset = 0usize;
        for (index, element) in layout.elements().iter().enumerate() {
            let index = index as u32;
            self.gl.enable_vertex_attrib(index);
            self.gl.vertex_attrib_pointer(
                index,
                element.count as i32,
                element.kind,
                element.normalized,
                stride,
                offset as i32,
            );
            offset += element.size();
        }
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(Some(self.vertex_array));
    }

    pub fn unbind(&self) {
        self.gl.bind_vertex_array(None);
    }

    pub fn handle(&self) -> B::VertexArray {
        self.vertex_array
    }
}

impl<B: GraphicsBackend> Drop for VertexArray<B> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.vertex_array);
    }
}

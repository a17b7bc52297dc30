use std::rc::Rc;

use crate::backend::{BufferTarget, GraphicsBackend};

/// `u32` element indices in an `ELEMENT_ARRAY_BUFFER`.
pub struct IndexBuffer<B: GraphicsBackend> {
    gl: Rc<B>,
    buffer: B::Buffer,
    count: usize,
}

impl<B: GraphicsBackend> IndexBuffer<B> {
    /// Uploads `indices` and leaves the buffer bound.
    pub fn new(gl: Rc<B>, indices: &[u32]) -> anyhow::Result<Self> {
        let buffer = gl
            .create_buffer()
            .map_err(|e| anyhow::anyhow!("failed to create index buffer: {e}"))?;
        gl.bind_buffer(BufferTarget::ElementArray, Some(buffer));
        gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));

        log::debug!("uploaded index buffer ({} indices)", indices.len());

        Ok(Self {
            gl,
            buffer,
            count: indices.len(),
        })
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(BufferTarget::ElementArray, Some(self.buffer));
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(BufferTarget::ElementArray, None);
    }

    /// Number of indices, i.e. the element count of a draw call.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn handle(&self) -> B::Buffer {
        self.buffer
    }
}

impl<B: GraphicsBackend> Drop for IndexBuffer<B> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
    }
}

use std::rc::Rc;

use bytemuck::Pod;

use crate::backend::{BufferTarget, GraphicsBackend};

/// Static vertex data in an `ARRAY_BUFFER`.
pub struct VertexBuffer<B: GraphicsBackend> {
    gl: Rc<B>,
    buffer: B::Buffer,
}

impl<B: GraphicsBackend> VertexBuffer<B> {
    /// Uploads `data` and leaves the buffer bound.
    pub fn new<T: Pod>(gl: Rc<B>, data: &[T]) -> anyhow::Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);

        let buffer = gl
            .create_buffer()
            .map_err(|e| anyhow::anyhow!("failed to create vertex buffer: {e}"))?;
        gl.bind_buffer(BufferTarget::Array, Some(buffer));
        gl.buffer_data(BufferTarget::Array, bytes);

        log::debug!("uploaded vertex buffer ({} bytes)", bytes.len());

        Ok(Self { gl, buffer })
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(BufferTarget::Array, Some(self.buffer));
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(BufferTarget::Array, None);
    }

    pub fn handle(&self) -> B::Buffer {
        self.buffer
    }
}

impl<B: GraphicsBackend> Drop for VertexBuffer<B> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
    }
}

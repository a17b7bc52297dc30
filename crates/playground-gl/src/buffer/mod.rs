//! Vertex/index buffers and vertex arrays.
//!
//! Each wrapper owns exactly one GL object and deletes it on drop. Wrappers are
//! not `Clone`; share them by reference.

mod index;
mod layout;
mod vertex;
mod vertex_array;

pub use index::IndexBuffer;
pub use layout::{VertexAttrib, VertexBufferLayout, VertexElement};
pub use vertex::VertexBuffer;
pub use vertex_array::VertexArray;

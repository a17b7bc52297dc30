//! Draw-call facade.
//!
//! The renderer owns no GL objects; vertex arrays, index buffers and programs
//! are owned by the caller and only borrowed for the duration of a draw.

mod renderer;

pub use renderer::Renderer;

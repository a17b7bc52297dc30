//! Playground GL crate.
//!
//! This crate owns the window + OpenGL runtime and the RAII wrappers around the
//! GL objects used by the sandbox binary (shader programs, buffers, vertex arrays).

pub mod backend;
pub mod buffer;
pub mod core;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod window;

#[cfg(test)]
mod test_support;

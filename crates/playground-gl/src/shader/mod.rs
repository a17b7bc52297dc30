//! Shader programs.
//!
//! [`ShaderProgram`] turns a vertex/fragment source pair into one linked GL
//! program and resolves uniform names through a per-program cache.
//!
//! Lifecycle:
//! - sources are read through a [`SourceLoader`] before any GL object exists
//! - each stage is compiled; stages are released on every exit path
//! - the linked program is owned exclusively and deleted on drop

mod error;
mod program;
mod source;
mod stage;
mod uniforms;

pub use error::ShaderError;
pub use program::ShaderProgram;
pub use source::{FsSourceLoader, SourceLoader};
pub use stage::ShaderStage;
pub use uniforms::{UniformCache, UniformValue};

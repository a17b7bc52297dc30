//! Window + runtime loop.
//!
//! Owns the `winit` event loop, the window and the `glutin` GL context, and
//! drives a [`core::App`](crate::core::App) against them.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

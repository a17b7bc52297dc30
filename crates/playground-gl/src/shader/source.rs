use std::io;
use std::path::Path;

/// Reads shader source text.
///
/// Implementations return the full text unchanged: no `#include` resolution,
/// no macro expansion.
pub trait SourceLoader {
    fn load(&self, path: &Path) -> io::Result<String>;
}

/// Loads UTF-8 sources from the filesystem.
#[derive(Debug, Default, Copy, Clone)]
pub struct FsSourceLoader;

impl SourceLoader for FsSourceLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

use std::collections::HashMap;

use crate::paint::Color;

/// A value that can be written to a uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<[f32; 2]> for UniformValue {
    fn from(v: [f32; 2]) -> Self {
        UniformValue::Vec2(v)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(v: [f32; 3]) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(v: [f32; 4]) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<(f32, f32, f32, f32)> for UniformValue {
    fn from((x, y, z, w): (f32, f32, f32, f32)) -> Self {
        UniformValue::Vec4([x, y, z, w])
    }
}

impl From<Color> for UniformValue {
    fn from(c: Color) -> Self {
        UniformValue::Vec4(c.to_array())
    }
}

/// Uniform name → location map for one program.
///
/// A miss (`None`) is cached like any other answer: whether a uniform exists is
/// fixed once the program is linked, so each name reaches the backend at most
/// once.
#[derive(Debug)]
pub struct UniformCache<L> {
    entries: HashMap<String, Option<L>>,
}

impl<L> Default for UniformCache<L> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<L> UniformCache<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached location for `name`, calling `query` only on the
    /// first lookup of that name.
    ///
    /// Emits a warning the first time `query` reports the uniform as missing.
    pub fn resolve<F>(&mut self, name: &str, query: F) -> Option<&L>
    where
        F: FnOnce(&str) -> Option<L>,
    {
        if !self.entries.contains_key(name) {
            let location = query(name);
            if location.is_none() {
                log::warn!("uniform '{name}' doesn't exist in the shader program");
            }
            self.entries.insert(name.to_owned(), location);
        }

        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Cached answer for `name` without querying: `None` if never resolved,
    /// `Some(None)` if resolved as missing.
    pub fn get(&self, name: &str) -> Option<Option<&L>> {
        self.entries.get(name).map(Option::as_ref)
    }

    /// Number of distinct names resolved so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Linear straight-alpha RGBA color.
///
/// Components are in `[0, 1]`; nothing here clamps, so values are forwarded to
/// GL as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a copy with the red channel replaced.
    #[inline]
    pub const fn with_r(self, r: f32) -> Self {
        Self { r, ..self }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

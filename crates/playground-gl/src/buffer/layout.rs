use crate::backend::AttribType;

/// Scalar types that can make up a vertex attribute.
pub trait VertexAttrib {
    const KIND: AttribType;
    /// Whether integer data is mapped to `[0, 1]` when read as float.
    const NORMALIZED: bool;
}

impl VertexAttrib for f32 {
    const KIND: AttribType = AttribType::F32;
    const NORMALIZED: bool = false;
}

impl VertexAttrib for u32 {
    const KIND: AttribType = AttribType::U32;
    const NORMALIZED: bool = false;
}

impl VertexAttrib for u8 {
    const KIND: AttribType = AttribType::U8;
    const NORMALIZED: bool = true;
}

/// One attribute: `count` components of `kind`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexElement {
    pub kind: AttribType,
    pub count: u32,
    pub normalized: bool,
}

impl VertexElement {
    #[inline]
    pub const fn size(&self) -> usize {
        self.kind.size() * self.count as usize
    }
}

/// Interleaved attribute layout of one vertex buffer.
///
/// Attributes get consecutive indices starting at 0 in push order.
#[derive(Debug, Clone, Default)]
pub struct VertexBufferLayout {
    elements: Vec<VertexElement>,
    stride: usize,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute of `count` components of `T`.
    pub fn push<T: VertexAttrib>(&mut self, count: u32) -> &mut Self {
        let element = VertexElement {
            kind: T::KIND,
            count,
            normalized: T::NORMALIZED,
        };
        self.stride += element.size();
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    /// Bytes between consecutive vertices.
    pub fn stride(&self) -> usize {
        self.stride
    }
}

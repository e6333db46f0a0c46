//! Node identity and source positions.

use std::fmt;

/// Identity of an AST node, unique within one source file.
///
/// Only nodes the binder or the lowering pass need to refer back to carry an
/// id: identifiers, import/export declarations and specifiers, and the source
/// file itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id shared by every node a transform synthesizes.
    pub const SYNTHETIC: Self = Self(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            f.write_str("#synthetic")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Byte range of a node in its source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub pos: u32,
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(pos: u32, end: u32) -> Self {
        Self { pos, end }
    }
}

/// An identifier occurrence: a binding, a reference or a synthesized name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
}

impl Ident {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A transform-generated identifier that no resolver knows about.
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self::new(NodeId::SYNTHETIC, name)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

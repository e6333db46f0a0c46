//! Binding and assignment patterns.
//!
//! The same node family is used for declaration targets (`var {a} = o`) and
//! assignment targets (`({a} = o)`); only assignment targets may contain
//! [`Pattern::Expr`].

use crate::expr::{Expr, PropName};
use crate::node::Ident;

#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Ident(Ident),
    /// A member expression used as an assignment target: `o.x = 1`.
    Expr(Box<Expr>),
    Object(ObjectPattern),
    Array(ArrayPattern),
}

impl Pattern {
    #[must_use]
    pub const fn as_ident(&self) -> Option<&Ident> {
        match self {
            Self::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_destructuring(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPattern {
    pub props: Vec<ObjectPatternProp>,
    pub rest: Option<Box<Pattern>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectPatternProp {
    /// `{ key: target = default }`
    KeyValue {
        key: PropName,
        value: Pattern,
        default: Option<Expr>,
    },
    /// `{ name = default }`
    Shorthand { name: Ident, default: Option<Expr> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayPattern {
    /// `None` is an elision: `[, b]`.
    pub elements: Vec<Option<ArrayPatternElement>>,
    pub rest: Option<Box<Pattern>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayPatternElement {
    pub target: Pattern,
    pub default: Option<Expr>,
}

//! Errors raised while lowering a file.

use modlower_ast::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A module specifier that is not a string literal.
    #[error("{file}: module specifier at {}..{} is not a string literal", .span.pos, .span.end)]
    UnreadableSpecifier { file: String, span: Span },

    #[error("{file}: syntax tree nesting exceeds the lowering depth limit")]
    MaxDepthExceeded { file: String },
}

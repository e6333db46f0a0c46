//! Centralized limits for the modlower passes.
//!
//! Both the binder and the lowering pass walk the AST recursively. These
//! limits keep a pathological input from overflowing the stack.

/// Maximum statement/expression nesting the binder and the lowering pass
/// will descend into.
///
/// ```javascript
/// // Deeply nested blocks or expressions:
/// f(f(f(f(f(f(f(f(f(f(f(f(/* ... 500 levels ... */))))))))))));
/// ```
pub const MAX_AST_DEPTH: u32 = 500;

/// Remaining stack below which a recursive walk switches to a fresh
/// segment.
///
/// Recursion up to [`MAX_AST_DEPTH`] runs through `stacker::maybe_grow`, so
/// the depth limit, not the caller's thread stack size, decides how deep an
/// input may nest.
pub const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated when the red zone is reached.
pub const STACK_SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Maximum nesting of binding patterns (`{a: {b: {c: ...}}}`).
pub const MAX_BINDING_PATTERN_DEPTH: u32 = 100;

/// Upper bound on the numeric suffix tried when generating a unique name.
///
/// Generation walks `base_1`, `base_2`, ... until it finds a free name; a file
/// can only contain so many identifiers, so hitting this means a bug.
pub const MAX_UNIQUE_NAME_ATTEMPTS: u32 = 100_000;

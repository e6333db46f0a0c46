//! JavaScript module AST for modlower.
//!
//! The tree is a set of tagged enums, one per node category (`Stmt`, `Expr`,
//! `Pattern`, ...). Nodes are plain owned values: passes read an input tree
//! and build a new output tree with the [`factory`] helpers rather than
//! patching nodes in place.
//!
//! Every identifier carries a [`NodeId`]. The binder keys its symbol tables by
//! these ids, so two occurrences of the same name in different scopes stay
//! distinguishable. Nodes created by a transform use [`NodeId::SYNTHETIC`] and
//! never resolve to a symbol.

pub mod builder;
pub mod expr;
pub mod factory;
pub mod node;
pub mod ops;
pub mod pattern;
pub mod source_file;
pub mod stmt;
pub mod walk;

pub use builder::AstBuilder;
pub use expr::{
    ArrowBody, ArrowFunction, Class, ClassMember, Expr, Function, Lit, MemberProp, MethodKind,
    Param, Prop, PropName, Template,
};
pub use node::{Ident, NodeId, Span};
pub use ops::{AssignOp, BinaryOp, UnaryOp, UpdateOp};
pub use pattern::{ArrayPattern, ArrayPatternElement, ObjectPattern, ObjectPatternProp, Pattern};
pub use source_file::SourceFile;
pub use stmt::{
    AmbientDecl, CatchClause, ClassDecl, ExportAssignment, ExportClause, ExportDecl,
    ExportSpecifier, ForHead, ForInit, FunctionDecl, ImportClause, ImportDecl, ImportEqualsDecl,
    ImportSpecifier, Modifiers, ModuleReference, NamedImportBindings, Stmt, SwitchCase,
    VarDeclList, VarDeclarator, VarKind, VarStatement,
};

//! Scope binder and name resolver for modlower.
//!
//! [`BinderState`] binds one [`SourceFile`](modlower_ast::SourceFile): it
//! builds the lexical scope tree, declares a symbol for every binding and
//! resolves every identifier reference to its nearest visible declaration.
//! The lowering pass only talks to the result through the [`Resolver`]
//! trait.

use modlower_ast::{ExportAssignment, ExportSpecifier, Ident, ImportEqualsDecl, NodeId};

mod resolver;
pub mod state;
mod state_binding;
mod state_import_export;
pub mod symbols;

pub use state::{BinderState, BindingStats};
pub use symbols::{Scope, ScopeId, ScopeKind, Symbol, SymbolFlags, SymbolId};

/// How an imported binding maps onto the exporting module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportBindingKind {
    /// `import d from "m"`
    Default,
    /// `import * as ns from "m"`
    Namespace,
    /// `import { imported as local } from "m"`
    Named { imported: String },
    /// `import x = require("m")`
    ImportEquals,
}

/// The import declaration an identifier is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportBinding {
    /// Id of the `ImportDecl` or `ImportEqualsDecl`.
    pub declaration: NodeId,
    pub kind: ImportBindingKind,
}

/// A declaration that may or may not denote a runtime value.
#[derive(Clone, Copy, Debug)]
pub enum AliasDeclaration<'a> {
    ExportSpecifier(&'a ExportSpecifier),
    ExportAssignment(&'a ExportAssignment),
    ImportEquals(&'a ImportEqualsDecl),
}

/// Name-resolution queries used by the lowering pass.
pub trait Resolver {
    /// The import an identifier reads, if it is bound to one.
    fn referenced_import_declaration(&self, ident: &Ident) -> Option<ImportBinding>;

    /// The container exporting the identifier's binding.
    ///
    /// Returns the source file's id when the binding is exported by the file.
    fn referenced_export_container(&self, ident: &Ident) -> Option<NodeId>;

    /// Whether the declaration denotes a runtime value rather than an erased
    /// type-only construct.
    fn is_value_alias_declaration(&self, declaration: AliasDeclaration<'_>) -> bool;

    /// Id of the binding identifier that declares the value an identifier
    /// refers to.
    fn referenced_value_declaration(&self, ident: &Ident) -> Option<NodeId>;
}

//! [`Resolver`] queries answered from a bound file.

use modlower_ast::{Expr, Ident, ModuleReference, NodeId};

use crate::state::BinderState;
use crate::symbols::SymbolFlags;
use crate::{AliasDeclaration, ImportBinding, Resolver};

/// Leftmost identifier of an entity name such as `a.b.c`.
fn entity_root(expr: &Expr) -> Option<&Ident> {
    match expr.skip_parens() {
        Expr::Ident(ident) => Some(ident),
        Expr::Member { object, .. } => entity_root(object),
        _ => None,
    }
}

impl BinderState {
    /// Value-ness of whatever `ident` names; unresolved names are globals
    /// and count as values.
    fn names_value_or_global(&self, ident: &Ident) -> bool {
        self.symbol_of(ident).is_none_or(|sym| sym.is_value())
    }
}

impl Resolver for BinderState {
    fn referenced_import_declaration(&self, ident: &Ident) -> Option<ImportBinding> {
        let sym = self.symbol_of(ident)?;
        if sym.flags.contains(SymbolFlags::TYPE_ONLY) {
            return None;
        }
        sym.import.clone()
    }

    fn referenced_export_container(&self, ident: &Ident) -> Option<NodeId> {
        let sym = self.symbol_of(ident)?;
        if sym.is_exported() && sym.is_value() {
            self.file_id
        } else {
            None
        }
    }

    fn is_value_alias_declaration(&self, declaration: AliasDeclaration<'_>) -> bool {
        match declaration {
            AliasDeclaration::ExportSpecifier(specifier) => {
                !specifier.is_type_only
                    && self
                        .export_specifier_symbols
                        .get(&specifier.id)
                        .and_then(|&id| self.symbol(id))
                        .is_some_and(|sym| sym.is_value())
            }
            AliasDeclaration::ExportAssignment(assignment) => {
                match assignment.expression.skip_parens() {
                    Expr::Ident(ident) => self.names_value_or_global(ident),
                    _ => true,
                }
            }
            AliasDeclaration::ImportEquals(decl) => match &decl.reference {
                ModuleReference::External(_) => true,
                ModuleReference::Entity(entity) => {
                    entity_root(entity).is_none_or(|root| self.names_value_or_global(root))
                }
            },
        }
    }

    fn referenced_value_declaration(&self, ident: &Ident) -> Option<NodeId> {
        self.symbol_of(ident)
            .filter(|sym| sym.is_value())
            .map(|sym| sym.declaration)
    }
}

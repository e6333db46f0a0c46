//! Module info collection.
//!
//! One forward scan over a file's top-level statements that records every
//! import/export construct the System transform has to service. Nothing is
//! rewritten here.

use modlower_ast::walk::collect_binding_names;
use modlower_ast::{
    ExportAssignment, ExportClause, ExportDecl, ExportSpecifier, Expr, ImportClause, ImportDecl,
    ImportEqualsDecl, ModuleReference, NamedImportBindings, NodeId, SourceFile, Span, Stmt,
};
use modlower_binder::{AliasDeclaration, Resolver};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

/// A statement that depends on another module.
#[derive(Clone, Copy, Debug)]
pub enum ExternalImportEntry<'a> {
    /// `import ... from "m"` or `import "m"`
    Import(&'a ImportDecl),
    /// `import x = require("m")`
    ImportEquals {
        decl: &'a ImportEqualsDecl,
        specifier: &'a Expr,
    },
    /// `export ... from "m"`
    ExportFrom {
        decl: &'a ExportDecl,
        specifier: &'a Expr,
    },
}

impl<'a> ExternalImportEntry<'a> {
    #[must_use]
    pub const fn specifier(self) -> &'a Expr {
        match self {
            Self::Import(decl) => &decl.specifier,
            Self::ImportEquals { specifier, .. } | Self::ExportFrom { specifier, .. } => specifier,
        }
    }

    #[must_use]
    pub const fn id(self) -> NodeId {
        match self {
            Self::Import(decl) => decl.id,
            Self::ImportEquals { decl, .. } => decl.id,
            Self::ExportFrom { decl, .. } => decl.id,
        }
    }

    #[must_use]
    pub const fn span(self) -> Span {
        match self {
            Self::Import(decl) => decl.span,
            Self::ImportEquals { decl, .. } => decl.span,
            Self::ExportFrom { decl, .. } => decl.span,
        }
    }
}

/// Import/export facts about one file.
#[derive(Debug, Default)]
pub struct ModuleInfo<'a> {
    /// External imports and re-exports, in source order.
    pub external_imports: Vec<ExternalImportEntry<'a>>,
    /// Specifiers of local `export { ... }` statements, keyed by local name.
    pub export_specifiers: FxHashMap<String, Vec<&'a ExportSpecifier>>,
    /// `export = expr`
    pub export_equals: Option<&'a ExportAssignment>,
    /// The file has a bare `export * from "m"`.
    pub has_export_star: bool,
    /// Names each exported declaration is published under, keyed by the
    /// declaring identifier.
    pub exported_bindings: FxHashMap<NodeId, SmallVec<[String; 1]>>,
    /// Declaring identifiers of top-level function declarations.
    pub hoisted_functions: FxHashSet<NodeId>,
}

impl<'a> ModuleInfo<'a> {
    pub fn collect<R: Resolver + ?Sized>(file: &'a SourceFile, resolver: &R) -> Self {
        let mut info = Self::default();
        for stmt in &file.statements {
            info.collect_statement(stmt, resolver);
        }
        debug!(
            file = %file.file_name,
            external_imports = info.external_imports.len(),
            export_specifiers = info.export_specifiers.len(),
            has_export_star = info.has_export_star,
            "collected module info"
        );
        info
    }

    /// Names `declaration` is exported under.
    #[must_use]
    pub fn exported_names_of(&self, declaration: NodeId) -> &[String] {
        self.exported_bindings
            .get(&declaration)
            .map_or(&[][..], |names| names.as_slice())
    }

    fn add_exported_binding(&mut self, declaration: NodeId, name: &str) {
        let names = self.exported_bindings.entry(declaration).or_default();
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    fn collect_statement<R: Resolver + ?Sized>(&mut self, stmt: &'a Stmt, resolver: &R) {
        match stmt {
            Stmt::Import(decl) => {
                if !decl.is_type_only && !is_type_only_clause(decl.clause.as_ref()) {
                    self.external_imports.push(ExternalImportEntry::Import(decl));
                }
            }
            Stmt::ImportEquals(decl) => match &decl.reference {
                ModuleReference::External(specifier) => {
                    self.external_imports
                        .push(ExternalImportEntry::ImportEquals { decl, specifier });
                    if decl.is_export {
                        self.add_exported_binding(decl.name.id, &decl.name.name);
                    }
                }
                ModuleReference::Entity(_) => {
                    if decl.is_export
                        && resolver.is_value_alias_declaration(AliasDeclaration::ImportEquals(decl))
                    {
                        self.add_exported_binding(decl.name.id, &decl.name.name);
                    }
                }
            },
            Stmt::Export(decl) => self.collect_export(decl, resolver),
            Stmt::ExportAssignment(assignment) => {
                if assignment.is_export_equals {
                    self.export_equals = Some(assignment);
                }
            }
            Stmt::Var(var) if var.modifiers.is_export => {
                for decl in &var.list.declarations {
                    for ident in collect_binding_names(&decl.name) {
                        self.add_exported_binding(ident.id, &ident.name);
                    }
                }
            }
            Stmt::Function(decl) => {
                let Some(name) = &decl.function.name else {
                    return;
                };
                self.hoisted_functions.insert(name.id);
                if decl.modifiers.is_export {
                    let exported = if decl.modifiers.is_default {
                        "default"
                    } else {
                        &name.name
                    };
                    self.add_exported_binding(name.id, exported);
                }
            }
            Stmt::Class(decl) if decl.modifiers.is_export => {
                if let Some(name) = &decl.class.name {
                    let exported = if decl.modifiers.is_default {
                        "default"
                    } else {
                        &name.name
                    };
                    self.add_exported_binding(name.id, exported);
                }
            }
            _ => {}
        }
    }

    fn collect_export<R: Resolver + ?Sized>(&mut self, decl: &'a ExportDecl, resolver: &R) {
        if decl.is_type_only {
            return;
        }
        if let Some(specifier) = &decl.specifier {
            match &decl.clause {
                None => self.has_export_star = true,
                Some(ExportClause::Named(specifiers))
                    if !specifiers.is_empty()
                        && specifiers.iter().all(|specifier| specifier.is_type_only) =>
                {
                    return;
                }
                Some(_) => {}
            }
            self.external_imports
                .push(ExternalImportEntry::ExportFrom { decl, specifier });
            return;
        }

        let Some(ExportClause::Named(specifiers)) = &decl.clause else {
            return;
        };
        for specifier in specifiers {
            if !resolver.is_value_alias_declaration(AliasDeclaration::ExportSpecifier(specifier)) {
                continue;
            }
            self.export_specifiers
                .entry(specifier.local.name.clone())
                .or_default()
                .push(specifier);
            if let Some(declaration) = resolver.referenced_value_declaration(&specifier.local) {
                self.add_exported_binding(declaration, specifier.exported_name());
            }
        }
    }
}

/// An import clause whose every binding is a type-only specifier.
fn is_type_only_clause(clause: Option<&ImportClause>) -> bool {
    match clause {
        Some(ImportClause {
            default: None,
            bindings: Some(NamedImportBindings::Named(specifiers)),
        }) => !specifiers.is_empty() && specifiers.iter().all(|specifier| specifier.is_type_only),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/module_info.rs"]
mod tests;

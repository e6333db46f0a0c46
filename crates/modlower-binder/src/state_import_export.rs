//! Import and export declaration binding.

use modlower_ast::{
    ExportClause, ExportDecl, Ident, ImportDecl, ImportEqualsDecl, ModuleReference,
    NamedImportBindings, Stmt,
};
use tracing::trace;

use crate::state::BinderState;
use crate::symbols::SymbolFlags;
use crate::{ImportBinding, ImportBindingKind};

impl BinderState {
    fn declare_import_binding(
        &mut self,
        ident: &Ident,
        type_only: bool,
        binding: ImportBinding,
    ) {
        let mut flags = SymbolFlags::ALIAS;
        if type_only {
            flags |= SymbolFlags::TYPE_ONLY;
        }
        if let Some(sym_id) = self.declare_symbol(ident, flags, false)
            && let Some(sym) = self.symbol_mut(sym_id)
        {
            sym.import = Some(binding);
        }
    }

    pub(crate) fn declare_import(&mut self, import: &ImportDecl) {
        let Some(clause) = &import.clause else {
            return;
        };
        let declaration = import.id;

        if let Some(default) = &clause.default {
            self.declare_import_binding(
                default,
                import.is_type_only,
                ImportBinding {
                    declaration,
                    kind: ImportBindingKind::Default,
                },
            );
        }

        match &clause.bindings {
            Some(NamedImportBindings::Namespace(name)) => {
                self.declare_import_binding(
                    name,
                    import.is_type_only,
                    ImportBinding {
                        declaration,
                        kind: ImportBindingKind::Namespace,
                    },
                );
            }
            Some(NamedImportBindings::Named(specifiers)) => {
                for specifier in specifiers {
                    self.declare_import_binding(
                        &specifier.local,
                        import.is_type_only || specifier.is_type_only,
                        ImportBinding {
                            declaration,
                            kind: ImportBindingKind::Named {
                                imported: specifier.imported_name().to_string(),
                            },
                        },
                    );
                }
            }
            None => {}
        }
    }

    /// `import x = require("m")` is an import binding; `import x = a.b` is a
    /// plain alias whose value is read once.
    pub(crate) fn declare_import_equals(&mut self, decl: &ImportEqualsDecl) {
        let mut flags = SymbolFlags::ALIAS;
        if decl.is_export {
            flags |= SymbolFlags::EXPORTED;
        }
        let Some(sym_id) = self.declare_symbol(&decl.name, flags, false) else {
            return;
        };
        if matches!(decl.reference, ModuleReference::External(_))
            && let Some(sym) = self.symbol_mut(sym_id)
        {
            sym.import = Some(ImportBinding {
                declaration: decl.id,
                kind: ImportBindingKind::ImportEquals,
            });
        }
    }

    pub(crate) fn bind_import_equals_reference(&mut self, decl: &ImportEqualsDecl) {
        if let ModuleReference::Entity(entity) = &decl.reference {
            self.bind_expr(entity);
        }
    }

    /// Resolve the local names of `export { a, b as c }`. Re-exports from
    /// another module name that module's bindings and are left alone.
    pub(crate) fn bind_export_declaration(&mut self, export: &ExportDecl) {
        if export.specifier.is_some() {
            return;
        }
        let Some(ExportClause::Named(specifiers)) = &export.clause else {
            return;
        };
        for specifier in specifiers {
            self.resolve_reference(&specifier.local);
            if let Some(&sym_id) = self.node_symbols.get(&specifier.local.id) {
                self.export_specifier_symbols.insert(specifier.id, sym_id);
            }
        }
    }

    /// Flag the symbols named by local export clauses as exported.
    pub(crate) fn mark_local_exports(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            let Stmt::Export(export) = stmt else {
                continue;
            };
            if export.specifier.is_some() || export.is_type_only {
                continue;
            }
            let Some(ExportClause::Named(specifiers)) = &export.clause else {
                continue;
            };
            for specifier in specifiers.iter().filter(|s| !s.is_type_only) {
                let Some(&sym_id) = self.export_specifier_symbols.get(&specifier.id) else {
                    continue;
                };
                if let Some(sym) = self.symbol_mut(sym_id)
                    && sym.is_value()
                {
                    trace!(name = %sym.name, "marked exported by export clause");
                    sym.flags |= SymbolFlags::EXPORTED;
                }
            }
        }
    }
}

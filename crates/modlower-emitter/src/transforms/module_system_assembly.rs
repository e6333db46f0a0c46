//! Module aliases, setters, the star-export helper and the final
//! registration call.

use indexmap::IndexSet;
use modlower_ast::{
    BinaryOp, ExportClause, Expr, ForHead, Ident, ImportClause, NamedImportBindings, Param,
    Pattern, Prop, Stmt, VarDeclList, VarDeclarator, VarKind,
};
use modlower_binder::{ImportBindingKind, Resolver};
use tracing::{debug, trace};

use super::FileTransform;
use crate::error::TransformError;
use crate::transforms::dependency_groups::DependencyGroup;
use crate::transforms::helpers::rest_helper;
use crate::transforms::module_info::ExternalImportEntry;

/// Identifier-safe base name for a module alias: `"./lib/util-x"` gives
/// `util_x`.
pub(crate) fn module_alias_base(specifier: &str) -> String {
    let trimmed = specifier.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    let mut name = String::with_capacity(base.len() + 1);
    if base.starts_with(|c: char| c.is_ascii_digit()) {
        name.push('_');
    }
    name.extend(
        base.chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }),
    );
    name
}

impl<R: Resolver + ?Sized> FileTransform<'_, R> {
    // =========================================================================
    // Aliases
    // =========================================================================

    /// Pick the local variable each external import is stored in.
    ///
    /// A namespace-only import keeps its own name, and so does
    /// `import x = require()` and `export * as ns`. Other imports get a name
    /// derived from the specifier.
    pub(crate) fn assign_module_aliases(&mut self) {
        let entries = self.info.external_imports.clone();
        for entry in entries {
            let alias = match entry {
                ExternalImportEntry::Import(decl) => match &decl.clause {
                    None => continue,
                    Some(ImportClause {
                        default: None,
                        bindings: Some(NamedImportBindings::Namespace(name)),
                    }) => name.name.clone(),
                    Some(_) => self.derived_alias(entry),
                },
                ExternalImportEntry::ImportEquals { decl, .. } => decl.name.name.clone(),
                ExternalImportEntry::ExportFrom { decl, .. } => match &decl.clause {
                    Some(ExportClause::Namespace(name)) => name.name.clone(),
                    _ => continue,
                },
            };
            trace!(alias = %alias, "module alias");
            self.aliases.insert(entry.id(), alias);
        }
    }

    fn derived_alias(&mut self, entry: ExternalImportEntry<'_>) -> String {
        let base = entry
            .specifier()
            .as_string_literal()
            .map(module_alias_base)
            .unwrap_or_else(|| "module".to_string());
        self.ctx.unique_name(&base)
    }

    /// Setter parameter name, derived from the first entry of the group
    /// that has a local name. Side-effect imports have none.
    fn setter_parameter(&mut self, group: &DependencyGroup<'_>) -> String {
        let mut local = None;
        for &entry in &group.entries {
            if let Some(alias) = self.aliases.get(&entry.id()) {
                local = Some(alias.clone());
                break;
            }
            if matches!(entry, ExternalImportEntry::ExportFrom { .. }) {
                local = Some(self.derived_alias(entry));
                break;
            }
        }
        self.ctx.unique_name(local.as_deref().unwrap_or(""))
    }

    // =========================================================================
    // Setters
    // =========================================================================

    fn create_setter(
        &mut self,
        group: &DependencyGroup<'_>,
        export_star: Option<&str>,
    ) -> Expr {
        let parameter = self.setter_parameter(group);
        let mut body = Vec::new();

        for &entry in &group.entries {
            match entry {
                ExternalImportEntry::Import(decl) => {
                    let Some(clause) = &decl.clause else {
                        continue;
                    };
                    if let Some(alias) = self.aliases.get(&decl.id) {
                        body.push(Stmt::expr_stmt(Expr::assign_name(
                            alias.as_str(),
                            Expr::id(parameter.as_str()),
                        )));
                    }
                    let mut locals: Vec<&Ident> = clause.default.iter().collect();
                    match &clause.bindings {
                        Some(NamedImportBindings::Namespace(name)) => locals.push(name),
                        Some(NamedImportBindings::Named(specifiers)) => {
                            locals.extend(specifiers.iter().map(|specifier| &specifier.local));
                        }
                        None => {}
                    }
                    self.push_reexported_imports(entry, &locals, &parameter, &mut body);
                }
                ExternalImportEntry::ImportEquals { decl, .. } => {
                    body.push(Stmt::expr_stmt(Expr::assign_name(
                        decl.name.name.as_str(),
                        Expr::id(parameter.as_str()),
                    )));
                    if decl.is_export {
                        body.push(Stmt::expr_stmt(
                            self.export_call(&decl.name.name, Expr::id(parameter.as_str())),
                        ));
                    }
                    self.push_reexported_imports(entry, &[&decl.name], &parameter, &mut body);
                }
                ExternalImportEntry::ExportFrom { decl, .. } => match &decl.clause {
                    Some(ExportClause::Named(specifiers)) => {
                        let props: Vec<Prop> = specifiers
                            .iter()
                            .filter(|specifier| !specifier.is_type_only)
                            .map(|specifier| {
                                Prop::init_string(
                                    specifier.exported_name(),
                                    Expr::elem(
                                        Expr::id(parameter.as_str()),
                                        Expr::string(specifier.local.name.as_str()),
                                    ),
                                )
                            })
                            .collect();
                        if !props.is_empty() {
                            body.push(Stmt::expr_stmt(Expr::call(
                                Expr::id(self.state.exporter.as_str()),
                                vec![Expr::object(props)],
                            )));
                        }
                    }
                    Some(ExportClause::Namespace(name)) => {
                        body.push(Stmt::expr_stmt(
                            self.export_call(&name.name, Expr::id(parameter.as_str())),
                        ));
                    }
                    None => {
                        if let Some(helper) = export_star {
                            body.push(Stmt::expr_stmt(Expr::call(
                                Expr::id(helper),
                                vec![Expr::id(parameter.as_str())],
                            )));
                        }
                    }
                },
            }
        }

        Expr::func_expr(None, vec![Param::ident(parameter)], body)
    }

    /// Publish, from the setter, the imported bindings a local
    /// `export { ... }` re-exports; they stay live as the dependency
    /// updates them.
    fn push_reexported_imports(
        &self,
        entry: ExternalImportEntry<'_>,
        locals: &[&Ident],
        parameter: &str,
        body: &mut Vec<Stmt>,
    ) {
        let mut props = Vec::new();
        for local in locals {
            let Some(binding) = self.resolver.referenced_import_declaration(local) else {
                continue;
            };
            if binding.declaration != entry.id() {
                continue;
            }
            let Some(specifiers) = self.info.export_specifiers.get(&local.name) else {
                continue;
            };
            for specifier in specifiers {
                let reexports_this_import = self
                    .resolver
                    .referenced_import_declaration(&specifier.local)
                    .is_some_and(|other| other == binding);
                if !reexports_this_import {
                    continue;
                }
                let namespace = Expr::id(parameter);
                let value = match &binding.kind {
                    ImportBindingKind::Default => Expr::elem(namespace, Expr::string("default")),
                    ImportBindingKind::Named { imported } => {
                        Expr::elem(namespace, Expr::string(imported.as_str()))
                    }
                    ImportBindingKind::Namespace | ImportBindingKind::ImportEquals => namespace,
                };
                props.push(Prop::init_string(specifier.exported_name(), value));
            }
        }
        if !props.is_empty() {
            body.push(Stmt::expr_stmt(Expr::call(
                Expr::id(self.state.exporter.as_str()),
                vec![Expr::object(props)],
            )));
        }
    }

    // =========================================================================
    // Star exports
    // =========================================================================

    /// Append the `export *` helper to the factory body and return its name.
    ///
    /// Names exported locally or re-exported by name take precedence over
    /// names brought in by a star export, and `default` is never
    /// star-exported. When the module has no such names the helper skips the
    /// precedence map.
    fn create_export_star_helper(
        &mut self,
        groups: &[DependencyGroup<'_>],
        body: &mut Vec<Stmt>,
    ) -> Option<String> {
        if !self.info.has_export_star {
            return None;
        }

        let explicit_reexports: Vec<String> = groups
            .iter()
            .flat_map(|group| group.entries.iter())
            .filter_map(|entry| match entry {
                ExternalImportEntry::ExportFrom { decl, .. } => decl.clause.as_ref(),
                _ => None,
            })
            .flat_map(|clause| match clause {
                ExportClause::Named(specifiers) => specifiers
                    .iter()
                    .filter(|specifier| !specifier.is_type_only)
                    .map(|specifier| specifier.exported_name().to_string())
                    .collect::<Vec<_>>(),
                ExportClause::Namespace(name) => vec![name.name.clone()],
            })
            .collect();
        let has_explicit_clause = groups
            .iter()
            .flat_map(|group| group.entries.iter())
            .any(|entry| {
                matches!(entry, ExternalImportEntry::ExportFrom { decl, .. } if decl.clause.is_some())
            });

        let minimal = self.state.exported_names.is_empty()
            && self.info.export_specifiers.is_empty()
            && !has_explicit_clause;

        let exported_names_map = if minimal {
            None
        } else {
            let map_name = self.ctx.unique_name("exportedNames");
            let mut props = Vec::new();
            let mut seen = IndexSet::new();
            for name in self
                .state
                .exported_names
                .iter()
                .chain(explicit_reexports.iter())
            {
                if name != "default" && seen.insert(name.clone()) {
                    props.push(Prop::init_string(name.as_str(), Expr::boolean(true)));
                }
            }
            body.push(Stmt::var_decl(map_name.as_str(), Some(Expr::object(props))));
            Some(map_name)
        };
        debug!(
            minimal,
            local_names = self.state.exported_names.len(),
            explicit_reexports = explicit_reexports.len(),
            "export star helper"
        );

        let helper_name = self.ctx.unique_name("exportStar");
        body.push(self.export_star_function(&helper_name, exported_names_map.as_deref()));
        Some(helper_name)
    }

    /// ```javascript
    /// function exportStar_1(m) {
    ///     var exports = {};
    ///     for (var n in m) {
    ///         if (n !== "default" && Object.prototype.hasOwnProperty.call(m, n) && !exportedNames_1.hasOwnProperty(n)) exports[n] = m[n];
    ///     }
    ///     exports_1(exports);
    /// }
    /// ```
    ///
    /// Only own keys of `m` are copied; the check goes through
    /// `Object.prototype` so namespace objects without a prototype work.
    fn export_star_function(&self, name: &str, exported_names_map: Option<&str>) -> Stmt {
        let not_default = Expr::binary(Expr::id("n"), BinaryOp::NotEqEq, Expr::string("default"));
        let own_key = Expr::call(
            Expr::dotted("Object.prototype.hasOwnProperty.call"),
            vec![Expr::id("m"), Expr::id("n")],
        );
        let own_non_default = Expr::binary(not_default, BinaryOp::And, own_key);
        let condition = match exported_names_map {
            Some(map) => Expr::binary(
                own_non_default,
                BinaryOp::And,
                Expr::not(Expr::call(
                    Expr::prop(Expr::id(map), "hasOwnProperty"),
                    vec![Expr::id("n")],
                )),
            ),
            None => own_non_default,
        };
        let copy = Stmt::expr_stmt(Expr::assign(
            Pattern::Expr(Box::new(Expr::elem(Expr::id("exports"), Expr::id("n")))),
            Expr::elem(Expr::id("m"), Expr::id("n")),
        ));
        let loop_over_keys = Stmt::ForIn {
            left: ForHead::Var(VarDeclList {
                kind: VarKind::Var,
                declarations: vec![VarDeclarator {
                    name: Pattern::Ident(Ident::synthetic("n")),
                    init: None,
                }],
            }),
            right: Expr::id("m"),
            body: Box::new(Stmt::block(vec![Stmt::If {
                test: condition,
                consequent: Box::new(copy),
                alternate: None,
            }])),
        };
        Stmt::func_decl(
            name,
            vec![Param::ident("m")],
            vec![
                Stmt::var_decl("exports", Some(Expr::object(vec![]))),
                loop_over_keys,
                Stmt::expr_stmt(Expr::call(
                    Expr::id(self.state.exporter.as_str()),
                    vec![Expr::id("exports")],
                )),
            ],
        )
    }

    // =========================================================================
    // Registration call
    // =========================================================================

    /// Build `register(name?, [deps], function (exports_1, context_1) { ... })`
    /// from the rewritten `execute` body.
    pub(crate) fn assemble(
        &mut self,
        groups: &[DependencyGroup<'_>],
        execute_body: Vec<Stmt>,
    ) -> Result<Stmt, TransformError> {
        let (hoisted_vars, hoisted_functions) = self.ctx.end_lexical_environment_split();
        let mut body = Vec::new();
        if self.options.emit_use_strict {
            body.push(Stmt::expr_stmt(Expr::string("use strict")));
        }
        body.extend(hoisted_vars);
        if self.options.emit_module_name_binding {
            let context = Expr::id(self.state.context.as_str());
            body.push(Stmt::var_decl(
                "__moduleName",
                Some(Expr::binary(
                    context.clone(),
                    BinaryOp::And,
                    Expr::prop(context, "id"),
                )),
            ));
        }
        body.extend(hoisted_functions);
        body.append(&mut self.state.pending_function_exports);
        if self.needs_rest_helper {
            body.push(rest_helper());
        }

        let export_star = self.create_export_star_helper(groups, &mut body);
        let setters: Vec<Expr> = groups
            .iter()
            .map(|group| self.create_setter(group, export_star.as_deref()))
            .collect();
        body.push(Stmt::ret(Some(Expr::object(vec![
            Prop::init("setters", Expr::array(setters)),
            Prop::init("execute", Expr::func_expr(None, vec![], execute_body)),
        ]))));

        let factory = Expr::func_expr(
            None,
            vec![
                Param::ident(self.state.exporter.as_str()),
                Param::ident(self.state.context.as_str()),
            ],
            body,
        );
        let mut args = Vec::with_capacity(3);
        if let Some(module_name) = &self.file.module_name {
            args.push(Expr::string(module_name.as_str()));
        }
        args.push(Expr::array(
            groups
                .iter()
                .map(|group| Expr::string(group.name.as_str()))
                .collect(),
        ));
        args.push(factory);

        debug!(
            setters = groups.len(),
            exported_names = self.state.exported_names.len(),
            "assembled registration call"
        );
        Ok(Stmt::expr_stmt(Expr::call(
            Expr::dotted(&self.options.register_function),
            args,
        )))
    }
}

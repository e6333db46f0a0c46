//! Programmatic tree construction with fresh node ids.
//!
//! There is no parser in this workspace, so hosts and tests build input trees
//! through [`AstBuilder`]. Every identifier and declaration it creates gets
//! the next id from a shared counter; the counter sits in a `Cell` so builder
//! calls can be nested freely.

use std::cell::Cell;

use crate::expr::{Class, ClassMember, Expr, Function, Param};
use crate::node::{Ident, NodeId, Span};
use crate::ops::{AssignOp, UpdateOp};
use crate::pattern::Pattern;
use crate::source_file::SourceFile;
use crate::stmt::{
    AmbientDecl, ClassDecl, ExportAssignment, ExportClause, ExportDecl, ExportSpecifier,
    FunctionDecl, ImportClause, ImportDecl, ImportEqualsDecl, ImportSpecifier, Modifiers,
    ModuleReference, NamedImportBindings, Stmt, VarDeclList, VarDeclarator, VarKind,
    VarStatement,
};

#[derive(Debug)]
pub struct AstBuilder {
    next_id: Cell<u32>,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: Cell::new(0),
        }
    }

    pub fn next_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    pub fn source_file(&self, file_name: &str, statements: Vec<Stmt>) -> SourceFile {
        SourceFile::new(self.next_id(), file_name, statements)
    }

    // =========================================================================
    // Identifiers and patterns
    // =========================================================================

    pub fn ident(&self, name: &str) -> Ident {
        Ident::new(self.next_id(), name)
    }

    /// Identifier reference expression.
    pub fn id(&self, name: &str) -> Expr {
        Expr::Ident(self.ident(name))
    }

    pub fn binding(&self, name: &str) -> Pattern {
        Pattern::Ident(self.ident(name))
    }

    pub fn param(&self, name: &str) -> Param {
        Param::new(self.binding(name))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `name = value`
    pub fn assign(&self, name: &str, value: Expr) -> Expr {
        self.assign_op(name, AssignOp::Assign, value)
    }

    pub fn assign_op(&self, name: &str, op: AssignOp, value: Expr) -> Expr {
        Expr::Assign {
            op,
            target: Box::new(self.binding(name)),
            value: Box::new(value),
        }
    }

    /// `pattern = value` for destructuring assignments.
    pub fn assign_pattern(&self, target: Pattern, value: Expr) -> Expr {
        Expr::assign(target, value)
    }

    pub fn update(&self, name: &str, op: UpdateOp, prefix: bool) -> Expr {
        Expr::Update {
            op,
            prefix,
            arg: Box::new(self.id(name)),
        }
    }

    pub fn function(&self, name: Option<&str>, params: Vec<Param>, body: Vec<Stmt>) -> Function {
        Function {
            name: name.map(|name| self.ident(name)),
            params,
            body,
            is_async: false,
            is_generator: false,
        }
    }

    pub fn class(
        &self,
        name: Option<&str>,
        super_class: Option<Expr>,
        members: Vec<ClassMember>,
    ) -> Class {
        Class {
            name: name.map(|name| self.ident(name)),
            super_class: super_class.map(Box::new),
            members,
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub fn var(
        &self,
        kind: VarKind,
        modifiers: Modifiers,
        decls: Vec<(Pattern, Option<Expr>)>,
    ) -> Stmt {
        Stmt::Var(VarStatement {
            modifiers,
            list: self.var_list(kind, decls),
        })
    }

    pub fn var_list(&self, kind: VarKind, decls: Vec<(Pattern, Option<Expr>)>) -> VarDeclList {
        VarDeclList {
            kind,
            declarations: decls
                .into_iter()
                .map(|(name, init)| VarDeclarator { name, init })
                .collect(),
        }
    }

    /// Single-declarator `kind name = init;`
    pub fn var_stmt(&self, kind: VarKind, name: &str, init: Option<Expr>) -> Stmt {
        self.var(kind, Modifiers::NONE, vec![(self.binding(name), init)])
    }

    /// Single-declarator `export kind name = init;`
    pub fn export_var(&self, kind: VarKind, name: &str, init: Option<Expr>) -> Stmt {
        self.var(kind, Modifiers::EXPORT, vec![(self.binding(name), init)])
    }

    pub fn func_decl(
        &self,
        modifiers: Modifiers,
        name: Option<&str>,
        params: Vec<Param>,
        body: Vec<Stmt>,
    ) -> Stmt {
        Stmt::Function(FunctionDecl {
            modifiers,
            function: self.function(name, params, body),
        })
    }

    pub fn class_decl(
        &self,
        modifiers: Modifiers,
        name: Option<&str>,
        members: Vec<ClassMember>,
    ) -> Stmt {
        Stmt::Class(ClassDecl {
            modifiers,
            class: self.class(name, None, members),
        })
    }

    /// An interface, type alias or `declare` binding.
    pub fn ambient(&self, name: &str, is_export: bool) -> Stmt {
        Stmt::Ambient(AmbientDecl {
            name: self.ident(name),
            is_export,
        })
    }

    // =========================================================================
    // Imports
    // =========================================================================

    fn import(&self, clause: Option<ImportClause>, specifier: &str, is_type_only: bool) -> Stmt {
        Stmt::Import(ImportDecl {
            id: self.next_id(),
            span: Span::default(),
            clause,
            specifier: Expr::string(specifier),
            is_type_only,
        })
    }

    /// `import "m";`
    pub fn import_side_effect(&self, specifier: &str) -> Stmt {
        self.import(None, specifier, false)
    }

    /// `import d from "m";`
    pub fn import_default(&self, local: &str, specifier: &str) -> Stmt {
        self.import(
            Some(ImportClause {
                default: Some(self.ident(local)),
                bindings: None,
            }),
            specifier,
            false,
        )
    }

    /// `import * as ns from "m";`
    pub fn import_namespace(&self, local: &str, specifier: &str) -> Stmt {
        self.import(
            Some(ImportClause {
                default: None,
                bindings: Some(NamedImportBindings::Namespace(self.ident(local))),
            }),
            specifier,
            false,
        )
    }

    /// `import { a, b as c } from "m";` from `(imported, local)` pairs.
    pub fn import_named(&self, names: &[(&str, &str)], specifier: &str) -> Stmt {
        self.import_clause(None, names, specifier)
    }

    /// `import d, { a as b } from "m";`
    pub fn import_clause(
        &self,
        default: Option<&str>,
        names: &[(&str, &str)],
        specifier: &str,
    ) -> Stmt {
        self.import(
            Some(ImportClause {
                default: default.map(|name| self.ident(name)),
                bindings: Some(NamedImportBindings::Named(self.import_specifiers(names))),
            }),
            specifier,
            false,
        )
    }

    /// `import type { T } from "m";`
    pub fn import_type(&self, names: &[(&str, &str)], specifier: &str) -> Stmt {
        self.import(
            Some(ImportClause {
                default: None,
                bindings: Some(NamedImportBindings::Named(self.import_specifiers(names))),
            }),
            specifier,
            true,
        )
    }

    fn import_specifiers(&self, names: &[(&str, &str)]) -> Vec<ImportSpecifier> {
        names
            .iter()
            .map(|&(imported, local)| ImportSpecifier {
                imported: (imported != local).then(|| imported.to_string()),
                local: self.ident(local),
                is_type_only: false,
            })
            .collect()
    }

    /// `import name = require("m");`
    pub fn import_require(&self, name: &str, specifier: &str, is_export: bool) -> Stmt {
        Stmt::ImportEquals(ImportEqualsDecl {
            id: self.next_id(),
            span: Span::default(),
            is_export,
            name: self.ident(name),
            reference: ModuleReference::External(Expr::string(specifier)),
        })
    }

    /// `import name = a.b;`
    pub fn import_entity(&self, name: &str, entity: Expr, is_export: bool) -> Stmt {
        Stmt::ImportEquals(ImportEqualsDecl {
            id: self.next_id(),
            span: Span::default(),
            is_export,
            name: self.ident(name),
            reference: ModuleReference::Entity(entity),
        })
    }

    // =========================================================================
    // Exports
    // =========================================================================

    pub fn export_specifier(&self, local: &str, exported: &str) -> ExportSpecifier {
        ExportSpecifier {
            id: self.next_id(),
            local: self.ident(local),
            exported: (exported != local).then(|| exported.to_string()),
            is_type_only: false,
        }
    }

    fn export(&self, clause: Option<ExportClause>, specifier: Option<&str>) -> Stmt {
        Stmt::Export(ExportDecl {
            id: self.next_id(),
            span: Span::default(),
            clause,
            specifier: specifier.map(Expr::string),
            is_type_only: false,
        })
    }

    /// `export { a, b as c };` from `(local, exported)` pairs.
    pub fn export_named(&self, names: &[(&str, &str)]) -> Stmt {
        self.export_specifiers(self.export_specifier_list(names), None)
    }

    /// `export { a, b as c } from "m";`
    pub fn export_from(&self, names: &[(&str, &str)], specifier: &str) -> Stmt {
        self.export_specifiers(self.export_specifier_list(names), Some(specifier))
    }

    /// Export clause built from prepared specifiers, for type-only members.
    pub fn export_specifiers(
        &self,
        specifiers: Vec<ExportSpecifier>,
        specifier: Option<&str>,
    ) -> Stmt {
        self.export(Some(ExportClause::Named(specifiers)), specifier)
    }

    fn export_specifier_list(&self, names: &[(&str, &str)]) -> Vec<ExportSpecifier> {
        names
            .iter()
            .map(|&(local, exported)| self.export_specifier(local, exported))
            .collect()
    }

    /// `export * from "m";`
    pub fn export_star(&self, specifier: &str) -> Stmt {
        self.export(None, Some(specifier))
    }

    /// `export * as ns from "m";`
    pub fn export_star_as(&self, name: &str, specifier: &str) -> Stmt {
        self.export(
            Some(ExportClause::Namespace(self.ident(name))),
            Some(specifier),
        )
    }

    /// `export default expr;`
    pub fn export_default(&self, expression: Expr) -> Stmt {
        self.export_assignment(expression, false)
    }

    /// `export = expr;`
    pub fn export_equals(&self, expression: Expr) -> Stmt {
        self.export_assignment(expression, true)
    }

    fn export_assignment(&self, expression: Expr, is_export_equals: bool) -> Stmt {
        Stmt::ExportAssignment(ExportAssignment {
            id: self.next_id(),
            span: Span::default(),
            is_export_equals,
            expression,
        })
    }
}

//! Statement rewriting for the System module transform.
//!
//! Top-level statements move into `execute` with their declarations hoisted
//! into the factory body. Statements nested in top-level blocks only hoist
//! `var`. Statements inside functions are left in place and only have their
//! expressions substituted.

use modlower_ast::walk::collect_binding_names;
use modlower_ast::{
    ArrowBody, ArrowFunction, CatchClause, Class, ClassDecl, ClassMember, ExportAssignment,
    ExportClause, ExportDecl, Expr, ForHead, ForInit, Function, FunctionDecl, Ident,
    ImportEqualsDecl, Modifiers, ModuleReference, Param, Pattern, PropName, Stmt,
    SwitchCase, VarDeclList, VarDeclarator, VarKind, VarStatement,
};
use modlower_binder::{AliasDeclaration, Resolver};
use modlower_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};

use super::FileTransform;
use crate::error::TransformError;

/// Where a statement sits relative to the module top level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatementContext {
    /// Directly in the file.
    TopLevel,
    /// Inside a block, loop or branch of the top level.
    ModuleBlock,
    /// Inside a function or class body.
    Function,
}

impl StatementContext {
    const fn hoists_var(self) -> bool {
        !matches!(self, Self::Function)
    }

    /// Context of the statements nested in a statement of this context.
    const fn nested(self) -> Self {
        match self {
            Self::TopLevel | Self::ModuleBlock => Self::ModuleBlock,
            Self::Function => Self::Function,
        }
    }
}

impl<R: Resolver + ?Sized> FileTransform<'_, R> {
    pub(crate) fn visit_top_level_statements(
        &mut self,
        stmts: &[Stmt],
    ) -> Result<Vec<Stmt>, TransformError> {
        self.visit_statements(stmts, StatementContext::TopLevel)
    }

    pub(crate) fn visit_statements(
        &mut self,
        stmts: &[Stmt],
        context: StatementContext,
    ) -> Result<Vec<Stmt>, TransformError> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            self.visit_statement(stmt, context, &mut out)?;
        }
        Ok(out)
    }

    fn visit_statement(
        &mut self,
        stmt: &Stmt,
        context: StatementContext,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        self.enter_node()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            if context == StatementContext::TopLevel {
                self.visit_top_level_statement(stmt, out)
            } else {
                self.visit_nested_statement(stmt, context, out)
            }
        });
        self.exit_node();
        result
    }

    /// Rewrite a nested statement slot (a loop or branch body) that must
    /// stay a single statement.
    fn visit_embedded_statement(
        &mut self,
        stmt: &Stmt,
        context: StatementContext,
    ) -> Result<Stmt, TransformError> {
        let mut out = Vec::with_capacity(1);
        self.visit_statement(stmt, context, &mut out)?;
        Ok(Stmt::lift(out))
    }

    // =========================================================================
    // Top level
    // =========================================================================

    fn visit_top_level_statement(
        &mut self,
        stmt: &Stmt,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        match stmt {
            Stmt::Import(decl) => {
                if let Some(alias) = self.aliases.get(&decl.id).cloned() {
                    self.ctx.hoist_variable_declaration(&alias);
                }
                Ok(())
            }
            Stmt::ImportEquals(decl) => self.visit_import_equals(decl, out),
            Stmt::Export(decl) => self.visit_export_declaration(decl, out),
            Stmt::ExportAssignment(assignment) => self.visit_export_assignment(assignment, out),
            Stmt::Var(var) => self.visit_hoisted_variable_statement(var, out),
            Stmt::Function(decl) => self.visit_top_level_function(decl),
            Stmt::Class(decl) => self.visit_top_level_class(decl, out),
            Stmt::Ambient(_) => Ok(()),
            other => self.visit_nested_statement(other, StatementContext::TopLevel, out),
        }
    }

    fn visit_import_equals(
        &mut self,
        decl: &ImportEqualsDecl,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        if !self
            .resolver
            .is_value_alias_declaration(AliasDeclaration::ImportEquals(decl))
        {
            return Ok(());
        }
        self.ctx.hoist_variable_declaration(&decl.name.name);
        if decl.is_export {
            self.state.exported_names.insert(decl.name.name.clone());
        }
        match &decl.reference {
            // The setter assigns (and exports) the module.
            ModuleReference::External(_) => {}
            ModuleReference::Entity(entity) => {
                let value = self.visit_expression(entity, true)?;
                let assignment = self.create_binding_assignment(&decl.name, value);
                out.push(Stmt::expr_stmt(assignment));
            }
        }
        Ok(())
    }

    fn visit_export_declaration(
        &mut self,
        decl: &ExportDecl,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        // Re-exports from other modules are serviced by setters.
        if decl.specifier.is_some() || decl.is_type_only {
            return Ok(());
        }
        let Some(ExportClause::Named(specifiers)) = &decl.clause else {
            return Ok(());
        };
        for specifier in specifiers {
            if !self
                .resolver
                .is_value_alias_declaration(AliasDeclaration::ExportSpecifier(specifier))
            {
                continue;
            }
            let exported = specifier.exported_name();
            self.state.exported_names.insert(exported.to_string());

            if self
                .resolver
                .referenced_import_declaration(&specifier.local)
                .is_some()
            {
                // Exported live from the import's setter.
                continue;
            }
            let is_hoisted_function = self
                .resolver
                .referenced_value_declaration(&specifier.local)
                .is_some_and(|id| self.info.hoisted_functions.contains(&id));
            if is_hoisted_function {
                let call = self.export_call(exported, Expr::id(specifier.local.name.as_str()));
                self.state
                    .pending_function_exports
                    .push(Stmt::expr_stmt(call));
            } else {
                let value = Expr::Ident(specifier.local.clone());
                out.push(Stmt::expr_stmt(self.export_call(exported, value)));
            }
        }
        Ok(())
    }

    fn visit_export_assignment(
        &mut self,
        assignment: &ExportAssignment,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        if !self
            .resolver
            .is_value_alias_declaration(AliasDeclaration::ExportAssignment(assignment))
        {
            return Ok(());
        }
        let value = self.visit_expression(&assignment.expression, true)?;
        out.push(Stmt::expr_stmt(self.export_call("default", value)));
        Ok(())
    }

    /// `var`/`let`/`const` whose names live in the factory body: each
    /// initialized declarator becomes an assignment.
    fn visit_hoisted_variable_statement(
        &mut self,
        var: &VarStatement,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        if var.modifiers.is_export {
            for decl in &var.list.declarations {
                for ident in collect_binding_names(&decl.name) {
                    self.state.exported_names.insert(ident.name.clone());
                }
            }
        }
        if let Some(expr) = self.transform_hoisted_list(&var.list)? {
            out.push(Stmt::expr_stmt(expr));
        }
        Ok(())
    }

    /// Hoist every name of `list` and return its initializers as one
    /// comma expression.
    fn transform_hoisted_list(
        &mut self,
        list: &VarDeclList,
    ) -> Result<Option<Expr>, TransformError> {
        let mut exprs = Vec::new();
        for decl in &list.declarations {
            self.hoist_binding_names(&decl.name);
            let Some(init) = &decl.init else {
                continue;
            };
            let value = self.visit_expression(init, true)?;
            match &decl.name {
                Pattern::Ident(ident) => exprs.push(self.create_binding_assignment(ident, value)),
                pattern => self.flatten_destructuring(pattern, value, &mut exprs)?,
            }
        }
        Ok(Expr::seq(exprs))
    }

    fn hoist_binding_names(&mut self, pattern: &Pattern) {
        for ident in collect_binding_names(pattern) {
            self.ctx.hoist_variable_declaration(&ident.name);
        }
    }

    fn visit_top_level_function(&mut self, decl: &FunctionDecl) -> Result<(), TransformError> {
        let mut function = self.visit_function(&decl.function)?;
        let name = match &function.name {
            Some(name) => name.name.clone(),
            None => {
                let name = self.ctx.unique_name("default");
                function.name = Some(Ident::synthetic(name.as_str()));
                name
            }
        };

        if decl.modifiers.is_export {
            let exported = if decl.modifiers.is_default {
                "default"
            } else {
                self.state.exported_names.insert(name.clone());
                name.as_str()
            };
            let call = self.export_call(exported, Expr::id(name.as_str()));
            self.state
                .pending_function_exports
                .push(Stmt::expr_stmt(call));
        }

        self.ctx.hoist_function_declaration(Stmt::Function(FunctionDecl {
            modifiers: Modifiers::NONE,
            function,
        }));
        Ok(())
    }

    /// `class C {}` becomes `C = class C {}` with `C` hoisted, so hoisted
    /// functions can refer to the class.
    fn visit_top_level_class(
        &mut self,
        decl: &ClassDecl,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        let name = match &decl.class.name {
            Some(name) => name.name.clone(),
            None => self.ctx.unique_name("default"),
        };
        self.ctx.hoist_variable_declaration(&name);

        let class = self.visit_class(&decl.class)?;
        out.push(Stmt::expr_stmt(Expr::assign_name(
            name.as_str(),
            Expr::Class(Box::new(class)),
        )));

        if decl.modifiers.is_export {
            let exported = if decl.modifiers.is_default {
                "default"
            } else {
                self.state.exported_names.insert(name.clone());
                name.as_str()
            };
            out.push(Stmt::expr_stmt(
                self.export_call(exported, Expr::id(name.as_str())),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Nested statements
    // =========================================================================

    fn visit_nested_statement(
        &mut self,
        stmt: &Stmt,
        context: StatementContext,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TransformError> {
        let nested = context.nested();
        let rewritten = match stmt {
            Stmt::Expr(expr) => Stmt::Expr(self.visit_expression(expr, false)?),
            Stmt::Var(var) if var.list.kind == VarKind::Var && context.hoists_var() => {
                return self.visit_hoisted_variable_statement(var, out);
            }
            Stmt::Var(var) => Stmt::Var(VarStatement {
                modifiers: var.modifiers,
                list: self.visit_var_list(&var.list)?,
            }),
            Stmt::Function(decl) => Stmt::Function(FunctionDecl {
                modifiers: decl.modifiers,
                function: self.visit_function(&decl.function)?,
            }),
            Stmt::Class(decl) => Stmt::Class(ClassDecl {
                modifiers: decl.modifiers,
                class: self.visit_class(&decl.class)?,
            }),
            Stmt::Ambient(_) => return Ok(()),
            Stmt::Block(stmts) => Stmt::Block(self.visit_statements(stmts, nested)?),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => Stmt::If {
                test: self.visit_expression(test, true)?,
                consequent: Box::new(self.visit_embedded_statement(consequent, nested)?),
                alternate: match alternate {
                    Some(alternate) => {
                        Some(Box::new(self.visit_embedded_statement(alternate, nested)?))
                    }
                    None => None,
                },
            },
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                let init = match init {
                    Some(ForInit::Var(list))
                        if list.kind == VarKind::Var && context.hoists_var() =>
                    {
                        self.transform_hoisted_list(list)?.map(ForInit::Expr)
                    }
                    Some(ForInit::Var(list)) => Some(ForInit::Var(self.visit_var_list(list)?)),
                    Some(ForInit::Expr(expr)) => {
                        Some(ForInit::Expr(self.visit_expression(expr, false)?))
                    }
                    None => None,
                };
                Stmt::For {
                    init,
                    test: self.visit_optional_expression(test.as_ref())?,
                    update: match update {
                        Some(update) => Some(self.visit_expression(update, false)?),
                        None => None,
                    },
                    body: Box::new(self.visit_embedded_statement(body, nested)?),
                }
            }
            Stmt::ForIn { left, right, body } => {
                let (left, exports) = self.visit_for_head(left, context)?;
                Stmt::ForIn {
                    left,
                    right: self.visit_expression(right, true)?,
                    body: Box::new(self.visit_loop_body(body, nested, exports)?),
                }
            }
            Stmt::ForOf {
                left,
                right,
                body,
                is_await,
            } => {
                let (left, exports) = self.visit_for_head(left, context)?;
                Stmt::ForOf {
                    left,
                    right: self.visit_expression(right, true)?,
                    body: Box::new(self.visit_loop_body(body, nested, exports)?),
                    is_await: *is_await,
                }
            }
            Stmt::While { test, body } => Stmt::While {
                test: self.visit_expression(test, true)?,
                body: Box::new(self.visit_embedded_statement(body, nested)?),
            },
            Stmt::DoWhile { body, test } => Stmt::DoWhile {
                body: Box::new(self.visit_embedded_statement(body, nested)?),
                test: self.visit_expression(test, true)?,
            },
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => Stmt::Try {
                block: self.visit_statements(block, nested)?,
                handler: match handler {
                    Some(handler) => Some(CatchClause {
                        param: match &handler.param {
                            Some(param) => Some(self.visit_pattern(param)?),
                            None => None,
                        },
                        body: self.visit_statements(&handler.body, nested)?,
                    }),
                    None => None,
                },
                finalizer: match finalizer {
                    Some(finalizer) => Some(self.visit_statements(finalizer, nested)?),
                    None => None,
                },
            },
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                let discriminant = self.visit_expression(discriminant, true)?;
                let mut rewritten = Vec::with_capacity(cases.len());
                for case in cases {
                    rewritten.push(SwitchCase {
                        test: self.visit_optional_expression(case.test.as_ref())?,
                        consequent: self.visit_statements(&case.consequent, nested)?,
                    });
                }
                Stmt::Switch {
                    discriminant,
                    cases: rewritten,
                }
            }
            Stmt::Labeled { label, body } => Stmt::Labeled {
                label: label.clone(),
                body: Box::new(self.visit_embedded_statement(body, nested)?),
            },
            Stmt::With { object, body } => Stmt::With {
                object: self.visit_expression(object, true)?,
                body: Box::new(self.visit_embedded_statement(body, nested)?),
            },
            Stmt::Return(arg) => Stmt::Return(self.visit_optional_expression(arg.as_ref())?),
            Stmt::Throw(arg) => Stmt::Throw(self.visit_expression(arg, true)?),
            // Module declarations only appear at the top level.
            Stmt::Import(_)
            | Stmt::ImportEquals(_)
            | Stmt::Export(_)
            | Stmt::ExportAssignment(_)
            | Stmt::Break(_)
            | Stmt::Continue(_)
            | Stmt::Empty
            | Stmt::Debugger => stmt.clone(),
        };
        out.push(rewritten);
        Ok(())
    }

    fn visit_optional_expression(
        &mut self,
        expr: Option<&Expr>,
    ) -> Result<Option<Expr>, TransformError> {
        expr.map(|expr| self.visit_expression(expr, true))
            .transpose()
    }

    /// A `for-in`/`for-of` head. A hoisted `var` head becomes a plain
    /// assignment target; the returned statements re-export its exported
    /// names at the top of each iteration.
    fn visit_for_head(
        &mut self,
        head: &ForHead,
        context: StatementContext,
    ) -> Result<(ForHead, Vec<Stmt>), TransformError> {
        match head {
            ForHead::Var(list) if list.kind == VarKind::Var && context.hoists_var() => {
                let Some(decl) = list.declarations.first() else {
                    return Ok((head.clone(), Vec::new()));
                };
                self.hoist_binding_names(&decl.name);
                let mut exports = Vec::new();
                for ident in collect_binding_names(&decl.name) {
                    for name in self.exported_names_for(ident) {
                        exports.push(Stmt::expr_stmt(
                            self.export_call(&name, Expr::id(ident.name.as_str())),
                        ));
                    }
                }
                Ok((ForHead::Pattern(self.visit_pattern(&decl.name)?), exports))
            }
            ForHead::Var(list) => Ok((ForHead::Var(self.visit_var_list(list)?), Vec::new())),
            ForHead::Pattern(pattern) => {
                Ok((ForHead::Pattern(self.visit_pattern(pattern)?), Vec::new()))
            }
        }
    }

    fn visit_loop_body(
        &mut self,
        body: &Stmt,
        context: StatementContext,
        mut exports: Vec<Stmt>,
    ) -> Result<Stmt, TransformError> {
        if exports.is_empty() {
            return self.visit_embedded_statement(body, context);
        }
        match body {
            Stmt::Block(stmts) => exports.extend(self.visit_statements(stmts, context)?),
            other => self.visit_statement(other, context, &mut exports)?,
        }
        Ok(Stmt::Block(exports))
    }

    /// Substitute inside a declaration list that stays a declaration.
    fn visit_var_list(&mut self, list: &VarDeclList) -> Result<VarDeclList, TransformError> {
        let mut declarations = Vec::with_capacity(list.declarations.len());
        for decl in &list.declarations {
            declarations.push(VarDeclarator {
                name: self.visit_pattern(&decl.name)?,
                init: self.visit_optional_expression(decl.init.as_ref())?,
            });
        }
        Ok(VarDeclList {
            kind: list.kind,
            declarations,
        })
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    fn visit_params(&mut self, params: &[Param]) -> Result<Vec<Param>, TransformError> {
        let mut rewritten = Vec::with_capacity(params.len());
        for param in params {
            rewritten.push(Param {
                pattern: self.visit_pattern(&param.pattern)?,
                default: self.visit_optional_expression(param.default.as_ref())?,
                rest: param.rest,
            });
        }
        Ok(rewritten)
    }

    /// Rewrite a function in its own lexical environment; temporaries it
    /// needs are declared at the top of its body.
    pub(crate) fn visit_function(&mut self, function: &Function) -> Result<Function, TransformError> {
        self.ctx.start_lexical_environment();
        let params = self.visit_params(&function.params)?;
        let body = self.visit_statements(&function.body, StatementContext::Function)?;
        let mut statements = self.ctx.end_lexical_environment();
        statements.extend(body);
        Ok(Function {
            name: function.name.clone(),
            params,
            body: statements,
            is_async: function.is_async,
            is_generator: function.is_generator,
        })
    }

    pub(crate) fn visit_arrow(
        &mut self,
        arrow: &ArrowFunction,
    ) -> Result<ArrowFunction, TransformError> {
        self.ctx.start_lexical_environment();
        let params = self.visit_params(&arrow.params)?;
        let body = match &arrow.body {
            ArrowBody::Block(stmts) => {
                ArrowBody::Block(self.visit_statements(stmts, StatementContext::Function)?)
            }
            ArrowBody::Expr(expr) => ArrowBody::Expr(Box::new(self.visit_expression(expr, true)?)),
        };
        let declarations = self.ctx.end_lexical_environment();
        let body = if declarations.is_empty() {
            body
        } else {
            let mut statements = declarations;
            match body {
                ArrowBody::Block(stmts) => statements.extend(stmts),
                ArrowBody::Expr(expr) => statements.push(Stmt::ret(Some(*expr))),
            }
            ArrowBody::Block(statements)
        };
        Ok(ArrowFunction {
            params,
            body,
            is_async: arrow.is_async,
        })
    }

    pub(crate) fn visit_class(&mut self, class: &Class) -> Result<Class, TransformError> {
        let super_class = match &class.super_class {
            Some(super_class) => Some(Box::new(self.visit_expression(super_class, true)?)),
            None => None,
        };
        let mut members = Vec::with_capacity(class.members.len());
        for member in &class.members {
            members.push(match member {
                ClassMember::Method {
                    key,
                    kind,
                    is_static,
                    function,
                } => ClassMember::Method {
                    key: self.visit_prop_name(key)?,
                    kind: *kind,
                    is_static: *is_static,
                    function: self.visit_function(function)?,
                },
                ClassMember::Property {
                    key,
                    is_static,
                    value,
                } => ClassMember::Property {
                    key: self.visit_prop_name(key)?,
                    is_static: *is_static,
                    value: self.visit_optional_expression(value.as_ref())?,
                },
                ClassMember::StaticBlock(stmts) => {
                    self.ctx.start_lexical_environment();
                    let body = self.visit_statements(stmts, StatementContext::Function)?;
                    let mut statements = self.ctx.end_lexical_environment();
                    statements.extend(body);
                    ClassMember::StaticBlock(statements)
                }
            });
        }
        Ok(Class {
            name: class.name.clone(),
            super_class,
            members,
        })
    }

    pub(crate) fn visit_prop_name(&mut self, key: &PropName) -> Result<PropName, TransformError> {
        Ok(match key {
            PropName::Computed(expr) => {
                PropName::Computed(Box::new(self.visit_expression(expr, true)?))
            }
            other => other.clone(),
        })
    }
}

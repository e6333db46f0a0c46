//! Declaration hoisting and the reference-resolving walk.
//!
//! Each scope is bound in two steps: its declarations are entered first
//! (`var` hoisted to the enclosing function or module, lexical declarations
//! into the scope itself), then its statements are walked and every
//! reference is resolved against the scope chain. Forward references
//! therefore resolve to the right symbol.

use modlower_ast::walk::collect_binding_names;
use modlower_ast::{
    ArrowBody, ArrowFunction, Class, ClassMember, Expr, ForHead, ForInit, Function, MemberProp,
    ObjectPatternProp, Param, Pattern, Prop, PropName, Stmt, VarDeclList, VarKind,
};
use modlower_common::limits::{MAX_AST_DEPTH, STACK_RED_ZONE, STACK_SEGMENT_SIZE};
use tracing::warn;

use crate::state::BinderState;
use crate::symbols::{ScopeKind, SymbolFlags};

impl BinderState {
    // =========================================================================
    // Declaration pass
    // =========================================================================

    /// Declare every `var` binding of a statement list in the nearest `var`
    /// container, looking through nested blocks but not into functions.
    pub(crate) fn hoist_var_declarations(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.hoist_var_declarations_in(stmt);
        }
    }

    fn hoist_var_declarations_in(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Var(var) => {
                let exported = var.modifiers.is_export;
                self.hoist_var_list(&var.list, exported);
            }
            Stmt::For { init, body, .. } => {
                if let Some(ForInit::Var(list)) = init {
                    self.hoist_var_list(list, false);
                }
                self.hoist_var_declarations_in(body);
            }
            Stmt::ForIn { left, body, .. } | Stmt::ForOf { left, body, .. } => {
                if let ForHead::Var(list) = left {
                    self.hoist_var_list(list, false);
                }
                self.hoist_var_declarations_in(body);
            }
            Stmt::Block(stmts) => self.hoist_var_declarations(stmts),
            Stmt::If {
                consequent,
                alternate,
                ..
            } => {
                self.hoist_var_declarations_in(consequent);
                if let Some(alternate) = alternate {
                    self.hoist_var_declarations_in(alternate);
                }
            }
            Stmt::While { body, .. }
            | Stmt::DoWhile { body, .. }
            | Stmt::Labeled { body, .. }
            | Stmt::With { body, .. } => self.hoist_var_declarations_in(body),
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                self.hoist_var_declarations(block);
                if let Some(handler) = handler {
                    self.hoist_var_declarations(&handler.body);
                }
                if let Some(finalizer) = finalizer {
                    self.hoist_var_declarations(finalizer);
                }
            }
            Stmt::Switch { cases, .. } => {
                for case in cases {
                    self.hoist_var_declarations(&case.consequent);
                }
            }
            _ => {}
        }
    }

    fn hoist_var_list(&mut self, list: &VarDeclList, exported: bool) {
        if list.kind != VarKind::Var {
            return;
        }
        let mut flags = SymbolFlags::FUNCTION_SCOPED_VARIABLE;
        if exported {
            flags |= SymbolFlags::EXPORTED;
        }
        for decl in &list.declarations {
            for ident in collect_binding_names(&decl.name) {
                self.declare_symbol(ident, flags, true);
            }
        }
    }

    /// Declare the lexical bindings that live directly in the current scope.
    pub(crate) fn declare_lexical_declarations(&mut self, stmts: &[Stmt], module_level: bool) {
        for stmt in stmts {
            match stmt {
                Stmt::Var(var) if var.list.kind.is_block_scoped() => {
                    let mut flags = SymbolFlags::BLOCK_SCOPED_VARIABLE;
                    if var.modifiers.is_export {
                        flags |= SymbolFlags::EXPORTED;
                    }
                    self.declare_block_scoped_list(&var.list, flags);
                }
                Stmt::Function(decl) => {
                    if let Some(name) = &decl.function.name {
                        let mut flags = SymbolFlags::FUNCTION;
                        if decl.modifiers.is_export {
                            flags |= SymbolFlags::EXPORTED;
                        }
                        self.declare_symbol(name, flags, false);
                    }
                }
                Stmt::Class(decl) => {
                    if let Some(name) = &decl.class.name {
                        let mut flags = SymbolFlags::CLASS;
                        if decl.modifiers.is_export {
                            flags |= SymbolFlags::EXPORTED;
                        }
                        self.declare_symbol(name, flags, false);
                    }
                }
                Stmt::Ambient(decl) => {
                    self.declare_symbol(&decl.name, SymbolFlags::TYPE_ONLY, false);
                }
                Stmt::Import(import) if module_level => self.declare_import(import),
                Stmt::ImportEquals(decl) if module_level => self.declare_import_equals(decl),
                _ => {}
            }
        }
    }

    fn declare_block_scoped_list(&mut self, list: &VarDeclList, flags: SymbolFlags) {
        for decl in &list.declarations {
            for ident in collect_binding_names(&decl.name) {
                self.declare_symbol(ident, flags, false);
            }
        }
    }

    fn declare_params(&mut self, params: &[Param]) {
        for param in params {
            for ident in collect_binding_names(&param.pattern) {
                self.declare_symbol(ident, SymbolFlags::PARAMETER, false);
            }
        }
    }

    // =========================================================================
    // Reference pass
    // =========================================================================

    pub(crate) fn bind_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.bind_statement(stmt);
        }
    }

    fn bind_block(&mut self, stmts: &[Stmt]) {
        self.enter_scope(ScopeKind::Block);
        self.declare_lexical_declarations(stmts, false);
        self.bind_statements(stmts);
        self.exit_scope();
    }

    fn bind_statement(&mut self, stmt: &Stmt) {
        if self.depth >= MAX_AST_DEPTH {
            warn!(depth = self.depth, "statement nesting too deep, not binding further");
            return;
        }
        self.depth += 1;
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.bind_statement_inner(stmt);
        });
        self.depth -= 1;
    }

    fn bind_statement_inner(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) | Stmt::Throw(expr) => self.bind_expr(expr),
            Stmt::Var(var) => self.bind_var_list(&var.list),
            Stmt::Function(decl) => self.bind_function(&decl.function, false),
            Stmt::Class(decl) => self.bind_class(&decl.class, false),
            Stmt::Import(_) | Stmt::Ambient(_) => {}
            Stmt::ImportEquals(decl) => self.bind_import_equals_reference(decl),
            Stmt::Export(export) => self.bind_export_declaration(export),
            Stmt::ExportAssignment(assignment) => self.bind_expr(&assignment.expression),
            Stmt::Block(stmts) => self.bind_block(stmts),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                self.bind_expr(test);
                self.bind_statement(consequent);
                if let Some(alternate) = alternate {
                    self.bind_statement(alternate);
                }
            }
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                let lexical = matches!(init, Some(ForInit::Var(list)) if list.kind.is_block_scoped());
                if lexical {
                    self.enter_scope(ScopeKind::Block);
                }
                match init {
                    Some(ForInit::Var(list)) => {
                        if lexical {
                            self.declare_block_scoped_list(list, SymbolFlags::BLOCK_SCOPED_VARIABLE);
                        }
                        self.bind_var_list(list);
                    }
                    Some(ForInit::Expr(expr)) => self.bind_expr(expr),
                    None => {}
                }
                if let Some(test) = test {
                    self.bind_expr(test);
                }
                if let Some(update) = update {
                    self.bind_expr(update);
                }
                self.bind_statement(body);
                if lexical {
                    self.exit_scope();
                }
            }
            Stmt::ForIn { left, right, body } | Stmt::ForOf {
                left, right, body, ..
            } => {
                // The right side is evaluated outside the head's scope.
                self.bind_expr(right);
                let lexical = matches!(left, ForHead::Var(list) if list.kind.is_block_scoped());
                if lexical {
                    self.enter_scope(ScopeKind::Block);
                }
                match left {
                    ForHead::Var(list) => {
                        if lexical {
                            self.declare_block_scoped_list(list, SymbolFlags::BLOCK_SCOPED_VARIABLE);
                        }
                        self.bind_var_list(list);
                    }
                    ForHead::Pattern(pattern) => self.bind_pattern(pattern),
                }
                self.bind_statement(body);
                if lexical {
                    self.exit_scope();
                }
            }
            Stmt::While { test, body } | Stmt::DoWhile { body, test } => {
                self.bind_expr(test);
                self.bind_statement(body);
            }
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                self.bind_block(block);
                if let Some(handler) = handler {
                    self.enter_scope(ScopeKind::Catch);
                    if let Some(param) = &handler.param {
                        for ident in collect_binding_names(param) {
                            self.declare_symbol(ident, SymbolFlags::CATCH_VARIABLE, false);
                        }
                        self.bind_pattern(param);
                    }
                    self.declare_lexical_declarations(&handler.body, false);
                    self.bind_statements(&handler.body);
                    self.exit_scope();
                }
                if let Some(finalizer) = finalizer {
                    self.bind_block(finalizer);
                }
            }
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                self.bind_expr(discriminant);
                self.enter_scope(ScopeKind::Block);
                for case in cases {
                    self.declare_lexical_declarations(&case.consequent, false);
                }
                for case in cases {
                    if let Some(test) = &case.test {
                        self.bind_expr(test);
                    }
                    self.bind_statements(&case.consequent);
                }
                self.exit_scope();
            }
            Stmt::Labeled { body, .. } => self.bind_statement(body),
            Stmt::With { object, body } => {
                self.bind_expr(object);
                self.bind_statement(body);
            }
            Stmt::Return(expr) => {
                if let Some(expr) = expr {
                    self.bind_expr(expr);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty | Stmt::Debugger => {}
        }
    }

    fn bind_var_list(&mut self, list: &VarDeclList) {
        for decl in &list.declarations {
            self.bind_pattern(&decl.name);
            if let Some(init) = &decl.init {
                self.bind_expr(init);
            }
        }
    }

    fn bind_prop_name(&mut self, key: &PropName) {
        if let PropName::Computed(expr) = key {
            self.bind_expr(expr);
        }
    }

    /// Binding identifiers were mapped when declared; anything else in the
    /// pattern (assignment targets, defaults, computed keys) is a reference.
    pub(crate) fn bind_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Ident(ident) => self.resolve_reference(ident),
            Pattern::Expr(expr) => self.bind_expr(expr),
            Pattern::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatternProp::KeyValue {
                            key,
                            value,
                            default,
                        } => {
                            self.bind_prop_name(key);
                            self.bind_pattern(value);
                            if let Some(default) = default {
                                self.bind_expr(default);
                            }
                        }
                        ObjectPatternProp::Shorthand { name, default } => {
                            self.resolve_reference(name);
                            if let Some(default) = default {
                                self.bind_expr(default);
                            }
                        }
                    }
                }
                if let Some(rest) = &object.rest {
                    self.bind_pattern(rest);
                }
            }
            Pattern::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.bind_pattern(&element.target);
                    if let Some(default) = &element.default {
                        self.bind_expr(default);
                    }
                }
                if let Some(rest) = &array.rest {
                    self.bind_pattern(rest);
                }
            }
        }
    }

    pub(crate) fn bind_expr(&mut self, expr: &Expr) {
        if self.depth >= MAX_AST_DEPTH {
            warn!(depth = self.depth, "expression nesting too deep, not binding further");
            return;
        }
        self.depth += 1;
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.bind_expr_inner(expr);
        });
        self.depth -= 1;
    }

    fn bind_expr_inner(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.resolve_reference(ident),
            Expr::Lit(_) | Expr::This | Expr::Super | Expr::ImportMeta => {}
            Expr::Template(template) => {
                for expr in &template.exprs {
                    self.bind_expr(expr);
                }
            }
            Expr::TaggedTemplate { tag, template } => {
                self.bind_expr(tag);
                for expr in &template.exprs {
                    self.bind_expr(expr);
                }
            }
            Expr::Array(elements) => {
                for element in elements.iter().flatten() {
                    self.bind_expr(element);
                }
            }
            Expr::Object(props) => {
                for prop in props {
                    match prop {
                        Prop::KeyValue { key, value } => {
                            self.bind_prop_name(key);
                            self.bind_expr(value);
                        }
                        Prop::Shorthand(ident) => self.resolve_reference(ident),
                        Prop::Method { key, function, .. } => {
                            self.bind_prop_name(key);
                            self.bind_function(function, false);
                        }
                        Prop::Spread(expr) => self.bind_expr(expr),
                    }
                }
            }
            Expr::Function(function) => self.bind_function(function, true),
            Expr::Arrow(arrow) => self.bind_arrow(arrow),
            Expr::Class(class) => self.bind_class(class, true),
            Expr::Unary { arg, .. }
            | Expr::Update { arg, .. }
            | Expr::Paren(arg)
            | Expr::Await(arg)
            | Expr::Spread(arg)
            | Expr::ImportCall(arg) => self.bind_expr(arg),
            Expr::Binary { left, right, .. } => {
                self.bind_expr(left);
                self.bind_expr(right);
            }
            Expr::Assign { target, value, .. } => {
                self.bind_pattern(target);
                self.bind_expr(value);
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.bind_expr(test);
                self.bind_expr(consequent);
                self.bind_expr(alternate);
            }
            Expr::Call { callee, args, .. } => {
                self.bind_expr(callee);
                for arg in args {
                    self.bind_expr(arg);
                }
            }
            Expr::New { callee, args } => {
                self.bind_expr(callee);
                for arg in args.iter().flatten() {
                    self.bind_expr(arg);
                }
            }
            Expr::Member {
                object, property, ..
            } => {
                self.bind_expr(object);
                if let MemberProp::Computed(expr) = property {
                    self.bind_expr(expr);
                }
            }
            Expr::Seq(exprs) => {
                for expr in exprs {
                    self.bind_expr(expr);
                }
            }
            Expr::Yield { arg, .. } => {
                if let Some(arg) = arg {
                    self.bind_expr(arg);
                }
            }
        }
    }

    fn bind_params(&mut self, params: &[Param]) {
        for param in params {
            self.bind_pattern(&param.pattern);
            if let Some(default) = &param.default {
                self.bind_expr(default);
            }
        }
    }

    /// Bind a function body in its own scope. The name of a function
    /// expression gets a scope of its own between the outer scope and the
    /// body; a declaration's name was already declared by its container.
    fn bind_function(&mut self, function: &Function, is_expression: bool) {
        let name_scope = match &function.name {
            Some(name) if is_expression => {
                self.enter_scope(ScopeKind::ExpressionName);
                self.declare_symbol(name, SymbolFlags::FUNCTION, false);
                true
            }
            _ => false,
        };

        self.enter_scope(ScopeKind::Function);
        self.declare_params(&function.params);
        self.hoist_var_declarations(&function.body);
        self.declare_lexical_declarations(&function.body, false);
        self.bind_params(&function.params);
        self.bind_statements(&function.body);
        self.exit_scope();

        if name_scope {
            self.exit_scope();
        }
    }

    fn bind_arrow(&mut self, arrow: &ArrowFunction) {
        self.enter_scope(ScopeKind::Function);
        self.declare_params(&arrow.params);
        if let ArrowBody::Block(stmts) = &arrow.body {
            self.hoist_var_declarations(stmts);
            self.declare_lexical_declarations(stmts, false);
        }
        self.bind_params(&arrow.params);
        match &arrow.body {
            ArrowBody::Block(stmts) => self.bind_statements(stmts),
            ArrowBody::Expr(expr) => self.bind_expr(expr),
        }
        self.exit_scope();
    }

    fn bind_class(&mut self, class: &Class, is_expression: bool) {
        let name_scope = match &class.name {
            Some(name) if is_expression => {
                self.enter_scope(ScopeKind::ExpressionName);
                self.declare_symbol(name, SymbolFlags::CLASS, false);
                true
            }
            _ => false,
        };

        if let Some(super_class) = &class.super_class {
            self.bind_expr(super_class);
        }
        for member in &class.members {
            match member {
                ClassMember::Method { key, function, .. } => {
                    self.bind_prop_name(key);
                    self.bind_function(function, false);
                }
                ClassMember::Property { key, value, .. } => {
                    self.bind_prop_name(key);
                    if let Some(value) = value {
                        self.bind_expr(value);
                    }
                }
                ClassMember::StaticBlock(stmts) => {
                    self.enter_scope(ScopeKind::Function);
                    self.hoist_var_declarations(stmts);
                    self.declare_lexical_declarations(stmts, false);
                    self.bind_statements(stmts);
                    self.exit_scope();
                }
            }
        }

        if name_scope {
            self.exit_scope();
        }
    }
}

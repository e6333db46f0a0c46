//! Statement printing.

use modlower_ast::{
    CatchClause, Class, ClassMember, ExportClause, ForHead, ForInit, Function, ImportClause,
    MethodKind, Modifiers, ModuleReference, NamedImportBindings, PropName, Stmt, SwitchCase,
    VarDeclList,
};
use modlower_common::limits::{STACK_RED_ZONE, STACK_SEGMENT_SIZE};

use super::{Emit, Printer};

impl Emit for Stmt {
    fn emit(&self, printer: &mut Printer) {
        printer.emit_statement(self);
    }
}

impl Printer {
    /// One line per statement at the current indentation. Declarations with
    /// no runtime form print nothing.
    pub(crate) fn emit_statement_lines(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            if matches!(stmt, Stmt::Ambient(_)) {
                continue;
            }
            self.write_indent();
            self.emit_statement(stmt);
            self.write_line();
        }
    }

    /// `{` newline, the statements one level deeper, `}`.
    pub(crate) fn emit_braced_body(&mut self, statements: &[Stmt]) {
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statement_lines(statements);
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_block(&mut self, statements: &[Stmt]) {
        if statements.iter().all(|stmt| matches!(stmt, Stmt::Ambient(_))) {
            self.write("{ }");
        } else {
            self.emit_braced_body(statements);
        }
    }

    /// The body of `if`, loops, `with` and labels: blocks stay on the
    /// header line, other statements follow a space.
    fn emit_embedded(&mut self, stmt: &Stmt) {
        self.write(" ");
        self.emit_statement(stmt);
    }

    pub(crate) fn emit_statement(&mut self, stmt: &Stmt) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || {
            self.emit_statement_inner(stmt);
        });
    }

    fn emit_statement_inner(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                let mark = self.mark();
                self.emit_expression(expr);
                if starts_ambiguously(self.written_since(mark)) {
                    self.parenthesize_since(mark);
                }
                self.write(";");
            }
            Stmt::Var(var) => {
                self.emit_modifiers(var.modifiers);
                self.emit_var_list(&var.list);
                self.write(";");
            }
            Stmt::Function(decl) => {
                self.emit_modifiers(decl.modifiers);
                self.emit_function(&decl.function);
            }
            Stmt::Class(decl) => {
                self.emit_modifiers(decl.modifiers);
                self.emit_class(&decl.class);
            }
            Stmt::Import(import) => {
                self.write("import ");
                if import.is_type_only {
                    self.write("type ");
                }
                if let Some(clause) = &import.clause {
                    self.emit_import_clause(clause);
                    self.write(" from ");
                }
                self.emit_expression(&import.specifier);
                self.write(";");
            }
            Stmt::ImportEquals(decl) => {
                if decl.is_export {
                    self.write("export ");
                }
                self.write("import ");
                self.write(&decl.name.name);
                self.write(" = ");
                match &decl.reference {
                    ModuleReference::External(specifier) => {
                        self.write("require(");
                        self.emit_expression(specifier);
                        self.write(")");
                    }
                    ModuleReference::Entity(entity) => self.emit_expression(entity),
                }
                self.write(";");
            }
            Stmt::Export(export) => {
                self.write("export ");
                if export.is_type_only {
                    self.write("type ");
                }
                match &export.clause {
                    Some(ExportClause::Named(specifiers)) => {
                        self.write("{");
                        for (i, specifier) in specifiers.iter().enumerate() {
                            self.write(if i == 0 { " " } else { ", " });
                            if specifier.is_type_only {
                                self.write("type ");
                            }
                            self.write(&specifier.local.name);
                            if let Some(exported) = &specifier.exported {
                                self.write(" as ");
                                self.write(exported);
                            }
                        }
                        self.write(if specifiers.is_empty() { "}" } else { " }" });
                    }
                    Some(ExportClause::Namespace(name)) => {
                        self.write("* as ");
                        self.write(&name.name);
                    }
                    None => self.write("*"),
                }
                if let Some(specifier) = &export.specifier {
                    self.write(" from ");
                    self.emit_expression(specifier);
                }
                self.write(";");
            }
            Stmt::ExportAssignment(assignment) => {
                self.write(if assignment.is_export_equals {
                    "export = "
                } else {
                    "export default "
                });
                self.emit_expression_at(&assignment.expression, Self::PREC_ASSIGN);
                self.write(";");
            }
            Stmt::Ambient(_) => {}
            Stmt::Block(statements) => self.emit_block(statements),
            Stmt::If {
                test,
                consequent,
                alternate,
            } => {
                self.write("if (");
                self.emit_expression(test);
                self.write(")");
                self.emit_embedded(consequent);
                if let Some(alternate) = alternate {
                    if matches!(**consequent, Stmt::Block(_)) {
                        self.write(" ");
                    } else {
                        self.write_line();
                        self.write_indent();
                    }
                    self.write("else");
                    self.emit_embedded(alternate);
                }
            }
            Stmt::For {
                init,
                test,
                update,
                body,
            } => {
                self.write("for (");
                match init {
                    Some(ForInit::Var(list)) => self.emit_var_list(list),
                    Some(ForInit::Expr(expr)) => self.emit_expression(expr),
                    None => {}
                }
                self.write(";");
                if let Some(test) = test {
                    self.write(" ");
                    self.emit_expression(test);
                }
                self.write(";");
                if let Some(update) = update {
                    self.write(" ");
                    self.emit_expression(update);
                }
                self.write(")");
                self.emit_embedded(body);
            }
            Stmt::ForIn { left, right, body } => {
                self.write("for (");
                self.emit_for_head(left);
                self.write(" in ");
                self.emit_expression(right);
                self.write(")");
                self.emit_embedded(body);
            }
            Stmt::ForOf {
                left,
                right,
                body,
                is_await,
            } => {
                self.write(if *is_await { "for await (" } else { "for (" });
                self.emit_for_head(left);
                self.write(" of ");
                self.emit_expression_at(right, Self::PREC_ASSIGN);
                self.write(")");
                self.emit_embedded(body);
            }
            Stmt::While { test, body } => {
                self.write("while (");
                self.emit_expression(test);
                self.write(")");
                self.emit_embedded(body);
            }
            Stmt::DoWhile { body, test } => {
                self.write("do");
                self.emit_embedded(body);
                if matches!(**body, Stmt::Block(_)) {
                    self.write(" ");
                } else {
                    self.write_line();
                    self.write_indent();
                }
                self.write("while (");
                self.emit_expression(test);
                self.write(");");
            }
            Stmt::Try {
                block,
                handler,
                finalizer,
            } => {
                self.write("try ");
                self.emit_braced_body(block);
                if let Some(CatchClause { param, body }) = handler {
                    self.write(" catch ");
                    if let Some(param) = param {
                        self.write("(");
                        self.emit_pattern(param);
                        self.write(") ");
                    }
                    self.emit_braced_body(body);
                }
                if let Some(finalizer) = finalizer {
                    self.write(" finally ");
                    self.emit_braced_body(finalizer);
                }
            }
            Stmt::Switch {
                discriminant,
                cases,
            } => {
                self.write("switch (");
                self.emit_expression(discriminant);
                self.write(") {");
                self.write_line();
                self.increase_indent();
                for case in cases {
                    self.emit_switch_case(case);
                }
                self.decrease_indent();
                self.write_indent();
                self.write("}");
            }
            Stmt::Labeled { label, body } => {
                self.write(label);
                self.write(":");
                self.emit_embedded(body);
            }
            Stmt::With { object, body } => {
                self.write("with (");
                self.emit_expression(object);
                self.write(")");
                self.emit_embedded(body);
            }
            Stmt::Return(arg) => {
                self.write("return");
                if let Some(arg) = arg {
                    self.write(" ");
                    self.emit_expression(arg);
                }
                self.write(";");
            }
            Stmt::Throw(arg) => {
                self.write("throw ");
                self.emit_expression(arg);
                self.write(";");
            }
            Stmt::Break(label) => self.emit_jump("break", label.as_deref()),
            Stmt::Continue(label) => self.emit_jump("continue", label.as_deref()),
            Stmt::Empty => self.write(";"),
            Stmt::Debugger => self.write("debugger;"),
        }
    }

    fn emit_jump(&mut self, keyword: &str, label: Option<&str>) {
        self.write(keyword);
        if let Some(label) = label {
            self.write(" ");
            self.write(label);
        }
        self.write(";");
    }

    fn emit_modifiers(&mut self, modifiers: Modifiers) {
        if modifiers.is_export {
            self.write("export ");
        }
        if modifiers.is_default {
            self.write("default ");
        }
    }

    /// `var a = 1, b` without the terminating semicolon.
    pub(crate) fn emit_var_list(&mut self, list: &VarDeclList) {
        self.write(list.kind.as_str());
        self.write(" ");
        for (i, declarator) in list.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_pattern(&declarator.name);
            if let Some(init) = &declarator.init {
                self.write(" = ");
                self.emit_expression_at(init, Self::PREC_ASSIGN);
            }
        }
    }

    fn emit_for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Var(list) => self.emit_var_list(list),
            ForHead::Pattern(pattern) => self.emit_pattern(pattern),
        }
    }

    fn emit_switch_case(&mut self, case: &SwitchCase) {
        self.write_indent();
        match &case.test {
            Some(test) => {
                self.write("case ");
                self.emit_expression(test);
                self.write(":");
            }
            None => self.write("default:"),
        }
        self.write_line();
        self.increase_indent();
        self.emit_statement_lines(&case.consequent);
        self.decrease_indent();
    }

    fn emit_import_clause(&mut self, clause: &ImportClause) {
        if let Some(default) = &clause.default {
            self.write(&default.name);
            if clause.bindings.is_some() {
                self.write(", ");
            }
        }
        match &clause.bindings {
            Some(NamedImportBindings::Namespace(name)) => {
                self.write("* as ");
                self.write(&name.name);
            }
            Some(NamedImportBindings::Named(specifiers)) => {
                self.write("{");
                for (i, specifier) in specifiers.iter().enumerate() {
                    self.write(if i == 0 { " " } else { ", " });
                    if specifier.is_type_only {
                        self.write("type ");
                    }
                    if let Some(imported) = &specifier.imported {
                        self.write(imported);
                        self.write(" as ");
                    }
                    self.write(&specifier.local.name);
                }
                self.write(if specifiers.is_empty() { "}" } else { " }" });
            }
            None => {}
        }
    }

    /// `[async ]function[*] [name](params) { ... }`
    pub(crate) fn emit_function(&mut self, function: &Function) {
        if function.is_async {
            self.write("async ");
        }
        self.write("function");
        if function.is_generator {
            self.write("*");
        }
        match &function.name {
            Some(name) => {
                self.write(" ");
                self.write(&name.name);
            }
            None => self.write(" "),
        }
        self.emit_params(&function.params);
        self.write(" ");
        self.emit_braced_body(&function.body);
    }

    pub(crate) fn emit_class(&mut self, class: &Class) {
        self.write("class");
        if let Some(name) = &class.name {
            self.write(" ");
            self.write(&name.name);
        }
        if let Some(super_class) = &class.super_class {
            self.write(" extends ");
            self.emit_expression_at(super_class, Self::PREC_CALL);
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for member in &class.members {
            self.write_indent();
            self.emit_class_member(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Method {
                key,
                kind,
                is_static,
                function,
            } => {
                if *is_static {
                    self.write("static ");
                }
                self.emit_method(key, *kind, function);
            }
            ClassMember::Property {
                key,
                is_static,
                value,
            } => {
                if *is_static {
                    self.write("static ");
                }
                self.emit_prop_name(key);
                if let Some(value) = value {
                    self.write(" = ");
                    self.emit_expression_at(value, Self::PREC_ASSIGN);
                }
                self.write(";");
            }
            ClassMember::StaticBlock(body) => {
                self.write("static ");
                self.emit_braced_body(body);
            }
        }
    }

    /// Method shorthand shared by classes and object literals.
    pub(crate) fn emit_method(
        &mut self,
        key: &PropName,
        kind: MethodKind,
        function: &Function,
    ) {
        match kind {
            MethodKind::Getter => self.write("get "),
            MethodKind::Setter => self.write("set "),
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if function.is_async {
            self.write("async ");
        }
        if function.is_generator {
            self.write("*");
        }
        if kind == MethodKind::Constructor {
            self.write("constructor");
        } else {
            self.emit_prop_name(key);
        }
        self.emit_params(&function.params);
        self.write(" ");
        self.emit_braced_body(&function.body);
    }
}

/// Whether printed expression text would be read as a block, a function
/// declaration or a class declaration at the start of a statement.
fn starts_ambiguously(text: &str) -> bool {
    let starts_with_keyword = |keyword: &str| {
        text.strip_prefix(keyword).is_some_and(|rest| {
            !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$')
        })
    };
    text.starts_with('{')
        || starts_with_keyword("function")
        || starts_with_keyword("class")
        || text.starts_with("async function")
}

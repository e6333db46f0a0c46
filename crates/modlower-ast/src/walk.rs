//! Read-only traversal.
//!
//! [`Visit`] has one hook per node category; the default of each hook calls
//! the matching `walk_*` function, which visits the children in source order.
//! Override a hook and call the `walk_*` function to keep descending.

use crate::expr::{
    ArrowBody, ArrowFunction, Class, ClassMember, Expr, Function, MemberProp, Param, Prop,
    PropName,
};
use crate::node::Ident;
use crate::pattern::{ObjectPatternProp, Pattern};
use crate::source_file::SourceFile;
use crate::stmt::{
    ExportClause, ForHead, ForInit, ImportClause, ModuleReference, NamedImportBindings, Stmt,
    VarDeclList,
};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

const STACK_RED_ZONE: usize = 128 * 1024;
const STACK_SEGMENT_SIZE: usize = 2 * 1024 * 1024;

pub trait Visit {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &Class) {
        walk_class(self, class);
    }

    /// Every identifier node, binding or reference.
    fn visit_ident(&mut self, _ident: &Ident) {}

    /// Names that are not identifier nodes: property names, member names,
    /// labels and module export names.
    fn visit_name(&mut self, _name: &str) {}
}

pub fn walk_source_file<V: Visit + ?Sized>(visitor: &mut V, file: &SourceFile) {
    for stmt in &file.statements {
        visitor.visit_stmt(stmt);
    }
}

fn walk_stmts<V: Visit + ?Sized>(visitor: &mut V, stmts: &[Stmt]) {
    for stmt in stmts {
        visitor.visit_stmt(stmt);
    }
}

fn walk_var_decl_list<V: Visit + ?Sized>(visitor: &mut V, list: &VarDeclList) {
    for decl in &list.declarations {
        visitor.visit_pattern(&decl.name);
        if let Some(init) = &decl.init {
            visitor.visit_expr(init);
        }
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || walk_stmt_inner(visitor, stmt));
}

fn walk_stmt_inner<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr(expr) | Stmt::Throw(expr) => visitor.visit_expr(expr),
        Stmt::Var(var) => walk_var_decl_list(visitor, &var.list),
        Stmt::Function(decl) => visitor.visit_function(&decl.function),
        Stmt::Class(decl) => visitor.visit_class(&decl.class),
        Stmt::Import(import) => {
            if let Some(ImportClause { default, bindings }) = &import.clause {
                if let Some(default) = default {
                    visitor.visit_ident(default);
                }
                match bindings {
                    Some(NamedImportBindings::Namespace(name)) => visitor.visit_ident(name),
                    Some(NamedImportBindings::Named(specifiers)) => {
                        for specifier in specifiers {
                            if let Some(imported) = &specifier.imported {
                                visitor.visit_name(imported);
                            }
                            visitor.visit_ident(&specifier.local);
                        }
                    }
                    None => {}
                }
            }
            visitor.visit_expr(&import.specifier);
        }
        Stmt::ImportEquals(decl) => {
            visitor.visit_ident(&decl.name);
            match &decl.reference {
                ModuleReference::External(expr) | ModuleReference::Entity(expr) => {
                    visitor.visit_expr(expr);
                }
            }
        }
        Stmt::Export(export) => {
            match &export.clause {
                Some(ExportClause::Named(specifiers)) => {
                    for specifier in specifiers {
                        visitor.visit_ident(&specifier.local);
                        if let Some(exported) = &specifier.exported {
                            visitor.visit_name(exported);
                        }
                    }
                }
                Some(ExportClause::Namespace(name)) => visitor.visit_ident(name),
                None => {}
            }
            if let Some(specifier) = &export.specifier {
                visitor.visit_expr(specifier);
            }
        }
        Stmt::ExportAssignment(assignment) => visitor.visit_expr(&assignment.expression),
        Stmt::Ambient(decl) => visitor.visit_ident(&decl.name),
        Stmt::Block(stmts) => walk_stmts(visitor, stmts),
        Stmt::If {
            test,
            consequent,
            alternate,
        } => {
            visitor.visit_expr(test);
            visitor.visit_stmt(consequent);
            if let Some(alternate) = alternate {
                visitor.visit_stmt(alternate);
            }
        }
        Stmt::For {
            init,
            test,
            update,
            body,
        } => {
            match init {
                Some(ForInit::Var(list)) => walk_var_decl_list(visitor, list),
                Some(ForInit::Expr(expr)) => visitor.visit_expr(expr),
                None => {}
            }
            if let Some(test) = test {
                visitor.visit_expr(test);
            }
            if let Some(update) = update {
                visitor.visit_expr(update);
            }
            visitor.visit_stmt(body);
        }
        Stmt::ForIn { left, right, body } | Stmt::ForOf {
            left, right, body, ..
        } => {
            match left {
                ForHead::Var(list) => walk_var_decl_list(visitor, list),
                ForHead::Pattern(pattern) => visitor.visit_pattern(pattern),
            }
            visitor.visit_expr(right);
            visitor.visit_stmt(body);
        }
        Stmt::While { test, body } | Stmt::DoWhile { body, test } => {
            visitor.visit_expr(test);
            visitor.visit_stmt(body);
        }
        Stmt::Try {
            block,
            handler,
            finalizer,
        } => {
            walk_stmts(visitor, block);
            if let Some(handler) = handler {
                if let Some(param) = &handler.param {
                    visitor.visit_pattern(param);
                }
                walk_stmts(visitor, &handler.body);
            }
            if let Some(finalizer) = finalizer {
                walk_stmts(visitor, finalizer);
            }
        }
        Stmt::Switch {
            discriminant,
            cases,
        } => {
            visitor.visit_expr(discriminant);
            for case in cases {
                if let Some(test) = &case.test {
                    visitor.visit_expr(test);
                }
                walk_stmts(visitor, &case.consequent);
            }
        }
        Stmt::Labeled { label, body } => {
            visitor.visit_name(label);
            visitor.visit_stmt(body);
        }
        Stmt::With { object, body } => {
            visitor.visit_expr(object);
            visitor.visit_stmt(body);
        }
        Stmt::Return(expr) => {
            if let Some(expr) = expr {
                visitor.visit_expr(expr);
            }
        }
        Stmt::Break(label) | Stmt::Continue(label) => {
            if let Some(label) = label {
                visitor.visit_name(label);
            }
        }
        Stmt::Empty | Stmt::Debugger => {}
    }
}

fn walk_prop_name<V: Visit + ?Sized>(visitor: &mut V, key: &PropName) {
    match key {
        PropName::Ident(name) | PropName::Str(name) => visitor.visit_name(name),
        PropName::Num(_) => {}
        PropName::Computed(expr) => visitor.visit_expr(expr),
    }
}

fn walk_params<V: Visit + ?Sized>(visitor: &mut V, params: &[Param]) {
    for param in params {
        visitor.visit_pattern(&param.pattern);
        if let Some(default) = &param.default {
            visitor.visit_expr(default);
        }
    }
}

pub fn walk_function<V: Visit + ?Sized>(visitor: &mut V, function: &Function) {
    if let Some(name) = &function.name {
        visitor.visit_ident(name);
    }
    walk_params(visitor, &function.params);
    walk_stmts(visitor, &function.body);
}

fn walk_arrow<V: Visit + ?Sized>(visitor: &mut V, arrow: &ArrowFunction) {
    walk_params(visitor, &arrow.params);
    match &arrow.body {
        ArrowBody::Block(stmts) => walk_stmts(visitor, stmts),
        ArrowBody::Expr(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_class<V: Visit + ?Sized>(visitor: &mut V, class: &Class) {
    if let Some(name) = &class.name {
        visitor.visit_ident(name);
    }
    if let Some(super_class) = &class.super_class {
        visitor.visit_expr(super_class);
    }
    for member in &class.members {
        match member {
            ClassMember::Method { key, function, .. } => {
                walk_prop_name(visitor, key);
                visitor.visit_function(function);
            }
            ClassMember::Property { key, value, .. } => {
                walk_prop_name(visitor, key);
                if let Some(value) = value {
                    visitor.visit_expr(value);
                }
            }
            ClassMember::StaticBlock(stmts) => walk_stmts(visitor, stmts),
        }
    }
}

pub fn walk_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT_SIZE, || walk_expr_inner(visitor, expr));
}

fn walk_expr_inner<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident(ident) => visitor.visit_ident(ident),
        Expr::Lit(_) | Expr::This | Expr::Super | Expr::ImportMeta => {}
        Expr::Template(template) => {
            for expr in &template.exprs {
                visitor.visit_expr(expr);
            }
        }
        Expr::TaggedTemplate { tag, template } => {
            visitor.visit_expr(tag);
            for expr in &template.exprs {
                visitor.visit_expr(expr);
            }
        }
        Expr::Array(elements) => {
            for element in elements.iter().flatten() {
                visitor.visit_expr(element);
            }
        }
        Expr::Object(props) => {
            for prop in props {
                match prop {
                    Prop::KeyValue { key, value } => {
                        walk_prop_name(visitor, key);
                        visitor.visit_expr(value);
                    }
                    Prop::Shorthand(ident) => visitor.visit_ident(ident),
                    Prop::Method { key, function, .. } => {
                        walk_prop_name(visitor, key);
                        visitor.visit_function(function);
                    }
                    Prop::Spread(expr) => visitor.visit_expr(expr),
                }
            }
        }
        Expr::Function(function) => visitor.visit_function(function),
        Expr::Arrow(arrow) => walk_arrow(visitor, arrow),
        Expr::Class(class) => visitor.visit_class(class),
        Expr::Unary { arg, .. }
        | Expr::Update { arg, .. }
        | Expr::Paren(arg)
        | Expr::Await(arg)
        | Expr::Spread(arg)
        | Expr::ImportCall(arg) => visitor.visit_expr(arg),
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Assign { target, value, .. } => {
            visitor.visit_pattern(target);
            visitor.visit_expr(value);
        }
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => {
            visitor.visit_expr(test);
            visitor.visit_expr(consequent);
            visitor.visit_expr(alternate);
        }
        Expr::Call { callee, args, .. } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::New { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args.iter().flatten() {
                visitor.visit_expr(arg);
            }
        }
        Expr::Member {
            object, property, ..
        } => {
            visitor.visit_expr(object);
            match property {
                MemberProp::Ident(name) => visitor.visit_name(name),
                MemberProp::Computed(expr) => visitor.visit_expr(expr),
            }
        }
        Expr::Seq(exprs) => {
            for expr in exprs {
                visitor.visit_expr(expr);
            }
        }
        Expr::Yield { arg, .. } => {
            if let Some(arg) = arg {
                visitor.visit_expr(arg);
            }
        }
    }
}

pub fn walk_pattern<V: Visit + ?Sized>(visitor: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Ident(ident) => visitor.visit_ident(ident),
        Pattern::Expr(expr) => visitor.visit_expr(expr),
        Pattern::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatternProp::KeyValue {
                        key,
                        value,
                        default,
                    } => {
                        walk_prop_name(visitor, key);
                        visitor.visit_pattern(value);
                        if let Some(default) = default {
                            visitor.visit_expr(default);
                        }
                    }
                    ObjectPatternProp::Shorthand { name, default } => {
                        visitor.visit_ident(name);
                        if let Some(default) = default {
                            visitor.visit_expr(default);
                        }
                    }
                }
            }
            if let Some(rest) = &object.rest {
                visitor.visit_pattern(rest);
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                visitor.visit_pattern(&element.target);
                if let Some(default) = &element.default {
                    visitor.visit_expr(default);
                }
            }
            if let Some(rest) = &array.rest {
                visitor.visit_pattern(rest);
            }
        }
    }
}

/// Collects the identifiers a binding pattern declares, in source order.
///
/// Default-value expressions are not descended into.
pub fn collect_binding_names(pattern: &Pattern) -> SmallVec<[&Ident; 4]> {
    let mut names = SmallVec::new();
    push_binding_names(pattern, &mut names);
    names
}

fn push_binding_names<'a>(pattern: &'a Pattern, names: &mut SmallVec<[&'a Ident; 4]>) {
    match pattern {
        Pattern::Ident(ident) => names.push(ident),
        Pattern::Expr(_) => {}
        Pattern::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatternProp::KeyValue { value, .. } => push_binding_names(value, names),
                    ObjectPatternProp::Shorthand { name, .. } => names.push(name),
                }
            }
            if let Some(rest) = &object.rest {
                push_binding_names(rest, names);
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                push_binding_names(&element.target, names);
            }
            if let Some(rest) = &array.rest {
                push_binding_names(rest, names);
            }
        }
    }
}

#[derive(Default)]
struct NameCollector {
    names: FxHashSet<String>,
}

impl Visit for NameCollector {
    fn visit_ident(&mut self, ident: &Ident) {
        if !self.names.contains(ident.as_str()) {
            self.names.insert(ident.name.clone());
        }
    }

    fn visit_name(&mut self, name: &str) {
        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
    }
}

/// Every name text that occurs anywhere in the file.
pub fn collect_identifier_names(file: &SourceFile) -> FxHashSet<String> {
    let mut collector = NameCollector::default();
    walk_source_file(&mut collector, file);
    collector.names
}

#[cfg(test)]
#[path = "../tests/walk.rs"]
mod tests;

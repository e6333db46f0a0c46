//! Builder helpers for synthesized nodes.
//!
//! Every helper returns a fresh node whose identifiers use
//! [`NodeId::SYNTHETIC`](crate::NodeId::SYNTHETIC). Transforms build their
//! output from these instead of mutating input nodes.

use crate::expr::{Expr, Function, Lit, MemberProp, Param, Prop, PropName};
use crate::node::Ident;
use crate::ops::{AssignOp, BinaryOp, UnaryOp};
use crate::pattern::Pattern;
use crate::stmt::{Modifiers, Stmt, VarDeclList, VarDeclarator, VarKind, VarStatement};

impl Expr {
    /// Create a synthetic identifier reference
    pub fn id(name: impl Into<String>) -> Self {
        Self::Ident(Ident::synthetic(name))
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::Lit(Lit::Str(s.into()))
    }

    /// Create a numeric literal from its source text
    pub fn number(n: impl Into<String>) -> Self {
        Self::Lit(Lit::Num(n.into()))
    }

    pub const fn boolean(value: bool) -> Self {
        Self::Lit(Lit::Bool(value))
    }

    /// Create `void 0`
    pub fn void_0() -> Self {
        Self::Unary {
            op: UnaryOp::Void,
            arg: Box::new(Self::number("0")),
        }
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            args,
            optional: false,
        }
    }

    /// Create a property access: `object.property`
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            property: MemberProp::Ident(property.into()),
            optional: false,
        }
    }

    /// Create an element access: `object[index]`
    pub fn elem(object: Self, index: Self) -> Self {
        Self::Member {
            object: Box::new(object),
            property: MemberProp::Computed(Box::new(index)),
            optional: false,
        }
    }

    /// Create a dotted name such as `System.register`
    pub fn dotted(path: &str) -> Self {
        let mut parts = path.split('.');
        let head = parts.next().unwrap_or_default();
        parts.fold(Self::id(head), Self::prop)
    }

    /// Create a binary expression
    pub fn binary(left: Self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a plain `target = value` assignment
    pub fn assign(target: Pattern, value: Self) -> Self {
        Self::assign_op(target, AssignOp::Assign, value)
    }

    pub fn assign_op(target: Pattern, op: AssignOp, value: Self) -> Self {
        Self::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    /// Create `name = value` for a synthetic name
    pub fn assign_name(name: impl Into<String>, value: Self) -> Self {
        Self::assign(Pattern::Ident(Ident::synthetic(name)), value)
    }

    /// Create `cond ? when_true : when_false`
    pub fn conditional(test: Self, when_true: Self, when_false: Self) -> Self {
        Self::Conditional {
            test: Box::new(test),
            consequent: Box::new(when_true),
            alternate: Box::new(when_false),
        }
    }

    pub fn not(expr: Self) -> Self {
        Self::Unary {
            op: UnaryOp::Not,
            arg: Box::new(expr),
        }
    }

    /// Combine expressions with the comma operator.
    ///
    /// A single expression is returned unchanged; an empty list yields `None`.
    pub fn seq(mut exprs: Vec<Self>) -> Option<Self> {
        match exprs.len() {
            0 => None,
            1 => exprs.pop(),
            _ => Some(Self::Seq(exprs)),
        }
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Paren(Box::new(self))
    }

    /// Create an object literal
    pub const fn object(props: Vec<Prop>) -> Self {
        Self::Object(props)
    }

    /// Create an array literal without holes
    pub fn array(elements: Vec<Self>) -> Self {
        Self::Array(elements.into_iter().map(Some).collect())
    }

    /// Create a function expression
    pub fn func_expr(name: Option<&str>, params: Vec<Param>, body: Vec<Stmt>) -> Self {
        Self::Function(Box::new(Function {
            name: name.map(Ident::synthetic),
            params,
            body,
            is_async: false,
            is_generator: false,
        }))
    }
}

impl Stmt {
    /// Create an expression statement
    pub const fn expr_stmt(expr: Expr) -> Self {
        Self::Expr(expr)
    }

    /// Create `var a, b, c;` for synthetic names
    pub fn var_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::Var(VarStatement {
            modifiers: Modifiers::NONE,
            list: VarDeclList {
                kind: VarKind::Var,
                declarations: names
                    .iter()
                    .map(|name| VarDeclarator {
                        name: Pattern::Ident(Ident::synthetic(name.as_ref())),
                        init: None,
                    })
                    .collect(),
            },
        })
    }

    /// Create `var name = init;`
    pub fn var_decl(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self::Var(VarStatement {
            modifiers: Modifiers::NONE,
            list: VarDeclList {
                kind: VarKind::Var,
                declarations: vec![VarDeclarator {
                    name: Pattern::Ident(Ident::synthetic(name)),
                    init,
                }],
            },
        })
    }

    /// Create a return statement
    pub const fn ret(expr: Option<Expr>) -> Self {
        Self::Return(expr)
    }

    /// Create a block
    pub const fn block(stmts: Vec<Self>) -> Self {
        Self::Block(stmts)
    }

    /// Create a function declaration
    pub fn func_decl(name: impl Into<String>, params: Vec<Param>, body: Vec<Self>) -> Self {
        Self::Function(crate::stmt::FunctionDecl {
            modifiers: Modifiers::NONE,
            function: Function {
                name: Some(Ident::synthetic(name)),
                params,
                body,
                is_async: false,
                is_generator: false,
            },
        })
    }

    /// Wrap a list of statements into a single statement.
    ///
    /// Used when a rewrite turns one statement into zero or several and the
    /// parent slot (a loop or `if` body) only holds one.
    pub fn lift(mut stmts: Vec<Self>) -> Self {
        match stmts.len() {
            0 => Self::Empty,
            1 => stmts.pop().unwrap_or(Self::Empty),
            _ => Self::Block(stmts),
        }
    }
}

impl Param {
    /// Create a plain identifier parameter
    pub fn ident(name: impl Into<String>) -> Self {
        Self::new(Pattern::Ident(Ident::synthetic(name)))
    }
}

impl Prop {
    /// Create a property with identifier key: `{ key: value }`
    pub fn init(key: impl Into<String>, value: Expr) -> Self {
        Self::KeyValue {
            key: PropName::Ident(key.into()),
            value,
        }
    }

    /// Create a property with string literal key: `{ "key": value }`
    pub fn init_string(key: impl Into<String>, value: Expr) -> Self {
        Self::KeyValue {
            key: PropName::Str(key.into()),
            value,
        }
    }
}

#[cfg(test)]
#[path = "../tests/factory.rs"]
mod tests;

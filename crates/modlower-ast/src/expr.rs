//! Expression nodes.

use crate::node::Ident;
use crate::ops::{AssignOp, BinaryOp, UnaryOp, UpdateOp};
use crate::pattern::Pattern;
use crate::stmt::Stmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(Ident),
    Lit(Lit),
    Template(Template),
    TaggedTemplate {
        tag: Box<Expr>,
        template: Template,
    },
    This,
    Super,
    /// `[a, , ...b]`; `None` is a hole, spreads are [`Expr::Spread`].
    Array(Vec<Option<Expr>>),
    Object(Vec<Prop>),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Class(Box<Class>),
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
    },
    Update {
        op: UpdateOp,
        prefix: bool,
        arg: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: AssignOp,
        target: Box<Pattern>,
        value: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        optional: bool,
    },
    /// `new C(args)`; `args` is `None` for `new C`.
    New {
        callee: Box<Expr>,
        args: Option<Vec<Expr>>,
    },
    Member {
        object: Box<Expr>,
        property: MemberProp,
        optional: bool,
    },
    Seq(Vec<Expr>),
    Paren(Box<Expr>),
    Yield {
        arg: Option<Box<Expr>>,
        delegate: bool,
    },
    Await(Box<Expr>),
    Spread(Box<Expr>),
    /// Dynamic `import(specifier)`.
    ImportCall(Box<Expr>),
    /// `import.meta`
    ImportMeta,
}

impl Expr {
    /// Returns the identifier if this expression is a bare identifier.
    #[must_use]
    pub const fn as_ident(&self) -> Option<&Ident> {
        match self {
            Self::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Strips any number of enclosing parentheses.
    #[must_use]
    pub fn skip_parens(&self) -> &Self {
        let mut expr = self;
        while let Self::Paren(inner) = expr {
            expr = inner;
        }
        expr
    }

    /// Text of a string literal, the only form a module specifier may take.
    #[must_use]
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Self::Lit(Lit::Str(text)) => Some(text),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Lit {
    Str(String),
    /// Numeric literal kept as source text.
    Num(String),
    Bool(bool),
    Null,
    Regex { pattern: String, flags: String },
}

/// Template literal; `quasis.len() == exprs.len() + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub quasis: Vec<String>,
    pub exprs: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberProp {
    /// `.name`
    Ident(String),
    /// `[expr]`
    Computed(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropName {
    Ident(String),
    Str(String),
    Num(String),
    Computed(Box<Expr>),
}

impl PropName {
    /// The property key as a string when it is statically known.
    #[must_use]
    pub fn static_text(&self) -> Option<&str> {
        match self {
            Self::Ident(text) | Self::Str(text) | Self::Num(text) => Some(text),
            Self::Computed(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Prop {
    KeyValue { key: PropName, value: Expr },
    Shorthand(Ident),
    Method {
        key: PropName,
        kind: MethodKind,
        function: Function,
    },
    Spread(Expr),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub pattern: Pattern,
    pub default: Option<Expr>,
    pub rest: bool,
}

impl Param {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            default: None,
            rest: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: Option<Ident>,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArrowBody {
    Block(Vec<Stmt>),
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowFunction {
    pub params: Vec<Param>,
    pub body: ArrowBody,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Class {
    pub name: Option<Ident>,
    pub super_class: Option<Box<Expr>>,
    pub members: Vec<ClassMember>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ClassMember {
    Method {
        key: PropName,
        kind: MethodKind,
        is_static: bool,
        function: Function,
    },
    Property {
        key: PropName,
        is_static: bool,
        value: Option<Expr>,
    },
    StaticBlock(Vec<Stmt>),
}

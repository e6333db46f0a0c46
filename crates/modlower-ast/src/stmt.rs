//! Statement and module-declaration nodes.

use crate::expr::{Class, Expr, Function};
use crate::node::{Ident, NodeId, Span};
use crate::pattern::Pattern;

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Var(VarStatement),
    Function(FunctionDecl),
    Class(ClassDecl),
    Import(ImportDecl),
    ImportEquals(ImportEqualsDecl),
    Export(ExportDecl),
    ExportAssignment(ExportAssignment),
    Ambient(AmbientDecl),
    Block(Vec<Stmt>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    For {
        init: Option<ForInit>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForIn {
        left: ForHead,
        right: Expr,
        body: Box<Stmt>,
    },
    ForOf {
        left: ForHead,
        right: Expr,
        body: Box<Stmt>,
        is_await: bool,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    With {
        object: Expr,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Throw(Expr),
    Break(Option<String>),
    Continue(Option<String>),
    Empty,
    Debugger,
}

/// `export` / `export default` modifiers on a declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub is_export: bool,
    pub is_default: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        is_export: false,
        is_default: false,
    };
    pub const EXPORT: Self = Self {
        is_export: true,
        is_default: false,
    };
    pub const EXPORT_DEFAULT: Self = Self {
        is_export: true,
        is_default: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }

    #[must_use]
    pub const fn is_block_scoped(self) -> bool {
        !matches!(self, Self::Var)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclList {
    pub kind: VarKind,
    pub declarations: Vec<VarDeclarator>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDeclarator {
    pub name: Pattern,
    pub init: Option<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarStatement {
    pub modifiers: Modifiers,
    pub list: VarDeclList,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub modifiers: Modifiers,
    /// `function.name` is `None` only for `export default function () {}`.
    pub function: Function,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub modifiers: Modifiers,
    /// `class.name` is `None` only for `export default class {}`.
    pub class: Class,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    pub id: NodeId,
    pub span: Span,
    /// `None` for a side-effect import: `import "m";`
    pub clause: Option<ImportClause>,
    pub specifier: Expr,
    /// `import type { T } from "m"`
    pub is_type_only: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportClause {
    pub default: Option<Ident>,
    pub bindings: Option<NamedImportBindings>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NamedImportBindings {
    /// `* as ns`
    Namespace(Ident),
    /// `{ a, b as c }`
    Named(Vec<ImportSpecifier>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportSpecifier {
    /// The exported name in the source module when it differs from `local`.
    pub imported: Option<String>,
    pub local: Ident,
    pub is_type_only: bool,
}

impl ImportSpecifier {
    /// Name of the binding in the source module.
    #[must_use]
    pub fn imported_name(&self) -> &str {
        self.imported.as_deref().unwrap_or(&self.local.name)
    }
}

/// `import x = require("m")` or `import x = a.b.c`
#[derive(Clone, Debug, PartialEq)]
pub struct ImportEqualsDecl {
    pub id: NodeId,
    pub span: Span,
    pub is_export: bool,
    pub name: Ident,
    pub reference: ModuleReference,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModuleReference {
    /// `require("m")`; holds the specifier expression.
    External(Expr),
    /// An entity name such as `a.b.c`.
    Entity(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportDecl {
    pub id: NodeId,
    pub span: Span,
    /// `None` together with `specifier: Some` is `export * from "m"`.
    pub clause: Option<ExportClause>,
    pub specifier: Option<Expr>,
    pub is_type_only: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExportClause {
    /// `{ a, b as c }`
    Named(Vec<ExportSpecifier>),
    /// `* as ns` (only valid with a module specifier)
    Namespace(Ident),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportSpecifier {
    pub id: NodeId,
    /// The local binding (or the imported name when re-exporting from a module).
    pub local: Ident,
    /// The exported name when it differs from `local`.
    pub exported: Option<String>,
    pub is_type_only: bool,
}

impl ExportSpecifier {
    /// Name under which the binding is exported.
    #[must_use]
    pub fn exported_name(&self) -> &str {
        self.exported.as_deref().unwrap_or(&self.local.name)
    }
}

/// `export default expr` or `export = expr`
#[derive(Clone, Debug, PartialEq)]
pub struct ExportAssignment {
    pub id: NodeId,
    pub span: Span,
    pub is_export_equals: bool,
    pub expression: Expr,
}

/// A declaration with no runtime form: an interface, a type alias or a
/// `declare` binding. Kept so the resolver can tell erased names apart from
/// values.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientDecl {
    pub name: Ident,
    pub is_export: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ForInit {
    Var(VarDeclList),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ForHead {
    Var(VarDeclList),
    Pattern(Pattern),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    pub param: Option<Pattern>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    /// `None` for `default:`
    pub test: Option<Expr>,
    pub consequent: Vec<Stmt>,
}

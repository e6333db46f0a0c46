//! Runtime helpers emitted into lowered modules.

use modlower_ast::{
    BinaryOp, Expr, ForHead, ForInit, Ident, Lit, Param, Pattern, Stmt, UnaryOp, UpdateOp,
    VarDeclList, VarDeclarator, VarKind,
};

/// Name the object-rest helper is bound to.
pub const REST_HELPER_NAME: &str = "__rest";

/// Whether `name` can follow a `.` in a property access.
#[must_use]
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn var_list(decls: Vec<(&str, Option<Expr>)>) -> VarDeclList {
    VarDeclList {
        kind: VarKind::Var,
        declarations: decls
            .into_iter()
            .map(|(name, init)| VarDeclarator {
                name: Pattern::Ident(Ident::synthetic(name)),
                init,
            })
            .collect(),
    }
}

fn method_call(object: Expr, path: &[&str], args: Vec<Expr>) -> Expr {
    let callee = path.iter().fold(object, |expr, name| Expr::prop(expr, *name));
    Expr::call(callee, args)
}

/// `Object.prototype.<method>.call(s, key)`
fn object_prototype_call(method: &str, key: Expr) -> Expr {
    method_call(
        Expr::dotted("Object.prototype"),
        &[method, "call"],
        vec![Expr::id("s"), key],
    )
}

/// `e.indexOf(key) < 0`
fn not_excluded(key: Expr) -> Expr {
    Expr::binary(
        method_call(Expr::id("e"), &["indexOf"], vec![key]),
        BinaryOp::Lt,
        Expr::number("0"),
    )
}

/// `t[key] = s[key];`
fn copy_property(key: &Expr) -> Stmt {
    Stmt::expr_stmt(Expr::assign(
        Pattern::Expr(Box::new(Expr::elem(Expr::id("t"), key.clone()))),
        Expr::elem(Expr::id("s"), key.clone()),
    ))
}

/// `var __rest = (this && this.__rest) || function (s, e) { ... };`
///
/// Copies the own enumerable properties (string and symbol keyed) of `s`
/// whose keys are not listed in `e`.
#[must_use]
pub fn rest_helper() -> Stmt {
    let own_string_keys = Stmt::ForIn {
        left: ForHead::Var(var_list(vec![("p", None)])),
        right: Expr::id("s"),
        body: Box::new(Stmt::If {
            test: Expr::binary(
                object_prototype_call("hasOwnProperty", Expr::id("p")),
                BinaryOp::And,
                not_excluded(Expr::id("p")),
            ),
            consequent: Box::new(copy_property(&Expr::id("p"))),
            alternate: None,
        }),
    };

    let symbol_key = Expr::elem(Expr::id("p"), Expr::id("i"));
    let own_symbol_keys = Stmt::If {
        test: Expr::binary(
            Expr::binary(Expr::id("s"), BinaryOp::NotEq, Expr::Lit(Lit::Null)),
            BinaryOp::And,
            Expr::binary(
                Expr::Unary {
                    op: UnaryOp::TypeOf,
                    arg: Box::new(Expr::dotted("Object.getOwnPropertySymbols")),
                },
                BinaryOp::EqEqEq,
                Expr::string("function"),
            ),
        ),
        consequent: Box::new(Stmt::For {
            init: Some(ForInit::Var(var_list(vec![
                ("i", Some(Expr::number("0"))),
                (
                    "p",
                    Some(method_call(
                        Expr::id("Object"),
                        &["getOwnPropertySymbols"],
                        vec![Expr::id("s")],
                    )),
                ),
            ]))),
            test: Some(Expr::binary(
                Expr::id("i"),
                BinaryOp::Lt,
                Expr::prop(Expr::id("p"), "length"),
            )),
            update: Some(Expr::Update {
                op: UpdateOp::Increment,
                prefix: false,
                arg: Box::new(Expr::id("i")),
            }),
            body: Box::new(Stmt::block(vec![Stmt::If {
                test: Expr::binary(
                    not_excluded(symbol_key.clone()),
                    BinaryOp::And,
                    object_prototype_call("propertyIsEnumerable", symbol_key.clone()),
                ),
                consequent: Box::new(copy_property(&symbol_key)),
                alternate: None,
            }])),
        }),
        alternate: None,
    };

    let function = Expr::func_expr(
        None,
        vec![Param::ident("s"), Param::ident("e")],
        vec![
            Stmt::var_decl("t", Some(Expr::object(vec![]))),
            own_string_keys,
            own_symbol_keys,
            Stmt::ret(Some(Expr::id("t"))),
        ],
    );
    let existing = Expr::binary(
        Expr::This,
        BinaryOp::And,
        Expr::prop(Expr::This, REST_HELPER_NAME),
    )
    .paren();
    Stmt::var_decl(
        REST_HELPER_NAME,
        Some(Expr::binary(existing, BinaryOp::Or, function)),
    )
}

#[cfg(test)]
#[path = "../../tests/helpers.rs"]
mod tests;

use super::*;
use crate::expr::MemberProp;
use crate::node::NodeId;

#[test]
fn test_synthetic_identifiers() {
    let Expr::Ident(ident) = Expr::id("exports_1") else {
        panic!("expected identifier");
    };
    assert_eq!(ident.name, "exports_1");
    assert!(ident.id.is_synthetic());
    assert_eq!(ident.id, NodeId::SYNTHETIC);
}

#[test]
fn test_dotted_name_builds_member_chain() {
    let expr = Expr::dotted("System.register");
    let Expr::Member {
        object, property, ..
    } = expr
    else {
        panic!("expected member access");
    };
    assert_eq!(*object, Expr::id("System"));
    assert_eq!(property, MemberProp::Ident("register".to_string()));

    assert_eq!(Expr::dotted("register"), Expr::id("register"));
}

#[test]
fn test_seq_collapses_short_lists() {
    assert_eq!(Expr::seq(vec![]), None);
    assert_eq!(Expr::seq(vec![Expr::id("a")]), Some(Expr::id("a")));
    assert_eq!(
        Expr::seq(vec![Expr::id("a"), Expr::id("b")]),
        Some(Expr::Seq(vec![Expr::id("a"), Expr::id("b")]))
    );
}

#[test]
fn test_lift_statement_list() {
    assert_eq!(Stmt::lift(vec![]), Stmt::Empty);
    assert_eq!(Stmt::lift(vec![Stmt::Debugger]), Stmt::Debugger);
    assert_eq!(
        Stmt::lift(vec![Stmt::Debugger, Stmt::Empty]),
        Stmt::Block(vec![Stmt::Debugger, Stmt::Empty])
    );
}

#[test]
fn test_var_names_declares_without_initializers() {
    let Stmt::Var(var) = Stmt::var_names(&["a", "b"]) else {
        panic!("expected var statement");
    };
    assert_eq!(var.list.kind, VarKind::Var);
    assert_eq!(var.list.declarations.len(), 2);
    assert!(var.list.declarations.iter().all(|decl| decl.init.is_none()));
}

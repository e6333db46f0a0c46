use super::*;
use crate::{AliasDeclaration, ImportBinding, ImportBindingKind, Resolver};
use modlower_ast::{
    AstBuilder, ExportAssignment, Expr, ImportEqualsDecl, Modifiers, Stmt, VarKind,
};

fn expr_ident(stmt: &Stmt) -> &Ident {
    match stmt {
        Stmt::Expr(Expr::Ident(ident)) => ident,
        other => panic!("expected identifier statement, got {other:?}"),
    }
}

fn export_assignment(stmt: &Stmt) -> &ExportAssignment {
    match stmt {
        Stmt::ExportAssignment(assignment) => assignment,
        other => panic!("expected export assignment, got {other:?}"),
    }
}

fn import_equals(stmt: &Stmt) -> &ImportEqualsDecl {
    match stmt {
        Stmt::ImportEquals(decl) => decl,
        other => panic!("expected import-equals, got {other:?}"),
    }
}

#[test]
fn test_import_bindings_resolve_to_declaration() {
    let b = AstBuilder::new();
    let import = b.import_clause(Some("d"), &[("x", "y")], "./dep");
    let Stmt::Import(decl) = &import else {
        unreachable!()
    };
    let import_id = decl.id;
    let file = b.source_file(
        "a.ts",
        vec![
            import,
            b.import_namespace("ns", "./other"),
            Stmt::Expr(b.id("y")),
            Stmt::Expr(b.id("d")),
            Stmt::Expr(b.id("ns")),
        ],
    );
    let binder = BinderState::bind(&file);

    assert_eq!(
        binder.referenced_import_declaration(expr_ident(&file.statements[2])),
        Some(ImportBinding {
            declaration: import_id,
            kind: ImportBindingKind::Named {
                imported: "x".to_string()
            },
        })
    );
    assert_eq!(
        binder
            .referenced_import_declaration(expr_ident(&file.statements[3]))
            .map(|binding| binding.kind),
        Some(ImportBindingKind::Default)
    );
    assert_eq!(
        binder
            .referenced_import_declaration(expr_ident(&file.statements[4]))
            .map(|binding| binding.kind),
        Some(ImportBindingKind::Namespace)
    );
}

#[test]
fn test_shadowed_import_is_not_an_import_reference() {
    let b = AstBuilder::new();
    // import { x } from "dep"; function f(x) { x; }
    let file = b.source_file(
        "a.ts",
        vec![
            b.import_named(&[("x", "x")], "dep"),
            b.func_decl(
                Modifiers::NONE,
                Some("f"),
                vec![b.param("x")],
                vec![Stmt::Expr(b.id("x"))],
            ),
        ],
    );
    let binder = BinderState::bind(&file);

    let Stmt::Function(decl) = &file.statements[1] else {
        unreachable!()
    };
    let inner = expr_ident(&decl.function.body[0]);
    assert_eq!(binder.referenced_import_declaration(inner), None);
    assert!(binder.symbol_of(inner).is_some());
}

#[test]
fn test_exported_bindings_report_file_container() {
    let b = AstBuilder::new();
    // export let a = 1; let b = 2; export { b }; function g() { let a; a; }
    let file = b.source_file(
        "a.ts",
        vec![
            b.export_var(VarKind::Let, "a", Some(Expr::number("1"))),
            b.var_stmt(VarKind::Let, "b", Some(Expr::number("2"))),
            b.export_named(&[("b", "b")]),
            Stmt::Expr(b.id("a")),
            Stmt::Expr(b.id("b")),
            b.func_decl(
                Modifiers::NONE,
                Some("g"),
                vec![],
                vec![
                    b.var_stmt(VarKind::Let, "a", None),
                    Stmt::Expr(b.id("a")),
                ],
            ),
        ],
    );
    let binder = BinderState::bind(&file);

    assert_eq!(
        binder.referenced_export_container(expr_ident(&file.statements[3])),
        Some(file.id)
    );
    assert_eq!(
        binder.referenced_export_container(expr_ident(&file.statements[4])),
        Some(file.id)
    );
    let Stmt::Function(decl) = &file.statements[5] else {
        unreachable!()
    };
    assert_eq!(
        binder.referenced_export_container(expr_ident(&decl.function.body[1])),
        None
    );
}

#[test]
fn test_forward_reference_resolves_to_hoisted_var() {
    let b = AstBuilder::new();
    // x; { var x = 1; }
    let file = b.source_file(
        "a.ts",
        vec![
            Stmt::Expr(b.id("x")),
            Stmt::Block(vec![b.var_stmt(VarKind::Var, "x", Some(Expr::number("1")))]),
        ],
    );
    let binder = BinderState::bind(&file);

    let Stmt::Block(block) = &file.statements[1] else {
        unreachable!()
    };
    let Stmt::Var(var) = &block[0] else {
        unreachable!()
    };
    let declaration = var.list.declarations[0]
        .name
        .as_ident()
        .map(|ident| ident.id);
    assert_eq!(
        binder.referenced_value_declaration(expr_ident(&file.statements[0])),
        declaration
    );
}

#[test]
fn test_type_only_export_specifiers_are_not_values() {
    let b = AstBuilder::new();
    let mut type_only = b.export_specifier("v", "v");
    type_only.is_type_only = true;
    let file = b.source_file(
        "a.ts",
        vec![
            b.ambient("T", false),
            b.var_stmt(VarKind::Const, "v", Some(Expr::number("0"))),
            b.export_named(&[("T", "T"), ("v", "w")]),
            b.export_specifiers(vec![type_only], None),
        ],
    );
    let binder = BinderState::bind(&file);

    let Stmt::Export(export) = &file.statements[2] else {
        unreachable!()
    };
    let Some(modlower_ast::ExportClause::Named(specifiers)) = &export.clause else {
        unreachable!()
    };
    assert!(!binder.is_value_alias_declaration(AliasDeclaration::ExportSpecifier(&specifiers[0])));
    assert!(binder.is_value_alias_declaration(AliasDeclaration::ExportSpecifier(&specifiers[1])));

    let Stmt::Export(export) = &file.statements[3] else {
        unreachable!()
    };
    let Some(modlower_ast::ExportClause::Named(specifiers)) = &export.clause else {
        unreachable!()
    };
    assert!(!binder.is_value_alias_declaration(AliasDeclaration::ExportSpecifier(&specifiers[0])));
}

#[test]
fn test_export_assignment_value_classification() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![
            b.ambient("Shape", false),
            b.export_equals(b.id("Shape")),
            b.export_default(b.id("globalThing")),
            b.export_default(Expr::number("42")),
        ],
    );
    let binder = BinderState::bind(&file);

    let assignment = |index: usize| export_assignment(&file.statements[index]);
    assert!(!binder.is_value_alias_declaration(AliasDeclaration::ExportAssignment(assignment(1))));
    assert!(binder.is_value_alias_declaration(AliasDeclaration::ExportAssignment(assignment(2))));
    assert!(binder.is_value_alias_declaration(AliasDeclaration::ExportAssignment(assignment(3))));
}

#[test]
fn test_import_equals_entity_follows_its_root() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![
            b.ambient("Types", false),
            b.import_entity("t", Expr::prop(b.id("Types"), "Inner"), false),
            b.import_entity("v", Expr::prop(b.id("ns"), "value"), true),
            b.import_require("r", "./r", false),
        ],
    );
    let binder = BinderState::bind(&file);

    let decl = |index: usize| import_equals(&file.statements[index]);
    assert!(!binder.is_value_alias_declaration(AliasDeclaration::ImportEquals(decl(1))));
    assert!(binder.is_value_alias_declaration(AliasDeclaration::ImportEquals(decl(2))));
    assert!(binder.is_value_alias_declaration(AliasDeclaration::ImportEquals(decl(3))));
}

#[test]
fn test_rebinding_discards_previous_file() {
    let b = AstBuilder::new();
    let first = b.source_file("a.ts", vec![b.var_stmt(VarKind::Var, "a", None)]);
    let second = b.source_file("b.ts", vec![]);

    let mut binder = BinderState::new();
    binder.bind_source_file(&first);
    assert_eq!(binder.stats().symbols, 1);
    binder.bind_source_file(&second);
    assert_eq!(binder.stats().symbols, 0);
    assert_eq!(binder.stats().scopes, 1);
}

use super::*;
use modlower_ast::{AstBuilder, Modifiers, VarKind};
use modlower_binder::BinderState;

fn entry_kinds(info: &ModuleInfo<'_>) -> Vec<&'static str> {
    info.external_imports
        .iter()
        .map(|entry| match entry {
            ExternalImportEntry::Import(_) => "import",
            ExternalImportEntry::ImportEquals { .. } => "import=",
            ExternalImportEntry::ExportFrom { .. } => "export-from",
        })
        .collect()
}

#[test]
fn test_external_imports_in_source_order() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![
            b.export_star("./star"),
            b.import_default("d", "./d"),
            b.import_require("r", "./r", false),
            b.import_side_effect("./side"),
            b.export_from(&[("x", "y")], "./from"),
        ],
    );
    let binder = BinderState::bind(&file);
    let info = ModuleInfo::collect(&file, &binder);

    assert_eq!(
        entry_kinds(&info),
        ["export-from", "import", "import=", "import", "export-from"]
    );
    let specifiers: Vec<_> = info
        .external_imports
        .iter()
        .filter_map(|entry| entry.specifier().as_string_literal())
        .collect();
    assert_eq!(specifiers, ["./star", "./d", "./r", "./side", "./from"]);
    assert!(info.has_export_star);
}

#[test]
fn test_type_only_imports_are_not_dependencies() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![
            b.import_type(&[("T", "T")], "./types"),
            b.import_entity("alias", Expr::prop(b.id("ns"), "inner"), false),
        ],
    );
    let binder = BinderState::bind(&file);
    let info = ModuleInfo::collect(&file, &binder);

    assert!(info.external_imports.is_empty());
    assert!(!info.has_export_star);
}

#[test]
fn test_local_export_specifiers_and_exported_bindings() {
    let b = AstBuilder::new();
    // let a = 1; export { a, a as b, T }; export const c = 2;
    let file = b.source_file(
        "a.ts",
        vec![
            b.var_stmt(VarKind::Let, "a", Some(Expr::number("1"))),
            b.ambient("T", false),
            b.export_named(&[("a", "a"), ("a", "b"), ("T", "T")]),
            b.export_var(VarKind::Const, "c", Some(Expr::number("2"))),
        ],
    );
    let binder = BinderState::bind(&file);
    let info = ModuleInfo::collect(&file, &binder);

    assert_eq!(info.export_specifiers.get("a").map(Vec::len), Some(2));
    assert!(!info.export_specifiers.contains_key("T"));

    let Stmt::Var(var) = &file.statements[0] else {
        unreachable!()
    };
    let a = var.list.declarations[0].name.as_ident().map(|ident| ident.id);
    assert_eq!(a.map(|id| info.exported_names_of(id).to_vec()), Some(vec![
        "a".to_string(),
        "b".to_string()
    ]));

    let Stmt::Var(var) = &file.statements[3] else {
        unreachable!()
    };
    let c = var.list.declarations[0].name.as_ident().map(|ident| ident.id);
    assert_eq!(c.map(|id| info.exported_names_of(id).to_vec()), Some(vec![
        "c".to_string()
    ]));
}

#[test]
fn test_functions_and_default_exports() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![
            b.func_decl(Modifiers::NONE, Some("helper"), vec![], vec![]),
            b.func_decl(Modifiers::EXPORT_DEFAULT, Some("main"), vec![], vec![]),
            b.class_decl(Modifiers::EXPORT, Some("Widget"), vec![]),
            b.export_equals(b.id("helper")),
        ],
    );
    let binder = BinderState::bind(&file);
    let info = ModuleInfo::collect(&file, &binder);

    let function_id = |index: usize| match &file.statements[index] {
        Stmt::Function(decl) => decl.function.name.as_ref().map(|name| name.id),
        _ => None,
    };
    let helper = function_id(0).unwrap();
    let main = function_id(1).unwrap();
    assert!(info.hoisted_functions.contains(&helper));
    assert!(info.hoisted_functions.contains(&main));
    assert!(info.exported_names_of(helper).is_empty());
    assert_eq!(info.exported_names_of(main), ["default".to_string()]);

    let Stmt::Class(class) = &file.statements[2] else {
        unreachable!()
    };
    let widget = class.class.name.as_ref().map(|name| name.id).unwrap();
    assert_eq!(info.exported_names_of(widget), ["Widget".to_string()]);
    assert!(info.export_equals.is_some());
}

#[test]
fn test_all_type_only_reexport_is_dropped() {
    let b = AstBuilder::new();
    let mut type_only = b.export_specifier("T", "T");
    type_only.is_type_only = true;
    let file = b.source_file(
        "a.ts",
        vec![b.export_specifiers(vec![type_only], Some("./types"))],
    );
    let binder = BinderState::bind(&file);
    let info = ModuleInfo::collect(&file, &binder);

    assert!(info.external_imports.is_empty());
}

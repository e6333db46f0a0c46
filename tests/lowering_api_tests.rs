//! Integration tests for the batch lowering API.

use modlower::ast::{AstBuilder, Expr, ImportDecl, Span, Stmt, VarKind};
use modlower::{ScriptTarget, SystemModuleOptions, lower_files, lower_files_with_json_options};

fn project(b: &AstBuilder) -> Vec<modlower::ast::SourceFile> {
    vec![
        b.source_file(
            "math.ts",
            vec![b.export_var(VarKind::Const, "pi", Some(Expr::number("3.14")))],
        ),
        b.source_file(
            "main.ts",
            vec![
                b.import_default("math", "./math"),
                Stmt::expr_stmt(Expr::call(b.id("math"), vec![])),
            ],
        ),
    ]
}

#[test]
fn test_lower_files_keeps_input_order() {
    let b = AstBuilder::new();
    let lowered = lower_files(&project(&b), SystemModuleOptions::default()).unwrap();

    assert_eq!(lowered.len(), 2);
    assert_eq!(lowered[0].file_name, "math.ts");
    assert!(lowered[0].dependencies.is_empty());
    assert!(
        lowered[0].code.contains("exports_1(\"pi\", pi = 3.14);"),
        "{}",
        lowered[0].code
    );
    assert_eq!(lowered[1].file_name, "main.ts");
    assert_eq!(lowered[1].dependencies, ["./math"]);
    assert!(lowered[1].code.contains("math_1.default();"), "{}", lowered[1].code);
}

#[test]
fn test_json_options_are_applied() {
    let b = AstBuilder::new();
    let lowered = lower_files_with_json_options(
        &project(&b),
        r#"{ "target": "es3", "registerFunction": "SystemJS.register" }"#,
    )
    .unwrap();

    assert!(lowered[1].code.starts_with("SystemJS.register([\"./math\"], "));
    assert!(lowered[1].code.contains("math_1[\"default\"]();"), "{}", lowered[1].code);
}

#[test]
fn test_invalid_json_options_are_reported() {
    let b = AstBuilder::new();
    let error = lower_files_with_json_options(&project(&b), r#"{ "target": 5 }"#).unwrap_err();
    assert!(error.to_string().contains("invalid lowering options"), "{error:#}");
}

#[test]
fn test_failure_names_the_file() {
    let b = AstBuilder::new();
    let mut files = project(&b);
    files.push(b.source_file(
        "broken.ts",
        vec![Stmt::Import(ImportDecl {
            id: b.next_id(),
            span: Span::new(0, 20),
            clause: None,
            specifier: b.id("dynamic"),
            is_type_only: false,
        })],
    ));

    let error = lower_files(&files, SystemModuleOptions::default()).unwrap_err();
    assert_eq!(error.to_string(), "failed to lower broken.ts");
    assert_eq!(
        format!("{error:#}"),
        "failed to lower broken.ts: broken.ts: module specifier at 0..20 is not a string literal"
    );
}

#[test]
fn test_single_file_and_json_report() {
    let b = AstBuilder::new();
    let files = project(&b);
    let lowered = modlower::lower_source_file(
        &files[1],
        SystemModuleOptions::default().with_target(ScriptTarget::ES5),
    )
    .unwrap();
    assert!(lowered.code.contains("math_1.default();"), "{}", lowered.code);

    let report = modlower::batch::to_json(std::slice::from_ref(&lowered)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value[0]["fileName"], "main.ts");
    assert_eq!(value[0]["dependencies"][0], "./math");
}

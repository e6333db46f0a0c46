//! Integration tests for System.register lowering through the public API.

use modlower_ast::{AstBuilder, BinaryOp, Expr, Modifiers, SourceFile, Stmt, VarKind};
use modlower_binder::BinderState;
use modlower_emitter::{LoweredModule, Printer, SystemModuleOptions, SystemModuleTransformer};

fn lower(file: &SourceFile) -> (LoweredModule, String) {
    let binder = BinderState::bind(file);
    let mut transformer = SystemModuleTransformer::new(SystemModuleOptions::default());
    let lowered = transformer
        .transform_source_file(file, &binder)
        .expect("lowering should succeed");
    let text = Printer::emit_to_string(&lowered.statement);
    (lowered, text)
}

#[test]
fn test_imports_of_one_module_share_a_setter() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "shared.ts",
        vec![
            b.import_named(&[("x", "x")], "dep"),
            b.import_default("d", "dep"),
            b.export_var(
                VarKind::Const,
                "y",
                Some(Expr::binary(b.id("x"), BinaryOp::Add, b.id("d"))),
            ),
        ],
    );

    let (lowered, text) = lower(&file);
    assert_eq!(lowered.dependencies, ["dep"]);
    assert_eq!(lowered.setter_count, 1);
    assert!(text.contains("    var dep_1, dep_2, y;\n"), "{text}");
    assert!(
        text.contains(
            "function (dep_1_1) {\n                dep_1 = dep_1_1;\n                dep_2 = dep_1_1;\n            }"
        ),
        "{text}"
    );
    assert!(
        text.contains("exports_1(\"y\", y = dep_1.x + dep_2.default);"),
        "{text}"
    );
}

#[test]
fn test_renamed_dependency_is_listed_under_its_new_name() {
    let b = AstBuilder::new();
    let file = b
        .source_file(
            "renamed.ts",
            vec![
                b.import_named(&[("x", "x")], "./lib/index"),
                Stmt::expr_stmt(Expr::call(b.id("x"), vec![])),
            ],
        )
        .with_renamed_dependency("./lib/index", "lib");

    let (lowered, text) = lower(&file);
    assert_eq!(lowered.dependencies, ["lib"]);
    assert!(text.starts_with("System.register([\"lib\"], "), "{text}");
    assert!(text.contains("function (index_1_1) {"), "{text}");
    assert!(text.contains("index_1.x();"), "{text}");
}

#[test]
fn test_export_default_expression() {
    let b = AstBuilder::new();
    let file = b.source_file("default.ts", vec![b.export_default(Expr::number("42"))]);

    let (lowered, text) = lower(&file);
    assert!(lowered.dependencies.is_empty());
    assert!(
        text.contains("        execute: function () {\n            exports_1(\"default\", 42);\n        }"),
        "{text}"
    );
}

#[test]
fn test_namespace_reexport_and_side_effect_import() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "mixed.ts",
        vec![
            b.import_side_effect("./setup"),
            b.export_star_as("utils", "./utils"),
        ],
    );

    let (lowered, text) = lower(&file);
    assert_eq!(lowered.dependencies, ["./setup", "./utils"]);
    assert!(
        text.contains("function (_1) {\n            },"),
        "{text}"
    );
    assert!(
        text.contains(
            "function (utils_1) {\n                exports_1(\"utils\", utils_1);\n            }"
        ),
        "{text}"
    );
}

#[test]
fn test_output_is_deterministic() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "stable.ts",
        vec![
            b.import_namespace("ns", "./ns"),
            b.export_star("./all"),
            b.export_var(VarKind::Let, "count", Some(Expr::prop(b.id("ns"), "start"))),
        ],
    );

    let (_, first) = lower(&file);
    let (_, second) = lower(&file);
    assert_eq!(first, second);
    assert!(first.contains("exports_1(\"count\", count = ns.start);"), "{first}");
}

#[test]
fn test_round_trip_shape() {
    let b = AstBuilder::new();
    // import { x } from "dep"; export function f() { return x; }
    let file = b.source_file(
        "shape.ts",
        vec![
            b.import_named(&[("x", "x")], "dep"),
            b.func_decl(
                Modifiers::EXPORT,
                Some("f"),
                vec![],
                vec![Stmt::ret(Some(b.id("x")))],
            ),
        ],
    );

    let (lowered, text) = lower(&file);
    assert_eq!(lowered.dependencies, ["dep"]);
    let expected = r#"System.register(["dep"], function (exports_1, context_1) {
    "use strict";
    var dep_1;
    var __moduleName = context_1 && context_1.id;
    function f() {
        return dep_1.x;
    }
    exports_1("f", f);
    return {
        setters: [
            function (dep_1_1) {
                dep_1 = dep_1_1;
            }
        ],
        execute: function () {
        }
    };
});"#;
    assert_eq!(text, expected);
}

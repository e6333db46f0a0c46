use super::*;
use crate::printer::Printer;
use modlower_ast::{AstBuilder, VarKind};

fn context_with(names: &[&str]) -> EmitContext {
    EmitContext::new(names.iter().map(|name| (*name).to_string()).collect())
}

#[test]
fn test_unique_name_skips_names_in_file() {
    let mut ctx = context_with(&["dep_1", "dep_2"]);
    assert_eq!(ctx.unique_name("dep"), "dep_3");
    assert_eq!(ctx.unique_name("dep"), "dep_4");
    assert_eq!(ctx.unique_name("exports"), "exports_1");
}

#[test]
fn test_unique_name_empty_base() {
    let mut ctx = context_with(&[]);
    assert_eq!(ctx.unique_name(""), "_1");
    assert_eq!(ctx.unique_name(""), "_2");
}

#[test]
fn test_temp_names_are_letters_then_numbers() {
    let mut ctx = context_with(&["_b"]);
    assert_eq!(ctx.temp_name(), "_a");
    assert_eq!(ctx.temp_name(), "_c");
    for _ in 0..23 {
        ctx.temp_name();
    }
    assert_eq!(ctx.temp_name(), "_27");
}

#[test]
fn test_generated_names_never_collide_with_each_other() {
    let mut ctx = context_with(&[]);
    // `_1` from an empty base must not be reissued as a temporary.
    assert_eq!(ctx.unique_name(""), "_1");
    assert!(ctx.is_name_used("_1"));
}

#[test]
fn test_for_source_file_collects_identifiers() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![b.var_stmt(VarKind::Var, "exports_1", None)],
    );
    let mut ctx = EmitContext::for_source_file(&file);
    assert_eq!(ctx.unique_name("exports"), "exports_2");
}

#[test]
fn test_lexical_environment_merges_repeated_names() {
    let mut ctx = context_with(&[]);
    ctx.start_lexical_environment();
    ctx.hoist_variable_declaration("a");
    ctx.hoist_variable_declaration("b");
    ctx.hoist_variable_declaration("a");
    ctx.hoist_function_declaration(Stmt::func_decl("f", vec![], vec![]));

    let statements = ctx.end_lexical_environment();
    assert_eq!(
        Printer::print_statements(&statements),
        "var a, b;\nfunction f() {\n}\n"
    );
    assert_eq!(ctx.environment_depth(), 0);
}

#[test]
fn test_temporaries_go_to_innermost_environment() {
    let mut ctx = context_with(&[]);
    ctx.start_lexical_environment();
    ctx.hoist_variable_declaration("outer");
    ctx.start_lexical_environment();
    let temp = ctx.create_temp_variable();
    assert_eq!(temp, "_a");

    let inner = ctx.end_lexical_environment();
    assert_eq!(Printer::print_statements(&inner), "var _a;\n");
    let (vars, functions) = ctx.end_lexical_environment_split();
    assert_eq!(
        vars.as_ref().map(Printer::emit_to_string).as_deref(),
        Some("var outer;")
    );
    assert!(functions.is_empty());
}

#[test]
fn test_empty_environment_produces_nothing() {
    let mut ctx = context_with(&[]);
    ctx.start_lexical_environment();
    assert!(ctx.end_lexical_environment().is_empty());
    assert!(ctx.end_lexical_environment().is_empty());
}

#[test]
fn test_unique_name_does_not_double_trailing_underscore() {
    let mut ctx = context_with(&[]);
    assert_eq!(ctx.unique_name("dep_"), "dep_1");
    assert_eq!(ctx.unique_name("dep"), "dep_2");
}

use super::*;
use modlower_ast::{
    ArrowBody, ArrowFunction, AssignOp, AstBuilder, BinaryOp, Expr, Lit, Modifiers,
    ObjectPattern, ObjectPatternProp, Param, Pattern, Prop, PropName, UnaryOp, UpdateOp, VarKind,
};

fn print(expr: &Expr) -> String {
    Printer::emit_to_string(expr)
}

#[test]
fn test_string_literals_are_double_quoted_and_escaped() {
    assert_eq!(print(&Expr::string("plain")), "\"plain\"");
    assert_eq!(
        print(&Expr::string("say \"hi\"\\\n\t\u{1}")),
        "\"say \\\"hi\\\"\\\\\\n\\t\\u0001\""
    );
}

#[test]
fn test_binary_precedence_adds_only_needed_parens() {
    // (a + b) * c
    let sum = Expr::binary(Expr::id("a"), BinaryOp::Add, Expr::id("b"));
    assert_eq!(
        print(&Expr::binary(sum.clone(), BinaryOp::Mul, Expr::id("c"))),
        "(a + b) * c"
    );
    // a - (b - c) keeps the right-hand grouping
    let diff = Expr::binary(Expr::id("b"), BinaryOp::Sub, Expr::id("c"));
    assert_eq!(
        print(&Expr::binary(Expr::id("a"), BinaryOp::Sub, diff)),
        "a - (b - c)"
    );
    // c * a + b needs none
    let product = Expr::binary(Expr::id("c"), BinaryOp::Mul, Expr::id("a"));
    assert_eq!(
        print(&Expr::binary(product, BinaryOp::Add, Expr::id("b"))),
        "c * a + b"
    );
}

#[test]
fn test_nullish_mixed_with_logical_operators_is_parenthesized() {
    let or = Expr::binary(Expr::id("a"), BinaryOp::Or, Expr::id("b"));
    assert_eq!(
        print(&Expr::binary(or, BinaryOp::Nullish, Expr::id("c"))),
        "(a || b) ?? c"
    );
}

#[test]
fn test_assignment_inside_call_argument_and_sequence() {
    let assign = Expr::assign_name("x", Expr::number("1"));
    let call = Expr::call(
        Expr::id("exports_1"),
        vec![Expr::string("x"), assign.clone()],
    );
    assert_eq!(print(&call), "exports_1(\"x\", x = 1)");

    let seq = Expr::Seq(vec![assign, Expr::id("y")]);
    let sum = Expr::binary(seq, BinaryOp::Add, Expr::number("2"));
    assert_eq!(print(&sum), "(x = 1, y) + 2");
}

#[test]
fn test_postfix_and_unary_operators() {
    let b = AstBuilder::new();
    let postfix = b.update("n", UpdateOp::Increment, false);
    assert_eq!(print(&postfix), "n++");

    let negated = Expr::Unary {
        op: UnaryOp::Minus,
        arg: Box::new(Expr::Unary {
            op: UnaryOp::Minus,
            arg: Box::new(Expr::id("x")),
        }),
    };
    assert_eq!(print(&negated), "- -x");
    assert_eq!(print(&Expr::void_0()), "void 0");

    let bumped = Expr::binary(
        Expr::assign_op(Pattern::Ident(b.ident("n")), AssignOp::AddAssign, Expr::number("1")),
        BinaryOp::Sub,
        Expr::number("1"),
    );
    assert_eq!(print(&bumped), "(n += 1) - 1");
}

#[test]
fn test_member_access_on_numbers_and_calls() {
    let on_number = Expr::call(Expr::prop(Expr::number("1"), "toString"), vec![]);
    assert_eq!(print(&on_number), "(1).toString()");

    let element = Expr::elem(Expr::id("m_1"), Expr::string("default"));
    assert_eq!(print(&element), "m_1[\"default\"]");

    let new_of_call = Expr::New {
        callee: Box::new(Expr::call(Expr::id("factory"), vec![])),
        args: Some(vec![]),
    };
    assert_eq!(print(&new_of_call), "new (factory())()");
}

#[test]
fn test_objects_print_one_property_per_line() {
    let object = Expr::object(vec![
        Prop::init_string("a", Expr::boolean(true)),
        Prop::init("b", Expr::Lit(Lit::Null)),
    ]);
    assert_eq!(print(&object), "{\n    \"a\": true,\n    b: null\n}");
    assert_eq!(print(&Expr::object(vec![])), "{}");
}

#[test]
fn test_arrays_with_functions_break_lines() {
    let setter = Expr::func_expr(
        None,
        vec![Param::ident("m")],
        vec![Stmt::expr_stmt(Expr::assign_name("a", Expr::id("m")))],
    );
    let array = Expr::array(vec![setter]);
    assert_eq!(
        print(&array),
        "[\n    function (m) {\n        a = m;\n    }\n]"
    );
    assert_eq!(
        print(&Expr::array(vec![Expr::string("a"), Expr::string("b")])),
        "[\"a\", \"b\"]"
    );
}

#[test]
fn test_statement_starting_with_object_or_function_is_parenthesized() {
    let b = AstBuilder::new();
    let pattern = Pattern::Object(ObjectPattern {
        props: vec![ObjectPatternProp::Shorthand {
            name: b.ident("a"),
            default: None,
        }],
        rest: None,
    });
    let assign = Stmt::expr_stmt(Expr::assign(pattern, Expr::id("o")));
    assert_eq!(Printer::emit_to_string(&assign), "({ a } = o);");

    let iife = Stmt::expr_stmt(Expr::call(Expr::func_expr(None, vec![], vec![]), vec![]));
    assert_eq!(Printer::emit_to_string(&iife), "(function () {\n}());");

    let call = Stmt::expr_stmt(Expr::call(Expr::id("functionName"), vec![]));
    assert_eq!(Printer::emit_to_string(&call), "functionName();");
}

#[test]
fn test_arrow_with_object_body() {
    let arrow = Expr::Arrow(Box::new(ArrowFunction {
        params: vec![Param::ident("x")],
        body: ArrowBody::Expr(Box::new(Expr::object(vec![]))),
        is_async: false,
    }));
    assert_eq!(print(&arrow), "(x) => ({})");
}

#[test]
fn test_statement_list_skips_ambient_declarations() {
    let b = AstBuilder::new();
    let statements = vec![
        b.ambient("Shape", true),
        b.var_stmt(VarKind::Let, "x", Some(Expr::number("1"))),
        Stmt::If {
            test: b.id("x"),
            consequent: Box::new(Stmt::block(vec![Stmt::Return(None)])),
            alternate: Some(Box::new(Stmt::Break(None))),
        },
    ];
    assert_eq!(
        Printer::print_statements(&statements),
        "let x = 1;\nif (x) {\n    return;\n} else break;\n"
    );
}

#[test]
fn test_module_syntax_round_trips() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "m.ts",
        vec![
            b.import_clause(Some("d"), &[("a", "b")], "./dep"),
            b.export_from(&[("x", "y")], "./other"),
            b.export_star_as("ns", "./ns"),
            b.func_decl(Modifiers::EXPORT_DEFAULT, None, vec![], vec![]),
        ],
    );
    assert_eq!(
        Printer::emit_to_string(&file),
        "import d, { a as b } from \"./dep\";\n\
         export { x as y } from \"./other\";\n\
         export * as ns from \"./ns\";\n\
         export default function () {\n}\n"
    );
}

#[test]
fn test_computed_keys_and_class_members() {
    let b = AstBuilder::new();
    let object = Expr::object(vec![Prop::KeyValue {
        key: PropName::Computed(Box::new(b.id("key"))),
        value: Expr::number("1"),
    }]);
    assert_eq!(print(&object), "{\n    [key]: 1\n}");

    let class = b.class_decl(
        Modifiers::NONE,
        Some("Point"),
        vec![modlower_ast::ClassMember::Property {
            key: PropName::Ident("x".to_string()),
            is_static: true,
            value: Some(Expr::number("0")),
        }],
    );
    assert_eq!(
        Printer::emit_to_string(&class),
        "class Point {\n    static x = 0;\n}"
    );
}

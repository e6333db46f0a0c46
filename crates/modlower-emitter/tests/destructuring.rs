use super::*;
use crate::options::SystemModuleOptions;
use crate::printer::Printer;
use crate::transforms::module_system::SystemModuleTransformer;
use modlower_ast::{
    ArrayPatternElement, AstBuilder, Ident, Modifiers, ObjectPatternProp, SourceFile, Stmt,
    VarKind,
};
use modlower_binder::BinderState;

fn lower(file: &SourceFile) -> Result<String, TransformError> {
    let binder = BinderState::bind(file);
    let mut transformer = SystemModuleTransformer::new(SystemModuleOptions::default());
    let lowered = transformer.transform_source_file(file, &binder)?;
    Ok(Printer::emit_to_string(&lowered.statement))
}

fn shorthand(name: Ident) -> ObjectPatternProp {
    ObjectPatternProp::Shorthand {
        name,
        default: None,
    }
}

fn element(target: Pattern) -> Option<ArrayPatternElement> {
    Some(ArrayPatternElement {
        target,
        default: None,
    })
}

#[test]
fn test_exported_leaves_are_published_one_by_one() {
    let b = AstBuilder::new();
    // export var { a, b: [c = 1] } = obj;
    let pattern = Pattern::Object(ObjectPattern {
        props: vec![
            shorthand(b.ident("a")),
            ObjectPatternProp::KeyValue {
                key: PropName::Ident("b".to_string()),
                value: Pattern::Array(ArrayPattern {
                    elements: vec![Some(ArrayPatternElement {
                        target: b.binding("c"),
                        default: Some(Expr::number("1")),
                    })],
                    rest: None,
                }),
                default: None,
            },
        ],
        rest: None,
    });
    let file = b.source_file(
        "a.ts",
        vec![b.var(VarKind::Var, Modifiers::EXPORT, vec![(pattern, Some(b.id("obj")))])],
    );

    let text = lower(&file).unwrap();
    assert!(text.contains("    var a, c, _a;\n"), "{text}");
    assert!(
        text.contains(
            "exports_1(\"a\", a = obj.a), _a = obj.b[0], exports_1(\"c\", c = _a === void 0 ? 1 : _a);"
        ),
        "{text}"
    );
}

#[test]
fn test_object_rest_uses_helper() {
    let b = AstBuilder::new();
    // const { x, ...others } = source;
    let pattern = Pattern::Object(ObjectPattern {
        props: vec![shorthand(b.ident("x"))],
        rest: Some(Box::new(b.binding("others"))),
    });
    let file = b.source_file(
        "a.ts",
        vec![b.var(VarKind::Const, Modifiers::NONE, vec![(pattern, Some(b.id("source")))])],
    );

    let text = lower(&file).unwrap();
    assert!(
        text.contains("x = source.x, others = __rest(source, [\"x\"]);"),
        "{text}"
    );
    assert!(
        text.contains("    var __rest = (this && this.__rest) || function (s, e) {\n"),
        "{text}"
    );
}

#[test]
fn test_object_rest_with_computed_key() {
    let b = AstBuilder::new();
    // const { [key]: v, ...r } = o;
    let pattern = Pattern::Object(ObjectPattern {
        props: vec![ObjectPatternProp::KeyValue {
            key: PropName::Computed(Box::new(b.id("key"))),
            value: b.binding("v"),
            default: None,
        }],
        rest: Some(Box::new(b.binding("r"))),
    });
    let file = b.source_file(
        "a.ts",
        vec![b.var(VarKind::Const, Modifiers::NONE, vec![(pattern, Some(b.id("o")))])],
    );

    let text = lower(&file).unwrap();
    assert!(
        text.contains(
            "v = o[key], r = __rest(o, [typeof key === \"symbol\" ? key : key + \"\"]);"
        ),
        "{text}"
    );
}

#[test]
fn test_array_holes_and_rest() {
    let b = AstBuilder::new();
    // let [first, , ...tail] = list;
    let pattern = Pattern::Array(ArrayPattern {
        elements: vec![element(b.binding("first")), None],
        rest: Some(Box::new(b.binding("tail"))),
    });
    let file = b.source_file(
        "a.ts",
        vec![b.var(VarKind::Let, Modifiers::NONE, vec![(pattern, Some(b.id("list")))])],
    );

    let text = lower(&file).unwrap();
    assert!(text.contains("first = list[0], tail = list.slice(2);"), "{text}");
    assert!(!text.contains("__rest"), "{text}");
}

#[test]
fn test_value_rebound_by_pattern_is_copied_first() {
    let b = AstBuilder::new();
    // export let a, b; ({ a, b } = a);
    let pattern = Pattern::Object(ObjectPattern {
        props: vec![shorthand(b.ident("a")), shorthand(b.ident("b"))],
        rest: None,
    });
    let file = b.source_file(
        "a.ts",
        vec![
            b.var(
                VarKind::Let,
                Modifiers::EXPORT,
                vec![(b.binding("a"), None), (b.binding("b"), None)],
            ),
            Stmt::expr_stmt(Expr::assign(pattern, b.id("a"))),
        ],
    );

    let text = lower(&file).unwrap();
    assert!(
        text.contains("_a = a, exports_1(\"a\", a = _a.a), exports_1(\"b\", b = _a.b);"),
        "{text}"
    );
}

#[test]
fn test_pattern_nesting_limit() {
    let b = AstBuilder::new();
    let mut pattern = b.binding("leaf");
    for _ in 0..=MAX_BINDING_PATTERN_DEPTH + 1 {
        pattern = Pattern::Array(ArrayPattern {
            elements: vec![element(pattern)],
            rest: None,
        });
    }
    let file = b.source_file(
        "deep.ts",
        vec![b.var(VarKind::Var, Modifiers::NONE, vec![(pattern, Some(b.id("v")))])],
    );

    assert_eq!(
        lower(&file).unwrap_err(),
        TransformError::MaxDepthExceeded {
            file: "deep.ts".to_string()
        }
    );
}

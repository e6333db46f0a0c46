use super::*;
use crate::builder::AstBuilder;
use crate::pattern::{ArrayPattern, ArrayPatternElement, ObjectPattern};
use crate::stmt::{Modifiers, VarKind};

fn names<'a>(idents: impl IntoIterator<Item = &'a Ident>) -> Vec<&'a str> {
    idents.into_iter().map(Ident::as_str).collect()
}

#[test]
fn test_collect_binding_names_in_source_order() {
    let b = AstBuilder::new();
    // { a, b: [c, , d = 1], ...e }
    let pattern = Pattern::Object(ObjectPattern {
        props: vec![
            ObjectPatternProp::Shorthand {
                name: b.ident("a"),
                default: None,
            },
            ObjectPatternProp::KeyValue {
                key: PropName::Ident("b".to_string()),
                value: Pattern::Array(ArrayPattern {
                    elements: vec![
                        Some(ArrayPatternElement {
                            target: b.binding("c"),
                            default: None,
                        }),
                        None,
                        Some(ArrayPatternElement {
                            target: b.binding("d"),
                            default: Some(b.id("fallback")),
                        }),
                    ],
                    rest: None,
                }),
                default: None,
            },
        ],
        rest: Some(Box::new(b.binding("e"))),
    });

    assert_eq!(
        names(collect_binding_names(&pattern)),
        vec!["a", "c", "d", "e"]
    );
}

#[test]
fn test_collect_binding_names_skips_member_targets() {
    let b = AstBuilder::new();
    let pattern = Pattern::Expr(Box::new(Expr::prop(b.id("o"), "x")));
    assert!(collect_binding_names(&pattern).is_empty());
}

#[test]
fn test_collect_identifier_names_covers_nested_scopes() {
    let b = AstBuilder::new();
    let file = b.source_file(
        "a.ts",
        vec![
            b.import_named(&[("x", "y")], "./dep"),
            b.func_decl(
                Modifiers::EXPORT,
                Some("f"),
                vec![b.param("p")],
                vec![b.var_stmt(VarKind::Let, "inner", Some(Expr::prop(b.id("p"), "field")))],
            ),
        ],
    );

    let used = collect_identifier_names(&file);
    for name in ["x", "y", "f", "p", "inner", "field"] {
        assert!(used.contains(name), "missing {name}");
    }
    assert!(!used.contains("exports_1"));
}

#[test]
fn test_builder_allocates_distinct_ids() {
    let b = AstBuilder::new();
    let first = b.ident("a");
    let second = b.ident("a");
    assert_ne!(first.id, second.id);
    assert!(!first.id.is_synthetic());
}

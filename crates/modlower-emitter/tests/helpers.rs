use super::*;
use crate::printer::Printer;

#[test]
fn test_identifier_names() {
    assert!(is_identifier_name("value"));
    assert!(is_identifier_name("_private"));
    assert!(is_identifier_name("$el2"));
    assert!(is_identifier_name("ünïcode"));
    assert!(!is_identifier_name(""));
    assert!(!is_identifier_name("2fast"));
    assert!(!is_identifier_name("with-dash"));
    assert!(!is_identifier_name("has space"));
}

#[test]
fn test_rest_helper_text() {
    let text = Printer::emit_to_string(&rest_helper());
    assert!(
        text.starts_with("var __rest = (this && this.__rest) || function (s, e) {\n"),
        "{text}"
    );
    assert!(text.contains("    var t = {};\n"), "{text}");
    assert!(
        text.contains(
            "for (var p in s) if (Object.prototype.hasOwnProperty.call(s, p) && e.indexOf(p) < 0) t[p] = s[p];"
        ),
        "{text}"
    );
    assert!(
        text.contains(
            "if (s != null && typeof Object.getOwnPropertySymbols === \"function\") for (var i = 0, p = Object.getOwnPropertySymbols(s); i < p.length; i++) {"
        ),
        "{text}"
    );
    assert!(text.ends_with("    return t;\n};"), "{text}");
}

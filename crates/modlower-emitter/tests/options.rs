use super::*;

#[test]
fn test_defaults() {
    let options = SystemModuleOptions::default();
    assert_eq!(options.target, ScriptTarget::ESNext);
    assert_eq!(options.register_function, "System.register");
    assert!(options.emit_use_strict);
    assert!(options.emit_module_name_binding);
}

#[test]
fn test_from_json_fills_missing_fields() {
    let options =
        SystemModuleOptions::from_json(r#"{ "target": "es3", "emitUseStrict": false }"#).unwrap();
    assert_eq!(options.target, ScriptTarget::ES3);
    assert!(!options.emit_use_strict);
    assert_eq!(options.register_function, "System.register");
    assert!(options.emit_module_name_binding);
}

#[test]
fn test_from_json_rejects_unknown_target() {
    assert!(SystemModuleOptions::from_json(r#"{ "target": "es1" }"#).is_err());
}

#[test]
fn test_serializes_camel_case() {
    let json = serde_json::to_value(SystemModuleOptions::default()).unwrap();
    assert_eq!(json["registerFunction"], "System.register");
    assert_eq!(json["emitModuleNameBinding"], true);
}

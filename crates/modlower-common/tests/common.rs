use super::*;

#[test]
fn test_default_target_is_esnext() {
    assert_eq!(ScriptTarget::default(), ScriptTarget::ESNext);
}

#[test]
fn test_target_ordering() {
    assert!(ScriptTarget::ES3 < ScriptTarget::ES5);
    assert!(ScriptTarget::ES2015 < ScriptTarget::ESNext);
    assert!(ScriptTarget::ES3.is_es3());
    assert!(!ScriptTarget::ES5.is_es3());
}

#[test]
fn test_target_deserializes_lowercase() {
    let target: ScriptTarget = serde_json::from_str("\"es3\"").unwrap();
    assert_eq!(target, ScriptTarget::ES3);
    let target: ScriptTarget = serde_json::from_str("\"esnext\"").unwrap();
    assert_eq!(target, ScriptTarget::ESNext);
}

use gateway_errors::{FormattedError, PathSegment, SourceLocation};
use serde_json::json;

#[test]
fn internal_server_error_shape() {
    let err = FormattedError::internal_server_error();
    assert_eq!(err.message, "Internal server error");
    assert_eq!(err.code(), Some("INTERNAL_SERVER_ERROR"));
    assert!(err.locations.is_none());
    assert!(err.path.is_none());
    assert_eq!(err.extensions.as_ref().map(|e| e.len()), Some(1));
}

#[test]
fn absent_fields_are_omitted_when_serialized() {
    let err = FormattedError::new("boom");
    assert_eq!(serde_json::to_value(&err).unwrap(), json!({ "message": "boom" }));
}

#[test]
fn full_record_serializes_all_four_fields() {
    let err = FormattedError {
        message: "bad".into(),
        locations: Some(vec![SourceLocation::new(1, 2)]),
        path: Some(vec![PathSegment::key("users"), PathSegment::index(3)]),
        extensions: None,
    }
    .with_extension("code", "BAD_USER_INPUT");

    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({
            "message": "bad",
            "locations": [{ "line": 1, "column": 2 }],
            "path": ["users", 3],
            "extensions": { "code": "BAD_USER_INPUT" },
        })
    );
}

#[test]
fn deserializes_mixed_path_segments() {
    let err: FormattedError =
        serde_json::from_value(json!({ "message": "x", "path": ["a", 0, "b"] })).unwrap();
    assert_eq!(
        err.path,
        Some(vec![PathSegment::key("a"), PathSegment::index(0), PathSegment::key("b")])
    );
    assert!(err.extensions.is_none());
}

#[test]
fn code_ignores_non_string_values() {
    let err = FormattedError::new("x").with_extension("code", 500);
    assert_eq!(err.code(), None);
    assert_eq!(err.extension("code"), Some(&json!(500)));
}

#[test]
fn display_includes_code_when_present() {
    assert_eq!(FormattedError::internal_server_error().to_string(), "Internal server error (INTERNAL_SERVER_ERROR)");
    assert_eq!(FormattedError::new("plain").to_string(), "plain");
}

use gateway_errors::GenericException;
use serde_json::json;
use std::io;

#[test]
fn defaults_to_error_name() {
    let ex = GenericException::new("boom");
    assert_eq!(ex.name(), "Error");
    assert_eq!(ex.message(), "boom");
    assert!(ex.fields().is_empty());
}

#[test]
fn stack_falls_back_to_header() {
    let ex = GenericException::new("boom").with_name("TypeError");
    assert_eq!(ex.stack(), "TypeError: boom");

    let unnamed_message = GenericException::new("");
    assert_eq!(unnamed_message.stack(), "Error");
}

#[test]
fn explicit_stack_wins() {
    let ex = GenericException::new("boom").with_stack("Error: boom\n    at resolver");
    assert_eq!(ex.stack(), "Error: boom\n    at resolver");
}

#[test]
fn from_error_copies_message_and_starts_stack_with_header() {
    let io_err = io::Error::new(io::ErrorKind::Other, "disk full");
    let ex = GenericException::from_error(&io_err);

    assert_eq!(ex.message(), "disk full");
    assert!(ex.stack().starts_with("Error: disk full"));
}

#[test]
fn extensions_field_only_reads_objects() {
    let with_object = GenericException::new("x").with_field("extensions", json!({ "code": "X" }));
    assert_eq!(with_object.extensions_field().unwrap()["code"], "X");

    let with_string = GenericException::new("x").with_field("extensions", "nope");
    assert!(with_string.extensions_field().is_none());
}

use gateway_errors::{GenericException, RawFailure, StructuredError, ThrownValue};
use serde_json::{json, Value};

#[test]
fn conversions_pick_the_right_variant() {
    assert!(RawFailure::from(StructuredError::new("x")).is_structured());
    assert!(RawFailure::from(GenericException::new("x")).is_exception());
    assert!(RawFailure::from("x").is_opaque());
    assert!(RawFailure::from(json!({ "a": 1 })).is_opaque());
    assert!(RawFailure::undefined().is_opaque());
}

#[test]
fn opaque_values_stringify() {
    assert_eq!(RawFailure::from("text").to_string(), "text");
    assert_eq!(RawFailure::from(42).to_string(), "42");
    assert_eq!(RawFailure::from(1.5).to_string(), "1.5");
    assert_eq!(RawFailure::from(-0.0).to_string(), "0");
    assert_eq!(RawFailure::from(true).to_string(), "true");
    assert_eq!(RawFailure::from(Value::Null).to_string(), "null");
    assert_eq!(RawFailure::undefined().to_string(), "undefined");
    assert_eq!(RawFailure::from(json!([1, "a"])).to_string(), r#"[1,"a"]"#);
    assert_eq!(RawFailure::from(json!({ "k": "v" })).to_string(), r#"{"k":"v"}"#);
}

#[test]
fn optional_value_maps_none_to_undefined() {
    assert_eq!(ThrownValue::from(None::<Value>), ThrownValue::Undefined);
    assert_eq!(ThrownValue::from(Some(json!(1))), ThrownValue::Json(json!(1)));
}

#[test]
fn floats_keep_non_finite_values() {
    assert_eq!(ThrownValue::from(f64::NAN).to_string(), "NaN");
    assert_eq!(ThrownValue::from(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(ThrownValue::from(3.0).to_string(), "3");
    assert_eq!(RawFailure::from(f64::INFINITY), RawFailure::Opaque(ThrownValue::Number(f64::INFINITY)));
}

#[test]
fn message_only_for_error_like_failures() {
    assert_eq!(RawFailure::from(StructuredError::new("s")).message(), Some("s"));
    assert_eq!(RawFailure::from(GenericException::new("g")).message(), Some("g"));
    assert_eq!(RawFailure::from("o").message(), None);
}

#[test]
fn from_error_wraps_std_errors_as_exceptions() {
    let err = "nope".parse::<u32>().unwrap_err();
    let failure = RawFailure::from_error(&err);

    assert!(failure.is_exception());
    assert_eq!(failure.message(), Some(err.to_string().as_str()));
}

use gateway_errors::gateway::{ExecutionResult, GatewayResponse};
use gateway_errors::{GenericException, NormalizationOptions, StructuredError};
use serde_json::json;

#[test]
fn successful_execution_has_no_errors_key() {
    let result = ExecutionResult::from_data(json!({ "hello": "world" }));
    let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());

    assert!(response.errors.is_none());
    assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "data": { "hello": "world" } }));
}

#[test]
fn execution_errors_are_normalized_in_order() {
    let result = ExecutionResult::from_data(json!({ "a": null, "b": null }))
        .with_error(StructuredError::new("a failed").with_path(["a"]))
        .with_error(GenericException::new("b failed").with_field("retry", false));

    let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "data": { "a": null, "b": null },
            "errors": [
                { "message": "a failed", "path": ["a"], "extensions": { "code": "INTERNAL_SERVER_ERROR" } },
                {
                    "message": "b failed",
                    "extensions": { "code": "INTERNAL_SERVER_ERROR", "exception": { "retry": false } }
                },
            ],
        })
    );
}

#[test]
fn failed_execution_has_null_data() {
    let result = ExecutionResult::from_failure("executor unavailable");
    let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());

    assert!(response.data.is_none());
    let errors = response.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected error value: executor unavailable");
}

#[test]
fn extensions_are_carried_over() {
    let mut result = ExecutionResult::from_data(json!(null));
    result.extensions = Some(gateway_errors::extensions! { "cost" => 3 });

    let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());
    assert_eq!(response.extensions.unwrap()["cost"], 3);
}

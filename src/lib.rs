//! Normalizes whatever a request's execution threw into stable, client-safe
//! error records, and declares the contract between a hosting server and a
//! query-execution gateway.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `gateway_errors::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Normalizing a batch of failures
//!
//! ```
//! use gateway_errors::{normalize_and_format_errors, NormalizationOptions, RawFailure};
//!
//! let failures = vec![RawFailure::from("plain string"), RawFailure::undefined()];
//! let formatted = normalize_and_format_errors(&failures, &NormalizationOptions::new());
//!
//! assert_eq!(formatted[0].message, "Unexpected error value: plain string");
//! assert_eq!(formatted[1].message, "Unexpected error value: undefined");
//! assert!(formatted.iter().all(|e| e.code() == Some("INTERNAL_SERVER_ERROR")));
//! ```
//!
//! ## Containing a failing format hook
//!
//! ```
//! use gateway_errors::{
//!     normalize_and_format_errors, FormattedError, GenericException, NormalizationOptions,
//!     RawFailure,
//! };
//!
//! let options = NormalizationOptions::new()
//!     .with_format_error(|_: FormattedError, _: &RawFailure| Err("hook broke".into()));
//!
//! let failures = vec![RawFailure::from(GenericException::new("db password rejected"))];
//! let formatted = normalize_and_format_errors(&failures, &options);
//!
//! assert_eq!(formatted[0], FormattedError::internal_server_error());
//! ```
//!
//! ## Building a response
//!
//! ```
//! use gateway_errors::gateway::{ExecutionResult, GatewayResponse};
//! use gateway_errors::{NormalizationOptions, StructuredError};
//!
//! let result = ExecutionResult::from_data(serde_json::json!({ "user": null }))
//!     .with_error(StructuredError::new("user not found").with_path(["user"]));
//!
//! let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());
//! let errors = response.errors.unwrap();
//! assert_eq!(errors[0].code(), Some("INTERNAL_SERVER_ERROR"));
//! ```

/// The gateway/server contract: request, response, cache and HTTP shapes
pub mod gateway;
/// Macros for building extensions and structured errors
pub mod macros;
/// The error normalizer and its configuration
pub mod normalize;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Raw, structured and formatted error values
pub mod types;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

#[doc(hidden)]
pub use serde_json;

pub use normalize::{
    enrich_error, ensure_structured_error, normalize_and_format_errors, FormatErrorHook, HookError,
    NormalizationOptions,
};
pub use types::*;

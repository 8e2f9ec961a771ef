//! Error normalization: raw failures in, client-safe formatted records out.
//!
//! [`normalize_and_format_errors`] sits directly in front of response
//! serialization, so it never fails: every input produces exactly one output
//! record, in input order, whatever the input looked like and whatever the
//! user's format-error hook does.
//!
//! Each failure goes through two stages:
//!
//! 1. **Enrichment** ([`enrich_error`]) coerces the failure into a
//!    [`StructuredError`], guarantees `extensions.code`, surfaces a wrapped
//!    exception's fields under `extensions.exception` and, if requested,
//!    attaches `extensions.stacktrace`.
//! 2. **Formatting** runs the configured hook inside a guarded region. When
//!    the hook fails, the item falls back to the enriched record (stack-trace
//!    mode) or to an opaque internal-server-error record.
//!
//! # Examples
//!
//! ```
//! use gateway_errors::{
//!     normalize_and_format_errors, GenericException, NormalizationOptions, RawFailure,
//!     StructuredError, INTERNAL_SERVER_ERROR,
//! };
//!
//! let failures = vec![
//!     RawFailure::from(StructuredError::new("bad input").with_code("BAD_USER_INPUT")),
//!     RawFailure::from(GenericException::new("boom").with_field("foo", 1)),
//!     RawFailure::from(42),
//! ];
//!
//! let formatted = normalize_and_format_errors(&failures, &NormalizationOptions::new());
//!
//! assert_eq!(formatted.len(), 3);
//! assert_eq!(formatted[0].code(), Some("BAD_USER_INPUT"));
//! assert_eq!(formatted[1].extension("exception").unwrap()["foo"], 1);
//! assert_eq!(formatted[2].message, "Unexpected error value: 42");
//! assert_eq!(formatted[2].code(), Some(INTERNAL_SERVER_ERROR));
//! ```

mod options;

pub use options::{FormatErrorHook, HookError, NormalizationOptions};

use serde_json::Value;

use crate::types::{
    ErrorCause, Extensions, FormattedError, RawFailure, StructuredError, CODE_KEY, EXCEPTION_KEY,
    EXTENSIONS_FIELD, INTERNAL_SERVER_ERROR, STACKTRACE_KEY,
};

/// Prefix of the message synthesized for thrown values that are not errors.
pub const UNEXPECTED_ERROR_VALUE_PREFIX: &str = "Unexpected error value: ";

/// Converts every raw failure into a formatted error record.
///
/// The output has the same length and order as `errors`. This function does
/// not fail, and a failing hook (error or panic) only affects its own item.
pub fn normalize_and_format_errors(
    errors: &[RawFailure],
    options: &NormalizationOptions,
) -> Vec<FormattedError> {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        count = errors.len(),
        include_stacktrace = options.includes_stacktrace(),
        has_format_error = options.has_format_error(),
        "normalizing errors"
    );

    errors.iter().map(|error| format_one(error, options)).collect()
}

fn format_one(error: &RawFailure, options: &NormalizationOptions) -> FormattedError {
    let enriched = enrich_error(error, options.includes_stacktrace());
    if !options.has_format_error() {
        return enriched;
    }

    let fallback = options.includes_stacktrace().then(|| enriched.clone());
    match options.apply_format_error(enriched, error) {
        Ok(formatted) => formatted,
        Err(_hook_error) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                error = %_hook_error,
                exposes_enriched = fallback.is_some(),
                "format error hook failed, using fallback record"
            );
            fallback.unwrap_or_else(FormattedError::internal_server_error)
        },
    }
}

/// Coerces a raw failure into a formatted record with a guaranteed `extensions.code`.
///
/// A wrapped exception's own fields (except `extensions`) are merged into
/// `extensions.exception`. With `include_stacktrace`, the error's stack text
/// is split into lines under `extensions.stacktrace`; for a wrapped
/// exception that is the exception's own stack.
pub fn enrich_error(error: &RawFailure, include_stacktrace: bool) -> FormattedError {
    let structured = ensure_structured_error(error);

    let mut extensions = structured.extensions().clone();
    if !has_code(&extensions) {
        extensions.insert(CODE_KEY.to_owned(), Value::from(INTERNAL_SERVER_ERROR));
    }

    if let Some(ErrorCause::Exception(exception)) = structured.original_cause() {
        let mut surfaced =
            exception.fields().iter().filter(|(key, _)| key.as_str() != EXTENSIONS_FIELD).peekable();
        if surfaced.peek().is_some() {
            let mut merged = ensure_object(extensions.remove(EXCEPTION_KEY));
            merged.extend(surfaced.map(|(key, value)| (key.clone(), value.clone())));
            extensions.insert(EXCEPTION_KEY.to_owned(), Value::Object(merged));
        }
    }

    if include_stacktrace {
        let lines = structured.stack().split('\n').map(Value::from).collect();
        extensions.insert(STACKTRACE_KEY.to_owned(), Value::Array(lines));
    }

    FormattedError { extensions: Some(extensions), ..structured.to_formatted() }
}

/// Coerces any raw failure into a [`StructuredError`].
///
/// - structured errors are returned as they are;
/// - exceptions are wrapped with the exception as the original cause, taking
///   over its message and, when it is an object, its `extensions` field;
/// - any other value becomes `"Unexpected error value: <value>"`.
pub fn ensure_structured_error(error: &RawFailure) -> StructuredError {
    match error {
        RawFailure::Structured(err) => err.clone(),
        RawFailure::Exception(exception) => {
            let extensions = exception.extensions_field().cloned().unwrap_or_default();
            StructuredError::new(exception.message())
                .with_extensions(extensions)
                .with_original_cause(exception.clone())
        },
        RawFailure::Opaque(value) => {
            StructuredError::new(format!("{}{}", UNEXPECTED_ERROR_VALUE_PREFIX, value))
        },
    }
}

/// A code counts as present unless it is missing, `null` or an empty string.
///
/// The empty string is stricter than plain null-coalescing, which would keep
/// `""`; a response never carries an empty code.
fn has_code(extensions: &Extensions) -> bool {
    match extensions.get(CODE_KEY) {
        None | Some(Value::Null) => false,
        Some(Value::String(code)) => !code.is_empty(),
        Some(_) => true,
    }
}

/// Callers may have put anything under an object-valued key; anything that
/// is not an object merges as an empty map.
fn ensure_object(value: Option<Value>) -> Extensions {
    match value {
        Some(Value::Object(map)) => map,
        _ => Extensions::new(),
    }
}

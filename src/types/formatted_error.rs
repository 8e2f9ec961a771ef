//! The public, serializable error record that crosses the wire.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Extensions, PathSegment, SourceLocation, CODE_KEY, INTERNAL_SERVER_ERROR};

/// Formatted error as it appears in a response payload's `errors` list.
///
/// Optional fields are omitted from the serialized form when absent.
///
/// # Examples
///
/// ```
/// use gateway_errors::FormattedError;
///
/// let err = FormattedError::internal_server_error();
/// let json = serde_json::to_string(&err).unwrap();
/// assert_eq!(json, r#"{"message":"Internal server error","extensions":{"code":"INTERNAL_SERVER_ERROR"}}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<SourceLocation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

impl FormattedError {
    /// Message of the opaque error returned when formatting itself fails.
    pub const INTERNAL_SERVER_ERROR_MESSAGE: &'static str = "Internal server error";

    /// Creates a record with only a message.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self { message: message.into(), locations: None, path: None, extensions: None }
    }

    /// The opaque record that leaks nothing about the underlying failure.
    pub fn internal_server_error() -> Self {
        Self::new(Self::INTERNAL_SERVER_ERROR_MESSAGE).with_extension(CODE_KEY, INTERNAL_SERVER_ERROR)
    }

    /// Sets a single extension entry, creating the map if needed.
    #[inline]
    pub fn with_extension<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.extensions.get_or_insert_with(Extensions::new).insert(key.into(), value.into());
        self
    }

    /// Looks up an extension entry.
    #[inline]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.as_ref()?.get(key)
    }

    /// Returns `extensions.code` when it is a string.
    #[inline]
    pub fn code(&self) -> Option<&str> {
        self.extension(CODE_KEY)?.as_str()
    }
}

impl fmt::Display for FormattedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

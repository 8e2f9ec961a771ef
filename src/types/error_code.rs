//! Well-known error codes placed under `extensions.code`.
//!
//! The wire form of every code is a SCREAMING_SNAKE_CASE string. Hosts are
//! free to use any other string as a code; these are the ones the server
//! itself emits.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wire string of [`ErrorCode::InternalServerError`].
///
/// This is the code assigned to any error that does not carry one.
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// Error codes emitted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InternalServerError,
    GraphqlParseFailed,
    GraphqlValidationFailed,
    PersistedQueryNotFound,
    PersistedQueryNotSupported,
    BadUserInput,
    OperationResolutionFailure,
    BadRequest,
}

impl ErrorCode {
    /// Every known code, in declaration order.
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::InternalServerError,
        ErrorCode::GraphqlParseFailed,
        ErrorCode::GraphqlValidationFailed,
        ErrorCode::PersistedQueryNotFound,
        ErrorCode::PersistedQueryNotSupported,
        ErrorCode::BadUserInput,
        ErrorCode::OperationResolutionFailure,
        ErrorCode::BadRequest,
    ];

    /// Returns the wire string for this code.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InternalServerError => INTERNAL_SERVER_ERROR,
            ErrorCode::GraphqlParseFailed => "GRAPHQL_PARSE_FAILED",
            ErrorCode::GraphqlValidationFailed => "GRAPHQL_VALIDATION_FAILED",
            ErrorCode::PersistedQueryNotFound => "PERSISTED_QUERY_NOT_FOUND",
            ErrorCode::PersistedQueryNotSupported => "PERSISTED_QUERY_NOT_SUPPORTED",
            ErrorCode::BadUserInput => "BAD_USER_INPUT",
            ErrorCode::OperationResolutionFailure => "OPERATION_RESOLUTION_FAILURE",
            ErrorCode::BadRequest => "BAD_REQUEST",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ErrorCode {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<ErrorCode> for serde_json::Value {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        serde_json::Value::String(code.as_str().to_owned())
    }
}

impl From<ErrorCode> for String {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_owned()
    }
}

/// Returned by [`ErrorCode::from_str`] for strings that are not a known code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorCodeError {
    input: String,
}

impl ParseErrorCodeError {
    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseErrorCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code: {}", self.input)
    }
}

impl std::error::Error for ParseErrorCodeError {}

impl FromStr for ErrorCode {
    type Err = ParseErrorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| ParseErrorCodeError { input: s.to_owned() })
    }
}

//! Error types and utilities.
//!
//! This module holds the value model the normalizer works on: the raw
//! failures a request can produce, the structured errors they are coerced
//! into, and the formatted records that finally cross the wire.
//!
//! # Examples
//!
//! ```
//! use gateway_errors::{ErrorCode, StructuredError, PathSegment};
//!
//! let err = StructuredError::new("user not found")
//!     .with_location(3, 5)
//!     .with_path([PathSegment::key("user"), PathSegment::index(0)])
//!     .with_code(ErrorCode::BadUserInput);
//!
//! let formatted = err.to_formatted();
//! assert_eq!(formatted.code(), Some("BAD_USER_INPUT"));
//! ```
use smallvec::SmallVec;

pub mod error_code;
pub mod formatted_error;
pub mod generic_exception;
pub mod location;
pub mod raw_failure;
pub mod structured_error;

pub use error_code::*;
pub use formatted_error::*;
pub use generic_exception::*;
pub use location::*;
pub use raw_failure::*;
pub use structured_error::*;

/// Open, string-keyed mapping attached to an error for machine-readable metadata.
pub type Extensions = serde_json::Map<String, serde_json::Value>;

/// SmallVec-backed collection used for source locations.
///
/// Uses inline storage for 1 element; most errors point at a single position.
pub type ErrorVec<E> = SmallVec<[E; 1]>;

/// Boxed, thread-safe error returned by user hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Reserved extension key holding the machine-readable error code.
pub const CODE_KEY: &str = "code";

/// Reserved extension key holding the enumerable fields of a wrapped exception.
pub const EXCEPTION_KEY: &str = "exception";

/// Reserved extension key holding the stack trace lines.
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Exception field that is read as extensions rather than surfaced as a field.
pub const EXTENSIONS_FIELD: &str = "extensions";

//! Ergonomic macros for building error metadata.
//!
//! - [`macro@crate::extensions`] - Builds an [`Extensions`](crate::types::Extensions)
//!   map from `key => value` pairs, converting each value with `serde_json::Value::from`.
//! - [`macro@crate::structured_error`] - Formats a message and creates a
//!   [`StructuredError`](crate::types::StructuredError) from it.
//!
//! # Examples
//!
//! ```
//! use gateway_errors::{extensions, structured_error};
//!
//! let field = "email";
//! let err = structured_error!("invalid value for {}", field)
//!     .with_extensions(extensions! {
//!         "code" => "BAD_USER_INPUT",
//!         "field" => field,
//!     });
//!
//! assert_eq!(err.message(), "invalid value for email");
//! assert_eq!(err.code(), Some("BAD_USER_INPUT"));
//! ```

/// Builds an [`Extensions`](crate::types::Extensions) map from `key => value` pairs.
///
/// Values go through `serde_json::Value::from`, so strings, numbers, bools,
/// [`ErrorCode`](crate::ErrorCode)s and `serde_json::Value`s can be mixed.
///
/// # Examples
///
/// ```
/// use gateway_errors::{extensions, ErrorCode};
///
/// let ext = extensions! {
///     "code" => ErrorCode::BadRequest,
///     "retryable" => false,
///     "attempt" => 3,
/// };
/// assert_eq!(ext["code"], "BAD_REQUEST");
/// assert_eq!(ext["attempt"], 3);
///
/// let empty = extensions! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! extensions {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::types::Extensions::new();
        $(
            map.insert(::std::string::String::from($key), $crate::serde_json::Value::from($value));
        )*
        map
    }};
}

/// Creates a [`StructuredError`](crate::types::StructuredError) with a formatted message.
///
/// Accepts the same arguments as the standard `format!` macro.
///
/// # Examples
///
/// ```
/// use gateway_errors::structured_error;
///
/// let id = 42;
/// let err = structured_error!("user {} not found", id).with_code("NOT_FOUND");
/// assert_eq!(err.message(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! structured_error {
    ($($arg:tt)*) => {
        $crate::types::StructuredError::new(format!($($arg)*))
    };
}

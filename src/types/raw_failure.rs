//! Raw failures: anything that was thrown or rejected while serving a request.
//!
//! Host code does not always fail with a proper error. A resolver might
//! reject with a string, a number or a bare object, and some failures carry
//! no value at all. [`RawFailure`] captures all of these as a tagged union so
//! the normalizer can discriminate on what is actually available.
//!
//! # Examples
//!
//! ```
//! use gateway_errors::{GenericException, RawFailure, StructuredError};
//!
//! let failures: Vec<RawFailure> = vec![
//!     StructuredError::new("bad field").into(),
//!     GenericException::new("boom").into(),
//!     42.into(),
//!     RawFailure::undefined(),
//! ];
//! assert!(failures[0].is_structured());
//! assert_eq!(failures[2].to_string(), "42");
//! assert_eq!(failures[3].to_string(), "undefined");
//! ```

use core::fmt;

use serde_json::Value;

use crate::types::{GenericException, StructuredError};

/// A thrown value that is not an error at all.
#[derive(Debug, Clone, PartialEq)]
pub enum ThrownValue {
    /// Nothing was thrown with the failure.
    Undefined,
    /// A plain data value: string, number, bool, array, object or null.
    Json(Value),
    /// A float, kept apart from JSON so `NaN` and the infinities survive.
    Number(f64),
}

impl fmt::Display for ThrownValue {
    /// Strings print verbatim; every other value prints as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThrownValue::Undefined => f.write_str("undefined"),
            ThrownValue::Json(Value::String(s)) => f.write_str(s),
            ThrownValue::Json(value) => write!(f, "{}", value),
            ThrownValue::Number(n) => fmt_number(*n, f),
        }
    }
}

/// Non-finite values print by name; integral values print without `.0`.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{}", n)
    }
}

impl From<f64> for ThrownValue {
    #[inline]
    fn from(value: f64) -> Self {
        ThrownValue::Number(value)
    }
}

impl From<Value> for ThrownValue {
    #[inline]
    fn from(value: Value) -> Self {
        ThrownValue::Json(value)
    }
}

impl From<Option<Value>> for ThrownValue {
    #[inline]
    fn from(value: Option<Value>) -> Self {
        value.map_or(ThrownValue::Undefined, ThrownValue::Json)
    }
}

/// Any value that was thrown or rejected during request processing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFailure {
    /// Already a structured error.
    Structured(StructuredError),
    /// A generic error with a message but no structured metadata.
    Exception(GenericException),
    /// Not an error value at all.
    Opaque(ThrownValue),
}

impl RawFailure {
    /// A failure that carried no value.
    #[inline]
    pub const fn undefined() -> Self {
        RawFailure::Opaque(ThrownValue::Undefined)
    }

    /// Wraps any [`std::error::Error`] as a generic exception.
    #[inline]
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        RawFailure::Exception(GenericException::from_error(error))
    }

    #[inline]
    pub fn is_structured(&self) -> bool {
        matches!(self, RawFailure::Structured(_))
    }

    #[inline]
    pub fn is_exception(&self) -> bool {
        matches!(self, RawFailure::Exception(_))
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        matches!(self, RawFailure::Opaque(_))
    }

    /// The failure's message, if it has one.
    pub fn message(&self) -> Option<&str> {
        match self {
            RawFailure::Structured(err) => Some(err.message()),
            RawFailure::Exception(ex) => Some(ex.message()),
            RawFailure::Opaque(_) => None,
        }
    }
}

impl fmt::Display for RawFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawFailure::Structured(err) => fmt::Display::fmt(err, f),
            RawFailure::Exception(ex) => fmt::Display::fmt(ex, f),
            RawFailure::Opaque(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl From<StructuredError> for RawFailure {
    #[inline]
    fn from(err: StructuredError) -> Self {
        RawFailure::Structured(err)
    }
}

impl From<GenericException> for RawFailure {
    #[inline]
    fn from(ex: GenericException) -> Self {
        RawFailure::Exception(ex)
    }
}

impl From<ThrownValue> for RawFailure {
    #[inline]
    fn from(value: ThrownValue) -> Self {
        RawFailure::Opaque(value)
    }
}

impl From<Value> for RawFailure {
    #[inline]
    fn from(value: Value) -> Self {
        RawFailure::Opaque(ThrownValue::Json(value))
    }
}

macro_rules! impl_from_json_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for RawFailure {
                #[inline]
                fn from(value: $ty) -> Self {
                    RawFailure::Opaque(ThrownValue::Json(Value::from(value)))
                }
            }
        )*
    };
}

impl_from_json_value!(&str, String, bool, i32, i64, u32, u64);

impl From<f64> for RawFailure {
    #[inline]
    fn from(value: f64) -> Self {
        RawFailure::Opaque(ThrownValue::Number(value))
    }
}

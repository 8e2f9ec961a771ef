//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use gateway_errors::prelude::*;
//!
//! let formatted = normalize_and_format_errors(
//!     &[RawFailure::from(GenericException::new("boom"))],
//!     &NormalizationOptions::new(),
//! );
//! assert_eq!(formatted[0].message, "boom");
//! ```

// Macros
pub use crate::{extensions, structured_error};

// Core types
pub use crate::types::{
    ErrorCode, Extensions, FormattedError, GenericException, PathSegment, RawFailure, SourceLocation,
    StructuredError, ThrownValue,
};

// Normalizer
pub use crate::normalize::{normalize_and_format_errors, NormalizationOptions};

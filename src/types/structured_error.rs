//! Structured errors: message plus location, path and extension metadata.
//!
//! [`StructuredError`] is the normalized shape every raw failure is coerced
//! into before it is formatted. It can also be built directly by resolvers
//! and validation code that already know where and why something failed.

use core::fmt;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;

use serde_json::Value;

use crate::types::{
    ErrorVec, Extensions, FormattedError, GenericException, PathSegment, SourceLocation, CODE_KEY,
};

/// The failure a [`StructuredError`] was derived from.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCause {
    /// A generic exception; its fields are surfaced under `extensions.exception`.
    Exception(GenericException),
    /// Another structured error; nothing is surfaced from it.
    Structured(Box<StructuredError>),
}

impl ErrorCause {
    /// Stack text of the underlying failure.
    pub fn stack(&self) -> Cow<'_, str> {
        match self {
            ErrorCause::Exception(ex) => ex.stack(),
            ErrorCause::Structured(err) => err.stack(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        match self {
            ErrorCause::Exception(ex) => ex.message(),
            ErrorCause::Structured(err) => err.message(),
        }
    }
}

impl From<GenericException> for ErrorCause {
    #[inline]
    fn from(ex: GenericException) -> Self {
        ErrorCause::Exception(ex)
    }
}

impl From<StructuredError> for ErrorCause {
    #[inline]
    fn from(err: StructuredError) -> Self {
        ErrorCause::Structured(Box::new(err))
    }
}

/// A normalized error carrying message, location/path metadata and extensions.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredError {
    pub(crate) message: String,
    pub(crate) locations: Option<ErrorVec<SourceLocation>>,
    pub(crate) path: Option<Vec<PathSegment>>,
    pub(crate) extensions: Extensions,
    pub(crate) original_cause: Option<ErrorCause>,
    pub(crate) stack: Option<String>,
}

impl StructuredError {
    /// Name used in the synthesized stack header.
    pub const NAME: &'static str = "StructuredError";

    /// Creates a structured error with only a message.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: Extensions::new(),
            original_cause: None,
            stack: None,
        }
    }

    /// Appends a single source location.
    #[inline]
    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.locations.get_or_insert_with(ErrorVec::new).push(SourceLocation::new(line, column));
        self
    }

    /// Replaces the source locations.
    #[inline]
    pub fn with_locations<I>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = SourceLocation>,
    {
        self.locations = Some(locations.into_iter().collect());
        self
    }

    /// Replaces the response path.
    #[inline]
    pub fn with_path<I, P>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathSegment>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the extensions map.
    #[inline]
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Sets a single extension entry.
    #[inline]
    pub fn with_extension<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Sets `extensions.code`.
    #[inline]
    pub fn with_code<C: Into<String>>(self, code: C) -> Self {
        self.with_extension(CODE_KEY, code.into())
    }

    /// Records the failure this error was derived from.
    ///
    /// Unless a stack is set explicitly, the error reports the cause's stack.
    #[inline]
    pub fn with_original_cause<C: Into<ErrorCause>>(mut self, cause: C) -> Self {
        self.original_cause = Some(cause.into());
        self
    }

    /// Sets the stack text verbatim.
    #[inline]
    pub fn with_stack<S: Into<String>>(mut self, stack: S) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Records the current backtrace as the stack, if the environment enables capture.
    pub fn capture_stack(mut self) -> Self {
        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            self.stack = Some(format!("{}\n{}", self.stack_header(), backtrace));
        }
        self
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn locations(&self) -> Option<&[SourceLocation]> {
        self.locations.as_deref()
    }

    #[inline]
    pub fn path(&self) -> Option<&[PathSegment]> {
        self.path.as_deref()
    }

    #[inline]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Returns `extensions.code` when it is a string.
    #[inline]
    pub fn code(&self) -> Option<&str> {
        self.extensions.get(CODE_KEY).and_then(Value::as_str)
    }

    #[inline]
    pub fn original_cause(&self) -> Option<&ErrorCause> {
        self.original_cause.as_ref()
    }

    /// Stack text of this error.
    ///
    /// An explicitly set stack wins; otherwise a derived error reports its
    /// original cause's stack, and a standalone error reports only its
    /// `StructuredError: message` header.
    pub fn stack(&self) -> Cow<'_, str> {
        if let Some(stack) = &self.stack {
            return Cow::Borrowed(stack);
        }
        match &self.original_cause {
            Some(cause) => cause.stack(),
            None => Cow::Owned(self.stack_header()),
        }
    }

    /// Serializable projection: message, locations and path, plus the
    /// extensions when there are any.
    pub fn to_formatted(&self) -> FormattedError {
        FormattedError {
            message: self.message.clone(),
            locations: self.locations.as_ref().map(|l| l.to_vec()),
            path: self.path.clone(),
            extensions: (!self.extensions.is_empty()).then(|| self.extensions.clone()),
        }
    }

    fn stack_header(&self) -> String {
        format!("{}: {}", Self::NAME, self.message)
    }
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(locations) = self.locations.as_ref().filter(|l| !l.is_empty()) {
            f.write_str(" (at ")?;
            for (i, location) in locations.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", location)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl std::error::Error for StructuredError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.original_cause.as_ref()? {
            ErrorCause::Exception(ex) => Some(ex),
            ErrorCause::Structured(err) => Some(&**err),
        }
    }
}

//! Generic, message-bearing failures that carry no structured metadata.
//!
//! A [`GenericException`] is what most host code throws: an error with a
//! name, a message, maybe a stack, and any number of extra fields the
//! thrower attached. During normalization those extra fields are surfaced
//! to the client under `extensions.exception`.

use core::fmt;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;

use serde_json::Value;

use crate::types::Extensions;

/// A generic error value: message plus optional stack and enumerable fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericException {
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) stack: Option<String>,
    pub(crate) fields: Extensions,
}

impl GenericException {
    /// Name used when none is given.
    pub const DEFAULT_NAME: &'static str = "Error";

    /// Creates an exception with the default name and no fields.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_owned(),
            message: message.into(),
            stack: None,
            fields: Extensions::new(),
        }
    }

    /// Builds an exception from any [`std::error::Error`].
    ///
    /// The message is the error's `Display` output. The stack starts with the
    /// `name: message` header; when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE`
    /// enable capture, the current backtrace follows it.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::new(error.to_string()).capture_stack()
    }

    /// Sets the exception name (the `name` half of the stack header).
    #[inline]
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches an enumerable field.
    #[inline]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Replaces all enumerable fields.
    #[inline]
    pub fn with_fields(mut self, fields: Extensions) -> Self {
        self.fields = fields;
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
        let header = self.stack_header();
        self.stack = Some(match backtrace.status() {
            BacktraceStatus::Captured => format!("{}\n{}", header, backtrace),
            _ => header,
        });
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Own enumerable fields, keyed by name.
    #[inline]
    pub fn fields(&self) -> &Extensions {
        &self.fields
    }

    /// The `extensions` field, if the thrower attached an object there.
    pub fn extensions_field(&self) -> Option<&Extensions> {
        match self.fields.get(crate::types::EXTENSIONS_FIELD) {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Stack text; falls back to the `name: message` header.
    pub fn stack(&self) -> Cow<'_, str> {
        match &self.stack {
            Some(stack) => Cow::Borrowed(stack),
            None => Cow::Owned(self.stack_header()),
        }
    }

    fn stack_header(&self) -> String {
        if self.message.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.message)
        }
    }
}

impl fmt::Display for GenericException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GenericException {}

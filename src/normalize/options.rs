//! Normalizer configuration and the guarded format-error hook.

use core::fmt;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::types::{BoxError, FormattedError, RawFailure};

/// User hook applied to every enriched error before it joins the response.
///
/// Receives the enriched record and the raw failure it came from. A hook may
/// fail, either by returning `Err` or by panicking; the normalizer contains
/// both.
///
/// Closures with the matching signature implement this trait.
pub trait FormatErrorHook: Send + Sync {
    fn format_error(&self, formatted: FormattedError, error: &RawFailure) -> Result<FormattedError, BoxError>;
}

impl<F> FormatErrorHook for F
where
    F: Fn(FormattedError, &RawFailure) -> Result<FormattedError, BoxError> + Send + Sync,
{
    #[inline]
    fn format_error(&self, formatted: FormattedError, error: &RawFailure) -> Result<FormattedError, BoxError> {
        self(formatted, error)
    }
}

/// Why a guarded hook invocation produced no record.
#[derive(Debug)]
pub enum HookError {
    /// The hook returned an error.
    Failed(BoxError),
    /// The hook panicked; holds the panic message when it was a string.
    Panicked(String),
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookError::Failed(err) => write!(f, "format error hook failed: {}", err),
            HookError::Panicked(msg) => write!(f, "format error hook panicked: {}", msg),
        }
    }
}

impl std::error::Error for HookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HookError::Failed(err) => Some(&**err),
            HookError::Panicked(_) => None,
        }
    }
}

/// Configuration for [`normalize_and_format_errors`](crate::normalize_and_format_errors).
///
/// Cheap to clone; the hook is shared behind an `Arc`.
///
/// # Examples
///
/// ```
/// use gateway_errors::{FormattedError, NormalizationOptions, RawFailure};
///
/// let options = NormalizationOptions::new()
///     .include_stacktrace_in_error_responses(true)
///     .with_format_error(|mut formatted: FormattedError, _error: &RawFailure| {
///         formatted.message = formatted.message.to_uppercase();
///         Ok(formatted)
///     });
///
/// assert!(options.has_format_error());
/// assert!(options.includes_stacktrace());
/// ```
#[derive(Clone, Default)]
pub struct NormalizationOptions {
    format_error: Option<Arc<dyn FormatErrorHook>>,
    include_stacktrace_in_error_responses: bool,
}

impl NormalizationOptions {
    /// No hook, stack traces withheld.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Development preset: stack traces are included in responses.
    #[inline]
    pub fn development() -> Self {
        Self::new().include_stacktrace_in_error_responses(true)
    }

    /// Installs a closure as the format-error hook.
    pub fn with_format_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(FormattedError, &RawFailure) -> Result<FormattedError, BoxError> + Send + Sync + 'static,
    {
        self.format_error = Some(Arc::new(hook));
        self
    }

    /// Installs any [`FormatErrorHook`] implementation.
    pub fn with_format_error_hook<H>(mut self, hook: H) -> Self
    where
        H: FormatErrorHook + 'static,
    {
        self.format_error = Some(Arc::new(hook));
        self
    }

    /// Sets whether stack traces are attached under `extensions.stacktrace`.
    ///
    /// This also decides what a failing hook falls back to: the enriched
    /// record when enabled, the opaque internal-server-error record otherwise.
    #[inline]
    pub fn include_stacktrace_in_error_responses(mut self, include: bool) -> Self {
        self.include_stacktrace_in_error_responses = include;
        self
    }

    #[inline]
    pub fn includes_stacktrace(&self) -> bool {
        self.include_stacktrace_in_error_responses
    }

    #[inline]
    pub fn has_format_error(&self) -> bool {
        self.format_error.is_some()
    }

    /// Runs the hook inside a guarded region.
    ///
    /// Without a hook the record is returned unchanged. An `Err` return and a
    /// panic both come back as [`HookError`].
    pub fn apply_format_error(
        &self,
        formatted: FormattedError,
        error: &RawFailure,
    ) -> Result<FormattedError, HookError> {
        let Some(hook) = self.format_error.as_deref() else {
            return Ok(formatted);
        };
        match panic::catch_unwind(AssertUnwindSafe(|| hook.format_error(formatted, error))) {
            Ok(Ok(formatted)) => Ok(formatted),
            Ok(Err(err)) => Err(HookError::Failed(err)),
            Err(payload) => Err(HookError::Panicked(panic_message(payload.as_ref()))),
        }
    }
}

impl fmt::Debug for NormalizationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizationOptions")
            .field("format_error", &self.format_error.as_ref().map(|_| "<hook>"))
            .field("include_stacktrace_in_error_responses", &self.include_stacktrace_in_error_responses)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

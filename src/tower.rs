//! Tower integration for error normalization.
//!
//! This module provides a Tower `Layer` and `Service` that turn an
//! executor service's [`ExecutionResult`] into a client-ready
//! [`GatewayResponse`], normalizing every failure on the way out.
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! gateway-errors = { version = "0.1", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use gateway_errors::tower::NormalizeErrorsLayer;
//! use gateway_errors::NormalizationOptions;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(NormalizeErrorsLayer::new(NormalizationOptions::development()))
//!     .service(executor_service);
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::gateway::{ExecutionResult, GatewayResponse};
use crate::normalize::NormalizationOptions;
use crate::types::RawFailure;

/// A Tower [`Layer`] that normalizes the failures of an executor service.
///
/// Successful calls have their [`ExecutionResult`] errors normalized. A call
/// that fails outright is answered with `data: null` and the failure as the
/// single error, so the client always receives a well-formed response.
#[derive(Clone, Debug, Default)]
pub struct NormalizeErrorsLayer {
    options: NormalizationOptions,
}

impl NormalizeErrorsLayer {
    /// Creates a new `NormalizeErrorsLayer` with the given options.
    #[inline]
    pub fn new(options: NormalizationOptions) -> Self {
        Self { options }
    }

    /// Returns a reference to the options.
    #[inline]
    pub fn options(&self) -> &NormalizationOptions {
        &self.options
    }
}

impl<S> Layer<S> for NormalizeErrorsLayer {
    type Service = NormalizeErrorsService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        NormalizeErrorsService { inner, options: self.options.clone() }
    }
}

/// A Tower [`Service`] that answers with normalized [`GatewayResponse`]s.
///
/// This is created by [`NormalizeErrorsLayer`]. Readiness errors of the inner
/// service are passed through unchanged.
#[derive(Clone, Debug)]
pub struct NormalizeErrorsService<S> {
    inner: S,
    options: NormalizationOptions,
}

impl<S> NormalizeErrorsService<S> {
    /// Creates a new `NormalizeErrorsService` wrapping the given service.
    #[inline]
    pub fn new(inner: S, options: NormalizationOptions) -> Self {
        Self { inner, options }
    }

    /// Returns a reference to the inner service.
    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the inner service.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the wrapper and returns the inner service.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Request> Service<Request> for NormalizeErrorsService<S>
where
    S: Service<Request, Response = ExecutionResult>,
    S::Error: Into<RawFailure>,
{
    type Response = GatewayResponse;
    type Error = S::Error;
    type Future = NormalizeErrorsFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    #[inline]
    fn call(&mut self, request: Request) -> Self::Future {
        NormalizeErrorsFuture::new(self.inner.call(request), self.options.clone())
    }
}

pin_project! {
    /// Future returned by [`NormalizeErrorsService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct NormalizeErrorsFuture<F> {
        #[pin]
        inner: F,
        options: Option<NormalizationOptions>,
    }
}

impl<F> NormalizeErrorsFuture<F> {
    #[inline]
    fn new(inner: F, options: NormalizationOptions) -> Self {
        Self { inner, options: Some(options) }
    }
}

impl<F, E> Future for NormalizeErrorsFuture<F>
where
    F: Future<Output = Result<ExecutionResult, E>>,
    E: Into<RawFailure>,
{
    type Output = Result<GatewayResponse, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        // options is Some until the first Ready result
        let options = this.options.as_ref().expect("polled after completion");

        let result = match this.inner.poll(cx) {
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(error)) => ExecutionResult::from_failure(error),
            Poll::Pending => return Poll::Pending,
        };
        let response = GatewayResponse::from_execution(result, options);
        *this.options = None;
        Poll::Ready(Ok(response))
    }
}

impl<F, E> FusedFuture for NormalizeErrorsFuture<F>
where
    F: FusedFuture<Output = Result<ExecutionResult, E>>,
    E: Into<RawFailure>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.options.is_none() || self.inner.is_terminated()
    }
}

/// Extension trait for wrapping executor services with error normalization.
pub trait ServiceNormalizeExt<Request>: Service<Request, Response = ExecutionResult> + Sized {
    /// Wraps this service so its responses carry normalized errors.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use gateway_errors::tower::ServiceNormalizeExt;
    ///
    /// let wrapped = executor.normalize_errors(NormalizationOptions::new());
    /// ```
    fn normalize_errors(self, options: NormalizationOptions) -> NormalizeErrorsService<Self> {
        NormalizeErrorsService::new(self, options)
    }
}

impl<S, Request> ServiceNormalizeExt<Request> for S where S: Service<Request, Response = ExecutionResult> {}

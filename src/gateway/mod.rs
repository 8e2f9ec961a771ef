//! The contract between a hosting server and a query-execution gateway.
//!
//! A gateway is loaded by the server, tells the server whenever its schema
//! changes, and hands back an executor the server calls once per request.
//! The types here are the data exchanged across that boundary; query
//! planning, execution and transport are the gateway's and host's business.
//!
//! The one piece of behavior this module adds is
//! [`GatewayResponse::from_execution`], which runs an execution result's
//! failures through the error normalizer before the response is sent.

use std::sync::Arc;

use futures_core::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{normalize_and_format_errors, NormalizationOptions};
use crate::types::{BoxError, Extensions, FormattedError, RawFailure, StructuredError};

pub mod cache;
pub mod http;

pub use cache::{CacheHint, CachePolicy, CacheScope, ResolvedCacheHint};
pub use http::{HeaderMap, HttpRequest, HttpResponse};

/// Registry credentials and graph identity passed to [`GatewayInterface::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_ref: Option<String>,
}

/// Opaque hash identifying a schema version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaHash(String);

impl SchemaHash {
    #[inline]
    pub fn new<S: Into<String>>(hash: S) -> Self {
        Self(hash.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The request as the gateway sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Extensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpRequest>,
}

/// Raw outcome of executing one operation.
///
/// Failures are kept raw, in the order they occurred, until the response is
/// built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionResult {
    pub data: Option<Value>,
    pub errors: Vec<RawFailure>,
    pub extensions: Option<Extensions>,
}

impl ExecutionResult {
    #[inline]
    pub fn from_data(data: Value) -> Self {
        Self { data: Some(data), ..Self::default() }
    }

    /// A result that failed before producing any data.
    #[inline]
    pub fn from_failure<F: Into<RawFailure>>(failure: F) -> Self {
        Self { data: None, errors: vec![failure.into()], extensions: None }
    }

    #[inline]
    pub fn with_error<F: Into<RawFailure>>(mut self, failure: F) -> Self {
        self.errors.push(failure.into());
        self
    }
}

/// The response payload sent back to the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FormattedError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpResponse>,
}

impl GatewayResponse {
    /// Builds the client payload from an execution result.
    ///
    /// Every failure is normalized; `errors` is omitted when there were none.
    pub fn from_execution(result: ExecutionResult, options: &NormalizationOptions) -> Self {
        let errors = (!result.errors.is_empty())
            .then(|| normalize_and_format_errors(&result.errors, options));
        Self { data: result.data, errors, extensions: result.extensions, http: None }
    }
}

/// Per-request flags and timings collected while serving an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_traces: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_query_hit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_query_register: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_cache_hit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forbidden_operation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_operation: Option<bool>,
    /// High-resolution start time as `(seconds, nanoseconds)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_hr_time: Option<(u64, u32)>,
}

/// Everything an executor gets to see about one request.
///
/// Provisional: which fields the server copies back after execution is not
/// settled.
pub struct GatewayRequestContext<C> {
    pub request: GatewayRequest,
    pub response: Option<GatewayResponse>,
    pub schema_hash: SchemaHash,
    pub context: C,
    pub query_hash: String,
    pub source: String,
    pub operation_name: Option<String>,
    pub errors: Vec<StructuredError>,
    pub metrics: RequestMetrics,
    pub debug: bool,
    pub overall_cache_policy: Box<dyn CachePolicy>,
}

/// Executes one request against the gateway's current schema.
pub trait GatewayExecutor<C>: Send + Sync {
    fn execute<'a>(&'a self, request_context: &'a GatewayRequestContext<C>) -> BoxFuture<'a, ExecutionResult>;
}

/// What a gateway hands back once it has loaded.
pub struct GatewayLoadResult<C> {
    /// `None` when the gateway serves no executor (e.g. schema-only mode).
    pub executor: Option<Arc<dyn GatewayExecutor<C>>>,
}

/// The schema a gateway just loaded or switched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaContext {
    /// The API schema, as SDL.
    pub api_schema_sdl: String,
    pub core_supergraph_sdl: String,
}

/// Called every time the gateway loads or updates its schema.
pub type SchemaLoadOrUpdateCallback = Box<dyn Fn(&SchemaContext) + Send + Sync>;

/// Cancels a schema-update subscription when called.
pub type Unsubscriber = Box<dyn FnOnce() + Send>;

/// A gateway the server can load, subscribe to and stop.
pub trait GatewayInterface<C>: Send + Sync {
    fn load<'a>(&'a self, config: &'a GatewayConfig) -> BoxFuture<'a, Result<GatewayLoadResult<C>, BoxError>>;

    fn on_schema_load_or_update(&self, callback: SchemaLoadOrUpdateCallback) -> Unsubscriber;

    fn stop(&self) -> BoxFuture<'_, Result<(), BoxError>>;
}

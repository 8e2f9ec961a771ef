//! Exercises the gateway capability traits with in-test implementations.

use std::sync::{Arc, Mutex};

use futures_core::future::BoxFuture;
use gateway_errors::gateway::{
    CacheHint, CachePolicy, CacheScope, ExecutionResult, GatewayConfig, GatewayExecutor, GatewayInterface,
    GatewayLoadResult, GatewayRequest, GatewayRequestContext, GatewayResponse, RequestMetrics,
    ResolvedCacheHint, SchemaContext, SchemaHash, SchemaLoadOrUpdateCallback, Unsubscriber,
};
use gateway_errors::{BoxError, GenericException, NormalizationOptions, RawFailure};
use serde_json::json;

#[derive(Default)]
struct MinimumPolicy {
    hint: CacheHint,
}

impl CachePolicy for MinimumPolicy {
    fn hint(&self) -> CacheHint {
        self.hint
    }

    fn replace(&mut self, hint: CacheHint) {
        if hint.max_age.is_some() {
            self.hint.max_age = hint.max_age;
        }
        if hint.scope.is_some() {
            self.hint.scope = hint.scope;
        }
    }

    fn restrict(&mut self, hint: CacheHint) {
        if let Some(max_age) = hint.max_age {
            self.hint.max_age = Some(self.hint.max_age.map_or(max_age, |current| current.min(max_age)));
        }
        if hint.scope == Some(CacheScope::Private) {
            self.hint.scope = Some(CacheScope::Private);
        }
    }

    fn policy_if_cacheable(&self) -> Option<ResolvedCacheHint> {
        match self.hint.max_age {
            Some(max_age) if max_age > 0 => {
                Some(ResolvedCacheHint { max_age, scope: self.hint.scope.unwrap_or(CacheScope::Public) })
            },
            _ => None,
        }
    }
}

struct EchoExecutor;

impl GatewayExecutor<String> for EchoExecutor {
    fn execute<'a>(&'a self, request_context: &'a GatewayRequestContext<String>) -> BoxFuture<'a, ExecutionResult> {
        Box::pin(async move {
            match request_context.request.query.as_deref() {
                Some(query) => ExecutionResult::from_data(json!({ "echo": query, "user": request_context.context })),
                None => ExecutionResult::from_failure(GenericException::new("missing query").with_field("status", 400)),
            }
        })
    }
}

#[derive(Default)]
struct StaticGateway {
    listeners: Arc<Mutex<Vec<SchemaLoadOrUpdateCallback>>>,
}

impl GatewayInterface<String> for StaticGateway {
    fn load<'a>(&'a self, config: &'a GatewayConfig) -> BoxFuture<'a, Result<GatewayLoadResult<String>, BoxError>> {
        Box::pin(async move {
            if config.graph_ref.is_none() {
                return Err(BoxError::from("graph ref required"));
            }
            let schema = SchemaContext { api_schema_sdl: "type Query { echo: String }".into(), core_supergraph_sdl: String::new() };
            for listener in self.listeners.lock().unwrap().iter() {
                listener(&schema);
            }
            let executor: Arc<dyn GatewayExecutor<String>> = Arc::new(EchoExecutor);
            Ok(GatewayLoadResult { executor: Some(executor) })
        })
    }

    fn on_schema_load_or_update(&self, callback: SchemaLoadOrUpdateCallback) -> Unsubscriber {
        self.listeners.lock().unwrap().push(callback);
        let listeners = Arc::clone(&self.listeners);
        Box::new(move || listeners.lock().unwrap().clear())
    }

    fn stop(&self) -> BoxFuture<'_, Result<(), BoxError>> {
        Box::pin(async { Ok::<(), BoxError>(()) })
    }
}

fn request_context(query: Option<&str>) -> GatewayRequestContext<String> {
    GatewayRequestContext {
        request: GatewayRequest { query: query.map(str::to_owned), ..GatewayRequest::default() },
        response: None,
        schema_hash: SchemaHash::new("abc123"),
        context: "alice".to_owned(),
        query_hash: "q1".into(),
        source: query.unwrap_or_default().to_owned(),
        operation_name: None,
        errors: Vec::new(),
        metrics: RequestMetrics::default(),
        debug: false,
        overall_cache_policy: Box::new(MinimumPolicy::default()),
    }
}

#[tokio::test]
async fn loaded_executor_runs_requests() {
    let gateway = StaticGateway::default();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let unsubscribe = gateway.on_schema_load_or_update(Box::new(move |schema: &SchemaContext| {
        sink.lock().unwrap().push(schema.api_schema_sdl.clone());
    }));

    let config = GatewayConfig { graph_ref: Some("graph@current".into()), ..GatewayConfig::default() };
    let loaded = gateway.load(&config).await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);

    let executor = loaded.executor.expect("executor");
    let ctx = request_context(Some("{ echo }"));
    let result = executor.execute(&ctx).await;
    let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());
    assert_eq!(response.data, Some(json!({ "echo": "{ echo }", "user": "alice" })));
    assert!(response.errors.is_none());

    unsubscribe();
    gateway.load(&config).await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);

    gateway.stop().await.unwrap();
}

#[tokio::test]
async fn executor_failures_reach_the_client_normalized() {
    let ctx = request_context(None);
    let result = EchoExecutor.execute(&ctx).await;
    assert!(matches!(result.errors.as_slice(), [RawFailure::Exception(_)]));

    let response = GatewayResponse::from_execution(result, &NormalizationOptions::new());
    let errors = response.errors.unwrap();
    assert_eq!(errors[0].message, "missing query");
    assert_eq!(errors[0].extension("exception"), Some(&json!({ "status": 400 })));
}

#[tokio::test]
async fn load_errors_are_reported() {
    let err = StaticGateway::default().load(&GatewayConfig::default()).await.err().unwrap();
    assert_eq!(err.to_string(), "graph ref required");
}

#[test]
fn cache_policy_contract() {
    let mut ctx = request_context(Some("{ echo }"));
    let policy = &mut ctx.overall_cache_policy;
    assert_eq!(policy.policy_if_cacheable(), None);

    policy.replace(CacheHint::new(Some(60), None));
    policy.restrict(CacheHint::new(Some(30), Some(CacheScope::Private)));
    assert_eq!(policy.hint(), CacheHint::new(Some(30), Some(CacheScope::Private)));
    assert_eq!(
        policy.policy_if_cacheable(),
        Some(ResolvedCacheHint { max_age: 30, scope: CacheScope::Private })
    );
}

#[test]
fn wire_shapes_use_camel_case() {
    let config = GatewayConfig { key_hash: Some("h".into()), graph_ref: Some("g@v".into()), key: None };
    assert_eq!(serde_json::to_value(&config).unwrap(), json!({ "keyHash": "h", "graphRef": "g@v" }));

    let hint = CacheHint::new(Some(10), Some(CacheScope::Public));
    assert_eq!(serde_json::to_value(hint).unwrap(), json!({ "maxAge": 10, "scope": "PUBLIC" }));

    let metrics = RequestMetrics { persisted_query_hit: Some(true), ..RequestMetrics::default() };
    assert_eq!(serde_json::to_value(&metrics).unwrap(), json!({ "persistedQueryHit": true }));

    let request: GatewayRequest =
        serde_json::from_value(json!({ "query": "{ a }", "operationName": "A", "variables": { "id": 1 } })).unwrap();
    assert_eq!(request.operation_name.as_deref(), Some("A"));
    assert_eq!(request.variables.unwrap()["id"], 1);

    assert_eq!(serde_json::to_value(SchemaHash::new("abc")).unwrap(), json!("abc"));
}

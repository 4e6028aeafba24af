//! HTTP host: owns the listener, the shared middleware stack, the
//! diagnostic endpoints and the merged OpenAPI document. Catalog routes are
//! mounted under `/api/v1`.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{middleware::from_fn, routing::get, Router};
use catalog_db::LazyDb;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod model;
pub mod openapi;
pub mod request_id;
pub mod web;

pub use config::{
    parse_allowed_origins, ApiIngressConfig, DEFAULT_ALLOWED_ORIGINS, DEFAULT_BODY_LIMIT_BYTES,
};

pub const API_PREFIX: &str = "/api/v1";

/// Owns the HTTP surface of the server.
pub struct ApiIngress {
    config: ApiIngressConfig,
    db: Arc<LazyDb>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig, db: Arc<LazyDb>) -> Self {
        Self { config, db }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Full application router: host endpoints, `api` nested under
    /// [`API_PREFIX`], then the middleware stack.
    pub fn build_router(&self, api: Router, openapi: utoipa::openapi::OpenApi) -> Result<Router> {
        let openapi = serde_json::to_value(&openapi).context("serialize OpenAPI document")?;
        let state = web::HostState {
            db: self.db.clone(),
            openapi: Arc::new(openapi),
        };

        let router = Router::new()
            .route("/", get(web::root))
            .route("/health", get(web::health_check))
            .route("/version", get(web::version))
            .route("/ping", get(web::ping))
            .route("/db-ping", get(web::db_ping))
            .route("/openapi.json", get(web::openapi_json))
            .with_state(state)
            .nest(API_PREFIX, api)
            .fallback(web::not_found);

        // Layers run outermost-last: the request id is set before tracing sees
        // the request, and body limit / CORS sit closest to the handlers.
        let x_request_id = request_id::header();
        let router = router
            .layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes))
            .layer(self.cors_layer())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        tracing::debug!(
            origins = self.config.allowed_origins.len(),
            timeout_sec = self.config.request_timeout.as_secs(),
            "router built"
        );
        Ok(router)
    }

    /// Credentialed CORS for the configured origins. A wildcard cannot be
    /// combined with credentials, so it is dropped.
    fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                if origin == "*" {
                    tracing::warn!("ignoring wildcard CORS origin: credentials are allowed");
                    return None;
                }
                match HeaderValue::from_str(origin) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::ACCEPT,
                HeaderName::from_static("x-requested-with"),
            ])
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(self.config.bind_addr.as_str())
            .await
            .with_context(|| format!("bind {}", self.config.bind_addr))?;
        tracing::info!(addr = %listener.local_addr()?, "HTTP server bound");
        Ok(listener)
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("HTTP server shutting down gracefully");
            })
            .await
            .context("HTTP server failed")
    }
}

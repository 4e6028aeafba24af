use std::sync::Arc;

use axum::Router;
use catalog_db::LazyDb;
use tracing::{info, warn};

use crate::api::rest::routes;
use crate::config::BlackholesConfig;
use crate::domain::seed::{seed_catalog, SeedOutcome};
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::LazyBlackHolesRepository;

/// Wires the catalog: lazy storage, domain service and REST routes.
pub struct BlackholesModule {
    repo: Arc<LazyBlackHolesRepository>,
    service: Arc<Service>,
    config: BlackholesConfig,
}

impl BlackholesModule {
    pub fn new(db: Arc<LazyDb>, config: BlackholesConfig) -> Self {
        let repo = Arc::new(LazyBlackHolesRepository::new(db));
        let service = Arc::new(Service::new(repo.clone(), ServiceConfig::from(&config)));
        Self {
            repo,
            service,
            config,
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// Routes to nest under `/api/v1`.
    pub fn router(&self) -> Router {
        routes::register_routes(Router::new(), self.service.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        routes::openapi()
    }

    /// Startup hook: create the schema and seed an empty catalog.
    /// Storage problems are logged, never returned; the server starts regardless.
    pub async fn start(&self) -> SeedOutcome {
        if !self.config.seed_on_startup {
            if let Err(e) = self.repo.connection().await {
                warn!(error = %format!("{e:#}"), "catalog storage not ready at startup");
            }
            info!("catalog seeding disabled by configuration");
            return SeedOutcome::Skipped {
                reason: "disabled by configuration".to_string(),
            };
        }
        seed_catalog(self.repo.as_ref()).await
    }
}

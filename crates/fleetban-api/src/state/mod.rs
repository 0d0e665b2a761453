//! Application state
//!
//! Shared across all handlers: the service context, configuration, the
//! pools probed by readiness checks, and the token verifier.

use std::sync::Arc;

use fleetban_common::{AppConfig, JwtService};
use fleetban_db::PgPool;
use fleetban_relay::RedisPool;
use fleetban_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    pool: PgPool,
    redis_pool: RedisPool,
    jwt_service: Arc<JwtService>,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        config: AppConfig,
        pool: PgPool,
        redis_pool: RedisPool,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(&config.jwt.secret));
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            pool,
            redis_pool,
            jwt_service,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &self.config)
            .field("redis_pool", &self.redis_pool)
            .finish_non_exhaustive()
    }
}

//! Server setup and initialization
//!
//! Wires the pools, repositories and relay worker together and runs the
//! HTTP server until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use fleetban_common::{AppConfig, AppError};
use fleetban_core::{BotChannel, SnowflakeGenerator};
use fleetban_db::{
    create_pool, run_migrations, PgAdminRepository, PgBanDetailRepository, PgBanRepository,
    PgNodeRepository, PgPoolConfig,
};
use fleetban_relay::{
    DeliveryPolicy, DisabledBotChannel, HttpBotChannel, NodeChannels, NotificationDispatcher,
    RedisFleetRelay, RedisPool, RelayQueue, RelayWorker,
};
use fleetban_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How long queued notices may take to drain after the server stops
const RELAY_DRAIN_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = apply_middleware(
        api.merge(health_routes()),
        &config.cors,
        config.app.env.is_production(),
    );

    Ok(router.with_state(state))
}

/// Connect to PostgreSQL and Redis, start the relay worker, and build the
/// state shared by the handlers
///
/// The worker stops once every clone of the returned state is dropped.
pub async fn create_app_state(config: AppConfig) -> Result<(AppState, JoinHandle<()>), AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PgPoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let ban_repo = Arc::new(PgBanRepository::new(pool.clone()));
    let detail_repo = Arc::new(PgBanDetailRepository::new(pool.clone()));
    let node_repo = Arc::new(PgNodeRepository::new(pool.clone()));
    let admin_repo = Arc::new(PgAdminRepository::new(pool.clone()));

    let bot: Arc<dyn BotChannel> = match &config.relay.bot_export_url {
        Some(url) => Arc::new(
            HttpBotChannel::new(
                url,
                config.relay.bot_export_token.clone(),
                config.relay.timeout,
            )
            .map_err(|e| AppError::Config(e.to_string()))?,
        ),
        None => {
            warn!("BOT_EXPORT_URL not set; bot export disabled");
            Arc::new(DisabledBotChannel)
        }
    };
    let fleet = Arc::new(RedisFleetRelay::new(
        redis_pool.clone(),
        NodeChannels::new(config.relay.fleet_channel_prefix.clone()),
    ));
    let dispatcher = NotificationDispatcher::new(
        bot,
        fleet,
        node_repo.clone(),
        DeliveryPolicy::from(&config.relay),
    );

    let (relay, receiver) = RelayQueue::bounded(config.relay.queue_capacity);
    let worker = RelayWorker::new(
        receiver,
        Arc::new(dispatcher),
        config.relay.max_concurrent_jobs,
    )
    .spawn();

    let service_context = ServiceContextBuilder::new()
        .ban_repo(ban_repo)
        .detail_repo(detail_repo)
        .node_repo(node_repo)
        .admin_repo(admin_repo)
        .relay(relay)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok((
        AppState::new(service_context, config, pool, redis_pool),
        worker,
    ))
}

/// Serve until Ctrl-C
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let (state, worker) = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &addr).await?;

    info!("Server stopped; draining relay queue");
    match tokio::time::timeout(RELAY_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Relay worker panicked"),
        Err(_) => warn!("Relay queue did not drain in time"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

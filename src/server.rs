use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::cache::{response_cache_layer, ResponseCache};
use crate::config::Config;
use crate::initia::InitiaClient;
use crate::routes;

/// Shared state handed to every request handler.
pub struct AppState {
    pub config: Config,
    pub initia: InitiaClient,
    pub cache: Option<ResponseCache>,
}

/// Build the shared state: one Initia client per gateway, and the response
/// cache when enabled.
pub fn build_state(config: Config) -> Arc<AppState> {
    let initia = InitiaClient::new(&config.endpoint, &config.source_chain_id);

    let cache = if config.cache_enabled {
        let ttl_ms = config.cache_duration_ms();
        if ttl_ms == 0 {
            warn!(
                "CACHE_DURATION '{}' did not parse to a duration; cache disabled",
                config.cache_duration
            );
            None
        } else {
            let ttl = Duration::from_millis(ttl_ms);
            info!("Response cache enabled (TTL {:?})", ttl);
            Some(ResponseCache::new(ttl))
        }
    } else {
        None
    };

    Arc::new(AppState {
        config,
        initia,
        cache,
    })
}

/// Assemble the router with every gateway route registered.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::welcome))
        .route("/v1", get(routes::ledger::ledger_info))
        .route(
            "/v1/blocks/by_height/{height}",
            get(routes::blocks::block_by_height),
        )
        .route(
            "/v1/transactions/by_version/{version}",
            get(routes::transactions::transaction_by_version),
        )
        .route("/v1/accounts/{address}/modules", get(routes::accounts::modules))
        .route(
            "/v1/accounts/{address}/module/{module}",
            get(routes::accounts::module),
        )
        .route(
            "/v1/accounts/{address}/resources",
            get(routes::accounts::resources),
        )
        .route(
            "/v1/accounts/{address}/resource/{resource}",
            get(routes::accounts::resource),
        )
        .route("/v1/view", post(routes::view::view_function));

    if state.cache.is_some() {
        router = router
            .route("/cache/stats", get(routes::cache_admin::stats))
            .route("/cache/index", get(routes::cache_admin::index))
            .route("/cache", delete(routes::cache_admin::clear));
    }

    router
        .fallback(routes::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    response_cache_layer,
                )),
        )
        .with_state(state)
}

/// Start the gateway and serve until shutdown.
pub async fn start_server(config: Config) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Starting Initia-Aptos bridge on {}", addr);
    info!("Upstream: {} ({})", config.endpoint, config.source_chain_id);

    let state = build_state(config);

    // Probe the upstream once so a dead endpoint shows up at startup.
    match state.initia.latest_block().await {
        Ok(block) => {
            info!("Initia head: height={}", block.block.header.height);
        }
        Err(e) => {
            warn!("Could not reach Initia REST (will retry on requests): {}", e);
        }
    }

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind server to {addr}"))?;

    info!("Bridge listening on http://{}", addr);
    info!("Compatible with Aptos SDKs, wallets, and indexer tooling");

    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}

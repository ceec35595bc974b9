//! Router assembly and server lifecycle.

use crate::cache::ContentCache;
use crate::cms::CmsClient;
use crate::config::Config;
use crate::i18n::TranslationMetrics;
use crate::security::constant_time_compare;
use crate::{feed, middleware as locale_middleware, pages};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub cms: CmsClient,
    pub cache: ContentCache,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, cms: CmsClient) -> SharedState {
        let cache = ContentCache::new(Duration::from_secs(config.revalidate_secs));
        Arc::new(Self { config, cms, cache })
    }
}

/// Build the application router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/revalidate", post(revalidate))
        .route("/:locale", get(pages::home))
        .route("/:locale/", get(pages::home))
        .route("/:locale/posts", get(pages::posts_index))
        .route("/:locale/posts/page/:page_number", get(pages::posts_paged))
        .route("/:locale/posts/:slug", get(pages::article))
        .route("/:locale/privacy", get(pages::privacy))
        .route("/:locale/terms", get(pages::terms))
        .route("/:locale/feed.xml", get(feed::feed))
        .fallback(pages::fallback)
        .layer(middleware::from_fn(locale_middleware::locale_redirect))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until a shutdown signal arrives.
pub async fn run(state: SharedState) -> Result<()> {
    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {addr}"))?;

    info!("Listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("ctrl_c signal received"),
        _ = terminate => info!("terminate signal received"),
    }
}

/// Liveness probe with the translation lookup counters attached.
async fn healthz(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "translations": TranslationMetrics::global().report(),
    }))
}

/// Cache purge webhook, called by the CMS when editors publish.
///
/// Requires `X-Revalidate-Key` to match the configured key; disabled (404)
/// when no key is configured.
async fn revalidate(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let Some(expected) = state.config.revalidate_key.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let provided = headers
        .get("X-Revalidate-Key")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !constant_time_compare(provided, expected) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let evicted = state.cache.purge().await;
    info!("Cache purged via webhook ({} entries)", evicted);
    Json(json!({ "revalidated": true, "evicted": evicted })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            environment: "test".to_string(),
            port: 0,
            cms_base_url: "http://localhost:3000".to_string(),
            cms_api_key: None,
            site_url: "http://localhost:8080".to_string(),
            revalidate_secs: 600,
            revalidate_key: Some("purge-secret".to_string()),
        }
    }

    #[test]
    fn test_state_construction() {
        let config = test_config();
        let cms = CmsClient::from_config(&config).expect("client should build");
        let state = AppState::new(config, cms);

        assert_eq!(state.config.environment, "test");
    }

    #[test]
    fn test_router_builds() {
        let config = test_config();
        let cms = CmsClient::from_config(&config).expect("client should build");
        let _router = build_router(AppState::new(config, cms));
    }
}

pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod screens;
pub mod store;
pub mod validation;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::get,
};
use serde_json::json;
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, error::AppError, store::MovieStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
}

impl AppState {
    pub async fn connect(config: Config) -> Result<Self, sea_orm::DbErr> {
        let db = db::connect_and_migrate(&config.database_url).await?;
        Ok(Self { config: Arc::new(config), store: MovieStore::new(db) })
    }
}

/// Builds the full HTTP surface: the movie routes under the configured
/// prefix, plus `/health`.
pub fn app(state: Arc<AppState>) -> Router {
    let prefix = state.config.api_prefix.trim_end_matches('/').to_string();
    let timeout = state.config.request_timeout;

    let api = routes::router();
    let root = if prefix.is_empty() { api } else { Router::new().nest(&prefix, api) };

    with_request_timeout(root.route("/health", get(health)).with_state(state), timeout)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Bounds every request by `timeout`; overruns answer 408 with a `{message}` body.
fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        AppError::internal()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::models::Message;

    #[tokio::test]
    async fn slow_requests_time_out_with_message() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let router = with_request_timeout(slow, Duration::from_millis(20));

        let resp = router
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: Message = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Request timed out");
    }

    #[tokio::test]
    async fn fast_requests_pass_through() {
        let router = with_request_timeout(
            Router::new().route("/fast", get(|| async { "ok" })),
            Duration::from_secs(5),
        );
        let resp = router
            .oneshot(Request::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

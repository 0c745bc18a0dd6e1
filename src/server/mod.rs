use std::any::Any;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::domain::ports::DestinationStore;

pub mod handlers;
pub mod lifecycle;

pub use lifecycle::ServerHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DestinationStore>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn DestinationStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    with_layers(api_routes()).with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/destinations", get(handlers::list_destinations))
        .route("/api/destinations/{id}", get(handlers::get_destination))
}

fn with_layers(routes: Router<AppState>) -> Router<AppState> {
    routes
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}

//! API Routes
//!
//! Configures the Axum router with all inventory API endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, health_handler, list_handler, login_handler, patch_handler,
    refresh_handler, register_handler, retrieve_handler, stats_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /list` - All inventory records
/// - `GET /retrieve/:pk` - One record
/// - `POST /create` - New record
/// - `PUT|PATCH /update/:pk` - Replace or patch a record
/// - `DELETE /delete/:pk` - Remove a record
/// - `POST /api/register/`, `POST /api/login/`, `POST /api/token/refresh/` - Credentials
/// - `GET /stats`, `GET /health` - Operations
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/list", get(list_handler))
        .route("/retrieve/:pk", get(retrieve_handler))
        .route("/create", post(create_handler))
        .route("/update/:pk", put(update_handler).patch(patch_handler))
        .route("/delete/:pk", delete(delete_handler))
        .route("/api/register/", post(register_handler))
        .route("/api/login/", post(login_handler))
        .route("/api/token/refresh/", post(refresh_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::suggest::SuggestService;

pub mod handlers;
pub mod models;

pub fn create_router(suggest_service: Arc<SuggestService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/suggest", post(handlers::suggest_handler))
        .with_state(suggest_service)
        .layer(cors)
}

pub mod app_state;
pub mod client;
pub mod configuration;
pub mod errors;
pub mod mailer;
mod routes;
pub mod submission;

use crate::app_state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn create_app(app_state: AppState, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    let static_files = ServeDir::new(static_dir).not_found_service(ServeFile::new(index));
    Router::new()
        .route("/health_check", get(routes::health_check))
        .route("/submit", post(routes::submit))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use image_projection_core::CanvasSize;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers;

/// Per-router state shared with handlers.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub canvas: CanvasSize,
}

/// Create the axum router with all routes.
pub fn create_router(config: &ServerConfig) -> Router {
    let state = AppState {
        canvas: config.canvas,
    };

    Router::new()
        // --- Core ---
        .route("/status", get(handlers::status_handler))
        // --- Processing ---
        .route("/processImage", post(handlers::process_image))
        .route(
            "/processImageBrightness",
            post(handlers::process_image_brightness),
        )
        // --- Middleware ---
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

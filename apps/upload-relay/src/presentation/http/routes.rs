use super::{
    handlers::{health, home, upload},
    middleware::{logging::logging_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

pub fn create_router(state: AppState) -> Router {
    let stored_uploads = ServeDir::new(&state.config.uploads_dir);

    Router::new()
        // Pages
        .route("/", get(home::index))
        .route("/upload", post(upload::upload_file))
        // Stored uploads
        .nest_service("/uploads", stored_uploads)
        // Health
        .route("/health", get(health::health_check))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

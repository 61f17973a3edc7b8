pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod templates;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Whole-request cap: both file parts at their per-part maximum plus form
/// overhead.
const BODY_LIMIT: usize = 2 * storage::MAX_FILE_SIZE + 64 * 1024;

pub fn app(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::index))
        .route("/upload", post(routes::upload_handler))
        .route("/blueprint/:xml_file_path", get(routes::view_blueprint))
        .route("/vote", post(routes::vote_handler))
        .route("/report", post(routes::report_handler));

    if state.config.removal_enabled {
        router = router.route("/remove/:xml_file_path", get(routes::remove_handler));
    }

    router
        .nest_service(
            storage::PUBLIC_UPLOAD_PREFIX,
            ServeDir::new(&state.config.upload_folder),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

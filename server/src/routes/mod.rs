use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

mod error;
mod pages;

pub use error::RouteError;

pub fn configure(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(pages::index))
        .route("/pages/new", post(pages::create))
        .route("/pages/:id", get(pages::editor).post(pages::save))
        .route("/api/pages", get(pages::api_list))
        .route("/api/pages/:id", get(pages::api_get))
        .nest_service("/pkg", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

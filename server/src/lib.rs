//! HTTP server for the page editor: HTML shells, page CRUD and the wasm bundle.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;

pub mod cli;
pub mod config;
pub mod routes;
pub mod store;
pub mod views;

use store::PageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PageStore>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn PageStore>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            static_dir: static_dir.into(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    routes::configure(state)
}

pub(crate) mod autosave;

use crate::api::ApiClient;
use crate::models::PageSummary;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Page list for the home view; refreshed on demand.
    pub pages: RwSignal<Vec<PageSummary>>,
    pub pages_loading: RwSignal<bool>,
    pub pages_error: RwSignal<Option<String>>,

    /// Load guard: ignore stale list responses.
    pub pages_request_id: RwSignal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            pages: RwSignal::new(vec![]),
            pages_loading: RwSignal::new(false),
            pages_error: RwSignal::new(None),
            pages_request_id: RwSignal::new(0),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

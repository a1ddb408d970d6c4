//! Page persistence.
//!
//! Saves are replace-all: the stored block set of a page is whatever the last
//! save sent, with `order` recomputed from array position.

mod sqlite;

use async_trait::async_trait;
use pagesmith::models::{Page, PageData};
use thiserror::Error;

pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page {0} not found")]
    NotFound(String),

    #[error("refusing to save a page with no title and no blocks")]
    EmptySave,

    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait PageStore: Send + Sync {
    /// Insert a new page with a generated id. Blocks get `order = index`.
    async fn create_page(&self, data: &PageData) -> StoreResult<Page>;

    /// One page, blocks ascending by `order`.
    async fn load_page(&self, id: &str) -> StoreResult<Page>;

    /// Replace title and the whole block set of `id` in one transaction.
    async fn save_page(&self, id: &str, data: &PageData) -> StoreResult<Page>;

    /// All pages with their blocks, most recently updated first.
    async fn list_pages(&self) -> StoreResult<Vec<Page>>;
}

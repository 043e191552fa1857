//! Persistence access for category rows.
//!
//! Reads that stand alone go straight through [`CategoryStore`]. Every multi-step
//! write opens a [`CategoryTx`] with [`CategoryStore::begin`]; nothing it does is
//! visible to other callers until [`CategoryTx::commit`], and dropping it without
//! committing discards the work.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::features::categories::models::{Category, CategoryFilter};

pub use memory::InMemoryCategoryStore;
pub use postgres::PgCategoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// Uniqueness violation on `slug`
    #[error("slug already exists")]
    DuplicateSlug,

    /// `parent_id` references a row that does not exist
    #[error("referenced parent does not exist")]
    MissingParent,

    /// Row is still the parent of other rows
    #[error("record is still referenced by other rows")]
    StillReferenced,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Open a write transaction
    async fn begin(&self) -> StoreResult<Box<dyn CategoryTx>>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Category>>;

    async fn get_by_slug(&self, slug: &str) -> StoreResult<Option<Category>>;

    /// Filtered scan ordered by name ascending
    async fn scan(&self, filter: CategoryFilter) -> StoreResult<Vec<Category>>;

    /// Every row ordered by level ascending, then name ascending
    async fn scan_all(&self) -> StoreResult<Vec<Category>>;

    /// Case-insensitive substring match over name and description, ordered by name
    async fn search_by_pattern(&self, needle: &str) -> StoreResult<Vec<Category>>;

    /// Number of posts linked to the category
    async fn count_associations(&self, category_id: Uuid) -> StoreResult<i64>;
}

#[async_trait]
pub trait CategoryTx: Send {
    async fn get(&mut self, id: Uuid) -> StoreResult<Option<Category>>;

    /// Direct children ordered by name ascending
    async fn children(&mut self, parent_id: Uuid) -> StoreResult<Vec<Category>>;

    async fn create(&mut self, category: &Category) -> StoreResult<Category>;

    /// Full update of the mutable fields; `NotFound` if the row is gone
    async fn save(&mut self, category: &Category) -> StoreResult<Category>;

    async fn delete(&mut self, id: Uuid) -> StoreResult<()>;

    async fn commit(self: Box<Self>) -> StoreResult<()>;
}

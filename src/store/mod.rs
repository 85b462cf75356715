//! Data-access interfaces for the catalog.
//!
//! Handlers only ever see `dyn CatalogStore`. Two backends implement it:
//! [`postgres::PostgresStore`] for real deployments and
//! [`memory::InMemoryStore`] for tests and local runs without a database.
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::{category, movie};

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category name already exists")]
    DuplicateName,
    #[error("category is still referenced by movies")]
    CategoryInUse,
    #[error("referenced category does not exist")]
    UnknownCategory,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A movie together with the category it points at, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub movie: movie::Model,
    pub category: Option<category::Model>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub trending_only: bool,
}

impl MovieFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn trending() -> Self {
        Self { trending_only: true }
    }
}

#[derive(Debug, Clone)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub thumbnail_url: String,
    pub stream_url: String,
    pub category_id: Option<Uuid>,
    pub is_trending: bool,
}

/// Field-level changes for a movie. `None` leaves the stored value alone.
///
/// `category_id` is doubly optional: `Some(None)` clears the link.
#[derive(Debug, Clone, Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub thumbnail_url: Option<String>,
    pub stream_url: Option<String>,
    pub category_id: Option<Option<Uuid>>,
    pub is_trending: Option<bool>,
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> StoreResult<Vec<category::Model>>;

    async fn find_category(&self, id: Uuid) -> StoreResult<Option<category::Model>>;

    /// Exact, case-sensitive match on the category name.
    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<category::Model>>;

    /// Fails with [`StoreError::DuplicateName`] if the name is taken.
    async fn create_category(&self, name: String) -> StoreResult<category::Model>;

    /// Returns `Ok(None)` when no category has `id`.
    async fn rename_category(&self, id: Uuid, name: String)
    -> StoreResult<Option<category::Model>>;

    /// Removes the category unless a movie still references it, in which case
    /// [`StoreError::CategoryInUse`] is returned and nothing changes.
    /// Returns `Ok(false)` when no category has `id`.
    async fn delete_category(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list_movies(&self, filter: MovieFilter) -> StoreResult<Vec<MovieRecord>>;

    async fn create_movie(&self, movie: NewMovie) -> StoreResult<MovieRecord>;

    /// Returns `Ok(None)` when no movie has `id`.
    async fn update_movie(&self, id: Uuid, changes: MovieChanges)
    -> StoreResult<Option<MovieRecord>>;

    /// Returns `Ok(false)` when no movie has `id`.
    async fn delete_movie(&self, id: Uuid) -> StoreResult<bool>;
}

pub trait CatalogStore: MovieStore + CategoryStore {
    fn backend_name(&self) -> &'static str;
}

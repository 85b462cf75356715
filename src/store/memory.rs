//! In-memory catalog store.
//!
//! Both collections live behind a single `tokio::sync::RwLock`, so every
//! mutation (including the "is this category referenced?" check before a
//! delete) happens atomically with respect to other requests. Nothing is
//! persisted; state disappears with the process.
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CatalogStore, CategoryStore, MovieChanges, MovieFilter, MovieRecord, MovieStore, NewMovie,
    StoreError, StoreResult,
};
use crate::entities::{category, movie};

#[derive(Debug, Default)]
struct Collections {
    // Vecs keep insertion order, which is what listings return.
    categories: Vec<category::Model>,
    movies: Vec<movie::Model>,
}

impl Collections {
    fn category(&self, id: Uuid) -> Option<&category::Model> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        self.categories
            .iter()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn record(&self, movie: movie::Model) -> MovieRecord {
        let category = movie.category_id.and_then(|id| self.category(id).cloned());
        MovieRecord { movie, category }
    }

    fn check_category(&self, category_id: Option<Uuid>) -> StoreResult<()> {
        match category_id {
            Some(id) if self.category(id).is_none() => Err(StoreError::UnknownCategory),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl CategoryStore for InMemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<category::Model>> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn find_category(&self, id: Uuid) -> StoreResult<Option<category::Model>> {
        Ok(self.inner.read().await.category(id).cloned())
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<category::Model>> {
        let guard = self.inner.read().await;
        Ok(guard.categories.iter().find(|c| c.name == name).cloned())
    }

    async fn create_category(&self, name: String) -> StoreResult<category::Model> {
        let mut guard = self.inner.write().await;
        if guard.name_taken(&name, None) {
            return Err(StoreError::DuplicateName);
        }
        let timestamp = now();
        let created = category::Model {
            id: Uuid::new_v4(),
            name,
            created_at: timestamp,
            updated_at: timestamp,
        };
        guard.categories.push(created.clone());
        Ok(created)
    }

    async fn rename_category(
        &self,
        id: Uuid,
        name: String,
    ) -> StoreResult<Option<category::Model>> {
        let mut guard = self.inner.write().await;
        if guard.category(id).is_none() {
            return Ok(None);
        }
        if guard.name_taken(&name, Some(id)) {
            return Err(StoreError::DuplicateName);
        }
        let Some(existing) = guard.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        existing.name = name;
        existing.updated_at = now();
        Ok(Some(existing.clone()))
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        let mut guard = self.inner.write().await;
        if guard.movies.iter().any(|m| m.category_id == Some(id)) {
            return Err(StoreError::CategoryInUse);
        }
        let before = guard.categories.len();
        guard.categories.retain(|c| c.id != id);
        Ok(guard.categories.len() != before)
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn list_movies(&self, filter: MovieFilter) -> StoreResult<Vec<MovieRecord>> {
        let guard = self.inner.read().await;
        Ok(guard
            .movies
            .iter()
            .filter(|m| !filter.trending_only || m.is_trending)
            .map(|m| guard.record(m.clone()))
            .collect())
    }

    async fn create_movie(&self, new: NewMovie) -> StoreResult<MovieRecord> {
        let mut guard = self.inner.write().await;
        guard.check_category(new.category_id)?;
        let timestamp = now();
        let created = movie::Model {
            id: Uuid::new_v4(),
            title: new.title,
            year: new.year,
            rating: new.rating,
            thumbnail_url: new.thumbnail_url,
            stream_url: new.stream_url,
            category_id: new.category_id,
            is_trending: new.is_trending,
            created_at: timestamp,
            updated_at: timestamp,
        };
        guard.movies.push(created.clone());
        Ok(guard.record(created))
    }

    async fn update_movie(
        &self,
        id: Uuid,
        changes: MovieChanges,
    ) -> StoreResult<Option<MovieRecord>> {
        let mut guard = self.inner.write().await;
        let Some(index) = guard.movies.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(category_id) = changes.category_id {
            guard.check_category(category_id)?;
        }
        let existing = &mut guard.movies[index];
        if let Some(title) = changes.title {
            existing.title = title;
        }
        if let Some(year) = changes.year {
            existing.year = year;
        }
        if let Some(rating) = changes.rating {
            existing.rating = rating;
        }
        if let Some(thumbnail_url) = changes.thumbnail_url {
            existing.thumbnail_url = thumbnail_url;
        }
        if let Some(stream_url) = changes.stream_url {
            existing.stream_url = stream_url;
        }
        if let Some(category_id) = changes.category_id {
            existing.category_id = category_id;
        }
        if let Some(is_trending) = changes.is_trending {
            existing.is_trending = is_trending;
        }
        existing.updated_at = now();
        let updated = existing.clone();
        Ok(Some(guard.record(updated)))
    }

    async fn delete_movie(&self, id: Uuid) -> StoreResult<bool> {
        let mut guard = self.inner.write().await;
        let before = guard.movies.len();
        guard.movies.retain(|m| m.id != id);
        Ok(guard.movies.len() != before)
    }
}

impl CatalogStore for InMemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::{
    CatalogStore, CategoryStore, MovieChanges, MovieFilter, MovieRecord, MovieStore, NewMovie,
    StoreError, StoreResult,
};
use crate::entities::{category, movie};

/// sea-orm backed store. Uniqueness and referential rules are enforced by the
/// schema in the `migration` crate; this type maps the resulting violations
/// onto [`StoreError`].
#[derive(Debug, Clone)]
pub struct PostgresStore {
    db: DatabaseConnection,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Database::connect(database_url).await?;
        db.ping().await?;
        Ok(Self { db })
    }

    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn with_category(&self, movie: movie::Model) -> StoreResult<MovieRecord> {
        let category = match movie.category_id {
            Some(id) => category::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        Ok(MovieRecord { movie, category })
    }
}

fn category_write_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateName,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::CategoryInUse,
        _ => StoreError::Db(err),
    }
}

fn movie_write_err(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::UnknownCategory,
        _ => StoreError::Db(err),
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl CategoryStore for PostgresStore {
    async fn list_categories(&self) -> StoreResult<Vec<category::Model>> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn find_category(&self, id: Uuid) -> StoreResult<Option<category::Model>> {
        Ok(category::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_category_by_name(&self, name: &str) -> StoreResult<Option<category::Model>> {
        Ok(category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    async fn create_category(&self, name: String) -> StoreResult<category::Model> {
        let timestamp = now();
        let category = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };

        category.insert(&self.db).await.map_err(category_write_err)
    }

    async fn rename_category(
        &self,
        id: Uuid,
        name: String,
    ) -> StoreResult<Option<category::Model>> {
        let Some(existing) = category::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.updated_at = Set(now());

        let updated = active.update(&self.db).await.map_err(category_write_err)?;
        Ok(Some(updated))
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        let references = movie::Entity::find()
            .filter(movie::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if references > 0 {
            return Err(StoreError::CategoryInUse);
        }

        // A movie inserted after the count trips the RESTRICT foreign key instead.
        let result = category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(category_write_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl MovieStore for PostgresStore {
    async fn list_movies(&self, filter: MovieFilter) -> StoreResult<Vec<MovieRecord>> {
        let mut query = movie::Entity::find();
        if filter.trending_only {
            query = query.filter(movie::Column::IsTrending.eq(true));
        }

        let rows = query
            .order_by_asc(movie::Column::CreatedAt)
            .find_also_related(category::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(movie, category)| MovieRecord { movie, category })
            .collect())
    }

    async fn create_movie(&self, new: NewMovie) -> StoreResult<MovieRecord> {
        let timestamp = now();
        let movie = movie::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            year: Set(new.year),
            rating: Set(new.rating),
            thumbnail_url: Set(new.thumbnail_url),
            stream_url: Set(new.stream_url),
            category_id: Set(new.category_id),
            is_trending: Set(new.is_trending),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };

        let created = movie.insert(&self.db).await.map_err(movie_write_err)?;
        self.with_category(created).await
    }

    async fn update_movie(
        &self,
        id: Uuid,
        changes: MovieChanges,
    ) -> StoreResult<Option<MovieRecord>> {
        let Some(existing) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(year) = changes.year {
            active.year = Set(year);
        }
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }
        if let Some(thumbnail_url) = changes.thumbnail_url {
            active.thumbnail_url = Set(thumbnail_url);
        }
        if let Some(stream_url) = changes.stream_url {
            active.stream_url = Set(stream_url);
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(is_trending) = changes.is_trending {
            active.is_trending = Set(is_trending);
        }
        active.updated_at = Set(now());

        let updated = active.update(&self.db).await.map_err(movie_write_err)?;
        self.with_category(updated).await.map(Some)
    }

    async fn delete_movie(&self, id: Uuid) -> StoreResult<bool> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

impl CatalogStore for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

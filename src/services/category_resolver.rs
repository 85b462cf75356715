//! Turns the `category` value a client sends with a movie into a category id.
//!
//! Clients may name a category either by its id or by its display name. The
//! raw value is classified once into a [`CategoryRef`] and then resolved
//! against the store; categories are never created implicitly.
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::CategoryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    /// No category: the field was absent, `null`, or an empty string.
    Empty,
    Id(Uuid),
    Name(String),
}

impl CategoryRef {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => CategoryRef::Empty,
            Some(value) => match Uuid::try_parse(value) {
                Ok(id) => CategoryRef::Id(id),
                Err(_) => CategoryRef::Name(value.to_owned()),
            },
        }
    }
}

/// Resolves a reference to the id of an existing category, or `None` for
/// [`CategoryRef::Empty`].
pub async fn resolve_category<S>(store: &S, reference: CategoryRef) -> AppResult<Option<Uuid>>
where
    S: CategoryStore + ?Sized,
{
    match reference {
        CategoryRef::Empty => Ok(None),
        CategoryRef::Id(id) => store
            .find_category(id)
            .await?
            .map(|category| Some(category.id))
            .ok_or_else(|| AppError::Validation("Invalid category ID".to_string())),
        CategoryRef::Name(name) => store
            .find_category_by_name(&name)
            .await?
            .map(|category| Some(category.id))
            .ok_or_else(|| {
                AppError::Validation("Category not found, please create it first".to_string())
            }),
    }
}

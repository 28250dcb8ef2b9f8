use jiff::Timestamp;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, sea_query::Expr,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    entities::movie,
    error::{StoreError, StoreResult},
    models::{Movie, MovieInput},
    validation,
};

/// Movie persistence. Every write is validated here, so nothing that breaks
/// the field rules reaches the table.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: &MovieInput) -> StoreResult<Movie> {
        let draft = validation::validate(input)?;
        let now = now_micros();

        let model = movie::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(draft.name),
            description: Set(draft.description),
            year: Set(draft.year),
            image: Set(draft.image),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        debug!(id = %model.id, "created movie");
        Ok(Movie::try_from(model)?)
    }

    /// All movies, newest first. Insertion order breaks ties on `created_at`.
    pub async fn list(&self) -> StoreResult<Vec<Movie>> {
        let rows = movie::Entity::find()
            .order_by_desc(movie::Column::CreatedAt)
            .order_by_desc(Expr::cust("rowid"))
            .all(&self.db)
            .await?;

        debug!(count = rows.len(), "listed movies");
        rows.into_iter().map(|m| Movie::try_from(m).map_err(StoreError::from)).collect()
    }

    pub async fn get(&self, id: &str) -> StoreResult<Movie> {
        let id = parse_id(id).ok_or(StoreError::InvalidId)?;
        let model = movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)?;
        Ok(Movie::try_from(model)?)
    }

    /// Replaces every mutable field.
    pub async fn update(&self, id: &str, input: &MovieInput) -> StoreResult<Movie> {
        let id = parse_id(id).ok_or(StoreError::InvalidId)?;
        let existing =
            movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(StoreError::NotFound)?;
        let draft = validation::validate(input)?;

        let mut active: movie::ActiveModel = existing.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.year = Set(draft.year);
        active.image = Set(draft.image);
        active.updated_at = Set(now_micros());

        let model = active.update(&self.db).await?;
        debug!(id = %model.id, "updated movie");
        Ok(Movie::try_from(model)?)
    }

    /// Removes the movie if present. Returns whether a row was deleted;
    /// absent and malformed ids are not errors.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let Some(id) = parse_id(id) else {
            debug!(id = %id, "delete ignored malformed id");
            return Ok(false);
        };
        let result = movie::Entity::delete_by_id(id.clone()).exec(&self.db).await?;
        let removed = result.rows_affected > 0;
        debug!(id = %id, removed, "deleted movie");
        Ok(removed)
    }
}

/// Canonical (lowercase, hyphenated) form of a movie id.
pub fn parse_id(id: &str) -> Option<String> {
    Uuid::parse_str(id.trim()).ok().map(|u| u.to_string())
}

fn now_micros() -> i64 {
    Timestamp::now().as_microsecond()
}

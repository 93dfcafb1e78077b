use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::drink::{Drink, DrinkRow, Ingredient};

/// Failures surfaced by the drink store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("drink not found")]
    NotFound,

    #[error("stored recipe is not valid structured data: {0}")]
    CorruptRecipe(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct DrinkRepository {
    pool: PgPool,
}

impl DrinkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the drinks table if it is missing. Runs once at pool connect.
    pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS drinks (
                id SERIAL PRIMARY KEY,
                title TEXT NOT NULL UNIQUE,
                recipe TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// All drinks ordered by identifier.
    pub async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let rows = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(DrinkRow::materialize)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)
    }

    /// Persist a new drink. Title uniqueness is enforced by the table
    /// constraint; a duplicate insert fails rather than being ignored.
    pub async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, StoreError> {
        let serialized = serde_json::to_string(recipe)?;

        let row = sqlx::query_as::<_, DrinkRow>(
            "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(title)
        .bind(&serialized)
        .fetch_one(&self.pool)
        .await?;

        row.materialize().map_err(StoreError::from)
    }

    /// Apply only the provided fields; omitted fields are left unchanged.
    /// Absent ids fail before any mutation is attempted.
    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Drink, StoreError> {
        let existing = self.find(id).await?;

        let title = title.unwrap_or(existing.title.as_str());
        let serialized = match recipe {
            Some(recipe) => serde_json::to_string(recipe)?,
            None => serde_json::to_string(&existing.recipe)?,
        };

        let row = sqlx::query_as::<_, DrinkRow>(
            "UPDATE drinks SET title = $2, recipe = $3 WHERE id = $1 RETURNING id, title, recipe",
        )
        .bind(id)
        .bind(title)
        .bind(&serialized)
        .fetch_one(&self.pool)
        .await?;

        row.materialize().map_err(StoreError::from)
    }

    /// Remove a drink and return its identifier.
    pub async fn delete(&self, id: i32) -> Result<i32, StoreError> {
        let result = sqlx::query("DELETE FROM drinks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(id)
    }

    async fn find(&self, id: i32) -> Result<Drink, StoreError> {
        let row = sqlx::query_as::<_, DrinkRow>("SELECT id, title, recipe FROM drinks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.materialize()?),
            None => Err(StoreError::NotFound),
        }
    }
}

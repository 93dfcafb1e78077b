use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::ApiJson;
use crate::auth::Claims;
use crate::database::manager::DatabaseManager;
use crate::database::models::drink::{Drink, Ingredient};
use crate::database::repository::DrinkRepository;
use crate::error::ApiError;

/// Request body for POST /drinks.
#[derive(Debug, Deserialize)]
pub struct CreateDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Request body for PATCH /drinks/:id. Omitted fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateDrink {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

/// GET /drinks - public brief listing
pub async fn drinks_get() -> Result<Json<Value>, ApiError> {
    // Read routes report every storage-layer failure as a plain not-found;
    // the real cause is only logged.
    let pool = DatabaseManager::pool().await.map_err(|err| {
        tracing::error!("database unavailable: {}", err);
        ApiError::NotFound
    })?;

    let drinks = DrinkRepository::new(pool).list().await.map_err(|err| {
        tracing::error!("brief listing failed: {}", err);
        ApiError::NotFound
    })?;

    let briefs: Vec<_> = drinks.iter().map(Drink::brief).collect();
    Ok(Json(json!({ "success": true, "drinks": briefs })))
}

/// GET /drinks-detail - full listing, requires get:drinks-detail
pub async fn drinks_detail_get(
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(subject = %claims.sub, "serving detailed listing");

    let pool = DatabaseManager::pool().await.map_err(|err| {
        tracing::error!("database unavailable: {}", err);
        ApiError::NotFound
    })?;

    let drinks = DrinkRepository::new(pool).list().await.map_err(|err| {
        tracing::error!("detailed listing failed: {}", err);
        ApiError::NotFound
    })?;

    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// POST /drinks - create a drink, requires post:drinks
pub async fn drinks_post(
    Extension(claims): Extension<Claims>,
    ApiJson(body): ApiJson<CreateDrink>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!(subject = %claims.sub, title = %body.title, "creating drink");

    let pool = DatabaseManager::pool().await?;
    let drink = DrinkRepository::new(pool)
        .create(&body.title, &body.recipe)
        .await?;

    Ok(Json(json!({ "success": true, "drinks": [drink] })))
}

/// PATCH /drinks/:id - partial update, requires patch:drinks
pub async fn drinks_patch(
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    ApiJson(body): ApiJson<UpdateDrink>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    tracing::debug!(subject = %claims.sub, id, "updating drink");

    let pool = DatabaseManager::pool().await?;
    let drink = DrinkRepository::new(pool)
        .update(id, body.title.as_deref(), body.recipe.as_deref())
        .await?;

    Ok(Json(json!({ "success": true, "drinks": [drink] })))
}

/// DELETE /drinks/:id - requires delete:drinks
pub async fn drinks_delete(
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    tracing::debug!(subject = %claims.sub, id, "deleting drink");

    let pool = DatabaseManager::pool().await?;
    let deleted = DrinkRepository::new(pool).delete(id).await?;

    Ok(Json(json!({ "success": true, "delete": deleted })))
}

// A non-numeric id segment never matches a stored drink
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_requires_title_and_recipe() {
        let ok: CreateDrink = serde_json::from_str(
            r##"{"title": "Flat White", "recipe": [{"name": "espresso", "color": "#4b3621", "parts": 1}]}"##,
        )
        .unwrap();
        assert_eq!(ok.title, "Flat White");
        assert_eq!(ok.recipe.len(), 1);

        assert!(serde_json::from_str::<CreateDrink>(r#"{"recipe": []}"#).is_err());
        assert!(serde_json::from_str::<CreateDrink>(r#"{"title": "X", "recipe": "water"}"#).is_err());
    }

    #[test]
    fn update_body_accepts_any_subset() {
        let title_only: UpdateDrink = serde_json::from_str(r#"{"title": "Mocha"}"#).unwrap();
        assert_eq!(title_only.title.as_deref(), Some("Mocha"));
        assert!(title_only.recipe.is_none());

        let recipe_only: UpdateDrink = serde_json::from_str(
            r##"{"recipe": [{"name": "water", "color": "#aaddff", "parts": 3}]}"##,
        )
        .unwrap();
        assert!(recipe_only.title.is_none());
        assert_eq!(recipe_only.recipe.unwrap()[0].parts, 3);

        let neither: UpdateDrink = serde_json::from_str("{}").unwrap();
        assert!(neither.title.is_none() && neither.recipe.is_none());
    }

    #[test]
    fn non_numeric_ids_map_to_not_found() {
        assert!(matches!(parse_id("abc"), Err(ApiError::NotFound)));
        assert!(matches!(parse_id("12.5"), Err(ApiError::NotFound)));
        assert_eq!(parse_id("42").unwrap(), 42);
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry in a drink's recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// A drink as stored. The recipe column holds the ingredient list
/// serialized as JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: i32,
    pub title: String,
    pub recipe: String,
}

/// Fully materialized drink; serializes as the full projection.
#[derive(Debug, Clone, Serialize)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Brief ingredient view: the name is withheld from the public listing.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientBrief {
    pub color: String,
    pub parts: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrinkBrief {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<IngredientBrief>,
}

impl Drink {
    pub fn brief(&self) -> DrinkBrief {
        DrinkBrief {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| IngredientBrief {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }
}

impl DrinkRow {
    /// Parse the stored recipe text. A row that fails here is corrupt;
    /// recipes are validated structured data before they are ever written.
    pub fn materialize(self) -> Result<Drink, serde_json::Error> {
        let recipe = serde_json::from_str(&self.recipe)?;
        Ok(Drink {
            id: self.id,
            title: self.title,
            recipe,
        })
    }
}

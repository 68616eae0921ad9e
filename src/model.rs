use serde::{Deserialize, Serialize};

/// One ingredient decoded from a `{quantity;unit;name}` annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub quantity: f64,
    pub unit: String,
    pub name: String,
}

/// Recipe document as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(rename = "contributorName", default)]
    pub contributor_name: Option<String>,
    #[serde(rename = "cookingMethod", default)]
    pub cooking_method: Option<String>,
    #[serde(rename = "recipeTitle", default)]
    pub recipe_title: Option<String>,
    /// Recipe steps, each possibly containing ingredient annotations
    #[serde(rename = "recipe", default)]
    pub steps: Vec<String>,
}

/// Descriptive fields of a recipe, without its steps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeInfo {
    pub contributor: Option<String>,
    pub method: Option<String>,
    pub title: Option<String>,
}

impl RecipeDocument {
    pub fn info(&self) -> RecipeInfo {
        RecipeInfo {
            contributor: self.contributor_name.clone(),
            method: self.cooking_method.clone(),
            title: self.recipe_title.clone(),
        }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }
}

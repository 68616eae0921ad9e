use log::{debug, info};
use rusqlite::types::Value;

use super::UploadSummary;
use crate::annotation::{parse_steps, ParseResult};
use crate::error::ChompError;
use crate::model::{IngredientRecord, RecipeDocument};
use crate::store::{LookupValues, Store, Table};

/// Upload a recipe document and its annotated ingredients
///
/// This pipeline:
/// 1. Checks the contributor, cooking method and title are present
/// 2. Parses every step, so a malformed annotation aborts before any write
/// 3. Looks up or inserts contributor, method, dish and recipe rows
/// 4. Looks up or inserts one ingredient row per annotation, in step order
///
/// All writes happen in a single transaction.
pub fn upload_recipe(store: &Store, document: &RecipeDocument) -> Result<UploadSummary, ChompError> {
    let recipe_info = document.info();
    let contributor = required(recipe_info.contributor, "contributorName")?;
    let method = required(recipe_info.method, "cookingMethod")?;
    let title = required(recipe_info.title, "recipeTitle")?;

    let parsed = parse_steps(document.steps())?;

    let summary = store.in_transaction(|store| {
        let contributor_id = store.upload_contributor(&contributor)?;
        let method_id = store.upload_data(Table::Method, &method.as_str().into())?;
        let dish_id = store.upload_data(Table::Dish, &title.as_str().into())?;
        let recipe_id = store.upload_data(
            Table::Recipe,
            &LookupValues::Many(vec![
                Value::Integer(dish_id),
                Value::Integer(contributor_id),
                Value::Integer(method_id),
            ]),
        )?;

        let mut summary = UploadSummary {
            recipe_id,
            contributor_id,
            method_id,
            dish_id,
            ..Default::default()
        };

        for (step, result) in parsed.iter().enumerate() {
            match result {
                ParseResult::NoAnnotations => {
                    debug!("Step {} of '{}' has no ingredient annotations", step, title);
                    summary.steps_without_annotations.push(step);
                }
                ParseResult::Ingredients(records) => {
                    for record in records {
                        let id = store.upload_data(Table::Ingredient, &ingredient_values(recipe_id, record))?;
                        summary.ingredient_ids.push(id);
                    }
                }
            }
        }

        Ok(summary)
    })?;

    info!(
        "Uploaded '{}' by {} as recipe {} with {} ingredients",
        title,
        contributor,
        summary.recipe_id,
        summary.ingredient_ids.len()
    );
    Ok(summary)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ChompError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ChompError::MissingField(field))
}

fn ingredient_values(recipe_id: i64, record: &IngredientRecord) -> LookupValues {
    LookupValues::Many(vec![
        Value::Integer(recipe_id),
        Value::Real(record.quantity),
        Value::Text(record.unit.clone()),
        Value::Text(record.name.clone()),
    ])
}

use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::ChompError;
use crate::model::RecipeDocument;

/// Path of the recipe document called `name` inside `data_dir`
pub fn recipe_path(data_dir: &Path, name: &str) -> PathBuf {
    data_dir.join(format!("{name}.json"))
}

/// Reads the recipe document `<data_dir>/<name>.json`
///
/// # Errors
/// Returns an error if:
/// - The file does not exist (`ChompError::RecipeNotFound`)
/// - The file cannot be read
/// - The file is not a valid recipe document
pub async fn read_recipe_file(data_dir: &Path, name: &str) -> Result<RecipeDocument, ChompError> {
    read_recipe_path(&recipe_path(data_dir, name)).await
}

/// Reads a recipe document from an explicit path
pub async fn read_recipe_path(path: &Path) -> Result<RecipeDocument, ChompError> {
    let raw = fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ChompError::RecipeNotFound(path.to_path_buf()),
        _ => ChompError::Io(e),
    })?;

    let document: RecipeDocument = serde_json::from_str(&raw)?;
    debug!(
        "Loaded recipe {:?} with {} steps from {}",
        document.recipe_title,
        document.steps.len(),
        path.display()
    );
    Ok(document)
}

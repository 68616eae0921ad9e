pub mod annotation;
pub mod builder;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipelines;
pub mod store;

use std::path::Path;

use log::debug;

// Re-export key types for easier access
pub use annotation::{
    decode_annotation, locate_annotations, parse_step, parse_steps, AnnotationError,
    AnnotationSpan, ParseResult,
};
pub use builder::{RecipeUploader, RecipeUploaderBuilder, UploadResult};
pub use config::ChompConfig;
pub use error::ChompError;
pub use model::{IngredientRecord, RecipeDocument, RecipeInfo};
pub use pipelines::UploadSummary;
pub use store::{LookupValues, SqlTemplates, Store, Table};

/// Read a recipe file and upload it to the database at `db_path`
///
/// The database schema is created first if it does not exist.
///
/// # Example
/// ```no_run
/// # use chomping::upload_recipe_file;
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = upload_recipe_file(Path::new("data/soda-bread.json"), Path::new("chomping.db")).await?;
/// println!("stored as recipe {}", summary.recipe_id);
/// # Ok(())
/// # }
/// ```
pub async fn upload_recipe_file(recipe: &Path, db_path: &Path) -> Result<UploadSummary, ChompError> {
    let document = loader::read_recipe_path(recipe).await?;
    let store = Store::open(db_path)?;
    store.init_schema()?;
    debug!("Uploading {} to {}", recipe.display(), db_path.display());
    pipelines::upload::upload_recipe(&store, &document)
}

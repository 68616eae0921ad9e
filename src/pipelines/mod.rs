pub mod upload;

use serde::Serialize;

/// Row ids written (or found) while uploading one recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadSummary {
    pub recipe_id: i64,
    pub contributor_id: i64,
    pub method_id: i64,
    pub dish_id: i64,
    /// One id per annotation, in step order. Repeated annotations share an id.
    pub ingredient_ids: Vec<i64>,
    /// Indices of steps that contained no annotations
    pub steps_without_annotations: Vec<usize>,
}

use std::path::PathBuf;

use thiserror::Error;

use crate::annotation::AnnotationError;

/// Errors that can occur while reading, parsing or uploading recipes
#[derive(Error, Debug)]
pub enum ChompError {
    /// A recipe step contained a malformed ingredient annotation
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// A recipe step failed to parse; `step` is the zero-based step index
    #[error("Step {step}: {source}")]
    Step {
        step: usize,
        #[source]
        source: AnnotationError,
    },

    /// Recipe file does not exist
    #[error("Recipe not found: {}", .0.display())]
    RecipeNotFound(PathBuf),

    /// Recipe document lacks a field required for upload
    #[error("Recipe is missing required field '{0}'")]
    MissingField(&'static str),

    /// SQL template file could not be found in the override directory
    #[error("SQL query not found in {}", .0.display())]
    SqlTemplateNotFound(PathBuf),

    /// A row was inserted but could not be found again
    #[error("Row written to '{0}' could not be found after insert")]
    UploadNotConfirmed(&'static str),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to read a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode a recipe document
    #[error("Invalid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ChompError {
    /// The parser error behind this error, if any
    pub fn annotation_error(&self) -> Option<&AnnotationError> {
        match self {
            ChompError::Annotation(err) | ChompError::Step { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

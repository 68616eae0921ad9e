use std::path::PathBuf;

use log::debug;
use serde::Serialize;

use crate::annotation::{parse_steps, ParseResult};
use crate::loader::{read_recipe_file, read_recipe_path};
use crate::model::RecipeDocument;
use crate::pipelines::upload::upload_recipe;
use crate::pipelines::UploadSummary;
use crate::store::{SqlTemplates, Store};
use crate::ChompError;

/// Represents where the recipe document comes from
#[derive(Debug, Clone)]
pub enum RecipeSource {
    /// `<data_dir>/<name>.json`
    Name(String),
    /// Explicit path to a JSON document
    Path(PathBuf),
    /// Document already in memory
    Document(RecipeDocument),
}

/// Represents where uploads are written
#[derive(Debug, Clone, Default)]
pub enum Database {
    /// In-memory database, discarded when the build finishes
    #[default]
    InMemory,
    /// SQLite database file
    File(PathBuf),
}

/// Represents the desired output
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputMode {
    /// Parse and upload to the database (default)
    #[default]
    Upload,
    /// Parse only, nothing is written
    Parse,
}

/// Result of a recipe upload operation
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum UploadResult {
    /// Ids of the rows the recipe was stored as
    Uploaded(UploadSummary),
    /// Ingredients of every step, in order
    Parsed(Vec<ParseResult>),
}

/// Builder for configuring and executing recipe uploads
#[derive(Debug, Default)]
pub struct RecipeUploaderBuilder {
    source: Option<RecipeSource>,
    database: Database,
    mode: OutputMode,
    data_dir: Option<PathBuf>,
    sql_dir: Option<PathBuf>,
    init_schema: bool,
}

impl RecipeUploaderBuilder {
    /// Load the recipe `<data_dir>/<name>.json`
    ///
    /// # Example
    /// ```
    /// use chomping::RecipeUploader;
    ///
    /// let builder = RecipeUploader::builder()
    ///     .data_dir("data")
    ///     .recipe("soda-bread");
    /// ```
    pub fn recipe(mut self, name: impl Into<String>) -> Self {
        self.source = Some(RecipeSource::Name(name.into()));
        self
    }

    /// Load the recipe from an explicit file path
    pub fn recipe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(RecipeSource::Path(path.into()));
        self
    }

    /// Use a recipe document that is already loaded
    pub fn document(mut self, document: RecipeDocument) -> Self {
        self.source = Some(RecipeSource::Document(document));
        self
    }

    /// Directory recipe names are resolved against (default `data`)
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Write to a SQLite database file
    pub fn database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Database::File(path.into());
        self
    }

    /// Write to a throwaway in-memory database
    pub fn in_memory(mut self) -> Self {
        self.database = Database::InMemory;
        self
    }

    /// Load `match_<table>.sql` / `insert_<table>.sql` from `dir`
    pub fn sql_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sql_dir = Some(dir.into());
        self
    }

    /// Create the default tables before uploading.
    /// Always done for in-memory databases.
    pub fn init_schema(mut self) -> Self {
        self.init_schema = true;
        self
    }

    /// Only parse the steps, do not touch the database
    ///
    /// # Example
    /// ```
    /// use chomping::RecipeUploader;
    ///
    /// let builder = RecipeUploader::builder()
    ///     .recipe_path("data/soda-bread.json")
    ///     .parse_only();
    /// ```
    pub fn parse_only(mut self) -> Self {
        self.mode = OutputMode::Parse;
        self
    }

    /// Build and execute the upload
    ///
    /// # Errors
    /// Returns `ChompError` if:
    /// - No recipe source was specified
    /// - The recipe cannot be read
    /// - A step contains a malformed annotation
    /// - A database operation fails
    ///
    /// # Example
    /// ```no_run
    /// # use chomping::RecipeUploader;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = RecipeUploader::builder()
    ///     .recipe("soda-bread")
    ///     .database("chomping.db")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<UploadResult, ChompError> {
        let source = self.source.ok_or_else(|| {
            ChompError::BuilderError(
                "No recipe source specified. Use .recipe(), .recipe_path() or .document()"
                    .to_string(),
            )
        })?;

        let document = match source {
            RecipeSource::Name(name) => {
                let data_dir = self.data_dir.unwrap_or_else(|| PathBuf::from("data"));
                read_recipe_file(&data_dir, &name).await?
            }
            RecipeSource::Path(path) => read_recipe_path(&path).await?,
            RecipeSource::Document(document) => document,
        };

        if let OutputMode::Parse = self.mode {
            return Ok(UploadResult::Parsed(parse_steps(document.steps())?));
        }

        let (store, init) = match &self.database {
            Database::InMemory => (Store::open_in_memory()?, true),
            Database::File(path) => (Store::open(path)?, self.init_schema),
        };
        let store = match self.sql_dir {
            Some(dir) => store.with_templates(SqlTemplates::from_dir(dir)),
            None => store,
        };
        if init {
            debug!("Initialising schema for {:?}", self.database);
            store.init_schema()?;
        }

        Ok(UploadResult::Uploaded(upload_recipe(&store, &document)?))
    }
}

/// Main entry point for the builder API
pub struct RecipeUploader;

impl RecipeUploader {
    /// Creates a new builder for uploading recipes
    ///
    /// # Example
    /// ```
    /// use chomping::RecipeUploader;
    ///
    /// let builder = RecipeUploader::builder();
    /// ```
    pub fn builder() -> RecipeUploaderBuilder {
        RecipeUploaderBuilder::default()
    }
}

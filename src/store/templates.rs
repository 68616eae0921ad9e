use log::debug;
use std::borrow::Cow;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::ChompError;

/// Tables recipes are uploaded to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Contributor,
    Dish,
    Ingredient,
    Method,
    Recipe,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Contributor => "contributor",
            Table::Dish => "dish",
            Table::Ingredient => "ingredient",
            Table::Method => "method",
            Table::Recipe => "recipe",
        }
    }

    pub fn all() -> [Table; 5] {
        [
            Table::Contributor,
            Table::Dish,
            Table::Ingredient,
            Table::Method,
            Table::Recipe,
        ]
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which statement of a table to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// `SELECT id` of the row matching the lookup values
    Match,
    /// `INSERT` of a new row built from the lookup values
    Insert,
}

impl QueryKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            QueryKind::Match => "match",
            QueryKind::Insert => "insert",
        }
    }
}

/// File name of a query, e.g. `match_contributor.sql`
pub fn sql_file_name(kind: QueryKind, table: Table) -> String {
    format!("{}_{}.sql", kind.prefix(), table.as_str())
}

pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

fn builtin(kind: QueryKind, table: Table) -> &'static str {
    match (kind, table) {
        (QueryKind::Match, Table::Contributor) => include_str!("../../sql/match_contributor.sql"),
        (QueryKind::Match, Table::Dish) => include_str!("../../sql/match_dish.sql"),
        (QueryKind::Match, Table::Ingredient) => include_str!("../../sql/match_ingredient.sql"),
        (QueryKind::Match, Table::Method) => include_str!("../../sql/match_method.sql"),
        (QueryKind::Match, Table::Recipe) => include_str!("../../sql/match_recipe.sql"),
        (QueryKind::Insert, Table::Contributor) => {
            include_str!("../../sql/insert_contributor.sql")
        }
        (QueryKind::Insert, Table::Dish) => include_str!("../../sql/insert_dish.sql"),
        (QueryKind::Insert, Table::Ingredient) => include_str!("../../sql/insert_ingredient.sql"),
        (QueryKind::Insert, Table::Method) => include_str!("../../sql/insert_method.sql"),
        (QueryKind::Insert, Table::Recipe) => include_str!("../../sql/insert_recipe.sql"),
    }
}

/// Source of the match/insert statements.
///
/// Queries are compiled into the binary by default; pointing at a directory
/// replaces all of them with `<kind>_<table>.sql` files from that directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlTemplates {
    dir: Option<PathBuf>,
}

impl SqlTemplates {
    pub fn builtin() -> Self {
        Self { dir: None }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Read the query for `kind` on `table`
    ///
    /// # Errors
    /// Returns `ChompError::SqlTemplateNotFound` if an override directory is
    /// configured and does not contain the query file.
    pub fn read_sql_file(&self, kind: QueryKind, table: Table) -> Result<Cow<'static, str>, ChompError> {
        let Some(dir) = &self.dir else {
            return Ok(Cow::Borrowed(builtin(kind, table)));
        };

        let path = dir.join(sql_file_name(kind, table));
        debug!("Reading SQL query from {}", path.display());
        match std::fs::read_to_string(&path) {
            Ok(sql) => Ok(Cow::Owned(sql)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ChompError::SqlTemplateNotFound(path)),
            Err(e) => Err(ChompError::Io(e)),
        }
    }
}

//! SQLite persistence for uploaded recipes.
//!
//! Every write goes through [`Store::upload_data`], which looks the row up first
//! and only inserts when nothing matches, so re-uploading a recipe never
//! duplicates rows.

use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use std::path::Path;

use crate::error::ChompError;

mod templates;

pub use self::templates::{sql_file_name, QueryKind, SqlTemplates, Table, SCHEMA_SQL};

/// Values bound to the `?N` parameters of a match or insert query
#[derive(Debug, Clone, PartialEq)]
pub enum LookupValues {
    /// A single-column lookup, e.g. a contributor name
    One(Value),
    /// A multi-column lookup, bound in order
    Many(Vec<Value>),
}

impl LookupValues {
    pub fn as_slice(&self) -> &[Value] {
        match self {
            LookupValues::One(value) => std::slice::from_ref(value),
            LookupValues::Many(values) => values,
        }
    }
}

impl From<&str> for LookupValues {
    fn from(value: &str) -> Self {
        LookupValues::One(Value::Text(value.to_string()))
    }
}

impl From<String> for LookupValues {
    fn from(value: String) -> Self {
        LookupValues::One(Value::Text(value))
    }
}

impl From<Vec<Value>> for LookupValues {
    fn from(values: Vec<Value>) -> Self {
        LookupValues::Many(values)
    }
}

pub struct Store {
    conn: Connection,
    templates: SqlTemplates,
}

impl Store {
    /// Open or create a database file
    pub fn open(path: &Path) -> Result<Self, ChompError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!("Opening database {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, ChompError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, ChompError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn,
            templates: SqlTemplates::builtin(),
        })
    }

    /// Use `templates` instead of the built-in queries
    pub fn with_templates(mut self, templates: SqlTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Create the default tables if they do not exist yet
    pub fn init_schema(&self) -> Result<(), ChompError> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Borrow the underlying connection (for callers that need raw SQL).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Id of the row in `table` matching `values`, if any
    pub fn match_data(&self, table: Table, values: &LookupValues) -> Result<Option<i64>, ChompError> {
        let sql = self.templates.read_sql_file(QueryKind::Match, table)?;
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let id = stmt
            .query_row(params_from_iter(values.as_slice()), |row| row.get(0))
            .optional()?;
        Ok(id)
    }

    /// Insert `values` into `table` unless a matching row exists.
    ///
    /// Returns the id of the existing or newly written row.
    pub fn upload_data(&self, table: Table, values: &LookupValues) -> Result<i64, ChompError> {
        if let Some(id) = self.match_data(table, values)? {
            debug!("Found existing {} row {}", table, id);
            return Ok(id);
        }

        let sql = self.templates.read_sql_file(QueryKind::Insert, table)?;
        self.conn
            .prepare_cached(&sql)?
            .execute(params_from_iter(values.as_slice()))?;

        // search again to confirm the write
        match self.match_data(table, values)? {
            Some(id) => {
                debug!("Inserted {} row {}", table, id);
                Ok(id)
            }
            None => {
                warn!("Inserted {} row is not visible to its match query", table);
                Err(ChompError::UploadNotConfirmed(table.as_str()))
            }
        }
    }

    pub fn upload_contributor(&self, name: &str) -> Result<i64, ChompError> {
        self.upload_data(Table::Contributor, &LookupValues::from(name))
    }

    /// Run `f` inside a transaction, rolling back if it or the commit fails
    pub fn in_transaction<T, F>(&self, f: F) -> Result<T, ChompError>
    where
        F: FnOnce(&Self) -> Result<T, ChompError>,
    {
        // dropping an uncommitted Transaction rolls it back
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    /// Number of rows currently stored in `table`
    pub fn count(&self, table: Table) -> Result<i64, ChompError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        Ok(self.conn.query_row(&sql, [], |row| row.get(0))?)
    }
}

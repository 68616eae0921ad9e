use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChompConfig {
    /// SQLite database file recipes are uploaded to
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Directory holding `<name>.json` recipe documents
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory with `match_<table>.sql` / `insert_<table>.sql` overrides.
    /// Built-in queries are used when unset.
    #[serde(default)]
    pub sql_dir: Option<PathBuf>,
}

impl Default for ChompConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            data_dir: default_data_dir(),
            sql_dir: None,
        }
    }
}

// Default value functions
fn default_database() -> PathBuf {
    PathBuf::from("chomping.db")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl ChompConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with CHOMPING__ prefix
    /// 2. chomping.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: CHOMPING__DATABASE
    pub fn load() -> Result<Self, ConfigError> {
        load_config("chomping")
    }
}

/// Load configuration from `<name>.toml` (optional) and `CHOMPING__*` variables
pub fn load_config(name: &str) -> Result<ChompConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        .add_source(
            Environment::with_prefix("CHOMPING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

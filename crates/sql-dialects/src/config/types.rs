//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::schema::Table;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target platform selection.
    pub platform: PlatformConfig,

    /// Table options applied when a table omits them.
    #[serde(default)]
    pub defaults: TableDefaults,

    /// How generated SQL is printed.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Configuration with defaults for the given platform name.
    pub fn for_platform(db_type: impl Into<String>) -> Self {
        Self {
            platform: PlatformConfig {
                r#type: db_type.into(),
                version: None,
            },
            defaults: TableDefaults::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Platform selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Platform name or alias (mysql, mariadb, postgres, oracle, sqlite).
    pub r#type: String,

    /// Server version line, e.g. "5.7" or "mariadb-10.6" (MySQL only).
    #[serde(default)]
    pub version: Option<String>,
}

/// Table-level options filled in when the schema leaves them unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableDefaults {
    #[serde(default)]
    pub engine: Option<String>,

    #[serde(default)]
    pub charset: Option<String>,

    #[serde(default)]
    pub collation: Option<String>,
}

impl TableDefaults {
    /// Fill unset table options from these defaults.
    pub fn apply(&self, table: &mut Table) {
        let options = &mut table.options;
        if options.engine.is_none() {
            options.engine = self.engine.clone();
        }
        if options.charset.is_none() {
            options.charset = self.charset.clone();
        }
        if options.collation.is_none() {
            options.collation = self.collation.clone();
        }
        debug!(table = %table.name, "Applied table defaults");
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Appended to every statement in `sql` output (default: ";").
    #[serde(default = "default_terminator")]
    pub terminator: String,

    /// Output format (default: sql).
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            terminator: default_terminator(),
            format: OutputFormat::default(),
        }
    }
}

/// Output format for generated statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One terminated statement per line.
    #[default]
    Sql,
    /// A JSON array of statements.
    Json,
}

fn default_terminator() -> String {
    ";".to_string()
}

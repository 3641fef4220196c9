//! Capability flags describing what each platform can express.
//!
//! A platform owns one `Capabilities` value, fixed at construction. The DDL
//! builders consult it to choose between statement variants (inline comment
//! vs `COMMENT ON`, native index rename vs drop + create, and so on).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlatformError, Result};

/// Transaction isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionIsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl TransactionIsolationLevel {
    /// Standard SQL spelling of the level.
    pub fn as_sql(&self) -> &'static str {
        match self {
            TransactionIsolationLevel::ReadUncommitted => "READ UNCOMMITTED",
            TransactionIsolationLevel::ReadCommitted => "READ COMMITTED",
            TransactionIsolationLevel::RepeatableRead => "REPEATABLE READ",
            TransactionIsolationLevel::Serializable => "SERIALIZABLE",
        }
    }
}

impl fmt::Display for TransactionIsolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for TransactionIsolationLevel {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "READ UNCOMMITTED" => Ok(Self::ReadUncommitted),
            "READ COMMITTED" => Ok(Self::ReadCommitted),
            "REPEATABLE READ" => Ok(Self::RepeatableRead),
            "SERIALIZABLE" => Ok(Self::Serializable),
            _ => Err(PlatformError::invalid_argument(format!(
                "Invalid isolation level: {}",
                s
            ))),
        }
    }
}

/// Fixed feature set of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Native sequences (CREATE SEQUENCE).
    pub sequences: bool,
    /// Server-generated identity/autoincrement columns.
    pub identity_columns: bool,
    /// Prefer identity columns over sequences for generated keys.
    pub prefers_identity_columns: bool,
    /// Schemas as namespaces for tables.
    pub schemas: bool,
    /// Partial indexes (`CREATE INDEX ... WHERE`).
    pub partial_indexes: bool,
    /// Prefix-length index columns (`col(10)`).
    pub column_length_indexes: bool,
    /// SAVEPOINT support.
    pub savepoints: bool,
    /// RELEASE SAVEPOINT support.
    pub release_savepoints: bool,
    /// Column comments inside the column declaration.
    pub inline_column_comments: bool,
    /// Separate `COMMENT ON` statements.
    pub comment_on_statement: bool,
    /// Per-column collation.
    pub column_collation: bool,
    /// CREATE/DROP DATABASE support.
    pub create_drop_database: bool,
    /// Foreign key constraints.
    pub foreign_keys: bool,
    /// ON UPDATE referential actions.
    pub foreign_key_on_update: bool,
    /// Native `RENAME INDEX` (otherwise drop + create).
    pub rename_index: bool,
    /// Maximum identifier length in bytes.
    pub max_identifier_length: usize,
    /// Isolation level of a fresh session.
    pub default_isolation: TransactionIsolationLevel,
    /// Identifier quote character.
    pub quote_char: char,
    /// Longest VARCHAR before falling back to the CLOB declaration.
    pub varchar_max_length: u32,
    /// VARCHAR length used when a string column has none.
    pub varchar_default_length: u32,
    /// Longest fixed CHAR.
    pub char_max_length: u32,
    /// Longest VARBINARY before falling back to the BLOB declaration (0: no limit).
    pub binary_max_length: u32,
    /// VARBINARY length used when a binary column has none.
    pub binary_default_length: u32,
}

impl Capabilities {
    /// Baseline shared by every platform before dialect overrides.
    pub const fn base() -> Self {
        Self {
            sequences: false,
            identity_columns: false,
            prefers_identity_columns: false,
            schemas: false,
            partial_indexes: false,
            column_length_indexes: false,
            savepoints: true,
            release_savepoints: true,
            inline_column_comments: false,
            comment_on_statement: false,
            column_collation: false,
            create_drop_database: true,
            foreign_keys: true,
            foreign_key_on_update: true,
            rename_index: false,
            max_identifier_length: 63,
            default_isolation: TransactionIsolationLevel::ReadCommitted,
            quote_char: '"',
            varchar_max_length: 4000,
            varchar_default_length: 255,
            char_max_length: 4000,
            binary_max_length: 4000,
            binary_default_length: 255,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::base()
    }
}

//! # sql-dialects
//!
//! SQL dialect abstraction for MySQL, PostgreSQL, Oracle and SQLite.
//!
//! This library turns a database-agnostic schema model into the SQL each
//! engine expects:
//!
//! - **Type declarations** for abstract column types
//! - **DDL** for tables, indexes, constraints, sequences and comments
//! - **ALTER TABLE** generation from table diffs, including SQLite's
//!   table-copy emulation
//! - **Capability flags** describing what each engine supports
//! - **Introspection queries** against each engine's catalog
//!
//! ## Example
//!
//! ```rust
//! use sql_dialects::{Column, ColumnType, Platform, PlatformImpl, Table};
//!
//! let platform = PlatformImpl::from_db_type("postgres").unwrap();
//! let table = Table::new("users")
//!     .with_column(Column::new("id", ColumnType::Integer).autoincrement())
//!     .with_primary_key(&["id"]);
//!
//! let sql = platform.create_table(&table).unwrap();
//! assert_eq!(sql, vec!["CREATE TABLE users (id SERIAL NOT NULL, PRIMARY KEY(id))"]);
//! ```

pub mod config;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;

// Re-exports for convenient access
pub use config::{Config, OutputFormat, PlatformConfig};
pub use crate::core::{
    compare_schemas, compare_tables, Column, ColumnType, CreateFlags, ForeignKey, Index, Platform,
    PlatformCatalog, Schema, Sequence, Table, TableDiff,
};
pub use drivers::{MysqlPlatform, OraclePlatform, PlatformImpl, PostgresPlatform, SqlitePlatform};
pub use error::{PlatformError, Result};

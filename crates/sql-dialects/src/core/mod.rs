//! Core abstractions shared by every platform.
//!
//! This module provides the foundational types and traits used throughout
//! the crate:
//!
//! - [`schema`]: Table, column, index and constraint model
//! - [`diff`]: Table and column differences consumed by ALTER generation
//! - [`comparator`]: Builds diffs from two schema snapshots
//! - [`traits`]: The `Platform` trait and its template methods
//! - [`ddl`]: Shared DDL algorithms the trait defaults delegate to
//! - [`capabilities`]: Per-platform feature flags and limits
//! - [`identifier`]: Identifier parsing and quoting helpers
//! - [`keywords`]: Reserved word lists
//! - [`catalog`]: Platform registry for dependency injection
//!
//! # Design Patterns
//!
//! - **Template Method**: Default trait methods define algorithm skeletons
//!   and call back into per-platform hooks
//! - **Strategy**: Each `Platform` is an interchangeable SQL dialect
//! - **Registry**: `PlatformCatalog` hands out shared platform instances

pub mod capabilities;
pub mod catalog;
pub mod comparator;
pub mod ddl;
pub mod diff;
pub mod identifier;
pub mod keywords;
pub mod schema;
pub mod traits;

// Re-export commonly used types for convenience
pub use capabilities::{Capabilities, TransactionIsolationLevel};
pub use catalog::PlatformCatalog;
pub use comparator::{compare_schemas, compare_tables};
pub use diff::{ColumnDiff, TableDiff};
pub use identifier::Identifier;
pub use keywords::KeywordList;
pub use schema::{
    CheckConstraint, Column, ColumnType, DefaultValue, ForeignKey, Index, Schema, Sequence, Table,
    TableOptions, UniqueConstraint,
};
pub use traits::{CreateFlags, Platform};

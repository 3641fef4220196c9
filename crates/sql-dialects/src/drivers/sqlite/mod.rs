//! SQLite driver.
//!
//! This module provides the SQLite-specific platform:
//! - [`SqlitePlatform`]: SQL dialect strategy
//! - `alter`: ALTER TABLE emulation by table copy
//!
//! Schemas are emulated by folding `schema.table` into `schema__table`.

mod alter;
mod dialect;

pub use dialect::SqlitePlatform;

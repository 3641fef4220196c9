//! PostgreSQL driver.
//!
//! This module provides the PostgreSQL-specific platform:
//! - [`PostgresPlatform`]: SQL dialect strategy
//!
//! Sequences, identity columns, schemas, partial indexes and `COMMENT ON`
//! statements are all supported. Binary data is always `BYTEA`.

mod dialect;

pub use dialect::PostgresPlatform;

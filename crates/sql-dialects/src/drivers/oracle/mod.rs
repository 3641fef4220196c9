//! Oracle driver.
//!
//! This module provides the Oracle-specific platform:
//! - [`OraclePlatform`]: SQL dialect strategy
//!
//! Identifiers are limited to 30 characters; autoincrement columns are
//! emulated with a sequence and a trigger.

mod dialect;

pub use dialect::OraclePlatform;

//! MySQL/MariaDB driver.
//!
//! This module provides the MySQL-specific platform:
//! - [`MysqlPlatform`]: SQL dialect strategy
//! - [`MysqlVersion`]: server line selecting JSON and `RENAME INDEX` support
//!
//! # Supported Versions
//!
//! - MySQL 5.6, 5.7, 8.0+
//! - MariaDB 10.2+

mod dialect;

pub use dialect::{MysqlPlatform, MysqlVersion};

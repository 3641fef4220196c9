//! Database platform implementations.
//!
//! This module provides one [`Platform`] implementation per database engine:
//!
//! - [`mysql`]: MySQL 5.6/5.7/8.0 and MariaDB
//! - [`postgres`]: PostgreSQL
//! - [`oracle`]: Oracle
//! - [`sqlite`]: SQLite
//!
//! # Architecture
//!
//! Each platform overrides only the trait methods where its SQL differs; the
//! shared algorithms live in the trait's default methods and `core::ddl`.
//!
//! # Adding New Databases
//!
//! 1. Create a new module under `drivers/` (e.g., `drivers/mssql/`)
//! 2. Implement `Platform` for its platform struct
//! 3. Add an enum variant to `PlatformImpl` and its aliases to `from_db_type`
//! 4. Register it in `PlatformCatalog::with_builtins()`

pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;

pub use mysql::{MysqlPlatform, MysqlVersion};
pub use oracle::OraclePlatform;
pub use postgres::PostgresPlatform;
pub use sqlite::SqlitePlatform;

use std::ops::Deref;

use tracing::info;

use crate::config::PlatformConfig;
use crate::core::traits::Platform;
use crate::error::{PlatformError, Result};

/// Names accepted by [`PlatformImpl::from_db_type`].
pub const SUPPORTED_PLATFORMS: &[&str] = &["mysql", "mariadb", "postgres", "oracle", "sqlite"];

/// Enum wrapper over the concrete platforms.
///
/// Selected once from configuration; derefs to `dyn Platform` so callers
/// use the trait directly.
#[derive(Debug, Clone)]
pub enum PlatformImpl {
    Mysql(MysqlPlatform),
    Postgres(PostgresPlatform),
    Oracle(OraclePlatform),
    Sqlite(SqlitePlatform),
}

impl PlatformImpl {
    /// Create a platform from a database type string.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the database type is not recognized.
    pub fn from_db_type(db_type: &str) -> Result<Self> {
        match db_type.trim().to_lowercase().as_str() {
            "mysql" => Ok(PlatformImpl::Mysql(MysqlPlatform::default())),
            "mariadb" => Ok(PlatformImpl::Mysql(MysqlPlatform::new(MysqlVersion::MariaDb))),
            "postgres" | "postgresql" | "pgsql" | "pg" => Ok(PlatformImpl::Postgres(PostgresPlatform::new())),
            "oracle" | "oci8" => Ok(PlatformImpl::Oracle(OraclePlatform::new())),
            "sqlite" | "sqlite3" => Ok(PlatformImpl::Sqlite(SqlitePlatform::new())),
            other => Err(PlatformError::Config(format!(
                "Unknown platform type: '{}'. Supported types: {}",
                other,
                SUPPORTED_PLATFORMS.join(", ")
            ))),
        }
    }

    /// Create a platform from configuration; `version` selects the MySQL line.
    pub fn from_config(config: &PlatformConfig) -> Result<Self> {
        let platform = match (Self::from_db_type(&config.r#type)?, &config.version) {
            (PlatformImpl::Mysql(_), Some(version)) => {
                PlatformImpl::Mysql(MysqlPlatform::new(version.parse()?))
            }
            (platform, _) => platform,
        };
        info!(
            platform = platform.name(),
            version = config.version.as_deref().unwrap_or("default"),
            "Selected platform"
        );
        Ok(platform)
    }

    /// Borrow the selected platform as a trait object.
    pub fn as_platform(&self) -> &(dyn Platform + 'static) {
        match self {
            PlatformImpl::Mysql(p) => p,
            PlatformImpl::Postgres(p) => p,
            PlatformImpl::Oracle(p) => p,
            PlatformImpl::Sqlite(p) => p,
        }
    }
}

impl Deref for PlatformImpl {
    type Target = dyn Platform;

    fn deref(&self) -> &Self::Target {
        self.as_platform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_impl_from_db_type() {
        assert_eq!(PlatformImpl::from_db_type("mysql").unwrap().name(), "mysql");
        assert_eq!(PlatformImpl::from_db_type("postgres").unwrap().name(), "postgresql");
        assert_eq!(PlatformImpl::from_db_type("oracle").unwrap().name(), "oracle");
        assert_eq!(PlatformImpl::from_db_type("sqlite").unwrap().name(), "sqlite");

        // Alternative names
        assert!(PlatformImpl::from_db_type("PostgreSQL").is_ok());
        assert!(PlatformImpl::from_db_type("pgsql").is_ok());
        assert!(matches!(
            PlatformImpl::from_db_type("mariadb").unwrap(),
            PlatformImpl::Mysql(p) if p.version() == MysqlVersion::MariaDb
        ));

        // Unknown should error
        let err = PlatformImpl::from_db_type("mssql").unwrap_err();
        assert!(matches!(err, PlatformError::Config(_)));
    }

    #[test]
    fn test_platform_impl_from_config_version() {
        let config = PlatformConfig {
            r#type: "mysql".to_string(),
            version: Some("5.6".to_string()),
        };
        match PlatformImpl::from_config(&config).unwrap() {
            PlatformImpl::Mysql(p) => assert_eq!(p.version(), MysqlVersion::Mysql56),
            other => panic!("unexpected platform {:?}", other),
        }

        let config = PlatformConfig {
            r#type: "mysql".to_string(),
            version: Some("nope".to_string()),
        };
        assert!(PlatformImpl::from_config(&config).is_err());
    }

    #[test]
    fn test_platform_impl_deref_dispatch() {
        let platform = PlatformImpl::from_db_type("postgres").unwrap();
        assert_eq!(platform.quote_identifier("table"), "\"table\"");
        assert_eq!(platform.dummy_select_sql(), "SELECT 1");
        assert!(platform.capabilities().sequences);

        let platform = PlatformImpl::from_db_type("mysql").unwrap();
        assert_eq!(platform.quote_identifier("table"), "`table`");
        assert!(!platform.capabilities().sequences);
    }
}

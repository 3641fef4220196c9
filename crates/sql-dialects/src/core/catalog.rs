//! Platform catalog for explicit dependency injection.
//!
//! The [`PlatformCatalog`] provides a registry of shared platform instances
//! keyed by name. It is explicitly constructed and passed to whoever needs
//! a platform; nothing is registered globally or initialized lazily.
//!
//! # Design Rationale
//!
//! - **No global state**: Platforms are built when the catalog is built
//! - **Explicit registration**: Clear, deterministic initialization order
//! - **Testable**: Easy to create catalogs with mock platforms for testing

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::drivers::{MysqlPlatform, MysqlVersion, OraclePlatform, PostgresPlatform, SqlitePlatform};
use crate::error::{PlatformError, Result};

use super::traits::Platform;

/// Registry of platforms by name.
///
/// # Example
///
/// ```rust
/// use sql_dialects::core::catalog::PlatformCatalog;
///
/// let catalog = PlatformCatalog::with_builtins();
/// let sqlite = catalog.require_platform("sqlite").unwrap();
/// assert_eq!(sqlite.dummy_select_sql(), "SELECT 1");
/// ```
#[derive(Default)]
pub struct PlatformCatalog {
    /// Registered platforms by lowercase name.
    platforms: HashMap<String, Arc<dyn Platform>>,
}

impl PlatformCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the built-in platforms registered.
    ///
    /// MySQL is registered once per server line (`mysql` is 8.0,
    /// `mysql57`, `mysql56`, `mariadb`); PostgreSQL also answers to
    /// `postgres`.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();

        catalog.register_platform("mysql", MysqlPlatform::new(MysqlVersion::Mysql80));
        catalog.register_platform("mysql57", MysqlPlatform::new(MysqlVersion::Mysql57));
        catalog.register_platform("mysql56", MysqlPlatform::new(MysqlVersion::Mysql56));
        catalog.register_platform("mariadb", MysqlPlatform::new(MysqlVersion::MariaDb));

        let postgres: Arc<dyn Platform> = Arc::new(PostgresPlatform::new());
        catalog.register_platform_arc("postgresql", postgres.clone());
        catalog.register_platform_arc("postgres", postgres);

        catalog.register_platform("oracle", OraclePlatform::new());
        catalog.register_platform("sqlite", SqlitePlatform::new());

        info!(platforms = catalog.platforms.len(), "Registered built-in platforms");
        catalog
    }

    /// Register a platform by name.
    pub fn register_platform(&mut self, name: impl Into<String>, platform: impl Platform + 'static) {
        self.register_platform_arc(name, Arc::new(platform));
    }

    /// Register a platform as an Arc (for sharing between names).
    pub fn register_platform_arc(&mut self, name: impl Into<String>, platform: Arc<dyn Platform>) {
        self.platforms.insert(name.into().to_lowercase(), platform);
    }

    /// Get a platform by name (case-insensitive).
    pub fn get_platform(&self, name: &str) -> Option<Arc<dyn Platform>> {
        self.platforms.get(&name.to_lowercase()).cloned()
    }

    /// Get a platform by name, returning an error if not found.
    pub fn require_platform(&self, name: &str) -> Result<Arc<dyn Platform>> {
        self.get_platform(name)
            .ok_or_else(|| PlatformError::Config(format!("Unknown platform: {}", name)))
    }

    /// Check if a platform is registered.
    pub fn has_platform(&self, name: &str) -> bool {
        self.platforms.contains_key(&name.to_lowercase())
    }

    /// All registered names, sorted.
    pub fn platform_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.platforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

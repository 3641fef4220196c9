//! Database type name → abstract column type tables.
//!
//! Every platform owns one table, built at construction. Registering an
//! extra mapping produces a new table; a table shared between threads is
//! never mutated in place.

use std::collections::HashMap;

use crate::core::schema::ColumnType;
use crate::error::{PlatformError, Result};

/// Lowercased database type name → abstract column type.
#[derive(Debug, Clone)]
pub struct TypeMappingTable {
    platform: &'static str,
    mappings: HashMap<String, ColumnType>,
}

impl TypeMappingTable {
    /// Build a table from `(db type, column type)` pairs.
    pub fn new(platform: &'static str, entries: &[(&str, ColumnType)]) -> Self {
        let mappings = entries
            .iter()
            .map(|(name, ty)| (name.to_lowercase(), *ty))
            .collect();
        Self { platform, mappings }
    }

    pub fn mysql() -> Self {
        Self::new("mysql", MYSQL_TYPES)
    }

    pub fn postgres() -> Self {
        Self::new("postgresql", POSTGRES_TYPES)
    }

    pub fn oracle() -> Self {
        Self::new("oracle", ORACLE_TYPES)
    }

    pub fn sqlite() -> Self {
        Self::new("sqlite", SQLITE_TYPES)
    }

    /// Resolve a database type name to its abstract type.
    pub fn db_type_to_column_type(&self, db_type: &str) -> Result<ColumnType> {
        self.mappings
            .get(&db_type.to_lowercase())
            .copied()
            .ok_or_else(|| PlatformError::unknown_column_type(db_type, self.platform))
    }

    pub fn has_type_mapping(&self, db_type: &str) -> bool {
        self.mappings.contains_key(&db_type.to_lowercase())
    }

    /// Copy of this table with one more (or one replaced) mapping.
    pub fn register_type_mapping(&self, db_type: &str, column_type: ColumnType) -> Self {
        let mut table = self.clone();
        table.mappings.insert(db_type.to_lowercase(), column_type);
        table
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

const MYSQL_TYPES: &[(&str, ColumnType)] = &[
    ("bigint", ColumnType::BigInt),
    ("binary", ColumnType::Binary),
    ("blob", ColumnType::Blob),
    ("char", ColumnType::String),
    ("date", ColumnType::Date),
    ("datetime", ColumnType::DateTime),
    ("decimal", ColumnType::Decimal),
    ("double", ColumnType::Float),
    ("float", ColumnType::Float),
    ("int", ColumnType::Integer),
    ("integer", ColumnType::Integer),
    ("json", ColumnType::Json),
    ("longblob", ColumnType::Blob),
    ("longtext", ColumnType::Text),
    ("mediumblob", ColumnType::Blob),
    ("mediumint", ColumnType::Integer),
    ("mediumtext", ColumnType::Text),
    ("numeric", ColumnType::Decimal),
    ("real", ColumnType::Float),
    ("set", ColumnType::String),
    ("smallint", ColumnType::SmallInt),
    ("string", ColumnType::String),
    ("text", ColumnType::Text),
    ("time", ColumnType::Time),
    ("timestamp", ColumnType::DateTime),
    ("tinyblob", ColumnType::Blob),
    ("tinyint", ColumnType::Boolean),
    ("tinytext", ColumnType::Text),
    ("varbinary", ColumnType::Binary),
    ("varchar", ColumnType::String),
    ("year", ColumnType::Date),
];

const POSTGRES_TYPES: &[(&str, ColumnType)] = &[
    ("_varchar", ColumnType::String),
    ("bigint", ColumnType::BigInt),
    ("bigserial", ColumnType::BigInt),
    ("bool", ColumnType::Boolean),
    ("boolean", ColumnType::Boolean),
    ("bpchar", ColumnType::String),
    ("bytea", ColumnType::Blob),
    ("char", ColumnType::String),
    ("date", ColumnType::Date),
    ("datetime", ColumnType::DateTime),
    ("decimal", ColumnType::Decimal),
    ("double", ColumnType::Float),
    ("double precision", ColumnType::Float),
    ("float", ColumnType::Float),
    ("float4", ColumnType::Float),
    ("float8", ColumnType::Float),
    ("inet", ColumnType::String),
    ("int", ColumnType::Integer),
    ("int2", ColumnType::SmallInt),
    ("int4", ColumnType::Integer),
    ("int8", ColumnType::BigInt),
    ("integer", ColumnType::Integer),
    ("interval", ColumnType::String),
    ("json", ColumnType::Json),
    ("jsonb", ColumnType::Json),
    ("money", ColumnType::Decimal),
    ("numeric", ColumnType::Decimal),
    ("serial", ColumnType::Integer),
    ("serial4", ColumnType::Integer),
    ("serial8", ColumnType::BigInt),
    ("real", ColumnType::Float),
    ("smallint", ColumnType::SmallInt),
    ("text", ColumnType::Text),
    ("time", ColumnType::Time),
    ("timestamp", ColumnType::DateTime),
    ("timestamptz", ColumnType::DateTimeTz),
    ("timetz", ColumnType::Time),
    ("tsvector", ColumnType::Text),
    ("uuid", ColumnType::Guid),
    ("varchar", ColumnType::String),
    ("year", ColumnType::Date),
];

const ORACLE_TYPES: &[(&str, ColumnType)] = &[
    ("binary_double", ColumnType::Float),
    ("binary_float", ColumnType::Float),
    ("binary_integer", ColumnType::Boolean),
    ("blob", ColumnType::Blob),
    ("char", ColumnType::String),
    ("clob", ColumnType::Text),
    ("date", ColumnType::Date),
    ("float", ColumnType::Float),
    ("integer", ColumnType::Integer),
    ("long", ColumnType::String),
    ("long raw", ColumnType::Blob),
    ("nchar", ColumnType::String),
    ("nclob", ColumnType::Text),
    ("number", ColumnType::Integer),
    ("nvarchar2", ColumnType::String),
    ("pls_integer", ColumnType::Boolean),
    ("raw", ColumnType::Binary),
    ("rowid", ColumnType::String),
    ("timestamp", ColumnType::DateTime),
    ("timestamptz", ColumnType::DateTimeTz),
    ("urowid", ColumnType::String),
    ("varchar", ColumnType::String),
    ("varchar2", ColumnType::String),
];

const SQLITE_TYPES: &[(&str, ColumnType)] = &[
    ("bigint", ColumnType::BigInt),
    ("bigserial", ColumnType::BigInt),
    ("blob", ColumnType::Blob),
    ("boolean", ColumnType::Boolean),
    ("char", ColumnType::String),
    ("clob", ColumnType::Text),
    ("date", ColumnType::Date),
    ("datetime", ColumnType::DateTime),
    ("decimal", ColumnType::Decimal),
    ("double", ColumnType::Float),
    ("double precision", ColumnType::Float),
    ("float", ColumnType::Float),
    ("image", ColumnType::String),
    ("int", ColumnType::Integer),
    ("integer", ColumnType::Integer),
    ("longtext", ColumnType::Text),
    ("longvarchar", ColumnType::String),
    ("mediumint", ColumnType::Integer),
    ("mediumtext", ColumnType::Text),
    ("ntext", ColumnType::String),
    ("numeric", ColumnType::Decimal),
    ("nvarchar", ColumnType::String),
    ("real", ColumnType::Float),
    ("serial", ColumnType::Integer),
    ("smallint", ColumnType::SmallInt),
    ("text", ColumnType::Text),
    ("time", ColumnType::Time),
    ("timestamp", ColumnType::DateTime),
    ("tinyint", ColumnType::Boolean),
    ("tinytext", ColumnType::Text),
    ("varchar", ColumnType::String),
    ("varchar2", ColumnType::String),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_lookup() {
        let map = TypeMappingTable::mysql();
        assert_eq!(map.db_type_to_column_type("TINYINT").unwrap(), ColumnType::Boolean);
        assert_eq!(map.db_type_to_column_type("longtext").unwrap(), ColumnType::Text);
        assert!(map.has_type_mapping("Varchar"));
    }

    #[test]
    fn test_unknown_type_errors() {
        let map = TypeMappingTable::postgres();
        let err = map.db_type_to_column_type("geometry").unwrap_err();
        assert!(matches!(err, PlatformError::UnknownColumnType { .. }));
        assert!(err.to_string().contains("geometry"));
    }

    #[test]
    fn test_register_returns_new_table() {
        let base = TypeMappingTable::oracle();
        let extended = base.register_type_mapping("XMLTYPE", ColumnType::Text);
        assert!(!base.has_type_mapping("xmltype"));
        assert!(extended.has_type_mapping("xmltype"));
        assert_eq!(extended.len(), base.len() + 1);
    }

    #[test]
    fn test_postgres_uuid_and_jsonb() {
        let map = TypeMappingTable::postgres();
        assert_eq!(map.db_type_to_column_type("uuid").unwrap(), ColumnType::Guid);
        assert_eq!(map.db_type_to_column_type("jsonb").unwrap(), ColumnType::Json);
    }
}

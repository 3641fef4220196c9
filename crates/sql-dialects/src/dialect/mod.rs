//! Type mapping tables.
//!
//! Each platform resolves database type names (as reported by introspection)
//! back to abstract [`ColumnType`](crate::core::schema::ColumnType) tags
//! through a [`TypeMappingTable`] built when the platform is constructed.
//!
//! ```rust
//! use sql_dialects::dialect::TypeMappingTable;
//! use sql_dialects::core::schema::ColumnType;
//!
//! let map = TypeMappingTable::mysql();
//! assert_eq!(map.db_type_to_column_type("longtext").unwrap(), ColumnType::Text);
//! ```

mod typemap;

pub use typemap::TypeMappingTable;

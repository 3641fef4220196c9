//! Schema model: tables, columns, indexes, constraints and sequences.
//!
//! These types are the input of every statement generator. They are plain
//! data with serde support so schemas can be loaded from YAML or JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::identifier::validate_identifier;
use crate::error::{PlatformError, Result};

/// Abstract column type tag resolved to a dialect type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    // ===== Boolean =====
    Boolean,

    // ===== Integer Types =====
    SmallInt,
    Integer,
    BigInt,

    // ===== Numeric =====
    /// Exact numeric with precision and scale.
    Decimal,
    /// Double precision floating point.
    Float,

    // ===== String Types =====
    /// Length-bounded string (VARCHAR/CHAR).
    String,
    /// Unbounded character data (CLOB family).
    Text,

    // ===== Binary Types =====
    /// Length-bounded binary (VARBINARY/BINARY).
    Binary,
    /// Unbounded binary data (BLOB family).
    Blob,

    // ===== Special Types =====
    /// GUID/UUID.
    Guid,
    Json,

    // ===== Date/Time Types =====
    Date,
    Time,
    DateTime,
    DateTimeTz,
}

impl ColumnType {
    /// Integer-like types render their default values unquoted.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ColumnType::SmallInt | ColumnType::Integer | ColumnType::BigInt
        )
    }

    /// Text and blob types, which some platforms refuse defaults for.
    pub fn is_lob(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Blob)
    }

    /// Date/time types that carry a timestamp.
    pub fn is_datetime(&self) -> bool {
        matches!(self, ColumnType::DateTime | ColumnType::DateTimeTz)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Boolean => "boolean",
            ColumnType::SmallInt => "smallint",
            ColumnType::Integer => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Text => "text",
            ColumnType::Binary => "binary",
            ColumnType::Blob => "blob",
            ColumnType::Guid => "guid",
            ColumnType::Json => "json",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::DateTime => "datetime",
            ColumnType::DateTimeTz => "datetimetz",
        };
        f.write_str(name)
    }
}

/// Column default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    /// Raw textual form, used for integer defaults and literal quoting.
    pub fn as_raw(&self) -> String {
        match self {
            DefaultValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            DefaultValue::Int(i) => i.to_string(),
            DefaultValue::Float(f) => f.to_string(),
            DefaultValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        DefaultValue::Text(v.to_string())
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        DefaultValue::Int(v)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        DefaultValue::Bool(v)
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Abstract type tag.
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Length for string/binary types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Numeric precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// Numeric scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    /// Fixed-width string/binary (CHAR/BINARY instead of VARCHAR/VARBINARY).
    #[serde(default, skip_serializing_if = "is_false")]
    pub fixed: bool,

    /// Unsigned numeric (MySQL, SQLite).
    #[serde(default, skip_serializing_if = "is_false")]
    pub unsigned: bool,

    /// Whether the column allows NULL.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_nullable: bool,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    /// Whether the value is generated by the server on insert.
    #[serde(default, skip_serializing_if = "is_false")]
    pub autoincrement: bool,

    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Character set (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    /// Collation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    /// Verbatim declaration replacing the generated type/default/null clauses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_definition: Option<String>,

    /// Use JSONB instead of JSON (PostgreSQL).
    #[serde(default, skip_serializing_if = "is_false")]
    pub jsonb: bool,

    /// Row-version column: datetime renders as TIMESTAMP on MySQL.
    #[serde(default, skip_serializing_if = "is_false")]
    pub version: bool,
}

impl Column {
    /// Create a NOT NULL column of the given type.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            length: None,
            precision: None,
            scale: None,
            fixed: false,
            unsigned: false,
            is_nullable: false,
            default: None,
            autoincrement: false,
            comment: None,
            charset: None,
            collation: None,
            column_definition: None,
            jsonb: false,
            version: false,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn autoincrement(mut self) -> Self {
        self.autoincrement = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Copy of this column under another name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        let mut column = self.clone();
        column.name = name.into();
        column
    }

    /// Comment with empty strings treated as absent.
    pub fn effective_comment(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }
}

/// Index definition. A primary key is an index with `is_primary` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,

    /// Indexed column names, in order.
    pub columns: Vec<String>,

    /// Whether the index is unique.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_unique: bool,

    /// Whether the index is the primary key.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_primary: bool,

    /// Platform flags such as `fulltext` or `spatial`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,

    /// Partial index predicate.
    #[serde(default, rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,

    /// Prefix lengths per column (MySQL column-length indexes).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lengths: Vec<Option<u32>>,
}

impl Index {
    /// Create a plain (non-unique) index.
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_unique: false,
            is_primary: false,
            flags: Vec::new(),
            where_clause: None,
            lengths: Vec::new(),
        }
    }

    /// Create a unique index.
    pub fn unique(name: impl Into<String>, columns: &[&str]) -> Self {
        let mut index = Self::new(name, columns);
        index.is_unique = true;
        index
    }

    /// Create a primary key index.
    pub fn primary(name: impl Into<String>, columns: &[&str]) -> Self {
        let mut index = Self::unique(name, columns);
        index.is_primary = true;
        index
    }

    /// Whether the index carries the given flag (case-insensitive).
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case(flag))
    }

    /// Whether both indexes cover the same columns in the same order.
    pub fn spans_columns(&self, columns: &[String]) -> bool {
        self.columns.len() == columns.len()
            && self
                .columns
                .iter()
                .zip(columns)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }

    /// Whether this index makes `other` redundant: same columns, same
    /// uniqueness and primary flags, same partial predicate and flags.
    pub fn is_fulfilled_by(&self, other: &Index) -> bool {
        if !self.spans_columns(&other.columns) {
            return false;
        }
        if self.is_unique != other.is_unique || self.is_primary != other.is_primary {
            return false;
        }
        if self.where_clause != other.where_clause {
            return false;
        }
        let mut mine: Vec<String> = self.flags.iter().map(|f| f.to_lowercase()).collect();
        let mut theirs: Vec<String> = other.flags.iter().map(|f| f.to_lowercase()).collect();
        mine.sort();
        theirs.sort();
        mine == theirs && self.lengths == other.lengths
    }
}

/// Named unique constraint declared inline with the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueConstraint {
    /// Constraint name.
    pub name: String,

    /// Constrained column names.
    pub columns: Vec<String>,

    /// Extra flags (e.g. `clustered`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

impl UniqueConstraint {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            flags: Vec::new(),
        }
    }
}

/// Foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,

    /// Local column names.
    pub columns: Vec<String>,

    /// Referenced table name (may be schema-qualified).
    pub foreign_table: String,

    /// Referenced column names.
    pub foreign_columns: Vec<String>,

    /// ON DELETE action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,

    /// ON UPDATE action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,

    /// MATCH type (FULL, PARTIAL, SIMPLE).
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub deferrable: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub deferred: bool,
}

impl ForeignKey {
    pub fn new(
        name: impl Into<String>,
        columns: &[&str],
        foreign_table: impl Into<String>,
        foreign_columns: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            foreign_table: foreign_table.into(),
            foreign_columns: foreign_columns.iter().map(|c| c.to_string()).collect(),
            on_delete: None,
            on_update: None,
            match_type: None,
            deferrable: false,
            deferred: false,
        }
    }

    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = Some(action.into());
        self
    }

    pub fn on_update(mut self, action: impl Into<String>) -> Self {
        self.on_update = Some(action.into());
        self
    }

    /// Whether any local column is among the given column names.
    pub fn intersects_columns(&self, columns: &[String]) -> bool {
        self.columns
            .iter()
            .any(|c| columns.iter().any(|o| o.eq_ignore_ascii_case(c)))
    }
}

/// Table-level CHECK constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConstraint {
    /// Constraint name (informational).
    #[serde(default)]
    pub name: String,

    /// Boolean expression.
    pub definition: String,
}

/// Table-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Storage engine (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Default character set (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    /// Default collation (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    /// Table comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Create as a temporary table.
    #[serde(default, skip_serializing_if = "is_false")]
    pub temporary: bool,

    /// Create as UNLOGGED (PostgreSQL).
    #[serde(default, skip_serializing_if = "is_false")]
    pub unlogged: bool,

    /// Initial AUTO_INCREMENT value (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<u64>,

    /// ROW_FORMAT (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_format: Option<String>,

    /// Raw table options replacing charset/collation/engine (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_options: Option<String>,

    /// Raw partition clause appended after the table options (MySQL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_options: Option<String>,
}

/// Table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, optionally schema-qualified.
    pub name: String,

    /// Column definitions, in declaration order.
    pub columns: Vec<Column>,

    /// Indexes, including the primary key.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,

    /// Unique constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_constraints: Vec<UniqueConstraint>,

    /// Foreign key constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,

    /// Check constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub check_constraints: Vec<CheckConstraint>,

    /// Table options.
    #[serde(default)]
    pub options: TableOptions,
}

impl Table {
    /// Create an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
            unique_constraints: Vec::new(),
            foreign_keys: Vec::new(),
            check_constraints: Vec::new(),
            options: TableOptions::default(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    /// Set the primary key, replacing any existing one.
    pub fn with_primary_key(mut self, columns: &[&str]) -> Self {
        self.indexes.retain(|i| !i.is_primary);
        self.indexes.push(Index::primary("primary", columns));
        self
    }

    /// Look up a column by name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// The primary key index, if any.
    pub fn primary_key(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.is_primary)
    }

    /// Primary key column names (empty when there is no primary key).
    pub fn primary_key_columns(&self) -> Vec<String> {
        self.primary_key()
            .map(|pk| pk.columns.clone())
            .unwrap_or_default()
    }

    /// Look up an index by name (case-insensitive).
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Validate every name in the table and check that indexes and foreign
    /// keys refer to existing columns. Constraint names may be left empty.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.name)?;
        for column in &self.columns {
            validate_identifier(&column.name)?;
        }
        for index in &self.indexes {
            validate_identifier(&index.name)?;
        }
        let constraint_names = self
            .unique_constraints
            .iter()
            .map(|u| &u.name)
            .chain(self.foreign_keys.iter().map(|fk| &fk.name))
            .chain(self.check_constraints.iter().map(|c| &c.name));
        for name in constraint_names.filter(|n| !n.is_empty()) {
            validate_identifier(name)?;
        }

        if self.columns.is_empty() {
            return Err(PlatformError::invalid_definition(format!(
                "No columns specified for table {}",
                self.name
            )));
        }
        for index in &self.indexes {
            for col in &index.columns {
                if !self.has_column(col) {
                    return Err(PlatformError::invalid_definition(format!(
                        "Index {} on table {} references unknown column {}",
                        index.name, self.name, col
                    )));
                }
            }
        }
        for fk in &self.foreign_keys {
            for col in &fk.columns {
                if !self.has_column(col) {
                    return Err(PlatformError::invalid_definition(format!(
                        "Foreign key {} on table {} references unknown column {}",
                        fk.name, self.name, col
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Sequence definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Sequence name.
    pub name: String,

    /// First value.
    #[serde(default = "default_one")]
    pub initial_value: i64,

    /// Increment.
    #[serde(default = "default_one")]
    pub allocation_size: i64,

    /// Number of values cached by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<i64>,
}

fn default_one() -> i64 {
    1
}

impl Sequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_value: 1,
            allocation_size: 1,
            cache: None,
        }
    }

    pub fn starting_at(mut self, initial_value: i64) -> Self {
        self.initial_value = initial_value;
        self
    }
}

/// A set of tables and sequences, as loaded from a schema file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub tables: Vec<Table>,

    #[serde(default)]
    pub sequences: Vec<Sequence>,
}

impl Schema {
    /// Load a schema from a YAML file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a schema from a YAML string and validate every table.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let schema: Schema = serde_yaml::from_str(yaml)?;
        for table in &schema.tables {
            table.validate()?;
        }
        Ok(schema)
    }

    /// Look up a table by name (case-insensitive).
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_column(name: &str, column_type: ColumnType) -> Column {
        Column::new(name, column_type)
    }

    fn make_test_table(columns: Vec<Column>) -> Table {
        Table {
            columns,
            ..Table::new("test_table")
        }
    }

    #[test]
    fn test_column_builder_defaults() {
        let col = make_test_column("id", ColumnType::Integer);
        assert!(!col.is_nullable);
        assert!(!col.autoincrement);
        assert!(col.default.is_none());

        let col = col.nullable().with_default(5i64);
        assert!(col.is_nullable);
        assert_eq!(col.default, Some(DefaultValue::Int(5)));
    }

    #[test]
    fn test_effective_comment_ignores_empty() {
        let col = make_test_column("a", ColumnType::String).with_comment("");
        assert_eq!(col.effective_comment(), None);
        let col = col.with_comment("note");
        assert_eq!(col.effective_comment(), Some("note"));
    }

    #[test]
    fn test_table_primary_key() {
        let table = make_test_table(vec![make_test_column("id", ColumnType::Integer)])
            .with_primary_key(&["id"]);
        assert_eq!(table.primary_key_columns(), vec!["id".to_string()]);

        let table = table.with_primary_key(&["ID"]);
        assert_eq!(table.indexes.iter().filter(|i| i.is_primary).count(), 1);
    }

    #[test]
    fn test_table_column_lookup_case_insensitive() {
        let table = make_test_table(vec![make_test_column("UserId", ColumnType::Integer)]);
        assert!(table.has_column("userid"));
        assert!(!table.has_column("other"));
    }

    #[test]
    fn test_table_validate_rejects_empty_table() {
        let table = Table::new("empty");
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("No columns specified"));
    }

    #[test]
    fn test_table_validate_rejects_bad_identifiers() {
        let long_name = "c".repeat(200);
        let table = make_test_table(vec![make_test_column(&long_name, ColumnType::Integer)]);
        assert!(matches!(
            table.validate(),
            Err(PlatformError::InvalidDefinition(_))
        ));

        let table = make_test_table(vec![make_test_column("id", ColumnType::Integer)])
            .with_index(Index::new("", &["id"]));
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_schema_from_yaml_rejects_invalid_names() {
        let result = Schema::from_yaml(
            r#"
tables:
  - name: ""
    columns:
      - name: id
        type: integer
"#,
        );
        assert!(matches!(result, Err(PlatformError::InvalidDefinition(_))));

        let result = Schema::from_yaml(
            "tables:\n  - name: users\n    columns:\n      - name: \"bad\\0name\"\n        type: integer\n",
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("null byte"));
    }

    #[test]
    fn test_table_validate_rejects_unknown_index_column() {
        let table = make_test_table(vec![make_test_column("id", ColumnType::Integer)])
            .with_index(Index::new("idx_missing", &["missing"]));
        assert!(matches!(
            table.validate(),
            Err(PlatformError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_index_fulfilled_by() {
        let a = Index::new("a", &["x", "y"]);
        let b = Index::new("b", &["X", "Y"]);
        assert!(a.is_fulfilled_by(&b));

        let c = Index::unique("c", &["x", "y"]);
        assert!(!a.is_fulfilled_by(&c));

        let mut d = Index::new("d", &["x", "y"]);
        d.where_clause = Some("x > 0".into());
        assert!(!a.is_fulfilled_by(&d));
    }

    #[test]
    fn test_foreign_key_intersects_columns() {
        let fk = ForeignKey::new("fk", &["user_id"], "users", &["id"]);
        assert!(fk.intersects_columns(&["USER_ID".to_string()]));
        assert!(!fk.intersects_columns(&["id".to_string()]));
    }

    #[test]
    fn test_schema_from_yaml() {
        let yaml = r#"
tables:
  - name: users
    columns:
      - name: id
        type: integer
        autoincrement: true
      - name: email
        type: string
        length: 180
      - name: active
        type: boolean
        default: true
    indexes:
      - name: primary
        columns: [id]
        is_primary: true
        is_unique: true
sequences:
  - name: user_seq
    initial_value: 10
"#;
        let schema = Schema::from_yaml(yaml).unwrap();
        let users = schema.table("USERS").unwrap();
        assert_eq!(users.columns.len(), 3);
        assert_eq!(users.columns[1].length, Some(180));
        assert_eq!(users.columns[2].default, Some(DefaultValue::Bool(true)));
        assert_eq!(users.primary_key_columns(), vec!["id".to_string()]);
        assert_eq!(schema.sequences[0].initial_value, 10);
        assert_eq!(schema.sequences[0].allocation_size, 1);
    }

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::DateTimeTz.to_string(), "datetimetz");
        assert_eq!(ColumnType::BigInt.to_string(), "bigint");
    }
}

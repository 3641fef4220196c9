//! The platform trait: one override surface for every SQL dialect.
//!
//! This module defines the abstraction every dialect implements:
//!
//! - [`Platform`]: identity, quoting, type declarations, DDL, ALTER TABLE,
//!   sequences, query helpers and introspection SQL
//! - [`CreateFlags`]: what a CREATE TABLE should emit besides the columns
//!
//! # Design Patterns
//!
//! - **Strategy**: each dialect is one `Platform` implementation selected at
//!   construction time
//! - **Template Method**: default methods define the portable statement
//!   skeletons and call back into the dialect for the parts that differ
//!
//! Methods that take a name accept it the way the schema model stores it;
//! rendering (keyword quoting, explicit quotes) happens inside the platform.

use std::fmt;

use tracing::debug;

use super::capabilities::{Capabilities, TransactionIsolationLevel};
use super::ddl::{self, TableParts};
use super::diff::TableDiff;
use super::identifier::{self, validate_check_constraint, Identifier};
use super::keywords::KeywordList;
use super::schema::{
    CheckConstraint, Column, ColumnType, DefaultValue, ForeignKey, Index, Sequence, Table,
    UniqueConstraint,
};
use crate::dialect::TypeMappingTable;
use crate::error::{PlatformError, Result};

/// What `create_table_sql` emits besides the column list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateFlags {
    /// Primary key, indexes and unique constraints.
    pub indexes: bool,
    /// Foreign key constraints.
    pub foreign_keys: bool,
    /// The table is recreated as part of an ALTER emulation.
    pub alter: bool,
}

impl CreateFlags {
    pub const NONE: CreateFlags = CreateFlags {
        indexes: false,
        foreign_keys: false,
        alter: false,
    };

    pub const INDEXES: CreateFlags = CreateFlags {
        indexes: true,
        foreign_keys: false,
        alter: false,
    };

    pub const ALL: CreateFlags = CreateFlags {
        indexes: true,
        foreign_keys: true,
        alter: false,
    };
}

impl Default for CreateFlags {
    fn default() -> Self {
        CreateFlags::INDEXES
    }
}

/// SQL dialect strategy.
///
/// Implementations provide the dialect constants (capabilities, keywords,
/// type mappings) and the handful of type declarations that have no portable
/// form. Everything else has a default that dialects override where their
/// syntax differs.
pub trait Platform: Send + Sync + fmt::Debug {
    // ===== Identity =====

    /// Platform identifier (e.g., "mysql", "postgresql").
    fn name(&self) -> &str;

    /// Feature flags, fixed at construction.
    fn capabilities(&self) -> &Capabilities;

    /// Reserved keywords consulted when rendering names.
    fn keywords(&self) -> &KeywordList;

    /// Database type name → abstract column type table.
    fn type_mappings(&self) -> &TypeMappingTable;

    fn is_keyword(&self, word: &str) -> bool {
        self.keywords().is_keyword(word)
    }

    /// Resolve a database type name reported by the server.
    fn db_type_to_column_type(&self, db_type: &str) -> Result<ColumnType> {
        self.type_mappings().db_type_to_column_type(db_type)
    }

    // ===== Quoting =====

    /// Quote every dot-separated part of an identifier.
    ///
    /// - MySQL: `` `a`.`b` ``
    /// - PostgreSQL/Oracle/SQLite: `"a"."b"`
    fn quote_identifier(&self, name: &str) -> String {
        identifier::quote_dotted(name, self.capabilities().quote_char)
    }

    /// Quote an identifier as a single part, even when it contains dots.
    fn quote_single_identifier(&self, name: &str) -> String {
        identifier::quote_single(name, self.capabilities().quote_char)
    }

    fn quote_string_literal(&self, value: &str) -> String {
        identifier::quote_string_literal(value)
    }

    /// Render a model name for use in a statement.
    ///
    /// Parts are quoted only when the name was written quoted or the part is
    /// a reserved keyword of this platform.
    fn quoted_name(&self, raw: &str) -> String {
        Identifier::parse(raw).render(self.capabilities().quote_char, |part| {
            self.is_keyword(part)
        })
    }

    /// Index column list, with prefix lengths where the platform has them.
    fn index_columns_sql(&self, index: &Index) -> String {
        let with_lengths = self.capabilities().column_length_indexes;
        index
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let name = self.quoted_name(column);
                match index.lengths.get(i).copied().flatten() {
                    Some(length) if with_lengths => format!("{}({})", name, length),
                    _ => name,
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ===== Type Declarations =====

    fn boolean_type_sql(&self, column: &Column) -> String;
    fn integer_type_sql(&self, column: &Column) -> String;
    fn bigint_type_sql(&self, column: &Column) -> String;
    fn smallint_type_sql(&self, column: &Column) -> String;
    fn datetime_type_sql(&self, column: &Column) -> String;
    fn date_type_sql(&self, column: &Column) -> String;
    fn time_type_sql(&self, column: &Column) -> String;
    fn clob_type_sql(&self, column: &Column) -> String;
    fn blob_type_sql(&self, column: &Column) -> String;

    /// CHAR/VARCHAR declaration for an already-bounded length.
    fn varchar_type_snippet(&self, length: u32, fixed: bool) -> String;

    /// BINARY/VARBINARY declaration for an already-bounded length.
    fn binary_type_snippet(&self, length: u32, fixed: bool) -> String;

    fn decimal_type_sql(&self, column: &Column) -> String {
        let precision = column.precision.filter(|p| *p > 0).unwrap_or(10);
        let scale = column.scale.unwrap_or(0);
        format!("NUMERIC({}, {})", precision, scale)
    }

    fn float_type_sql(&self, _column: &Column) -> String {
        "DOUBLE PRECISION".to_string()
    }

    /// String declaration; lengths above the platform maximum become CLOB.
    fn string_type_sql(&self, column: &Column) -> String {
        ddl::string_type_sql(self, column)
    }

    /// Binary declaration; lengths above the platform maximum become BLOB.
    fn binary_type_sql(&self, column: &Column) -> String {
        ddl::binary_type_sql(self, column)
    }

    /// GUIDs are fixed 36-character strings unless the platform has a native type.
    fn guid_type_sql(&self, column: &Column) -> String {
        let mut guid = column.clone();
        guid.length = Some(36);
        guid.fixed = true;
        self.string_type_sql(&guid)
    }

    fn json_type_sql(&self, column: &Column) -> String {
        self.clob_type_sql(column)
    }

    fn datetimetz_type_sql(&self, column: &Column) -> String {
        self.datetime_type_sql(column)
    }

    /// Full type declaration for a column's abstract type.
    fn column_type_sql(&self, column: &Column) -> String {
        match column.column_type {
            ColumnType::Boolean => self.boolean_type_sql(column),
            ColumnType::SmallInt => self.smallint_type_sql(column),
            ColumnType::Integer => self.integer_type_sql(column),
            ColumnType::BigInt => self.bigint_type_sql(column),
            ColumnType::Decimal => self.decimal_type_sql(column),
            ColumnType::Float => self.float_type_sql(column),
            ColumnType::String => self.string_type_sql(column),
            ColumnType::Text => self.clob_type_sql(column),
            ColumnType::Binary => self.binary_type_sql(column),
            ColumnType::Blob => self.blob_type_sql(column),
            ColumnType::Guid => self.guid_type_sql(column),
            ColumnType::Json => self.json_type_sql(column),
            ColumnType::Date => self.date_type_sql(column),
            ColumnType::Time => self.time_type_sql(column),
            ColumnType::DateTime => self.datetime_type_sql(column),
            ColumnType::DateTimeTz => self.datetimetz_type_sql(column),
        }
    }

    /// Render a value as this platform's boolean literal.
    fn convert_boolean(&self, value: &DefaultValue) -> Result<String> {
        Ok(match value {
            DefaultValue::Bool(b) => if *b { "1" } else { "0" }.to_string(),
            other => other.as_raw(),
        })
    }

    /// ` DEFAULT ...` clause (empty when none applies).
    fn default_value_sql(&self, column: &Column) -> Result<String> {
        ddl::default_value_sql(self, column)
    }

    /// Column-level character set clause; most platforms have none.
    fn column_charset_sql(&self, _charset: &str) -> String {
        String::new()
    }

    fn column_collation_sql(&self, collation: &str) -> String {
        if self.capabilities().column_collation {
            format!("COLLATE {}", self.quote_single_identifier(collation))
        } else {
            String::new()
        }
    }

    fn inline_column_comment_sql(&self, comment: &str) -> Result<String> {
        if !self.capabilities().inline_column_comments {
            return Err(PlatformError::not_supported(
                "inline column comments",
                self.name(),
            ));
        }
        Ok(format!("COMMENT {}", self.quote_string_literal(comment)))
    }

    /// Declaration of one column under an already-rendered name.
    fn column_declaration_sql(&self, name: &str, column: &Column) -> Result<String> {
        ddl::column_declaration_sql(self, name, column)
    }

    fn column_declaration_list_sql(&self, columns: &[Column]) -> Result<String> {
        let declarations = columns
            .iter()
            .map(|column| self.column_declaration_sql(&self.quoted_name(&column.name), column))
            .collect::<Result<Vec<_>>>()?;
        Ok(declarations.join(", "))
    }

    // ===== CREATE / DROP =====

    /// Flags used by [`Platform::create_table`].
    fn default_create_flags(&self) -> CreateFlags {
        CreateFlags::INDEXES
    }

    /// CREATE TABLE with the platform's default flags.
    fn create_table(&self, table: &Table) -> Result<Vec<String>> {
        self.create_table_sql(table, self.default_create_flags())
    }

    /// Statements creating `table`, followed by `COMMENT ON` statements where
    /// the platform uses them.
    fn create_table_sql(&self, table: &Table, flags: CreateFlags) -> Result<Vec<String>> {
        if table.columns.is_empty() {
            return Err(PlatformError::invalid_definition(format!(
                "No columns specified for table {}",
                table.name
            )));
        }

        let parts = TableParts::collect(self, table, flags);
        let mut sql = self.build_create_table(table, &parts)?;

        if self.capabilities().comment_on_statement {
            if let Some(comment) = &table.options.comment {
                sql.push(self.comment_on_table_sql(&table.name, comment));
            }
            for column in &table.columns {
                if let Some(comment) = column.effective_comment() {
                    sql.push(self.comment_on_column_sql(&table.name, &column.name, Some(comment)));
                }
            }
        }

        debug!(
            platform = self.name(),
            table = %table.name,
            statements = sql.len(),
            "Generated CREATE TABLE"
        );
        Ok(sql)
    }

    /// Dialect-specific CREATE TABLE body.
    fn build_create_table(&self, table: &Table, parts: &TableParts) -> Result<Vec<String>> {
        ddl::build_create_table(self, table, parts)
    }

    /// Create several tables: every table first, then every foreign key.
    fn create_tables_sql(&self, tables: &[Table]) -> Result<Vec<String>> {
        let mut sql = Vec::new();
        for table in tables {
            sql.extend(self.create_table_sql(table, CreateFlags::INDEXES)?);
        }
        for table in tables {
            for fk in &table.foreign_keys {
                sql.push(self.create_foreign_key_sql(fk, &table.name)?);
            }
        }
        Ok(sql)
    }

    /// Drop several tables: every foreign key first, then every table.
    fn drop_tables_sql(&self, tables: &[Table]) -> Result<Vec<String>> {
        let mut sql = Vec::new();
        for table in tables {
            for fk in &table.foreign_keys {
                sql.push(self.drop_foreign_key_sql(&fk.name, &table.name)?);
            }
        }
        for table in tables {
            sql.push(self.drop_table_sql(&table.name));
        }
        Ok(sql)
    }

    fn create_temporary_table_snippet(&self) -> &'static str {
        "CREATE TEMPORARY TABLE"
    }

    fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.quoted_name(table))
    }

    fn drop_temporary_table_sql(&self, table: &str) -> String {
        self.drop_table_sql(table)
    }

    fn truncate_table_sql(&self, table: &str, _cascade: bool) -> String {
        format!("TRUNCATE {}", self.quoted_name(table))
    }

    fn rename_table_sql(&self, old_name: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quoted_name(old_name),
            self.quoted_name(new_name)
        )
    }

    fn create_index_sql(&self, index: &Index, table: &str) -> Result<String> {
        ddl::create_index_sql(self, index, table)
    }

    /// Keyword(s) between CREATE and INDEX, with a trailing space.
    fn create_index_flags(&self, index: &Index) -> String {
        if index.is_unique {
            "UNIQUE ".to_string()
        } else {
            String::new()
        }
    }

    fn partial_index_sql(&self, index: &Index) -> String {
        match &index.where_clause {
            Some(predicate) if self.capabilities().partial_indexes => {
                format!(" WHERE {}", predicate)
            }
            _ => String::new(),
        }
    }

    fn create_primary_key_sql(&self, index: &Index, table: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD PRIMARY KEY ({})",
            self.quoted_name(table),
            self.index_columns_sql(index)
        ))
    }

    /// `ALTER TABLE t ADD CONSTRAINT n PRIMARY KEY|UNIQUE (cols)`.
    fn create_constraint_sql(&self, index: &Index, table: &str) -> Result<String> {
        let kind = if index.is_primary {
            "PRIMARY KEY"
        } else if index.is_unique {
            "UNIQUE"
        } else {
            return Err(PlatformError::invalid_argument(format!(
                "Can only create primary or unique constraints, no common index {} on table {}",
                index.name, table
            )));
        };
        Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} {} ({})",
            self.quoted_name(table),
            self.quoted_name(&index.name),
            kind,
            self.index_columns_sql(index)
        ))
    }

    fn create_unique_constraint_sql(
        &self,
        constraint: &UniqueConstraint,
        table: &str,
    ) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD {}",
            self.quoted_name(table),
            self.unique_constraint_declaration_sql(constraint)?
        ))
    }

    fn drop_index_sql(&self, index: &Index, _table: &str) -> Result<String> {
        Ok(ddl::drop_index_sql(self, index))
    }

    fn drop_constraint_sql(&self, name: &str, table: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            self.quoted_name(table),
            self.quoted_name(name)
        ))
    }

    fn drop_unique_constraint_sql(&self, name: &str, table: &str) -> Result<String> {
        self.drop_constraint_sql(name, table)
    }

    fn create_foreign_key_sql(&self, fk: &ForeignKey, table: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD {}",
            self.quoted_name(table),
            self.foreign_key_declaration_sql(fk)?
        ))
    }

    fn drop_foreign_key_sql(&self, name: &str, table: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} DROP FOREIGN KEY {}",
            self.quoted_name(table),
            self.quoted_name(name)
        ))
    }

    /// `CONSTRAINT n FOREIGN KEY (..) REFERENCES t (..)` plus referential options.
    fn foreign_key_declaration_sql(&self, fk: &ForeignKey) -> Result<String> {
        Ok(format!(
            "{}{}",
            self.foreign_key_base_declaration_sql(fk)?,
            self.advanced_foreign_key_options_sql(fk)?
        ))
    }

    fn foreign_key_base_declaration_sql(&self, fk: &ForeignKey) -> Result<String> {
        if fk.columns.is_empty() {
            return Err(PlatformError::invalid_definition(
                "Incomplete definition. 'local' required.",
            ));
        }
        if fk.foreign_columns.is_empty() {
            return Err(PlatformError::invalid_definition(
                "Incomplete definition. 'foreign' required.",
            ));
        }
        if fk.foreign_table.is_empty() {
            return Err(PlatformError::invalid_definition(
                "Incomplete definition. 'foreignTable' required.",
            ));
        }

        let mut sql = String::new();
        if !fk.name.is_empty() {
            sql.push_str(&format!("CONSTRAINT {} ", self.quoted_name(&fk.name)));
        }
        let local: Vec<String> = fk.columns.iter().map(|c| self.quoted_name(c)).collect();
        let foreign: Vec<String> = fk
            .foreign_columns
            .iter()
            .map(|c| self.quoted_name(c))
            .collect();
        sql.push_str(&format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            local.join(", "),
            self.quoted_name(&fk.foreign_table),
            foreign.join(", ")
        ));
        Ok(sql)
    }

    fn advanced_foreign_key_options_sql(&self, fk: &ForeignKey) -> Result<String> {
        ddl::advanced_foreign_key_options_sql(self, fk)
    }

    /// Validate and normalize a referential action.
    fn foreign_key_referential_action_sql(&self, action: &str) -> Result<String> {
        let upper = action.to_uppercase();
        match upper.as_str() {
            "CASCADE" | "SET NULL" | "NO ACTION" | "RESTRICT" | "SET DEFAULT" => Ok(upper),
            _ => Err(PlatformError::invalid_argument(format!(
                "Invalid foreign key action: {}",
                upper
            ))),
        }
    }

    /// `[UNIQUE ]INDEX n (cols)` for use inside CREATE TABLE.
    fn index_declaration_sql(&self, index: &Index) -> Result<String> {
        if index.columns.is_empty() {
            return Err(PlatformError::invalid_definition(
                "Incomplete definition. 'columns' required.",
            ));
        }
        Ok(format!(
            "{}INDEX {} ({}){}",
            self.create_index_flags(index),
            self.quoted_name(&index.name),
            self.index_columns_sql(index),
            self.partial_index_sql(index)
        ))
    }

    fn unique_constraint_declaration_sql(&self, constraint: &UniqueConstraint) -> Result<String> {
        if constraint.columns.is_empty() {
            return Err(PlatformError::invalid_definition(
                "Incomplete definition. 'columns' required.",
            ));
        }
        let mut flags = vec!["UNIQUE".to_string()];
        flags.extend(constraint.flags.iter().map(|f| f.to_uppercase()));
        let columns: Vec<String> = constraint
            .columns
            .iter()
            .map(|c| self.quoted_name(c))
            .collect();
        Ok(format!(
            "CONSTRAINT {} {} ({})",
            self.quoted_name(&constraint.name),
            flags.join(" "),
            columns.join(", ")
        ))
    }

    fn check_declaration_sql(&self, checks: &[CheckConstraint]) -> Result<String> {
        let mut constraints = Vec::with_capacity(checks.len());
        for check in checks {
            validate_check_constraint(&check.definition)?;
            constraints.push(format!("CHECK ({})", check.definition));
        }
        Ok(constraints.join(", "))
    }

    fn create_schema_sql(&self, schema: &str) -> Result<String> {
        if !self.capabilities().schemas {
            return Err(PlatformError::not_supported("create schema", self.name()));
        }
        Ok(format!("CREATE SCHEMA {}", self.quoted_name(schema)))
    }

    fn drop_schema_sql(&self, schema: &str) -> Result<String> {
        if !self.capabilities().schemas {
            return Err(PlatformError::not_supported("drop schema", self.name()));
        }
        Ok(format!("DROP SCHEMA {}", self.quoted_name(schema)))
    }

    fn create_database_sql(&self, database: &str) -> Result<String> {
        if !self.capabilities().create_drop_database {
            return Err(PlatformError::not_supported("create database", self.name()));
        }
        Ok(format!("CREATE DATABASE {}", self.quoted_name(database)))
    }

    fn drop_database_sql(&self, database: &str) -> Result<String> {
        if !self.capabilities().create_drop_database {
            return Err(PlatformError::not_supported("drop database", self.name()));
        }
        Ok(format!("DROP DATABASE {}", self.quoted_name(database)))
    }

    fn comment_on_table_sql(&self, table: &str, comment: &str) -> String {
        format!(
            "COMMENT ON TABLE {} IS {}",
            self.quoted_name(table),
            self.quote_string_literal(comment)
        )
    }

    fn comment_on_column_sql(&self, table: &str, column: &str, comment: Option<&str>) -> String {
        format!(
            "COMMENT ON COLUMN {}.{} IS {}",
            self.quoted_name(table),
            self.quoted_name(column),
            self.quote_string_literal(comment.unwrap_or(""))
        )
    }

    // ===== ALTER TABLE =====

    /// Statements applying `diff`, in execution order.
    fn alter_table_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let sql = self.build_alter_table(diff)?;
        debug!(
            platform = self.name(),
            table = %diff.name(),
            statements = sql.len(),
            "Generated ALTER TABLE"
        );
        Ok(sql)
    }

    /// Dialect-specific ALTER TABLE generation.
    fn build_alter_table(&self, diff: &TableDiff) -> Result<Vec<String>>;

    /// Foreign key and index drops that precede the column changes.
    fn pre_alter_table_index_foreign_key_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        ddl::pre_alter_sql(self, diff)
    }

    /// Foreign key and index creation that follows the column changes.
    fn post_alter_table_index_foreign_key_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        ddl::post_alter_sql(self, diff)
    }

    /// Rename an index; drop + create unless the platform renames natively.
    fn rename_index_sql(&self, old_name: &str, index: &Index, table: &str) -> Result<Vec<String>> {
        ddl::rename_index_sql(self, old_name, index, table)
    }

    // ===== Sequences =====

    fn create_sequence_sql(&self, _sequence: &Sequence) -> Result<String> {
        Err(PlatformError::not_supported("create sequence", self.name()))
    }

    fn alter_sequence_sql(&self, _sequence: &Sequence) -> Result<String> {
        Err(PlatformError::not_supported("alter sequence", self.name()))
    }

    fn drop_sequence_sql(&self, sequence: &str) -> Result<String> {
        if !self.capabilities().sequences {
            return Err(PlatformError::not_supported("drop sequence", self.name()));
        }
        Ok(format!("DROP SEQUENCE {}", self.quoted_name(sequence)))
    }

    fn sequence_next_val_sql(&self, _sequence: &str) -> Result<String> {
        Err(PlatformError::not_supported("sequence next value", self.name()))
    }

    /// Name of the sequence backing an identity column.
    fn identity_sequence_name(&self, table: &str, column: &str) -> String {
        format!("{}_{}_seq", table, column)
    }

    // ===== Queries & Transactions =====

    /// Apply a row limit and offset to a SELECT.
    fn modify_limit_query(&self, query: &str, limit: Option<u64>, offset: i64) -> Result<String> {
        if offset < 0 {
            return Err(PlatformError::invalid_argument(format!(
                "Offset must be a positive integer or zero, {} given",
                offset
            )));
        }
        Ok(self.limit_query(query, limit, offset as u64))
    }

    /// Limit/offset rendering once the offset is known to be valid.
    fn limit_query(&self, query: &str, limit: Option<u64>, offset: u64) -> String {
        let mut sql = query.to_string();
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if offset > 0 {
            sql.push_str(&format!(" OFFSET {}", offset));
        }
        sql
    }

    fn set_transaction_isolation_sql(&self, _level: TransactionIsolationLevel) -> Result<String> {
        Err(PlatformError::not_supported(
            "set transaction isolation",
            self.name(),
        ))
    }

    fn default_transaction_isolation_level(&self) -> TransactionIsolationLevel {
        self.capabilities().default_isolation
    }

    fn create_savepoint_sql(&self, savepoint: &str) -> String {
        format!("SAVEPOINT {}", savepoint)
    }

    fn release_savepoint_sql(&self, savepoint: &str) -> String {
        format!("RELEASE SAVEPOINT {}", savepoint)
    }

    fn rollback_savepoint_sql(&self, savepoint: &str) -> String {
        format!("ROLLBACK TO SAVEPOINT {}", savepoint)
    }

    fn current_date_sql(&self) -> &'static str {
        "CURRENT_DATE"
    }

    fn current_time_sql(&self) -> &'static str {
        "CURRENT_TIME"
    }

    fn current_timestamp_sql(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    fn dummy_select_sql(&self) -> String {
        "SELECT 1".to_string()
    }

    fn empty_identity_insert_sql(&self, table: &str, identifier_column: &str) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES (null)",
            self.quoted_name(table),
            self.quoted_name(identifier_column)
        )
    }

    fn for_update_sql(&self) -> String {
        "FOR UPDATE".to_string()
    }

    // ===== Introspection SQL =====

    fn list_databases_sql(&self) -> Result<String> {
        Err(PlatformError::not_supported("list databases", self.name()))
    }

    fn list_tables_sql(&self) -> Result<String> {
        Err(PlatformError::not_supported("list tables", self.name()))
    }

    fn list_table_columns_sql(&self, _table: &str, _database: Option<&str>) -> Result<String> {
        Err(PlatformError::not_supported("list table columns", self.name()))
    }

    fn list_table_indexes_sql(&self, _table: &str, _database: Option<&str>) -> Result<String> {
        Err(PlatformError::not_supported("list table indexes", self.name()))
    }

    fn list_table_foreign_keys_sql(&self, _table: &str, _database: Option<&str>) -> Result<String> {
        Err(PlatformError::not_supported(
            "list table foreign keys",
            self.name(),
        ))
    }

    fn list_sequences_sql(&self, _database: &str) -> Result<String> {
        Err(PlatformError::not_supported("list sequences", self.name()))
    }

    fn list_views_sql(&self, _database: &str) -> Result<String> {
        Err(PlatformError::not_supported("list views", self.name()))
    }

    fn list_table_constraints_sql(&self, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported(
            "list table constraints",
            self.name(),
        ))
    }

    fn list_table_comments_sql(&self, _table: &str, _database: Option<&str>) -> Result<String> {
        Err(PlatformError::not_supported("list table comments", self.name()))
    }

    // ===== Comparison =====

    /// Whether two columns render to the same declaration on this platform.
    ///
    /// Names and verbatim `column_definition` overrides are ignored. Platforms
    /// without inline comments also compare the comment and abstract type.
    fn columns_equal(&self, a: &Column, b: &Column) -> Result<bool> {
        let mut a_plain = a.clone();
        let mut b_plain = b.clone();
        a_plain.column_definition = None;
        b_plain.column_definition = None;

        if self.column_declaration_sql("", &a_plain)? != self.column_declaration_sql("", &b_plain)? {
            return Ok(false);
        }
        if self.capabilities().inline_column_comments {
            return Ok(true);
        }
        if a.effective_comment() != b.effective_comment() {
            return Ok(false);
        }
        Ok(a.column_type == b.column_type)
    }
}

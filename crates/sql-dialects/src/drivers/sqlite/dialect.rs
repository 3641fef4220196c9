//! SQLite SQL dialect (Strategy pattern).
//!
//! SQLite cannot alter constraints or column definitions in place, so most
//! ALTER TABLE work is emulated by copying the table (see [`super::alter`]).
//! Schemas are emulated by folding `schema.table` into `schema__table`.

use crate::core::capabilities::{Capabilities, TransactionIsolationLevel};
use crate::core::ddl::TableParts;
use crate::core::diff::TableDiff;
use crate::core::identifier::Identifier;
use crate::core::keywords::KeywordList;
use crate::core::schema::{Column, ForeignKey, Index, Table, UniqueConstraint};
use crate::core::traits::{CreateFlags, Platform};
use crate::dialect::TypeMappingTable;
use crate::error::{PlatformError, Result};

use super::alter;

/// SQLite platform.
#[derive(Debug, Clone)]
pub struct SqlitePlatform {
    capabilities: Capabilities,
    keywords: KeywordList,
    type_mappings: TypeMappingTable,
    schema_emulation: bool,
}

impl Default for SqlitePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlitePlatform {
    pub fn new() -> Self {
        let capabilities = Capabilities {
            identity_columns: true,
            prefers_identity_columns: true,
            inline_column_comments: true,
            column_collation: true,
            create_drop_database: false,
            default_isolation: TransactionIsolationLevel::ReadCommitted,
            quote_char: '"',
            binary_max_length: 0,
            binary_default_length: 0,
            ..Capabilities::base()
        };

        Self {
            capabilities,
            keywords: KeywordList::sqlite(),
            type_mappings: TypeMappingTable::sqlite(),
            schema_emulation: true,
        }
    }

    /// Keep dotted table names as written instead of folding them into
    /// `schema__table`.
    pub fn without_schema_emulation(mut self) -> Self {
        self.schema_emulation = false;
        self
    }

    pub fn schema_emulation(&self) -> bool {
        self.schema_emulation
    }

    /// Fold `schema.table` into `schema__table` when emulation is on.
    pub fn emulate_schema_namespacing(&self, table: &str) -> String {
        if self.schema_emulation {
            table.replace('.', "__")
        } else {
            table.to_string()
        }
    }

    /// Rendered table name with schema emulation applied.
    pub(super) fn table_name_sql(&self, table: &str) -> String {
        self.quoted_name(&self.emulate_schema_namespacing(table))
    }

    fn common_integer_sql(column: &Column) -> &'static str {
        if column.autoincrement {
            " PRIMARY KEY AUTOINCREMENT"
        } else if column.unsigned {
            " UNSIGNED"
        } else {
            ""
        }
    }

    /// An autoincrement column is declared `PRIMARY KEY AUTOINCREMENT`
    /// inline, so it can only be the table's sole primary key column.
    fn check_autoincrement_primary_key(&self, table: &Table) -> Result<()> {
        let autoincrement: Vec<&Column> = table.columns.iter().filter(|c| c.autoincrement).collect();
        let Some(column) = autoincrement.first() else {
            return Ok(());
        };

        if autoincrement.len() > 1 {
            return Err(PlatformError::invalid_definition(format!(
                "Table {} has more than one autoincrement column",
                table.name
            )));
        }

        if let Some(pk) = table.primary_key() {
            let sole = pk.columns.len() == 1 && pk.columns[0].eq_ignore_ascii_case(&column.name);
            if !sole {
                return Err(PlatformError::invalid_definition(format!(
                    "Autoincrement column {} on table {} must be the only primary key column",
                    column.name, table.name
                )));
            }
        }
        Ok(())
    }

    fn primary_key_is_autoincrement(table: &Table, parts: &TableParts) -> bool {
        parts.primary_index.as_ref().is_some_and(|pk| {
            pk.columns
                .iter()
                .any(|name| table.column(name).is_some_and(|c| c.autoincrement))
        })
    }
}

impl Platform for SqlitePlatform {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn keywords(&self) -> &KeywordList {
        &self.keywords
    }

    fn type_mappings(&self) -> &TypeMappingTable {
        &self.type_mappings
    }

    // ===== Type Declarations =====

    fn boolean_type_sql(&self, _column: &Column) -> String {
        "BOOLEAN".to_string()
    }

    fn integer_type_sql(&self, column: &Column) -> String {
        format!("INTEGER{}", Self::common_integer_sql(column))
    }

    /// Autoincrement is only implicit for INTEGER primary keys.
    fn bigint_type_sql(&self, column: &Column) -> String {
        if column.autoincrement {
            return self.integer_type_sql(column);
        }
        format!("BIGINT{}", Self::common_integer_sql(column))
    }

    fn smallint_type_sql(&self, column: &Column) -> String {
        if column.autoincrement {
            return self.integer_type_sql(column);
        }
        format!("SMALLINT{}", Self::common_integer_sql(column))
    }

    fn datetime_type_sql(&self, _column: &Column) -> String {
        "DATETIME".to_string()
    }

    fn date_type_sql(&self, _column: &Column) -> String {
        "DATE".to_string()
    }

    fn time_type_sql(&self, _column: &Column) -> String {
        "TIME".to_string()
    }

    fn varchar_type_snippet(&self, length: u32, fixed: bool) -> String {
        match (fixed, length) {
            (true, 0) => "CHAR(255)".to_string(),
            (true, n) => format!("CHAR({})", n),
            (false, 0) => "TEXT".to_string(),
            (false, n) => format!("VARCHAR({})", n),
        }
    }

    fn binary_type_snippet(&self, _length: u32, _fixed: bool) -> String {
        "BLOB".to_string()
    }

    fn clob_type_sql(&self, _column: &Column) -> String {
        "CLOB".to_string()
    }

    fn blob_type_sql(&self, _column: &Column) -> String {
        "BLOB".to_string()
    }

    /// `--comment` lines terminated by a newline.
    fn inline_column_comment_sql(&self, comment: &str) -> Result<String> {
        Ok(format!("--{}\n", comment.replace('\n', "\n--")))
    }

    // ===== CREATE / DROP =====

    fn default_create_flags(&self) -> CreateFlags {
        CreateFlags::ALL
    }

    /// Unique constraints, primary key and foreign keys are declared inline;
    /// indexes follow as separate statements unless the table is being
    /// recreated by an ALTER emulation.
    fn build_create_table(&self, table: &Table, parts: &TableParts) -> Result<Vec<String>> {
        self.check_autoincrement_primary_key(table)?;

        let name = self.table_name_sql(&table.name);
        let mut fields = self.column_declaration_list_sql(&table.columns)?;

        for constraint in &parts.unique_constraints {
            fields.push_str(", ");
            fields.push_str(&self.unique_constraint_declaration_sql(constraint)?);
        }

        if !parts.primary.is_empty() && !Self::primary_key_is_autoincrement(table, parts) {
            fields.push_str(&format!(", PRIMARY KEY({})", parts.primary.join(", ")));
        }

        for fk in &parts.foreign_keys {
            fields.push_str(", ");
            fields.push_str(&self.foreign_key_declaration_sql(fk)?);
        }

        let check = self.check_declaration_sql(&table.check_constraints)?;
        if !check.is_empty() {
            fields.push_str(", ");
            fields.push_str(&check);
        }

        let comment = match &table.options.comment {
            Some(comment) => self.inline_column_comment_sql(comment.trim_matches(&[' ', '\''][..]))?,
            None => String::new(),
        };

        let create = if table.options.temporary {
            self.create_temporary_table_snippet()
        } else {
            "CREATE TABLE"
        };

        let mut sql = vec![format!("{} {} {}({})", create, name, comment, fields)];
        if parts.alter {
            return Ok(sql);
        }

        for index in &parts.indexes {
            sql.push(self.create_index_sql(index, &table.name)?);
        }
        Ok(sql)
    }

    /// Foreign keys are part of each CREATE TABLE.
    fn create_tables_sql(&self, tables: &[Table]) -> Result<Vec<String>> {
        let mut sql = Vec::new();
        for table in tables {
            sql.extend(self.create_table(table)?);
        }
        Ok(sql)
    }

    fn drop_tables_sql(&self, tables: &[Table]) -> Result<Vec<String>> {
        Ok(tables.iter().map(|t| self.drop_table_sql(&t.name)).collect())
    }

    fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.table_name_sql(table))
    }

    fn truncate_table_sql(&self, table: &str, _cascade: bool) -> String {
        format!("DELETE FROM {}", self.table_name_sql(table))
    }

    fn create_index_sql(&self, index: &Index, table: &str) -> Result<String> {
        let mut name = self.quoted_name(&index.name);
        let mut table_name = self.table_name_sql(table);

        if index.columns.is_empty() {
            return Err(PlatformError::invalid_definition(format!(
                "Incomplete or invalid index definition {} on table {}",
                name, table_name
            )));
        }
        if index.is_primary {
            return self.create_primary_key_sql(index, table);
        }

        if !self.schema_emulation {
            let table_id = Identifier::parse(table);
            if let Some(schema) = table_id.namespace() {
                name = format!("{}.{}", schema, name);
                table_name = self.quoted_name(table_id.short_name());
            }
        }

        Ok(format!(
            "CREATE {}INDEX {} ON {} ({}){}",
            self.create_index_flags(index),
            name,
            table_name,
            self.index_columns_sql(index),
            self.partial_index_sql(index)
        ))
    }

    fn create_primary_key_sql(&self, _index: &Index, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported("alter primary key", self.name()))
    }

    fn create_constraint_sql(&self, _index: &Index, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported("alter constraint", self.name()))
    }

    fn create_unique_constraint_sql(&self, _constraint: &UniqueConstraint, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported("alter constraint", self.name()))
    }

    fn drop_constraint_sql(&self, _name: &str, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported("alter constraint", self.name()))
    }

    fn create_foreign_key_sql(&self, _fk: &ForeignKey, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported("alter foreign key", self.name()))
    }

    fn drop_foreign_key_sql(&self, _name: &str, _table: &str) -> Result<String> {
        Err(PlatformError::not_supported("alter foreign key", self.name()))
    }

    /// Inline declaration; the referenced table gets schema emulation.
    fn foreign_key_declaration_sql(&self, fk: &ForeignKey) -> Result<String> {
        let mut fk = fk.clone();
        fk.foreign_table = self.emulate_schema_namespacing(&fk.foreign_table);
        Ok(format!(
            "{}{}",
            self.foreign_key_base_declaration_sql(&fk)?,
            self.advanced_foreign_key_options_sql(&fk)?
        ))
    }

    fn advanced_foreign_key_options_sql(&self, fk: &ForeignKey) -> Result<String> {
        let mut sql = crate::core::ddl::advanced_foreign_key_options_sql(self, fk)?;
        if !fk.deferrable {
            sql.push_str(" NOT");
        }
        sql.push_str(" DEFERRABLE INITIALLY");
        sql.push_str(if fk.deferred { " DEFERRED" } else { " IMMEDIATE" });
        Ok(sql)
    }

    // ===== ALTER TABLE =====

    /// Column additions and renames map onto SQLite's own ALTER TABLE;
    /// everything else recreates the table.
    fn build_alter_table(&self, diff: &TableDiff) -> Result<Vec<String>> {
        alter::alter_table_sql(self, diff)
    }

    fn pre_alter_table_index_foreign_key_sql(&self, _diff: &TableDiff) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Recreate the non-primary indexes of the altered table.
    fn post_alter_table_index_foreign_key_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let table = diff.new_name.as_deref().unwrap_or_else(|| diff.name());
        alter::indexes_in_altered_table(diff)
            .iter()
            .filter(|index| !index.is_primary)
            .map(|index| self.create_index_sql(index, table))
            .collect()
    }

    // ===== Queries & Transactions =====

    fn limit_query(&self, query: &str, limit: Option<u64>, offset: u64) -> String {
        match limit {
            None if offset > 0 => format!("{} LIMIT -1 OFFSET {}", query, offset),
            Some(limit) if offset > 0 => format!("{} LIMIT {} OFFSET {}", query, limit, offset),
            Some(limit) => format!("{} LIMIT {}", query, limit),
            None => query.to_string(),
        }
    }

    /// SQLite only distinguishes dirty reads from everything else.
    fn set_transaction_isolation_sql(&self, level: TransactionIsolationLevel) -> Result<String> {
        let value = match level {
            TransactionIsolationLevel::ReadUncommitted => 0,
            _ => 1,
        };
        Ok(format!("PRAGMA read_uncommitted = {}", value))
    }

    fn for_update_sql(&self) -> String {
        String::new()
    }

    // ===== Introspection SQL =====

    fn list_tables_sql(&self) -> Result<String> {
        Ok("SELECT name FROM sqlite_master \
            WHERE type = 'table' \
            AND name != 'sqlite_sequence' \
            AND name != 'geometry_columns' \
            AND name != 'spatial_ref_sys' \
            UNION ALL SELECT name FROM sqlite_temp_master \
            WHERE type = 'table' ORDER BY name"
            .to_string())
    }

    fn list_views_sql(&self, _database: &str) -> Result<String> {
        Ok("SELECT name, sql FROM sqlite_master WHERE type='view' AND sql NOT NULL".to_string())
    }

    fn list_table_constraints_sql(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT sql FROM sqlite_master WHERE type='index' AND tbl_name = {} AND sql NOT NULL ORDER BY name",
            self.quote_string_literal(&self.emulate_schema_namespacing(table))
        ))
    }

    fn list_table_columns_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "PRAGMA table_info({})",
            self.quote_string_literal(&self.emulate_schema_namespacing(table))
        ))
    }

    fn list_table_indexes_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "PRAGMA index_list({})",
            self.quote_string_literal(&self.emulate_schema_namespacing(table))
        ))
    }

    fn list_table_foreign_keys_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "PRAGMA foreign_key_list({})",
            self.quote_string_literal(&self.emulate_schema_namespacing(table))
        ))
    }
}

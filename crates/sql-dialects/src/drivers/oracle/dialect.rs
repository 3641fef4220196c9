//! Oracle SQL dialect (Strategy pattern).
//!
//! Oracle has no autoincrement column type. An autoincrement column is
//! emulated with three statements emitted after CREATE TABLE:
//!
//! 1. A PL/SQL block adding the primary key when the table has none
//! 2. A `{TABLE}_SEQ` sequence
//! 3. A `{TABLE}_AI_PK` BEFORE INSERT trigger filling the column from it
//!
//! Unquoted names are folded to upper case before they are used as
//! sequence, trigger or dictionary lookup names, matching how Oracle
//! stores them.

use tracing::debug;

use crate::core::capabilities::{Capabilities, TransactionIsolationLevel};
use crate::core::ddl::{self, TableParts};
use crate::core::diff::TableDiff;
use crate::core::identifier::{self, Identifier};
use crate::core::keywords::KeywordList;
use crate::core::schema::{Column, ColumnType, ForeignKey, Index, Sequence, Table};
use crate::core::traits::Platform;
use crate::dialect::TypeMappingTable;
use crate::error::{PlatformError, Result};

const MAX_IDENTIFIER_LENGTH: usize = 30;
const BINARY_MAX_LENGTH: u32 = 2000;

/// Oracle platform.
#[derive(Debug, Clone)]
pub struct OraclePlatform {
    capabilities: Capabilities,
    keywords: KeywordList,
    type_mappings: TypeMappingTable,
}

impl Default for OraclePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl OraclePlatform {
    pub fn new() -> Self {
        let capabilities = Capabilities {
            sequences: true,
            comment_on_statement: true,
            release_savepoints: false,
            foreign_key_on_update: false,
            rename_index: true,
            max_identifier_length: MAX_IDENTIFIER_LENGTH,
            default_isolation: TransactionIsolationLevel::ReadCommitted,
            quote_char: '"',
            varchar_max_length: 4000,
            char_max_length: 4000,
            binary_max_length: BINARY_MAX_LENGTH,
            ..Capabilities::base()
        };

        Self {
            capabilities,
            keywords: KeywordList::oracle(),
            type_mappings: TypeMappingTable::oracle(),
        }
    }

    /// Check that `name` is a legal Oracle identifier: a letter followed by
    /// letters, digits, `_`, `$` or `#`, or any non-empty double-quoted text.
    pub fn assert_valid_identifier(name: &str) -> Result<()> {
        let quoted = name.len() > 2
            && name.starts_with('"')
            && name.ends_with('"')
            && !name[1..name.len() - 1].contains('"');

        let mut chars = name.chars();
        let plain = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#'));

        if quoted || plain {
            Ok(())
        } else {
            Err(PlatformError::invalid_argument(format!(
                "Invalid Oracle identifier: {}",
                name
            )))
        }
    }

    /// Fold an unquoted name to upper case; quoted names keep their case.
    fn normalize(name: &str) -> String {
        if identifier::is_identifier_quoted(name) {
            name.to_string()
        } else {
            name.to_uppercase()
        }
    }

    /// Dictionary lookup literal for a table or owner name.
    fn dictionary_literal(&self, name: &str) -> String {
        self.quote_string_literal(Identifier::parse(&Self::normalize(name)).name())
    }

    /// `{TABLE}_AI_PK`, shared by the guard constraint and the trigger.
    fn autoincrement_identifier_name(&self, table: &str) -> String {
        let table = Identifier::parse(&Self::normalize(table));
        let name = identifier::with_suffix(table.name(), "_AI_PK", MAX_IDENTIFIER_LENGTH);
        if table.is_quoted() {
            self.quote_single_identifier(&name)
        } else {
            name
        }
    }

    /// Statements emulating an autoincrement column on `table`.
    pub fn create_autoincrement_sql(&self, column: &str, table: &str, start: i64) -> Result<Vec<String>> {
        let table_id = Identifier::parse(&Self::normalize(table));
        let quoted_table = self.quoted_name(&Self::normalize(table));
        let quoted_column = self.quoted_name(&Self::normalize(column));

        let ai_name = self.autoincrement_identifier_name(table);
        let pk_index = Index::primary(ai_name.clone(), &[quoted_column.as_str()]);

        let mut sql = vec![format!(
            "DECLARE\n  constraints_Count NUMBER;\nBEGIN\n  \
             SELECT COUNT(CONSTRAINT_NAME) INTO constraints_Count\n    \
             FROM USER_CONSTRAINTS\n   \
             WHERE TABLE_NAME = '{}'\n     \
             AND CONSTRAINT_TYPE = 'P';\n  \
             IF constraints_Count = 0 OR constraints_Count = '' THEN\n    \
             EXECUTE IMMEDIATE '{}';\n  \
             END IF;\nEND;",
            table_id.name(),
            self.create_constraint_sql(&pk_index, &quoted_table)?
        )];

        let sequence_table = if table_id.is_quoted() {
            quoted_table.clone()
        } else {
            table_id.name().to_string()
        };
        let sequence_name = self.identity_sequence_name(&sequence_table, column);
        let sequence = Sequence::new(sequence_name.clone()).starting_at(start);
        sql.push(self.create_sequence_sql(&sequence)?);

        let unquoted_sequence = Identifier::parse(&sequence_name).name().to_string();
        sql.push(format!(
            "CREATE TRIGGER {ai}\n   BEFORE INSERT\n   ON {table}\n   FOR EACH ROW\n\
             DECLARE\n   last_Sequence NUMBER;\n   last_InsertID NUMBER;\n\
             BEGIN\n   \
             IF (:NEW.{col} IS NULL OR :NEW.{col} = 0) THEN\n      \
             SELECT {seq}.NEXTVAL INTO :NEW.{col} FROM DUAL;\n   \
             ELSE\n      \
             SELECT NVL(Last_Number, 0) INTO last_Sequence\n        \
             FROM User_Sequences\n       \
             WHERE Sequence_Name = '{plain_seq}';\n      \
             SELECT :NEW.{col} INTO last_InsertID FROM DUAL;\n      \
             WHILE (last_InsertID > last_Sequence) LOOP\n         \
             SELECT {seq}.NEXTVAL INTO last_Sequence FROM DUAL;\n      \
             END LOOP;\n      \
             SELECT {seq}.NEXTVAL INTO last_Sequence FROM DUAL;\n   \
             END IF;\nEND;",
            ai = ai_name,
            table = quoted_table,
            col = quoted_column,
            seq = sequence_name,
            plain_seq = unquoted_sequence
        ));

        debug!(table, column, "Generated autoincrement emulation");
        Ok(sql)
    }

    /// Statements removing the autoincrement emulation from `table`.
    pub fn drop_autoincrement_sql(&self, table: &str) -> Result<Vec<String>> {
        let table_id = Identifier::parse(&Self::normalize(table));
        let ai_name = self.autoincrement_identifier_name(table);
        let sequence_table = if table_id.is_quoted() {
            self.quoted_name(&Self::normalize(table))
        } else {
            table_id.name().to_string()
        };
        let sequence_name = self.identity_sequence_name(&sequence_table, "");

        Ok(vec![
            format!("DROP TRIGGER {}", ai_name),
            self.drop_sequence_sql(&sequence_name)?,
            self.drop_constraint_sql(&ai_name, &Self::normalize(table))?,
        ])
    }

    fn sequence_cache_sql(sequence: &Sequence) -> String {
        match sequence.cache {
            Some(0) | Some(1) => " NOCACHE".to_string(),
            Some(cache) if cache > 1 => format!(" CACHE {}", cache),
            _ => String::new(),
        }
    }

    /// Declaration body; `notnull` of `None` leaves nullability unstated.
    fn declaration_sql(&self, column: &Column, notnull: Option<bool>) -> Result<String> {
        if let Some(definition) = &column.column_definition {
            return Ok(definition.clone());
        }
        let mut declaration = self.column_type_sql(column);
        declaration.push_str(&self.default_value_sql(column)?);
        match notnull {
            Some(true) => declaration.push_str(" NOT NULL"),
            Some(false) => declaration.push_str(" NULL"),
            None => {}
        }
        Ok(declaration)
    }
}

impl Platform for OraclePlatform {
    fn name(&self) -> &str {
        "oracle"
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
        "NUMBER(1)".to_string()
    }

    fn integer_type_sql(&self, _column: &Column) -> String {
        "NUMBER(10)".to_string()
    }

    fn bigint_type_sql(&self, _column: &Column) -> String {
        "NUMBER(20)".to_string()
    }

    fn smallint_type_sql(&self, _column: &Column) -> String {
        "NUMBER(5)".to_string()
    }

    fn datetime_type_sql(&self, _column: &Column) -> String {
        "TIMESTAMP(0)".to_string()
    }

    fn datetimetz_type_sql(&self, _column: &Column) -> String {
        "TIMESTAMP(0) WITH TIME ZONE".to_string()
    }

    fn date_type_sql(&self, _column: &Column) -> String {
        "DATE".to_string()
    }

    fn time_type_sql(&self, _column: &Column) -> String {
        "DATE".to_string()
    }

    fn varchar_type_snippet(&self, length: u32, fixed: bool) -> String {
        match (fixed, length) {
            (true, 0) => "CHAR(2000)".to_string(),
            (true, n) => format!("CHAR({})", n),
            (false, 0) => "VARCHAR2(4000)".to_string(),
            (false, n) => format!("VARCHAR2({})", n),
        }
    }

    fn binary_type_snippet(&self, length: u32, _fixed: bool) -> String {
        let length = if length > 0 { length } else { BINARY_MAX_LENGTH };
        format!("RAW({})", length)
    }

    fn clob_type_sql(&self, _column: &Column) -> String {
        "CLOB".to_string()
    }

    fn blob_type_sql(&self, _column: &Column) -> String {
        "BLOB".to_string()
    }

    /// `name TYPE[ DEFAULT ..] NOT NULL|NULL`; nullability is always stated.
    fn column_declaration_sql(&self, name: &str, column: &Column) -> Result<String> {
        Ok(format!(
            "{} {}",
            name,
            self.declaration_sql(column, Some(!column.is_nullable))?
        ))
    }

    // ===== CREATE / DROP =====

    /// Indexes are created after the autoincrement emulation so a primary
    /// key added by the guard block is already in place.
    fn build_create_table(&self, table: &Table, parts: &TableParts) -> Result<Vec<String>> {
        for part in table.name.split('.') {
            Self::assert_valid_identifier(part)?;
        }
        for column in &table.columns {
            Self::assert_valid_identifier(&column.name)?;
        }

        let mut table_parts = parts.clone();
        let indexes = std::mem::take(&mut table_parts.indexes);
        let mut sql = ddl::build_create_table(self, table, &table_parts)?;

        for column in table.columns.iter().filter(|c| c.autoincrement) {
            sql.extend(self.create_autoincrement_sql(&column.name, &table.name, 1)?);
        }
        for index in &indexes {
            sql.push(self.create_index_sql(index, &table.name)?);
        }
        Ok(sql)
    }

    fn create_temporary_table_snippet(&self) -> &'static str {
        "CREATE GLOBAL TEMPORARY TABLE"
    }

    fn truncate_table_sql(&self, table: &str, _cascade: bool) -> String {
        format!("TRUNCATE TABLE {}", self.quoted_name(table))
    }

    fn create_primary_key_sql(&self, index: &Index, table: &str) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} PRIMARY KEY ({})",
            self.quoted_name(table),
            self.quoted_name(&index.name),
            self.index_columns_sql(index)
        ))
    }

    fn drop_foreign_key_sql(&self, name: &str, table: &str) -> Result<String> {
        self.drop_constraint_sql(name, table)
    }

    /// Only ON DELETE exists; an omitted action means NO ACTION.
    fn advanced_foreign_key_options_sql(&self, fk: &ForeignKey) -> Result<String> {
        let Some(action) = &fk.on_delete else {
            return Ok(String::new());
        };
        let action = self.foreign_key_referential_action_sql(action)?;
        if action.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!(" ON DELETE {}", action))
        }
    }

    /// RESTRICT and NO ACTION cannot be declared and map to an empty
    /// action; SET DEFAULT does not exist.
    fn foreign_key_referential_action_sql(&self, action: &str) -> Result<String> {
        let upper = action.to_uppercase();
        match upper.as_str() {
            "RESTRICT" | "NO ACTION" => Ok(String::new()),
            "CASCADE" | "SET NULL" => Ok(upper),
            _ => Err(PlatformError::invalid_argument(format!(
                "Invalid foreign key action: {}",
                upper
            ))),
        }
    }

    /// Oracle databases are users.
    fn create_database_sql(&self, database: &str) -> Result<String> {
        Ok(format!("CREATE USER {}", database))
    }

    fn drop_database_sql(&self, database: &str) -> Result<String> {
        Ok(format!("DROP USER {} CASCADE", database))
    }

    // ===== ALTER TABLE =====

    fn build_alter_table(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let table = diff.name();
        let table_name = self.quoted_name(table);
        let mut sql = Vec::new();
        let mut comments = Vec::new();

        let mut fields = Vec::new();
        for column in &diff.added_columns {
            fields.push(self.column_declaration_sql(&self.quoted_name(&column.name), column)?);
            if let Some(comment) = column.effective_comment() {
                comments.push(self.comment_on_column_sql(table, &column.name, Some(comment)));
            }
        }
        if !fields.is_empty() {
            sql.push(format!("ALTER TABLE {} ADD ({})", table_name, fields.join(", ")));
        }

        let mut fields = Vec::new();
        for change in &diff.changed_columns {
            let new_column = &change.new_column;
            let changes = change.changed_property_count();

            // binary columns are always variable length here
            if new_column.column_type == ColumnType::Binary
                && change.has_fixed_changed()
                && changes == 1
            {
                continue;
            }

            let comment_changed = change.has_comment_changed();
            if !(comment_changed && changes == 1) {
                let notnull = change
                    .has_notnull_changed()
                    .then_some(!new_column.is_nullable);
                fields.push(format!(
                    "{} {}",
                    self.quoted_name(&new_column.name),
                    self.declaration_sql(new_column, notnull)?
                ));
            }

            if comment_changed {
                comments.push(self.comment_on_column_sql(
                    table,
                    &new_column.name,
                    new_column.effective_comment(),
                ));
            }
        }
        if !fields.is_empty() {
            sql.push(format!("ALTER TABLE {} MODIFY ({})", table_name, fields.join(", ")));
        }

        for (old_name, column) in &diff.renamed_columns {
            sql.push(format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {}",
                table_name,
                self.quoted_name(old_name),
                self.quoted_name(&column.name)
            ));
        }

        let dropped: Vec<String> = diff
            .dropped_columns
            .iter()
            .map(|c| self.quoted_name(&c.name))
            .collect();
        if !dropped.is_empty() {
            sql.push(format!("ALTER TABLE {} DROP ({})", table_name, dropped.join(", ")));
        }

        sql.extend(comments);

        if let Some(new_name) = &diff.new_name {
            sql.push(self.rename_table_sql(table, new_name));
        }

        let mut statements = self.pre_alter_table_index_foreign_key_sql(diff)?;
        statements.extend(sql);
        statements.extend(self.post_alter_table_index_foreign_key_sql(diff)?);
        Ok(statements)
    }

    fn rename_index_sql(&self, old_name: &str, index: &Index, table: &str) -> Result<Vec<String>> {
        let old_name = match Identifier::parse(table).namespace() {
            Some(schema) => format!("{}.{}", schema, old_name),
            None => old_name.to_string(),
        };
        Ok(vec![format!(
            "ALTER INDEX {} RENAME TO {}",
            old_name,
            self.quoted_name(&index.name)
        )])
    }

    // ===== Sequences =====

    fn create_sequence_sql(&self, sequence: &Sequence) -> Result<String> {
        Ok(format!(
            "CREATE SEQUENCE {} START WITH {} MINVALUE {} INCREMENT BY {}{}",
            self.quoted_name(&sequence.name),
            sequence.initial_value,
            sequence.initial_value,
            sequence.allocation_size,
            Self::sequence_cache_sql(sequence)
        ))
    }

    fn alter_sequence_sql(&self, sequence: &Sequence) -> Result<String> {
        Ok(format!(
            "ALTER SEQUENCE {} INCREMENT BY {}{}",
            self.quoted_name(&sequence.name),
            sequence.allocation_size,
            Self::sequence_cache_sql(sequence)
        ))
    }

    fn sequence_next_val_sql(&self, sequence: &str) -> Result<String> {
        Ok(format!("SELECT {}.nextval FROM DUAL", sequence))
    }

    /// `{TABLE}_SEQ`; the column is not part of the name.
    fn identity_sequence_name(&self, table: &str, _column: &str) -> String {
        let table = Identifier::parse(table);
        let name = identifier::with_suffix(table.name(), "_SEQ", MAX_IDENTIFIER_LENGTH);
        let name = if table.is_quoted() {
            format!("\"{}\"", name)
        } else {
            name
        };
        self.quoted_name(&Self::normalize(&name))
    }

    // ===== Queries & Transactions =====

    /// ROWNUM emulation of LIMIT/OFFSET; non-SELECT queries pass through.
    fn limit_query(&self, query: &str, limit: Option<u64>, offset: u64) -> String {
        if limit.is_none() && offset == 0 {
            return query.to_string();
        }
        if !query.trim_start().to_uppercase().starts_with("SELECT") {
            return query.to_string();
        }

        let mut inner = query.to_string();
        if !query.to_uppercase().split_whitespace().any(|word| word == "FROM") {
            inner.push_str(" FROM dual");
        }

        let columns = if offset > 0 {
            "a.*, ROWNUM AS row_num"
        } else {
            "a.*"
        };
        let mut sql = format!("SELECT {} FROM ({}) a", columns, inner);
        if let Some(limit) = limit {
            sql.push_str(&format!(" WHERE ROWNUM <= {}", offset.saturating_add(limit)));
        }
        if offset > 0 {
            sql = format!("SELECT * FROM ({}) WHERE row_num >= {}", sql, offset.saturating_add(1));
        }
        sql
    }

    fn set_transaction_isolation_sql(&self, level: TransactionIsolationLevel) -> Result<String> {
        let level = match level {
            TransactionIsolationLevel::RepeatableRead | TransactionIsolationLevel::Serializable => {
                "SERIALIZABLE"
            }
            other => other.as_sql(),
        };
        Ok(format!("SET TRANSACTION ISOLATION LEVEL {}", level))
    }

    fn release_savepoint_sql(&self, _savepoint: &str) -> String {
        String::new()
    }

    fn dummy_select_sql(&self) -> String {
        "SELECT 1 FROM DUAL".to_string()
    }

    // ===== Introspection SQL =====

    fn list_databases_sql(&self) -> Result<String> {
        Ok("SELECT username FROM all_users".to_string())
    }

    fn list_tables_sql(&self) -> Result<String> {
        Ok("SELECT * FROM sys.user_tables".to_string())
    }

    fn list_sequences_sql(&self, database: &str) -> Result<String> {
        Ok(format!(
            "SELECT sequence_name, min_value, increment_by FROM sys.all_sequences WHERE SEQUENCE_OWNER = {}",
            self.dictionary_literal(database)
        ))
    }

    fn list_views_sql(&self, _database: &str) -> Result<String> {
        Ok("SELECT view_name, text FROM sys.user_views".to_string())
    }

    fn list_table_indexes_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT uind_col.index_name AS name, \
             (SELECT uind.index_type FROM user_indexes uind \
             WHERE uind.index_name = uind_col.index_name) AS type, \
             decode((SELECT uind.uniqueness FROM user_indexes uind \
             WHERE uind.index_name = uind_col.index_name), 'NONUNIQUE', 0, 'UNIQUE', 1) AS is_unique, \
             uind_col.column_name AS column_name, \
             uind_col.column_position AS column_pos, \
             (SELECT ucon.constraint_type FROM user_constraints ucon \
             WHERE ucon.index_name = uind_col.index_name \
             AND ucon.table_name = uind_col.table_name) AS is_primary \
             FROM user_ind_columns uind_col \
             WHERE uind_col.table_name = {} \
             ORDER BY uind_col.column_position ASC",
            self.dictionary_literal(table)
        ))
    }

    fn list_table_foreign_keys_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT alc.constraint_name, alc.DELETE_RULE, cols.column_name \"local_column\", cols.position, \
             (SELECT r_cols.table_name FROM user_cons_columns r_cols \
             WHERE alc.r_constraint_name = r_cols.constraint_name \
             AND r_cols.position = cols.position) AS \"references_table\", \
             (SELECT r_cols.column_name FROM user_cons_columns r_cols \
             WHERE alc.r_constraint_name = r_cols.constraint_name \
             AND r_cols.position = cols.position) AS \"foreign_column\" \
             FROM user_cons_columns cols \
             JOIN user_constraints alc \
             ON alc.constraint_name = cols.constraint_name \
             AND alc.constraint_type = 'R' \
             AND alc.table_name = {} \
             ORDER BY cols.constraint_name ASC, cols.position ASC",
            self.dictionary_literal(table)
        ))
    }

    fn list_table_constraints_sql(&self, table: &str) -> Result<String> {
        Ok(format!(
            "SELECT * FROM user_constraints WHERE table_name = {}",
            self.dictionary_literal(table)
        ))
    }

    /// Columns of `table`; an owner other than `/` switches to the `all_*` views.
    fn list_table_columns_sql(&self, table: &str, database: Option<&str>) -> Result<String> {
        let owner = database.filter(|d| *d != "/");
        let (tab_columns, col_comments, tab_owner, comment_owner) = match owner {
            Some(owner) => (
                "all_tab_columns",
                "all_col_comments",
                format!(" AND c.owner = {}", self.dictionary_literal(owner)),
                " AND d.OWNER = c.OWNER",
            ),
            None => ("user_tab_columns", "user_col_comments", String::new(), ""),
        };
        Ok(format!(
            "SELECT c.*, \
             (SELECT d.comments FROM {} d \
             WHERE d.TABLE_NAME = c.TABLE_NAME{} \
             AND d.COLUMN_NAME = c.COLUMN_NAME) AS comments \
             FROM {} c \
             WHERE c.table_name = {}{} \
             ORDER BY c.column_id",
            col_comments,
            comment_owner,
            tab_columns,
            self.dictionary_literal(table),
            tab_owner
        ))
    }

    fn list_table_comments_sql(&self, table: &str, database: Option<&str>) -> Result<String> {
        let (view, owner) = match database.filter(|d| *d != "/") {
            Some(owner) => (
                "all_tab_comments",
                format!(" AND owner = {}", self.dictionary_literal(owner)),
            ),
            None => ("user_tab_comments", String::new()),
        };
        Ok(format!(
            "SELECT comments FROM {} WHERE table_name = {}{}",
            view,
            self.dictionary_literal(table),
            owner
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::CreateFlags;

    fn make_test_column(name: &str, column_type: ColumnType) -> Column {
        Column::new(name, column_type)
    }

    fn make_test_table() -> Table {
        Table::new("users")
            .with_column(make_test_column("id", ColumnType::Integer))
            .with_column(make_test_column("email", ColumnType::String).with_length(180))
            .with_primary_key(&["id"])
    }

    // =========================================================================
    // Identifier tests
    // =========================================================================

    #[test]
    fn test_quote_identifier() {
        let p = OraclePlatform::new();
        assert_eq!(p.quote_identifier("a.b"), "\"a\".\"b\"");
        assert_eq!(p.quoted_name("comment"), "\"comment\"");
        assert_eq!(p.quoted_name("email"), "email");
    }

    #[test]
    fn test_assert_valid_identifier() {
        assert!(OraclePlatform::assert_valid_identifier("users_1$").is_ok());
        assert!(OraclePlatform::assert_valid_identifier("\"my table\"").is_ok());
        assert!(OraclePlatform::assert_valid_identifier("1users").is_err());
        assert!(OraclePlatform::assert_valid_identifier("bad-name").is_err());
        assert!(OraclePlatform::assert_valid_identifier("").is_err());
    }

    #[test]
    fn test_identity_sequence_name() {
        let p = OraclePlatform::new();
        assert_eq!(p.identity_sequence_name("users", "id"), "USERS_SEQ");
        assert_eq!(p.identity_sequence_name("\"users\"", "id"), "\"users_SEQ\"");

        let long = "a_very_long_table_name_for_oracle";
        let seq = p.identity_sequence_name(long, "id");
        assert_eq!(seq.len(), 30);
        assert!(seq.ends_with("_SEQ"));
    }

    // =========================================================================
    // Type declaration tests
    // =========================================================================

    #[test]
    fn test_number_types() {
        let p = OraclePlatform::new();
        assert_eq!(p.column_type_sql(&make_test_column("b", ColumnType::Boolean)), "NUMBER(1)");
        assert_eq!(p.column_type_sql(&make_test_column("s", ColumnType::SmallInt)), "NUMBER(5)");
        assert_eq!(p.column_type_sql(&make_test_column("i", ColumnType::Integer)), "NUMBER(10)");
        assert_eq!(p.column_type_sql(&make_test_column("l", ColumnType::BigInt)), "NUMBER(20)");
    }

    #[test]
    fn test_string_and_binary_types() {
        let p = OraclePlatform::new();
        let col = make_test_column("s", ColumnType::String).with_length(100);
        assert_eq!(p.column_type_sql(&col), "VARCHAR2(100)");
        let col = make_test_column("s", ColumnType::String).with_length(0);
        assert_eq!(p.column_type_sql(&col), "VARCHAR2(4000)");
        let col = make_test_column("s", ColumnType::String).with_length(0).fixed();
        assert_eq!(p.column_type_sql(&col), "CHAR(2000)");
        let col = make_test_column("s", ColumnType::String).with_length(5000);
        assert_eq!(p.column_type_sql(&col), "CLOB");

        let bin = make_test_column("b", ColumnType::Binary).with_length(16);
        assert_eq!(p.column_type_sql(&bin), "RAW(16)");
        let bin = make_test_column("b", ColumnType::Binary).with_length(3000);
        assert_eq!(p.column_type_sql(&bin), "BLOB");
        assert_eq!(p.column_type_sql(&make_test_column("g", ColumnType::Guid)), "CHAR(36)");
        assert_eq!(p.column_type_sql(&make_test_column("j", ColumnType::Json)), "CLOB");
    }

    #[test]
    fn test_temporal_types() {
        let p = OraclePlatform::new();
        assert_eq!(p.column_type_sql(&make_test_column("d", ColumnType::DateTime)), "TIMESTAMP(0)");
        assert_eq!(
            p.column_type_sql(&make_test_column("d", ColumnType::DateTimeTz)),
            "TIMESTAMP(0) WITH TIME ZONE"
        );
        assert_eq!(p.column_type_sql(&make_test_column("d", ColumnType::Date)), "DATE");
        assert_eq!(p.column_type_sql(&make_test_column("t", ColumnType::Time)), "DATE");
    }

    #[test]
    fn test_column_declaration_states_nullability() {
        let p = OraclePlatform::new();
        let col = make_test_column("bio", ColumnType::Text).nullable();
        assert_eq!(p.column_declaration_sql("bio", &col).unwrap(), "bio CLOB DEFAULT NULL NULL");
        let flag = make_test_column("active", ColumnType::Boolean).with_default(true);
        assert_eq!(
            p.column_declaration_sql("active", &flag).unwrap(),
            "active NUMBER(1) DEFAULT 1 NOT NULL"
        );
    }

    // =========================================================================
    // CREATE TABLE tests
    // =========================================================================

    #[test]
    fn test_create_table() {
        let p = OraclePlatform::new();
        let table = make_test_table().with_index(Index::new("idx_email", &["email"]));
        assert_eq!(
            p.create_table(&table).unwrap(),
            vec![
                "CREATE TABLE users (id NUMBER(10) NOT NULL, email VARCHAR2(180) NOT NULL, PRIMARY KEY(id))"
                    .to_string(),
                "CREATE INDEX idx_email ON users (email)".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_table_with_autoincrement() {
        let p = OraclePlatform::new();
        let table = Table::new("users")
            .with_column(make_test_column("id", ColumnType::Integer).autoincrement())
            .with_index(Index::new("idx_id", &["id"]));
        let sql = p.create_table(&table).unwrap();

        assert_eq!(sql.len(), 5);
        assert_eq!(sql[0], "CREATE TABLE users (id NUMBER(10) NOT NULL)");
        assert!(sql[1].starts_with("DECLARE\n  constraints_Count NUMBER;"));
        assert!(sql[1].contains("WHERE TABLE_NAME = 'USERS'"));
        assert!(sql[1].contains(
            "EXECUTE IMMEDIATE 'ALTER TABLE USERS ADD CONSTRAINT USERS_AI_PK PRIMARY KEY (ID)'"
        ));
        assert_eq!(sql[2], "CREATE SEQUENCE USERS_SEQ START WITH 1 MINVALUE 1 INCREMENT BY 1");
        assert!(sql[3].starts_with("CREATE TRIGGER USERS_AI_PK\n   BEFORE INSERT\n   ON USERS"));
        assert!(sql[3].contains("SELECT USERS_SEQ.NEXTVAL INTO :NEW.ID FROM DUAL;"));
        assert!(sql[3].contains("WHERE Sequence_Name = 'USERS_SEQ';"));
        assert_eq!(sql[4], "CREATE INDEX idx_id ON users (id)");
    }

    #[test]
    fn test_drop_autoincrement() {
        let p = OraclePlatform::new();
        assert_eq!(
            p.drop_autoincrement_sql("users").unwrap(),
            vec![
                "DROP TRIGGER USERS_AI_PK".to_string(),
                "DROP SEQUENCE USERS_SEQ".to_string(),
                "ALTER TABLE USERS DROP CONSTRAINT USERS_AI_PK".to_string(),
            ]
        );
    }

    #[test]
    fn test_create_temporary_table() {
        let p = OraclePlatform::new();
        let mut table = make_test_table();
        table.options.temporary = true;
        let sql = p.create_table_sql(&table, CreateFlags::NONE).unwrap();
        assert_eq!(
            sql[0],
            "CREATE GLOBAL TEMPORARY TABLE users (id NUMBER(10) NOT NULL, email VARCHAR2(180) NOT NULL)"
        );
    }

    #[test]
    fn test_foreign_key_actions() {
        let p = OraclePlatform::new();
        let fk = ForeignKey::new("fk_acct", &["account_id"], "accounts", &["id"])
            .on_delete("cascade")
            .on_update("cascade");
        assert_eq!(
            p.foreign_key_declaration_sql(&fk).unwrap(),
            "CONSTRAINT fk_acct FOREIGN KEY (account_id) REFERENCES accounts (id) ON DELETE CASCADE"
        );

        let restrict = ForeignKey::new("fk_acct", &["account_id"], "accounts", &["id"]).on_delete("RESTRICT");
        assert_eq!(p.advanced_foreign_key_options_sql(&restrict).unwrap(), "");

        let err = p.foreign_key_referential_action_sql("SET DEFAULT").unwrap_err();
        assert!(matches!(err, PlatformError::InvalidArgument(_)));
    }

    #[test]
    fn test_database_and_drop_statements() {
        let p = OraclePlatform::new();
        assert_eq!(p.create_database_sql("app").unwrap(), "CREATE USER app");
        assert_eq!(p.drop_database_sql("app").unwrap(), "DROP USER app CASCADE");
        assert_eq!(p.truncate_table_sql("users", true), "TRUNCATE TABLE users");
        assert_eq!(
            p.drop_foreign_key_sql("fk_a", "users").unwrap(),
            "ALTER TABLE users DROP CONSTRAINT fk_a"
        );
        assert!(p.create_schema_sql("app").is_err());
    }

    // =========================================================================
    // ALTER TABLE tests
    // =========================================================================

    #[test]
    fn test_alter_table() {
        let p = OraclePlatform::new();
        let diff = TableDiff::new(make_test_table())
            .add_column(make_test_column("bio", ColumnType::Text).nullable().with_comment("About"))
            .add_column(make_test_column("code", ColumnType::String).with_length(10))
            .change_column(
                make_test_column("email", ColumnType::String).with_length(180),
                make_test_column("email", ColumnType::String).with_length(255),
            )
            .rename_column("name", make_test_column("full_name", ColumnType::String))
            .drop_column(make_test_column("legacy", ColumnType::Integer))
            .rename_to("members");

        assert_eq!(
            p.alter_table_sql(&diff).unwrap(),
            vec![
                "ALTER TABLE users ADD (bio CLOB DEFAULT NULL NULL, code VARCHAR2(10) NOT NULL)".to_string(),
                "ALTER TABLE users MODIFY (email VARCHAR2(255))".to_string(),
                "ALTER TABLE users RENAME COLUMN name TO full_name".to_string(),
                "ALTER TABLE users DROP (legacy)".to_string(),
                "COMMENT ON COLUMN users.bio IS 'About'".to_string(),
                "ALTER TABLE users RENAME TO members".to_string(),
            ]
        );
    }

    #[test]
    fn test_alter_notnull_and_comment_only() {
        let p = OraclePlatform::new();
        let diff = TableDiff::new(make_test_table())
            .change_column(
                make_test_column("email", ColumnType::String).with_length(180),
                make_test_column("email", ColumnType::String).with_length(180).nullable(),
            )
            .change_column(
                make_test_column("id", ColumnType::Integer),
                make_test_column("id", ColumnType::Integer).with_comment("Key"),
            );
        assert_eq!(
            p.alter_table_sql(&diff).unwrap(),
            vec![
                "ALTER TABLE users MODIFY (email VARCHAR2(180) DEFAULT NULL NULL)".to_string(),
                "COMMENT ON COLUMN users.id IS 'Key'".to_string(),
            ]
        );
    }

    #[test]
    fn test_alter_binary_fixed_only_is_skipped() {
        let p = OraclePlatform::new();
        let diff = TableDiff::new(make_test_table()).change_column(
            make_test_column("hash", ColumnType::Binary).with_length(16),
            make_test_column("hash", ColumnType::Binary).with_length(16).fixed(),
        );
        assert!(p.alter_table_sql(&diff).unwrap().is_empty());
    }

    #[test]
    fn test_rename_index() {
        let p = OraclePlatform::new();
        let diff = TableDiff::new(make_test_table()).rename_index("idx_a", Index::new("idx_b", &["email"]));
        assert_eq!(
            p.alter_table_sql(&diff).unwrap(),
            vec!["ALTER INDEX idx_a RENAME TO idx_b".to_string()]
        );
        assert_eq!(
            p.rename_index_sql("idx_a", &Index::new("idx_b", &["email"]), "app.users").unwrap(),
            vec!["ALTER INDEX app.idx_a RENAME TO idx_b".to_string()]
        );
    }

    // =========================================================================
    // Sequence and query tests
    // =========================================================================

    #[test]
    fn test_sequences() {
        let p = OraclePlatform::new();
        let mut seq = Sequence::new("order_seq").starting_at(5);
        assert_eq!(
            p.create_sequence_sql(&seq).unwrap(),
            "CREATE SEQUENCE order_seq START WITH 5 MINVALUE 5 INCREMENT BY 1"
        );
        seq.cache = Some(1);
        assert_eq!(
            p.alter_sequence_sql(&seq).unwrap(),
            "ALTER SEQUENCE order_seq INCREMENT BY 1 NOCACHE"
        );
        seq.cache = Some(50);
        assert!(p.create_sequence_sql(&seq).unwrap().ends_with(" CACHE 50"));
        assert_eq!(
            p.sequence_next_val_sql("order_seq").unwrap(),
            "SELECT order_seq.nextval FROM DUAL"
        );
    }

    #[test]
    fn test_limit_emulation() {
        let p = OraclePlatform::new();
        assert_eq!(
            p.modify_limit_query("SELECT * FROM users", Some(10), 0).unwrap(),
            "SELECT a.* FROM (SELECT * FROM users) a WHERE ROWNUM <= 10"
        );
        assert_eq!(
            p.modify_limit_query("SELECT * FROM users", Some(10), 20).unwrap(),
            "SELECT * FROM (SELECT a.*, ROWNUM AS row_num FROM (SELECT * FROM users) a WHERE ROWNUM <= 30) WHERE row_num >= 21"
        );
        assert_eq!(
            p.modify_limit_query("SELECT 1", Some(1), 0).unwrap(),
            "SELECT a.* FROM (SELECT 1 FROM dual) a WHERE ROWNUM <= 1"
        );
        assert_eq!(p.modify_limit_query("SELECT * FROM users", None, 0).unwrap(), "SELECT * FROM users");
        assert!(p.modify_limit_query("SELECT * FROM users", Some(1), -1).is_err());
    }

    #[test]
    fn test_create_table_rejects_invalid_identifiers() {
        let p = OraclePlatform::new();
        let table = make_test_table().with_column(make_test_column("bad-name", ColumnType::Integer));
        assert!(matches!(
            p.create_table_sql(&table, CreateFlags::default()),
            Err(PlatformError::InvalidArgument(_))
        ));

        let table = Table {
            name: "1users".to_string(),
            ..make_test_table()
        };
        assert!(p.create_table_sql(&table, CreateFlags::default()).is_err());

        let table = Table {
            name: "app.users".to_string(),
            ..make_test_table()
        };
        assert!(p.create_table_sql(&table, CreateFlags::default()).is_ok());
    }

    #[test]
    fn test_limit_emulation_saturates_upper_bound() {
        let p = OraclePlatform::new();
        assert_eq!(
            p.modify_limit_query("SELECT * FROM users", Some(u64::MAX), 5).unwrap(),
            format!(
                "SELECT * FROM (SELECT a.*, ROWNUM AS row_num FROM (SELECT * FROM users) a WHERE ROWNUM <= {}) WHERE row_num >= 6",
                u64::MAX
            )
        );
    }

    #[test]
    fn test_transactions() {
        let p = OraclePlatform::new();
        assert_eq!(
            p.set_transaction_isolation_sql(TransactionIsolationLevel::RepeatableRead).unwrap(),
            "SET TRANSACTION ISOLATION LEVEL SERIALIZABLE"
        );
        assert_eq!(
            p.set_transaction_isolation_sql(TransactionIsolationLevel::ReadCommitted).unwrap(),
            "SET TRANSACTION ISOLATION LEVEL READ COMMITTED"
        );
        assert_eq!(p.release_savepoint_sql("sp1"), "");
        assert!(!p.capabilities().release_savepoints);
        assert_eq!(p.dummy_select_sql(), "SELECT 1 FROM DUAL");
    }

    // =========================================================================
    // Introspection tests
    // =========================================================================

    #[test]
    fn test_introspection_sql() {
        let p = OraclePlatform::new();
        assert_eq!(p.list_databases_sql().unwrap(), "SELECT username FROM all_users");
        assert_eq!(
            p.list_table_constraints_sql("users").unwrap(),
            "SELECT * FROM user_constraints WHERE table_name = 'USERS'"
        );
        assert_eq!(
            p.list_sequences_sql("app").unwrap(),
            "SELECT sequence_name, min_value, increment_by FROM sys.all_sequences WHERE SEQUENCE_OWNER = 'APP'"
        );
        let columns = p.list_table_columns_sql("users", Some("app")).unwrap();
        assert!(columns.contains("FROM all_tab_columns c"));
        assert!(columns.contains("c.table_name = 'USERS' AND c.owner = 'APP'"));
        let columns = p.list_table_columns_sql("\"users\"", Some("/")).unwrap();
        assert!(columns.contains("FROM user_tab_columns c WHERE c.table_name = 'users'"));
        assert_eq!(
            p.list_table_comments_sql("users", None).unwrap(),
            "SELECT comments FROM user_tab_comments WHERE table_name = 'USERS'"
        );
    }

    #[test]
    fn test_type_mappings() {
        let p = OraclePlatform::new();
        assert_eq!(p.db_type_to_column_type("VARCHAR2").unwrap(), ColumnType::String);
        assert_eq!(p.db_type_to_column_type("raw").unwrap(), ColumnType::Binary);
    }
}

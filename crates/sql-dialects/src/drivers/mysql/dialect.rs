//! MySQL/MariaDB SQL dialect (Strategy pattern).
//!
//! Provides MySQL-specific type declarations, backtick quoting, table
//! options, the single-statement ALTER TABLE and information_schema
//! introspection queries.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::core::capabilities::{Capabilities, TransactionIsolationLevel};
use crate::core::ddl::{self, TableParts};
use crate::core::diff::TableDiff;
use crate::core::identifier;
use crate::core::keywords::KeywordList;
use crate::core::schema::{Column, ForeignKey, Index, Table, TableOptions};
use crate::core::traits::{CreateFlags, Platform};
use crate::dialect::TypeMappingTable;
use crate::error::{PlatformError, Result};

const LENGTH_LIMIT_TINY: u32 = 255;
const LENGTH_LIMIT_REGULAR: u32 = 65535;
const LENGTH_LIMIT_MEDIUM: u32 = 16_777_215;

/// Largest unsigned BIGINT, used as "no limit" when only an offset is given.
const UNBOUNDED_LIMIT: &str = "18446744073709551615";

/// Server flavour and version line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MysqlVersion {
    /// MySQL 5.6 and the lowest common denominator.
    Mysql56,
    /// MySQL 5.7: native JSON and `RENAME INDEX`.
    Mysql57,
    /// MySQL 8.0: 5.7 plus the 8.0 reserved words.
    #[default]
    Mysql80,
    /// MariaDB 10.2+: JSON stored as LONGTEXT.
    MariaDb,
}

impl MysqlVersion {
    fn native_json(&self) -> bool {
        matches!(self, MysqlVersion::Mysql57 | MysqlVersion::Mysql80)
    }

    fn native_rename_index(&self) -> bool {
        matches!(self, MysqlVersion::Mysql57 | MysqlVersion::Mysql80)
    }
}

impl fmt::Display for MysqlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MysqlVersion::Mysql56 => "5.6",
            MysqlVersion::Mysql57 => "5.7",
            MysqlVersion::Mysql80 => "8.0",
            MysqlVersion::MariaDb => "mariadb",
        };
        f.write_str(name)
    }
}

impl FromStr for MysqlVersion {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self> {
        let v = s.trim().to_lowercase();
        if v.starts_with("mariadb") {
            return Ok(MysqlVersion::MariaDb);
        }
        if v.starts_with('8') || v.starts_with('9') {
            return Ok(MysqlVersion::Mysql80);
        }
        if v.starts_with("5.7") {
            return Ok(MysqlVersion::Mysql57);
        }
        if v.starts_with("5.") {
            return Ok(MysqlVersion::Mysql56);
        }
        Err(PlatformError::Config(format!(
            "Unknown MySQL version: '{}'. Supported: 5.6, 5.7, 8.0, mariadb",
            s
        )))
    }
}

/// MySQL/MariaDB platform.
#[derive(Debug, Clone)]
pub struct MysqlPlatform {
    version: MysqlVersion,
    capabilities: Capabilities,
    keywords: KeywordList,
    type_mappings: TypeMappingTable,
}

impl Default for MysqlPlatform {
    fn default() -> Self {
        Self::new(MysqlVersion::default())
    }
}

impl MysqlPlatform {
    /// Create a platform for the given server version.
    pub fn new(version: MysqlVersion) -> Self {
        let capabilities = Capabilities {
            identity_columns: true,
            prefers_identity_columns: true,
            column_length_indexes: true,
            inline_column_comments: true,
            column_collation: true,
            rename_index: version.native_rename_index(),
            max_identifier_length: 64,
            default_isolation: TransactionIsolationLevel::RepeatableRead,
            quote_char: '`',
            varchar_max_length: LENGTH_LIMIT_REGULAR,
            char_max_length: LENGTH_LIMIT_REGULAR,
            binary_max_length: LENGTH_LIMIT_REGULAR,
            ..Capabilities::base()
        };

        Self {
            version,
            capabilities,
            keywords: KeywordList::mysql(version == MysqlVersion::Mysql80),
            type_mappings: TypeMappingTable::mysql(),
        }
    }

    pub fn version(&self) -> MysqlVersion {
        self.version
    }

    fn unsigned_sql(column: &Column) -> &'static str {
        if column.unsigned {
            " UNSIGNED"
        } else {
            ""
        }
    }

    fn common_integer_sql(column: &Column) -> String {
        let autoincrement = if column.autoincrement {
            " AUTO_INCREMENT"
        } else {
            ""
        };
        format!("{}{}", Self::unsigned_sql(column), autoincrement)
    }

    /// Storage engines that enforce foreign keys.
    fn engine_supports_foreign_keys(engine: Option<&str>) -> bool {
        engine.map_or(true, |e| e.trim().eq_ignore_ascii_case("InnoDB"))
    }

    /// `DEFAULT CHARACTER SET .. COLLATE .. ENGINE = ..` or the raw override.
    fn table_options_sql(&self, options: &TableOptions) -> String {
        if let Some(raw) = &options.table_options {
            return raw.clone();
        }

        let charset = options.charset.as_deref().unwrap_or("utf8");
        let collation = options
            .collation
            .clone()
            .unwrap_or_else(|| format!("{}_unicode_ci", charset));
        let engine = options.engine.as_deref().unwrap_or("InnoDB");

        let mut parts = vec![
            format!("DEFAULT CHARACTER SET {}", charset),
            self.column_collation_sql(&collation),
            format!("ENGINE = {}", engine),
        ];
        if let Some(auto_increment) = options.auto_increment {
            parts.push(format!("AUTO_INCREMENT = {}", auto_increment));
        }
        if let Some(comment) = &options.comment {
            parts.push(format!("COMMENT = {} ", self.quote_string_literal(comment)));
        }
        if let Some(row_format) = &options.row_format {
            parts.push(format!("ROW_FORMAT = {}", row_format));
        }
        parts.join(" ")
    }

    fn database_name_sql(&self, database: Option<&str>) -> String {
        match database {
            Some(db) => self.quote_string_literal(db),
            None => "DATABASE()".to_string(),
        }
    }

    fn primary_key_clause(&self, index: &Index) -> String {
        let mut columns: Vec<String> = Vec::new();
        for column in &index.columns {
            let quoted = self.quoted_name(column);
            if !columns.contains(&quoted) {
                columns.push(quoted);
            }
        }
        format!("ADD PRIMARY KEY ({})", columns.join(", "))
    }

    /// `MODIFY` statements clearing AUTO_INCREMENT on the columns of a primary
    /// key that is about to be dropped.
    fn strip_primary_key_autoincrement(&self, table: &Table, index: &Index) -> Result<Vec<String>> {
        if !index.is_primary {
            return Ok(Vec::new());
        }
        let table_name = self.quoted_name(&table.name);
        let mut sql = Vec::new();
        for name in &index.columns {
            let Some(column) = table.column(name) else {
                continue;
            };
            if !column.autoincrement {
                continue;
            }
            let mut plain = column.clone();
            plain.autoincrement = false;
            sql.push(format!(
                "ALTER TABLE {} MODIFY {}",
                table_name,
                self.column_declaration_sql(&self.quoted_name(&plain.name), &plain)?
            ));
        }
        Ok(sql)
    }

    /// `MODIFY` statements for autoincrement columns leaving a changed primary key.
    fn autoincrement_leaving_primary_key_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let table = &diff.old_table;
        let Some(primary_key) = table.primary_key() else {
            return Ok(Vec::new());
        };
        let key_columns: Vec<&Column> = primary_key
            .columns
            .iter()
            .filter_map(|name| table.column(name))
            .collect();

        let table_name = self.quoted_name(&table.name);
        let mut sql = Vec::new();
        for changed in diff.changed_indexes.iter().filter(|i| i.is_primary) {
            for column in &key_columns {
                if !column.autoincrement || changed.columns.contains(&column.name) {
                    continue;
                }
                let mut plain = (*column).clone();
                plain.autoincrement = false;
                sql.push(format!(
                    "ALTER TABLE {} MODIFY {}",
                    table_name,
                    self.column_declaration_sql(&self.quoted_name(&plain.name), &plain)?
                ));
            }
        }
        Ok(sql)
    }

    /// Surviving foreign keys whose columns are covered by a renamed index.
    fn foreign_keys_requiring_renamed_indexes<'a>(&self, diff: &'a TableDiff) -> Vec<&'a ForeignKey> {
        if diff.renamed_indexes.is_empty() {
            return Vec::new();
        }
        diff.old_table
            .foreign_keys
            .iter()
            .filter(|fk| {
                !diff
                    .dropped_foreign_keys
                    .iter()
                    .any(|d| d.name.eq_ignore_ascii_case(&fk.name))
            })
            .filter(|fk| {
                !diff
                    .changed_foreign_keys
                    .iter()
                    .any(|c| c.name.eq_ignore_ascii_case(&fk.name))
            })
            .filter(|fk| {
                diff.renamed_indexes
                    .iter()
                    .any(|(_, index)| fk.intersects_columns(&index.columns))
            })
            .collect()
    }

    /// Pre-alter work that also rewrites the diff for the statements after it.
    ///
    /// Dropped and added indexes over the same columns are merged into one
    /// statement and removed from the diff; foreign key changes are discarded
    /// when the table's engine does not enforce them.
    fn prepare_alter(&self, diff: &mut TableDiff) -> Result<Vec<String>> {
        let table_name = self.quoted_name(diff.name());
        let mut sql = Vec::new();

        for changed in &diff.changed_indexes {
            sql.extend(self.strip_primary_key_autoincrement(&diff.old_table, changed)?);
        }

        let dropped_indexes = diff.dropped_indexes.clone();
        for dropped in &dropped_indexes {
            sql.extend(self.strip_primary_key_autoincrement(&diff.old_table, dropped)?);

            let Some(pos) = diff
                .added_indexes
                .iter()
                .position(|added| added.columns == dropped.columns)
            else {
                continue;
            };
            let added = diff.added_indexes.remove(pos);
            let clause = if added.is_primary {
                "PRIMARY KEY".to_string()
            } else if added.is_unique {
                format!("UNIQUE INDEX {}", self.quoted_name(&added.name))
            } else {
                format!("INDEX {}", self.quoted_name(&added.name))
            };
            sql.push(format!(
                "ALTER TABLE {} DROP INDEX {}, ADD {} ({})",
                table_name,
                self.quoted_name(&dropped.name),
                clause,
                self.index_columns_sql(&added)
            ));
            if let Some(pos) = diff.dropped_indexes.iter().position(|d| d == dropped) {
                diff.dropped_indexes.remove(pos);
            }
        }

        if !Self::engine_supports_foreign_keys(diff.old_table.options.engine.as_deref()) {
            diff.added_foreign_keys.clear();
            diff.changed_foreign_keys.clear();
            diff.dropped_foreign_keys.clear();
        }

        sql.extend(self.autoincrement_leaving_primary_key_sql(diff)?);
        sql.extend(ddl::pre_alter_sql(self, diff)?);

        for fk in self.foreign_keys_requiring_renamed_indexes(diff) {
            sql.push(self.drop_foreign_key_sql(&fk.name, diff.name())?);
        }

        Ok(sql)
    }
}

impl Platform for MysqlPlatform {
    fn name(&self) -> &str {
        "mysql"
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

    fn quote_string_literal(&self, value: &str) -> String {
        // Backslash is an escape character in MySQL string literals
        identifier::quote_string_literal(&value.replace('\\', "\\\\"))
    }

    // ===== Type Declarations =====

    fn boolean_type_sql(&self, _column: &Column) -> String {
        "TINYINT(1)".to_string()
    }

    fn integer_type_sql(&self, column: &Column) -> String {
        format!("INT{}", Self::common_integer_sql(column))
    }

    fn bigint_type_sql(&self, column: &Column) -> String {
        format!("BIGINT{}", Self::common_integer_sql(column))
    }

    fn smallint_type_sql(&self, column: &Column) -> String {
        format!("SMALLINT{}", Self::common_integer_sql(column))
    }

    fn float_type_sql(&self, column: &Column) -> String {
        format!("DOUBLE PRECISION{}", Self::unsigned_sql(column))
    }

    fn decimal_type_sql(&self, column: &Column) -> String {
        let precision = column.precision.filter(|p| *p > 0).unwrap_or(10);
        let scale = column.scale.unwrap_or(0);
        format!(
            "NUMERIC({}, {}){}",
            precision,
            scale,
            Self::unsigned_sql(column)
        )
    }

    fn datetime_type_sql(&self, column: &Column) -> String {
        if column.version {
            "TIMESTAMP".to_string()
        } else {
            "DATETIME".to_string()
        }
    }

    fn date_type_sql(&self, _column: &Column) -> String {
        "DATE".to_string()
    }

    fn time_type_sql(&self, _column: &Column) -> String {
        "TIME".to_string()
    }

    fn varchar_type_snippet(&self, length: u32, fixed: bool) -> String {
        let length = if length > 0 { length } else { 255 };
        if fixed {
            format!("CHAR({})", length)
        } else {
            format!("VARCHAR({})", length)
        }
    }

    fn binary_type_snippet(&self, length: u32, fixed: bool) -> String {
        let length = if length > 0 { length } else { 255 };
        if fixed {
            format!("BINARY({})", length)
        } else {
            format!("VARBINARY({})", length)
        }
    }

    /// Smallest TEXT tier that holds the requested length.
    fn clob_type_sql(&self, column: &Column) -> String {
        match column.length.filter(|l| *l > 0) {
            Some(l) if l <= LENGTH_LIMIT_TINY => "TINYTEXT",
            Some(l) if l <= LENGTH_LIMIT_REGULAR => "TEXT",
            Some(l) if l <= LENGTH_LIMIT_MEDIUM => "MEDIUMTEXT",
            _ => "LONGTEXT",
        }
        .to_string()
    }

    /// Smallest BLOB tier that holds the requested length.
    fn blob_type_sql(&self, column: &Column) -> String {
        match column.length.filter(|l| *l > 0) {
            Some(l) if l <= LENGTH_LIMIT_TINY => "TINYBLOB",
            Some(l) if l <= LENGTH_LIMIT_REGULAR => "BLOB",
            Some(l) if l <= LENGTH_LIMIT_MEDIUM => "MEDIUMBLOB",
            _ => "LONGBLOB",
        }
        .to_string()
    }

    fn json_type_sql(&self, column: &Column) -> String {
        if self.version.native_json() {
            "JSON".to_string()
        } else {
            self.clob_type_sql(column)
        }
    }

    /// TEXT and BLOB columns cannot carry a default.
    fn default_value_sql(&self, column: &Column) -> Result<String> {
        if column.column_type.is_lob() && column.default.is_some() {
            let mut without_default = column.clone();
            without_default.default = None;
            return ddl::default_value_sql(self, &without_default);
        }
        ddl::default_value_sql(self, column)
    }

    fn column_charset_sql(&self, charset: &str) -> String {
        format!("CHARACTER SET {}", charset)
    }

    // ===== CREATE / DROP =====

    fn build_create_table(&self, table: &Table, parts: &TableParts) -> Result<Vec<String>> {
        let name = self.quoted_name(&table.name);
        let mut fields = self.column_declaration_list_sql(&table.columns)?;

        for constraint in &parts.unique_constraints {
            fields.push_str(", ");
            fields.push_str(&self.unique_constraint_declaration_sql(constraint)?);
        }
        for index in &parts.indexes {
            fields.push_str(", ");
            fields.push_str(&self.index_declaration_sql(index)?);
        }
        if !parts.primary.is_empty() {
            fields.push_str(&format!(", PRIMARY KEY({})", parts.primary.join(", ")));
        }
        let check = self.check_declaration_sql(&table.check_constraints)?;
        if !check.is_empty() {
            fields.push_str(", ");
            fields.push_str(&check);
        }

        let temporary = if table.options.temporary {
            "TEMPORARY "
        } else {
            ""
        };
        let partition = table
            .options
            .partition_options
            .as_ref()
            .map(|p| format!(" {}", p))
            .unwrap_or_default();

        let mut sql = vec![format!(
            "CREATE {}TABLE {} ({}) {}{}",
            temporary,
            name,
            fields,
            self.table_options_sql(&table.options),
            partition
        )];

        if Self::engine_supports_foreign_keys(table.options.engine.as_deref()) {
            for fk in &parts.foreign_keys {
                sql.push(self.create_foreign_key_sql(fk, &table.name)?);
            }
        } else if !parts.foreign_keys.is_empty() {
            warn!(
                table = %table.name,
                engine = ?table.options.engine,
                "Skipping foreign keys: storage engine does not support them"
            );
        }

        Ok(sql)
    }

    fn create_tables_sql(&self, tables: &[Table]) -> Result<Vec<String>> {
        let mut sql = Vec::new();
        for table in tables {
            sql.extend(self.create_table_sql(table, CreateFlags::INDEXES)?);
        }
        for table in tables {
            if Self::engine_supports_foreign_keys(table.options.engine.as_deref()) {
                for fk in &table.foreign_keys {
                    sql.push(self.create_foreign_key_sql(fk, &table.name)?);
                }
            } else if !table.foreign_keys.is_empty() {
                warn!(
                    table = %table.name,
                    engine = ?table.options.engine,
                    "Skipping foreign keys: storage engine does not support them"
                );
            }
        }
        Ok(sql)
    }

    fn drop_temporary_table_sql(&self, table: &str) -> String {
        format!("DROP TEMPORARY TABLE {}", self.quoted_name(table))
    }

    fn create_index_flags(&self, index: &Index) -> String {
        if index.is_unique {
            "UNIQUE ".to_string()
        } else if index.has_flag("fulltext") {
            "FULLTEXT ".to_string()
        } else if index.has_flag("spatial") {
            "SPATIAL ".to_string()
        } else {
            String::new()
        }
    }

    fn drop_index_sql(&self, index: &Index, table: &str) -> Result<String> {
        let table = self.quoted_name(table);
        if index.is_primary {
            return Ok(format!("ALTER TABLE {} DROP PRIMARY KEY", table));
        }
        Ok(format!(
            "DROP INDEX {} ON {}",
            self.quoted_name(&index.name),
            table
        ))
    }

    fn drop_unique_constraint_sql(&self, name: &str, table: &str) -> Result<String> {
        self.drop_index_sql(&Index::unique(name, &[]), table)
    }

    fn advanced_foreign_key_options_sql(&self, fk: &ForeignKey) -> Result<String> {
        let mut sql = String::new();
        if let Some(match_type) = &fk.match_type {
            sql.push_str(&format!(" MATCH {}", match_type));
        }
        sql.push_str(&ddl::advanced_foreign_key_options_sql(self, fk)?);
        Ok(sql)
    }

    // ===== ALTER TABLE =====

    fn build_alter_table(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let mut diff = diff.clone();
        let table_name = self.quoted_name(diff.name());
        let mut parts = Vec::new();

        if let Some(new_name) = &diff.new_name {
            parts.push(format!("RENAME TO {}", self.quoted_name(new_name)));
        }
        for column in &diff.added_columns {
            parts.push(format!(
                "ADD {}",
                self.column_declaration_sql(&self.quoted_name(&column.name), column)?
            ));
        }
        for column in &diff.dropped_columns {
            parts.push(format!("DROP {}", self.quoted_name(&column.name)));
        }
        for change in &diff.changed_columns {
            let column = &change.new_column;
            parts.push(format!(
                "CHANGE {} {}",
                self.quoted_name(&change.old_column.name),
                self.column_declaration_sql(&self.quoted_name(&column.name), column)?
            ));
        }
        for (old_name, column) in &diff.renamed_columns {
            parts.push(format!(
                "CHANGE {} {}",
                self.quoted_name(old_name),
                self.column_declaration_sql(&self.quoted_name(&column.name), column)?
            ));
        }

        let is_primary_name = |index: &Index| index.name.eq_ignore_ascii_case("primary");
        if let Some(pos) = diff.added_indexes.iter().position(is_primary_name) {
            let primary = diff.added_indexes.remove(pos);
            parts.push(self.primary_key_clause(&primary));
        } else if let Some(pos) = diff.changed_indexes.iter().position(is_primary_name) {
            // The new key includes a freshly added AUTO_INCREMENT column
            let adds_autoincrement = diff.changed_indexes[pos].columns.iter().any(|name| {
                diff.added_columns
                    .iter()
                    .any(|c| c.autoincrement && c.name.eq_ignore_ascii_case(name))
            });
            if adds_autoincrement {
                let primary = diff.changed_indexes.remove(pos);
                parts.push("DROP PRIMARY KEY".to_string());
                parts.push(self.primary_key_clause(&primary));
            }
        }

        let mut sql = self.prepare_alter(&mut diff)?;
        if !parts.is_empty() {
            sql.push(format!("ALTER TABLE {} {}", table_name, parts.join(", ")));
        }
        sql.extend(self.post_alter_table_index_foreign_key_sql(&diff)?);
        Ok(sql)
    }

    fn pre_alter_table_index_foreign_key_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let mut working = diff.clone();
        self.prepare_alter(&mut working)
    }

    fn post_alter_table_index_foreign_key_sql(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let mut sql = ddl::post_alter_sql(self, diff)?;
        let table = diff.new_name.as_deref().unwrap_or_else(|| diff.name());
        for fk in self.foreign_keys_requiring_renamed_indexes(diff) {
            sql.push(self.create_foreign_key_sql(fk, table)?);
        }
        Ok(sql)
    }

    fn rename_index_sql(&self, old_name: &str, index: &Index, table: &str) -> Result<Vec<String>> {
        if !self.capabilities.rename_index {
            return ddl::rename_index_sql(self, old_name, index, table);
        }
        Ok(vec![format!(
            "ALTER TABLE {} RENAME INDEX {} TO {}",
            self.quoted_name(table),
            self.quoted_name(old_name),
            self.quoted_name(&index.name)
        )])
    }

    // ===== Queries & Transactions =====

    fn limit_query(&self, query: &str, limit: Option<u64>, offset: u64) -> String {
        let mut sql = query.to_string();
        match limit {
            Some(limit) => {
                sql.push_str(&format!(" LIMIT {}", limit));
                if offset > 0 {
                    sql.push_str(&format!(" OFFSET {}", offset));
                }
            }
            None if offset > 0 => {
                sql.push_str(&format!(" LIMIT {} OFFSET {}", UNBOUNDED_LIMIT, offset));
            }
            None => {}
        }
        sql
    }

    fn set_transaction_isolation_sql(&self, level: TransactionIsolationLevel) -> Result<String> {
        Ok(format!(
            "SET SESSION TRANSACTION ISOLATION LEVEL {}",
            level.as_sql()
        ))
    }

    // ===== Introspection SQL =====

    fn list_databases_sql(&self) -> Result<String> {
        Ok("SHOW DATABASES".to_string())
    }

    fn list_tables_sql(&self) -> Result<String> {
        Ok("SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'".to_string())
    }

    fn list_table_columns_sql(&self, table: &str, database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT COLUMN_NAME AS Field, COLUMN_TYPE AS Type, IS_NULLABLE AS `Null`, \
             COLUMN_KEY AS `Key`, COLUMN_DEFAULT AS `Default`, EXTRA AS Extra, COLUMN_COMMENT AS Comment, \
             CHARACTER_SET_NAME AS CharacterSet, COLLATION_NAME AS Collation \
             FROM information_schema.COLUMNS WHERE TABLE_SCHEMA = {} AND TABLE_NAME = {} \
             ORDER BY ORDINAL_POSITION ASC",
            self.database_name_sql(database),
            self.quote_string_literal(table)
        ))
    }

    fn list_table_indexes_sql(&self, table: &str, database: Option<&str>) -> Result<String> {
        match database {
            Some(database) => Ok(format!(
                "SELECT NON_UNIQUE AS Non_Unique, INDEX_NAME AS Key_name, COLUMN_NAME AS Column_Name, \
                 SUB_PART AS Sub_Part, INDEX_TYPE AS Index_Type \
                 FROM information_schema.STATISTICS WHERE TABLE_NAME = {} AND TABLE_SCHEMA = {} \
                 ORDER BY SEQ_IN_INDEX ASC",
                self.quote_string_literal(table),
                self.quote_string_literal(database)
            )),
            None => Ok(format!("SHOW INDEX FROM {}", self.quoted_name(table))),
        }
    }

    fn list_table_foreign_keys_sql(&self, table: &str, database: Option<&str>) -> Result<String> {
        let database = self.database_name_sql(database);
        Ok(format!(
            "SELECT k.CONSTRAINT_NAME, k.COLUMN_NAME, k.REFERENCED_TABLE_NAME, \
             k.REFERENCED_COLUMN_NAME /*!50116 , c.UPDATE_RULE, c.DELETE_RULE */ \
             FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE k /*!50116 \
             INNER JOIN INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS c ON \
             c.CONSTRAINT_NAME = k.CONSTRAINT_NAME AND \
             c.TABLE_NAME = k.TABLE_NAME */ \
             WHERE k.TABLE_NAME = {} AND k.TABLE_SCHEMA = {} /*!50116 \
             AND c.CONSTRAINT_SCHEMA = {} */\
             ORDER BY k.ORDINAL_POSITION",
            self.quote_string_literal(table),
            database,
            database
        ))
    }

    fn list_views_sql(&self, database: &str) -> Result<String> {
        Ok(format!(
            "SELECT * FROM information_schema.VIEWS WHERE TABLE_SCHEMA = {}",
            self.quote_string_literal(database)
        ))
    }

    fn list_table_constraints_sql(&self, table: &str) -> Result<String> {
        Ok(format!("SHOW INDEX FROM {}", self.quoted_name(table)))
    }

    fn list_table_comments_sql(&self, table: &str, database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT t.ENGINE, t.AUTO_INCREMENT, t.TABLE_COMMENT, t.CREATE_OPTIONS, \
             t.TABLE_COLLATION, ccsa.CHARACTER_SET_NAME \
             FROM information_schema.TABLES t \
             INNER JOIN information_schema.`COLLATION_CHARACTER_SET_APPLICABILITY` ccsa \
             ON ccsa.COLLATION_NAME = t.TABLE_COLLATION \
             WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_SCHEMA = {} AND TABLE_NAME = {}",
            self.database_name_sql(database),
            self.quote_string_literal(table)
        ))
    }
}

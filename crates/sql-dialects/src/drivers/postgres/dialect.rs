//! PostgreSQL SQL dialect (Strategy pattern).
//!
//! Provides PostgreSQL-specific type declarations (SERIAL family, UUID,
//! BYTEA, JSON/JSONB), boolean literal handling, one-statement-per-change
//! ALTER TABLE and pg_catalog introspection queries.

use crate::core::capabilities::{Capabilities, TransactionIsolationLevel};
use crate::core::ddl::{self, TableParts};
use crate::core::diff::{ColumnDiff, TableDiff};
use crate::core::identifier::Identifier;
use crate::core::keywords::KeywordList;
use crate::core::schema::{Column, ColumnType, DefaultValue, ForeignKey, Index, Sequence, Table};
use crate::core::traits::Platform;
use crate::dialect::TypeMappingTable;
use crate::error::{PlatformError, Result};

const TRUE_LITERALS: &[&str] = &["t", "true", "y", "yes", "on", "1"];
const FALSE_LITERALS: &[&str] = &["f", "false", "n", "no", "off", "0"];

/// PostgreSQL platform.
#[derive(Debug, Clone)]
pub struct PostgresPlatform {
    capabilities: Capabilities,
    keywords: KeywordList,
    type_mappings: TypeMappingTable,
}

impl Default for PostgresPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresPlatform {
    pub fn new() -> Self {
        let capabilities = Capabilities {
            sequences: true,
            identity_columns: true,
            schemas: true,
            partial_indexes: true,
            comment_on_statement: true,
            column_collation: true,
            rename_index: true,
            max_identifier_length: 63,
            default_isolation: TransactionIsolationLevel::ReadCommitted,
            quote_char: '"',
            varchar_max_length: 65535,
            char_max_length: 65535,
            binary_max_length: 0,
            binary_default_length: 0,
            ..Capabilities::base()
        };

        Self {
            capabilities,
            keywords: KeywordList::postgres(),
            type_mappings: TypeMappingTable::postgres(),
        }
    }

    /// Interpret a boolean-ish value: bool, number, or one of the accepted
    /// literals (`t`, `yes`, `on`, `0`, ...).
    pub fn parse_boolean(value: &DefaultValue) -> Result<bool> {
        match value {
            DefaultValue::Bool(b) => Ok(*b),
            DefaultValue::Int(i) => Ok(*i != 0),
            DefaultValue::Float(f) => Ok(*f != 0.0),
            DefaultValue::Text(s) => {
                let literal = s.trim().to_lowercase();
                if FALSE_LITERALS.contains(&literal.as_str()) {
                    return Ok(false);
                }
                if TRUE_LITERALS.contains(&literal.as_str()) {
                    return Ok(true);
                }
                if literal.parse::<f64>().is_ok() {
                    return Ok(literal != "0");
                }
                Err(PlatformError::invalid_argument(format!(
                    "Unrecognized boolean literal '{}'",
                    s
                )))
            }
        }
    }

    /// `n.nspname NOT IN (...) AND c.relname = 't' AND n.nspname = <schema>`.
    fn table_where_clause(&self, table: &str, class_alias: &str, namespace_alias: &str) -> String {
        let (schema, name) = match table.split_once('.') {
            Some((schema, name)) => (self.quote_string_literal(schema), name),
            None => ("ANY(current_schemas(false))".to_string(), table),
        };
        let name = Identifier::parse(name);
        format!(
            "{ns}.nspname NOT IN ('pg_catalog', 'information_schema', 'pg_toast') AND \
             {c}.relname = {table} AND {ns}.nspname = {schema}",
            ns = namespace_alias,
            c = class_alias,
            table = self.quote_string_literal(name.name()),
            schema = schema
        )
    }

    /// Binary/blob changes limited to type, length or fixedness need no DDL.
    fn is_unchanged_binary_column(diff: &ColumnDiff) -> bool {
        let binary = |ty: ColumnType| matches!(ty, ColumnType::Binary | ColumnType::Blob);
        if !binary(diff.new_column.column_type) || !binary(diff.old_column.column_type) {
            return false;
        }
        let storage_changes = [
            diff.has_type_changed(),
            diff.has_length_changed(),
            diff.has_fixed_changed(),
        ]
        .iter()
        .filter(|changed| **changed)
        .count();
        diff.changed_property_count() == storage_changes
    }

    fn sequence_cache_sql(sequence: &Sequence) -> String {
        match sequence.cache {
            Some(cache) if cache > 1 => format!(" CACHE {}", cache),
            _ => String::new(),
        }
    }

    fn column_changes_sql(
        &self,
        table: &str,
        table_name: &str,
        change: &ColumnDiff,
        sql: &mut Vec<String>,
        comments: &mut Vec<String>,
    ) -> Result<()> {
        if Self::is_unchanged_binary_column(change) {
            return Ok(());
        }

        let new_column = &change.new_column;
        let old_name = self.quoted_name(&change.old_column.name);

        if change.has_type_changed()
            || change.has_precision_changed()
            || change.has_scale_changed()
            || change.has_fixed_changed()
        {
            // SERIAL is not a real type and cannot be the target of ALTER ... TYPE
            let mut plain = new_column.clone();
            plain.autoincrement = false;
            sql.push(format!(
                "ALTER TABLE {} ALTER {} TYPE {}",
                table_name,
                old_name,
                self.column_type_sql(&plain)
            ));
        }

        if change.has_default_changed() {
            let clause = match new_column.default {
                None => " DROP DEFAULT".to_string(),
                Some(_) => format!(" SET{}", self.default_value_sql(new_column)?),
            };
            sql.push(format!("ALTER TABLE {} ALTER {}{}", table_name, old_name, clause));
        }

        if change.has_notnull_changed() {
            let action = if new_column.is_nullable { "DROP" } else { "SET" };
            sql.push(format!(
                "ALTER TABLE {} ALTER {} {} NOT NULL",
                table_name, old_name, action
            ));
        }

        if change.has_autoincrement_changed() {
            if new_column.autoincrement {
                let sequence = self.identity_sequence_name(table, &old_name);
                sql.push(format!("CREATE SEQUENCE {}", sequence));
                sql.push(format!(
                    "SELECT setval('{}', (SELECT MAX({}) FROM {}))",
                    sequence, old_name, table_name
                ));
                sql.push(format!(
                    "ALTER TABLE {} ALTER {} SET DEFAULT nextval('{}')",
                    table_name, old_name, sequence
                ));
            } else {
                // The sequence is kept: other tables may still use it
                sql.push(format!("ALTER TABLE {} ALTER {} DROP DEFAULT", table_name, old_name));
            }
        }

        if change.has_comment_changed() {
            comments.push(self.comment_on_column_sql(
                table,
                &new_column.name,
                new_column.effective_comment(),
            ));
        }

        let old_type = self.column_type_sql(&change.old_column);
        let new_type = self.column_type_sql(new_column);
        if change.has_length_changed() && old_type != new_type {
            sql.push(format!(
                "ALTER TABLE {} ALTER {} TYPE {}",
                table_name, old_name, new_type
            ));
        }

        Ok(())
    }
}

impl Platform for PostgresPlatform {
    fn name(&self) -> &str {
        "postgresql"
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
        if column.autoincrement { "SERIAL" } else { "INT" }.to_string()
    }

    fn bigint_type_sql(&self, column: &Column) -> String {
        if column.autoincrement { "BIGSERIAL" } else { "BIGINT" }.to_string()
    }

    fn smallint_type_sql(&self, column: &Column) -> String {
        if column.autoincrement { "SMALLSERIAL" } else { "SMALLINT" }.to_string()
    }

    fn guid_type_sql(&self, _column: &Column) -> String {
        "UUID".to_string()
    }

    fn json_type_sql(&self, column: &Column) -> String {
        if column.jsonb { "JSONB" } else { "JSON" }.to_string()
    }

    fn datetime_type_sql(&self, _column: &Column) -> String {
        "TIMESTAMP(0) WITHOUT TIME ZONE".to_string()
    }

    fn datetimetz_type_sql(&self, _column: &Column) -> String {
        "TIMESTAMP(0) WITH TIME ZONE".to_string()
    }

    fn date_type_sql(&self, _column: &Column) -> String {
        "DATE".to_string()
    }

    fn time_type_sql(&self, _column: &Column) -> String {
        "TIME(0) WITHOUT TIME ZONE".to_string()
    }

    fn varchar_type_snippet(&self, length: u32, fixed: bool) -> String {
        let length = if length > 0 { length } else { 255 };
        if fixed {
            format!("CHAR({})", length)
        } else {
            format!("VARCHAR({})", length)
        }
    }

    fn binary_type_snippet(&self, _length: u32, _fixed: bool) -> String {
        "BYTEA".to_string()
    }

    fn clob_type_sql(&self, _column: &Column) -> String {
        "TEXT".to_string()
    }

    fn blob_type_sql(&self, _column: &Column) -> String {
        "BYTEA".to_string()
    }

    fn convert_boolean(&self, value: &DefaultValue) -> Result<String> {
        Ok(if Self::parse_boolean(value)? { "true" } else { "false" }.to_string())
    }

    /// SERIAL columns take their default from the sequence.
    fn default_value_sql(&self, column: &Column) -> Result<String> {
        if column.autoincrement {
            return Ok(String::new());
        }
        ddl::default_value_sql(self, column)
    }

    // ===== CREATE / DROP =====

    fn build_create_table(&self, table: &Table, parts: &TableParts) -> Result<Vec<String>> {
        let name = self.quoted_name(&table.name);
        let mut fields = self.column_declaration_list_sql(&table.columns)?;

        if !parts.primary.is_empty() {
            fields.push_str(&format!(", PRIMARY KEY({})", parts.primary.join(", ")));
        }
        let check = self.check_declaration_sql(&table.check_constraints)?;
        if !check.is_empty() {
            fields.push_str(", ");
            fields.push_str(&check);
        }

        let kind = if table.options.temporary {
            " TEMPORARY"
        } else if table.options.unlogged {
            " UNLOGGED"
        } else {
            ""
        };

        let mut sql = vec![format!("CREATE{} TABLE {} ({})", kind, name, fields)];
        for index in &parts.indexes {
            sql.push(self.create_index_sql(index, &table.name)?);
        }
        for constraint in &parts.unique_constraints {
            sql.push(self.create_unique_constraint_sql(constraint, &table.name)?);
        }
        for fk in &parts.foreign_keys {
            sql.push(self.create_foreign_key_sql(fk, &table.name)?);
        }
        Ok(sql)
    }

    fn truncate_table_sql(&self, table: &str, cascade: bool) -> String {
        let mut sql = format!("TRUNCATE {}", self.quoted_name(table));
        if cascade {
            sql.push_str(" CASCADE");
        }
        sql
    }

    /// Primary keys are dropped as their `{table}_pkey` constraint; other
    /// indexes live in the table's schema.
    fn drop_index_sql(&self, index: &Index, table: &str) -> Result<String> {
        let table_id = Identifier::parse(table);
        if index.is_primary {
            let constraint = if index.name.eq_ignore_ascii_case("primary") {
                format!("{}_pkey", table_id.short_name())
            } else {
                index.name.clone()
            };
            return self.drop_constraint_sql(&constraint, table);
        }

        let index_name = self.quoted_name(&index.name);
        Ok(match table_id.namespace() {
            Some(schema) => format!("DROP INDEX {}.{}", schema, index_name),
            None => format!("DROP INDEX {}", index_name),
        })
    }

    fn drop_foreign_key_sql(&self, name: &str, table: &str) -> Result<String> {
        self.drop_constraint_sql(name, table)
    }

    /// `[ MATCH x] ON UPDATE .. ON DELETE .. [NOT ]DEFERRABLE INITIALLY ..`.
    fn advanced_foreign_key_options_sql(&self, fk: &ForeignKey) -> Result<String> {
        let mut sql = String::new();
        if let Some(match_type) = &fk.match_type {
            sql.push_str(&format!(" MATCH {}", match_type));
        }
        sql.push_str(&ddl::advanced_foreign_key_options_sql(self, fk)?);
        sql.push_str(if fk.deferrable {
            " DEFERRABLE"
        } else {
            " NOT DEFERRABLE"
        });
        sql.push_str(if fk.deferred {
            " INITIALLY DEFERRED"
        } else {
            " INITIALLY IMMEDIATE"
        });
        Ok(sql)
    }

    fn comment_on_column_sql(&self, table: &str, column: &str, comment: Option<&str>) -> String {
        let comment = match comment {
            Some(c) => self.quote_string_literal(c),
            None => "NULL".to_string(),
        };
        format!(
            "COMMENT ON COLUMN {}.{} IS {}",
            self.quoted_name(table),
            self.quoted_name(column),
            comment
        )
    }

    // ===== ALTER TABLE =====

    fn build_alter_table(&self, diff: &TableDiff) -> Result<Vec<String>> {
        let table = diff.name();
        let table_name = self.quoted_name(table);
        let mut sql = Vec::new();
        let mut comments = Vec::new();

        for column in &diff.added_columns {
            sql.push(format!(
                "ALTER TABLE {} ADD {}",
                table_name,
                self.column_declaration_sql(&self.quoted_name(&column.name), column)?
            ));
            if let Some(comment) = column.effective_comment() {
                comments.push(self.comment_on_column_sql(table, &column.name, Some(comment)));
            }
        }

        for column in &diff.dropped_columns {
            sql.push(format!(
                "ALTER TABLE {} DROP {}",
                table_name,
                self.quoted_name(&column.name)
            ));
        }

        for change in &diff.changed_columns {
            self.column_changes_sql(table, &table_name, change, &mut sql, &mut comments)?;
        }

        for (old_name, column) in &diff.renamed_columns {
            sql.push(format!(
                "ALTER TABLE {} RENAME COLUMN {} TO {}",
                table_name,
                self.quoted_name(old_name),
                self.quoted_name(&column.name)
            ));
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
            Some(schema) => format!("{}.{}", schema, self.quoted_name(old_name)),
            None => self.quoted_name(old_name),
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
            "CREATE SEQUENCE {} INCREMENT BY {} MINVALUE {} START {}{}",
            self.quoted_name(&sequence.name),
            sequence.allocation_size,
            sequence.initial_value,
            sequence.initial_value,
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

    fn drop_sequence_sql(&self, sequence: &str) -> Result<String> {
        Ok(format!("DROP SEQUENCE {} CASCADE", self.quoted_name(sequence)))
    }

    fn sequence_next_val_sql(&self, sequence: &str) -> Result<String> {
        Ok(format!("SELECT NEXTVAL('{}')", sequence))
    }

    // ===== Queries & Transactions =====

    fn set_transaction_isolation_sql(&self, level: TransactionIsolationLevel) -> Result<String> {
        Ok(format!(
            "SET SESSION CHARACTERISTICS AS TRANSACTION ISOLATION LEVEL {}",
            level.as_sql()
        ))
    }

    fn empty_identity_insert_sql(&self, table: &str, identifier_column: &str) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES (DEFAULT)",
            self.quoted_name(table),
            self.quoted_name(identifier_column)
        )
    }

    // ===== Introspection SQL =====

    fn list_databases_sql(&self) -> Result<String> {
        Ok("SELECT datname FROM pg_database".to_string())
    }

    fn list_tables_sql(&self) -> Result<String> {
        Ok("SELECT quote_ident(table_name) AS table_name, table_schema AS schema_name \
            FROM information_schema.tables \
            WHERE table_schema NOT LIKE 'pg\\_%' \
            AND table_schema != 'information_schema' \
            AND table_name != 'geometry_columns' \
            AND table_name != 'spatial_ref_sys' \
            AND table_type != 'VIEW'"
            .to_string())
    }

    fn list_sequences_sql(&self, database: &str) -> Result<String> {
        Ok(format!(
            "SELECT sequence_name AS relname, sequence_schema AS schemaname, \
             minimum_value AS min_value, increment AS increment_by \
             FROM information_schema.sequences \
             WHERE sequence_catalog = {} \
             AND sequence_schema NOT LIKE 'pg\\_%' \
             AND sequence_schema != 'information_schema'",
            self.quote_string_literal(database)
        ))
    }

    fn list_views_sql(&self, _database: &str) -> Result<String> {
        Ok("SELECT quote_ident(table_name) AS viewname, table_schema AS schemaname, \
            view_definition AS definition \
            FROM information_schema.views \
            WHERE view_definition IS NOT NULL"
            .to_string())
    }

    fn list_table_foreign_keys_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT quote_ident(r.conname) as conname, pg_catalog.pg_get_constraintdef(r.oid, true) as condef \
             FROM pg_catalog.pg_constraint r \
             WHERE r.conrelid = (\
             SELECT c.oid FROM pg_catalog.pg_class c, pg_catalog.pg_namespace n \
             WHERE {} AND n.oid = c.relnamespace\
             ) AND r.contype = 'f'",
            self.table_where_clause(table, "c", "n")
        ))
    }

    fn list_table_constraints_sql(&self, table: &str) -> Result<String> {
        let table = Identifier::parse(table);
        Ok(format!(
            "SELECT quote_ident(relname) as relname FROM pg_class \
             WHERE oid IN (\
             SELECT indexrelid FROM pg_index, pg_class \
             WHERE pg_class.relname = {} \
             AND pg_class.oid = pg_index.indrelid \
             AND (indisunique = 't' OR indisprimary = 't')\
             )",
            self.quote_string_literal(table.name())
        ))
    }

    fn list_table_indexes_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT quote_ident(relname) as relname, pg_index.indisunique, pg_index.indisprimary, \
             pg_index.indkey, pg_index.indrelid, pg_get_expr(indpred, indrelid) AS where \
             FROM pg_class, pg_index \
             WHERE oid IN (\
             SELECT indexrelid FROM pg_index si, pg_class sc, pg_namespace sn \
             WHERE {} AND sc.oid=si.indrelid AND sc.relnamespace = sn.oid\
             ) AND pg_index.indexrelid = oid",
            self.table_where_clause(table, "sc", "sn")
        ))
    }

    fn list_table_columns_sql(&self, table: &str, _database: Option<&str>) -> Result<String> {
        Ok(format!(
            "SELECT a.attnum, quote_ident(a.attname) AS field, t.typname AS type, \
             format_type(a.atttypid, a.atttypmod) AS complete_type, \
             (SELECT tc.collcollate FROM pg_catalog.pg_collation tc WHERE tc.oid = a.attcollation) AS collation, \
             (SELECT t1.typname FROM pg_catalog.pg_type t1 WHERE t1.oid = t.typbasetype) AS domain_type, \
             (SELECT format_type(t2.typbasetype, t2.typtypmod) FROM pg_catalog.pg_type t2 \
             WHERE t2.typtype = 'd' AND t2.oid = a.atttypid) AS domain_complete_type, \
             a.attnotnull AS isnotnull, \
             (SELECT 't' FROM pg_index WHERE c.oid = pg_index.indrelid \
             AND pg_index.indkey[0] = a.attnum AND pg_index.indisprimary = 't') AS pri, \
             (SELECT pg_get_expr(adbin, adrelid) FROM pg_attrdef \
             WHERE c.oid = pg_attrdef.adrelid AND pg_attrdef.adnum=a.attnum) AS default, \
             (SELECT pg_description.description FROM pg_description \
             WHERE pg_description.objoid = c.oid AND a.attnum = pg_description.objsubid) AS comment \
             FROM pg_attribute a, pg_class c, pg_type t, pg_namespace n \
             WHERE {} AND a.attnum > 0 AND a.attrelid = c.oid AND a.atttypid = t.oid \
             AND n.oid = c.relnamespace \
             ORDER BY a.attnum",
            self.table_where_clause(table, "c", "n")
        ))
    }

    fn list_table_comments_sql(&self, table: &str, schema: Option<&str>) -> Result<String> {
        let table = match schema {
            Some(schema) => format!("{}.{}", schema, table),
            None => table.to_string(),
        };
        Ok(format!(
            "SELECT obj_description({}::regclass) AS table_comment",
            self.quote_string_literal(&table)
        ))
    }
}

//! Portable statement builders behind the [`Platform`] default methods.
//!
//! Every function here is the generic form of one trait method. The trait's
//! default implementation forwards to it, and a dialect that overrides the
//! method can still call it to wrap or extend the generic output.

use tracing::warn;

use super::diff::TableDiff;
use super::schema::{Column, ColumnType, ForeignKey, Index, Table, UniqueConstraint};
use super::traits::{CreateFlags, Platform};
use crate::error::{PlatformError, Result};

/// Constraint and index material collected for one CREATE TABLE.
///
/// Filled from the table according to the [`CreateFlags`]; the platform's
/// `build_create_table` decides where each piece lands in its syntax.
#[derive(Debug, Clone, Default)]
pub struct TableParts {
    /// Rendered primary key column names, duplicates removed.
    pub primary: Vec<String>,
    /// The primary key index itself.
    pub primary_index: Option<Index>,
    /// Non-primary indexes.
    pub indexes: Vec<Index>,
    pub unique_constraints: Vec<UniqueConstraint>,
    pub foreign_keys: Vec<ForeignKey>,
    /// Statement is part of an ALTER emulation (SQLite table copy).
    pub alter: bool,
}

impl TableParts {
    /// Collect the parts of `table` selected by `flags`.
    pub fn collect<P: Platform + ?Sized>(platform: &P, table: &Table, flags: CreateFlags) -> Self {
        let mut parts = TableParts {
            alter: flags.alter,
            ..Default::default()
        };

        if flags.indexes {
            for index in &table.indexes {
                if !index.is_primary {
                    parts.indexes.push(index.clone());
                    continue;
                }
                parts.primary.clear();
                for column in &index.columns {
                    let quoted = platform.quoted_name(column);
                    if !parts.primary.contains(&quoted) {
                        parts.primary.push(quoted);
                    }
                }
                parts.primary_index = Some(index.clone());
            }
            parts.unique_constraints = table.unique_constraints.clone();
        }

        if flags.foreign_keys {
            parts.foreign_keys = table.foreign_keys.clone();
        }

        parts
    }
}

/// `CREATE TABLE n (columns, uniques, PRIMARY KEY, indexes, checks)` plus one
/// `ALTER TABLE ... ADD` per foreign key.
pub fn build_create_table<P: Platform + ?Sized>(
    platform: &P,
    table: &Table,
    parts: &TableParts,
) -> Result<Vec<String>> {
    let name = platform.quoted_name(&table.name);
    let mut list = platform.column_declaration_list_sql(&table.columns)?;

    for constraint in &parts.unique_constraints {
        list.push_str(", ");
        list.push_str(&platform.unique_constraint_declaration_sql(constraint)?);
    }

    if !parts.primary.is_empty() {
        list.push_str(&format!(", PRIMARY KEY({})", parts.primary.join(", ")));
    }

    for index in &parts.indexes {
        list.push_str(", ");
        list.push_str(&platform.index_declaration_sql(index)?);
    }

    let check = platform.check_declaration_sql(&table.check_constraints)?;
    if !check.is_empty() {
        list.push_str(", ");
        list.push_str(&check);
    }

    let create = if table.options.temporary {
        platform.create_temporary_table_snippet()
    } else {
        "CREATE TABLE"
    };

    let mut sql = vec![format!("{} {} ({})", create, name, list)];
    for fk in &parts.foreign_keys {
        sql.push(platform.create_foreign_key_sql(fk, &table.name)?);
    }
    Ok(sql)
}

/// Default clause for a column declaration, with its leading space.
pub fn default_value_sql<P: Platform + ?Sized>(platform: &P, column: &Column) -> Result<String> {
    let Some(default) = &column.default else {
        return Ok(if column.is_nullable {
            " DEFAULT NULL".to_string()
        } else {
            String::new()
        });
    };

    let raw = default.as_raw();
    let ty = column.column_type;

    if ty.is_integer() {
        return Ok(format!(" DEFAULT {}", raw));
    }
    if ty.is_datetime() && raw == platform.current_timestamp_sql() {
        return Ok(format!(" DEFAULT {}", platform.current_timestamp_sql()));
    }
    if ty == ColumnType::Time && raw == platform.current_time_sql() {
        return Ok(format!(" DEFAULT {}", platform.current_time_sql()));
    }
    if ty == ColumnType::Date && raw == platform.current_date_sql() {
        return Ok(format!(" DEFAULT {}", platform.current_date_sql()));
    }
    if ty == ColumnType::Boolean {
        return Ok(format!(" DEFAULT {}", platform.convert_boolean(default)?));
    }

    Ok(format!(" DEFAULT {}", platform.quote_string_literal(&raw)))
}

/// `name TYPE[ CHARACTER SET ..][ DEFAULT ..][ NOT NULL][ COLLATE ..][ COMMENT ..]`.
pub fn column_declaration_sql<P: Platform + ?Sized>(
    platform: &P,
    name: &str,
    column: &Column,
) -> Result<String> {
    let declaration = match &column.column_definition {
        Some(definition) => definition.clone(),
        None => {
            let mut declaration = platform.column_type_sql(column);
            if let Some(charset) = column.charset.as_deref().filter(|c| !c.is_empty()) {
                let charset = platform.column_charset_sql(charset);
                if !charset.is_empty() {
                    declaration.push(' ');
                    declaration.push_str(&charset);
                }
            }
            declaration.push_str(&platform.default_value_sql(column)?);
            if !column.is_nullable {
                declaration.push_str(" NOT NULL");
            }
            if let Some(collation) = column.collation.as_deref().filter(|c| !c.is_empty()) {
                let collation = platform.column_collation_sql(collation);
                if !collation.is_empty() {
                    declaration.push(' ');
                    declaration.push_str(&collation);
                }
            }
            if platform.capabilities().inline_column_comments {
                if let Some(comment) = column.effective_comment() {
                    declaration.push(' ');
                    declaration.push_str(&platform.inline_column_comment_sql(comment)?);
                }
            }
            declaration
        }
    };

    Ok(format!("{} {}", name, declaration))
}

/// Character type declaration with the CLOB fallback for oversized lengths.
pub fn string_type_sql<P: Platform + ?Sized>(platform: &P, column: &Column) -> String {
    let caps = platform.capabilities();
    let length = column.length.unwrap_or(caps.varchar_default_length);
    let max_length = if column.fixed {
        caps.char_max_length
    } else {
        caps.varchar_max_length
    };

    if length > max_length {
        warn!(
            platform = platform.name(),
            column = %column.name,
            length,
            max_length,
            "String length exceeds platform maximum, declaring as CLOB"
        );
        return platform.clob_type_sql(column);
    }

    platform.varchar_type_snippet(length, column.fixed)
}

/// Binary type declaration with the BLOB fallback for oversized lengths.
pub fn binary_type_sql<P: Platform + ?Sized>(platform: &P, column: &Column) -> String {
    let caps = platform.capabilities();
    let length = column.length.unwrap_or(caps.binary_default_length);

    if length > caps.binary_max_length {
        if caps.binary_max_length > 0 {
            warn!(
                platform = platform.name(),
                column = %column.name,
                length,
                max_length = caps.binary_max_length,
                "Binary length exceeds platform maximum, declaring as BLOB"
            );
        }
        return platform.blob_type_sql(column);
    }

    platform.binary_type_snippet(length, column.fixed)
}

/// ` ON UPDATE x ON DELETE y`.
pub fn advanced_foreign_key_options_sql<P: Platform + ?Sized>(
    platform: &P,
    fk: &ForeignKey,
) -> Result<String> {
    let mut sql = String::new();
    if platform.capabilities().foreign_key_on_update {
        if let Some(action) = &fk.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(&platform.foreign_key_referential_action_sql(action)?);
        }
    }
    if let Some(action) = &fk.on_delete {
        sql.push_str(" ON DELETE ");
        sql.push_str(&platform.foreign_key_referential_action_sql(action)?);
    }
    Ok(sql)
}

/// `CREATE [UNIQUE ]INDEX n ON t (cols)[ WHERE p]`, or the primary key form.
pub fn create_index_sql<P: Platform + ?Sized>(platform: &P, index: &Index, table: &str) -> Result<String> {
    let name = platform.quoted_name(&index.name);
    let quoted_table = platform.quoted_name(table);

    if index.columns.is_empty() {
        return Err(PlatformError::invalid_definition(format!(
            "Incomplete or invalid index definition {} on table {}",
            name, quoted_table
        )));
    }

    if index.is_primary {
        return platform.create_primary_key_sql(index, table);
    }

    Ok(format!(
        "CREATE {}INDEX {} ON {} ({}){}",
        platform.create_index_flags(index),
        name,
        quoted_table,
        platform.index_columns_sql(index),
        platform.partial_index_sql(index)
    ))
}

/// `DROP INDEX i`.
pub fn drop_index_sql<P: Platform + ?Sized>(platform: &P, index: &Index) -> String {
    format!("DROP INDEX {}", platform.quoted_name(&index.name))
}

/// Index rename as drop + create, for platforms without a native rename.
pub fn rename_index_sql<P: Platform + ?Sized>(
    platform: &P,
    old_name: &str,
    index: &Index,
    table: &str,
) -> Result<Vec<String>> {
    let mut old_index = index.clone();
    old_index.name = old_name.to_string();
    Ok(vec![
        platform.drop_index_sql(&old_index, table)?,
        platform.create_index_sql(index, table)?,
    ])
}

/// Foreign key and index drops that must run before the table is altered.
pub fn pre_alter_sql<P: Platform + ?Sized>(platform: &P, diff: &TableDiff) -> Result<Vec<String>> {
    let table = diff.name();
    let mut sql = Vec::new();

    if platform.capabilities().foreign_keys {
        for fk in diff.dropped_foreign_keys.iter().chain(&diff.changed_foreign_keys) {
            sql.push(platform.drop_foreign_key_sql(&fk.name, table)?);
        }
    }

    for index in diff.dropped_indexes.iter().chain(&diff.changed_indexes) {
        sql.push(platform.drop_index_sql(index, table)?);
    }

    Ok(sql)
}

/// Foreign key and index creation that must run after the table is altered.
pub fn post_alter_sql<P: Platform + ?Sized>(platform: &P, diff: &TableDiff) -> Result<Vec<String>> {
    let table = diff.new_name.as_deref().unwrap_or_else(|| diff.name());
    let mut sql = Vec::new();

    if platform.capabilities().foreign_keys {
        for fk in diff.added_foreign_keys.iter().chain(&diff.changed_foreign_keys) {
            sql.push(platform.create_foreign_key_sql(fk, table)?);
        }
    }

    for index in diff.added_indexes.iter().chain(&diff.changed_indexes) {
        sql.push(platform.create_index_sql(index, table)?);
    }

    for (old_name, index) in &diff.renamed_indexes {
        sql.extend(platform.rename_index_sql(old_name, index, table)?);
    }

    Ok(sql)
}

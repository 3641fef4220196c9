//! ALTER TABLE emulation for SQLite.
//!
//! SQLite can only add columns and rename tables in place. Any other change
//! recreates the table:
//!
//! 1. Copy the current rows into `__temp__<table>`
//! 2. Drop and recreate the table with the new definition
//! 3. Copy the surviving columns back under their new names
//! 4. Drop the temporary table, rename, recreate indexes
//!
//! Columns are tracked by lowercase name in declaration order so renamed
//! and changed columns keep their position.

use tracing::debug;

use crate::core::diff::{ColumnDiff, TableDiff};
use crate::core::identifier::Identifier;
use crate::core::schema::{Column, ColumnType, ForeignKey, Index, Table};
use crate::core::traits::{CreateFlags, Platform};
use crate::error::{PlatformError, Result};

use super::dialect::SqlitePlatform;

/// Insertion-ordered entries keyed by lowercase name.
#[derive(Debug, Clone)]
struct Keyed<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Keyed<T> {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Replace in place when the key exists, append otherwise. Unnamed
    /// entries are always appended.
    fn insert(&mut self, key: String, value: T) {
        match self.position(&key).filter(|_| !key.is_empty()) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(i) = self.position(key) {
            self.entries.remove(i);
        }
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    fn into_values(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

/// Changes to integer autoincrement columns that SQLite already satisfies.
fn is_suppressed_change(change: &ColumnDiff) -> bool {
    let new_column = &change.new_column;
    if !new_column.autoincrement || new_column.column_type != ColumnType::Integer {
        return false;
    }
    if !change.has_type_changed() && change.has_unsigned_changed() {
        return true;
    }
    matches!(
        change.old_column.column_type,
        ColumnType::SmallInt | ColumnType::BigInt
    )
}

/// Entry point: in-place ALTER when possible, table copy otherwise.
pub(super) fn alter_table_sql(platform: &SqlitePlatform, diff: &TableDiff) -> Result<Vec<String>> {
    let mut diff = diff.clone();
    diff.changed_columns.retain(|change| !is_suppressed_change(change));

    if let Some(sql) = simple_alter_sql(platform, &diff)? {
        return Ok(sql);
    }
    copy_table_alter_sql(platform, &diff)
}

/// Whether an added column's default must be evaluated by CREATE TABLE.
fn has_current_time_default(platform: &SqlitePlatform, column: &Column) -> bool {
    let Some(default) = &column.default else {
        return false;
    };
    let raw = default.as_raw();
    match column.column_type {
        ColumnType::DateTime => raw == platform.current_timestamp_sql(),
        ColumnType::Date => raw == platform.current_date_sql(),
        ColumnType::Time => raw == platform.current_time_sql(),
        _ => false,
    }
}

/// `ADD COLUMN` and `RENAME TO` only; `None` when the diff needs a copy.
fn simple_alter_sql(platform: &SqlitePlatform, diff: &TableDiff) -> Result<Option<Vec<String>>> {
    if !diff.changed_columns.is_empty()
        || !diff.dropped_columns.is_empty()
        || !diff.renamed_columns.is_empty()
        || !diff.added_indexes.is_empty()
        || !diff.changed_indexes.is_empty()
        || !diff.dropped_indexes.is_empty()
        || !diff.renamed_indexes.is_empty()
        || !diff.added_foreign_keys.is_empty()
        || !diff.changed_foreign_keys.is_empty()
        || !diff.dropped_foreign_keys.is_empty()
    {
        return Ok(None);
    }

    let table = platform.table_name_sql(diff.name());
    let mut sql = Vec::new();

    for column in &diff.added_columns {
        if column.column_definition.is_some()
            || column.autoincrement
            || has_current_time_default(platform, column)
        {
            return Ok(None);
        }
        sql.push(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            table,
            platform.column_declaration_sql(&platform.quoted_name(&column.name), column)?
        ));
    }

    if let Some(new_name) = &diff.new_name {
        sql.push(format!(
            "ALTER TABLE {} RENAME TO {}",
            table,
            platform.table_name_sql(new_name)
        ));
    }

    Ok(Some(sql))
}

/// Swap the column at `key` for `column`, keeping its position.
fn replace_column(table: &str, columns: &mut Keyed<Column>, key: &str, column: Column) -> Result<()> {
    let Some(i) = columns.position(key) else {
        return Err(PlatformError::invalid_definition(format!(
            "There is no column with name '{}' on table '{}'.",
            key, table
        )));
    };
    columns.entries[i] = (column.name.to_lowercase(), column);
    Ok(())
}

/// Recreate the table with its new definition and copy the rows across.
fn copy_table_alter_sql(platform: &SqlitePlatform, diff: &TableDiff) -> Result<Vec<String>> {
    let table = &diff.old_table;

    let mut columns: Keyed<Column> = Keyed::default();
    let mut old_names: Keyed<String> = Keyed::default();
    for column in &table.columns {
        let key = column.name.to_lowercase();
        columns.insert(key.clone(), column.clone());
        old_names.insert(key, platform.quoted_name(&column.name));
    }
    let mut new_names = old_names.clone();

    for column in &diff.dropped_columns {
        let key = column.name.to_lowercase();
        if !columns.contains(&key) {
            continue;
        }
        columns.remove(&key);
        old_names.remove(&key);
        new_names.remove(&key);
    }

    let renames = diff
        .renamed_columns
        .iter()
        .map(|(old_name, column)| (old_name.as_str(), column))
        .chain(
            diff.changed_columns
                .iter()
                .map(|change| (change.old_column.name.as_str(), &change.new_column)),
        );
    for (old_name, column) in renames {
        let key = old_name.to_lowercase();
        replace_column(&table.name, &mut columns, &key, column.clone())?;
        if new_names.contains(&key) {
            new_names.insert(key, platform.quoted_name(&column.name));
        }
    }

    for column in &diff.added_columns {
        columns.insert(column.name.to_lowercase(), column.clone());
    }

    let short_name = Identifier::parse(&table.name).short_name().to_string();
    let temp_table = format!("__temp__{}", short_name);
    let temp_table_sql = platform.quoted_name(&temp_table);

    let new_table = Table {
        name: table.name.clone(),
        columns: columns.into_values(),
        indexes: primary_index_in_altered_table(diff).into_iter().collect(),
        unique_constraints: Vec::new(),
        foreign_keys: foreign_keys_in_altered_table(diff),
        check_constraints: table.check_constraints.clone(),
        options: table.options.clone(),
    };

    let old_list = old_names.values().cloned().collect::<Vec<_>>().join(", ");
    let new_list = new_names.values().cloned().collect::<Vec<_>>().join(", ");
    let table_sql = platform.table_name_sql(&table.name);

    debug!(
        table = %table.name,
        columns = new_table.columns.len(),
        "Recreating SQLite table to apply ALTER"
    );

    let mut sql = platform.pre_alter_table_index_foreign_key_sql(diff)?;
    sql.push(format!(
        "CREATE TEMPORARY TABLE {} AS SELECT {} FROM {}",
        temp_table_sql, old_list, table_sql
    ));
    sql.push(platform.drop_table_sql(&table.name));
    sql.extend(platform.create_table_sql(
        &new_table,
        CreateFlags {
            indexes: true,
            foreign_keys: true,
            alter: true,
        },
    )?);
    sql.push(format!(
        "INSERT INTO {} ({}) SELECT {} FROM {}",
        table_sql, new_list, old_list, temp_table_sql
    ));
    sql.push(platform.drop_table_sql(&temp_table));

    if let Some(new_name) = &diff.new_name {
        sql.push(format!(
            "ALTER TABLE {} RENAME TO {}",
            table_sql,
            platform.table_name_sql(new_name)
        ));
    }

    sql.extend(platform.post_alter_table_index_foreign_key_sql(diff)?);
    Ok(sql)
}

/// Lowercase old or new column name → column name after the change.
fn column_names_in_altered_table(diff: &TableDiff) -> Keyed<String> {
    let mut names: Keyed<String> = Keyed::default();
    for column in &diff.old_table.columns {
        names.insert(column.name.to_lowercase(), column.name.clone());
    }
    for column in &diff.dropped_columns {
        names.remove(&column.name.to_lowercase());
    }

    let renames = diff
        .renamed_columns
        .iter()
        .map(|(old_name, column)| (old_name.as_str(), column.name.as_str()))
        .chain(
            diff.changed_columns
                .iter()
                .map(|c| (c.old_column.name.as_str(), c.new_column.name.as_str())),
        );
    for (old_name, new_name) in renames {
        names.insert(old_name.to_lowercase(), new_name.to_string());
        names.insert(new_name.to_lowercase(), new_name.to_string());
    }

    for column in &diff.added_columns {
        names.insert(column.name.to_lowercase(), column.name.clone());
    }
    names
}

/// Map `columns` through the rename table; `None` when one was dropped.
fn remap_columns(names: &Keyed<String>, columns: &[String]) -> Option<(Vec<String>, bool)> {
    let mut changed = false;
    let mut mapped = Vec::with_capacity(columns.len());
    for column in columns {
        let new_name = names.get(&column.to_lowercase())?;
        if new_name != column {
            changed = true;
        }
        mapped.push(new_name.clone());
    }
    Some((mapped, changed))
}

/// Indexes of the table after `diff` is applied.
pub(super) fn indexes_in_altered_table(diff: &TableDiff) -> Vec<Index> {
    let names = column_names_in_altered_table(diff);
    let mut indexes: Keyed<Index> = Keyed::default();

    for index in &diff.old_table.indexes {
        let renamed = diff
            .renamed_indexes
            .iter()
            .any(|(old_name, _)| old_name.eq_ignore_ascii_case(&index.name));
        if renamed {
            continue;
        }
        let Some((columns, changed)) = remap_columns(&names, &index.columns) else {
            continue;
        };
        let mut index = index.clone();
        if changed {
            index.columns = columns;
        }
        indexes.insert(index.name.to_lowercase(), index);
    }

    for index in &diff.dropped_indexes {
        indexes.remove(&index.name.to_lowercase());
    }

    let replacements = diff
        .changed_indexes
        .iter()
        .chain(&diff.added_indexes)
        .chain(diff.renamed_indexes.iter().map(|(_, index)| index));
    for index in replacements {
        indexes.insert(index.name.to_lowercase(), index.clone());
    }

    indexes.into_values()
}

fn primary_index_in_altered_table(diff: &TableDiff) -> Option<Index> {
    indexes_in_altered_table(diff)
        .into_iter()
        .rfind(|index| index.is_primary)
}

/// Foreign keys of the table after `diff` is applied.
fn foreign_keys_in_altered_table(diff: &TableDiff) -> Vec<ForeignKey> {
    let names = column_names_in_altered_table(diff);
    let mut foreign_keys: Keyed<ForeignKey> = Keyed::default();

    for fk in &diff.old_table.foreign_keys {
        let Some((columns, changed)) = remap_columns(&names, &fk.columns) else {
            continue;
        };
        let mut fk = fk.clone();
        if changed {
            fk.columns = columns;
        }
        foreign_keys.insert(fk.name.to_lowercase(), fk);
    }

    for fk in &diff.dropped_foreign_keys {
        foreign_keys.remove(&fk.name.to_lowercase());
    }

    for fk in diff.changed_foreign_keys.iter().chain(&diff.added_foreign_keys) {
        foreign_keys.insert(fk.name.to_lowercase(), fk.clone());
    }

    foreign_keys.into_values()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_column(name: &str, column_type: ColumnType) -> Column {
        Column::new(name, column_type)
    }

    fn make_test_table() -> Table {
        Table::new("users")
            .with_column(make_test_column("id", ColumnType::Integer).autoincrement())
            .with_column(make_test_column("name", ColumnType::String))
            .with_primary_key(&["id"])
    }

    // =========================================================================
    // In-place ALTER tests
    // =========================================================================

    #[test]
    fn test_diff_against_self_is_empty() {
        let p = SqlitePlatform::new();
        assert!(p.alter_table_sql(&TableDiff::new(make_test_table())).unwrap().is_empty());
    }

    #[test]
    fn test_simple_add_column_and_rename_table() {
        let p = SqlitePlatform::new();
        let diff = TableDiff::new(make_test_table())
            .add_column(make_test_column("email", ColumnType::String).nullable())
            .rename_to("members");
        assert_eq!(
            p.alter_table_sql(&diff).unwrap(),
            vec![
                "ALTER TABLE users ADD COLUMN email VARCHAR(255) DEFAULT NULL".to_string(),
                "ALTER TABLE users RENAME TO members".to_string(),
            ]
        );
    }

    #[test]
    fn test_current_timestamp_default_forces_copy() {
        let p = SqlitePlatform::new();
        let diff = TableDiff::new(make_test_table()).add_column(
            make_test_column("created", ColumnType::DateTime).with_default("CURRENT_TIMESTAMP"),
        );
        let sql = p.alter_table_sql(&diff).unwrap();
        assert_eq!(sql[0], "CREATE TEMPORARY TABLE __temp__users AS SELECT id, name FROM users");
        assert!(sql[2].contains("created DATETIME DEFAULT CURRENT_TIMESTAMP NOT NULL"));
    }

    #[test]
    fn test_autoincrement_width_change_is_suppressed() {
        let p = SqlitePlatform::new();
        let diff = TableDiff::new(make_test_table()).change_column(
            make_test_column("id", ColumnType::BigInt).autoincrement(),
            make_test_column("id", ColumnType::Integer).autoincrement(),
        );
        assert!(p.alter_table_sql(&diff).unwrap().is_empty());
    }

    // =========================================================================
    // Table copy tests
    // =========================================================================

    #[test]
    fn test_rename_and_add_copies_table() {
        let p = SqlitePlatform::new();
        let diff = TableDiff::new(make_test_table())
            .rename_column("name", make_test_column("full_name", ColumnType::String))
            .add_column(make_test_column("email", ColumnType::String));

        assert_eq!(
            p.alter_table_sql(&diff).unwrap(),
            vec![
                "CREATE TEMPORARY TABLE __temp__users AS SELECT id, name FROM users".to_string(),
                "DROP TABLE users".to_string(),
                "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
                 full_name VARCHAR(255) NOT NULL, email VARCHAR(255) NOT NULL)"
                    .to_string(),
                "INSERT INTO users (id, full_name) SELECT id, name FROM __temp__users".to_string(),
                "DROP TABLE __temp__users".to_string(),
            ]
        );
    }

    #[test]
    fn test_renamed_column_updates_indexes() {
        let p = SqlitePlatform::new();
        let table = make_test_table().with_index(Index::new("idx_name", &["name"]));
        let diff = TableDiff::new(table)
            .rename_column("name", make_test_column("full_name", ColumnType::String))
            .rename_to("members");

        let sql = p.alter_table_sql(&diff).unwrap();
        assert_eq!(sql.len(), 7);
        assert_eq!(sql[5], "ALTER TABLE users RENAME TO members");
        assert_eq!(sql[6], "CREATE INDEX idx_name ON members (full_name)");
    }

    #[test]
    fn test_dropped_column_drops_its_index() {
        let p = SqlitePlatform::new();
        let table = make_test_table().with_index(Index::new("idx_name", &["name"]));
        let diff = TableDiff::new(table).drop_column(make_test_column("name", ColumnType::String));

        assert_eq!(
            p.alter_table_sql(&diff).unwrap(),
            vec![
                "CREATE TEMPORARY TABLE __temp__users AS SELECT id FROM users".to_string(),
                "DROP TABLE users".to_string(),
                "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL)".to_string(),
                "INSERT INTO users (id) SELECT id FROM __temp__users".to_string(),
                "DROP TABLE __temp__users".to_string(),
            ]
        );
    }

    #[test]
    fn test_changed_column_keeps_position_and_foreign_keys() {
        let p = SqlitePlatform::new();
        let table = Table::new("posts")
            .with_column(make_test_column("id", ColumnType::Integer))
            .with_column(make_test_column("author_id", ColumnType::Integer))
            .with_column(make_test_column("title", ColumnType::String).with_length(100))
            .with_primary_key(&["id"])
            .with_foreign_key(ForeignKey::new("fk_author", &["author_id"], "users", &["id"]));
        let diff = TableDiff::new(table).change_column(
            make_test_column("title", ColumnType::String).with_length(100),
            make_test_column("title", ColumnType::String).with_length(200),
        );

        let sql = p.alter_table_sql(&diff).unwrap();
        assert_eq!(
            sql[2],
            "CREATE TABLE posts (id INTEGER NOT NULL, author_id INTEGER NOT NULL, title VARCHAR(200) NOT NULL, \
             PRIMARY KEY(id), CONSTRAINT fk_author FOREIGN KEY (author_id) REFERENCES users (id) \
             NOT DEFERRABLE INITIALLY IMMEDIATE)"
        );
        assert_eq!(sql[3], "INSERT INTO posts (id, author_id, title) SELECT id, author_id, title FROM __temp__posts");
    }

    #[test]
    fn test_renaming_unknown_column_fails() {
        let p = SqlitePlatform::new();
        let diff = TableDiff::new(make_test_table())
            .rename_column("missing", make_test_column("other", ColumnType::String));
        let err = p.alter_table_sql(&diff).unwrap_err();
        assert!(matches!(err, PlatformError::InvalidDefinition(_)));
    }

    #[test]
    fn test_added_index_uses_copy_path() {
        let p = SqlitePlatform::new();
        let diff = TableDiff::new(make_test_table()).add_index(Index::unique("uniq_name", &["name"]));
        let sql = p.alter_table_sql(&diff).unwrap();
        assert_eq!(sql.last().map(String::as_str), Some("CREATE UNIQUE INDEX uniq_name ON users (name)"));
    }
}

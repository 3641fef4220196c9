//! Minimal schema comparator.
//!
//! Matches columns, indexes and foreign keys by case-insensitive name and
//! records the differences in a [`TableDiff`]. Column equality is decided by
//! the platform, so two columns that render to the same declaration are
//! considered equal even if their models differ.

use tracing::{debug, warn};

use super::diff::{ColumnDiff, TableDiff};
use super::schema::{ForeignKey, Index, Schema, Table};
use super::traits::Platform;
use crate::error::Result;

fn find_by_name<'a, T>(items: &'a [T], name: &str, key: impl Fn(&T) -> &str) -> Option<&'a T> {
    items.iter().find(|item| key(item).eq_ignore_ascii_case(name))
}

fn foreign_keys_differ(a: &ForeignKey, b: &ForeignKey) -> bool {
    let columns_eq = |x: &[String], y: &[String]| {
        x.len() == y.len() && x.iter().zip(y).all(|(l, r)| l.eq_ignore_ascii_case(r))
    };
    let action_eq = |x: &Option<String>, y: &Option<String>| match (x, y) {
        (Some(l), Some(r)) => l.eq_ignore_ascii_case(r),
        (None, None) => true,
        _ => false,
    };

    !columns_eq(&a.columns, &b.columns)
        || !a.foreign_table.eq_ignore_ascii_case(&b.foreign_table)
        || !columns_eq(&a.foreign_columns, &b.foreign_columns)
        || !action_eq(&a.on_delete, &b.on_delete)
        || !action_eq(&a.on_update, &b.on_update)
}

fn indexes_differ(a: &Index, b: &Index) -> bool {
    !a.is_fulfilled_by(b)
}

/// Differences that turn `from` into `to`.
pub fn compare_tables<P: Platform + ?Sized>(from: &Table, to: &Table, platform: &P) -> Result<TableDiff> {
    let mut diff = TableDiff::new(from.clone());

    // Columns
    for column in &to.columns {
        match from.column(&column.name) {
            Some(old) => {
                if !platform.columns_equal(old, column)? {
                    diff.changed_columns.push(ColumnDiff::new(old.clone(), column.clone()));
                }
            }
            None => diff.added_columns.push(column.clone()),
        }
    }
    for column in &from.columns {
        if !to.has_column(&column.name) {
            diff.dropped_columns.push(column.clone());
        }
    }
    if diff.dropped_columns.len() == 1
        && diff.added_columns.len() == 1
        && platform.columns_equal(&diff.dropped_columns[0], &diff.added_columns[0])?
    {
        let old = diff.dropped_columns.remove(0);
        let new = diff.added_columns.remove(0);
        diff.renamed_columns.push((old.name, new));
    }

    // Indexes
    for index in &to.indexes {
        match find_by_name(&from.indexes, &index.name, |i| &i.name) {
            Some(old) if indexes_differ(old, index) => diff.changed_indexes.push(index.clone()),
            Some(_) => {}
            None => diff.added_indexes.push(index.clone()),
        }
    }
    for index in &from.indexes {
        if find_by_name(&to.indexes, &index.name, |i| &i.name).is_none() {
            diff.dropped_indexes.push(index.clone());
        }
    }
    if diff.dropped_indexes.len() == 1
        && diff.added_indexes.len() == 1
        && !diff.dropped_indexes[0].is_primary
        && !indexes_differ(&diff.dropped_indexes[0], &diff.added_indexes[0])
    {
        let old = diff.dropped_indexes.remove(0);
        let new = diff.added_indexes.remove(0);
        diff.renamed_indexes.push((old.name, new));
    }

    // Foreign keys
    for fk in &to.foreign_keys {
        match find_by_name(&from.foreign_keys, &fk.name, |f| &f.name) {
            Some(old) if foreign_keys_differ(old, fk) => diff.changed_foreign_keys.push(fk.clone()),
            Some(_) => {}
            None => diff.added_foreign_keys.push(fk.clone()),
        }
    }
    for fk in &from.foreign_keys {
        if find_by_name(&to.foreign_keys, &fk.name, |f| &f.name).is_none() {
            diff.dropped_foreign_keys.push(fk.clone());
        }
    }

    debug!(
        table = %from.name,
        added = diff.added_columns.len(),
        changed = diff.changed_columns.len(),
        dropped = diff.dropped_columns.len(),
        "Compared table"
    );
    Ok(diff)
}

/// Ordered statements migrating `from` to `to`: new sequences, new tables,
/// per-table ALTERs, dropped tables.
pub fn compare_schemas<P: Platform + ?Sized>(from: &Schema, to: &Schema, platform: &P) -> Result<Vec<String>> {
    let mut sql = Vec::new();

    let new_sequences: Vec<_> = to
        .sequences
        .iter()
        .filter(|s| find_by_name(&from.sequences, &s.name, |x| &x.name).is_none())
        .collect();
    if platform.capabilities().sequences {
        for sequence in new_sequences {
            sql.push(platform.create_sequence_sql(sequence)?);
        }
    } else if !new_sequences.is_empty() {
        warn!(
            platform = platform.name(),
            count = new_sequences.len(),
            "Skipping sequences on a platform without sequence support"
        );
    }

    let new_tables: Vec<Table> = to
        .tables
        .iter()
        .filter(|t| from.table(&t.name).is_none())
        .cloned()
        .collect();
    if !new_tables.is_empty() {
        sql.extend(platform.create_tables_sql(&new_tables)?);
    }

    for table in &to.tables {
        let Some(old) = from.table(&table.name) else {
            continue;
        };
        let diff = compare_tables(old, table, platform)?;
        if !diff.is_empty() {
            sql.extend(platform.alter_table_sql(&diff)?);
        }
    }

    for table in &from.tables {
        if to.table(&table.name).is_none() {
            sql.push(platform.drop_table_sql(&table.name));
        }
    }

    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Column, ColumnType, Sequence};
    use crate::drivers::{MysqlPlatform, PostgresPlatform, SqlitePlatform};

    fn make_test_column(name: &str, column_type: ColumnType) -> Column {
        Column::new(name, column_type)
    }

    fn make_test_table() -> Table {
        Table::new("users")
            .with_column(make_test_column("id", ColumnType::Integer).autoincrement())
            .with_column(make_test_column("name", ColumnType::String))
            .with_primary_key(&["id"])
            .with_index(Index::new("idx_name", &["name"]))
    }

    // =========================================================================
    // Table comparison tests
    // =========================================================================

    #[test]
    fn test_compare_table_with_itself_is_empty() {
        let table = make_test_table();
        let mysql = MysqlPlatform::default();
        let sqlite = SqlitePlatform::new();

        let diff = compare_tables(&table, &table, &mysql).unwrap();
        assert!(diff.is_empty());
        assert!(mysql.alter_table_sql(&diff).unwrap().is_empty());

        let diff = compare_tables(&table, &table, &sqlite).unwrap();
        assert!(sqlite.alter_table_sql(&diff).unwrap().is_empty());
    }

    #[test]
    fn test_column_added_changed_dropped() {
        let from = make_test_table().with_column(make_test_column("age", ColumnType::Integer));
        let mut to = make_test_table()
            .with_column(make_test_column("email", ColumnType::String).nullable())
            .with_column(make_test_column("bio", ColumnType::Text));
        to.columns[1] = make_test_column("name", ColumnType::String).with_length(100);

        let diff = compare_tables(&from, &to, &PostgresPlatform::new()).unwrap();
        assert_eq!(diff.added_columns.len(), 2);
        assert_eq!(diff.dropped_columns.len(), 1);
        assert_eq!(diff.dropped_columns[0].name, "age");
        assert_eq!(diff.changed_columns.len(), 1);
        assert!(diff.changed_columns[0].has_length_changed());
        assert!(diff.renamed_columns.is_empty());
    }

    #[test]
    fn test_single_equal_column_swap_is_rename() {
        let from = make_test_table();
        let mut to = make_test_table();
        to.columns[1] = make_test_column("full_name", ColumnType::String);
        to.indexes[1] = Index::new("idx_name", &["full_name"]);

        let diff = compare_tables(&from, &to, &PostgresPlatform::new()).unwrap();
        assert!(diff.added_columns.is_empty());
        assert!(diff.dropped_columns.is_empty());
        assert_eq!(diff.renamed_columns.len(), 1);
        assert_eq!(diff.renamed_columns[0].0, "name");
        assert_eq!(diff.renamed_columns[0].1.name, "full_name");
        assert_eq!(diff.changed_indexes.len(), 1);
    }

    #[test]
    fn test_index_rename_detected() {
        let from = make_test_table();
        let mut to = make_test_table();
        to.indexes[1] = Index::new("idx_users_name", &["name"]);

        let diff = compare_tables(&from, &to, &MysqlPlatform::default()).unwrap();
        assert!(diff.added_indexes.is_empty());
        assert!(diff.dropped_indexes.is_empty());
        assert_eq!(diff.renamed_indexes.len(), 1);
        assert_eq!(diff.renamed_indexes[0].0, "idx_name");
    }

    #[test]
    fn test_foreign_key_changes() {
        let fk = ForeignKey::new("fk_owner", &["owner_id"], "accounts", &["id"]);
        let from = make_test_table()
            .with_column(make_test_column("owner_id", ColumnType::Integer))
            .with_foreign_key(fk.clone());
        let to = make_test_table()
            .with_column(make_test_column("owner_id", ColumnType::Integer))
            .with_foreign_key(fk.on_delete("CASCADE"));

        let diff = compare_tables(&from, &to, &MysqlPlatform::default()).unwrap();
        assert_eq!(diff.changed_foreign_keys.len(), 1);
        assert!(diff.added_foreign_keys.is_empty());
        assert!(diff.dropped_foreign_keys.is_empty());
    }

    // =========================================================================
    // Schema comparison tests
    // =========================================================================

    #[test]
    fn test_compare_schemas_orders_statements() {
        let from = Schema {
            tables: vec![make_test_table(), Table::new("legacy").with_column(make_test_column("id", ColumnType::Integer))],
            sequences: Vec::new(),
        };
        let to = Schema {
            tables: vec![
                make_test_table().with_column(make_test_column("email", ColumnType::String)),
                Table::new("posts").with_column(make_test_column("id", ColumnType::Integer)),
            ],
            sequences: vec![Sequence::new("posts_seq")],
        };

        let sql = compare_schemas(&from, &to, &PostgresPlatform::new()).unwrap();
        assert_eq!(sql.len(), 4);
        assert!(sql[0].starts_with("CREATE SEQUENCE posts_seq"));
        assert!(sql[1].starts_with("CREATE TABLE posts"));
        assert_eq!(sql[2], "ALTER TABLE users ADD email VARCHAR(255) NOT NULL");
        assert_eq!(sql[3], "DROP TABLE legacy");
    }

    #[test]
    fn test_compare_schemas_skips_sequences_without_support() {
        let to = Schema {
            tables: Vec::new(),
            sequences: vec![Sequence::new("s")],
        };
        let sql = compare_schemas(&Schema::default(), &to, &MysqlPlatform::default()).unwrap();
        assert!(sql.is_empty());
    }
}

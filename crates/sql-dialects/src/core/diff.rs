//! Table and column deltas consumed by ALTER TABLE generation.

use serde::{Deserialize, Serialize};

use super::schema::{Column, ForeignKey, Index, Table};

/// Change between two snapshots of the same column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDiff {
    /// Column as it exists before the change.
    pub old_column: Column,

    /// Column as it should exist afterwards.
    pub new_column: Column,
}

impl ColumnDiff {
    pub fn new(old_column: Column, new_column: Column) -> Self {
        Self {
            old_column,
            new_column,
        }
    }

    pub fn has_type_changed(&self) -> bool {
        self.old_column.column_type != self.new_column.column_type
    }

    pub fn has_length_changed(&self) -> bool {
        self.old_column.length != self.new_column.length
    }

    pub fn has_precision_changed(&self) -> bool {
        self.old_column.precision != self.new_column.precision
    }

    pub fn has_scale_changed(&self) -> bool {
        self.old_column.scale != self.new_column.scale
    }

    pub fn has_fixed_changed(&self) -> bool {
        self.old_column.fixed != self.new_column.fixed
    }

    pub fn has_unsigned_changed(&self) -> bool {
        self.old_column.unsigned != self.new_column.unsigned
    }

    pub fn has_notnull_changed(&self) -> bool {
        self.old_column.is_nullable != self.new_column.is_nullable
    }

    pub fn has_default_changed(&self) -> bool {
        self.old_column.default != self.new_column.default
    }

    pub fn has_autoincrement_changed(&self) -> bool {
        self.old_column.autoincrement != self.new_column.autoincrement
    }

    pub fn has_comment_changed(&self) -> bool {
        self.old_column.effective_comment() != self.new_column.effective_comment()
    }

    /// Number of column properties that differ.
    pub fn changed_property_count(&self) -> usize {
        [
            self.has_type_changed(),
            self.has_length_changed(),
            self.has_precision_changed(),
            self.has_scale_changed(),
            self.has_fixed_changed(),
            self.has_unsigned_changed(),
            self.has_notnull_changed(),
            self.has_default_changed(),
            self.has_autoincrement_changed(),
            self.has_comment_changed(),
            self.old_column.charset != self.new_column.charset,
            self.old_column.collation != self.new_column.collation,
            self.old_column.column_definition != self.new_column.column_definition,
            self.old_column.jsonb != self.new_column.jsonb,
        ]
        .iter()
        .filter(|changed| **changed)
        .count()
    }
}

/// Delta between two snapshots of a table.
///
/// Produced by a comparator (or built by hand) and read by the platform's
/// ALTER TABLE generation. Renames are stored as `(old name, new column)`
/// and `(old name, new index)` pairs in the order they were detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDiff {
    /// The table before the change.
    pub old_table: Table,

    /// New table name when the table itself is renamed.
    #[serde(default)]
    pub new_name: Option<String>,

    #[serde(default)]
    pub added_columns: Vec<Column>,
    #[serde(default)]
    pub changed_columns: Vec<ColumnDiff>,
    #[serde(default)]
    pub dropped_columns: Vec<Column>,
    #[serde(default)]
    pub renamed_columns: Vec<(String, Column)>,

    #[serde(default)]
    pub added_indexes: Vec<Index>,
    #[serde(default)]
    pub changed_indexes: Vec<Index>,
    #[serde(default)]
    pub dropped_indexes: Vec<Index>,
    #[serde(default)]
    pub renamed_indexes: Vec<(String, Index)>,

    #[serde(default)]
    pub added_foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub changed_foreign_keys: Vec<ForeignKey>,
    #[serde(default)]
    pub dropped_foreign_keys: Vec<ForeignKey>,
}

impl TableDiff {
    /// Create an empty diff against the given table.
    pub fn new(old_table: Table) -> Self {
        Self {
            old_table,
            new_name: None,
            added_columns: Vec::new(),
            changed_columns: Vec::new(),
            dropped_columns: Vec::new(),
            renamed_columns: Vec::new(),
            added_indexes: Vec::new(),
            changed_indexes: Vec::new(),
            dropped_indexes: Vec::new(),
            renamed_indexes: Vec::new(),
            added_foreign_keys: Vec::new(),
            changed_foreign_keys: Vec::new(),
            dropped_foreign_keys: Vec::new(),
        }
    }

    /// Name of the table being altered.
    pub fn name(&self) -> &str {
        &self.old_table.name
    }

    /// True when applying the diff would change nothing.
    pub fn is_empty(&self) -> bool {
        self.new_name.is_none()
            && self.added_columns.is_empty()
            && self.changed_columns.is_empty()
            && self.dropped_columns.is_empty()
            && self.renamed_columns.is_empty()
            && self.added_indexes.is_empty()
            && self.changed_indexes.is_empty()
            && self.dropped_indexes.is_empty()
            && self.renamed_indexes.is_empty()
            && self.added_foreign_keys.is_empty()
            && self.changed_foreign_keys.is_empty()
            && self.dropped_foreign_keys.is_empty()
    }

    /// Whether any column, rename or index change is present.
    pub fn has_structural_changes(&self) -> bool {
        !self.changed_columns.is_empty()
            || !self.dropped_columns.is_empty()
            || !self.renamed_columns.is_empty()
            || !self.added_indexes.is_empty()
            || !self.changed_indexes.is_empty()
            || !self.dropped_indexes.is_empty()
            || !self.renamed_indexes.is_empty()
            || !self.added_foreign_keys.is_empty()
            || !self.changed_foreign_keys.is_empty()
            || !self.dropped_foreign_keys.is_empty()
    }

    pub fn add_column(mut self, column: Column) -> Self {
        self.added_columns.push(column);
        self
    }

    pub fn drop_column(mut self, column: Column) -> Self {
        self.dropped_columns.push(column);
        self
    }

    pub fn change_column(mut self, old: Column, new: Column) -> Self {
        self.changed_columns.push(ColumnDiff::new(old, new));
        self
    }

    pub fn rename_column(mut self, old_name: impl Into<String>, column: Column) -> Self {
        self.renamed_columns.push((old_name.into(), column));
        self
    }

    pub fn add_index(mut self, index: Index) -> Self {
        self.added_indexes.push(index);
        self
    }

    pub fn drop_index(mut self, index: Index) -> Self {
        self.dropped_indexes.push(index);
        self
    }

    pub fn rename_index(mut self, old_name: impl Into<String>, index: Index) -> Self {
        self.renamed_indexes.push((old_name.into(), index));
        self
    }

    pub fn add_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.added_foreign_keys.push(fk);
        self
    }

    pub fn drop_foreign_key(mut self, fk: ForeignKey) -> Self {
        self.dropped_foreign_keys.push(fk);
        self
    }

    pub fn rename_to(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ColumnType;

    #[test]
    fn test_column_diff_properties() {
        let old = Column::new("name", ColumnType::String).with_length(50);
        let new = Column::new("name", ColumnType::String)
            .with_length(100)
            .nullable();
        let diff = ColumnDiff::new(old, new);

        assert!(diff.has_length_changed());
        assert!(diff.has_notnull_changed());
        assert!(!diff.has_type_changed());
        assert_eq!(diff.changed_property_count(), 2);
    }

    #[test]
    fn test_column_diff_comment_empty_equals_none() {
        let old = Column::new("a", ColumnType::Integer);
        let new = Column::new("a", ColumnType::Integer).with_comment("");
        assert!(!ColumnDiff::new(old, new).has_comment_changed());
    }

    #[test]
    fn test_table_diff_is_empty() {
        let table = Table::new("t").with_column(Column::new("id", ColumnType::Integer));
        let diff = TableDiff::new(table.clone());
        assert!(diff.is_empty());
        assert!(!diff.has_structural_changes());

        let diff = TableDiff::new(table).add_column(Column::new("c", ColumnType::Integer));
        assert!(!diff.is_empty());
        assert!(!diff.has_structural_changes());
    }
}

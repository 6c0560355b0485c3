use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::table_event::TableEvent;
use crate::data::table_model::TableModel;
use crate::view::index_space::TotalIndex;

/// A column as the model knows it: stable name, header alias and whether
/// the view may ever show it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    pub alias: Option<String>,
    /// Internal/helper columns are never offered to the view
    pub displayable: bool,
}

impl TableColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            displayable: true,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the column as internal so it never reaches the view
    pub fn internal(mut self) -> Self {
        self.displayable = false;
        self
    }

    /// The header title: alias if set, otherwise the name
    pub fn title(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// In-memory table model. Each mutation returns the [`TableEvent`] the
/// column view needs to see.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnTable {
    pub name: String,
    columns: Vec<TableColumn>,
    row_count: usize,
}

impl ColumnTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Build a table of displayable columns from plain names
    pub fn with_columns<S: AsRef<str>>(name: impl Into<String>, columns: &[S]) -> Result<Self> {
        let mut table = Self::new(name);
        for column in columns {
            table.push_column(TableColumn::new(column.as_ref()))?;
        }
        Ok(table)
    }

    pub fn with_rows(mut self, row_count: usize) -> Self {
        self.row_count = row_count;
        self
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn column(&self, index: TotalIndex) -> Option<&TableColumn> {
        self.columns.get(index.0)
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.columns.iter().any(|c| c.name == name) {
            return Err(anyhow!("Column '{}' already exists in table '{}'", name, self.name));
        }
        Ok(())
    }

    pub fn push_column(&mut self, column: TableColumn) -> Result<TableEvent> {
        let at = TotalIndex(self.columns.len());
        self.insert_column(at, column)
    }

    pub fn insert_column(&mut self, at: TotalIndex, column: TableColumn) -> Result<TableEvent> {
        self.ensure_unique(&column.name)?;
        if at.0 > self.columns.len() {
            return Err(anyhow!(
                "Insert position {} out of bounds ({} columns)",
                at,
                self.columns.len()
            ));
        }

        debug!(target: "structure", "Inserting column '{}' at {}", column.name, at);
        self.columns.insert(at.0, column);
        Ok(TableEvent::ColumnsInserted { at, count: 1 })
    }

    /// Remove the given columns. Out of range indices are ignored.
    pub fn remove_columns(&mut self, indices: &[TotalIndex]) -> TableEvent {
        let mut mapping = Vec::with_capacity(self.columns.len());
        let mut next = 0;
        for old in 0..self.columns.len() {
            if indices.contains(&TotalIndex(old)) {
                mapping.push(None);
            } else {
                mapping.push(Some(TotalIndex(next)));
                next += 1;
            }
        }

        let mut old = 0;
        self.columns.retain(|_| {
            let keep = mapping[old].is_some();
            old += 1;
            keep
        });

        debug!(target: "structure", "Removed columns {:?}, {} remain", indices, self.columns.len());
        TableEvent::ColumnsRemoved { mapping }
    }

    pub fn remove_column_by_name(&mut self, name: &str) -> Option<TableEvent> {
        let index = self.column_index(name)?;
        Some(self.remove_columns(&[index]))
    }

    pub fn rename_column(&mut self, index: TotalIndex, new_name: impl Into<String>) -> Result<TableEvent> {
        let new_name = new_name.into();
        self.ensure_unique(&new_name)?;
        let column = self
            .columns
            .get_mut(index.0)
            .ok_or_else(|| anyhow!("Column index {} out of bounds", index))?;

        let old_name = std::mem::replace(&mut column.name, new_name);
        Ok(TableEvent::ColumnRenamed { index, old_name })
    }

    /// Change the header alias. Order and count are untouched.
    pub fn set_alias(&mut self, index: TotalIndex, alias: Option<String>) -> Result<TableEvent> {
        let column = self
            .columns
            .get_mut(index.0)
            .ok_or_else(|| anyhow!("Column index {} out of bounds", index))?;
        column.alias = alias;
        Ok(TableEvent::HeadersUpdated)
    }

    /// Replace every column, as when a different dataset is loaded
    pub fn replace_columns(&mut self, columns: Vec<TableColumn>) -> Result<TableEvent> {
        let mut seen = std::collections::HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(anyhow!("Duplicate column name '{}'", column.name));
            }
        }
        self.columns = columns;
        Ok(TableEvent::NewTable)
    }

    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count;
    }

    /// Remove rows, shifting the ones below up
    pub fn remove_rows(&mut self, rows: &[usize]) -> TableEvent {
        let mut mapping = Vec::with_capacity(self.row_count);
        let mut next = 0;
        for old in 0..self.row_count {
            if rows.contains(&old) {
                mapping.push(None);
            } else {
                mapping.push(Some(next));
                next += 1;
            }
        }
        self.row_count = next;
        TableEvent::RowsRenumbered { mapping }
    }
}

impl TableModel for ColumnTable {
    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: TotalIndex) -> Option<&str> {
        self.columns.get(index.0).map(|c| c.name.as_str())
    }

    fn column_title(&self, index: TotalIndex) -> Option<&str> {
        self.columns.get(index.0).map(|c| c.title())
    }

    fn is_displayable(&self, index: TotalIndex) -> bool {
        self.columns
            .get(index.0)
            .map(|c| c.displayable)
            .unwrap_or(false)
    }

    fn row_count(&self) -> usize {
        self.row_count
    }
}

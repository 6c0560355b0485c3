//! Reconciling the view with structural changes to the model
//!
//! A structural change destroys the live view columns and the row
//! selection. Per-column state and selection are captured before the view
//! is rebuilt and put back afterwards:
//!
//! - renumbering changes (insert, remove, rename) key the snapshot by
//!   column name because total indices shift, then reapply the intended
//!   order;
//! - pure updates key it by total index, which is still valid, and keep
//!   the current order;
//! - a new table starts over.

use std::collections::HashSet;
use tracing::{debug, info, trace};

use crate::data::table_event::{ChangeKind, TableEvent};
use crate::data::table_model::TableModel;
use crate::view::column_view::ColumnView;
use crate::view::events::ColumnViewEvent;
use crate::view::index_space::TotalIndex;
use crate::view::selection_bitset::SelectionBitset;
use crate::view::view_column::{ColumnProperties, ViewColumn};

/// How a [`ColumnPropertySnapshot`] finds its column again
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotKey {
    Name(String),
    Index(TotalIndex),
}

/// Per-column state captured just before a structural change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPropertySnapshot {
    pub key: SnapshotKey,
    pub properties: ColumnProperties,
    pub selected: bool,
}

/// Everything captured before a rebuild
#[derive(Debug, Clone)]
pub struct StructuralSnapshot {
    pub columns: Vec<ColumnPropertySnapshot>,
    /// Intended order at capture time
    pub order: Vec<String>,
    pub selection: SelectionBitset,
}

impl StructuralSnapshot {
    fn rename(&mut self, old_name: &str, new_name: &str) {
        for column in &mut self.columns {
            if column.key == SnapshotKey::Name(old_name.to_string()) {
                column.key = SnapshotKey::Name(new_name.to_string());
            }
        }
        for name in &mut self.order {
            if name == old_name {
                *name = new_name.to_string();
            }
        }
    }
}

impl<M: TableModel> ColumnView<M> {
    /// Reconcile the view after the model changed. The model must already
    /// be in its new state.
    pub fn table_changed(&mut self, event: TableEvent) {
        debug!(target: "structure", "Table changed: {:?}", event);

        match event.kind() {
            ChangeKind::NewTable => self.reset_for_new_table(),
            ChangeKind::Renumbering => self.rebuild_renumbered(&event),
            ChangeKind::PureUpdate => self.refresh_in_place(),
            ChangeKind::RowsOnly => {
                if let TableEvent::RowsRenumbered { mapping } = &event {
                    self.renumber_rows(mapping);
                }
            }
        }
    }

    /// Capture column state and row selection
    pub fn capture_snapshot(&self, by_name: bool) -> StructuralSnapshot {
        let columns = self
            .view_columns
            .iter()
            .map(|column| ColumnPropertySnapshot {
                key: if by_name {
                    SnapshotKey::Name(column.name.clone())
                } else {
                    SnapshotKey::Index(column.total)
                },
                properties: column.properties.clone(),
                selected: column.selected,
            })
            .collect();

        StructuralSnapshot {
            columns,
            order: self.order.names().to_vec(),
            selection: self.capture_selection(self.model.row_count()),
        }
    }

    fn capture_selection(&self, row_count: usize) -> SelectionBitset {
        SelectionBitset::snapshot(row_count, |row| self.selected_rows.contains(&row))
    }

    fn restore_selection(&mut self, selection: &SelectionBitset, mapping: Option<&[Option<usize>]>) {
        let row_count = self.model.row_count();
        let selected_rows = &mut self.selected_rows;
        let mut select = |row: usize| {
            if row < row_count {
                selected_rows.insert(row);
            }
        };

        match mapping {
            Some(mapping) => selection.restore_mapped(mapping, &mut select),
            None => selection.restore(&mut select),
        }
    }

    /// Reapply captured properties to whichever captured columns are in the
    /// view again. Columns that vanished or are hidden are skipped.
    fn restore_columns(&mut self, snapshot: &[ColumnPropertySnapshot]) {
        for captured in snapshot {
            let total = match &captured.key {
                SnapshotKey::Name(name) => match self.model.column_index(name) {
                    Some(total) => total,
                    None => {
                        trace!(target: "structure", "Column '{}' no longer exists", name);
                        continue;
                    }
                },
                SnapshotKey::Index(total) => *total,
            };

            if let Some(column) = self.view_columns.iter_mut().find(|c| c.total == total) {
                column.properties = captured.properties.clone();
                column.selected = captured.selected;
            }
        }
    }

    fn known_names(&self) -> HashSet<String> {
        self.order.names().iter().cloned().collect()
    }

    /// Insert, remove or rename: identity by name survives, indices do not
    fn rebuild_renumbered(&mut self, event: &TableEvent) {
        if let TableEvent::ColumnsRemoved { mapping } = event {
            self.view_columns
                .retain(|c| matches!(mapping.get(c.total.0), Some(Some(_))));
        }

        let mut snapshot = self.capture_snapshot(true);
        let mut previous = self.known_names();

        match event {
            TableEvent::ColumnRenamed { index, old_name } => {
                if let Some(new_name) = self.model.column_name(*index).map(str::to_string) {
                    debug!(target: "structure", "Renamed '{}' -> '{}'", old_name, new_name);
                    snapshot.rename(old_name, &new_name);
                    self.order.rename(old_name, &new_name);
                    self.hidden.rename(old_name, &new_name);
                    previous.insert(new_name);
                }
            }
            TableEvent::ColumnsRemoved { .. } => {
                let model = &self.model;
                self.hidden.sweep(|name| {
                    model
                        .column_index(name)
                        .is_some_and(|total| model.is_displayable(total))
                });
            }
            _ => {}
        }

        self.rebuild_view_columns();
        self.restore_columns(&snapshot.columns);

        let displayable = self.model.displayable_names();
        self.order.set_order(&snapshot.order, &displayable);
        self.apply_intended_order();

        // Columns that did not exist before see the current filter
        let new_columns: Vec<TotalIndex> = self
            .index_space
            .displayable_columns()
            .iter()
            .copied()
            .filter(|&total| {
                self.model
                    .column_name(total)
                    .is_some_and(|name| !previous.contains(name))
            })
            .collect();
        if !new_columns.is_empty() && !self.filter_text.is_empty() {
            self.apply_column_filter(&new_columns);
        }

        self.restore_selection(&snapshot.selection, None);

        info!(target: "structure",
            "Rebuilt view: {} visible, {} hidden",
            self.view_columns.len(),
            self.hidden.len()
        );
        self.events.push(ColumnViewEvent::ViewRebuilt {
            columns: self.view_columns.len(),
        });
    }

    /// Headers changed but order and count did not
    fn refresh_in_place(&mut self) {
        let snapshot = self.capture_snapshot(false);
        let current: Vec<TotalIndex> = self.view_columns.iter().map(|c| c.total).collect();

        self.index_space.rebuild(&self.model);
        let defaults = self.default_properties();
        let columns: Vec<ViewColumn> = current
            .into_iter()
            .filter(|&total| self.index_space.to_displayable(total).is_some())
            .filter_map(|total| {
                let name = self.model.column_name(total)?;
                Some(ViewColumn::new(total, name, defaults.clone()))
            })
            .collect();

        self.view_columns = columns;
        self.selected_rows.clear();
        self.refresh_view_mapping();

        self.restore_columns(&snapshot.columns);
        self.restore_selection(&snapshot.selection, None);

        // A new alias can change the filter result. Shown columns are left
        // alone so a manual show keeps overriding the filter.
        if !self.filter_text.is_empty() {
            let hidden: Vec<TotalIndex> = self
                .index_space
                .displayable_columns()
                .iter()
                .copied()
                .filter(|&total| {
                    self.column_visibility(total)
                        .is_some_and(|state| !state.is_visible())
                })
                .collect();
            self.apply_column_filter(&hidden);
        }

        self.events.push(ColumnViewEvent::ViewRebuilt {
            columns: self.view_columns.len(),
        });
    }

    /// Entire model replaced
    fn reset_for_new_table(&mut self) {
        self.hidden.clear();
        self.active_row = None;
        self.order.reset(&self.model.displayable_names());
        self.rebuild_view_columns();

        if !self.filter_text.is_empty() {
            let columns = self.index_space.displayable_columns().to_vec();
            self.apply_column_filter(&columns);
        }

        info!(target: "structure", "New table with {} columns", self.model.column_count());
        self.events.push(ColumnViewEvent::ViewRebuilt {
            columns: self.view_columns.len(),
        });
    }

    /// Rows were removed or reordered; only the row selection moves
    fn renumber_rows(&mut self, mapping: &[Option<usize>]) {
        let selection = self.capture_selection(mapping.len());
        self.selected_rows.clear();
        self.restore_selection(&selection, Some(mapping));

        self.active_row = self
            .active_row
            .and_then(|row| mapping.get(row).copied().flatten());
    }
}

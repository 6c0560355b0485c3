//! Serializable column layout for the persistence layer

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::table_model::TableModel;
use crate::view::column_view::ColumnView;

/// Saved state of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    pub width: u32,
    #[serde(default)]
    pub wrap_text: bool,
    /// Explicit manual visibility; absent when only the filter decides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Everything about the columns worth saving between sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Intended order, absent when native
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    #[serde(default)]
    pub columns: BTreeMap<String, ColumnState>,
    #[serde(default)]
    pub filter_text: String,
}

impl ColumnLayout {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<M: TableModel> ColumnView<M> {
    /// Query the saveable layout
    pub fn layout(&self) -> ColumnLayout {
        let order = self
            .order
            .to_ordered_name_list(&self.model.displayable_names());

        let mut columns = BTreeMap::new();
        for &total in self.index_space.displayable_columns() {
            let Some(name) = self.model.column_name(total) else {
                continue;
            };
            let Some(width) = self.get_column_width(total) else {
                continue;
            };
            columns.insert(
                name.to_string(),
                ColumnState {
                    width,
                    wrap_text: self.is_text_wrapped(total),
                    visible: self
                        .get_explicit_column_visibility_string(total)
                        .map(|v| v == "true"),
                },
            );
        }

        ColumnLayout {
            order,
            columns,
            filter_text: self.filter_text.clone(),
        }
    }

    /// Restore a saved layout. Columns that no longer exist are skipped.
    /// The filter goes first so explicit visibility can override it.
    pub fn apply_layout(&mut self, layout: &ColumnLayout) {
        if let Some(order) = &layout.order {
            self.set_column_order(order);
        }

        self.set_column_filter_text(layout.filter_text.clone());

        for (name, state) in &layout.columns {
            let Some(total) = self.model.column_index(name) else {
                continue;
            };
            self.set_column_width(total, state.width);
            self.set_text_wrapped(total, state.wrap_text);
            if let Some(visible) = state.visible {
                self.set_column_visibility(total, visible);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column_table::ColumnTable;
    use crate::view::index_space::TotalIndex;

    #[test]
    fn test_layout_restores_into_fresh_view() {
        let table = ColumnTable::with_columns("t", &["A", "B", "C"]).unwrap();
        let mut view = ColumnView::new(table.clone());
        view.set_column_order(&["C", "A", "B"]);
        view.set_column_width(TotalIndex(0), 120);
        view.set_manual_visibility(TotalIndex(1), false);

        let json = view.layout().to_json().unwrap();
        let layout = ColumnLayout::from_json(&json).unwrap();

        let mut restored = ColumnView::new(table);
        restored.apply_layout(&layout);
        assert_eq!(restored.visible_column_names(), vec!["C", "A"]);
        assert_eq!(restored.get_column_width(TotalIndex(0)), Some(120));
        assert!(restored.is_manually_hidden(TotalIndex(1)));
        assert_eq!(restored.layout(), layout);
    }

    #[test]
    fn test_filter_only_hide_is_not_persisted() {
        let table = ColumnTable::with_columns("t", &["MW", "Structure"]).unwrap();
        let mut view = ColumnView::new(table);
        view.set_column_filter_text("Struct");

        let layout = view.layout();
        assert_eq!(layout.columns["MW"].visible, None);
        assert_eq!(layout.columns["Structure"].visible, Some(true));
    }
}

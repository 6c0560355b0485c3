use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::config::config::{Config, InvalidPatternPolicy};
use crate::data::table_model::TableModel;
use crate::view::column_filter::ColumnFilter;
use crate::view::events::ColumnViewEvent;
use crate::view::hidden_cache::{HiddenColumnCache, HiddenColumnRecord};
use crate::view::index_space::{ColumnIndexSpace, TotalIndex, ViewIndex};
use crate::view::intended_order::IntendedOrderTracker;
use crate::view::view_column::{ColumnProperties, RendererHandle, ViewColumn};
use crate::view::visibility::ColumnVisibility;

/// Column visibility, ordering and selection state for a table view over a
/// [`TableModel`].
///
/// Keeps the total, displayable and view index spaces consistent, combines
/// manual and filter-driven hiding, remembers the intended order of every
/// displayable column and carries per-column state through hiding and
/// structural changes (see [`ColumnView::table_changed`]).
///
/// All entry points are expected on one thread; nothing here locks.
pub struct ColumnView<M: TableModel> {
    pub(crate) model: M,
    pub(crate) config: Config,

    pub(crate) index_space: ColumnIndexSpace,

    /// Visible columns, left to right
    pub(crate) view_columns: Vec<ViewColumn>,

    pub(crate) order: IntendedOrderTracker,
    pub(crate) hidden: HiddenColumnCache,

    pub(crate) filter_text: String,

    pub(crate) selected_rows: BTreeSet<usize>,
    pub(crate) active_row: Option<usize>,

    /// Set while the view moves columns itself, so the intended order does
    /// not learn from those moves
    pub(crate) neglect_move_events: bool,

    pub(crate) events: Vec<ColumnViewEvent>,
}

impl<M: TableModel> ColumnView<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, Config::default())
    }

    pub fn with_config(model: M, config: Config) -> Self {
        let mut view = Self {
            model,
            config,
            index_space: ColumnIndexSpace::new(),
            view_columns: Vec::new(),
            order: IntendedOrderTracker::new(),
            hidden: HiddenColumnCache::new(),
            filter_text: String::new(),
            selected_rows: BTreeSet::new(),
            active_row: None,
            neglect_move_events: false,
            events: Vec::new(),
        };
        view.order.reset(&view.model.displayable_names());
        view.rebuild_view_columns();
        view
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model. Structural changes must be reported
    /// afterwards through [`ColumnView::table_changed`].
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index_space(&self) -> &ColumnIndexSpace {
        &self.index_space
    }

    /// Drain recorded view events
    pub fn take_events(&mut self) -> Vec<ColumnViewEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== Index Conversion ==========

    pub fn convert_total_index_to_view(&self, total: TotalIndex) -> Option<ViewIndex> {
        self.index_space.total_to_view(total)
    }

    pub fn convert_total_index_from_view(&self, view: ViewIndex) -> Option<TotalIndex> {
        self.index_space.to_total(view)
    }

    /// Number of visible columns
    pub fn column_count(&self) -> usize {
        self.view_columns.len()
    }

    pub fn view_columns(&self) -> &[ViewColumn] {
        &self.view_columns
    }

    pub fn visible_column_names(&self) -> Vec<String> {
        self.view_columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Names of hidden displayable columns, in intended order
    pub fn hidden_column_names(&self) -> Vec<String> {
        self.order
            .names()
            .iter()
            .filter(|name| self.hidden.contains(name))
            .cloned()
            .collect()
    }

    /// Intended order of every displayable column
    pub fn intended_order(&self) -> &[String] {
        self.order.names()
    }

    pub fn hidden_record(&self, name: &str) -> Option<&HiddenColumnRecord> {
        self.hidden.get(name)
    }

    pub(crate) fn view_index_of_name(&self, name: &str) -> Option<ViewIndex> {
        self.view_columns
            .iter()
            .position(|c| c.name == name)
            .map(ViewIndex)
    }

    /// Name of a displayable column
    pub(crate) fn displayable_name(&self, total: TotalIndex) -> Option<String> {
        self.index_space.to_displayable(total)?;
        self.model.column_name(total).map(str::to_string)
    }

    pub(crate) fn refresh_view_mapping(&mut self) {
        self.index_space
            .set_view_columns(self.view_columns.iter().map(|c| c.total));
        self.check_invariants();
    }

    /// Recreate the view columns in natural order from the model, skipping
    /// columns with a hidden record. Destroys row selection like any view
    /// rebuild.
    pub(crate) fn rebuild_view_columns(&mut self) {
        self.index_space.rebuild(&self.model);
        self.order.sync(&self.model.displayable_names());

        let defaults = self.default_properties();
        let columns: Vec<ViewColumn> = self
            .index_space
            .displayable_columns()
            .iter()
            .filter_map(|&total| {
                let name = self.model.column_name(total)?;
                if self.hidden.contains(name) {
                    return None;
                }
                Some(ViewColumn::new(total, name, defaults.clone()))
            })
            .collect();

        self.view_columns = columns;
        self.selected_rows.clear();
        self.refresh_view_mapping();
    }

    pub(crate) fn default_properties(&self) -> ColumnProperties {
        ColumnProperties::with_width(self.config.columns.default_width)
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions) {
            for column in &self.view_columns {
                debug_assert!(
                    !self.hidden.contains(&column.name),
                    "column '{}' is visible but has a hidden record",
                    column.name
                );
            }
        }
    }

    // ========== Visibility ==========

    /// `None` when the column is not displayable
    pub fn column_visibility(&self, total: TotalIndex) -> Option<ColumnVisibility> {
        let name = self.displayable_name(total)?;
        Some(self.visibility_of_name(&name))
    }

    pub(crate) fn visibility_of_name(&self, name: &str) -> ColumnVisibility {
        self.hidden
            .get(name)
            .map(|record| record.visibility)
            .unwrap_or(ColumnVisibility::Shown)
    }

    pub fn is_manually_hidden(&self, total: TotalIndex) -> bool {
        self.column_visibility(total)
            .is_some_and(ColumnVisibility::is_manually_hidden)
    }

    pub fn is_hidden_by_filter(&self, total: TotalIndex) -> bool {
        self.column_visibility(total)
            .is_some_and(ColumnVisibility::is_hidden_by_filter)
    }

    pub fn effective_visibility(&self, total: TotalIndex) -> bool {
        self.column_visibility(total)
            .is_some_and(ColumnVisibility::is_visible)
    }

    /// User show/hide. Showing also clears a filter hide; hiding leaves the
    /// filter reason alone. Returns whether anything changed.
    pub fn set_manual_visibility(&mut self, total: TotalIndex, visible: bool) -> bool {
        self.transition(total, |state| state.with_manual(visible))
    }

    /// Manual visibility entry point for the persistence layer
    pub fn set_column_visibility(&mut self, total: TotalIndex, visible: bool) -> bool {
        self.set_manual_visibility(total, visible)
    }

    /// Filter-driven visibility. Never changes the manual reason.
    pub fn set_filter_visibility(&mut self, total: TotalIndex, visible: bool) -> bool {
        self.transition(total, |state| state.with_filter(visible))
    }

    /// Manual show of every hidden column, filter-hidden ones included
    pub fn show_all_columns(&mut self) {
        let hidden: Vec<TotalIndex> = self
            .hidden_column_names()
            .iter()
            .filter_map(|name| self.model.column_index(name))
            .collect();
        for total in hidden {
            self.set_manual_visibility(total, true);
        }
    }

    fn transition<F>(&mut self, total: TotalIndex, change: F) -> bool
    where
        F: FnOnce(ColumnVisibility) -> ColumnVisibility,
    {
        let Some(name) = self.displayable_name(total) else {
            debug!(target: "column_view", "Ignoring visibility change for non-displayable column {}", total);
            return false;
        };

        let current = self.visibility_of_name(&name);
        let next = change(current);
        if current == next {
            return false;
        }

        trace!(target: "column_view", "'{}': {:?} -> {:?}", name, current, next);
        match (current.is_visible(), next.is_visible()) {
            (true, false) => self.dematerialize(&name, next),
            (false, true) => match self.hidden.remove(&name) {
                Some(record) => self.materialize(&name, total, record),
                None => debug_assert!(false, "hidden column '{}' without a record", name),
            },
            _ => {
                if let Some(record) = self.hidden.get_mut(&name) {
                    record.visibility = next;
                }
            }
        }
        true
    }

    /// Put a hidden column back at its intended position with its cached
    /// properties
    fn materialize(&mut self, name: &str, total: TotalIndex, record: HiddenColumnRecord) {
        let at = self.order.insertion_point_for(
            name,
            |candidate| self.view_index_of_name(candidate),
            self.view_columns.len(),
        );
        let at = ViewIndex(at.0.min(self.view_columns.len()));

        let mut column = ViewColumn::new(total, name, record.properties);
        column.selected = record.selected;
        self.view_columns.insert(at.0, column);
        self.refresh_view_mapping();

        debug!(target: "column_view", "Showing '{}' at {}", name, at);
        self.events.push(ColumnViewEvent::ColumnShown {
            name: name.to_string(),
            at,
        });
    }

    /// Move a view column into the hidden cache
    fn dematerialize(&mut self, name: &str, visibility: ColumnVisibility) {
        let Some(from) = self.view_index_of_name(name) else {
            debug_assert!(false, "visible column '{}' not in view", name);
            return;
        };

        let column = self.view_columns.remove(from.0);
        self.hidden.insert(
            name,
            HiddenColumnRecord {
                properties: column.properties,
                last_view_index: from,
                selected: column.selected,
                visibility,
            },
        );
        self.refresh_view_mapping();

        debug!(target: "column_view", "Hiding '{}' from {}", name, from);
        self.events.push(ColumnViewEvent::ColumnHidden {
            name: name.to_string(),
            from,
        });
    }

    // ========== Column Filter ==========

    pub fn get_column_filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Re-evaluate the filter against every displayable column title
    pub fn set_column_filter_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.filter_text {
            return;
        }

        debug!(target: "filter", "Column filter '{}' -> '{}'", self.filter_text, text);
        self.filter_text = text;
        self.events.push(ColumnViewEvent::FilterChanged {
            text: self.filter_text.clone(),
        });

        let columns = self.index_space.displayable_columns().to_vec();
        self.apply_column_filter(&columns);
    }

    /// Apply the current filter text to the given columns. A malformed regex
    /// follows the configured [`InvalidPatternPolicy`].
    pub(crate) fn apply_column_filter(&mut self, columns: &[TotalIndex]) {
        let filter = match ColumnFilter::parse(&self.filter_text, &self.config.filter) {
            Ok(filter) => filter,
            Err(e) => {
                debug!(target: "filter", "Malformed column filter '{}': {}", self.filter_text, e);
                match self.config.filter.invalid_pattern {
                    InvalidPatternPolicy::KeepPrevious => return,
                    InvalidPatternPolicy::ShowAll => ColumnFilter::All,
                }
            }
        };

        for &total in columns {
            let visible = match self.model.column_title(total) {
                Some(title) => filter.matches(title),
                None => continue,
            };
            self.set_filter_visibility(total, visible);
        }
    }

    // ========== Ordering ==========

    /// User drag-reorder. The intended order learns the new position.
    pub fn move_column(&mut self, from: ViewIndex, to: ViewIndex) -> bool {
        let len = self.view_columns.len();
        if from.0 >= len || to.0 >= len {
            return false;
        }
        if from != to {
            self.move_view_column(from, to);
        }
        true
    }

    /// Move a view column and fire the column-moved notification
    fn move_view_column(&mut self, from: ViewIndex, to: ViewIndex) {
        let column = self.view_columns.remove(from.0);
        let name = column.name.clone();
        self.view_columns.insert(to.0, column);
        self.refresh_view_mapping();

        self.events
            .push(ColumnViewEvent::ColumnMoved { name, from, to });
        self.column_moved(to);
    }

    /// Column-moved notification handler
    fn column_moved(&mut self, to: ViewIndex) {
        if self.neglect_move_events {
            return;
        }

        let Some(name) = self.view_columns.get(to.0).map(|c| c.name.clone()) else {
            return;
        };
        let preceding = to
            .0
            .checked_sub(1)
            .and_then(|i| self.view_columns.get(i))
            .map(|c| c.name.clone());
        let following = self.view_columns.get(to.0 + 1).map(|c| c.name.clone());

        self.order
            .column_moved(&name, preceding.as_deref(), following.as_deref());
    }

    /// Reorder the view to follow the intended order
    pub(crate) fn apply_intended_order(&mut self) {
        let target: Vec<String> = self
            .order
            .names()
            .iter()
            .filter(|name| self.view_index_of_name(name).is_some())
            .cloned()
            .collect();

        self.neglect_move_events = true;
        for (to, name) in target.iter().enumerate() {
            if let Some(from) = self.view_index_of_name(name) {
                if from.0 != to {
                    self.move_view_column(from, ViewIndex(to));
                }
            }
        }
        self.neglect_move_events = false;
    }

    /// Replace the intended order and rearrange the view to match
    pub fn set_column_order<S: AsRef<str>>(&mut self, names: &[S]) {
        let displayable = self.model.displayable_names();
        self.order.set_order(names, &displayable);
        self.apply_intended_order();
    }

    /// Delimited intended order, `None` when the order is native
    pub fn get_column_order_string(&self) -> Option<String> {
        let displayable = self.model.displayable_names();
        self.order
            .to_ordered_name_list(&displayable)
            .map(|names| names.join(self.config.columns.order_delimiter.as_str()))
    }

    pub fn set_column_order_string(&mut self, order: &str) {
        let delimiter = self.config.columns.order_delimiter.clone();
        let names: Vec<&str> = order.split(delimiter.as_str()).collect();
        self.set_column_order(&names);
    }

    // ========== Column Properties ==========

    pub(crate) fn properties(&self, total: TotalIndex) -> Option<&ColumnProperties> {
        let name = self.displayable_name(total)?;
        match self.view_columns.iter().find(|c| c.name == name) {
            Some(column) => Some(&column.properties),
            None => self.hidden.get(&name).map(|r| &r.properties),
        }
    }

    fn properties_mut(&mut self, total: TotalIndex) -> Option<&mut ColumnProperties> {
        let name = self.displayable_name(total)?;
        match self.view_columns.iter_mut().find(|c| c.name == name) {
            Some(column) => Some(&mut column.properties),
            None => self.hidden.get_mut(&name).map(|r| &mut r.properties),
        }
    }

    /// Width in pixels, also for hidden columns
    pub fn get_column_width(&self, total: TotalIndex) -> Option<u32> {
        self.properties(total).map(|p| p.width)
    }

    pub fn set_column_width(&mut self, total: TotalIndex, width: u32) {
        let width = width.max(self.config.columns.min_width);
        if let Some(properties) = self.properties_mut(total) {
            properties.width = width;
        }
    }

    pub fn is_text_wrapped(&self, total: TotalIndex) -> bool {
        self.properties(total).is_some_and(|p| p.wrap_text)
    }

    pub fn set_text_wrapped(&mut self, total: TotalIndex, wrap: bool) {
        if let Some(properties) = self.properties_mut(total) {
            properties.wrap_text = wrap;
        }
    }

    pub fn column_renderer(&self, total: TotalIndex) -> Option<RendererHandle> {
        self.properties(total).and_then(|p| p.renderer)
    }

    pub fn set_column_renderer(&mut self, total: TotalIndex, renderer: Option<RendererHandle>) {
        if let Some(properties) = self.properties_mut(total) {
            properties.renderer = renderer;
        }
    }

    /// `"false"` for a manually hidden column, `"true"` for a shown one and
    /// `None` when the column is hidden only by the filter (or is not
    /// displayable)
    pub fn get_explicit_column_visibility_string(&self, total: TotalIndex) -> Option<&'static str> {
        match self.column_visibility(total)? {
            ColumnVisibility::Shown => Some("true"),
            ColumnVisibility::HiddenByFilter => None,
            ColumnVisibility::HiddenManually | ColumnVisibility::HiddenBoth => Some("false"),
        }
    }

    // ========== Selection ==========

    pub fn set_column_selected(&mut self, view: ViewIndex, selected: bool) -> bool {
        match self.view_columns.get_mut(view.0) {
            Some(column) => {
                column.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Also answers for hidden columns from their record
    pub fn is_column_selected(&self, total: TotalIndex) -> bool {
        let Some(name) = self.displayable_name(total) else {
            return false;
        };
        match self.view_columns.iter().find(|c| c.name == name) {
            Some(column) => column.selected,
            None => self.hidden.get(&name).is_some_and(|r| r.selected),
        }
    }

    pub fn set_row_selected(&mut self, row: usize, selected: bool) {
        if row >= self.model.row_count() {
            trace!(target: "column_view", "Ignoring selection of row {} past the end", row);
            return;
        }
        if selected {
            self.selected_rows.insert(row);
        } else {
            self.selected_rows.remove(&row);
        }
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selected_rows.contains(&row)
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.selected_rows.iter().copied().collect()
    }

    pub fn clear_row_selection(&mut self) {
        self.selected_rows.clear();
    }

    /// Row-number click pass-through
    pub fn set_active_row(&mut self, row: Option<usize>) {
        self.active_row = row.filter(|&r| r < self.model.row_count());
    }

    pub fn active_row(&self) -> Option<usize> {
        self.active_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column_table::{ColumnTable, TableColumn};

    fn view(columns: &[&str]) -> ColumnView<ColumnTable> {
        ColumnView::new(ColumnTable::with_columns("t", columns).unwrap().with_rows(10))
    }

    #[test]
    fn test_new_view_shows_all_displayable() {
        let mut table = ColumnTable::with_columns("t", &["A", "B"]).unwrap();
        table.push_column(TableColumn::new("__id").internal()).unwrap();
        let view = ColumnView::new(table);

        assert_eq!(view.visible_column_names(), vec!["A", "B"]);
        assert_eq!(view.column_visibility(TotalIndex(2)), None);
        assert!(!view.effective_visibility(TotalIndex(2)));
        assert_eq!(view.get_column_order_string(), None);
    }

    #[test]
    fn test_hidden_column_keeps_properties() {
        let mut view = view(&["A", "B", "C"]);
        view.set_column_width(TotalIndex(1), 140);
        view.set_text_wrapped(TotalIndex(1), true);
        view.set_column_renderer(TotalIndex(1), Some(RendererHandle(7)));

        view.set_manual_visibility(TotalIndex(1), false);
        assert_eq!(view.get_column_width(TotalIndex(1)), Some(140));
        assert!(view.is_text_wrapped(TotalIndex(1)));

        view.set_manual_visibility(TotalIndex(1), true);
        let column = &view.view_columns()[1];
        assert_eq!(column.name, "B");
        assert_eq!(column.properties.renderer, Some(RendererHandle(7)));
        assert_eq!(column.properties.width, 140);
    }

    #[test]
    fn test_width_clamped_to_minimum() {
        let mut view = view(&["A"]);
        view.set_column_width(TotalIndex(0), 2);
        assert_eq!(view.get_column_width(TotalIndex(0)), Some(15));
    }

    #[test]
    fn test_programmatic_moves_do_not_teach_order() {
        let mut view = view(&["A", "B", "C"]);
        view.set_column_order(&["C", "A", "B"]);
        assert_eq!(view.visible_column_names(), vec!["C", "A", "B"]);
        assert_eq!(view.intended_order(), ["C", "A", "B"]);
        assert!(!view.neglect_move_events);
    }

    #[test]
    fn test_user_move_teaches_order() {
        let mut view = view(&["A", "B", "C", "D"]);
        view.set_manual_visibility(TotalIndex(1), false);
        // view [A, C, D]; drag A to the end
        assert!(view.move_column(ViewIndex(0), ViewIndex(2)));
        assert_eq!(view.visible_column_names(), vec!["C", "D", "A"]);
        assert_eq!(view.intended_order(), ["B", "C", "D", "A"]);
        assert!(!view.move_column(ViewIndex(0), ViewIndex(3)));
    }

    #[test]
    fn test_selected_column_survives_hide() {
        let mut view = view(&["A", "B"]);
        view.set_column_selected(ViewIndex(1), true);
        view.set_manual_visibility(TotalIndex(1), false);
        assert!(view.is_column_selected(TotalIndex(1)));
        view.set_manual_visibility(TotalIndex(1), true);
        assert!(view.view_columns()[1].selected);
    }

    #[test]
    fn test_active_row_bounded_by_model() {
        let mut view = view(&["A"]);
        view.set_active_row(Some(3));
        assert_eq!(view.active_row(), Some(3));
        view.set_active_row(Some(30));
        assert_eq!(view.active_row(), None);
    }
}

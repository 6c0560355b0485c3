use std::fmt;

use crate::data::table_model::TableModel;

/// Position of a column in the full table model, including columns that are
/// never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TotalIndex(pub usize);

/// Dense position among the columns the model allows to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayableIndex(pub usize);

/// Left-to-right position among the currently visible columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewIndex(pub usize);

impl fmt::Display for TotalIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl fmt::Display for DisplayableIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

impl fmt::Display for ViewIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// Bookkeeping between the total, displayable and view coordinate systems.
///
/// The displayable mapping comes from the model and must be rebuilt after
/// every column insert or removal because total indices shift. The view
/// mapping is refreshed whenever the visible column sequence changes.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndexSpace {
    total_to_displayable: Vec<Option<DisplayableIndex>>,
    displayable_to_total: Vec<TotalIndex>,
    displayable_to_view: Vec<Option<ViewIndex>>,
    view_to_displayable: Vec<DisplayableIndex>,
}

impl ColumnIndexSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the total/displayable mapping from scratch. Clears the view
    /// mapping, callers follow up with [`ColumnIndexSpace::set_view_columns`].
    pub fn rebuild(&mut self, model: &dyn TableModel) {
        let count = model.column_count();
        self.total_to_displayable = Vec::with_capacity(count);
        self.displayable_to_total.clear();

        for total in (0..count).map(TotalIndex) {
            if model.is_displayable(total) {
                self.total_to_displayable
                    .push(Some(DisplayableIndex(self.displayable_to_total.len())));
                self.displayable_to_total.push(total);
            } else {
                self.total_to_displayable.push(None);
            }
        }

        self.displayable_to_view = vec![None; self.displayable_to_total.len()];
        self.view_to_displayable.clear();
    }

    /// Refresh the view mapping from the visible columns in left-to-right
    /// order. Columns that are not displayable are ignored.
    pub fn set_view_columns(&mut self, visible: impl IntoIterator<Item = TotalIndex>) {
        self.displayable_to_view = vec![None; self.displayable_to_total.len()];
        self.view_to_displayable.clear();

        for total in visible {
            let Some(displayable) = self.to_displayable(total) else {
                debug_assert!(false, "view column {} is not displayable", total);
                continue;
            };
            self.displayable_to_view[displayable.0] = Some(ViewIndex(self.view_to_displayable.len()));
            self.view_to_displayable.push(displayable);
        }
    }

    pub fn total_count(&self) -> usize {
        self.total_to_displayable.len()
    }

    pub fn displayable_count(&self) -> usize {
        self.displayable_to_total.len()
    }

    pub fn view_count(&self) -> usize {
        self.view_to_displayable.len()
    }

    pub fn to_displayable(&self, total: TotalIndex) -> Option<DisplayableIndex> {
        self.total_to_displayable.get(total.0).copied().flatten()
    }

    pub fn to_view(&self, displayable: DisplayableIndex) -> Option<ViewIndex> {
        self.displayable_to_view.get(displayable.0).copied().flatten()
    }

    pub fn to_total(&self, view: ViewIndex) -> Option<TotalIndex> {
        let displayable = self.view_to_displayable.get(view.0)?;
        self.displayable_total(*displayable)
    }

    pub fn displayable_total(&self, displayable: DisplayableIndex) -> Option<TotalIndex> {
        self.displayable_to_total.get(displayable.0).copied()
    }

    pub fn view_displayable(&self, view: ViewIndex) -> Option<DisplayableIndex> {
        self.view_to_displayable.get(view.0).copied()
    }

    /// Total index straight to view index, `None` when hidden or not
    /// displayable.
    pub fn total_to_view(&self, total: TotalIndex) -> Option<ViewIndex> {
        self.to_displayable(total).and_then(|d| self.to_view(d))
    }

    /// All displayable columns in total-index order.
    pub fn displayable_columns(&self) -> &[TotalIndex] {
        &self.displayable_to_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column_table::{ColumnTable, TableColumn};

    fn table() -> ColumnTable {
        let mut table = ColumnTable::new("t");
        table.push_column(TableColumn::new("A")).unwrap();
        table.push_column(TableColumn::new("__row_id").internal()).unwrap();
        table.push_column(TableColumn::new("B")).unwrap();
        table.push_column(TableColumn::new("C")).unwrap();
        table
    }

    #[test]
    fn test_displayable_skips_internal_columns() {
        let mut space = ColumnIndexSpace::new();
        space.rebuild(&table());

        assert_eq!(space.total_count(), 4);
        assert_eq!(space.displayable_count(), 3);
        assert_eq!(space.to_displayable(TotalIndex(0)), Some(DisplayableIndex(0)));
        assert_eq!(space.to_displayable(TotalIndex(1)), None);
        assert_eq!(space.to_displayable(TotalIndex(3)), Some(DisplayableIndex(2)));
        assert_eq!(space.to_displayable(TotalIndex(9)), None);
    }

    #[test]
    fn test_view_mapping_follows_visible_order() {
        let mut space = ColumnIndexSpace::new();
        space.rebuild(&table());
        space.set_view_columns([TotalIndex(3), TotalIndex(0)]);

        assert_eq!(space.view_count(), 2);
        assert_eq!(space.to_total(ViewIndex(0)), Some(TotalIndex(3)));
        assert_eq!(space.to_total(ViewIndex(1)), Some(TotalIndex(0)));
        assert_eq!(space.to_total(ViewIndex(2)), None);
        assert_eq!(space.total_to_view(TotalIndex(2)), None);
        assert_eq!(space.to_view(DisplayableIndex(2)), Some(ViewIndex(0)));
    }

    #[test]
    fn test_rebuild_clears_view_mapping() {
        let mut space = ColumnIndexSpace::new();
        space.rebuild(&table());
        space.set_view_columns([TotalIndex(0)]);
        space.rebuild(&table());
        assert_eq!(space.view_count(), 0);
        assert_eq!(space.total_to_view(TotalIndex(0)), None);
    }
}

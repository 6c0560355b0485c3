//! Structural change notifications sent by the table model

use crate::view::index_space::TotalIndex;

/// A change to the model that the column view has to reconcile.
///
/// The model is already in its new state when the event is delivered; the
/// view still holds its state from before the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The entire model was replaced
    NewTable,

    /// `count` columns were inserted starting at `at`
    ColumnsInserted { at: TotalIndex, count: usize },

    /// Columns were removed. `mapping[old]` is the new total index of the
    /// column previously at `old`, or `None` if it was removed.
    ColumnsRemoved { mapping: Vec<Option<TotalIndex>> },

    /// The column at `index` was renamed from `old_name`
    ColumnRenamed { index: TotalIndex, old_name: String },

    /// Content or header text changed; column order and count did not
    HeadersUpdated,

    /// Rows were removed or reordered. `mapping[old]` is the new row index.
    RowsRenumbered { mapping: Vec<Option<usize>> },
}

/// How a [`TableEvent`] is reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Column identity survives but total indices shift; snapshot by name
    Renumbering,
    /// Order and count are stable; snapshot by total index
    PureUpdate,
    /// Nothing from the previous model is meaningful
    NewTable,
    /// Only row positions moved
    RowsOnly,
}

impl TableEvent {
    pub fn kind(&self) -> ChangeKind {
        match self {
            TableEvent::NewTable => ChangeKind::NewTable,
            TableEvent::ColumnsInserted { .. }
            | TableEvent::ColumnsRemoved { .. }
            | TableEvent::ColumnRenamed { .. } => ChangeKind::Renumbering,
            TableEvent::HeadersUpdated => ChangeKind::PureUpdate,
            TableEvent::RowsRenumbered { .. } => ChangeKind::RowsOnly,
        }
    }
}

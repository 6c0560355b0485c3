//! Notifications the column view records for the rendering layer

use crate::view::index_space::ViewIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnViewEvent {
    /// A hidden column was put back into the view
    ColumnShown { name: String, at: ViewIndex },

    /// A view column was taken out of the view
    ColumnHidden { name: String, from: ViewIndex },

    /// A view column changed position, by the user or programmatically
    ColumnMoved {
        name: String,
        from: ViewIndex,
        to: ViewIndex,
    },

    /// Every view column was recreated after a structural change
    ViewRebuilt { columns: usize },

    /// The column filter text changed
    FilterChanged { text: String },
}

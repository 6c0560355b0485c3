//! Column visibility, ordering and state preservation for a table view
//!
//! [`column_view::ColumnView`] is the entry point. The other modules are
//! its parts: index bookkeeping, intended order, the visibility state
//! machine, the hidden column cache, the column filter and the row
//! selection bitset.

pub mod column_filter;
pub mod column_view;
pub mod events;
pub mod hidden_cache;
pub mod index_space;
pub mod intended_order;
pub mod layout;
pub mod selection_bitset;
pub mod structural;
pub mod view_column;
pub mod visibility;

pub use column_view::ColumnView;
pub use events::ColumnViewEvent;
pub use index_space::{DisplayableIndex, TotalIndex, ViewIndex};
pub use view_column::{ColumnProperties, RendererHandle};
pub use visibility::ColumnVisibility;

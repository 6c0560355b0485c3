//! Table model abstraction the column view sits on

pub mod column_table;
pub mod table_event;
pub mod table_model;

pub use column_table::{ColumnTable, TableColumn};
pub use table_event::{ChangeKind, TableEvent};
pub use table_model::TableModel;

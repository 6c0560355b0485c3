pub mod column_view_debug;
pub mod debug_registry;
pub mod debug_trace;

pub use column_view_debug::ColumnViewDebugProvider;
pub use debug_registry::DebugRegistry;
pub use debug_trace::{DebugSection, DebugTrace, SectionKind};

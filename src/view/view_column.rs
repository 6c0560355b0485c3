use serde::{Deserialize, Serialize};

use crate::view::index_space::TotalIndex;

/// Opaque handle to the cell renderer/formatter the rendering layer attached
/// to a column. The engine only carries it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererHandle(pub u32);

/// Per-column presentation state that has to survive hiding and rebuilds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProperties {
    pub renderer: Option<RendererHandle>,
    /// Width in pixels
    pub width: u32,
    pub wrap_text: bool,
}

impl ColumnProperties {
    pub fn with_width(width: u32) -> Self {
        Self {
            renderer: None,
            width,
            wrap_text: false,
        }
    }
}

/// A column currently shown in the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewColumn {
    pub total: TotalIndex,
    /// Unaliased model name at the time the column was materialized
    pub name: String,
    pub properties: ColumnProperties,
    pub selected: bool,
}

impl ViewColumn {
    pub fn new(total: TotalIndex, name: impl Into<String>, properties: ColumnProperties) -> Self {
        Self {
            total,
            name: name.into(),
            properties,
            selected: false,
        }
    }
}

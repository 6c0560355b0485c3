use serde::{Deserialize, Serialize};

/// Why a displayable column is or is not shown.
///
/// Manual hide and filter hide are tracked independently: showing a column
/// by hand clears both reasons, while filter changes never touch the manual
/// reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnVisibility {
    #[default]
    Shown,
    HiddenManually,
    HiddenByFilter,
    HiddenBoth,
}

impl ColumnVisibility {
    pub fn from_flags(manually_hidden: bool, hidden_by_filter: bool) -> Self {
        match (manually_hidden, hidden_by_filter) {
            (false, false) => ColumnVisibility::Shown,
            (true, false) => ColumnVisibility::HiddenManually,
            (false, true) => ColumnVisibility::HiddenByFilter,
            (true, true) => ColumnVisibility::HiddenBoth,
        }
    }

    pub fn is_manually_hidden(self) -> bool {
        matches!(
            self,
            ColumnVisibility::HiddenManually | ColumnVisibility::HiddenBoth
        )
    }

    pub fn is_hidden_by_filter(self) -> bool {
        matches!(
            self,
            ColumnVisibility::HiddenByFilter | ColumnVisibility::HiddenBoth
        )
    }

    /// Effective visibility: neither reason applies
    pub fn is_visible(self) -> bool {
        !self.is_manually_hidden() && !self.is_hidden_by_filter()
    }

    /// User show/hide. Showing overrides the filter, hiding leaves the
    /// filter reason as it was.
    pub fn with_manual(self, visible: bool) -> Self {
        if visible {
            ColumnVisibility::Shown
        } else {
            Self::from_flags(true, self.is_hidden_by_filter())
        }
    }

    /// Filter result for the column. The manual reason is preserved.
    pub fn with_filter(self, visible: bool) -> Self {
        Self::from_flags(self.is_manually_hidden(), !visible)
    }
}

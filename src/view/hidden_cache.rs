use std::collections::HashMap;
use tracing::debug;

use crate::view::index_space::ViewIndex;
use crate::view::view_column::ColumnProperties;
use crate::view::visibility::ColumnVisibility;

/// Everything needed to put a hidden column back exactly as it was
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenColumnRecord {
    pub properties: ColumnProperties,
    /// Where the column sat before it was hidden
    pub last_view_index: ViewIndex,
    pub selected: bool,
    pub visibility: ColumnVisibility,
}

impl HiddenColumnRecord {
    pub fn is_manually_hidden(&self) -> bool {
        self.visibility.is_manually_hidden()
    }

    pub fn is_hidden_by_filter(&self) -> bool {
        self.visibility.is_hidden_by_filter()
    }
}

/// Hidden column records keyed by unaliased column name. A column has a
/// record exactly while it is displayable and not in the view.
#[derive(Debug, Clone, Default)]
pub struct HiddenColumnCache {
    records: HashMap<String, HiddenColumnRecord>,
}

impl HiddenColumnCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&HiddenColumnRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut HiddenColumnRecord> {
        self.records.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, record: HiddenColumnRecord) {
        debug_assert!(
            !record.visibility.is_visible(),
            "hidden record for a visible column"
        );
        let name = name.into();
        let previous = self.records.insert(name, record);
        debug_assert!(previous.is_none(), "column already had a hidden record");
    }

    pub fn remove(&mut self, name: &str) -> Option<HiddenColumnRecord> {
        self.records.remove(name)
    }

    /// Move a record to a new key after a rename
    pub fn rename(&mut self, old_name: &str, new_name: &str) {
        if let Some(record) = self.records.remove(old_name) {
            self.records.insert(new_name.to_string(), record);
        }
    }

    /// Drop records whose column no longer resolves. Returns the dropped
    /// names, sorted.
    pub fn sweep<F>(&mut self, mut resolves: F) -> Vec<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut stale: Vec<String> = self
            .records
            .keys()
            .filter(|name| !resolves(name))
            .cloned()
            .collect();
        stale.sort();

        for name in &stale {
            debug!(target: "structure", "Dropping hidden record for vanished column '{}'", name);
            self.records.remove(name);
        }
        stale
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HiddenColumnRecord)> {
        self.records.iter()
    }
}

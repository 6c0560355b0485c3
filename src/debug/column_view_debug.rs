use crate::data::table_model::TableModel;
use crate::debug::debug_trace::{DebugSection, DebugTrace, SectionKind};
use crate::view::column_view::ColumnView;
use crate::view::index_space::ViewIndex;

/// Debug snapshot of a [`ColumnView`]: index spaces, intended order,
/// hidden records and selection. Captured when created, since the view
/// itself lives on the UI thread.
pub struct ColumnViewDebugProvider {
    name: String,
    sections: Vec<DebugSection>,
    summary: String,
}

impl ColumnViewDebugProvider {
    pub fn capture<M: TableModel>(view: &ColumnView<M>) -> Self {
        Self::capture_named("ColumnView", view)
    }

    /// Capture under a custom provider name, so several views can sit in
    /// one registry
    pub fn capture_named<M: TableModel>(name: impl Into<String>, view: &ColumnView<M>) -> Self {
        let hidden = view.hidden_column_names();
        let space = view.index_space();

        let summary = format!(
            "{} of {} displayable columns visible, {} hidden",
            space.view_count(),
            space.displayable_count(),
            hidden.len()
        );

        Self {
            name: name.into(),
            sections: vec![
                index_spaces(view),
                intended_order(view),
                hidden_columns(view, &hidden),
                selection(view),
            ],
            summary,
        }
    }
}

fn index_spaces<M: TableModel>(view: &ColumnView<M>) -> DebugSection {
    let space = view.index_space();
    let rows = view.view_columns().iter().enumerate().map(|(idx, column)| {
        let displayable = space
            .view_displayable(ViewIndex(idx))
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "V[{:3}] → {} → {} : {} ({}px{}{})",
            idx,
            displayable,
            column.total,
            column.name,
            column.properties.width,
            if column.properties.wrap_text { ", wrap" } else { "" },
            if column.selected { ", selected" } else { "" },
        )
    });

    DebugSection::new(SectionKind::IndexSpaces)
        .field("Total Columns", space.total_count())
        .field("Displayable Columns", space.displayable_count())
        .field("View Columns", space.view_count())
        .items(rows)
}

fn intended_order<M: TableModel>(view: &ColumnView<M>) -> DebugSection {
    let native = view.get_column_order_string().is_none();
    DebugSection::new(SectionKind::IntendedOrder)
        .line(view.intended_order().join(" | "))
        .line(if native { "(native order)" } else { "(custom order)" })
}

fn hidden_columns<M: TableModel>(view: &ColumnView<M>, hidden: &[String]) -> DebugSection {
    let records = hidden.iter().filter_map(|name| {
        view.hidden_record(name).map(|record| {
            format!(
                "{} : {:?}, was {}, {}px",
                name, record.visibility, record.last_view_index, record.properties.width
            )
        })
    });

    DebugSection::new(SectionKind::HiddenColumns)
        .field("Filter", format!("{:?}", view.get_column_filter_text()))
        .items(records)
}

fn selection<M: TableModel>(view: &ColumnView<M>) -> DebugSection {
    let selected_columns: Vec<&str> = view
        .view_columns()
        .iter()
        .filter(|c| c.selected)
        .map(|c| c.name.as_str())
        .collect();

    DebugSection::new(SectionKind::Selection)
        .field("Selected Rows", format!("{:?}", view.selected_rows()))
        .field("Active Row", format!("{:?}", view.active_row()))
        .field("Selected Columns", format!("{:?}", selected_columns))
}

impl DebugTrace for ColumnViewDebugProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn debug_sections(&self) -> Vec<DebugSection> {
        self.sections.clone()
    }

    fn debug_summary(&self) -> Option<String> {
        Some(self.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::column_table::ColumnTable;
    use crate::debug::debug_registry::DebugRegistry;
    use crate::view::index_space::TotalIndex;
    use std::sync::Arc;

    fn view() -> ColumnView<ColumnTable> {
        ColumnView::new(ColumnTable::with_columns("t", &["A", "B", "C"]).unwrap())
    }

    #[test]
    fn test_report_lists_hidden_columns() {
        let mut view = view();
        view.set_manual_visibility(TotalIndex(1), false);

        let registry = DebugRegistry::new();
        registry.register(Arc::new(ColumnViewDebugProvider::capture(&view)));

        let report = registry.generate_debug_report();
        assert!(report.contains("INDEX SPACES"));
        assert!(report.contains("  B : HiddenManually, was V1, 75px"));
        assert_eq!(
            registry.collect_summaries(),
            vec![(
                "ColumnView".to_string(),
                "2 of 3 displayable columns visible, 1 hidden".to_string()
            )]
        );
    }

    #[test]
    fn test_sections_follow_kind_order() {
        let provider = ColumnViewDebugProvider::capture(&view());
        let kinds: Vec<SectionKind> = provider.debug_sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::IndexSpaces,
                SectionKind::IntendedOrder,
                SectionKind::HiddenColumns,
                SectionKind::Selection,
            ]
        );

        let hidden = &provider.debug_sections()[2];
        assert_eq!(hidden.lines, vec!["Filter: \"\"", "  None"]);
    }
}

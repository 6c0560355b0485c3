// ColumnView Debug Binary - walks the view through hide/filter/order scenarios
// Run with: cargo run --bin column_view_debug
// Set RUST_LOG=trace for the full structural log

use std::sync::Arc;

use anyhow::Result;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use column_view::data::column_table::{ColumnTable, TableColumn};
use column_view::data::table_model::TableModel;
use column_view::debug::{ColumnViewDebugProvider, DebugRegistry};
use column_view::utils::logging::init_tracing;
use column_view::view::column_view::ColumnView;
use column_view::view::index_space::TotalIndex;

fn print_view(label: &str, view: &ColumnView<ColumnTable>) {
    println!("{label}");

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("View").add_attribute(Attribute::Bold),
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Width").add_attribute(Attribute::Bold),
    ]);

    for (idx, column) in view.view_columns().iter().enumerate() {
        table.add_row(vec![
            idx.to_string(),
            column.total.to_string(),
            column.name.clone(),
            view.model()
                .column_title(column.total)
                .unwrap_or_default()
                .to_string(),
            column.properties.width.to_string(),
        ]);
    }

    println!("{table}");
    let hidden = view.hidden_column_names();
    if !hidden.is_empty() {
        println!("  hidden: {}", hidden.join(", "));
    }
    println!();
}

fn hide_then_filter(registry: &DebugRegistry) -> Result<()> {
    println!("Scenario 1: manual hide survives a filter round trip");
    println!("─────────────────────────────────────────────────────");

    let table = ColumnTable::with_columns("compounds", &["A", "B", "C", "D"])?.with_rows(10);
    let mut view = ColumnView::new(table);
    print_view("Initial:", &view);

    view.set_manual_visibility(TotalIndex(1), false);
    print_view("After hiding B:", &view);

    view.set_column_filter_text("C");
    print_view("Filter \"C\":", &view);

    view.set_column_filter_text("");
    print_view("Filter cleared:", &view);

    registry.register(Arc::new(ColumnViewDebugProvider::capture(&view)));
    Ok(())
}

fn reinsert_after_structure_change(registry: &DebugRegistry) -> Result<()> {
    println!("Scenario 2: intended order across an insert");
    println!("───────────────────────────────────────────");

    let table = ColumnTable::with_columns("compounds", &["A", "B", "C", "D"])?.with_rows(10);
    let mut view = ColumnView::new(table);

    view.set_column_order(&["D", "B", "A", "C"]);
    print_view("Order D,B,A,C:", &view);

    view.set_manual_visibility(TotalIndex(0), false);
    print_view("After hiding A:", &view);

    let event = view
        .model_mut()
        .insert_column(TotalIndex(2), TableColumn::new("E"))?;
    view.table_changed(event);
    print_view("After inserting E at T2:", &view);

    view.set_manual_visibility(TotalIndex(0), true);
    print_view("After showing A:", &view);

    println!("Order string: {:?}\n", view.get_column_order_string());

    registry.register(Arc::new(ColumnViewDebugProvider::capture_named(
        "Reinsertion",
        &view,
    )));
    Ok(())
}

fn regex_filters() -> Result<()> {
    println!("Scenario 3: filter expressions");
    println!("──────────────────────────────");

    let columns = vec![
        TableColumn::new("__row_id").internal(),
        TableColumn::new("struct").with_alias("Structure"),
        TableColumn::new("sol").with_alias("Solubility"),
        TableColumn::new("mw").with_alias("MW"),
    ];
    let mut table = ColumnTable::new("assay");
    table.replace_columns(columns)?;
    let mut view = ColumnView::new(table.with_rows(3));

    for expression in ["regex:^S.*", "regex:S", "Sol,MW", "regex:(unterminated", ""] {
        view.set_column_filter_text(expression);
        print_view(&format!("Filter {expression:?}:"), &view);
    }
    Ok(())
}

fn main() -> Result<()> {
    let logs = init_tracing();

    println!("=== ColumnView Debug ===\n");

    let registry = DebugRegistry::new();
    hide_then_filter(&registry)?;
    reinsert_after_structure_change(&registry)?;
    regex_filters()?;

    println!("=== Debug Report ===");
    for (name, summary) in registry.collect_summaries() {
        println!("{name}: {summary}");
    }
    println!("{}", registry.generate_debug_report());

    println!("=== Recent Logs ===");
    for entry in logs.get_recent(40) {
        println!("{}", entry.format_for_display());
    }

    Ok(())
}

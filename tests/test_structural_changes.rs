// Test that view state survives inserts, removals, renames and new tables

use column_view::data::column_table::{ColumnTable, TableColumn};
use column_view::view::column_view::ColumnView;
use column_view::view::events::ColumnViewEvent;
use column_view::view::index_space::{TotalIndex, ViewIndex};

fn create_test_view() -> ColumnView<ColumnTable> {
    let table = ColumnTable::with_columns("test", &["A", "B", "C", "D"])
        .unwrap()
        .with_rows(10);
    ColumnView::new(table)
}

fn insert(view: &mut ColumnView<ColumnTable>, at: usize, name: &str) {
    let event = view
        .model_mut()
        .insert_column(TotalIndex(at), TableColumn::new(name))
        .unwrap();
    view.table_changed(event);
}

#[test]
fn test_inserted_column_joins_intended_order_at_the_end() {
    let mut view = create_test_view();
    view.set_column_order(&["D", "B", "A", "C"]);
    view.set_manual_visibility(TotalIndex(0), false);
    assert_eq!(view.visible_column_names(), vec!["D", "B", "C"]);

    insert(&mut view, 2, "E");
    assert_eq!(view.intended_order(), ["D", "B", "A", "C", "E"]);
    assert_eq!(view.visible_column_names(), vec!["D", "B", "C", "E"]);
    assert!(view.is_manually_hidden(TotalIndex(0)));

    view.set_manual_visibility(TotalIndex(0), true);
    assert_eq!(view.visible_column_names(), vec!["D", "B", "A", "C", "E"]);
    assert_eq!(
        view.get_column_order_string().as_deref(),
        Some("D\tB\tA\tC\tE")
    );
}

#[test]
fn test_insert_keeps_widths_and_column_selection_by_name() {
    let mut view = create_test_view();
    view.set_column_width(TotalIndex(2), 180);
    view.set_column_selected(ViewIndex(2), true);

    insert(&mut view, 0, "Z");

    // C moved from T2 to T3
    assert_eq!(view.get_column_width(TotalIndex(3)), Some(180));
    assert!(view.is_column_selected(TotalIndex(3)));
    assert!(!view.is_column_selected(TotalIndex(0)));
}

#[test]
fn test_row_selection_survives_rebuild() {
    let mut view = create_test_view();
    view.set_row_selected(2, true);
    view.set_row_selected(5, true);

    insert(&mut view, 1, "E");

    assert_eq!(view.selected_rows(), vec![2, 5]);
    assert!(view
        .take_events()
        .iter()
        .any(|e| matches!(e, ColumnViewEvent::ViewRebuilt { columns: 5 })));
}

#[test]
fn test_removed_rows_remap_selection_and_active_row() {
    let mut view = create_test_view();
    view.set_row_selected(2, true);
    view.set_row_selected(5, true);
    view.set_row_selected(3, true);
    view.set_active_row(Some(5));

    let event = view.model_mut().remove_rows(&[0, 3]);
    view.table_changed(event);

    assert_eq!(view.selected_rows(), vec![1, 3]);
    assert_eq!(view.active_row(), Some(3));
}

#[test]
fn test_active_row_cleared_when_its_row_goes() {
    let mut view = create_test_view();
    view.set_active_row(Some(4));

    let event = view.model_mut().remove_rows(&[4]);
    view.table_changed(event);

    assert_eq!(view.active_row(), None);
}

#[test]
fn test_removing_hidden_column_sweeps_its_record() {
    let mut view = create_test_view();
    view.set_column_width(TotalIndex(3), 222);
    view.set_manual_visibility(TotalIndex(1), false);
    assert!(view.hidden_record("B").is_some());

    let event = view.model_mut().remove_column_by_name("B").unwrap();
    view.table_changed(event);

    assert!(view.hidden_record("B").is_none());
    assert!(view.hidden_column_names().is_empty());
    assert_eq!(view.intended_order(), ["A", "C", "D"]);
    assert_eq!(view.visible_column_names(), vec!["A", "C", "D"]);
    assert_eq!(view.get_column_width(TotalIndex(2)), Some(222));
}

#[test]
fn test_removing_visible_columns_keeps_custom_order() {
    let mut view = create_test_view();
    view.set_column_order(&["D", "C", "B", "A"]);

    let event = view
        .model_mut()
        .remove_columns(&[TotalIndex(0), TotalIndex(2)]);
    view.table_changed(event);

    assert_eq!(view.visible_column_names(), vec!["D", "B"]);
    assert_eq!(view.intended_order(), ["D", "B"]);
}

#[test]
fn test_same_name_after_remove_starts_fresh() {
    let mut view = create_test_view();
    view.set_manual_visibility(TotalIndex(1), false);

    let event = view.model_mut().remove_column_by_name("B").unwrap();
    view.table_changed(event);
    insert(&mut view, 1, "B");

    assert!(!view.is_manually_hidden(TotalIndex(1)));
    assert_eq!(view.get_column_width(TotalIndex(1)), Some(75));
}

#[test]
fn test_filter_applies_only_to_new_columns_after_insert() {
    let mut view = create_test_view();
    view.set_column_filter_text("A,E");
    // Manual show overrides the filter for B
    view.set_manual_visibility(TotalIndex(1), true);
    assert_eq!(view.visible_column_names(), vec!["A", "B"]);

    insert(&mut view, 4, "E");
    insert(&mut view, 5, "F");

    assert_eq!(view.visible_column_names(), vec!["A", "B", "E"]);
    assert!(view.is_hidden_by_filter(TotalIndex(5)));
}

#[test]
fn test_rename_carries_state_to_new_name() {
    let mut view = create_test_view();
    view.set_column_width(TotalIndex(2), 150);
    view.move_column(ViewIndex(2), ViewIndex(0));

    let event = view
        .model_mut()
        .rename_column(TotalIndex(2), "Gamma")
        .unwrap();
    view.table_changed(event);

    assert_eq!(view.visible_column_names(), vec!["Gamma", "A", "B", "D"]);
    assert_eq!(view.get_column_width(TotalIndex(2)), Some(150));
    assert_eq!(view.intended_order(), ["Gamma", "A", "B", "D"]);
}

#[test]
fn test_alias_change_keeps_view_in_place() {
    let mut view = create_test_view();
    view.set_manual_visibility(TotalIndex(0), false);
    view.move_column(ViewIndex(2), ViewIndex(0));
    view.set_column_width(TotalIndex(1), 99);

    let event = view
        .model_mut()
        .set_alias(TotalIndex(1), Some("Bravo".to_string()))
        .unwrap();
    view.table_changed(event);

    assert_eq!(view.visible_column_names(), vec!["D", "B", "C"]);
    assert_eq!(view.get_column_width(TotalIndex(1)), Some(99));
    assert!(view.is_manually_hidden(TotalIndex(0)));
}

#[test]
fn test_alias_change_reruns_filter_for_hidden_columns() {
    let mut view = create_test_view();
    view.set_column_filter_text("Bravo");
    assert!(view.visible_column_names().is_empty());
    // Manual show of C overrides the filter
    view.set_manual_visibility(TotalIndex(2), true);

    let event = view
        .model_mut()
        .set_alias(TotalIndex(1), Some("Bravo".to_string()))
        .unwrap();
    view.table_changed(event);

    assert_eq!(view.visible_column_names(), vec!["B", "C"]);
    assert!(!view.is_hidden_by_filter(TotalIndex(1)));
    assert!(view.is_hidden_by_filter(TotalIndex(3)));
}

#[test]
fn test_new_table_resets_state_and_reapplies_filter() {
    let mut view = create_test_view();
    view.set_manual_visibility(TotalIndex(0), false);
    view.set_column_order(&["D", "C"]);
    view.set_column_filter_text("A,X");

    let event = view
        .model_mut()
        .replace_columns(vec![
            TableColumn::new("X"),
            TableColumn::new("A"),
            TableColumn::new("Y"),
        ])
        .unwrap();
    view.table_changed(event);

    assert_eq!(view.visible_column_names(), vec!["X", "A"]);
    assert_eq!(view.hidden_column_names(), vec!["Y".to_string()]);
    assert!(!view.is_manually_hidden(TotalIndex(1)));
    assert_eq!(view.get_column_order_string(), None);
}

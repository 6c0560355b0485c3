// Test loading and saving the column view config file

use column_view::config::config::{Config, InvalidPatternPolicy};
use column_view::data::column_table::ColumnTable;
use column_view::view::column_view::ColumnView;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.columns.default_width = 120;
    config.columns.order_delimiter = ";".to_string();
    config.filter.invalid_pattern = InvalidPatternPolicy::ShowAll;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_commented_default_loads_as_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, Config::create_default_with_comments()).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_invalid_values_are_repaired() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[columns]\ndefault_width = 5\nmin_width = 20\norder_delimiter = \"\"\n",
    )
    .unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.columns.default_width, 20);
    assert_eq!(loaded.columns.order_delimiter, "\t");
}

#[test]
fn test_empty_regex_prefix_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[filter]\nregex_prefix = \"\"\n").unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.filter.regex_prefix, "regex:");

    // Plain text stays a substring filter instead of becoming a pattern
    let table = ColumnTable::with_columns("test", &["MW", "LogP", "MW_calc"]).unwrap();
    let mut view = ColumnView::with_config(table, loaded);
    view.set_column_filter_text("MW");
    assert_eq!(view.visible_column_names(), vec!["MW", "MW_calc"]);
}

#[test]
fn test_unknown_policy_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[filter]\ninvalid_pattern = \"explode\"\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
}

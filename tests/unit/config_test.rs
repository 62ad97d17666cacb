//! Tests for board configuration loading

use std::fs;

use kanban::config::{BoardConfig, ConfigError};
use kanban::core::models::{NewProject, ProjectStatus, Rule};
use kanban::core::services::{FieldInput, TEXT_PLAIN};
use tempfile::TempDir;

const CUSTOM: &str = r#"
[project]
id_prefix = "OPS"

[form]
schema = "Ticket"

[[form.field]]
name = "title"
rules = ["required", "rangeString"]
min = 3
max = 20

[[form.field]]
name = "people"
rules = ["range-int", "positive"]
min = 1
max = 3

[[column]]
tag = "todo"
status = "active"
title = "To do"

[[column]]
tag = "done"
status = "done"
"#;

#[test]
fn test_parse_custom_config() {
    let config = BoardConfig::parse(CUSTOM).unwrap();

    assert_eq!(config.project.id_prefix, "OPS");
    assert_eq!(config.form.schema, "Ticket");
    assert_eq!(config.columns[0].display_title(), "To do");
    assert_eq!(config.columns[1].display_title(), "DONE PROJECTS");
    assert_eq!(config.columns[1].project_status().unwrap(), ProjectStatus::Finished);
    assert_eq!(config.columns[1].accepts, vec![TEXT_PLAIN.to_string()]);
}

#[test]
fn test_custom_config_builds_parts() {
    let config = BoardConfig::parse(CUSTOM).unwrap();

    let registry = config.build_registry().unwrap();
    assert_eq!(
        registry.rules("Ticket", "people"),
        Some(&[Rule::RangeInt { min: 1, max: 3 }, Rule::Positive][..])
    );
    let input: FieldInput = [("title".to_string(), "Fix".to_string())].into_iter().collect();
    assert!(registry.evaluate("Ticket", &input).valid);

    let mut store = config.build_store();
    assert_eq!(store.add(NewProject::new("a", "b", 1)).id, "OPS-1");

    let drag = config.build_drag().unwrap();
    assert_eq!(drag.containers().len(), 2);
    assert_eq!(drag.container("done").map(|c| c.status), Some(ProjectStatus::Finished));
}

#[test]
fn test_empty_file_gives_defaults() {
    assert_eq!(BoardConfig::parse("").unwrap(), BoardConfig::default());
}

#[test]
fn test_missing_bounds_is_an_error() {
    let err = BoardConfig::parse(
        r#"
[[form.field]]
name = "people"
rules = ["range_int"]
"#,
    )
    .unwrap()
    .build_registry()
    .unwrap_err();

    assert!(matches!(err, ConfigError::Rule { ref field, .. } if field == "people"));
}

#[test]
fn test_no_columns_is_an_error() {
    let mut config = BoardConfig::default();
    config.columns.clear();
    assert!(matches!(config.build_drag(), Err(ConfigError::NoColumns)));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    assert!(matches!(BoardConfig::parse("[project"), Err(ConfigError::Parse(_))));
}

#[test]
fn test_load_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("board.toml");
    fs::write(&path, CUSTOM).unwrap();

    let config = BoardConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.project.id_prefix, "OPS");
}

#[test]
fn test_load_missing_explicit_file() {
    let temp = TempDir::new().unwrap();
    let err = BoardConfig::load(Some(temp.path().join("nope.toml").as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_toml_round_trip_keeps_defaults() {
    let config = BoardConfig::default();
    let text = config.to_toml().unwrap();
    assert!(text.contains("id_prefix = \"PRJ\""));
    assert_eq!(BoardConfig::parse(&text).unwrap(), config);
}

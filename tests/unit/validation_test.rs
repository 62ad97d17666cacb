//! Tests for the validation registry

use kanban::config::BoardConfig;
use kanban::core::models::Rule;
use kanban::core::services::{FieldValue, SchemaError, ValidationRegistry, Violation};

use crate::common::input;

fn project_registry() -> ValidationRegistry {
    BoardConfig::default().build_registry().unwrap()
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_builder_registers_in_order() {
    let mut registry = ValidationRegistry::new();
    registry
        .schema("Signup")
        .field("name", [Rule::Required])
        .unwrap()
        .field("age", [Rule::RangeInt { min: 18, max: 99 }])
        .unwrap();

    let names: Vec<&str> = registry.fields("Signup").iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["name", "age"]);
    assert_eq!(registry.schema_names(), vec!["Signup"]);
}

#[test]
fn test_reregistering_replaces_rules_in_place() {
    let mut registry = ValidationRegistry::new();
    registry.register_field("Form", "a", [Rule::Required]).unwrap();
    registry.register_field("Form", "b", [Rule::Required]).unwrap();
    registry.register_field("Form", "a", [Rule::Positive]).unwrap();

    let fields = registry.fields("Form");
    assert_eq!(fields[0], ("a", &[Rule::Positive][..]));
    assert_eq!(fields.len(), 2);
}

#[test]
fn test_registration_rejects_bad_bounds() {
    let mut registry = ValidationRegistry::new();
    let err = registry
        .register_field("Form", "n", [Rule::RangeInt { min: 10, max: 1 }])
        .unwrap_err();
    assert!(matches!(err, SchemaError::Rule { .. }));
    assert!(registry.rules("Form", "n").is_none());
}

#[test]
fn test_registration_rejects_empty_name_and_rules() {
    let mut registry = ValidationRegistry::new();
    assert!(matches!(
        registry.register_field("Form", " ", [Rule::Required]),
        Err(SchemaError::EmptyFieldName { .. })
    ));
    assert!(matches!(
        registry.register_field("Form", "x", Vec::<Rule>::new()),
        Err(SchemaError::NoRules { .. })
    ));
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_valid_project_input() {
    let report = project_registry().evaluate(
        "ProjectInput",
        &input(&[
            ("title", "  Build the new website  "),
            ("description", "Landing page and blog"),
            ("people", "7"),
        ]),
    );

    assert!(report.valid);
    assert!(report.errors.is_empty());
    assert_eq!(report.values.text("title"), Some("Build the new website"));
    assert_eq!(report.values.get("people"), Some(&FieldValue::Number(7)));
}

#[test]
fn test_short_title_and_small_team() {
    let report = project_registry().evaluate(
        "ProjectInput",
        &input(&[("title", "Short"), ("description", "Long enough description"), ("people", "2")]),
    );

    assert!(!report.valid);
    assert_eq!(
        report.messages(),
        vec![
            "title field's length is not between 10 and 40",
            "title field's value is not long enough (at least 10 characters)",
            "people field's value is not between 5 and 40",
        ]
    );
}

#[test]
fn test_all_blank_reports_required_per_field() {
    let report = project_registry().evaluate(
        "ProjectInput",
        &input(&[("title", ""), ("description", "   "), ("people", "")]),
    );

    assert_eq!(
        report.errors,
        vec![
            Violation::Required {
                field: "title".to_string()
            },
            Violation::Required {
                field: "description".to_string()
            },
            Violation::Required {
                field: "people".to_string()
            },
        ]
    );
}

#[test]
fn test_missing_field_counts_as_blank() {
    let report = project_registry().evaluate("ProjectInput", &input(&[]));
    assert_eq!(report.errors.len(), 3);
    assert!(report.errors.iter().all(|e| matches!(e, Violation::Required { .. })));
}

#[test]
fn test_blank_optional_field_is_valid() {
    let mut registry = ValidationRegistry::new();
    registry
        .register_field("Form", "nickname", [Rule::RangeString { min: 2, max: 8 }])
        .unwrap();

    let report = registry.evaluate("Form", &input(&[("nickname", "  ")]));
    assert!(report.valid);
    assert_eq!(report.values.get("nickname"), Some(&FieldValue::Absent));
}

#[test]
fn test_negative_people_fails_range_and_positive() {
    let report = project_registry().evaluate(
        "ProjectInput",
        &input(&[("title", "A proper title"), ("description", "Long enough description"), ("people", "-3")]),
    );

    let fields: Vec<&str> = report.errors.iter().map(Violation::field).collect();
    assert_eq!(fields, vec!["people", "people"]);
    assert!(matches!(report.errors[1], Violation::NotPositive { .. }));
}

#[test]
fn test_zero_counts_as_positive() {
    let mut registry = ValidationRegistry::new();
    registry.register_field("Form", "n", [Rule::Positive]).unwrap();
    assert!(registry.evaluate("Form", &input(&[("n", "0")])).valid);
    assert!(!registry.evaluate("Form", &input(&[("n", "-1")])).valid);
}

#[test]
fn test_extra_input_is_ignored() {
    let mut registry = ValidationRegistry::new();
    registry.register_field("Form", "n", [Rule::Required]).unwrap();
    let report = registry.evaluate("Form", &input(&[("n", "1"), ("other", "")]));
    assert!(report.valid);
    assert!(report.values.get("other").is_none());
}

#[test]
fn test_length_counts_characters_not_bytes() {
    let mut registry = ValidationRegistry::new();
    registry
        .register_field("Form", "t", [Rule::RangeString { min: 1, max: 3 }])
        .unwrap();
    assert!(registry.evaluate("Form", &input(&[("t", "äöü")])).valid);
}

#[test]
fn test_report_serializes_violation_kind() {
    let report = project_registry().evaluate("ProjectInput", &input(&[]));
    let json = serde_json::to_value(&report.errors[0]).unwrap();
    assert_eq!(json["kind"], "required");
    assert_eq!(json["field"], "title");
}

#[test]
fn test_title_rules_from_registration_to_valid() {
    let mut registry = ValidationRegistry::new();
    registry
        .schema("ProjectInput")
        .field("title", [Rule::Required, Rule::RangeString { min: 10, max: 40 }])
        .unwrap();

    let empty = registry.evaluate("ProjectInput", &input(&[("title", "")]));
    assert!(!empty.valid);
    assert!(empty.messages()[0].contains("required"));

    let short = registry.evaluate("ProjectInput", &input(&[("title", "short")]));
    assert!(!short.valid);
    assert!(short.messages()[0].contains("between 10 and 40"));

    let long = registry.evaluate("ProjectInput", &input(&[("title", "a sufficiently long title")]));
    assert!(long.valid);
}

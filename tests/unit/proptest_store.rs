//! Property-based tests for the store and validation registry
//!
//! Uses proptest to verify properties that should hold for all inputs.

use std::collections::HashSet;

use kanban::core::models::{NewProject, Project, ProjectStatus, Rule};
use kanban::core::services::{FieldInput, ReactiveStore, ValidationRegistry};
use proptest::prelude::*;

fn registry() -> ValidationRegistry {
    let mut registry = ValidationRegistry::new();
    registry
        .register_field("Form", "people", [Rule::Required, Rule::RangeInt { min: 1, max: 10 }, Rule::Positive])
        .unwrap();
    registry
        .register_field("Form", "title", [Rule::Required, Rule::RangeString { min: 3, max: 12 }])
        .unwrap();
    registry
}

proptest! {
    /// Every add grows the store by one and ids never repeat
    #[test]
    fn ids_are_unique(titles in prop::collection::vec("[a-z]{1,8}", 1..30)) {
        let mut store: ReactiveStore<Project> = ReactiveStore::new();
        let mut ids = HashSet::new();
        for (i, title) in titles.iter().enumerate() {
            let project = store.add(NewProject::new(title.clone(), "d", 1));
            prop_assert_eq!(store.len(), i + 1);
            prop_assert!(ids.insert(project.id));
        }
    }

    /// Moves only ever touch the named project
    #[test]
    fn move_touches_one_project(count in 1usize..10, pick in 0usize..10) {
        let mut store: ReactiveStore<Project> = ReactiveStore::new();
        for i in 0..count {
            store.add(NewProject::new(format!("p{i}"), "d", 1));
        }
        let target = format!("PRJ-{}", pick % count + 1);
        prop_assert!(store.move_status(&target, ProjectStatus::Finished));

        for project in store.snapshot().iter() {
            let expected = if project.id == target { ProjectStatus::Finished } else { ProjectStatus::Active };
            prop_assert_eq!(project.status(), expected);
        }
    }

    /// Evaluating the same input twice gives the same report
    #[test]
    fn evaluation_is_idempotent(people in "\\PC{0,6}", title in "\\PC{0,16}") {
        let registry = registry();
        let input: FieldInput = [("people".to_string(), people), ("title".to_string(), title)]
            .into_iter()
            .collect();
        prop_assert_eq!(registry.evaluate("Form", &input), registry.evaluate("Form", &input));
    }

    /// Any in-range integer passes the people rules
    #[test]
    fn in_range_people_is_valid(n in 1i64..=10) {
        let input: FieldInput = [("people".to_string(), n.to_string()), ("title".to_string(), "Title".to_string())]
            .into_iter()
            .collect();
        prop_assert!(registry().evaluate("Form", &input).valid);
    }
}

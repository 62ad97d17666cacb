//! Tests for the board facade and its render surface wiring

use std::cell::RefCell;
use std::rc::Rc;

use kanban::board::{Board, SubmitOutcome};
use kanban::config::BoardConfig;
use kanban::core::models::{NewProject, Project, ProjectStatus, Rule};
use kanban::core::services::{
    CancelReason, Container, DragExchange, DragState, ReactiveStore, Snapshot, Transition,
    ValidationRegistry, Violation,
};

use crate::common::mocks::RecordingSurface;
use crate::common::{default_board, input, valid_input};

// =============================================================================
// Store lifecycle
// =============================================================================

#[test]
fn test_listener_sees_add_then_move() {
    let mut store: ReactiveStore<Project> = ReactiveStore::new();
    let seen: Rc<RefCell<Vec<Vec<ProjectStatus>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |projects: &Snapshot<Project>| {
        sink.borrow_mut().push(projects.iter().map(Project::status).collect());
    });

    let id = store.add(NewProject::new("T", "D", 3)).id;
    assert_eq!(store.snapshot().len(), 1);
    store.move_status(&id, ProjectStatus::Finished);

    assert_eq!(
        *seen.borrow(),
        vec![vec![ProjectStatus::Active], vec![ProjectStatus::Finished]]
    );
}

// =============================================================================
// Form submission
// =============================================================================

#[test]
fn test_valid_submission_creates_project() {
    let (mut board, surface) = default_board();

    let outcome = board.submit_form(&valid_input("Build the new website"));
    let SubmitOutcome::Created(project) = outcome else {
        panic!("expected a created project");
    };

    assert_eq!(project.id, "PRJ-1");
    assert_eq!(project.people, 5);
    assert_eq!(project.status(), ProjectStatus::Active);

    let surface = surface.borrow();
    assert!(surface.reports[0].valid);
    assert_eq!(surface.snapshots.len(), 1);
    assert_eq!(surface.last_snapshot()[0].title, "Build the new website");
}

#[test]
fn test_invalid_submission_changes_nothing() {
    let (mut board, surface) = default_board();

    let outcome = board.submit_form(&input(&[("title", "Short"), ("people", "x")]));
    assert!(matches!(outcome, SubmitOutcome::Rejected(ref report) if !report.valid));
    assert!(board.store().is_empty());

    let surface = surface.borrow();
    assert_eq!(surface.reports.len(), 1);
    assert!(surface.snapshots.is_empty());
}

#[test]
fn test_submission_trims_values() {
    let (mut board, _) = default_board();
    let outcome = board.submit_form(&input(&[
        ("title", "   Padded title here   "),
        ("description", "  Padded description  "),
        ("people", " 12 "),
    ]));
    let SubmitOutcome::Created(project) = outcome else {
        panic!("expected a created project");
    };
    assert_eq!(project.title, "Padded title here");
    assert_eq!(project.description, "Padded description");
    assert_eq!(project.people, 12);
}

// =============================================================================
// Drag and drop
// =============================================================================

#[test]
fn test_drag_to_finished_moves_project() {
    let (mut board, surface) = default_board();
    board.submit_form(&valid_input("Build the new website"));

    board.drag_start("PRJ-1", "active");
    board.drag_over("finished");
    assert!(surface.borrow().active_indicators().contains(&"finished".to_string()));

    assert!(matches!(board.drop("finished"), Transition::Dropped { moved: true, .. }));
    assert_eq!(board.store().get("PRJ-1").map(Project::status), Some(ProjectStatus::Finished));
    assert_eq!(surface.borrow().snapshots.len(), 2);
    assert!(surface.borrow().active_indicators().is_empty());

    board.drag_start("PRJ-1", "finished");
    board.drag_over("finished");
    assert!(matches!(board.drop("finished"), Transition::Dropped { moved: false, .. }));
    assert_eq!(surface.borrow().snapshots.len(), 2);
}

#[test]
fn test_drag_end_without_drop_leaves_store() {
    let (mut board, surface) = default_board();
    board.submit_form(&valid_input("Build the new website"));
    let before = board.store().snapshot();

    board.drag_start("PRJ-1", "active");
    board.drag_over("finished");
    assert!(matches!(
        board.drag_end(),
        Transition::Cancelled {
            reason: CancelReason::Abandoned,
            ..
        }
    ));

    assert_eq!(board.store().snapshot(), before);
    assert_eq!(board.drag_state(), &DragState::Idle);
    assert!(surface.borrow().active_indicators().is_empty());
    assert_eq!(surface.borrow().snapshots.len(), 1);
}

#[test]
fn test_switching_targets_moves_indicator() {
    let (mut board, surface) = default_board();
    board.submit_form(&valid_input("Build the new website"));

    board.drag_start("PRJ-1", "active");
    board.drag_over("active");
    board.drag_over("finished");
    assert_eq!(surface.borrow().active_indicators(), vec!["finished".to_string()]);

    board.drag_leave("finished");
    assert!(surface.borrow().active_indicators().is_empty());
}

#[test]
fn test_refresh_pushes_snapshot() {
    let (board, surface) = default_board();
    board.refresh();
    assert_eq!(surface.borrow().snapshots.len(), 1);
    assert!(surface.borrow().last_snapshot().is_empty());
}

#[test]
fn test_board_from_injected_parts() {
    let mut registry = ValidationRegistry::new();
    registry.register_field("Mini", "title", [Rule::Required]).unwrap();
    registry.register_field("Mini", "people", [Rule::Positive]).unwrap();
    let drag = DragExchange::new([
        Container::new("todo", ProjectStatus::Active),
        Container::new("done", ProjectStatus::Finished),
    ]);
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));
    let mut board = Board::new(ReactiveStore::with_prefix("T"), registry, drag, "Mini", surface);

    let SubmitOutcome::Created(project) = board.submit_form(&input(&[("title", "x")])) else {
        panic!("expected a created project");
    };
    assert_eq!(project.id, "T-1");
    assert_eq!(project.people, 0);

    board.drag_start("T-1", "todo");
    board.drag_over("done");
    board.drop("done");
    assert_eq!(board.store().get("T-1").map(Project::status), Some(ProjectStatus::Finished));
    assert_eq!(board.schema(), "Mini");
}

// =============================================================================
// Values a project cannot hold
// =============================================================================

fn loose_board(people_max: i64) -> (Board<RecordingSurface>, Rc<RefCell<RecordingSurface>>) {
    let config = BoardConfig::parse(&format!(
        r#"
[[form.field]]
name = "title"
rules = ["long_enough"]

[[form.field]]
name = "people"
rules = ["range_int"]
min = -5
max = {people_max}
"#
    ))
    .unwrap();
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));
    let board = Board::from_config(&config, Rc::clone(&surface)).unwrap();
    (board, surface)
}

#[test]
fn test_blank_title_and_negative_people_are_rejected() {
    let (mut board, surface) = loose_board(40);

    let outcome = board.submit_form(&input(&[("title", ""), ("people", "-3")]));
    let SubmitOutcome::Rejected(report) = outcome else {
        panic!("expected the submission to be rejected");
    };

    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec![
            Violation::Required {
                field: "title".to_string()
            },
            Violation::OutOfRange {
                field: "people".to_string(),
                min: 0,
                max: i64::from(u32::MAX)
            },
        ]
    );
    assert!(board.store().is_empty());

    let surface = surface.borrow();
    assert!(surface.snapshots.is_empty());
    assert_eq!(surface.reports[0], report);
}

#[test]
fn test_people_above_u32_is_rejected() {
    let (mut board, _) = loose_board(10_000_000_000);

    let outcome = board.submit_form(&input(&[("title", "A long enough title"), ("people", "5000000000")]));
    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(ref report) if report.errors.len() == 1 && report.errors[0].field() == "people"
    ));
    assert!(board.store().is_empty());
}

#[test]
fn test_missing_people_defaults_to_zero() {
    let (mut board, _) = loose_board(40);

    let SubmitOutcome::Created(project) = board.submit_form(&input(&[("title", "A long enough title")])) else {
        panic!("expected a created project");
    };
    assert_eq!(project.people, 0);
}

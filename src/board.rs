//! Board - wires the store, validation and drag protocol to a render surface
//!
//! The board is the entry point the render surface talks to. It holds one
//! store, one registry and one drag protocol, all injected at construction.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::config::{BoardConfig, ConfigError};
use crate::core::models::{NewProject, Project, ProjectStatus};
use crate::core::ports::RenderSurface;
use crate::core::services::{
    DragExchange, DragState, FieldInput, FieldValue, ReactiveStore, Snapshot, Transition,
    ValidationRegistry, ValidationReport, Violation,
};

/// Form field holding the project title
pub const TITLE_FIELD: &str = "title";
/// Form field holding the project description
pub const DESCRIPTION_FIELD: &str = "description";
/// Form field holding the assignee count
pub const PEOPLE_FIELD: &str = "people";

/// Result of a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was valid and the project was added
    Created(Project),
    /// Input was rejected, nothing changed
    Rejected(ValidationReport),
}

/// The project board
pub struct Board<S: RenderSurface> {
    store: ReactiveStore<Project>,
    registry: ValidationRegistry,
    drag: DragExchange<ProjectStatus>,
    schema: String,
    surface: Rc<RefCell<S>>,
}

impl<S: RenderSurface> std::fmt::Debug for Board<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("store", &self.store)
            .field("registry", &self.registry)
            .field("drag", &self.drag)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface + 'static> Board<S> {
    /// Assemble a board and subscribe the surface to store snapshots
    pub fn new(
        mut store: ReactiveStore<Project>,
        registry: ValidationRegistry,
        drag: DragExchange<ProjectStatus>,
        schema: impl Into<String>,
        surface: Rc<RefCell<S>>,
    ) -> Self {
        let listener = Rc::clone(&surface);
        store.subscribe(move |projects: &Snapshot<Project>| {
            listener.borrow_mut().on_snapshot(projects);
        });

        Self {
            store,
            registry,
            drag,
            schema: schema.into(),
            surface,
        }
    }

    /// Assemble a board from configuration
    pub fn from_config(config: &BoardConfig, surface: Rc<RefCell<S>>) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.build_store(),
            config.build_registry()?,
            config.build_drag()?,
            config.form.schema.clone(),
            surface,
        ))
    }
}

impl<S: RenderSurface> Board<S> {
    /// Validate a form submission and add the project when it passes
    ///
    /// Input that passes the schema is still rejected when it cannot form a
    /// project (blank title, assignee count outside `0..=u32::MAX`).
    pub fn submit_form(&mut self, input: &FieldInput) -> SubmitOutcome {
        let mut report = self.registry.evaluate(&self.schema, input);
        let project = if report.valid {
            new_project(&mut report)
        } else {
            None
        };
        self.surface.borrow_mut().on_validation_result(&report);

        let Some(project) = project else {
            debug!("submission rejected with {} error(s)", report.errors.len());
            return SubmitOutcome::Rejected(report);
        };
        SubmitOutcome::Created(self.store.add(project))
    }

    /// Pointer down on a project card
    pub fn arm(&mut self, entity_id: &str, origin: &str) -> Transition {
        let transition = self.drag.arm(entity_id, origin);
        self.reflect(&transition);
        transition
    }

    /// Start dragging a project
    pub fn drag_start(&mut self, entity_id: &str, origin: &str) -> Transition {
        let transition = self.drag.drag_start(entity_id, origin);
        self.reflect(&transition);
        transition
    }

    /// Drag moves over a column
    pub fn drag_over(&mut self, target: &str) -> Transition {
        let transition = self.drag.drag_over(target);
        self.reflect(&transition);
        transition
    }

    /// Drag leaves a column
    pub fn drag_leave(&mut self, target: &str) -> Transition {
        let transition = self.drag.drag_leave(target);
        self.reflect(&transition);
        transition
    }

    /// Drop on a column
    pub fn drop(&mut self, target: &str) -> Transition {
        let transition = self.drag.drop(target, &mut self.store);
        self.reflect(&transition);
        transition
    }

    /// Drag ended
    pub fn drag_end(&mut self) -> Transition {
        let transition = self.drag.drag_end();
        self.reflect(&transition);
        transition
    }

    /// Push the current snapshot to the surface without mutating anything
    pub fn refresh(&self) {
        let snapshot = self.store.snapshot();
        self.surface.borrow_mut().on_snapshot(&snapshot);
    }

    /// The project store
    #[must_use]
    pub const fn store(&self) -> &ReactiveStore<Project> {
        &self.store
    }

    /// The validation registry
    #[must_use]
    pub const fn registry(&self) -> &ValidationRegistry {
        &self.registry
    }

    /// Name of the schema used for submissions
    #[must_use]
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Current drag state
    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Shared handle to the render surface
    #[must_use]
    pub const fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    fn reflect(&self, transition: &Transition) {
        let mut surface = self.surface.borrow_mut();
        match transition {
            Transition::Hovering { target, left } => {
                if let Some(previous) = left {
                    surface.set_drop_indicator(previous, false);
                }
                surface.set_drop_indicator(target, true);
            },
            Transition::Left { target } | Transition::Dropped { target, .. } => {
                surface.set_drop_indicator(target, false);
            },
            Transition::Started { left, .. }
            | Transition::Rejected { left, .. }
            | Transition::Cancelled { left, .. } => {
                if let Some(previous) = left {
                    surface.set_drop_indicator(previous, false);
                }
            },
            Transition::Armed | Transition::Ignored => {},
        }
    }
}

/// Build a project from validated values, recording a violation for each
/// value a project cannot hold
fn new_project(report: &mut ValidationReport) -> Option<NewProject> {
    let values = &report.values;
    let title = match values.get(TITLE_FIELD) {
        Some(FieldValue::Text(text)) => Some(text.clone()),
        Some(FieldValue::Number(n)) => Some(n.to_string()),
        Some(FieldValue::Absent) | None => None,
    };
    let people = match values.get(PEOPLE_FIELD) {
        Some(FieldValue::Number(n)) => u32::try_from(*n).ok(),
        Some(FieldValue::Text(text)) => text.parse().ok(),
        Some(FieldValue::Absent) | None => Some(0),
    };
    let description = match values.get(DESCRIPTION_FIELD) {
        Some(FieldValue::Text(text)) => text.clone(),
        Some(FieldValue::Number(n)) => n.to_string(),
        Some(FieldValue::Absent) | None => String::new(),
    };

    if title.is_none() {
        report.errors.push(Violation::Required {
            field: TITLE_FIELD.to_string(),
        });
    }
    if people.is_none() {
        report.errors.push(Violation::OutOfRange {
            field: PEOPLE_FIELD.to_string(),
            min: 0,
            max: i64::from(u32::MAX),
        });
    }
    report.valid = report.errors.is_empty();

    Some(NewProject::new(title?, description, people?))
}

//! Domain models for kanban
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Project`] - A unit of work shown on the board
//! - [`ProjectStatus`] - Which column a project belongs to
//! - [`Rule`] - One validation constraint attached to a form field

mod project;
mod rule;

pub use project::{NewProject, Project, ProjectStatus};
pub use rule::{LONG_ENOUGH_MIN, Rule, RuleError};

//! Render surface port
//!
//! Defines what the core calls on the presentation layer.

use crate::core::models::Project;
use crate::core::services::{Snapshot, ValidationReport};

/// Presentation layer driven by the board
///
/// Implementations draw columns, form feedback and drop-target indicators.
/// They must not call back into the board while being notified.
pub trait RenderSurface {
    /// The project collection changed
    fn on_snapshot(&mut self, projects: &Snapshot<Project>);

    /// A form submission was evaluated
    fn on_validation_result(&mut self, report: &ValidationReport);

    /// Turn the "accepting drop" indicator of a column on or off
    fn set_drop_indicator(&mut self, target: &str, active: bool);
}

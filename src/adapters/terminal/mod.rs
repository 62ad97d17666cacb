//! Terminal render surface
//!
//! Implements the `RenderSurface` port by printing board columns and
//! validation feedback to stdout.

use log::debug;

use crate::core::models::Project;
use crate::core::ports::RenderSurface;
use crate::core::services::{Snapshot, ValidationReport};
use crate::output::{BoardView, ColumnSpec, OutputMode, ValidationView};

/// Render surface that prints to the terminal
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    mode: OutputMode,
    columns: Vec<ColumnSpec>,
    droppable: Vec<String>,
}

impl TerminalSurface {
    /// Create a surface drawing the given columns
    #[must_use]
    pub const fn new(columns: Vec<ColumnSpec>, mode: OutputMode) -> Self {
        Self {
            mode,
            columns,
            droppable: Vec::new(),
        }
    }

    /// Columns currently showing the drop indicator
    #[must_use]
    pub fn droppable(&self) -> &[String] {
        &self.droppable
    }

    /// View of a snapshot with the current indicators
    #[must_use]
    pub fn view(&self, projects: &[Project]) -> BoardView {
        BoardView::from_snapshot(projects, &self.columns, &self.droppable)
    }
}

impl RenderSurface for TerminalSurface {
    fn on_snapshot(&mut self, projects: &Snapshot<Project>) {
        self.view(projects).render(self.mode);
    }

    fn on_validation_result(&mut self, report: &ValidationReport) {
        ValidationView::from(report).render(self.mode);
    }

    fn set_drop_indicator(&mut self, target: &str, active: bool) {
        debug!("drop indicator {target}: {active}");
        if active {
            if !self.droppable.iter().any(|t| t == target) {
                self.droppable.push(target.to_string());
            }
        } else {
            self.droppable.retain(|t| t != target);
        }
    }
}

//! Output formatting for human and JSON modes
//!
//! This module provides structured views of board state that can be
//! rendered either as human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::config::{ColumnConfig, ConfigError};
use crate::core::models::{Project, ProjectStatus, Rule};
use crate::core::services::{Transition, ValidationReport};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Column layout used when rendering snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column tag
    pub tag: String,
    /// Heading
    pub title: String,
    /// Status of projects shown in the column
    pub status: ProjectStatus,
}

impl ColumnSpec {
    /// Create a column layout entry
    #[must_use]
    pub fn new(tag: impl Into<String>, title: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            tag: tag.into(),
            title: title.into(),
            status,
        }
    }

    /// Layout for the configured columns
    pub fn from_config(columns: &[ColumnConfig]) -> Result<Vec<Self>, ConfigError> {
        columns
            .iter()
            .map(|c| c.project_status().map(|status| Self::new(c.tag.clone(), c.display_title(), status)))
            .collect()
    }
}

/// One project as shown on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    /// Project ID
    pub id: String,
    /// Title
    pub title: String,
    /// "N persons assigned"
    pub assigned: String,
    /// Description
    pub description: String,
}

/// One rendered column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    /// Column tag
    pub tag: String,
    /// Heading
    pub title: String,
    /// Whether the column currently accepts a drop
    pub droppable: bool,
    /// Cards in display order
    pub projects: Vec<ProjectCard>,
}

/// The whole board at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Total number of projects
    pub total: usize,
    /// Columns left to right
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Group a snapshot into columns, each keeping the projects of its status
    #[must_use]
    pub fn from_snapshot(projects: &[Project], columns: &[ColumnSpec], droppable: &[String]) -> Self {
        let columns = columns
            .iter()
            .map(|spec| ColumnView {
                tag: spec.tag.clone(),
                title: spec.title.clone(),
                droppable: droppable.contains(&spec.tag),
                projects: projects
                    .iter()
                    .filter(|p| p.status() == spec.status)
                    .map(|p| ProjectCard {
                        id: p.id.clone(),
                        title: p.title.clone(),
                        assigned: format!("{} assigned", p.persons()),
                        description: p.description.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            total: projects.len(),
            columns,
        }
    }

    /// Render the view based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => {
                println!("{}", serde_json::json!({ "event": "snapshot", "board": self }));
            },
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        for column in &self.columns {
            let marker = if column.droppable { " [drop here]" } else { "" };
            out.push_str(&format!("{}{}\n", column.title.bold(), marker.green()));
            if column.projects.is_empty() {
                out.push_str("  (empty)\n");
            }
            for card in &column.projects {
                out.push_str(&format!("  [{}] {}\n", card.id, card.title));
                out.push_str(&format!("        {}\n", card.assigned));
                out.push_str(&format!("        {}\n", card.description));
            }
        }
        out.push('\n');
        out
    }
}

/// Validation feedback for a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationView {
    /// Whether the input passed
    pub valid: bool,
    /// Error messages in field order
    pub errors: Vec<String>,
}

impl From<&ValidationReport> for ValidationView {
    fn from(report: &ValidationReport) -> Self {
        Self {
            valid: report.valid,
            errors: report.messages(),
        }
    }
}

impl ValidationView {
    /// Render the view based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => {
                println!("{}", serde_json::json!({ "event": "validation", "result": self }));
            },
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        if self.valid {
            return format!("{}\n", "Input is valid.".green());
        }
        let mut out = format!("{}\n", "Invalid input:".red().bold());
        for error in &self.errors {
            out.push_str(&format!("  - {error}\n"));
        }
        out
    }
}

/// Registered rules of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRulesView {
    /// Field name
    pub field: String,
    /// Rules in evaluation order
    pub rules: Vec<String>,
}

/// Registered rules of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaView {
    /// Schema name
    pub schema: String,
    /// Fields in registration order
    pub fields: Vec<FieldRulesView>,
}

impl SchemaView {
    /// Build from registry field listing
    #[must_use]
    pub fn new(schema: &str, fields: &[(&str, &[Rule])]) -> Self {
        Self {
            schema: schema.to_string(),
            fields: fields
                .iter()
                .map(|(field, rules)| FieldRulesView {
                    field: (*field).to_string(),
                    rules: rules.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        }
    }

    /// Render the view based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Schema: {}\n", self.schema.bold());
                if self.fields.is_empty() {
                    println!("No fields registered.");
                }
                for field in &self.fields {
                    println!("  {:<14}{}", field.field, field.rules.join(", "));
                }
            },
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Render a drag transition (human mode stays quiet for no-ops)
pub fn render_transition(transition: &Transition, mode: OutputMode) {
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::json!({ "event": "drag", "result": transition }));
        },
        OutputMode::Human => {
            if let Some(line) = describe_transition(transition) {
                println!("{}", line.dimmed());
            }
        },
    }
}

/// One-line description of a transition, `None` for ignored events
#[must_use]
pub fn describe_transition(transition: &Transition) -> Option<String> {
    let line = match transition {
        Transition::Armed => "~ picked up".to_string(),
        Transition::Started { entity_id, origin, .. } => format!("~ dragging {entity_id} from {origin}"),
        Transition::Hovering { target, .. } => format!("~ over {target}"),
        Transition::Left { target } => format!("~ left {target}"),
        Transition::Rejected { target, .. } => format!("~ {target} does not accept this item"),
        Transition::Dropped {
            entity_id,
            target,
            moved: true,
        } => format!("~ moved {entity_id} to {target}"),
        Transition::Dropped {
            entity_id,
            target,
            moved: false,
        } => format!("~ {entity_id} already in {target}"),
        Transition::Cancelled { reason, .. } => format!("~ drag cancelled: {reason}"),
        Transition::Ignored => return None,
    };
    Some(line)
}

//! Project model
//!
//! A project is the unit of work shown on the board.
//! Its status only changes through [`ReactiveStore::move_status`].
//!
//! [`ReactiveStore::move_status`]: crate::core::services::ReactiveStore::move_status

use serde::{Deserialize, Serialize};

use crate::core::services::Entity;

/// A project - a unit of work tracked by the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (generated by the store: PREFIX-N)
    pub id: String,

    /// What the project is about
    pub title: String,

    /// Longer free-form description
    pub description: String,

    /// Number of people assigned
    pub people: u32,

    /// Current status
    status: ProjectStatus,

    /// When this project was created
    pub created_at: String,
}

/// Project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Being worked on
    #[default]
    Active,
    /// Completed
    Finished,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" | "done" | "complete" | "completed" => Ok(Self::Finished),
            _ => Err(format!("Invalid status: {s}. Use: active, finished")),
        }
    }
}

/// Fields needed to create a project (already validated by the caller)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Project title
    pub title: String,
    /// Project description
    pub description: String,
    /// Number of people assigned
    pub people: u32,
}

impl NewProject {
    /// Create the field set for a new project
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            people,
        }
    }
}

impl Project {
    /// Current status
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Human label for the assignee count ("1 person", "3 persons")
    #[must_use]
    pub fn persons(&self) -> String {
        if self.people == 1 {
            "1 person".to_string()
        } else {
            format!("{} persons", self.people)
        }
    }
}

impl Entity for Project {
    type Fields = NewProject;
    type Status = ProjectStatus;

    fn create(id: String, fields: NewProject) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            people: fields.people,
            status: ProjectStatus::default(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> ProjectStatus {
        self.status
    }

    fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }
}

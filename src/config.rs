//! Board configuration
//!
//! Describes the submission form schema, the board columns and the project
//! id prefix. Stored as TOML; see [`paths`](crate::paths) for lookup order.
//!
//! ```toml
//! [project]
//! id_prefix = "PRJ"
//!
//! [form]
//! schema = "ProjectInput"
//!
//! [[form.field]]
//! name = "title"
//! rules = ["required", "range_string", "long_enough"]
//! min = 10
//! max = 40
//!
//! [[column]]
//! tag = "active"
//! status = "active"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{Project, ProjectStatus, Rule, RuleError};
use crate::core::services::{
    Container, DEFAULT_ID_PREFIX, DragExchange, ReactiveStore, SchemaError, TEXT_PLAIN,
    ValidationRegistry,
};
use crate::paths;

/// Errors that can occur when loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config")]
    Parse(#[from] toml::de::Error),

    /// A field names an unknown rule or has unusable bounds
    #[error("form field `{field}`")]
    Rule {
        /// Field name
        field: String,
        /// Underlying rule error
        source: RuleError,
    },

    /// Registering a field failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Column status is not a project status
    #[error("column `{tag}`: {message}")]
    UnknownStatus {
        /// Column tag
        tag: String,
        /// Parse message
        message: String,
    },

    /// No columns configured
    #[error("at least one column is required")]
    NoColumns,
}

/// Full board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Project settings
    #[serde(default)]
    pub project: ProjectConfig,
    /// Submission form
    #[serde(default)]
    pub form: FormConfig,
    /// Board columns, left to right
    #[serde(default = "default_columns", rename = "column")]
    pub columns: Vec<ColumnConfig>,
}

/// Project settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Prefix for generated ids (`PRJ` gives `PRJ-1`, `PRJ-2`, ...)
    #[serde(default = "default_prefix")]
    pub id_prefix: String,
}

/// Submission form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Schema name used when registering and evaluating fields
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Fields in evaluation order
    #[serde(default = "default_fields", rename = "field")]
    pub fields: Vec<FieldConfig>,
}

/// One form field and its rule tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name
    pub name: String,
    /// Rule tags: required, range_int, range_string, positive, long_enough
    pub rules: Vec<String>,
    /// Lower bound for range rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound for range rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// One board column (drop target)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column tag used by drag events
    pub tag: String,
    /// Status of projects in this column
    pub status: String,
    /// Heading; defaults to "{TAG} PROJECTS"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Accepted transfer types
    #[serde(default = "default_accepts")]
    pub accepts: Vec<String>,
}

fn default_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

fn default_schema() -> String {
    "ProjectInput".to_string()
}

fn default_accepts() -> Vec<String> {
    vec![TEXT_PLAIN.to_string()]
}

fn field(name: &str, rules: &[&str], bounds: Option<(i64, i64)>) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        rules: rules.iter().map(|r| (*r).to_string()).collect(),
        min: bounds.map(|(min, _)| min),
        max: bounds.map(|(_, max)| max),
    }
}

fn default_fields() -> Vec<FieldConfig> {
    vec![
        field("title", &["required", "range_string", "long_enough"], Some((10, 40))),
        field("description", &["required", "long_enough"], None),
        field("people", &["required", "range_int", "positive"], Some((5, 40))),
    ]
}

fn column(tag: &str) -> ColumnConfig {
    ColumnConfig {
        tag: tag.to_string(),
        status: tag.to_string(),
        title: None,
        accepts: default_accepts(),
    }
}

fn default_columns() -> Vec<ColumnConfig> {
    vec![column("active"), column("finished")]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_prefix(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            fields: default_fields(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            form: FormConfig::default(),
            columns: default_columns(),
        }
    }
}

impl FieldConfig {
    /// Typed rules for this field
    pub fn to_rules(&self) -> Result<Vec<Rule>, ConfigError> {
        self.rules
            .iter()
            .map(|tag| Rule::from_tag(tag, self.min, self.max))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ConfigError::Rule {
                field: self.name.clone(),
                source,
            })
    }
}

impl ColumnConfig {
    /// Heading shown above the column
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| format!("{} PROJECTS", self.tag.to_uppercase()))
    }

    /// Parsed project status
    pub fn project_status(&self) -> Result<ProjectStatus, ConfigError> {
        self.status.parse().map_err(|message| ConfigError::UnknownStatus {
            tag: self.tag.clone(),
            message,
        })
    }
}

impl BoardConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded config from {}", path.display());
        Self::parse(&content)
    }

    /// Load configuration
    ///
    /// An explicit path (argument, then `$KANBAN_CONFIG`) must exist.
    /// Otherwise `./kanban.toml`, then the global config, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit.map(Path::to_path_buf).or_else(paths::env_config) {
            return Self::from_file(&path);
        }

        for candidate in [paths::project_config(), paths::global_config()] {
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build the validation registry described by the form section
    pub fn build_registry(&self) -> Result<ValidationRegistry, ConfigError> {
        let mut registry = ValidationRegistry::new();
        for field in &self.form.fields {
            registry.register_field(&self.form.schema, &field.name, field.to_rules()?)?;
        }
        Ok(registry)
    }

    /// Build an empty project store
    #[must_use]
    pub fn build_store(&self) -> ReactiveStore<Project> {
        ReactiveStore::with_prefix(self.project.id_prefix.clone())
    }

    /// Build the drag protocol over the configured columns
    pub fn build_drag(&self) -> Result<DragExchange<ProjectStatus>, ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        let mut containers = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            let status = column.project_status()?;
            containers.push(Container::new(column.tag.clone(), status).accepting(column.accepts.clone()));
        }
        Ok(DragExchange::new(containers))
    }
}

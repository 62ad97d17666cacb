//! Validation registry - declarative per-field rules
//!
//! Schemas are built by explicit registration calls at setup time and
//! evaluated many times afterwards. Evaluation never fails: every violated
//! constraint of every field is collected so the caller can present all
//! problems at once.
//!
//! Rules that read the value (`range_int`, `range_string`, `positive`,
//! `long_enough`) only apply to present input. A blank field therefore
//! fails only its `required` rule, and a blank optional field is valid.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::core::models::{LONG_ENOUGH_MIN, Rule, RuleError};

/// Raw form input: field name to text as typed
pub type FieldInput = HashMap<String, String>;

/// Errors raised while registering fields
///
/// These indicate wiring mistakes, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Field name was empty
    #[error("schema `{schema}`: field name cannot be empty")]
    EmptyFieldName {
        /// Schema name
        schema: String,
    },

    /// Field registered without rules
    #[error("schema `{schema}`: field `{field}` has no rules")]
    NoRules {
        /// Schema name
        schema: String,
        /// Field name
        field: String,
    },

    /// A rule has unusable bounds
    #[error("schema `{schema}`: field `{field}` has unusable rule bounds")]
    Rule {
        /// Schema name
        schema: String,
        /// Field name
        field: String,
        /// Underlying rule error
        source: RuleError,
    },
}

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Required field left blank
    #[error("{field} field is required")]
    Required {
        /// Field name
        field: String,
    },

    /// Not an integer within the bounds
    #[error("{field} field's value is not between {min} and {max}")]
    OutOfRange {
        /// Field name
        field: String,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Length outside the bounds
    #[error("{field} field's length is not between {min} and {max}")]
    LengthOutOfRange {
        /// Field name
        field: String,
        /// Inclusive minimum length
        min: usize,
        /// Inclusive maximum length
        max: usize,
    },

    /// Negative or not a number
    #[error("{field} field's value is not a positive number")]
    NotPositive {
        /// Field name
        field: String,
    },

    /// Shorter than [`LONG_ENOUGH_MIN`]
    #[error("{field} field's value is not long enough (at least {min} characters)")]
    TooShort {
        /// Field name
        field: String,
        /// Required minimum length
        min: usize,
    },
}

impl Violation {
    /// Name of the offending field
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field }
            | Self::OutOfRange { field, .. }
            | Self::LengthOutOfRange { field, .. }
            | Self::NotPositive { field }
            | Self::TooShort { field, .. } => field,
        }
    }
}

/// A normalized field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing or blank
    Absent,
    /// Trimmed text
    Text(String),
    /// Parsed integer (fields carrying numeric rules)
    Number(i64),
}

/// Normalized values in field registration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldValues(Vec<(String, FieldValue)>);

impl FieldValues {
    /// Value for a field, if the field is registered
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(name, _)| name == field).map(|(_, value)| value)
    }

    /// Field as text (numbers are not converted)
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Field as an integer, parsing text when needed
    #[must_use]
    pub fn number(&self, field: &str) -> Option<i64> {
        match self.get(field) {
            Some(FieldValue::Number(n)) => Some(*n),
            Some(FieldValue::Text(text)) => text.parse().ok(),
            _ => None,
        }
    }

    /// Iterate `(field, value)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Outcome of evaluating a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True when no rule of any field failed
    pub valid: bool,
    /// Every violation, in field then rule order
    pub errors: Vec<Violation>,
    /// Normalized input
    pub values: FieldValues,
}

impl ValidationReport {
    /// Human-readable error messages
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

#[derive(Debug, Clone, Default)]
struct Schema {
    fields: Vec<(String, Vec<Rule>)>,
}

/// Registry of schemas, each mapping fields to rules
#[derive(Debug, Clone, Default)]
pub struct ValidationRegistry {
    schemas: HashMap<String, Schema>,
}

/// Fluent helper returned by [`ValidationRegistry::schema`]
#[derive(Debug)]
pub struct SchemaBuilder<'a> {
    registry: &'a mut ValidationRegistry,
    schema: String,
}

impl SchemaBuilder<'_> {
    /// Register a field on this schema
    pub fn field(
        self,
        field: &str,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Result<Self, SchemaError> {
        self.registry.register_field(&self.schema, field, rules)?;
        Ok(self)
    }
}

impl ValidationRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start registering fields on a schema
    pub fn schema(&mut self, name: impl Into<String>) -> SchemaBuilder<'_> {
        SchemaBuilder {
            registry: self,
            schema: name.into(),
        }
    }

    /// Register (or replace) the rules of one field
    ///
    /// A replaced field keeps its original position.
    pub fn register_field(
        &mut self,
        schema: &str,
        field: &str,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Result<(), SchemaError> {
        if field.trim().is_empty() {
            return Err(SchemaError::EmptyFieldName {
                schema: schema.to_string(),
            });
        }

        let rules: Vec<Rule> = rules.into_iter().collect();
        if rules.is_empty() {
            return Err(SchemaError::NoRules {
                schema: schema.to_string(),
                field: field.to_string(),
            });
        }

        for rule in &rules {
            rule.check_bounds().map_err(|source| SchemaError::Rule {
                schema: schema.to_string(),
                field: field.to_string(),
                source,
            })?;
        }

        let entry = self.schemas.entry(schema.to_string()).or_default();
        if let Some((_, existing)) = entry.fields.iter_mut().find(|(name, _)| name == field) {
            debug!("schema {schema}: replacing rules of {field}");
            *existing = rules;
        } else {
            debug!("schema {schema}: registered {field}");
            entry.fields.push((field.to_string(), rules));
        }
        Ok(())
    }

    /// Rules of a field, if registered
    #[must_use]
    pub fn rules(&self, schema: &str, field: &str) -> Option<&[Rule]> {
        self.schemas
            .get(schema)?
            .fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
    }

    /// Fields of a schema in registration order
    #[must_use]
    pub fn fields(&self, schema: &str) -> Vec<(&str, &[Rule])> {
        self.schemas
            .get(schema)
            .map(|s| s.fields.iter().map(|(name, rules)| (name.as_str(), rules.as_slice())).collect())
            .unwrap_or_default()
    }

    /// Registered schema names, sorted
    #[must_use]
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluate input against every field of a schema
    ///
    /// A schema with no registered fields is vacuously valid.
    #[must_use]
    pub fn evaluate(&self, schema: &str, input: &FieldInput) -> ValidationReport {
        let Some(registered) = self.schemas.get(schema) else {
            debug!("schema {schema} has no fields, nothing to validate");
            return ValidationReport {
                valid: true,
                errors: Vec::new(),
                values: FieldValues::default(),
            };
        };

        let mut errors = Vec::new();
        let mut values = Vec::with_capacity(registered.fields.len());

        for (field, rules) in &registered.fields {
            let raw = input.get(field).map(|s| s.trim()).filter(|s| !s.is_empty());
            for rule in rules {
                errors.extend(check_rule(field, *rule, raw));
            }
            values.push((field.clone(), normalize(rules, raw)));
        }

        debug!("schema {schema}: {} violation(s)", errors.len());
        ValidationReport {
            valid: errors.is_empty(),
            errors,
            values: FieldValues(values),
        }
    }
}

fn check_rule(field: &str, rule: Rule, raw: Option<&str>) -> Option<Violation> {
    let field = field.to_string();
    let Some(value) = raw else {
        return matches!(rule, Rule::Required).then_some(Violation::Required { field });
    };

    match rule {
        Rule::Required => None,
        Rule::RangeInt { min, max } => parse_int(value)
            .filter(|n| (min..=max).contains(n))
            .is_none()
            .then_some(Violation::OutOfRange { field, min, max }),
        Rule::RangeString { min, max } => {
            let len = value.chars().count();
            (!(min..=max).contains(&len)).then_some(Violation::LengthOutOfRange { field, min, max })
        },
        Rule::Positive => parse_int(value)
            .filter(|n| *n > -1)
            .is_none()
            .then_some(Violation::NotPositive { field }),
        Rule::LongEnough => (value.chars().count() < LONG_ENOUGH_MIN).then_some(Violation::TooShort {
            field,
            min: LONG_ENOUGH_MIN,
        }),
    }
}

fn normalize(rules: &[Rule], raw: Option<&str>) -> FieldValue {
    let Some(value) = raw else {
        return FieldValue::Absent;
    };
    if rules.iter().any(Rule::is_numeric)
        && let Some(n) = parse_int(value)
    {
        return FieldValue::Number(n);
    }
    FieldValue::Text(value.to_string())
}

fn parse_int(value: &str) -> Option<i64> {
    value.parse().ok()
}

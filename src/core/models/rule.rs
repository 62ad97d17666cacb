//! Validation rules
//!
//! A rule is one constraint attached to a form field. Bounds travel inside
//! the variant that needs them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum character count for [`Rule::LongEnough`]
pub const LONG_ENOUGH_MIN: usize = 10;

/// Errors that can occur when building a rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Tag does not name a known rule
    #[error("unknown rule tag: {0}")]
    UnknownTag(String),

    /// Range rule declared without a bound pair
    #[error("rule `{0}` needs both min and max bounds")]
    MissingBounds(&'static str),

    /// Lower bound is greater than the upper bound
    #[error("invalid bounds for `{rule}`: min {min} is greater than max {max}")]
    InvalidBounds {
        /// Rule tag
        rule: &'static str,
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
    },

    /// String length bound below zero
    #[error("invalid bounds for `range_string`: lengths cannot be negative ({0})")]
    NegativeLength(i64),
}

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Input must be present and non-blank
    Required,
    /// Input must parse as an integer in `[min, max]`
    RangeInt {
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },
    /// Input character count must be in `[min, max]`
    RangeString {
        /// Inclusive minimum length
        min: usize,
        /// Inclusive maximum length
        max: usize,
    },
    /// Input must parse as an integer greater than -1 (zero allowed)
    Positive,
    /// Input must have at least [`LONG_ENOUGH_MIN`] characters
    LongEnough,
}

impl Rule {
    /// Short tag naming the rule
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::RangeInt { .. } => "range_int",
            Self::RangeString { .. } => "range_string",
            Self::Positive => "positive",
            Self::LongEnough => "long_enough",
        }
    }

    /// Whether this rule reads the input as a number
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::RangeInt { .. } | Self::Positive)
    }

    /// Build a rule from its tag and an optional bound pair
    ///
    /// Tags are case-insensitive; `-` and `_` are interchangeable and may be
    /// omitted (`rangeInt`, `range-int` and `range_int` are the same rule).
    pub fn from_tag(tag: &str, min: Option<i64>, max: Option<i64>) -> Result<Self, RuleError> {
        let normalized = tag.trim().to_lowercase().replace(['-', '_'], "");
        let rule = match normalized.as_str() {
            "required" => Self::Required,
            "positive" => Self::Positive,
            "longenough" => Self::LongEnough,
            "rangeint" => {
                let (Some(min), Some(max)) = (min, max) else {
                    return Err(RuleError::MissingBounds("range_int"));
                };
                Self::RangeInt { min, max }
            },
            "rangestring" => {
                let (Some(min), Some(max)) = (min, max) else {
                    return Err(RuleError::MissingBounds("range_string"));
                };
                let to_len = |n: i64| usize::try_from(n).map_err(|_| RuleError::NegativeLength(n));
                Self::RangeString {
                    min: to_len(min)?,
                    max: to_len(max)?,
                }
            },
            _ => return Err(RuleError::UnknownTag(tag.to_string())),
        };
        rule.check_bounds()?;
        Ok(rule)
    }

    /// Reject bound pairs where `min > max`
    pub fn check_bounds(&self) -> Result<(), RuleError> {
        match *self {
            Self::RangeInt { min, max } if min > max => Err(RuleError::InvalidBounds {
                rule: self.tag(),
                min,
                max,
            }),
            Self::RangeString { min, max } if min > max => Err(RuleError::InvalidBounds {
                rule: self.tag(),
                min: i64::try_from(min).unwrap_or(i64::MAX),
                max: i64::try_from(max).unwrap_or(i64::MAX),
            }),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RangeInt { min, max } => write!(f, "range_int[{min}, {max}]"),
            Self::RangeString { min, max } => write!(f, "range_string[{min}, {max}]"),
            _ => write!(f, "{}", self.tag()),
        }
    }
}

//! Setting descriptions as reported by a settings store

use std::fmt;

use crate::value::{Value, ValueType};

/// Identity of a setting within its store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingKey {
    pub section: String,
    pub key: String,
}

impl SettingKey {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.section.is_empty() {
            f.write_str(&self.key)
        } else {
            write!(f, "{}.{}", self.section, self.key)
        }
    }
}

// ============================================================================
// Constraints
// ============================================================================

/// Declared set of acceptable values
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Inclusive numeric range in the setting's own numeric type
    Range { min: Value, max: Value },
    /// Ordered whitelist
    List(Vec<Value>),
}

impl Constraint {
    /// Nearest acceptable value
    ///
    /// Ranges clamp to the closest bound; whitelists fall back to their first
    /// element. Values of a shape the constraint can't judge pass through.
    pub fn clamp(&self, value: &Value) -> Value {
        match self {
            Constraint::Range { min, max } => {
                match (value.as_number(), min.as_number(), max.as_number()) {
                    (Some(v), Some(lo), Some(hi)) => Value::Number(v.clamp(lo, hi)),
                    _ => value.clone(),
                }
            }
            Constraint::List(values) => {
                if values.contains(value) {
                    value.clone()
                } else {
                    values.first().cloned().unwrap_or_else(|| value.clone())
                }
            }
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        match self {
            Constraint::Range { min, max } => {
                match (value.as_number(), min.as_number(), max.as_number()) {
                    (Some(v), Some(lo), Some(hi)) => v.in_range(&lo, &hi),
                    _ => false,
                }
            }
            Constraint::List(values) => values.contains(value),
        }
    }

    /// `(min, max)` for range constraints
    pub fn range(&self) -> Option<(Value, Value)> {
        match self {
            Constraint::Range { min, max } => Some((min.clone(), max.clone())),
            Constraint::List(_) => None,
        }
    }

    pub fn whitelist(&self) -> Option<&[Value]> {
        match self {
            Constraint::List(values) => Some(values),
            Constraint::Range { .. } => None,
        }
    }
}

// ============================================================================
// Tags
// ============================================================================

/// Host-attached extra metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingAttributes {
    pub is_advanced: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    Text(String),
    Attributes(SettingAttributes),
}

pub const ADVANCED_TAG: &str = "Advanced";

// ============================================================================
// Setting
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub key: SettingKey,
    pub value_type: ValueType,
    pub default: Value,
    pub description: Option<String>,
    pub constraint: Option<Constraint>,
    pub tags: Vec<Tag>,
}

impl Setting {
    pub fn new(key: SettingKey, value_type: ValueType, default: Value) -> Self {
        Self {
            key,
            value_type,
            default,
            description: None,
            constraint: None,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Tagged `"Advanced"`, or attributes say so
    ///
    /// A text tag wins over attributes.
    pub fn is_advanced(&self) -> bool {
        if self
            .tags
            .iter()
            .any(|t| matches!(t, Tag::Text(s) if s == ADVANCED_TAG))
        {
            return true;
        }
        self.tags.iter().any(|t| {
            matches!(
                t,
                Tag::Attributes(SettingAttributes {
                    is_advanced: Some(true)
                })
            )
        })
    }

    /// Case-insensitive filter match on key or description
    pub fn matches_filter(&self, lowered_filter: &str) -> bool {
        lowered_filter.is_empty()
            || self.key.key.to_lowercase().contains(lowered_filter)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(lowered_filter))
    }
}

/// Owning plugin of a settings file
#[derive(Debug, Clone, PartialEq)]
pub struct PluginMeta {
    pub guid: String,
    pub name: String,
    pub version: String,
    /// `false` hides every entry behind the advanced toggle
    pub browsable: bool,
}

impl PluginMeta {
    pub fn new(guid: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
            version: version.into(),
            browsable: true,
        }
    }
}

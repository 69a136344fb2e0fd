//! Runtime values held by settings
//!
//! `Value` is the dynamically typed payload a setting stores and an editor
//! works on. `ValueType` describes the declared type so dispatch can happen
//! even when the current value is `Null`.

pub mod color;
pub mod enums;
pub mod number;
pub mod structs;

use std::fmt;
use std::sync::Arc;

pub use color::{Color, Color32, ColorKind};
pub use enums::{EnumMember, EnumType, EnumValue, IntKind};
pub use number::{Number, NumberKind};
pub use structs::{FieldDef, StructType, StructValue};

// ============================================================================
// Value
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Enum(EnumValue),
    Color(Color),
    Color32(Color32),
    Struct(StructValue),
}

impl Value {
    /// Concrete runtime type, `None` for `Null`
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => ValueType::Bool,
            Value::Number(n) => ValueType::Number(n.kind()),
            Value::Text(_) => ValueType::Text,
            Value::Enum(e) => ValueType::Enum(Arc::clone(&e.ty)),
            Value::Color(_) => ValueType::Color(ColorKind::Float),
            Value::Color32(_) => ValueType::Color(ColorKind::Byte),
            Value::Struct(s) => ValueType::Struct(Arc::clone(&s.ty)),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Enum(e) => write!(f, "{}", e),
            Value::Color(c) => write!(f, "{}", c),
            Value::Color32(c) => write!(f, "{}", c),
            Value::Struct(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

// ============================================================================
// ValueType
// ============================================================================

/// Declared type of a setting
#[derive(Debug, Clone, Default)]
pub enum ValueType {
    /// Opaque type the core knows nothing about
    #[default]
    Unknown,
    Bool,
    Number(NumberKind),
    Text,
    Enum(Arc<EnumType>),
    Color(ColorKind),
    Struct(Arc<StructType>),
}

impl ValueType {
    /// Full type name, used as the identity of named types
    pub fn name(&self) -> &str {
        match self {
            ValueType::Unknown => "unknown",
            ValueType::Bool => "bool",
            ValueType::Number(k) => k.name(),
            ValueType::Text => "string",
            ValueType::Enum(e) => &e.name,
            ValueType::Color(k) => k.name(),
            ValueType::Struct(s) => &s.name,
        }
    }

    /// Parse text into a value of this type with the type's own parser
    pub fn parse(&self, text: &str) -> Result<Value, ParseValueError> {
        match self {
            ValueType::Bool => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(ParseValueError::InvalidBool(text.to_string())),
            },
            ValueType::Number(k) => k.parse(text).map(Value::Number),
            ValueType::Text => Ok(Value::Text(text.to_string())),
            ValueType::Enum(e) => e.parse(text).map(Value::Enum),
            other => Err(ParseValueError::Unsupported(other.name().to_string())),
        }
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueType::Unknown, ValueType::Unknown)
            | (ValueType::Bool, ValueType::Bool)
            | (ValueType::Text, ValueType::Text) => true,
            (ValueType::Number(a), ValueType::Number(b)) => a == b,
            (ValueType::Color(a), ValueType::Color(b)) => a == b,
            (ValueType::Enum(a), ValueType::Enum(b)) => a.name == b.name,
            (ValueType::Struct(a), ValueType::Struct(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur when parsing a value from text
#[derive(Debug, Clone, PartialEq)]
pub enum ParseValueError {
    InvalidNumber { kind: NumberKind, text: String },
    InvalidBool(String),
    UnknownMember { ty: String, name: String },
    EmptyEnum { ty: String },
    OutOfRange { ty: String, text: String },
    Unsupported(String),
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseValueError::InvalidNumber { kind, text } => {
                write!(f, "'{}' is not a valid {}", text, kind)
            }
            ParseValueError::InvalidBool(text) => write!(f, "'{}' is not a valid bool", text),
            ParseValueError::UnknownMember { ty, name } => {
                write!(f, "'{}' is not a member of {}", name, ty)
            }
            ParseValueError::EmptyEnum { ty } => write!(f, "empty value for {}", ty),
            ParseValueError::OutOfRange { ty, text } => {
                write!(f, "'{}' is out of range for {}", text, ty)
            }
            ParseValueError::Unsupported(ty) => write!(f, "no text parser for {}", ty),
        }
    }
}

impl std::error::Error for ParseValueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_has_no_type() {
        assert!(Value::Null.value_type().is_none());
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn test_value_type_of_each_variant() {
        assert_eq!(Value::Bool(true).value_type(), Some(ValueType::Bool));
        assert_eq!(
            Value::Number(Number::U16(3)).value_type(),
            Some(ValueType::Number(NumberKind::U16))
        );
        assert_eq!(
            Value::Color32(Color32::default()).value_type(),
            Some(ValueType::Color(ColorKind::Byte))
        );
    }

    #[test]
    fn test_named_types_compare_by_name() {
        let a = EnumType::new("Severity", IntKind::I32, false).build();
        let b = EnumType::new("Severity", IntKind::I32, false)
            .member("Low", 0)
            .build();
        assert_eq!(ValueType::Enum(a), ValueType::Enum(b));
    }

    #[test]
    fn test_parse_bool_case_insensitive() {
        assert_eq!(ValueType::Bool.parse("True").unwrap(), Value::Bool(true));
        assert!(ValueType::Bool.parse("yes").is_err());
    }

    #[test]
    fn test_struct_has_no_text_parser() {
        let ty = StructType::new("Vec2", true).build();
        assert!(matches!(
            ValueType::Struct(ty).parse("(1, 2)"),
            Err(ParseValueError::Unsupported(_))
        ));
    }
}

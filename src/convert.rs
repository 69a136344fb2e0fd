//! String converters for types without a dedicated editor
//!
//! Keyed by exact type name. Conversion failures are returned as
//! `ConvertError`; callers decide how to surface them.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::catalog::{read, write};
use crate::value::{Value, ValueType};

pub trait TypeConverter: Send + Sync {
    fn to_string(&self, value: &Value, ty: &ValueType) -> Result<String, ConvertError>;
    fn from_string(&self, text: &str, ty: &ValueType) -> Result<Value, ConvertError>;
}

/// Converter built from a pair of closures
pub struct FnConverter<F, G> {
    to: F,
    from: G,
}

impl<F, G> FnConverter<F, G>
where
    F: Fn(&Value) -> Result<String, String> + Send + Sync,
    G: Fn(&str) -> Result<Value, String> + Send + Sync,
{
    pub fn new(to: F, from: G) -> Self {
        Self { to, from }
    }
}

impl<F, G> TypeConverter for FnConverter<F, G>
where
    F: Fn(&Value) -> Result<String, String> + Send + Sync,
    G: Fn(&str) -> Result<Value, String> + Send + Sync,
{
    fn to_string(&self, value: &Value, ty: &ValueType) -> Result<String, ConvertError> {
        (self.to)(value).map_err(|message| ConvertError::Invalid {
            ty: ty.name().to_string(),
            message,
        })
    }

    fn from_string(&self, text: &str, ty: &ValueType) -> Result<Value, ConvertError> {
        (self.from)(text).map_err(|message| ConvertError::Invalid {
            ty: ty.name().to_string(),
            message,
        })
    }
}

#[derive(Default)]
pub struct ConverterRegistry {
    converters: RwLock<HashMap<String, Arc<dyn TypeConverter>>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the converter for a type name
    pub fn register(&self, type_name: impl Into<String>, converter: impl TypeConverter + 'static) {
        let type_name = type_name.into();
        tracing::debug!("Registered converter for {}", type_name);
        write(&self.converters).insert(type_name, Arc::new(converter));
    }

    pub fn can_convert(&self, ty: &ValueType) -> bool {
        read(&self.converters).contains_key(ty.name())
    }

    fn get(&self, ty: &ValueType) -> Result<Arc<dyn TypeConverter>, ConvertError> {
        read(&self.converters)
            .get(ty.name())
            .cloned()
            .ok_or_else(|| ConvertError::NoConverter(ty.name().to_string()))
    }

    pub fn convert_to_string(&self, value: &Value, ty: &ValueType) -> Result<String, ConvertError> {
        self.get(ty)?.to_string(value, ty)
    }

    pub fn convert_from_string(&self, text: &str, ty: &ValueType) -> Result<Value, ConvertError> {
        self.get(ty)?.from_string(text, ty)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = read(&self.converters).keys().cloned().collect();
        f.debug_struct("ConverterRegistry")
            .field("types", &names)
            .finish()
    }
}

/// Errors that can occur when converting through the registry
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    NoConverter(String),
    Invalid { ty: String, message: String },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::NoConverter(ty) => write!(f, "No converter registered for {}", ty),
            ConvertError::Invalid { ty, message } => {
                write!(f, "Could not convert {}: {}", ty, message)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, NumberKind, StructType};

    fn point_registry() -> (ValueType, ConverterRegistry) {
        let ty = StructType::new("Point", true)
            .field("x", ValueType::Number(NumberKind::I32))
            .build();
        let ty2 = Arc::clone(&ty);
        let reg = ConverterRegistry::new();
        reg.register(
            "Point",
            FnConverter::new(
                |v: &Value| match v {
                    Value::Struct(s) => Ok(s.to_string()),
                    other => Err(format!("not a point: {}", other)),
                },
                move |text: &str| {
                    let x: i32 = text
                        .trim_matches(&['(', ')'][..])
                        .parse()
                        .map_err(|e| format!("{}", e))?;
                    Ok(Value::Struct(ty2.instance(vec![Value::Number(Number::I32(x))])))
                },
            ),
        );
        (ValueType::Struct(ty), reg)
    }

    #[test]
    fn test_missing_converter() {
        let reg = ConverterRegistry::new();
        let err = reg
            .convert_to_string(&Value::Null, &ValueType::Unknown)
            .unwrap_err();
        assert_eq!(err, ConvertError::NoConverter("unknown".into()));
    }

    #[test]
    fn test_round_trip_through_registered_converter() {
        let (ty, reg) = point_registry();
        assert!(reg.can_convert(&ty));

        let value = reg.convert_from_string("(7)", &ty).unwrap();
        assert_eq!(reg.convert_to_string(&value, &ty).unwrap(), "(7)");
    }

    #[test]
    fn test_converter_failure_is_reported() {
        let (ty, reg) = point_registry();
        assert!(matches!(
            reg.convert_from_string("seven", &ty),
            Err(ConvertError::Invalid { .. })
        ));
    }
}

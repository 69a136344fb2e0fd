//! Composite (struct) value types

use std::fmt;
use std::sync::Arc;

use super::{Value, ValueType};

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: ValueType,
    /// Compile-time constant, not part of the instance state
    pub constant: bool,
}

/// Shape of a struct type
#[derive(Debug, Clone)]
pub struct StructType {
    pub name: String,
    /// Copied on assignment (vectors, rects, quaternions)
    pub is_value_type: bool,
    pub fields: Vec<FieldDef>,
}

impl StructType {
    pub fn new(name: impl Into<String>, is_value_type: bool) -> Self {
        Self {
            name: name.into(),
            is_value_type,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty,
            constant: false,
        });
        self
    }

    pub fn constant(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty,
            constant: true,
        });
        self
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Instance with the given field values, one per declared field
    pub fn instance(self: &Arc<Self>, fields: Vec<Value>) -> StructValue {
        StructValue {
            ty: Arc::clone(self),
            fields,
        }
    }
}

impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[derive(Debug, Clone)]
pub struct StructValue {
    pub ty: Arc<StructType>,
    pub fields: Vec<Value>,
}

impl StructValue {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.fields.get(index)
    }

    /// Copy of this value with one field replaced
    pub fn with_field(&self, index: usize, value: Value) -> StructValue {
        let mut copy = self.clone();
        if let Some(slot) = copy.fields.get_mut(index) {
            *slot = value;
        }
        copy
    }
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        self.ty.name == other.ty.name && self.fields == other.fields
    }
}

impl fmt::Display for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let instance = self
            .ty
            .fields
            .iter()
            .zip(&self.fields)
            .filter(|(def, _)| !def.constant);
        for (i, (_, v)) in instance.enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

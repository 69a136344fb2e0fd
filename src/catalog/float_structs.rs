//! Structural detection of all-float value types (vectors, rects, quaternions)

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::value::{NumberKind, StructType, ValueType};

/// An editable float field of a supported struct
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// Position in `StructValue::fields`
    pub index: usize,
    pub name: String,
    /// Short label shown next to the input
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructInfo {
    pub type_name: String,
    pub fields: Vec<StructField>,
}

/// Per-type support verdict and field layout, computed once
#[derive(Debug, Default)]
pub struct FloatStructCache {
    entries: RwLock<HashMap<String, Option<Arc<StructInfo>>>>,
}

impl FloatStructCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field layout when every non-constant field of `ty` is an `f32`
    pub fn info(&self, ty: &StructType) -> Option<Arc<StructInfo>> {
        if let Some(cached) = super::read(&self.entries).get(&ty.name) {
            return cached.clone();
        }

        let info = inspect(ty).map(Arc::new);
        super::write(&self.entries)
            .entry(ty.name.clone())
            .or_insert(info)
            .clone()
    }

    pub fn is_supported(&self, ty: &StructType) -> bool {
        self.info(ty).is_some()
    }
}

/// Uncached structural check, same rule as `FloatStructCache::is_supported`
pub fn is_float_struct(ty: &StructType) -> bool {
    inspect(ty).is_some()
}

fn inspect(ty: &StructType) -> Option<StructInfo> {
    if !ty.is_value_type {
        return None;
    }

    let mut fields = Vec::new();
    for (index, def) in ty.fields.iter().enumerate() {
        if def.constant {
            continue;
        }
        if def.ty != ValueType::Number(NumberKind::F32) {
            return None;
        }
        fields.push(StructField {
            index,
            name: def.name.clone(),
            label: field_label(&def.name),
        });
    }

    if fields.is_empty() {
        return None;
    }
    Some(StructInfo {
        type_name: ty.name.clone(),
        fields,
    })
}

/// `m_XMin` -> `X`, `x` -> `X`
fn field_label(name: &str) -> String {
    let trimmed = name.strip_prefix("m_").unwrap_or(name);
    trimmed
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

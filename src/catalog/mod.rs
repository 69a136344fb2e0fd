//! Type introspection helpers
//!
//! Process-wide caches are append-only: an entry is built at most once per
//! distinct type name and never evicted.

mod enum_names;
mod float_structs;

pub use enum_names::{EnumName, EnumNameCache};
pub use float_structs::{is_float_struct, FloatStructCache, StructField, StructInfo};

use crate::value::{Value, ValueType};

/// Concrete runtime type of `value`, or `fallback` when the value is null
pub fn actual_type(value: &Value, fallback: &ValueType) -> ValueType {
    value.value_type().unwrap_or_else(|| fallback.clone())
}

pub(crate) fn read<T>(lock: &std::sync::RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &std::sync::RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(std::sync::PoisonError::into_inner)
}

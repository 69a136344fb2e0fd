//! Type to behaviour dispatch
//!
//! The built-in rules are a fixed, ordered match. Custom behaviours are
//! consulted after every built-in rule and before the fallback, in
//! registration order.

use std::any::{type_name, TypeId};
use std::fmt;
use std::sync::RwLock;

use super::{
    BoolEditor, ColorEditor, EditorBehavior, EditorKind, EnumEditor, FallbackEditor,
    FlagsEditor, FloatStructEditor, KeybindEditor, NumberEditor, TextEditor,
};
use crate::catalog::{actual_type, read, write, FloatStructCache};
use crate::input::keys;
use crate::value::{Value, ValueType};

/// A third-party behaviour that can be registered with the registry
pub trait CustomEditor: EditorBehavior + 'static {
    fn create(value: Value, value_type: ValueType) -> Self
    where
        Self: Sized;
}

struct CustomEntry {
    type_id: TypeId,
    name: &'static str,
    /// Built with a null value; only ever asked `supports_type`
    sample: Box<dyn EditorBehavior>,
    build: fn(Value, ValueType) -> Box<dyn EditorBehavior>,
}

fn build_custom<B: CustomEditor>(value: Value, value_type: ValueType) -> Box<dyn EditorBehavior> {
    Box::new(B::create(value, value_type))
}

#[derive(Default)]
pub struct EditorRegistry {
    custom: RwLock<Vec<CustomEntry>>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom behaviour; a second registration is a no-op
    pub fn register<B: CustomEditor>(&self) -> bool {
        let mut custom = write(&self.custom);
        if custom.iter().any(|c| c.type_id == TypeId::of::<B>()) {
            return false;
        }
        custom.push(CustomEntry {
            type_id: TypeId::of::<B>(),
            name: type_name::<B>(),
            sample: Box::new(B::create(Value::Null, ValueType::Unknown)),
            build: build_custom::<B>,
        });
        tracing::debug!("Registered custom editor {}", type_name::<B>());
        true
    }

    pub fn custom_count(&self) -> usize {
        read(&self.custom).len()
    }

    /// Behaviour kind for a concrete type; total and deterministic
    pub fn resolve(&self, ty: &ValueType, structs: &FloatStructCache) -> EditorKind {
        match ty {
            ValueType::Bool => return EditorKind::Boolean,
            ValueType::Number(_) => return EditorKind::Number,
            ValueType::Text => return EditorKind::Text,
            ValueType::Enum(_) if keys::is_key_type(ty) => return EditorKind::Keybind,
            ValueType::Enum(e) if e.flags => return EditorKind::Flags,
            ValueType::Enum(_) => return EditorKind::Enum,
            ValueType::Color(_) => return EditorKind::Color,
            ValueType::Struct(s) if structs.is_supported(s) => return EditorKind::FloatStruct,
            _ => {}
        }

        read(&self.custom)
            .iter()
            .find(|c| c.sample.supports_type(ty))
            .map(|c| EditorKind::Custom(c.name))
            .unwrap_or(EditorKind::Fallback)
    }

    /// Behaviour for `value`, typed by the value itself or by `fallback` when null
    pub fn create(
        &self,
        value: Value,
        fallback: &ValueType,
        structs: &FloatStructCache,
    ) -> Box<dyn EditorBehavior> {
        let ty = actual_type(&value, fallback);
        let kind = self.resolve(&ty, structs);
        tracing::trace!("Resolved {} to {:?}", ty, kind);

        match kind {
            EditorKind::Boolean => Box::new(BoolEditor::new(value, ty)),
            EditorKind::Number => Box::new(NumberEditor::new(value, ty)),
            EditorKind::Text => Box::new(TextEditor::new(value, ty)),
            EditorKind::Keybind => Box::new(KeybindEditor::new(value, ty)),
            EditorKind::Enum => Box::new(EnumEditor::new(value, ty)),
            EditorKind::Flags => Box::new(FlagsEditor::new(value, ty)),
            EditorKind::Color => Box::new(ColorEditor::new(value, ty)),
            EditorKind::FloatStruct => Box::new(FloatStructEditor::new(value, ty)),
            EditorKind::Custom(name) => {
                let build = read(&self.custom)
                    .iter()
                    .find(|c| c.name == name)
                    .map(|c| c.build);
                match build {
                    Some(build) => build(value, ty),
                    None => Box::new(FallbackEditor::new(value, ty)),
                }
            }
            // Whitelists are chosen by the entry, never by type
            EditorKind::ConstrainedList | EditorKind::Fallback => {
                Box::new(FallbackEditor::new(value, ty))
            }
        }
    }
}

impl fmt::Debug for EditorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&'static str> = read(&self.custom).iter().map(|c| c.name).collect();
        f.debug_struct("EditorRegistry")
            .field("custom", &names)
            .finish()
    }
}

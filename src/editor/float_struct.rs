//! One float input per field of an all-float value type

use std::sync::Arc;

use super::{EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::catalog::{is_float_struct, StructInfo};
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Number, Value, ValueType};

pub struct FloatStructEditor {
    base: EditorBase,
    info: Option<Arc<StructInfo>>,
    /// Input per entry of `info.fields`
    inputs: Vec<WidgetId>,
}

impl FloatStructEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            info: None,
            inputs: Vec::new(),
        }
    }

    fn field_text(&self, index: usize) -> String {
        match &self.base.value {
            Value::Struct(s) => s.get(index).map(Value::to_string).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl EditorBehavior for FloatStructEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::FloatStruct
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        matches!(ty, ValueType::Struct(s) if is_float_struct(s))
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "FloatStruct", false);

        let info = match &self.base.value_type {
            ValueType::Struct(ty) => cx.services.float_structs.info(ty),
            _ => None,
        };
        let Some(info) = info else {
            tracing::warn!("{} is not an all-float struct", self.base.value_type);
            return;
        };

        for field in &info.fields {
            let label = cx
                .toolkit
                .create_label(main, &format!("Label_{}", field.name), &format!("{}:", field.label));
            cx.toolkit.set_layout(label, LayoutHints::min(30.0, 25.0));
            let input = cx
                .toolkit
                .create_input(main, &format!("Input_{}", field.name), "...", false);
            cx.toolkit
                .set_layout(input, LayoutHints::min(120.0, 25.0).flexible_width(0.0));
            self.inputs.push(input);
        }
        self.info = Some(info);
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        let Some(info) = &self.info else {
            return;
        };
        for (field, input) in info.fields.iter().zip(&self.inputs) {
            cx.toolkit.set_text(*input, &self.field_text(field.index));
        }
    }

    fn handle_event(&mut self, _cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        let Some(pos) = self.inputs.iter().position(|w| *w == event.widget) else {
            return EditOutcome::Ignored;
        };
        let EventKind::TextChanged(text) = &event.kind else {
            return EditOutcome::Handled;
        };
        let (Some(info), Value::Struct(current)) = (&self.info, &self.base.value) else {
            return EditOutcome::Handled;
        };
        // Invalid or non-finite text leaves the previous value
        let Some(v) = text.trim().parse::<f32>().ok().filter(|v| v.is_finite()) else {
            return EditOutcome::Handled;
        };

        let index = info.fields[pos].index;
        self.base.value = Value::Struct(current.with_field(index, Value::Number(Number::F32(v))));
        EditOutcome::Changed
    }
}

//! Checkbox editor for `bool`

use super::{EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Color, Value, ValueType};

const TRUE_COLOR: Color = Color::rgb(0.42, 0.79, 0.51);
const FALSE_COLOR: Color = Color::rgb(0.79, 0.42, 0.42);

pub struct BoolEditor {
    base: EditorBase,
    toggle: Option<WidgetId>,
    label: Option<WidgetId>,
}

impl BoolEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            toggle: None,
            label: None,
        }
    }

    fn checked(&self) -> bool {
        matches!(self.base.value, Value::Bool(true))
    }
}

impl EditorBehavior for BoolEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Boolean
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        *ty == ValueType::Bool
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Bool", false);
        let toggle = cx
            .toolkit
            .create_toggle(main, "Toggle", "", self.checked());
        cx.toolkit.set_layout(toggle, LayoutHints::min(25.0, 25.0));
        let label = cx.toolkit.create_label(main, "BoolLabel", "");
        cx.toolkit.set_layout(label, LayoutHints::min(60.0, 25.0));
        self.toggle = Some(toggle);
        self.label = Some(label);
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        let on = self.checked();
        if let Some(toggle) = self.toggle {
            cx.toolkit.set_checked(toggle, on);
        }
        if let Some(label) = self.label {
            cx.toolkit.set_text(label, if on { "true" } else { "false" });
            cx.toolkit
                .set_text_color(label, if on { TRUE_COLOR } else { FALSE_COLOR });
        }
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        if Some(event.widget) != self.toggle {
            return EditOutcome::Ignored;
        }
        let EventKind::Toggled(on) = event.kind else {
            return EditOutcome::Handled;
        };
        self.base.value = Value::Bool(on);
        self.refresh_ui_for_value(cx);
        EditOutcome::Changed
    }
}

//! Dropdown restricted to a whitelist

use super::{EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Value, ValueType};

pub struct ListEditor {
    base: EditorBase,
    /// Captured once, the first time the UI is built
    allowed: Option<Vec<Value>>,
    dropdown: Option<WidgetId>,
}

impl ListEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            allowed: None,
            dropdown: None,
        }
    }

    pub fn allowed(&self) -> &[Value] {
        self.allowed.as_deref().unwrap_or(&[])
    }
}

impl EditorBehavior for ListEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::ConstrainedList
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "List", false);

        let allowed: Vec<Value> = cx
            .setting
            .constraint
            .as_ref()
            .and_then(|c| c.whitelist())
            .map(<[Value]>::to_vec)
            .unwrap_or_default();
        let options: Vec<String> = allowed.iter().map(Value::to_string).collect();

        let dropdown = cx.toolkit.create_dropdown(main, "ListDropdown", &options);
        cx.toolkit
            .set_layout(dropdown, LayoutHints::min(150.0, 25.0).flexible_width(0.0));
        self.dropdown = Some(dropdown);
        self.allowed = Some(allowed);
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        let Some(dropdown) = self.dropdown else {
            return;
        };
        let index = self.allowed().iter().position(|v| *v == self.base.value);
        cx.toolkit.set_selected(dropdown, index);
    }

    fn handle_event(&mut self, _cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        if Some(event.widget) != self.dropdown {
            return EditOutcome::Ignored;
        }
        let EventKind::Selected(index) = event.kind else {
            return EditOutcome::Handled;
        };
        match self.allowed().get(index) {
            Some(v) => {
                self.base.value = v.clone();
                EditOutcome::Changed
            }
            None => EditOutcome::Handled,
        }
    }
}

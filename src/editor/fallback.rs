//! String round-trip editor for any type
//!
//! Display and parsing go through the converter registry. A type nobody can
//! convert stays visible in an error state but can't be edited.

use super::{mark_error, EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Value, ValueType};

pub struct FallbackEditor {
    base: EditorBase,
    input: Option<WidgetId>,
    warned: bool,
}

impl FallbackEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            input: None,
            warned: false,
        }
    }

    /// Whether the unconvertible-type warning has been logged
    pub fn has_warned(&self) -> bool {
        self.warned
    }
}

impl EditorBehavior for FallbackEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Fallback
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Fallback", false);
        let input = cx.toolkit.create_input(main, "FallbackInput", "...", false);
        cx.toolkit
            .set_layout(input, LayoutHints::min(120.0, 25.0).flexible_width(9000.0));
        self.input = Some(input);
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        let Some(input) = self.input else {
            return;
        };

        if self.base.value.is_null() && cx.services.converters.can_convert(&self.base.value_type) {
            cx.toolkit.set_text(input, "");
            cx.toolkit.set_placeholder(input, "null");
            mark_error(cx.toolkit, input, false);
            cx.toolkit.set_interactable(input, true);
            return;
        }

        match cx
            .services
            .converters
            .convert_to_string(&self.base.value, &self.base.value_type)
        {
            Ok(text) => {
                cx.toolkit.set_text(input, &text);
                mark_error(cx.toolkit, input, false);
                cx.toolkit.set_interactable(input, true);
            }
            Err(e) => {
                if !self.warned {
                    tracing::warn!("Setting {} can't be edited: {}", cx.setting.key, e);
                    self.warned = true;
                }
                cx.toolkit.set_text(input, &format!("Unsupported type {}", self.base.value_type));
                mark_error(cx.toolkit, input, true);
                cx.toolkit.set_interactable(input, false);
            }
        }
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        if Some(event.widget) != self.input {
            return EditOutcome::Ignored;
        }
        let EventKind::TextChanged(text) = &event.kind else {
            return EditOutcome::Handled;
        };

        match cx
            .services
            .converters
            .convert_from_string(text, &self.base.value_type)
        {
            Ok(v) => {
                self.base.value = v;
                mark_error(cx.toolkit, event.widget, false);
                EditOutcome::Changed
            }
            Err(e) => {
                tracing::trace!("Rejected input for {}: {}", cx.setting.key, e);
                mark_error(cx.toolkit, event.widget, true);
                EditOutcome::Rejected
            }
        }
    }
}

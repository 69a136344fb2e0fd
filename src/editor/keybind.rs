//! Key rebinding editor
//!
//! Drives the process-wide `RebindController`: the rebind button starts
//! listening, the coordinator's frame poll delivers the captured key through
//! `on_key_captured`, and confirm or cancel ends the session.

use super::{EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::input::keys;
use crate::runtime::ColorSlots;
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Color, Value, ValueType};

pub const LISTENING_TEXT: &str = "<i>Press a key...</i>";

const CONFIRM_DISABLED: Color = Color::rgb(0.3, 0.3, 0.3);

#[derive(Debug, Default, Clone, Copy)]
struct Buttons {
    rebind: Option<WidgetId>,
    confirm: Option<WidgetId>,
    cancel: Option<WidgetId>,
}

pub struct KeybindEditor {
    base: EditorBase,
    label: Option<WidgetId>,
    buttons: Buttons,
}

impl KeybindEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            label: None,
            buttons: Buttons::default(),
        }
    }

    /// Show either the rebind button or the confirm/cancel pair
    fn show_listening(&self, cx: &mut EditorCx<'_>, listening: bool) {
        if let Some(b) = self.buttons.rebind {
            cx.toolkit.set_active(b, !listening);
        }
        for b in [self.buttons.confirm, self.buttons.cancel].into_iter().flatten() {
            cx.toolkit.set_active(b, listening);
        }
        if let Some(confirm) = self.buttons.confirm {
            cx.toolkit.set_interactable(confirm, false);
        }
    }

    /// Display name of a captured legacy key in this setting's key type
    fn mapped_name(&self, key: &str) -> Option<String> {
        if keys::is_input_system_key(&self.base.value_type) {
            keys::to_input_system(key)
        } else {
            Some(key.to_string())
        }
    }

    fn begin(&mut self, cx: &mut EditorCx<'_>) -> EditOutcome {
        if !cx.services.rebind().begin(cx.entry) {
            return EditOutcome::Handled;
        }
        if let Some(label) = self.label {
            cx.toolkit.set_text(label, LISTENING_TEXT);
        }
        self.show_listening(cx, true);
        EditOutcome::Handled
    }

    fn confirm(&mut self, cx: &mut EditorCx<'_>) -> EditOutcome {
        let captured = cx.services.rebind().confirm(cx.entry);
        self.show_listening(cx, false);

        let parsed = captured
            .and_then(|key| self.mapped_name(&key))
            .and_then(|name| match &self.base.value_type {
                ValueType::Enum(ty) => ty.parse(&name).ok(),
                _ => None,
            });

        match parsed {
            Some(v) => {
                self.base.value = Value::Enum(v);
                self.refresh_ui_for_value(cx);
                EditOutcome::Changed
            }
            None => {
                self.refresh_ui_for_value(cx);
                EditOutcome::Handled
            }
        }
    }

    fn cancel(&mut self, cx: &mut EditorCx<'_>) -> EditOutcome {
        cx.services.rebind().cancel(cx.entry);
        self.show_listening(cx, false);
        self.refresh_ui_for_value(cx);
        EditOutcome::Handled
    }
}

impl EditorBehavior for KeybindEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Keybind
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        keys::is_key_type(ty)
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Keybind", false);

        let label = cx.toolkit.create_label(main, "KeyLabel", "");
        cx.toolkit
            .set_layout(label, LayoutHints::min(150.0, 25.0).flexible_width(0.0));

        let rebind = cx.toolkit.create_button(main, "RebindButton", "Rebind");
        cx.toolkit.set_layout(rebind, LayoutHints::min(100.0, 25.0));

        let confirm = cx.toolkit.create_button(main, "ConfirmButton", "Confirm");
        cx.toolkit.set_layout(confirm, LayoutHints::min(100.0, 25.0));
        if let Err(e) = cx.runtime.apply_visual_state(
            cx.toolkit,
            confirm,
            &ColorSlots::disabled(CONFIRM_DISABLED),
        ) {
            tracing::debug!("Confirm button left unstyled: {}", e);
        }

        let cancel = cx.toolkit.create_button(main, "CancelButton", "Cancel");
        cx.toolkit.set_layout(cancel, LayoutHints::min(100.0, 25.0));

        self.label = Some(label);
        self.buttons = Buttons {
            rebind: Some(rebind),
            confirm: Some(confirm),
            cancel: Some(cancel),
        };
        self.show_listening(cx, false);
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        if let Some(label) = self.label {
            cx.toolkit.set_text(label, &self.base.value.to_string());
        }
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        let w = Some(event.widget);
        let ours = w == self.buttons.rebind || w == self.buttons.confirm || w == self.buttons.cancel;
        if !ours {
            return EditOutcome::Ignored;
        }
        if event.kind != EventKind::Clicked {
            return EditOutcome::Handled;
        }

        if w == self.buttons.rebind {
            self.begin(cx)
        } else if w == self.buttons.confirm {
            self.confirm(cx)
        } else if w == self.buttons.cancel {
            self.cancel(cx)
        } else {
            EditOutcome::Ignored
        }
    }

    fn on_key_captured(&mut self, cx: &mut EditorCx<'_>, key: &str) {
        let shown = self.mapped_name(key).unwrap_or_else(|| key.to_string());
        if let Some(label) = self.label {
            cx.toolkit.set_text(label, &shown);
        }
        if let Some(confirm) = self.buttons.confirm {
            cx.toolkit.set_interactable(confirm, true);
        }
    }
}

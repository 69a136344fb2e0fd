//! Multi-line text editor
//!
//! The input sits inside a hidden, content-sized backing label that mirrors
//! the typed text so the row grows with it.

use super::{EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Value, ValueType};

/// Longest text pushed into the widget; the value itself is never cut
pub const MAX_DISPLAY_CHARS: usize = 15000;

pub struct TextEditor {
    base: EditorBase,
    backing: Option<WidgetId>,
    input: Option<WidgetId>,
}

impl TextEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            backing: None,
            input: None,
        }
    }
}

/// At most `MAX_DISPLAY_CHARS` characters of `text`
pub fn display_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_DISPLAY_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}

impl EditorBehavior for TextEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Text
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        *ty == ValueType::Text
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Text", false);

        let backing = cx.toolkit.create_label(main, "HiddenLabel", "");
        cx.toolkit.set_active(backing, false);
        cx.toolkit.set_layout(
            backing,
            LayoutHints::min(250.0, 25.0)
                .flexible_width(9000.0)
                .flexible_height(500.0),
        );
        if let Err(e) = cx
            .runtime
            .instantiate_component(cx.toolkit, backing, "ContentSizeFitter")
        {
            tracing::warn!("Text editor for {} has no size fitter: {}", cx.setting.key, e);
        }

        let input = cx.toolkit.create_input(backing, "StringInputField", "...", true);
        cx.toolkit.set_layout(
            input,
            LayoutHints::min(120.0, 25.0)
                .flexible_width(5000.0)
                .flexible_height(5000.0),
        );

        self.backing = Some(backing);
        self.input = Some(input);
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        let (Some(backing), Some(input)) = (self.backing, self.input) else {
            return;
        };
        if !cx.toolkit.is_active(backing) {
            cx.toolkit.set_active(backing, true);
        }

        match &self.base.value {
            Value::Text(s) if !s.is_empty() => {
                let shown = display_text(s);
                cx.toolkit.set_text(input, shown);
                cx.toolkit.set_placeholder(input, shown);
            }
            Value::Text(_) => {
                cx.toolkit.set_text(input, "");
                cx.toolkit.set_placeholder(input, "empty");
            }
            _ => {
                cx.toolkit.set_text(input, "");
                cx.toolkit.set_placeholder(input, "null");
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

        if let Some(backing) = self.backing {
            cx.toolkit.set_text(backing, text);
        }
        if let Some(content) = cx.owner_content {
            cx.toolkit.rebuild_layout(content);
        }
        self.base.value = Value::Text(text.clone());
        EditOutcome::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_truncates_by_chars() {
        let long: String = "é".repeat(MAX_DISPLAY_CHARS + 10);
        assert_eq!(display_text(&long).chars().count(), MAX_DISPLAY_CHARS);
        assert_eq!(display_text("short"), "short");
    }
}

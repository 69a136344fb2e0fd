//! Text input (plus slider for ranges) for every numeric kind

use super::{mark_error, EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::setting::Constraint;
use crate::toolkit::{EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Number, NumberKind, Value, ValueType};

pub struct NumberEditor {
    base: EditorBase,
    input: Option<WidgetId>,
    slider: Option<WidgetId>,
    range: Option<(Number, Number)>,
}

impl NumberEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            input: None,
            slider: None,
            range: None,
        }
    }

    fn kind_of(&self) -> NumberKind {
        match (&self.base.value_type, self.base.value.as_number()) {
            (ValueType::Number(k), _) => *k,
            (_, Some(n)) => n.kind(),
            _ => NumberKind::F64,
        }
    }

    fn clamp(&self, n: Number) -> Number {
        match self.range {
            Some((min, max)) => n.clamp(min, max),
            None => n,
        }
    }

    fn sync_slider(&self, cx: &mut EditorCx<'_>) {
        if let (Some(slider), Some(n)) = (self.slider, self.base.value.as_number()) {
            cx.toolkit.set_slider_value(slider, n.to_f64() as f32);
        }
    }

    fn set_from_text(&mut self, cx: &mut EditorCx<'_>, input: WidgetId, text: &str) -> EditOutcome {
        let parsed = match self.kind_of().parse(text) {
            Ok(n) => n,
            Err(e) => {
                tracing::trace!("Rejected number input: {}", e);
                mark_error(cx.toolkit, input, true);
                return EditOutcome::Rejected;
            }
        };

        let clamped = self.clamp(parsed);
        let candidate = Value::Number(clamped);
        if let Some(c) = &cx.setting.constraint {
            if !c.is_valid(&candidate) {
                mark_error(cx.toolkit, input, true);
                return EditOutcome::Rejected;
            }
        }

        self.base.value = candidate;
        if clamped != parsed {
            cx.toolkit.set_text(input, &clamped.to_string());
        }
        self.sync_slider(cx);
        mark_error(cx.toolkit, input, false);
        EditOutcome::Changed
    }

    fn set_from_slider(&mut self, cx: &mut EditorCx<'_>, position: f32) -> EditOutcome {
        let Some(n) = self.kind_of().from_f64(position as f64) else {
            return EditOutcome::Rejected;
        };
        self.base.value = Value::Number(self.clamp(n));
        if let Some(input) = self.input {
            cx.toolkit.set_text(input, &self.base.value.to_string());
            mark_error(cx.toolkit, input, false);
        }
        EditOutcome::Changed
    }
}

impl EditorBehavior for NumberEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Number
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        matches!(ty, ValueType::Number(_))
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Number", false);

        let input = cx.toolkit.create_input(main, "NumberInput", "...", false);
        cx.toolkit.set_layout(input, LayoutHints::min(120.0, 25.0));
        cx.toolkit.set_active(input, false);
        self.input = Some(input);

        if let Some(Constraint::Range { min, max }) = &cx.setting.constraint {
            if let (Some(min), Some(max)) = (min.as_number(), max.as_number()) {
                if let Some(label) = cx.owner_label {
                    let text = cx.toolkit.text(label).unwrap_or_default();
                    cx.toolkit
                        .set_text(label, &format!("{} [{} - {}]", text, min, max));
                }

                let slider = cx.toolkit.create_slider(
                    main,
                    "ValueSlider",
                    min.to_f64() as f32,
                    max.to_f64() as f32,
                );
                cx.toolkit.set_layout(slider, LayoutHints::min(250.0, 25.0));
                self.slider = Some(slider);
                self.range = Some((min, max));
            }
        }
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        if let Some(input) = self.input {
            cx.toolkit.set_text(input, &self.base.value.to_string());
            if !cx.toolkit.is_active(input) {
                cx.toolkit.set_active(input, true);
            }
            mark_error(cx.toolkit, input, false);
        }
        self.sync_slider(cx);
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        match &event.kind {
            EventKind::TextChanged(text) if Some(event.widget) == self.input => {
                self.set_from_text(cx, event.widget, text)
            }
            EventKind::SliderMoved(v) if Some(event.widget) == self.slider => {
                self.set_from_slider(cx, *v)
            }
            _ if Some(event.widget) == self.input || Some(event.widget) == self.slider => {
                EditOutcome::Handled
            }
            _ => EditOutcome::Ignored,
        }
    }
}

//! Colour editor: swatch plus four channel editors
//!
//! Each channel has a text input and a slider. Either one updates the other,
//! the swatch, and the working value immediately.

use super::{mark_error, EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::toolkit::{Axis, EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{Color, Color32, ColorKind, Value, ValueType};

const CHANNEL_NAMES: [&str; 4] = ["R", "G", "B", "A"];

#[derive(Debug, Clone, Copy)]
struct Channel {
    input: WidgetId,
    slider: WidgetId,
}

pub struct ColorEditor {
    base: EditorBase,
    swatch: Option<WidgetId>,
    channels: Vec<Channel>,
}

impl ColorEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            swatch: None,
            channels: Vec::new(),
        }
    }

    fn color_kind(&self) -> ColorKind {
        match (&self.base.value, &self.base.value_type) {
            (Value::Color32(_), _) => ColorKind::Byte,
            (Value::Color(_), _) => ColorKind::Float,
            (_, ValueType::Color(kind)) => *kind,
            _ => ColorKind::Float,
        }
    }

    /// The working value as float channels
    fn color(&self) -> Color {
        match &self.base.value {
            Value::Color(c) => *c,
            Value::Color32(c) => (*c).into(),
            _ => Color::default(),
        }
    }

    fn channel_text(&self, index: usize) -> String {
        match &self.base.value {
            Value::Color32(c) => c.channel(index).to_string(),
            _ => format!("{:.3}", self.color().channel(index)),
        }
    }

    fn channel_position(&self, index: usize) -> f32 {
        match &self.base.value {
            Value::Color32(c) => c.channel(index) as f32,
            _ => self.color().channel(index),
        }
    }

    /// Write one channel in the value's own encoding
    fn set_channel(&mut self, index: usize, raw: f32) {
        match self.color_kind() {
            ColorKind::Byte => {
                let mut c = match &self.base.value {
                    Value::Color32(c) => *c,
                    _ => Color32::from(self.color()),
                };
                c.set_channel(index, raw.round().clamp(0.0, 255.0) as u8);
                self.base.value = Value::Color32(c);
            }
            ColorKind::Float => {
                let mut c = self.color();
                c.set_channel(index, raw.clamp(0.0, 1.0));
                self.base.value = Value::Color(c);
            }
        }
    }

    fn refresh_swatch(&self, cx: &mut EditorCx<'_>) {
        if let Some(swatch) = self.swatch {
            cx.toolkit.set_color(swatch, self.color());
        }
    }

    fn channel_of(&self, widget: WidgetId) -> Option<(usize, bool)> {
        self.channels.iter().enumerate().find_map(|(i, c)| {
            if c.input == widget {
                Some((i, true))
            } else if c.slider == widget {
                Some((i, false))
            } else {
                None
            }
        })
    }
}

impl EditorBehavior for ColorEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Color
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        matches!(ty, ValueType::Color(_))
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn has_sub_content(&self) -> bool {
        true
    }

    fn sub_content_wanted(&self) -> bool {
        true
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Color", true);
        let swatch = cx.toolkit.create_image(main, "ColorSwatch", self.color());
        cx.toolkit
            .set_layout(swatch, LayoutHints::min(50.0, 25.0).flexible_width(0.0));
        self.swatch = Some(swatch);
    }

    fn construct_sub_content(&mut self, cx: &mut EditorCx<'_>) {
        self.base.sub_constructed = true;
        let Some(sub) = self.base.sub_parent else {
            return;
        };

        let max = self.color_kind().channel_max();
        let group = cx.toolkit.create_group(
            Some(sub),
            "ColorChannels",
            Axis::Vertical,
            LayoutHints::min_height(25.0).flexible_width(9000.0),
        );
        for (i, name) in CHANNEL_NAMES.iter().enumerate() {
            let row = cx.toolkit.create_group(
                Some(group),
                &format!("Channel_{}", name),
                Axis::Horizontal,
                LayoutHints::min_height(25.0),
            );
            let label = cx.toolkit.create_label(row, "ChannelLabel", &format!("{}:", name));
            cx.toolkit.set_layout(label, LayoutHints::min(50.0, 25.0));

            let input = cx.toolkit.create_input(row, "ChannelInput", "...", false);
            cx.toolkit.set_layout(input, LayoutHints::min(120.0, 25.0));
            cx.toolkit.set_text(input, &self.channel_text(i));

            let slider = cx.toolkit.create_slider(row, "ChannelSlider", 0.0, max);
            cx.toolkit.set_layout(slider, LayoutHints::min(250.0, 25.0));
            cx.toolkit.set_slider_value(slider, self.channel_position(i));

            self.channels.push(Channel { input, slider });
        }
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        self.refresh_swatch(cx);
        for (i, ch) in self.channels.iter().enumerate() {
            cx.toolkit.set_text(ch.input, &self.channel_text(i));
            cx.toolkit.set_slider_value(ch.slider, self.channel_position(i));
            mark_error(cx.toolkit, ch.input, false);
        }
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        let Some((index, from_input)) = self.channel_of(event.widget) else {
            return EditOutcome::Ignored;
        };
        let ch = self.channels[index];

        match &event.kind {
            EventKind::TextChanged(text) if from_input => {
                let Some(raw) = text.trim().parse::<f32>().ok().filter(|v| v.is_finite()) else {
                    mark_error(cx.toolkit, ch.input, true);
                    return EditOutcome::Handled;
                };
                mark_error(cx.toolkit, ch.input, false);
                self.set_channel(index, raw);
                cx.toolkit.set_slider_value(ch.slider, self.channel_position(index));
            }
            EventKind::SliderMoved(raw) if !from_input => {
                self.set_channel(index, *raw);
                cx.toolkit.set_text(ch.input, &self.channel_text(index));
                mark_error(cx.toolkit, ch.input, false);
            }
            _ => return EditOutcome::Handled,
        }

        self.refresh_swatch(cx);
        EditOutcome::Changed
    }
}

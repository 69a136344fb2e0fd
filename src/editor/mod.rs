//! Editor behaviours
//!
//! One behaviour per value-type family. A behaviour owns its widget handles
//! and a working copy of the value; it never touches the store. Interaction
//! comes in through `handle_event`, and a `Changed` outcome tells the owning
//! entry to pick up the new working value.

mod boolean;
mod color;
mod enums;
mod fallback;
mod float_struct;
mod keybind;
mod list;
mod number;
mod registry;
mod text;

pub use boolean::BoolEditor;
pub use color::ColorEditor;
pub use enums::{EnumEditor, FlagsEditor};
pub use fallback::FallbackEditor;
pub use float_struct::FloatStructEditor;
pub use keybind::{KeybindEditor, LISTENING_TEXT};
pub use list::ListEditor;
pub use number::NumberEditor;
pub use registry::{CustomEditor, EditorRegistry};
pub use text::{TextEditor, MAX_DISPLAY_CHARS};

use crate::entry::EntryId;
use crate::runtime::RuntimeCapability;
use crate::services::Services;
use crate::setting::Setting;
use crate::toolkit::{Axis, LayoutHints, Toolkit, WidgetEvent, WidgetId};
use crate::value::{Color, Value, ValueType};

pub const EXPAND_TEXT: &str = "▲ Expand to edit";
pub const COLLAPSE_TEXT: &str = "▼ Click to hide";

/// Which behaviour an entry ended up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Boolean,
    Number,
    Text,
    Keybind,
    Enum,
    Flags,
    Color,
    FloatStruct,
    ConstrainedList,
    /// Registered custom behaviour, by type name
    Custom(&'static str),
    Fallback,
}

/// Result of offering a widget event to a behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Not one of this behaviour's widgets
    Ignored,
    /// Consumed; the working value is unchanged
    Handled,
    /// The working value changed and should be pushed to the entry
    Changed,
    /// Input refused (parse or constraint failure), shown as an error state
    Rejected,
}

/// What a behaviour may touch while running
pub struct EditorCx<'a> {
    pub toolkit: &'a mut dyn Toolkit,
    pub runtime: &'a dyn RuntimeCapability,
    pub services: &'a Services,
    pub setting: &'a Setting,
    pub entry: EntryId,
    /// The entry's "key (type)" label
    pub owner_label: Option<WidgetId>,
    /// The entry's content group, for layout rebuilds
    pub owner_content: Option<WidgetId>,
}

/// State shared by every behaviour
#[derive(Debug, Clone, Default)]
pub struct EditorBase {
    pub value: Value,
    pub value_type: ValueType,
    pub constructed: bool,
    pub main_parent: Option<WidgetId>,
    pub sub_parent: Option<WidgetId>,
    pub main_content: Option<WidgetId>,
    pub expand_button: Option<WidgetId>,
    pub sub_constructed: bool,
}

impl EditorBase {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            value,
            value_type,
            ..Self::default()
        }
    }

    /// Build the main row (plus the expand button when there is sub-content)
    pub fn construct_main(&mut self, cx: &mut EditorCx<'_>, name: &str, has_sub: bool) -> WidgetId {
        self.constructed = true;

        let main = cx.toolkit.create_group(
            self.main_parent,
            &format!("Editor_{}", name),
            Axis::Horizontal,
            LayoutHints::min(175.0, 25.0).flexible_width(9000.0),
        );
        self.main_content = Some(main);

        if has_sub {
            let btn = cx
                .toolkit
                .create_button(main, "ExpandSubcontentButton", EXPAND_TEXT);
            cx.toolkit.set_layout(btn, LayoutHints::min(120.0, 25.0));
            self.expand_button = Some(btn);
        }
        main
    }
}

/// Set an input's text colour to the error or normal state
pub(crate) fn mark_error(toolkit: &mut dyn Toolkit, widget: WidgetId, error: bool) {
    toolkit.set_text_color(widget, if error { Color::RED } else { Color::WHITE });
}

pub trait EditorBehavior: Send + Sync {
    fn kind(&self) -> EditorKind;

    /// Used only when probing custom behaviours
    fn supports_type(&self, _ty: &ValueType) -> bool {
        true
    }

    fn base(&self) -> &EditorBase;
    fn base_mut(&mut self) -> &mut EditorBase;

    fn value(&self) -> &Value {
        &self.base().value
    }

    fn set_value(&mut self, value: Value) {
        self.base_mut().value = value;
    }

    fn value_type(&self) -> &ValueType {
        &self.base().value_type
    }

    fn has_sub_content(&self) -> bool {
        false
    }

    fn sub_content_wanted(&self) -> bool {
        false
    }

    /// Build widgets under `base().main_parent`; called at most once
    fn construct_ui(&mut self, cx: &mut EditorCx<'_>);

    fn construct_sub_content(&mut self, _cx: &mut EditorCx<'_>) {
        self.base_mut().sub_constructed = true;
    }

    /// Push the working value into the widgets
    fn refresh_ui_for_value(&mut self, _cx: &mut EditorCx<'_>) {}

    /// The stored value changed out of band
    fn on_value_updated(&mut self, cx: &mut EditorCx<'_>) {
        if !self.base().constructed {
            self.construct_ui(cx);
        }
        self.refresh_ui_for_value(cx);
    }

    /// Sync the expand button and sub-region with `sub_content_wanted`
    fn refresh_sub_content_state(&mut self, cx: &mut EditorCx<'_>) {
        if !self.has_sub_content() {
            return;
        }
        let wanted = self.sub_content_wanted();
        if let Some(btn) = self.base().expand_button {
            if cx.toolkit.is_active(btn) != wanted {
                cx.toolkit.set_active(btn, wanted);
            }
        }
        let open = self
            .base()
            .sub_parent
            .is_some_and(|sub| cx.toolkit.is_active(sub));
        if !wanted && open {
            self.toggle_sub_content(cx);
        }
    }

    /// Open or close the sub-region, building it on first use
    fn toggle_sub_content(&mut self, cx: &mut EditorCx<'_>) {
        let Some(sub) = self.base().sub_parent else {
            return;
        };
        let opening = !cx.toolkit.is_active(sub);
        cx.toolkit.set_active(sub, opening);
        if opening {
            cx.toolkit.set_last_sibling(sub);
        }
        if let Some(btn) = self.base().expand_button {
            cx.toolkit
                .set_text(btn, if opening { COLLAPSE_TEXT } else { EXPAND_TEXT });
        }

        if !self.base().sub_constructed {
            self.construct_sub_content(cx);
        }
        self.refresh_sub_content_state(cx);
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome;

    /// A key was captured for this entry's pending rebind
    fn on_key_captured(&mut self, _cx: &mut EditorCx<'_>, _key: &str) {}
}

//! Enum dropdown and flags checklist
//!
//! Both read their member list from the process-wide enum name cache. Flags
//! state deliberately round-trips through the display string: checkbox state
//! is derived by splitting the current value's text on commas, and a toggle
//! re-parses the comma-joined checked names.

use std::sync::Arc;

use super::{EditOutcome, EditorBase, EditorBehavior, EditorCx, EditorKind};
use crate::catalog::EnumName;
use crate::toolkit::{Axis, EventKind, LayoutHints, WidgetEvent, WidgetId};
use crate::value::{EnumType, Value, ValueType};

fn enum_type(value: &Value, value_type: &ValueType) -> Option<Arc<EnumType>> {
    match (value, value_type) {
        (Value::Enum(e), _) => Some(Arc::clone(&e.ty)),
        (_, ValueType::Enum(ty)) => Some(Arc::clone(ty)),
        _ => None,
    }
}

// ============================================================================
// Enum
// ============================================================================

pub struct EnumEditor {
    base: EditorBase,
    names: Option<Arc<[EnumName]>>,
    dropdown: Option<WidgetId>,
}

impl EnumEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            names: None,
            dropdown: None,
        }
    }

    /// Cached names this editor was built with
    pub fn names(&self) -> Option<&Arc<[EnumName]>> {
        self.names.as_ref()
    }
}

impl EditorBehavior for EnumEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Enum
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        matches!(ty, ValueType::Enum(_))
    }

    fn base(&self) -> &EditorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut EditorBase {
        &mut self.base
    }

    fn construct_ui(&mut self, cx: &mut EditorCx<'_>) {
        let main = self.base.construct_main(cx, "Enum", false);

        let names = enum_type(&self.base.value, &self.base.value_type)
            .map(|ty| cx.services.enum_names.get_or_build(&ty));
        let options: Vec<String> = names
            .iter()
            .flat_map(|n| n.iter().map(|e| e.name.clone()))
            .collect();

        let dropdown = cx.toolkit.create_dropdown(main, "EnumDropdown", &options);
        cx.toolkit
            .set_layout(dropdown, LayoutHints::min(150.0, 25.0).flexible_width(0.0));
        self.dropdown = Some(dropdown);
        self.names = names;
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        let (Some(dropdown), Some(names)) = (self.dropdown, &self.names) else {
            return;
        };
        let current = self.base.value.to_string();
        let index = names.iter().position(|n| n.name == current);
        cx.toolkit.set_selected(dropdown, index);
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        if Some(event.widget) != self.dropdown {
            return EditOutcome::Ignored;
        }
        let EventKind::Selected(index) = event.kind else {
            return EditOutcome::Handled;
        };
        let Some(name) = self.names.as_ref().and_then(|n| n.get(index)) else {
            return EditOutcome::Handled;
        };
        let Some(ty) = enum_type(&self.base.value, &self.base.value_type) else {
            return EditOutcome::Handled;
        };

        match ty.parse(&name.name) {
            Ok(v) => {
                self.base.value = Value::Enum(v);
                EditOutcome::Changed
            }
            Err(e) => {
                tracing::warn!("Could not select {} on {}: {}", name.name, cx.setting.key, e);
                EditOutcome::Rejected
            }
        }
    }
}

// ============================================================================
// Flags
// ============================================================================

struct FlagToggle {
    widget: WidgetId,
    name: String,
    checked: bool,
}

pub struct FlagsEditor {
    base: EditorBase,
    names: Option<Arc<[EnumName]>>,
    label: Option<WidgetId>,
    toggles: Vec<FlagToggle>,
}

impl FlagsEditor {
    pub fn new(value: Value, value_type: ValueType) -> Self {
        Self {
            base: EditorBase::new(value, value_type),
            names: None,
            label: None,
            toggles: Vec::new(),
        }
    }

    /// Names set in the current value, split from its display string
    fn set_names(&self) -> Vec<String> {
        self.base
            .value
            .to_string()
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }

    fn sync_toggles(&mut self, cx: &mut EditorCx<'_>) {
        let set = self.set_names();
        for t in &mut self.toggles {
            t.checked = set.contains(&t.name);
            cx.toolkit.set_checked(t.widget, t.checked);
        }
    }
}

impl EditorBehavior for FlagsEditor {
    fn kind(&self) -> EditorKind {
        EditorKind::Flags
    }

    fn supports_type(&self, ty: &ValueType) -> bool {
        matches!(ty, ValueType::Enum(e) if e.flags)
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
        let main = self.base.construct_main(cx, "Flags", true);
        let label = cx.toolkit.create_label(main, "FlagsLabel", "");
        cx.toolkit
            .set_layout(label, LayoutHints::min(150.0, 25.0).flexible_width(9000.0));
        self.label = Some(label);
        self.names = enum_type(&self.base.value, &self.base.value_type)
            .map(|ty| cx.services.enum_names.get_or_build(&ty));
    }

    fn construct_sub_content(&mut self, cx: &mut EditorCx<'_>) {
        self.base.sub_constructed = true;
        let Some(sub) = self.base.sub_parent else {
            return;
        };

        let group = cx.toolkit.create_group(
            Some(sub),
            "FlagsGroup",
            Axis::Vertical,
            LayoutHints::min_height(25.0).flexible_width(9000.0),
        );
        let set = self.set_names();
        let names = self.names.clone().unwrap_or_else(|| Arc::from(Vec::new()));
        for name in names.iter() {
            let checked = set.contains(&name.name);
            let widget = cx
                .toolkit
                .create_toggle(group, &format!("Toggle_{}", name.name), &name.name, checked);
            cx.toolkit.set_layout(widget, LayoutHints::min(100.0, 25.0));
            self.toggles.push(FlagToggle {
                widget,
                name: name.name.clone(),
                checked,
            });
        }
    }

    fn refresh_ui_for_value(&mut self, cx: &mut EditorCx<'_>) {
        if let Some(label) = self.label {
            cx.toolkit.set_text(label, &self.base.value.to_string());
        }
        if self.base.sub_constructed {
            self.sync_toggles(cx);
        }
    }

    fn handle_event(&mut self, cx: &mut EditorCx<'_>, event: &WidgetEvent) -> EditOutcome {
        let Some(pos) = self.toggles.iter().position(|t| t.widget == event.widget) else {
            return EditOutcome::Ignored;
        };
        let EventKind::Toggled(on) = event.kind else {
            return EditOutcome::Handled;
        };

        let selected: Vec<&str> = self
            .toggles
            .iter()
            .enumerate()
            .filter(|(i, t)| if *i == pos { on } else { t.checked })
            .map(|(_, t)| t.name.as_str())
            .collect();

        if selected.is_empty() {
            // At least one flag stays set
            cx.toolkit.set_checked(event.widget, true);
            return EditOutcome::Handled;
        }

        let Some(ty) = enum_type(&self.base.value, &self.base.value_type) else {
            return EditOutcome::Handled;
        };
        match ty.parse(&selected.join(", ")) {
            Ok(v) => {
                self.toggles[pos].checked = on;
                self.base.value = Value::Enum(v);
                if let Some(label) = self.label {
                    cx.toolkit.set_text(label, &self.base.value.to_string());
                }
                EditOutcome::Changed
            }
            Err(e) => {
                tracing::warn!("Could not compose flags for {}: {}", cx.setting.key, e);
                cx.toolkit.set_checked(event.widget, self.toggles[pos].checked);
                EditOutcome::Rejected
            }
        }
    }
}

//! Widget toolkit collaborator
//!
//! Widget construction and layout belong to the host. The editor core only
//! creates widgets through this trait, addresses them by opaque `WidgetId`,
//! and receives interaction as `WidgetEvent` data.

mod headless;

pub use headless::{HeadlessToolkit, MemberStyle, Node, NodeKind};

use crate::value::Color;

/// Opaque widget handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Layout sizing hints, `None` leaves the toolkit default
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutHints {
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub flexible_width: Option<f32>,
    pub flexible_height: Option<f32>,
}

impl LayoutHints {
    pub fn min(width: f32, height: f32) -> Self {
        Self {
            min_width: Some(width),
            min_height: Some(height),
            ..Self::default()
        }
    }

    pub fn min_height(height: f32) -> Self {
        Self {
            min_height: Some(height),
            ..Self::default()
        }
    }

    pub fn flexible_width(mut self, width: f32) -> Self {
        self.flexible_width = Some(width);
        self
    }

    pub fn flexible_height(mut self, height: f32) -> Self {
        self.flexible_height = Some(height);
        self
    }
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    TextChanged(String),
    Toggled(bool),
    SliderMoved(f32),
    Selected(usize),
    Clicked,
}

/// A user interaction with one widget
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEvent {
    pub widget: WidgetId,
    pub kind: EventKind,
}

impl WidgetEvent {
    pub fn clicked(widget: WidgetId) -> Self {
        Self {
            widget,
            kind: EventKind::Clicked,
        }
    }

    pub fn text(widget: WidgetId, text: impl Into<String>) -> Self {
        Self {
            widget,
            kind: EventKind::TextChanged(text.into()),
        }
    }

    pub fn toggled(widget: WidgetId, on: bool) -> Self {
        Self {
            widget,
            kind: EventKind::Toggled(on),
        }
    }

    pub fn slider(widget: WidgetId, value: f32) -> Self {
        Self {
            widget,
            kind: EventKind::SliderMoved(value),
        }
    }

    pub fn selected(widget: WidgetId, index: usize) -> Self {
        Self {
            widget,
            kind: EventKind::Selected(index),
        }
    }
}

// ============================================================================
// Toolkit
// ============================================================================

pub trait Toolkit {
    // === Construction ===
    fn create_group(
        &mut self,
        parent: Option<WidgetId>,
        name: &str,
        axis: Axis,
        layout: LayoutHints,
    ) -> WidgetId;
    fn create_label(&mut self, parent: WidgetId, name: &str, text: &str) -> WidgetId;
    fn create_button(&mut self, parent: WidgetId, name: &str, text: &str) -> WidgetId;
    fn create_toggle(&mut self, parent: WidgetId, name: &str, label: &str, checked: bool)
        -> WidgetId;
    fn create_slider(&mut self, parent: WidgetId, name: &str, min: f32, max: f32) -> WidgetId;
    fn create_input(
        &mut self,
        parent: WidgetId,
        name: &str,
        placeholder: &str,
        multiline: bool,
    ) -> WidgetId;
    fn create_dropdown(&mut self, parent: WidgetId, name: &str, options: &[String]) -> WidgetId;
    fn create_image(&mut self, parent: WidgetId, name: &str, color: Color) -> WidgetId;

    // === Display state ===
    fn set_layout(&mut self, widget: WidgetId, layout: LayoutHints);
    fn set_text(&mut self, widget: WidgetId, text: &str);
    fn text(&self, widget: WidgetId) -> Option<String>;
    fn set_placeholder(&mut self, widget: WidgetId, text: &str);
    fn set_text_color(&mut self, widget: WidgetId, color: Color);
    fn set_color(&mut self, widget: WidgetId, color: Color);
    fn set_checked(&mut self, widget: WidgetId, checked: bool);
    fn set_slider_value(&mut self, widget: WidgetId, value: f32);
    fn set_options(&mut self, widget: WidgetId, options: &[String]);
    fn set_selected(&mut self, widget: WidgetId, index: Option<usize>);
    fn set_active(&mut self, widget: WidgetId, active: bool);
    fn is_active(&self, widget: WidgetId) -> bool;
    fn set_interactable(&mut self, widget: WidgetId, interactable: bool);
    fn set_last_sibling(&mut self, widget: WidgetId);
    fn destroy(&mut self, widget: WidgetId);
    fn rebuild_layout(&mut self, widget: WidgetId);

    // === Low-level primitives used by runtime backends ===
    /// Attach a component of a named type; `false` if it can't be created
    fn add_component(&mut self, widget: WidgetId, type_name: &str) -> bool;
    /// Create a hidden, unparented object of a named type
    fn create_object(&mut self, type_name: &str) -> Option<WidgetId>;
    /// Make a named type known to an interop layer
    fn register_interop_type(&mut self, type_name: &str) -> bool;
    fn has_member(&self, widget: WidgetId, member: &str) -> bool;
    fn set_member_color(&mut self, widget: WidgetId, member: &str, color: Color) -> bool;
    fn set_member_f32(&mut self, widget: WidgetId, member: &str, value: f32) -> bool;
}

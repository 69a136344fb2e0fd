//! In-memory toolkit that records the widget tree
//!
//! Used by hosts that render elsewhere and by the test-suite. Interaction is
//! simulated with the `type_text`/`click`/`toggle`/`slide`/`select` helpers,
//! which update the recorded state the way a real widget would and return the
//! matching `WidgetEvent` for dispatch.

use std::collections::{HashMap, HashSet};

use super::{Axis, LayoutHints, Toolkit, WidgetEvent, WidgetId};
use crate::value::Color;

/// How colour slots on selectable widgets are exposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberStyle {
    /// `normalColor`, `pressedColor`, ...
    #[default]
    Properties,
    /// `m_NormalColor`, `m_PressedColor`, ...
    Fields,
}

const PROPERTY_MEMBERS: &[&str] = &[
    "normalColor",
    "highlightedColor",
    "pressedColor",
    "disabledColor",
    "colorMultiplier",
];

const FIELD_MEMBERS: &[&str] = &[
    "m_NormalColor",
    "m_HighlightedColor",
    "m_PressedColor",
    "m_DisabledColor",
    "m_ColorMultiplier",
];

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Group(Axis),
    Label,
    Button,
    Toggle,
    Slider { min: f32, max: f32 },
    Input { multiline: bool },
    Dropdown,
    Image,
    Object(String),
}

impl NodeKind {
    fn is_selectable(&self) -> bool {
        matches!(
            self,
            NodeKind::Button
                | NodeKind::Toggle
                | NodeKind::Slider { .. }
                | NodeKind::Input { .. }
                | NodeKind::Dropdown
        )
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: WidgetId,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
    pub kind: NodeKind,
    pub name: String,
    pub text: String,
    pub placeholder: String,
    pub text_color: Option<Color>,
    pub color: Option<Color>,
    pub checked: bool,
    pub slider_value: f32,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub active: bool,
    pub interactable: bool,
    pub layout: LayoutHints,
    pub components: Vec<String>,
    pub member_colors: HashMap<String, Color>,
    pub member_floats: HashMap<String, f32>,
}

impl Node {
    fn new(id: WidgetId, parent: Option<WidgetId>, kind: NodeKind, name: &str) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            kind,
            name: name.to_string(),
            text: String::new(),
            placeholder: String::new(),
            text_color: None,
            color: None,
            checked: false,
            slider_value: 0.0,
            options: Vec::new(),
            selected: None,
            active: true,
            interactable: true,
            layout: LayoutHints::default(),
            components: Vec::new(),
            member_colors: HashMap::new(),
            member_floats: HashMap::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    nodes: Vec<Option<Node>>,
    member_style: MemberStyle,
    require_registration: bool,
    interop_types: HashSet<String>,
    layout_rebuilds: usize,
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose colour slots as fields instead of properties
    pub fn with_member_style(mut self, style: MemberStyle) -> Self {
        self.member_style = style;
        self
    }

    /// Refuse components and objects of types not registered for interop
    pub fn requiring_interop_registration(mut self) -> Self {
        self.require_registration = true;
        self
    }

    fn insert(&mut self, parent: Option<WidgetId>, kind: NodeKind, name: &str) -> WidgetId {
        let id = WidgetId(self.nodes.len() as u32);
        self.nodes.push(Some(Node::new(id, parent, kind, name)));
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.push(id);
        }
        id
    }

    fn node_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    fn allowed(&self, type_name: &str) -> bool {
        !self.require_registration || self.interop_types.contains(type_name)
    }

    // === Inspection ===

    pub fn node(&self, id: WidgetId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn exists(&self, id: WidgetId) -> bool {
        self.node(id).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// First live widget with this name
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.nodes.iter().flatten().find(|n| n.name == name).map(|n| n.id)
    }

    pub fn find_all(&self, name: &str) -> Vec<WidgetId> {
        self.nodes
            .iter()
            .flatten()
            .filter(|n| n.name == name)
            .map(|n| n.id)
            .collect()
    }

    /// First descendant of `root` (depth-first, in child order) with this name
    pub fn find_under(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        self.descendants_named(root, name).into_iter().next()
    }

    pub fn descendants_named(&self, root: WidgetId, name: &str) -> Vec<WidgetId> {
        let mut found = Vec::new();
        let mut stack: Vec<WidgetId> = self
            .node(root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                if node.name == name {
                    found.push(id);
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        found
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Active, and every ancestor active
    pub fn is_visible(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.node(cur) {
                Some(n) if n.active => current = n.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn is_checked(&self, id: WidgetId) -> bool {
        self.node(id).is_some_and(|n| n.checked)
    }

    pub fn is_interactable(&self, id: WidgetId) -> bool {
        self.node(id).is_some_and(|n| n.interactable)
    }

    pub fn slider_value(&self, id: WidgetId) -> Option<f32> {
        self.node(id).map(|n| n.slider_value)
    }

    pub fn placeholder(&self, id: WidgetId) -> Option<&str> {
        self.node(id).map(|n| n.placeholder.as_str())
    }

    pub fn text_color(&self, id: WidgetId) -> Option<Color> {
        self.node(id).and_then(|n| n.text_color)
    }

    pub fn color(&self, id: WidgetId) -> Option<Color> {
        self.node(id).and_then(|n| n.color)
    }

    pub fn options(&self, id: WidgetId) -> &[String] {
        self.node(id).map(|n| n.options.as_slice()).unwrap_or(&[])
    }

    pub fn selected(&self, id: WidgetId) -> Option<usize> {
        self.node(id).and_then(|n| n.selected)
    }

    pub fn member_color(&self, id: WidgetId, member: &str) -> Option<Color> {
        self.node(id).and_then(|n| n.member_colors.get(member).copied())
    }

    pub fn member_f32(&self, id: WidgetId, member: &str) -> Option<f32> {
        self.node(id).and_then(|n| n.member_floats.get(member).copied())
    }

    pub fn components(&self, id: WidgetId) -> &[String] {
        self.node(id).map(|n| n.components.as_slice()).unwrap_or(&[])
    }

    pub fn is_interop_registered(&self, type_name: &str) -> bool {
        self.interop_types.contains(type_name)
    }

    pub fn layout_rebuilds(&self) -> usize {
        self.layout_rebuilds
    }

    // === Simulated interaction ===

    pub fn type_text(&mut self, id: WidgetId, text: &str) -> WidgetEvent {
        self.set_text(id, text);
        WidgetEvent::text(id, text)
    }

    pub fn click(&mut self, id: WidgetId) -> WidgetEvent {
        WidgetEvent::clicked(id)
    }

    pub fn toggle(&mut self, id: WidgetId, on: bool) -> WidgetEvent {
        self.set_checked(id, on);
        WidgetEvent::toggled(id, on)
    }

    pub fn slide(&mut self, id: WidgetId, value: f32) -> WidgetEvent {
        self.set_slider_value(id, value);
        WidgetEvent::slider(id, value)
    }

    pub fn select(&mut self, id: WidgetId, index: usize) -> WidgetEvent {
        self.set_selected(id, Some(index));
        WidgetEvent::selected(id, index)
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_group(
        &mut self,
        parent: Option<WidgetId>,
        name: &str,
        axis: Axis,
        layout: LayoutHints,
    ) -> WidgetId {
        let id = self.insert(parent, NodeKind::Group(axis), name);
        self.set_layout(id, layout);
        id
    }

    fn create_label(&mut self, parent: WidgetId, name: &str, text: &str) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Label, name);
        self.set_text(id, text);
        id
    }

    fn create_button(&mut self, parent: WidgetId, name: &str, text: &str) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Button, name);
        self.set_text(id, text);
        id
    }

    fn create_toggle(
        &mut self,
        parent: WidgetId,
        name: &str,
        label: &str,
        checked: bool,
    ) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Toggle, name);
        self.set_text(id, label);
        self.set_checked(id, checked);
        id
    }

    fn create_slider(&mut self, parent: WidgetId, name: &str, min: f32, max: f32) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Slider { min, max }, name);
        self.set_slider_value(id, min);
        id
    }

    fn create_input(
        &mut self,
        parent: WidgetId,
        name: &str,
        placeholder: &str,
        multiline: bool,
    ) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Input { multiline }, name);
        self.set_placeholder(id, placeholder);
        id
    }

    fn create_dropdown(&mut self, parent: WidgetId, name: &str, options: &[String]) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Dropdown, name);
        self.set_options(id, options);
        id
    }

    fn create_image(&mut self, parent: WidgetId, name: &str, color: Color) -> WidgetId {
        let id = self.insert(Some(parent), NodeKind::Image, name);
        self.set_color(id, color);
        id
    }

    fn set_layout(&mut self, widget: WidgetId, layout: LayoutHints) {
        if let Some(n) = self.node_mut(widget) {
            n.layout = layout;
        }
    }

    fn set_text(&mut self, widget: WidgetId, text: &str) {
        if let Some(n) = self.node_mut(widget) {
            n.text = text.to_string();
        }
    }

    fn text(&self, widget: WidgetId) -> Option<String> {
        self.node(widget).map(|n| n.text.clone())
    }

    fn set_placeholder(&mut self, widget: WidgetId, text: &str) {
        if let Some(n) = self.node_mut(widget) {
            n.placeholder = text.to_string();
        }
    }

    fn set_text_color(&mut self, widget: WidgetId, color: Color) {
        if let Some(n) = self.node_mut(widget) {
            n.text_color = Some(color);
        }
    }

    fn set_color(&mut self, widget: WidgetId, color: Color) {
        if let Some(n) = self.node_mut(widget) {
            n.color = Some(color);
        }
    }

    fn set_checked(&mut self, widget: WidgetId, checked: bool) {
        if let Some(n) = self.node_mut(widget) {
            n.checked = checked;
        }
    }

    fn set_slider_value(&mut self, widget: WidgetId, value: f32) {
        if let Some(n) = self.node_mut(widget) {
            n.slider_value = match n.kind {
                NodeKind::Slider { min, max } => value.clamp(min, max),
                _ => value,
            };
        }
    }

    fn set_options(&mut self, widget: WidgetId, options: &[String]) {
        if let Some(n) = self.node_mut(widget) {
            n.options = options.to_vec();
            n.selected = n.selected.filter(|&i| i < n.options.len());
        }
    }

    fn set_selected(&mut self, widget: WidgetId, index: Option<usize>) {
        if let Some(n) = self.node_mut(widget) {
            n.selected = index.filter(|&i| i < n.options.len());
        }
    }

    fn set_active(&mut self, widget: WidgetId, active: bool) {
        if let Some(n) = self.node_mut(widget) {
            n.active = active;
        }
    }

    fn is_active(&self, widget: WidgetId) -> bool {
        self.node(widget).is_some_and(|n| n.active)
    }

    fn set_interactable(&mut self, widget: WidgetId, interactable: bool) {
        if let Some(n) = self.node_mut(widget) {
            n.interactable = interactable;
        }
    }

    fn set_last_sibling(&mut self, widget: WidgetId) {
        let Some(parent) = self.node(widget).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != widget);
            p.children.push(widget);
        }
    }

    fn destroy(&mut self, widget: WidgetId) {
        let parent = self.node(widget).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.node_mut(p)) {
            p.children.retain(|&c| c != widget);
        }

        let mut stack = vec![widget];
        while let Some(id) = stack.pop() {
            if let Some(slot) = self.nodes.get_mut(id.0 as usize) {
                if let Some(node) = slot.take() {
                    stack.extend(node.children);
                }
            }
        }
    }

    fn rebuild_layout(&mut self, _widget: WidgetId) {
        self.layout_rebuilds += 1;
    }

    fn add_component(&mut self, widget: WidgetId, type_name: &str) -> bool {
        if !self.allowed(type_name) {
            return false;
        }
        match self.node_mut(widget) {
            Some(n) => {
                n.components.push(type_name.to_string());
                true
            }
            None => false,
        }
    }

    fn create_object(&mut self, type_name: &str) -> Option<WidgetId> {
        if !self.allowed(type_name) {
            return None;
        }
        let id = self.insert(None, NodeKind::Object(type_name.to_string()), type_name);
        self.set_active(id, false);
        Some(id)
    }

    fn register_interop_type(&mut self, type_name: &str) -> bool {
        self.interop_types.insert(type_name.to_string());
        true
    }

    fn has_member(&self, widget: WidgetId, member: &str) -> bool {
        let Some(node) = self.node(widget) else {
            return false;
        };
        if !node.kind.is_selectable() {
            return false;
        }
        match self.member_style {
            MemberStyle::Properties => PROPERTY_MEMBERS.contains(&member),
            MemberStyle::Fields => FIELD_MEMBERS.contains(&member),
        }
    }

    fn set_member_color(&mut self, widget: WidgetId, member: &str, color: Color) -> bool {
        if !self.has_member(widget, member) {
            return false;
        }
        if let Some(n) = self.node_mut(widget) {
            n.member_colors.insert(member.to_string(), color);
        }
        true
    }

    fn set_member_f32(&mut self, widget: WidgetId, member: &str, value: f32) -> bool {
        if !self.has_member(widget, member) {
            return false;
        }
        if let Some(n) = self.node_mut(widget) {
            n.member_floats.insert(member.to_string(), value);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_and_visibility() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.create_group(None, "Root", Axis::Vertical, LayoutHints::default());
        let label = tk.create_label(root, "Label", "hi");
        assert!(tk.is_visible(label));
        tk.set_active(root, false);
        assert!(!tk.is_visible(label));
        assert!(tk.is_active(label));
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.create_group(None, "Root", Axis::Vertical, LayoutHints::default());
        let group = tk.create_group(Some(root), "Group", Axis::Horizontal, LayoutHints::default());
        let label = tk.create_label(group, "Label", "x");
        tk.destroy(group);
        assert!(!tk.exists(label));
        assert!(tk.children(root).is_empty());
    }

    #[test]
    fn test_last_sibling_reorders() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.create_group(None, "Root", Axis::Vertical, LayoutHints::default());
        let a = tk.create_label(root, "A", "");
        let b = tk.create_label(root, "B", "");
        tk.set_last_sibling(a);
        assert_eq!(tk.children(root), &[b, a]);
    }

    #[test]
    fn test_members_follow_style() {
        let mut tk = HeadlessToolkit::new().with_member_style(MemberStyle::Fields);
        let root = tk.create_group(None, "Root", Axis::Vertical, LayoutHints::default());
        let button = tk.create_button(root, "Button", "ok");
        assert!(!tk.has_member(button, "normalColor"));
        assert!(tk.set_member_color(button, "m_NormalColor", Color::RED));
        assert_eq!(tk.member_color(button, "m_NormalColor"), Some(Color::RED));
        assert!(!tk.has_member(root, "m_NormalColor"));
    }

    #[test]
    fn test_registration_gate() {
        let mut tk = HeadlessToolkit::new().requiring_interop_registration();
        assert!(tk.create_object("Backing").is_none());
        tk.register_interop_type("Backing");
        let obj = tk.create_object("Backing").unwrap();
        assert!(!tk.is_active(obj));
    }

    #[test]
    fn test_find_under_scopes_search() {
        let mut tk = HeadlessToolkit::new();
        let a = tk.create_group(None, "A", Axis::Vertical, LayoutHints::default());
        let b = tk.create_group(None, "B", Axis::Vertical, LayoutHints::default());
        tk.create_input(a, "Input", "", false);
        let in_b = tk.create_input(b, "Input", "", false);
        assert_eq!(tk.find_under(b, "Input"), Some(in_b));
    }
}

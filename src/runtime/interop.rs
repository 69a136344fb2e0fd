//! Backend for ahead-of-time runtimes behind an interop layer
//!
//! Named types have to be registered with the interop layer before they can
//! be instantiated, and the colour block may expose its slots either as
//! properties or only as backing fields. Which of the two is detected once and
//! remembered for the life of the backend.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock, PoisonError};

use super::{BackendKind, ColorSlots, RuntimeCapability, RuntimeError, Slot};
use crate::toolkit::{Toolkit, WidgetId};

#[derive(Debug, Default)]
pub struct InteropBackend {
    registered: Mutex<HashSet<String>>,
    properties_exist: OnceLock<bool>,
}

impl InteropBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_registered(&self, toolkit: &mut dyn Toolkit, type_name: &str) {
        let mut registered = self
            .registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if registered.contains(type_name) {
            return;
        }
        if toolkit.register_interop_type(type_name) {
            tracing::debug!("Registered interop type {}", type_name);
            registered.insert(type_name.to_string());
        } else {
            tracing::warn!("Failed to register interop type {}", type_name);
        }
    }

    /// Detected on the first restyle and fixed afterwards
    pub fn uses_properties(&self) -> Option<bool> {
        self.properties_exist.get().copied()
    }
}

impl RuntimeCapability for InteropBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Interop
    }

    fn instantiate_component(
        &self,
        toolkit: &mut dyn Toolkit,
        host: WidgetId,
        type_name: &str,
    ) -> Result<(), RuntimeError> {
        self.ensure_registered(toolkit, type_name);
        if toolkit.add_component(host, type_name) {
            Ok(())
        } else {
            Err(RuntimeError::ComponentUnavailable {
                host,
                type_name: type_name.to_string(),
            })
        }
    }

    fn apply_visual_state(
        &self,
        toolkit: &mut dyn Toolkit,
        widget: WidgetId,
        slots: &ColorSlots,
    ) -> Result<(), RuntimeError> {
        let properties = *self
            .properties_exist
            .get_or_init(|| toolkit.has_member(widget, Slot::Normal.property()));

        let member_name = |slot: Slot| {
            if properties {
                slot.property()
            } else {
                slot.field()
            }
        };

        let multiplier = if properties {
            "colorMultiplier"
        } else {
            "m_ColorMultiplier"
        };
        toolkit.set_member_f32(widget, multiplier, 1.0);

        for (slot, color) in slots.iter() {
            let member = member_name(slot);
            if !toolkit.set_member_color(widget, member, color) {
                return Err(RuntimeError::MissingMember {
                    widget,
                    member: member.to_string(),
                });
            }
        }
        Ok(())
    }

    fn create_auxiliary_object(
        &self,
        toolkit: &mut dyn Toolkit,
        type_name: &str,
    ) -> Result<WidgetId, RuntimeError> {
        self.ensure_registered(toolkit, type_name);
        toolkit
            .create_object(type_name)
            .ok_or_else(|| RuntimeError::ObjectUnavailable(type_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{Axis, HeadlessToolkit, LayoutHints, MemberStyle};
    use crate::value::Color;

    fn button(tk: &mut HeadlessToolkit) -> WidgetId {
        let root = tk.create_group(None, "Root", Axis::Vertical, LayoutHints::default());
        tk.create_button(root, "Button", "ok")
    }

    #[test]
    fn test_falls_back_to_backing_fields() {
        let mut tk = HeadlessToolkit::new().with_member_style(MemberStyle::Fields);
        let b = button(&mut tk);
        let backend = InteropBackend::new();
        backend
            .apply_visual_state(&mut tk, b, &ColorSlots::normal(Color::RED))
            .unwrap();
        assert_eq!(backend.uses_properties(), Some(false));
        assert_eq!(tk.member_color(b, "m_NormalColor"), Some(Color::RED));
        assert_eq!(tk.member_f32(b, "m_ColorMultiplier"), Some(1.0));
    }

    #[test]
    fn test_uses_properties_when_present() {
        let mut tk = HeadlessToolkit::new();
        let b = button(&mut tk);
        let backend = InteropBackend::new();
        backend
            .apply_visual_state(&mut tk, b, &ColorSlots::disabled(Color::GREY))
            .unwrap();
        assert_eq!(backend.uses_properties(), Some(true));
        assert_eq!(tk.member_color(b, "disabledColor"), Some(Color::GREY));
        assert_eq!(tk.member_f32(b, "colorMultiplier"), Some(1.0));
    }

    #[test]
    fn test_registers_types_once_before_use() {
        let mut tk = HeadlessToolkit::new().requiring_interop_registration();
        let backend = InteropBackend::new();
        let obj = backend.create_auxiliary_object(&mut tk, "Backing").unwrap();
        assert!(tk.is_interop_registered("Backing"));
        backend
            .instantiate_component(&mut tk, obj, "Backing")
            .unwrap();
        assert_eq!(tk.components(obj), &["Backing".to_string()]);
    }
}

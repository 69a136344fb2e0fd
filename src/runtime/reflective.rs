//! Backend for runtimes with full reflection

use super::{BackendKind, ColorSlots, RuntimeCapability, RuntimeError};
use crate::toolkit::{Toolkit, WidgetId};

#[derive(Debug, Default)]
pub struct ReflectiveBackend;

impl ReflectiveBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RuntimeCapability for ReflectiveBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Reflective
    }

    fn instantiate_component(
        &self,
        toolkit: &mut dyn Toolkit,
        host: WidgetId,
        type_name: &str,
    ) -> Result<(), RuntimeError> {
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
        for (slot, color) in slots.iter() {
            if !toolkit.set_member_color(widget, slot.property(), color) {
                return Err(RuntimeError::MissingMember {
                    widget,
                    member: slot.property().to_string(),
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
        toolkit
            .create_object(type_name)
            .ok_or_else(|| RuntimeError::ObjectUnavailable(type_name.to_string()))
    }
}

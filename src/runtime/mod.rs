//! Runtime capability backends
//!
//! Everything above this module creates and restyles widgets through
//! `RuntimeCapability` and never asks which backend is active. The backend is
//! chosen once per process: `init` picks one explicitly, otherwise the first
//! `instance()` call installs the default (the interop backend when built
//! with the `interop` feature, the reflective one otherwise).

mod interop;
mod reflective;

pub use interop::InteropBackend;
pub use reflective::ReflectiveBackend;

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::toolkit::{Toolkit, WidgetId};
use crate::value::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Full reflection: components and colour slots are set directly
    Reflective,
    /// Types must be registered with the interop layer before use, and colour
    /// slots may only be reachable as backing fields
    Interop,
}

impl BackendKind {
    pub fn default_for_build() -> Self {
        if cfg!(feature = "interop") {
            BackendKind::Interop
        } else {
            BackendKind::Reflective
        }
    }
}

/// Named colour slots of a selectable widget; `None` leaves a slot untouched
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorSlots {
    pub normal: Option<Color>,
    pub highlighted: Option<Color>,
    pub pressed: Option<Color>,
    pub disabled: Option<Color>,
}

impl ColorSlots {
    pub fn normal(color: Color) -> Self {
        Self {
            normal: Some(color),
            ..Self::default()
        }
    }

    pub fn disabled(color: Color) -> Self {
        Self {
            disabled: Some(color),
            ..Self::default()
        }
    }

    pub fn with_highlighted(mut self, color: Color) -> Self {
        self.highlighted = Some(color);
        self
    }

    pub fn with_pressed(mut self, color: Color) -> Self {
        self.pressed = Some(color);
        self
    }

    pub fn with_disabled(mut self, color: Color) -> Self {
        self.disabled = Some(color);
        self
    }

    /// `(slot, colour)` pairs that are set, in a fixed order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Slot, Color)> + '_ {
        [
            (Slot::Normal, self.normal),
            (Slot::Highlighted, self.highlighted),
            (Slot::Pressed, self.pressed),
            (Slot::Disabled, self.disabled),
        ]
        .into_iter()
        .filter_map(|(slot, color)| color.map(|c| (slot, c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Normal,
    Highlighted,
    Pressed,
    Disabled,
}

impl Slot {
    pub(crate) fn property(self) -> &'static str {
        match self {
            Slot::Normal => "normalColor",
            Slot::Highlighted => "highlightedColor",
            Slot::Pressed => "pressedColor",
            Slot::Disabled => "disabledColor",
        }
    }

    pub(crate) fn field(self) -> &'static str {
        match self {
            Slot::Normal => "m_NormalColor",
            Slot::Highlighted => "m_HighlightedColor",
            Slot::Pressed => "m_PressedColor",
            Slot::Disabled => "m_DisabledColor",
        }
    }
}

pub trait RuntimeCapability: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Attach a component of a named type to `host`
    fn instantiate_component(
        &self,
        toolkit: &mut dyn Toolkit,
        host: WidgetId,
        type_name: &str,
    ) -> Result<(), RuntimeError>;

    /// Restyle the colour slots of a selectable widget
    fn apply_visual_state(
        &self,
        toolkit: &mut dyn Toolkit,
        widget: WidgetId,
        slots: &ColorSlots,
    ) -> Result<(), RuntimeError>;

    /// Create a hidden backing object of a named type
    fn create_auxiliary_object(
        &self,
        toolkit: &mut dyn Toolkit,
        type_name: &str,
    ) -> Result<WidgetId, RuntimeError>;
}

/// A fresh backend of the given kind, not installed globally
pub fn backend(kind: BackendKind) -> Arc<dyn RuntimeCapability> {
    match kind {
        BackendKind::Reflective => Arc::new(ReflectiveBackend::new()),
        BackendKind::Interop => Arc::new(InteropBackend::new()),
    }
}

static INSTANCE: OnceLock<Arc<dyn RuntimeCapability>> = OnceLock::new();

/// Install the process-wide backend; fails if one is already installed
pub fn init(kind: BackendKind) -> Result<(), RuntimeError> {
    let mut installed = false;
    let current = INSTANCE.get_or_init(|| {
        installed = true;
        backend(kind)
    });
    if installed {
        tracing::info!("Runtime backend: {:?}", kind);
        Ok(())
    } else {
        Err(RuntimeError::AlreadyInitialized(current.kind()))
    }
}

/// The process-wide backend, installing the build default if none was chosen
pub fn instance() -> Arc<dyn RuntimeCapability> {
    Arc::clone(INSTANCE.get_or_init(|| {
        let kind = BackendKind::default_for_build();
        tracing::info!("Runtime backend: {:?} (default)", kind);
        backend(kind)
    }))
}

/// Errors that can occur in a runtime backend
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    AlreadyInitialized(BackendKind),
    ComponentUnavailable { host: WidgetId, type_name: String },
    ObjectUnavailable(String),
    MissingMember { widget: WidgetId, member: String },
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::AlreadyInitialized(kind) => {
                write!(f, "Runtime backend already initialized as {:?}", kind)
            }
            RuntimeError::ComponentUnavailable { host, type_name } => {
                write!(f, "Could not add {} to widget {:?}", type_name, host)
            }
            RuntimeError::ObjectUnavailable(type_name) => {
                write!(f, "Could not create object of type {}", type_name)
            }
            RuntimeError::MissingMember { widget, member } => {
                write!(f, "Widget {:?} has no member {}", widget, member)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

//! Process-wide shared state used by every editor
//!
//! All members are append-only caches or registries, plus the single rebind
//! controller. `Services::shared()` is the instance hosts normally use;
//! `Services::new()` gives an isolated set for tests.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::catalog::{EnumNameCache, FloatStructCache};
use crate::convert::ConverterRegistry;
use crate::editor::EditorRegistry;
use crate::input::RebindController;

#[derive(Debug, Default)]
pub struct Services {
    pub registry: EditorRegistry,
    pub enum_names: EnumNameCache,
    pub float_structs: FloatStructCache,
    pub converters: ConverterRegistry,
    rebind: Mutex<RebindController>,
}

impl Services {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Services> {
        static SHARED: OnceLock<Arc<Services>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Services::new())))
    }

    pub fn rebind(&self) -> MutexGuard<'_, RebindController> {
        self.rebind.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

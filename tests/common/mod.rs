//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::{Ref, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use knobs::entry::{EntryId, EntryState, Env};
use knobs::runtime::{self, BackendKind, RuntimeCapability};
use knobs::setting::{Constraint, PluginMeta, Setting, SettingKey};
use knobs::store::{MemoryStore, SettingsStore, StoreError};
use knobs::toolkit::{Axis, HeadlessToolkit, LayoutHints, Toolkit, WidgetId};
use knobs::value::{EnumType, IntKind, Number, NumberKind, Value, ValueType};
use knobs::{Coordinator, ManagerConfig, Services};

/// Toolkit, backend and services for driving entries directly
pub struct Harness {
    pub toolkit: HeadlessToolkit,
    pub runtime: Arc<dyn RuntimeCapability>,
    pub services: Services,
    pub parent: WidgetId,
}

impl Harness {
    pub fn new() -> Self {
        let mut toolkit = HeadlessToolkit::new();
        let parent = toolkit.create_group(None, "TestRoot", Axis::Vertical, LayoutHints::default());
        Self {
            toolkit,
            runtime: runtime::backend(BackendKind::Reflective),
            services: Services::new(),
            parent,
        }
    }

    pub fn env(&mut self) -> Env<'_> {
        Env {
            toolkit: &mut self.toolkit,
            runtime: self.runtime.as_ref(),
            services: &self.services,
        }
    }

    /// Entry for the store's first binding of `setting`, widgets built
    pub fn entry(&mut self, store: &MemoryStore, setting: Setting) -> EntryState {
        let stored = store.get(&setting.key).unwrap_or_default();
        let mut entry = EntryState::new(
            EntryId {
                category: 0,
                index: 0,
            },
            setting,
            stored,
            &self.services,
            false,
        );
        let parent = self.parent;
        entry.enable(&mut self.env(), parent);
        entry
    }

    /// Named widget inside an entry
    pub fn widget(&self, entry: &EntryState, name: &str) -> WidgetId {
        let root = entry.ui().expect("entry is enabled").root;
        self.toolkit
            .find_under(root, name)
            .unwrap_or_else(|| panic!("no widget named {}", name))
    }
}

// ============================================================================
// Settings
// ============================================================================

pub fn int(v: i32) -> Value {
    Value::Number(Number::I32(v))
}

pub fn int_setting(section: &str, key: &str, default: i32) -> Setting {
    Setting::new(
        SettingKey::new(section, key),
        ValueType::Number(NumberKind::I32),
        int(default),
    )
}

/// Int setting constrained to `[0, 100]`
pub fn percent_setting(key: &str, default: i32) -> Setting {
    int_setting("General", key, default).with_constraint(Constraint::Range {
        min: int(0),
        max: int(100),
    })
}

pub fn bool_setting(section: &str, key: &str, default: bool) -> Setting {
    Setting::new(
        SettingKey::new(section, key),
        ValueType::Bool,
        Value::Bool(default),
    )
}

pub fn text_setting(section: &str, key: &str, default: &str) -> Setting {
    Setting::new(
        SettingKey::new(section, key),
        ValueType::Text,
        Value::from(default),
    )
}

/// `Permissions { Read = 1, Write = 2, Execute = 4 }`, flags
pub fn permissions() -> Arc<EnumType> {
    EnumType::new("Permissions", IntKind::I32, true)
        .member("Read", 1)
        .member("Write", 2)
        .member("Execute", 4)
        .build()
}

/// `Severity { Low, Medium, High }`
pub fn severity() -> Arc<EnumType> {
    EnumType::new("Severity", IntKind::U8, false)
        .member("Low", 0)
        .member("Medium", 1)
        .member("High", 2)
        .build()
}

pub fn enum_setting(key: &str, ty: &Arc<EnumType>, default: &str) -> Setting {
    let value = ty.parse(default).expect("valid member");
    Setting::new(
        SettingKey::new("General", key),
        ValueType::Enum(Arc::clone(ty)),
        Value::Enum(value),
    )
}

pub fn store_with(guid: &str, settings: Vec<Setting>) -> MemoryStore {
    let mut store = MemoryStore::new().with_meta(PluginMeta::new(guid, guid, "1.0.0"));
    for s in settings {
        store.bind(s);
    }
    store
}

// ============================================================================
// Shared store
// ============================================================================

/// A `MemoryStore` the test keeps a handle to after the coordinator owns it
#[derive(Clone)]
pub struct SharedStore {
    meta: Option<PluginMeta>,
    inner: Rc<RefCell<MemoryStore>>,
}

impl SharedStore {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            meta: store.meta().cloned(),
            inner: Rc::new(RefCell::new(store)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, MemoryStore> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, MemoryStore> {
        self.inner.borrow_mut()
    }
}

impl SettingsStore for SharedStore {
    fn meta(&self) -> Option<&PluginMeta> {
        self.meta.as_ref()
    }

    fn path(&self) -> Option<&Path> {
        None
    }

    fn settings(&self) -> Result<Vec<Setting>, StoreError> {
        self.inner.borrow().settings()
    }

    fn get(&self, key: &SettingKey) -> Option<Value> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &SettingKey, value: Value) -> Result<(), StoreError> {
        self.inner.borrow_mut().set(key, value)
    }

    fn save_on_set(&self) -> bool {
        self.inner.borrow().save_on_set()
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.inner.borrow_mut().save()
    }

    fn drain_changes(&mut self) -> Vec<SettingKey> {
        self.inner.borrow_mut().drain_changes()
    }
}

// ============================================================================
// Coordinator
// ============================================================================

pub fn coordinator() -> Coordinator<HeadlessToolkit> {
    coordinator_with(ManagerConfig::default())
}

pub fn coordinator_with(config: ManagerConfig) -> Coordinator<HeadlessToolkit> {
    Coordinator::new(
        HeadlessToolkit::new(),
        runtime::backend(BackendKind::Reflective),
        Arc::new(Services::new()),
        config,
    )
}

/// Named widget inside the entry bound to `key`
pub fn entry_widget(
    coord: &Coordinator<HeadlessToolkit>,
    key: &SettingKey,
    name: &str,
) -> WidgetId {
    let id = coord.entry_id(key).expect("entry exists");
    let root = coord.entry(id).and_then(|e| e.ui()).expect("entry is enabled").root;
    coord
        .toolkit()
        .find_under(root, name)
        .unwrap_or_else(|| panic!("no widget named {}", name))
}

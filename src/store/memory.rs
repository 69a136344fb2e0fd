//! In-process settings store

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{SettingsStore, StoreError};
use crate::setting::{PluginMeta, Setting, SettingKey};
use crate::value::Value;

/// Settings held in memory, with a flush counter instead of a file
#[derive(Debug, Default)]
pub struct MemoryStore {
    meta: Option<PluginMeta>,
    path: Option<PathBuf>,
    settings: Vec<Setting>,
    values: HashMap<SettingKey, Value>,
    changes: Vec<SettingKey>,
    save_on_set: bool,
    saves: usize,
    writes: usize,
    listing_error: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta(mut self, meta: PluginMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_save_on_set(mut self, save_on_set: bool) -> Self {
        self.save_on_set = save_on_set;
        self
    }

    /// Make `settings()` fail, as a malformed settings file would
    pub fn with_listing_error(mut self, message: impl Into<String>) -> Self {
        self.listing_error = Some(message.into());
        self
    }

    /// Register a setting with its default as the stored value
    pub fn bind(&mut self, setting: Setting) -> &mut Self {
        let value = setting.default.clone();
        self.bind_with(setting, value)
    }

    /// Register a setting with an explicit stored value
    pub fn bind_with(&mut self, setting: Setting, value: Value) -> &mut Self {
        self.values.insert(setting.key.clone(), value);
        if let Some(existing) = self.settings.iter_mut().find(|s| s.key == setting.key) {
            *existing = setting;
        } else {
            self.settings.push(setting);
        }
        self
    }

    /// Write from outside the editor, e.g. by the owning plugin
    pub fn external_set(&mut self, key: &SettingKey, value: Value) -> Result<(), StoreError> {
        self.set(key, value)
    }

    /// Number of explicit `save()` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Number of accepted `set()` calls
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn pending_changes(&self) -> &[SettingKey] {
        &self.changes
    }
}

impl SettingsStore for MemoryStore {
    fn meta(&self) -> Option<&PluginMeta> {
        self.meta.as_ref()
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn settings(&self) -> Result<Vec<Setting>, StoreError> {
        if let Some(e) = &self.listing_error {
            return Err(StoreError::Listing(e.clone()));
        }
        Ok(self.settings.clone())
    }

    fn get(&self, key: &SettingKey) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &SettingKey, value: Value) -> Result<(), StoreError> {
        let setting = self
            .settings
            .iter()
            .find(|s| &s.key == key)
            .ok_or_else(|| StoreError::UnknownSetting(key.clone()))?;

        if let Some(ty) = value.value_type() {
            if ty != setting.value_type {
                return Err(StoreError::TypeMismatch {
                    key: key.clone(),
                    expected: setting.value_type.name().to_string(),
                });
            }
        }

        self.values.insert(key.clone(), value);
        self.writes += 1;
        self.changes.push(key.clone());
        if self.save_on_set {
            self.saves += 1;
        }
        Ok(())
    }

    fn save_on_set(&self) -> bool {
        self.save_on_set
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.saves += 1;
        tracing::debug!("Flushed {} settings", self.values.len());
        Ok(())
    }

    fn drain_changes(&mut self) -> Vec<SettingKey> {
        std::mem::take(&mut self.changes)
    }
}

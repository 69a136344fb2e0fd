//! Settings store collaborator
//!
//! The store owns stored values and their persistence. The editor core only
//! reads, writes, asks for a flush, and drains change notifications.

mod memory;

pub use memory::MemoryStore;

use std::fmt;
use std::path::Path;

use crate::setting::{PluginMeta, Setting, SettingKey};
use crate::value::Value;

pub trait SettingsStore {
    /// Owning plugin, if the file belongs to one
    fn meta(&self) -> Option<&PluginMeta>;

    /// Backing file, if any
    fn path(&self) -> Option<&Path>;

    /// Every registered setting, in registration order
    fn settings(&self) -> Result<Vec<Setting>, StoreError>;

    /// Current stored value
    fn get(&self, key: &SettingKey) -> Option<Value>;

    /// Replace the stored value
    fn set(&mut self, key: &SettingKey, value: Value) -> Result<(), StoreError>;

    /// Whether every `set` already persists
    fn save_on_set(&self) -> bool;

    /// Flush to persistent storage
    fn save(&mut self) -> Result<(), StoreError>;

    /// Keys whose stored value changed since the last drain
    fn drain_changes(&mut self) -> Vec<SettingKey> {
        Vec::new()
    }
}

/// Errors reported by a settings store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    UnknownSetting(SettingKey),
    TypeMismatch { key: SettingKey, expected: String },
    Listing(String),
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownSetting(k) => write!(f, "Unknown setting: {}", k),
            StoreError::TypeMismatch { key, expected } => {
                write!(f, "Type mismatch for {}: expected {}", key, expected)
            }
            StoreError::Listing(e) => write!(f, "Failed to list settings: {}", e),
            StoreError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

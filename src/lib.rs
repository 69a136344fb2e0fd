//! knobs - live in-process settings editor core
//!
//! Discovers settings from one or more stores, picks a type-appropriate
//! editor behaviour for each, and stages edits until they are saved, undone
//! or reverted. Widgets are built through a host `Toolkit`; the two runtime
//! flavours differ only behind `runtime::RuntimeCapability`.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod convert;
pub mod coordinator;
pub mod editor;
pub mod entry;
pub mod input;
pub mod messages;
pub mod runtime;
pub mod services;
pub mod setting;
pub mod store;
pub mod toolkit;
pub mod tracing;
pub mod value;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ManagerConfig;
pub use coordinator::Coordinator;
pub use entry::{EntryId, EntryState};
pub use messages::Msg;
pub use services::Services;
pub use setting::{Constraint, Setting, SettingKey};
pub use store::{MemoryStore, SettingsStore};
pub use toolkit::{HeadlessToolkit, Toolkit, WidgetEvent, WidgetId};
pub use value::{Value, ValueType};

//! Per-setting draft/commit state
//!
//! An entry pairs one setting with one editor behaviour. The behaviour edits
//! a working copy; the entry decides whether that copy is ignored, staged as
//! a draft, or written straight through to the store.
//!
//! Invariant: `dirty == (edited != stored)`, with `Null == Null`.

use crate::editor::{EditOutcome, EditorBehavior, EditorCx, ListEditor};
use crate::runtime::RuntimeCapability;
use crate::services::Services;
use crate::setting::{Constraint, Setting};
use crate::store::{SettingsStore, StoreError};
use crate::toolkit::{Axis, EventKind, LayoutHints, Toolkit, WidgetEvent, WidgetId};
use crate::value::{Color, Value};

/// Position of an entry: category index, then index within the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId {
    pub category: usize,
    pub index: usize,
}

/// Collaborators an entry needs to touch widgets
pub struct Env<'a> {
    pub toolkit: &'a mut dyn Toolkit,
    pub runtime: &'a dyn RuntimeCapability,
    pub services: &'a Services,
}

/// What an event or edit did to the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Not one of this entry's widgets
    Ignored,
    /// Consumed with no value change
    Handled,
    /// Draft updated; check `is_dirty`
    Staged,
    /// Draft dropped and entry resynchronized from the store
    Resynced,
}

const DESCRIPTION_COLOR: Color = Color::rgb(0.7, 0.7, 0.7);

/// Widgets owned by the entry itself
#[derive(Debug, Clone, Copy)]
pub struct EntryUi {
    pub root: WidgetId,
    pub content: WidgetId,
    pub row: WidgetId,
    pub label: WidgetId,
    pub undo_button: WidgetId,
    pub default_button: WidgetId,
    pub description: Option<WidgetId>,
    pub sub_content: WidgetId,
}

pub struct EntryState {
    id: EntryId,
    setting: Setting,
    edited: Value,
    dirty: bool,
    advanced: bool,
    editor: Box<dyn EditorBehavior>,
    ui: Option<EntryUi>,
}

fn make_editor(setting: &Setting, value: Value, services: &Services) -> Box<dyn EditorBehavior> {
    if let Some(Constraint::List(_)) = setting.constraint {
        return Box::new(ListEditor::new(value, setting.value_type.clone()));
    }
    services
        .registry
        .create(value, &setting.value_type, &services.float_structs)
}

fn stored_value(store: &dyn SettingsStore, setting: &Setting) -> Value {
    store.get(&setting.key).unwrap_or_default()
}

impl EntryState {
    /// Create an entry showing `stored`; no widgets exist until `enable`
    pub fn new(
        id: EntryId,
        setting: Setting,
        stored: Value,
        services: &Services,
        force_advanced: bool,
    ) -> Self {
        let editor = make_editor(&setting, stored.clone(), services);
        tracing::trace!("Entry {} uses {:?}", setting.key, editor.kind());
        let advanced = force_advanced || setting.is_advanced();
        Self {
            id,
            setting,
            edited: stored,
            dirty: false,
            advanced,
            editor,
            ui: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    pub fn edited(&self) -> &Value {
        &self.edited
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    pub fn editor(&self) -> &dyn EditorBehavior {
        self.editor.as_ref()
    }

    pub fn ui(&self) -> Option<&EntryUi> {
        self.ui.as_ref()
    }

    fn with_editor<R>(
        &mut self,
        env: &mut Env<'_>,
        f: impl FnOnce(&mut dyn EditorBehavior, &mut EditorCx<'_>) -> R,
    ) -> R {
        let mut cx = EditorCx {
            toolkit: &mut *env.toolkit,
            runtime: env.runtime,
            services: env.services,
            setting: &self.setting,
            entry: self.id,
            owner_label: self.ui.map(|u| u.label),
            owner_content: self.ui.map(|u| u.content),
        };
        f(self.editor.as_mut(), &mut cx)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Build the entry's widgets under `parent`
    pub fn enable(&mut self, env: &mut Env<'_>, parent: WidgetId) {
        if self.ui.is_some() {
            return;
        }
        if self.editor.base().constructed {
            // Widgets of a previous enable are gone; start over
            self.editor = make_editor(&self.setting, self.edited.clone(), env.services);
        }

        let toolkit = &mut *env.toolkit;
        let root = toolkit.create_group(
            Some(parent),
            &format!("Entry_{}", self.setting.key),
            Axis::Vertical,
            LayoutHints::min_height(25.0).flexible_width(9999.0),
        );
        let content = toolkit.create_group(
            Some(root),
            "ContentHolder",
            Axis::Vertical,
            LayoutHints::min_height(25.0).flexible_width(9999.0),
        );
        let row = toolkit.create_group(
            Some(content),
            "HorizontalGroup",
            Axis::Horizontal,
            LayoutHints::min_height(30.0).flexible_width(9999.0),
        );
        let label = toolkit.create_label(
            row,
            "ConfigLabel",
            &format!("{} ({})", self.setting.key.key, self.setting.value_type.name()),
        );
        toolkit.set_layout(label, LayoutHints::min(200.0, 25.0).flexible_width(9999.0));

        let description = self.setting.description.as_deref().map(|text| {
            let d = toolkit.create_label(content, "Description", text);
            toolkit.set_text_color(d, DESCRIPTION_COLOR);
            toolkit.set_layout(d, LayoutHints::min_height(25.0).flexible_width(9999.0));
            d
        });

        let sub_content = toolkit.create_group(
            Some(content),
            "SubContent",
            Axis::Vertical,
            LayoutHints::min_height(25.0).flexible_width(9999.0),
        );
        toolkit.set_active(sub_content, false);

        self.editor.base_mut().main_parent = Some(row);
        self.editor.base_mut().sub_parent = Some(sub_content);
        self.ui = Some(EntryUi {
            root,
            content,
            row,
            label,
            undo_button: row,
            default_button: row,
            description,
            sub_content,
        });

        self.with_editor(env, |editor, cx| editor.construct_ui(cx));

        let toolkit = &mut *env.toolkit;
        let undo_button = toolkit.create_button(row, "UndoButton", "Undo");
        toolkit.set_layout(undo_button, LayoutHints::min(80.0, 25.0));
        toolkit.set_active(undo_button, self.dirty);
        let default_button = toolkit.create_button(row, "DefaultButton", "Default");
        toolkit.set_layout(default_button, LayoutHints::min(80.0, 25.0));
        if let Some(ui) = &mut self.ui {
            ui.undo_button = undo_button;
            ui.default_button = default_button;
        }

        let edited = self.edited.clone();
        self.with_editor(env, |editor, cx| {
            editor.set_value(edited);
            editor.refresh_ui_for_value(cx);
            editor.refresh_sub_content_state(cx);
        });
    }

    /// Tear down widgets; the setting and its stored value are untouched
    pub fn disable(&mut self, env: &mut Env<'_>) {
        env.services.rebind().release(self.id);
        if let Some(ui) = self.ui.take() {
            env.toolkit.destroy(ui.root);
        }
    }

    pub fn set_visible(&self, toolkit: &mut dyn Toolkit, visible: bool) {
        if let Some(ui) = &self.ui {
            if toolkit.is_active(ui.root) != visible {
                toolkit.set_active(ui.root, visible);
            }
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Re-read the stored value and drop any draft
    pub fn resync(&mut self, env: &mut Env<'_>, store: &dyn SettingsStore) {
        let stored = stored_value(store, &self.setting);
        self.edited = stored.clone();
        self.dirty = false;
        self.sync_editor(env, stored);
        self.show_undo(env.toolkit);
    }

    /// The store reports an out-of-band write
    pub fn on_external_change(&mut self, env: &mut Env<'_>, store: &dyn SettingsStore) {
        tracing::debug!("External change to {}", self.setting.key);
        self.resync(env, store);
    }

    fn sync_editor(&mut self, env: &mut Env<'_>, value: Value) {
        let built = self.ui.is_some();
        self.with_editor(env, |editor, cx| {
            editor.set_value(value);
            if built {
                editor.on_value_updated(cx);
                editor.refresh_sub_content_state(cx);
            }
        });
    }

    fn show_undo(&self, toolkit: &mut dyn Toolkit) {
        if let Some(ui) = &self.ui {
            if toolkit.is_active(ui.undo_button) != self.dirty {
                toolkit.set_active(ui.undo_button, self.dirty);
            }
        }
    }

    /// Push a prospective value through clamp, compare, then stage or write
    pub fn apply_edit(
        &mut self,
        env: &mut Env<'_>,
        store: &mut dyn SettingsStore,
        prospective: Value,
        auto_save: bool,
    ) -> Result<EntryOutcome, StoreError> {
        let value = match &self.setting.constraint {
            Some(c) => c.clamp(&prospective),
            None => prospective,
        };

        if value == self.edited {
            return Ok(EntryOutcome::Handled);
        }
        if *self.editor.value() != value {
            let shown = value.clone();
            let built = self.ui.is_some();
            self.with_editor(env, |editor, cx| {
                editor.set_value(shown);
                if built {
                    editor.refresh_ui_for_value(cx);
                }
            });
        }

        if auto_save {
            store.set(&self.setting.key, value)?;
            if !store.save_on_set() {
                store.save()?;
            }
            self.resync(env, store);
            return Ok(EntryOutcome::Resynced);
        }

        self.dirty = value != stored_value(store, &self.setting);
        self.edited = value;
        tracing::debug!("Staged {} (dirty: {})", self.setting.key, self.dirty);
        self.show_undo(env.toolkit);
        Ok(EntryOutcome::Staged)
    }

    /// Throw away the draft
    pub fn undo(&mut self, env: &mut Env<'_>, store: &dyn SettingsStore) {
        tracing::debug!("Undo {}", self.setting.key);
        self.resync(env, store);
    }

    /// Write the declared default straight to the store
    pub fn revert_to_default(
        &mut self,
        env: &mut Env<'_>,
        store: &mut dyn SettingsStore,
    ) -> Result<(), StoreError> {
        tracing::debug!("Revert {} to default", self.setting.key);
        store.set(&self.setting.key, self.setting.default.clone())?;
        self.resync(env, store);
        Ok(())
    }

    /// Write the draft into the store; `false` when there was nothing to write
    ///
    /// The store is not flushed and the entry stays dirty until `resync`.
    pub fn commit(&self, store: &mut dyn SettingsStore) -> Result<bool, StoreError> {
        if !self.dirty {
            return Ok(false);
        }
        store.set(&self.setting.key, self.edited.clone())?;
        Ok(true)
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn handle_event(
        &mut self,
        env: &mut Env<'_>,
        store: &mut dyn SettingsStore,
        event: &WidgetEvent,
        auto_save: bool,
    ) -> Result<EntryOutcome, StoreError> {
        let Some(ui) = self.ui else {
            return Ok(EntryOutcome::Ignored);
        };

        if event.kind == EventKind::Clicked {
            if event.widget == ui.undo_button {
                self.undo(env, store);
                return Ok(EntryOutcome::Resynced);
            }
            if event.widget == ui.default_button {
                self.revert_to_default(env, store)?;
                return Ok(EntryOutcome::Resynced);
            }
            if Some(event.widget) == self.editor.base().expand_button {
                self.with_editor(env, |editor, cx| editor.toggle_sub_content(cx));
                return Ok(EntryOutcome::Handled);
            }
        }

        let outcome = self.with_editor(env, |editor, cx| editor.handle_event(cx, event));
        match outcome {
            EditOutcome::Ignored => Ok(EntryOutcome::Ignored),
            EditOutcome::Handled | EditOutcome::Rejected => Ok(EntryOutcome::Handled),
            EditOutcome::Changed => {
                let value = self.editor.value().clone();
                self.apply_edit(env, store, value, auto_save)
            }
        }
    }

    /// Forward a captured rebind key to the behaviour
    pub fn on_key_captured(&mut self, env: &mut Env<'_>, key: &str) {
        self.with_editor(env, |editor, cx| editor.on_key_captured(cx, key));
    }
}

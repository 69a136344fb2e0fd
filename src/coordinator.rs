//! Settings manager coordinator
//!
//! Owns the stores, the categories built from them, the global dirty set and
//! the manager chrome (category list, search, advanced and auto-save toggles,
//! save button). All state changes flow through `update(msg)`; the host also
//! calls `update_frame` once per frame for key polling and change draining.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Context;

use crate::commands::Cmd;
use crate::config::ManagerConfig;
use crate::entry::{EntryId, EntryOutcome, EntryState, Env};
use crate::input::KeyInput;
use crate::messages::Msg;
use crate::runtime::{ColorSlots, RuntimeCapability};
use crate::services::Services;
use crate::setting::{Setting, SettingKey};
use crate::store::SettingsStore;
use crate::toolkit::{Axis, EventKind, LayoutHints, Toolkit, WidgetEvent, WidgetId};
use crate::tracing::StateSnapshot;
use crate::value::Color;

#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// `#c2b895`
const ACTIVE_CATEGORY: Color = Color::rgb(0.761, 0.722, 0.584);
const INACTIVE_CATEGORY: Color = Color::rgb(0.38, 0.34, 0.34);

/// Category id used when a store has neither plugin metadata nor a file
pub const UNKNOWN_CATEGORY: &str = "UNKNOWN";

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone)]
struct Section {
    label: Option<WidgetId>,
    entries: Vec<usize>,
}

/// Entries of one settings store
pub struct Category {
    id: String,
    name: String,
    store: usize,
    entries: Vec<EntryState>,
    sections: Vec<Section>,
    list_button: WidgetId,
    content: WidgetId,
    completely_hidden: bool,
}

impl Category {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[EntryState] {
        &self.entries
    }

    pub fn list_button(&self) -> WidgetId {
        self.list_button
    }

    pub fn content(&self) -> WidgetId {
        self.content
    }

    /// Every entry is advanced and advanced entries are hidden
    pub fn is_completely_hidden(&self) -> bool {
        self.completely_hidden
    }
}

/// Id and display name of the category a store becomes
fn category_identity(store: &dyn SettingsStore) -> (String, String) {
    let id = store
        .meta()
        .map(|m| m.guid.clone())
        .or_else(|| {
            store
                .path()
                .and_then(|p| p.file_stem())
                .map(|s| s.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
    let name = store
        .meta()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| id.clone());
    (id, name)
}

/// Settings grouped by section, unnamed section first, otherwise in order of
/// first appearance
fn group_sections(settings: Vec<Setting>) -> Vec<(String, Vec<Setting>)> {
    let mut groups: Vec<(String, Vec<Setting>)> = Vec::new();
    for setting in settings {
        match groups.iter_mut().find(|(s, _)| *s == setting.key.section) {
            Some((_, list)) => list.push(setting),
            None => groups.push((setting.key.section.clone(), vec![setting])),
        }
    }
    groups.sort_by_key(|(section, _)| !section.is_empty());
    groups
}

// ============================================================================
// Coordinator
// ============================================================================

/// Widgets of the manager chrome
#[derive(Debug, Clone, Copy)]
pub struct ManagerUi {
    pub root: WidgetId,
    pub title: WidgetId,
    pub auto_save_toggle: WidgetId,
    pub advanced_toggle: WidgetId,
    pub filter_input: WidgetId,
    pub save_button: WidgetId,
    pub hide_button: WidgetId,
    pub category_list: WidgetId,
    pub category_content: WidgetId,
}

struct Parts<'a> {
    env: Env<'a>,
    categories: &'a mut Vec<Category>,
    stores: &'a mut Vec<Box<dyn SettingsStore>>,
    dirty: &'a mut BTreeSet<EntryId>,
}

fn track_dirty(dirty: &mut BTreeSet<EntryId>, entry: &EntryState) {
    if entry.is_dirty() {
        dirty.insert(entry.id());
    } else {
        dirty.remove(&entry.id());
    }
}

pub struct Coordinator<T: Toolkit> {
    toolkit: T,
    runtime: Arc<dyn RuntimeCapability>,
    services: Arc<Services>,
    config: ManagerConfig,
    stores: Vec<Box<dyn SettingsStore>>,
    categories: Vec<Category>,
    dirty: BTreeSet<EntryId>,
    current: Option<usize>,
    show_advanced: bool,
    filter: String,
    menu_open: bool,
    ui: ManagerUi,
    driver: Option<WidgetId>,
}

impl<T: Toolkit> Coordinator<T> {
    /// Build the manager chrome; the menu starts closed
    pub fn new(
        mut toolkit: T,
        runtime: Arc<dyn RuntimeCapability>,
        services: Arc<Services>,
        config: ManagerConfig,
    ) -> Self {
        let ui = build_chrome(&mut toolkit, &config);

        let driver = match runtime.create_auxiliary_object(&mut toolkit, "UpdateDriver") {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("No update driver object: {}", e);
                None
            }
        };

        tracing::debug!("Coordinator ready (auto-save: {})", config.auto_save);
        Self {
            toolkit,
            runtime,
            services,
            config,
            stores: Vec::new(),
            categories: Vec::new(),
            dirty: BTreeSet::new(),
            current: None,
            show_advanced: false,
            filter: String::new(),
            menu_open: false,
            ui,
            driver,
        }
    }

    /// Process-wide backend and services, preferences from disk
    pub fn with_defaults(toolkit: T) -> Self {
        Self::new(
            toolkit,
            crate::runtime::instance(),
            Services::shared(),
            ManagerConfig::load(),
        )
    }

    fn parts(&mut self) -> Parts<'_> {
        Parts {
            env: Env {
                toolkit: &mut self.toolkit,
                runtime: self.runtime.as_ref(),
                services: self.services.as_ref(),
            },
            categories: &mut self.categories,
            stores: &mut self.stores,
            dirty: &mut self.dirty,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    pub fn ui(&self) -> &ManagerUi {
        &self.ui
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub fn driver(&self) -> Option<WidgetId> {
        self.driver
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current.map(|i| self.categories[i].id.as_str())
    }

    pub fn entry(&self, id: EntryId) -> Option<&EntryState> {
        self.categories.get(id.category)?.entries.get(id.index)
    }

    /// First entry bound to `key`, searching categories in order
    pub fn entry_id(&self, key: &SettingKey) -> Option<EntryId> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .find(|e| e.setting().key == *key)
            .map(EntryState::id)
    }

    pub fn store(&self, index: usize) -> Option<&dyn SettingsStore> {
        self.stores.get(index).map(|s| s.as_ref())
    }

    pub fn dirty(&self) -> &BTreeSet<EntryId> {
        &self.dirty
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_showing_advanced(&self) -> bool {
        self.show_advanced
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            dirty: self.dirty.iter().copied().collect(),
            current_category: self.current_category().map(str::to_string),
            menu_open: self.menu_open,
            show_advanced: self.show_advanced,
            filter: self.filter.clone(),
        }
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Index a store as a new category; failures are logged, never raised
    ///
    /// `force_advanced` marks every entry advanced, as for the host's own
    /// core settings file.
    pub fn add_store(
        &mut self,
        store: impl SettingsStore + 'static,
        force_advanced: bool,
    ) -> Option<usize> {
        let store: Box<dyn SettingsStore> = Box::new(store);
        let (id, _) = category_identity(store.as_ref());
        match self.setup_category(store, force_advanced) {
            Ok(index) => {
                self.refresh_visibility();
                Some(index)
            }
            Err(e) => {
                tracing::warn!("Exception setting up category '{}': {:#}", id, e);
                None
            }
        }
    }

    fn setup_category(
        &mut self,
        store: Box<dyn SettingsStore>,
        force_advanced: bool,
    ) -> anyhow::Result<usize> {
        let (id, name) = category_identity(store.as_ref());
        anyhow::ensure!(
            self.categories.iter().all(|c| c.id != id),
            "category is already registered"
        );
        let settings = store
            .settings()
            .with_context(|| format!("Failed to read settings of {}", name))?;
        let force_advanced = force_advanced || store.meta().is_some_and(|m| !m.browsable);

        let category = self.categories.len();
        let store_index = self.stores.len();

        let list_button = self.toolkit.create_button(
            self.ui.category_list,
            &format!("BUTTON_{}", id),
            &name,
        );
        self.toolkit
            .set_layout(list_button, LayoutHints::min(200.0, 30.0).flexible_width(0.0));
        style_button(
            &mut self.toolkit,
            self.runtime.as_ref(),
            list_button,
            INACTIVE_CATEGORY,
        );

        let content = self.toolkit.create_group(
            Some(self.ui.category_content),
            &format!("CATEGORY_{}", id),
            Axis::Vertical,
            LayoutHints::min_height(25.0).flexible_width(9999.0),
        );
        self.toolkit.set_active(content, false);

        let mut entries = Vec::new();
        let mut sections = Vec::new();
        {
            let mut env = Env {
                toolkit: &mut self.toolkit,
                runtime: self.runtime.as_ref(),
                services: self.services.as_ref(),
            };
            for (section, settings) in group_sections(settings) {
                let label = (!section.is_empty()).then(|| {
                    let l = env
                        .toolkit
                        .create_label(content, &format!("SECTION_{}", section), &section);
                    env.toolkit.set_layout(l, LayoutHints::min_height(30.0));
                    l
                });
                let mut members = Vec::new();
                for setting in settings {
                    let index = entries.len();
                    let stored = store.get(&setting.key).unwrap_or_default();
                    let mut entry = EntryState::new(
                        EntryId { category, index },
                        setting,
                        stored,
                        env.services,
                        force_advanced,
                    );
                    entry.enable(&mut env, content);
                    entries.push(entry);
                    members.push(index);
                }
                sections.push(Section {
                    label,
                    entries: members,
                });
            }
        }

        tracing::info!("Category '{}' ready with {} settings", id, entries.len());
        self.stores.push(store);
        self.categories.push(Category {
            id,
            name,
            store: store_index,
            entries,
            sections,
            list_button,
            content,
            completely_hidden: false,
        });
        Ok(category)
    }

    /// Disable every entry and destroy the manager widgets, handing the
    /// toolkit back to the host
    ///
    /// Stores are dropped without saving; pending drafts are lost.
    pub fn teardown(mut self) -> T {
        let mut p = self.parts();
        for category in p.categories.iter_mut() {
            for entry in &mut category.entries {
                entry.disable(&mut p.env);
            }
        }
        if let Some(driver) = self.driver.take() {
            self.toolkit.destroy(driver);
        }
        self.toolkit.destroy(self.ui.root);
        tracing::debug!(
            "Coordinator torn down ({} drafts discarded)",
            self.dirty.len()
        );
        self.toolkit
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    fn refresh_visibility(&mut self) {
        let lowered = self.filter.to_lowercase();
        for category in &mut self.categories {
            let visible: Vec<bool> = category
                .entries
                .iter()
                .map(|e| {
                    (self.show_advanced || !e.is_advanced()) && e.setting().matches_filter(&lowered)
                })
                .collect();
            for (entry, on) in category.entries.iter().zip(&visible) {
                entry.set_visible(&mut self.toolkit, *on);
            }
            for section in &category.sections {
                if let Some(label) = section.label {
                    let any = section.entries.iter().any(|i| visible[*i]);
                    self.toolkit.set_active(label, any);
                }
            }

            category.completely_hidden = !self.show_advanced
                && !category.entries.is_empty()
                && category.entries.iter().all(EntryState::is_advanced);
            self.toolkit
                .set_active(category.list_button, !category.completely_hidden);
        }

        if let Some(current) = self.current {
            if self.categories[current].completely_hidden {
                self.unset_category();
            }
        }
    }

    pub fn set_show_advanced(&mut self, on: bool) {
        self.show_advanced = on;
        self.toolkit.set_checked(self.ui.advanced_toggle, on);
        self.refresh_visibility();
    }

    pub fn set_filter(&mut self, filter: &str) {
        if self.toolkit.text(self.ui.filter_input).as_deref() != Some(filter) {
            self.toolkit.set_text(self.ui.filter_input, filter);
        }
        self.filter = filter.to_string();
        self.refresh_visibility();
    }

    /// Show one category; selecting the current one again hides it
    pub fn select_category(&mut self, index: usize) -> bool {
        let Some(category) = self.categories.get(index) else {
            return false;
        };
        if category.completely_hidden {
            return false;
        }
        let (content, button) = (category.content, category.list_button);
        if self.current == Some(index) {
            self.unset_category();
            return true;
        }

        self.unset_category();
        self.toolkit.set_active(content, true);
        style_button(
            &mut self.toolkit,
            self.runtime.as_ref(),
            button,
            ACTIVE_CATEGORY,
        );
        self.current = Some(index);
        tracing::debug!("Selected category {}", self.categories[index].id);
        true
    }

    pub fn unset_category(&mut self) {
        let Some(current) = self.current.take() else {
            return;
        };
        let category = &self.categories[current];
        self.toolkit.set_active(category.content, false);
        style_button(
            &mut self.toolkit,
            self.runtime.as_ref(),
            category.list_button,
            INACTIVE_CATEGORY,
        );
    }

    pub fn set_auto_save(&mut self, on: bool) -> Option<Cmd> {
        if self.config.auto_save == on {
            return None;
        }
        self.config.auto_save = on;
        self.toolkit.set_checked(self.ui.auto_save_toggle, on);
        self.toolkit.set_active(self.ui.save_button, !on);
        self.refresh_save_button();
        tracing::debug!("Auto-save {}", if on { "on" } else { "off" });
        Some(Cmd::SaveConfig)
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.toolkit.set_active(self.ui.root, self.menu_open);
        if self.menu_open {
            self.poll_store_changes();
            self.refresh_visibility();
        }
        tracing::debug!("Menu {}", if self.menu_open { "opened" } else { "closed" });
    }

    // ========================================================================
    // Dirty set and persistence
    // ========================================================================

    fn refresh_save_button(&mut self) {
        let any = !self.dirty.is_empty();
        if self.toolkit.is_active(self.ui.save_button) {
            self.toolkit.set_interactable(self.ui.save_button, any);
        }
    }

    /// Commit every entry dirty at call time, flush each affected store once
    pub fn save(&mut self) {
        let snapshot = std::mem::take(&mut self.dirty);
        let mut p = self.parts();

        let mut failed = BTreeSet::new();
        let mut touched = BTreeSet::new();
        for id in &snapshot {
            let category = &p.categories[id.category];
            let entry = &category.entries[id.index];
            match entry.commit(p.stores[category.store].as_mut()) {
                Ok(true) => {
                    touched.insert(category.store);
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to save {}: {}", entry.setting().key, e);
                    failed.insert(*id);
                }
            }
        }

        for index in &touched {
            let store = &mut p.stores[*index];
            if store.save_on_set() {
                continue;
            }
            if let Err(e) = store.save() {
                tracing::warn!("Failed to flush settings: {}", e);
            }
        }

        for id in snapshot.difference(&failed) {
            let category = &mut p.categories[id.category];
            let store = p.stores[category.store].as_ref();
            category.entries[id.index].resync(&mut p.env, store);
        }
        p.dirty.extend(failed);

        tracing::info!("Saved {} settings", snapshot.len());
        self.poll_store_changes();
        self.refresh_save_button();
    }

    pub fn undo_entry(&mut self, id: EntryId) {
        let mut p = self.parts();
        let Some(category) = p.categories.get_mut(id.category) else {
            return;
        };
        let Some(entry) = category.entries.get_mut(id.index) else {
            return;
        };
        entry.undo(&mut p.env, p.stores[category.store].as_ref());
        track_dirty(p.dirty, entry);
        self.refresh_save_button();
    }

    pub fn revert_entry(&mut self, id: EntryId) {
        let mut p = self.parts();
        let Some(category) = p.categories.get_mut(id.category) else {
            return;
        };
        let Some(entry) = category.entries.get_mut(id.index) else {
            return;
        };
        if let Err(e) = entry.revert_to_default(&mut p.env, p.stores[category.store].as_mut()) {
            tracing::warn!("Failed to revert {}: {}", entry.setting().key, e);
        }
        track_dirty(p.dirty, entry);
        self.poll_store_changes();
        self.refresh_save_button();
    }

    /// Drain every store's change queue and resync the affected entries
    pub fn poll_store_changes(&mut self) -> bool {
        let mut p = self.parts();
        let mut any = false;
        for (index, store) in p.stores.iter_mut().enumerate() {
            let keys = store.drain_changes();
            if keys.is_empty() {
                continue;
            }
            any = true;
            for category in p.categories.iter_mut().filter(|c| c.store == index) {
                for entry in category
                    .entries
                    .iter_mut()
                    .filter(|e| keys.contains(&e.setting().key))
                {
                    entry.on_external_change(&mut p.env, store.as_ref());
                    track_dirty(p.dirty, entry);
                }
            }
        }
        if any {
            self.refresh_save_button();
        }
        any
    }

    // ========================================================================
    // Frame and events
    // ========================================================================

    /// Per-frame work: drain store changes, feed a pending rebind, or watch
    /// for the menu toggle key
    pub fn update_frame(&mut self, input: &dyn KeyInput) -> Option<Cmd> {
        let mut cmd = self.poll_store_changes().then_some(Cmd::Redraw);

        if self.services.rebind().is_listening() {
            let captured = self.services.rebind().poll(input);
            if let Some((id, key)) = captured {
                let mut p = self.parts();
                if let Some(entry) = p
                    .categories
                    .get_mut(id.category)
                    .and_then(|c| c.entries.get_mut(id.index))
                {
                    entry.on_key_captured(&mut p.env, &key);
                }
                cmd = Some(Cmd::Redraw);
            }
            // Key polling belongs to the rebind while it listens
            return cmd;
        }

        if input.key_down(&self.config.toggle_key) {
            self.toggle_menu();
            cmd = Some(Cmd::Redraw);
        }
        cmd
    }

    fn handle_chrome(&mut self, event: &WidgetEvent) -> Option<Option<Cmd>> {
        let ui = self.ui;
        let redraw = Some(Some(Cmd::Redraw));
        match &event.kind {
            EventKind::Clicked if event.widget == ui.save_button => {
                self.save();
                redraw
            }
            EventKind::Clicked if event.widget == ui.hide_button => {
                if self.menu_open {
                    self.toggle_menu();
                }
                redraw
            }
            EventKind::Toggled(on) if event.widget == ui.advanced_toggle => {
                self.set_show_advanced(*on);
                redraw
            }
            EventKind::Toggled(on) if event.widget == ui.auto_save_toggle => {
                Some(Cmd::merge(self.set_auto_save(*on), Some(Cmd::Redraw)))
            }
            EventKind::TextChanged(text) if event.widget == ui.filter_input => {
                self.set_filter(text);
                redraw
            }
            EventKind::Clicked => {
                let index = self
                    .categories
                    .iter()
                    .position(|c| c.list_button == event.widget)?;
                self.select_category(index);
                redraw
            }
            _ => None,
        }
    }

    fn handle_widget(&mut self, event: &WidgetEvent) -> Option<Cmd> {
        if let Some(cmd) = self.handle_chrome(event) {
            return cmd;
        }

        let auto_save = self.config.auto_save;
        let mut p = self.parts();
        let mut outcome = EntryOutcome::Ignored;
        'outer: for category in p.categories.iter_mut() {
            let store = p.stores[category.store].as_mut();
            for entry in &mut category.entries {
                outcome = match entry.handle_event(&mut p.env, store, event, auto_save) {
                    Ok(o) => o,
                    Err(e) => {
                        tracing::warn!("Failed to write {}: {}", entry.setting().key, e);
                        EntryOutcome::Handled
                    }
                };
                if outcome != EntryOutcome::Ignored {
                    track_dirty(p.dirty, entry);
                    break 'outer;
                }
            }
        }

        if outcome == EntryOutcome::Ignored {
            return None;
        }
        if outcome == EntryOutcome::Resynced {
            self.poll_store_changes();
        }
        self.refresh_save_button();
        Some(Cmd::Redraw)
    }

    /// Main update function
    ///
    /// Debug builds wrap the dispatch with tracing and an invariant check.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        #[cfg(debug_assertions)]
        {
            self.update_traced(msg)
        }
        #[cfg(not(debug_assertions))]
        {
            self.update_inner(msg)
        }
    }

    fn update_inner(&mut self, msg: Msg) -> Option<Cmd> {
        match msg {
            Msg::Widget(event) => self.handle_widget(&event),
            Msg::StoreChanged => self.poll_store_changes().then_some(Cmd::Redraw),
            Msg::UndoEntry(id) => {
                self.undo_entry(id);
                Some(Cmd::Redraw)
            }
            Msg::RevertEntry(id) => {
                self.revert_entry(id);
                Some(Cmd::Redraw)
            }
            Msg::Save => {
                self.save();
                Some(Cmd::Redraw)
            }
            Msg::SelectCategory(id) => {
                let index = self.categories.iter().position(|c| c.id == id)?;
                self.select_category(index).then_some(Cmd::Redraw)
            }
            Msg::ShowAdvanced(on) => {
                self.set_show_advanced(on);
                Some(Cmd::Redraw)
            }
            Msg::Filter(text) => {
                self.set_filter(&text);
                Some(Cmd::Redraw)
            }
            Msg::SetAutoSave(on) => Cmd::merge(self.set_auto_save(on), Some(Cmd::Redraw)),
            Msg::ToggleMenu => {
                self.toggle_menu();
                Some(Cmd::Redraw)
            }
        }
    }

    #[cfg(debug_assertions)]
    fn update_traced(&mut self, msg: Msg) -> Option<Cmd> {
        let msg_name = msg_type_name(&msg);
        let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

        let before = self.snapshot();
        debug!(target: "message", msg = %msg_name, "processing");

        let result = self.update_inner(msg);

        if let Some(diff) = before.diff(&self.snapshot()) {
            debug!(target: "state", %diff, "state changed");
        }
        self.assert_invariants(&msg_name);
        result
    }

    /// The dirty set holds exactly the dirty entries
    #[cfg(debug_assertions)]
    fn assert_invariants(&self, context: &str) {
        for entry in self.categories.iter().flat_map(|c| c.entries.iter()) {
            debug_assert_eq!(
                entry.is_dirty(),
                self.dirty.contains(&entry.id()),
                "dirty set out of sync for {} after {}",
                entry.setting().key,
                context
            );
        }
    }
}

/// Display name of a message for tracing
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Widget(e) => format!("Widget({:?})", e.kind),
        other => format!("{:?}", other),
    }
}

fn style_button(
    toolkit: &mut dyn Toolkit,
    runtime: &dyn RuntimeCapability,
    button: WidgetId,
    color: Color,
) {
    let slots = ColorSlots::normal(color).with_highlighted(color);
    if let Err(e) = runtime.apply_visual_state(toolkit, button, &slots) {
        tracing::warn!("Failed to restyle category button: {}", e);
    }
}

fn build_chrome(toolkit: &mut dyn Toolkit, config: &ManagerConfig) -> ManagerUi {
    let root = toolkit.create_group(
        None,
        "ConfigManager",
        Axis::Vertical,
        LayoutHints::min(650.0, 400.0)
            .flexible_width(9999.0)
            .flexible_height(9999.0),
    );
    toolkit.set_active(root, false);

    let header = toolkit.create_group(
        Some(root),
        "Header",
        Axis::Horizontal,
        LayoutHints::min_height(30.0).flexible_width(9999.0),
    );
    let title = toolkit.create_label(header, "Title", "Configuration Manager");
    toolkit.set_layout(title, LayoutHints::min(200.0, 30.0).flexible_width(9999.0));

    let auto_save_toggle = toolkit.create_toggle(header, "AutoSaveToggle", "Auto-save", config.auto_save);
    toolkit.set_layout(auto_save_toggle, LayoutHints::min(120.0, 30.0));

    let advanced_toggle =
        toolkit.create_toggle(header, "AdvancedToggle", "Show Advanced Settings", false);
    toolkit.set_layout(advanced_toggle, LayoutHints::min(200.0, 30.0));

    let filter_input = toolkit.create_input(header, "FilterInput", "Search...", false);
    toolkit.set_layout(filter_input, LayoutHints::min(200.0, 30.0).flexible_width(0.0));

    let save_button = toolkit.create_button(header, "SaveButton", "Save Preferences");
    toolkit.set_layout(save_button, LayoutHints::min(150.0, 30.0));
    toolkit.set_interactable(save_button, false);
    if config.auto_save {
        toolkit.set_active(save_button, false);
    }

    let hide_button = toolkit.create_button(header, "HideButton", "X");
    toolkit.set_layout(hide_button, LayoutHints::min(30.0, 30.0));

    let body = toolkit.create_group(
        Some(root),
        "Body",
        Axis::Horizontal,
        LayoutHints::min_height(300.0)
            .flexible_width(9999.0)
            .flexible_height(9999.0),
    );
    let category_list = toolkit.create_group(
        Some(body),
        "CategoryList",
        Axis::Vertical,
        LayoutHints::min(200.0, 300.0).flexible_height(9999.0),
    );
    let category_content = toolkit.create_group(
        Some(body),
        "CategoryContent",
        Axis::Vertical,
        LayoutHints::min(400.0, 300.0)
            .flexible_width(9999.0)
            .flexible_height(9999.0),
    );

    ManagerUi {
        root,
        title,
        auto_save_toggle,
        advanced_toggle,
        filter_input,
        save_button,
        hide_button,
        category_list,
        category_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setting::PluginMeta;
    use crate::store::MemoryStore;
    use crate::value::{Value, ValueType};

    fn setting(section: &str, key: &str) -> Setting {
        Setting::new(SettingKey::new(section, key), ValueType::Bool, Value::Bool(true))
    }

    #[test]
    fn test_category_identity_prefers_plugin_guid() {
        let store = MemoryStore::new()
            .with_meta(PluginMeta::new("com.example.video", "Video", "1.0"))
            .with_path("/cfg/video.cfg");
        assert_eq!(
            category_identity(&store),
            ("com.example.video".to_string(), "Video".to_string())
        );
    }

    #[test]
    fn test_category_identity_from_file_stem() {
        let store = MemoryStore::new().with_path("/cfg/core.cfg");
        assert_eq!(
            category_identity(&store),
            ("core".to_string(), "core".to_string())
        );
    }

    #[test]
    fn test_category_identity_unknown() {
        let (id, name) = category_identity(&MemoryStore::new());
        assert_eq!(id, UNKNOWN_CATEGORY);
        assert_eq!(name, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_unnamed_section_first() {
        let groups = group_sections(vec![
            setting("Video", "a"),
            setting("", "b"),
            setting("Audio", "c"),
            setting("Video", "d"),
        ]);
        let names: Vec<&str> = groups.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(names, vec!["", "Video", "Audio"]);
        assert_eq!(groups[1].1.len(), 2);
    }
}

//! Coordinator tests: categories, visibility, saving and frame polling

mod common;

use common::{
    bool_setting, coordinator, coordinator_with, entry_widget, int, int_setting, percent_setting,
    store_with, SharedStore,
};
use knobs::coordinator::UNKNOWN_CATEGORY;
use knobs::input::{keys, FrameKeys};
use knobs::setting::{PluginMeta, Setting, SettingKey, Tag};
use knobs::store::{MemoryStore, SettingsStore};
use knobs::toolkit::Toolkit;
use knobs::value::{Value, ValueType};
use knobs::{Cmd, Coordinator, HeadlessToolkit, ManagerConfig, Msg};

fn advanced(setting: Setting) -> Setting {
    setting.with_tag(Tag::Text("Advanced".to_string()))
}

fn video_store() -> MemoryStore {
    store_with(
        "com.example.video",
        vec![
            bool_setting("Video", "VSync", true),
            int_setting("", "Fps", 60),
            int_setting("Audio", "Volume", 80).with_description("Master loudness"),
            advanced(bool_setting("Video", "Tearing", false)),
        ],
    )
}

type Manager = Coordinator<HeadlessToolkit>;

fn type_into(coord: &mut Manager, key: &SettingKey, widget: &str, text: &str) -> Option<Cmd> {
    let input = entry_widget(coord, key, widget);
    let event = coord.toolkit_mut().type_text(input, text);
    coord.update(Msg::Widget(event))
}

// ========================================================================
// Setup
// ========================================================================

#[test]
fn test_store_becomes_category_with_sections() {
    let mut coord = coordinator();
    assert_eq!(coord.add_store(video_store(), false), Some(0));

    let category = coord.category("com.example.video").unwrap();
    let keys: Vec<&str> = category
        .entries()
        .iter()
        .map(|e| e.setting().key.key.as_str())
        .collect();
    assert_eq!(keys, vec!["Fps", "VSync", "Tearing", "Volume"]);

    let tk = coord.toolkit();
    let content = category.content();
    assert!(tk.find_under(content, "SECTION_Video").is_some());
    assert!(tk.find_under(content, "SECTION_Audio").is_some());
    assert!(tk.find_under(content, "SECTION_").is_none());
    assert!(!tk.is_active(content));
    assert_eq!(
        tk.text(category.list_button()).as_deref(),
        Some("com.example.video")
    );
    assert!(coord.driver().is_some());
}

#[test]
fn test_category_falls_back_to_unknown() {
    let mut coord = coordinator();
    let mut store = MemoryStore::new();
    store.bind(bool_setting("", "Loose", false));
    coord.add_store(store, false);
    assert!(coord.category(UNKNOWN_CATEGORY).is_some());
}

#[test]
fn test_listing_error_skips_store() {
    let mut coord = coordinator();
    let broken = video_store().with_listing_error("bad line 3");
    assert_eq!(coord.add_store(broken, false), None);
    assert!(coord.categories().is_empty());
    assert!(coord.toolkit().find("BUTTON_com.example.video").is_none());

    assert_eq!(coord.add_store(video_store(), false), Some(0));
}

#[test]
fn test_duplicate_category_rejected() {
    let mut coord = coordinator();
    assert_eq!(coord.add_store(video_store(), false), Some(0));
    assert_eq!(coord.add_store(video_store(), false), None);
    assert_eq!(coord.categories().len(), 1);
}

// ========================================================================
// Selection
// ========================================================================

#[test]
fn test_select_and_deselect_category() {
    let mut coord = coordinator();
    coord.add_store(video_store(), false);
    coord.add_store(
        store_with("com.example.audio", vec![bool_setting("", "Mute", false)]),
        false,
    );

    let cmd = coord.update(Msg::SelectCategory("com.example.video".to_string()));
    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(coord.current_category(), Some("com.example.video"));
    let video = coord.category("com.example.video").unwrap();
    assert!(coord.toolkit().is_active(video.content()));
    assert!(coord
        .toolkit()
        .member_color(video.list_button(), "normalColor")
        .is_some());

    coord.update(Msg::SelectCategory("com.example.audio".to_string()));
    assert_eq!(coord.current_category(), Some("com.example.audio"));
    let video = coord.category("com.example.video").unwrap();
    assert!(!coord.toolkit().is_active(video.content()));

    // Selecting the current category again hides it
    coord.update(Msg::SelectCategory("com.example.audio".to_string()));
    assert_eq!(coord.current_category(), None);
}

#[test]
fn test_list_button_click_selects() {
    let mut coord = coordinator();
    coord.add_store(video_store(), false);
    let button = coord.category("com.example.video").unwrap().list_button();
    let event = coord.toolkit_mut().click(button);
    coord.update(Msg::Widget(event));
    assert_eq!(coord.current_category(), Some("com.example.video"));
}

// ========================================================================
// Visibility
// ========================================================================

fn root_active(coord: &Manager, key: &str, section: &str) -> bool {
    let id = coord.entry_id(&SettingKey::new(section, key)).unwrap();
    let root = coord.entry(id).unwrap().ui().unwrap().root;
    coord.toolkit().is_active(root)
}

#[test]
fn test_advanced_entries_hidden_until_shown() {
    let mut coord = coordinator();
    coord.add_store(video_store(), false);
    assert!(!root_active(&coord, "Tearing", "Video"));
    assert!(root_active(&coord, "VSync", "Video"));

    coord.update(Msg::ShowAdvanced(true));
    assert!(coord.is_showing_advanced());
    assert!(coord.toolkit().is_checked(coord.ui().advanced_toggle));
    assert!(root_active(&coord, "Tearing", "Video"));
}

#[test]
fn test_filter_matches_key_and_description() {
    let mut coord = coordinator();
    coord.add_store(video_store(), false);

    coord.update(Msg::Filter("VSYNC".to_string()));
    assert!(root_active(&coord, "VSync", "Video"));
    assert!(!root_active(&coord, "Fps", ""));
    assert!(!root_active(&coord, "Volume", "Audio"));
    let tk = coord.toolkit();
    assert!(tk.is_active(tk.find("SECTION_Video").unwrap()));
    assert!(!tk.is_active(tk.find("SECTION_Audio").unwrap()));

    coord.update(Msg::Filter("loudness".to_string()));
    assert!(root_active(&coord, "Volume", "Audio"));
    assert!(!root_active(&coord, "VSync", "Video"));
    assert_eq!(
        coord.toolkit().text(coord.ui().filter_input).as_deref(),
        Some("loudness")
    );

    coord.update(Msg::Filter(String::new()));
    assert!(root_active(&coord, "Fps", ""));
}

#[test]
fn test_all_advanced_category_is_completely_hidden() {
    let mut coord = coordinator();
    coord.add_store(
        store_with("com.example.debug", vec![bool_setting("", "Wireframe", false)]),
        true,
    );
    let category = coord.category("com.example.debug").unwrap();
    assert!(category.is_completely_hidden());
    assert!(!coord.toolkit().is_active(category.list_button()));
    assert_eq!(
        coord.update(Msg::SelectCategory("com.example.debug".to_string())),
        None
    );

    coord.update(Msg::ShowAdvanced(true));
    assert!(!coord.category("com.example.debug").unwrap().is_completely_hidden());
    coord.update(Msg::SelectCategory("com.example.debug".to_string()));
    assert_eq!(coord.current_category(), Some("com.example.debug"));

    // Hiding advanced again drops the selection
    coord.update(Msg::ShowAdvanced(false));
    assert_eq!(coord.current_category(), None);
}

#[test]
fn test_non_browsable_plugin_is_advanced() {
    let mut coord = coordinator();
    let mut meta = PluginMeta::new("com.example.hidden", "Hidden", "0.1.0");
    meta.browsable = false;
    let mut store = MemoryStore::new().with_meta(meta);
    store.bind(bool_setting("", "Secret", false));
    coord.add_store(store, false);

    assert!(coord.category("com.example.hidden").unwrap().is_completely_hidden());
}

// ========================================================================
// Saving
// ========================================================================

#[test]
fn test_save_commits_dirty_entries_and_flushes_once() {
    let mut coord = coordinator();
    let video = SharedStore::new(store_with(
        "com.example.video",
        vec![percent_setting("Brightness", 50), percent_setting("Contrast", 50)],
    ));
    let audio = SharedStore::new(store_with(
        "com.example.audio",
        vec![percent_setting("Volume", 50)],
    ));
    coord.add_store(video.clone(), false);
    coord.add_store(audio.clone(), false);

    let save_button = coord.ui().save_button;
    assert!(!coord.toolkit().is_interactable(save_button));

    let brightness = SettingKey::new("General", "Brightness");
    let contrast = SettingKey::new("General", "Contrast");
    let volume = SettingKey::new("General", "Volume");
    type_into(&mut coord, &brightness, "NumberInput", "70");
    type_into(&mut coord, &contrast, "NumberInput", "30");
    type_into(&mut coord, &volume, "NumberInput", "90");
    assert_eq!(coord.dirty().len(), 3);
    assert!(coord.toolkit().is_interactable(save_button));
    assert_eq!(video.borrow().write_count(), 0);

    assert_eq!(coord.update(Msg::Save), Some(Cmd::Redraw));
    assert!(coord.dirty().is_empty());
    assert!(!coord.toolkit().is_interactable(save_button));
    assert_eq!(video.borrow().get(&brightness), Some(int(70)));
    assert_eq!(video.borrow().get(&contrast), Some(int(30)));
    assert_eq!(audio.borrow().get(&volume), Some(int(90)));
    assert_eq!(video.borrow().save_count(), 1);
    assert_eq!(audio.borrow().save_count(), 1);

    let id = coord.entry_id(&brightness).unwrap();
    assert!(!coord.entry(id).unwrap().is_dirty());
}

#[test]
fn test_save_button_click_saves() {
    let mut coord = coordinator();
    let store = SharedStore::new(store_with(
        "com.example.video",
        vec![percent_setting("Brightness", 50)],
    ));
    coord.add_store(store.clone(), false);

    let key = SettingKey::new("General", "Brightness");
    type_into(&mut coord, &key, "NumberInput", "10");
    let button = coord.ui().save_button;
    let event = coord.toolkit_mut().click(button);
    coord.update(Msg::Widget(event));

    assert_eq!(store.borrow().get(&key), Some(int(10)));
    assert!(coord.dirty().is_empty());
}

#[test]
fn test_undo_and_revert_messages() {
    let mut coord = coordinator();
    let store = SharedStore::new(store_with(
        "com.example.video",
        vec![percent_setting("Brightness", 50)],
    ));
    let key = SettingKey::new("General", "Brightness");
    store.borrow_mut().external_set(&key, int(40)).unwrap();
    store.borrow_mut().drain_changes();
    coord.add_store(store.clone(), false);
    let id = coord.entry_id(&key).unwrap();

    type_into(&mut coord, &key, "NumberInput", "90");
    assert!(coord.dirty().contains(&id));
    coord.update(Msg::UndoEntry(id));
    assert!(coord.dirty().is_empty());
    assert_eq!(coord.entry(id).unwrap().edited(), &int(40));

    coord.update(Msg::RevertEntry(id));
    assert_eq!(store.borrow().get(&key), Some(int(50)));
    assert_eq!(store.borrow().save_count(), 0);
    assert_eq!(coord.entry(id).unwrap().edited(), &int(50));
}

#[test]
fn test_autosave_writes_through() {
    let mut coord = coordinator_with(ManagerConfig {
        auto_save: true,
        ..ManagerConfig::default()
    });
    assert!(!coord.toolkit().is_active(coord.ui().save_button));

    let store = SharedStore::new(store_with(
        "com.example.video",
        vec![percent_setting("Brightness", 50)],
    ));
    coord.add_store(store.clone(), false);

    let key = SettingKey::new("General", "Brightness");
    type_into(&mut coord, &key, "NumberInput", "65");
    assert!(coord.dirty().is_empty());
    assert_eq!(store.borrow().get(&key), Some(int(65)));
    assert_eq!(store.borrow().save_count(), 1);
}

#[test]
fn test_toggling_autosave_persists_preference() {
    let mut coord = coordinator();
    let cmd = coord.update(Msg::SetAutoSave(true));
    assert_eq!(cmd, Some(Cmd::Batch(vec![Cmd::SaveConfig, Cmd::Redraw])));
    assert!(coord.config().auto_save);
    assert!(!coord.toolkit().is_active(coord.ui().save_button));

    // Unchanged preference needs no write
    assert_eq!(coord.update(Msg::SetAutoSave(true)), Some(Cmd::Redraw));

    let toggle = coord.ui().auto_save_toggle;
    let event = coord.toolkit_mut().toggle(toggle, false);
    let cmd = coord.update(Msg::Widget(event));
    assert_eq!(cmd, Some(Cmd::Batch(vec![Cmd::SaveConfig, Cmd::Redraw])));
    assert!(coord.toolkit().is_active(coord.ui().save_button));
}

// ========================================================================
// Store changes
// ========================================================================

#[test]
fn test_external_change_resyncs_entry() {
    let mut coord = coordinator();
    let store = SharedStore::new(store_with(
        "com.example.video",
        vec![percent_setting("Brightness", 50)],
    ));
    coord.add_store(store.clone(), false);
    let key = SettingKey::new("General", "Brightness");
    let id = coord.entry_id(&key).unwrap();
    type_into(&mut coord, &key, "NumberInput", "90");
    assert!(coord.dirty().contains(&id));

    store.borrow_mut().external_set(&key, int(20)).unwrap();
    assert_eq!(coord.update(Msg::StoreChanged), Some(Cmd::Redraw));
    assert!(coord.dirty().is_empty());
    assert_eq!(coord.entry(id).unwrap().edited(), &int(20));
    let input = entry_widget(&coord, &key, "NumberInput");
    assert_eq!(coord.toolkit().text(input).as_deref(), Some("20"));

    assert_eq!(coord.update(Msg::StoreChanged), None);
}

// ========================================================================
// Frame polling
// ========================================================================

#[test]
fn test_toggle_key_opens_and_closes_menu() {
    let mut coord = coordinator();
    let root = coord.ui().root;
    assert!(!coord.is_menu_open());

    assert_eq!(coord.update_frame(&FrameKeys::new()), None);
    assert_eq!(
        coord.update_frame(&FrameKeys::pressed(["F5"])),
        Some(Cmd::Redraw)
    );
    assert!(coord.is_menu_open());
    assert!(coord.toolkit().is_active(root));

    coord.update_frame(&FrameKeys::pressed(["F5"]));
    assert!(!coord.is_menu_open());
    assert!(!coord.toolkit().is_active(root));
}

#[test]
fn test_custom_toggle_key() {
    let mut coord = coordinator_with(ManagerConfig {
        toggle_key: "F1".to_string(),
        ..ManagerConfig::default()
    });
    coord.update_frame(&FrameKeys::pressed(["F5"]));
    assert!(!coord.is_menu_open());
    coord.update_frame(&FrameKeys::pressed(["F1"]));
    assert!(coord.is_menu_open());
}

#[test]
fn test_hide_button_closes_menu() {
    let mut coord = coordinator();
    coord.update(Msg::ToggleMenu);
    assert!(coord.is_menu_open());
    let hide = coord.ui().hide_button;
    let event = coord.toolkit_mut().click(hide);
    coord.update(Msg::Widget(event));
    assert!(!coord.is_menu_open());
}

#[test]
fn test_rebind_captures_toggle_key() {
    let mut coord = coordinator();
    let ty = keys::legacy_key_type();
    let jump = Setting::new(
        SettingKey::new("Input", "Jump"),
        ValueType::Enum(ty.clone()),
        Value::Enum(ty.parse("Space").unwrap()),
    );
    let store = SharedStore::new(store_with("com.example.input", vec![jump]));
    coord.add_store(store.clone(), false);
    coord.update(Msg::ToggleMenu);

    let key = SettingKey::new("Input", "Jump");
    let rebind = entry_widget(&coord, &key, "RebindButton");
    let event = coord.toolkit_mut().click(rebind);
    coord.update(Msg::Widget(event));
    assert!(coord.services().rebind().is_listening());

    // F5 goes to the rebind, not the menu toggle
    assert_eq!(
        coord.update_frame(&FrameKeys::pressed(["F5"])),
        Some(Cmd::Redraw)
    );
    assert!(coord.is_menu_open());
    let label = entry_widget(&coord, &key, "KeyLabel");
    assert_eq!(coord.toolkit().text(label).as_deref(), Some("F5"));

    let confirm = entry_widget(&coord, &key, "ConfirmButton");
    let event = coord.toolkit_mut().click(confirm);
    coord.update(Msg::Widget(event));
    let id = coord.entry_id(&key).unwrap();
    assert_eq!(coord.entry(id).unwrap().edited().to_string(), "F5");
    assert!(coord.dirty().contains(&id));

    coord.update(Msg::Save);
    assert_eq!(
        store.borrow().get(&key).map(|v| v.to_string()).as_deref(),
        Some("F5")
    );

    // Listening is over; the toggle key works again
    coord.update_frame(&FrameKeys::pressed(["F5"]));
    assert!(!coord.is_menu_open());
}

#[test]
fn test_teardown_disables_entries_and_releases_rebind() {
    let mut coord = coordinator();
    let ty = keys::legacy_key_type();
    let jump = Setting::new(
        SettingKey::new("Input", "Jump"),
        ValueType::Enum(ty.clone()),
        Value::Enum(ty.parse("Space").unwrap()),
    );
    coord.add_store(store_with("com.example.input", vec![jump]), false);
    coord.update(Msg::ToggleMenu);

    let key = SettingKey::new("Input", "Jump");
    let rebind = entry_widget(&coord, &key, "RebindButton");
    let event = coord.toolkit_mut().click(rebind);
    coord.update(Msg::Widget(event));

    let services = coord.services().clone();
    assert!(services.rebind().is_listening());
    let root = coord.ui().root;
    let entry_root = coord
        .entry(coord.entry_id(&key).unwrap())
        .unwrap()
        .ui()
        .unwrap()
        .root;

    let toolkit = coord.teardown();
    assert!(!services.rebind().is_listening());
    assert!(!toolkit.exists(entry_root));
    assert!(!toolkit.exists(root));
}

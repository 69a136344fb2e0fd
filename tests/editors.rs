//! Editor behaviour tests, driven through entries on a headless toolkit

mod common;

use std::sync::Arc;

use common::{bool_setting, enum_setting, permissions, severity, text_setting, Harness};
use knobs::convert::FnConverter;
use knobs::editor::{EditorKind, LISTENING_TEXT, MAX_DISPLAY_CHARS};
use knobs::entry::{EntryOutcome, EntryState};
use knobs::input::{keys, FrameKeys};
use knobs::setting::{Constraint, Setting, SettingKey};
use knobs::store::MemoryStore;
use knobs::toolkit::{Toolkit, WidgetId};
use knobs::value::{Color, Color32, ColorKind, Number, NumberKind, StructType, Value, ValueType};

fn build(h: &mut Harness, setting: Setting) -> (MemoryStore, EntryState) {
    let mut store = MemoryStore::new();
    store.bind(setting.clone());
    let entry = h.entry(&store, setting);
    (store, entry)
}

fn send(
    h: &mut Harness,
    store: &mut MemoryStore,
    entry: &mut EntryState,
    event: knobs::WidgetEvent,
) -> EntryOutcome {
    entry
        .handle_event(&mut h.env(), store, &event, false)
        .unwrap()
}

fn expand(h: &mut Harness, store: &mut MemoryStore, entry: &mut EntryState) {
    let button = h.widget(entry, "ExpandSubcontentButton");
    let event = h.toolkit.click(button);
    assert_eq!(send(h, store, entry, event), EntryOutcome::Handled);
}

// ========================================================================
// Bool, text
// ========================================================================

#[test]
fn test_bool_toggle() {
    let mut h = Harness::new();
    let (mut store, mut entry) = build(&mut h, bool_setting("Video", "VSync", true));
    assert_eq!(entry.editor().kind(), EditorKind::Boolean);

    let toggle = h.widget(&entry, "Toggle");
    assert!(h.toolkit.is_checked(toggle));

    let event = h.toolkit.toggle(toggle, false);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited(), &Value::Bool(false));
    assert_eq!(
        h.toolkit.text(h.widget(&entry, "BoolLabel")).as_deref(),
        Some("false")
    );
}

#[test]
fn test_text_editor_grows_with_content() {
    let mut h = Harness::new();
    let (mut store, mut entry) = build(&mut h, text_setting("General", "Motd", ""));
    assert_eq!(entry.editor().kind(), EditorKind::Text);

    let backing = h.widget(&entry, "HiddenLabel");
    assert!(h
        .toolkit
        .components(backing)
        .contains(&"ContentSizeFitter".to_string()));

    let input = h.widget(&entry, "StringInputField");
    assert_eq!(h.toolkit.placeholder(input), Some("empty"));

    let rebuilds = h.toolkit.layout_rebuilds();
    let event = h.toolkit.type_text(input, "hello\nworld");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited(), &Value::from("hello\nworld"));
    assert_eq!(h.toolkit.text(backing).as_deref(), Some("hello\nworld"));
    assert!(h.toolkit.layout_rebuilds() > rebuilds);
}

#[test]
fn test_text_editor_null_placeholder() {
    let mut h = Harness::new();
    let setting = text_setting("General", "Motd", "hi");
    let mut store = MemoryStore::new();
    store.bind_with(setting.clone(), Value::Null);
    let entry = h.entry(&store, setting);
    assert_eq!(entry.editor().kind(), EditorKind::Text);

    let input = h.widget(&entry, "StringInputField");
    assert_eq!(h.toolkit.placeholder(input), Some("null"));
    assert_eq!(h.toolkit.text(input).as_deref(), Some(""));
}

#[test]
fn test_text_editor_truncates_display_only() {
    let mut h = Harness::new();
    let long = "a".repeat(MAX_DISPLAY_CHARS + 10);
    let setting = text_setting("General", "Motd", "");
    let mut store = MemoryStore::new();
    store.bind_with(setting.clone(), Value::from(long.as_str()));
    let entry = h.entry(&store, setting);

    let input = h.widget(&entry, "StringInputField");
    let shown = h.toolkit.text(input).unwrap();
    assert_eq!(shown.chars().count(), MAX_DISPLAY_CHARS);
    assert_eq!(entry.edited(), &Value::from(long.as_str()));
    assert_eq!(entry.edited().as_text().map(str::len), Some(MAX_DISPLAY_CHARS + 10));
}

// ========================================================================
// Enums and flags
// ========================================================================

#[test]
fn test_enum_dropdown_selects_member() {
    let mut h = Harness::new();
    let ty = severity();
    let (mut store, mut entry) = build(&mut h, enum_setting("Level", &ty, "Medium"));
    assert_eq!(entry.editor().kind(), EditorKind::Enum);

    let dropdown = h.widget(&entry, "EnumDropdown");
    assert_eq!(h.toolkit.options(dropdown), &["Low", "Medium", "High"]);
    assert_eq!(h.toolkit.selected(dropdown), Some(1));

    let event = h.toolkit.select(dropdown, 2);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited().to_string(), "High");
}

#[test]
fn test_enum_names_are_cached_per_type() {
    let mut h = Harness::new();
    let ty = severity();
    let (_, _first) = build(&mut h, enum_setting("Level", &ty, "Low"));
    let (_, _second) = build(&mut h, enum_setting("Other", &ty, "High"));

    assert_eq!(h.services.enum_names.len(), 1);
    assert!(h.services.enum_names.contains("Severity"));
    let a = h.services.enum_names.get_or_build(&ty);
    let b = h.services.enum_names.get_or_build(&ty);
    assert!(Arc::ptr_eq(&a, &b));
}

fn flag_toggle(h: &Harness, entry: &EntryState, name: &str) -> WidgetId {
    h.widget(entry, &format!("Toggle_{}", name))
}

#[test]
fn test_flags_checklist() {
    let mut h = Harness::new();
    let ty = permissions();
    let (mut store, mut entry) = build(&mut h, enum_setting("Access", &ty, "Read, Write"));
    assert_eq!(entry.editor().kind(), EditorKind::Flags);
    assert_eq!(
        h.toolkit.text(h.widget(&entry, "FlagsLabel")).as_deref(),
        Some("Read, Write")
    );

    expand(&mut h, &mut store, &mut entry);
    assert!(h.toolkit.is_visible(entry.ui().unwrap().sub_content));
    assert!(h.toolkit.is_checked(flag_toggle(&h, &entry, "Read")));
    assert!(h.toolkit.is_checked(flag_toggle(&h, &entry, "Write")));
    assert!(!h.toolkit.is_checked(flag_toggle(&h, &entry, "Execute")));

    let read = flag_toggle(&h, &entry, "Read");
    let event = h.toolkit.toggle(read, false);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited().to_string(), "Write");
    assert_eq!(
        h.toolkit.text(h.widget(&entry, "FlagsLabel")).as_deref(),
        Some("Write")
    );

    let execute = flag_toggle(&h, &entry, "Execute");
    let event = h.toolkit.toggle(execute, true);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited().to_string(), "Write, Execute");
}

#[test]
fn test_flags_keep_at_least_one_set() {
    let mut h = Harness::new();
    let ty = permissions();
    let (mut store, mut entry) = build(&mut h, enum_setting("Access", &ty, "Write"));
    expand(&mut h, &mut store, &mut entry);

    let write = flag_toggle(&h, &entry, "Write");
    let event = h.toolkit.toggle(write, false);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Handled);
    assert!(h.toolkit.is_checked(write));
    assert_eq!(entry.edited().to_string(), "Write");
    assert!(!entry.is_dirty());
}

#[test]
fn test_flags_follow_undo() {
    let mut h = Harness::new();
    let ty = permissions();
    let (mut store, mut entry) = build(&mut h, enum_setting("Access", &ty, "Read"));
    expand(&mut h, &mut store, &mut entry);

    let execute = flag_toggle(&h, &entry, "Execute");
    let event = h.toolkit.toggle(execute, true);
    send(&mut h, &mut store, &mut entry, event);
    assert!(entry.is_dirty());

    entry.undo(&mut h.env(), &store);
    assert!(!h.toolkit.is_checked(execute));
    assert!(h.toolkit.is_checked(flag_toggle(&h, &entry, "Read")));
}

// ========================================================================
// Whitelist
// ========================================================================

#[test]
fn test_whitelist_dropdown() {
    let mut h = Harness::new();
    let allowed = vec![Value::from("Low"), Value::from("High"), Value::from("Ultra")];
    let setting = text_setting("Video", "Quality", "High")
        .with_constraint(Constraint::List(allowed.clone()));
    let (mut store, mut entry) = build(&mut h, setting);
    assert_eq!(entry.editor().kind(), EditorKind::ConstrainedList);

    let dropdown = h.widget(&entry, "ListDropdown");
    assert_eq!(h.toolkit.options(dropdown), &["Low", "High", "Ultra"]);
    assert_eq!(h.toolkit.selected(dropdown), Some(1));

    let event = h.toolkit.select(dropdown, 2);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited(), &allowed[2]);
}

// ========================================================================
// Colour
// ========================================================================

fn channel_widget(h: &Harness, entry: &EntryState, channel: &str, name: &str) -> WidgetId {
    let row = h.widget(entry, &format!("Channel_{}", channel));
    h.toolkit.find_under(row, name).unwrap()
}

#[test]
fn test_color_channel_input_and_slider() {
    let mut h = Harness::new();
    let red = Value::Color(Color::rgb(1.0, 0.0, 0.0));
    let setting = Setting::new(
        SettingKey::new("Hud", "Tint"),
        ValueType::Color(ColorKind::Float),
        red,
    );
    let (mut store, mut entry) = build(&mut h, setting);
    assert_eq!(entry.editor().kind(), EditorKind::Color);
    expand(&mut h, &mut store, &mut entry);

    let g_input = channel_widget(&h, &entry, "G", "ChannelInput");
    assert_eq!(h.toolkit.text(g_input).as_deref(), Some("0.000"));

    let event = h.toolkit.type_text(g_input, "0.5");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited(), &Value::Color(Color::rgb(1.0, 0.5, 0.0)));
    assert_eq!(
        h.toolkit.slider_value(channel_widget(&h, &entry, "G", "ChannelSlider")),
        Some(0.5)
    );
    assert_eq!(
        h.toolkit.color(h.widget(&entry, "ColorSwatch")),
        Some(Color::rgb(1.0, 0.5, 0.0))
    );

    let b_slider = channel_widget(&h, &entry, "B", "ChannelSlider");
    let event = h.toolkit.slide(b_slider, 0.25);
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(
        h.toolkit.text(channel_widget(&h, &entry, "B", "ChannelInput")).as_deref(),
        Some("0.250")
    );
}

#[test]
fn test_color_bad_channel_text_is_marked() {
    let mut h = Harness::new();
    let setting = Setting::new(
        SettingKey::new("Hud", "Tint"),
        ValueType::Color(ColorKind::Float),
        Value::Color(Color::WHITE),
    );
    let (mut store, mut entry) = build(&mut h, setting);
    expand(&mut h, &mut store, &mut entry);

    let r_input = channel_widget(&h, &entry, "R", "ChannelInput");
    let event = h.toolkit.type_text(r_input, "bright");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Handled);
    assert_eq!(h.toolkit.text_color(r_input), Some(Color::RED));
    assert_eq!(entry.edited(), &Value::Color(Color::WHITE));
}

#[test]
fn test_color_rejects_non_finite_channel_text() {
    let mut h = Harness::new();
    let red = Value::Color(Color::rgb(1.0, 0.0, 0.0));
    let setting = Setting::new(
        SettingKey::new("Hud", "Tint"),
        ValueType::Color(ColorKind::Float),
        red.clone(),
    );
    let (mut store, mut entry) = build(&mut h, setting);
    expand(&mut h, &mut store, &mut entry);

    let g_input = channel_widget(&h, &entry, "G", "ChannelInput");
    for text in ["NaN", "nan", "inf", "-infinity"] {
        let event = h.toolkit.type_text(g_input, text);
        assert_eq!(
            send(&mut h, &mut store, &mut entry, event),
            EntryOutcome::Handled,
            "{}",
            text
        );
        assert_eq!(h.toolkit.text_color(g_input), Some(Color::RED));
        assert_eq!(entry.edited(), &red);
        assert!(!entry.is_dirty());
    }
}

#[test]
fn test_byte_color_channels_clamp() {
    let mut h = Harness::new();
    let setting = Setting::new(
        SettingKey::new("Hud", "Outline"),
        ValueType::Color(ColorKind::Byte),
        Value::Color32(Color32::new(10, 20, 30, 255)),
    );
    let (mut store, mut entry) = build(&mut h, setting);
    expand(&mut h, &mut store, &mut entry);

    let r_input = channel_widget(&h, &entry, "R", "ChannelInput");
    assert_eq!(h.toolkit.text(r_input).as_deref(), Some("10"));

    let event = h.toolkit.type_text(r_input, "300");
    send(&mut h, &mut store, &mut entry, event);
    assert_eq!(entry.edited(), &Value::Color32(Color32::new(255, 20, 30, 255)));
}

// ========================================================================
// Float structs
// ========================================================================

#[test]
fn test_float_struct_fields() {
    let mut h = Harness::new();
    let f32_ty = ValueType::Number(NumberKind::F32);
    let vector = StructType::new("Vector2", true)
        .field("x", f32_ty.clone())
        .field("y", f32_ty)
        .build();
    let value = Value::Struct(vector.instance(vec![
        Value::Number(Number::F32(1.0)),
        Value::Number(Number::F32(2.0)),
    ]));
    let setting = Setting::new(
        SettingKey::new("Hud", "Offset"),
        ValueType::Struct(Arc::clone(&vector)),
        value,
    );
    let (mut store, mut entry) = build(&mut h, setting);
    assert_eq!(entry.editor().kind(), EditorKind::FloatStruct);

    let x = h.widget(&entry, "Input_x");
    let y = h.widget(&entry, "Input_y");
    assert_eq!(h.toolkit.text(x).as_deref(), Some("1"));
    assert_eq!(h.toolkit.text(h.widget(&entry, "Label_y")).as_deref(), Some("Y:"));

    let event = h.toolkit.type_text(y, "3.5");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    let expected = Value::Struct(vector.instance(vec![
        Value::Number(Number::F32(1.0)),
        Value::Number(Number::F32(3.5)),
    ]));
    assert_eq!(entry.edited(), &expected);

    let event = h.toolkit.type_text(x, "left");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Handled);
    assert_eq!(entry.edited(), &expected);

    for text in ["NaN", "inf"] {
        let event = h.toolkit.type_text(x, text);
        assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Handled);
        assert_eq!(entry.edited(), &expected);
    }
}

// ========================================================================
// Fallback
// ========================================================================

fn guid_type() -> Arc<StructType> {
    StructType::new("Guid", false).field("value", ValueType::Text).build()
}

fn guid(ty: &Arc<StructType>, text: &str) -> Value {
    Value::Struct(ty.instance(vec![Value::from(text)]))
}

fn guid_setting(ty: &Arc<StructType>) -> Setting {
    Setting::new(
        SettingKey::new("Net", "SessionId"),
        ValueType::Struct(Arc::clone(ty)),
        guid(ty, "abcd1234"),
    )
}

#[test]
fn test_fallback_without_converter_is_read_only() {
    let mut h = Harness::new();
    let ty = guid_type();
    let (_store, entry) = build(&mut h, guid_setting(&ty));
    assert_eq!(entry.editor().kind(), EditorKind::Fallback);

    let input = h.widget(&entry, "FallbackInput");
    assert_eq!(h.toolkit.text(input).as_deref(), Some("Unsupported type Guid"));
    assert!(!h.toolkit.is_interactable(input));
    assert_eq!(h.toolkit.text_color(input), Some(Color::RED));
}

#[test]
fn test_fallback_round_trips_through_converter() {
    let mut h = Harness::new();
    let ty = guid_type();
    let to_ty = Arc::clone(&ty);
    h.services.converters.register(
        "Guid",
        FnConverter::new(
            |v: &Value| match v {
                Value::Struct(s) => s
                    .get(0)
                    .and_then(Value::as_text)
                    .map(str::to_string)
                    .ok_or_else(|| "missing value".to_string()),
                _ => Err("not a guid".to_string()),
            },
            move |text: &str| {
                if text.len() == 8 {
                    Ok(guid(&to_ty, text))
                } else {
                    Err(format!("bad guid {}", text))
                }
            },
        ),
    );

    let (mut store, mut entry) = build(&mut h, guid_setting(&ty));
    let input = h.widget(&entry, "FallbackInput");
    assert_eq!(h.toolkit.text(input).as_deref(), Some("abcd1234"));
    assert!(h.toolkit.is_interactable(input));

    let event = h.toolkit.type_text(input, "deadbeef");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Staged);
    assert_eq!(entry.edited(), &guid(&ty, "deadbeef"));

    let event = h.toolkit.type_text(input, "nope");
    assert_eq!(send(&mut h, &mut store, &mut entry, event), EntryOutcome::Handled);
    assert_eq!(h.toolkit.text_color(input), Some(Color::RED));
    assert_eq!(entry.edited(), &guid(&ty, "deadbeef"));
}

// ========================================================================
// Keybinds
// ========================================================================

fn key_setting(ty: Arc<knobs::value::EnumType>, current: &str) -> Setting {
    let value = ty.parse(current).unwrap();
    Setting::new(
        SettingKey::new("Input", "Jump"),
        ValueType::Enum(ty),
        Value::Enum(value),
    )
}

fn click(h: &mut Harness, store: &mut MemoryStore, entry: &mut EntryState, name: &str) -> EntryOutcome {
    let button = h.widget(entry, name);
    let event = h.toolkit.click(button);
    send(h, store, entry, event)
}

#[test]
fn test_keybind_rebind_and_confirm() {
    let mut h = Harness::new();
    let (mut store, mut entry) = build(&mut h, key_setting(keys::legacy_key_type(), "Space"));
    assert_eq!(entry.editor().kind(), EditorKind::Keybind);

    let label = h.widget(&entry, "KeyLabel");
    let confirm = h.widget(&entry, "ConfirmButton");
    assert_eq!(h.toolkit.text(label).as_deref(), Some("Space"));
    assert!(!h.toolkit.is_visible(confirm));
    assert_eq!(
        h.toolkit.member_color(confirm, "disabledColor"),
        Some(Color::rgb(0.3, 0.3, 0.3))
    );

    assert_eq!(click(&mut h, &mut store, &mut entry, "RebindButton"), EntryOutcome::Handled);
    assert_eq!(h.toolkit.text(label).as_deref(), Some(LISTENING_TEXT));
    assert!(h.toolkit.is_visible(confirm));
    assert!(!h.toolkit.is_interactable(confirm));
    assert!(h.services.rebind().is_listening());

    let captured = h.services.rebind().poll(&FrameKeys::pressed(["K"]));
    let (owner, key) = captured.unwrap();
    assert_eq!(owner, entry.id());
    entry.on_key_captured(&mut h.env(), &key);
    assert_eq!(h.toolkit.text(label).as_deref(), Some("K"));
    assert!(h.toolkit.is_interactable(confirm));

    assert_eq!(click(&mut h, &mut store, &mut entry, "ConfirmButton"), EntryOutcome::Staged);
    assert_eq!(entry.edited().to_string(), "K");
    assert!(!h.services.rebind().is_listening());
    assert!(h.toolkit.is_visible(h.widget(&entry, "RebindButton")));
}

#[test]
fn test_keybind_cancel_keeps_value() {
    let mut h = Harness::new();
    let (mut store, mut entry) = build(&mut h, key_setting(keys::legacy_key_type(), "Space"));

    click(&mut h, &mut store, &mut entry, "RebindButton");
    let (_, key) = h
        .services
        .rebind()
        .poll(&FrameKeys::pressed(["Escape"]))
        .unwrap();
    entry.on_key_captured(&mut h.env(), &key);

    assert_eq!(click(&mut h, &mut store, &mut entry, "CancelButton"), EntryOutcome::Handled);
    assert_eq!(entry.edited().to_string(), "Space");
    assert!(!entry.is_dirty());
    assert_eq!(h.toolkit.text(h.widget(&entry, "KeyLabel")).as_deref(), Some("Space"));
    assert!(!h.services.rebind().is_listening());
}

#[test]
fn test_keybind_maps_to_input_system_names() {
    let mut h = Harness::new();
    let (mut store, mut entry) =
        build(&mut h, key_setting(keys::input_system_key_type(), "Space"));
    assert_eq!(entry.editor().kind(), EditorKind::Keybind);

    click(&mut h, &mut store, &mut entry, "RebindButton");
    let (_, key) = h
        .services
        .rebind()
        .poll(&FrameKeys::pressed(["Alpha1"]))
        .unwrap();
    entry.on_key_captured(&mut h.env(), &key);
    assert_eq!(h.toolkit.text(h.widget(&entry, "KeyLabel")).as_deref(), Some("Digit1"));

    click(&mut h, &mut store, &mut entry, "ConfirmButton");
    assert_eq!(entry.edited().to_string(), "Digit1");
}

#[test]
fn test_disable_releases_rebind() {
    let mut h = Harness::new();
    let (mut store, mut entry) = build(&mut h, key_setting(keys::legacy_key_type(), "Space"));
    click(&mut h, &mut store, &mut entry, "RebindButton");
    assert!(h.services.rebind().is_listening());

    entry.disable(&mut h.env());
    assert!(!h.services.rebind().is_listening());
}

//! The two key-identifier enum types
//!
//! Detection is by type name, so a host whose input-system type can't be
//! loaded still resolves settings declared with that name.

use std::sync::{Arc, OnceLock};

use crate::value::{EnumType, IntKind, ValueType};

pub const LEGACY_KEY_TYPE: &str = "KeyCode";
pub const INPUT_SYSTEM_KEY_TYPE: &str = "InputSystem.Key";

pub fn is_key_type(ty: &ValueType) -> bool {
    matches!(ty, ValueType::Enum(e) if e.name == LEGACY_KEY_TYPE || e.name == INPUT_SYSTEM_KEY_TYPE)
}

pub fn is_input_system_key(ty: &ValueType) -> bool {
    matches!(ty, ValueType::Enum(e) if e.name == INPUT_SYSTEM_KEY_TYPE)
}

/// Legacy key codes polled while rebinding (mouse and joystick excluded)
pub fn is_pollable(name: &str) -> bool {
    !name.starts_with("Mouse") && !name.starts_with("Joystick") && name != "None"
}

/// Legacy key-code enum
pub fn legacy_key_type() -> Arc<EnumType> {
    static TYPE: OnceLock<Arc<EnumType>> = OnceLock::new();
    Arc::clone(TYPE.get_or_init(|| {
        let mut ty = EnumType::new(LEGACY_KEY_TYPE, IntKind::I32, false)
            .member("None", 0)
            .member("Backspace", 8)
            .member("Tab", 9)
            .member("Return", 13)
            .member("Pause", 19)
            .member("Escape", 27)
            .member("Space", 32)
            .member("Quote", 39)
            .member("Comma", 44)
            .member("Minus", 45)
            .member("Period", 46)
            .member("Slash", 47);
        for d in 0..10 {
            ty = ty.member(format!("Alpha{}", d), 48 + d);
        }
        ty = ty
            .member("Semicolon", 59)
            .member("Equals", 61)
            .member("LeftBracket", 91)
            .member("Backslash", 92)
            .member("RightBracket", 93)
            .member("BackQuote", 96);
        for (i, c) in ('A'..='Z').enumerate() {
            ty = ty.member(c.to_string(), 97 + i as i128);
        }
        ty = ty.member("Delete", 127);
        for d in 0..10 {
            ty = ty.member(format!("Keypad{}", d), 256 + d);
        }
        ty = ty
            .member("KeypadPeriod", 266)
            .member("KeypadDivide", 267)
            .member("KeypadMultiply", 268)
            .member("KeypadMinus", 269)
            .member("KeypadPlus", 270)
            .member("KeypadEnter", 271)
            .member("KeypadEquals", 272)
            .member("UpArrow", 273)
            .member("DownArrow", 274)
            .member("RightArrow", 275)
            .member("LeftArrow", 276)
            .member("Insert", 277)
            .member("Home", 278)
            .member("End", 279)
            .member("PageUp", 280)
            .member("PageDown", 281);
        for f in 1..=15 {
            ty = ty.member(format!("F{}", f), 281 + f);
        }
        ty.member("Numlock", 300)
            .member("CapsLock", 301)
            .member("ScrollLock", 302)
            .member("RightShift", 303)
            .member("LeftShift", 304)
            .member("RightControl", 305)
            .member("LeftControl", 306)
            .member("RightAlt", 307)
            .member("LeftAlt", 308)
            .member("Print", 316)
            .member("Mouse0", 323)
            .member("Mouse1", 324)
            .member("Mouse2", 325)
            .member("JoystickButton0", 330)
            .member("JoystickButton1", 331)
            .build()
    }))
}

/// Input-system key enum
pub fn input_system_key_type() -> Arc<EnumType> {
    static TYPE: OnceLock<Arc<EnumType>> = OnceLock::new();
    Arc::clone(TYPE.get_or_init(|| {
        let mut ty = EnumType::new(INPUT_SYSTEM_KEY_TYPE, IntKind::I32, false)
            .member("None", 0)
            .member("Space", 1)
            .member("Enter", 2)
            .member("Tab", 3)
            .member("Backquote", 4)
            .member("Quote", 5)
            .member("Semicolon", 6)
            .member("Comma", 7)
            .member("Period", 8)
            .member("Slash", 9)
            .member("Backslash", 10)
            .member("LeftBracket", 11)
            .member("RightBracket", 12)
            .member("Minus", 13)
            .member("Equals", 14);
        for (i, c) in ('A'..='Z').enumerate() {
            ty = ty.member(c.to_string(), 15 + i as i128);
        }
        for d in 1..10 {
            ty = ty.member(format!("Digit{}", d), 40 + d);
        }
        ty = ty
            .member("Digit0", 50)
            .member("LeftShift", 51)
            .member("RightShift", 52)
            .member("LeftAlt", 53)
            .member("RightAlt", 54)
            .member("LeftCtrl", 55)
            .member("RightCtrl", 56)
            .member("Escape", 60)
            .member("LeftArrow", 61)
            .member("RightArrow", 62)
            .member("UpArrow", 63)
            .member("DownArrow", 64)
            .member("Backspace", 65)
            .member("PageDown", 66)
            .member("PageUp", 67)
            .member("Home", 68)
            .member("End", 69)
            .member("Insert", 70)
            .member("Delete", 71)
            .member("CapsLock", 72)
            .member("NumLock", 73)
            .member("PrintScreen", 74)
            .member("ScrollLock", 75)
            .member("Pause", 76)
            .member("NumpadEnter", 77)
            .member("NumpadDivide", 78)
            .member("NumpadMultiply", 79)
            .member("NumpadPlus", 80)
            .member("NumpadMinus", 81)
            .member("NumpadPeriod", 82)
            .member("NumpadEquals", 83);
        for d in 0..10 {
            ty = ty.member(format!("Numpad{}", d), 84 + d);
        }
        for f in 1..=12 {
            ty = ty.member(format!("F{}", f), 93 + f);
        }
        ty.build()
    }))
}

/// Input-system member name for a legacy key name
pub fn input_system_name(legacy: &str) -> String {
    let name = legacy
        .replace("Control", "Ctrl")
        .replace("Return", "Enter")
        .replace("Alpha", "Digit")
        .replace("Keypad", "Numpad")
        .replace("Numlock", "NumLock")
        .replace("BackQuote", "Backquote");
    if name == "Print" {
        "PrintScreen".to_string()
    } else {
        name
    }
}

/// Map a captured legacy key onto the input-system enum, if it has a twin
pub fn to_input_system(legacy: &str) -> Option<String> {
    let name = input_system_name(legacy);
    input_system_key_type()
        .member_named(&name)
        .map(|m| m.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_values() {
        let ty = legacy_key_type();
        assert_eq!(ty.member_named("A").unwrap().value, 97);
        assert_eq!(ty.member_named("F5").unwrap().value, 286);
        assert_eq!(ty.member_named("Keypad9").unwrap().value, 265);
    }

    #[test]
    fn test_name_mapping() {
        assert_eq!(to_input_system("LeftControl").as_deref(), Some("LeftCtrl"));
        assert_eq!(to_input_system("Return").as_deref(), Some("Enter"));
        assert_eq!(to_input_system("Alpha3").as_deref(), Some("Digit3"));
        assert_eq!(to_input_system("KeypadEnter").as_deref(), Some("NumpadEnter"));
        assert_eq!(to_input_system("Numlock").as_deref(), Some("NumLock"));
        assert_eq!(to_input_system("Print").as_deref(), Some("PrintScreen"));
        assert_eq!(to_input_system("BackQuote").as_deref(), Some("Backquote"));
        assert_eq!(to_input_system("F13"), None);
    }

    #[test]
    fn test_pollable_excludes_pointer_and_pad() {
        assert!(is_pollable("Space"));
        assert!(!is_pollable("Mouse0"));
        assert!(!is_pollable("JoystickButton1"));
    }

    #[test]
    fn test_key_type_detection_by_name() {
        let stand_in = EnumType::new(INPUT_SYSTEM_KEY_TYPE, IntKind::I32, false).build();
        assert!(is_key_type(&ValueType::Enum(stand_in)));
        assert!(is_key_type(&ValueType::Enum(legacy_key_type())));
        assert!(!is_key_type(&ValueType::Text));
    }
}

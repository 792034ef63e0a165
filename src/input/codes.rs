// SPDX-License-Identifier: GPL-3.0-only

//! Canonical physical-key code set and normalization helpers.
//!
//! Real keyboards and embedders do not always deliver canonically-cased
//! `KeyboardEvent.code` values; this module normalizes whatever arrives to
//! the canonical identifier set, and normalizes resolved layout outputs to
//! the logical button names the virtual keyboard uses (collapsing left/right
//! modifier variants, lower-casing action names).

/// The canonical `KeyboardEvent.code` identifier set.
pub const STANDARD_CODES: &[&str] = &[
    // Alphanumeric
    "Backquote",
    "Digit0",
    "Digit1",
    "Digit2",
    "Digit3",
    "Digit4",
    "Digit5",
    "Digit6",
    "Digit7",
    "Digit8",
    "Digit9",
    "KeyA",
    "KeyB",
    "KeyC",
    "KeyD",
    "KeyE",
    "KeyF",
    "KeyG",
    "KeyH",
    "KeyI",
    "KeyJ",
    "KeyK",
    "KeyL",
    "KeyM",
    "KeyN",
    "KeyO",
    "KeyP",
    "KeyQ",
    "KeyR",
    "KeyS",
    "KeyT",
    "KeyU",
    "KeyV",
    "KeyW",
    "KeyX",
    "KeyY",
    "KeyZ",
    // Control & navigation
    "Enter",
    "Escape",
    "Backspace",
    "Tab",
    "Space",
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "Delete",
    "Insert",
    "Home",
    "End",
    "PageUp",
    "PageDown",
    // Modifier keys
    "ShiftLeft",
    "ShiftRight",
    "ControlLeft",
    "ControlRight",
    "AltLeft",
    "AltRight",
    "MetaLeft",
    "MetaRight",
    "CapsLock",
    // Symbols & punctuation
    "Minus",
    "Equal",
    "BracketLeft",
    "BracketRight",
    "Backslash",
    "Semicolon",
    "Quote",
    "Comma",
    "Period",
    "Slash",
    // Function keys
    "F1",
    "F2",
    "F3",
    "F4",
    "F5",
    "F6",
    "F7",
    "F8",
    "F9",
    "F10",
    "F11",
    "F12",
    // Numpad
    "NumLock",
    "Numpad0",
    "Numpad1",
    "Numpad2",
    "Numpad3",
    "Numpad4",
    "Numpad5",
    "Numpad6",
    "Numpad7",
    "Numpad8",
    "Numpad9",
    "NumpadAdd",
    "NumpadSubtract",
    "NumpadMultiply",
    "NumpadDivide",
    "NumpadDecimal",
    "NumpadEnter",
    // Misc
    "ScrollLock",
    "Pause",
    "PrintScreen",
    "ContextMenu",
];

/// Safe named keys accepted through the fallback path when the event code
/// cannot be normalized. Matched case-insensitively against `event.key`.
pub const FALLBACK_KEYS: &[&str] = &["backspace", "enter", "tab", "escape"];

/// Normalizes a code string to the canonical identifier set.
///
/// Exact match first, then a trimmed case-insensitive match. Returns `None`
/// when the code is not a canonical identifier under either comparison.
#[must_use]
pub fn normalize_to_standard_code(input: &str) -> Option<&'static str> {
    if input.is_empty() {
        return None;
    }

    if let Some(&code) = STANDARD_CODES.iter().find(|&&code| code == input) {
        return Some(code);
    }

    let trimmed = input.trim();
    STANDARD_CODES
        .iter()
        .find(|&&code| code.eq_ignore_ascii_case(trimmed))
        .copied()
}

/// Whether `key` is on the fallback allow-list (case-insensitive).
#[must_use]
pub fn is_fallback_key(key: &str) -> bool {
    FALLBACK_KEYS
        .iter()
        .any(|&fallback| fallback.eq_ignore_ascii_case(key))
}

/// Normalizes a resolved layout output to a logical button name.
///
/// Left/right modifier variants collapse to one canonical action name,
/// backspace and capslock map to their virtual-keyboard action names, other
/// multi-character values pass through lower-cased, and single printable
/// characters pass through unchanged (case preserved).
#[must_use]
pub fn normalize_output(raw: &str) -> String {
    let lower = raw.to_lowercase();

    let mapped = match lower.as_str() {
        "shiftleft" | "shiftright" => Some("shift"),
        "controlleft" | "controlright" => Some("ctrl"),
        "altleft" | "altright" => Some("alt"),
        "metaleft" | "metaright" => Some("meta"),
        "backspace" => Some("bksp"),
        "capslock" => Some("lock"),
        "enter" => Some("enter"),
        "tab" => Some("tab"),
        _ => None,
    };

    if let Some(name) = mapped {
        return name.to_string();
    }

    if lower.chars().count() > 1 {
        lower
    } else {
        raw.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

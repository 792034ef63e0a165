// SPDX-License-Identifier: GPL-3.0-only

//! Layout coordinate mapping for the on-screen keyboard core.
//!
//! This module converts a declarative two-case layout (unshifted/shifted rows
//! of output tokens) into a lookup table keyed by canonical physical-key
//! identifiers, so physical key events can be resolved against whatever
//! layout the host currently shows.
//!
//! # Submodules
//!
//! - `types`: layout data structures and loading error types
//! - `mapper`: padding to the fixed five-row geometry and code mapping
//! - `parser`: permissive JSON loading with warnings
//!
//! # Layout identity
//!
//! Rebuilding the code mapping on every key event would be wasteful, so the
//! translator caches it and invalidates on layout change. The identity proxy
//! for "did the layout change" is the second row of the default case, which is
//! cheap to compare and distinct for every layout surface in practice.

pub mod mapper;
pub mod parser;
pub mod types;

pub use mapper::{QWERTY_EVENT_CODES, QWERTY_ROW_LENGTHS, build_code_mapping, pad_layout};
pub use parser::{parse_layout_file, parse_layout_from_string};
pub use types::{
    CodeMapping, KeyOutput, LayoutDefinition, PaddedLayout, PaddedRows, ParseError, ParseResult,
    Severity, ValidationIssue,
};

/// The built-in English QWERTY layout, used whenever the host supplies none.
#[must_use]
pub fn default_layout() -> LayoutDefinition {
    LayoutDefinition {
        default: vec![
            "` 1 2 3 4 5 6 7 8 9 0 - = {bksp}".to_string(),
            "{tab} q w e r t y u i o p [ ] \\".to_string(),
            "{lock} a s d f g h j k l ; ' {enter}".to_string(),
            "{shift} z x c v b n m , . / {shift}".to_string(),
            ".com @ {space}".to_string(),
        ],
        shift: vec![
            "~ ! @ # $ % ^ & * ( ) _ + {bksp}".to_string(),
            "{tab} Q W E R T Y U I O P { } |".to_string(),
            "{lock} A S D F G H J K L : \" {enter}".to_string(),
            "{shift} Z X C V B N M < > ? {shift}".to_string(),
            ".com @ {space}".to_string(),
        ],
    }
}

/// Returns the cache-invalidation identity for a layout.
///
/// The second row of the default case stands in for the whole layout; an
/// empty string when the layout has fewer than two rows.
#[must_use]
pub fn layout_identity(layout: &LayoutDefinition) -> &str {
    layout.default.get(1).map(String::as_str).unwrap_or("")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: the built-in layout fills every canonical position
    #[test]
    fn test_default_layout_is_complete() {
        let mapping = build_code_mapping(&default_layout());

        for codes in QWERTY_EVENT_CODES {
            for code in codes {
                let output = &mapping[code];
                assert!(
                    !output.normal.is_empty(),
                    "Default layout should map {} in the default case",
                    code
                );
                assert!(
                    !output.shift.is_empty(),
                    "Default layout should map {} in the shift case",
                    code
                );
            }
        }

        assert_eq!(mapping["KeyQ"].normal, "q");
        assert_eq!(mapping["KeyQ"].shift, "Q");
        assert_eq!(mapping["Backspace"].normal, "{bksp}");
    }

    /// Test 2: layout identity is the second default row
    #[test]
    fn test_layout_identity_proxy() {
        let layout = default_layout();
        assert_eq!(layout_identity(&layout), "{tab} q w e r t y u i o p [ ] \\");

        let short = LayoutDefinition {
            default: vec!["1 2 3".to_string()],
            shift: Vec::new(),
        };
        assert_eq!(
            layout_identity(&short),
            "",
            "Single-row layouts fall back to an empty identity"
        );
    }
}

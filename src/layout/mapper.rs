// SPDX-License-Identifier: GPL-3.0-only

//! Layout coordinate mapping: padding and event-code resolution.
//!
//! This module turns a declarative two-case layout into a lookup table keyed
//! by canonical physical-key identifiers (`KeyboardEvent.code` names). The
//! pipeline is:
//!
//! 1. **Pad**: split every row on whitespace and reshape each case to the
//!    fixed five-row standard alphanumeric geometry, filling missing cells
//!    with a sentinel.
//! 2. **Map**: walk a fixed row/column → event-code table (standard QWERTY
//!    geometry) and record the `{normal, shift}` output pair for each
//!    position, translating the sentinel to an empty string.
//!
//! The geometry and the identifier table are constants, never derived from
//! the input. A case that is entirely absent yields empty outputs for every
//! position, not an error.

use crate::layout::types::{CodeMapping, KeyOutput, LayoutDefinition, PaddedLayout, PaddedRows};

/// Number of keys per row in the standard alphanumeric block: number row, top
/// letter row, home row, bottom letter row, and the modifier/space row.
pub const QWERTY_ROW_LENGTHS: [usize; 5] = [14, 14, 13, 12, 3];

/// Canonical event-code identifier for each row/column position.
///
/// Row lengths match [`QWERTY_ROW_LENGTHS`] exactly.
pub const QWERTY_EVENT_CODES: [&[&str]; 5] = [
    &[
        "Backquote",
        "Digit1",
        "Digit2",
        "Digit3",
        "Digit4",
        "Digit5",
        "Digit6",
        "Digit7",
        "Digit8",
        "Digit9",
        "Digit0",
        "Minus",
        "Equal",
        "Backspace",
    ],
    &[
        "Tab",
        "KeyQ",
        "KeyW",
        "KeyE",
        "KeyR",
        "KeyT",
        "KeyY",
        "KeyU",
        "KeyI",
        "KeyO",
        "KeyP",
        "BracketLeft",
        "BracketRight",
        "Backslash",
    ],
    &[
        "CapsLock",
        "KeyA",
        "KeyS",
        "KeyD",
        "KeyF",
        "KeyG",
        "KeyH",
        "KeyJ",
        "KeyK",
        "KeyL",
        "Semicolon",
        "Quote",
        "Enter",
    ],
    &[
        "ShiftLeft",
        "KeyZ",
        "KeyX",
        "KeyC",
        "KeyV",
        "KeyB",
        "KeyN",
        "KeyM",
        "Comma",
        "Period",
        "Slash",
        "ShiftRight",
    ],
    &["ControlLeft", "AltLeft", "Space"],
];

/// Reshapes a layout definition to the fixed five-row geometry.
///
/// Every row is tokenized on whitespace, truncated to its canonical length,
/// and right-padded with the sentinel (`None`) until it reaches that length.
/// Rows beyond the fifth and cases with no rows at all are handled the same
/// way: the result always has exactly five rows of canonical lengths per case.
#[must_use]
pub fn pad_layout(layout: &LayoutDefinition) -> PaddedLayout {
    PaddedLayout {
        default: pad_case(&layout.default),
        shift: pad_case(&layout.shift),
    }
}

fn pad_case(rows: &[String]) -> PaddedRows {
    QWERTY_ROW_LENGTHS
        .iter()
        .enumerate()
        .map(|(row_index, &length)| {
            let mut cells: Vec<Option<String>> = rows
                .get(row_index)
                .map(|row| {
                    row.split_whitespace()
                        .map(|token| Some(token.to_string()))
                        .collect()
                })
                .unwrap_or_default();

            cells.truncate(length);
            while cells.len() < length {
                cells.push(None);
            }
            cells
        })
        .collect()
}

/// Builds the code → `{normal, shift}` output table for a layout.
///
/// Pads the layout first, then resolves every position of the fixed
/// [`QWERTY_EVENT_CODES`] table. Sentinel cells become empty strings, so the
/// table always contains an entry for every canonical position regardless of
/// how sparse the input layout is.
///
/// # Example
///
/// ```rust,ignore
/// use softboard::layout::{build_code_mapping, LayoutDefinition};
///
/// let layout = LayoutDefinition {
///     default: vec!["` 1 2 3".to_string()],
///     shift: vec!["~ ! @ #".to_string()],
/// };
/// let mapping = build_code_mapping(&layout);
/// assert_eq!(mapping["Digit2"].shift, "@");
/// ```
#[must_use]
pub fn build_code_mapping(layout: &LayoutDefinition) -> CodeMapping {
    let padded = pad_layout(layout);
    let mut mapping = CodeMapping::new();

    for (row_index, codes) in QWERTY_EVENT_CODES.iter().enumerate() {
        for (col_index, &code) in codes.iter().enumerate() {
            mapping.insert(
                code,
                KeyOutput {
                    normal: cell_output(&padded.default, row_index, col_index),
                    shift: cell_output(&padded.shift, row_index, col_index),
                },
            );
        }
    }

    mapping
}

/// Reads one padded cell, translating the sentinel to an empty string.
fn cell_output(rows: &PaddedRows, row: usize, col: usize) -> String {
    rows.get(row)
        .and_then(|cells| cells.get(col))
        .and_then(|cell| cell.clone())
        .unwrap_or_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_with_default_rows(rows: &[&str]) -> LayoutDefinition {
        LayoutDefinition {
            default: rows.iter().map(|r| r.to_string()).collect(),
            shift: Vec::new(),
        }
    }

    /// Test 1: geometry constants are mutually consistent
    #[test]
    fn test_geometry_constants_consistent() {
        for (row_index, codes) in QWERTY_EVENT_CODES.iter().enumerate() {
            assert_eq!(
                codes.len(),
                QWERTY_ROW_LENGTHS[row_index],
                "Event-code row {} must match its canonical length",
                row_index
            );
        }
    }

    /// Test 2: padded rows always have canonical lengths, for input rows of
    /// 0 to 20 tokens
    #[test]
    fn test_padding_lengths_invariant() {
        for token_count in 0..=20usize {
            let row = vec!["x"; token_count].join(" ");
            let layout = layout_with_default_rows(&[&row, &row, &row, &row, &row]);
            let padded = pad_layout(&layout);

            for (row_index, cells) in padded.default.iter().enumerate() {
                assert_eq!(
                    cells.len(),
                    QWERTY_ROW_LENGTHS[row_index],
                    "Row {} with {} input tokens must pad/truncate to canonical length",
                    row_index,
                    token_count
                );
            }
        }
    }

    /// Test 3: missing rows pad to all-sentinel rows
    #[test]
    fn test_missing_rows_become_sentinels() {
        let layout = layout_with_default_rows(&["a b c"]);
        let padded = pad_layout(&layout);

        assert_eq!(padded.default[0][0], Some("a".to_string()));
        assert_eq!(padded.default[0][3], None, "Short row pads with sentinel");
        assert!(
            padded.default[4].iter().all(Option::is_none),
            "Absent rows are entirely sentinel"
        );
    }

    /// Test 4: omitted shift case yields empty shift output for every code
    #[test]
    fn test_omitted_shift_case_maps_to_empty() {
        let layout = layout_with_default_rows(&["` 1 2 3 4 5 6 7 8 9 0 - = {bksp}"]);
        let mapping = build_code_mapping(&layout);

        for codes in QWERTY_EVENT_CODES {
            for code in codes {
                assert_eq!(
                    mapping[code].shift, "",
                    "Shift output for {} must be empty when the case is omitted",
                    code
                );
            }
        }
        assert_eq!(mapping["Digit1"].normal, "1");
    }

    /// Test 5: shifted digit row resolves through the fixed geometry
    #[test]
    fn test_shift_row_position_mapping() {
        let layout = LayoutDefinition {
            default: vec!["` 1 2 3".to_string()],
            shift: vec!["~ ! @ #".to_string()],
        };
        let mapping = build_code_mapping(&layout);

        assert_eq!(mapping["Digit2"].normal, "2");
        assert_eq!(mapping["Digit2"].shift, "@");
        assert_eq!(mapping["Backquote"].shift, "~");
        assert_eq!(
            mapping["Digit4"].normal, "",
            "Positions past the short row resolve to empty output"
        );
    }

    /// Test 6: sentinel never leaks into the mapping
    #[test]
    fn test_sentinel_never_leaks() {
        let layout = layout_with_default_rows(&["a"]);
        let mapping = build_code_mapping(&layout);

        for output in mapping.values() {
            assert!(!output.normal.contains("None"));
            assert!(!output.shift.contains("None"));
        }
        assert_eq!(mapping["Backquote"].normal, "a");
        assert_eq!(mapping["Digit1"].normal, "");
    }

    /// Test 7: modifier/space row maps its three positions
    #[test]
    fn test_modifier_row_mapping() {
        let layout = layout_with_default_rows(&["", "", "", "", "{ctrl} {alt} {space}"]);
        let mapping = build_code_mapping(&layout);

        assert_eq!(mapping["ControlLeft"].normal, "{ctrl}");
        assert_eq!(mapping["AltLeft"].normal, "{alt}");
        assert_eq!(mapping["Space"].normal, "{space}");
    }
}

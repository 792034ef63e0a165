// SPDX-License-Identifier: GPL-3.0-only

//! Loading layout definitions from JSON.
//!
//! The loader is deliberately permissive: the only hard failures are I/O and
//! malformed JSON. Shape problems that the padding step can absorb (short
//! rows, missing cases) are not even warnings; things the layout author
//! almost certainly did not intend (rows longer than the canonical geometry,
//! more than five rows, unknown case names) are reported as warnings, and a
//! layout with no rows in either case is reported at error severity while
//! still loading.

use crate::layout::mapper::QWERTY_ROW_LENGTHS;
use crate::layout::types::{LayoutDefinition, ParseError, ParseResult, Severity, ValidationIssue};
use std::fs;

/// Parses a layout definition from a JSON file.
///
/// Distinguishes I/O errors (file not found, permission denied) from JSON
/// parsing errors and attaches the file path to both.
///
/// # Arguments
///
/// * `path` - Path to the JSON layout file
///
/// # Returns
///
/// A [`ParseResult`] with the layout and any warnings, or a [`ParseError`].
pub fn parse_layout_file(path: &str) -> Result<ParseResult<LayoutDefinition>, ParseError> {
    let json_str =
        fs::read_to_string(path).map_err(|e| ParseError::io_error_with_path(e, path))?;

    parse_layout_from_string(&json_str)
        .map_err(|e| match e {
            ParseError::JsonError {
                source,
                file_path: None,
                line_number,
            } => ParseError::JsonError {
                source,
                file_path: Some(path.to_string()),
                line_number,
            },
            other => other,
        })
}

/// Parses a layout definition from a JSON string.
///
/// # Example
///
/// ```rust,ignore
/// use softboard::layout::parse_layout_from_string;
///
/// let json = r#"{ "default": ["q w e r t y"], "shift": ["Q W E R T Y"] }"#;
/// let result = parse_layout_from_string(json).expect("valid layout JSON");
/// assert!(!result.has_warnings());
/// ```
pub fn parse_layout_from_string(
    json: &str,
) -> Result<ParseResult<LayoutDefinition>, ParseError> {
    // Parse to a generic value first so unknown case names can be reported
    // as warnings instead of being silently dropped.
    let value: serde_json::Value = serde_json::from_str(json).map_err(ParseError::json_error)?;

    let mut warnings = Vec::new();
    if let Some(object) = value.as_object() {
        for key in object.keys() {
            if key != "default" && key != "shift" {
                warnings.push(ValidationIssue::warning(
                    format!("unknown layout case '{}' is ignored", key),
                    key.clone(),
                ));
            }
        }
    }

    let layout: LayoutDefinition =
        serde_json::from_value(value).map_err(ParseError::json_error)?;

    validate_case(&layout.default, "default", &mut warnings);
    validate_case(&layout.shift, "shift", &mut warnings);

    if layout.default.is_empty() && layout.shift.is_empty() {
        warnings.push(ValidationIssue::error(
            "layout defines no rows in either case, every key maps to empty output",
            "layout",
        ));
    }

    for issue in &warnings {
        match issue.severity {
            Severity::Error => tracing::error!(%issue, "layout validation issue"),
            Severity::Warning => tracing::warn!(%issue, "layout validation issue"),
        }
    }

    Ok(ParseResult::with_warnings(layout, warnings))
}

/// Collects warnings for rows the canonical geometry cannot represent.
fn validate_case(rows: &[String], case_name: &str, warnings: &mut Vec<ValidationIssue>) {
    if rows.len() > QWERTY_ROW_LENGTHS.len() {
        warnings.push(ValidationIssue::warning(
            format!(
                "case has {} rows, only the first {} are mapped",
                rows.len(),
                QWERTY_ROW_LENGTHS.len()
            ),
            case_name.to_string(),
        ));
    }

    for (row_index, row) in rows.iter().take(QWERTY_ROW_LENGTHS.len()).enumerate() {
        let token_count = row.split_whitespace().count();
        let canonical = QWERTY_ROW_LENGTHS[row_index];
        if token_count > canonical {
            warnings.push(ValidationIssue::warning(
                format!(
                    "row has {} tokens, only the first {} are mapped",
                    token_count, canonical
                ),
                format!("{}[{}]", case_name, row_index),
            ));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

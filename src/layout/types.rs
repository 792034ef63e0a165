// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layout definitions and code mappings.
//!
//! A layout is a declarative two-case description (unshifted/shifted) of what
//! each physical key position outputs. This module defines the raw definition
//! type as supplied by the host, the padded fixed-shape form used by the
//! mapper, and the error/result types for the JSON loading path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Layout Data Structures
// ============================================================================

/// A declarative two-case keyboard layout as supplied by the host.
///
/// Each case is an ordered sequence of row strings; every row is a
/// space-delimited list of output tokens (e.g. `"q w e r t y"`). Rows may be
/// shorter than the canonical key geometry; the mapper pads them. A missing
/// case is legal and means "no output for that case", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Unshifted rows.
    #[serde(default)]
    pub default: Vec<String>,

    /// Shifted rows. May be empty when the layout has no shift case.
    #[serde(default)]
    pub shift: Vec<String>,
}

/// One padded layout case: exactly five rows of canonical lengths.
///
/// `None` is the padding sentinel meaning "no key at this position". The
/// sentinel never escapes the layout module; it is translated to an empty
/// string when the code mapping is built.
pub type PaddedRows = Vec<Vec<Option<String>>>;

/// A [`LayoutDefinition`] reshaped to the fixed standard alphanumeric-row
/// geometry, with every row truncated or right-padded to its canonical length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedLayout {
    /// Padded unshifted rows.
    pub default: PaddedRows,
    /// Padded shifted rows.
    pub shift: PaddedRows,
}

/// The pair of outputs a single physical key position produces.
///
/// Sentinel (absent) cells are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutput {
    /// Output when no shift-like modifier is selected.
    pub normal: String,
    /// Output when shift or capslock is selected.
    pub shift: String,
}

/// Mapping from canonical physical-key identifier (e.g. `"KeyA"`, `"Digit1"`)
/// to the outputs that position produces in each case.
pub type CodeMapping = HashMap<&'static str, KeyOutput>;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for layout validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The layout is unusable as authored (e.g. no rows in either case). The
    /// loader still returns the parsed value; only the loading path produces
    /// these, never the runtime mapping path.
    Error,
    /// Non-fatal issue the layout author should address.
    Warning,
}

/// A validation issue discovered while loading a layout definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning).
    pub severity: Severity,
    /// Human-readable description of the issue.
    pub message: String,
    /// Path to the field that caused the issue (e.g. `"default[2]"`).
    pub field_path: String,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
        }
    }

    /// Convenience constructor for a warning.
    pub fn warning(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message, field_path)
    }

    /// Convenience constructor for an error-severity issue.
    pub fn error(message: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::new(Severity::Error, message, field_path)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };
        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)
    }
}

/// Error type for layout loading operations.
///
/// Wraps the underlying error sources with context fields so callers get
/// helpful messages without re-deriving them. Only the loading path can fail;
/// the runtime padding/mapping path degrades instead of erroring.
#[derive(Debug)]
pub enum ParseError {
    /// I/O error occurred while reading a layout file.
    IoError {
        /// The underlying I/O error.
        source: std::io::Error,
        /// File path that caused the error, when known.
        file_path: Option<String>,
    },

    /// JSON parsing error.
    JsonError {
        /// The underlying JSON parsing error.
        source: serde_json::Error,
        /// File path being parsed, when known.
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json).
        line_number: Option<usize>,
    },
}

impl ParseError {
    /// Creates an I/O error with file path context.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
        }
    }

    /// Creates a JSON parsing error without file context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: None,
            line_number,
        }
    }

    /// Creates a JSON parsing error with file path context.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        let line_number = source.line().into();
        Self::JsonError {
            source,
            file_path: Some(file_path.into()),
            line_number,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::IoError { source, file_path } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading layout file '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
            ParseError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in layout file '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::IoError { source, .. } => Some(source),
            ParseError::JsonError { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            source: err,
            file_path: None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json_error(err)
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully loading a layout with optional warnings.
///
/// The loader is permissive: short rows, missing cases, and oversize rows are
/// all usable layouts. Anything worth telling the layout author about comes
/// back as a warning instead of a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully loaded layout.
    pub layout: T,
    /// Validation issues. Mostly warnings; error severity when the layout is
    /// unusable as authored (it still loads, mapping to empty outputs).
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with no warnings.
    pub fn new(layout: T) -> Self {
        Self {
            layout,
            warnings: Vec::new(),
        }
    }

    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns true if any issue is error severity.
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    /// Consumes the result and returns the layout, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: LayoutDefinition deserializes with a missing shift case
    #[test]
    fn test_layout_definition_missing_shift_case() {
        let json = r#"{ "default": ["1 2 3"] }"#;
        let layout: LayoutDefinition = serde_json::from_str(json).expect("should parse");

        assert_eq!(layout.default, vec!["1 2 3".to_string()]);
        assert!(
            layout.shift.is_empty(),
            "Absent shift case should deserialize to an empty row list"
        );
    }

    /// Test 2: JSON error carries the line number
    #[test]
    fn test_json_error_includes_line_number() {
        let invalid_json = "{\n  \"default\":\n}";
        let result: Result<serde_json::Value, _> = serde_json::from_str(invalid_json);
        let err = ParseError::json_error_with_path(result.unwrap_err(), "broken.json");

        let display_str = format!("{}", err);
        assert!(
            display_str.contains("line"),
            "Error message should include the line number"
        );
        assert!(
            display_str.contains("broken.json"),
            "Error message should include the file path"
        );
    }

    /// Test 3: I/O error display includes context
    #[test]
    fn test_io_error_with_context() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ParseError::io_error_with_path(io_err, "/path/to/layout.json");

        let display_str = format!("{}", err);
        assert!(display_str.contains("I/O error"));
        assert!(display_str.contains("/path/to/layout.json"));
        assert!(display_str.contains("file not found"));
    }

    /// Test 4: ValidationIssue display format
    #[test]
    fn test_validation_issue_display() {
        let issue = ValidationIssue::warning("row has 16 tokens, expected at most 14", "shift[0]");

        let display_str = format!("{}", issue);
        assert!(display_str.contains("WARNING"));
        assert!(display_str.contains("shift[0]"));
        assert!(display_str.contains("16 tokens"));
    }

    /// Test 5: ParseResult warning bookkeeping
    #[test]
    fn test_parse_result_warnings() {
        let clean = ParseResult::new(LayoutDefinition::default());
        assert!(!clean.has_warnings());

        let noisy = ParseResult::with_warnings(
            LayoutDefinition::default(),
            vec![ValidationIssue::warning("extra rows ignored", "default")],
        );
        assert!(noisy.has_warnings());
        assert_eq!(noisy.warnings.len(), 1);

        let layout = noisy.into_layout();
        assert!(layout.default.is_empty());
    }
}

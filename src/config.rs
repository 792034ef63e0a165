// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard options snapshot consumed from the host widget.
//!
//! The host owns the live configuration; this core only ever sees a read-only
//! snapshot per event via [`crate::host::KeyboardHost::options`]. Every field
//! has a serde default so hosts can persist or ship partial configurations.

use crate::layout::LayoutDefinition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which surface currently owns physical keyboard input.
///
/// When an alternate navigation mode is engaged and the active surface is the
/// keyboard itself, physical key events are suppressed instead of dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveSurface {
    /// The host document (text input, page content) owns input.
    #[default]
    Document,
    /// The on-screen keyboard itself owns input.
    Keyboard,
}

/// How press-through activation replays a physical key press on the matched
/// virtual button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressStrategy {
    /// Invoke the host's button-activation handler directly with the
    /// resolved button name.
    #[default]
    ButtonHandler,
    /// Replay the event as a pointer-down (and pointer-up on key release).
    PointerEvents,
    /// Replay the event as a synthetic click.
    Click,
}

/// Visual style applied to virtual buttons while their physical key is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    /// CSS background value.
    pub background: String,
    /// CSS text color value.
    pub text_color: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            background: "#dadce4".to_string(),
            text_color: "black".to_string(),
        }
    }
}

/// Read-only configuration snapshot for one input event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardOptions {
    /// Active layout. When `None`, the built-in default layout applies.
    pub layout: Option<LayoutDefinition>,

    /// Which surface currently owns physical input.
    pub active_surface: ActiveSurface,

    /// Whether physical key presses highlight the matching virtual buttons.
    /// Consulted by the host when wiring real keyboard events to the
    /// translator.
    pub physical_keyboard_highlight: bool,

    /// Whether a physical key press also activates the matched button
    /// (press-through), not just highlights it.
    pub physical_keyboard_highlight_press: bool,

    /// How press-through activation is delivered.
    pub press_strategy: PressStrategy,

    /// Highlight styling for held keys.
    pub highlight_style: HighlightStyle,

    /// Candidate overlay page size. `None` or zero means the default.
    pub layout_candidates_page_size: Option<usize>,

    /// Display overrides: raw button/candidate token → display label.
    pub display: HashMap<String, String>,

    /// Whether the host delivers touch events instead of mouse events.
    /// Consulted by the host when synthesizing selection events.
    pub use_touch_events: bool,
}

impl KeyboardOptions {
    /// Candidate page size used when the host configures none.
    pub const DEFAULT_CANDIDATES_PAGE_SIZE: usize = 5;

    /// Effective candidate overlay page size.
    #[must_use]
    pub fn candidates_page_size(&self) -> usize {
        match self.layout_candidates_page_size {
            Some(size) if size > 0 => size,
            _ => Self::DEFAULT_CANDIDATES_PAGE_SIZE,
        }
    }

    /// Display label for a token: the configured override, or the token
    /// itself when no override exists.
    #[must_use]
    pub fn display_label(&self, token: &str) -> String {
        self.display
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

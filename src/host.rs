// SPDX-License-Identifier: GPL-3.0-only

//! Host integration surface.
//!
//! The core never touches the DOM (or any UI toolkit) directly. Everything it
//! needs from the surrounding widget (button lookup, styling, activation
//! replay, rendering, focus, live-region announcements, and the two deferral
//! points) goes through the [`KeyboardHost`] and [`OverlayHost`] traits.
//! Elements are opaque [`ElementId`] handles the host maps back to its own
//! objects.
//!
//! # Deferral points
//!
//! Two operations are deliberately asynchronous but cancellation-free:
//!
//! - the translator's highlight idle sweep (next animation frame), requested
//!   via [`KeyboardHost::schedule_idle_sweep`] and delivered back by the host
//!   calling [`crate::input::PhysicalKeyTranslator::idle_sweep`];
//! - the overlay's deferred container removal, requested via
//!   [`OverlayHost::schedule_teardown`] and delivered back through
//!   [`crate::candidate::OverlayManager::finalize_close`].
//!
//! Modeling both as explicit host-driven callbacks keeps them deterministic
//! under test; no real timers are raced.

use crate::candidate::PageView;
use crate::config::{HighlightStyle, KeyboardOptions};

/// A raw physical key event as delivered by the host.
///
/// `code` is the position-based identifier (`"KeyA"`, `"Digit1"`), `key` the
/// produced value (`"a"`, `"Enter"`). Both are carried verbatim; the
/// translator normalizes them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    /// Position-based key identifier, possibly non-canonical.
    pub code: String,
    /// Key value, used for the fallback path and overlay navigation.
    pub key: String,
    /// Whether a shift modifier was held for this event.
    pub shift_key: bool,
}

impl KeyEvent {
    /// Creates a key event without shift held.
    #[must_use]
    pub fn new(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            key: key.into(),
            shift_key: false,
        }
    }

    /// Marks the event as having shift held.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }
}

/// Opaque handle to a host-owned element.
///
/// The host allocates these and maps them back to real elements; the core
/// only stores, compares, and hands them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wraps a raw host-assigned id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host-assigned id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Result of a virtual-button lookup: zero, one, or many matched elements.
///
/// Hosts may render the same logical button several times (e.g. two Shift
/// keys); highlight applies to all matches while press-through activation
/// targets exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ButtonMatch {
    /// No virtual button carries the requested name.
    #[default]
    None,
    /// Exactly one element matched.
    One(ElementId),
    /// Several elements share the name.
    Many(Vec<ElementId>),
}

impl ButtonMatch {
    /// Builds a match from however many ids the host found.
    #[must_use]
    pub fn from_ids(mut ids: Vec<ElementId>) -> Self {
        match ids.len() {
            0 => ButtonMatch::None,
            1 => ButtonMatch::One(ids.remove(0)),
            _ => ButtonMatch::Many(ids),
        }
    }

    /// Whether the lookup matched nothing.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, ButtonMatch::None)
    }

    /// All matched ids, in host order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        match self {
            ButtonMatch::None => &[],
            ButtonMatch::One(id) => std::slice::from_ref(id),
            ButtonMatch::Many(ids) => ids,
        }
    }

    /// The single activation target: the first matched element.
    #[must_use]
    pub fn first(&self) -> Option<ElementId> {
        self.ids().first().copied()
    }
}

/// What the host should do with the original input event after the core
/// has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Let the event continue through normal host handling.
    Propagate,
    /// Prevent default handling and stop propagation.
    Suppress,
}

impl EventDisposition {
    /// Whether the host must suppress the event.
    #[must_use]
    pub fn is_suppressed(self) -> bool {
        matches!(self, EventDisposition::Suppress)
    }
}

/// Host services required by the physical key translator.
///
/// Every method must tolerate stale element ids: a key-up or idle sweep may
/// reference an element the host has already removed or restyled, and the
/// host should treat that as a no-op rather than an error.
pub trait KeyboardHost {
    /// Read-only snapshot of the current configuration.
    fn options(&self) -> KeyboardOptions;

    /// Whether an alternate navigation mode currently owns physical input.
    fn nav_engaged(&self) -> bool;

    /// Looks up the virtual button element(s) registered under `name`.
    fn button_elements(&self, name: &str) -> ButtonMatch;

    /// Applies highlight styling to a matched element.
    fn highlight(&mut self, element: ElementId, style: &HighlightStyle);

    /// Removes highlight styling from an element.
    fn clear_highlight(&mut self, element: ElementId);

    /// Replays the event as a pointer-down on the element.
    fn pointer_down(&mut self, element: ElementId, event: &KeyEvent);

    /// Replays the event as a pointer-up on the element.
    fn pointer_up(&mut self, element: ElementId, event: &KeyEvent);

    /// Replays the event as a synthetic click on the element.
    fn click(&mut self, element: ElementId);

    /// Invokes the host's button-activation handler directly.
    fn button_activated(&mut self, name: &str, event: &KeyEvent);

    /// Asks the host to call
    /// [`crate::input::PhysicalKeyTranslator::idle_sweep`] on the next
    /// animation frame. Fire-and-forget; never awaited.
    fn schedule_idle_sweep(&mut self);
}

/// Host services required by the candidate selection overlay.
///
/// Rendering is full-replacement: each [`OverlayHost::render_page`] call
/// rebuilds the visible structure for one page. The host owns the actual
/// elements, focus, and the live region; the overlay owns all navigation
/// state.
pub trait OverlayHost {
    /// Read-only snapshot of the current configuration.
    fn options(&self) -> KeyboardOptions;

    /// (Re)builds the visible overlay structure for one page, replacing any
    /// previously rendered page.
    fn render_page(&mut self, view: &PageView);

    /// Marks one rendered entry as selected/active (`aria-selected`).
    fn set_entry_active(&mut self, index: usize, active: bool);

    /// Scrolls the entry into view within the overlay list.
    fn scroll_entry_into_view(&mut self, index: usize);

    /// Which rendered entry currently has focus, if any. Used by the
    /// focus trap.
    fn focused_entry(&self) -> Option<usize>;

    /// Moves focus to the given rendered entry.
    fn focus_entry(&mut self, index: usize);

    /// Publishes a message to the live-region sink. Hosts without a live
    /// region skip announcements by leaving this default no-op in place.
    fn announce(&mut self, _message: &str) {}

    /// Attaches the document-level navigation listeners. Called at most once
    /// per overlay session.
    fn attach_nav_listeners(&mut self);

    /// Detaches the document-level navigation listeners.
    fn detach_nav_listeners(&mut self);

    /// Asks the host to call
    /// [`crate::candidate::OverlayManager::finalize_close`] after `delay_ms`
    /// milliseconds, leaving the rendered container in place for its exit
    /// animation until then.
    fn schedule_teardown(&mut self, delay_ms: u64);

    /// Removes the rendered overlay container. Must tolerate the container
    /// already being gone.
    fn remove_container(&mut self);
}

// ============================================================================
// Tests
// ============================================================================

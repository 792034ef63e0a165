// SPDX-License-Identifier: GPL-3.0-only

//! Physical key event translation and highlight dispatch.
//!
//! [`PhysicalKeyTranslator`] consumes raw key-down/key-up events from the
//! host, tracks modifier state, resolves each event to the logical button
//! name the active layout assigns to that physical key position, and drives
//! highlight/activation on the matching virtual button(s) through the
//! [`KeyboardHost`] trait.
//!
//! # Failure semantics
//!
//! Physical keyboards emit events the layout cannot always represent
//! (regional keys, media keys), and the host may not render a button for
//! every resolvable name. Every lookup failure therefore degrades to a no-op
//! or an empty string; nothing on this path can fail the host page. Unmapped
//! events are logged at debug level for diagnostics only.

use crate::config::{ActiveSurface, KeyboardOptions, PressStrategy};
use crate::host::{ButtonMatch, EventDisposition, KeyEvent, KeyboardHost};
use crate::input::codes::{is_fallback_key, normalize_output, normalize_to_standard_code};
use crate::input::modifier::ModifierState;
use crate::layout::{CodeMapping, build_code_mapping, default_layout, layout_identity};
use std::collections::HashSet;

/// Translates physical keyboard events into virtual-button highlight and
/// activation, respecting the active layout and modifier state.
///
/// The code mapping is cached and rebuilt lazily whenever the host's active
/// layout identity changes, so per-event resolution is a hash lookup.
pub struct PhysicalKeyTranslator {
    modifiers: ModifierState,

    /// Elements currently highlighted by a held physical key. Entries are
    /// removed on key-up and force-cleared by the idle sweep.
    active_keys: HashSet<crate::host::ElementId>,

    mapping: CodeMapping,
    mapping_identity: String,
}

impl PhysicalKeyTranslator {
    /// Creates a translator with the mapping built from the host's current
    /// layout (or the built-in default when the host supplies none).
    #[must_use]
    pub fn new(options: &KeyboardOptions) -> Self {
        let layout = options.layout.clone().unwrap_or_else(default_layout);

        Self {
            modifiers: ModifierState::new(),
            active_keys: HashSet::new(),
            mapping: build_code_mapping(&layout),
            mapping_identity: layout_identity(&layout).to_string(),
        }
    }

    /// Current modifier state.
    #[must_use]
    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Number of elements currently highlighted by held physical keys.
    #[must_use]
    pub fn active_key_count(&self) -> usize {
        self.active_keys.len()
    }

    /// Handles a physical key-down event.
    ///
    /// Updates modifier state, then either suppresses the event (navigation
    /// mode owns physical input while the keyboard is the active surface) or
    /// resolves it and highlights/activates the matching virtual button(s).
    pub fn on_key_down<H: KeyboardHost>(
        &mut self,
        event: &KeyEvent,
        host: &mut H,
    ) -> EventDisposition {
        let options = host.options();

        if event.code == "ShiftLeft" || event.code == "ShiftRight" {
            self.modifiers.press_shift();
        }
        if event.code == "CapsLock" {
            self.modifiers.toggle_capslock();
        }

        // Navigation mode takes exclusive ownership of physical input.
        if host.nav_engaged() && options.active_surface == ActiveSurface::Keyboard {
            return EventDisposition::Suppress;
        }

        let name = self.resolve(event, &options);
        if name.is_empty() {
            return EventDisposition::Propagate;
        }

        let (button_name, matched) = lookup_button(host, &name);
        if matched.is_none() {
            return EventDisposition::Propagate;
        }

        for &element in matched.ids() {
            host.highlight(element, &options.highlight_style);
            self.active_keys.insert(element);
        }

        // Several elements can share the name, but only one gets pressed.
        if options.physical_keyboard_highlight_press {
            if let Some(target) = matched.first() {
                match options.press_strategy {
                    PressStrategy::PointerEvents => host.pointer_down(target, event),
                    PressStrategy::Click => host.click(target),
                    PressStrategy::ButtonHandler => host.button_activated(&button_name, event),
                }
            }
        }

        EventDisposition::Propagate
    }

    /// Handles a physical key-up event.
    ///
    /// Clears highlight from the matched element(s) and schedules the idle
    /// sweep that catches elements whose key-up was never delivered (focus
    /// loss mid-press).
    pub fn on_key_up<H: KeyboardHost>(
        &mut self,
        event: &KeyEvent,
        host: &mut H,
    ) -> EventDisposition {
        let options = host.options();

        if event.code == "ShiftLeft" || event.code == "ShiftRight" {
            self.modifiers.release_shift();
        }

        let name = self.resolve(event, &options);
        if !name.is_empty() {
            let (_, matched) = lookup_button(host, &name);

            for &element in matched.ids() {
                host.clear_highlight(element);
                self.active_keys.remove(&element);
            }

            if options.press_strategy == PressStrategy::PointerEvents {
                if let Some(target) = matched.first() {
                    host.pointer_up(target, event);
                }
            }
        }

        host.schedule_idle_sweep();
        EventDisposition::Propagate
    }

    /// Force-clears any elements still highlighted.
    ///
    /// Called by the host on the animation frame after a key-up. The host's
    /// `clear_highlight` must tolerate elements that were already removed.
    pub fn idle_sweep<H: KeyboardHost>(&mut self, host: &mut H) {
        if self.active_keys.is_empty() {
            return;
        }

        tracing::debug!(
            stale = self.active_keys.len(),
            "idle sweep clearing leftover key highlights"
        );
        for element in self.active_keys.drain() {
            host.clear_highlight(element);
        }
    }

    /// Resolves a key event to the logical button name the active layout
    /// assigns to it, or an empty string when unmapped.
    ///
    /// Idempotent for a fixed modifier state and unchanged layout. Rebuilds
    /// the cached mapping first when the layout identity changed.
    pub fn resolve(&mut self, event: &KeyEvent, options: &KeyboardOptions) -> String {
        self.refresh_mapping(options);

        if let Some(code) = normalize_to_standard_code(&event.code) {
            if let Some(output) = self.mapping.get(code) {
                let raw = if self.modifiers.uppercase_selected() {
                    &output.shift
                } else {
                    &output.normal
                };
                return normalize_output(raw);
            }
        }

        // Fallback path for known safe named keys.
        let key = event.key.to_lowercase();
        if is_fallback_key(&key) {
            return normalize_output(&key);
        }

        tracing::debug!(code = %event.code, key = %event.key, "unmapped physical key event");
        String::new()
    }

    /// Rebuilds the cached code mapping when the host's layout changed.
    fn refresh_mapping(&mut self, options: &KeyboardOptions) {
        let layout_owned;
        let layout = match options.layout.as_ref() {
            Some(layout) => layout,
            None => {
                layout_owned = default_layout();
                &layout_owned
            }
        };

        let identity = layout_identity(layout);
        if identity != self.mapping_identity {
            tracing::debug!("active layout changed, rebuilding code mapping");
            self.mapping = build_code_mapping(layout);
            self.mapping_identity = identity.to_string();
        }
    }
}

/// Looks up the virtual button(s) for a resolved name: exact name first,
/// then the same name wrapped as a function-key name.
fn lookup_button<H: KeyboardHost>(host: &H, name: &str) -> (String, ButtonMatch) {
    let standard = host.button_elements(name);
    if !standard.is_none() {
        return (name.to_string(), standard);
    }

    let wrapped = format!("{{{name}}}");
    let function = host.button_elements(&wrapped);
    if !function.is_none() {
        return (wrapped, function);
    }

    (name.to_string(), ButtonMatch::None)
}

// ============================================================================
// Tests
// ============================================================================

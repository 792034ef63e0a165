// SPDX-License-Identifier: GPL-3.0-only

//! Modifier state tracking for physical keyboard input.
//!
//! The translator only cares about the two modifiers that change which layout
//! case a key resolves through: Shift (hold) and CapsLock (toggle). State is
//! mutated exclusively by key-down/key-up of those keys and lives for the
//! translator's lifetime.

/// Tracks shift and capslock state across physical key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    shift_active: bool,
    capslock_active: bool,
}

impl ModifierState {
    /// Creates a state with no modifiers active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a Shift key-down. Idempotent while the key is held
    /// (auto-repeat delivers repeated key-downs).
    pub fn press_shift(&mut self) {
        self.shift_active = true;
    }

    /// Records a Shift key-up.
    pub fn release_shift(&mut self) {
        self.shift_active = false;
    }

    /// Records a CapsLock key-down, toggling the lock.
    pub fn toggle_capslock(&mut self) {
        self.capslock_active = !self.capslock_active;
    }

    /// Whether Shift is currently held.
    #[must_use]
    pub fn shift_active(&self) -> bool {
        self.shift_active
    }

    /// Whether CapsLock is currently latched.
    #[must_use]
    pub fn capslock_active(&self) -> bool {
        self.capslock_active
    }

    /// Whether key resolution should use the shift case of the layout.
    #[must_use]
    pub fn uppercase_selected(&self) -> bool {
        self.shift_active || self.capslock_active
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: shift press is idempotent across auto-repeat
    #[test]
    fn test_shift_press_idempotent() {
        let mut state = ModifierState::new();

        state.press_shift();
        state.press_shift();
        state.press_shift();
        assert!(state.shift_active(), "Repeated key-downs keep shift held");

        state.release_shift();
        assert!(!state.shift_active());
    }

    /// Test 2: capslock toggles on every key-down
    #[test]
    fn test_capslock_toggles() {
        let mut state = ModifierState::new();

        state.toggle_capslock();
        assert!(state.capslock_active());

        state.toggle_capslock();
        assert!(!state.capslock_active());
    }

    /// Test 3: either modifier selects the shift case
    #[test]
    fn test_uppercase_selection() {
        let mut state = ModifierState::new();
        assert!(!state.uppercase_selected());

        state.press_shift();
        assert!(state.uppercase_selected());
        state.release_shift();

        state.toggle_capslock();
        assert!(state.uppercase_selected(), "CapsLock alone selects shift case");

        state.press_shift();
        assert!(state.uppercase_selected(), "Both together still select it");
    }
}

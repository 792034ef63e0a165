// SPDX-License-Identifier: GPL-3.0-only

//! Physical keyboard input handling.
//!
//! This module bridges the host's real keyboard to the virtual keyboard:
//! key events are normalized to the canonical physical-key identifier set,
//! resolved against the active layout (respecting shift/capslock state), and
//! dispatched as highlight/activation on the matching virtual buttons.
//!
//! # Submodules
//!
//! - `codes`: canonical code set, code/output normalization, fallback keys
//! - `modifier`: shift/capslock state tracking
//! - `translator`: the key-down/key-up event translator
//!
//! # Example
//!
//! ```rust,ignore
//! use softboard::host::KeyEvent;
//! use softboard::input::PhysicalKeyTranslator;
//!
//! let options = host.options();
//! let mut translator = PhysicalKeyTranslator::new(&options);
//!
//! // Wire these to the host's real keyboard events:
//! translator.on_key_down(&KeyEvent::new("KeyA", "a"), &mut host);
//! translator.on_key_up(&KeyEvent::new("KeyA", "a"), &mut host);
//! ```

pub mod codes;
pub mod modifier;
pub mod translator;

pub use codes::{
    FALLBACK_KEYS, STANDARD_CODES, is_fallback_key, normalize_output, normalize_to_standard_code,
};
pub use modifier::ModifierState;
pub use translator::PhysicalKeyTranslator;

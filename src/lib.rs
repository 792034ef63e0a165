// SPDX-License-Identifier: GPL-3.0-only

//! Softboard - physical-keyboard bridging and candidate selection for
//! host-embedded on-screen keyboards
//!
//! This crate is the UI-free core of an on-screen keyboard widget. The host
//! (a DOM widget, a toolkit view, a compositor surface) renders the buttons
//! and delivers raw input; this core decides what those inputs mean.
//!
//! # Architecture
//!
//! Two independent engines share the host abstraction:
//!
//! 1. **Physical key translation** (`input`): raw key-down/key-up events are
//!    normalized, resolved through the active layout's coordinate mapping,
//!    and dispatched as highlight/activation on the matching virtual
//!    buttons.
//!
//! 2. **Candidate selection overlay** (`candidate`): a paginated, fully
//!    keyboard-navigable chooser for alternate characters, with live-region
//!    announcements and a focus trap.
//!
//! The core never owns elements or timers. Everything observable goes
//! through the [`host::KeyboardHost`] and [`host::OverlayHost`] traits, and
//! both deferred operations (the highlight idle sweep, the delayed overlay
//! teardown) are host-scheduled callbacks.
//!
//! # Modules
//!
//! - `candidate`: candidate pagination and the overlay session manager
//! - `config`: the read-only options snapshot the host supplies per event
//! - `host`: events, element handles, and the host integration traits
//! - `input`: code normalization, modifier tracking, and the key translator
//! - `layout`: layout definitions, JSON loading, and code mapping

pub mod candidate;
pub mod config;
pub mod host;
pub mod input;
pub mod layout;

pub use crate::candidate::{OverlayManager, ShowParams};
pub use crate::config::KeyboardOptions;
pub use crate::host::{ElementId, EventDisposition, KeyEvent, KeyboardHost, OverlayHost};
pub use crate::input::PhysicalKeyTranslator;
pub use crate::layout::LayoutDefinition;

// ============================================================================
// Integration Tests
// ============================================================================

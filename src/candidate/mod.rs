// SPDX-License-Identifier: GPL-3.0-only

//! Accessible candidate selection overlay.
//!
//! When a virtual button offers alternate characters (IME candidates, accent
//! variants), the host opens an overlay anchored to that button. This module
//! owns everything except the actual rendering: pagination, the roving
//! active-entry selection, keyboard navigation with a focus trap, live-region
//! announcements, and the single-instance open/close lifecycle.
//!
//! # Submodules
//!
//! - `page`: candidate chunking and the [`PageView`] the host renders from
//! - `overlay`: the [`OverlayManager`] session owner

pub mod overlay;
pub mod page;

pub use overlay::{CLOSE_DELAY_MS, OverlayManager, SelectCallback, ShowParams};
pub use page::{PageEntry, PageView, chunk_candidates};

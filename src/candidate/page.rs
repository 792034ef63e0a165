// SPDX-License-Identifier: GPL-3.0-only

//! Candidate pagination and the rendered-page view model.

use crate::host::ElementId;

/// One selectable entry of a rendered candidate page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// The raw candidate token reported back through `on_select`.
    pub token: String,
    /// The display label: the host's display override when one exists,
    /// otherwise the raw token.
    pub label: String,
}

/// Everything the host needs to render one candidate page.
///
/// Each view fully replaces the previous one; there is no incremental
/// patching. `active_index` is always 0 in a freshly built view because
/// re-rendering resets the roving selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Zero-based index of this page.
    pub page_index: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Index of the entry marked selected/active.
    pub active_index: usize,
    /// Host element the overlay is anchored to.
    pub anchor: ElementId,
    /// Entries on this page, in order.
    pub entries: Vec<PageEntry>,
    /// Whether a previous page exists (prev affordance enabled).
    pub has_prev: bool,
    /// Whether a next page exists (next affordance enabled).
    pub has_next: bool,
}

/// Splits a candidate string on whitespace and chunks the tokens into pages.
///
/// Returns no pages for an empty or all-whitespace input. A page size of
/// zero is treated as one to keep the chunking total.
#[must_use]
pub fn chunk_candidates(candidates: &str, page_size: usize) -> Vec<Vec<String>> {
    let tokens: Vec<String> = candidates
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if tokens.is_empty() {
        return Vec::new();
    }

    tokens
        .chunks(page_size.max(1))
        .map(<[String]>::to_vec)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

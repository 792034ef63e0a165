// SPDX-License-Identifier: GPL-3.0-only

//! The accessible candidate selection overlay.
//!
//! [`OverlayManager`] owns at most one overlay session application-wide:
//! `show` requests ownership and force-closes any session still holding it,
//! so two sessions can never react to the same key event. The manager owns
//! all navigation state (page index, roving active index, focus trap); the
//! host renders pages and moves focus on request.
//!
//! # Lifecycle
//!
//! ```text
//! CLOSED --show--> OPEN(page 0) --prev/next--> OPEN(page k)
//!   OPEN --select | Escape | destroy--> CLOSING --teardown timer--> CLOSED
//! ```
//!
//! Closing is two-phase: `request_close` detaches listeners and schedules
//! teardown after [`CLOSE_DELAY_MS`] (leaving the container for its exit
//! animation), and the host's timer callback drives `finalize_close`, which
//! removes the container. Rapid consecutive closes collapse into one
//! teardown; a session superseded by a new `show` is torn down immediately
//! with no exit animation.

use crate::candidate::page::{PageEntry, PageView, chunk_candidates};
use crate::host::{ElementId, EventDisposition, KeyEvent, OverlayHost};

/// Delay between requesting close and removing the rendered container,
/// giving the host's exit animation time to run.
pub const CLOSE_DELAY_MS: u64 = 150;

/// Callback invoked exactly once with the chosen candidate token and the
/// event that selected it.
pub type SelectCallback = Box<dyn FnMut(&str, &KeyEvent)>;

/// Parameters for opening the overlay.
pub struct ShowParams {
    /// Whitespace-delimited candidate tokens. Empty means "do not open".
    pub candidates: String,
    /// Host element the overlay anchors to.
    pub anchor: ElementId,
    /// Selection callback.
    pub on_select: SelectCallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Open,
    Closing,
}

struct OverlaySession {
    pages: Vec<Vec<String>>,
    page_index: usize,
    active_index: usize,
    anchor: ElementId,
    listeners_attached: bool,
    state: SessionState,
    /// Taken on selection so the callback fires at most once.
    on_select: Option<SelectCallback>,
}

impl OverlaySession {
    fn current_page(&self) -> &[String] {
        self.pages
            .get(self.page_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn option_count(&self) -> usize {
        self.current_page().len()
    }
}

/// Owner of the single active candidate overlay session.
#[derive(Default)]
pub struct OverlayManager {
    session: Option<OverlaySession>,
}

impl OverlayManager {
    /// Creates a manager with no open overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an overlay session exists (open or still closing). Becomes
    /// false once the deferred teardown completes.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Current page index, when a session exists.
    #[must_use]
    pub fn page_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.page_index)
    }

    /// Current roving active index, when a session exists.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.active_index)
    }

    /// Opens the overlay for a candidate string, rendering page 0.
    ///
    /// No-op for an empty candidate string. Any session still holding the
    /// overlay is force-closed first: its listeners are detached and its
    /// container removed immediately, so the new session takes sole
    /// ownership before rendering.
    pub fn show<H: OverlayHost>(&mut self, host: &mut H, params: ShowParams) {
        let pages = chunk_candidates(&params.candidates, host.options().candidates_page_size());
        if pages.is_empty() {
            return;
        }

        if let Some(mut prior) = self.session.take() {
            if prior.listeners_attached {
                host.detach_nav_listeners();
                prior.listeners_attached = false;
            }
            host.remove_container();
            tracing::debug!("superseding open candidate overlay");
        }

        self.session = Some(OverlaySession {
            pages,
            page_index: 0,
            active_index: 0,
            anchor: params.anchor,
            listeners_attached: false,
            state: SessionState::Open,
            on_select: Some(params.on_select),
        });

        self.render_page(host);
    }

    /// Moves to the next page, when one exists.
    pub fn page_next<H: OverlayHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state != SessionState::Open
            || session.page_index + 1 >= session.pages.len()
        {
            return;
        }

        session.page_index += 1;
        self.render_page(host);
    }

    /// Moves to the previous page, when one exists.
    pub fn page_prev<H: OverlayHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state != SessionState::Open || session.page_index == 0 {
            return;
        }

        session.page_index -= 1;
        self.render_page(host);
    }

    /// Handles a document-level key event while the overlay is open.
    ///
    /// Returns [`EventDisposition::Suppress`] for every key the overlay
    /// consumes, including ArrowLeft/ArrowRight which are swallowed so caret
    /// movement never leaks to the host editor.
    pub fn handle_key<H: OverlayHost>(
        &mut self,
        host: &mut H,
        event: &KeyEvent,
    ) -> EventDisposition {
        let Some(session) = self.session.as_ref() else {
            return EventDisposition::Propagate;
        };
        if session.state != SessionState::Open {
            return EventDisposition::Propagate;
        }

        match event.key.as_str() {
            "ArrowDown" => {
                self.step_active(host, true);
                EventDisposition::Suppress
            }
            "ArrowUp" => {
                self.step_active(host, false);
                EventDisposition::Suppress
            }
            "Enter" | " " => {
                self.activate_selected(host, event);
                EventDisposition::Suppress
            }
            "Escape" => {
                self.request_close(host);
                EventDisposition::Suppress
            }
            "Tab" => self.handle_tab(host, event.shift_key),
            "ArrowLeft" | "ArrowRight" => EventDisposition::Suppress,
            _ => EventDisposition::Propagate,
        }
    }

    /// Selects the entry at `index` on the current page (the click/touch
    /// path; keyboard activation routes here too).
    ///
    /// Invokes `on_select` exactly once, then requests close.
    pub fn select_entry<H: OverlayHost>(
        &mut self,
        host: &mut H,
        index: usize,
        event: &KeyEvent,
    ) {
        let selected = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            if session.state != SessionState::Open {
                return;
            }
            let Some(token) = session.current_page().get(index).cloned() else {
                return;
            };
            session.on_select.take().map(|callback| (token, callback))
        };

        if let Some((token, mut callback)) = selected {
            callback(&token, event);
        }
        self.request_close(host);
    }

    /// Closes the overlay without selecting (Escape / explicit destroy).
    pub fn destroy<H: OverlayHost>(&mut self, host: &mut H) {
        self.request_close(host);
    }

    /// First phase of closing: detach listeners, reset navigation state, and
    /// schedule the deferred container removal. Idempotent while closing.
    pub fn request_close<H: OverlayHost>(&mut self, host: &mut H) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.state == SessionState::Closing {
            return;
        }

        session.state = SessionState::Closing;
        if session.listeners_attached {
            host.detach_nav_listeners();
            session.listeners_attached = false;
        }
        session.active_index = 0;
        session.page_index = 0;

        host.schedule_teardown(CLOSE_DELAY_MS);
        tracing::debug!("candidate overlay closing");
    }

    /// Second phase of closing, driven by the host's teardown timer: removes
    /// the container and releases the session.
    ///
    /// Only acts on a session that is actually closing, so a stale timer
    /// from a superseded session never tears down its replacement.
    pub fn finalize_close<H: OverlayHost>(&mut self, host: &mut H) {
        let closing = matches!(
            self.session.as_ref().map(|s| s.state),
            Some(SessionState::Closing)
        );
        if !closing {
            return;
        }

        self.session = None;
        host.remove_container();
    }

    /// Renders the current page: builds the view, hands it to the host,
    /// attaches listeners on the first render of the session, and announces
    /// the initial active entry.
    fn render_page<H: OverlayHost>(&mut self, host: &mut H) {
        let options = host.options();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        // Full reconstruction per page: the roving selection resets.
        session.active_index = 0;

        let entries: Vec<PageEntry> = session
            .current_page()
            .iter()
            .map(|token| PageEntry {
                token: token.clone(),
                label: options.display_label(token),
            })
            .collect();

        let view = PageView {
            page_index: session.page_index,
            page_count: session.pages.len(),
            active_index: 0,
            anchor: session.anchor,
            entries,
            has_prev: session.page_index > 0,
            has_next: session.page_index + 1 < session.pages.len(),
        };

        host.render_page(&view);

        if !session.listeners_attached {
            host.attach_nav_listeners();
            session.listeners_attached = true;
        }

        host.set_entry_active(0, true);
        if let Some(entry) = view.entries.first() {
            host.announce(&format!("1 of {}: {}", view.entries.len(), entry.label));
        }
    }

    /// Moves the roving active index by one with wrap-around and announces
    /// the new position.
    fn step_active<H: OverlayHost>(&mut self, host: &mut H, forward: bool) {
        let options = host.options();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let count = session.option_count();
        if count == 0 {
            return;
        }

        let previous = session.active_index;
        let next = if forward {
            (previous + 1) % count
        } else {
            (previous + count - 1) % count
        };
        session.active_index = next;

        host.set_entry_active(previous, false);
        host.set_entry_active(next, true);
        host.scroll_entry_into_view(next);

        let label = options.display_label(&session.current_page()[next]);
        host.announce(&format!("{} of {}: {}", next + 1, count, label));
    }

    /// Activates the currently active entry (Enter/Space), announcing the
    /// insertion before the selection fires.
    fn activate_selected<H: OverlayHost>(&mut self, host: &mut H, event: &KeyEvent) {
        let announced = {
            let Some(session) = self.session.as_ref() else {
                return;
            };
            session
                .current_page()
                .get(session.active_index)
                .map(|token| (session.active_index, host.options().display_label(token)))
        };

        let Some((index, label)) = announced else {
            return;
        };
        host.announce(&format!("Inserted: {label}"));
        self.select_entry(host, index, event);
    }

    /// Focus-trap handling for Tab/Shift+Tab.
    ///
    /// Wraps focus from the first entry to the last (Shift+Tab) and from the
    /// last to the first (Tab); the wrap also re-syncs the roving active
    /// index so keyboard navigation continues from the focused entry. Any
    /// other Tab press propagates for default focus movement.
    fn handle_tab<H: OverlayHost>(&mut self, host: &mut H, shift: bool) -> EventDisposition {
        let focused = host.focused_entry();
        let Some(session) = self.session.as_mut() else {
            return EventDisposition::Propagate;
        };

        let count = session.option_count();
        if count == 0 {
            return EventDisposition::Propagate;
        }
        let last = count - 1;

        let target = match (shift, focused) {
            (true, Some(0)) => last,
            (false, Some(index)) if index == last => 0,
            _ => return EventDisposition::Propagate,
        };

        let previous = session.active_index;
        session.active_index = target;

        host.set_entry_active(previous, false);
        host.set_entry_active(target, true);
        host.focus_entry(target);
        EventDisposition::Suppress
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyboardOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Recording overlay host for exercising the manager without a UI.
    #[derive(Default)]
    struct RecordingHost {
        options: KeyboardOptions,
        rendered: Vec<PageView>,
        active_marks: Vec<(usize, bool)>,
        scrolled: Vec<usize>,
        announcements: Vec<String>,
        attach_count: usize,
        detach_count: usize,
        teardowns: Vec<u64>,
        removals: usize,
        focused: Option<usize>,
        focus_moves: Vec<usize>,
    }

    impl OverlayHost for RecordingHost {
        fn options(&self) -> KeyboardOptions {
            self.options.clone()
        }

        fn render_page(&mut self, view: &PageView) {
            self.rendered.push(view.clone());
        }

        fn set_entry_active(&mut self, index: usize, active: bool) {
            self.active_marks.push((index, active));
        }

        fn scroll_entry_into_view(&mut self, index: usize) {
            self.scrolled.push(index);
        }

        fn focused_entry(&self) -> Option<usize> {
            self.focused
        }

        fn focus_entry(&mut self, index: usize) {
            self.focused = Some(index);
            self.focus_moves.push(index);
        }

        fn announce(&mut self, message: &str) {
            self.announcements.push(message.to_string());
        }

        fn attach_nav_listeners(&mut self) {
            self.attach_count += 1;
        }

        fn detach_nav_listeners(&mut self) {
            self.detach_count += 1;
        }

        fn schedule_teardown(&mut self, delay_ms: u64) {
            self.teardowns.push(delay_ms);
        }

        fn remove_container(&mut self) {
            self.removals += 1;
        }
    }

    fn show_params(candidates: &str) -> (ShowParams, Rc<RefCell<Vec<String>>>) {
        let selections = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&selections);
        let params = ShowParams {
            candidates: candidates.to_string(),
            anchor: ElementId::new(1),
            on_select: Box::new(move |token, _event| {
                sink.borrow_mut().push(token.to_string());
            }),
        };
        (params, selections)
    }

    /// Test 1: empty candidate string never opens
    #[test]
    fn test_show_empty_is_noop() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("");

        manager.show(&mut host, params);
        assert!(!manager.is_open());
        assert!(host.rendered.is_empty());
    }

    /// Test 2: pagination renders page 0 with prev/next enablement
    #[test]
    fn test_show_paginates() {
        let mut host = RecordingHost::default();
        host.options.layout_candidates_page_size = Some(2);
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("你 尼 好");

        manager.show(&mut host, params);

        assert!(manager.is_open());
        let view = &host.rendered[0];
        assert_eq!(view.page_count, 2);
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[0].token, "你");
        assert!(!view.has_prev);
        assert!(view.has_next);
        assert_eq!(host.attach_count, 1);
        assert_eq!(host.announcements[0], "1 of 2: 你");
    }

    /// Test 3: paging re-renders fully and keeps listeners attached once
    #[test]
    fn test_paging_renders_once_attached() {
        let mut host = RecordingHost::default();
        host.options.layout_candidates_page_size = Some(2);
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("a b c d e");

        manager.show(&mut host, params);
        manager.page_next(&mut host);
        manager.page_next(&mut host);

        assert_eq!(host.rendered.len(), 3);
        assert_eq!(host.rendered[2].page_index, 2);
        assert_eq!(host.rendered[2].entries[0].token, "e");
        assert!(host.rendered[2].has_prev);
        assert!(!host.rendered[2].has_next);
        assert_eq!(
            host.attach_count, 1,
            "Listeners attach once per session regardless of pagination"
        );

        // Next past the last page is a no-op.
        manager.page_next(&mut host);
        assert_eq!(host.rendered.len(), 3);

        manager.page_prev(&mut host);
        assert_eq!(host.rendered[3].page_index, 1);
        assert_eq!(manager.active_index(), Some(0), "Re-render resets the selection");
    }

    /// Test 4: arrow navigation wraps both directions and announces
    #[test]
    fn test_arrow_navigation_wraps() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("a b c");

        manager.show(&mut host, params);

        let up = KeyEvent::new("ArrowUp", "ArrowUp");
        let down = KeyEvent::new("ArrowDown", "ArrowDown");

        assert!(manager.handle_key(&mut host, &up).is_suppressed());
        assert_eq!(manager.active_index(), Some(2), "Retreat from 0 wraps to last");

        assert!(manager.handle_key(&mut host, &down).is_suppressed());
        assert_eq!(manager.active_index(), Some(0), "Advance from last wraps to 0");

        manager.handle_key(&mut host, &down);
        assert_eq!(manager.active_index(), Some(1));
        assert_eq!(host.announcements.last().unwrap(), "2 of 3: b");
        assert_eq!(host.scrolled.last(), Some(&1));
    }

    /// Test 5: Enter selects the active entry exactly once and closes
    #[test]
    fn test_enter_selects_and_closes() {
        let mut host = RecordingHost::default();
        host.options.layout_candidates_page_size = Some(2);
        let mut manager = OverlayManager::new();
        let (params, selections) = show_params("你 尼 好");

        manager.show(&mut host, params);
        manager.page_next(&mut host);

        let enter = KeyEvent::new("Enter", "Enter");
        assert!(manager.handle_key(&mut host, &enter).is_suppressed());

        assert_eq!(selections.borrow().as_slice(), ["好"]);
        assert!(
            host.announcements.contains(&"Inserted: 好".to_string()),
            "Insertion is announced before selection"
        );
        assert_eq!(host.detach_count, 1);
        assert_eq!(host.teardowns, vec![CLOSE_DELAY_MS]);
        assert!(manager.is_open(), "Session lingers until teardown fires");

        manager.finalize_close(&mut host);
        assert!(!manager.is_open());
        assert_eq!(host.removals, 1);

        // Stale timer firing again must not double-remove.
        manager.finalize_close(&mut host);
        assert_eq!(host.removals, 1);
    }

    /// Test 6: Escape closes without selecting
    #[test]
    fn test_escape_closes_without_select() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, selections) = show_params("a b");

        manager.show(&mut host, params);
        let escape = KeyEvent::new("Escape", "Escape");
        assert!(manager.handle_key(&mut host, &escape).is_suppressed());

        assert!(selections.borrow().is_empty());
        assert_eq!(host.teardowns.len(), 1);

        // Keys after close propagate untouched.
        let down = KeyEvent::new("ArrowDown", "ArrowDown");
        assert!(!manager.handle_key(&mut host, &down).is_suppressed());
    }

    /// Test 7: caret keys are swallowed while open
    #[test]
    fn test_caret_keys_swallowed() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("a b");

        manager.show(&mut host, params);
        let left = KeyEvent::new("ArrowLeft", "ArrowLeft");
        let right = KeyEvent::new("ArrowRight", "ArrowRight");

        assert!(manager.handle_key(&mut host, &left).is_suppressed());
        assert!(manager.handle_key(&mut host, &right).is_suppressed());
        assert_eq!(
            manager.active_index(),
            Some(0),
            "Swallowed keys change nothing"
        );
    }

    /// Test 8: focus trap wraps and re-syncs the roving index
    #[test]
    fn test_focus_trap_wraps() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("a b c");

        manager.show(&mut host, params);

        // Shift+Tab on the first entry wraps to the last.
        host.focused = Some(0);
        let back = KeyEvent::new("Tab", "Tab").with_shift();
        assert!(manager.handle_key(&mut host, &back).is_suppressed());
        assert_eq!(host.focus_moves.last(), Some(&2));
        assert_eq!(manager.active_index(), Some(2), "Wrap re-syncs the index");

        // Tab on the last entry wraps to the first.
        let forward = KeyEvent::new("Tab", "Tab");
        assert!(manager.handle_key(&mut host, &forward).is_suppressed());
        assert_eq!(host.focus_moves.last(), Some(&0));
        assert_eq!(manager.active_index(), Some(0));

        // Tab anywhere else propagates.
        host.focused = Some(1);
        assert!(!manager.handle_key(&mut host, &forward).is_suppressed());
    }

    /// Test 9: a new show force-closes the prior session
    #[test]
    fn test_show_supersedes_prior_session() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (first, first_selections) = show_params("a b");
        let (second, _) = show_params("x y z");

        manager.show(&mut host, first);
        manager.show(&mut host, second);

        assert_eq!(host.detach_count, 1, "Prior listeners detach before takeover");
        assert_eq!(host.removals, 1, "Prior container is removed immediately");
        assert_eq!(host.attach_count, 2);
        assert!(manager.is_open());
        assert_eq!(host.rendered.last().unwrap().entries.len(), 3);
        assert!(first_selections.borrow().is_empty());
    }

    /// Test 10: double destroy schedules a single teardown
    #[test]
    fn test_double_destroy_is_idempotent() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("a");

        manager.show(&mut host, params);
        manager.destroy(&mut host);
        manager.destroy(&mut host);

        assert_eq!(host.teardowns.len(), 1);
        assert_eq!(host.detach_count, 1);

        manager.finalize_close(&mut host);
        manager.destroy(&mut host);
        assert_eq!(host.teardowns.len(), 1, "Destroy after close is a no-op");
    }

    /// Test 11: display overrides flow into labels and announcements
    #[test]
    fn test_display_overrides() {
        let mut host = RecordingHost::default();
        host.options
            .display
            .insert("{bksp}".to_string(), "backspace".to_string());
        let mut manager = OverlayManager::new();
        let (params, _) = show_params("{bksp} x");

        manager.show(&mut host, params);

        let view = &host.rendered[0];
        assert_eq!(view.entries[0].token, "{bksp}");
        assert_eq!(view.entries[0].label, "backspace");
        assert_eq!(view.entries[1].label, "x", "No override falls back to token");
        assert_eq!(host.announcements[0], "1 of 2: backspace");
    }

    /// Test 12: selection via click path reports the token and event
    #[test]
    fn test_click_selection() {
        let mut host = RecordingHost::default();
        let mut manager = OverlayManager::new();
        let (params, selections) = show_params("a b c");

        manager.show(&mut host, params);
        let click = KeyEvent::default();
        manager.select_entry(&mut host, 1, &click);

        assert_eq!(selections.borrow().as_slice(), ["b"]);
        assert_eq!(host.teardowns.len(), 1);

        // A second selection attempt is dead: the callback is spent and the
        // session is closing.
        manager.select_entry(&mut host, 2, &click);
        assert_eq!(selections.borrow().len(), 1);
    }
}

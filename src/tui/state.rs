//! Navigation state: pure types, zero effects.
//!
//! These types define the entire interactive state space. The transition
//! function (`update`) and the rendering layer (`view`) both program
//! against them; nothing here touches the terminal or the network.
//!
//! Ownership notes: the result list lives in [`App`] for the whole
//! session, so backing out of a question returns to the same instance
//! with its scroll position intact. A [`QuestionView`] owns its fetched
//! detail exclusively and is dropped on back navigation.

use crate::types::{QuestionDetail, QuestionSummary};

// ============================================================================
// STATUS BANNER
// ============================================================================

/// Logical producers of transient status messages.
///
/// Clearing is key-scoped: a stale clear from one producer never erases
/// a newer message from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKey {
    /// Answer cursor hit a boundary.
    AnswerBounds,
    /// A URL was handed to the browser.
    Browser,
}

/// At most one transient status message, tagged by its producer.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusBanner {
    active: Option<(BannerKey, String)>,
}

impl StatusBanner {
    /// Set the active message, replacing whatever was there.
    pub fn event(&mut self, key: BannerKey, message: impl Into<String>) {
        self.active = Some((key, message.into()));
    }

    /// Clear the message, but only if `key` posted it.
    pub fn clear(&mut self, key: BannerKey) {
        if matches!(self.active, Some((active, _)) if active == key) {
            self.active = None;
        }
    }

    /// Current message, if any.
    pub fn message(&self) -> Option<&str> {
        self.active.as_ref().map(|(_, m)| m.as_str())
    }

    /// Key of the current message, if any.
    pub fn active_key(&self) -> Option<BannerKey> {
        self.active.as_ref().map(|(k, _)| *k)
    }
}

// ============================================================================
// ANSWER CURSOR
// ============================================================================

/// Index over an ordered answer sequence. Clamped, never wraps.
///
/// Pure arithmetic: `next`/`prev` report whether the position actually
/// moved so the caller can decide whether to post a bounds status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCursor {
    position: usize,
    len: usize,
}

impl AnswerCursor {
    /// A cursor over `len` answers, starting at 0. `None` when empty.
    pub fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(AnswerCursor { position: 0, len })
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance toward the last answer. Returns false when already there.
    pub fn next(&mut self) -> bool {
        if self.position + 1 < self.len {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Step back toward the first answer. Returns false when already there.
    pub fn prev(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }
}

// ============================================================================
// VIEWPORT
// ============================================================================

/// Vertical window into a longer sequence of rendered lines.
///
/// Invariant: `0 <= offset <= max(0, total - height)`. The extent is
/// synced from measured render output each frame; `set_extent` re-clamps
/// so a shrinking pane can never strand the offset out of range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    total: usize,
    height: usize,
}

impl Viewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.height)
    }

    /// Record the rendered line count and pane height, clamping the
    /// offset into the new range.
    pub fn set_extent(&mut self, total: usize, height: usize) {
        self.total = total;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scroll one line down. Returns false at the bottom.
    pub fn scroll_down(&mut self) -> bool {
        if self.offset < self.max_offset() {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    /// Scroll one line up. Returns false at the top.
    pub fn scroll_up(&mut self) -> bool {
        if self.offset > 0 {
            self.offset -= 1;
            true
        } else {
            false
        }
    }

    /// Jump back to the top.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

// ============================================================================
// SCREENS
// ============================================================================

/// Selection state over the fetched question summaries.
#[derive(Debug, PartialEq, Eq)]
pub struct ResultList {
    pub summaries: Vec<QuestionSummary>,
    pub viewport: Viewport,
}

impl ResultList {
    pub fn new(summaries: Vec<QuestionSummary>) -> Self {
        ResultList {
            summaries,
            viewport: Viewport::default(),
        }
    }
}

/// An opened question: static header content plus an answer cursor and
/// a scroll viewport over the current answer.
#[derive(Debug, PartialEq, Eq)]
pub struct QuestionView {
    pub detail: QuestionDetail,
    pub url: String,
    pub cursor: AnswerCursor,
    pub viewport: Viewport,
}

impl QuestionView {
    /// Build a view at answer 0. `None` when the detail has no answers;
    /// callers reject that case before ever reaching here.
    pub fn new(detail: QuestionDetail, url: String) -> Option<Self> {
        let cursor = AnswerCursor::new(detail.answers.len())?;
        Some(QuestionView {
            detail,
            url,
            cursor,
            viewport: Viewport::default(),
        })
    }

    /// Text of the answer under the cursor.
    pub fn current_answer(&self) -> &str {
        &self.detail.answers[self.cursor.position()]
    }
}

/// Which screen is shown. Exactly one is live; transition is the only
/// mutation path.
#[derive(Debug, PartialEq, Eq)]
pub enum Screen {
    /// The result list (state lives in [`App::results`]).
    Results,
    /// An opened question.
    Question(QuestionView),
}

// ============================================================================
// APP
// ============================================================================

/// Top-level interactive model: the preserved result list, the current
/// screen, and the status banner the render loop owns on behalf of
/// whichever screen wants to post status.
#[derive(Debug)]
pub struct App {
    pub results: ResultList,
    pub screen: Screen,
    pub banner: StatusBanner,
}

impl App {
    /// Start on the result list.
    pub fn new(summaries: Vec<QuestionSummary>) -> Self {
        App {
            results: ResultList::new(summaries),
            screen: Screen::Results,
            banner: StatusBanner::default(),
        }
    }

    /// Enter a question view. The caller guarantees `detail.answers` is
    /// non-empty; a violation leaves the current screen unchanged.
    pub fn open_question(&mut self, detail: QuestionDetail, url: String) {
        if let Some(view) = QuestionView::new(detail, url) {
            self.screen = Screen::Question(view);
        }
    }

    /// Tear down the question view and return to the preserved list.
    pub fn back_to_results(&mut self) {
        self.screen = Screen::Results;
    }
}

// ============================================================================
// INPUT
// ============================================================================

/// Semantic input, decoupled from raw crossterm events.
///
/// What each action means depends on the current screen: `MoveUp` scrolls
/// the result list but cycles answers in a question view, and `Other`
/// ends the session from the list while a question view ignores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// `n`/`N`: next answer.
    NextAnswer,
    /// `b`/`B`: previous answer.
    PrevAnswer,
    /// `o`/`O`: hand the question URL to the browser.
    OpenBrowser,
    /// Left arrow: back to the result list.
    Back,
    /// A digit key, `0`-`9`.
    Digit(u8),
    /// Mouse wheel up.
    WheelUp,
    /// Mouse wheel down.
    WheelDown,
    /// Ctrl+C: end the session from any screen.
    Interrupt,
    /// Any key with no binding.
    Other,
}

/// What the render loop should do after one dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// State updated in place; re-render and keep going.
    Continue,
    /// Fetch and open the question at this result index.
    OpenQuestion(usize),
    /// Hand this URL to the system browser.
    OpenBrowser(String),
    /// End the session cleanly.
    Exit,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(answers: usize) -> QuestionDetail {
        QuestionDetail {
            title: "title".into(),
            description: "desc".into(),
            stats: "Votes 1 | 1 answers | 1 views".into(),
            answers: (0..answers).map(|i| format!("answer {}", i)).collect(),
        }
    }

    // -- StatusBanner --

    #[test]
    fn banner_event_sets_message() {
        let mut banner = StatusBanner::default();
        banner.event(BannerKey::AnswerBounds, "No more answers.");
        assert_eq!(banner.message(), Some("No more answers."));
        assert_eq!(banner.active_key(), Some(BannerKey::AnswerBounds));
    }

    #[test]
    fn banner_clear_with_matching_key_empties_message() {
        let mut banner = StatusBanner::default();
        banner.event(BannerKey::AnswerBounds, "x");
        banner.clear(BannerKey::AnswerBounds);
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn banner_clear_with_mismatched_key_is_ignored() {
        let mut banner = StatusBanner::default();
        banner.event(BannerKey::AnswerBounds, "x");
        banner.clear(BannerKey::Browser);
        assert_eq!(banner.message(), Some("x"));
    }

    #[test]
    fn banner_later_event_replaces_earlier_one() {
        let mut banner = StatusBanner::default();
        banner.event(BannerKey::AnswerBounds, "bounds");
        banner.event(BannerKey::Browser, "Opening in your browser...");
        // The stale producer's clear must not erase the newer message.
        banner.clear(BannerKey::AnswerBounds);
        assert_eq!(banner.message(), Some("Opening in your browser..."));
    }

    #[test]
    fn banner_clear_on_empty_is_a_noop() {
        let mut banner = StatusBanner::default();
        banner.clear(BannerKey::Browser);
        assert_eq!(banner.message(), None);
    }

    // -- AnswerCursor --

    #[test]
    fn cursor_rejects_empty_sequences() {
        assert_eq!(AnswerCursor::new(0), None);
    }

    #[test]
    fn cursor_prev_at_zero_stays_and_reports_not_moved() {
        let mut cursor = AnswerCursor::new(3).unwrap();
        assert!(!cursor.prev());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn cursor_next_at_last_stays_and_reports_not_moved() {
        let mut cursor = AnswerCursor::new(2).unwrap();
        assert!(cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn cursor_moves_by_exactly_one_between_bounds() {
        let mut cursor = AnswerCursor::new(3).unwrap();
        assert!(cursor.next());
        assert_eq!(cursor.position(), 1);
        assert!(cursor.next());
        assert_eq!(cursor.position(), 2);
        assert!(cursor.prev());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn single_answer_cursor_is_pinned_at_zero() {
        let mut cursor = AnswerCursor::new(1).unwrap();
        assert!(!cursor.next());
        assert!(!cursor.prev());
        assert_eq!(cursor.position(), 0);
    }

    // -- Viewport --

    #[test]
    fn viewport_offset_stays_within_bounds() {
        let mut vp = Viewport::default();
        vp.set_extent(10, 4);
        for _ in 0..20 {
            vp.scroll_down();
        }
        assert_eq!(vp.offset(), 6);
        for _ in 0..20 {
            vp.scroll_up();
        }
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn viewport_scroll_up_undoes_scroll_down() {
        let mut vp = Viewport::default();
        vp.set_extent(10, 4);
        vp.scroll_down();
        vp.scroll_down();
        let before = vp.offset();
        assert!(vp.scroll_down());
        assert!(vp.scroll_up());
        assert_eq!(vp.offset(), before);
    }

    #[test]
    fn viewport_with_short_content_never_scrolls() {
        let mut vp = Viewport::default();
        vp.set_extent(3, 10);
        assert!(!vp.scroll_down());
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn shrinking_extent_reclamps_offset() {
        let mut vp = Viewport::default();
        vp.set_extent(20, 5);
        for _ in 0..15 {
            vp.scroll_down();
        }
        assert_eq!(vp.offset(), 15);
        vp.set_extent(20, 12);
        assert_eq!(vp.offset(), 8);
    }

    // -- QuestionView / App --

    #[test]
    fn question_view_requires_answers() {
        assert!(QuestionView::new(detail(0), "u".into()).is_none());
        assert!(QuestionView::new(detail(1), "u".into()).is_some());
    }

    #[test]
    fn question_view_starts_at_answer_zero() {
        let view = QuestionView::new(detail(3), "u".into()).unwrap();
        assert_eq!(view.cursor.position(), 0);
        assert_eq!(view.current_answer(), "answer 0");
    }

    #[test]
    fn app_starts_on_the_result_list() {
        let app = App::new(vec![]);
        assert_eq!(app.screen, Screen::Results);
        assert_eq!(app.banner.message(), None);
    }

    #[test]
    fn open_question_with_empty_answers_stays_on_results() {
        let mut app = App::new(vec![]);
        app.open_question(detail(0), "u".into());
        assert_eq!(app.screen, Screen::Results);
    }

    #[test]
    fn back_to_results_drops_the_question_view() {
        let mut app = App::new(vec![]);
        app.open_question(detail(2), "u".into());
        assert!(matches!(app.screen, Screen::Question(_)));
        app.back_to_results();
        assert_eq!(app.screen, Screen::Results);
    }
}

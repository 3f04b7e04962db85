//! Pure state transitions: (App, Action) → Dispatch.
//!
//! This is the core of the navigation engine, fully testable without a
//! terminal. Each screen defines what the semantic actions mean; the
//! effects layer only interprets the returned [`Dispatch`].

use super::state::{Action, App, BannerKey, Dispatch, Screen};

/// Bounds status when stepping past the last answer.
pub const MSG_NO_MORE_ANSWERS: &str = "No more answers.";
/// Bounds status when stepping before the first answer.
pub const MSG_NO_PREV_ANSWERS: &str = "No previous answers.";
/// Posted when a question URL is handed to the browser.
pub const MSG_OPENING_BROWSER: &str = "Opening in your browser...";

/// Apply one input action to the current screen.
///
/// Mutates `app` in place and returns what the loop should do next.
/// Back navigation is resolved here: the question view is dropped and
/// the preserved result list becomes current again.
pub fn update(app: &mut App, action: &Action) -> Dispatch {
    match &app.screen {
        Screen::Results => update_results(app, action),
        Screen::Question(_) => {
            if matches!(action, Action::Back) {
                app.back_to_results();
                return Dispatch::Continue;
            }
            update_question(app, action)
        }
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Result list: digits open a question, arrows and the wheel scroll,
/// and any other key ends the session.
///
/// An out-of-range digit also exits: digits 0-9 exactly cover the
/// maximum result count, so there is no in-between case to warn about.
fn update_results(app: &mut App, action: &Action) -> Dispatch {
    match action {
        Action::Digit(d) => {
            let index = *d as usize;
            if index < app.results.summaries.len() {
                Dispatch::OpenQuestion(index)
            } else {
                Dispatch::Exit
            }
        }
        Action::MoveDown | Action::WheelDown => {
            app.results.viewport.scroll_down();
            Dispatch::Continue
        }
        Action::MoveUp | Action::WheelUp => {
            app.results.viewport.scroll_up();
            Dispatch::Continue
        }
        _ => Dispatch::Exit,
    }
}

/// Question view: answer cycling with clamped bounds and keyed status,
/// browser hand-off, wheel scrolling. Unbound input is ignored.
fn update_question(app: &mut App, action: &Action) -> Dispatch {
    let Screen::Question(view) = &mut app.screen else {
        return Dispatch::Continue;
    };
    match action {
        // Up cycles forward, matching the footer hint ("↑: next answer").
        Action::MoveUp | Action::NextAnswer => {
            if view.cursor.next() {
                app.banner.clear(BannerKey::AnswerBounds);
            } else {
                app.banner.event(BannerKey::AnswerBounds, MSG_NO_MORE_ANSWERS);
            }
            view.viewport.reset();
            Dispatch::Continue
        }
        Action::MoveDown | Action::PrevAnswer => {
            if view.cursor.prev() {
                app.banner.clear(BannerKey::AnswerBounds);
            } else {
                app.banner.event(BannerKey::AnswerBounds, MSG_NO_PREV_ANSWERS);
            }
            view.viewport.reset();
            Dispatch::Continue
        }
        Action::OpenBrowser => {
            app.banner.event(BannerKey::Browser, MSG_OPENING_BROWSER);
            Dispatch::OpenBrowser(view.url.clone())
        }
        Action::WheelDown => {
            view.viewport.scroll_down();
            Dispatch::Continue
        }
        Action::WheelUp => {
            view.viewport.scroll_up();
            Dispatch::Continue
        }
        Action::Interrupt => Dispatch::Exit,
        _ => Dispatch::Continue,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QuestionDetail, QuestionSummary};

    fn summaries(n: usize) -> Vec<QuestionSummary> {
        (0..n)
            .map(|i| QuestionSummary {
                index: i,
                title: format!("question {}", i),
                excerpt: format!("excerpt {}", i),
                link: format!("https://stackoverflow.com/q/{}", i),
                question_id: i as u64,
            })
            .collect()
    }

    fn detail(answers: usize) -> QuestionDetail {
        QuestionDetail {
            title: "title".into(),
            description: "desc".into(),
            stats: "Votes 2 | 2 answers | 9 views".into(),
            answers: (0..answers).map(|i| format!("answer {}", i)).collect(),
        }
    }

    fn app_on_question(results: usize, answers: usize) -> App {
        let mut app = App::new(summaries(results));
        app.open_question(detail(answers), "https://stackoverflow.com/q/1".into());
        app
    }

    // -- Result list --

    #[test]
    fn digit_within_bounds_requests_fetch() {
        let mut app = App::new(summaries(3));
        let dispatch = update(&mut app, &Action::Digit(1));
        assert_eq!(dispatch, Dispatch::OpenQuestion(1));
        // Screen transition happens only after a successful fetch.
        assert_eq!(app.screen, Screen::Results);
    }

    #[test]
    fn digit_out_of_range_ends_the_session() {
        let mut app = App::new(summaries(3));
        assert_eq!(update(&mut app, &Action::Digit(9)), Dispatch::Exit);
    }

    #[test]
    fn unrecognized_key_on_results_ends_the_session() {
        let mut app = App::new(summaries(3));
        assert_eq!(update(&mut app, &Action::Other), Dispatch::Exit);
    }

    #[test]
    fn interrupt_on_results_ends_the_session() {
        let mut app = App::new(summaries(3));
        assert_eq!(update(&mut app, &Action::Interrupt), Dispatch::Exit);
    }

    #[test]
    fn arrows_scroll_the_result_list() {
        let mut app = App::new(summaries(3));
        app.results.viewport.set_extent(30, 10);
        assert_eq!(update(&mut app, &Action::MoveDown), Dispatch::Continue);
        assert_eq!(app.results.viewport.offset(), 1);
        assert_eq!(update(&mut app, &Action::MoveUp), Dispatch::Continue);
        assert_eq!(app.results.viewport.offset(), 0);
    }

    #[test]
    fn wheel_scrolls_the_result_list() {
        let mut app = App::new(summaries(3));
        app.results.viewport.set_extent(30, 10);
        update(&mut app, &Action::WheelDown);
        assert_eq!(app.results.viewport.offset(), 1);
        update(&mut app, &Action::WheelUp);
        assert_eq!(app.results.viewport.offset(), 0);
    }

    // -- Question view: answer cycling --

    #[test]
    fn next_answer_moves_and_clears_bounds_status() {
        let mut app = app_on_question(3, 2);
        app.banner.event(BannerKey::AnswerBounds, MSG_NO_PREV_ANSWERS);
        update(&mut app, &Action::NextAnswer);
        let Screen::Question(view) = &app.screen else {
            panic!("expected question view");
        };
        assert_eq!(view.cursor.position(), 1);
        assert_eq!(app.banner.message(), None);
    }

    #[test]
    fn next_at_last_answer_posts_bounds_status() {
        // Scenario: one answer, key up pressed.
        let mut app = app_on_question(3, 1);
        update(&mut app, &Action::MoveUp);
        let Screen::Question(view) = &app.screen else {
            panic!("expected question view");
        };
        assert_eq!(view.cursor.position(), 0);
        assert_eq!(app.banner.active_key(), Some(BannerKey::AnswerBounds));
        assert_eq!(app.banner.message(), Some(MSG_NO_MORE_ANSWERS));
    }

    #[test]
    fn prev_at_first_answer_posts_bounds_status() {
        let mut app = app_on_question(3, 2);
        update(&mut app, &Action::MoveDown);
        assert_eq!(app.banner.message(), Some(MSG_NO_PREV_ANSWERS));
        let Screen::Question(view) = &app.screen else {
            panic!("expected question view");
        };
        assert_eq!(view.cursor.position(), 0);
    }

    #[test]
    fn answer_change_resets_scroll_even_when_clamped() {
        let mut app = app_on_question(3, 1);
        if let Screen::Question(view) = &mut app.screen {
            view.viewport.set_extent(50, 10);
            for _ in 0..5 {
                view.viewport.scroll_down();
            }
        }
        update(&mut app, &Action::NextAnswer);
        let Screen::Question(view) = &app.screen else {
            panic!("expected question view");
        };
        assert_eq!(view.viewport.offset(), 0);
    }

    // -- Question view: browser, back, scrolling --

    #[test]
    fn open_browser_posts_status_and_hands_off_url() {
        let mut app = app_on_question(3, 2);
        let dispatch = update(&mut app, &Action::OpenBrowser);
        assert_eq!(
            dispatch,
            Dispatch::OpenBrowser("https://stackoverflow.com/q/1".into())
        );
        assert_eq!(app.banner.active_key(), Some(BannerKey::Browser));
        assert_eq!(app.banner.message(), Some(MSG_OPENING_BROWSER));
    }

    #[test]
    fn back_returns_to_the_same_result_list() {
        let mut app = App::new(summaries(3));
        app.results.viewport.set_extent(30, 10);
        update(&mut app, &Action::MoveDown);
        let scrolled = app.results.viewport.offset();

        app.open_question(detail(3), "u".into());
        update(&mut app, &Action::NextAnswer);

        let dispatch = update(&mut app, &Action::Back);
        assert_eq!(dispatch, Dispatch::Continue);
        assert_eq!(app.screen, Screen::Results);
        // Prior list state survives the round trip untouched.
        assert_eq!(app.results.viewport.offset(), scrolled);
        assert_eq!(app.results.summaries.len(), 3);
    }

    #[test]
    fn wheel_scrolls_the_answer_body() {
        let mut app = app_on_question(3, 1);
        if let Screen::Question(view) = &mut app.screen {
            view.viewport.set_extent(50, 10);
        }
        update(&mut app, &Action::WheelDown);
        let Screen::Question(view) = &app.screen else {
            panic!("expected question view");
        };
        assert_eq!(view.viewport.offset(), 1);
    }

    #[test]
    fn unbound_keys_on_question_view_are_ignored() {
        let mut app = app_on_question(3, 2);
        assert_eq!(update(&mut app, &Action::Other), Dispatch::Continue);
        assert_eq!(update(&mut app, &Action::Digit(1)), Dispatch::Continue);
        assert!(matches!(app.screen, Screen::Question(_)));
    }

    #[test]
    fn interrupt_on_question_view_ends_the_session() {
        let mut app = app_on_question(3, 2);
        assert_eq!(update(&mut app, &Action::Interrupt), Dispatch::Exit);
    }
}

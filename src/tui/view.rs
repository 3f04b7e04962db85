//! Pure rendering: map navigation state to ratatui widget trees.
//!
//! Line builders are pure (state in, lines out) so wrapping and styling
//! can be tested without a terminal; the only effect is
//! `Frame::render_widget`. Rendering also measures the line count of
//! each scrollable pane and reports it back as [`ViewMetrics`] so the
//! run loop can sync viewport extents — rendering itself never mutates
//! state, which keeps redraw-on-resize idempotent.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::text::wrap_lines;
use crate::types::QuestionSummary;

use super::state::{App, QuestionView, Screen, StatusBanner};
use super::theme;

/// Key hint shown under the result list.
const RESULTS_FOOTER: &str = "0-9: select a question, any other key: exit.";

/// Key hint shown under an opened question.
const QUESTION_FOOTER: &str =
    "\u{2191}: next answer, \u{2193}: previous answer, o: open in browser, \u{2190}: back";

// ============================================================================
// METRICS
// ============================================================================

/// Measured size of one scrollable pane: rendered line count and the
/// height it was rendered into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    pub total: usize,
    pub height: usize,
}

/// Pane measurements from the last frame, fed back into the viewports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewMetrics {
    /// Result list pane, when the list screen was drawn.
    pub list: Option<Extent>,
    /// Answer body pane, when a question screen was drawn.
    pub body: Option<Extent>,
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) -> ViewMetrics {
    match &app.screen {
        Screen::Results => render_results(app, frame),
        Screen::Question(view) => render_question(view, &app.banner, frame),
    }
}

// ============================================================================
// SCREEN: RESULT LIST
// ============================================================================

fn render_results(app: &App, frame: &mut Frame) -> ViewMetrics {
    let chunks = Layout::vertical([
        Constraint::Length(1), // prompt
        Constraint::Min(1),    // list
        Constraint::Length(1), // key hints
    ])
    .split(frame.area());

    let prompt = Paragraph::new(Span::styled("Select a question below:", theme::STYLE_DIM));
    frame.render_widget(prompt, chunks[0]);

    let lines = result_lines(&app.results.summaries, chunks[1].width as usize);
    let extent = Extent {
        total: lines.len(),
        height: chunks[1].height as usize,
    };
    let list = Paragraph::new(lines).scroll((scroll_u16(app.results.viewport.offset()), 0));
    frame.render_widget(list, chunks[1]);

    let footer = Paragraph::new(Span::styled(RESULTS_FOOTER, theme::STYLE_DIM));
    frame.render_widget(footer, chunks[2]);

    ViewMetrics {
        list: Some(extent),
        body: None,
    }
}

/// One styled block per summary: index + title, then the excerpt, then a
/// blank separator. Independent of viewport height; scrolling is the
/// viewport's job.
pub fn result_lines(summaries: &[QuestionSummary], width: usize) -> Vec<Line<'static>> {
    if summaries.is_empty() {
        return vec![Line::from(Span::styled("(no results)", theme::STYLE_DIM))];
    }
    let mut lines = Vec::new();
    for summary in summaries {
        let heading = format!("{}. {}", summary.index, summary.title);
        for wrapped in wrap_lines(&heading, width) {
            lines.push(Line::from(Span::styled(wrapped, theme::STYLE_WARNING)));
        }
        for wrapped in wrap_lines(&summary.excerpt, width) {
            lines.push(Line::from(wrapped));
        }
        lines.push(Line::from(""));
    }
    lines
}

// ============================================================================
// SCREEN: QUESTION VIEW
// ============================================================================

fn render_question(view: &QuestionView, banner: &StatusBanner, frame: &mut Frame) -> ViewMetrics {
    let area = frame.area();
    let width = area.width as usize;

    let header = header_lines(view, banner, width);
    let footer = footer_lines(view, width);
    let chunks = Layout::vertical([
        Constraint::Length(header.len() as u16),
        Constraint::Min(1),
        Constraint::Length(footer.len() as u16),
    ])
    .split(area);

    frame.render_widget(Paragraph::new(header), chunks[0]);

    let body = answer_lines(view, width);
    let extent = Extent {
        total: body.len(),
        height: chunks[1].height as usize,
    };
    let answer = Paragraph::new(body).scroll((scroll_u16(view.viewport.offset()), 0));
    frame.render_widget(answer, chunks[1]);

    frame.render_widget(Paragraph::new(footer), chunks[2]);

    ViewMetrics {
        list: None,
        body: Some(extent),
    }
}

/// Static header: banner line, title, description, stats, divider.
pub fn header_lines(view: &QuestionView, banner: &StatusBanner, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![match banner.message() {
        Some(message) => Line::from(Span::styled(message.to_string(), theme::STYLE_WARNING)),
        None => Line::from(""),
    }];
    let title = format!("Question: {}", view.detail.title);
    for wrapped in wrap_lines(&title, width) {
        lines.push(Line::from(Span::styled(wrapped, theme::STYLE_TITLE)));
    }
    for wrapped in wrap_lines(&view.detail.description, width) {
        lines.push(Line::from(wrapped));
    }
    for wrapped in wrap_lines(&view.detail.stats, width) {
        lines.push(Line::from(Span::styled(wrapped, theme::STYLE_METADATA)));
    }
    lines.push(Line::from(Span::styled(
        "-".repeat(width.max(1)),
        theme::STYLE_DIM,
    )));
    lines
}

/// Current answer, label first, wrapped to the pane width.
pub fn answer_lines(view: &QuestionView, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled("Answer: ", theme::STYLE_DIM))];
    for wrapped in wrap_lines(view.current_answer(), width) {
        lines.push(Line::from(wrapped));
    }
    lines
}

/// Question URL plus the static key-binding hint.
pub fn footer_lines(view: &QuestionView, width: usize) -> Vec<Line<'static>> {
    let _ = width;
    vec![
        Line::from(vec![
            Span::styled("Question URL: ", theme::STYLE_HEADING),
            Span::raw(view.url.clone()),
        ]),
        Line::from(Span::styled(QUESTION_FOOTER, theme::STYLE_DIM)),
    ]
}

fn scroll_u16(offset: usize) -> u16 {
    offset.min(u16::MAX as usize) as u16
}

// ============================================================================
// TESTS
// ============================================================================

//! Effects boundary: terminal lifecycle, event loop, input mapping.
//!
//! The only module with side effects. It wires the pure layers (state,
//! update, view) to the real terminal via crossterm and ratatui, and
//! performs the synchronous question fetch when the list requests one.
//!
//! Single-threaded and cooperative: the loop blocks on the next input
//! event, dispatches it to the current screen, re-renders, repeats. No
//! timers, no channels. Terminal restore is guaranteed on every exit
//! path, including fetch failures and panics.

use std::io;

use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::stackexchange::Client;
use crate::types::{Error, QuestionSummary};

use super::state::{Action, App, Dispatch, Screen};
use super::update::update;
use super::view::{ViewMetrics, render};

// ============================================================================
// INPUT MAPPING
// ============================================================================

/// Map a key event to a semantic action.
///
/// Every key maps to something: keys without a binding become
/// [`Action::Other`], which the result list treats as an exit request
/// and the question view ignores.
pub fn map_key(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Interrupt;
    }
    match key.code {
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Left => Action::Back,
        KeyCode::Char('n') | KeyCode::Char('N') => Action::NextAnswer,
        KeyCode::Char('b') | KeyCode::Char('B') => Action::PrevAnswer,
        KeyCode::Char('o') | KeyCode::Char('O') => Action::OpenBrowser,
        KeyCode::Char(c @ '0'..='9') => Action::Digit(c as u8 - b'0'),
        _ => Action::Other,
    }
}

/// Map a mouse event to a scroll action. Buttons other than the wheel
/// are unhandled; the loop skips them without consulting the screens.
pub fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Action::WheelDown),
        MouseEventKind::ScrollUp => Some(Action::WheelUp),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let terminal = (|| {
        io::stdout().execute(EnterAlternateScreen)?;
        io::stdout().execute(EnableMouseCapture)?;
        Terminal::new(CrosstermBackend::new(io::stdout()))
    })();
    // A half-finished setup must not strand the terminal in raw mode.
    if terminal.is_err() {
        let _ = restore_terminal();
    }
    terminal
}

fn restore_terminal() -> io::Result<()> {
    // Attempt every step even if an earlier one fails; raw mode in
    // particular must always be turned back off.
    let mouse = io::stdout().execute(DisableMouseCapture).map(|_| ());
    let screen = io::stdout().execute(LeaveAlternateScreen).map(|_| ());
    disable_raw_mode().and(screen).and(mouse)
}

/// Install a panic hook that restores the terminal before printing the
/// panic, so a crash never strands the terminal in raw mode.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BROWSER HAND-OFF
// ============================================================================

/// Open a URL with the platform's default opener. Fire-and-forget:
/// failures are not observed by the navigation engine.
pub fn open_in_browser(url: &str) {
    let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    };
    let _ = std::process::Command::new(program).args(args).arg(url).spawn();
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive session over a fetched result set.
///
/// Sets up the terminal, runs the loop until the user exits or a fetch
/// fails, and restores the terminal either way. Fetch errors propagate
/// to the caller after restore so `main` can report them and map the
/// exit code.
pub fn run(client: &Client, summaries: Vec<QuestionSummary>) -> Result<(), Error> {
    install_panic_hook();
    let mut terminal = setup_terminal().map_err(Error::Terminal)?;
    let result = event_loop(&mut terminal, client, App::new(summaries));
    finish(result, restore_terminal())
}

/// Combine the session outcome with the terminal-restore outcome. A
/// session error is always the one reported; a restore failure only
/// surfaces when the session itself succeeded.
fn finish(result: Result<(), Error>, restored: io::Result<()>) -> Result<(), Error> {
    match result {
        Ok(()) => restored.map_err(Error::Terminal),
        Err(e) => Err(e),
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &Client,
    mut app: App,
) -> Result<(), Error> {
    loop {
        let mut metrics = ViewMetrics::default();
        terminal.draw(|frame| {
            metrics = render(&app, frame);
        })?;
        sync_viewports(&mut app, &metrics);

        // Block until the user does something. Resize events fall
        // through and redraw on the next pass.
        let action = match event::read().map_err(Error::Terminal)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
            Event::Mouse(mouse) => match map_mouse(mouse) {
                Some(action) => action,
                None => continue,
            },
            _ => continue,
        };

        match update(&mut app, &action) {
            Dispatch::Continue => {}
            Dispatch::Exit => return Ok(()),
            Dispatch::OpenQuestion(index) => {
                if let Some(summary) = app.results.summaries.get(index) {
                    // Synchronous fetch; the loop blocks for the round
                    // trip and any failure ends the session cleanly.
                    let detail = client.question(summary)?;
                    let url = summary.link.clone();
                    app.open_question(detail, url);
                }
            }
            Dispatch::OpenBrowser(url) => open_in_browser(&url),
        }
    }
}

/// Feed the measured pane sizes from the last frame back into the
/// viewports so scroll clamping tracks resizes and content changes.
fn sync_viewports(app: &mut App, metrics: &ViewMetrics) {
    if let Some(extent) = metrics.list {
        app.results.viewport.set_extent(extent.total, extent.height);
    }
    if let Some(extent) = metrics.body {
        if let Screen::Question(view) = &mut app.screen {
            view.viewport.set_extent(extent.total, extent.height);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

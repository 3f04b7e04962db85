//! Interactive navigation engine.
//!
//! Split along pure/effect boundaries:
//! - `state`: pure data types (screens, cursor, viewport, banner)
//! - `update`: pure transitions, (App, Action) → Dispatch
//! - `view`: pure rendering to ratatui widgets
//! - `run`: effects (terminal lifecycle, event loop, fetch, browser)
//! - `theme`: style constants

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

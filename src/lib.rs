//! soterm: search Stack Overflow and browse answers from the terminal.

pub mod config;
pub mod stackexchange;
pub mod text;
pub mod tui;
pub mod types;

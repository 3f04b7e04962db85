//! TUI style constants.
//!
//! The palette of the original client, expressed as ratatui styles:
//! titles and headings in bright green, metadata in plain green,
//! de-emphasized labels in dark gray, list indices and status warnings
//! in yellow.

use ratatui::style::{Color, Modifier, Style};

/// Question title.
pub const STYLE_TITLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Section heading ("Question URL:").
pub const STYLE_HEADING: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Vote counts and view stats.
pub const STYLE_METADATA: Style = Style::new().fg(Color::Green);

/// De-emphasized labels and key-binding hints.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Result index + title rows, and transient status messages.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_styles_are_bold_green() {
        assert_eq!(STYLE_TITLE.fg, Some(Color::LightGreen));
        assert!(STYLE_TITLE.add_modifier.contains(Modifier::BOLD));
        assert!(STYLE_HEADING.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn supporting_styles_have_expected_colors() {
        assert_eq!(STYLE_METADATA.fg, Some(Color::Green));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
        assert_eq!(STYLE_WARNING.fg, Some(Color::Yellow));
    }
}

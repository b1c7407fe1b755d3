use ratatui::style::{Color, Modifier, Style};

use crate::domain::email::DisplayRow;

pub const ACCENT: Color = Color::Rgb(0x03, 0xAC, 0x13);
pub const FOCUS: Color = Color::Yellow;
pub const UNFOCUSED: Color = Color::DarkGray;
pub const ERROR: Color = Color::Red;

/// Unread rows are bold in the accent color; everything else is unstyled.
pub fn row_style(row: &DisplayRow) -> Style {
    if row.unread {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { FOCUS } else { UNFOCUSED })
}

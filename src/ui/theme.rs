use crate::catalog::ElementKind;
use ratatui::style::{Color, Modifier, Style};

/// Accent used for the scout button and active tab.
pub const ACCENT: Color = Color::Rgb(0x00, 0xf2, 0xff);
pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0xd7, 0x00);

pub fn element_color(kind: ElementKind) -> Color {
    match kind {
        ElementKind::Fire => Color::Rgb(0xef, 0x44, 0x44),
        ElementKind::Wind => Color::Rgb(0x4a, 0xde, 0x80),
        ElementKind::Wood => Color::Rgb(0x16, 0xa3, 0x4a),
        ElementKind::Earth => Color::Rgb(0xca, 0x8a, 0x04),
        ElementKind::Void => Color::Rgb(0x93, 0x33, 0xea),
    }
}

/// Unknown positions render grey.
pub fn position_color(position: &str) -> Color {
    match position.trim() {
        "GK" => Color::Rgb(0xea, 0xb3, 0x08),
        "DF" => Color::Rgb(0x3b, 0x82, 0xf6),
        "MF" => Color::Rgb(0x22, 0xc5, 0x5e),
        "FW" => Color::Rgb(0xef, 0x44, 0x44),
        _ => Color::Gray,
    }
}

pub fn element_style(kind: ElementKind) -> Style {
    Style::default().fg(element_color(kind))
}

pub fn position_style(position: &str) -> Style {
    Style::default()
        .fg(position_color(position))
        .add_modifier(Modifier::BOLD)
}

pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn selected_row_style() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT)
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

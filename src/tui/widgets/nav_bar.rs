//! Nav bar widget — one-line application banner above every screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Banner text shown in the nav bar.
pub const NAV_TITLE: &str = "Lambda Integration Testing Challenge";

/// Renders the nav bar: a red brand mark followed by `title`, on a dark background.
#[mutants::skip]
pub fn draw_nav_bar(title: &str, frame: &mut Frame, area: Rect) {
    let background = Style::default().bg(Color::Black);
    let spans = vec![
        Span::styled(
            " λ ",
            Style::default()
                .fg(Color::Red)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(title.to_string(), background.fg(Color::White)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)).style(background), area);
}

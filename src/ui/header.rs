use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::APP_NAME;

pub fn draw_header(f: &mut Frame<'_>, area: Rect, endpoint: &str) {
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("→ {}", endpoint), Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(title), area);
}

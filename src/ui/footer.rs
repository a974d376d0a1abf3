use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_footer(f: &mut Frame<'_>, area: Rect) {
    let instructions =
        "Enter or click Send to ask. PgUp/PgDn or Ctrl+U/Ctrl+D to scroll. Esc to quit.";

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

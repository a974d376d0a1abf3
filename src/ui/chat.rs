use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{chat_message::render_message, constants::INPUT_PROMPT, controller::ChatController};

pub fn draw_messages(f: &mut Frame<'_>, area: Rect, controller: &mut ChatController) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in controller.conversation().messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area.width));
    }

    if lines.is_empty() {
        let hint = Paragraph::new("Ask a question to get started.")
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center);
        f.render_widget(hint, area);
        return;
    }

    let height = area.height as usize;
    let offset = controller
        .log_view_mut()
        .resolve_offset(lines.len(), height);
    let end = offset.saturating_add(height).min(lines.len());
    let window: Vec<Line<'static>> = lines.drain(offset..end).collect();

    f.render_widget(Paragraph::new(window), area);
}

pub fn draw_input(f: &mut Frame<'_>, area: Rect, controller: &mut ChatController) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Input");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let send_width = controller.send_button().width();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(send_width)])
        .split(inner);

    // Leave one column for the cursor after the last character.
    let prompt_width = INPUT_PROMPT.width();
    let visible_width = (chunks[0].width as usize).saturating_sub(prompt_width + 1);
    let (tail, tail_width) = controller.input().visible_tail(visible_width);

    let input = Line::from(vec![
        Span::styled(INPUT_PROMPT, Style::default().fg(Color::DarkGray)),
        Span::styled(tail.to_string(), Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(input), chunks[0]);

    let button_style = if controller.input().value().trim().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(controller.send_button().label()).style(button_style),
        chunks[1],
    );
    controller.send_button_mut().set_area(chunks[1]);

    let cursor_offset = u16::try_from(prompt_width + tail_width).unwrap_or(u16::MAX);
    let cursor_x = chunks[0].x.saturating_add(cursor_offset);
    f.set_cursor_position((cursor_x, chunks[0].y));
}

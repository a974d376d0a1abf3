use crate::chat::{Message, MessageStatus, Sender};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Renders one message as a bubble: a header with time and status, the wrapped
/// body, and a closing rule. Fenced code blocks are kept unwrapped.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = base_style(message);
    let indent = indent(message);
    let mut lines = Vec::new();

    render_header(message, &mut lines, style, indent);
    render_content(message, &mut lines, width, style, indent);
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn indent(message: &Message) -> &'static str {
    match message.sender {
        Sender::User => "  ",
        Sender::Bot => "",
    }
}

fn base_style(message: &Message) -> Style {
    let style = Style::default().fg(match message.sender {
        Sender::User => Color::Rgb(255, 223, 128),
        Sender::Bot => Color::Rgb(144, 238, 144),
    });

    match (message.sender, message.status) {
        (_, MessageStatus::Failed) => style.fg(Color::Red),
        (Sender::Bot, MessageStatus::Sent) => style.add_modifier(Modifier::DIM),
        _ => style,
    }
}

fn status_icon(message: &Message) -> &'static str {
    match (message.sender, message.status) {
        (Sender::User, _) => "●",
        (Sender::Bot, MessageStatus::Sent) => "○",
        (Sender::Bot, MessageStatus::Streaming) => "◐",
        (Sender::Bot, MessageStatus::Completed) => "✓",
        (Sender::Bot, MessageStatus::Failed) => "✗",
    }
}

fn render_header(message: &Message, lines: &mut Vec<Line<'static>>, style: Style, indent: &str) {
    let who = match message.sender {
        Sender::User => "You",
        Sender::Bot => "Bot",
    };

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(who.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(" ", style),
        Span::styled(
            message.timestamp.format("%H:%M").to_string(),
            style.add_modifier(Modifier::DIM),
        ),
        Span::styled(" ", style),
        Span::styled(status_icon(message).to_string(), style),
    ]));
}

fn render_content(
    message: &Message,
    lines: &mut Vec<Line<'static>>,
    width: u16,
    style: Style,
    indent: &str,
) {
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut text_buffer = String::new();

    for line in message.content.lines() {
        // Fence lines stay visible and take the code style of the block they bound.
        if line.trim().starts_with("```") {
            if in_code_block {
                code_buffer.push_str(line);
                code_buffer.push('\n');
                flush_code(lines, &code_buffer, style, indent);
                code_buffer.clear();
            } else {
                flush_text(lines, &text_buffer, width, style, indent);
                text_buffer.clear();
                code_buffer.push_str(line);
                code_buffer.push('\n');
            }
            in_code_block = !in_code_block;
            continue;
        }

        let buffer = if in_code_block {
            &mut code_buffer
        } else {
            &mut text_buffer
        };
        buffer.push_str(line);
        buffer.push('\n');
    }

    flush_text(lines, &text_buffer, width, style, indent);
    flush_code(lines, &code_buffer, style, indent);
}

fn flush_text(lines: &mut Vec<Line<'static>>, buffer: &str, width: u16, style: Style, indent: &str) {
    if buffer.is_empty() {
        return;
    }

    let wrap_width = (width as usize)
        .saturating_sub(indent.len() + 2)
        .max(1);
    for wrapped in buffer.lines().flat_map(|l| {
        if l.is_empty() {
            vec![std::borrow::Cow::Borrowed("")]
        } else {
            wrap(l, wrap_width)
        }
    }) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped.into_owned(), style),
        ]));
    }
}

fn flush_code(lines: &mut Vec<Line<'static>>, buffer: &str, style: Style, indent: &str) {
    if buffer.is_empty() {
        return;
    }

    let code_style = Style::default()
        .fg(Color::Rgb(209, 154, 102))
        .add_modifier(Modifier::BOLD);

    for code_line in buffer.lines() {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled("▎".to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {}", code_line), code_style),
        ]));
    }
}

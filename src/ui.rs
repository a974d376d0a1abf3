// src/ui.rs

pub mod chat;
pub mod footer;
pub mod header;

use crate::{controller::ChatController, status_indicator::StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Draws the whole screen: header, conversation, status line, input row, footer.
pub fn draw(f: &mut Frame, controller: &mut ChatController, status: &StatusIndicator, endpoint: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Messages
            Constraint::Length(1), // Status
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    header::draw_header(f, chunks[0], endpoint);
    chat::draw_messages(f, chunks[1], controller);
    status.render(f, chunks[2]);
    chat::draw_input(f, chunks[3], controller);
    footer::draw_footer(f, chunks[4]);
}

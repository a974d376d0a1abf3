use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// One-line activity indicator shown above the input while answers stream in.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    in_flight: usize,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_in_flight(&mut self, in_flight: usize) {
        self.in_flight = in_flight;
    }

    pub fn update_spinner(&mut self) {
        if self.in_flight > 0 {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn status_text(&self) -> String {
        match self.in_flight {
            0 => String::new(),
            1 => "Waiting for answer...".to_string(),
            n => format!("Waiting for {} answers...", n),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner = if self.in_flight > 0 {
            SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()]
        } else {
            " "
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(self.status_text(), Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(status).alignment(Alignment::Left), area);
    }
}

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::constants::SEND_LABEL;

/// Single-line text input. Editing always happens at the end of the buffer.
#[derive(Debug, Default)]
pub struct InputField {
    buffer: String,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Longest suffix of the text that fits in `max_width` columns, with its width.
    pub fn visible_tail(&self, max_width: usize) -> (&str, usize) {
        let mut width = 0;
        let mut start = self.buffer.len();
        for (idx, c) in self.buffer.char_indices().rev() {
            let w = c.width().unwrap_or(0);
            if width + w > max_width {
                break;
            }
            width += w;
            start = idx;
        }
        (&self.buffer[start..], width)
    }
}

/// The send control. Its area is recorded on every draw so clicks can be hit-tested.
#[derive(Debug)]
pub struct SendButton {
    label: &'static str,
    area: Option<Rect>,
}

impl Default for SendButton {
    fn default() -> Self {
        Self {
            label: SEND_LABEL,
            area: None,
        }
    }
}

impl SendButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn width(&self) -> u16 {
        self.label.width() as u16
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        match self.area {
            Some(area) => {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_edits_at_end() {
        let mut input = InputField::new();
        for c in "héllo".chars() {
            input.push(c);
        }
        input.pop();
        assert_eq!(input.value(), "héll");
        assert_eq!(input.visible_tail(usize::MAX).1, 4);
    }

    #[test]
    fn visible_tail_keeps_the_end() {
        let mut input = InputField::new();
        for c in "abc界def".chars() {
            input.push(c);
        }
        assert_eq!(input.visible_tail(100), ("abc界def", 8));
        assert_eq!(input.visible_tail(4), ("def", 3));
        assert_eq!(input.visible_tail(5), ("界def", 5));
        assert_eq!(input.visible_tail(0), ("", 0));
    }

    #[test]
    fn tail_width_is_not_truncated_for_long_input() {
        let mut input = InputField::new();
        for _ in 0..70_000 {
            input.push('a');
        }
        assert_eq!(input.visible_tail(usize::MAX).1, 70_000);
        assert_eq!(input.visible_tail(10).1, 10);
    }

    #[test]
    fn send_button_hit_test() {
        let mut button = SendButton::new();
        assert!(!button.contains(0, 0));
        button.set_area(Rect::new(10, 5, 8, 1));
        assert!(button.contains(10, 5));
        assert!(button.contains(17, 5));
        assert!(!button.contains(18, 5));
        assert!(!button.contains(12, 6));
    }
}

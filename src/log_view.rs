use crate::chat::ConversationLog;

/// Scrollable view over the conversation log.
///
/// While `follow` is set the view sticks to the newest line; the real offset is
/// resolved at draw time once the rendered height is known.
#[derive(Debug)]
pub struct LogView {
    pub log: ConversationLog,
    pub scroll_offset: usize,
    follow: bool,
    max_scroll: usize,
}

impl Default for LogView {
    fn default() -> Self {
        Self {
            log: ConversationLog::new(),
            scroll_offset: 0,
            follow: true,
            max_scroll: 0,
        }
    }
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_to_end(&mut self) {
        self.follow = true;
        self.scroll_offset = self.max_scroll;
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
        if self.scroll_offset == self.max_scroll {
            self.follow = true;
        }
    }

    /// Records the content height against the viewport height and returns the
    /// offset to draw with.
    pub fn resolve_offset(&mut self, total_lines: usize, viewport_height: usize) -> usize {
        self.max_scroll = total_lines.saturating_sub(viewport_height);
        if self.follow || self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
        self.scroll_offset
    }
}

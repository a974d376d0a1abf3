use chrono::{DateTime, Local};

use crate::constants::PLACEHOLDER_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Lifecycle of a message. Bot messages walk `Sent -> Streaming -> Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Sent,
    Streaming,
    Completed,
    Failed,
}

impl MessageStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MessageStatus::Sent | MessageStatus::Streaming)
    }
}

/// Represents a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub status: MessageStatus,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            status: MessageStatus::Sent,
            timestamp: Local::now(),
        }
    }

    pub fn bot_placeholder() -> Self {
        Self {
            sender: Sender::Bot,
            content: PLACEHOLDER_TEXT.to_string(),
            status: MessageStatus::Sent,
            timestamp: Local::now(),
        }
    }
}

/// Handle to a message inside a [`ConversationLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(usize);

impl MessageId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Append-only, chronologically ordered list of messages.
///
/// Entries are never removed or reordered; only the content and status of an
/// existing entry can change.
#[derive(Debug, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) -> MessageId {
        self.messages.push(message);
        MessageId(self.messages.len() - 1)
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.get(id.0)
    }

    pub fn set_content(&mut self, id: MessageId, content: impl Into<String>) {
        if let Some(message) = self.messages.get_mut(id.0) {
            message.content = content.into();
        }
    }

    pub fn set_status(&mut self, id: MessageId, status: MessageStatus) {
        if let Some(message) = self.messages.get_mut(id.0) {
            message.status = status;
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of bot messages still waiting on their answer.
    pub fn pending(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender == Sender::Bot && m.status.is_pending())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_sequential_handles() {
        let mut log = ConversationLog::new();
        let a = log.append(Message::user("hi"));
        let b = log.append(Message::bot_placeholder());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(log.get(b).unwrap().content, PLACEHOLDER_TEXT);
    }

    #[test]
    fn set_content_only_touches_target() {
        let mut log = ConversationLog::new();
        let user = log.append(Message::user("question"));
        let bot = log.append(Message::bot_placeholder());
        log.set_content(bot, "answer");
        assert_eq!(log.get(user).unwrap().content, "question");
        assert_eq!(log.get(bot).unwrap().content, "answer");
    }

    #[test]
    fn pending_counts_unfinished_bot_messages() {
        let mut log = ConversationLog::new();
        log.append(Message::user("a"));
        let first = log.append(Message::bot_placeholder());
        log.append(Message::user("b"));
        log.append(Message::bot_placeholder());
        assert_eq!(log.pending(), 2);
        log.set_status(first, MessageStatus::Completed);
        assert_eq!(log.pending(), 1);
    }
}

use crate::{
    chat::{ConversationLog, Message, MessageStatus},
    constants::{FALLBACK_TEXT, SCROLL_STEP},
    input::{InputField, SendButton},
    log_view::LogView,
    turn::{PendingTurn, TurnEvent},
};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// The three UI elements the controller drives, built before it exists.
#[derive(Debug, Default)]
pub struct UiHandles {
    pub input: InputField,
    pub send: SendButton,
    pub log: LogView,
}

/// What the event loop should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Submit(PendingTurn),
    Quit,
}

impl From<Option<PendingTurn>> for Action {
    fn from(turn: Option<PendingTurn>) -> Self {
        turn.map_or(Action::None, Action::Submit)
    }
}

/// Owns the chat UI state and turns user input into turns.
#[derive(Debug)]
pub struct ChatController {
    input: InputField,
    send: SendButton,
    log_view: LogView,
}

impl ChatController {
    pub fn initialize(handles: UiHandles) -> Self {
        Self {
            input: handles.input,
            send: handles.send,
            log_view: handles.log,
        }
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    pub fn send_button(&self) -> &SendButton {
        &self.send
    }

    pub fn send_button_mut(&mut self) -> &mut SendButton {
        &mut self.send
    }

    pub fn log_view(&self) -> &LogView {
        &self.log_view
    }

    pub fn log_view_mut(&mut self) -> &mut LogView {
        &mut self.log_view
    }

    pub fn conversation(&self) -> &ConversationLog {
        &self.log_view.log
    }

    /// Turns waiting on an answer.
    pub fn in_flight(&self) -> usize {
        self.log_view.log.pending()
    }

    /// Starts a turn from the current input.
    ///
    /// Blank input does nothing. Otherwise the user message and a bot
    /// placeholder are appended, the input is cleared, and the returned turn
    /// must be sent exactly once.
    pub fn submit_turn(&mut self) -> Option<PendingTurn> {
        let question = self.input.value().trim().to_string();
        if question.is_empty() {
            return None;
        }

        self.log_view.log.append(Message::user(question.clone()));
        self.input.clear();
        let bot = self.log_view.log.append(Message::bot_placeholder());
        self.log_view.scroll_to_end();

        Some(PendingTurn { question, bot })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        match key.code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => self.submit_turn().into(),
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::PageUp => {
                self.log_view.scroll_up(SCROLL_STEP);
                Action::None
            }
            KeyCode::PageDown => {
                self.log_view.scroll_down(SCROLL_STEP);
                Action::None
            }
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'c' => Action::Quit,
                'u' => {
                    self.log_view.scroll_up(SCROLL_STEP);
                    Action::None
                }
                'd' => {
                    self.log_view.scroll_down(SCROLL_STEP);
                    Action::None
                }
                _ => Action::None,
            },
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if self.send.contains(mouse.column, mouse.row) =>
            {
                self.submit_turn().into()
            }
            MouseEventKind::ScrollUp => {
                self.log_view.scroll_up(1);
                Action::None
            }
            MouseEventKind::ScrollDown => {
                self.log_view.scroll_down(1);
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn apply(&mut self, event: TurnEvent) {
        let log = &mut self.log_view.log;
        match event {
            TurnEvent::Streaming(id) => {
                log.set_content(id, String::new());
                log.set_status(id, MessageStatus::Streaming);
            }
            TurnEvent::Progress { id, text } => {
                log.set_content(id, text);
                self.log_view.scroll_to_end();
            }
            TurnEvent::Completed(id) => {
                log.set_status(id, MessageStatus::Completed);
            }
            TurnEvent::Failed(id) => {
                log.set_content(id, FALLBACK_TEXT);
                log.set_status(id, MessageStatus::Failed);
            }
        }
    }
}

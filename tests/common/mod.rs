use ask_chat::{
    api::{AnswerStream, Transport},
    controller::ChatController,
    errors::{ChatError, ChatResult},
    turn::{run_turn, PendingTurn, TurnEvent, TurnOutcome},
};
use futures::{future::BoxFuture, stream, StreamExt};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Step {
    Chunk(Vec<u8>),
    Fail(&'static str),
}

pub fn chunks(parts: &[&str]) -> Vec<Step> {
    parts
        .iter()
        .map(|p| Step::Chunk(p.as_bytes().to_vec()))
        .collect()
}

/// Replays a fixed body for every question and records what was asked.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Vec<Step>,
    refuse: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            script,
            ..Default::default()
        })
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            refuse: true,
            ..Default::default()
        })
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn ask(&self, question: String) -> BoxFuture<'static, ChatResult<AnswerStream>> {
        self.asked.lock().unwrap().push(question);
        let refuse = self.refuse;
        let items: Vec<ChatResult<Vec<u8>>> = self
            .script
            .iter()
            .map(|step| match step {
                Step::Chunk(bytes) => Ok(bytes.clone()),
                Step::Fail(msg) => Err(ChatError::stream_error(*msg)),
            })
            .collect();

        Box::pin(async move {
            if refuse {
                return Err(ChatError::stream_error("connection refused"));
            }
            Ok(stream::iter(items).boxed())
        })
    }
}

/// Runs one turn and applies its events to the controller in order.
/// Returns the bot bubble's text after each applied event.
pub async fn run_and_apply(
    controller: &mut ChatController,
    transport: Arc<dyn Transport>,
    turn: PendingTurn,
) -> (TurnOutcome, Vec<String>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let bot = turn.bot;
    let outcome = run_turn(transport, turn, tx).await;

    let mut shown = Vec::new();
    while let Ok(event) = rx.try_recv() {
        let is_progress = matches!(event, TurnEvent::Progress { .. });
        controller.apply(event);
        if is_progress {
            shown.push(controller.conversation().get(bot).unwrap().content.clone());
        }
    }
    (outcome, shown)
}

pub fn type_text(controller: &mut ChatController, text: &str) {
    for c in text.chars() {
        controller.input_mut().push(c);
    }
}
